// Bulletin Admin - Rust client core for the Bulletin Board administration panel
// Copyright (C) 2025 Bulletin Board Contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Recording page used by the IPC and CLI front ends

use serde::Serialize;

use super::{Download, Page};

/// One slot assignment, in the order it happened
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SlotWrite {
    pub slot: String,
    pub html: String,
}

/// A page that records every update instead of touching a document
#[derive(Debug, Clone, Default, Serialize)]
pub struct MemoryPage {
    pub writes: Vec<SlotWrite>,
    pub alerts: Vec<String>,
    pub hidden_modals: Vec<String>,
    pub reloaded: bool,
    pub download: Option<Download>,
}

impl MemoryPage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current content of a slot (the last write wins)
    #[cfg(test)]
    pub fn slot(&self, slot: &str) -> Option<&str> {
        self.writes
            .iter()
            .rev()
            .find(|w| w.slot == slot)
            .map(|w| w.html.as_str())
    }

    /// Whether nothing has been written, hidden, reloaded or downloaded
    pub fn is_untouched(&self) -> bool {
        self.writes.is_empty()
            && self.hidden_modals.is_empty()
            && !self.reloaded
            && self.download.is_none()
    }
}

impl Page for MemoryPage {
    fn set_html(&mut self, slot: &str, html: &str) {
        self.writes.push(SlotWrite {
            slot: slot.to_string(),
            html: html.to_string(),
        });
    }

    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }

    fn hide_modal(&mut self, modal: &str) {
        self.hidden_modals.push(modal.to_string());
    }

    fn reload(&mut self) {
        self.reloaded = true;
    }

    fn download(&mut self, download: Download) {
        self.download = Some(download);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_write_wins() {
        let mut page = MemoryPage::new();
        page.set_html("title", "first");
        page.set_html("status", "Active");
        page.set_html("title", "second");

        assert_eq!(page.slot("title"), Some("second"));
        assert_eq!(page.slot("status"), Some("Active"));
        assert_eq!(page.slot("missing"), None);
        assert_eq!(page.writes.len(), 3);
    }

    #[test]
    fn test_alert_does_not_count_as_touch() {
        let mut page = MemoryPage::new();
        page.alert("boom");

        assert!(page.is_untouched());
        page.reload();
        assert!(!page.is_untouched());
    }
}
