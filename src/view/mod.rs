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

//! Rendering of records into the panel's display slots
//!
//! A [`Page`] stands in for the document: slots are addressed by element id
//! and receive HTML by direct assignment.

mod memory;
pub mod render;

use serde::{Deserialize, Serialize};

pub use memory::MemoryPage;

/// A file download offered to the user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Download {
    /// Link target, usually a `data:` URI
    pub href: String,
    /// Suggested file name
    pub filename: String,
    /// Browsing context the link opens in
    pub target: String,
}

/// The surface handlers render into
pub trait Page {
    /// Replace the content of a slot
    fn set_html(&mut self, slot: &str, html: &str);

    /// Blocking notification shown to the user
    fn alert(&mut self, message: &str);

    /// Close a modal dialog
    fn hide_modal(&mut self, modal: &str);

    /// Force a full reload of the current page
    fn reload(&mut self);

    /// Offer a file for download
    fn download(&mut self, download: Download);
}

/// Element ids written by the panel
pub mod slots {
    // Post detail
    pub const TITLE: &str = "title";
    pub const DESCRIPTION: &str = "description";
    pub const STATUS: &str = "status";

    // Shared audit slots on both detail views
    pub const CREATED_DATE: &str = "created_date";
    pub const CREATED_USER: &str = "created_user";
    pub const UPDATED_DATE: &str = "updated_date";
    pub const UPDATED_USER: &str = "updated_user";

    // User detail
    pub const USER_PROFILE: &str = "user-detail-profile";
    pub const USER_NAME: &str = "user-name";
    pub const USER_TYPE: &str = "user-type";
    pub const USER_EMAIL: &str = "user-email";
    pub const USER_PHONE: &str = "user-phone";
    pub const USER_DOB: &str = "user-dob";
    pub const USER_ADDRESS: &str = "user-address";

    // Post delete confirmation
    pub const POST_DELETE_ID: &str = "post-delete-id";
    pub const POST_DELETE_TITLE: &str = "post-delete-title";
    pub const POST_DELETE_DESCRIPTION: &str = "post-delete-description";
    pub const POST_DELETE_STATUS: &str = "post-delete-status";

    // User delete confirmation
    pub const USER_DELETE_ID: &str = "user-delete-id";
    pub const USER_DELETE_NAME: &str = "user-delete-name";
    pub const USER_DELETE_TYPE: &str = "user-delete-type";
    pub const USER_DELETE_EMAIL: &str = "user-delete-email";
    pub const USER_DELETE_PHONE: &str = "user-delete-phone";
    pub const USER_DELETE_DOB: &str = "user-delete-dob";
    pub const USER_DELETE_ADDRESS: &str = "user-delete-address";
}

/// Modal dialogs closed after a delete
pub mod modals {
    pub const POST_DELETE: &str = "detailDelModal";
    pub const USER_DELETE: &str = "userDelModal";
}
