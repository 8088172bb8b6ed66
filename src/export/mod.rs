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

//! Post list CSV export
//!
//! The CSV body is never parsed or rewritten. It is either offered as a
//! `data:` URI download or written to disk under a timestamped name.

use chrono::{Datelike, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::api::AdminError;
use crate::view::Download;

/// Prefix of the download link
pub const DATA_URI_PREFIX: &str = "data:text/csv;charset=utf-8,";
/// Characters `encodeURI` leaves alone besides ASCII letters and digits
const URI_UNRESERVED: &str = "-_.!~*'();/?:@&=+$,#";

/// How the export timestamp is written into the file name
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TimestampStyle {
    /// `YYYYMMDDHHMMSS`, zero padded
    #[default]
    Padded,
    /// Unpadded field concatenation, e.g. `2024315930` for 2024-03-01 05:09:30
    Legacy,
}

/// Render the file name stamp for `at`
pub fn stamp(at: NaiveDateTime, style: TimestampStyle) -> String {
    match style {
        TimestampStyle::Padded => at.format("%Y%m%d%H%M%S").to_string(),
        TimestampStyle::Legacy => format!(
            "{}{}{}{}{}{}",
            at.year(),
            at.month(),
            at.day(),
            at.hour(),
            at.minute(),
            at.second()
        ),
    }
}

/// `post_list<stamp>_.csv`
pub fn filename(stamp: &str) -> String {
    format!("post_list{}_.csv", stamp)
}

/// Percent-encode like ECMAScript `encodeURI`
pub fn encode_uri(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut buf = [0u8; 4];

    for c in input.chars() {
        if c.is_ascii_alphanumeric() || URI_UNRESERVED.contains(c) {
            out.push(c);
        } else {
            out.push_str(&urlencoding::encode(c.encode_utf8(&mut buf)));
        }
    }

    out
}

/// A fetched post list ready to be handed to the user
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CsvExport {
    /// CSV text exactly as the backend sent it
    pub body: String,
    pub filename: String,
}

impl CsvExport {
    pub fn new(body: String, at: NaiveDateTime, style: TimestampStyle) -> Self {
        Self {
            body,
            filename: filename(&stamp(at, style)),
        }
    }

    pub fn data_uri(&self) -> String {
        format!("{}{}", DATA_URI_PREFIX, encode_uri(&self.body))
    }

    /// Download link opening in a new browsing context
    pub fn to_download(&self) -> Download {
        Download {
            href: self.data_uri(),
            filename: self.filename.clone(),
            target: "_blank".to_string(),
        }
    }

    /// Save the body under `dir`, creating it if needed
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf, AdminError> {
        std::fs::create_dir_all(dir)?;
        let path = dir.join(&self.filename);
        std::fs::write(&path, self.body.as_bytes())?;

        info!("Post list exported to {}", path.display());
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, s)
            .unwrap()
    }

    fn is_export_name(name: &str) -> bool {
        name.strip_prefix("post_list")
            .and_then(|rest| rest.strip_suffix("_.csv"))
            .map(|digits| !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()))
            .unwrap_or(false)
    }

    #[test]
    fn test_stamp_styles() {
        let t = at(2024, 3, 1, 5, 9, 30);

        assert_eq!(stamp(t, TimestampStyle::Padded), "20240301050930");
        assert_eq!(stamp(t, TimestampStyle::Legacy), "2024315930");
    }

    #[test]
    fn test_filename_pattern() {
        let t = at(2023, 12, 31, 23, 59, 59);

        for style in [TimestampStyle::Padded, TimestampStyle::Legacy] {
            let export = CsvExport::new(String::new(), t, style);
            assert!(is_export_name(&export.filename), "{}", export.filename);
        }
    }

    #[test]
    fn test_data_uri_keeps_body_verbatim() {
        let export = CsvExport::new("a,b\n1,2".to_string(), at(2024, 1, 1, 0, 0, 0), TimestampStyle::Padded);

        assert_eq!(export.body, "a,b\n1,2");
        assert_eq!(export.data_uri(), "data:text/csv;charset=utf-8,a,b%0A1,2");

        let download = export.to_download();
        assert_eq!(download.filename, "post_list20240101000000_.csv");
        assert_eq!(download.target, "_blank");
    }

    #[test]
    fn test_encode_uri_matches_ecmascript() {
        assert_eq!(encode_uri("id,title\r\n"), "id,title%0D%0A");
        assert_eq!(encode_uri("a b\"c%"), "a%20b%22c%25");
        assert_eq!(encode_uri("#;/?:@&=+$"), "#;/?:@&=+$");
        assert_eq!(encode_uri("ü"), "%C3%BC");
    }

    #[test]
    fn test_write_to_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let export = CsvExport::new("id,title\n1,Hi\n".to_string(), at(2024, 6, 1, 12, 0, 0), TimestampStyle::Padded);

        let path = export.write_to(&dir.path().join("exports")).unwrap();

        assert_eq!(path.file_name().unwrap(), "post_list20240601120000_.csv");
        assert_eq!(std::fs::read_to_string(path).unwrap(), "id,title\n1,Hi\n");
    }
}
