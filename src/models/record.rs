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

//! Wire envelope shared by every record endpoint
//!
//! The backend serializes a single model instance as
//! `{ "model": "...", "pk": 1, "fields": { ... } }` and the detail views add
//! the display names of the creating and updating users next to `fields`.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A serialized model instance as returned by the backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Record<F> {
    /// Model label, e.g. `bulletinboard.post`
    #[serde(default)]
    pub model: String,

    /// Primary key
    pub pk: i64,

    /// Model fields
    pub fields: F,

    /// Name of the user who created the record (detail views only)
    #[serde(default)]
    pub created_user_name: Option<String>,

    /// Name of the user who last updated the record (detail views only)
    #[serde(default)]
    pub updated_user_name: Option<String>,
}

/// Accept a small code sent either as `"1"` or as `1`
pub(crate) fn code<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => s,
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Coded {
        #[serde(deserialize_with = "code", default)]
        status: String,
    }

    #[test]
    fn test_code_accepts_strings_and_numbers() {
        let s: Coded = serde_json::from_str(r#"{"status":"1"}"#).unwrap();
        let n: Coded = serde_json::from_str(r#"{"status":1}"#).unwrap();
        let null: Coded = serde_json::from_str(r#"{"status":null}"#).unwrap();
        let missing: Coded = serde_json::from_str("{}").unwrap();

        assert_eq!(s.status, "1");
        assert_eq!(n.status, "1");
        assert_eq!(null.status, "");
        assert_eq!(missing.status, "");
    }

    #[test]
    fn test_record_envelope_names_are_optional() {
        let record: Record<Value> =
            serde_json::from_str(r#"{"model":"bulletinboard.post","pk":3,"fields":{}}"#).unwrap();

        assert_eq!(record.pk, 3);
        assert!(record.created_user_name.is_none());
        assert!(record.updated_user_name.is_none());
    }
}
