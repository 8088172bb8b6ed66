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

//! User model representing a bulletin board account

use serde::{Deserialize, Serialize};

use super::record::code;

/// Account type of a user
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum UserType {
    Admin,
    User,
}

impl UserType {
    /// Translate the backend type code. Only `"0"` is an admin.
    pub fn from_code(code: &str) -> Self {
        if code == "0" {
            UserType::Admin
        } else {
            UserType::User
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            UserType::Admin => "Admin",
            UserType::User => "User",
        }
    }
}

/// Fields of a serialized user as sent by the backend
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UserFields {
    pub name: String,
    #[serde(rename = "type", deserialize_with = "code")]
    pub user_type: String,
    pub email: String,
    pub phone: Option<String>,
    pub dob: Option<String>,
    pub address: Option<String>,
    /// Image path relative to the static root
    pub profile: Option<String>,
    pub created_user_id: Option<i64>,
    pub updated_user_id: Option<i64>,
    pub delete_user_id: Option<i64>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub deleted_at: Option<String>,
}

/// A user as displayed by the panel
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    /// Unique identifier
    pub id: i64,

    pub name: String,

    #[serde(rename = "type")]
    pub user_type: UserType,

    pub email: String,

    pub phone: String,

    /// Date of birth, rendered verbatim
    pub dob: String,

    pub address: String,

    /// Profile image path; `None` when the user has no image
    pub profile: Option<String>,

    pub created_at: String,

    pub created_by: String,

    pub updated_at: String,

    pub updated_by: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_code_zero_is_admin() {
        assert_eq!(UserType::from_code("0").label(), "Admin");
        for other in ["1", "", "00", "admin"] {
            assert_eq!(UserType::from_code(other).label(), "User", "code {:?}", other);
        }
    }

    #[test]
    fn test_fields_decode_type_key_and_nulls() {
        let fields: UserFields = serde_json::from_value(serde_json::json!({
            "name": "Mya",
            "type": "0",
            "email": "mya@example.com",
            "phone": null,
            "dob": "1995-03-04",
            "address": null,
            "profile": ""
        }))
        .unwrap();

        assert_eq!(fields.user_type, "0");
        assert!(fields.phone.is_none());
        assert_eq!(fields.dob.as_deref(), Some("1995-03-04"));
        assert_eq!(fields.profile.as_deref(), Some(""));
    }
}
