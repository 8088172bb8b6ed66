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

//! Post model representing a bulletin board post

use serde::{Deserialize, Serialize};

use super::record::code;

/// Publication status of a post
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PostStatus {
    Active,
    NotActive,
}

impl PostStatus {
    /// Translate the backend status code. Only `"1"` is active.
    pub fn from_code(code: &str) -> Self {
        if code == "1" {
            PostStatus::Active
        } else {
            PostStatus::NotActive
        }
    }

    /// Display label
    pub fn label(self) -> &'static str {
        match self {
            PostStatus::Active => "Active",
            PostStatus::NotActive => "Not Active",
        }
    }
}

/// Fields of a serialized post as sent by the backend
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PostFields {
    pub title: String,
    pub description: String,
    #[serde(deserialize_with = "code")]
    pub status: String,
    /// Owning user id
    pub user: Option<i64>,
    pub created_user_id: Option<i64>,
    pub updated_user_id: Option<i64>,
    pub delete_user_id: Option<i64>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub deleted_at: Option<String>,
}

/// A post as displayed by the panel
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Post {
    /// Unique identifier
    pub id: i64,

    pub title: String,

    pub description: String,

    pub status: PostStatus,

    /// Creation timestamp, rendered verbatim
    pub created_at: String,

    /// Display name of the creator (empty on confirmation records)
    pub created_by: String,

    /// Last update timestamp, rendered verbatim
    pub updated_at: String,

    /// Display name of the last updater (empty on confirmation records)
    pub updated_by: String,
}
