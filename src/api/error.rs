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

//! Errors surfaced by panel operations

use thiserror::Error;

/// Failure of a backend call
#[derive(Debug, Error)]
pub enum AdminError {
    /// The backend rejected the call with `{ "error": "..." }`.
    /// Displays as the server message, unchanged.
    #[error("{message}")]
    Remote { status: u16, message: String },

    /// Non-success response without a readable `error` key
    #[error("Server returned {status} without an error message")]
    MalformedError { status: u16, body: String },

    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Failed to write export: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid backend URL: {0}")]
    InvalidBaseUrl(String),

    /// The backend sent the request to its login page
    #[error("Login required")]
    NotAuthenticated,

    /// The login form was not accepted
    #[error("Login failed: {0}")]
    LoginRejected(String),
}

impl AdminError {
    /// Whether the backend itself answered with an error
    pub fn is_remote(&self) -> bool {
        matches!(self, AdminError::Remote { .. } | AdminError::MalformedError { .. })
    }

    /// Whether the call failed for lack of a valid session
    pub fn is_auth(&self) -> bool {
        matches!(self, AdminError::NotAuthenticated | AdminError::LoginRejected(_))
    }
}
