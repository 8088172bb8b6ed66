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

//! Bulletin Board backend API

pub mod client;
pub mod converter;
mod error;

use async_trait::async_trait;

use crate::models::{Post, User};

pub use client::AdminClient;
pub use error::AdminError;

/// Backend operations used by the panel
///
/// Every call is a single independent request. Nothing is cached and no call
/// depends on another having run first.
#[async_trait]
pub trait AdminApi: Send + Sync {
    /// `POST /accounts/login/`, returning the new session id
    async fn login(&self, email: &str, password: &str) -> Result<String, AdminError>;

    /// `GET /post/detail?post_id=`
    async fn post_detail(&self, post_id: &str) -> Result<Post, AdminError>;

    /// `GET /user/detail?user_id=`
    async fn user_detail(&self, user_id: &str) -> Result<User, AdminError>;

    /// `GET /post/delete/confirm?post_id=`
    async fn post_delete_confirm(&self, post_id: &str) -> Result<Post, AdminError>;

    /// `GET /post/delete?post_id=`
    async fn post_delete(&self, post_id: &str) -> Result<(), AdminError>;

    /// `GET /user/delete/confirm?user_id=`
    async fn user_delete_confirm(&self, user_id: &str) -> Result<User, AdminError>;

    /// `GET /user/delete?user_id=`
    async fn user_delete(&self, user_id: &str) -> Result<(), AdminError>;

    /// `GET /post/list/download`, returning the CSV text untouched
    async fn post_list_csv(&self) -> Result<String, AdminError>;
}
