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

//! In-memory backend for handler tests

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::api::{AdminApi, AdminError};
use crate::models::{Post, PostStatus, User, UserType};

pub(crate) struct FakeApi {
    posts: HashMap<String, Post>,
    users: HashMap<String, User>,
    export: Result<String, String>,
    calls: Mutex<Vec<String>>,
}

fn not_found(entity: &str) -> AdminError {
    AdminError::Remote {
        status: 404,
        message: format!("{} does not exist", entity),
    }
}

/// Credentials accepted by [`FakeApi::login`]
pub(crate) const EMAIL: &str = "admin@example.com";
pub(crate) const PASSWORD: &str = "secret";

impl FakeApi {
    /// Posts 1 (active) and 2 (inactive), users 1 (admin with image) and 2 (user without)
    pub(crate) fn seeded() -> Self {
        let post = |id: i64, title: &str, status| Post {
            id,
            title: title.to_string(),
            description: format!("{} body", title),
            status,
            created_at: "2022-05-01T10:00:00Z".to_string(),
            created_by: "Admin".to_string(),
            updated_at: "2022-05-02T10:00:00Z".to_string(),
            updated_by: "Admin".to_string(),
        };
        let user = |id: i64, name: &str, user_type, profile: Option<&str>| User {
            id,
            name: name.to_string(),
            user_type,
            email: format!("{}@example.com", name.to_lowercase()),
            phone: "09123456".to_string(),
            dob: "1990-01-01".to_string(),
            address: "Yangon".to_string(),
            profile: profile.map(str::to_string),
            created_at: "2022-05-01T10:00:00Z".to_string(),
            created_by: "Admin".to_string(),
            updated_at: "2022-05-02T10:00:00Z".to_string(),
            updated_by: "Admin".to_string(),
        };

        Self {
            posts: HashMap::from([
                ("1".to_string(), post(1, "Notice", PostStatus::Active)),
                ("2".to_string(), post(2, "Draft", PostStatus::NotActive)),
            ]),
            users: HashMap::from([
                ("1".to_string(), user(1, "Admin", UserType::Admin, Some("upload/admin.png"))),
                ("2".to_string(), user(2, "Member", UserType::User, None)),
            ]),
            export: Ok("a,b\n1,2".to_string()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn failing_export(message: &str) -> Self {
        Self {
            export: Err(message.to_string()),
            ..Self::seeded()
        }
    }

    /// Calls made so far, as `operation:id`
    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: &str, id: &str) {
        self.calls.lock().unwrap().push(format!("{}:{}", call, id));
    }

    fn post(&self, id: &str) -> Result<Post, AdminError> {
        self.posts.get(id).cloned().ok_or_else(|| not_found("Post"))
    }

    fn user(&self, id: &str) -> Result<User, AdminError> {
        self.users.get(id).cloned().ok_or_else(|| not_found("User"))
    }
}

#[async_trait]
impl AdminApi for FakeApi {
    async fn login(&self, email: &str, password: &str) -> Result<String, AdminError> {
        self.record("login", email);
        if email == EMAIL && password == PASSWORD {
            Ok("fake-session".to_string())
        } else {
            Err(AdminError::LoginRejected("email and password were not accepted".to_string()))
        }
    }

    async fn post_detail(&self, post_id: &str) -> Result<Post, AdminError> {
        self.record("post_detail", post_id);
        self.post(post_id)
    }

    async fn user_detail(&self, user_id: &str) -> Result<User, AdminError> {
        self.record("user_detail", user_id);
        self.user(user_id)
    }

    async fn post_delete_confirm(&self, post_id: &str) -> Result<Post, AdminError> {
        self.record("post_delete_confirm", post_id);
        self.post(post_id)
    }

    async fn post_delete(&self, post_id: &str) -> Result<(), AdminError> {
        self.record("post_delete", post_id);
        self.post(post_id).map(|_| ())
    }

    async fn user_delete_confirm(&self, user_id: &str) -> Result<User, AdminError> {
        self.record("user_delete_confirm", user_id);
        self.user(user_id)
    }

    async fn user_delete(&self, user_id: &str) -> Result<(), AdminError> {
        self.record("user_delete", user_id);
        self.user(user_id).map(|_| ())
    }

    async fn post_list_csv(&self) -> Result<String, AdminError> {
        self.record("post_list_csv", "");
        self.export.clone().map_err(|message| AdminError::Remote { status: 500, message })
    }
}
