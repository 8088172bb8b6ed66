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

//! Bulletin Board HTTP client implementation

use async_trait::async_trait;
use reqwest::cookie::{CookieStore, Jar};
use reqwest::header::REFERER;
use reqwest::Url;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

use crate::config::ServerConfig;
use crate::log_api_call;
use crate::models::{Post, PostFields, Record, User, UserFields};

use super::{converter, AdminApi, AdminError};

/// User agent sent with every request
const USER_AGENT: &str = concat!("bulletin-admin/", env!("CARGO_PKG_VERSION"));
/// Cookie carrying the backend login session
const SESSION_COOKIE: &str = "sessionid";
/// Cookie and form field of the backend's CSRF protection
const CSRF_COOKIE: &str = "csrftoken";
const CSRF_FIELD: &str = "csrfmiddlewaretoken";

/// Backend endpoints
mod endpoints {
    pub const LOGIN: &str = "/accounts/login/";
    pub const POST_DETAIL: &str = "/post/detail";
    pub const USER_DETAIL: &str = "/user/detail";
    pub const POST_DELETE_CONFIRM: &str = "/post/delete/confirm";
    pub const POST_DELETE: &str = "/post/delete";
    pub const USER_DELETE_CONFIRM: &str = "/user/delete/confirm";
    pub const USER_DELETE: &str = "/user/delete";
    pub const POST_LIST_DOWNLOAD: &str = "/post/list/download";
}

/// Bulletin Board API client
///
/// Cloning is cheap. Clones share one connection pool and one cookie jar, so
/// a login through any clone authenticates all of them.
#[derive(Clone)]
pub struct AdminClient {
    http: reqwest::Client,
    base_url: String,
    origin: Url,
    cookies: Arc<Jar>,
}

impl AdminClient {
    /// Create a client for the backend at `base_url`, optionally resuming a session
    pub fn new(base_url: &str, session_id: Option<&str>) -> Result<Self, AdminError> {
        let base_url = normalize_url(base_url)?;
        let origin = Url::parse(&base_url).map_err(|e| AdminError::InvalidBaseUrl(e.to_string()))?;

        let cookies = Arc::new(Jar::default());
        if let Some(session_id) = session_id.map(str::trim).filter(|s| !s.is_empty()) {
            cookies.add_cookie_str(&format!("{}={}; Path=/", SESSION_COOKIE, session_id), &origin);
        }

        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .cookie_provider(Arc::clone(&cookies))
            .build()?;

        Ok(Self {
            http,
            base_url,
            origin,
            cookies,
        })
    }

    /// Create a client from the server section of the configuration
    pub fn from_config(config: &ServerConfig) -> Result<Self, AdminError> {
        Self::new(&config.base_url, config.session_id.as_deref())
    }

    /// Get the backend URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Session id currently held for the backend
    pub fn session_id(&self) -> Option<String> {
        self.cookie(SESSION_COOKIE)
    }

    fn cookie(&self, name: &str) -> Option<String> {
        let header = self.cookies.cookies(&self.origin)?;
        header
            .to_str()
            .ok()?
            .split(';')
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.to_string())
    }

    /// Issue a GET and return the body of a success response
    async fn get(&self, path: &str, param: Option<(&str, &str)>) -> Result<String, AdminError> {
        let url = match param {
            Some((key, value)) => format!(
                "{}{}?{}={}",
                self.base_url,
                path,
                key,
                urlencoding::encode(value)
            ),
            None => format!("{}{}", self.base_url, path),
        };

        log_api_call!("GET", url.as_str());
        let started = Instant::now();

        let response = self.http.get(&url).send().await?;
        if is_login_page(response.url()) {
            warn!("GET {} was redirected to the login page", url);
            return Err(AdminError::NotAuthenticated);
        }

        let status = response.status();
        let body = response.text().await?;

        log_api_call!("GET", url.as_str(), started.elapsed().as_millis() as u64);

        if status.is_success() {
            Ok(body)
        } else {
            debug!("GET {} failed with {}", url, status);
            Err(converter::decode_error(status.as_u16(), &body))
        }
    }

    async fn get_post(&self, path: &str, post_id: &str) -> Result<Post, AdminError> {
        let body = self.get(path, Some(("post_id", post_id))).await?;
        let record: Record<PostFields> = converter::decode_record(&body)?;
        Ok(converter::convert_post(record))
    }

    async fn get_user(&self, path: &str, user_id: &str) -> Result<User, AdminError> {
        let body = self.get(path, Some(("user_id", user_id))).await?;
        let record: Record<UserFields> = converter::decode_record(&body)?;
        Ok(converter::convert_user(record))
    }
}

#[async_trait]
impl AdminApi for AdminClient {
    async fn login(&self, email: &str, password: &str) -> Result<String, AdminError> {
        let url = format!("{}{}", self.base_url, endpoints::LOGIN);

        // Rendering the form issues the CSRF cookie
        log_api_call!("GET", url.as_str());
        self.http.get(&url).send().await?.error_for_status()?;
        let csrf = self
            .cookie(CSRF_COOKIE)
            .ok_or_else(|| AdminError::LoginRejected("login page issued no CSRF token".to_string()))?;

        log_api_call!("POST", url.as_str());
        let started = Instant::now();

        let response = self
            .http
            .post(&url)
            .header(REFERER, url.as_str())
            .form(&[
                (CSRF_FIELD, csrf.as_str()),
                ("email", email),
                ("password", password),
                ("next", "/"),
            ])
            .send()
            .await?;

        log_api_call!("POST", url.as_str(), started.elapsed().as_millis() as u64);

        // A rejected login renders the form again instead of redirecting
        if is_login_page(response.url()) {
            return Err(AdminError::LoginRejected(
                "email and password were not accepted".to_string(),
            ));
        }

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await?;
            return Err(converter::decode_error(status.as_u16(), &body));
        }

        let session_id = self
            .session_id()
            .ok_or_else(|| AdminError::LoginRejected("backend started no session".to_string()))?;
        info!("Logged in to {} as {}", self.base_url, email);
        Ok(session_id)
    }

    async fn post_detail(&self, post_id: &str) -> Result<Post, AdminError> {
        self.get_post(endpoints::POST_DETAIL, post_id).await
    }

    async fn user_detail(&self, user_id: &str) -> Result<User, AdminError> {
        self.get_user(endpoints::USER_DETAIL, user_id).await
    }

    async fn post_delete_confirm(&self, post_id: &str) -> Result<Post, AdminError> {
        self.get_post(endpoints::POST_DELETE_CONFIRM, post_id).await
    }

    async fn post_delete(&self, post_id: &str) -> Result<(), AdminError> {
        // The backend answers with a redirect to the post list; the body is ignored
        self.get(endpoints::POST_DELETE, Some(("post_id", post_id))).await?;
        Ok(())
    }

    async fn user_delete_confirm(&self, user_id: &str) -> Result<User, AdminError> {
        self.get_user(endpoints::USER_DELETE_CONFIRM, user_id).await
    }

    async fn user_delete(&self, user_id: &str) -> Result<(), AdminError> {
        self.get(endpoints::USER_DELETE, Some(("user_id", user_id))).await?;
        Ok(())
    }

    async fn post_list_csv(&self) -> Result<String, AdminError> {
        self.get(endpoints::POST_LIST_DOWNLOAD, None).await
    }
}

/// Whether a (possibly redirected) response came from the login form
fn is_login_page(url: &Url) -> bool {
    url.path()
        .trim_end_matches('/')
        .ends_with(endpoints::LOGIN.trim_end_matches('/'))
}

/// Normalize a backend URL
fn normalize_url(url: &str) -> Result<String, AdminError> {
    let url = url.trim();
    if url.is_empty() {
        return Err(AdminError::InvalidBaseUrl("empty URL".to_string()));
    }

    let url = if url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else {
        format!("http://{}", url)
    };

    // Remove trailing slash
    Ok(url.trim_end_matches('/').to_string())
}
