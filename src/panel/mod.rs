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

//! Panel actions bound to UI triggers
//!
//! Each action is one request followed by one render. Failures go through
//! [`report`], which alerts the server's message and leaves the page as it
//! was. Deletes are two-step: the confirmation returns a [`DeleteTicket`]
//! that the execute step consumes.

#[cfg(test)]
pub(crate) mod testing;

use chrono::Local;
use serde::Serialize;
use std::marker::PhantomData;
use tracing::{debug, error, info, warn};

use crate::api::{AdminApi, AdminError};
use crate::export::{CsvExport, TimestampStyle};
use crate::models::{Post, User};
use crate::view::{modals, render, Page};

/// Proof that a delete was confirmed for a specific record
///
/// Carries the identifier exactly as it was passed to the confirmation.
#[derive(Debug, Serialize)]
#[serde(bound = "")]
pub struct DeleteTicket<E> {
    id: String,
    #[serde(skip)]
    _entity: PhantomData<fn() -> E>,
}

impl<E> DeleteTicket<E> {
    /// Build a ticket for an id confirmed elsewhere, e.g. by the UI process
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            _entity: PhantomData,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}

impl<E> Clone for DeleteTicket<E> {
    fn clone(&self) -> Self {
        Self::new(self.id.clone())
    }
}

/// Show a failure to the user and pass the result through
pub fn report<P: Page + ?Sized, T>(page: &mut P, result: Result<T, AdminError>) -> Result<T, AdminError> {
    if let Err(e) = &result {
        if let AdminError::MalformedError { status, body } = e {
            debug!("Unreadable error body with status {}: {}", status, body);
        }
        if e.is_remote() || e.is_auth() {
            warn!("Backend rejected panel action: {}", e);
        } else {
            error!("Panel action failed: {}", e);
        }
        page.alert(&e.to_string());
    }
    result
}

/// Request handlers of the administration panel
pub struct AdminPanel<A> {
    api: A,
    timestamp_style: TimestampStyle,
}

impl<A: AdminApi> AdminPanel<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            timestamp_style: TimestampStyle::default(),
        }
    }

    /// Choose how export file names are stamped
    pub fn with_timestamp_style(mut self, style: TimestampStyle) -> Self {
        self.timestamp_style = style;
        self
    }

    #[cfg(test)]
    pub fn api(&self) -> &A {
        &self.api
    }

    /// Sign in to the backend so later actions run in that session
    pub async fn login<P: Page + ?Sized>(&self, page: &mut P, email: &str, password: &str) -> Result<String, AdminError> {
        let session_id = report(page, self.api.login(email, password).await)?;
        info!("Signed in as {}", email);
        Ok(session_id)
    }

    /// Show a post in the detail view
    pub async fn go_to_post_detail<P: Page + ?Sized>(&self, page: &mut P, post_id: &str) -> Result<Post, AdminError> {
        let post = report(page, self.api.post_detail(post_id).await)?;
        render::post_detail(page, &post);
        Ok(post)
    }

    /// Show a user in the detail view
    pub async fn go_to_user_detail<P: Page + ?Sized>(&self, page: &mut P, user_id: &str) -> Result<User, AdminError> {
        let user = report(page, self.api.user_detail(user_id).await)?;
        render::user_detail(page, &user);
        Ok(user)
    }

    /// Fill the post delete dialog and hand back the ticket for [`Self::post_delete`]
    pub async fn go_to_post_delete<P: Page + ?Sized>(
        &self,
        page: &mut P,
        post_id: &str,
    ) -> Result<(DeleteTicket<Post>, Post), AdminError> {
        let post = report(page, self.api.post_delete_confirm(post_id).await)?;
        render::post_delete_confirm(page, post_id, &post);
        Ok((DeleteTicket::new(post_id), post))
    }

    /// Delete the confirmed post, then close the dialog and reload
    pub async fn post_delete<P: Page + ?Sized>(&self, page: &mut P, ticket: &DeleteTicket<Post>) -> Result<(), AdminError> {
        report(page, self.api.post_delete(ticket.id()).await)?;
        info!("Post {} deleted", ticket.id());

        page.hide_modal(modals::POST_DELETE);
        page.reload();
        Ok(())
    }

    /// Fill the user delete dialog and hand back the ticket for [`Self::user_delete`]
    pub async fn go_to_user_delete<P: Page + ?Sized>(
        &self,
        page: &mut P,
        user_id: &str,
    ) -> Result<(DeleteTicket<User>, User), AdminError> {
        let user = report(page, self.api.user_delete_confirm(user_id).await)?;
        render::user_delete_confirm(page, user_id, &user);
        Ok((DeleteTicket::new(user_id), user))
    }

    /// Delete the confirmed user, then close the dialog and reload
    pub async fn user_delete<P: Page + ?Sized>(&self, page: &mut P, ticket: &DeleteTicket<User>) -> Result<(), AdminError> {
        report(page, self.api.user_delete(ticket.id()).await)?;
        info!("User {} deleted", ticket.id());

        page.hide_modal(modals::USER_DELETE);
        page.reload();
        Ok(())
    }

    /// Fetch the post list CSV and offer it as a download stamped with the local time
    pub async fn download_csv<P: Page + ?Sized>(&self, page: &mut P) -> Result<CsvExport, AdminError> {
        let body = report(page, self.api.post_list_csv().await)?;
        let export = CsvExport::new(body, Local::now().naive_local(), self.timestamp_style);

        page.download(export.to_download());
        Ok(export)
    }
}
