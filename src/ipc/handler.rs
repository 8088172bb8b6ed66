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

//! IPC message handler
//!
//! Every request runs one panel action against a fresh [`MemoryPage`] and
//! answers with what the action did to that page.

use serde::Serialize;
use serde_json::{json, Value};
use tracing::{error, info, warn};

use crate::api::{AdminApi, AdminError};
use crate::log_ipc;
use crate::models::{error_codes, methods, IpcError, IpcMessage, MessageType, Post, User};
use crate::panel::{AdminPanel, DeleteTicket};
use crate::view::MemoryPage;

/// Routes incoming IPC messages to panel actions
pub struct MessageHandler<A> {
    panel: AdminPanel<A>,
}

impl<A: AdminApi> MessageHandler<A> {
    pub fn new(panel: AdminPanel<A>) -> Self {
        Self { panel }
    }

    /// Handle an incoming IPC message
    pub async fn handle_message(&self, msg: IpcMessage) -> IpcMessage {
        let method = msg.method.as_deref().unwrap_or("unknown");
        log_ipc!(request, method, msg.id.as_str());

        let result = if msg.message_type != MessageType::Request {
            IpcMessage::response_err(
                &msg.id,
                IpcError::new(error_codes::INVALID_REQUEST, "Only requests are accepted"),
            )
        } else {
            match method {
                methods::PING => IpcMessage::response_ok(
                    &msg.id,
                    json!({
                        "pong": true,
                        "timestamp": chrono::Utc::now().to_rfc3339()
                    }),
                ),
                methods::AUTH_LOGIN => self.handle_auth_login(&msg).await,
                methods::POST_DETAIL => self.handle_post_detail(&msg).await,
                methods::USER_DETAIL => self.handle_user_detail(&msg).await,
                methods::POST_DELETE_CONFIRM => self.handle_post_delete_confirm(&msg).await,
                methods::POST_DELETE => self.handle_post_delete(&msg).await,
                methods::USER_DELETE_CONFIRM => self.handle_user_delete_confirm(&msg).await,
                methods::USER_DELETE => self.handle_user_delete(&msg).await,
                methods::POST_LIST_DOWNLOAD => self.handle_post_list_download(&msg).await,
                _ => {
                    warn!("Unknown method: {}", method);
                    IpcMessage::response_err(
                        &msg.id,
                        IpcError::new(error_codes::METHOD_NOT_FOUND, format!("Unknown method: {}", method)),
                    )
                }
            }
        };

        let success = result.error.is_none();
        log_ipc!(response, method, msg.id.as_str(), success);

        result
    }

    /// Log in; the session stays with this process for later requests
    async fn handle_auth_login(&self, msg: &IpcMessage) -> IpcMessage {
        let (email, password) = match (msg.str_param("email"), msg.str_param("password")) {
            (Some(email), Some(password)) => (email, password),
            _ => {
                return IpcMessage::response_err(
                    &msg.id,
                    IpcError::new(error_codes::INVALID_PARAMS, "Missing email or password"),
                );
            }
        };

        info!("Logging in as {}", email);

        let mut page = MemoryPage::new();
        let result = self.panel.login(&mut page, email, password).await;
        respond(msg, &page, result.map(|_| json!({ "success": true })))
    }

    async fn handle_post_detail(&self, msg: &IpcMessage) -> IpcMessage {
        let post_id = match require_id(msg, "post_id") {
            Ok(id) => id,
            Err(response) => return response,
        };

        let mut page = MemoryPage::new();
        let result = self.panel.go_to_post_detail(&mut page, &post_id).await;
        respond(msg, &page, result.map(|post| json!({ "post": post })))
    }

    async fn handle_user_detail(&self, msg: &IpcMessage) -> IpcMessage {
        let user_id = match require_id(msg, "user_id") {
            Ok(id) => id,
            Err(response) => return response,
        };

        let mut page = MemoryPage::new();
        let result = self.panel.go_to_user_detail(&mut page, &user_id).await;
        respond(msg, &page, result.map(|user| json!({ "user": user })))
    }

    async fn handle_post_delete_confirm(&self, msg: &IpcMessage) -> IpcMessage {
        let post_id = match require_id(msg, "post_id") {
            Ok(id) => id,
            Err(response) => return response,
        };

        let mut page = MemoryPage::new();
        let result = self.panel.go_to_post_delete(&mut page, &post_id).await;
        respond(
            msg,
            &page,
            result.map(|(ticket, post)| json!({ "ticket": ticket, "post": post })),
        )
    }

    /// The UI echoes back the id from the confirmation's ticket
    async fn handle_post_delete(&self, msg: &IpcMessage) -> IpcMessage {
        let ticket = match require_id(msg, "post_id") {
            Ok(id) => DeleteTicket::<Post>::new(id),
            Err(response) => return response,
        };

        let mut page = MemoryPage::new();
        let result = self.panel.post_delete(&mut page, &ticket).await;
        respond(msg, &page, result.map(|()| Value::Null))
    }

    async fn handle_user_delete_confirm(&self, msg: &IpcMessage) -> IpcMessage {
        let user_id = match require_id(msg, "user_id") {
            Ok(id) => id,
            Err(response) => return response,
        };

        let mut page = MemoryPage::new();
        let result = self.panel.go_to_user_delete(&mut page, &user_id).await;
        respond(
            msg,
            &page,
            result.map(|(ticket, user)| json!({ "ticket": ticket, "user": user })),
        )
    }

    async fn handle_user_delete(&self, msg: &IpcMessage) -> IpcMessage {
        let ticket = match require_id(msg, "user_id") {
            Ok(id) => DeleteTicket::<User>::new(id),
            Err(response) => return response,
        };

        let mut page = MemoryPage::new();
        let result = self.panel.user_delete(&mut page, &ticket).await;
        respond(msg, &page, result.map(|()| Value::Null))
    }

    async fn handle_post_list_download(&self, msg: &IpcMessage) -> IpcMessage {
        let mut page = MemoryPage::new();
        let result = self.panel.download_csv(&mut page).await;
        respond(msg, &page, result.map(|export| json!({ "filename": export.filename })))
    }
}

/// Read a required identifier param or build the error response
fn require_id(msg: &IpcMessage, key: &str) -> Result<String, IpcMessage> {
    msg.id_param(key).ok_or_else(|| {
        IpcMessage::response_err(
            &msg.id,
            IpcError::new(error_codes::INVALID_PARAMS, format!("Missing {}", key)),
        )
    })
}

/// Map an action result and the page it touched to a response
fn respond<T: Serialize>(msg: &IpcMessage, page: &MemoryPage, result: Result<T, AdminError>) -> IpcMessage {
    match result {
        Ok(data) => match (serde_json::to_value(page), serde_json::to_value(data)) {
            (Ok(page), Ok(data)) => IpcMessage::response_ok(&msg.id, json!({ "page": page, "data": data })),
            (Err(e), _) | (_, Err(e)) => {
                error!("Failed to serialize response: {}", e);
                IpcMessage::response_err(&msg.id, IpcError::new(error_codes::INTERNAL_ERROR, e.to_string()))
            }
        },
        Err(e) => IpcMessage::response_err(&msg.id, to_ipc_error(&e)),
    }
}

fn to_ipc_error(e: &AdminError) -> IpcError {
    match e {
        AdminError::Remote { status, .. } | AdminError::MalformedError { status, .. } => {
            IpcError::new(error_codes::API_ERROR, e.to_string()).with_data(json!({ "status": status }))
        }
        AdminError::NotAuthenticated | AdminError::LoginRejected(_) => {
            IpcError::new(error_codes::NOT_AUTHENTICATED, e.to_string())
        }
        AdminError::Transport(_) => IpcError::new(error_codes::NETWORK_ERROR, e.to_string()),
        _ => IpcError::new(error_codes::INTERNAL_ERROR, e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::panel::testing::{FakeApi, EMAIL, PASSWORD};

    fn handler() -> MessageHandler<FakeApi> {
        MessageHandler::new(AdminPanel::new(FakeApi::seeded()))
    }

    fn request(method: &str, params: Value) -> IpcMessage {
        IpcMessage::request(method, Some(params))
    }

    #[tokio::test]
    async fn test_ping() {
        let response = handler().handle_message(IpcMessage::request(methods::PING, None)).await;

        assert!(response.error.is_none());
        assert_eq!(response.result.unwrap()["pong"], true);
    }

    #[tokio::test]
    async fn test_post_detail_returns_page_writes() {
        let msg = request(methods::POST_DETAIL, json!({ "post_id": 1 }));
        let id = msg.id.clone();
        let response = handler().handle_message(msg).await;

        assert_eq!(response.id, id);
        let result = response.result.expect("success");
        let writes = result["page"]["writes"].as_array().unwrap();
        assert_eq!(writes[0]["slot"], "title");
        assert_eq!(writes[0]["html"], "Notice");
        assert_eq!(writes[2]["html"], "Active");
        assert_eq!(result["data"]["post"]["id"], 1);
    }

    #[tokio::test]
    async fn test_remote_error_maps_to_api_error() {
        let response = handler()
            .handle_message(request(methods::USER_DETAIL, json!({ "user_id": "77" })))
            .await;

        let error = response.error.expect("error");
        assert_eq!(error.code, error_codes::API_ERROR);
        assert_eq!(error.message, "User does not exist");
        assert_eq!(error.data.unwrap()["status"], 404);
    }

    #[tokio::test]
    async fn test_confirm_then_delete_round_trip() {
        let handler = handler();

        let confirm = handler
            .handle_message(request(methods::USER_DELETE_CONFIRM, json!({ "user_id": "2" })))
            .await;
        let ticket_id = confirm.result.unwrap()["data"]["ticket"]["id"].as_str().unwrap().to_string();
        assert_eq!(ticket_id, "2");

        let delete = handler
            .handle_message(request(methods::USER_DELETE, json!({ "user_id": ticket_id })))
            .await;
        let page = &delete.result.unwrap()["page"];

        assert_eq!(page["reloaded"], true);
        assert_eq!(page["hidden_modals"][0], "userDelModal");
        assert_eq!(handler.panel.api().calls(), vec!["user_delete_confirm:2", "user_delete:2"]);
    }

    #[tokio::test]
    async fn test_download_returns_data_uri() {
        let response = handler()
            .handle_message(request(methods::POST_LIST_DOWNLOAD, json!({})))
            .await;
        let result = response.result.unwrap();

        assert_eq!(result["page"]["download"]["href"], "data:text/csv;charset=utf-8,a,b%0A1,2");
        assert_eq!(result["page"]["download"]["filename"], result["data"]["filename"]);
    }

    #[tokio::test]
    async fn test_missing_param_and_unknown_method() {
        let handler = handler();

        let missing = handler.handle_message(request(methods::POST_DELETE, json!({}))).await;
        assert_eq!(missing.error.unwrap().code, error_codes::INVALID_PARAMS);
        assert!(handler.panel.api().calls().is_empty());

        let unknown = handler.handle_message(request("post.edit", json!({}))).await;
        assert_eq!(unknown.error.unwrap().code, error_codes::METHOD_NOT_FOUND);
    }

    #[tokio::test]
    async fn test_responses_are_rejected_as_input() {
        let response = handler()
            .handle_message(IpcMessage::response_ok("5", Value::Null))
            .await;

        assert_eq!(response.error.unwrap().code, error_codes::INVALID_REQUEST);
    }

    #[tokio::test]
    async fn test_blank_id_is_sent_to_backend() {
        let handler = handler();

        let response = handler
            .handle_message(request(methods::POST_DELETE, json!({ "post_id": "" })))
            .await;

        let error = response.error.expect("error");
        assert_eq!(error.code, error_codes::API_ERROR);
        assert_eq!(error.message, "Post does not exist");
        assert_eq!(handler.panel.api().calls(), vec!["post_delete:"]);
    }

    #[tokio::test]
    async fn test_padded_id_is_not_trimmed() {
        let handler = handler();

        let response = handler
            .handle_message(request(methods::POST_DELETE_CONFIRM, json!({ "post_id": " 2 " })))
            .await;

        assert_eq!(response.error.unwrap().code, error_codes::API_ERROR);
        assert_eq!(handler.panel.api().calls(), vec!["post_delete_confirm: 2 "]);
    }

    #[tokio::test]
    async fn test_auth_login() {
        let handler = handler();

        let ok = handler
            .handle_message(request(methods::AUTH_LOGIN, json!({ "email": EMAIL, "password": PASSWORD })))
            .await;
        assert_eq!(ok.result.unwrap()["data"]["success"], true);

        let rejected = handler
            .handle_message(request(methods::AUTH_LOGIN, json!({ "email": EMAIL, "password": "nope" })))
            .await;
        assert_eq!(rejected.error.unwrap().code, error_codes::NOT_AUTHENTICATED);

        let missing = handler
            .handle_message(request(methods::AUTH_LOGIN, json!({ "email": EMAIL })))
            .await;
        assert_eq!(missing.error.unwrap().code, error_codes::INVALID_PARAMS);
        assert_eq!(handler.panel.api().calls(), vec!["login:admin@example.com", "login:admin@example.com"]);
    }
}
