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

//! Converters from backend response bodies to panel types
//!
//! Record bodies arrive either as a JSON object or as a JSON string wrapping
//! that object. Both decode here, once, so nothing past this module ever
//! sees the wrapped form.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::models::{Post, PostFields, PostStatus, Record, User, UserFields, UserType};

use super::AdminError;

/// Longest body kept on a malformed error
const MAX_ERROR_BODY: usize = 512;

#[derive(Deserialize)]
struct ErrorPayload {
    error: String,
}

/// Decode a success body into a record, unwrapping a JSON-encoded string if present
pub fn decode_record<T: DeserializeOwned>(body: &str) -> Result<T, AdminError> {
    let value: Value = serde_json::from_str(body)?;
    let value = match value {
        Value::String(inner) => serde_json::from_str(&inner)?,
        other => other,
    };

    Ok(serde_json::from_value(value)?)
}

/// Build the error for a non-success response
pub fn decode_error(status: u16, body: &str) -> AdminError {
    match serde_json::from_str::<ErrorPayload>(body) {
        Ok(payload) => AdminError::Remote {
            status,
            message: payload.error,
        },
        Err(_) => AdminError::MalformedError {
            status,
            body: body.chars().take(MAX_ERROR_BODY).collect(),
        },
    }
}

/// Convert a serialized post to the displayed post
pub fn convert_post(record: Record<PostFields>) -> Post {
    let Record {
        pk,
        fields,
        created_user_name,
        updated_user_name,
        ..
    } = record;

    Post {
        id: pk,
        title: fields.title,
        description: fields.description,
        status: PostStatus::from_code(&fields.status),
        created_at: fields.created_at.unwrap_or_default(),
        created_by: created_user_name.unwrap_or_default(),
        updated_at: fields.updated_at.unwrap_or_default(),
        updated_by: updated_user_name.unwrap_or_default(),
    }
}

/// Convert a serialized user to the displayed user
pub fn convert_user(record: Record<UserFields>) -> User {
    let Record {
        pk,
        fields,
        created_user_name,
        updated_user_name,
        ..
    } = record;

    User {
        id: pk,
        name: fields.name,
        user_type: UserType::from_code(&fields.user_type),
        email: fields.email,
        phone: fields.phone.unwrap_or_default(),
        dob: fields.dob.unwrap_or_default(),
        address: fields.address.unwrap_or_default(),
        profile: fields.profile.filter(|p| !p.is_empty()),
        created_at: fields.created_at.unwrap_or_default(),
        created_by: created_user_name.unwrap_or_default(),
        updated_at: fields.updated_at.unwrap_or_default(),
        updated_by: updated_user_name.unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const POST_BODY: &str = r#"{"model": "bulletinboard.post", "pk": 5, "fields": {"title": "Hi", "description": "Body", "status": "0", "created_at": "2022-01-01", "updated_at": "2022-01-02"}, "created_user_name": "Ann", "updated_user_name": "Bo"}"#;

    #[test]
    fn test_plain_object_body_decodes() {
        let record: Record<PostFields> = decode_record(POST_BODY).unwrap();
        let post = convert_post(record);

        assert_eq!(post.id, 5);
        assert_eq!(post.status, PostStatus::NotActive);
        assert_eq!(post.created_by, "Ann");
        assert_eq!(post.updated_by, "Bo");
    }

    #[test]
    fn test_string_wrapped_body_decodes_once() {
        let wrapped = serde_json::to_string(POST_BODY).unwrap();
        let record: Record<PostFields> = decode_record(&wrapped).unwrap();

        assert_eq!(record.pk, 5);
        assert_eq!(record.fields.title, "Hi");
    }

    #[test]
    fn test_non_json_body_is_decode_error() {
        let result = decode_record::<Record<PostFields>>("<html>login</html>");
        assert!(matches!(result, Err(AdminError::Decode(_))));
    }

    #[test]
    fn test_error_payload_keeps_message() {
        match decode_error(404, r#"{"error": "User does not exist"}"#) {
            AdminError::Remote { status, message } => {
                assert_eq!(status, 404);
                assert_eq!(message, "User does not exist");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_error_without_message_is_malformed() {
        assert!(matches!(
            decode_error(500, "Internal Server Error"),
            AdminError::MalformedError { status: 500, .. }
        ));
        assert!(matches!(
            decode_error(400, r#"{"detail": "nope"}"#),
            AdminError::MalformedError { status: 400, .. }
        ));
    }

    #[test]
    fn test_confirmation_record_has_empty_audit_names() {
        let record: Record<UserFields> = decode_record(
            r#"{"model": "bulletinboard.user", "pk": 9, "fields": {"name": "Kay", "type": "1", "email": "k@example.com", "phone": null, "dob": null, "address": "Yangon", "profile": ""}}"#,
        )
        .unwrap();
        let user = convert_user(record);

        assert_eq!(user.user_type, UserType::User);
        assert_eq!(user.phone, "");
        assert_eq!(user.address, "Yangon");
        assert_eq!(user.profile, None);
        assert_eq!(user.created_by, "");
    }
}
