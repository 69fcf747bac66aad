//! Shared validation error mapping for inbound HTTP adapters.

use serde_json::json;

use crate::domain::{CredentialsValidationError, Error, UserValidationError};

fn field_error(field: &str, code: &str, message: impl Into<String>) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field,
        "code": code,
    }))
}

fn user_field_code(err: &UserValidationError) -> &'static str {
    match err {
        UserValidationError::EmptyId | UserValidationError::InvalidId => "invalid_id",
        UserValidationError::EmptyName => "empty_name",
        UserValidationError::NameTooLong { .. } => "name_too_long",
        UserValidationError::EmptyEmail => "empty_email",
        UserValidationError::InvalidEmail => "invalid_email",
    }
}

/// Map credential validation failures to `400` payloads naming the field.
pub(crate) fn map_credentials_error(err: CredentialsValidationError) -> Error {
    let message = err.to_string();
    match &err {
        CredentialsValidationError::Name(inner) => {
            field_error("name", user_field_code(inner), message)
        }
        CredentialsValidationError::Email(inner) => {
            field_error("email", user_field_code(inner), message)
        }
        CredentialsValidationError::EmptyPassword => {
            field_error("password", "empty_password", message)
        }
        CredentialsValidationError::PasswordTooShort { .. } => {
            field_error("password", "password_too_short", message)
        }
    }
}

/// `400` for a required request field that was blank.
pub(crate) fn blank_field_error(field: &str) -> Error {
    field_error(field, "missing_field", format!("{field} must not be empty"))
}
