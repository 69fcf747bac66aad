//! JSON extractor configuration.
//!
//! Malformed bodies are reported with the same error envelope as every other
//! validation failure instead of actix's plain-text default.

use actix_web::error::JsonPayloadError;
use actix_web::{HttpRequest, web};
use serde_json::json;
use tracing::debug;

use crate::domain::Error;

/// Largest accepted JSON body.
pub const JSON_LIMIT_BYTES: usize = 64 * 1024;

fn payload_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    debug!(error = %err, "rejected JSON payload");
    let reason = match &err {
        JsonPayloadError::OverflowKnownLength { .. } | JsonPayloadError::Overflow { .. } => {
            "payload_too_large"
        }
        JsonPayloadError::ContentType => "unsupported_content_type",
        _ => "malformed_json",
    };
    Error::invalid_request(err.to_string())
        .with_details(json!({ "code": reason }))
        .into()
}

/// [`web::JsonConfig`] shared by every `/api/v1` handler.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(JSON_LIMIT_BYTES)
        .error_handler(payload_error)
}
