//! Shared validation helpers for inbound HTTP adapters.

use actix_web::HttpRequest;
use actix_web::error::JsonPayloadError;
use serde_json::json;
use tracing::debug;

use crate::domain::{Error, UserDraftValidationError};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    EmptyName,
    EmptyEmail,
    InvalidEmail,
    EmptyPassword,
    InvalidBody,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::EmptyName => "empty_name",
            ErrorCode::EmptyEmail => "empty_email",
            ErrorCode::InvalidEmail => "invalid_email",
            ErrorCode::EmptyPassword => "empty_password",
            ErrorCode::InvalidBody => "invalid_body",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &str {
        self.0
    }
}

const NAME: FieldName = FieldName::new("name");
const EMAIL: FieldName = FieldName::new("email");
const PASSWORD: FieldName = FieldName::new("password");
const BODY: FieldName = FieldName::new("body");

/// Builder for validation errors with field context.
struct ValidationError {
    field: String,
    message: String,
}

impl ValidationError {
    fn new(field: FieldName, message: impl Into<String>) -> Self {
        Self {
            field: field.as_str().to_owned(),
            message: message.into(),
        }
    }

    fn with_code(self, code: ErrorCode) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "code": code.as_str(),
        }))
    }
}

/// Map a rejected user payload to a `400 invalid_request` error naming the
/// offending field.
pub(crate) fn map_user_draft_error(err: UserDraftValidationError) -> Error {
    let (field, code) = match err {
        UserDraftValidationError::EmptyName => (NAME, ErrorCode::EmptyName),
        UserDraftValidationError::EmptyEmail => (EMAIL, ErrorCode::EmptyEmail),
        UserDraftValidationError::InvalidEmail => (EMAIL, ErrorCode::InvalidEmail),
        UserDraftValidationError::EmptyPassword => (PASSWORD, ErrorCode::EmptyPassword),
    };
    ValidationError::new(field, err.to_string()).with_code(code)
}

/// Extractor error handler turning undecodable JSON bodies into the shared
/// error envelope instead of actix's plain-text default.
pub(crate) fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    debug!(error = %err, "rejected request body");
    ValidationError::new(BODY, format!("request body is not a valid user payload: {err}"))
        .with_code(ErrorCode::InvalidBody)
        .into()
}
