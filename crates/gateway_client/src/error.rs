//! Error taxonomy for gateway calls. Transport failures, HTTP errors, and
//! payload problems are folded into one enum so route code can render any
//! failure through `Display` without inspecting internals. HTTP errors keep
//! the status, the backend error code, and field-level validation messages
//! for inline form annotation.

use std::collections::BTreeMap;

use serde::Deserialize;
use thiserror::Error as ThisError;

/// Maximum number of error body characters surfaced to the UI.
const MAX_ERROR_CHARS: usize = 200;

#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum Error {
    #[error("Config error: {0}")]
    Config(String),
    #[error("Network error: {0}")]
    Network(String),
    #[error("Timeout: {0}")]
    Timeout(String),
    #[error("Request failed ({status}): {message}")]
    Http {
        status: u16,
        message: String,
        code: Option<ErrorCode>,
        field_errors: BTreeMap<String, String>,
    },
    #[error("Response error: {0}")]
    Parse(String),
    #[error("Request error: {0}")]
    Serialization(String),
}

impl Error {
    /// HTTP status for `Http` errors, `None` for everything else.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Human-readable message without the status prefix.
    pub fn message(&self) -> String {
        match self {
            Error::Http { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }

    /// Backend error code, when the envelope carried one.
    pub fn code(&self) -> Option<&ErrorCode> {
        match self {
            Error::Http { code, .. } => code.as_ref(),
            _ => None,
        }
    }

    /// Field-level validation messages for inline form annotation.
    pub fn field_errors(&self) -> Option<&BTreeMap<String, String>> {
        match self {
            Error::Http { field_errors, .. } if !field_errors.is_empty() => Some(field_errors),
            _ => None,
        }
    }

    pub fn is_auth_error(&self) -> bool {
        matches!(self.status(), Some(401 | 403))
    }

    pub fn is_rate_limited(&self) -> bool {
        self.status() == Some(429) || self.code() == Some(&ErrorCode::RateLimited)
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Whether a verification attempt failed because no verification record
    /// exists for the account. The typed code wins; the substring check only
    /// covers envelopes from backends that predate the `code` field.
    pub fn is_verification_not_found(&self) -> bool {
        match self {
            Error::Http { code: Some(code), .. } => *code == ErrorCode::VerificationNotFound,
            Error::Http { message, .. } => message.to_lowercase().contains("not found"),
            _ => false,
        }
    }
}

/// Machine-readable error codes from the backend envelope. Codes the client
/// does not recognize are preserved verbatim in `Other`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ErrorCode {
    EmailNotVerified,
    VerificationNotFound,
    VerificationExpired,
    DeviceUnknown,
    RateLimited,
    Other(String),
}

impl ErrorCode {
    fn parse(raw: &str) -> Self {
        match raw {
            "EMAIL_NOT_VERIFIED" => ErrorCode::EmailNotVerified,
            "VERIFICATION_NOT_FOUND" => ErrorCode::VerificationNotFound,
            "VERIFICATION_EXPIRED" => ErrorCode::VerificationExpired,
            "DEVICE_UNKNOWN" => ErrorCode::DeviceUnknown,
            "RATE_LIMITED" => ErrorCode::RateLimited,
            other => ErrorCode::Other(other.to_string()),
        }
    }
}

/// Error envelope shape used across the API. Any of the message fields may
/// carry the human-readable text; `errors` maps field names to validation
/// messages.
#[derive(Debug, Default, Deserialize)]
struct ErrorEnvelope {
    error: Option<String>,
    message: Option<String>,
    details: Option<String>,
    code: Option<String>,
    errors: Option<BTreeMap<String, String>>,
}

/// Builds an `Error` from a non-2xx response body. Falls back to the raw
/// (sanitized) text when the body is not the JSON envelope.
pub fn error_from_response(status: u16, body: &str) -> Error {
    let Ok(envelope) = serde_json::from_str::<ErrorEnvelope>(body) else {
        return Error::Http {
            status,
            message: sanitize_body(body),
            code: None,
            field_errors: BTreeMap::new(),
        };
    };

    let field_errors = envelope.errors.unwrap_or_default();
    let message = if field_errors.is_empty() {
        envelope
            .error
            .or(envelope.message)
            .or(envelope.details)
            .filter(|text| !text.trim().is_empty())
            .unwrap_or_else(|| sanitize_body(body))
    } else {
        aggregate_field_errors(&field_errors)
    };

    Error::Http {
        status,
        message,
        code: envelope.code.as_deref().map(ErrorCode::parse),
        field_errors,
    }
}

/// Joins field validation messages into one readable sentence, e.g.
/// `"Email: required. Password: too short"`.
fn aggregate_field_errors(errors: &BTreeMap<String, String>) -> String {
    errors
        .iter()
        .map(|(field, message)| format!("{}: {}", title_case(field), message))
        .collect::<Vec<_>>()
        .join(". ")
}

fn title_case(field: &str) -> String {
    let mut chars = field.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Trims and truncates raw error bodies for user-facing messages.
fn sanitize_body(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        "Request failed.".to_string()
    } else {
        trimmed.chars().take(MAX_ERROR_CHARS).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aggregates_field_errors_title_cased_and_joined() {
        let err = error_from_response(
            422,
            r#"{"errors":{"email":"required","password":"too short"}}"#,
        );
        assert_eq!(err.message(), "Email: required. Password: too short");
        let fields = err.field_errors().expect("field errors");
        assert_eq!(fields.get("email").map(String::as_str), Some("required"));
        assert_eq!(fields.get("password").map(String::as_str), Some("too short"));
    }

    #[test]
    fn message_priority_is_error_then_message_then_details() {
        let err = error_from_response(400, r#"{"message":"broken","details":"ignored"}"#);
        assert_eq!(err.message(), "broken");

        let err = error_from_response(400, r#"{"error":"first","message":"second"}"#);
        assert_eq!(err.message(), "first");

        let err = error_from_response(400, r#"{"details":"only detail"}"#);
        assert_eq!(err.message(), "only detail");
    }

    #[test]
    fn non_json_body_falls_back_to_sanitized_text() {
        let err = error_from_response(502, "  upstream exploded  ");
        assert_eq!(err.message(), "upstream exploded");
        assert_eq!(err.status(), Some(502));
        assert!(err.code().is_none());
    }

    #[test]
    fn empty_body_uses_generic_message() {
        let err = error_from_response(500, "");
        assert_eq!(err.message(), "Request failed.");
    }

    #[test]
    fn long_bodies_are_truncated() {
        let body = "x".repeat(500);
        let err = error_from_response(500, &body);
        assert_eq!(err.message().chars().count(), 200);
    }

    #[test]
    fn typed_code_is_parsed_and_unknown_codes_preserved() {
        let err = error_from_response(409, r#"{"error":"nope","code":"VERIFICATION_NOT_FOUND"}"#);
        assert_eq!(err.code(), Some(&ErrorCode::VerificationNotFound));
        assert!(err.is_verification_not_found());

        let err = error_from_response(409, r#"{"error":"nope","code":"SOMETHING_ELSE"}"#);
        assert_eq!(
            err.code(),
            Some(&ErrorCode::Other("SOMETHING_ELSE".to_string()))
        );
        assert!(!err.is_verification_not_found());
    }

    #[test]
    fn substring_fallback_applies_only_without_code() {
        let err = error_from_response(404, r#"{"error":"verification record was not found"}"#);
        assert!(err.is_verification_not_found());

        let err = error_from_response(404, r#"{"error":"user not found","code":"USER_MISSING"}"#);
        assert!(!err.is_verification_not_found());
    }

    #[test]
    fn rate_limit_detection_covers_status_and_code() {
        assert!(error_from_response(429, "slow down").is_rate_limited());
        let err = error_from_response(400, r#"{"error":"later","code":"RATE_LIMITED"}"#);
        assert!(err.is_rate_limited());
    }
}
