//! Error types for the bridge-rest library.
//!
//! This module provides a unified error type with explicit variants for
//! transport, authentication, remote API and input validation errors.

use std::fmt;
use thiserror::Error;

/// The unified error type for bridge-rest operations.
///
/// Only [`Error::Auth`] describes an authentication problem. Transport and
/// API errors are surfaced exactly as they were observed.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// Network transport errors (DNS, TLS, connection, timeout, decoding).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Authentication failed (credentials rejected, or the session was
    /// rejected again after reauthenticating).
    #[error("authentication error: {0}")]
    Auth(#[from] AuthError),

    /// Errors reported by the remote service unrelated to authentication.
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Input validation errors (base URL, header values).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),
}

impl Error {
    /// Returns true if this error means the service rejected our identity.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, Error::Auth(_))
    }

    /// Returns the remote API error, if this is one.
    pub fn as_api_error(&self) -> Option<&ApiError> {
        match self {
            Error::Api(err) => Some(err),
            _ => None,
        }
    }
}

/// Transport-level errors.
#[derive(Debug, Clone, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out: {message}")]
    Timeout { message: String },

    /// Response body could not be decoded.
    #[error("failed to decode response: {message}")]
    Decode { message: String },

    /// Failed to build the HTTP client.
    #[error("failed to build HTTP client: {message}")]
    Builder { message: String },

    /// Generic HTTP error.
    #[error("HTTP error: {message}")]
    Http { message: String },
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        let message = err.to_string();
        if err.is_timeout() {
            TransportError::Timeout { message }
        } else if err.is_connect() {
            TransportError::Connection { message }
        } else if err.is_decode() {
            TransportError::Decode { message }
        } else if err.is_builder() {
            TransportError::Builder { message }
        } else {
            TransportError::Http { message }
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Transport(TransportError::from(err))
    }
}

/// Authentication-related errors.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    /// The sign-in exchange was rejected by the service.
    #[error("sign-in rejected (HTTP {status}){}", fmt_message(.message))]
    SignInRejected {
        status: u16,
        message: Option<String>,
    },

    /// A request was rejected as unauthenticated and reauthentication did
    /// not help (or was not possible).
    #[error("not authenticated{}", fmt_message(.message))]
    NotAuthenticated { message: Option<String> },
}

fn fmt_message(message: &Option<String>) -> String {
    message
        .as_deref()
        .map(|m| format!(": {m}"))
        .unwrap_or_default()
}

/// Category of a remote-reported error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    BadRequest,
    InvalidEntity,
    Unauthorized,
    EntityNotFound,
    EntityAlreadyExists,
    ConcurrentModification,
    UnsupportedVersion,
    ConsentRequired,
    TooManyRequests,
    ServerError,
    Other,
}

impl ApiErrorKind {
    /// Classify a non-401 error response.
    ///
    /// `error_type` is the `type` field of the error body, which is how the
    /// service distinguishes errors that share a status code.
    pub fn classify(status: u16, error_type: Option<&str>) -> Self {
        match (status, error_type) {
            (400, Some("InvalidEntityException")) => ApiErrorKind::InvalidEntity,
            (400, _) => ApiErrorKind::BadRequest,
            (403, _) => ApiErrorKind::Unauthorized,
            (404, _) => ApiErrorKind::EntityNotFound,
            (409, Some("ConcurrentModificationException")) => {
                ApiErrorKind::ConcurrentModification
            }
            (409, _) => ApiErrorKind::EntityAlreadyExists,
            (410, _) => ApiErrorKind::UnsupportedVersion,
            (412, _) => ApiErrorKind::ConsentRequired,
            (429, _) => ApiErrorKind::TooManyRequests,
            (500..=599, _) => ApiErrorKind::ServerError,
            _ => ApiErrorKind::Other,
        }
    }
}

/// An error response from the Bridge service.
#[derive(Debug, Clone)]
pub struct ApiError {
    /// HTTP status code.
    pub status: u16,
    /// Normalized error category.
    pub kind: ApiErrorKind,
    /// Error message from the server.
    pub message: Option<String>,
    /// Path of the endpoint that failed.
    pub endpoint: String,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {} [{:?}] {}", self.status, self.kind, self.endpoint)?;
        if let Some(ref message) = self.message {
            write!(f, ": {}", message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ApiError {}

impl ApiError {
    /// Create a new API error.
    pub fn new(
        status: u16,
        error_type: Option<&str>,
        message: Option<String>,
        endpoint: impl Into<String>,
    ) -> Self {
        Self {
            status,
            kind: ApiErrorKind::classify(status, error_type),
            message,
            endpoint: endpoint.into(),
        }
    }

    /// Check if the entity was not found.
    pub fn is_not_found(&self) -> bool {
        self.kind == ApiErrorKind::EntityNotFound
    }
}

/// Input validation errors.
#[derive(Debug, Clone, Error)]
pub enum InvalidInputError {
    /// Invalid base URL format.
    #[error("invalid base URL '{value}': {reason}")]
    BaseUrl { value: String, reason: String },

    /// A value cannot be used as an HTTP header.
    #[error("invalid header value for {header}")]
    Header { header: &'static str },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_status_codes() {
        assert_eq!(ApiErrorKind::classify(404, None), ApiErrorKind::EntityNotFound);
        assert_eq!(
            ApiErrorKind::classify(400, Some("InvalidEntityException")),
            ApiErrorKind::InvalidEntity
        );
        assert_eq!(ApiErrorKind::classify(400, None), ApiErrorKind::BadRequest);
        assert_eq!(
            ApiErrorKind::classify(409, Some("ConcurrentModificationException")),
            ApiErrorKind::ConcurrentModification
        );
        assert_eq!(
            ApiErrorKind::classify(409, Some("EntityAlreadyExistsException")),
            ApiErrorKind::EntityAlreadyExists
        );
        assert_eq!(ApiErrorKind::classify(412, None), ApiErrorKind::ConsentRequired);
        assert_eq!(ApiErrorKind::classify(503, None), ApiErrorKind::ServerError);
        assert_eq!(ApiErrorKind::classify(418, None), ApiErrorKind::Other);
    }

    #[test]
    fn api_error_display_includes_endpoint_and_message() {
        let err = ApiError::new(
            404,
            Some("EntityNotFoundException"),
            Some("Account not found.".to_string()),
            "/v3/participants/self",
        );
        let text = err.to_string();
        assert!(text.contains("404"));
        assert!(text.contains("/v3/participants/self"));
        assert!(text.contains("Account not found."));
        assert!(err.is_not_found());
    }

    #[test]
    fn only_auth_errors_are_auth_failures() {
        let auth: Error = AuthError::NotAuthenticated { message: None }.into();
        assert!(auth.is_auth_failure());

        let api: Error = ApiError::new(500, None, None, "/v3/studies").into();
        assert!(!api.is_auth_failure());
        assert!(api.as_api_error().is_some());
    }

    #[test]
    fn sign_in_rejected_display() {
        let err = AuthError::SignInRejected {
            status: 404,
            message: Some("Credentials incorrect".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "sign-in rejected (HTTP 404): Credentials incorrect"
        );
    }
}
