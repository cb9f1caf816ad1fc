//! Error types for route registration, configuration loading and request intake.
//!
//! This module uses an opaque `Error` struct paired with an `ErrorKind` enum,
//! following the `std::io::Error` pattern. Internal error sources can change
//! without breaking consumers.
//!
//! Registration errors ([`ErrorKind::InvalidPath`], [`ErrorKind::RouteConflict`])
//! are programmer errors: they surface while the route table is being built and
//! are expected to abort start-up. Not-found and method-not-allowed are not
//! errors at all; they are routed to the configured fallback handlers.
//!
//! # Example
//!
//! ```rust
//! use forge_router::{Error, ErrorKind, Router};
//!
//! let mut router = Router::new();
//! let err = router.get("users", |_req, _w| {}).unwrap_err();
//!
//! match err.kind() {
//!     ErrorKind::InvalidPath => println!("bad route: {}", err),
//!     _ => println!("other error: {}", err),
//! }
//!
//! use http::StatusCode;
//! assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
//! ```

use {
    bytes::Bytes,
    http::{HeaderValue, StatusCode, header::CONTENT_TYPE},
    http_body_util::Full,
    serde::Serialize,
    std::fmt,
    thiserror::Error,
};

/// The kind of error that occurred.
///
/// This enum is marked `#[non_exhaustive]`, so new variants may be added
/// in future versions without breaking existing code. Always include a
/// wildcard arm when matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ErrorKind {
    /// A route or group path is malformed.
    #[error("invalid route path")]
    InvalidPath,

    /// A wildcard segment conflicts with an already registered sibling.
    #[error("route conflict")]
    RouteConflict,

    /// Configuration error (invalid TOML, missing environment variable).
    #[error("configuration error")]
    Configuration,

    /// I/O error (reading configuration files).
    #[error("I/O error")]
    Io,

    /// The incoming request could not be read.
    #[error("invalid request")]
    InvalidRequest,

    /// Internal/unexpected error.
    #[error("internal error")]
    Internal,
}

/// An error that can occur in the router.
///
/// Use [`Error::kind()`] to determine the category of error for matching,
/// and the `Display` implementation to get a human-readable message.
///
/// ```rust
/// use forge_router::{Error, ErrorKind};
///
/// let err = Error::invalid_path("path must start with '/'");
/// assert_eq!(err.kind(), ErrorKind::InvalidPath);
///
/// let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
/// let err = Error::new(ErrorKind::Io, io_err);
/// assert_eq!(err.error_code(), "IO_ERROR");
/// ```
pub struct Error {
    kind: ErrorKind,
    source: Box<dyn std::error::Error + Send + Sync + 'static>,
}

impl Error {
    /// Creates a new error with the given kind and source.
    pub fn new<E>(kind: ErrorKind, error: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync + 'static>>,
    {
        Self {
            kind,
            source: error.into(),
        }
    }

    /// Returns the kind of this error.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the error code string for this error.
    ///
    /// This is a stable identifier suitable for client-side error handling.
    pub fn error_code(&self) -> &'static str {
        match self.kind {
            ErrorKind::InvalidPath => "INVALID_PATH",
            ErrorKind::RouteConflict => "ROUTE_CONFLICT",
            ErrorKind::Configuration => "CONFIG_ERROR",
            ErrorKind::Io => "IO_ERROR",
            ErrorKind::InvalidRequest => "INVALID_REQUEST",
            ErrorKind::Internal => "INTERNAL_ERROR",
        }
    }

    /// Returns the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self.kind {
            ErrorKind::InvalidRequest => StatusCode::BAD_REQUEST,
            ErrorKind::InvalidPath
            | ErrorKind::RouteConflict
            | ErrorKind::Configuration
            | ErrorKind::Io
            | ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Converts the error into a structured error response.
    pub fn to_error_response(&self) -> ErrorResponse {
        ErrorResponse::new(self.error_code(), self.to_string())
    }

    /// Renders the error as a JSON HTTP response carrying [`Error::status_code`].
    pub fn to_http_response(&self) -> http::Response<Full<Bytes>> {
        let status = self.status_code();
        let error_response = self.to_error_response();

        tracing::error!(
            error_code = %error_response.error_code,
            message = %error_response.message,
            status = %status.as_u16(),
            "Error occurred"
        );

        let body = serde_json::to_vec(&error_response).unwrap_or_default();
        let mut response = http::Response::new(Full::new(Bytes::from(body)));
        *response.status_mut() = status;
        response
            .headers_mut()
            .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        response
    }

    /// Consumes the error and returns the inner error source.
    pub fn into_inner(self) -> Box<dyn std::error::Error + Send + Sync + 'static> {
        self.source
    }
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl Error {
    /// Creates an invalid route path error.
    pub fn invalid_path(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidPath, msg.into())
    }

    /// Creates a route conflict error.
    pub fn route_conflict(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::RouteConflict, msg.into())
    }

    /// Creates a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, msg.into())
    }

    /// Creates an I/O error from a message.
    pub fn io(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::Io, msg.into())
    }

    /// Creates an invalid request error.
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidRequest, msg.into())
    }

    /// Creates an internal error.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, msg.into())
    }
}

// ============================================================================
// Trait implementations
// ============================================================================

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Error")
            .field("kind", &self.kind)
            .field("source", &self.source)
            .finish()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.source)
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&*self.source)
    }
}

// ============================================================================
// From implementations
// ============================================================================

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::new(ErrorKind::Io, err)
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Self::new(ErrorKind::Configuration, err)
    }
}

impl From<std::env::VarError> for Error {
    fn from(err: std::env::VarError) -> Self {
        Self::new(ErrorKind::Configuration, err)
    }
}

// ============================================================================
// ErrorResponse
// ============================================================================

/// Structured error response with error code and details.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Unique error code for client-side error handling.
    pub error_code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional additional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    /// Creates a new error response.
    pub fn new(error_code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error_code: error_code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Adds details to the error response.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use std::error::Error as StdError;

    #[test]
    fn test_error_kind_display() {
        assert_eq!(format!("{}", ErrorKind::InvalidPath), "invalid route path");
        assert_eq!(format!("{}", ErrorKind::RouteConflict), "route conflict");
        assert_eq!(format!("{}", ErrorKind::InvalidRequest), "invalid request");
    }

    #[test]
    fn test_error_new() {
        let err = Error::new(ErrorKind::Internal, "test error");
        assert_eq!(err.kind(), ErrorKind::Internal);
        assert_eq!(format!("{}", err), "test error");
    }

    #[test]
    fn test_constructors_set_kind() {
        assert_eq!(Error::invalid_path("x").kind(), ErrorKind::InvalidPath);
        assert_eq!(Error::route_conflict("x").kind(), ErrorKind::RouteConflict);
        assert_eq!(Error::config("x").kind(), ErrorKind::Configuration);
        assert_eq!(Error::io("x").kind(), ErrorKind::Io);
        assert_eq!(Error::invalid_request("x").kind(), ErrorKind::InvalidRequest);
        assert_eq!(Error::internal("x").kind(), ErrorKind::Internal);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(Error::invalid_path("x").error_code(), "INVALID_PATH");
        assert_eq!(Error::route_conflict("x").error_code(), "ROUTE_CONFLICT");
        assert_eq!(Error::config("x").error_code(), "CONFIG_ERROR");
        assert_eq!(Error::invalid_request("x").error_code(), "INVALID_REQUEST");
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            Error::invalid_path("x").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            Error::invalid_request("x").status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: Error = io_err.into();
        assert_eq!(err.kind(), ErrorKind::Io);
    }

    #[test]
    fn test_from_toml_error() {
        let toml_err = toml::from_str::<toml::Table>("invalid").unwrap_err();
        let err: Error = toml_err.into();
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn test_from_var_error() {
        let err: Error = std::env::VarError::NotPresent.into();
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn test_error_response_with_details() {
        let response = ErrorResponse::new("CODE", "message").with_details("extra info");
        assert_eq!(response.error_code, "CODE");
        assert_eq!(response.details, Some("extra info".to_string()));
    }

    #[tokio::test]
    async fn test_to_http_response_is_json() {
        let err = Error::invalid_request("body stream failed");
        let response = err.to_http_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(response.headers()[CONTENT_TYPE], "application/json");

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error_code"], "INVALID_REQUEST");
        assert_eq!(json["message"], "body stream failed");
        assert!(json.get("details").is_none());
    }

    #[test]
    fn test_error_source_and_into_inner() {
        let err = Error::internal("test message");
        assert!(StdError::source(&err).is_some());
        assert_eq!(format!("{}", err.into_inner()), "test message");
    }
}
