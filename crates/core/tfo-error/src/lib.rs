//! Error types and classification for tfo.
//!
//! This crate provides:
//! - [`TfoError`] - Top-level error enum for data source reads
//! - Domain-specific errors ([`ServiceError`], [`StateError`], [`FilterError`], [`SchemaError`])
//! - [`ErrorCategory`] for retry decision making
//! - [`is_not_found`] for voiding state when the listed parent no longer exists

use thiserror::Error;

/// Top-level error type for tfo.
#[derive(Error, Debug)]
pub enum TfoError {
    /// Errors returned by the remote identity service or the transport under it
    #[error("Service error: {0}")]
    Service(#[from] ServiceError),

    /// Errors writing values into resource state
    #[error("State error: {0}")]
    State(#[from] StateError),

    /// Errors building or evaluating `filter` blocks
    #[error("Filter error: {0}")]
    Filter(#[from] FilterError),

    /// Errors validating configuration against a declarative schema
    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic errors (wrapped anyhow)
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Errors surfaced by an identity client.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Connection could not be established or was dropped
    #[error("Transport failed: {0}")]
    Transport(String),

    /// The request did not complete in time
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// The service answered with a non-success status
    #[error("Service returned {status} ({code}): {message}")]
    Status {
        status: u16,
        code: String,
        message: String,
        opc_request_id: Option<String>,
    },

    /// The response body could not be decoded
    #[error("Response decode failed: {0}")]
    Decode(String),
}

/// Errors writing into resource state.
#[derive(Error, Debug)]
pub enum StateError {
    /// A value was rejected for a known key
    #[error("Failed to set '{key}': {reason}")]
    Set { key: String, reason: String },

    /// The key is not declared by the schema backing the state
    #[error("Unknown state key: {0}")]
    UnknownKey(String),
}

/// Errors in `filter` blocks.
#[derive(Error, Debug)]
pub enum FilterError {
    /// The filter block itself is not well formed
    #[error("Malformed filter: {0}")]
    Malformed(String),
}

/// Errors validating configuration against a schema.
#[derive(Error, Debug)]
pub enum SchemaError {
    /// A required field is absent or empty
    #[error("Missing required field: {0}")]
    MissingRequired(String),

    /// A field holds a value of the wrong type
    #[error("Field '{field}' expects {expected}")]
    TypeMismatch { field: String, expected: String },

    /// A field is not declared by the schema
    #[error("Unknown field: {0}")]
    UnknownField(String),
}

/// Error classification for retry decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Transient error - retry with exponential backoff
    ///
    /// Examples: connection reset, 429 throttling, 503 from the service
    Transient,

    /// Permanent error - surface to the caller immediately
    ///
    /// Examples: 401 not authenticated, malformed response, invalid filter
    Permanent,
}

/// Classifies an error to determine retry behavior.
///
/// # Arguments
///
/// * `error` - The error to classify
/// * `retry_not_found` - Whether 404 responses count as transient. Identity
///   writes are eventually consistent, so a freshly created parent can
///   briefly answer 404.
///
/// # Returns
///
/// The appropriate [`ErrorCategory`] for retry decisions
pub fn classify_error(error: &TfoError, retry_not_found: bool) -> ErrorCategory {
    match error {
        TfoError::Service(e) => classify_service_error(e, retry_not_found),
        TfoError::State(_) => ErrorCategory::Permanent,
        TfoError::Filter(_) => ErrorCategory::Permanent,
        TfoError::Schema(_) => ErrorCategory::Permanent,
        TfoError::Config(_) => ErrorCategory::Permanent,
        TfoError::Other(e) => classify_anyhow_error(e),
    }
}

fn classify_service_error(error: &ServiceError, retry_not_found: bool) -> ErrorCategory {
    match error {
        ServiceError::Transport(_) => ErrorCategory::Transient,
        ServiceError::Timeout(_) => ErrorCategory::Transient,
        ServiceError::Decode(_) => ErrorCategory::Permanent,
        ServiceError::Status { status, code, .. } => match status {
            429 => ErrorCategory::Transient,
            500..=599 => ErrorCategory::Transient,
            409 if code == "IncorrectState" => ErrorCategory::Transient,
            404 if retry_not_found => ErrorCategory::Transient,
            _ => ErrorCategory::Permanent,
        },
    }
}

fn classify_anyhow_error(error: &anyhow::Error) -> ErrorCategory {
    let err_string = error.to_string().to_lowercase();

    if err_string.contains("timeout")
        || err_string.contains("connection reset")
        || err_string.contains("connection refused")
    {
        ErrorCategory::Transient
    } else {
        ErrorCategory::Permanent
    }
}

/// Reports whether an error means the listed resource does not exist.
pub fn is_not_found(error: &TfoError) -> bool {
    match error {
        TfoError::Service(ServiceError::Status { status: 404, .. }) => true,
        other => other.to_string().contains("does not exist"),
    }
}

/// Result type alias using TfoError.
pub type Result<T> = std::result::Result<T, TfoError>;
