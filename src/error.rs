//! Error types for the DeliverEase widget.
//!
//! This module defines custom error types using `thiserror` for precise error handling.

use crate::domain::ValidationError;
use crate::gateway::GatewayError;
use thiserror::Error;

/// Errors that can occur when talking to the lookup service.
#[derive(Error, Debug)]
pub enum LookupApiError {
    /// HTTP request failed at the transport level
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// Service answered with a non-2xx status code
    #[error("API error (status {status}): {message}")]
    Status { status: u16, message: String },

    /// Failed to parse JSON response
    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Transport-level timeout
    #[error("Request timeout")]
    Timeout,
}

impl LookupApiError {
    /// HTTP status code, when the service answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Required environment variable is missing
    #[error("Missing required environment variable: {0}")]
    MissingVar(String),

    /// Environment variable has invalid value
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },

    /// Translation catalog could not be loaded
    #[error("Failed to load translation catalog: {0}")]
    Catalog(String),
}

/// Errors raised by the manual-entry modal.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ManualEntryError {
    /// Submit or cancel while the modal is closed
    #[error("Manual entry form is not open")]
    NotOpen,

    /// A required field was left blank
    #[error("Required field is empty: {0}")]
    MissingField(&'static str),
}

/// Errors raised while posting a message to the parent frame.
#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("Failed to serialize message: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to deliver message: {0}")]
    Io(#[from] std::io::Error),
}

/// Controller-level errors. Lookup failures are not errors: they become
/// outcomes and route to manual entry.
#[derive(Error, Debug)]
pub enum WidgetError {
    /// Input did not pass client-side validation; nothing was sent
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A lookup is already in flight
    #[error("A lookup is already in progress")]
    Busy,

    #[error(transparent)]
    ManualEntry(#[from] ManualEntryError),

    #[error(transparent)]
    Bridge(#[from] BridgeError),

    /// Delivery check failed or timed out
    #[error("Delivery check failed: {0}")]
    Delivery(#[from] GatewayError<LookupApiError>),
}

/// Convenience type alias for Results with LookupApiError
pub type LookupApiResult<T> = Result<T, LookupApiError>;

/// Convenience type alias for Results with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Convenience type alias for Results with WidgetError
pub type WidgetResult<T> = Result<T, WidgetError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = LookupApiError::Timeout;
        assert_eq!(err.to_string(), "Request timeout");

        let err = ConfigError::MissingVar("DELIVEREASE_API_URL".to_string());
        assert_eq!(
            err.to_string(),
            "Missing required environment variable: DELIVEREASE_API_URL"
        );

        let err = ManualEntryError::MissingField("city");
        assert_eq!(err.to_string(), "Required field is empty: city");

        assert_eq!(
            WidgetError::Busy.to_string(),
            "A lookup is already in progress"
        );
    }

    #[test]
    fn test_status_accessor() {
        let err = LookupApiError::Status {
            status: 503,
            message: "busy".to_string(),
        };
        assert_eq!(err.status(), Some(503));
        assert!(err.to_string().contains("503"));
        assert_eq!(LookupApiError::Timeout.status(), None);
    }

    #[test]
    fn test_validation_error_is_transparent() {
        let err: WidgetError = ValidationError::InvalidPhone("123".to_string()).into();
        assert_eq!(
            err.to_string(),
            "Invalid phone number (expected 8 digits): 123"
        );
    }
}
