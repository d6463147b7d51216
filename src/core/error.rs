//! Typed error handling for presenters
//!
//! Every fallible operation in the crate returns [`PresenterError`]. The two
//! errors a caller is expected to meet in practice are:
//!
//! - [`PresenterError::NoPresenter`]: presentation was requested without a
//!   presenter and the record type has no default one
//! - [`PresenterError::Unwritable`]: something tried to assign or delete a key
//!   of presented output, which is a read-only projection
//!
//! # Example
//!
//! ```rust,ignore
//! use present::prelude::*;
//!
//! match user.present() {
//!     Ok(presenter) => println!("{}", presenter),
//!     Err(PresenterError::NoPresenter { record }) => {
//!         eprintln!("{} has no default presenter", record);
//!     }
//!     Err(e) => eprintln!("Other error: {}", e),
//! }
//! ```

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, PresenterError>;

/// The main error type for presenters
#[derive(Debug, Error)]
pub enum PresenterError {
    /// No presenter was given and the record type has no default presenter
    #[error("No presenter or default presenter passed to present() for {record}")]
    NoPresenter { record: &'static str },

    /// Presented output cannot be written to
    #[error("Presented output is read-only: cannot {operation} key [{key}]")]
    Unwritable {
        key: String,
        operation: WriteOperation,
    },

    /// Neither a computed attribute nor the record could provide the property
    #[error("Property [{name}] could not be resolved.")]
    PropertyNotResolvable { name: String },

    /// Neither the presenter nor the record defines the method
    #[error("Method [{method}] does not exist on {target}")]
    MethodNotFound { method: String, target: String },

    /// An attribute name failed validation
    #[error("Invalid attribute name [{name}]")]
    InvalidAttributeName { name: String },

    /// JSON encoding failed
    #[error("JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),

    /// Presenter configuration is invalid
    #[error("Configuration error: {0}")]
    Config(String),
}

/// The kind of write that was rejected by [`PresenterError::Unwritable`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOperation {
    Set,
    Unset,
}

impl fmt::Display for WriteOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WriteOperation::Set => write!(f, "set"),
            WriteOperation::Unset => write!(f, "unset"),
        }
    }
}

/// Error body returned to HTTP clients
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
}

impl PresenterError {
    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            PresenterError::NoPresenter { .. } => "NO_PRESENTER",
            PresenterError::Unwritable { .. } => "UNWRITABLE",
            PresenterError::PropertyNotResolvable { .. } => "PROPERTY_NOT_RESOLVABLE",
            PresenterError::MethodNotFound { .. } => "METHOD_NOT_FOUND",
            PresenterError::InvalidAttributeName { .. } => "INVALID_ATTRIBUTE_NAME",
            PresenterError::Json(_) => "JSON_ERROR",
            PresenterError::Config(_) => "CONFIG_ERROR",
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
        }
    }

    pub(crate) fn unwritable(key: &str, operation: WriteOperation) -> Self {
        PresenterError::Unwritable {
            key: key.to_string(),
            operation,
        }
    }
}

#[cfg(feature = "http")]
mod http {
    use super::PresenterError;
    use axum::Json;
    use axum::http::StatusCode;
    use axum::response::{IntoResponse, Response};

    impl PresenterError {
        /// Get the HTTP status code for this error
        pub fn status_code(&self) -> StatusCode {
            match self {
                PresenterError::Unwritable { .. } => StatusCode::METHOD_NOT_ALLOWED,
                PresenterError::PropertyNotResolvable { .. } => StatusCode::NOT_FOUND,
                PresenterError::MethodNotFound { .. } => StatusCode::NOT_FOUND,
                PresenterError::NoPresenter { .. }
                | PresenterError::InvalidAttributeName { .. }
                | PresenterError::Json(_)
                | PresenterError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            }
        }
    }

    impl IntoResponse for PresenterError {
        fn into_response(self) -> Response {
            let status = self.status_code();
            let body = Json(self.to_response());
            (status, body).into_response()
        }
    }
}
