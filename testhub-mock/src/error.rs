//! Error types

use std::fmt;
use std::time::Duration;

use crate::network::NetworkFault;
use crate::server::HttpStatus;

/// Errors returned by the mock service layer.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MockError {
    /// No record with this id.
    #[error("{endpoint} with id {id} not found")]
    NotFound {
        /// Endpoint name, e.g. `Users`.
        endpoint: String,
        /// The id that was looked up.
        id: String,
    },

    /// Injected transport failure.
    #[error("{0}")]
    Network(NetworkFault),

    /// The simulated request ran past its timeout.
    #[error("Request timeout: the server took longer than {0:?} to respond")]
    Timeout(Duration),

    /// Injected non-2xx status.
    #[error("{} {}", .0.code, .0.message)]
    Server(HttpStatus),

    /// Input failed validation.
    #[error("Validation failed: {}", format_fields(.0))]
    Validation(Vec<FieldValidationError>),

    /// Page or limit of zero.
    #[error("Invalid pagination: page {page}, limit {limit}")]
    InvalidPagination {
        /// Requested page.
        page: usize,
        /// Requested page size.
        limit: usize,
    },

    /// A feed cursor that is not a record offset.
    #[error("Invalid cursor '{0}'")]
    InvalidCursor(String),
}

impl MockError {
    /// Creates a not-found error.
    pub fn not_found(endpoint: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            endpoint: endpoint.into(),
            id: id.into(),
        }
    }

    /// Returns the HTTP status code this error corresponds to.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::NotFound { .. } => Some(404),
            Self::Server(status) => Some(status.code),
            Self::Validation(_) => Some(422),
            Self::InvalidPagination { .. } | Self::InvalidCursor(_) => Some(400),
            Self::Timeout(_) => Some(408),
            Self::Network(_) => None,
        }
    }

    /// Returns `true` if repeating the request could succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Server(status) => matches!(status.code, 408 | 429 | 500 | 502 | 503 | 504),
            Self::Network(_) | Self::Timeout(_) => true,
            _ => false,
        }
    }
}

fn format_fields(errors: &[FieldValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Error information for a specific field that failed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldValidationError {
    /// The field that failed validation.
    pub field: String,
    /// Human-readable validation error message.
    pub message: String,
    /// Optional error code.
    pub code: Option<String>,
}

impl FieldValidationError {
    /// Creates a new field validation error.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            code: None,
        }
    }

    /// Creates a new field validation error with an error code.
    pub fn with_code(
        field: impl Into<String>,
        message: impl Into<String>,
        code: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            code: Some(code.into()),
        }
    }
}

impl fmt::Display for FieldValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(code) = &self.code {
            write!(f, "{}: {} ({})", self.field, self.message, code)
        } else {
            write!(f, "{}: {}", self.field, self.message)
        }
    }
}
