//! Common error types and handling for Artmart

/// Common result type
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for the Artmart client
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Authorization error: {0}")]
    Authorization(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    #[error("Request failed with status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Classify a non-success HTTP status returned by the backend
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            401 => Error::Authentication(message),
            403 => Error::Authorization(message),
            404 => Error::NotFound(message),
            500..=599 => Error::Server { status, message },
            _ => Error::Status { status, message },
        }
    }

    /// HTTP status this error came from, if it came from a response
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Error::Authentication(_) => Some(401),
            Error::Authorization(_) => Some(403),
            Error::NotFound(_) => Some(404),
            Error::Server { status, .. } | Error::Status { status, .. } => Some(*status),
            Error::Network(_)
            | Error::Validation(_)
            | Error::Configuration(_)
            | Error::Serialization(_)
            | Error::Internal(_) => None,
        }
    }

    /// Get the error code for logs and inline display
    pub fn error_code(&self) -> &'static str {
        match self {
            Error::Authentication(_) => "AUTHENTICATION_ERROR",
            Error::Authorization(_) => "AUTHORIZATION_ERROR",
            Error::NotFound(_) => "NOT_FOUND",
            Error::Server { .. } => "SERVER_ERROR",
            Error::Status { .. } => "REQUEST_FAILED",
            Error::Network(_) => "NETWORK_ERROR",
            Error::Validation(_) => "VALIDATION_ERROR",
            Error::Configuration(_) => "CONFIGURATION_ERROR",
            Error::Serialization(_) => "SERIALIZATION_ERROR",
            Error::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Human-readable message shown next to the action that failed
    pub fn user_message(&self) -> String {
        match self {
            Error::Authentication(_) => "Unauthorized. Please log in again.".to_string(),
            Error::Authorization(_) => {
                "Forbidden. You do not have permission to perform this action.".to_string()
            }
            Error::NotFound(_) => "The requested resource was not found.".to_string(),
            Error::Server { .. } => "Server error. Please try again later.".to_string(),
            Error::Network(_) => {
                "Network error. Please check your connection and try again.".to_string()
            }
            Error::Status { status, .. } => format!("Request failed with status {}.", status),
            Error::Validation(message) => message.clone(),
            Error::Configuration(_) | Error::Serialization(_) | Error::Internal(_) => {
                "Something went wrong. Please try again.".to_string()
            }
        }
    }

    /// Whether the session token should be discarded after this error
    pub fn is_session_expired(&self) -> bool {
        matches!(self, Error::Authentication(_))
    }
}
