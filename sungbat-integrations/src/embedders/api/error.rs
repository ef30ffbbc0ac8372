//! Error types for API embedders.

use thiserror::Error;

/// Result alias for API embedders.
pub type Result<T> = std::result::Result<T, ApiEmbedderError>;

/// Failures talking to a hosted embedding API.
#[derive(Error, Debug)]
pub enum ApiEmbedderError {
    /// Missing key, bad model name and similar.
    #[error("Configuration error: {message}")]
    Configuration {
        /// Detailed error message
        message: String,
    },

    /// HTTP client construction or transport failure.
    #[error("Network error: {message}")]
    Network {
        /// Detailed error message
        message: String,
    },

    /// The provider answered, but not with what was asked for.
    #[error("Invalid response: {message}")]
    InvalidResponse {
        /// Detailed error message
        message: String,
    },

    /// Error reported by the siumai client after all retries.
    #[error("Siumai error: {0}")]
    Siumai(String),
}

impl ApiEmbedderError {
    /// Create a configuration error.
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a network error.
    pub fn network<S: Into<String>>(message: S) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Create an invalid response error.
    pub fn invalid_response<S: Into<String>>(message: S) -> Self {
        Self::InvalidResponse {
            message: message.into(),
        }
    }
}

impl From<ApiEmbedderError> for sungbat_core::SungbatError {
    fn from(error: ApiEmbedderError) -> Self {
        match error {
            ApiEmbedderError::Configuration { message } => Self::configuration(message),
            ApiEmbedderError::Network { message } => {
                Self::embedding(format!("Network error: {message}"))
            }
            ApiEmbedderError::InvalidResponse { message } => {
                Self::embedding(format!("Invalid response: {message}"))
            }
            ApiEmbedderError::Siumai(message) => Self::embedding(format!("Siumai error: {message}")),
        }
    }
}
