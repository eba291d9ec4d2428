//! Error types and handling for the `TrafficAI` application

use thiserror::Error;

/// Main error type for the `TrafficAI` application
#[derive(Error, Debug)]
pub enum TrafficAiError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Weather fetch errors (network failure, non-200 status, malformed body)
    #[error("Weather fetch error: {message}")]
    Fetch { message: String },

    /// Model artifact errors (missing or corrupt file); fatal at startup
    #[error("Model artifact error: {message}")]
    Artifact { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// General application errors
    #[error("Application error: {message}")]
    General { message: String },
}

impl TrafficAiError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new weather fetch error
    pub fn fetch<S: Into<String>>(message: S) -> Self {
        Self::Fetch {
            message: message.into(),
        }
    }

    /// Create a new model artifact error
    pub fn artifact<S: Into<String>>(message: S) -> Self {
        Self::Artifact {
            message: message.into(),
        }
    }

    /// Create a new general error
    pub fn general<S: Into<String>>(message: S) -> Self {
        Self::General {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            TrafficAiError::Config { .. } => {
                "Configuration error. Please check your config file and API key.".to_string()
            }
            TrafficAiError::Fetch { .. } => {
                "Weather API Error. The next scheduled refresh will try again.".to_string()
            }
            TrafficAiError::Artifact { .. } => {
                "Congestion model could not be loaded. Please check the model file.".to_string()
            }
            TrafficAiError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
            TrafficAiError::General { message } => message.clone(),
        }
    }
}
