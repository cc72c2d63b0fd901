//! Error types and handling for `WeatherDesk`

use thiserror::Error;

/// Notice shown when a place name resolves to nothing
pub const NOT_FOUND_MESSAGE: &str = "City not found! Please check your spelling.";

/// Notice shown when either remote call fails
pub const NETWORK_FAILED_MESSAGE: &str = "Something went wrong with the network.";

/// Main error type for the `WeatherDesk` application
#[derive(Error, Debug)]
pub enum WeatherDeskError {
    /// Converter input that is not a number
    #[error("Parse error: '{input}' is not a number")]
    Parse { input: String },

    /// Converter mode outside the known set
    #[error("Invalid selection: '{choice}'")]
    InvalidSelection { choice: String },

    /// Geocoding returned no match
    #[error("Location not found: {query}")]
    NotFound { query: String },

    /// Transport failure or non-success HTTP status
    #[error("Network error: {message}")]
    Network { message: String },

    /// Response body could not be understood
    #[error("API error: {message}")]
    Api { message: String },

    /// Suggestion lookup failure, degraded to an empty list by callers
    #[error("Suggestion lookup failed for '{query}': {message}")]
    Suggestion { query: String, message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl WeatherDeskError {
    /// Create a new parse error
    pub fn parse<S: Into<String>>(input: S) -> Self {
        Self::Parse {
            input: input.into(),
        }
    }

    /// Create a new invalid selection error
    pub fn invalid_selection<S: Into<String>>(choice: S) -> Self {
        Self::InvalidSelection {
            choice: choice.into(),
        }
    }

    /// Create a new not-found error
    pub fn not_found<S: Into<String>>(query: S) -> Self {
        Self::NotFound {
            query: query.into(),
        }
    }

    /// Create a new network error
    pub fn network<S: Into<String>>(message: S) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Create a new API error
    pub fn api<S: Into<String>>(message: S) -> Self {
        Self::Api {
            message: message.into(),
        }
    }

    /// Create a new suggestion error
    pub fn suggestion<Q: Into<String>, S: Into<String>>(query: Q, message: S) -> Self {
        Self::Suggestion {
            query: query.into(),
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Whether the failure came from talking to a remote service
    #[must_use]
    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            Self::Network { .. } | Self::Api { .. } | Self::Suggestion { .. }
        )
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Parse { input } => format!("'{input}' is not a temperature"),
            Self::InvalidSelection { .. } => "Invalid choice. Please pick 1 or 2.".to_string(),
            Self::NotFound { .. } => NOT_FOUND_MESSAGE.to_string(),
            Self::Network { .. } | Self::Api { .. } | Self::Suggestion { .. } => {
                NETWORK_FAILED_MESSAGE.to_string()
            }
            Self::Validation { message } => format!("Invalid input: {message}"),
            Self::Config { .. } => {
                "Configuration error. Please check your config file and environment.".to_string()
            }
            Self::Io { .. } => "Terminal I/O failed.".to_string(),
        }
    }
}
