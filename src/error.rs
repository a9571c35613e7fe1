//! Error types for the weather tool server

use thiserror::Error;

/// Main error type for the weather tool server.
///
/// Upstream and chain failures never surface through this type; components
/// report those as explicit absence values and the tool layer phrases the
/// degradation in the response text. This enum covers the remaining cases:
/// bad configuration, invalid tool arguments, and requests for tools that
/// do not exist.
#[derive(Error, Debug)]
pub enum WeatherServerError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// A tool name with no registered operation
    #[error("Unknown tool: {name}")]
    UnknownTool { name: String },
}

impl WeatherServerError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new unknown-tool error
    pub fn unknown_tool<S: Into<String>>(name: S) -> Self {
        Self::UnknownTool { name: name.into() }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            WeatherServerError::Config { .. } => {
                "Configuration error. Please check the server configuration.".to_string()
            }
            WeatherServerError::Validation { message } => {
                format!("Invalid input: {message}")
            }
            WeatherServerError::UnknownTool { name } => {
                format!(
                    "Unknown tool \"{name}\". Available tools: {}",
                    crate::tools::TOOL_NAMES.join(", ")
                )
            }
        }
    }
}
