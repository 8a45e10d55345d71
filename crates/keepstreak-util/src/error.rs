//! Error types for keepstreak

use thiserror::Error;

/// Core error type for keepstreak operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeepstreakError {
    #[error("Invalid time '{value}': {message}")]
    InvalidTime { value: String, message: String },

    #[error("Validation error: {0}")]
    ValidationError(String),
}

impl KeepstreakError {
    pub fn invalid_time(value: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidTime {
            value: value.into(),
            message: message.into(),
        }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::ValidationError(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, KeepstreakError>;
