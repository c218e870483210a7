//! Shared primitives for all Rust crates in Campusline.

#![forbid(unsafe_code)]

/// Caller identity primitives shared across services.
pub mod auth;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use auth::{CallerIdentity, Role, ScopeId};

/// Result type used across Campusline crates.
pub type AppResult<T> = Result<T, AppError>;

/// A validated non-empty UTF-8 string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NonEmptyString(String);

impl NonEmptyString {
    /// Creates a validated non-empty string.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "value must not be empty or whitespace".to_owned(),
            ));
        }

        Ok(Self(value))
    }

    /// Returns the underlying string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<NonEmptyString> for String {
    fn from(value: NonEmptyString) -> Self {
        value.0
    }
}

/// Common application error categories.
///
/// Every message is safe to show to the end user.
#[derive(Debug, Error)]
pub enum AppError {
    /// Malformed request body or query parameters.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Requested resource does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Role or visibility policy denies the access or mutation.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// Internal unexpected error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the message without the category prefix.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::InvalidInput(message)
            | Self::NotFound(message)
            | Self::Forbidden(message)
            | Self::Internal(message) => message.as_str(),
        }
    }

    /// Returns a stable machine-readable category code.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "invalid_input",
            Self::NotFound(_) => "not_found",
            Self::Forbidden(_) => "forbidden",
            Self::Internal(_) => "internal",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{AppError, NonEmptyString};

    #[test]
    fn non_empty_string_rejects_whitespace() {
        let result = NonEmptyString::new("   ");
        assert!(result.is_err());
    }

    #[test]
    fn error_message_drops_category_prefix() {
        let error = AppError::Forbidden("Access denied. Only HQ can create programs.".to_owned());
        assert_eq!(error.message(), "Access denied. Only HQ can create programs.");
        assert_eq!(
            error.to_string(),
            "forbidden: Access denied. Only HQ can create programs."
        );
        assert_eq!(error.code(), "forbidden");
    }
}
