//! Error types for the Mums plugin.
//!
//! This module defines the centralized error type [`MumsError`] and a type alias
//! [`Result`] used throughout the crate. Errors are derived with `thiserror`.
//!
//! There is no cancellation variant: a canceled request settles as
//! [`crate::catalog::Settlement::Canceled`] and never reaches error handling.

use thiserror::Error;

/// The main error type for Mums operations.
///
/// Network-facing variants ([`MumsError::Http`], [`MumsError::NotFound`]) are
/// surfaced to the user as a short inline message. Persistence variants are
/// logged and recovered from by the stores.
///
/// # Examples
///
/// ```
/// use mums::MumsError;
///
/// let err = MumsError::Http { status: 503 };
/// assert_eq!(err.to_string(), "HTTP 503");
/// ```
#[derive(Debug, Error)]
pub enum MumsError {
    /// The catalog API answered with a non-success status code.
    ///
    /// Transport failures reported by the host are folded into this variant
    /// with whatever status the host attached to them.
    #[error("HTTP {status}")]
    Http {
        /// Status code of the failed response.
        status: u16,
    },

    /// A lookup returned no element.
    #[error("{0}")]
    NotFound(String),

    /// A response body could not be decoded.
    #[error("Unexpected response: {0}")]
    Decode(String),

    /// Storage operation failed.
    ///
    /// Occurs when reading from or writing to the key-value backend fails.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Stored data exists but cannot be parsed.
    ///
    /// Stores recover from this by resetting to their empty or default state.
    #[error("Corrupt data under key {key}: {reason}")]
    CorruptData {
        /// Storage key holding the unreadable value.
        key: String,
        /// Parser message.
        reason: String,
    },

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Theme parsing failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Configuration is invalid.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl MumsError {
    /// Whether this error should be shown to the user rather than only logged.
    #[must_use]
    pub const fn is_user_facing(&self) -> bool {
        matches!(self, Self::Http { .. } | Self::NotFound(_) | Self::Decode(_))
    }
}

/// A specialized `Result` type for Mums operations.
pub type Result<T> = std::result::Result<T, MumsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_error_message_carries_status() {
        assert_eq!(MumsError::Http { status: 404 }.to_string(), "HTTP 404");
    }

    #[test]
    fn persistence_errors_are_not_user_facing() {
        let corrupt = MumsError::CorruptData {
            key: "k".into(),
            reason: "eof".into(),
        };
        assert!(!corrupt.is_user_facing());
        assert!(MumsError::NotFound("Recipe not found.".into()).is_user_facing());
    }
}
