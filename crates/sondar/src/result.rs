//! Result and error types for Sondar.

use thiserror::Error;

/// Result type for Sondar operations
pub type SondarResult<T> = Result<T, SondarError>;

/// Errors that can occur in Sondar
#[derive(Debug, Error)]
pub enum SondarError {
    /// No element was ever located before the deadline expired
    #[error("Element {locator} not found within {timeout_ms}ms")]
    ElementNotFound {
        /// Locator that was polled
        locator: String,
        /// Timeout in milliseconds
        timeout_ms: u64,
    },

    /// An element was located but never passed its readiness check.
    ///
    /// Kept distinct from [`SondarError::ElementNotFound`]: callers may want
    /// to know the target rendered but stayed non-interactable.
    #[error("Element {locator} was found but not ready at deadline")]
    ElementNotReady {
        /// Locator that was polled
        locator: String,
    },

    /// Driver lacks a required capability (e.g. screenshot support)
    #[error("Driver does not support {capability}")]
    UnsupportedCapability {
        /// Missing capability name
        capability: String,
    },

    /// Reading or writing captured binary evidence failed
    #[error("Evidence I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// Target cannot currently receive the interaction
    #[error("Element not interactable: {message}")]
    NotInteractable {
        /// Driver-reported reason
        message: String,
    },

    /// Hard driver fault (not a recoverable lookup miss)
    #[error("Driver error: {message}")]
    Driver {
        /// Error message
        message: String,
    },

    /// Malformed configuration or test data
    #[error("Configuration error: {message}")]
    Config {
        /// Error message
        message: String,
    },
}

impl SondarError {
    /// Create a driver fault from any message
    #[must_use]
    pub fn driver(message: impl Into<String>) -> Self {
        Self::Driver {
            message: message.into(),
        }
    }

    /// Create a configuration error from any message
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}
