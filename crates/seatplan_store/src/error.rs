//! Error types for store operations.

use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur against the document store or audit sink.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A document or audit write failed.
    #[error("write failed: {message}")]
    Write {
        /// Description of the failure.
        message: String,
    },

    /// A document or audit read failed.
    #[error("read failed: {message}")]
    Read {
        /// Description of the failure.
        message: String,
    },

    /// The change-notification channel failed.
    #[error("subscription failed: {message}")]
    Subscription {
        /// Description of the failure.
        message: String,
    },

    /// The document or audit payload could not be (de)serialized.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl StoreError {
    /// Creates a write error.
    pub fn write(message: impl Into<String>) -> Self {
        Self::Write {
            message: message.into(),
        }
    }

    /// Creates a read error.
    pub fn read(message: impl Into<String>) -> Self {
        Self::Read {
            message: message.into(),
        }
    }

    /// Creates a subscription error.
    pub fn subscription(message: impl Into<String>) -> Self {
        Self::Subscription {
            message: message.into(),
        }
    }
}
