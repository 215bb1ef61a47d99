//! Session error types

use cas_types::ContentId;
use lifecycle::{CancellationReason, LifecycleError};
use thiserror::Error;

/// Errors that can occur while loading a block
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    /// No block with this id is available to the session
    #[error("Block not found: {0}")]
    NotFound(ContentId),

    /// Block bytes could not be decoded
    #[error("Failed to decode block {id}: {reason}")]
    Decode { id: ContentId, reason: String },

    /// Request was cancelled while loading
    #[error("Load cancelled: {0}")]
    Cancelled(CancellationReason),

    /// Request deadline passed while loading
    #[error("Load timed out")]
    Timeout,

    /// Backing store could not be reached
    #[error("Block store unavailable: {0}")]
    Unavailable(String),
}

impl From<LifecycleError> for FetchError {
    fn from(err: LifecycleError) -> Self {
        match err {
            LifecycleError::Cancelled { reason } => FetchError::Cancelled(reason),
            LifecycleError::Timeout => FetchError::Timeout,
        }
    }
}

/// Errors reported by a naming backend
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NameError {
    /// Backend cannot resolve names at all right now
    #[error("{0}")]
    CannotResolve(String),

    /// Any other backend failure
    #[error("{0}")]
    Backend(String),
}

impl NameError {
    /// Returns the backend's message
    pub fn message(&self) -> &str {
        match self {
            NameError::CannotResolve(msg) | NameError::Backend(msg) => msg,
        }
    }
}
