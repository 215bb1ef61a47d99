//! Resolution errors

use gateway_path::PathError;
use gateway_session::{FetchError, NameError};
use thiserror::Error;

/// Errors that can occur while resolving a path
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ResolveError {
    /// Path does not match the grammar
    #[error(transparent)]
    InvalidPath(#[from] PathError),

    /// Path is not rooted in `ipfs` or `ipld` after naming
    #[error("unsupported path namespace: {0}")]
    UnsupportedNamespace(String),

    /// Naming backend cannot resolve names right now
    #[error("this action must be run in online mode, try running 'ipfs daemon' first")]
    Offline,

    /// Naming backend failed for another reason
    #[error("name resolution failed: {0}")]
    Name(#[source] NameError),

    /// A block could not be loaded
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// A segment names nothing and the resolver is configured to fail
    #[error("no entry {segment:?} while resolving {path}")]
    SegmentNotFound { segment: String, path: String },

    /// Walk followed more links than allowed
    #[error("resolving {path} followed more than {limit} links")]
    DepthExceeded { path: String, limit: usize },
}

/// How a caller should present a failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureClass {
    /// Request itself is wrong; retrying will not help
    BadRequest,
    /// Something named by the request does not exist
    NotFound,
    /// Retry once the node is online
    Offline,
    /// Transient or unknown backend trouble
    Unavailable,
    /// Request ended before resolution finished
    Cancelled,
}

impl ResolveError {
    /// Classifies this error for presentation
    pub fn class(&self) -> FailureClass {
        match self {
            ResolveError::InvalidPath(_)
            | ResolveError::UnsupportedNamespace(_)
            | ResolveError::DepthExceeded { .. } => FailureClass::BadRequest,
            ResolveError::Offline => FailureClass::Offline,
            ResolveError::Name(_) => FailureClass::Unavailable,
            ResolveError::SegmentNotFound { .. } => FailureClass::NotFound,
            ResolveError::Fetch(fetch) => match fetch {
                FetchError::NotFound(_) => FailureClass::NotFound,
                FetchError::Cancelled(_) | FetchError::Timeout => FailureClass::Cancelled,
                FetchError::Decode { .. } | FetchError::Unavailable(_) => {
                    FailureClass::Unavailable
                }
            },
        }
    }

    /// Returns true if the caller should retry once online
    pub fn is_offline(&self) -> bool {
        matches!(self, ResolveError::Offline)
    }
}
