//! Path namespaces

use serde::{Deserialize, Serialize};
use std::fmt;

/// The leading segment of a path
///
/// Decides how the rest of the path is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Namespace {
    /// Immutable file/directory content
    Ipfs,
    /// Immutable structured data
    Ipld,
    /// Mutable names that redirect to an immutable path
    Ipns,
    /// Anything else; syntactically fine, never resolvable
    Unknown,
}

impl Namespace {
    /// Classifies a namespace token
    pub fn from_token(token: &str) -> Self {
        match token {
            "ipfs" => Namespace::Ipfs,
            "ipld" => Namespace::Ipld,
            "ipns" => Namespace::Ipns,
            _ => Namespace::Unknown,
        }
    }

    /// Returns the canonical token, or `None` for [`Namespace::Unknown`]
    pub fn token(&self) -> Option<&'static str> {
        match self {
            Namespace::Ipfs => Some("ipfs"),
            Namespace::Ipld => Some("ipld"),
            Namespace::Ipns => Some("ipns"),
            Namespace::Unknown => None,
        }
    }

    /// Returns true if content under this namespace can change over time
    pub fn is_mutable(&self) -> bool {
        matches!(self, Namespace::Ipns)
    }

    /// Returns true if the segment after this namespace is a content id
    pub fn is_immutable_root(&self) -> bool {
        matches!(self, Namespace::Ipfs | Namespace::Ipld)
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token().unwrap_or("unknown"))
    }
}
