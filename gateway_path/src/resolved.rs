//! Resolved paths
//!
//! A [`ResolvedPath`] is a [`Path`] together with the block it resolved to.
//! Given three linked blocks `root -> a -> b`, where `b` is
//! `{"foo": {"bar": 42}}`:
//!
//! | path                       | terminal | root   | remainder |
//! |----------------------------|----------|--------|-----------|
//! | `/ipfs/<root>`             | `root`   | `root` | (empty)   |
//! | `/ipfs/<root>/a`           | `a`      | `root` | (empty)   |
//! | `/ipfs/<root>/a/b/foo`     | `b`      | `root` | `foo`     |
//! | `/ipfs/<root>/a/b/foo/bar` | `b`      | `root` | `foo/bar` |

use crate::{Namespace, Path};
use cas_types::ContentId;
use std::fmt;

/// A path resolved as far as its block links go
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResolvedPath {
    path: Path,
    terminal: ContentId,
    root: ContentId,
    remainder: String,
}

impl ResolvedPath {
    /// Creates a resolved path from its parts
    ///
    /// Performs no checks beyond stripping leading slashes from `remainder`;
    /// intended for resolver implementations.
    pub fn new(
        path: Path,
        terminal: ContentId,
        root: ContentId,
        remainder: impl Into<String>,
    ) -> Self {
        let remainder = remainder.into();
        let remainder = if remainder.starts_with('/') {
            remainder.trim_start_matches('/').to_string()
        } else {
            remainder
        };
        Self {
            path,
            terminal,
            root,
            remainder,
        }
    }

    /// Creates an already-resolved `/ipfs/<id>` path
    pub fn ipfs(id: ContentId) -> Self {
        Self::new(Path::ipfs(&id), id, id, "")
    }

    /// Creates an already-resolved `/ipld/<id>` path
    pub fn ipld(id: ContentId) -> Self {
        Self::new(Path::ipld(&id), id, id, "")
    }

    /// Creates an already-resolved path in an immutable namespace
    ///
    /// Returns `None` for namespaces whose root is not a content id.
    pub fn from_content_id(namespace: Namespace, id: ContentId) -> Option<Self> {
        if !namespace.is_immutable_root() {
            return None;
        }
        Some(Self::new(Path::from_content_id(namespace, &id), id, id, ""))
    }

    /// Returns the id of the last block reached
    pub fn terminal_id(&self) -> &ContentId {
        &self.terminal
    }

    /// Returns the id of the block the path is rooted at
    pub fn root_id(&self) -> &ContentId {
        &self.root
    }

    /// Returns the part of the path inside the terminal block
    pub fn remainder(&self) -> &str {
        &self.remainder
    }

    /// Returns the underlying path
    pub fn as_path(&self) -> &Path {
        &self.path
    }

}

impl fmt::Display for ResolvedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path)
    }
}

/// Either an unresolved path or one that has already been resolved
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GatewayPath {
    Unresolved(Path),
    Resolved(ResolvedPath),
}

impl GatewayPath {
    /// Returns the path text and classification shared by both states
    pub fn as_path(&self) -> &Path {
        match self {
            GatewayPath::Unresolved(path) => path,
            GatewayPath::Resolved(resolved) => resolved.as_path(),
        }
    }

    /// Returns true if this path has already been resolved
    pub fn is_resolved(&self) -> bool {
        matches!(self, GatewayPath::Resolved(_))
    }

    /// Returns the resolution, if any
    pub fn as_resolved(&self) -> Option<&ResolvedPath> {
        match self {
            GatewayPath::Resolved(resolved) => Some(resolved),
            GatewayPath::Unresolved(_) => None,
        }
    }
}

impl From<Path> for GatewayPath {
    fn from(path: Path) -> Self {
        GatewayPath::Unresolved(path)
    }
}

impl From<ResolvedPath> for GatewayPath {
    fn from(resolved: ResolvedPath) -> Self {
        GatewayPath::Resolved(resolved)
    }
}

impl From<&str> for GatewayPath {
    fn from(raw: &str) -> Self {
        GatewayPath::Unresolved(Path::parse(raw))
    }
}

impl fmt::Display for GatewayPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ipfs_resolved_path() {
        let id = ContentId::for_bytes(b"root");
        let resolved = ResolvedPath::ipfs(id);

        assert_eq!(resolved.to_string(), format!("/ipfs/{}", id));
        assert_eq!(resolved.terminal_id(), &id);
        assert_eq!(resolved.root_id(), &id);
        assert_eq!(resolved.remainder(), "");
        assert!(resolved.as_path().is_valid().is_ok());
        assert_eq!(resolved.as_path().namespace(), Some(Namespace::Ipfs));
        assert!(!resolved.as_path().is_mutable());
    }

    #[test]
    fn test_ipld_resolved_path() {
        let id = ContentId::for_bytes(b"data");
        let resolved = ResolvedPath::ipld(id);
        assert_eq!(resolved.as_path().namespace(), Some(Namespace::Ipld));
        assert_eq!(resolved.as_path().as_str(), format!("/ipld/{}", id));
    }

    #[test]
    fn test_from_content_id_rejects_mutable_namespace() {
        let id = ContentId::for_bytes(b"x");
        assert!(ResolvedPath::from_content_id(Namespace::Ipns, id).is_none());
        assert!(ResolvedPath::from_content_id(Namespace::Unknown, id).is_none());
        assert!(ResolvedPath::from_content_id(Namespace::Ipld, id).is_some());
    }

    #[test]
    fn test_remainder_never_starts_with_slash() {
        let root = ContentId::for_bytes(b"root");
        let leaf = ContentId::for_bytes(b"leaf");
        let path = Path::ipfs(&root).join(&["a", "foo", "bar"]);

        let resolved = ResolvedPath::new(path, leaf, root, "//foo/bar");
        assert_eq!(resolved.remainder(), "foo/bar");
    }

    #[test]
    fn test_gateway_path_states() {
        let id = ContentId::for_bytes(b"root");

        let unresolved = GatewayPath::from(Path::ipfs(&id));
        assert!(!unresolved.is_resolved());
        assert!(unresolved.as_resolved().is_none());

        let resolved = GatewayPath::from(ResolvedPath::ipfs(id));
        assert!(resolved.is_resolved());
        assert_eq!(resolved.as_resolved().unwrap().terminal_id(), &id);
        assert_eq!(resolved.as_path(), unresolved.as_path());
    }
}
