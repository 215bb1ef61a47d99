//! Session fetchers
//!
//! A [`SessionFetcher`] pairs a borrowed [`LinkSystem`] with the reification
//! strategy chosen for one resolution.

use crate::reify::{lookup_raw, lookup_unixfs};
use crate::{FetchError, LinkSystem};
use cas_types::{ContentId, Node};
use lifecycle::RequestContext;
use std::fmt;

/// How nodes are interpreted while walking a path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FetchMode {
    /// Segments are map keys and list indices
    Raw,
    /// Directory-shaped nodes are traversed by entry name
    UnixFs,
}

impl fmt::Display for FetchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchMode::Raw => write!(f, "raw"),
            FetchMode::UnixFs => write!(f, "unixfs"),
        }
    }
}

/// A load capability bound to one session and one interpretation
#[derive(Clone, Copy)]
pub struct SessionFetcher<'s> {
    links: &'s dyn LinkSystem,
    mode: FetchMode,
}

impl<'s> SessionFetcher<'s> {
    /// Creates a fetcher over the given session
    pub fn new(links: &'s dyn LinkSystem, mode: FetchMode) -> Self {
        Self { links, mode }
    }

    /// Returns the interpretation this fetcher applies
    pub fn mode(&self) -> FetchMode {
        self.mode
    }

    /// Loads a block, failing fast if the request is already over
    pub fn load(&self, cx: &RequestContext, id: &ContentId) -> Result<Node, FetchError> {
        cx.check()?;
        self.links.load(cx, id)
    }

    /// Looks up one path segment inside a node
    ///
    /// Returns `None` if the segment does not exist under this fetcher's
    /// interpretation.
    pub fn lookup<'n>(&self, node: &'n Node, segment: &str) -> Option<&'n Node> {
        match self.mode {
            FetchMode::Raw => lookup_raw(node, segment),
            FetchMode::UnixFs => lookup_unixfs(node, segment),
        }
    }
}

impl fmt::Debug for SessionFetcher<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionFetcher")
            .field("mode", &self.mode)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MemoryBlockStore;
    use crate::reify::directory;
    use lifecycle::{CancellationReason, CancellationSource};

    #[test]
    fn test_load_through_fetcher() {
        let store = MemoryBlockStore::new();
        let id = store.put(&Node::from("hello")).unwrap();

        let fetcher = SessionFetcher::new(&store, FetchMode::Raw);
        let node = fetcher.load(&RequestContext::background(), &id).unwrap();
        assert_eq!(node, Node::from("hello"));
    }

    #[test]
    fn test_cancelled_context_skips_load() {
        let store = MemoryBlockStore::new();
        let id = store.put(&Node::Null).unwrap();

        let source = CancellationSource::new();
        source.cancel(CancellationReason::ClientDisconnect);
        let cx = RequestContext::with_token(source.token());

        let fetcher = SessionFetcher::new(&store, FetchMode::Raw);
        assert_eq!(
            fetcher.load(&cx, &id),
            Err(FetchError::Cancelled(CancellationReason::ClientDisconnect))
        );
        assert_eq!(store.load_count(), 0);
    }

    #[test]
    fn test_mode_selects_strategy() {
        let target = ContentId::for_bytes(b"target");
        let node = directory([("entry", target)]);
        let store = MemoryBlockStore::new();

        let raw = SessionFetcher::new(&store, FetchMode::Raw);
        let unixfs = SessionFetcher::new(&store, FetchMode::UnixFs);

        assert_eq!(raw.lookup(&node, "entry"), None);
        assert_eq!(unixfs.lookup(&node, "entry"), Some(&Node::Link(target)));
        assert_eq!(unixfs.mode(), FetchMode::UnixFs);
    }
}
