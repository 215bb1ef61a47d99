//! In-memory collaborator
//!
//! A [`MockApi`] backs a gateway with a [`MemoryBlockStore`] and a fixed table
//! of name mappings. It is meant for tests and local experiments; nothing here
//! touches the network or disk.
//!
//! Every session shares the store handle it was created from. The store never
//! evicts, which satisfies the monotonic-visibility guarantee trivially.

use crate::{FetchError, GatewayApi, LinkSystem, NameError, NameResolver};
use cas_types::{codec, CodecError, ContentId, Node};
use lifecycle::{RequestContext, RequestId};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

/// Thread-safe in-memory block store
///
/// Cloning yields another handle onto the same blocks.
#[derive(Debug, Clone, Default)]
pub struct MemoryBlockStore {
    blocks: Arc<RwLock<HashMap<ContentId, Vec<u8>>>>,
    loads: Arc<AtomicUsize>,
}

impl MemoryBlockStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Encodes and stores a node, returning its id
    pub fn put(&self, node: &Node) -> Result<ContentId, CodecError> {
        let bytes = codec::encode(node)?;
        Ok(self.put_raw(bytes))
    }

    /// Stores raw block bytes, returning their id
    ///
    /// The bytes are not checked; a block that does not decode will fail
    /// when loaded.
    pub fn put_raw(&self, bytes: Vec<u8>) -> ContentId {
        let id = ContentId::for_bytes(&bytes);
        let mut blocks = match self.blocks.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        blocks.insert(id, bytes);
        id
    }

    /// Returns true if a block with this id is stored
    pub fn contains(&self, id: &ContentId) -> bool {
        match self.blocks.read() {
            Ok(guard) => guard.contains_key(id),
            Err(poisoned) => poisoned.into_inner().contains_key(id),
        }
    }

    /// Returns the number of stored blocks
    pub fn len(&self) -> usize {
        match self.blocks.read() {
            Ok(guard) => guard.len(),
            Err(poisoned) => poisoned.into_inner().len(),
        }
    }

    /// Returns true if no blocks are stored
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns how many loads have reached this store
    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }

    fn read_block(&self, id: &ContentId) -> Option<Vec<u8>> {
        match self.blocks.read() {
            Ok(guard) => guard.get(id).cloned(),
            Err(poisoned) => poisoned.into_inner().get(id).cloned(),
        }
    }
}

impl LinkSystem for MemoryBlockStore {
    fn load(&self, cx: &RequestContext, id: &ContentId) -> Result<Node, FetchError> {
        cx.check()?;
        self.loads.fetch_add(1, Ordering::SeqCst);

        let bytes = self.read_block(id).ok_or(FetchError::NotFound(*id))?;
        codec::decode(&bytes).map_err(|err| FetchError::Decode {
            id: *id,
            reason: err.to_string(),
        })
    }
}

/// A session handed out by [`MockApi`]
#[derive(Debug, Clone)]
pub struct MockSession {
    request_id: RequestId,
    store: MemoryBlockStore,
}

impl MockSession {
    /// Returns the request this session was opened for
    pub fn request_id(&self) -> RequestId {
        self.request_id
    }
}

impl LinkSystem for MockSession {
    fn load(&self, cx: &RequestContext, id: &ContentId) -> Result<Node, FetchError> {
        log::trace!("{}: loading block {}", self.request_id, id.short());
        self.store.load(cx, id)
    }
}

/// Gateway API backed by memory
///
/// Name lookups are only enabled once a mapping or failure has been
/// registered; until then [`GatewayApi::name_resolver`] returns `None`.
#[derive(Debug, Clone, Default)]
pub struct MockApi {
    store: MemoryBlockStore,
    names: HashMap<String, String>,
    name_failures: HashMap<String, NameError>,
}

impl MockApi {
    /// Creates an API over the given store
    pub fn new(store: MemoryBlockStore) -> Self {
        Self {
            store,
            names: HashMap::new(),
            name_failures: HashMap::new(),
        }
    }

    /// Maps a name such as `/ipns/example.com` to a target path
    pub fn with_name(mut self, name: impl Into<String>, target: impl Into<String>) -> Self {
        self.names.insert(name.into(), target.into());
        self
    }

    /// Makes lookups of a name fail with the given error
    pub fn with_name_failure(mut self, name: impl Into<String>, err: NameError) -> Self {
        self.name_failures.insert(name.into(), err);
        self
    }

    /// Returns the backing store
    pub fn store(&self) -> &MemoryBlockStore {
        &self.store
    }

    /// Finds the registered name that `path` starts with
    ///
    /// Returns the registered key and the unmatched tail of `path`.
    fn split_name<'p>(&self, path: &'p str) -> Option<(&'p str, &'p str)> {
        if self.names.contains_key(path) || self.name_failures.contains_key(path) {
            return Some((path, ""));
        }

        let mut slashes = path.match_indices('/').map(|(i, _)| i).skip(2);
        let end = slashes.next().unwrap_or(path.len());
        let (head, tail) = path.split_at(end);
        if self.names.contains_key(head) || self.name_failures.contains_key(head) {
            Some((head, tail))
        } else {
            None
        }
    }
}

impl NameResolver for MockApi {
    fn resolve(&self, _cx: &RequestContext, name: &str) -> Result<String, NameError> {
        let Some((key, tail)) = self.split_name(name) else {
            log::debug!("did not resolve for {}", name);
            return Ok(name.to_string());
        };

        if let Some(target) = self.names.get(key) {
            log::debug!("did resolve for {}", name);
            return Ok(format!("{}{}", target, tail));
        }

        match self.name_failures.get(key) {
            Some(err) => Err(err.clone()),
            None => Ok(name.to_string()),
        }
    }
}

impl GatewayApi for MockApi {
    type Session = MockSession;

    fn new_session(&self, cx: &RequestContext) -> MockSession {
        log::debug!("{}: opening session", cx.request_id());
        MockSession {
            request_id: cx.request_id(),
            store: self.store.clone(),
        }
    }

    fn name_resolver(&self) -> Option<&dyn NameResolver> {
        if self.names.is_empty() && self.name_failures.is_empty() {
            None
        } else {
            Some(self)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_and_load() {
        let store = MemoryBlockStore::new();
        let node = Node::map([("hello", Node::from("world"))]);
        let id = store.put(&node).unwrap();

        assert!(store.contains(&id));
        assert_eq!(store.len(), 1);

        let loaded = store.load(&RequestContext::background(), &id).unwrap();
        assert_eq!(loaded, node);
        assert_eq!(store.load_count(), 1);
    }

    #[test]
    fn test_put_is_content_addressed() {
        let store = MemoryBlockStore::new();
        let a = store.put(&Node::from("same")).unwrap();
        let b = store.put(&Node::from("same")).unwrap();
        assert_eq!(a, b);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_missing_block() {
        let store = MemoryBlockStore::new();
        let id = ContentId::for_bytes(b"absent");
        assert_eq!(
            store.load(&RequestContext::background(), &id),
            Err(FetchError::NotFound(id))
        );
    }

    #[test]
    fn test_undecodable_block() {
        let store = MemoryBlockStore::new();
        let id = store.put_raw(b"not json".to_vec());
        let result = store.load(&RequestContext::background(), &id);
        assert!(matches!(result, Err(FetchError::Decode { .. })));
    }

    #[test]
    fn test_sessions_share_store() {
        let api = MockApi::new(MemoryBlockStore::new());
        let cx = RequestContext::background();
        let first = api.new_session(&cx);
        let second = api.new_session(&cx);

        let id = api.store().put(&Node::Bool(true)).unwrap();
        assert_eq!(first.load(&cx, &id).unwrap(), Node::Bool(true));
        assert_eq!(second.load(&cx, &id).unwrap(), Node::Bool(true));
        assert_eq!(first.request_id(), cx.request_id());
    }

    #[test]
    fn test_no_names_means_no_resolver() {
        let api = MockApi::new(MemoryBlockStore::new());
        assert!(api.name_resolver().is_none());
    }

    #[test]
    fn test_name_mapping_keeps_tail() {
        let api = MockApi::new(MemoryBlockStore::new())
            .with_name("/ipns/example.com", "/ipfs/abc");
        let cx = RequestContext::background();

        assert_eq!(api.resolve(&cx, "/ipns/example.com").unwrap(), "/ipfs/abc");
        assert_eq!(
            api.resolve(&cx, "/ipns/example.com/a/b").unwrap(),
            "/ipfs/abc/a/b"
        );
        assert_eq!(
            api.resolve(&cx, "/ipns/other.org/a").unwrap(),
            "/ipns/other.org/a"
        );
    }

    #[test]
    fn test_name_failure() {
        let err = NameError::CannotResolve("can't resolve ipns entry".to_string());
        let api = MockApi::new(MemoryBlockStore::new())
            .with_name_failure("/ipns/broken.example", err.clone());
        let cx = RequestContext::background();

        assert!(api.name_resolver().is_some());
        assert_eq!(api.resolve(&cx, "/ipns/broken.example"), Err(err));
    }
}
