//! Collaborator traits
//!
//! These are the seams the resolver depends on. Implementations must be safe
//! to share between threads; the resolver performs no locking of its own.

use crate::{FetchError, FetchMode, NameError, SessionFetcher};
use cas_types::{ContentId, Node};
use lifecycle::RequestContext;

/// A loading context for one request
///
/// Any block that has been loadable at some point during the session must
/// remain loadable for the rest of the session.
pub trait LinkSystem: Send + Sync {
    /// Loads and decodes the block with the given id
    ///
    /// Implementations that block must observe `cx` and return promptly
    /// once it reports cancellation.
    fn load(&self, cx: &RequestContext, id: &ContentId) -> Result<Node, FetchError>;
}

/// A naming backend
pub trait NameResolver: Send + Sync {
    /// Resolves a mutable path to a new path string
    ///
    /// Returns `name` unchanged if the backend has nothing for it.
    fn resolve(&self, cx: &RequestContext, name: &str) -> Result<String, NameError>;
}

/// Everything the gateway needs from its backing node
pub trait GatewayApi: Send + Sync {
    /// Session type handed out per request
    type Session: LinkSystem;

    /// Opens a session for the lifetime of one request
    fn new_session(&self, cx: &RequestContext) -> Self::Session;

    /// Binds a session to a node interpretation
    fn fetcher_for_session<'s>(
        &self,
        session: &'s Self::Session,
        mode: FetchMode,
    ) -> SessionFetcher<'s> {
        SessionFetcher::new(session, mode)
    }

    /// Returns the naming backend, if one is configured
    fn name_resolver(&self) -> Option<&dyn NameResolver> {
        None
    }
}
