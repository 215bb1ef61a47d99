//! Mutable name lookup
//!
//! [`NameSystem`] wraps whatever naming backend the collaborator offers. With
//! no backend configured every name resolves to itself. With one configured,
//! each call performs exactly one lookup; a backend that reports it cannot
//! resolve names right now is reported as [`ResolveError::Offline`].

use crate::ResolveError;
use gateway_session::{NameError, NameResolver};
use lifecycle::RequestContext;

/// Message fragment backends use when they cannot resolve names at all
pub const OFFLINE_PHRASE: &str = "can't resolve ipns entry";

/// Facade over an optional naming backend
#[derive(Clone, Copy, Default)]
pub struct NameSystem<'a> {
    backend: Option<&'a dyn NameResolver>,
}

impl<'a> NameSystem<'a> {
    /// Creates a facade over the given backend
    pub fn new(backend: Option<&'a dyn NameResolver>) -> Self {
        Self { backend }
    }

    /// Creates a facade that resolves every name to itself
    pub fn passthrough() -> Self {
        Self { backend: None }
    }

    /// Returns true if a backend is configured
    pub fn is_configured(&self) -> bool {
        self.backend.is_some()
    }

    /// Resolves a name to a path string
    pub fn resolve(&self, cx: &RequestContext, name: &str) -> Result<String, ResolveError> {
        let Some(backend) = self.backend else {
            return Ok(name.to_string());
        };

        cx.check().map_err(|err| ResolveError::Fetch(err.into()))?;

        match backend.resolve(cx, name) {
            Ok(target) => {
                log::debug!("{}: name {} -> {}", cx.request_id(), name, target);
                Ok(target)
            }
            Err(err) if is_offline(&err) => {
                log::warn!(
                    "{}: naming backend offline while resolving {}: {}",
                    cx.request_id(),
                    name,
                    err
                );
                Err(ResolveError::Offline)
            }
            Err(err) => Err(ResolveError::Name(err)),
        }
    }
}

impl std::fmt::Debug for NameSystem<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NameSystem")
            .field("configured", &self.is_configured())
            .finish()
    }
}

fn is_offline(err: &NameError) -> bool {
    match err {
        NameError::CannotResolve(_) => true,
        NameError::Backend(msg) => msg.contains(OFFLINE_PHRASE),
    }
}
