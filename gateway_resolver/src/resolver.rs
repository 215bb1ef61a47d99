//! Path resolution
//!
//! The walk loads the root block and then consumes segments against it. A
//! segment that lands on a link loads the linked block and the walk continues
//! there; a segment that lands on ordinary data descends into it without a
//! load. The walk ends when segments run out or a segment names nothing.
//!
//! Whatever segments were consumed after the last loaded block form the
//! remainder, so `terminal + remainder` always addresses the same value as
//! the input path.

use crate::config::{MissingSegmentPolicy, ResolverConfig};
use crate::name_system::NameSystem;
use crate::ResolveError;
use cas_types::{ContentId, Node};
use gateway_path::{GatewayPath, Namespace, Path, ResolvedPath};
use gateway_session::{FetchMode, GatewayApi, SessionFetcher};
use lifecycle::RequestContext;

/// Outcome of walking segments inside one block
#[derive(Debug, PartialEq, Eq)]
enum Step {
    /// Every segment was consumed
    End,
    /// Segment at this index names nothing
    Missing(usize),
    /// Segment before this index is a link to the given block
    Follow(ContentId, usize),
}

/// Resolves gateway paths against a collaborator
#[derive(Debug, Clone, Default)]
pub struct Resolver {
    config: ResolverConfig,
}

impl Resolver {
    /// Creates a resolver with the given configuration
    pub fn new(config: ResolverConfig) -> Self {
        Self { config }
    }

    /// Returns the active configuration
    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Resolves any gateway path
    ///
    /// Already-resolved input is returned unchanged without opening a
    /// session. Mutable paths are looked up through the collaborator's
    /// naming backend first; the result must land in `ipfs` or `ipld`.
    pub fn resolve_path<A: GatewayApi>(
        &self,
        api: &A,
        cx: &RequestContext,
        path: impl Into<GatewayPath>,
    ) -> Result<ResolvedPath, ResolveError> {
        let path = match path.into() {
            GatewayPath::Resolved(resolved) => return Ok(resolved),
            GatewayPath::Unresolved(path) => path,
        };
        path.is_valid()?;

        let path = if path.is_mutable() {
            let names = NameSystem::new(api.name_resolver());
            let target = Path::parse(&names.resolve(cx, path.as_str())?);
            target.is_valid()?;
            target
        } else {
            path
        };

        let (mode, _) = immutable_root(&path)?;
        let session = api.new_session(cx);
        let fetcher = api.fetcher_for_session(&session, mode);
        self.resolve_immutable(cx, &fetcher, &path)
    }

    /// Walks an `/ipfs` or `/ipld` path through the given fetcher
    pub fn resolve_immutable(
        &self,
        cx: &RequestContext,
        fetcher: &SessionFetcher<'_>,
        path: &Path,
    ) -> Result<ResolvedPath, ResolveError> {
        path.is_valid()?;
        let (_, root) = immutable_root(path)?;

        let segments = path.segments();

        let mut terminal = root;
        let mut node = fetcher.load(cx, &root)?;
        let mut block_start = 2;
        let mut depth = 0;

        let walk_end = loop {
            match step(fetcher, &node, &segments, block_start) {
                Step::Follow(next, resume) => {
                    depth += 1;
                    if depth > self.config.max_depth {
                        return Err(ResolveError::DepthExceeded {
                            path: path.to_string(),
                            limit: self.config.max_depth,
                        });
                    }
                    log::debug!(
                        "{}: {} following {} -> {}",
                        cx.request_id(),
                        path,
                        segments[block_start..resume].join("/"),
                        next.short()
                    );
                    node = fetcher.load(cx, &next)?;
                    terminal = next;
                    block_start = resume;
                }
                other => break other,
            }
        };

        if let Step::Missing(index) = walk_end {
            if self.config.missing_segment == MissingSegmentPolicy::NotFound {
                return Err(ResolveError::SegmentNotFound {
                    segment: segments[index].to_string(),
                    path: path.to_string(),
                });
            }
        }

        let remainder = segments[block_start..].join("/");
        log::debug!(
            "{}: resolved {} to {} (remainder {:?})",
            cx.request_id(),
            path,
            terminal.short(),
            remainder
        );
        Ok(ResolvedPath::new(path.clone(), terminal, root, remainder))
    }
}

/// Resolves a gateway path with the default configuration
pub fn resolve_path<A: GatewayApi>(
    api: &A,
    cx: &RequestContext,
    path: impl Into<GatewayPath>,
) -> Result<ResolvedPath, ResolveError> {
    Resolver::default().resolve_path(api, cx, path)
}

/// Chooses the node interpretation and root block of a validated path
fn immutable_root(path: &Path) -> Result<(FetchMode, ContentId), ResolveError> {
    match (path.namespace(), path.root_id()) {
        (Some(Namespace::Ipfs), Some(root)) => Ok((FetchMode::UnixFs, root)),
        (Some(Namespace::Ipld), Some(root)) => Ok((FetchMode::Raw, root)),
        _ => Err(ResolveError::UnsupportedNamespace(
            path.namespace_str().to_string(),
        )),
    }
}

fn step(fetcher: &SessionFetcher<'_>, block: &Node, segments: &[&str], start: usize) -> Step {
    let mut current = block;
    for (index, segment) in segments.iter().enumerate().skip(start) {
        match fetcher.lookup(current, segment) {
            Some(Node::Link(id)) => return Step::Follow(*id, index + 1),
            Some(child) => current = child,
            None => return Step::Missing(index),
        }
    }
    Step::End
}
