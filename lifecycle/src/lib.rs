//! # Lifecycle
//!
//! Cancellation and timeout primitives for request-scoped work.
//!
//! ## Philosophy
//!
//! - **Checked, not interrupted**: Work polls its context between steps
//! - **Mechanism not policy**: Provides primitives, callers decide policies
//! - **No async runtime required**: Works in sync contexts and across threads
//!
//! ## Core Concepts
//!
//! - `CancellationSource` / `CancellationToken`: one writer, many readers of a stop flag
//! - `CancellationReason`: recorded with the flag
//! - `Deadline` / `Timeout`: absolute and relative time limits
//! - `RequestContext`: Token, deadline and request id carried through one request

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};
use thiserror::Error;
use uuid::Uuid;

/// Why a request was stopped
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CancellationReason {
    /// Client went away or asked to stop
    ClientDisconnect,
    /// Operation timed out
    Timeout,
    /// Server is shutting down
    Shutdown,
    /// Anything else, described by the caller
    Custom(String),
}

impl fmt::Display for CancellationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CancellationReason::ClientDisconnect => write!(f, "client disconnected"),
            CancellationReason::Timeout => write!(f, "timeout"),
            CancellationReason::Shutdown => write!(f, "shutdown"),
            CancellationReason::Custom(msg) => write!(f, "{}", msg),
        }
    }
}

/// Stop flag shared by a source and its tokens
///
/// The first reason recorded wins.
#[derive(Debug, Clone, Default)]
struct SharedCancellationState {
    state: Arc<RwLock<Option<CancellationReason>>>,
}

impl SharedCancellationState {
    fn reason(&self) -> Option<CancellationReason> {
        match self.state.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn cancel(&self, reason: CancellationReason) {
        let mut guard = match self.state.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if guard.is_none() {
            *guard = Some(reason);
        }
    }
}

/// Read side of a stop flag
///
/// ```
/// use lifecycle::{CancellationReason, CancellationSource};
///
/// let source = CancellationSource::new();
/// let token = source.token();
/// source.cancel(CancellationReason::ClientDisconnect);
/// assert_eq!(token.reason(), Some(CancellationReason::ClientDisconnect));
/// ```
#[derive(Debug, Clone)]
pub struct CancellationToken {
    shared: SharedCancellationState,
}

impl CancellationToken {
    /// Returns a token no source can cancel
    pub fn none() -> Self {
        Self {
            shared: SharedCancellationState::default(),
        }
    }

    /// Returns true once the source has cancelled
    pub fn is_cancelled(&self) -> bool {
        self.shared.reason().is_some()
    }

    /// Returns the recorded reason
    pub fn reason(&self) -> Option<CancellationReason> {
        self.shared.reason()
    }

    /// Returns an error if cancelled
    pub fn throw_if_cancelled(&self) -> Result<(), LifecycleError> {
        match self.reason() {
            Some(reason) => Err(LifecycleError::Cancelled { reason }),
            None => Ok(()),
        }
    }
}

/// Write side of a stop flag
///
/// Clones share the flag, so any clone may cancel every token handed out.
#[derive(Debug, Clone, Default)]
pub struct CancellationSource {
    shared: SharedCancellationState,
}

impl CancellationSource {
    /// Creates an uncancelled source
    pub fn new() -> Self {
        Self::default()
    }

    /// Hands out a token observing this source
    pub fn token(&self) -> CancellationToken {
        CancellationToken {
            shared: self.shared.clone(),
        }
    }

    /// Records `reason` unless a reason was already recorded
    pub fn cancel(&self, reason: CancellationReason) {
        self.shared.cancel(reason);
    }

    /// Returns true once cancelled
    pub fn is_cancelled(&self) -> bool {
        self.shared.reason().is_some()
    }
}

/// Absolute time limit
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Deadline {
    instant: Instant,
}

impl Deadline {
    /// Creates a deadline at `instant`
    pub fn at(instant: Instant) -> Self {
        Self { instant }
    }

    /// Returns the limit
    pub fn instant(&self) -> Instant {
        self.instant
    }

    /// Returns true if `now` is at or past the limit
    pub fn has_passed(&self, now: Instant) -> bool {
        now >= self.instant
    }

    /// Returns the time left, or `None` once passed
    pub fn time_remaining(&self, now: Instant) -> Option<Duration> {
        if now < self.instant {
            Some(self.instant.duration_since(now))
        } else {
            None
        }
    }
}

/// Relative time limit, turned into a [`Deadline`] when work starts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeout {
    duration: Duration,
}

impl Timeout {
    /// Creates a timeout of `duration`
    pub fn after(duration: Duration) -> Self {
        Self { duration }
    }

    /// Creates a timeout in milliseconds
    pub fn from_millis(millis: u64) -> Self {
        Self::after(Duration::from_millis(millis))
    }

    /// Creates a timeout in seconds
    pub fn from_secs(secs: u64) -> Self {
        Self::after(Duration::from_secs(secs))
    }

    /// Returns the length
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Anchors this timeout at `now`
    pub fn to_deadline(&self, now: Instant) -> Deadline {
        Deadline::at(now + self.duration)
    }
}

/// Unique identifier for a request, used to correlate log lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestId(Uuid);

impl RequestId {
    /// Creates a new random request ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Request({})", self.0)
    }
}

/// Everything that governs one request's lifetime
///
/// A context is cheap to clone. Work done on behalf of the request checks
/// the context before blocking and stops as soon as it reports an error.
#[derive(Debug, Clone)]
pub struct RequestContext {
    request_id: RequestId,
    token: CancellationToken,
    deadline: Option<Deadline>,
}

impl RequestContext {
    /// Creates a context that is never cancelled and has no deadline
    pub fn background() -> Self {
        Self::with_token(CancellationToken::none())
    }

    /// Creates a context governed by the given token
    pub fn with_token(token: CancellationToken) -> Self {
        Self {
            request_id: RequestId::new(),
            token,
            deadline: None,
        }
    }

    /// Returns a copy of this context bounded by the given deadline
    ///
    /// An earlier existing deadline is kept.
    pub fn with_deadline(mut self, deadline: Deadline) -> Self {
        self.deadline = Some(match self.deadline {
            Some(existing) if existing < deadline => existing,
            _ => deadline,
        });
        self
    }

    /// Returns a copy of this context that times out after `timeout`
    pub fn with_timeout(self, timeout: Timeout) -> Self {
        self.with_deadline(timeout.to_deadline(Instant::now()))
    }

    /// Returns the request ID
    pub fn request_id(&self) -> RequestId {
        self.request_id
    }

    /// Returns the cancellation token
    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    /// Returns the deadline, if any
    pub fn deadline(&self) -> Option<Deadline> {
        self.deadline
    }

    /// Returns an error if the request was cancelled or ran out of time
    pub fn check(&self) -> Result<(), LifecycleError> {
        self.check_at(Instant::now())
    }

    /// Like [`RequestContext::check`], evaluated at an explicit instant
    pub fn check_at(&self, now: Instant) -> Result<(), LifecycleError> {
        self.token.throw_if_cancelled()?;
        match self.deadline {
            Some(deadline) if deadline.has_passed(now) => Err(LifecycleError::Timeout),
            _ => Ok(()),
        }
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::background()
    }
}

/// Why a context refused further work
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LifecycleError {
    #[error("Request cancelled: {reason}")]
    Cancelled { reason: CancellationReason },

    #[error("Request deadline exceeded")]
    Timeout,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_cancellation_token_none() {
        let token = CancellationToken::none();
        assert!(!token.is_cancelled());
        assert_eq!(token.reason(), None);
    }

    #[test]
    fn test_cancellation_source_basic() {
        let source = CancellationSource::new();
        let token = source.token();

        assert!(!token.is_cancelled());
        assert!(!source.is_cancelled());

        source.cancel(CancellationReason::ClientDisconnect);

        assert!(token.is_cancelled());
        assert!(source.is_cancelled());
        assert_eq!(token.reason(), Some(CancellationReason::ClientDisconnect));
    }

    #[test]
    fn test_first_reason_wins() {
        let source = CancellationSource::new();
        source.cancel(CancellationReason::Shutdown);
        source.cancel(CancellationReason::Timeout);
        assert_eq!(source.token().reason(), Some(CancellationReason::Shutdown));
    }

    #[test]
    fn test_cancel_visible_across_threads() {
        let source = CancellationSource::new();
        let token = source.token();

        let handle = thread::spawn(move || {
            source.cancel(CancellationReason::Shutdown);
        });
        handle.join().unwrap();

        assert!(token.is_cancelled());
    }

    #[test]
    fn test_cancellation_reason_display() {
        assert_eq!(
            CancellationReason::ClientDisconnect.to_string(),
            "client disconnected"
        );
        assert_eq!(CancellationReason::Timeout.to_string(), "timeout");
        assert_eq!(CancellationReason::Shutdown.to_string(), "shutdown");
        assert_eq!(
            CancellationReason::Custom("test".to_string()).to_string(),
            "test"
        );
    }

    #[test]
    fn test_throw_if_cancelled() {
        let source = CancellationSource::new();
        let token = source.token();

        assert!(token.throw_if_cancelled().is_ok());

        source.cancel(CancellationReason::ClientDisconnect);
        match token.throw_if_cancelled() {
            Err(LifecycleError::Cancelled { reason }) => {
                assert_eq!(reason, CancellationReason::ClientDisconnect);
            }
            _ => panic!("Expected Cancelled error"),
        }
    }

    #[test]
    fn test_deadline_time_remaining() {
        let now = Instant::now();
        let deadline = Deadline::at(now + Duration::from_millis(10));

        assert_eq!(deadline.time_remaining(now), Some(Duration::from_millis(10)));
        assert!(!deadline.has_passed(now));

        let later = now + Duration::from_millis(10);
        assert!(deadline.has_passed(later));
        assert_eq!(deadline.time_remaining(later), None);
    }

    #[test]
    fn test_timeout_to_deadline() {
        let now = Instant::now();
        let timeout = Timeout::from_millis(100);
        let deadline = timeout.to_deadline(now);

        assert_eq!(deadline.instant(), now + Duration::from_millis(100));
        assert_eq!(Timeout::from_secs(5).duration(), Duration::from_secs(5));
    }

    #[test]
    fn test_background_context_never_fails() {
        let cx = RequestContext::background();
        assert!(cx.check().is_ok());
        assert!(cx.deadline().is_none());
    }

    #[test]
    fn test_context_reports_cancellation() {
        let source = CancellationSource::new();
        let cx = RequestContext::with_token(source.token());
        source.cancel(CancellationReason::ClientDisconnect);

        assert_eq!(
            cx.check(),
            Err(LifecycleError::Cancelled {
                reason: CancellationReason::ClientDisconnect
            })
        );
    }

    #[test]
    fn test_context_reports_timeout() {
        let now = Instant::now();
        let cx = RequestContext::background().with_deadline(Deadline::at(now));
        assert_eq!(cx.check_at(now), Err(LifecycleError::Timeout));
    }

    #[test]
    fn test_context_keeps_earlier_deadline() {
        let now = Instant::now();
        let early = Deadline::at(now + Duration::from_millis(5));
        let late = Deadline::at(now + Duration::from_secs(5));

        let cx = RequestContext::background()
            .with_deadline(early)
            .with_deadline(late);
        assert_eq!(cx.deadline(), Some(early));
    }

    #[test]
    fn test_context_with_timeout() {
        let before = Instant::now();
        let cx = RequestContext::background().with_timeout(Timeout::from_secs(30));
        let deadline = cx.deadline().unwrap();

        assert!(deadline.instant() >= before + Duration::from_secs(30));
        assert!(cx.check().is_ok());
        assert_eq!(
            cx.check_at(deadline.instant()),
            Err(LifecycleError::Timeout)
        );
    }

    #[test]
    fn test_request_ids_are_unique() {
        let a = RequestContext::background();
        let b = RequestContext::background();
        assert_ne!(a.request_id(), b.request_id());
        assert!(a.request_id().to_string().starts_with("Request("));
    }
}
