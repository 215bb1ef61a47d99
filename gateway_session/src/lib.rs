//! # Gateway Session
//!
//! This crate defines the contract between the path resolver and whatever
//! actually stores blocks.
//!
//! ## Philosophy
//!
//! - **The collaborator owns storage**: Caches and stores live behind [`LinkSystem`];
//!   the resolver only borrows a session for the duration of one call
//! - **Sessions are monotonic**: A block that was loadable once during a session
//!   stays loadable until the session ends
//! - **Interpretation is chosen up front**: A [`SessionFetcher`] is bound to one
//!   [`FetchMode`] before any segment is walked
//!
//! ## Operations
//!
//! - `new_session(cx)`: Open a loading context for one request
//! - `fetcher_for_session(session, mode)`: Bind a reification strategy to it
//! - `load(cx, id)`: Load a block as a [`cas_types::Node`]
//! - `resolve(cx, name)`: Look up a mutable name

pub mod api;
pub mod error;
pub mod fetcher;
pub mod mock;
pub mod reify;

pub use api::{GatewayApi, LinkSystem, NameResolver};
pub use error::{FetchError, NameError};
pub use fetcher::{FetchMode, SessionFetcher};
pub use reify::UnixFsDirectory;
