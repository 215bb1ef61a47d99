//! # Gateway Resolver
//!
//! This crate turns a gateway path into a content id plus an unresolved
//! remainder by walking linked blocks one segment at a time.
//!
//! ## Philosophy
//!
//! - **Resolve as far as links go**: The walk stops at the last block it can reach;
//!   whatever is left is handed back as an in-block remainder
//! - **Borrow, never own**: Sessions and caches belong to the collaborator; a
//!   resolution borrows one session for one call
//! - **No hidden retries**: Every failure is reported once, typed, to the caller
//!
//! ## Operations
//!
//! - `resolve_path(api, cx, path)`: Resolve any gateway path with default settings
//! - `Resolver::resolve_path(api, cx, path)`: Same, with explicit configuration
//! - `Resolver::resolve_immutable(cx, fetcher, path)`: Walk an `/ipfs` or `/ipld` path
//! - `NameSystem::resolve(cx, name)`: Look up a mutable name

pub mod config;
pub mod error;
pub mod name_system;
pub mod resolver;

pub use config::{ConfigError, MissingSegmentPolicy, ResolverConfig};
pub use error::{FailureClass, ResolveError};
pub use name_system::{NameSystem, OFFLINE_PHRASE};
pub use resolver::{resolve_path, Resolver};

pub use gateway_path::{GatewayPath, Namespace, Path, PathError, ResolvedPath};
