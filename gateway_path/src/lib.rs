//! # Gateway Path
//!
//! This crate provides the path model used by the gateway.
//!
//! ## Philosophy
//!
//! - **Parse once, keep the text**: A path always retains the string it was built from,
//!   so error messages can quote it even when it is invalid
//! - **Namespaces are closed**: The leading segment is classified once, at construction
//! - **Resolution is a state, not a subtype**: A path is either unresolved or resolved,
//!   never something in between
//!
//! ## Grammar
//!
//! - `/<namespace>/<segment>[/<segment>...]`
//! - `<namespace>` is `ipfs`, `ipld` or `ipns`; other tokens parse but cannot be resolved
//! - For `ipfs` and `ipld`, the segment after the namespace must be a content id
//! - A bare content id is shorthand for `/ipfs/<content id>`

pub mod namespace;
pub mod path;
pub mod resolved;

pub use namespace::Namespace;
pub use path::{Path, PathError};
pub use resolved::{GatewayPath, ResolvedPath};
