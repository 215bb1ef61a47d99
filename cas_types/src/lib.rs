//! # CAS Types
//!
//! This crate defines the fundamental types shared by the gateway path core.
//!
//! ## Philosophy
//!
//! - **Content names itself**: A block is named by the digest of its bytes, never by location
//! - **Links are data**: A reference to another block is an ordinary value inside a node
//! - **Deterministic encoding**: The same node always encodes to the same bytes
//!
//! ## Key Types
//!
//! - [`ContentId`]: Digest-derived identifier for an immutable block
//! - [`Node`]: The structured data model walked during path resolution
//! - [`codec`]: Block encoding used by the in-memory collaborator

pub mod codec;
pub mod content_id;
pub mod node;

pub use codec::{decode, encode, CodecError};
pub use content_id::{ContentId, ContentIdError};
pub use node::{Node, NodeKind};
