//! Node data model
//!
//! A node is the decoded form of a block. Maps and lists nest inside a single
//! block; a [`Node::Link`] points at a different block by [`ContentId`].

use crate::ContentId;
use std::collections::BTreeMap;
use std::fmt;

/// A decoded block value
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Explicit null
    Null,
    /// Boolean scalar
    Bool(bool),
    /// Signed integer scalar
    Integer(i64),
    /// Floating point scalar
    Float(f64),
    /// UTF-8 string scalar
    String(String),
    /// Opaque bytes
    Bytes(Vec<u8>),
    /// Ordered list of nodes
    List(Vec<Node>),
    /// String-keyed map of nodes (keys kept sorted)
    Map(BTreeMap<String, Node>),
    /// Reference to another block
    Link(ContentId),
}

/// The shape of a node without its contents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Null,
    Bool,
    Integer,
    Float,
    String,
    Bytes,
    List,
    Map,
    Link,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeKind::Null => "null",
            NodeKind::Bool => "bool",
            NodeKind::Integer => "integer",
            NodeKind::Float => "float",
            NodeKind::String => "string",
            NodeKind::Bytes => "bytes",
            NodeKind::List => "list",
            NodeKind::Map => "map",
            NodeKind::Link => "link",
        };
        write!(f, "{}", name)
    }
}

impl Node {
    /// Returns the kind of this node
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Null => NodeKind::Null,
            Node::Bool(_) => NodeKind::Bool,
            Node::Integer(_) => NodeKind::Integer,
            Node::Float(_) => NodeKind::Float,
            Node::String(_) => NodeKind::String,
            Node::Bytes(_) => NodeKind::Bytes,
            Node::List(_) => NodeKind::List,
            Node::Map(_) => NodeKind::Map,
            Node::Link(_) => NodeKind::Link,
        }
    }

    /// Returns true if this node references another block
    pub fn is_link(&self) -> bool {
        matches!(self, Node::Link(_))
    }

    /// Returns the link target, if this node is a link
    pub fn as_link(&self) -> Option<&ContentId> {
        match self {
            Node::Link(id) => Some(id),
            _ => None,
        }
    }

    /// Returns the string value, if this node is a string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Node::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the entries, if this node is a map
    pub fn as_map(&self) -> Option<&BTreeMap<String, Node>> {
        match self {
            Node::Map(entries) => Some(entries),
            _ => None,
        }
    }

    /// Returns the items, if this node is a list
    pub fn as_list(&self) -> Option<&[Node]> {
        match self {
            Node::List(items) => Some(items),
            _ => None,
        }
    }

    /// Builds a map node from key/value pairs
    pub fn map<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Node)>,
    {
        Node::Map(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl From<&str> for Node {
    fn from(value: &str) -> Self {
        Node::String(value.to_string())
    }
}

impl From<i64> for Node {
    fn from(value: i64) -> Self {
        Node::Integer(value)
    }
}

impl From<ContentId> for Node {
    fn from(value: ContentId) -> Self {
        Node::Link(value)
    }
}
