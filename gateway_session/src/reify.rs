//! Node reification
//!
//! Reification decides what a path segment means inside a node. Raw
//! traversal treats segments as map keys and list indices. UnixFS traversal
//! recognizes directory-shaped maps and selects their entries by name.
//!
//! A directory has the shape:
//!
//! ```text
//! {
//!   "Data":  <anything, optional>,
//!   "Links": [ { "Name": "<entry name>", "Hash": {"/": "<id>"} }, ... ]
//! }
//! ```

use cas_types::{ContentId, Node};

const LINKS_KEY: &str = "Links";
const NAME_KEY: &str = "Name";
const HASH_KEY: &str = "Hash";

/// Looks up a segment by map key or list index
pub fn lookup_raw<'n>(node: &'n Node, segment: &str) -> Option<&'n Node> {
    match node {
        Node::Map(entries) => entries.get(segment),
        Node::List(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    }
}

/// Looks up a segment with directory semantics, falling back to raw lookup
pub fn lookup_unixfs<'n>(node: &'n Node, segment: &str) -> Option<&'n Node> {
    match UnixFsDirectory::reify(node) {
        Some(dir) => dir.entry(segment),
        None => lookup_raw(node, segment),
    }
}

/// A directory view over a directory-shaped node
#[derive(Debug, Clone, Copy)]
pub struct UnixFsDirectory<'n> {
    links: &'n [Node],
}

impl<'n> UnixFsDirectory<'n> {
    /// Interprets a node as a directory
    ///
    /// Returns `None` unless every entry under `Links` has a string `Name`
    /// and a link `Hash`.
    pub fn reify(node: &'n Node) -> Option<Self> {
        let links = node.as_map()?.get(LINKS_KEY)?.as_list()?;
        if links.iter().all(|link| Self::parse_entry(link).is_some()) {
            Some(Self { links })
        } else {
            None
        }
    }

    fn parse_entry(link: &'n Node) -> Option<(&'n str, &'n Node)> {
        let fields = link.as_map()?;
        let name = fields.get(NAME_KEY)?.as_str()?;
        let hash = fields.get(HASH_KEY)?;
        hash.as_link()?;
        Some((name, hash))
    }

    /// Returns the link node for the named entry
    pub fn entry(&self, name: &str) -> Option<&'n Node> {
        self.links
            .iter()
            .filter_map(Self::parse_entry)
            .find(|(entry_name, _)| *entry_name == name)
            .map(|(_, hash)| hash)
    }

    /// Lists entry names and targets in stored order
    pub fn entries(&self) -> Vec<(&'n str, ContentId)> {
        self.links
            .iter()
            .filter_map(Self::parse_entry)
            .filter_map(|(name, hash)| hash.as_link().map(|id| (name, *id)))
            .collect()
    }

    /// Counts the number of entries
    pub fn count(&self) -> usize {
        self.links.len()
    }
}

/// Builds a directory-shaped node from name/target pairs
///
/// Entries are stored in the order given.
pub fn directory<S: Into<String>>(entries: impl IntoIterator<Item = (S, ContentId)>) -> Node {
    let links = entries
        .into_iter()
        .map(|(name, id)| {
            Node::map([
                (NAME_KEY, Node::String(name.into())),
                (HASH_KEY, Node::Link(id)),
            ])
        })
        .collect();
    Node::map([
        ("Data", Node::Bytes(vec![0x08, 0x01])),
        (LINKS_KEY, Node::List(links)),
    ])
}
