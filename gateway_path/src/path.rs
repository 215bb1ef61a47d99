//! Path parsing and validation
//!
//! Parsing never fails outright. A string the grammar rejects is kept verbatim
//! and reported by [`Path::is_valid`], so callers that only need the raw text
//! for an error message can still hold a `Path`.

use crate::Namespace;
use cas_types::{ContentId, ContentIdError};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use thiserror::Error;

/// Errors reported by path validation
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PathError {
    /// Path string is empty
    #[error("invalid path \"\": path is empty")]
    Empty,

    /// Path neither starts with '/' nor is a bare content id
    #[error("invalid path {path:?}: path does not begin with '/'")]
    MissingLeadingSlash { path: String },

    /// Path has a namespace but nothing after it
    #[error("invalid path {path:?}: not enough path components")]
    NotEnoughComponents { path: String },

    /// Root segment of an immutable path is not a content id
    #[error("invalid path {path:?}: invalid content id {token:?}: {source}")]
    InvalidContentId {
        path: String,
        token: String,
        #[source]
        source: ContentIdError,
    },
}

/// A slash-delimited path rooted at a namespace
///
/// Paths are immutable. Operations such as [`Path::join`] produce new paths.
///
/// # Examples
///
/// ```
/// use gateway_path::{Namespace, Path};
///
/// let path = Path::parse("/ipns//example.com/docs/");
/// assert_eq!(path.as_str(), "/ipns/example.com/docs");
/// assert_eq!(path.namespace(), Some(Namespace::Ipns));
/// assert!(path.is_mutable());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Path {
    text: String,
    namespace: Option<Namespace>,
    root: Option<ContentId>,
}

impl Path {
    /// Parses a raw path string
    ///
    /// Valid input is normalized to its canonical form. Invalid input is
    /// retained as given; [`Path::is_valid`] reports why it was rejected.
    pub fn parse(raw: &str) -> Self {
        match canonicalize(raw) {
            Ok(text) => Self::from_text(text),
            Err(_) => Self::from_text(raw.to_string()),
        }
    }

    /// Creates an `/ipfs/<id>` path
    pub fn ipfs(id: &ContentId) -> Self {
        Self::from_content_id(Namespace::Ipfs, id)
    }

    /// Creates an `/ipld/<id>` path
    pub fn ipld(id: &ContentId) -> Self {
        Self::from_content_id(Namespace::Ipld, id)
    }

    pub(crate) fn from_content_id(namespace: Namespace, id: &ContentId) -> Self {
        let token = namespace.token().unwrap_or("ipfs");
        Self::from_text(format!("/{}/{}", token, id))
    }

    fn from_text(text: String) -> Self {
        let namespace = canonicalize(&text)
            .ok()
            .map(|_| Namespace::from_token(first_segment(&text)));
        let root = namespace
            .filter(Namespace::is_immutable_root)
            .and_then(|_| split_segments(&text).get(1).copied())
            .and_then(|token| ContentId::parse(token).ok());
        Self {
            text,
            namespace,
            root,
        }
    }

    /// Appends segments to this path
    ///
    /// The result is not re-validated; joining with an empty or
    /// slash-bearing segment yields whatever the grammar makes of it.
    ///
    /// # Examples
    ///
    /// ```
    /// use gateway_path::Path;
    ///
    /// let base = Path::parse("/ipns/example.com");
    /// let joined = base.join(&["a", "b"]);
    /// assert_eq!(joined.as_str(), "/ipns/example.com/a/b");
    /// ```
    pub fn join<S: AsRef<str>>(&self, segments: &[S]) -> Path {
        let mut text = self.text.clone();
        for segment in segments {
            text.push('/');
            text.push_str(segment.as_ref());
        }
        Self::from_text(text)
    }

    /// Returns the path text
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Checks this path against the grammar
    pub fn is_valid(&self) -> Result<(), PathError> {
        canonicalize(&self.text).map(|_| ())
    }

    /// Returns the namespace, or `None` if the path is invalid
    ///
    /// # Panics
    ///
    /// Panics if a path that passed validation has no segments. Validation
    /// guarantees at least two, so this indicates a broken invariant.
    pub fn namespace(&self) -> Option<Namespace> {
        let namespace = self.namespace?;
        if self.segments().is_empty() {
            panic!("path without namespace");
        }
        Some(namespace)
    }

    /// Returns the namespace token as written, or `""` if the path is invalid
    pub fn namespace_str(&self) -> &str {
        match self.namespace() {
            Some(_) => first_segment(&self.text),
            None => "",
        }
    }

    /// Returns the root content id of a valid `ipfs` or `ipld` path
    pub fn root_id(&self) -> Option<ContentId> {
        self.root
    }

    /// Returns true if the content behind this path may change
    pub fn is_mutable(&self) -> bool {
        self.namespace().is_some_and(|ns| ns.is_mutable())
    }

    /// Returns the non-empty segments of this path, namespace first
    pub fn segments(&self) -> Vec<&str> {
        split_segments(&self.text)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

impl From<&str> for Path {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

impl Serialize for Path {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.text)
    }
}

impl<'de> Deserialize<'de> for Path {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse(&raw))
    }
}

fn split_segments(text: &str) -> Vec<&str> {
    text.split('/').filter(|s| !s.is_empty()).collect()
}

fn first_segment(text: &str) -> &str {
    text.split('/').find(|s| !s.is_empty()).unwrap_or("")
}

/// Runs the grammar and returns the canonical text
fn canonicalize(raw: &str) -> Result<String, PathError> {
    if raw.is_empty() {
        return Err(PathError::Empty);
    }

    let expanded;
    let text = if raw.starts_with('/') {
        raw
    } else {
        let head = raw.split('/').next().unwrap_or(raw);
        if ContentId::parse(head).is_err() {
            return Err(PathError::MissingLeadingSlash {
                path: raw.to_string(),
            });
        }
        expanded = format!("/ipfs/{}", raw);
        &expanded
    };

    let segments = split_segments(text);
    if segments.len() < 2 {
        return Err(PathError::NotEnoughComponents {
            path: raw.to_string(),
        });
    }

    if Namespace::from_token(segments[0]).is_immutable_root() {
        if let Err(source) = ContentId::parse(segments[1]) {
            return Err(PathError::InvalidContentId {
                path: raw.to_string(),
                token: segments[1].to_string(),
                source,
            });
        }
    }

    Ok(format!("/{}", segments.join("/")))
}
