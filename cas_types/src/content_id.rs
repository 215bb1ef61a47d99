//! Content identifiers

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Length of a digest in bytes
const DIGEST_LEN: usize = 32;

/// Errors that can occur while parsing a content identifier
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ContentIdError {
    /// Text form has the wrong number of characters
    #[error("invalid content id length: expected {expected} characters, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    /// Text form is not hexadecimal
    #[error("invalid content id encoding: {0}")]
    InvalidEncoding(String),
}

/// Identifier for an immutable block
///
/// A content identifier is the SHA-256 digest of a block's encoded bytes.
/// Two blocks with the same bytes always share an identifier, so an
/// identifier can be handed around freely without any registry.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContentId([u8; DIGEST_LEN]);

impl ContentId {
    /// Computes the identifier of the given block bytes
    pub fn for_bytes(bytes: &[u8]) -> Self {
        let digest = Sha256::digest(bytes);
        let mut raw = [0u8; DIGEST_LEN];
        raw.copy_from_slice(&digest);
        Self(raw)
    }

    /// Parses the text form of an identifier
    ///
    /// # Examples
    ///
    /// ```
    /// use cas_types::ContentId;
    ///
    /// let id = ContentId::for_bytes(b"hello");
    /// let parsed = ContentId::parse(&id.to_string()).unwrap();
    /// assert_eq!(parsed, id);
    ///
    /// assert!(ContentId::parse("not-a-cid").is_err());
    /// ```
    pub fn parse(text: &str) -> Result<Self, ContentIdError> {
        if text.len() != DIGEST_LEN * 2 {
            return Err(ContentIdError::InvalidLength {
                expected: DIGEST_LEN * 2,
                actual: text.len(),
            });
        }

        let mut raw = [0u8; DIGEST_LEN];
        hex::decode_to_slice(text, &mut raw)
            .map_err(|err| ContentIdError::InvalidEncoding(err.to_string()))?;
        Ok(Self(raw))
    }

    /// Returns an abbreviated form for log lines
    pub fn short(&self) -> String {
        hex::encode(&self.0[..4])
    }
}

impl fmt::Display for ContentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl fmt::Debug for ContentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContentId({})", self)
    }
}

impl FromStr for ContentId {
    type Err = ContentIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for ContentId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ContentId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::parse(&text).map_err(serde::de::Error::custom)
    }
}
