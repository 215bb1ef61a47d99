//! Block codec
//!
//! Blocks are encoded as JSON. Two reserved single-key objects carry the
//! values JSON cannot express directly:
//!
//! - a link is `{"/": "<content id>"}`
//! - bytes are `{"/": {"bytes": "<hex>"}}`
//!
//! Map keys are written in sorted order, so encoding is deterministic and the
//! identifier of a node never depends on how it was built.

use crate::{ContentId, Node};
use serde_json::{Map, Number, Value};
use thiserror::Error;

/// Reserved key marking links and bytes
const RESERVED_KEY: &str = "/";

/// Errors that can occur while encoding or decoding a block
#[derive(Debug, Error)]
pub enum CodecError {
    /// Block bytes are not valid JSON
    #[error("Malformed block: {0}")]
    Malformed(#[from] serde_json::Error),

    /// A link object does not carry a valid identifier
    #[error("Invalid link: {0}")]
    InvalidLink(String),

    /// A bytes object does not carry valid hex
    #[error("Invalid bytes: {0}")]
    InvalidBytes(String),

    /// A number cannot be represented in the data model
    #[error("Unsupported number: {0}")]
    UnsupportedNumber(String),
}

/// Encodes a node into block bytes
pub fn encode(node: &Node) -> Result<Vec<u8>, CodecError> {
    let value = to_value(node)?;
    Ok(serde_json::to_vec(&value)?)
}

/// Decodes block bytes into a node
pub fn decode(bytes: &[u8]) -> Result<Node, CodecError> {
    let value: Value = serde_json::from_slice(bytes)?;
    from_value(value)
}

fn to_value(node: &Node) -> Result<Value, CodecError> {
    let value = match node {
        Node::Null => Value::Null,
        Node::Bool(b) => Value::Bool(*b),
        Node::Integer(i) => Value::Number(Number::from(*i)),
        Node::Float(f) => Value::Number(
            Number::from_f64(*f).ok_or_else(|| CodecError::UnsupportedNumber(f.to_string()))?,
        ),
        Node::String(s) => Value::String(s.clone()),
        Node::Bytes(bytes) => {
            let mut inner = Map::new();
            inner.insert("bytes".to_string(), Value::String(hex::encode(bytes)));
            reserved(Value::Object(inner))
        }
        Node::List(items) => Value::Array(items.iter().map(to_value).collect::<Result<_, _>>()?),
        Node::Map(entries) => {
            let mut map = Map::new();
            for (key, child) in entries {
                map.insert(key.clone(), to_value(child)?);
            }
            Value::Object(map)
        }
        Node::Link(id) => reserved(Value::String(id.to_string())),
    };
    Ok(value)
}

fn reserved(inner: Value) -> Value {
    let mut map = Map::new();
    map.insert(RESERVED_KEY.to_string(), inner);
    Value::Object(map)
}

fn from_value(value: Value) -> Result<Node, CodecError> {
    let node = match value {
        Value::Null => Node::Null,
        Value::Bool(b) => Node::Bool(b),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Node::Integer(i)
            } else if n.is_u64() {
                return Err(CodecError::UnsupportedNumber(n.to_string()));
            } else {
                let f = n
                    .as_f64()
                    .ok_or_else(|| CodecError::UnsupportedNumber(n.to_string()))?;
                Node::Float(f)
            }
        }
        Value::String(s) => Node::String(s),
        Value::Array(items) => {
            Node::List(items.into_iter().map(from_value).collect::<Result<_, _>>()?)
        }
        Value::Object(mut map) => {
            if map.len() == 1 {
                if let Some(inner) = map.remove(RESERVED_KEY) {
                    return from_reserved(inner);
                }
            }
            let mut entries = std::collections::BTreeMap::new();
            for (key, child) in map {
                entries.insert(key, from_value(child)?);
            }
            Node::Map(entries)
        }
    };
    Ok(node)
}

fn from_reserved(inner: Value) -> Result<Node, CodecError> {
    match inner {
        Value::String(text) => ContentId::parse(&text)
            .map(Node::Link)
            .map_err(|err| CodecError::InvalidLink(err.to_string())),
        Value::Object(map) => match map.get("bytes") {
            Some(Value::String(text)) if map.len() == 1 => hex::decode(text)
                .map(Node::Bytes)
                .map_err(|err| CodecError::InvalidBytes(err.to_string())),
            _ => Err(CodecError::InvalidBytes(
                "expected a single \"bytes\" entry".to_string(),
            )),
        },
        other => Err(CodecError::InvalidLink(format!(
            "expected a string, found {}",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_encoding() {
        let id = ContentId::for_bytes(b"child");
        let bytes = encode(&Node::Link(id)).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert_eq!(text, format!("{{\"/\":\"{}\"}}", id));
    }

    #[test]
    fn test_nested_structure_decodes() {
        let id = ContentId::for_bytes(b"child");
        let raw = format!(
            "{{\"name\":\"root\",\"items\":[1,2.5,null],\"child\":{{\"/\":\"{}\"}},\"blob\":{{\"/\":{{\"bytes\":\"0a0b\"}}}}}}",
            id
        );
        let node = decode(raw.as_bytes()).unwrap();
        let map = node.as_map().unwrap();

        assert_eq!(map["name"], Node::from("root"));
        assert_eq!(
            map["items"],
            Node::List(vec![Node::Integer(1), Node::Float(2.5), Node::Null])
        );
        assert_eq!(map["child"], Node::Link(id));
        assert_eq!(map["blob"], Node::Bytes(vec![0x0a, 0x0b]));
    }

    #[test]
    fn test_encoding_is_deterministic() {
        let a = Node::map([("x", Node::Integer(1)), ("y", Node::Integer(2))]);
        let b = Node::map([("y", Node::Integer(2)), ("x", Node::Integer(1))]);
        assert_eq!(encode(&a).unwrap(), encode(&b).unwrap());
    }

    #[test]
    fn test_reserved_key_with_siblings_is_a_map() {
        let node = decode(br#"{"/":"x","other":1}"#).unwrap();
        assert_eq!(node.as_map().unwrap().len(), 2);
    }

    #[test]
    fn test_invalid_link_rejected() {
        let result = decode(br#"{"/":"not-a-cid"}"#);
        assert!(matches!(result, Err(CodecError::InvalidLink(_))));
    }

    #[test]
    fn test_malformed_json_rejected() {
        assert!(matches!(decode(b"{"), Err(CodecError::Malformed(_))));
    }

    #[test]
    fn test_non_finite_float_rejected() {
        let result = encode(&Node::Float(f64::NAN));
        assert!(matches!(result, Err(CodecError::UnsupportedNumber(_))));
    }
}
