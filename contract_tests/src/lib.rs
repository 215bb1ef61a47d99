//! # Gateway Contract Tests
//!
//! This crate provides "golden" tests for the observable gateway contract to
//! ensure it doesn't drift accidentally over time.
//!
//! ## Philosophy
//!
//! - **Explicit over implicit**: Grammar, formats and messages are written down as code
//! - **Testability first**: Contract tests fail when observable behavior changes
//! - **Mechanism not policy**: Define what must be stable, not how to use it
//!
//! ## Structure
//!
//! - `path_grammar`: which strings are paths and how they normalize
//! - `block_format`: block encoding, content id text form, config documents
//! - `resolution`: terminal/root/remainder for fixed fixtures and error texts

pub mod block_format;
pub mod path_grammar;
pub mod resolution;

/// Common test helpers for contract validation
pub mod test_helpers {
    use cas_types::{ContentId, Node};
    use gateway_session::mock::{MemoryBlockStore, MockApi};

    /// Deterministic fixture graph shared by the contract modules
    ///
    /// ```text
    /// root --docs--> docs --readme--> readme
    ///      \-meta: {"version": 3}
    /// ```
    pub struct Fixture {
        pub api: MockApi,
        pub root: ContentId,
        pub docs: ContentId,
        pub readme: ContentId,
    }

    /// Builds the fixture graph in a fresh store
    pub fn fixture() -> Fixture {
        let store = MemoryBlockStore::new();
        let readme = store
            .put(&Node::from("hello"))
            .expect("Failed to store readme");
        let docs = store
            .put(&Node::map([("readme", Node::Link(readme))]))
            .expect("Failed to store docs");
        let root = store
            .put(&Node::map([
                ("docs", Node::Link(docs)),
                ("meta", Node::map([("version", Node::Integer(3))])),
            ]))
            .expect("Failed to store root");
        Fixture {
            api: MockApi::new(store),
            root,
            docs,
            readme,
        }
    }

    /// Verifies a string is the canonical text form of a content id
    pub fn verify_content_id_text(text: &str) {
        assert_eq!(
            text.len(),
            64,
            "Content id text length changed: expected 64, got {}",
            text.len()
        );
        assert!(
            text.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()),
            "Content id text is no longer lowercase hex: {}",
            text
        );
    }
}
