//! Path grammar contract tests
//!
//! These tests define which strings are accepted as paths and the canonical
//! form they normalize to.

// ===== Namespace Tokens =====
#[allow(dead_code)]
const NAMESPACE_IPFS: &str = "ipfs";
#[allow(dead_code)]
const NAMESPACE_IPLD: &str = "ipld";
#[allow(dead_code)]
const NAMESPACE_IPNS: &str = "ipns";

// ===== Contract Tests =====
