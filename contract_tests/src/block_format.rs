//! Block and configuration format contract tests
//!
//! Blocks written by one build must decode in every later build, and their
//! ids must not move. These tests pin the encoding byte-for-byte.

// ===== Format Constants =====
#[allow(dead_code)]
const LINK_KEY: &str = "/";
#[allow(dead_code)]
const BYTES_KEY: &str = "bytes";
#[allow(dead_code)]
const CONFIG_VERSION: u32 = 1;

// ===== Contract Tests =====
