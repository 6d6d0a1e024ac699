//! Cache key derivation
//!
//! Keys are content-addressed: a SHA256 digest of the canonical JSON
//! serialization of the filtered dependency set, under a fixed namespace
//! and format version. Same dependencies = same key.

use sha2::{Digest, Sha256};
use std::collections::BTreeMap;

/// Namespace shared by all entries this tool writes
pub const CACHE_NAMESPACE: &str = "prettier-action-cache";

/// Key format version; bump when the entry layout changes
pub const CACHE_VERSION: &str = "v1";

/// Prefix used to find the most recent prior entry when no exact key matches
pub fn fallback_prefix() -> String {
    format!("{CACHE_NAMESPACE}-{CACHE_VERSION}-")
}

/// Canonical serialization of a dependency set.
///
/// `BTreeMap` iterates in key order, so the output is a pure function of
/// content, independent of the order the manifest declared its entries.
fn canonical_json(deps: &BTreeMap<String, String>) -> String {
    // serde_json cannot fail on a string-to-string map
    serde_json::to_string(deps).unwrap_or_default()
}

/// SHA256 hex digest of an input string
pub fn digest(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    hex::encode(hasher.finalize())
}

/// Derive the cache key for a filtered dependency set
pub fn compute_cache_key(deps: &BTreeMap<String, String>) -> String {
    format!(
        "{}-{}-{}",
        CACHE_NAMESPACE,
        CACHE_VERSION,
        digest(&canonical_json(deps))
    )
}
