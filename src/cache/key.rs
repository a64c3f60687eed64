//! Cache key generation using SHA-256 hashes

use sha2::{Digest, Sha256};

/// Generate a deterministic cache key from an endpoint and its query string.
///
/// The query string is hashed as given: identical strings share an entry,
/// and since `QuerySpec` always serializes in the same key order, equal
/// queries produce equal strings.
pub fn cache_key(endpoint: &str, query_string: &str) -> String {
    let mut hasher = Sha256::new();

    hasher.update(endpoint.trim_matches('/').as_bytes());
    hasher.update(b"|");
    hasher.update(query_string.as_bytes());

    format!("{:x}", hasher.finalize())
}
