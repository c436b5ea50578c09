//! Hashing for content ids.
//!
//! Every node id on this chain is a double SHA-256 over the node's canonical
//! bytes. No signature or proof checking happens here.

use sha2::{Digest as _, Sha256};

use crate::types::Digest;

/// Compute SHA-256 of the input data.
pub fn hash_sha256(data: &[u8]) -> Digest {
    let result = Sha256::digest(data);
    let mut hash = [0u8; 32];
    hash.copy_from_slice(&result);
    hash
}

/// Compute SHA-256(SHA-256(data)).
pub fn double_sha256(data: &[u8]) -> Digest {
    hash_sha256(&hash_sha256(data))
}
