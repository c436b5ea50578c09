//! Core type aliases, wire-layout constants and byte helpers.
//!
//! All multi-byte integers on the wire are little-endian.

use alloc::string::String;

/// Length in bytes of every digest carried on the wire.
pub const DIGEST_LEN: usize = 32;

/// 32-byte double-SHA-256 digest, in wire (internal) byte order.
pub type Digest = [u8; DIGEST_LEN];

/// A zero-valued digest. On the wire it marks a coinbase input.
pub const ZERO_DIGEST: Digest = [0u8; DIGEST_LEN];

/// Transaction version that carries no shielded section.
pub const TRANSPARENT_TX_VERSION: u32 = 1;

/// Width of the fixed part of a block header, before the solution.
///
/// version(4) + parent(32) + merkle_root(32) + reserved(32) + time(4) + bits(4) + nonce(32)
pub const HEADER_FIXED_LEN: usize = 4 + 32 + 32 + 32 + 4 + 4 + 32;

/// Width of a join-split public key.
pub const JOIN_SPLIT_PUBKEY_LEN: usize = 32;

/// Width of a join-split signature.
pub const JOIN_SPLIT_SIG_LEN: usize = 64;

/// Width of a bare transaction tree node (two child digests).
pub const TX_TREE_LEN: usize = 2 * DIGEST_LEN;

/// Lowercase hex of a digest in wire order.
pub fn digest_to_hex(digest: &Digest) -> String {
    hex::encode(digest)
}

/// Lowercase hex of a digest with its bytes reversed.
///
/// This is the form block explorers publish for block and transaction hashes.
pub fn digest_to_reversed_hex(digest: &Digest) -> String {
    let mut reversed = *digest;
    reversed.reverse();
    hex::encode(reversed)
}

/// Parse a 64-character hex string (wire order) into a digest.
pub fn digest_from_hex(s: &str) -> Option<Digest> {
    let mut digest = ZERO_DIGEST;
    hex::decode_to_slice(s, &mut digest).ok()?;
    Some(digest)
}

/// Returns true if every byte of the slice is zero.
pub fn is_blank(bytes: &[u8]) -> bool {
    bytes.iter().all(|b| *b == 0)
}
