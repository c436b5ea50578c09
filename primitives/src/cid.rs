//! Type-tagged content ids and links.
//!
//! A [`ContentId`] is `{hash function, payload type, digest}`. The payload
//! type is part of the identity: two ids with the same digest but different
//! [`Codec`] tags are different ids. Turning an id into the host's binary or
//! string identifier format is left to the host; [`fmt::Display`] gives a
//! readable `codec:hash:hex` form only.

use alloc::string::String;
use core::fmt;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::crypto::double_sha256;
use crate::types::{digest_to_hex, digest_to_reversed_hex, Digest};

/// Payload type carried by a content id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Codec {
    /// A block header.
    Block,
    /// A full transaction.
    Transaction,
    /// An interior node of a block's transaction Merkle tree.
    TransactionSet,
}

impl Codec {
    /// Stable short name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Block => "zcash-block",
            Self::Transaction => "zcash-tx",
            Self::TransactionSet => "zcash-tx-tree",
        }
    }
}

impl fmt::Display for Codec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Hash function carried by a content id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HashFunction {
    /// SHA-256 applied twice.
    DoubleSha256,
}

impl HashFunction {
    /// Multihash code of the function.
    pub fn code(self) -> u64 {
        match self {
            Self::DoubleSha256 => 0x56,
        }
    }

    /// Stable short name.
    pub fn name(self) -> &'static str {
        match self {
            Self::DoubleSha256 => "dbl-sha2-256",
        }
    }
}

/// Self-describing id of an immutable payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContentId {
    codec: Codec,
    hash: HashFunction,
    digest: Digest,
}

impl ContentId {
    /// Wrap an already computed double-SHA-256 digest.
    pub fn new(codec: Codec, digest: Digest) -> Self {
        Self {
            codec,
            hash: HashFunction::DoubleSha256,
            digest,
        }
    }

    /// Hash `data` and tag the result with `codec`.
    pub fn for_bytes(codec: Codec, data: &[u8]) -> Self {
        Self::new(codec, double_sha256(data))
    }

    pub fn codec(&self) -> Codec {
        self.codec
    }

    pub fn hash_function(&self) -> HashFunction {
        self.hash
    }

    /// Raw digest in wire order.
    pub fn digest(&self) -> &Digest {
        &self.digest
    }

    /// Digest rendered the way explorers publish it (byte-reversed hex).
    pub fn reversed_hex(&self) -> String {
        digest_to_reversed_hex(&self.digest)
    }
}

impl fmt::Display for ContentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.codec, self.hash.name(), digest_to_hex(&self.digest))
    }
}

impl Serialize for ContentId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// An outbound edge from one node to another.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Link {
    /// Path under which the link is exposed, if it has one.
    pub name: Option<String>,
    /// Target of the link.
    pub cid: ContentId,
}

impl Link {
    pub fn new(cid: ContentId) -> Self {
        Self { name: None, cid }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// Serialized as `{"/": "<id>"}`.
impl Serialize for Link {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry("/", &self.cid)?;
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::format;

    #[test]
    fn test_codec_is_part_of_identity() {
        let digest = [7u8; 32];
        let tx = ContentId::new(Codec::Transaction, digest);
        let tree = ContentId::new(Codec::TransactionSet, digest);
        assert_ne!(tx, tree);
        assert_eq!(tx.digest(), tree.digest());
    }

    #[test]
    fn test_for_bytes_is_pure() {
        let a = ContentId::for_bytes(Codec::Block, b"header");
        let b = ContentId::for_bytes(Codec::Block, b"header");
        assert_eq!(a, b);
        assert_eq!(a.hash_function(), HashFunction::DoubleSha256);
        assert_eq!(a.hash_function().code(), 0x56);
    }

    #[test]
    fn test_display() {
        let cid = ContentId::new(Codec::Transaction, [0u8; 32]);
        let s = format!("{}", cid);
        assert!(s.starts_with("zcash-tx:dbl-sha2-256:"));
        assert!(s.ends_with(&"0".repeat(64)));
    }

    #[test]
    fn test_link_json() {
        let cid = ContentId::new(Codec::Block, [1u8; 32]);
        let json = serde_json::to_value(Link::new(cid).with_name("parent")).unwrap();
        assert_eq!(json["/"], serde_json::Value::String(format!("{}", cid)));
    }
}
