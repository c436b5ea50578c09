//! Interior nodes of a block's transaction Merkle tree.
//!
//! A node's raw bytes are the 64-byte concatenation of its children's
//! digests; its id is the double-SHA-256 of those bytes, tagged
//! [`Codec::TransactionSet`]. The children's own tags play no part in the id.

use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

use serde::ser::{Serialize, SerializeSeq, Serializer};

use crate::cid::{Codec, ContentId, Link};
use crate::crypto::double_sha256;
use crate::error::{CodecError, CodecResult, ResolveError};
use crate::node::{split_first, Node, Resolution, Resolve, Resolved};
use crate::types::{Digest, DIGEST_LEN, TX_TREE_LEN};

/// Digest of the node whose children have digests `left` and `right`.
pub fn tree_node_digest(left: &Digest, right: &Digest) -> Digest {
    let mut buf = [0u8; TX_TREE_LEN];
    buf[..DIGEST_LEN].copy_from_slice(left);
    buf[DIGEST_LEN..].copy_from_slice(right);
    double_sha256(&buf)
}

/// Id of the node with children `left` and `right`.
pub fn tree_node_id(left: &ContentId, right: &ContentId) -> ContentId {
    ContentId::new(
        Codec::TransactionSet,
        tree_node_digest(left.digest(), right.digest()),
    )
}

/// One interior node: links to a left and a right child.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxTree {
    left: ContentId,
    right: ContentId,
    cid: ContentId,
}

impl TxTree {
    /// Build a node over two children and compute its id.
    pub fn new(left: ContentId, right: ContentId) -> Self {
        let cid = tree_node_id(&left, &right);
        Self { left, right, cid }
    }

    /// Rebuild a node from its 64 raw bytes. The bytes carry no type tags,
    /// so the caller says what the children are.
    pub fn from_raw(data: &[u8], child_codec: Codec) -> CodecResult<Self> {
        if data.len() != TX_TREE_LEN {
            return Err(CodecError::UnsupportedShape(alloc::format!(
                "tx tree node must be {} bytes, got {}",
                TX_TREE_LEN,
                data.len()
            )));
        }
        let mut left = [0u8; DIGEST_LEN];
        let mut right = [0u8; DIGEST_LEN];
        left.copy_from_slice(&data[..DIGEST_LEN]);
        right.copy_from_slice(&data[DIGEST_LEN..]);
        Ok(Self::new(
            ContentId::new(child_codec, left),
            ContentId::new(child_codec, right),
        ))
    }

    /// Left child id.
    pub fn left(&self) -> ContentId {
        self.left
    }

    /// Right child id. Equal to the left one where a level was padded.
    pub fn right(&self) -> ContentId {
        self.right
    }
}

impl Resolve for TxTree {
    fn resolve<'a, 'p>(&'a self, path: &'p [&'p str]) -> Resolution<'a, 'p> {
        let (field, rest) = split_first(path)?;
        match field {
            "0" => Ok((Resolved::Link(Link::new(self.left)), rest)),
            "1" => Ok((Resolved::Link(Link::new(self.right)), rest)),
            other => Err(ResolveError::InvalidPathSegment(other.into())),
        }
    }
}

impl Node for TxTree {
    fn content_id(&self) -> ContentId {
        self.cid
    }

    fn raw_data(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(TX_TREE_LEN);
        out.extend_from_slice(self.left.digest());
        out.extend_from_slice(self.right.digest());
        out
    }

    fn links(&self) -> Vec<Link> {
        vec![Link::new(self.left), Link::new(self.right)]
    }

    fn tree(&self) -> Vec<String> {
        vec!["0".into(), "1".into()]
    }
}

impl Serialize for TxTree {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(2))?;
        seq.serialize_element(&Link::new(self.left))?;
        seq.serialize_element(&Link::new(self.right))?;
        seq.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tx_id(seed: u8) -> ContentId {
        ContentId::new(Codec::Transaction, [seed; 32])
    }

    #[test]
    fn test_id_depends_only_on_child_digests() {
        let a = TxTree::new(tx_id(1), tx_id(2));
        let b = TxTree::new(
            ContentId::new(Codec::TransactionSet, [1; 32]),
            ContentId::new(Codec::TransactionSet, [2; 32]),
        );
        assert_eq!(a.content_id(), b.content_id());
        assert_eq!(a.content_id().codec(), Codec::TransactionSet);
        assert_ne!(a.content_id(), TxTree::new(tx_id(2), tx_id(1)).content_id());
    }

    #[test]
    fn test_raw_data_is_digest_concatenation() {
        let node = TxTree::new(tx_id(1), tx_id(2));
        let raw = node.raw_data();
        assert_eq!(raw.len(), 64);
        assert_eq!(&raw[..32], &[1u8; 32]);
        assert_eq!(&raw[32..], &[2u8; 32]);
        assert_eq!(node.content_id(), ContentId::for_bytes(Codec::TransactionSet, &raw));
    }

    #[test]
    fn test_from_raw() {
        let node = TxTree::new(tx_id(3), tx_id(4));
        let rebuilt = TxTree::from_raw(&node.raw_data(), Codec::Transaction).unwrap();
        assert_eq!(rebuilt, node);

        assert!(matches!(
            TxTree::from_raw(&[0u8; 63], Codec::Transaction),
            Err(CodecError::UnsupportedShape(_))
        ));
    }

    #[test]
    fn test_resolve() {
        let node = TxTree::new(tx_id(1), tx_id(2));
        let path = ["1", "version"];
        let (link, rest) = node.resolve_link(&path).unwrap();
        assert_eq!(link.cid, tx_id(2));
        assert_eq!(rest, &["version"]);

        let path = ["2"];
        assert_eq!(
            node.resolve(&path),
            Err(ResolveError::InvalidPathSegment("2".into()))
        );
        assert_eq!(node.tree(), vec!["0", "1"]);
        assert_eq!(node.links().len(), 2);
    }

    #[test]
    fn test_json_is_link_pair() {
        let node = TxTree::new(tx_id(1), tx_id(2));
        let json = serde_json::to_value(&node).unwrap();
        let arr = json.as_array().unwrap();
        assert_eq!(arr.len(), 2);
        assert!(arr[0]["/"].as_str().unwrap().starts_with("zcash-tx:"));
    }
}
