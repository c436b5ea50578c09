//! `zecdag-primitives`: wire codecs and content-addressed node types for
//! Zcash-style chain data.
//!
//! This crate provides the digest and content-id types, the error taxonomy,
//! the CompactSize varint, the header, transaction and join-split codecs,
//! the transaction Merkle tree and the uniform node/path-resolution contract
//! shared by the decoding engine and any host that stores the nodes.
//!
//! Supports `#![no_std]` (use `default-features = false`).

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod types;
pub mod error;
pub mod crypto;
pub mod cid;
pub mod varint;
pub mod codec;
pub mod block;
pub mod joinsplit;
pub mod transaction;
pub mod tx_tree;
pub mod merkle;
pub mod node;

mod serde_helpers;

// Re-export commonly used types at the crate root for convenience.
pub use types::{Digest, DIGEST_LEN, HEADER_FIXED_LEN, TRANSPARENT_TX_VERSION, TX_TREE_LEN, ZERO_DIGEST};
pub use error::{CodecError, CodecResult, ResolveError};
pub use cid::{Codec, ContentId, HashFunction, Link};
pub use codec::Reader;
pub use block::{decode_block_header, encode_block_header, read_block_header, Block, BlockHeader};
pub use joinsplit::{JSDescription, JOIN_SPLIT_LEN};
pub use transaction::{
    decode_transaction, encode_transaction, read_transaction, ShieldedData, Tx, TxIn, TxOut,
};
pub use tx_tree::{tree_node_digest, tree_node_id, TxTree};
pub use merkle::{merkle_root, MerkleTreeBuilder};
pub use node::{resolve_within, split_path, DagNode, Node, NodeKind, Resolution, Resolve, Resolved, Value};
