//! Shared test helpers for integration tests.
//!
//! Provides the golden vector loader and builders for synthetic block
//! messages used across all integration test files.

#![allow(dead_code)]

use serde::Deserialize;
use zecdag_primitives::{
    encode_block_header, encode_transaction, merkle_root, varint::write_compact_size, BlockHeader,
    JSDescription, Node, ShieldedData, Tx, TxIn, TxOut,
};

/// Synthetic block messages with independently computed hashes.
const BLOCK_VECTORS: &str = include_str!("../vectors/blocks.json");

/// JSON representation of a golden block vector.
#[derive(Debug, Deserialize)]
pub struct BlockVector {
    pub name: String,
    /// Full block message as hex.
    pub message: String,
    /// Length of the header prefix in bytes.
    pub header_len: usize,
    /// Block hash, reversed hex.
    pub block_hash: String,
    /// Transaction hashes in block order, reversed hex.
    pub tx_hashes: Vec<String>,
    pub tree_node_count: usize,
    /// Root referenced by the header, reversed hex.
    pub merkle_root: String,
    /// Interior tree nodes bottom-up, reversed hex.
    pub tree_hashes: Vec<String>,
}

impl BlockVector {
    pub fn bytes(&self) -> Vec<u8> {
        hex::decode(&self.message).unwrap_or_else(|e| panic!("{}: bad hex: {}", self.name, e))
    }
}

pub fn block_vectors() -> Vec<BlockVector> {
    serde_json::from_str(BLOCK_VECTORS).expect("blocks.json must parse")
}

pub fn block_vector(name: &str) -> BlockVector {
    block_vectors()
        .into_iter()
        .find(|v| v.name == name)
        .unwrap_or_else(|| panic!("no vector named {}", name))
}

// ── Synthetic Builders ──

pub fn coinbase(tag: u8, value: u64) -> Tx {
    Tx::new(
        1,
        vec![TxIn {
            prev_tx: None,
            prev_index: u32::MAX,
            script: vec![0x03, tag, 0, 0],
            sequence: u32::MAX,
        }],
        vec![TxOut {
            value,
            script: vec![0x51, tag],
        }],
        0,
        None,
    )
    .unwrap()
}

pub fn spend(prev: &Tx, index: u32, value: u64) -> Tx {
    Tx::new(
        1,
        vec![TxIn {
            prev_tx: Some(prev.content_id()),
            prev_index: index,
            script: vec![0x48; 72],
            sequence: 0xFFFF_FFFE,
        }],
        vec![TxOut {
            value,
            script: vec![0x76, 0xa9],
        }],
        0,
        None,
    )
    .unwrap()
}

pub fn join_split(seed: u8) -> JSDescription {
    JSDescription {
        old_value: seed as u64,
        new_value: 0,
        anchor: [seed; 32],
        nullifiers: [[seed.wrapping_add(1); 32], [seed.wrapping_add(2); 32]],
        commitments: [[seed.wrapping_add(3); 32], [seed.wrapping_add(4); 32]],
        ephemeral_key: [seed.wrapping_add(5); 32],
        random_seed: [seed.wrapping_add(6); 32],
        macs: [[seed.wrapping_add(7); 32], [seed.wrapping_add(8); 32]],
        proof: [seed.wrapping_add(9); 296],
        ciphertexts: [[seed.wrapping_add(10); 601], [seed.wrapping_add(11); 601]],
    }
}

pub fn shielded_tx(version: u32, join_splits: Vec<JSDescription>) -> Tx {
    Tx::new(
        version,
        vec![],
        vec![],
        0,
        Some(ShieldedData {
            join_splits,
            join_split_pub_key: [0xAB; 32],
            join_split_sig: [0xCD; 64],
        }),
    )
    .unwrap()
}

/// Header committing to `txs`.
pub fn header_for(txs: &[Tx]) -> BlockHeader {
    let digests: Vec<[u8; 32]> = txs.iter().map(|tx| *tx.content_id().digest()).collect();
    BlockHeader {
        version: 4,
        parent: [0xAA; 32],
        merkle_root: merkle_root(&digests).unwrap_or([0; 32]),
        reserved: [0; 32],
        timestamp: 1_477_671_596,
        difficulty: 0x1f07_ffff,
        nonce: [0x5A; 32],
        solution: vec![0x77; 1344],
    }
}

/// Encode `[header][count][tx...]`.
pub fn block_message(header: &BlockHeader, txs: &[Tx]) -> Vec<u8> {
    let mut out = encode_block_header(header);
    write_compact_size(&mut out, txs.len() as u64);
    for tx in txs {
        out.extend_from_slice(&encode_transaction(tx));
    }
    out
}
