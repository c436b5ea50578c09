//! `zecdag-engine`: decodes block messages into content-addressed nodes.
//!
//! This crate turns a raw block message into the Block, transaction and
//! transaction-tree nodes defined in `zecdag-primitives`, and keeps decoded
//! nodes in an index that resolves paths across links.
//!
//! ## Architecture
//!
//! - [`decoder::BlockMessageDecoder`]: block message entry point
//! - [`decoder::decode_node`], [`decoder::decode_maybe_tx`]: standalone node decoding
//! - [`config::DecoderConfig`]: limits and Merkle root policy
//! - [`index::NodeIndex`]: id-keyed node store with cross-node resolution
//!
//! Logging goes through `tracing`; no subscriber is installed here.

pub mod config;
pub mod error;
pub mod decoder;
pub mod index;

// Re-export key types for convenience
pub use config::{DecoderConfig, MerkleRootCheck};
pub use decoder::{decode_maybe_tx, decode_node, decode_transaction, BlockMessageDecoder, DecodedBlock};
pub use error::{DecodeError, DecodeResult};
pub use index::NodeIndex;
