//! Decoder configuration.

use serde::Deserialize;

/// What to do when the computed Merkle root differs from the one the header
/// references.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MerkleRootCheck {
    /// Do not compare.
    #[default]
    Skip,
    /// Compare and log a warning on mismatch.
    Warn,
    /// Compare and fail the decode on mismatch.
    Enforce,
}

/// Configuration for [`crate::BlockMessageDecoder`].
///
/// Hosts may load it from JSON or TOML; missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DecoderConfig {
    /// Largest transaction count a block message may declare.
    /// Checked before any transaction is parsed.
    pub max_transactions: u64,

    pub merkle_root_check: MerkleRootCheck,

    /// Fail when bytes remain after the last transaction.
    pub reject_trailing_bytes: bool,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            max_transactions: 100_000,
            merkle_root_check: MerkleRootCheck::Skip,
            reject_trailing_bytes: false,
        }
    }
}
