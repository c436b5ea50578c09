//! Engine error types.

use zecdag_primitives::{CodecError, ContentId, ResolveError};

/// Top-level error type for the engine crate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// Wire-level decode failure.
    #[error("codec error: {0}")]
    Codec(#[from] CodecError),

    /// Block message declares more transactions than the configuration allows.
    #[error("block declares {declared} transactions, limit is {limit}")]
    TransactionCountExceeded { declared: u64, limit: u64 },

    /// Computed Merkle root differs from the header's reference.
    #[error("merkle root mismatch: header {expected}, computed {computed}")]
    MerkleRootMismatch { expected: String, computed: String },

    /// Bytes left after the last transaction.
    #[error("{0} trailing bytes after last transaction")]
    TrailingBytes(usize),

    /// A link led to a node that is not in the index.
    #[error("node not found: {0}")]
    MissingNode(ContentId),

    /// Path resolution failure.
    #[error("resolve error: {0}")]
    Resolve(#[from] ResolveError),
}

/// Convenience alias.
pub type DecodeResult<T> = Result<T, DecodeError>;
