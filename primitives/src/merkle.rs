//! Transaction Merkle tree for block commitments.
//!
//! Leaves are transaction ids in block order. Each level pairs items
//! `(2i, 2i + 1)`; a level with an odd number of items first duplicates its
//! last item. Levels repeat until one node remains, which is the root the
//! block header references.
//!
//! A block with a single transaction has no interior nodes: the
//! transaction's own digest is the root.

use alloc::vec::Vec;

use crate::cid::ContentId;
use crate::error::{CodecError, CodecResult};
use crate::node::Node;
use crate::tx_tree::{tree_node_digest, TxTree};
use crate::types::Digest;

/// Collects leaf ids and builds every interior node of the tree.
#[derive(Debug, Clone, Default)]
pub struct MerkleTreeBuilder {
    leaves: Vec<ContentId>,
}

impl MerkleTreeBuilder {
    /// Create a builder with no leaves.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder over transaction ids in block order.
    pub fn from_leaves(leaves: Vec<ContentId>) -> Self {
        Self { leaves }
    }

    /// Append the next transaction id.
    pub fn push(&mut self, leaf: ContentId) {
        self.leaves.push(leaf);
    }

    /// Number of leaves.
    pub fn len(&self) -> usize {
        self.leaves.len()
    }

    /// Returns true if no leaves were added.
    pub fn is_empty(&self) -> bool {
        self.leaves.is_empty()
    }

    /// Build all interior nodes, bottom level first and left to right
    /// within a level. The last node is the root.
    ///
    /// One leaf yields no nodes. No leaves is an error.
    pub fn build(&self) -> CodecResult<Vec<TxTree>> {
        if self.leaves.is_empty() {
            return Err(CodecError::EmptyTransactionSet);
        }

        let mut out = Vec::with_capacity(self.leaves.len());
        let mut level: Vec<ContentId> = self.leaves.clone();

        while level.len() > 1 {
            if level.len() % 2 != 0 {
                if let Some(last) = level.last().copied() {
                    level.push(last);
                }
            }

            let next: Vec<ContentId> = level
                .chunks_exact(2)
                .map(|pair| {
                    let node = TxTree::new(pair[0], pair[1]);
                    let id = node.content_id();
                    out.push(node);
                    id
                })
                .collect();

            level = next;
        }

        Ok(out)
    }
}

/// Root digest over leaf digests, without materializing nodes.
pub fn merkle_root(leaves: &[Digest]) -> CodecResult<Digest> {
    let mut level: Vec<Digest> = leaves.to_vec();

    while level.len() > 1 {
        if level.len() % 2 != 0 {
            let last = level[level.len() - 1];
            level.push(last);
        }
        level = level
            .chunks_exact(2)
            .map(|pair| tree_node_digest(&pair[0], &pair[1]))
            .collect();
    }

    level.first().copied().ok_or(CodecError::EmptyTransactionSet)
}
