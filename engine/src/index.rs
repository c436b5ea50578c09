//! In-memory index of decoded nodes keyed by content id.
//!
//! Paths that leave one node through a link continue in the linked node, so
//! `"<block>" / "tx/0/1/inputs/0/prevTx/version"` walks from a block through
//! its transaction tree into a transaction and on to the one it spends.

use std::collections::BTreeMap;

use tracing::trace;
use zecdag_primitives::{resolve_within, Codec, ContentId, DagNode, Node, ResolveError, Resolved};

use crate::error::{DecodeError, DecodeResult};

/// Decoded nodes keyed by their own ids.
#[derive(Debug, Clone, Default)]
pub struct NodeIndex {
    nodes: BTreeMap<ContentId, DagNode>,
}

impl NodeIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node under its own id. Re-inserting an id replaces an
    /// identical node.
    pub fn insert(&mut self, node: DagNode) -> ContentId {
        let id = node.content_id();
        self.nodes.insert(id, node);
        id
    }

    /// Node stored under exactly `id`.
    pub fn get(&self, id: &ContentId) -> Option<&DagNode> {
        self.nodes.get(id)
    }

    /// Returns true if a node is stored under exactly `id`.
    pub fn contains(&self, id: &ContentId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Number of stored nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nodes in id order.
    pub fn iter(&self) -> impl Iterator<Item = (&ContentId, &DagNode)> {
        self.nodes.iter()
    }

    /// Look up the target of a link.
    ///
    /// A single-transaction block's merkle root is the transaction itself, so
    /// a transaction-set link that misses falls back to the transaction with
    /// the same digest.
    fn follow(&self, id: &ContentId) -> DecodeResult<&DagNode> {
        if let Some(node) = self.nodes.get(id) {
            return Ok(node);
        }
        if id.codec() == Codec::TransactionSet {
            let as_tx = ContentId::new(Codec::Transaction, *id.digest());
            if let Some(node) = self.nodes.get(&as_tx) {
                return Ok(node);
            }
        }
        Err(DecodeError::MissingNode(*id))
    }

    /// Resolve `path` starting at node `id`, following links across nodes
    /// while segments remain.
    ///
    /// Ends on a scalar, a list, an embedded record, or a link with nothing
    /// left to resolve.
    pub fn resolve<'a, 'p>(
        &'a self,
        id: &ContentId,
        path: &'p [&'p str],
    ) -> DecodeResult<Resolved<'a>> {
        let mut node = self.follow(id)?;
        let mut path = path;

        loop {
            let (resolved, rest) = resolve_within(node, path)?;
            let Some(next) = rest.first() else {
                return Ok(resolved);
            };
            match resolved {
                Resolved::Link(link) => {
                    trace!(cid = %link.cid, remaining = rest.len(), "following link");
                    node = self.follow(&link.cid)?;
                    path = rest;
                }
                _ => return Err(ResolveError::InvalidPathSegment((*next).into()).into()),
            }
        }
    }
}

impl Extend<DagNode> for NodeIndex {
    fn extend<I: IntoIterator<Item = DagNode>>(&mut self, iter: I) {
        for node in iter {
            self.insert(node);
        }
    }
}

impl FromIterator<DagNode> for NodeIndex {
    fn from_iter<I: IntoIterator<Item = DagNode>>(iter: I) -> Self {
        let mut index = Self::new();
        index.extend(iter);
        index
    }
}
