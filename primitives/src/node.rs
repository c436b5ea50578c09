//! The uniform node contract: content id, canonical bytes, outbound links and
//! segment-at-a-time path resolution.
//!
//! Resolution consumes one or more leading segments and hands back what it
//! found together with the unconsumed remainder, so a caller can continue in
//! a sub-node or, for a [`Resolved::Link`], in another node altogether.

use alloc::string::String;
use alloc::vec::Vec;

use serde::Serialize;

use crate::block::Block;
use crate::cid::{ContentId, Link};
use crate::error::ResolveError;
use crate::joinsplit::JSDescription;
use crate::transaction::{Tx, TxIn, TxOut};
use crate::tx_tree::TxTree;

/// A scalar field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Value<'a> {
    U32(u32),
    U64(u64),
    Bytes(&'a [u8]),
}

/// What a path segment resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolved<'a> {
    Value(Value<'a>),
    Link(Link),
    Input(&'a TxIn),
    Output(&'a TxOut),
    JoinSplit(&'a JSDescription),
    Inputs(&'a [TxIn]),
    Outputs(&'a [TxOut]),
    JoinSplits(&'a [JSDescription]),
}

impl<'a> Resolved<'a> {
    /// The embedded record this resolves to, if resolution can continue in it.
    pub fn as_sub_node(&self) -> Option<&'a dyn Resolve> {
        match *self {
            Self::Input(input) => Some(input),
            Self::Output(output) => Some(output),
            Self::JoinSplit(js) => Some(js),
            _ => None,
        }
    }
}

/// Result of one resolution step: the value plus the unconsumed path.
pub type Resolution<'a, 'p> = Result<(Resolved<'a>, &'p [&'p str]), ResolveError>;

/// Anything that can resolve a path: nodes and the records embedded in them.
pub trait Resolve {
    /// Resolve the leading segment(s) of `path`.
    fn resolve<'a, 'p>(&'a self, path: &'p [&'p str]) -> Resolution<'a, 'p>;
}

/// An addressable node of the chain DAG.
pub trait Node: Resolve {
    /// Type-tagged id of [`Node::raw_data`].
    fn content_id(&self) -> ContentId;

    /// Canonical wire bytes of the node.
    fn raw_data(&self) -> Vec<u8>;

    /// Outbound links in a stable order.
    fn links(&self) -> Vec<Link>;

    /// All top-level resolvable names, for listing.
    fn tree(&self) -> Vec<String>;

    /// Resolve `path` and require the result to be a link.
    fn resolve_link<'p>(&self, path: &'p [&'p str]) -> Result<(Link, &'p [&'p str]), ResolveError> {
        match self.resolve(path)? {
            (Resolved::Link(link), rest) => Ok((link, rest)),
            _ => Err(ResolveError::NotALink),
        }
    }

    /// Encoded size in bytes.
    fn size(&self) -> usize {
        self.raw_data().len()
    }
}

/// Keep resolving inside embedded records until the path runs out or a
/// link/scalar/list is reached. Never crosses a link.
pub fn resolve_within<'a, 'p>(root: &'a dyn Resolve, path: &'p [&'p str]) -> Resolution<'a, 'p> {
    let (mut resolved, mut rest) = root.resolve(path)?;
    while !rest.is_empty() {
        match resolved.as_sub_node() {
            Some(sub) => {
                let (next, next_rest) = sub.resolve(rest)?;
                resolved = next;
                rest = next_rest;
            }
            None => break,
        }
    }
    Ok((resolved, rest))
}

/// Split a `/`-separated path, dropping empty segments.
pub fn split_path(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

pub(crate) fn split_first<'p>(path: &'p [&'p str]) -> Result<(&'p str, &'p [&'p str]), ResolveError> {
    match path.split_first() {
        Some((first, rest)) => Ok((first, rest)),
        None => Err(ResolveError::EmptyPath),
    }
}

pub(crate) fn parse_index(segment: &str, len: usize) -> Result<usize, ResolveError> {
    let index: usize = segment
        .parse()
        .map_err(|_| ResolveError::InvalidPathSegment(segment.into()))?;
    if index >= len {
        return Err(ResolveError::IndexOutOfRange { index, len });
    }
    Ok(index)
}

/// Kind of node a buffer holds, when the host knows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Block,
    Transaction,
    TxTree,
}

/// Any decoded node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum DagNode {
    Block(Block),
    Tx(Tx),
    TxTree(TxTree),
}

impl DagNode {
    pub fn kind(&self) -> NodeKind {
        match self {
            Self::Block(_) => NodeKind::Block,
            Self::Tx(_) => NodeKind::Transaction,
            Self::TxTree(_) => NodeKind::TxTree,
        }
    }

    pub fn as_block(&self) -> Option<&Block> {
        match self {
            Self::Block(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_tx(&self) -> Option<&Tx> {
        match self {
            Self::Tx(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_tx_tree(&self) -> Option<&TxTree> {
        match self {
            Self::TxTree(t) => Some(t),
            _ => None,
        }
    }

    fn inner(&self) -> &dyn Node {
        match self {
            Self::Block(b) => b,
            Self::Tx(t) => t,
            Self::TxTree(t) => t,
        }
    }
}

impl From<Block> for DagNode {
    fn from(b: Block) -> Self {
        Self::Block(b)
    }
}

impl From<Tx> for DagNode {
    fn from(t: Tx) -> Self {
        Self::Tx(t)
    }
}

impl From<TxTree> for DagNode {
    fn from(t: TxTree) -> Self {
        Self::TxTree(t)
    }
}

impl Resolve for DagNode {
    fn resolve<'a, 'p>(&'a self, path: &'p [&'p str]) -> Resolution<'a, 'p> {
        self.inner().resolve(path)
    }
}

impl Node for DagNode {
    fn content_id(&self) -> ContentId {
        self.inner().content_id()
    }

    fn raw_data(&self) -> Vec<u8> {
        self.inner().raw_data()
    }

    fn links(&self) -> Vec<Link> {
        self.inner().links()
    }

    fn tree(&self) -> Vec<String> {
        self.inner().tree()
    }
}
