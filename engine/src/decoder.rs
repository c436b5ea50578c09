//! Block message decoder: the entry point from raw wire bytes to nodes.
//!
//! `BlockMessageDecoder::decode_block_message` runs one pass over a buffer:
//!
//! 1. Decode the header; its re-encoding becomes the Block node.
//! 2. Read the transaction count and check it against the configured limit.
//! 3. Decode each transaction in order. Each one is delimited by its own
//!    parse; there are no per-transaction length prefixes.
//! 4. Build the transaction Merkle tree over the transaction ids.
//! 5. Optionally compare the computed root with the header's reference.
//!
//! Decoding is all-or-nothing: any failure discards everything decoded so far.

use tracing::{debug, trace, warn};
use zecdag_primitives::{
    decode_block_header, read_block_header, read_transaction, Block, CodecError, Codec, DagNode,
    MerkleTreeBuilder, Node, NodeKind, Reader, Tx, TxTree, TX_TREE_LEN,
};

use crate::config::{DecoderConfig, MerkleRootCheck};
use crate::error::{DecodeError, DecodeResult};

/// Smallest possible transaction: version, two empty counts and lock time.
const MIN_TX_LEN: usize = 4 + 1 + 1 + 4;

/// The nodes of one block message, grouped by kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedBlock {
    pub block: Block,
    /// Transactions in block order.
    pub transactions: Vec<Tx>,
    /// Interior tree nodes, bottom-up. Empty for a one-transaction block.
    pub tree: Vec<TxTree>,
}

impl DecodedBlock {
    /// Digest of the tree root: the last tree node, or the only transaction.
    pub fn computed_root(&self) -> Option<zecdag_primitives::Digest> {
        match self.tree.last() {
            Some(root) => Some(*root.content_id().digest()),
            None => self.transactions.first().map(|tx| *tx.content_id().digest()),
        }
    }

    /// Flatten into emission order: block, transactions, tree nodes.
    pub fn into_nodes(self) -> Vec<DagNode> {
        let mut out = Vec::with_capacity(1 + self.transactions.len() + self.tree.len());
        out.push(DagNode::Block(self.block));
        out.extend(self.transactions.into_iter().map(DagNode::Tx));
        out.extend(self.tree.into_iter().map(DagNode::TxTree));
        out
    }
}

/// Decodes block messages and standalone nodes.
///
/// Holds only configuration; every call is independent.
#[derive(Debug, Clone, Default)]
pub struct BlockMessageDecoder {
    config: DecoderConfig,
}

impl BlockMessageDecoder {
    /// Create a decoder with the given configuration.
    pub fn new(config: DecoderConfig) -> Self {
        Self { config }
    }

    /// Active configuration.
    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Decode a full block message into its nodes, grouped by kind.
    pub fn decode_block(&self, data: &[u8]) -> DecodeResult<DecodedBlock> {
        let mut r = Reader::new(data);

        let header = read_block_header(&mut r)?;
        let block = Block::new(header);

        let declared = read_tx_count(&mut r)?;
        if declared > self.config.max_transactions {
            return Err(DecodeError::TransactionCountExceeded {
                declared,
                limit: self.config.max_transactions,
            });
        }
        if (declared as u128) * (MIN_TX_LEN as u128) > r.remaining() as u128 {
            return Err(CodecError::MalformedLength {
                declared,
                remaining: r.remaining(),
            }
            .into());
        }

        let mut transactions = Vec::with_capacity(declared as usize);
        for index in 0..declared {
            let start = r.position();
            let tx = read_transaction(&mut r)?;
            trace!(
                index,
                version = tx.version(),
                inputs = tx.inputs().len(),
                outputs = tx.outputs().len(),
                join_splits = tx.join_splits().len(),
                size = r.position() - start,
                "decoded transaction"
            );
            transactions.push(tx);
        }

        if !r.is_empty() && self.config.reject_trailing_bytes {
            return Err(DecodeError::TrailingBytes(r.remaining()));
        }

        let builder =
            MerkleTreeBuilder::from_leaves(transactions.iter().map(Node::content_id).collect());
        let tree = builder.build()?;

        let decoded = DecodedBlock {
            block,
            transactions,
            tree,
        };
        self.check_root(&decoded)?;

        debug!(
            block = %decoded.block.hex_hash(),
            transactions = decoded.transactions.len(),
            tree_nodes = decoded.tree.len(),
            trailing = r.remaining(),
            "decoded block message"
        );

        Ok(decoded)
    }

    /// Decode a block message into the flat emission order: the block,
    /// then transactions in order, then tree nodes bottom-up.
    pub fn decode_block_message(&self, data: &[u8]) -> DecodeResult<Vec<DagNode>> {
        Ok(self.decode_block(data)?.into_nodes())
    }

    fn check_root(&self, decoded: &DecodedBlock) -> DecodeResult<()> {
        if self.config.merkle_root_check == MerkleRootCheck::Skip {
            return Ok(());
        }
        let Some(computed) = decoded.computed_root() else {
            return Ok(());
        };
        let expected = decoded.block.header().merkle_root;
        if computed == expected {
            return Ok(());
        }

        let expected = zecdag_primitives::types::digest_to_reversed_hex(&expected);
        let computed = zecdag_primitives::types::digest_to_reversed_hex(&computed);
        match self.config.merkle_root_check {
            MerkleRootCheck::Enforce => Err(DecodeError::MerkleRootMismatch { expected, computed }),
            _ => {
                warn!(
                    block = %decoded.block.hex_hash(),
                    %expected,
                    %computed,
                    "merkle root does not match header"
                );
                Ok(())
            }
        }
    }
}

fn read_tx_count(r: &mut Reader<'_>) -> DecodeResult<u64> {
    Ok(zecdag_primitives::varint::read_compact_size(r)?)
}

/// Decode a standalone transaction. Trailing bytes are an error.
pub fn decode_transaction(data: &[u8]) -> DecodeResult<Tx> {
    Ok(zecdag_primitives::decode_transaction(data)?)
}

/// Decode a buffer whose kind the host knows. Every byte must be consumed.
///
/// A block buffer holds the header only; a tree buffer holds two digests,
/// whose children are taken to be transactions.
pub fn decode_node(kind: NodeKind, data: &[u8]) -> DecodeResult<DagNode> {
    let node = match kind {
        NodeKind::Block => {
            let (header, used) = decode_block_header(data)?;
            if used != data.len() {
                let leftover = data.len() - used;
                return Err(CodecError::MalformedLength {
                    declared: leftover as u64,
                    remaining: leftover,
                }
                .into());
            }
            DagNode::Block(Block::new(header))
        }
        NodeKind::Transaction => DagNode::Tx(decode_transaction(data)?),
        NodeKind::TxTree => DagNode::TxTree(TxTree::from_raw(data, Codec::Transaction)?),
    };
    Ok(node)
}

/// Decode a buffer that is either a transaction or a bare tree node.
///
/// Exactly 64 bytes is taken to be a tree node; anything else is parsed as a
/// transaction. Prefer [`decode_node`] when the kind is known.
pub fn decode_maybe_tx(data: &[u8]) -> DecodeResult<DagNode> {
    if data.is_empty() {
        return Err(CodecError::UnsupportedShape("empty buffer".into()).into());
    }
    let kind = if data.len() == TX_TREE_LEN {
        NodeKind::TxTree
    } else {
        NodeKind::Transaction
    };
    decode_node(kind, data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use zecdag_primitives::{encode_block_header, encode_transaction, BlockHeader, TxIn, TxOut};

    fn header(merkle_root: [u8; 32]) -> BlockHeader {
        BlockHeader {
            version: 4,
            parent: [0x11; 32],
            merkle_root,
            reserved: [0; 32],
            timestamp: 1_500_000_000,
            difficulty: 0x1d00_ffff,
            nonce: [0x22; 32],
            solution: vec![0x33; 8],
        }
    }

    fn coinbase(tag: u8) -> Tx {
        Tx::new(
            1,
            vec![TxIn {
                prev_tx: None,
                prev_index: u32::MAX,
                script: vec![tag],
                sequence: u32::MAX,
            }],
            vec![TxOut {
                value: 1_250_000_000,
                script: vec![0x51],
            }],
            0,
            None,
        )
        .unwrap()
    }

    fn message(merkle_root: [u8; 32], txs: &[Tx]) -> Vec<u8> {
        let mut out = encode_block_header(&header(merkle_root));
        zecdag_primitives::varint::write_compact_size(&mut out, txs.len() as u64);
        for tx in txs {
            out.extend_from_slice(&encode_transaction(tx));
        }
        out
    }

    #[test]
    fn test_single_tx_block() {
        let tx = coinbase(1);
        let data = message(*tx.content_id().digest(), &[tx.clone()]);
        let nodes = BlockMessageDecoder::default().decode_block_message(&data).unwrap();
        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0].kind(), NodeKind::Block);
        assert_eq!(nodes[1].as_tx(), Some(&tx));
    }

    #[test]
    fn test_zero_transactions_rejected() {
        let data = message([0; 32], &[]);
        assert_eq!(
            BlockMessageDecoder::default().decode_block_message(&data),
            Err(DecodeError::Codec(CodecError::EmptyTransactionSet))
        );
    }

    #[test]
    fn test_count_limit() {
        let txs = [coinbase(1), coinbase(2), coinbase(3)];
        let data = message([0; 32], &txs);
        let decoder = BlockMessageDecoder::new(DecoderConfig {
            max_transactions: 2,
            ..DecoderConfig::default()
        });
        assert_eq!(
            decoder.decode_block_message(&data),
            Err(DecodeError::TransactionCountExceeded { declared: 3, limit: 2 })
        );
    }

    #[test]
    fn test_trailing_bytes_policy() {
        let tx = coinbase(1);
        let mut data = message(*tx.content_id().digest(), &[tx]);
        data.extend_from_slice(&[0xAA, 0xBB]);

        assert!(BlockMessageDecoder::default().decode_block_message(&data).is_ok());

        let strict = BlockMessageDecoder::new(DecoderConfig {
            reject_trailing_bytes: true,
            ..DecoderConfig::default()
        });
        assert_eq!(
            strict.decode_block_message(&data),
            Err(DecodeError::TrailingBytes(2))
        );
    }

    #[test]
    fn test_root_check_modes() {
        let txs = [coinbase(1), coinbase(2)];
        let data = message([0xEE; 32], &txs);

        for mode in [MerkleRootCheck::Skip, MerkleRootCheck::Warn] {
            let decoder = BlockMessageDecoder::new(DecoderConfig {
                merkle_root_check: mode,
                ..DecoderConfig::default()
            });
            assert!(decoder.decode_block_message(&data).is_ok());
        }

        let enforce = BlockMessageDecoder::new(DecoderConfig {
            merkle_root_check: MerkleRootCheck::Enforce,
            ..DecoderConfig::default()
        });
        assert!(matches!(
            enforce.decode_block_message(&data),
            Err(DecodeError::MerkleRootMismatch { .. })
        ));
    }

    #[test]
    fn test_decode_maybe_tx() {
        let tx = coinbase(5);
        let bytes = encode_transaction(&tx);
        assert_ne!(bytes.len(), TX_TREE_LEN);
        assert_eq!(decode_maybe_tx(&bytes).unwrap(), DagNode::Tx(tx));

        let node = decode_maybe_tx(&[7u8; 64]).unwrap();
        assert_eq!(node.kind(), NodeKind::TxTree);

        assert!(matches!(
            decode_maybe_tx(&[]),
            Err(DecodeError::Codec(CodecError::UnsupportedShape(_)))
        ));
    }

    #[test]
    fn test_decode_node_explicit_kind() {
        let raw = encode_block_header(&header([1; 32]));
        let node = decode_node(NodeKind::Block, &raw).unwrap();
        assert_eq!(node.raw_data(), raw);

        assert!(matches!(
            decode_node(NodeKind::TxTree, &raw),
            Err(DecodeError::Codec(CodecError::UnsupportedShape(_)))
        ));
    }

    #[test]
    fn test_decode_node_block_rejects_leftover_bytes() {
        let tx = coinbase(1);
        let data = message(*tx.content_id().digest(), &[tx]);
        let header_len = encode_block_header(&header([0; 32])).len();
        assert_eq!(
            decode_node(NodeKind::Block, &data),
            Err(DecodeError::Codec(CodecError::MalformedLength {
                declared: (data.len() - header_len) as u64,
                remaining: data.len() - header_len,
            }))
        );
        assert!(decode_node(NodeKind::Block, &data[..header_len]).is_ok());
    }
}
