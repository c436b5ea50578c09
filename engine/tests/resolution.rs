//! Path resolution across a decoded block through the node index.

mod common;

use zecdag_engine::{BlockMessageDecoder, DecodeError, NodeIndex};
use zecdag_primitives::{split_path, Codec, Node, ResolveError, Resolved, Value};

use common::*;

fn indexed(txs: &[zecdag_primitives::Tx]) -> (NodeIndex, zecdag_primitives::ContentId) {
    let message = block_message(&header_for(txs), txs);
    let nodes = BlockMessageDecoder::default()
        .decode_block_message(&message)
        .unwrap();
    let block_id = nodes[0].content_id();
    (nodes.into_iter().collect(), block_id)
}

#[test]
fn test_index_holds_every_emitted_node() {
    let cb = coinbase(1, 50);
    let txs = vec![cb.clone(), spend(&cb, 0, 40), coinbase(2, 10)];
    let (index, block_id) = indexed(&txs);
    assert_eq!(index.len(), 1 + 3 + 3);
    assert!(index.contains(&block_id));
    for tx in &txs {
        assert!(index.contains(&tx.content_id()));
    }
}

#[test]
fn test_walk_from_block_into_spent_output() {
    let cb = coinbase(1, 50);
    let txs = vec![cb.clone(), spend(&cb, 0, 40)];
    let (index, block_id) = indexed(&txs);

    // tx -> root node, 1 -> second transaction, then into the coinbase it spends.
    let path = split_path("tx/1/inputs/0/prevTx/outputs/0/value");
    assert_eq!(
        index.resolve(&block_id, &path).unwrap(),
        Resolved::Value(Value::U64(50))
    );

    let path = split_path("tx/0/version");
    assert_eq!(
        index.resolve(&block_id, &path).unwrap(),
        Resolved::Value(Value::U32(1))
    );
}

#[test]
fn test_single_transaction_root_resolves() {
    let txs = vec![coinbase(7, 99)];
    let (index, block_id) = indexed(&txs);
    let path = split_path("tx/outputs/0/value");
    assert_eq!(
        index.resolve(&block_id, &path).unwrap(),
        Resolved::Value(Value::U64(99))
    );
}

#[test]
fn test_parent_outside_index_is_missing() {
    let txs = vec![coinbase(1, 1)];
    let (index, block_id) = indexed(&txs);
    let path = split_path("parent/version");
    match index.resolve(&block_id, &path) {
        Err(DecodeError::MissingNode(id)) => assert_eq!(id.codec(), Codec::Block),
        other => panic!("expected missing parent, got {:?}", other),
    }
}

#[test]
fn test_join_split_fields_resolve() {
    let txs = vec![coinbase(1, 1), shielded_tx(2, vec![join_split(4)])];
    let (index, _) = indexed(&txs);
    let id = txs[1].content_id();

    let path = split_path("joinSplits/0/oldValue");
    assert_eq!(index.resolve(&id, &path).unwrap(), Resolved::Value(Value::U64(4)));

    let path = split_path("joinSplits/0/nullifiers/1");
    assert_eq!(
        index.resolve(&id, &path).unwrap(),
        Resolved::Value(Value::Bytes(&[6u8; 32]))
    );

    let path = split_path("joinSplits/1");
    assert_eq!(
        index.resolve(&id, &path),
        Err(DecodeError::Resolve(ResolveError::IndexOutOfRange { index: 1, len: 1 }))
    );
}

#[test]
fn test_bad_paths_leave_index_usable() {
    let txs = vec![coinbase(1, 1), coinbase(2, 2)];
    let (index, block_id) = indexed(&txs);

    for bad in ["", "merkleRoot", "tx/2", "tx/0/inputs/x"] {
        let path = split_path(bad);
        assert!(index.resolve(&block_id, &path).is_err(), "{:?}", bad);
    }
    let path = split_path("timestamp");
    assert!(index.resolve(&block_id, &path).is_ok());
}
