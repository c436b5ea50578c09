//! Transactions, their transparent inputs/outputs and the version-gated
//! shielded section.
//!
//! ## Wire Format (little-endian)
//!
//! ```text
//! [version: 4]
//! [input count: CompactSize]  TxIn*
//! [output count: CompactSize] TxOut*
//! [lock time: 4]
//! -- only when version != 1 --
//! [join-split count: CompactSize] JSDescription* (1802 bytes each)
//! [join-split public key: 32]
//! [join-split signature: 64]
//! ```
//!
//! TxIn: `[prev tx digest: 32][prev index: 4][script: CompactSize + bytes][sequence: 4]`.
//! An all-zero prev tx digest marks a coinbase input.
//!
//! TxOut: `[value: 8][script: CompactSize + bytes]`.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use serde::Serialize;

use crate::cid::{Codec, ContentId, Link};
use crate::codec::{write_u32, write_u64, write_var_bytes, Reader};
use crate::error::{CodecError, CodecResult, ResolveError};
use crate::joinsplit::{read_join_split, write_join_split, JSDescription, JOIN_SPLIT_LEN};
use crate::node::{parse_index, split_first, Node, Resolution, Resolve, Resolved, Value};
use crate::serde_helpers;
use crate::types::{is_blank, JOIN_SPLIT_PUBKEY_LEN, JOIN_SPLIT_SIG_LEN, TRANSPARENT_TX_VERSION, ZERO_DIGEST};
use crate::varint::write_compact_size;

/// Smallest possible TxIn: digest + index + empty script + sequence.
const MIN_TX_IN_LEN: usize = 32 + 4 + 1 + 4;

/// Smallest possible TxOut: value + empty script.
const MIN_TX_OUT_LEN: usize = 8 + 1;

/// A transparent input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TxIn {
    /// Transaction being spent; `None` for a coinbase input.
    #[serde(rename = "prevTx", serialize_with = "serde_helpers::opt_link")]
    pub prev_tx: Option<ContentId>,
    #[serde(rename = "prevTxIndex")]
    pub prev_index: u32,
    #[serde(serialize_with = "serde_helpers::bytes")]
    pub script: Vec<u8>,
    #[serde(rename = "seqNo")]
    pub sequence: u32,
}

impl TxIn {
    /// Returns true for the all-zero reference of a coinbase input.
    pub fn is_coinbase(&self) -> bool {
        self.prev_tx.is_none()
    }
}

/// A transparent output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TxOut {
    /// Amount in atomic units.
    pub value: u64,
    #[serde(serialize_with = "serde_helpers::bytes")]
    pub script: Vec<u8>,
}

/// Shielded section of a version ≥ 2 transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShieldedData {
    pub join_splits: Vec<JSDescription>,
    #[serde(serialize_with = "serde_helpers::bytes")]
    pub join_split_pub_key: [u8; JOIN_SPLIT_PUBKEY_LEN],
    #[serde(serialize_with = "serde_helpers::bytes")]
    pub join_split_sig: [u8; JOIN_SPLIT_SIG_LEN],
}

/// A decoded transaction, addressed by its full encoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tx {
    version: u32,
    inputs: Vec<TxIn>,
    outputs: Vec<TxOut>,
    lock_time: u32,
    #[serde(flatten)]
    shielded: Option<ShieldedData>,
    #[serde(skip)]
    cid: ContentId,
}

impl Tx {
    /// Build a transaction. The shielded section must be present exactly
    /// when `version != 1`.
    pub fn new(
        version: u32,
        inputs: Vec<TxIn>,
        outputs: Vec<TxOut>,
        lock_time: u32,
        shielded: Option<ShieldedData>,
    ) -> CodecResult<Self> {
        if shielded.is_some() == (version == TRANSPARENT_TX_VERSION) {
            return Err(CodecError::ShieldedSectionMismatch { version });
        }
        let mut tx = Self {
            version,
            inputs,
            outputs,
            lock_time,
            shielded,
            cid: ContentId::new(Codec::Transaction, ZERO_DIGEST),
        };
        tx.cid = ContentId::for_bytes(Codec::Transaction, &encode_transaction(&tx));
        Ok(tx)
    }

    /// Transaction version; 1 means no shielded section.
    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn inputs(&self) -> &[TxIn] {
        &self.inputs
    }

    pub fn outputs(&self) -> &[TxOut] {
        &self.outputs
    }

    pub fn lock_time(&self) -> u32 {
        self.lock_time
    }

    /// Shielded section, present exactly when the version is not 1.
    pub fn shielded(&self) -> Option<&ShieldedData> {
        self.shielded.as_ref()
    }

    /// Join-split descriptions; empty for version-1 transactions.
    pub fn join_splits(&self) -> &[JSDescription] {
        self.shielded.as_ref().map_or(&[], |s| &s.join_splits)
    }

    /// Transaction id as published by explorers.
    pub fn hex_hash(&self) -> String {
        self.cid.reversed_hex()
    }

    fn shielded_or(&self, field: &str) -> Result<&ShieldedData, ResolveError> {
        self.shielded
            .as_ref()
            .ok_or_else(|| ResolveError::InvalidPathSegment(field.into()))
    }
}

fn read_tx_in(r: &mut Reader<'_>) -> CodecResult<TxIn> {
    let prev = r.read_digest()?;
    let prev_index = r.read_u32()?;
    let script = r.read_var_bytes()?;
    let sequence = r.read_u32()?;

    let prev_tx = if is_blank(&prev) {
        None
    } else {
        Some(ContentId::new(Codec::Transaction, prev))
    };

    Ok(TxIn {
        prev_tx,
        prev_index,
        script,
        sequence,
    })
}

fn write_tx_in(buf: &mut Vec<u8>, input: &TxIn) {
    let prev = input.prev_tx.as_ref().map_or(&ZERO_DIGEST, |cid| cid.digest());
    buf.extend_from_slice(prev);
    write_u32(buf, input.prev_index);
    write_var_bytes(buf, &input.script);
    write_u32(buf, input.sequence);
}

fn read_tx_out(r: &mut Reader<'_>) -> CodecResult<TxOut> {
    Ok(TxOut {
        value: r.read_u64()?,
        script: r.read_var_bytes()?,
    })
}

fn write_tx_out(buf: &mut Vec<u8>, output: &TxOut) {
    write_u64(buf, output.value);
    write_var_bytes(buf, &output.script);
}

fn read_shielded(r: &mut Reader<'_>) -> CodecResult<ShieldedData> {
    let count = r.read_count(JOIN_SPLIT_LEN)?;
    let mut join_splits = Vec::with_capacity(count);
    for _ in 0..count {
        join_splits.push(read_join_split(r)?);
    }

    Ok(ShieldedData {
        join_splits,
        join_split_pub_key: r.read_array()?,
        join_split_sig: r.read_array()?,
    })
}

/// Read one transaction from the cursor, stopping after its last field.
pub fn read_transaction(r: &mut Reader<'_>) -> CodecResult<Tx> {
    let version = r.read_u32()?;

    let input_count = r.read_count(MIN_TX_IN_LEN)?;
    let mut inputs = Vec::with_capacity(input_count);
    for _ in 0..input_count {
        inputs.push(read_tx_in(r)?);
    }

    let output_count = r.read_count(MIN_TX_OUT_LEN)?;
    let mut outputs = Vec::with_capacity(output_count);
    for _ in 0..output_count {
        outputs.push(read_tx_out(r)?);
    }

    let lock_time = r.read_u32()?;

    // Version alone decides whether the shielded section exists.
    let shielded = if version == TRANSPARENT_TX_VERSION {
        None
    } else {
        Some(read_shielded(r)?)
    };

    Tx::new(version, inputs, outputs, lock_time, shielded)
}

/// Decode a standalone transaction. Every byte of `data` must be consumed.
pub fn decode_transaction(data: &[u8]) -> CodecResult<Tx> {
    let mut r = Reader::new(data);
    let tx = read_transaction(&mut r)?;
    if !r.is_empty() {
        return Err(CodecError::MalformedLength {
            declared: r.remaining() as u64,
            remaining: r.remaining(),
        });
    }
    Ok(tx)
}

/// Encode a transaction to its canonical wire bytes.
pub fn encode_transaction(tx: &Tx) -> Vec<u8> {
    let mut buf = Vec::with_capacity(256);

    write_u32(&mut buf, tx.version);
    write_compact_size(&mut buf, tx.inputs.len() as u64);
    for input in &tx.inputs {
        write_tx_in(&mut buf, input);
    }
    write_compact_size(&mut buf, tx.outputs.len() as u64);
    for output in &tx.outputs {
        write_tx_out(&mut buf, output);
    }
    write_u32(&mut buf, tx.lock_time);

    if let Some(shielded) = &tx.shielded {
        write_compact_size(&mut buf, shielded.join_splits.len() as u64);
        for js in &shielded.join_splits {
            write_join_split(&mut buf, js);
        }
        buf.extend_from_slice(&shielded.join_split_pub_key);
        buf.extend_from_slice(&shielded.join_split_sig);
    }

    buf
}

impl Resolve for Tx {
    fn resolve<'a, 'p>(&'a self, path: &'p [&'p str]) -> Resolution<'a, 'p> {
        let (field, rest) = split_first(path)?;
        match field {
            "version" => Ok((Resolved::Value(Value::U32(self.version)), rest)),
            "lockTime" => Ok((Resolved::Value(Value::U32(self.lock_time)), rest)),
            "inputs" => match rest.split_first() {
                None => Ok((Resolved::Inputs(&self.inputs), rest)),
                Some((index, rest)) => {
                    let i = parse_index(index, self.inputs.len())?;
                    Ok((Resolved::Input(&self.inputs[i]), rest))
                }
            },
            "outputs" => match rest.split_first() {
                None => Ok((Resolved::Outputs(&self.outputs), rest)),
                Some((index, rest)) => {
                    let i = parse_index(index, self.outputs.len())?;
                    Ok((Resolved::Output(&self.outputs[i]), rest))
                }
            },
            "joinSplits" => {
                let shielded = self.shielded_or(field)?;
                match rest.split_first() {
                    None => Ok((Resolved::JoinSplits(&shielded.join_splits), rest)),
                    Some((index, rest)) => {
                        let i = parse_index(index, shielded.join_splits.len())?;
                        Ok((Resolved::JoinSplit(&shielded.join_splits[i]), rest))
                    }
                }
            }
            "joinSplitPubKey" => {
                let shielded = self.shielded_or(field)?;
                Ok((Resolved::Value(Value::Bytes(&shielded.join_split_pub_key)), rest))
            }
            "joinSplitSig" => {
                let shielded = self.shielded_or(field)?;
                Ok((Resolved::Value(Value::Bytes(&shielded.join_split_sig)), rest))
            }
            other => Err(ResolveError::InvalidPathSegment(other.into())),
        }
    }
}

impl Node for Tx {
    fn content_id(&self) -> ContentId {
        self.cid
    }

    fn raw_data(&self) -> Vec<u8> {
        encode_transaction(self)
    }

    /// One link per non-coinbase input.
    fn links(&self) -> Vec<Link> {
        self.inputs
            .iter()
            .enumerate()
            .filter_map(|(i, input)| {
                input
                    .prev_tx
                    .map(|cid| Link::new(cid).with_name(format!("inputs/{}/prevTx", i)))
            })
            .collect()
    }

    fn tree(&self) -> Vec<String> {
        let mut out: Vec<String> = ["version", "lockTime", "inputs", "outputs"]
            .iter()
            .map(|s| String::from(*s))
            .collect();
        out.extend((0..self.inputs.len()).map(|i| format!("inputs/{}", i)));
        out.extend((0..self.outputs.len()).map(|i| format!("outputs/{}", i)));
        if let Some(shielded) = &self.shielded {
            out.push("joinSplits".into());
            out.extend((0..shielded.join_splits.len()).map(|i| format!("joinSplits/{}", i)));
            out.push("joinSplitPubKey".into());
            out.push("joinSplitSig".into());
        }
        out
    }
}

impl Resolve for TxIn {
    fn resolve<'a, 'p>(&'a self, path: &'p [&'p str]) -> Resolution<'a, 'p> {
        let (field, rest) = split_first(path)?;
        let resolved = match field {
            "prevTx" => match self.prev_tx {
                Some(cid) => Resolved::Link(Link::new(cid)),
                None => return Err(ResolveError::InvalidPathSegment(field.into())),
            },
            "prevTxIndex" => Resolved::Value(Value::U32(self.prev_index)),
            "script" => Resolved::Value(Value::Bytes(&self.script)),
            "seqNo" => Resolved::Value(Value::U32(self.sequence)),
            other => return Err(ResolveError::InvalidPathSegment(other.into())),
        };
        Ok((resolved, rest))
    }
}

impl Resolve for TxOut {
    fn resolve<'a, 'p>(&'a self, path: &'p [&'p str]) -> Resolution<'a, 'p> {
        let (field, rest) = split_first(path)?;
        let resolved = match field {
            "value" => Resolved::Value(Value::U64(self.value)),
            "script" => Resolved::Value(Value::Bytes(&self.script)),
            other => return Err(ResolveError::InvalidPathSegment(other.into())),
        };
        Ok((resolved, rest))
    }
}
