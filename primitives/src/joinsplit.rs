//! Join-split descriptions: the fixed-width shielded component of a
//! version ≥ 2 transaction.
//!
//! ## Wire Format (1802 bytes, no length prefixes)
//!
//! ```text
//! offset  size  field
//!      0     8  vpub_old (u64 LE)
//!      8     8  vpub_new (u64 LE)
//!     16    32  anchor
//!     48    64  nullifiers      (2 x 32)
//!    112    64  commitments     (2 x 32)
//!    176    32  ephemeral key
//!    208    32  random seed
//!    240    64  macs            (2 x 32)
//!    304   296  zk proof
//!    600  1202  ciphertexts     (2 x 601)
//! ```
//!
//! Unlike the varint-driven codecs, the whole record window is taken from the
//! cursor in one read and then sliced at the offsets above.

use alloc::vec::Vec;

use serde::Serialize;

use crate::codec::{write_u64, Reader};
use crate::error::{CodecResult, ResolveError};
use crate::node::{parse_index, split_first, Resolution, Resolve, Resolved, Value};
use crate::serde_helpers;

/// Width of one encoded join-split description.
pub const JOIN_SPLIT_LEN: usize = 1802;

/// Width of the zero-knowledge proof.
pub const PROOF_LEN: usize = 296;

/// Width of one note ciphertext.
pub const CIPHERTEXT_LEN: usize = 601;

const OLD_VALUE: usize = 0;
const NEW_VALUE: usize = 8;
const ANCHOR: usize = 16;
const NULLIFIERS: usize = 48;
const COMMITMENTS: usize = 112;
const EPHEMERAL_KEY: usize = 176;
const RANDOM_SEED: usize = 208;
const MACS: usize = 240;
const PROOF: usize = 304;
const CIPHERTEXTS: usize = 600;

/// One join-split description. Embedded in a transaction, never addressed
/// on its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JSDescription {
    pub old_value: u64,
    pub new_value: u64,
    #[serde(serialize_with = "serde_helpers::bytes")]
    pub anchor: [u8; 32],
    #[serde(serialize_with = "serde_helpers::pair")]
    pub nullifiers: [[u8; 32]; 2],
    #[serde(serialize_with = "serde_helpers::pair")]
    pub commitments: [[u8; 32]; 2],
    #[serde(serialize_with = "serde_helpers::bytes")]
    pub ephemeral_key: [u8; 32],
    #[serde(serialize_with = "serde_helpers::bytes")]
    pub random_seed: [u8; 32],
    #[serde(serialize_with = "serde_helpers::pair")]
    pub macs: [[u8; 32]; 2],
    #[serde(serialize_with = "serde_helpers::bytes")]
    pub proof: [u8; PROOF_LEN],
    #[serde(serialize_with = "serde_helpers::pair")]
    pub ciphertexts: [[u8; CIPHERTEXT_LEN]; 2],
}

fn field<const N: usize>(raw: &[u8], offset: usize) -> [u8; N] {
    let mut out = [0u8; N];
    out.copy_from_slice(&raw[offset..offset + N]);
    out
}

fn halves<const N: usize>(raw: &[u8], offset: usize) -> [[u8; N]; 2] {
    [field(raw, offset), field(raw, offset + N)]
}

/// Read one join-split description (exactly [`JOIN_SPLIT_LEN`] bytes).
pub fn read_join_split(r: &mut Reader<'_>) -> CodecResult<JSDescription> {
    let raw = r.read_bytes(JOIN_SPLIT_LEN)?;

    Ok(JSDescription {
        old_value: u64::from_le_bytes(field(raw, OLD_VALUE)),
        new_value: u64::from_le_bytes(field(raw, NEW_VALUE)),
        anchor: field(raw, ANCHOR),
        nullifiers: halves(raw, NULLIFIERS),
        commitments: halves(raw, COMMITMENTS),
        ephemeral_key: field(raw, EPHEMERAL_KEY),
        random_seed: field(raw, RANDOM_SEED),
        macs: halves(raw, MACS),
        proof: field(raw, PROOF),
        ciphertexts: halves(raw, CIPHERTEXTS),
    })
}

/// Append the fixed-width encoding of `js`.
pub fn write_join_split(buf: &mut Vec<u8>, js: &JSDescription) {
    write_u64(buf, js.old_value);
    write_u64(buf, js.new_value);
    buf.extend_from_slice(&js.anchor);
    for half in &js.nullifiers {
        buf.extend_from_slice(half);
    }
    for half in &js.commitments {
        buf.extend_from_slice(half);
    }
    buf.extend_from_slice(&js.ephemeral_key);
    buf.extend_from_slice(&js.random_seed);
    for half in &js.macs {
        buf.extend_from_slice(half);
    }
    buf.extend_from_slice(&js.proof);
    for half in &js.ciphertexts {
        buf.extend_from_slice(half);
    }
}

/// Resolve `<field>/<i>` into one half of a two-part field.
fn resolve_half<'a, 'p, const N: usize>(
    pair: &'a [[u8; N]; 2],
    rest: &'p [&'p str],
) -> Resolution<'a, 'p> {
    match rest.split_first() {
        Some((index, rest)) => {
            let i = parse_index(index, 2)?;
            Ok((Resolved::Value(Value::Bytes(&pair[i])), rest))
        }
        None => Err(ResolveError::EmptyPath),
    }
}

impl Resolve for JSDescription {
    fn resolve<'a, 'p>(&'a self, path: &'p [&'p str]) -> Resolution<'a, 'p> {
        let (field, rest) = split_first(path)?;
        match field {
            "oldValue" => Ok((Resolved::Value(Value::U64(self.old_value)), rest)),
            "newValue" => Ok((Resolved::Value(Value::U64(self.new_value)), rest)),
            "anchor" => Ok((Resolved::Value(Value::Bytes(&self.anchor)), rest)),
            "ephemeralKey" => Ok((Resolved::Value(Value::Bytes(&self.ephemeral_key)), rest)),
            "randomSeed" => Ok((Resolved::Value(Value::Bytes(&self.random_seed)), rest)),
            "proof" => Ok((Resolved::Value(Value::Bytes(&self.proof)), rest)),
            "nullifiers" => resolve_half(&self.nullifiers, rest),
            "commitments" => resolve_half(&self.commitments, rest),
            "macs" => resolve_half(&self.macs, rest),
            "ciphertexts" => resolve_half(&self.ciphertexts, rest),
            other => Err(ResolveError::InvalidPathSegment(other.into())),
        }
    }
}
