//! `serialize_with` helpers for the JSON view of nodes.

use serde::ser::{SerializeSeq, Serializer};

use crate::cid::{ContentId, Link};

/// Byte field as lowercase hex.
pub(crate) fn bytes<S: Serializer, T: AsRef<[u8]>>(data: &T, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&hex::encode(data.as_ref()))
}

/// Two-part byte field as a two-element array of hex strings.
pub(crate) fn pair<S: Serializer, const N: usize>(
    pair: &[[u8; N]; 2],
    s: S,
) -> Result<S::Ok, S::Error> {
    let mut seq = s.serialize_seq(Some(2))?;
    for half in pair {
        seq.serialize_element(&hex::encode(half))?;
    }
    seq.end()
}

/// Optional reference as a link object, or null.
pub(crate) fn opt_link<S: Serializer>(cid: &Option<ContentId>, s: S) -> Result<S::Ok, S::Error> {
    match cid {
        Some(cid) => s.serialize_some(&Link::new(*cid)),
        None => s.serialize_none(),
    }
}
