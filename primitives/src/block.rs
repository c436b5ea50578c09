//! Block headers.
//!
//! ## Wire Format (little-endian)
//!
//! ```text
//! [version: 4]
//! [parent block digest: 32]
//! [merkle root digest: 32]
//! [reserved: 32]
//! [timestamp: 4]
//! [difficulty (compact target): 4]
//! [nonce: 32]
//! [solution: CompactSize length + bytes]
//! ```
//!
//! In a block message the header is followed by the transaction count and
//! the transactions. The block id covers the header bytes only; the payload
//! is committed to through the merkle root reference.

use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::cid::{Codec, ContentId, Link};
use crate::codec::{write_digest, write_u32, write_var_bytes, Reader};
use crate::error::{CodecResult, ResolveError};
use crate::node::{split_first, Node, Resolution, Resolve, Resolved, Value};
use crate::types::{digest_to_hex, Digest, HEADER_FIXED_LEN};

/// Names resolvable on a block.
const BLOCK_FIELDS: [&str; 8] = [
    "version",
    "parent",
    "tx",
    "timestamp",
    "difficulty",
    "nonce",
    "solution",
    "reserved",
];

/// Block header fields, exactly as carried on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockHeader {
    pub version: u32,
    /// Digest of the previous block's header.
    pub parent: Digest,
    /// Root digest of this block's transaction Merkle tree.
    pub merkle_root: Digest,
    pub reserved: [u8; 32],
    /// Seconds since the Unix epoch.
    pub timestamp: u32,
    /// Compact difficulty target.
    pub difficulty: u32,
    pub nonce: [u8; 32],
    /// Proof-of-work solution.
    pub solution: Vec<u8>,
}

/// Read a header from the cursor, leaving any following bytes untouched.
pub fn read_block_header(r: &mut Reader<'_>) -> CodecResult<BlockHeader> {
    Ok(BlockHeader {
        version: r.read_u32()?,
        parent: r.read_digest()?,
        merkle_root: r.read_digest()?,
        reserved: r.read_array()?,
        timestamp: r.read_u32()?,
        difficulty: r.read_u32()?,
        nonce: r.read_array()?,
        solution: r.read_var_bytes()?,
    })
}

/// Decode a header from the front of `data`.
///
/// Returns the header and the number of bytes it occupied; trailing bytes
/// are ignored.
pub fn decode_block_header(data: &[u8]) -> CodecResult<(BlockHeader, usize)> {
    let mut r = Reader::new(data);
    let header = read_block_header(&mut r)?;
    Ok((header, r.position()))
}

/// Encode a header to its canonical wire bytes.
pub fn encode_block_header(header: &BlockHeader) -> Vec<u8> {
    let mut buf = Vec::with_capacity(HEADER_FIXED_LEN + 3 + header.solution.len());

    write_u32(&mut buf, header.version);
    write_digest(&mut buf, &header.parent);
    write_digest(&mut buf, &header.merkle_root);
    buf.extend_from_slice(&header.reserved);
    write_u32(&mut buf, header.timestamp);
    write_u32(&mut buf, header.difficulty);
    buf.extend_from_slice(&header.nonce);
    write_var_bytes(&mut buf, &header.solution);

    buf
}

/// A decoded block, addressed by its header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    header: BlockHeader,
    cid: ContentId,
}

impl Block {
    /// Wrap a header and compute its id over the re-encoded header bytes.
    pub fn new(header: BlockHeader) -> Self {
        let cid = ContentId::for_bytes(Codec::Block, &encode_block_header(&header));
        Self { header, cid }
    }

    /// Header fields as decoded.
    pub fn header(&self) -> &BlockHeader {
        &self.header
    }

    /// Block version.
    pub fn version(&self) -> u32 {
        self.header.version
    }

    /// Id of the previous block.
    pub fn parent(&self) -> ContentId {
        ContentId::new(Codec::Block, self.header.parent)
    }

    /// Id of the root of this block's transaction set.
    pub fn merkle_root(&self) -> ContentId {
        ContentId::new(Codec::TransactionSet, self.header.merkle_root)
    }

    /// Block hash as published by explorers.
    pub fn hex_hash(&self) -> String {
        self.cid.reversed_hex()
    }
}

impl Resolve for Block {
    fn resolve<'a, 'p>(&'a self, path: &'p [&'p str]) -> Resolution<'a, 'p> {
        let (field, rest) = split_first(path)?;
        let h = &self.header;
        let resolved = match field {
            "version" => Resolved::Value(Value::U32(h.version)),
            "timestamp" => Resolved::Value(Value::U32(h.timestamp)),
            "difficulty" => Resolved::Value(Value::U32(h.difficulty)),
            "nonce" => Resolved::Value(Value::Bytes(&h.nonce)),
            "solution" => Resolved::Value(Value::Bytes(&h.solution)),
            "reserved" => Resolved::Value(Value::Bytes(&h.reserved)),
            "parent" => Resolved::Link(Link::new(self.parent())),
            "tx" => Resolved::Link(Link::new(self.merkle_root())),
            other => return Err(ResolveError::InvalidPathSegment(other.into())),
        };
        Ok((resolved, rest))
    }
}

impl Node for Block {
    fn content_id(&self) -> ContentId {
        self.cid
    }

    fn raw_data(&self) -> Vec<u8> {
        encode_block_header(&self.header)
    }

    fn links(&self) -> Vec<Link> {
        vec![
            Link::new(self.parent()).with_name("parent"),
            Link::new(self.merkle_root()).with_name("tx"),
        ]
    }

    fn tree(&self) -> Vec<String> {
        BLOCK_FIELDS.iter().map(|s| String::from(*s)).collect()
    }
}

impl Serialize for Block {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let h = &self.header;
        let mut s = serializer.serialize_struct("Block", 8)?;
        s.serialize_field("version", &h.version)?;
        s.serialize_field("parent", &Link::new(self.parent()))?;
        s.serialize_field("merkle_root", &Link::new(self.merkle_root()))?;
        s.serialize_field("reserved", &digest_to_hex(&h.reserved))?;
        s.serialize_field("timestamp", &h.timestamp)?;
        s.serialize_field("difficulty", &h.difficulty)?;
        s.serialize_field("nonce", &digest_to_hex(&h.nonce))?;
        s.serialize_field("solution", &hex::encode(&h.solution))?;
        s.end()
    }
}
