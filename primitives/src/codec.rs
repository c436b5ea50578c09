//! Byte cursor and write helpers shared by the wire codecs.
//!
//! Encoding format:
//! - Fixed-size fields (digests, u32, u64, opaque arrays) are written directly
//! - Variable-length byte fields are CompactSize-length-prefixed
//! - Repeated records are CompactSize-count-prefixed then concatenated
//!
//! Every read checks the remaining length first and fails without consuming
//! anything; callers abandon the whole decode on the first error.

use alloc::vec::Vec;

use crate::error::{CodecError, CodecResult};
use crate::types::Digest;
use crate::varint::{read_compact_size, write_compact_size};

/// A cursor for reading bytes during decoding.
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    /// Start reading at the beginning of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Bytes consumed so far.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes not yet consumed.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Returns true if every byte has been consumed.
    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Everything consumed so far.
    pub fn consumed(&self) -> &'a [u8] {
        &self.data[..self.pos]
    }

    /// Take the next `n` bytes. Fails without consuming if fewer remain.
    pub fn read_bytes(&mut self, n: usize) -> CodecResult<&'a [u8]> {
        if n > self.remaining() {
            return Err(CodecError::TruncatedInput {
                needed: n,
                remaining: self.remaining(),
            });
        }
        let slice = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    /// Take the next `N` bytes as a fixed array.
    pub fn read_array<const N: usize>(&mut self) -> CodecResult<[u8; N]> {
        let bytes = self.read_bytes(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        Ok(out)
    }

    /// Read one byte.
    pub fn read_u8(&mut self) -> CodecResult<u8> {
        Ok(self.read_bytes(1)?[0])
    }

    /// Read a little-endian u32.
    pub fn read_u32(&mut self) -> CodecResult<u32> {
        Ok(u32::from_le_bytes(self.read_array()?))
    }

    /// Read a little-endian u64.
    pub fn read_u64(&mut self) -> CodecResult<u64> {
        Ok(u64::from_le_bytes(self.read_array()?))
    }

    /// Read a 32-byte digest in wire order.
    pub fn read_digest(&mut self) -> CodecResult<Digest> {
        self.read_array()
    }

    /// Read a CompactSize record count whose records are at least
    /// `min_record_len` bytes wide.
    ///
    /// A count that cannot fit in the remaining bytes is rejected before the
    /// caller allocates for it.
    pub fn read_count(&mut self, min_record_len: usize) -> CodecResult<usize> {
        let declared = read_compact_size(self)?;
        let fits = (declared as u128) * (min_record_len as u128) <= self.remaining() as u128;
        if !fits {
            return Err(CodecError::MalformedLength {
                declared,
                remaining: self.remaining(),
            });
        }
        Ok(declared as usize)
    }

    /// Read a CompactSize-length-prefixed byte string.
    pub fn read_var_bytes(&mut self) -> CodecResult<Vec<u8>> {
        let len = self.read_count(1)?;
        Ok(self.read_bytes(len)?.to_vec())
    }
}

// ── Encoding helpers ──

/// Append a little-endian u32.
pub fn write_u32(buf: &mut Vec<u8>, v: u32) {
    buf.extend_from_slice(&v.to_le_bytes());
}

/// Append a little-endian u64.
pub fn write_u64(buf: &mut Vec<u8>, v: u64) {
    buf.extend_from_slice(&v.to_le_bytes());
}

/// Append a digest in wire order.
pub fn write_digest(buf: &mut Vec<u8>, d: &Digest) {
    buf.extend_from_slice(d);
}

/// Append a CompactSize length followed by `data`.
pub fn write_var_bytes(buf: &mut Vec<u8>, data: &[u8]) {
    write_compact_size(buf, data.len() as u64);
    buf.extend_from_slice(data);
}
