//! CompactSize variable-width integers.
//!
//! ```text
//! value < 0xFD         -> [value]                     1 byte
//! value <= 0xFFFF      -> [0xFD][u16 LE]              3 bytes
//! value <= 0xFFFF_FFFF -> [0xFE][u32 LE]              5 bytes
//! otherwise            -> [0xFF][u64 LE]              9 bytes
//! ```
//!
//! Encoding always produces the shortest form. Decoding rejects any longer
//! form, so every accepted encoding re-encodes to the same bytes.

use alloc::vec::Vec;

use crate::codec::Reader;
use crate::error::{CodecError, CodecResult};

const MARKER_U16: u8 = 0xFD;
const MARKER_U32: u8 = 0xFE;
const MARKER_U64: u8 = 0xFF;

/// Number of bytes `write_compact_size` emits for `n`.
pub fn encoded_len(n: u64) -> usize {
    if n < MARKER_U16 as u64 {
        1
    } else if n <= u16::MAX as u64 {
        3
    } else if n <= u32::MAX as u64 {
        5
    } else {
        9
    }
}

/// Append the CompactSize encoding of `n`.
pub fn write_compact_size(buf: &mut Vec<u8>, n: u64) {
    if n < MARKER_U16 as u64 {
        buf.push(n as u8);
    } else if n <= u16::MAX as u64 {
        buf.push(MARKER_U16);
        buf.extend_from_slice(&(n as u16).to_le_bytes());
    } else if n <= u32::MAX as u64 {
        buf.push(MARKER_U32);
        buf.extend_from_slice(&(n as u32).to_le_bytes());
    } else {
        buf.push(MARKER_U64);
        buf.extend_from_slice(&n.to_le_bytes());
    }
}

/// Read one CompactSize value. A value carried in a wider form than it
/// needs is `MalformedLength`.
pub fn read_compact_size(r: &mut Reader<'_>) -> CodecResult<u64> {
    let (value, min) = match r.read_u8()? {
        MARKER_U16 => (u16::from_le_bytes(r.read_array()?) as u64, MARKER_U16 as u64),
        MARKER_U32 => (u32::from_le_bytes(r.read_array()?) as u64, u16::MAX as u64 + 1),
        MARKER_U64 => (u64::from_le_bytes(r.read_array()?), u32::MAX as u64 + 1),
        small => (small as u64, 0),
    };
    if value < min {
        return Err(CodecError::MalformedLength {
            declared: value,
            remaining: r.remaining(),
        });
    }
    Ok(value)
}
