//! Error types for decoding and path resolution.
//!
//! Decoding errors are fatal for the whole decode call. Resolution errors are
//! local: the node is untouched and the caller may try another path.

use alloc::string::String;
use core::fmt;

/// Wire codec error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Fewer bytes remain than a fixed or varint-declared field requires.
    TruncatedInput {
        /// Bytes the field needs.
        needed: usize,
        /// Bytes left in the buffer.
        remaining: usize,
    },

    /// A count or length prefix is inconsistent with the remaining buffer,
    /// or a standalone decode left bytes unconsumed.
    MalformedLength {
        /// Size the prefix declared (or bytes left over).
        declared: u64,
        /// Bytes left in the buffer.
        remaining: usize,
    },

    /// Input matches neither the transaction nor the tree-node shape.
    UnsupportedShape(String),

    /// A Merkle tree was requested over zero transactions.
    EmptyTransactionSet,

    /// The shielded section's presence disagrees with the transaction version.
    ShieldedSectionMismatch {
        /// The offending version.
        version: u32,
    },
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TruncatedInput { needed, remaining } => {
                write!(f, "truncated input: needed {} bytes, {} remaining", needed, remaining)
            }
            Self::MalformedLength { declared, remaining } => {
                write!(f, "malformed length: declared {}, {} bytes remaining", declared, remaining)
            }
            Self::UnsupportedShape(msg) => write!(f, "unsupported shape: {}", msg),
            Self::EmptyTransactionSet => write!(f, "cannot build a merkle tree over zero transactions"),
            Self::ShieldedSectionMismatch { version } => {
                write!(f, "shielded section does not match transaction version {}", version)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for CodecError {}

/// Path resolution error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// The path has no segments.
    EmptyPath,

    /// Unknown field name or malformed index.
    InvalidPathSegment(String),

    /// Numeric index past the end of a list.
    IndexOutOfRange { index: usize, len: usize },

    /// The path resolved to something other than a link.
    NotALink,
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyPath => write!(f, "zero length path"),
            Self::InvalidPathSegment(segment) => write!(f, "no such link: {:?}", segment),
            Self::IndexOutOfRange { index, len } => {
                write!(f, "index {} out of range (len {})", index, len)
            }
            Self::NotALink => write!(f, "object at path was not a link"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ResolveError {}

/// Convenience result type for the codecs.
pub type CodecResult<T> = core::result::Result<T, CodecError>;

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::format;

    #[test]
    fn test_truncated_display() {
        let err = CodecError::TruncatedInput { needed: 32, remaining: 7 };
        let s = format!("{}", err);
        assert!(s.contains("32"));
        assert!(s.contains("7"));
    }

    #[test]
    fn test_resolve_error_display() {
        let err = ResolveError::InvalidPathSegment("bogus".into());
        assert!(format!("{}", err).contains("bogus"));
        assert_eq!(format!("{}", ResolveError::EmptyPath), "zero length path");
    }

    #[test]
    fn test_errors_compare() {
        assert_eq!(CodecError::EmptyTransactionSet, CodecError::EmptyTransactionSet);
        assert_ne!(
            ResolveError::IndexOutOfRange { index: 1, len: 1 },
            ResolveError::IndexOutOfRange { index: 2, len: 1 }
        );
    }
}
