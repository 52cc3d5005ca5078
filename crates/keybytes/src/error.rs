//! Error types for key decoding.

use thiserror::Error;

/// Errors returned when decoding key bytes.
///
/// Malformed input is an expected condition (partial reads, foreign bytes,
/// fuzzing), so every decoder reports it through this type instead of
/// panicking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum KeyError {
    /// Fewer bytes remain than the field requires, or a string has no
    /// terminator before the buffer ends.
    #[error("unexpected end of input")]
    UnexpectedEndOfInput,

    /// The leading tag byte is not valid for the requested decode.
    #[error("unexpected type code: {0:#04x}")]
    UnexpectedTypeCode(u8),

    /// A decoded integer does not fit the range implied by its tag.
    #[error("value out of range")]
    ValueOutOfRange,

    /// A string payload is not valid UTF-8.
    #[error("invalid UTF-8 in string payload")]
    InvalidUtf8,

    /// A composite key has bytes left after its last expected field.
    #[error("{0} trailing bytes after last field")]
    TrailingBytes(usize),
}

/// Result alias used by every decoder in this crate.
pub type KeyResult<T> = Result<T, KeyError>;
