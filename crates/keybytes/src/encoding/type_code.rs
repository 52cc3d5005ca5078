//! Type codes for framed scalar fields.
//!
//! Every framed field starts with one tag byte naming the decoding rule for
//! the bytes that follow. The values are part of the wire format and must
//! never change. Gaps between codes are reserved for kinds not handled here
//! (other numeric widths, byte strings, nested tuples).
//!
//! The numeric order of the tags is significant:
//!
//! - `Null` is below every other code, so null sorts first in nullable fields.
//! - `NegativeInt64 < NegativeInt32 < IntZero < PositiveInt32 < PositiveInt64`,
//!   so byte-wise comparison agrees with numeric order across sign and width.
//! - `False < True`.

use serde::{Deserialize, Serialize};

use crate::error::KeyError;

/// One-byte tag identifying the kind of a framed field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum TypeCode {
    /// Absent value of a nullable kind.
    Null = 0x00,
    /// NUL-escaped, NUL-terminated byte string.
    Utf8String = 0x02,
    /// Negative integer needing 64 bits.
    NegativeInt64 = 0x0C,
    /// Negative 32-bit integer.
    NegativeInt32 = 0x0F,
    /// Integer zero, no payload.
    IntZero = 0x14,
    /// Positive 32-bit integer.
    PositiveInt32 = 0x19,
    /// Positive integer needing 64 bits.
    PositiveInt64 = 0x1C,
    /// IEEE-754 double, sign-transformed.
    Float64 = 0x21,
    /// Boolean false, no payload.
    False = 0x26,
    /// Boolean true, no payload.
    True = 0x27,
}

impl TypeCode {
    /// Returns the tag byte.
    #[inline]
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Looks up the type code for a tag byte.
    ///
    /// Returns `None` for reserved or unknown bytes.
    #[must_use]
    pub const fn from_u8(byte: u8) -> Option<Self> {
        match byte {
            0x00 => Some(Self::Null),
            0x02 => Some(Self::Utf8String),
            0x0C => Some(Self::NegativeInt64),
            0x0F => Some(Self::NegativeInt32),
            0x14 => Some(Self::IntZero),
            0x19 => Some(Self::PositiveInt32),
            0x1C => Some(Self::PositiveInt64),
            0x21 => Some(Self::Float64),
            0x26 => Some(Self::False),
            0x27 => Some(Self::True),
            _ => None,
        }
    }

    /// Returns true for the five integer shapes.
    #[must_use]
    pub const fn is_int(self) -> bool {
        matches!(
            self,
            Self::NegativeInt64
                | Self::NegativeInt32
                | Self::IntZero
                | Self::PositiveInt32
                | Self::PositiveInt64
        )
    }

    /// Number of payload bytes following the tag, or `None` when the payload
    /// is self-delimiting (strings).
    #[must_use]
    pub const fn payload_len(self) -> Option<usize> {
        match self {
            Self::Null | Self::IntZero | Self::False | Self::True => Some(0),
            Self::NegativeInt32 | Self::PositiveInt32 => Some(4),
            Self::NegativeInt64 | Self::PositiveInt64 | Self::Float64 => Some(8),
            Self::Utf8String => None,
        }
    }
}

impl From<TypeCode> for u8 {
    #[inline]
    fn from(code: TypeCode) -> Self {
        code.as_u8()
    }
}

impl TryFrom<u8> for TypeCode {
    type Error = KeyError;

    fn try_from(byte: u8) -> Result<Self, Self::Error> {
        Self::from_u8(byte).ok_or(KeyError::UnexpectedTypeCode(byte))
    }
}

/// Splits the leading tag byte off `b`.
///
/// The raw byte is returned so callers can report it in
/// [`KeyError::UnexpectedTypeCode`] even when it is not a known code.
#[inline]
pub(crate) fn split_tag(b: &[u8]) -> Result<(u8, &[u8]), KeyError> {
    b.split_first().map(|(tag, rest)| (*tag, rest)).ok_or(KeyError::UnexpectedEndOfInput)
}
