//! Order-preserving bit transforms for integers and doubles.
//!
//! ## Integers
//!
//! Zero has its own payload-free tag. A positive value is stored as its
//! big-endian magnitude. A negative value is stored as the big-endian
//! encoding of `MAX_UNSIGNED - |v|`, so the more negative the value the
//! smaller the stored word. Tags keep the three classes apart:
//! negative tags sort below [`TypeCode::IntZero`], positive tags above it.
//!
//! ## Doubles
//!
//! The IEEE-754 bit pattern is transformed so unsigned comparison matches
//! numeric comparison:
//!
//! - sign bit clear (`+0`, positives, `+Inf`, positive NaN): set the sign bit
//! - sign bit set (`-0`, negatives, `-Inf`): invert all 64 bits
//!
//! The resulting order is `-Inf < negatives < -0 < +0 < positives < +Inf < NaN`
//! for NaN patterns with a clear sign bit. Distinct NaN payloads keep their
//! bits and therefore compare unequal to each other.

use super::type_code::TypeCode;
use crate::error::KeyError;

/// Sign bit of an IEEE-754 double.
const F64_SIGN: u64 = 0x8000_0000_0000_0000;

/// Width-specific split of a non-zero integer into tag and payload word.
pub(crate) trait SignedWidth: Copy {
    /// Unsigned word of the same width.
    type Word: Copy;

    const ZERO: Self;
    const NEGATIVE: TypeCode;
    const POSITIVE: TypeCode;

    fn is_zero(self) -> bool;

    /// Appends a payload word big-endian.
    fn write_word(word: Self::Word, dst: &mut Vec<u8>);

    /// Reads a big-endian payload word, or `None` if `b` is too short.
    fn read_word(b: &[u8]) -> Option<(Self::Word, &[u8])>;

    /// Tag and payload word for a non-zero value.
    fn to_word(self) -> (TypeCode, Self::Word);

    /// Reverses [`SignedWidth::to_word`], checking the magnitude against the
    /// signed range of the width.
    fn from_word(code: TypeCode, word: Self::Word) -> Result<Self, KeyError>;
}

impl SignedWidth for i32 {
    type Word = u32;

    const ZERO: Self = 0;
    const NEGATIVE: TypeCode = TypeCode::NegativeInt32;
    const POSITIVE: TypeCode = TypeCode::PositiveInt32;

    #[inline]
    fn is_zero(self) -> bool {
        self == 0
    }

    #[inline]
    fn write_word(word: u32, dst: &mut Vec<u8>) {
        dst.extend_from_slice(&word.to_be_bytes());
    }

    #[inline]
    fn read_word(b: &[u8]) -> Option<(u32, &[u8])> {
        let (word, rest) = b.split_first_chunk::<4>()?;
        Some((u32::from_be_bytes(*word), rest))
    }

    #[inline]
    fn to_word(self) -> (TypeCode, u32) {
        if self > 0 {
            (Self::POSITIVE, self.unsigned_abs())
        } else {
            (Self::NEGATIVE, u32::MAX - self.unsigned_abs())
        }
    }

    fn from_word(code: TypeCode, word: u32) -> Result<Self, KeyError> {
        let value = match code {
            TypeCode::PositiveInt32 => i64::from(word),
            TypeCode::NegativeInt32 => -i64::from(u32::MAX - word),
            _ => return Err(KeyError::UnexpectedTypeCode(code.as_u8())),
        };
        i32::try_from(value).map_err(|_| KeyError::ValueOutOfRange)
    }
}

impl SignedWidth for i64 {
    type Word = u64;

    const ZERO: Self = 0;
    const NEGATIVE: TypeCode = TypeCode::NegativeInt64;
    const POSITIVE: TypeCode = TypeCode::PositiveInt64;

    #[inline]
    fn is_zero(self) -> bool {
        self == 0
    }

    #[inline]
    fn write_word(word: u64, dst: &mut Vec<u8>) {
        dst.extend_from_slice(&word.to_be_bytes());
    }

    #[inline]
    fn read_word(b: &[u8]) -> Option<(u64, &[u8])> {
        let (word, rest) = b.split_first_chunk::<8>()?;
        Some((u64::from_be_bytes(*word), rest))
    }

    #[inline]
    fn to_word(self) -> (TypeCode, u64) {
        if self > 0 {
            (Self::POSITIVE, self.unsigned_abs())
        } else {
            (Self::NEGATIVE, u64::MAX - self.unsigned_abs())
        }
    }

    fn from_word(code: TypeCode, word: u64) -> Result<Self, KeyError> {
        let value = match code {
            TypeCode::PositiveInt64 => i128::from(word),
            TypeCode::NegativeInt64 => -i128::from(u64::MAX - word),
            _ => return Err(KeyError::UnexpectedTypeCode(code.as_u8())),
        };
        i64::try_from(value).map_err(|_| KeyError::ValueOutOfRange)
    }
}

/// Transforms a double's bit pattern into its order-preserving form.
#[inline]
#[must_use]
pub fn f64_to_sortable(value: f64) -> u64 {
    let bits = value.to_bits();
    if bits & F64_SIGN == 0 {
        bits ^ F64_SIGN
    } else {
        !bits
    }
}

/// Reverses [`f64_to_sortable`]. Every 64-bit word maps back to a double,
/// so this never fails.
#[inline]
#[must_use]
pub fn f64_from_sortable(word: u64) -> f64 {
    let bits = if word & F64_SIGN != 0 { word ^ F64_SIGN } else { !word };
    f64::from_bits(bits)
}
