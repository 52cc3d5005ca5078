//! Tagged scalar codec.
//!
//! Each kind has an `append_*` function writing a [`TypeCode`] tag and
//! payload, and a `take_*` function reading them back from the front of a
//! byte slice. Nullable kinds map onto `Option<T>` and encode `None` as a
//! lone [`TypeCode::Null`] tag, which sorts below every non-null value.
//!
//! # Take contract
//!
//! Every `take_*` returns `Ok((value, rest))` where `rest` is the strict
//! suffix of the input after the consumed field. On error nothing is
//! consumed: the caller still holds the original slice and may try another
//! decoder against it.
//!
//! # Example
//!
//! ```
//! use keybytes::encoding::scalar::{append_nullable_i32, append_string, take_nullable_i32, take_string};
//!
//! let mut key = Vec::new();
//! append_string(&mut key, "user");
//! append_nullable_i32(&mut key, Some(-7));
//!
//! let (name, rest) = take_string(&key).unwrap();
//! let (id, rest) = take_nullable_i32(rest).unwrap();
//! assert_eq!(name, "user");
//! assert_eq!(id, Some(-7));
//! assert!(rest.is_empty());
//! ```

use super::escape::{escape_into, unescape};
use super::numeric::{f64_from_sortable, f64_to_sortable, SignedWidth};
use super::type_code::{split_tag, TypeCode};
use crate::error::{KeyError, KeyResult};

// ============================================================================
// Shared framing
// ============================================================================

/// Strips the tag from `b` if it is exactly `code`.
fn expect_tag(b: &[u8], code: TypeCode) -> KeyResult<&[u8]> {
    let (tag, rest) = split_tag(b)?;
    if tag == code.as_u8() {
        Ok(rest)
    } else {
        Err(KeyError::UnexpectedTypeCode(tag))
    }
}

/// Runs `take` unless `b` starts with a null tag.
fn take_nullable<'a, T>(
    b: &'a [u8],
    take: impl FnOnce(&'a [u8]) -> KeyResult<(T, &'a [u8])>,
) -> KeyResult<(Option<T>, &'a [u8])> {
    let (tag, rest) = split_tag(b)?;
    if tag == TypeCode::Null.as_u8() {
        return Ok((None, rest));
    }
    let (value, rest) = take(b)?;
    Ok((Some(value), rest))
}

/// Appends a null tag.
#[inline]
pub fn append_null(dst: &mut Vec<u8>) {
    dst.push(TypeCode::Null.as_u8());
}

// ============================================================================
// Strings
// ============================================================================

/// Appends a string field.
///
/// The string may contain NUL characters; they are escaped so the field
/// stays self-delimiting and order-preserving.
pub fn append_string(dst: &mut Vec<u8>, value: &str) {
    append_byte_string(dst, value.as_bytes());
}

/// Appends a byte string under the [`TypeCode::Utf8String`] tag.
///
/// The wire form is identical to [`append_string`]; use this when the key
/// component is text-like but not guaranteed to be UTF-8.
pub fn append_byte_string(dst: &mut Vec<u8>, value: &[u8]) {
    dst.push(TypeCode::Utf8String.as_u8());
    escape_into(dst, value);
}

/// Appends a nullable string field.
pub fn append_nullable_string(dst: &mut Vec<u8>, value: Option<&str>) {
    match value {
        Some(s) => append_string(dst, s),
        None => append_null(dst),
    }
}

/// Takes a string field from the front of `b`.
///
/// # Errors
///
/// - [`KeyError::UnexpectedEndOfInput`] if `b` is empty or has no terminator
/// - [`KeyError::UnexpectedTypeCode`] if the tag is not a string tag
/// - [`KeyError::InvalidUtf8`] if the payload is not UTF-8
pub fn take_string(b: &[u8]) -> KeyResult<(String, &[u8])> {
    let rest = expect_tag(b, TypeCode::Utf8String)?;
    let (bytes, rest) = unescape(rest)?;
    let value = String::from_utf8(bytes.into_owned()).map_err(|_| KeyError::InvalidUtf8)?;
    Ok((value, rest))
}

/// Takes a string field as raw bytes, without a UTF-8 check.
///
/// # Errors
///
/// Same as [`take_string`], minus [`KeyError::InvalidUtf8`].
pub fn take_byte_string(b: &[u8]) -> KeyResult<(Vec<u8>, &[u8])> {
    let rest = expect_tag(b, TypeCode::Utf8String)?;
    let (bytes, rest) = unescape(rest)?;
    Ok((bytes.into_owned(), rest))
}

/// Takes a nullable string field.
///
/// # Errors
///
/// Same as [`take_string`].
pub fn take_nullable_string(b: &[u8]) -> KeyResult<(Option<String>, &[u8])> {
    take_nullable(b, take_string)
}

// ============================================================================
// Integers
// ============================================================================

fn append_int<T: SignedWidth>(dst: &mut Vec<u8>, value: T) {
    if value.is_zero() {
        dst.push(TypeCode::IntZero.as_u8());
        return;
    }
    let (code, word) = value.to_word();
    dst.push(code.as_u8());
    T::write_word(word, dst);
}

fn take_int<T: SignedWidth>(b: &[u8]) -> KeyResult<(T, &[u8])> {
    let (tag, rest) = split_tag(b)?;
    let code = TypeCode::from_u8(tag).ok_or(KeyError::UnexpectedTypeCode(tag))?;
    if code == TypeCode::IntZero {
        return Ok((T::ZERO, rest));
    }
    if code != T::NEGATIVE && code != T::POSITIVE {
        return Err(KeyError::UnexpectedTypeCode(tag));
    }
    let (word, rest) = T::read_word(rest).ok_or(KeyError::UnexpectedEndOfInput)?;
    Ok((T::from_word(code, word)?, rest))
}

/// Appends a 32-bit integer field.
///
/// Zero is a lone [`TypeCode::IntZero`] tag; other values take one tag byte
/// plus four payload bytes.
pub fn append_i32(dst: &mut Vec<u8>, value: i32) {
    append_int(dst, value);
}

/// Appends a nullable 32-bit integer field.
pub fn append_nullable_i32(dst: &mut Vec<u8>, value: Option<i32>) {
    match value {
        Some(v) => append_i32(dst, v),
        None => append_null(dst),
    }
}

/// Takes a 32-bit integer field.
///
/// Only the zero tag and the 32-bit tags are accepted.
///
/// # Errors
///
/// - [`KeyError::UnexpectedEndOfInput`] on a missing tag or short payload
/// - [`KeyError::UnexpectedTypeCode`] on any other tag, including 64-bit tags
/// - [`KeyError::ValueOutOfRange`] if the payload does not fit `i32`
pub fn take_i32(b: &[u8]) -> KeyResult<(i32, &[u8])> {
    take_int(b)
}

/// Takes a nullable 32-bit integer field.
///
/// # Errors
///
/// Same as [`take_i32`].
pub fn take_nullable_i32(b: &[u8]) -> KeyResult<(Option<i32>, &[u8])> {
    take_nullable(b, take_i32)
}

/// Appends a 64-bit integer field.
pub fn append_i64(dst: &mut Vec<u8>, value: i64) {
    append_int(dst, value);
}

/// Appends a nullable 64-bit integer field.
pub fn append_nullable_i64(dst: &mut Vec<u8>, value: Option<i64>) {
    match value {
        Some(v) => append_i64(dst, v),
        None => append_null(dst),
    }
}

/// Takes a 64-bit integer field.
///
/// # Errors
///
/// As [`take_i32`], for the 64-bit tags.
pub fn take_i64(b: &[u8]) -> KeyResult<(i64, &[u8])> {
    take_int(b)
}

/// Takes a nullable 64-bit integer field.
///
/// # Errors
///
/// Same as [`take_i64`].
pub fn take_nullable_i64(b: &[u8]) -> KeyResult<(Option<i64>, &[u8])> {
    take_nullable(b, take_i64)
}

// ============================================================================
// Doubles
// ============================================================================

/// Appends a double field: the [`TypeCode::Float64`] tag and eight bytes.
///
/// NaN is accepted and sorts above `+Inf`.
pub fn append_f64(dst: &mut Vec<u8>, value: f64) {
    dst.push(TypeCode::Float64.as_u8());
    dst.extend_from_slice(&f64_to_sortable(value).to_be_bytes());
}

/// Appends a nullable double field.
pub fn append_nullable_f64(dst: &mut Vec<u8>, value: Option<f64>) {
    match value {
        Some(v) => append_f64(dst, v),
        None => append_null(dst),
    }
}

/// Takes a double field. The decoded value has the exact bit pattern that
/// was encoded, including NaN payloads and the sign of zero.
///
/// # Errors
///
/// - [`KeyError::UnexpectedEndOfInput`] on a missing tag or short payload
/// - [`KeyError::UnexpectedTypeCode`] on any tag but [`TypeCode::Float64`]
pub fn take_f64(b: &[u8]) -> KeyResult<(f64, &[u8])> {
    let rest = expect_tag(b, TypeCode::Float64)?;
    let (word, rest) = rest.split_first_chunk::<8>().ok_or(KeyError::UnexpectedEndOfInput)?;
    Ok((f64_from_sortable(u64::from_be_bytes(*word)), rest))
}

/// Takes a nullable double field.
///
/// # Errors
///
/// Same as [`take_f64`].
pub fn take_nullable_f64(b: &[u8]) -> KeyResult<(Option<f64>, &[u8])> {
    take_nullable(b, take_f64)
}

// ============================================================================
// Booleans
// ============================================================================

/// Appends a boolean field. The tag is the whole encoding.
pub fn append_bool(dst: &mut Vec<u8>, value: bool) {
    let code = if value { TypeCode::True } else { TypeCode::False };
    dst.push(code.as_u8());
}

/// Appends a nullable boolean field.
pub fn append_nullable_bool(dst: &mut Vec<u8>, value: Option<bool>) {
    match value {
        Some(v) => append_bool(dst, v),
        None => append_null(dst),
    }
}

/// Takes a boolean field.
///
/// # Errors
///
/// - [`KeyError::UnexpectedEndOfInput`] if `b` is empty
/// - [`KeyError::UnexpectedTypeCode`] on any tag but `False`/`True`
pub fn take_bool(b: &[u8]) -> KeyResult<(bool, &[u8])> {
    let (tag, rest) = split_tag(b)?;
    match TypeCode::from_u8(tag) {
        Some(TypeCode::False) => Ok((false, rest)),
        Some(TypeCode::True) => Ok((true, rest)),
        _ => Err(KeyError::UnexpectedTypeCode(tag)),
    }
}

/// Takes a nullable boolean field.
///
/// # Errors
///
/// Same as [`take_bool`].
pub fn take_nullable_bool(b: &[u8]) -> KeyResult<(Option<bool>, &[u8])> {
    take_nullable(b, take_bool)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn encoded<T: Copy>(append: fn(&mut Vec<u8>, T), value: T) -> Vec<u8> {
        let mut buf = Vec::new();
        append(&mut buf, value);
        buf
    }

    fn assert_ascending<T: Copy + std::fmt::Debug>(append: fn(&mut Vec<u8>, T), values: &[T]) {
        for pair in values.windows(2) {
            let a = encoded(append, pair[0]);
            let b = encoded(append, pair[1]);
            assert!(a < b, "{:?} should sort before {:?}: {a:02x?} vs {b:02x?}", pair[0], pair[1]);
        }
    }

    // ========================================================================
    // Strings
    // ========================================================================

    #[test]
    fn string_wire_form() {
        let mut buf = Vec::new();
        append_string(&mut buf, "a\0b");
        assert_eq!(buf, [0x02, b'a', 0x00, 0xFF, b'b', 0x00]);
    }

    #[test]
    fn string_roundtrip() {
        for s in ["", "foo", "F\u{d4}O\0bar", "\0foo", "foo\0", "f\0\0oo", "\0", "\0\0", "\u{ff}"] {
            let mut buf = Vec::new();
            append_string(&mut buf, s);
            let (value, rest) = take_string(&buf).unwrap();
            assert_eq!(value, s);
            assert!(rest.is_empty());
        }
    }

    #[test]
    fn byte_string_roundtrip_non_utf8() {
        let cases: [&[u8]; 4] = [b"\xff", b"\xff\xff", b"\x00\xff", b"\x00\x00\xff\xff"];
        for b in cases {
            let mut buf = Vec::new();
            append_byte_string(&mut buf, b);
            let (value, rest) = take_byte_string(&buf).unwrap();
            assert_eq!(value, b);
            assert!(rest.is_empty());
            // Not text, so the UTF-8 decoder must refuse it.
            if std::str::from_utf8(b).is_err() {
                assert_eq!(take_string(&buf), Err(KeyError::InvalidUtf8));
            }
        }
    }

    #[test]
    fn string_order() {
        let ordered = ["", "\0", "a", "a\0", "bar", "bb"];
        for pair in ordered.windows(2) {
            let mut a = Vec::new();
            let mut b = Vec::new();
            append_string(&mut a, pair[0]);
            append_string(&mut b, pair[1]);
            assert!(a < b, "{:?} should sort before {:?}", pair[0], pair[1]);
        }
    }

    #[test]
    fn string_invalid_inputs() {
        assert_eq!(take_string(b"\x02"), Err(KeyError::UnexpectedEndOfInput));
        assert_eq!(take_string(b"\x02foo"), Err(KeyError::UnexpectedEndOfInput));
        assert_eq!(take_string(b"\x02\x00\xffa"), Err(KeyError::UnexpectedEndOfInput));
        assert_eq!(take_string(b""), Err(KeyError::UnexpectedEndOfInput));
        assert_eq!(take_string(b"\x00"), Err(KeyError::UnexpectedTypeCode(0x00)));
        assert_eq!(take_nullable_string(b"\x14"), Err(KeyError::UnexpectedTypeCode(0x14)));
    }

    #[test]
    fn nullable_string() {
        let mut buf = Vec::new();
        append_nullable_string(&mut buf, None);
        append_nullable_string(&mut buf, Some(""));
        assert_eq!(buf, [0x00, 0x02, 0x00]);

        let (first, rest) = take_nullable_string(&buf).unwrap();
        let (second, rest) = take_nullable_string(rest).unwrap();
        assert_eq!(first, None);
        assert_eq!(second, Some(String::new()));
        assert!(rest.is_empty());

        let none = encoded(append_nullable_string, None);
        let empty = encoded(append_nullable_string, Some(""));
        let a = encoded(append_nullable_string, Some("a"));
        assert!(none < empty && empty < a);
    }

    // ========================================================================
    // Integers
    // ========================================================================

    #[test]
    fn i32_wire_form() {
        assert_eq!(encoded(append_i32, 0), [0x14]);
        assert_eq!(encoded(append_i32, 1), [0x19, 0, 0, 0, 1]);
        assert_eq!(encoded(append_i32, -1), [0x0F, 0xFF, 0xFF, 0xFF, 0xFE]);
        assert_eq!(encoded(append_i32, i32::MIN), [0x0F, 0x7F, 0xFF, 0xFF, 0xFF]);
    }

    #[test]
    fn i32_order() {
        assert_ascending(append_i32, &[i32::MIN, i32::MIN + 1, -2, -1, 0, 1, 2, i32::MAX - 1, i32::MAX]);
        assert_ascending(append_nullable_i32, &[None, Some(i32::MIN), Some(-1), Some(0), Some(1)]);
    }

    #[test]
    fn i32_roundtrip() {
        for v in [i32::MIN, i32::MIN + 1, -2, -1, 0, 1, 2, i32::MAX - 1, i32::MAX] {
            let buf = encoded(append_i32, v);
            assert_eq!(take_i32(&buf).unwrap(), (v, &[][..]));
        }
        for v in [None, Some(0), Some(-5), Some(i32::MAX)] {
            let buf = encoded(append_nullable_i32, v);
            assert_eq!(take_nullable_i32(&buf).unwrap(), (v, &[][..]));
        }
    }

    #[test]
    fn i32_invalid_inputs() {
        assert_eq!(take_i32(&[]), Err(KeyError::UnexpectedEndOfInput));
        assert_eq!(take_i32(&[0x19, 0, 0, 1]), Err(KeyError::UnexpectedEndOfInput));
        assert_eq!(take_i32(&[0x0F]), Err(KeyError::UnexpectedEndOfInput));
        assert_eq!(take_i32(&[0x19, 0x80, 0, 0, 0]), Err(KeyError::ValueOutOfRange));
        assert_eq!(take_i32(&[0x0F, 0x7F, 0xFF, 0xFF, 0xFE]), Err(KeyError::ValueOutOfRange));
        assert_eq!(take_i32(&[0x1C, 0, 0, 0, 0, 0, 0, 0, 1]), Err(KeyError::UnexpectedTypeCode(0x1C)));
        assert_eq!(take_i32(&[0x00]), Err(KeyError::UnexpectedTypeCode(0x00)));
        assert_eq!(take_i32(&[0x01]), Err(KeyError::UnexpectedTypeCode(0x01)));
    }

    #[test]
    fn i64_wire_form() {
        assert_eq!(encoded(append_i64, 0), [0x14]);
        assert_eq!(encoded(append_i64, 1), [0x1C, 0, 0, 0, 0, 0, 0, 0, 1]);
        assert_eq!(encoded(append_i64, -1), [0x0C, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFE]);
    }

    #[test]
    fn i64_order() {
        assert_ascending(append_i64, &[i64::MIN, i64::MIN + 1, -2, -1, 0, 1, 2, i64::MAX - 1, i64::MAX]);
        assert_ascending(append_nullable_i64, &[None, Some(i64::MIN), Some(0), Some(i64::MAX)]);
    }

    #[test]
    fn i64_roundtrip() {
        for v in [i64::MIN, i64::MIN + 1, -2, -1, 0, 1, 2, i64::MAX - 1, i64::MAX] {
            let buf = encoded(append_i64, v);
            assert_eq!(take_i64(&buf).unwrap(), (v, &[][..]));
        }
    }

    #[test]
    fn i64_invalid_inputs() {
        assert_eq!(take_i64(&[0x1C, 0x80, 0, 0, 0, 0, 0, 0, 0]), Err(KeyError::ValueOutOfRange));
        assert_eq!(take_i64(&[0x0C, 0, 0, 0, 0, 0, 0, 0, 0]), Err(KeyError::ValueOutOfRange));
        assert_eq!(take_i64(&[0x1C, 0, 0, 0]), Err(KeyError::UnexpectedEndOfInput));
        assert_eq!(take_i64(&[0x19, 0, 0, 0, 1]), Err(KeyError::UnexpectedTypeCode(0x19)));
        assert_eq!(take_nullable_i64(&[0x21]), Err(KeyError::UnexpectedTypeCode(0x21)));
    }

    #[test]
    fn zero_payload_under_sign_tag() {
        assert_eq!(take_i32(&[0x19, 0, 0, 0, 0]), Ok((0, &[][..])));
        assert_eq!(take_i32(&[0x0F, 0xFF, 0xFF, 0xFF, 0xFF]), Ok((0, &[][..])));
        assert_eq!(take_i64(&[0x0C, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF]), Ok((0, &[][..])));
        assert_eq!(take_i64(&[0x1C, 0, 0, 0, 0, 0, 0, 0, 0, 0x14]), Ok((0, &[0x14][..])));
    }

    // ========================================================================
    // Doubles
    // ========================================================================

    #[test]
    fn f64_one_and_a_half() {
        let buf = encoded(append_f64, 1.5);
        assert_eq!(buf.len(), 9);
        assert_eq!(buf[0], 0x21);
        let (value, rest) = take_f64(&buf).unwrap();
        assert_eq!(value.to_bits(), 1.5f64.to_bits());
        assert!(rest.is_empty());
    }

    #[test]
    fn f64_order() {
        assert_ascending(
            append_f64,
            &[
                f64::NEG_INFINITY,
                f64::MIN,
                -2.0,
                -1.0,
                -0.0,
                0.0,
                1.0,
                2.0,
                f64::MAX,
                f64::INFINITY,
                f64::NAN,
            ],
        );
        assert_ascending(append_nullable_f64, &[None, Some(f64::NEG_INFINITY), Some(0.0)]);
    }

    #[test]
    fn f64_roundtrip_bits() {
        let values = [
            f64::NAN,
            f64::INFINITY,
            f64::MIN,
            -1.5,
            -0.1,
            -5e-324,
            -0.0,
            0.0,
            5e-324,
            0.1,
            1.5,
            f64::MAX,
            f64::NEG_INFINITY,
        ];
        for v in values {
            let buf = encoded(append_f64, v);
            let (decoded, rest) = take_f64(&buf).unwrap();
            assert_eq!(decoded.to_bits(), v.to_bits(), "for {v}");
            assert!(rest.is_empty());
        }
        let (none, _) = take_nullable_f64(&encoded(append_nullable_f64, None)).unwrap();
        assert!(none.is_none());
    }

    #[test]
    fn f64_invalid_inputs() {
        assert_eq!(take_f64(&[0x21, 0, 0]), Err(KeyError::UnexpectedEndOfInput));
        assert_eq!(take_f64(&[0x14]), Err(KeyError::UnexpectedTypeCode(0x14)));
        assert_eq!(take_nullable_f64(&[]), Err(KeyError::UnexpectedEndOfInput));
    }

    // ========================================================================
    // Booleans
    // ========================================================================

    #[test]
    fn bool_wire_form_and_order() {
        assert_eq!(encoded(append_bool, false), [0x26]);
        assert_eq!(encoded(append_bool, true), [0x27]);
        assert_ascending(append_nullable_bool, &[None, Some(false), Some(true)]);
    }

    #[test]
    fn bool_roundtrip() {
        for v in [None, Some(false), Some(true)] {
            let buf = encoded(append_nullable_bool, v);
            assert_eq!(take_nullable_bool(&buf).unwrap(), (v, &[][..]));
        }
    }

    #[test]
    fn bool_invalid_inputs() {
        assert_eq!(take_bool(&[0xFF]), Err(KeyError::UnexpectedTypeCode(0xFF)));
        assert_eq!(take_nullable_bool(b"\x02"), Err(KeyError::UnexpectedTypeCode(0x02)));
        assert_eq!(take_bool(&[]), Err(KeyError::UnexpectedEndOfInput));
    }

    // ========================================================================
    // Composite keys
    // ========================================================================

    #[test]
    fn composite_roundtrip() {
        let cases = [
            (None, None, None, None),
            (Some("foo"), Some(1234), Some(5678i64), Some(2.3)),
        ];
        for (a, b, c, d) in cases {
            let mut buf = Vec::new();
            append_nullable_string(&mut buf, a);
            append_nullable_i32(&mut buf, b);
            append_nullable_i64(&mut buf, c);
            append_nullable_f64(&mut buf, d);

            let (a2, rest) = take_nullable_string(&buf).unwrap();
            let (b2, rest) = take_nullable_i32(rest).unwrap();
            let (c2, rest) = take_nullable_i64(rest).unwrap();
            let (d2, rest) = take_nullable_f64(rest).unwrap();
            assert_eq!(a2.as_deref(), a);
            assert_eq!(b2, b);
            assert_eq!(c2, c);
            assert_eq!(d2.map(f64::to_bits), d.map(f64::to_bits));
            assert!(rest.is_empty());
        }
    }

    #[test]
    fn composite_null_then_int_order() {
        let key = |v: i32| {
            let mut buf = Vec::new();
            append_nullable_i32(&mut buf, None);
            append_nullable_i32(&mut buf, Some(v));
            buf
        };
        assert!(key(-2) < key(-1));
    }
}
