//! Untagged fixed-width helpers for composite keys.
//!
//! These write no type code: the reader must already know each field's kind
//! and width from its position in the key. Unsigned integers are stored
//! big-endian. The `_desc` variants store the bitwise complement so that a
//! field sorts in descending order under the same byte-wise comparator.
//!
//! # Panics
//!
//! The `take_*` functions here treat a short buffer as a caller bug, not as
//! malformed input, and panic on it. Validate lengths first (or use the
//! tagged codec in [`scalar`](super::scalar)) when reading untrusted bytes.
//!
//! ```
//! use keybytes::encoding::fixed::{append_u32, append_u64_desc, take_u32, take_u64_desc};
//!
//! let mut key = Vec::new();
//! append_u32(&mut key, 7);
//! append_u64_desc(&mut key, 1_700_000_000);
//!
//! let (shard, rest) = take_u32(&key);
//! let (ts, rest) = take_u64_desc(rest);
//! assert_eq!((shard, ts), (7, 1_700_000_000));
//! assert!(rest.is_empty());
//! ```

const NUL: u8 = 0x00;

fn split_array<const N: usize>(b: &[u8]) -> ([u8; N], &[u8]) {
    assert!(b.len() >= N, "fixed-width take needs {N} bytes, got {}", b.len());
    let (head, rest) = b.split_at(N);
    let mut out = [0u8; N];
    out.copy_from_slice(head);
    (out, rest)
}

// ============================================================================
// Byte spans
// ============================================================================

/// Appends `value` verbatim.
#[inline]
pub fn append_bytes(dst: &mut Vec<u8>, value: &[u8]) {
    dst.extend_from_slice(value);
}

/// Takes the first `n` bytes of `b`.
///
/// # Panics
///
/// Panics if `b` is shorter than `n`.
#[inline]
#[must_use]
pub fn take_bytes(b: &[u8], n: usize) -> (&[u8], &[u8]) {
    assert!(b.len() >= n, "take_bytes needs {n} bytes, got {}", b.len());
    b.split_at(n)
}

/// Appends the complement of every byte in `value`.
pub fn append_bytes_desc(dst: &mut Vec<u8>, value: &[u8]) {
    dst.extend(value.iter().map(|b| !b));
}

/// Takes `n` complemented bytes and restores them.
///
/// # Panics
///
/// Panics if `b` is shorter than `n`.
#[must_use]
pub fn take_bytes_desc(b: &[u8], n: usize) -> (Vec<u8>, &[u8]) {
    let (head, rest) = take_bytes(b, n);
    (head.iter().map(|b| !b).collect(), rest)
}

// ============================================================================
// Single bytes
// ============================================================================

/// Appends one byte.
#[inline]
pub fn append_u8(dst: &mut Vec<u8>, value: u8) {
    dst.push(value);
}

/// Takes one byte.
///
/// # Panics
///
/// Panics if `b` is empty.
#[inline]
#[must_use]
pub fn take_u8(b: &[u8]) -> (u8, &[u8]) {
    let ([value], rest) = split_array::<1>(b);
    (value, rest)
}

/// Appends one byte in descending order.
#[inline]
pub fn append_u8_desc(dst: &mut Vec<u8>, value: u8) {
    dst.push(!value);
}

/// Takes one descending byte.
///
/// # Panics
///
/// Panics if `b` is empty.
#[inline]
#[must_use]
pub fn take_u8_desc(b: &[u8]) -> (u8, &[u8]) {
    let (value, rest) = take_u8(b);
    (!value, rest)
}

// ============================================================================
// Unsigned integers
// ============================================================================

/// Appends a big-endian `u16`.
#[inline]
pub fn append_u16(dst: &mut Vec<u8>, value: u16) {
    dst.extend_from_slice(&value.to_be_bytes());
}

/// Takes a big-endian `u16`.
///
/// # Panics
///
/// Panics if `b` is shorter than two bytes.
#[inline]
#[must_use]
pub fn take_u16(b: &[u8]) -> (u16, &[u8]) {
    let (word, rest) = split_array(b);
    (u16::from_be_bytes(word), rest)
}

/// Appends a `u16` in descending order.
#[inline]
pub fn append_u16_desc(dst: &mut Vec<u8>, value: u16) {
    append_u16(dst, !value);
}

/// Takes a descending `u16`.
///
/// # Panics
///
/// Panics if `b` is shorter than two bytes.
#[inline]
#[must_use]
pub fn take_u16_desc(b: &[u8]) -> (u16, &[u8]) {
    let (value, rest) = take_u16(b);
    (!value, rest)
}

/// Appends a big-endian `u32`.
#[inline]
pub fn append_u32(dst: &mut Vec<u8>, value: u32) {
    dst.extend_from_slice(&value.to_be_bytes());
}

/// Takes a big-endian `u32`.
///
/// # Panics
///
/// Panics if `b` is shorter than four bytes.
#[inline]
#[must_use]
pub fn take_u32(b: &[u8]) -> (u32, &[u8]) {
    let (word, rest) = split_array(b);
    (u32::from_be_bytes(word), rest)
}

/// Appends a `u32` in descending order.
#[inline]
pub fn append_u32_desc(dst: &mut Vec<u8>, value: u32) {
    append_u32(dst, !value);
}

/// Takes a descending `u32`.
///
/// # Panics
///
/// Panics if `b` is shorter than four bytes.
#[inline]
#[must_use]
pub fn take_u32_desc(b: &[u8]) -> (u32, &[u8]) {
    let (value, rest) = take_u32(b);
    (!value, rest)
}

/// Appends a big-endian `u64`.
#[inline]
pub fn append_u64(dst: &mut Vec<u8>, value: u64) {
    dst.extend_from_slice(&value.to_be_bytes());
}

/// Takes a big-endian `u64`.
///
/// # Panics
///
/// Panics if `b` is shorter than eight bytes.
#[inline]
#[must_use]
pub fn take_u64(b: &[u8]) -> (u64, &[u8]) {
    let (word, rest) = split_array(b);
    (u64::from_be_bytes(word), rest)
}

/// Appends a `u64` in descending order.
#[inline]
pub fn append_u64_desc(dst: &mut Vec<u8>, value: u64) {
    append_u64(dst, !value);
}

/// Takes a descending `u64`.
///
/// # Panics
///
/// Panics if `b` is shorter than eight bytes.
#[inline]
#[must_use]
pub fn take_u64_desc(b: &[u8]) -> (u64, &[u8]) {
    let (value, rest) = take_u64(b);
    (!value, rest)
}

// ============================================================================
// NUL-terminated strings
// ============================================================================

/// Appends `value` followed by a single `0x00`.
///
/// No escaping is done. `value` must not contain a NUL byte: an embedded
/// NUL silently truncates the value on read and corrupts every field after
/// it. Use [`append_string`](super::scalar::append_string) for values that
/// may contain NUL.
pub fn append_cstr(dst: &mut Vec<u8>, value: &[u8]) {
    debug_assert!(!value.contains(&NUL), "append_cstr value contains NUL");
    dst.extend_from_slice(value);
    dst.push(NUL);
}

/// Takes the bytes up to the first `0x00` and skips the terminator.
///
/// # Panics
///
/// Panics if `b` contains no `0x00`.
#[must_use]
pub fn take_cstr(b: &[u8]) -> (&[u8], &[u8]) {
    let Some(end) = b.iter().position(|&c| c == NUL) else {
        panic!("take_cstr input has no NUL terminator");
    };
    (&b[..end], &b[end + 1..])
}
