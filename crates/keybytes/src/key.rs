//! Composite key construction and parsing.
//!
//! [`KeyBuilder`] appends fields to an owned buffer in a fixed order and
//! [`KeyReader`] walks them back. A key's schema is the sequence of calls:
//! the reader must call the matching `take` method for each field the
//! builder wrote, in the same order.
//!
//! # Example
//!
//! ```
//! use keybytes::{KeyBuilder, KeyReader};
//!
//! let key = KeyBuilder::new()
//!     .string("orders")
//!     .nullable_i64(Some(42))
//!     .u64_desc(1_700_000_000)
//!     .build();
//!
//! let mut reader = KeyReader::new(&key);
//! assert_eq!(reader.string().unwrap(), "orders");
//! assert_eq!(reader.nullable_i64().unwrap(), Some(42));
//! assert_eq!(reader.u64_desc(), 1_700_000_000);
//! reader.finish().unwrap();
//! ```

use tracing::trace;

use crate::encoding::fixed;
use crate::encoding::scalar;
use crate::error::{KeyError, KeyResult};
use crate::types::Value;

// ============================================================================
// Builder
// ============================================================================

/// Owned buffer that composite keys are appended to.
///
/// Methods consume and return the builder so a key can be written as one
/// chained expression. The builder can be reused across keys with
/// [`KeyBuilder::clear`] to keep its allocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyBuilder {
    buf: Vec<u8>,
}

impl KeyBuilder {
    /// Creates an empty builder.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self { buf: Vec::new() }
    }

    /// Creates an empty builder with room for `capacity` bytes.
    #[inline]
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self { buf: Vec::with_capacity(capacity) }
    }

    /// Continues an existing key, e.g. a table prefix.
    #[inline]
    #[must_use]
    pub fn from_prefix(prefix: &[u8]) -> Self {
        Self { buf: prefix.to_vec() }
    }

    /// Appends a null field.
    #[must_use]
    pub fn null(mut self) -> Self {
        scalar::append_null(&mut self.buf);
        self
    }

    /// Appends a string field.
    #[must_use]
    pub fn string(mut self, value: &str) -> Self {
        scalar::append_string(&mut self.buf, value);
        self
    }

    /// Appends a byte string under the string tag.
    #[must_use]
    pub fn byte_string(mut self, value: &[u8]) -> Self {
        scalar::append_byte_string(&mut self.buf, value);
        self
    }

    /// Appends a nullable string field.
    #[must_use]
    pub fn nullable_string(mut self, value: Option<&str>) -> Self {
        scalar::append_nullable_string(&mut self.buf, value);
        self
    }

    /// Appends an `i32` field.
    #[must_use]
    pub fn i32(mut self, value: i32) -> Self {
        scalar::append_i32(&mut self.buf, value);
        self
    }

    /// Appends a nullable `i32` field.
    #[must_use]
    pub fn nullable_i32(mut self, value: Option<i32>) -> Self {
        scalar::append_nullable_i32(&mut self.buf, value);
        self
    }

    /// Appends an `i64` field.
    #[must_use]
    pub fn i64(mut self, value: i64) -> Self {
        scalar::append_i64(&mut self.buf, value);
        self
    }

    /// Appends a nullable `i64` field.
    #[must_use]
    pub fn nullable_i64(mut self, value: Option<i64>) -> Self {
        scalar::append_nullable_i64(&mut self.buf, value);
        self
    }

    /// Appends an `f64` field.
    #[must_use]
    pub fn f64(mut self, value: f64) -> Self {
        scalar::append_f64(&mut self.buf, value);
        self
    }

    /// Appends a nullable `f64` field.
    #[must_use]
    pub fn nullable_f64(mut self, value: Option<f64>) -> Self {
        scalar::append_nullable_f64(&mut self.buf, value);
        self
    }

    /// Appends a `bool` field.
    #[must_use]
    pub fn bool(mut self, value: bool) -> Self {
        scalar::append_bool(&mut self.buf, value);
        self
    }

    /// Appends a nullable `bool` field.
    #[must_use]
    pub fn nullable_bool(mut self, value: Option<bool>) -> Self {
        scalar::append_nullable_bool(&mut self.buf, value);
        self
    }

    /// Appends a dynamically typed field.
    #[must_use]
    pub fn value(mut self, value: &Value) -> Self {
        value.append(&mut self.buf);
        self
    }

    /// Appends raw bytes with no framing.
    #[must_use]
    pub fn raw(mut self, value: &[u8]) -> Self {
        fixed::append_bytes(&mut self.buf, value);
        self
    }

    /// Appends raw bytes in descending order.
    #[must_use]
    pub fn raw_desc(mut self, value: &[u8]) -> Self {
        fixed::append_bytes_desc(&mut self.buf, value);
        self
    }

    /// Appends one untagged byte.
    #[must_use]
    pub fn u8(mut self, value: u8) -> Self {
        fixed::append_u8(&mut self.buf, value);
        self
    }

    /// Appends one untagged byte in descending order.
    #[must_use]
    pub fn u8_desc(mut self, value: u8) -> Self {
        fixed::append_u8_desc(&mut self.buf, value);
        self
    }

    /// Appends an untagged big-endian `u16`.
    #[must_use]
    pub fn u16(mut self, value: u16) -> Self {
        fixed::append_u16(&mut self.buf, value);
        self
    }

    /// Appends an untagged `u16` in descending order.
    #[must_use]
    pub fn u16_desc(mut self, value: u16) -> Self {
        fixed::append_u16_desc(&mut self.buf, value);
        self
    }

    /// Appends an untagged big-endian `u32`.
    #[must_use]
    pub fn u32(mut self, value: u32) -> Self {
        fixed::append_u32(&mut self.buf, value);
        self
    }

    /// Appends an untagged `u32` in descending order.
    #[must_use]
    pub fn u32_desc(mut self, value: u32) -> Self {
        fixed::append_u32_desc(&mut self.buf, value);
        self
    }

    /// Appends an untagged big-endian `u64`.
    #[must_use]
    pub fn u64(mut self, value: u64) -> Self {
        fixed::append_u64(&mut self.buf, value);
        self
    }

    /// Appends an untagged `u64` in descending order.
    #[must_use]
    pub fn u64_desc(mut self, value: u64) -> Self {
        fixed::append_u64_desc(&mut self.buf, value);
        self
    }

    /// Appends a NUL-terminated value that must not contain NUL.
    #[must_use]
    pub fn cstr(mut self, value: &[u8]) -> Self {
        fixed::append_cstr(&mut self.buf, value);
        self
    }

    /// Returns the key written so far.
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Number of bytes written so far.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Returns true if nothing has been written.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Empties the buffer, keeping its capacity.
    pub fn clear(&mut self) {
        self.buf.clear();
    }

    /// Finishes the key.
    #[inline]
    #[must_use]
    pub fn build(self) -> Vec<u8> {
        self.buf
    }
}

impl AsRef<[u8]> for KeyBuilder {
    fn as_ref(&self) -> &[u8] {
        &self.buf
    }
}

impl From<KeyBuilder> for Vec<u8> {
    fn from(builder: KeyBuilder) -> Self {
        builder.buf
    }
}

// ============================================================================
// Reader
// ============================================================================

/// Cursor over a composite key.
///
/// Every tagged read either succeeds and advances past the field, or fails
/// and leaves the cursor where it was. After an error the same field can be
/// retried with a different decoder:
///
/// ```
/// use keybytes::{KeyBuilder, KeyReader, KeyError};
///
/// let key = KeyBuilder::new().i64(1 << 40).build();
/// let mut reader = KeyReader::new(&key);
///
/// assert_eq!(reader.i32(), Err(KeyError::UnexpectedTypeCode(0x1C)));
/// assert_eq!(reader.offset(), 0);
/// assert_eq!(reader.i64(), Ok(1 << 40));
/// ```
///
/// The untagged fixed-width reads follow the [`fixed`] contract and panic
/// when the key is too short.
#[derive(Debug, Clone, Copy)]
pub struct KeyReader<'a> {
    key: &'a [u8],
    rest: &'a [u8],
}

impl<'a> KeyReader<'a> {
    /// Starts reading at the front of `key`.
    #[inline]
    #[must_use]
    pub const fn new(key: &'a [u8]) -> Self {
        Self { key, rest: key }
    }

    /// Bytes not yet consumed.
    #[inline]
    #[must_use]
    pub const fn remaining(&self) -> &'a [u8] {
        self.rest
    }

    /// Returns true once every byte has been consumed.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.rest.is_empty()
    }

    /// Number of bytes consumed so far.
    #[inline]
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.key.len() - self.rest.len()
    }

    /// Checks that the whole key was consumed.
    ///
    /// # Errors
    ///
    /// Returns [`KeyError::TrailingBytes`] if bytes remain.
    pub fn finish(self) -> KeyResult<()> {
        if self.rest.is_empty() {
            Ok(())
        } else {
            Err(KeyError::TrailingBytes(self.rest.len()))
        }
    }

    /// Runs a tagged decoder and advances only if it succeeds.
    fn step<T>(&mut self, take: fn(&'a [u8]) -> KeyResult<(T, &'a [u8])>) -> KeyResult<T> {
        match take(self.rest) {
            Ok((value, rest)) => {
                self.rest = rest;
                Ok(value)
            }
            Err(err) => {
                trace!(offset = self.offset(), %err, "key field decode failed");
                Err(err)
            }
        }
    }

    /// Reads a string field.
    ///
    /// # Errors
    ///
    /// See [`scalar::take_string`].
    pub fn string(&mut self) -> KeyResult<String> {
        self.step(scalar::take_string)
    }

    /// Reads a string field as raw bytes.
    ///
    /// # Errors
    ///
    /// See [`scalar::take_byte_string`].
    pub fn byte_string(&mut self) -> KeyResult<Vec<u8>> {
        self.step(scalar::take_byte_string)
    }

    /// Reads a nullable string field.
    ///
    /// # Errors
    ///
    /// See [`scalar::take_nullable_string`].
    pub fn nullable_string(&mut self) -> KeyResult<Option<String>> {
        self.step(scalar::take_nullable_string)
    }

    /// Reads an `i32` field.
    ///
    /// # Errors
    ///
    /// See [`scalar::take_i32`].
    pub fn i32(&mut self) -> KeyResult<i32> {
        self.step(scalar::take_i32)
    }

    /// Reads a nullable `i32` field.
    ///
    /// # Errors
    ///
    /// See [`scalar::take_nullable_i32`].
    pub fn nullable_i32(&mut self) -> KeyResult<Option<i32>> {
        self.step(scalar::take_nullable_i32)
    }

    /// Reads an `i64` field.
    ///
    /// # Errors
    ///
    /// See [`scalar::take_i64`].
    pub fn i64(&mut self) -> KeyResult<i64> {
        self.step(scalar::take_i64)
    }

    /// Reads a nullable `i64` field.
    ///
    /// # Errors
    ///
    /// See [`scalar::take_nullable_i64`].
    pub fn nullable_i64(&mut self) -> KeyResult<Option<i64>> {
        self.step(scalar::take_nullable_i64)
    }

    /// Reads an `f64` field.
    ///
    /// # Errors
    ///
    /// See [`scalar::take_f64`].
    pub fn f64(&mut self) -> KeyResult<f64> {
        self.step(scalar::take_f64)
    }

    /// Reads a nullable `f64` field.
    ///
    /// # Errors
    ///
    /// See [`scalar::take_nullable_f64`].
    pub fn nullable_f64(&mut self) -> KeyResult<Option<f64>> {
        self.step(scalar::take_nullable_f64)
    }

    /// Reads a `bool` field.
    ///
    /// # Errors
    ///
    /// See [`scalar::take_bool`].
    pub fn bool(&mut self) -> KeyResult<bool> {
        self.step(scalar::take_bool)
    }

    /// Reads a nullable `bool` field.
    ///
    /// # Errors
    ///
    /// See [`scalar::take_nullable_bool`].
    pub fn nullable_bool(&mut self) -> KeyResult<Option<bool>> {
        self.step(scalar::take_nullable_bool)
    }

    /// Reads a field of any tagged kind.
    ///
    /// # Errors
    ///
    /// See [`Value::take`].
    pub fn value(&mut self) -> KeyResult<Value> {
        self.step(Value::take)
    }

    /// Reads `n` raw bytes.
    ///
    /// # Panics
    ///
    /// Panics if fewer than `n` bytes remain.
    pub fn raw(&mut self, n: usize) -> &'a [u8] {
        let (value, rest) = fixed::take_bytes(self.rest, n);
        self.rest = rest;
        value
    }

    /// Reads `n` descending raw bytes.
    ///
    /// # Panics
    ///
    /// Panics if fewer than `n` bytes remain.
    pub fn raw_desc(&mut self, n: usize) -> Vec<u8> {
        let (value, rest) = fixed::take_bytes_desc(self.rest, n);
        self.rest = rest;
        value
    }

    /// Reads an untagged fixed-width field.
    fn step_fixed<T>(&mut self, take: fn(&'a [u8]) -> (T, &'a [u8])) -> T {
        let (value, rest) = take(self.rest);
        self.rest = rest;
        value
    }

    /// Reads one byte. Panics if the key is exhausted.
    pub fn u8(&mut self) -> u8 {
        self.step_fixed(fixed::take_u8)
    }

    /// Reads one descending byte. Panics if the key is exhausted.
    pub fn u8_desc(&mut self) -> u8 {
        self.step_fixed(fixed::take_u8_desc)
    }

    /// Reads a big-endian `u16`. Panics on a short key.
    pub fn u16(&mut self) -> u16 {
        self.step_fixed(fixed::take_u16)
    }

    /// Reads a descending `u16`. Panics on a short key.
    pub fn u16_desc(&mut self) -> u16 {
        self.step_fixed(fixed::take_u16_desc)
    }

    /// Reads a big-endian `u32`. Panics on a short key.
    pub fn u32(&mut self) -> u32 {
        self.step_fixed(fixed::take_u32)
    }

    /// Reads a descending `u32`. Panics on a short key.
    pub fn u32_desc(&mut self) -> u32 {
        self.step_fixed(fixed::take_u32_desc)
    }

    /// Reads a big-endian `u64`. Panics on a short key.
    pub fn u64(&mut self) -> u64 {
        self.step_fixed(fixed::take_u64)
    }

    /// Reads a descending `u64`. Panics on a short key.
    pub fn u64_desc(&mut self) -> u64 {
        self.step_fixed(fixed::take_u64_desc)
    }

    /// Reads a NUL-terminated value. Panics if no terminator remains.
    pub fn cstr(&mut self) -> &'a [u8] {
        self.step_fixed(fixed::take_cstr)
    }
}
