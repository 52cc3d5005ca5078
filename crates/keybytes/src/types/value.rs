//! Dynamically typed key values.
//!
//! [`Value`] is the closed union of every tagged scalar kind. It is useful
//! when the field kinds of a key are only known at runtime, e.g. when a
//! catalog describes an index as a list of column types, or when a tool
//! dumps keys of unknown shape.
//!
//! # Example
//!
//! ```
//! use keybytes::Value;
//!
//! let key: Vec<u8> = [Value::from("orders"), Value::from(-3i64), Value::Null]
//!     .iter()
//!     .flat_map(Value::encode)
//!     .collect();
//!
//! let (table, rest) = Value::take(&key).unwrap();
//! let (id, rest) = Value::take(rest).unwrap();
//! let (missing, rest) = Value::take(rest).unwrap();
//! assert_eq!(table.as_str(), Some("orders"));
//! assert_eq!(id.as_int(), Some(-3));
//! assert!(missing.is_null());
//! assert!(rest.is_empty());
//! ```

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::encoding::escape::escaped_len;
use crate::encoding::scalar::{
    append_bool, append_f64, append_i32, append_i64, append_null, append_string, take_bool,
    take_f64, take_i32, take_i64, take_string,
};
use crate::encoding::type_code::{split_tag, TypeCode};
use crate::error::{KeyError, KeyResult};

/// A single key field of any supported kind.
///
/// Values of different kinds order by their tag:
/// `Null < String < Int < Float < Bool`. Integers and doubles are not
/// comparable with each other by magnitude.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// Null/missing value
    Null,
    /// UTF-8 string, may contain NUL
    String(String),
    /// Signed integer, encoded in the narrowest width that holds it
    Int(i64),
    /// IEEE-754 double
    Float(f64),
    /// Boolean value
    Bool(bool),
}

impl Value {
    /// Returns the tag this value is encoded under.
    #[must_use]
    pub fn type_code(&self) -> TypeCode {
        match self {
            Self::Null => TypeCode::Null,
            Self::String(_) => TypeCode::Utf8String,
            Self::Int(i) => match i32::try_from(*i) {
                Ok(0) => TypeCode::IntZero,
                Ok(v) if v > 0 => TypeCode::PositiveInt32,
                Ok(_) => TypeCode::NegativeInt32,
                Err(_) if *i > 0 => TypeCode::PositiveInt64,
                Err(_) => TypeCode::NegativeInt64,
            },
            Self::Float(_) => TypeCode::Float64,
            Self::Bool(false) => TypeCode::False,
            Self::Bool(true) => TypeCode::True,
        }
    }

    /// Appends the encoded value to `dst`.
    ///
    /// Integers that fit in `i32` use the 32-bit tags and the rest use the
    /// 64-bit tags. The tag order keeps integers of both widths in numeric
    /// order among values encoded here.
    ///
    /// Keys written with the typed [`append_i64`] always carry 64-bit tags,
    /// and [`Value::take`] reads those back as [`Value::Int`]. Re-encoding
    /// such a value produces different, narrower bytes, and `Value::Int(6)`
    /// sorts below `append_i64(5)`. Write a column either through `Value` or
    /// through the typed codec, never both; use [`append_i64`] directly to
    /// extend a column the typed codec already wrote.
    pub fn append(&self, dst: &mut Vec<u8>) {
        match self {
            Self::Null => append_null(dst),
            Self::String(s) => append_string(dst, s),
            Self::Int(i) => match i32::try_from(*i) {
                Ok(narrow) => append_i32(dst, narrow),
                Err(_) => append_i64(dst, *i),
            },
            Self::Float(f) => append_f64(dst, *f),
            Self::Bool(b) => append_bool(dst, *b),
        }
    }

    /// Encodes the value into a new buffer.
    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(self.encoded_len());
        self.append(&mut buf);
        buf
    }

    /// Exact number of bytes [`Value::append`] writes, including escapes.
    #[must_use]
    pub fn encoded_len(&self) -> usize {
        let payload = match self {
            Self::String(s) => escaped_len(s.as_bytes()),
            other => other.type_code().payload_len().unwrap_or_default(),
        };
        1 + payload
    }

    /// Takes one value of any kind from the front of `b`.
    ///
    /// Every integer tag decodes to [`Value::Int`].
    ///
    /// # Errors
    ///
    /// Returns the error of the kind-specific decoder, or
    /// [`KeyError::UnexpectedTypeCode`] for an unknown tag.
    pub fn take(b: &[u8]) -> KeyResult<(Self, &[u8])> {
        let result = Self::take_by_tag(b);
        if let Err(err) = &result {
            trace!(tag = ?b.first(), len = b.len(), %err, "value decode failed");
        }
        result
    }

    fn take_by_tag(b: &[u8]) -> KeyResult<(Self, &[u8])> {
        let (tag, rest) = split_tag(b)?;
        match TypeCode::try_from(tag)? {
            TypeCode::Null => Ok((Self::Null, rest)),
            TypeCode::Utf8String => take_string(b).map(|(s, rest)| (Self::String(s), rest)),
            TypeCode::NegativeInt32 | TypeCode::IntZero | TypeCode::PositiveInt32 => {
                take_i32(b).map(|(i, rest)| (Self::Int(i64::from(i)), rest))
            }
            TypeCode::NegativeInt64 | TypeCode::PositiveInt64 => {
                take_i64(b).map(|(i, rest)| (Self::Int(i), rest))
            }
            TypeCode::Float64 => take_f64(b).map(|(f, rest)| (Self::Float(f), rest)),
            TypeCode::False | TypeCode::True => take_bool(b).map(|(v, rest)| (Self::Bool(v), rest)),
        }
    }

    /// Decodes a buffer holding exactly one value.
    ///
    /// # Errors
    ///
    /// As [`Value::take`], plus [`KeyError::TrailingBytes`] if bytes remain.
    pub fn decode(b: &[u8]) -> KeyResult<Self> {
        let (value, rest) = Self::take(b)?;
        if rest.is_empty() {
            Ok(value)
        } else {
            Err(KeyError::TrailingBytes(rest.len()))
        }
    }

    /// Returns true if this is [`Value::Null`].
    #[inline]
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns the string payload, if any.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the integer payload, if any.
    #[must_use]
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the double payload, if any.
    #[must_use]
    pub const fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Returns the boolean payload, if any.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Self::Int(i64::from(i))
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_owned())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}
