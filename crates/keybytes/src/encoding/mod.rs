//! Order-preserving key encoding.
//!
//! This module converts typed scalars into byte strings whose unsigned
//! lexicographic order matches the natural order of the values. The bytes
//! are meant to be used as keys in a sorted key-value store, where
//! concatenated fields form composite keys ordered field by field.
//!
//! # Layers
//!
//! - [`type_code`] - one-byte tags framing each scalar field
//! - [`numeric`] - sign/magnitude and IEEE-754 bit transforms
//! - [`scalar`] - tagged `append_*`/`take_*` pairs for every scalar kind
//! - [`fixed`] - untagged fixed-width helpers, ascending and descending
//! - [`range`] - upper bounds for prefix scans
//!
//! The format is a subset of the FoundationDB tuple layer type codes:
//!
//! | Kind | Tag | Payload |
//! |---|---|---|
//! | null | `0x00` | none |
//! | string | `0x02` | NUL-escaped bytes, `0x00` terminator |
//! | negative i64 | `0x0C` | `u64::MAX - abs(v)`, big-endian |
//! | negative i32 | `0x0F` | `u32::MAX - abs(v)`, big-endian |
//! | zero | `0x14` | none |
//! | positive i32 | `0x19` | `v`, big-endian |
//! | positive i64 | `0x1C` | `v`, big-endian |
//! | f64 | `0x21` | transformed bits, big-endian |
//! | false / true | `0x26` / `0x27` | none |

pub(crate) mod escape;
pub mod fixed;
pub mod numeric;
pub mod range;
pub mod scalar;
pub mod type_code;


pub use type_code::TypeCode;
