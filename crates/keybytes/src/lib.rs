//! `keybytes`
//!
//! Order-preserving binary encoding for keys in sorted key-value stores.
//!
//! # Overview
//!
//! Typed scalars are encoded so that unsigned byte-wise comparison of the
//! encodings agrees with the natural order of the values. Concatenating
//! several encoded fields yields a composite key ordered field by field,
//! which makes the bytes directly usable for range scans.
//!
//! - **Tagged scalars**: strings, `i32`/`i64`, `f64`, `bool` and their
//!   nullable (`Option`) forms, framed by a one-byte [`TypeCode`]
//! - **Fixed-width fields**: untagged bytes and unsigned integers, each with a
//!   descending variant
//! - **Dynamic values**: [`Value`] for keys whose shape is known at runtime
//! - **Composite keys**: [`KeyBuilder`] and [`KeyReader`]
//!
//! # Example
//!
//! ```
//! use keybytes::{KeyBuilder, KeyReader};
//!
//! let older = KeyBuilder::new().string("events").nullable_i32(None).i64(-2).build();
//! let newer = KeyBuilder::new().string("events").nullable_i32(None).i64(-1).build();
//! assert!(older < newer);
//!
//! let mut reader = KeyReader::new(&newer);
//! assert_eq!(reader.string().unwrap(), "events");
//! assert_eq!(reader.nullable_i32().unwrap(), None);
//! assert_eq!(reader.i64().unwrap(), -1);
//! assert!(reader.is_empty());
//! ```
//!
//! # Modules
//!
//! - [`encoding`] - the codec itself: tags, transforms, scalar and fixed-width fields
//! - [`types`] - the dynamic [`Value`] type
//! - [`key`] - composite key builder and reader
//! - [`error`] - decode errors ([`KeyError`])

// Deny unwrap in library code to ensure proper error handling
#![deny(clippy::unwrap_used)]

pub mod encoding;
pub mod error;
pub mod key;
pub mod types;

// Re-export commonly used types
pub use encoding::TypeCode;
pub use error::{KeyError, KeyResult};
pub use key::{KeyBuilder, KeyReader};
pub use types::Value;
