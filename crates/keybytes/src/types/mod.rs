//! Data types carried by keys.

mod value;

pub use value::Value;
