//! # Typed value decoding over sequential binary sources
//!
//! Reads structured values out of a byte source one value at a time. How bytes
//! are read is described by [`Source`], how a value is rebuilt from them by
//! [`Decoder`].
//!
//! The directly encoded kinds use these layouts:
//!
//! - `int`: 4 bytes, big-endian, two's complement
//! - `long`: 8 bytes, big-endian, two's complement
//! - `float`: 4 bytes, big-endian, IEEE-754
//! - `text`: `int` byte length `n`, followed by `n` bytes of UTF-8
//!
//! Anything else goes through [`ObjectDecoder`], which hands the source to a
//! general-purpose serde format by way of [`SourceReader`]. That format
//! determines where an object ends; the bytes after it are left in the source.
//!
//! ```
//! use data_input::{Int, Source, Text};
//!
//! let mut src: &[u8] = b"\x00\x00\x00\x02hi\x00\x00\x01\x00";
//! assert_eq!(src.decode(&Text)?, "hi");
//! assert_eq!(src.decode(&Int)?, 256);
//! # Ok::<(), data_input::Error>(())
//! ```

pub mod adapter;
pub mod config;
pub mod decoder;
pub mod error;
pub mod object;
pub mod primitive;
pub mod source;

#[cfg(test)]
mod tests;

pub use adapter::SourceReader;
pub use config::Limits;
pub use decoder::{Decoder, Encoder};
pub use error::Error;
pub use object::{ObjectDecoder, ObjectEncoder, object};
pub use primitive::{Float, Int, Long, Primitive, PrimitiveValue, Text};
pub use source::{IoSource, Source};

/// Result type with [`Error`] error variant.
pub type Result<T, E = Error> = std::result::Result<T, E>;
