//! Codec for arbitrary serde object graphs.
//!
//! The graph itself is written in a general-purpose binary serde format that
//! this crate does not define. Decoding hands a [`SourceReader`] to that
//! format and lets it pull exactly the bytes it needs, so values written after
//! the object can still be read from the same source.

use std::any::type_name;
use std::marker::PhantomData;
use std::{fmt, io};

use bincode::Options as _;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::adapter::SourceReader;
use crate::config::Limits;
use crate::decoder::{Decoder, Encoder};
use crate::source::Source;
use crate::{Error, Result};

/// Returns a decoder for objects of type `T` with the default [`Limits`].
pub const fn object<T: DeserializeOwned>() -> ObjectDecoder<T> {
    ObjectDecoder::new()
}

fn options() -> impl bincode::Options {
    bincode::DefaultOptions::new()
        .with_big_endian()
        .with_fixint_encoding()
        .allow_trailing_bytes()
}

/// Maps an error of the object format into this crate's vocabulary.
///
/// I/O errors raised by the source came through the adapter and are returned
/// as they were. Anything else means the bytes did not describe a valid `T`.
fn map_decode_error<T>(err: bincode::Error) -> Error {
    match *err {
        bincode::ErrorKind::Io(err) => Error::from(err),
        kind => {
            log::debug!("rejected malformed `{}`: {kind}", type_name::<T>());
            Error::MalformedObject(Box::new(kind))
        },
    }
}

fn map_encode_error(err: bincode::Error) -> Error {
    match *err {
        bincode::ErrorKind::Io(err) => Error::from(err),
        kind => Error::UnencodableObject(Box::new(kind)),
    }
}

/// Decodes an object graph of type `T`.
///
/// By default, objects may claim at most
/// [`DEFAULT_OBJECT_SIZE_LIMIT`](crate::config::DEFAULT_OBJECT_SIZE_LIMIT)
/// bytes. Larger objects, including forged length prefixes, are rejected as
/// malformed before anything is allocated for them.
pub struct ObjectDecoder<T> {
    size_limit: Option<u64>,
    marker: PhantomData<fn() -> T>,
}

impl<T> ObjectDecoder<T> {
    /// Creates a decoder with the default [`Limits`].
    pub const fn new() -> Self {
        Self::with_limits(&Limits::DEFAULT)
    }

    /// Creates a decoder without size limit.
    ///
    /// Only use this for trusted input. A forged length prefix makes the
    /// object format try to allocate that many bytes.
    pub const fn unbounded() -> Self {
        Self {
            size_limit: None,
            marker: PhantomData,
        }
    }

    /// Creates a decoder that rejects objects larger than allowed by `limits`.
    pub const fn with_limits(limits: &Limits) -> Self {
        Self {
            size_limit: limits.object_size_limit,
            marker: PhantomData,
        }
    }
}

impl<S: Source, T: DeserializeOwned> Decoder<S> for ObjectDecoder<T> {
    type Output = T;

    fn decode(&self, source: &mut S) -> Result<T> {
        log::trace!("decoding object `{}`", type_name::<T>());

        let reader = SourceReader::new(source);
        let res = match self.size_limit {
            Some(limit) => options().with_limit(limit).deserialize_from(reader),
            None => options().deserialize_from(reader),
        };

        res.map_err(map_decode_error::<T>)
    }
}

impl<T> Default for ObjectDecoder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for ObjectDecoder<T> {
    fn clone(&self) -> Self {
        Self {
            size_limit: self.size_limit,
            marker: PhantomData,
        }
    }
}

impl<T> fmt::Debug for ObjectDecoder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectDecoder")
            .field("type", &type_name::<T>())
            .field("size_limit", &self.size_limit)
            .finish()
    }
}

/// Encodes an object graph of type `T` so [`ObjectDecoder`] can read it.
pub struct ObjectEncoder<T: ?Sized>(PhantomData<fn(&T)>);

impl<T: ?Sized> ObjectEncoder<T> {
    /// Creates the encoder.
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<W: io::Write, T: Serialize + ?Sized> Encoder<W> for ObjectEncoder<T> {
    type Input = T;

    fn encode(&self, value: &T, writer: &mut W) -> Result<()> {
        options()
            .serialize_into(writer, value)
            .map_err(map_encode_error)
    }
}

impl<T: ?Sized> Default for ObjectEncoder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> Clone for ObjectEncoder<T> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<T: ?Sized> fmt::Debug for ObjectEncoder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ObjectEncoder")
            .field(&type_name::<T>())
            .finish()
    }
}
