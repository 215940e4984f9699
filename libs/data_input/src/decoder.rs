//! The decoder and encoder contracts.

use std::io;

use crate::Result;
use crate::source::Source;

/// Reconstructs one typed value from a [`Source`].
///
/// The source must be positioned at the start of a value written by the
/// matching [`Encoder`]; this is not checked. A successful decode leaves the
/// source right past the value and never reads beyond it.
///
/// Decoders hold no per-call state and may be shared between threads, as long
/// as every call gets its own source.
pub trait Decoder<S: Source> {
    /// The type of the decoded value.
    type Output;

    /// Decodes one value.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the source failed or the data was malformed. Source
    /// failures are passed through unchanged.
    fn decode(&self, source: &mut S) -> Result<Self::Output>;
}

impl<S: Source, D: Decoder<S> + ?Sized> Decoder<S> for &D {
    type Output = D::Output;

    fn decode(&self, source: &mut S) -> Result<Self::Output> {
        (**self).decode(source)
    }
}

/// Writes one typed value so the matching [`Decoder`] can read it back.
pub trait Encoder<W: io::Write> {
    /// The type of the encoded value.
    type Input: ?Sized;

    /// Encodes one value.
    ///
    /// # Errors
    ///
    /// Returns `Err` if writing failed or the value cannot be represented.
    fn encode(&self, value: &Self::Input, writer: &mut W) -> Result<()>;
}

impl<W: io::Write, E: Encoder<W> + ?Sized> Encoder<W> for &E {
    type Input = E::Input;

    fn encode(&self, value: &Self::Input, writer: &mut W) -> Result<()> {
        (**self).encode(value, writer)
    }
}
