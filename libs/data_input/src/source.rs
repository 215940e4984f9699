//! Exposes the sequential binary source trait.

use std::io;

use crate::decoder::Decoder;
use crate::{Error, Result};

/// Largest chunk that exact reads from an [`IoSource`] allocate ahead of the
/// data that actually arrived.
const CHUNK: usize = 0x1000;

/// An ordered, cursor-based byte reader.
///
/// Every successful read advances the cursor by exactly the bytes it returned.
/// Failed exact reads report [`Error::UnexpectedEof`] when the source ran dry.
///
/// By default, this is implemented for `&[u8]` (byte slices), [`IoSource`] and
/// mutable references to [`Source`] implementations.
///
/// A source is shared mutable state. Decode calls on one source have to happen
/// one after another.
pub trait Source {
    /// Reads a constant size chunk of bytes.
    ///
    /// # Errors
    ///
    /// Returns `Err` if fewer than `N` bytes are available.
    fn read_bytes<const N: usize>(&mut self) -> Result<[u8; N]>;

    /// Fills the whole buffer from the source.
    ///
    /// # Errors
    ///
    /// Returns `Err` if fewer than `buf.len()` bytes are available.
    fn read_fully(&mut self, buf: &mut [u8]) -> Result<()>;

    /// Reads exactly `len` bytes, returning them as a newly allocated [`Vec`].
    ///
    /// # Errors
    ///
    /// Returns `Err` if fewer than `len` bytes are available.
    fn read_byte_vec(&mut self, len: usize) -> Result<Vec<u8>>;

    /// Reads up to `buf.len()` bytes, returning how many were read.
    ///
    /// Returns `Ok(0)` for a non-empty `buf` only once the source is exhausted.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the underlying reader failed.
    fn read_available(&mut self, buf: &mut [u8]) -> Result<usize>;

    /// Reads a single byte.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the source is exhausted.
    fn read_u8(&mut self) -> Result<u8> {
        let [b] = self.read_bytes()?;
        Ok(b)
    }

    /// Reads a byte and interprets anything but 0 as `true`.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the source is exhausted.
    fn read_bool(&mut self) -> Result<bool> {
        self.read_u8().map(|b| b != 0)
    }

    /// Reads a big-endian [`i16`].
    ///
    /// # Errors
    ///
    /// Returns `Err` if fewer than 2 bytes are available.
    fn read_i16(&mut self) -> Result<i16> {
        self.read_bytes().map(i16::from_be_bytes)
    }

    /// Reads a big-endian [`i32`].
    ///
    /// # Errors
    ///
    /// Returns `Err` if fewer than 4 bytes are available.
    fn read_i32(&mut self) -> Result<i32> {
        self.read_bytes().map(i32::from_be_bytes)
    }

    /// Reads a big-endian [`i64`].
    ///
    /// # Errors
    ///
    /// Returns `Err` if fewer than 8 bytes are available.
    fn read_i64(&mut self) -> Result<i64> {
        self.read_bytes().map(i64::from_be_bytes)
    }

    /// Reads a big-endian [`f32`].
    ///
    /// # Errors
    ///
    /// Returns `Err` if fewer than 4 bytes are available.
    fn read_f32(&mut self) -> Result<f32> {
        self.read_bytes().map(f32::from_be_bytes)
    }

    /// Reads a big-endian [`f64`].
    ///
    /// # Errors
    ///
    /// Returns `Err` if fewer than 8 bytes are available.
    fn read_f64(&mut self) -> Result<f64> {
        self.read_bytes().map(f64::from_be_bytes)
    }

    /// Decodes one value with the given decoder.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the decoder failed.
    fn decode<D>(&mut self, decoder: &D) -> Result<D::Output>
    where
        Self: Sized,
        D: Decoder<Self> + ?Sized,
    {
        decoder.decode(self)
    }
}

// this implementation is required so the source can be reborrowed
impl<S: Source> Source for &mut S {
    fn read_bytes<const N: usize>(&mut self) -> Result<[u8; N]> {
        (**self).read_bytes()
    }

    fn read_fully(&mut self, buf: &mut [u8]) -> Result<()> {
        (**self).read_fully(buf)
    }

    fn read_byte_vec(&mut self, len: usize) -> Result<Vec<u8>> {
        (**self).read_byte_vec(len)
    }

    fn read_available(&mut self, buf: &mut [u8]) -> Result<usize> {
        (**self).read_available(buf)
    }
}

impl Source for &[u8] {
    fn read_bytes<const N: usize>(&mut self) -> Result<[u8; N]> {
        let (out, rem) = self.split_first_chunk::<N>().ok_or(Error::UnexpectedEof)?;
        *self = rem;
        Ok(*out)
    }

    fn read_fully(&mut self, buf: &mut [u8]) -> Result<()> {
        let (out, rem) = self
            .split_at_checked(buf.len())
            .ok_or(Error::UnexpectedEof)?;
        buf.copy_from_slice(out);
        *self = rem;
        Ok(())
    }

    fn read_byte_vec(&mut self, len: usize) -> Result<Vec<u8>> {
        let (out, rem) = self.split_at_checked(len).ok_or(Error::UnexpectedEof)?;
        *self = rem;
        Ok(out.to_vec())
    }

    fn read_available(&mut self, buf: &mut [u8]) -> Result<usize> {
        let len = buf.len().min(self.len());
        let (out, rem) = self.split_at(len);
        buf[..len].copy_from_slice(out);
        *self = rem;
        Ok(len)
    }
}

/// Wraps a [`io::Read`] implementation so it can be used as a [`Source`].
///
/// No bytes are read ahead; whatever a read did not consume stays in the
/// inner reader.
#[derive(Debug)]
pub struct IoSource<R> {
    inner: R,
}

impl<R> IoSource<R> {
    /// Wraps a reader.
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    /// Gets a mutable reference to the inner reader.
    pub fn get_mut(&mut self) -> &mut R {
        &mut self.inner
    }

    /// Unwraps the source into its inner reader.
    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: io::Read> Source for IoSource<R> {
    fn read_bytes<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut buf = [0u8; N];
        self.inner.read_exact(&mut buf)?;
        Ok(buf)
    }

    fn read_fully(&mut self, buf: &mut [u8]) -> Result<()> {
        Ok(self.inner.read_exact(buf)?)
    }

    #[inline(never)]
    fn read_byte_vec(&mut self, len: usize) -> Result<Vec<u8>> {
        use std::io::Read as _;

        // grow with the data that arrives so a forged length can't make us
        // allocate a huge buffer up front
        let mut buf = Vec::with_capacity(len.min(CHUNK));
        let limit = u64::try_from(len).map_err(|_| Error::UnexpectedEof)?;
        self.inner.by_ref().take(limit).read_to_end(&mut buf)?;

        if buf.len() == len {
            Ok(buf)
        } else {
            Err(Error::UnexpectedEof)
        }
    }

    fn read_available(&mut self, buf: &mut [u8]) -> Result<usize> {
        loop {
            match self.inner.read(buf) {
                Err(err) if err.kind() == io::ErrorKind::Interrupted => {},
                res => return Ok(res?),
            }
        }
    }
}
