//! Presents a [`Source`] as an [`io::Read`].
//!
//! Streaming consumers pull bytes at their own pace and expect a read of `0`
//! bytes at the end of the data rather than a length error. [`SourceReader`]
//! forwards each pull to [`Source::read_available`] and holds no buffer, so
//! every byte the consumer did not ask for is still in the source afterwards.

use std::io;

use crate::source::Source;

/// A one-shot, forward-only [`io::Read`] view of a [`Source`].
///
/// Bind one to a source for a single consumer, then drop it. Errors of the
/// source are passed to the consumer as [`io::Error`]s and can be turned back
/// into the original [`Error`](crate::Error) via [`From`].
#[derive(Debug)]
pub struct SourceReader<'a, S> {
    source: &'a mut S,
}

impl<'a, S: Source> SourceReader<'a, S> {
    /// Wraps a source.
    pub fn new(source: &'a mut S) -> Self {
        Self { source }
    }
}

impl<S: Source> io::Read for SourceReader<'_, S> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.source
            .read_available(buf)
            .map_err(crate::Error::into_io)
    }

    fn read_exact(&mut self, buf: &mut [u8]) -> io::Result<()> {
        // sources fill exactly without a loop
        self.source.read_fully(buf).map_err(crate::Error::into_io)
    }
}
