//! Error handling type.

use std::error::Error as StdError;
use std::io;
use std::string::FromUtf8Error;

use crate::primitive::Primitive;

/// Boxed error produced by an object format.
pub type BoxError = Box<dyn StdError + Send + Sync>;

/// Potential errors to encounter when decoding or encoding binary data.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The source ended before it could supply the requested bytes.
    #[error("unexpected end of input")]
    UnexpectedEof,

    /// The error originated from the underlying reader or writer.
    #[error(transparent)]
    Io(io::Error),

    /// A length prefix was negative.
    #[error("invalid length prefix {0}")]
    InvalidLength(i32),

    /// A value is too long for its length prefix.
    #[error("length {0} does not fit into a length prefix")]
    LengthOverflow(usize),

    /// Text data contained invalid UTF-8.
    #[error("invalid utf-8 in data for text")]
    InvalidUtf8(#[source] FromUtf8Error),

    /// A primitive value was handed to the codec of another kind.
    #[error("mismatch: expected {expected}, but received {found}")]
    KindMismatch {
        /// The kind of the codec.
        expected: Primitive,
        /// The kind of the value.
        found: Primitive,
    },

    /// The object format could not rebuild the encoded object.
    #[error("malformed object")]
    MalformedObject(#[source] BoxError),

    /// The object format could not encode the object.
    #[error("object cannot be encoded")]
    UnencodableObject(#[source] BoxError),
}

impl Error {
    /// Whether this error means the source ran out of bytes.
    pub fn is_eof(&self) -> bool {
        matches!(self, Self::UnexpectedEof)
    }

    /// Converts this error into an [`io::Error`] so it can pass through
    /// [`io::Read`] and [`io::Write`] implementations.
    ///
    /// [`From<io::Error>`] reverses this.
    pub(crate) fn into_io(self) -> io::Error {
        match self {
            Self::Io(err) => err,
            Self::UnexpectedEof => io::ErrorKind::UnexpectedEof.into(),
            other => io::Error::other(other),
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        let kind = err.kind();
        if kind == io::ErrorKind::UnexpectedEof {
            return Self::UnexpectedEof;
        }

        // errors of this crate tunneled through `into_io`
        if err.get_ref().is_some_and(|inner| inner.is::<Self>()) {
            return match err.into_inner().map(|inner| inner.downcast::<Self>()) {
                Some(Ok(inner)) => *inner,
                _ => Self::Io(io::Error::from(kind)),
            };
        }

        Self::Io(err)
    }
}
