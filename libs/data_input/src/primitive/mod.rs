//! Codecs for the directly encoded primitive kinds.
//!
//! Each kind has one zero-sized codec, [`Int`], [`Long`], [`Float`] and
//! [`Text`], which can be used as a `const` wherever a decoder is needed. When
//! the kind is only known at runtime, [`Primitive`] dispatches to them.

use std::str::FromStr;
use std::{fmt, io};

use crate::decoder::{Decoder, Encoder};
use crate::source::Source;
use crate::{Error, Result};


fn write<W: io::Write>(writer: &mut W, bytes: &[u8]) -> Result<()> {
    Ok(writer.write_all(bytes)?)
}

/// Codec for big-endian 32-bit signed integers.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Int;

/// Codec for big-endian 64-bit signed integers.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Long;

/// Codec for big-endian IEEE-754 32-bit floats.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Float;

/// Codec for length-prefixed UTF-8 text.
///
/// The prefix is a big-endian [`i32`] counting encoded bytes, not characters.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Text;

impl<S: Source> Decoder<S> for Int {
    type Output = i32;

    fn decode(&self, source: &mut S) -> Result<i32> {
        source.read_i32()
    }
}

impl<W: io::Write> Encoder<W> for Int {
    type Input = i32;

    fn encode(&self, value: &i32, writer: &mut W) -> Result<()> {
        write(writer, &value.to_be_bytes())
    }
}

impl<S: Source> Decoder<S> for Long {
    type Output = i64;

    fn decode(&self, source: &mut S) -> Result<i64> {
        source.read_i64()
    }
}

impl<W: io::Write> Encoder<W> for Long {
    type Input = i64;

    fn encode(&self, value: &i64, writer: &mut W) -> Result<()> {
        write(writer, &value.to_be_bytes())
    }
}

impl<S: Source> Decoder<S> for Float {
    type Output = f32;

    fn decode(&self, source: &mut S) -> Result<f32> {
        source.read_f32()
    }
}

impl<W: io::Write> Encoder<W> for Float {
    type Input = f32;

    fn encode(&self, value: &f32, writer: &mut W) -> Result<()> {
        write(writer, &value.to_be_bytes())
    }
}

impl<S: Source> Decoder<S> for Text {
    type Output = String;

    fn decode(&self, source: &mut S) -> Result<String> {
        let len = source.read_i32()?;
        let len = usize::try_from(len).map_err(|_| Error::InvalidLength(len))?;

        // a prefix past the end of the data fails inside the exact read
        let bytes = source.read_byte_vec(len)?;
        String::from_utf8(bytes).map_err(Error::InvalidUtf8)
    }
}

impl<W: io::Write> Encoder<W> for Text {
    type Input = str;

    fn encode(&self, value: &str, writer: &mut W) -> Result<()> {
        let len = i32::try_from(value.len()).map_err(|_| Error::LengthOverflow(value.len()))?;
        write(writer, &len.to_be_bytes())?;
        write(writer, value.as_bytes())
    }
}

/// The closed set of primitive kinds.
///
/// Decoding through a [`Primitive`] selects the matching codec and wraps the
/// result in a [`PrimitiveValue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    /// See [`Int`].
    Int,
    /// See [`Long`].
    Long,
    /// See [`Float`].
    Float,
    /// See [`Text`].
    Text,
}

impl Primitive {
    /// All kinds in declaration order.
    pub const ALL: [Self; 4] = [Self::Int, Self::Long, Self::Float, Self::Text];

    /// The lowercase name of this kind.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Int => "int",
            Self::Long => "long",
            Self::Float => "float",
            Self::Text => "text",
        }
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown [`Primitive`] name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown primitive kind `{0}`")]
pub struct UnknownPrimitive(String);

impl FromStr for Primitive {
    type Err = UnknownPrimitive;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownPrimitive(s.to_owned()))
    }
}

impl<S: Source> Decoder<S> for Primitive {
    type Output = PrimitiveValue;

    fn decode(&self, source: &mut S) -> Result<PrimitiveValue> {
        match self {
            Self::Int => Int.decode(source).map(PrimitiveValue::Int),
            Self::Long => Long.decode(source).map(PrimitiveValue::Long),
            Self::Float => Float.decode(source).map(PrimitiveValue::Float),
            Self::Text => Text.decode(source).map(PrimitiveValue::Text),
        }
    }
}

impl<W: io::Write> Encoder<W> for Primitive {
    type Input = PrimitiveValue;

    fn encode(&self, value: &PrimitiveValue, writer: &mut W) -> Result<()> {
        match (self, value) {
            (Self::Int, PrimitiveValue::Int(v)) => Int.encode(v, writer),
            (Self::Long, PrimitiveValue::Long(v)) => Long.encode(v, writer),
            (Self::Float, PrimitiveValue::Float(v)) => Float.encode(v, writer),
            (Self::Text, PrimitiveValue::Text(v)) => Text.encode(v.as_str(), writer),
            (&expected, value) => Err(Error::KindMismatch {
                expected,
                found: value.kind(),
            }),
        }
    }
}

/// A decoded primitive value, tagged with its kind.
#[derive(Debug, Clone, PartialEq)]
pub enum PrimitiveValue {
    /// Decoded by [`Int`].
    Int(i32),
    /// Decoded by [`Long`].
    Long(i64),
    /// Decoded by [`Float`].
    Float(f32),
    /// Decoded by [`Text`].
    Text(String),
}

impl PrimitiveValue {
    /// The kind of this value.
    pub fn kind(&self) -> Primitive {
        match self {
            Self::Int(_) => Primitive::Int,
            Self::Long(_) => Primitive::Long,
            Self::Float(_) => Primitive::Float,
            Self::Text(_) => Primitive::Text,
        }
    }

    /// Encodes this value with the codec of its kind.
    ///
    /// # Errors
    ///
    /// Returns `Err` if writing failed or a text is too long.
    pub fn write_to<W: io::Write>(&self, writer: &mut W) -> Result<()> {
        self.kind().encode(self, writer)
    }
}

impl From<i32> for PrimitiveValue {
    fn from(value: i32) -> Self {
        Self::Int(value)
    }
}

impl From<i64> for PrimitiveValue {
    fn from(value: i64) -> Self {
        Self::Long(value)
    }
}

impl From<f32> for PrimitiveValue {
    fn from(value: f32) -> Self {
        Self::Float(value)
    }
}

impl From<String> for PrimitiveValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for PrimitiveValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}
