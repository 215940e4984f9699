// tests for decoding object graphs mixed with primitive values
use std::error::Error as _;
use std::io::{self, Read as _};

use serde::{Deserialize, Serialize};

use super::*;

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct Entry {
    id: u64,
    name: String,
    tags: Vec<String>,
    parent: Option<Box<Entry>>,
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
enum Wide {
    A,
    B(u32),
    C { x: i16 },
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
enum Narrow {
    A,
    B(u32),
}

/// Reader that fails after handing out its data.
struct FailAfter<'a>(&'a [u8]);

impl io::Read for FailAfter<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.0.is_empty() {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"));
        }
        self.0.read(buf)
    }
}

fn sample() -> Entry {
    Entry {
        id: 2,
        name: "child".to_owned(),
        tags: vec!["ä".to_owned(), "b".to_owned()],
        parent: Some(Box::new(Entry {
            id: 1,
            name: "root".to_owned(),
            tags: Vec::new(),
            parent: None,
        })),
    }
}

fn encode_object<T: Serialize>(buf: &mut Vec<u8>, value: &T) {
    ObjectEncoder::<T>::new()
        .encode(value, buf)
        .expect("serializing must work");
}

#[test]
fn object_round_trip() {
    let mut buf = Vec::new();
    encode_object(&mut buf, &sample());

    let mut src = buf.as_slice();
    let rev: Entry = src.decode(&object()).expect("deserializing must work");
    assert_eq!(rev, sample(), "serialization messed up data");
    assert!(src.is_empty(), "all bytes must be consumed");
}

#[test]
fn object_leaves_trailing_values() {
    let mut buf = Vec::new();
    encode_object(&mut buf, &sample());
    Int.encode(&0x0BAD_F00D, &mut buf).expect("writing to a vec must work");
    Text.encode("after", &mut buf).expect("writing to a vec must work");

    let mut src = buf.as_slice();
    let rev = src.decode(&object::<Entry>()).expect("deserializing must work");
    assert_eq!(rev, sample(), "serialization messed up data");
    assert_eq!(src.decode(&Int).expect("int follows"), 0x0BAD_F00D, "int mismatch");
    assert_eq!(src.decode(&Text).expect("text follows"), "after", "text mismatch");
}

#[test]
fn object_from_io_source_leaves_trailing_values() {
    let mut buf = Vec::new();
    encode_object(&mut buf, &Wide::C { x: -3 });
    Long.encode(&-1, &mut buf).expect("writing to a vec must work");

    let mut src = IoSource::new(buf.as_slice());
    let rev = src.decode(&object::<Wide>()).expect("deserializing must work");
    assert_eq!(rev, Wide::C { x: -3 }, "serialization messed up data");
    assert_eq!(src.decode(&Long).expect("long follows"), -1, "long mismatch");
    assert!(src.into_inner().is_empty(), "all bytes must be consumed");
}

#[test]
fn object_unknown_variant_is_malformed() {
    let mut buf = Vec::new();
    encode_object(&mut buf, &Wide::C { x: 5 });

    let err = buf
        .as_slice()
        .decode(&object::<Narrow>())
        .expect_err("variant 2 does not exist");

    assert!(
        matches!(err, Error::MalformedObject(_)),
        "incorrect error kind: {err:?}"
    );
    assert!(err.source().is_some(), "the cause must be kept");
}

#[test]
fn object_truncated_is_eof() {
    let mut buf = Vec::new();
    encode_object(&mut buf, &sample());
    buf.truncate(buf.len() - 3);

    let err = buf
        .as_slice()
        .decode(&object::<Entry>())
        .expect_err("data is cut off");
    assert!(err.is_eof(), "expected eof, got {err:?}");
}

#[test]
fn object_size_limit() {
    let mut buf = Vec::new();
    encode_object(&mut buf, &"x".repeat(100));

    let limits = Limits {
        object_size_limit: Some(16),
    };
    let err = buf
        .as_slice()
        .decode(&ObjectDecoder::<String>::with_limits(&limits))
        .expect_err("object exceeds the limit");
    assert!(
        matches!(err, Error::MalformedObject(_)),
        "incorrect error kind: {err:?}"
    );

    let limits = Limits {
        object_size_limit: Some(4096),
    };
    let rev = buf
        .as_slice()
        .decode(&ObjectDecoder::<String>::with_limits(&limits))
        .expect("object is within the limit");
    assert_eq!(rev.len(), 100, "serialization messed up data");
}

#[test]
fn object_forged_length_is_malformed() {
    // string length of 2^62 - 1 followed by two bytes
    let mut src: &[u8] = &[0x3F, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, b'a', b'b'];
    let err = src.decode(&object::<String>()).expect_err("length is forged");
    assert!(
        matches!(err, Error::MalformedObject(_)),
        "incorrect error kind: {err:?}"
    );

    // 4 GiB string
    let mut src: &[u8] = &[0, 0, 0, 1, 0, 0, 0, 0, b'a'];
    let err = src.decode(&object::<String>()).expect_err("length is forged");
    assert!(
        matches!(err, Error::MalformedObject(_)),
        "incorrect error kind: {err:?}"
    );
}

#[test]
fn object_unbounded_is_opt_in() {
    let mut buf = Vec::new();
    encode_object(&mut buf, &sample());

    let rev = buf
        .as_slice()
        .decode(&ObjectDecoder::<Entry>::unbounded())
        .expect("deserializing must work");
    assert_eq!(rev, sample(), "serialization messed up data");
}

#[test]
fn object_source_failure_is_io() {
    let mut buf = Vec::new();
    encode_object(&mut buf, &sample());
    buf.truncate(buf.len() - 3);

    let mut src = IoSource::new(FailAfter(&buf));
    match src.decode(&object::<Entry>()).expect_err("pipe closes early") {
        Error::Io(err) => assert_eq!(
            err.kind(),
            io::ErrorKind::BrokenPipe,
            "error kind must be unchanged"
        ),
        err => panic!("incorrect error kind: {err:?}"),
    }
}
