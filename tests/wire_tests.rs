// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Byte-level wire format tests.
//!
//! These pin the exact little-endian layout so that every backend, and any
//! peer implementation, agrees on the bytes.

use std::sync::Arc;

use polycodec::core::PrimitiveKind;
use polycodec::schema::{Catalog, TypeDescriptor};
use polycodec::{CodecError, Object, Serializer, Value};

fn serializer() -> Serializer {
    let registry = Catalog::new()
        .with_type(
            TypeDescriptor::reference("Record")
                .field("i", PrimitiveKind::Int32)
                .field("s", PrimitiveKind::String),
        )
        .with_type(
            TypeDescriptor::reference("Scalars")
                .field("b", PrimitiveKind::Bool)
                .field("c", PrimitiveKind::Char)
                .field("f", PrimitiveKind::Float32)
                .field("d", PrimitiveKind::Float64),
        )
        .with_type(TypeDescriptor::reference("Blob").field("data", PrimitiveKind::Bytes))
        .build()
        .unwrap();
    Serializer::interpreted(Arc::new(registry))
}

fn record(i: i32, s: String) -> Value {
    Value::Object(Object::new("Record").with("i", i).with("s", s))
}

// ============================================================================
// Layout
// ============================================================================

#[test]
fn test_record_layout() {
    let bytes = serializer().serialize(&record(42, "hello".into())).unwrap();
    assert_eq!(
        bytes,
        [0x2a, 0, 0, 0, 0x05, 0x00, b'h', b'e', b'l', b'l', b'o']
    );
}

#[test]
fn test_scalar_layout() {
    let value = Value::Object(
        Object::new("Scalars")
            .with("b", true)
            .with("c", 'é')
            .with("f", 1.0f32)
            .with("d", -2.0f64),
    );
    let bytes = serializer().serialize(&value).unwrap();
    let mut expected = vec![0x01, 0xe9, 0x00, 0x00, 0x00];
    expected.extend_from_slice(&1.0f32.to_le_bytes());
    expected.extend_from_slice(&(-2.0f64).to_le_bytes());
    assert_eq!(bytes, expected);
}

#[test]
fn test_blob_has_i32_length() {
    let value = Value::Object(Object::new("Blob").with("data", Value::Bytes(vec![9; 3])));
    let bytes = serializer().serialize(&value).unwrap();
    assert_eq!(bytes, [3, 0, 0, 0, 9, 9, 9]);
}

#[test]
fn test_trailing_bytes_ignored() {
    let serializer = serializer();
    let mut bytes = serializer.serialize(&record(1, "a".into())).unwrap();
    bytes.extend_from_slice(&[0xff, 0xff]);
    assert_eq!(
        serializer.deserialize(&bytes, "Record").unwrap(),
        record(1, "a".into())
    );
}

// ============================================================================
// String Limits
// ============================================================================

#[test]
fn test_longest_string_round_trips() {
    let serializer = serializer();
    let text = "x".repeat(u16::MAX as usize);
    let bytes = serializer.serialize(&record(0, text.clone())).unwrap();
    assert_eq!(bytes.len(), 4 + 2 + u16::MAX as usize);
    assert_eq!(&bytes[4..6], &[0xff, 0xff]);
    assert_eq!(
        serializer.deserialize(&bytes, "Record").unwrap(),
        record(0, text)
    );
}

#[test]
fn test_oversized_string_rejected() {
    let text = "x".repeat(u16::MAX as usize + 1);
    let err = serializer().serialize(&record(0, text)).unwrap_err();
    match err {
        CodecError::EncodingLimitExceeded { length, limit, .. } => {
            assert_eq!(length, 65_536);
            assert_eq!(limit, 65_535);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_string_length_counts_utf8_bytes() {
    // 21_846 three-byte characters is 65_538 bytes
    let text = "€".repeat(21_846);
    assert!(matches!(
        serializer().serialize(&record(0, text)).unwrap_err(),
        CodecError::EncodingLimitExceeded { .. }
    ));
}

// ============================================================================
// Invalid Input
// ============================================================================

#[test]
fn test_bool_byte_must_be_zero_or_one() {
    let mut bytes = vec![0x02, 0x41, 0, 0, 0];
    bytes.extend_from_slice(&[0; 12]);
    let err = serializer().deserialize(&bytes, "Scalars").unwrap_err();
    assert!(matches!(err, CodecError::InvalidData { position: 0, .. }));
}

#[test]
fn test_surrogate_char_rejected() {
    let mut bytes = vec![0x01, 0x00, 0xd8, 0x00, 0x00];
    bytes.extend_from_slice(&[0; 12]);
    let err = serializer().deserialize(&bytes, "Scalars").unwrap_err();
    assert!(matches!(err, CodecError::InvalidData { position: 1, .. }));
}

#[test]
fn test_invalid_utf8_rejected() {
    let bytes = [1, 0, 0, 0, 2, 0, 0xc3, 0x28];
    let err = serializer().deserialize(&bytes, "Record").unwrap_err();
    assert!(matches!(err, CodecError::InvalidData { .. }));
}

#[test]
fn test_negative_blob_length_rejected() {
    let bytes = (-1i32).to_le_bytes();
    let err = serializer().deserialize(&bytes, "Blob").unwrap_err();
    assert!(!err.is_truncation());
}

#[test]
fn test_nan_payload_preserved() {
    let serializer = serializer();
    let f = f32::from_bits(0x7fc0_1234);
    let d = f64::from_bits(0xfff8_0000_dead_beef);
    let value = Value::Object(
        Object::new("Scalars")
            .with("b", false)
            .with("c", 'a')
            .with("f", f)
            .with("d", d),
    );
    let bytes = serializer.serialize(&value).unwrap();
    assert_eq!(&bytes[5..9], &0x7fc0_1234u32.to_le_bytes());
    let decoded = serializer.deserialize(&bytes, "Scalars").unwrap();
    assert!(decoded.bit_eq(&value));
}
