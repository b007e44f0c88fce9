// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Polymorphic reference tests: tag placement, dispatch to subtypes and
//! rejection of unrelated types. Every case runs against every backend.

mod common;

use polycodec::encoding::InputCursor;
use polycodec::{CodecError, Object, Value};

use common::{all_serializers, base, leaf, middle, node_chain, scene, vec2};

const LEAF_BYTES: [u8; 33] = [
    0x04, 0x00, 0x00, 0x00, // tag: Leaf
    0x07, 0x00, 0x00, 0x00, // i
    0x02, 0x00, b'a', b'b', // s
    0x01, // flag
    0x02, // color
    0x01, 0x00, 0x00, 0x00, 0x01, 0x00, b'x', // tags
    0x00, 0x00, 0x80, 0x3f, 0x00, 0x00, 0x00, 0x40, // origin
    0x5a, 0x00, 0x00, 0x00, // letter
];

// ============================================================================
// Tagging
// ============================================================================

#[test]
fn test_leaf_bytes_are_identical_for_any_declared_base() {
    let value = leaf(7, "ab", &["x"], 'Z');
    for (backend, serializer) in all_serializers() {
        for declared in ["Base", "Middle", "Leaf"] {
            let bytes = serializer.serialize_as(declared, &value).unwrap();
            assert_eq!(bytes, LEAF_BYTES, "{backend} as {declared}");
        }
        assert_eq!(serializer.serialize(&value).unwrap(), LEAF_BYTES, "{backend}");
    }
}

#[test]
fn test_base_instance_is_tagged_with_its_own_id() {
    for (backend, serializer) in all_serializers() {
        let bytes = serializer.serialize(&base(42, "hello")).unwrap();
        assert_eq!(
            bytes,
            [2, 0, 0, 0, 42, 0, 0, 0, 5, 0, b'h', b'e', b'l', b'l', b'o'],
            "{backend}"
        );
    }
}

#[test]
fn test_non_polymorphic_types_are_untagged() {
    for (backend, serializer) in all_serializers() {
        let bytes = serializer.serialize(&node_chain(1)).unwrap();
        assert_eq!(bytes, [2, 0, b'n', b'1', 0, 0, 0, 0], "{backend}");

        let bytes = serializer.serialize(&vec2(1.0, 2.0)).unwrap();
        assert_eq!(bytes.len(), 8, "{backend}");
    }
}

#[test]
fn test_tag_consumed_exactly_once() {
    // tag + Leaf payload, followed by a second object
    let mut stream = LEAF_BYTES.to_vec();
    stream.extend_from_slice(&LEAF_BYTES);
    for (backend, serializer) in all_serializers() {
        let base_id = serializer.registry().id_of("Base").unwrap();
        let mut input = InputCursor::new(&stream);
        let first = serializer.deserialize_from(&mut input, base_id).unwrap();
        assert_eq!(input.position(), LEAF_BYTES.len(), "{backend}");
        assert_eq!(first.type_name, "Leaf", "{backend}");
        serializer.deserialize_from(&mut input, base_id).unwrap();
        assert!(input.is_at_end(), "{backend}");
    }
}

// ============================================================================
// Dispatch
// ============================================================================

#[test]
fn test_decode_as_base_yields_leaf() {
    let expected = leaf(7, "ab", &["x"], 'Z');
    for (backend, serializer) in all_serializers() {
        for declared in ["Base", "Middle", "Leaf"] {
            let decoded = serializer.deserialize(&LEAF_BYTES, declared).unwrap();
            assert_eq!(decoded, expected, "{backend} as {declared}");
        }
    }
}

#[test]
fn test_mixed_list_keeps_runtime_types() {
    for (backend, serializer) in all_serializers() {
        let bytes = serializer.serialize(&scene()).unwrap();
        let decoded = serializer.deserialize(&bytes, "Scene").unwrap();
        let shapes = decoded.as_object().unwrap().get("shapes").unwrap();
        let names: Vec<_> = shapes
            .as_elements()
            .unwrap()
            .iter()
            .map(|s| s.as_object().unwrap().type_name.as_str())
            .collect();
        assert_eq!(names, ["Base", "Middle", "Leaf"], "{backend}");
        assert_eq!(decoded, scene(), "{backend}");
    }
}

#[test]
fn test_middle_round_trip() {
    let value = middle(-1, "", false, 0);
    for (backend, serializer) in all_serializers() {
        let bytes = serializer.serialize_as("Base", &value).unwrap();
        assert_eq!(&bytes[..4], &[3, 0, 0, 0], "{backend}");
        assert_eq!(serializer.deserialize(&bytes, "Base").unwrap(), value, "{backend}");
    }
}

// ============================================================================
// Rejection
// ============================================================================

#[test]
fn test_encode_supertype_as_subtype_rejected() {
    for (backend, serializer) in all_serializers() {
        let err = serializer.serialize_as("Leaf", &base(1, "b")).unwrap_err();
        match err {
            CodecError::TypeMismatch { expected, actual } => {
                assert_eq!(expected, "Leaf", "{backend}");
                assert_eq!(actual, "Base", "{backend}");
            }
            other => panic!("{backend}: unexpected error: {other}"),
        }
    }
}

#[test]
fn test_encode_unrelated_type_rejected() {
    for (backend, serializer) in all_serializers() {
        let err = serializer.serialize_as("Base", &node_chain(1)).unwrap_err();
        assert!(matches!(err, CodecError::TypeMismatch { .. }), "{backend}");
    }
}

#[test]
fn test_decode_base_tag_as_leaf_rejected() {
    for (backend, serializer) in all_serializers() {
        let bytes = serializer.serialize(&base(1, "b")).unwrap();
        let err = serializer.deserialize(&bytes, "Leaf").unwrap_err();
        assert!(matches!(err, CodecError::TypeMismatch { .. }), "{backend}");
    }
}

#[test]
fn test_unknown_tag_rejected() {
    let mut bytes = LEAF_BYTES;
    bytes[..4].copy_from_slice(&99i32.to_le_bytes());
    for (backend, serializer) in all_serializers() {
        let err = serializer.deserialize(&bytes, "Base").unwrap_err();
        assert!(matches!(err, CodecError::UnknownType { .. }), "{backend}");
    }
}

#[test]
fn test_tag_of_non_subtype_rejected() {
    let mut bytes = LEAF_BYTES;
    // Scene is registered but unrelated to Base
    bytes[..4].copy_from_slice(&5i32.to_le_bytes());
    for (backend, serializer) in all_serializers() {
        let err = serializer.deserialize(&bytes, "Base").unwrap_err();
        assert!(matches!(err, CodecError::TypeMismatch { .. }), "{backend}");
    }
}

#[test]
fn test_unregistered_runtime_type_rejected() {
    let value = Value::Object(Object::new("Ghost").with("i", 1));
    for (backend, serializer) in all_serializers() {
        let err = serializer.serialize_as("Base", &value).unwrap_err();
        assert!(matches!(err, CodecError::UnknownType { .. }), "{backend}");
    }
}

// ============================================================================
// Field Participation
// ============================================================================

#[test]
fn test_non_participating_fields_ignored() {
    let plain = scene();
    let mut noisy = plain.as_object().unwrap().clone();
    noisy.set("cache", 99);
    noisy.set("secret", "hidden");
    noisy.set("unrelated", Value::Bytes(vec![1, 2, 3]));
    for (backend, serializer) in all_serializers() {
        assert_eq!(
            serializer.serialize(&Value::Object(noisy.clone())).unwrap(),
            serializer.serialize(&plain).unwrap(),
            "{backend}"
        );
    }
}

#[test]
fn test_missing_field_rejected() {
    let value = Value::Object(Object::new("Base").with("i", 1));
    for (backend, serializer) in all_serializers() {
        let err = serializer.serialize(&value).unwrap_err();
        match err {
            CodecError::MissingField {
                type_name,
                field_name,
            } => {
                assert_eq!(type_name, "Base", "{backend}");
                assert_eq!(field_name, "s", "{backend}");
            }
            other => panic!("{backend}: unexpected error: {other}"),
        }
    }
}

#[test]
fn test_wrong_field_shape_rejected() {
    let value = Value::Object(Object::new("Base").with("i", 1i64).with("s", "x"));
    for (backend, serializer) in all_serializers() {
        let err = serializer.serialize(&value).unwrap_err();
        assert!(matches!(err, CodecError::InvalidValue { .. }), "{backend}");
    }
}
