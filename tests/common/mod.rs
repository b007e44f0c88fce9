// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Common utilities for integration tests.

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use polycodec::core::{PrimitiveKind, TypeRegistry};
use polycodec::encoding::{compile_unit, CompiledUnit};
use polycodec::schema::{Catalog, EnumDescriptor, FieldDescriptor, FieldType, TypeDescriptor};
use polycodec::{Object, Serializer, Value};

#[path = "../generated/zoo_codecs.rs"]
pub mod zoo_codecs;

// ============================================================================
// Fixtures
// ============================================================================

/// Path to a file under `tests/fixtures`.
pub fn fixture_path(name: &str) -> PathBuf {
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(manifest_dir)
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Path to a file under `tests/generated`.
pub fn generated_path(name: &str) -> PathBuf {
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(manifest_dir)
        .join("tests")
        .join("generated")
        .join(name)
}

/// The zoo catalog, built in code. Mirrors `tests/fixtures/zoo.toml`.
///
/// Ids: Color 0, Vec2 1, Base 2, Middle 3, Leaf 4, Scene 5, Node 6.
pub fn zoo_catalog() -> Catalog {
    Catalog::new()
        .with_enum(
            EnumDescriptor::new("Color", PrimitiveKind::UInt8)
                .variant("Red", 0)
                .variant("Green", 1)
                .variant("Blue", 2),
        )
        .with_type(
            TypeDescriptor::value("Vec2")
                .field("x", PrimitiveKind::Float32)
                .field("y", PrimitiveKind::Float32),
        )
        .with_type(
            TypeDescriptor::reference("Base")
                .field("i", PrimitiveKind::Int32)
                .field("s", PrimitiveKind::String),
        )
        .with_type(
            TypeDescriptor::reference("Middle")
                .extends("Base")
                .field("flag", PrimitiveKind::Bool)
                .field("color", FieldType::named("Color")),
        )
        .with_type(
            TypeDescriptor::reference("Leaf")
                .extends("Middle")
                .field("tags", FieldType::sequence_of(PrimitiveKind::String.into()))
                .field("origin", FieldType::named("Vec2"))
                .field("letter", PrimitiveKind::Char),
        )
        .with_type(
            TypeDescriptor::reference("Scene")
                .field("name", PrimitiveKind::String)
                .field("shapes", FieldType::sequence_of(FieldType::named("Base")))
                .field("corners", FieldType::array_of(FieldType::named("Vec2")))
                .field("payload", PrimitiveKind::Bytes)
                .field(
                    "grid",
                    FieldType::sequence_of(FieldType::array_of(PrimitiveKind::Int16.into())),
                )
                .field("tiny", PrimitiveKind::Int8)
                .field("level", PrimitiveKind::UInt8)
                .field("small", PrimitiveKind::UInt16)
                .field("mid", PrimitiveKind::UInt32)
                .field("wide", PrimitiveKind::UInt64)
                .field("ratio", PrimitiveKind::Float64)
                .with_field(FieldDescriptor::new("cache", PrimitiveKind::Int32).included(false))
                .with_field(FieldDescriptor::new("secret", PrimitiveKind::String).private())
                .with_field(
                    FieldDescriptor::new("seed", PrimitiveKind::Int64)
                        .private()
                        .included(true),
                ),
        )
        .with_type(
            TypeDescriptor::reference("Node")
                .field("label", PrimitiveKind::String)
                .field("children", FieldType::sequence_of(FieldType::named("Node"))),
        )
}

/// Initialized zoo registry.
pub fn zoo_registry() -> Arc<TypeRegistry> {
    Arc::new(zoo_catalog().build().expect("zoo catalog is valid"))
}

/// Unit compiled from the zoo, saved and reloaded.
pub fn zoo_unit(registry: &TypeRegistry) -> CompiledUnit {
    let bytes = compile_unit(registry)
        .expect("zoo compiles")
        .to_bytes()
        .expect("unit serializes");
    CompiledUnit::from_bytes(&bytes).expect("unit reloads")
}

/// One serializer per backend, all over the same registry.
pub fn all_serializers() -> Vec<(&'static str, Serializer)> {
    let registry = zoo_registry();
    vec![
        ("interpreted", Serializer::interpreted(Arc::clone(&registry))),
        (
            "aot",
            Serializer::ahead_of_time(Arc::clone(&registry), zoo_unit(&registry))
                .expect("unit links"),
        ),
        (
            "generated",
            Serializer::generated(Arc::clone(&registry), &zoo_codecs::MODULE)
                .expect("generated module binds"),
        ),
    ]
}

// ============================================================================
// Values
// ============================================================================

pub fn vec2(x: f32, y: f32) -> Value {
    Value::Object(Object::new("Vec2").with("x", x).with("y", y))
}

pub fn base(i: i32, s: &str) -> Value {
    Value::Object(Object::new("Base").with("i", i).with("s", s))
}

pub fn middle(i: i32, s: &str, flag: bool, color: i64) -> Value {
    Value::Object(
        Object::new("Middle")
            .with("i", i)
            .with("s", s)
            .with("flag", flag)
            .with("color", Value::Enum(color)),
    )
}

pub fn leaf(i: i32, s: &str, tags: &[&str], letter: char) -> Value {
    Value::Object(
        Object::new("Leaf")
            .with("i", i)
            .with("s", s)
            .with("flag", true)
            .with("color", Value::Enum(2))
            .with(
                "tags",
                Value::Sequence(tags.iter().map(|t| Value::from(*t)).collect()),
            )
            .with("origin", vec2(1.0, 2.0))
            .with("letter", letter),
    )
}

/// A scene touching every field kind.
pub fn scene() -> Value {
    Value::Object(
        Object::new("Scene")
            .with("name", "scene")
            .with(
                "shapes",
                Value::Sequence(vec![
                    base(1, "b"),
                    middle(2, "m", false, 1),
                    leaf(3, "l", &["x", "yz"], 'λ'),
                ]),
            )
            .with("corners", Value::Array(vec![vec2(0.0, 0.0), vec2(1.5, -2.0)]))
            .with("payload", Value::Bytes(vec![0xde, 0xad, 0xbe, 0xef]))
            .with(
                "grid",
                Value::Sequence(vec![
                    Value::Array(vec![1i16.into(), 2i16.into(), 3i16.into()]),
                    Value::Array(vec![]),
                    Value::Array(vec![(-1i16).into()]),
                ]),
            )
            .with("tiny", -5i8)
            .with("level", 200u8)
            .with("small", 60_000u16)
            .with("mid", 4_000_000_000u32)
            .with("wide", u64::MAX)
            .with("ratio", 0.25f64)
            .with("seed", -42i64),
    )
}

/// A chain of `depth` nested nodes.
pub fn node_chain(depth: usize) -> Value {
    let mut node = Object::new("Node")
        .with("label", format!("n{depth}"))
        .with("children", Value::Sequence(vec![]));
    for level in (1..depth).rev() {
        node = Object::new("Node")
            .with("label", format!("n{level}"))
            .with("children", Value::Sequence(vec![Value::Object(node)]));
    }
    Value::Object(node)
}
