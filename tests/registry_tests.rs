// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Registry initialization tests: ids, inheritance, layouts and rejection of
//! invalid descriptor sets.

mod common;

use polycodec::core::{PrimitiveKind, RegistryBuilder};
use polycodec::schema::{Catalog, EnumDescriptor, FieldType, TypeDescriptor};
use polycodec::CodecError;

use common::{fixture_path, zoo_catalog, zoo_registry};

#[test]
fn test_ids_follow_registration_order() {
    let registry = zoo_registry();
    let names: Vec<_> = registry.iter().map(|t| (t.id, t.name.as_str())).collect();
    assert_eq!(
        names,
        [
            (0, "Color"),
            (1, "Vec2"),
            (2, "Base"),
            (3, "Middle"),
            (4, "Leaf"),
            (5, "Scene"),
            (6, "Node"),
        ]
    );
}

#[test]
fn test_polymorphism_flags() {
    let registry = zoo_registry();
    for name in ["Base", "Middle", "Leaf"] {
        assert!(registry.is_polymorphic(registry.id_of(name).unwrap()), "{name}");
    }
    for name in ["Color", "Vec2", "Scene", "Node"] {
        assert!(!registry.is_polymorphic(registry.id_of(name).unwrap()), "{name}");
    }
}

#[test]
fn test_subtype_relation() {
    let registry = zoo_registry();
    assert!(registry.is_subtype(4, 2));
    assert!(registry.is_subtype(4, 3));
    assert!(registry.is_subtype(3, 2));
    assert!(!registry.is_subtype(2, 4));
    assert!(!registry.is_subtype(2, 2));
    assert!(registry.is_assignable(2, 2));
    assert!(!registry.is_assignable(5, 2));

    let base = registry.struct_info(2).unwrap();
    assert_eq!(base.subtypes, vec![3]);
    assert_eq!(registry.struct_info(4).unwrap().base, Some(3));
}

#[test]
fn test_layout_is_root_first() {
    let registry = zoo_registry();
    let leaf = registry.struct_info(4).unwrap();
    let fields: Vec<_> = leaf
        .layout
        .iter()
        .map(|f| (f.ordinal, f.name.as_str(), f.declared_in))
        .collect();
    assert_eq!(
        fields,
        [
            (0, "i", 2),
            (1, "s", 2),
            (2, "flag", 3),
            (3, "color", 3),
            (4, "tags", 4),
            (5, "origin", 4),
            (6, "letter", 4),
        ]
    );
}

#[test]
fn test_field_participation() {
    let registry = zoo_registry();
    let scene = registry.struct_info(5).unwrap();
    let names: Vec<_> = scene.layout.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names.len(), 12);
    assert!(!names.contains(&"cache"));
    assert!(!names.contains(&"secret"));
    assert_eq!(names.last(), Some(&"seed"));
}

#[test]
fn test_toml_fixture_matches_code() {
    let from_file = Catalog::load(fixture_path("zoo.toml")).unwrap();
    assert_eq!(from_file, zoo_catalog());
    assert_eq!(
        from_file.build().unwrap().fingerprint(),
        zoo_registry().fingerprint()
    );
}

#[test]
fn test_fingerprint_tracks_layout() {
    let original = zoo_registry().fingerprint();
    let changed = zoo_catalog()
        .with_type(TypeDescriptor::value("Extra").field("z", PrimitiveKind::Int8))
        .build()
        .unwrap()
        .fingerprint();
    assert_ne!(original, changed);
}

#[test]
fn test_duplicate_name_leaves_builder_unchanged() {
    let mut builder = RegistryBuilder::new();
    builder.register_type(TypeDescriptor::reference("A")).unwrap();
    let err = builder
        .register_enum(EnumDescriptor::new("A", PrimitiveKind::Int32))
        .unwrap_err();
    assert!(matches!(err, CodecError::DuplicateType { .. }));
    assert_eq!(builder.len(), 1);
    builder.initialize().unwrap();
}

#[test]
fn test_unknown_base_rejected() {
    let mut builder = RegistryBuilder::new();
    builder
        .register_type(TypeDescriptor::reference("A").extends("Missing"))
        .unwrap();
    assert!(matches!(
        builder.initialize().unwrap_err(),
        CodecError::InvalidDescriptor { .. }
    ));
}

#[test]
fn test_value_type_cannot_inherit() {
    let mut builder = RegistryBuilder::new();
    builder.register_type(TypeDescriptor::reference("A")).unwrap();
    builder
        .register_type(TypeDescriptor::value("B").extends("A"))
        .unwrap();
    assert!(matches!(
        builder.initialize().unwrap_err(),
        CodecError::InvalidDescriptor { .. }
    ));
}

#[test]
fn test_inheritance_cycle_rejected() {
    let mut builder = RegistryBuilder::new();
    builder
        .register_type(TypeDescriptor::reference("A").extends("B"))
        .unwrap();
    builder
        .register_type(TypeDescriptor::reference("B").extends("A"))
        .unwrap();
    assert!(builder.initialize().is_err());
}

#[test]
fn test_unresolvable_field_type() {
    let mut builder = RegistryBuilder::new();
    builder
        .register_type(TypeDescriptor::reference("A").field("x", FieldType::named("Ghost")))
        .unwrap();
    match builder.initialize().unwrap_err() {
        CodecError::UnsupportedFieldType {
            type_name,
            field_name,
            field_type,
        } => {
            assert_eq!(type_name, "A");
            assert_eq!(field_name, "x");
            assert_eq!(field_type, "Ghost");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_excluded_field_type_is_not_checked() {
    let mut builder = RegistryBuilder::new();
    builder
        .register_type(
            TypeDescriptor::reference("A").with_field(
                polycodec::schema::FieldDescriptor::new("x", FieldType::named("Ghost")).private(),
            ),
        )
        .unwrap();
    builder.initialize().unwrap();
}

#[test]
fn test_enum_repr_must_be_integer() {
    let mut builder = RegistryBuilder::new();
    builder
        .register_enum(EnumDescriptor::new("E", PrimitiveKind::Float32))
        .unwrap();
    assert!(builder.initialize().is_err());
}

#[test]
fn test_direct_self_containment_rejected() {
    let mut builder = RegistryBuilder::new();
    builder
        .register_type(TypeDescriptor::reference("Loop").field("next", FieldType::named("Loop")))
        .unwrap();
    assert!(matches!(
        builder.initialize().unwrap_err(),
        CodecError::InvalidDescriptor { .. }
    ));
}
