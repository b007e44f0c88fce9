// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Descriptor types for registered structs, classes and enums.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::{CodecError, PrimitiveKind};

/// Declared type of a field.
///
/// Catalog spelling: a primitive name (`int32`, `string`, `bytes`, ...),
/// `T[]` for a fixed-size array, `list<T>` for a growable list, or any other
/// name for a registered struct/class/enum.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum FieldType {
    /// Primitive type
    Primitive(PrimitiveKind),
    /// Fixed-size array of the element type
    Array(Box<FieldType>),
    /// Growable list of the element type
    Sequence(Box<FieldType>),
    /// Registered struct, class or enum, resolved at initialization
    Named(String),
}

impl FieldType {
    /// Shorthand for a named field type.
    pub fn named(name: impl Into<String>) -> Self {
        FieldType::Named(name.into())
    }

    /// Shorthand for an array of `element`.
    pub fn array_of(element: FieldType) -> Self {
        FieldType::Array(Box::new(element))
    }

    /// Shorthand for a list of `element`.
    pub fn sequence_of(element: FieldType) -> Self {
        FieldType::Sequence(Box::new(element))
    }

    /// Parse the catalog spelling.
    ///
    /// Only empty input fails here. Unknown names parse as [`FieldType::Named`]
    /// and are rejected later, when the registry initializes.
    pub fn parse(s: &str) -> Result<Self, CodecError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(CodecError::invalid_descriptor("", "empty field type"));
        }

        if let Some(element) = s.strip_suffix("[]") {
            return Ok(FieldType::array_of(Self::parse(element)?));
        }

        let lower = s.to_ascii_lowercase();
        if lower.starts_with("list<") && s.ends_with('>') {
            let inner = &s["list<".len()..s.len() - 1];
            return Ok(FieldType::sequence_of(Self::parse(inner)?));
        }

        Ok(match PrimitiveKind::try_from_str(s) {
            Some(kind) => FieldType::Primitive(kind),
            None => FieldType::Named(s.to_string()),
        })
    }

    /// Element type of an array or list.
    pub fn element(&self) -> Option<&FieldType> {
        match self {
            FieldType::Array(e) | FieldType::Sequence(e) => Some(e),
            _ => None,
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldType::Primitive(kind) => write!(f, "{kind}"),
            FieldType::Array(element) => write!(f, "{element}[]"),
            FieldType::Sequence(element) => write!(f, "list<{element}>"),
            FieldType::Named(name) => f.write_str(name),
        }
    }
}

impl FromStr for FieldType {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for FieldType {
    type Error = CodecError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<FieldType> for String {
    fn from(ty: FieldType) -> Self {
        ty.to_string()
    }
}

impl From<PrimitiveKind> for FieldType {
    fn from(kind: PrimitiveKind) -> Self {
        FieldType::Primitive(kind)
    }
}

/// Field visibility as declared by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    /// Publicly visible
    #[default]
    Public,
    /// Private or otherwise non-public
    Private,
}

/// Whether instances are copied values or shared references.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Semantics {
    /// Copied by value; never tagged, never part of an inheritance family
    Value,
    /// Reference type; may take part in inheritance
    #[default]
    Reference,
}

/// A declared field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Field name
    pub name: String,
    /// Declared type
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// Declared visibility
    #[serde(default)]
    pub visibility: Visibility,
    /// Explicit include/exclude marker, overriding the visibility default
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include: Option<bool>,
}

impl FieldDescriptor {
    /// Create a public field.
    pub fn new(name: impl Into<String>, field_type: impl Into<FieldType>) -> Self {
        Self {
            name: name.into(),
            field_type: field_type.into(),
            visibility: Visibility::Public,
            include: None,
        }
    }

    /// Mark the field private.
    pub fn private(mut self) -> Self {
        self.visibility = Visibility::Private;
        self
    }

    /// Set the explicit inclusion marker.
    pub fn included(mut self, include: bool) -> Self {
        self.include = Some(include);
        self
    }

    /// Whether the field participates in serialization.
    ///
    /// Public fields do unless explicitly excluded; private fields only when
    /// explicitly included.
    pub fn is_included(&self) -> bool {
        self.include
            .unwrap_or(self.visibility == Visibility::Public)
    }
}

/// A registered struct or class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeDescriptor {
    /// Type name, unique within a registry
    pub name: String,
    /// Value or reference semantics
    #[serde(default)]
    pub semantics: Semantics,
    /// Immediate base type, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base: Option<String>,
    /// Fields declared by this type, in declaration order
    #[serde(default)]
    pub fields: Vec<FieldDescriptor>,
}

impl TypeDescriptor {
    /// Start a reference-type descriptor.
    pub fn reference(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            semantics: Semantics::Reference,
            base: None,
            fields: Vec::new(),
        }
    }

    /// Start a value-type descriptor.
    pub fn value(name: impl Into<String>) -> Self {
        Self {
            semantics: Semantics::Value,
            ..Self::reference(name)
        }
    }

    /// Set the immediate base type.
    pub fn extends(mut self, base: impl Into<String>) -> Self {
        self.base = Some(base.into());
        self
    }

    /// Append a public field.
    pub fn field(self, name: impl Into<String>, field_type: impl Into<FieldType>) -> Self {
        self.with_field(FieldDescriptor::new(name, field_type))
    }

    /// Append a fully specified field.
    pub fn with_field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }
}

/// A registered enumeration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumDescriptor {
    /// Enum name, unique within a registry
    pub name: String,
    /// Underlying integer kind
    #[serde(default = "default_enum_repr")]
    pub repr: PrimitiveKind,
    /// Named members; informational, decoded values are not checked against them
    #[serde(default)]
    pub variants: BTreeMap<String, i64>,
}

fn default_enum_repr() -> PrimitiveKind {
    PrimitiveKind::Int32
}

impl EnumDescriptor {
    /// Create an enum with the given underlying integer kind.
    pub fn new(name: impl Into<String>, repr: PrimitiveKind) -> Self {
        Self {
            name: name.into(),
            repr,
            variants: BTreeMap::new(),
        }
    }

    /// Add a named member.
    pub fn variant(mut self, name: impl Into<String>, value: i64) -> Self {
        self.variants.insert(name.into(), value);
        self
    }
}
