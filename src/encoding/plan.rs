// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Codec derivation.
//!
//! A codec plan lists, for one struct/class, the encode/decode step of each
//! participating field in ordinal order. Every backend realizes the same plan:
//! the interpreter walks it directly, the ahead-of-time compiler lowers it to
//! flat instructions and the source emitter renders it as Rust code.
//!
//! Nested struct references are by id, so recursive types derive without
//! recursing into themselves.

use std::fmt;

use tracing::debug;

use crate::core::{CodecError, PrimitiveKind, Result as CoreResult, TypeId, TypeKind, TypeRegistry};
use crate::schema::FieldType;

/// How one value is written and read.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ValueOp {
    /// Direct cursor call.
    Primitive(PrimitiveKind),

    /// Enumeration member, carried as its underlying integer.
    Enum {
        /// Enum type id
        type_id: TypeId,
        /// Underlying integer kind
        repr: PrimitiveKind,
    },

    /// Call the nested type's codec; it alone decides whether a tag is written.
    Nested {
        /// Declared type id
        type_id: TypeId,
    },

    /// `i32` count, then each element.
    Array(Box<ValueOp>),

    /// `i32` count, then each element.
    Sequence(Box<ValueOp>),
}

impl ValueOp {
    /// Nesting depth of containers around the innermost op.
    pub fn container_depth(&self) -> usize {
        match self {
            ValueOp::Array(inner) | ValueOp::Sequence(inner) => 1 + inner.container_depth(),
            _ => 0,
        }
    }
}

impl fmt::Display for ValueOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueOp::Primitive(kind) => write!(f, "{kind}"),
            ValueOp::Enum { type_id, repr } => write!(f, "enum#{type_id}({repr})"),
            ValueOp::Nested { type_id } => write!(f, "nested#{type_id}"),
            ValueOp::Array(inner) => write!(f, "array<{inner}>"),
            ValueOp::Sequence(inner) => write!(f, "list<{inner}>"),
        }
    }
}

/// One participating field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldStep {
    /// Position in the flattened layout
    pub ordinal: usize,
    /// Field name (object key)
    pub name: String,
    /// How the field value is encoded
    pub op: ValueOp,
}

/// Ordered encode/decode steps for one struct/class.
#[derive(Debug, Clone, PartialEq)]
pub struct CodecPlan {
    /// Type id
    pub type_id: TypeId,
    /// Type name
    pub type_name: String,
    /// Whether the type's encoding starts with its id
    pub polymorphic: bool,
    /// Steps in ordinal order
    pub steps: Vec<FieldStep>,
}

impl CodecPlan {
    /// Get the number of steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Check if the plan has no steps.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

impl fmt::Display for CodecPlan {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let tag = if self.polymorphic { " [tagged]" } else { "" };
        writeln!(
            f,
            "CodecPlan for '{}' (#{}){tag}:",
            self.type_name, self.type_id
        )?;
        for step in &self.steps {
            writeln!(f, "  {:3}: {} {}", step.ordinal, step.name, step.op)?;
        }
        Ok(())
    }
}

/// Derive the plan for a registered struct/class.
pub fn derive_plan(registry: &TypeRegistry, type_id: TypeId) -> CoreResult<CodecPlan> {
    let ty = registry.type_of(type_id)?;
    let info = registry.struct_info(type_id)?;

    let steps = info
        .layout
        .iter()
        .map(|field| {
            Ok(FieldStep {
                ordinal: field.ordinal,
                name: field.name.clone(),
                op: classify(registry, &ty.name, &field.name, &field.field_type)?,
            })
        })
        .collect::<CoreResult<Vec<_>>>()?;

    debug!(type_name = %ty.name, steps = steps.len(), "derived codec plan");
    Ok(CodecPlan {
        type_id,
        type_name: ty.name.clone(),
        polymorphic: info.polymorphic,
        steps,
    })
}

/// Classify a declared field type into the op that encodes it.
///
/// Named types must be registered; anything else is
/// [`CodecError::UnsupportedFieldType`].
pub fn classify(
    registry: &TypeRegistry,
    owner: &str,
    field: &str,
    field_type: &FieldType,
) -> CoreResult<ValueOp> {
    match field_type {
        FieldType::Primitive(kind) => Ok(ValueOp::Primitive(*kind)),
        FieldType::Array(element) => Ok(ValueOp::Array(Box::new(classify(
            registry, owner, field, element,
        )?))),
        FieldType::Sequence(element) => Ok(ValueOp::Sequence(Box::new(classify(
            registry, owner, field, element,
        )?))),
        FieldType::Named(name) => {
            let target = registry
                .get(name)
                .ok_or_else(|| CodecError::unsupported_field(owner, field, name))?;
            Ok(match &target.kind {
                TypeKind::Enum(info) => ValueOp::Enum {
                    type_id: target.id,
                    repr: info.repr,
                },
                TypeKind::Struct(_) => ValueOp::Nested { type_id: target.id },
            })
        }
    }
}
