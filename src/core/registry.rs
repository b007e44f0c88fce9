// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Polymorphic type registry.
//!
//! Types are registered on a [`RegistryBuilder`] and frozen by
//! [`RegistryBuilder::initialize`], which assigns dense ids in registration
//! order, resolves inheritance, flattens each type's participating fields
//! (base fields first) and validates every field type. The resulting
//! [`TypeRegistry`] is immutable and meant to be shared behind an `Arc`.

use std::collections::{BTreeMap, HashMap};

use tracing::{debug, warn};

use super::error::{CodecError, Result};
use super::value::PrimitiveKind;
use crate::schema::{EnumDescriptor, FieldType, Semantics, TypeDescriptor};

/// Numeric type identifier; also the polymorphic tag on the wire.
pub type TypeId = i32;

/// A participating field in a type's flattened layout.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutField {
    /// Position in the flattened layout
    pub ordinal: usize,
    /// Field name
    pub name: String,
    /// Type that declares the field
    pub declared_in: TypeId,
    /// Declared field type
    pub field_type: FieldType,
}

/// Registration data of a struct or class.
#[derive(Debug, Clone, PartialEq)]
pub struct StructInfo {
    /// Value or reference semantics
    pub semantics: Semantics,
    /// Immediate base type
    pub base: Option<TypeId>,
    /// Immediate subtypes, in registration order
    pub subtypes: Vec<TypeId>,
    /// Whether encodes of this type carry a tag
    pub polymorphic: bool,
    /// Participating fields, base fields first
    pub layout: Vec<LayoutField>,
}

/// Registration data of an enumeration.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumInfo {
    /// Underlying integer kind
    pub repr: PrimitiveKind,
    /// Named members
    pub variants: BTreeMap<String, i64>,
}

/// What a registered type is.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeKind {
    /// Struct or class
    Struct(StructInfo),
    /// Enumeration
    Enum(EnumInfo),
}

/// A registered type with its assigned id.
#[derive(Debug, Clone, PartialEq)]
pub struct RegisteredType {
    /// Dense id
    pub id: TypeId,
    /// Unique name
    pub name: String,
    /// Struct/class or enum data
    pub kind: TypeKind,
}

impl RegisteredType {
    /// Struct data, if this is a struct or class.
    pub fn as_struct(&self) -> Option<&StructInfo> {
        match &self.kind {
            TypeKind::Struct(info) => Some(info),
            TypeKind::Enum(_) => None,
        }
    }

    /// Enum data, if this is an enumeration.
    pub fn as_enum(&self) -> Option<&EnumInfo> {
        match &self.kind {
            TypeKind::Enum(info) => Some(info),
            TypeKind::Struct(_) => None,
        }
    }

    /// Whether encodes of this type carry a tag.
    pub fn is_polymorphic(&self) -> bool {
        self.as_struct().is_some_and(|s| s.polymorphic)
    }
}

#[derive(Debug, Clone)]
enum Pending {
    Type(TypeDescriptor),
    Enum(EnumDescriptor),
}

impl Pending {
    fn name(&self) -> &str {
        match self {
            Pending::Type(d) => &d.name,
            Pending::Enum(d) => &d.name,
        }
    }
}

/// Collects type registrations until [`initialize`](RegistryBuilder::initialize).
#[derive(Debug, Clone, Default)]
pub struct RegistryBuilder {
    entries: Vec<Pending>,
    index: HashMap<String, usize>,
}

impl RegistryBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered types.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if nothing is registered yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Register a struct or class. Its id is the number of types registered
    /// before it.
    pub fn register_type(&mut self, desc: TypeDescriptor) -> Result<TypeId> {
        self.push(Pending::Type(desc))
    }

    /// Register an enumeration.
    pub fn register_enum(&mut self, desc: EnumDescriptor) -> Result<TypeId> {
        self.push(Pending::Enum(desc))
    }

    fn push(&mut self, entry: Pending) -> Result<TypeId> {
        let name = entry.name().to_string();
        if self.index.contains_key(&name) {
            warn!(type_name = %name, "rejecting duplicate type registration");
            return Err(CodecError::duplicate_type(name));
        }
        let id = self.entries.len();
        let id = TypeId::try_from(id)
            .map_err(|_| CodecError::limit_exceeded("type registry", id, TypeId::MAX as usize))?;
        debug!(type_name = %name, id, "registered type");
        self.index.insert(name, self.entries.len());
        self.entries.push(entry);
        Ok(id)
    }

    /// Freeze the registry.
    ///
    /// Fails with [`CodecError::InvalidDescriptor`] on inconsistent
    /// inheritance, duplicate field names or bad enum reprs, and with
    /// [`CodecError::UnsupportedFieldType`] when a participating field has a
    /// type no codec can be derived for.
    pub fn initialize(self) -> Result<TypeRegistry> {
        let ids: HashMap<String, TypeId> = self
            .index
            .iter()
            .map(|(name, &idx)| (name.clone(), idx as TypeId))
            .collect();

        let bases = self.resolve_bases(&ids)?;
        check_inheritance_cycles(&self.entries, &bases)?;

        let mut subtypes: Vec<Vec<TypeId>> = vec![Vec::new(); self.entries.len()];
        for (idx, base) in bases.iter().enumerate() {
            if let Some(base) = base {
                subtypes[*base as usize].push(idx as TypeId);
            }
        }

        let mut types = Vec::with_capacity(self.entries.len());
        for (idx, entry) in self.entries.iter().enumerate() {
            let id = idx as TypeId;
            let kind = match entry {
                Pending::Enum(desc) => {
                    if !desc.repr.is_integer() {
                        return Err(CodecError::invalid_descriptor(
                            &desc.name,
                            format!("enum repr must be an integer kind, got {}", desc.repr),
                        ));
                    }
                    TypeKind::Enum(EnumInfo {
                        repr: desc.repr,
                        variants: desc.variants.clone(),
                    })
                }
                Pending::Type(desc) => {
                    let layout = flatten_layout(&self.entries, &bases, idx)?;
                    let polymorphic = desc.semantics == Semantics::Reference
                        && (bases[idx].is_some() || !subtypes[idx].is_empty());
                    TypeKind::Struct(StructInfo {
                        semantics: desc.semantics,
                        base: bases[idx],
                        subtypes: subtypes[idx].clone(),
                        polymorphic,
                        layout,
                    })
                }
            };
            types.push(RegisteredType {
                id,
                name: entry.name().to_string(),
                kind,
            });
        }

        let registry = TypeRegistry { types, ids };

        for ty in registry.iter() {
            if ty.as_struct().is_some() {
                crate::encoding::plan::derive_plan(&registry, ty.id)?;
            }
        }
        check_containment_cycles(&registry)?;

        debug!(
            types = registry.len(),
            fingerprint = %format!("{:08x}", registry.fingerprint()),
            "type registry initialized"
        );
        Ok(registry)
    }

    fn resolve_bases(&self, ids: &HashMap<String, TypeId>) -> Result<Vec<Option<TypeId>>> {
        self.entries
            .iter()
            .map(|entry| {
                let Pending::Type(desc) = entry else {
                    return Ok(None);
                };
                let Some(base_name) = &desc.base else {
                    return Ok(None);
                };
                if desc.semantics == Semantics::Value {
                    return Err(CodecError::invalid_descriptor(
                        &desc.name,
                        "value types cannot have a base type",
                    ));
                }
                let base_id = *ids.get(base_name).ok_or_else(|| {
                    CodecError::invalid_descriptor(
                        &desc.name,
                        format!("base type '{base_name}' is not registered"),
                    )
                })?;
                match &self.entries[base_id as usize] {
                    Pending::Type(base) if base.semantics == Semantics::Reference => {
                        Ok(Some(base_id))
                    }
                    _ => Err(CodecError::invalid_descriptor(
                        &desc.name,
                        format!("base type '{base_name}' is not a reference type"),
                    )),
                }
            })
            .collect()
    }
}

fn check_inheritance_cycles(entries: &[Pending], bases: &[Option<TypeId>]) -> Result<()> {
    for start in 0..bases.len() {
        let mut current = bases[start];
        let mut steps = 0;
        while let Some(base) = current {
            if base as usize == start || steps > bases.len() {
                return Err(CodecError::invalid_descriptor(
                    entries[start].name(),
                    "inheritance cycle",
                ));
            }
            current = bases[base as usize];
            steps += 1;
        }
    }
    Ok(())
}

fn flatten_layout(
    entries: &[Pending],
    bases: &[Option<TypeId>],
    idx: usize,
) -> Result<Vec<LayoutField>> {
    // root first
    let mut chain = vec![idx];
    let mut current = bases[idx];
    while let Some(base) = current {
        chain.push(base as usize);
        current = bases[base as usize];
    }
    chain.reverse();

    let mut layout: Vec<LayoutField> = Vec::new();
    for owner in chain {
        let Pending::Type(desc) = &entries[owner] else {
            continue;
        };
        for field in desc.fields.iter().filter(|f| f.is_included()) {
            if layout.iter().any(|existing| existing.name == field.name) {
                return Err(CodecError::invalid_descriptor(
                    entries[idx].name(),
                    format!("field '{}' is declared more than once", field.name),
                ));
            }
            layout.push(LayoutField {
                ordinal: layout.len(),
                name: field.name.clone(),
                declared_in: owner as TypeId,
                field_type: field.field_type.clone(),
            });
        }
    }
    Ok(layout)
}

/// Reject types that contain themselves through plain (non-container)
/// fields: no finite value of such a type exists.
fn check_containment_cycles(registry: &TypeRegistry) -> Result<()> {
    #[derive(Clone, Copy, PartialEq)]
    enum Mark {
        Unvisited,
        Active,
        Done,
    }

    fn visit(registry: &TypeRegistry, id: TypeId, marks: &mut [Mark]) -> Result<()> {
        match marks[id as usize] {
            Mark::Done => return Ok(()),
            Mark::Active => {
                return Err(CodecError::invalid_descriptor(
                    registry.name_of(id),
                    "type contains itself through non-container fields",
                ))
            }
            Mark::Unvisited => {}
        }
        marks[id as usize] = Mark::Active;
        if let Some(info) = registry.types[id as usize].as_struct() {
            for field in &info.layout {
                if let FieldType::Named(name) = &field.field_type {
                    if let Some(target) = registry.get(name).filter(|t| t.as_struct().is_some()) {
                        visit(registry, target.id, marks)?;
                    }
                }
            }
        }
        marks[id as usize] = Mark::Done;
        Ok(())
    }

    let mut marks = vec![Mark::Unvisited; registry.len()];
    for ty in registry.iter() {
        visit(registry, ty.id, &mut marks)?;
    }
    Ok(())
}

/// Immutable, initialized type registry.
#[derive(Debug, Clone)]
pub struct TypeRegistry {
    types: Vec<RegisteredType>,
    ids: HashMap<String, TypeId>,
}

impl TypeRegistry {
    /// Number of registered types.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Iterate over registered types in id order.
    pub fn iter(&self) -> impl Iterator<Item = &RegisteredType> {
        self.types.iter()
    }

    /// Look up a type by name.
    pub fn get(&self, name: &str) -> Option<&RegisteredType> {
        self.ids.get(name).map(|&id| &self.types[id as usize])
    }

    /// Id of a registered type.
    pub fn id_of(&self, name: &str) -> Result<TypeId> {
        self.ids
            .get(name)
            .copied()
            .ok_or_else(|| CodecError::unknown_type(name))
    }

    /// Registered type for an id.
    pub fn type_of(&self, id: TypeId) -> Result<&RegisteredType> {
        usize::try_from(id)
            .ok()
            .and_then(|idx| self.types.get(idx))
            .ok_or_else(|| CodecError::unknown_type_id(id))
    }

    /// Struct data for an id; enums are rejected.
    pub fn struct_info(&self, id: TypeId) -> Result<&StructInfo> {
        let ty = self.type_of(id)?;
        ty.as_struct().ok_or_else(|| {
            CodecError::invalid_descriptor(&ty.name, "expected a struct or class, found an enum")
        })
    }

    /// Name of a type, or `#id` when the id is unknown.
    pub fn name_of(&self, id: TypeId) -> String {
        self.type_of(id)
            .map(|t| t.name.clone())
            .unwrap_or_else(|_| format!("#{id}"))
    }

    /// Whether encodes of `id` carry a tag.
    pub fn is_polymorphic(&self, id: TypeId) -> bool {
        self.type_of(id).is_ok_and(RegisteredType::is_polymorphic)
    }

    /// Whether `derived` is a strict subtype of `base`.
    pub fn is_subtype(&self, derived: TypeId, base: TypeId) -> bool {
        let mut current = self.struct_info(derived).ok().and_then(|s| s.base);
        while let Some(id) = current {
            if id == base {
                return true;
            }
            current = self.struct_info(id).ok().and_then(|s| s.base);
        }
        false
    }

    /// Whether a value of runtime type `actual` may stand where `declared`
    /// is expected.
    pub fn is_assignable(&self, actual: TypeId, declared: TypeId) -> bool {
        actual == declared || self.is_subtype(actual, declared)
    }

    /// CRC-32 over every name, id, inheritance link and flattened layout.
    ///
    /// Two registries with the same fingerprint produce and accept the same
    /// bytes.
    pub fn fingerprint(&self) -> u32 {
        let mut hasher = crc32fast::Hasher::new();
        for ty in &self.types {
            hasher.update(&ty.id.to_le_bytes());
            hasher.update(ty.name.as_bytes());
            hasher.update(&[0]);
            match &ty.kind {
                TypeKind::Enum(info) => {
                    hasher.update(b"enum");
                    hasher.update(&[info.repr.code()]);
                }
                TypeKind::Struct(info) => {
                    hasher.update(match info.semantics {
                        Semantics::Value => b"value",
                        Semantics::Reference => b"class",
                    });
                    hasher.update(&info.base.unwrap_or(-1).to_le_bytes());
                    for field in &info.layout {
                        hasher.update(field.name.as_bytes());
                        hasher.update(&[b':']);
                        hasher.update(field.field_type.to_string().as_bytes());
                        hasher.update(&[0]);
                    }
                }
            }
        }
        hasher.finalize()
    }
}
