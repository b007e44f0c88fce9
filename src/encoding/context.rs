// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Backend seam and the polymorphic dispatch protocol.
//!
//! A [`CodecBackend`] supplies the per-type encoder and decoder. Whatever the
//! backend, each type codec starts with the same prologue from
//! [`CodecContext`]:
//!
//! - encode: if the object's runtime type differs from the declared one, it
//!   must be a subtype, and the runtime type's encoder takes over on the same
//!   cursor. Otherwise a polymorphic type writes its own id.
//! - decode: a polymorphic type marks, reads the id and, if it names a
//!   subtype, rewinds and hands the cursor to that subtype's decoder, which
//!   reads the id again.
//!
//! The tag is therefore written and consumed exactly once per object.

use std::cell::Cell;

use super::cursor::InputCursor;
use super::output::OutputCursor;
use crate::core::{
    BackendKind, CodecError, Object, Result as CoreResult, TypeId, TypeRegistry, Value,
};

/// Per-type encoder/decoder provider.
pub trait CodecBackend: Send + Sync {
    /// Which backend this is.
    fn kind(&self) -> BackendKind;

    /// Encode `object` as declared type `type_id`, tag included when the type
    /// is polymorphic.
    fn encode_type(
        &self,
        ctx: &CodecContext<'_>,
        type_id: TypeId,
        object: &Object,
        out: &mut OutputCursor,
    ) -> CoreResult<()>;

    /// Decode an object declared as `type_id`; the result may be a subtype.
    fn decode_type(
        &self,
        ctx: &CodecContext<'_>,
        type_id: TypeId,
        input: &mut InputCursor<'_>,
    ) -> CoreResult<Object>;
}

/// Outcome of the encode prologue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodePrologue {
    /// Write the fields of the declared type.
    Proceed,
    /// A subtype's encoder already wrote everything.
    Dispatched,
}

/// Outcome of the decode prologue.
#[derive(Debug, Clone, PartialEq)]
pub enum DecodePrologue {
    /// Read the fields of the declared type.
    Proceed,
    /// A subtype's decoder produced the object.
    Dispatched(Object),
}

/// State of one encode or decode operation.
pub struct CodecContext<'a> {
    registry: &'a TypeRegistry,
    backend: &'a dyn CodecBackend,
    max_depth: usize,
    depth: Cell<usize>,
}

impl<'a> CodecContext<'a> {
    /// Create a context for one operation.
    pub fn new(registry: &'a TypeRegistry, backend: &'a dyn CodecBackend, max_depth: usize) -> Self {
        Self {
            registry,
            backend,
            max_depth,
            depth: Cell::new(0),
        }
    }

    /// The registry types resolve against.
    pub fn registry(&self) -> &'a TypeRegistry {
        self.registry
    }

    /// Current object nesting depth.
    pub fn depth(&self) -> usize {
        self.depth.get()
    }

    fn enter(&self) -> CoreResult<DepthGuard<'_>> {
        let depth = self.depth.get() + 1;
        if depth > self.max_depth {
            return Err(CodecError::DepthExceeded {
                limit: self.max_depth,
            });
        }
        self.depth.set(depth);
        Ok(DepthGuard { depth: &self.depth })
    }

    /// Encode a nested field value declared as `type_id`.
    pub fn encode_nested(
        &self,
        type_id: TypeId,
        value: &Value,
        out: &mut OutputCursor,
    ) -> CoreResult<()> {
        let Value::Object(object) = value else {
            return Err(CodecError::invalid_value(
                self.registry.name_of(type_id),
                "object",
                value.kind_name(),
            ));
        };
        self.encode_object(type_id, object, out)
    }

    /// Encode an object declared as `type_id`.
    pub fn encode_object(
        &self,
        type_id: TypeId,
        object: &Object,
        out: &mut OutputCursor,
    ) -> CoreResult<()> {
        let _guard = self.enter()?;
        self.backend.encode_type(self, type_id, object, out)
    }

    /// Decode a nested object declared as `type_id`.
    pub fn decode_nested(&self, type_id: TypeId, input: &mut InputCursor<'_>) -> CoreResult<Value> {
        self.decode_object(type_id, input).map(Value::Object)
    }

    /// Decode an object declared as `type_id`.
    pub fn decode_object(
        &self,
        type_id: TypeId,
        input: &mut InputCursor<'_>,
    ) -> CoreResult<Object> {
        let _guard = self.enter()?;
        self.backend.decode_type(self, type_id, input)
    }

    /// Encode prologue every type encoder runs first.
    pub fn begin_encode(
        &self,
        type_id: TypeId,
        object: &Object,
        out: &mut OutputCursor,
    ) -> CoreResult<EncodePrologue> {
        let runtime_id = self.registry.id_of(&object.type_name)?;
        if runtime_id != type_id {
            if !self.registry.is_subtype(runtime_id, type_id) {
                return Err(CodecError::type_mismatch(
                    self.registry.name_of(type_id),
                    &object.type_name,
                ));
            }
            self.backend.encode_type(self, runtime_id, object, out)?;
            return Ok(EncodePrologue::Dispatched);
        }
        if self.registry.is_polymorphic(type_id) {
            out.write_i32(type_id)?;
        }
        Ok(EncodePrologue::Proceed)
    }

    /// Decode prologue every type decoder runs first.
    pub fn begin_decode(
        &self,
        type_id: TypeId,
        input: &mut InputCursor<'_>,
    ) -> CoreResult<DecodePrologue> {
        if !self.registry.is_polymorphic(type_id) {
            return Ok(DecodePrologue::Proceed);
        }
        input.mark();
        let tag = input.read_i32()?;
        if tag == type_id {
            return Ok(DecodePrologue::Proceed);
        }
        let concrete = self.registry.type_of(tag)?;
        if !self.registry.is_subtype(tag, type_id) {
            return Err(CodecError::type_mismatch(
                self.registry.name_of(type_id),
                &concrete.name,
            ));
        }
        input.rewind();
        let object = self.backend.decode_type(self, tag, input)?;
        Ok(DecodePrologue::Dispatched(object))
    }
}

struct DepthGuard<'c> {
    depth: &'c Cell<usize>,
}

impl Drop for DepthGuard<'_> {
    fn drop(&mut self) {
        self.depth.set(self.depth.get().saturating_sub(1));
    }
}

/// Look up a participating field of an object being encoded.
pub fn required_field<'v>(object: &'v Object, name: &str) -> CoreResult<&'v Value> {
    object
        .get(name)
        .ok_or_else(|| CodecError::missing_field(&object.type_name, name))
}
