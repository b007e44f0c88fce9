// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Serializer facade.
//!
//! A [`Serializer`] pairs an initialized [`TypeRegistry`] with one
//! [`CodecBackend`]. Every backend produces identical bytes for the same
//! registry, so the choice only affects startup and per-call cost.
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use polycodec::core::{Object, PrimitiveKind, RegistryBuilder, Value};
//! use polycodec::schema::TypeDescriptor;
//! use polycodec::Serializer;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut builder = RegistryBuilder::new();
//! builder.register_type(
//!     TypeDescriptor::reference("Base")
//!         .field("i", PrimitiveKind::Int32)
//!         .field("s", PrimitiveKind::String),
//! )?;
//! let serializer = Serializer::interpreted(Arc::new(builder.initialize()?));
//!
//! let value = Value::Object(Object::new("Base").with("i", 42i32).with("s", "hello"));
//! let bytes = serializer.serialize(&value)?;
//! assert_eq!(bytes.len(), 11);
//! assert_eq!(serializer.deserialize(&bytes, "Base")?, value);
//! # Ok(())
//! # }
//! ```

use std::fmt;
use std::sync::Arc;

use rayon::prelude::*;
use tracing::{debug, warn};

use super::aot::{AotBackend, CompiledUnit};
use super::context::{CodecBackend, CodecContext};
use super::cursor::InputCursor;
use super::interp::InterpretedBackend;
use super::output::OutputCursor;
use crate::codegen::{GeneratedBackend, GeneratedModule};
use crate::core::{
    BackendKind, CodecError, EngineConfig, Object, Result, TypeId, TypeRegistry, Value,
};

/// Encodes and decodes object graphs against one registry.
pub struct Serializer {
    registry: Arc<TypeRegistry>,
    backend: Arc<dyn CodecBackend>,
    max_depth: usize,
}

impl fmt::Debug for Serializer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Serializer")
            .field("backend", &self.backend.kind())
            .field("types", &self.registry.len())
            .field("max_depth", &self.max_depth)
            .finish_non_exhaustive()
    }
}

impl Serializer {
    /// Wrap an existing backend.
    pub fn new(registry: Arc<TypeRegistry>, backend: Arc<dyn CodecBackend>) -> Self {
        Self {
            registry,
            backend,
            max_depth: crate::core::config::DEFAULT_MAX_DEPTH,
        }
    }

    /// Serializer with the cached interpretation backend.
    pub fn interpreted(registry: Arc<TypeRegistry>) -> Self {
        let backend = Arc::new(InterpretedBackend::new(Arc::clone(&registry)));
        Self::new(registry, backend)
    }

    /// Serializer running procedures from a compiled unit.
    ///
    /// The unit must have been compiled from an identical registry.
    pub fn ahead_of_time(registry: Arc<TypeRegistry>, unit: CompiledUnit) -> Result<Self> {
        let backend = Arc::new(AotBackend::link(unit, &registry)?);
        Ok(Self::new(registry, backend))
    }

    /// Serializer dispatching to generated codec functions.
    pub fn generated(registry: Arc<TypeRegistry>, module: &'static GeneratedModule) -> Result<Self> {
        let backend = Arc::new(GeneratedBackend::bind(module, &registry)?);
        Ok(Self::new(registry, backend))
    }

    /// Build the backend an [`EngineConfig`] names.
    ///
    /// The generated backend needs a compiled-in module, so it is only
    /// reachable through [`Serializer::generated`].
    pub fn from_config(registry: Arc<TypeRegistry>, config: &EngineConfig) -> Result<Self> {
        config.validate()?;
        let serializer = match config.backend {
            BackendKind::Interpreted => {
                let backend = InterpretedBackend::new(Arc::clone(&registry));
                if config.warm_up {
                    let plans = backend.warm_up()?;
                    debug!(plans, "warmed up interpreter");
                }
                Self::new(registry, Arc::new(backend))
            }
            BackendKind::Aot => {
                let path = config.unit.as_deref().ok_or_else(|| {
                    CodecError::Other("the aot backend needs a `unit` path".to_string())
                })?;
                let backend = AotBackend::load(path, &registry)?;
                Self::new(registry, Arc::new(backend))
            }
            BackendKind::Generated => {
                return Err(CodecError::Other(
                    "the generated backend is bound in code with Serializer::generated"
                        .to_string(),
                ))
            }
        };
        Ok(serializer.with_max_depth(config.max_depth))
    }

    /// Override the nesting limit.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth.max(1);
        self
    }

    /// The registry this serializer resolves types against.
    pub fn registry(&self) -> &Arc<TypeRegistry> {
        &self.registry
    }

    /// Which backend is in use.
    pub fn backend_kind(&self) -> BackendKind {
        self.backend.kind()
    }

    fn context(&self) -> CodecContext<'_> {
        CodecContext::new(&self.registry, self.backend.as_ref(), self.max_depth)
    }

    /// Encode an object graph. The root's declared type is its own runtime
    /// type, so a polymorphic root carries its tag.
    pub fn serialize(&self, value: &Value) -> Result<Vec<u8>> {
        let mut out = OutputCursor::new();
        self.serialize_into(value, &mut out)?;
        Ok(out.finish())
    }

    /// Encode `value` as declared type `declared`. Bytes match
    /// [`Serializer::serialize`] whenever the value is assignable.
    pub fn serialize_as(&self, declared: &str, value: &Value) -> Result<Vec<u8>> {
        let object = root_object(value)?;
        let type_id = self.registry.id_of(declared)?;
        let mut out = OutputCursor::new();
        self.context().encode_object(type_id, object, &mut out)?;
        Ok(out.finish())
    }

    /// Append the encoding of `value` to an existing cursor.
    pub fn serialize_into(&self, value: &Value, out: &mut OutputCursor) -> Result<()> {
        let object = root_object(value)?;
        let type_id = self.registry.id_of(&object.type_name)?;
        let start = out.position();
        self.context().encode_object(type_id, object, out)?;
        debug!(
            type_name = %object.type_name,
            bytes = out.position() - start,
            "serialized object"
        );
        Ok(())
    }

    /// Decode one object of type `expected` (or a subtype) from the start
    /// of `bytes`. Bytes after the object are ignored.
    pub fn deserialize(&self, bytes: &[u8], expected: &str) -> Result<Value> {
        let type_id = self.registry.id_of(expected)?;
        let mut input = InputCursor::new(bytes);
        match self.deserialize_from(&mut input, type_id) {
            Ok(object) => {
                if !input.is_at_end() {
                    debug!(trailing = input.remaining(), "bytes left after object");
                }
                Ok(Value::Object(object))
            }
            Err(e) => {
                warn!(
                    expected,
                    input_len = bytes.len(),
                    context = ?e.log_fields(),
                    "deserialization failed"
                );
                Err(e)
            }
        }
    }

    /// Decode one object declared as `type_id` from a cursor, leaving the
    /// cursor after it.
    pub fn deserialize_from(&self, input: &mut InputCursor<'_>, type_id: TypeId) -> Result<Object> {
        self.context().decode_object(type_id, input)
    }

    /// Encode many independent roots in parallel. Output order follows input.
    pub fn serialize_batch(&self, values: &[Value]) -> Result<Vec<Vec<u8>>> {
        values.par_iter().map(|value| self.serialize(value)).collect()
    }
}

fn root_object(value: &Value) -> Result<&Object> {
    value
        .as_object()
        .ok_or_else(|| CodecError::invalid_value("root", "object", value.kind_name()))
}
