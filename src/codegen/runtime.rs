// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Support code for emitted codec modules.
//!
//! Emitted source imports this module with a glob, so everything an emitted
//! function names is re-exported here. [`GeneratedBackend`] binds the
//! module's codec table to a registry.

use std::fmt;

use tracing::debug;

pub use crate::core::{Object, PrimitiveKind, Result, TypeId, Value};
pub use crate::encoding::context::{
    required_field as field, CodecContext, DecodePrologue, EncodePrologue,
};
pub use crate::encoding::wire::{read_enum, write_enum};
pub use crate::encoding::{InputCursor, OutputCursor};

use crate::core::{BackendKind, CodecError, TypeRegistry};
use crate::encoding::context::CodecBackend;

/// Emitted encoder signature.
pub type EncodeFn = fn(&CodecContext<'_>, &Object, &mut OutputCursor) -> Result<()>;

/// Emitted decoder signature.
pub type DecodeFn = fn(&CodecContext<'_>, &mut InputCursor<'_>) -> Result<Object>;

/// Emitted codec pair for one type.
#[derive(Clone, Copy)]
pub struct GeneratedCodec {
    /// Registered type name
    pub name: &'static str,
    /// Type id at generation time
    pub id: TypeId,
    /// Field encoder
    pub encode: EncodeFn,
    /// Field decoder
    pub decode: DecodeFn,
}

impl fmt::Debug for GeneratedCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeneratedCodec")
            .field("name", &self.name)
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}

/// Table of codecs emitted from one registry.
#[derive(Debug, Clone, Copy)]
pub struct GeneratedModule {
    /// Registry fingerprint at generation time
    pub fingerprint: u32,
    /// One entry per struct/class
    pub codecs: &'static [GeneratedCodec],
}

/// Backend dispatching to emitted functions.
#[derive(Debug)]
pub struct GeneratedBackend {
    by_type: Vec<Option<&'static GeneratedCodec>>,
}

impl GeneratedBackend {
    /// Bind every codec of `module` to `registry`.
    ///
    /// Type ids are baked into the emitted code, so the registry must match
    /// the one the module was generated from.
    pub fn bind(module: &'static GeneratedModule, registry: &TypeRegistry) -> Result<Self> {
        let expected = registry.fingerprint();
        if module.fingerprint != expected {
            return Err(CodecError::unit_mismatch(format!(
                "generated module fingerprint {:08x} does not match registry {expected:08x}",
                module.fingerprint
            )));
        }

        let mut by_type = vec![None; registry.len()];
        for codec in module.codecs {
            let id = registry.id_of(codec.name)?;
            if id != codec.id {
                return Err(CodecError::unit_mismatch(format!(
                    "generated codec {} has id {}, registry says {id}",
                    codec.name, codec.id
                )));
            }
            registry.struct_info(id)?;
            by_type[id as usize] = Some(codec);
        }

        for ty in registry.iter() {
            if ty.as_struct().is_some() && by_type[ty.id as usize].is_none() {
                return Err(CodecError::unknown_type(&ty.name));
            }
        }

        debug!(codecs = module.codecs.len(), "bound generated codecs");
        Ok(Self { by_type })
    }

    fn codec(&self, type_id: TypeId) -> Result<&'static GeneratedCodec> {
        usize::try_from(type_id)
            .ok()
            .and_then(|idx| self.by_type.get(idx).copied().flatten())
            .ok_or_else(|| CodecError::unknown_type_id(type_id))
    }
}

impl CodecBackend for GeneratedBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Generated
    }

    fn encode_type(
        &self,
        ctx: &CodecContext<'_>,
        type_id: TypeId,
        object: &Object,
        out: &mut OutputCursor,
    ) -> Result<()> {
        (self.codec(type_id)?.encode)(ctx, object, out)
    }

    fn decode_type(
        &self,
        ctx: &CodecContext<'_>,
        type_id: TypeId,
        input: &mut InputCursor<'_>,
    ) -> Result<Object> {
        (self.codec(type_id)?.decode)(ctx, input)
    }
}

macro_rules! expect_copy {
    ($($name:ident => $variant:ident: $ty:ty, $kind:literal;)*) => {
        $(
            #[doc = concat!("Unwrap a `", $kind, "` field value.")]
            pub fn $name(value: &Value, field: &str) -> Result<$ty> {
                match value {
                    Value::$variant(v) => Ok(*v),
                    other => Err(CodecError::invalid_value(field, $kind, other.kind_name())),
                }
            }
        )*
    };
}

expect_copy! {
    expect_bool => Bool: bool, "bool";
    expect_i8 => Int8: i8, "int8";
    expect_u8 => UInt8: u8, "uint8";
    expect_i16 => Int16: i16, "int16";
    expect_u16 => UInt16: u16, "uint16";
    expect_i32 => Int32: i32, "int32";
    expect_u32 => UInt32: u32, "uint32";
    expect_i64 => Int64: i64, "int64";
    expect_u64 => UInt64: u64, "uint64";
    expect_f32 => Float32: f32, "float32";
    expect_f64 => Float64: f64, "float64";
    expect_char => Char: char, "char";
}

/// Unwrap a `string` field value.
pub fn expect_str<'v>(value: &'v Value, field: &str) -> Result<&'v str> {
    value
        .as_str()
        .ok_or_else(|| CodecError::invalid_value(field, "string", value.kind_name()))
}

/// Unwrap a `bytes` field value.
pub fn expect_bytes<'v>(value: &'v Value, field: &str) -> Result<&'v [u8]> {
    value
        .as_bytes()
        .ok_or_else(|| CodecError::invalid_value(field, "bytes", value.kind_name()))
}

/// Unwrap a fixed-size array.
pub fn expect_array<'v>(value: &'v Value, field: &str) -> Result<&'v [Value]> {
    match value {
        Value::Array(items) => Ok(items),
        other => Err(CodecError::invalid_value(field, "array", other.kind_name())),
    }
}

/// Unwrap a growable sequence.
pub fn expect_sequence<'v>(value: &'v Value, field: &str) -> Result<&'v [Value]> {
    match value {
        Value::Sequence(items) => Ok(items),
        other => Err(CodecError::invalid_value(field, "sequence", other.kind_name())),
    }
}
