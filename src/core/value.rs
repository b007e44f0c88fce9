// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Dynamic value model.
//!
//! Every backend encodes from and decodes into [`Value`]. An [`Object`] is an
//! instance of a registered struct/class: it carries its runtime type name,
//! which is what polymorphic fields dispatch on, and its fields by name.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Field name -> value mapping of an object.
pub type FieldMap = BTreeMap<String, Value>;

/// A value of any encodable field type.
///
/// Null references have no variant: every reference field must hold an
/// object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    // Boolean
    Bool(bool),

    // Signed integers
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),

    // Unsigned integers
    UInt8(u8),
    UInt16(u16),
    UInt32(u32),
    UInt64(u64),

    // Floating point
    Float32(f32),
    Float64(f64),

    // Unicode scalar value
    Char(char),

    // String (UTF-8)
    String(String),

    // Opaque byte blob
    Bytes(Vec<u8>),

    /// Enumeration member, held as its underlying integer.
    ///
    /// `uint64` enums store the bit pattern reinterpreted as `i64`.
    Enum(i64),

    /// Fixed-size array; the length is fixed per value, not per type.
    Array(Vec<Value>),

    /// Growable list.
    Sequence(Vec<Value>),

    /// Instance of a registered struct/class.
    Object(Object),
}

impl Value {
    // ========================================================================
    // Type Checking Predicates
    // ========================================================================

    /// Check if this value is an integer type (signed or unsigned).
    pub fn is_integer(&self) -> bool {
        matches!(
            self,
            Value::Int8(_)
                | Value::Int16(_)
                | Value::Int32(_)
                | Value::Int64(_)
                | Value::UInt8(_)
                | Value::UInt16(_)
                | Value::UInt32(_)
                | Value::UInt64(_)
        )
    }

    /// Check if this value holds other values.
    pub fn is_container(&self) -> bool {
        matches!(self, Value::Array(_) | Value::Sequence(_) | Value::Object(_))
    }

    // ========================================================================
    // Type Conversion Methods
    // ========================================================================

    /// Try to get the inner string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get the inner bytes.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(b) => Some(b),
            _ => None,
        }
    }

    /// Try to get the inner object.
    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }

    /// Try to get the elements of an array or sequence.
    pub fn as_elements(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) | Value::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Try to get the underlying integer of an enum member.
    pub fn as_enum(&self) -> Option<i64> {
        match self {
            Value::Enum(v) => Some(*v),
            _ => None,
        }
    }

    /// Get the kind name of this value, used in mismatch diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Bool(_) => "bool",
            Value::Int8(_) => "int8",
            Value::Int16(_) => "int16",
            Value::Int32(_) => "int32",
            Value::Int64(_) => "int64",
            Value::UInt8(_) => "uint8",
            Value::UInt16(_) => "uint16",
            Value::UInt32(_) => "uint32",
            Value::UInt64(_) => "uint64",
            Value::Float32(_) => "float32",
            Value::Float64(_) => "float64",
            Value::Char(_) => "char",
            Value::String(_) => "string",
            Value::Bytes(_) => "bytes",
            Value::Enum(_) => "enum",
            Value::Array(_) => "array",
            Value::Sequence(_) => "sequence",
            Value::Object(_) => "object",
        }
    }

    /// Structural equality that compares floats by bit pattern.
    ///
    /// `PartialEq` follows IEEE semantics, so a NaN never equals itself; this
    /// is the comparison round-trip checks want.
    pub fn bit_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Float32(a), Value::Float32(b)) => a.to_bits() == b.to_bits(),
            (Value::Float64(a), Value::Float64(b)) => a.to_bits() == b.to_bits(),
            (Value::Array(a), Value::Array(b)) | (Value::Sequence(a), Value::Sequence(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.bit_eq(y))
            }
            (Value::Object(a), Value::Object(b)) => {
                a.type_name == b.type_name
                    && a.fields.len() == b.fields.len()
                    && a.fields
                        .iter()
                        .zip(&b.fields)
                        .all(|((ka, va), (kb, vb))| ka == kb && va.bit_eq(vb))
            }
            _ => self == other,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(v) => write!(f, "{v}"),
            Value::Int8(v) => write!(f, "{v}"),
            Value::Int16(v) => write!(f, "{v}"),
            Value::Int32(v) => write!(f, "{v}"),
            Value::Int64(v) => write!(f, "{v}"),
            Value::UInt8(v) => write!(f, "{v}"),
            Value::UInt16(v) => write!(f, "{v}"),
            Value::UInt32(v) => write!(f, "{v}"),
            Value::UInt64(v) => write!(f, "{v}"),
            Value::Float32(v) => write!(f, "{v}"),
            Value::Float64(v) => write!(f, "{v}"),
            Value::Char(v) => write!(f, "'{v}'"),
            Value::String(v) => write!(f, "\"{v}\""),
            Value::Bytes(v) => write!(f, "<{} bytes>", v.len()),
            Value::Enum(v) => write!(f, "enum({v})"),
            Value::Array(v) => write!(f, "[{} elements]", v.len()),
            Value::Sequence(v) => write!(f, "list[{} elements]", v.len()),
            Value::Object(o) => write!(f, "{}{{{} fields}}", o.type_name, o.fields.len()),
        }
    }
}

macro_rules! impl_from_primitive {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::$variant(v)
                }
            }
        )*
    };
}

impl_from_primitive! {
    bool => Bool,
    i8 => Int8,
    i16 => Int16,
    i32 => Int32,
    i64 => Int64,
    u8 => UInt8,
    u16 => UInt16,
    u32 => UInt32,
    u64 => UInt64,
    f32 => Float32,
    f64 => Float64,
    char => Char,
    String => String,
    Object => Object,
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

// =============================================================================
// Object
// =============================================================================

/// An instance of a registered struct/class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Object {
    /// Runtime (most-derived) type name.
    pub type_name: String,
    /// Field values by name.
    pub fields: FieldMap,
}

impl Object {
    /// Create an object with no fields set.
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            fields: FieldMap::new(),
        }
    }

    /// Builder-style field setter.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Set a field, replacing any previous value.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(name.into(), value.into());
    }

    /// Get a field by name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }
}

// =============================================================================
// Primitive Kinds
// =============================================================================

/// Primitive wire kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveKind {
    /// Boolean, one byte
    Bool,
    /// 8-bit signed integer
    Int8,
    /// 8-bit unsigned integer
    UInt8,
    /// 16-bit signed integer
    Int16,
    /// 16-bit unsigned integer
    UInt16,
    /// 32-bit signed integer
    Int32,
    /// 32-bit unsigned integer
    UInt32,
    /// 64-bit signed integer
    Int64,
    /// 64-bit unsigned integer
    UInt64,
    /// 32-bit float
    Float32,
    /// 64-bit float
    Float64,
    /// Unicode scalar value, written as `u32`
    Char,
    /// UTF-8 string with `u16` length prefix
    String,
    /// Byte blob with `i32` length prefix
    Bytes,
}

impl PrimitiveKind {
    /// All kinds, in wire-code order.
    pub const ALL: [PrimitiveKind; 14] = [
        PrimitiveKind::Bool,
        PrimitiveKind::Int8,
        PrimitiveKind::UInt8,
        PrimitiveKind::Int16,
        PrimitiveKind::UInt16,
        PrimitiveKind::Int32,
        PrimitiveKind::UInt32,
        PrimitiveKind::Int64,
        PrimitiveKind::UInt64,
        PrimitiveKind::Float32,
        PrimitiveKind::Float64,
        PrimitiveKind::Char,
        PrimitiveKind::String,
        PrimitiveKind::Bytes,
    ];

    /// Get the size in bytes for this kind, if fixed.
    pub const fn size(self) -> Option<usize> {
        match self {
            PrimitiveKind::Bool | PrimitiveKind::Int8 | PrimitiveKind::UInt8 => Some(1),
            PrimitiveKind::Int16 | PrimitiveKind::UInt16 => Some(2),
            PrimitiveKind::Int32
            | PrimitiveKind::UInt32
            | PrimitiveKind::Float32
            | PrimitiveKind::Char => Some(4),
            PrimitiveKind::Int64 | PrimitiveKind::UInt64 | PrimitiveKind::Float64 => Some(8),
            PrimitiveKind::String | PrimitiveKind::Bytes => None,
        }
    }

    /// Whether this kind may back an enumeration.
    pub const fn is_integer(self) -> bool {
        matches!(
            self,
            PrimitiveKind::Int8
                | PrimitiveKind::UInt8
                | PrimitiveKind::Int16
                | PrimitiveKind::UInt16
                | PrimitiveKind::Int32
                | PrimitiveKind::UInt32
                | PrimitiveKind::Int64
                | PrimitiveKind::UInt64
        )
    }

    /// Stable one-byte code used in compiled units.
    pub fn code(self) -> u8 {
        // ALL is indexed by code, so the position always exists
        Self::ALL.iter().position(|k| *k == self).unwrap_or(0) as u8
    }

    /// Inverse of [`PrimitiveKind::code`].
    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.get(code as usize).copied()
    }

    /// Parse a primitive kind from its catalog spelling.
    pub fn try_from_str(s: &str) -> Option<Self> {
        match s {
            "bool" => Some(PrimitiveKind::Bool),
            "int8" | "sbyte" => Some(PrimitiveKind::Int8),
            "uint8" | "byte" => Some(PrimitiveKind::UInt8),
            "int16" | "short" => Some(PrimitiveKind::Int16),
            "uint16" | "ushort" => Some(PrimitiveKind::UInt16),
            "int32" | "int" => Some(PrimitiveKind::Int32),
            "uint32" | "uint" => Some(PrimitiveKind::UInt32),
            "int64" | "long" => Some(PrimitiveKind::Int64),
            "uint64" | "ulong" => Some(PrimitiveKind::UInt64),
            "float32" | "float" => Some(PrimitiveKind::Float32),
            "float64" | "double" => Some(PrimitiveKind::Float64),
            "char" => Some(PrimitiveKind::Char),
            "string" => Some(PrimitiveKind::String),
            "bytes" => Some(PrimitiveKind::Bytes),
            _ => None,
        }
    }

    /// Canonical spelling.
    pub const fn as_str(self) -> &'static str {
        match self {
            PrimitiveKind::Bool => "bool",
            PrimitiveKind::Int8 => "int8",
            PrimitiveKind::UInt8 => "uint8",
            PrimitiveKind::Int16 => "int16",
            PrimitiveKind::UInt16 => "uint16",
            PrimitiveKind::Int32 => "int32",
            PrimitiveKind::UInt32 => "uint32",
            PrimitiveKind::Int64 => "int64",
            PrimitiveKind::UInt64 => "uint64",
            PrimitiveKind::Float32 => "float32",
            PrimitiveKind::Float64 => "float64",
            PrimitiveKind::Char => "char",
            PrimitiveKind::String => "string",
            PrimitiveKind::Bytes => "bytes",
        }
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
