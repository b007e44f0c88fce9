// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Primitive and enum value codecs shared by every backend.

use super::cursor::InputCursor;
use super::output::OutputCursor;
use crate::core::{CodecError, PrimitiveKind, Result as CoreResult, Value};

/// Write a primitive value; the value must be exactly the declared kind.
pub fn write_primitive(
    out: &mut OutputCursor,
    kind: PrimitiveKind,
    value: &Value,
    context: &str,
) -> CoreResult<()> {
    match (kind, value) {
        (PrimitiveKind::Bool, Value::Bool(v)) => out.write_bool(*v)?,
        (PrimitiveKind::Int8, Value::Int8(v)) => out.write_i8(*v)?,
        (PrimitiveKind::UInt8, Value::UInt8(v)) => out.write_u8(*v)?,
        (PrimitiveKind::Int16, Value::Int16(v)) => out.write_i16(*v)?,
        (PrimitiveKind::UInt16, Value::UInt16(v)) => out.write_u16(*v)?,
        (PrimitiveKind::Int32, Value::Int32(v)) => out.write_i32(*v)?,
        (PrimitiveKind::UInt32, Value::UInt32(v)) => out.write_u32(*v)?,
        (PrimitiveKind::Int64, Value::Int64(v)) => out.write_i64(*v)?,
        (PrimitiveKind::UInt64, Value::UInt64(v)) => out.write_u64(*v)?,
        (PrimitiveKind::Float32, Value::Float32(v)) => out.write_f32(*v)?,
        (PrimitiveKind::Float64, Value::Float64(v)) => out.write_f64(*v)?,
        (PrimitiveKind::Char, Value::Char(v)) => out.write_char(*v)?,
        (PrimitiveKind::String, Value::String(v)) => out.write_string(v)?,
        (PrimitiveKind::Bytes, Value::Bytes(v)) => out.write_blob(v)?,
        (kind, other) => {
            return Err(CodecError::invalid_value(
                context,
                kind.as_str(),
                other.kind_name(),
            ))
        }
    };
    Ok(())
}

/// Read a primitive value of the given kind.
pub fn read_primitive(input: &mut InputCursor<'_>, kind: PrimitiveKind) -> CoreResult<Value> {
    Ok(match kind {
        PrimitiveKind::Bool => Value::Bool(input.read_bool()?),
        PrimitiveKind::Int8 => Value::Int8(input.read_i8()?),
        PrimitiveKind::UInt8 => Value::UInt8(input.read_u8()?),
        PrimitiveKind::Int16 => Value::Int16(input.read_i16()?),
        PrimitiveKind::UInt16 => Value::UInt16(input.read_u16()?),
        PrimitiveKind::Int32 => Value::Int32(input.read_i32()?),
        PrimitiveKind::UInt32 => Value::UInt32(input.read_u32()?),
        PrimitiveKind::Int64 => Value::Int64(input.read_i64()?),
        PrimitiveKind::UInt64 => Value::UInt64(input.read_u64()?),
        PrimitiveKind::Float32 => Value::Float32(input.read_f32()?),
        PrimitiveKind::Float64 => Value::Float64(input.read_f64()?),
        PrimitiveKind::Char => Value::Char(input.read_char()?),
        PrimitiveKind::String => Value::String(input.read_string()?),
        PrimitiveKind::Bytes => Value::Bytes(input.read_blob()?),
    })
}

/// Write an enum member as its underlying integer.
pub fn write_enum(
    out: &mut OutputCursor,
    repr: PrimitiveKind,
    value: &Value,
    context: &str,
) -> CoreResult<()> {
    let Value::Enum(raw) = value else {
        return Err(CodecError::invalid_value(context, "enum", value.kind_name()));
    };
    let raw = *raw;
    let out_of_range = || CodecError::invalid_value(context, format!("enum as {repr}"), raw.to_string());
    match repr {
        PrimitiveKind::Int8 => out.write_i8(i8::try_from(raw).map_err(|_| out_of_range())?)?,
        PrimitiveKind::UInt8 => out.write_u8(u8::try_from(raw).map_err(|_| out_of_range())?)?,
        PrimitiveKind::Int16 => out.write_i16(i16::try_from(raw).map_err(|_| out_of_range())?)?,
        PrimitiveKind::UInt16 => out.write_u16(u16::try_from(raw).map_err(|_| out_of_range())?)?,
        PrimitiveKind::Int32 => out.write_i32(i32::try_from(raw).map_err(|_| out_of_range())?)?,
        PrimitiveKind::UInt32 => out.write_u32(u32::try_from(raw).map_err(|_| out_of_range())?)?,
        PrimitiveKind::Int64 => out.write_i64(raw)?,
        // uint64 members are stored as their bit pattern
        PrimitiveKind::UInt64 => out.write_u64(raw as u64)?,
        other => {
            return Err(CodecError::invalid_value(
                context,
                "integer enum repr",
                other.as_str(),
            ))
        }
    };
    Ok(())
}

/// Read an enum member from its underlying integer.
pub fn read_enum(input: &mut InputCursor<'_>, repr: PrimitiveKind) -> CoreResult<Value> {
    let raw = match repr {
        PrimitiveKind::Int8 => i64::from(input.read_i8()?),
        PrimitiveKind::UInt8 => i64::from(input.read_u8()?),
        PrimitiveKind::Int16 => i64::from(input.read_i16()?),
        PrimitiveKind::UInt16 => i64::from(input.read_u16()?),
        PrimitiveKind::Int32 => i64::from(input.read_i32()?),
        PrimitiveKind::UInt32 => i64::from(input.read_u32()?),
        PrimitiveKind::Int64 => input.read_i64()?,
        PrimitiveKind::UInt64 => input.read_u64()? as i64,
        other => {
            return Err(CodecError::invalid_data(
                input.position(),
                format!("enum repr {other} is not an integer kind"),
            ))
        }
    };
    Ok(Value::Enum(raw))
}
