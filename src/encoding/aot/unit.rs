// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Compiled unit container.
//!
//! Layout (little-endian, written with the engine's own cursors):
//!
//! ```text
//! magic        "PCU\0"
//! version      u16
//! fingerprint  u32     registry fingerprint at compile time
//! symbols      i32 count, then u16-prefixed names
//! procedures   i32 count, then per procedure:
//!                name, i32 field count + names, i32 instruction count + instructions
//! checksum     u32     CRC-32 of everything before it
//! ```
//!
//! Instructions are an opcode byte followed by fixed operands.

use std::path::Path;

use tracing::debug;

use super::program::{lower_registry, Instr, Procedure};
use crate::core::{CodecError, PrimitiveKind, Result as CoreResult, TypeRegistry};
use crate::encoding::{InputCursor, OutputCursor};

/// File magic.
pub const UNIT_MAGIC: [u8; 4] = *b"PCU\0";

/// Current unit format version.
pub const UNIT_VERSION: u16 = 1;

const OP_FIELD: u8 = 0;
const OP_PRIM: u8 = 1;
const OP_ENUM: u8 = 2;
const OP_CALL: u8 = 3;
const OP_BEGIN: u8 = 4;
const OP_NEXT: u8 = 5;

/// Every procedure of a registry, ready to be saved, loaded and linked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledUnit {
    /// Fingerprint of the registry the unit was compiled from
    pub fingerprint: u32,
    /// Call targets by procedure name, indexed by [`Instr::Call`]
    pub symbols: Vec<String>,
    /// One procedure per struct/class
    pub procedures: Vec<Procedure>,
}

/// Compile every struct/class of `registry` into a unit.
pub fn compile_unit(registry: &TypeRegistry) -> CoreResult<CompiledUnit> {
    let (procedures, symbols) = lower_registry(registry)?;
    let unit = CompiledUnit {
        fingerprint: registry.fingerprint(),
        symbols,
        procedures,
    };
    debug!(
        procedures = unit.procedures.len(),
        instructions = unit.instruction_count(),
        "compiled codec unit"
    );
    Ok(unit)
}

impl CompiledUnit {
    /// Total instructions across all procedures.
    pub fn instruction_count(&self) -> usize {
        self.procedures.iter().map(|p| p.code.len()).sum()
    }

    /// Find a procedure by name.
    pub fn procedure(&self, name: &str) -> Option<&Procedure> {
        self.procedures.iter().find(|p| p.name == name)
    }

    /// Serialize to the unit file format.
    pub fn to_bytes(&self) -> CoreResult<Vec<u8>> {
        let mut out = OutputCursor::with_capacity(256);
        out.write_raw(&UNIT_MAGIC)?
            .write_u16(UNIT_VERSION)?
            .write_u32(self.fingerprint)?;

        out.write_count(self.symbols.len(), "symbols")?;
        for symbol in &self.symbols {
            out.write_string(symbol)?;
        }

        out.write_count(self.procedures.len(), "procedures")?;
        for procedure in &self.procedures {
            out.write_string(&procedure.name)?;
            out.write_count(procedure.fields.len(), "fields")?;
            for field in &procedure.fields {
                out.write_string(field)?;
            }
            out.write_count(procedure.code.len(), "instructions")?;
            for instr in &procedure.code {
                write_instr(&mut out, instr)?;
            }
        }

        let checksum = crc32fast::hash(out.data());
        out.write_u32(checksum)?;
        Ok(out.finish())
    }

    /// Parse the unit file format.
    pub fn from_bytes(bytes: &[u8]) -> CoreResult<Self> {
        if bytes.len() < UNIT_MAGIC.len() + 4 {
            return Err(CodecError::truncated(
                UNIT_MAGIC.len() + 4,
                bytes.len(),
                0,
            ));
        }
        let (body, trailer) = bytes.split_at(bytes.len() - 4);
        let expected = u32::from_le_bytes([trailer[0], trailer[1], trailer[2], trailer[3]]);
        let actual = crc32fast::hash(body);
        if expected != actual {
            return Err(CodecError::invalid_data(
                body.len(),
                format!("unit checksum mismatch: stored {expected:08x}, computed {actual:08x}"),
            ));
        }

        let mut input = InputCursor::new(body);
        if input.read_raw(UNIT_MAGIC.len())? != &UNIT_MAGIC[..] {
            return Err(CodecError::invalid_data(0, "not a compiled codec unit"));
        }
        let version = input.read_u16()?;
        if version != UNIT_VERSION {
            return Err(CodecError::unit_mismatch(format!(
                "unsupported unit version {version}, expected {UNIT_VERSION}"
            )));
        }
        let fingerprint = input.read_u32()?;

        let symbol_count = input.read_count()?;
        let mut symbols = Vec::with_capacity(symbol_count.min(input.remaining()));
        for _ in 0..symbol_count {
            symbols.push(input.read_string()?);
        }

        let procedure_count = input.read_count()?;
        let mut procedures = Vec::with_capacity(procedure_count.min(input.remaining()));
        for _ in 0..procedure_count {
            let name = input.read_string()?;
            let field_count = input.read_count()?;
            let mut fields = Vec::with_capacity(field_count.min(input.remaining()));
            for _ in 0..field_count {
                fields.push(input.read_string()?);
            }
            let instr_count = input.read_count()?;
            let mut code = Vec::with_capacity(instr_count.min(input.remaining()));
            for _ in 0..instr_count {
                code.push(read_instr(&mut input)?);
            }
            procedures.push(Procedure { name, fields, code });
        }

        if !input.is_at_end() {
            return Err(CodecError::invalid_data(
                input.position(),
                format!("{} trailing bytes in unit", input.remaining()),
            ));
        }

        Ok(Self {
            fingerprint,
            symbols,
            procedures,
        })
    }

    /// Write the unit to a file.
    pub fn write_to(&self, path: impl AsRef<Path>) -> CoreResult<()> {
        let bytes = self.to_bytes()?;
        std::fs::write(path.as_ref(), &bytes)?;
        debug!(path = %path.as_ref().display(), bytes = bytes.len(), "wrote codec unit");
        Ok(())
    }

    /// Read a unit from a file.
    pub fn read_from(path: impl AsRef<Path>) -> CoreResult<Self> {
        let bytes = std::fs::read(path.as_ref())?;
        Self::from_bytes(&bytes)
    }
}

fn write_instr(out: &mut OutputCursor, instr: &Instr) -> CoreResult<()> {
    match *instr {
        Instr::Field(k) => out.write_u8(OP_FIELD)?.write_u16(k)?,
        Instr::Prim(kind) => out.write_u8(OP_PRIM)?.write_u8(kind.code())?,
        Instr::Enum(repr) => out.write_u8(OP_ENUM)?.write_u8(repr.code())?,
        Instr::Call(sym) => out.write_u8(OP_CALL)?.write_u32(sym)?,
        Instr::Begin { sequence, end } => out
            .write_u8(OP_BEGIN)?
            .write_bool(sequence)?
            .write_u32(end)?,
        Instr::Next { body } => out.write_u8(OP_NEXT)?.write_u32(body)?,
    };
    Ok(())
}

fn read_instr(input: &mut InputCursor<'_>) -> CoreResult<Instr> {
    let opcode = input.read_u8()?;
    let at = input.position() - 1;
    let kind = |code: u8| {
        PrimitiveKind::from_code(code)
            .ok_or_else(|| CodecError::invalid_data(at, format!("unknown primitive code {code}")))
    };
    Ok(match opcode {
        OP_FIELD => Instr::Field(input.read_u16()?),
        OP_PRIM => Instr::Prim(kind(input.read_u8()?)?),
        OP_ENUM => Instr::Enum(kind(input.read_u8()?)?),
        OP_CALL => Instr::Call(input.read_u32()?),
        OP_BEGIN => Instr::Begin {
            sequence: input.read_bool()?,
            end: input.read_u32()?,
        },
        OP_NEXT => Instr::Next {
            body: input.read_u32()?,
        },
        other => {
            return Err(CodecError::invalid_data(
                at,
                format!("unknown opcode {other}"),
            ))
        }
    })
}
