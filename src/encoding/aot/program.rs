// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Flat codec procedures and plan lowering.
//!
//! A procedure encodes or decodes the fields of one type with a short
//! instruction list. Containers become a `Begin`/`Next` pair around the
//! element body, so nested containers need no recursion in the VM.

use std::collections::HashMap;
use std::fmt;

use crate::core::{CodecError, PrimitiveKind, Result as CoreResult, TypeRegistry};
use crate::encoding::plan::{derive_plan, CodecPlan, ValueOp};

/// One VM instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instr {
    /// Select field `k` of the procedure's field table as the current operand.
    Field(u16),
    /// Primitive value.
    Prim(PrimitiveKind),
    /// Enum member with the given underlying integer kind.
    Enum(PrimitiveKind),
    /// Nested object through the procedure bound to symbol `k`.
    Call(u32),
    /// Start a container: count, then the body once per element. An empty
    /// container jumps straight to `end`.
    Begin {
        /// Growable list rather than fixed-size array
        sequence: bool,
        /// First instruction after the matching `Next`
        end: u32,
    },
    /// Close one element; loops back to `body` while elements remain.
    Next {
        /// First instruction of the element body
        body: u32,
    },
}

impl fmt::Display for Instr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instr::Field(k) => write!(f, "field {k}"),
            Instr::Prim(kind) => write!(f, "prim {kind}"),
            Instr::Enum(repr) => write!(f, "enum {repr}"),
            Instr::Call(sym) => write!(f, "call @{sym}"),
            Instr::Begin { sequence, end } => {
                let what = if *sequence { "list" } else { "array" };
                write!(f, "begin {what} -> {end}")
            }
            Instr::Next { body } => write!(f, "next -> {body}"),
        }
    }
}

/// Deterministic procedure name for a type.
pub fn procedure_name(type_name: &str) -> String {
    format!("codec::{type_name}")
}

/// Inverse of [`procedure_name`].
pub fn type_name_of(procedure: &str) -> Option<&str> {
    procedure.strip_prefix("codec::")
}

/// Compiled codec for one struct/class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Procedure {
    /// `codec::<TypeName>`
    pub name: String,
    /// Field names, indexed by [`Instr::Field`]
    pub fields: Vec<String>,
    /// Instruction list
    pub code: Vec<Instr>,
}

impl Procedure {
    /// Check that every index in the code is in range.
    pub fn verify(&self, symbols: usize) -> CoreResult<()> {
        let len = self.code.len();
        for (pc, instr) in self.code.iter().enumerate() {
            let ok = match *instr {
                Instr::Field(k) => (k as usize) < self.fields.len(),
                Instr::Prim(_) => true,
                Instr::Enum(repr) => repr.is_integer(),
                Instr::Call(sym) => (sym as usize) < symbols,
                Instr::Begin { end, .. } => (end as usize) <= len && end as usize > pc,
                Instr::Next { body } => (body as usize) <= pc,
            };
            if !ok {
                return Err(CodecError::invalid_data(
                    pc,
                    format!("malformed instruction '{instr}' in {}", self.name),
                ));
            }
        }
        Ok(())
    }
}

impl fmt::Display for Procedure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}:", self.name)?;
        for (pc, instr) in self.code.iter().enumerate() {
            match instr {
                Instr::Field(k) => {
                    let name = self.fields.get(*k as usize).map_or("?", String::as_str);
                    writeln!(f, "  {pc:3}: {instr} ({name})")?
                }
                _ => writeln!(f, "  {pc:3}: {instr}")?,
            }
        }
        Ok(())
    }
}

/// Interns call targets while lowering.
#[derive(Debug, Default)]
pub(crate) struct SymbolTable {
    pub(crate) names: Vec<String>,
    index: HashMap<String, u32>,
}

impl SymbolTable {
    fn intern(&mut self, name: String) -> u32 {
        if let Some(&idx) = self.index.get(&name) {
            return idx;
        }
        let idx = self.names.len() as u32;
        self.index.insert(name.clone(), idx);
        self.names.push(name);
        idx
    }
}

/// Lower one plan into a procedure.
pub(crate) fn lower_plan(
    registry: &TypeRegistry,
    plan: &CodecPlan,
    symbols: &mut SymbolTable,
) -> CoreResult<Procedure> {
    let mut code = Vec::new();
    let mut fields = Vec::with_capacity(plan.steps.len());
    for step in &plan.steps {
        let k = u16::try_from(fields.len()).map_err(|_| {
            CodecError::limit_exceeded("procedure fields", fields.len(), u16::MAX as usize)
        })?;
        fields.push(step.name.clone());
        code.push(Instr::Field(k));
        lower_op(registry, &step.op, &mut code, symbols)?;
    }
    Ok(Procedure {
        name: procedure_name(&plan.type_name),
        fields,
        code,
    })
}

fn lower_op(
    registry: &TypeRegistry,
    op: &ValueOp,
    code: &mut Vec<Instr>,
    symbols: &mut SymbolTable,
) -> CoreResult<()> {
    match op {
        ValueOp::Primitive(kind) => code.push(Instr::Prim(*kind)),
        ValueOp::Enum { repr, .. } => code.push(Instr::Enum(*repr)),
        ValueOp::Nested { type_id } => {
            let target = registry.type_of(*type_id)?;
            code.push(Instr::Call(symbols.intern(procedure_name(&target.name))));
        }
        ValueOp::Array(inner) | ValueOp::Sequence(inner) => {
            let sequence = matches!(op, ValueOp::Sequence(_));
            let begin = code.len();
            code.push(Instr::Begin { sequence, end: 0 });
            lower_op(registry, inner, code, symbols)?;
            code.push(Instr::Next {
                body: (begin + 1) as u32,
            });
            code[begin] = Instr::Begin {
                sequence,
                end: code.len() as u32,
            };
        }
    }
    Ok(())
}

/// Lower every struct/class of the registry.
pub(crate) fn lower_registry(
    registry: &TypeRegistry,
) -> CoreResult<(Vec<Procedure>, Vec<String>)> {
    let mut symbols = SymbolTable::default();
    let mut procedures = Vec::new();
    for ty in registry.iter() {
        if ty.as_struct().is_none() {
            continue;
        }
        let plan = derive_plan(registry, ty.id)?;
        procedures.push(lower_plan(registry, &plan, &mut symbols)?);
    }
    Ok((procedures, symbols.names))
}
