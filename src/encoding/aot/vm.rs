// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Linked compiled units and the procedure VM.

use std::path::Path;

use tracing::debug;

use super::program::{lower_plan, type_name_of, Instr, Procedure, SymbolTable};
use super::unit::CompiledUnit;
use crate::core::{
    BackendKind, CodecError, Object, Result as CoreResult, TypeId, TypeRegistry, Value,
};
use crate::encoding::context::{
    required_field, CodecBackend, CodecContext, DecodePrologue, EncodePrologue,
};
use crate::encoding::plan::derive_plan;
use crate::encoding::{wire, InputCursor, OutputCursor};

/// Backend running procedures from a compiled unit.
#[derive(Debug)]
pub struct AotBackend {
    unit: CompiledUnit,
    /// Procedure index per type id
    by_type: Vec<Option<usize>>,
    /// Type id per call symbol
    call_targets: Vec<TypeId>,
}

impl AotBackend {
    /// Load a unit file and link it against `registry`.
    pub fn load(path: impl AsRef<Path>, registry: &TypeRegistry) -> CoreResult<Self> {
        Self::link(CompiledUnit::read_from(path)?, registry)
    }

    /// Bind every procedure and call symbol to a registered type.
    ///
    /// Each procedure is checked against a fresh lowering of its type.
    /// Fails with [`CodecError::UnitMismatch`] when the unit was compiled
    /// from a different registry or its code differs from the layout, and
    /// with [`CodecError::UnknownType`] when a type has no procedure.
    pub fn link(unit: CompiledUnit, registry: &TypeRegistry) -> CoreResult<Self> {
        let expected = registry.fingerprint();
        if unit.fingerprint != expected {
            return Err(CodecError::unit_mismatch(format!(
                "unit fingerprint {:08x} does not match registry {expected:08x}",
                unit.fingerprint
            )));
        }

        let mut by_type = vec![None; registry.len()];
        for (idx, procedure) in unit.procedures.iter().enumerate() {
            procedure.verify(unit.symbols.len())?;
            let id = resolve(registry, &procedure.name)?;
            let mut symbols = SymbolTable::default();
            let lowered = lower_plan(registry, &derive_plan(registry, id)?, &mut symbols)?;
            if procedure.fields != lowered.fields {
                return Err(CodecError::unit_mismatch(format!(
                    "{} fields {:?} do not match registry layout {:?}",
                    procedure.name, procedure.fields, lowered.fields
                )));
            }
            if !same_code(procedure, &unit.symbols, &lowered, &symbols.names) {
                return Err(CodecError::unit_mismatch(format!(
                    "{} code does not match the registry layout",
                    procedure.name
                )));
            }
            by_type[id as usize] = Some(idx);
        }

        for ty in registry.iter() {
            if ty.as_struct().is_some() && by_type[ty.id as usize].is_none() {
                return Err(CodecError::unknown_type(super::procedure_name(&ty.name)));
            }
        }

        let call_targets = unit
            .symbols
            .iter()
            .map(|symbol| resolve(registry, symbol))
            .collect::<CoreResult<Vec<_>>>()?;

        debug!(
            procedures = unit.procedures.len(),
            symbols = call_targets.len(),
            "linked codec unit"
        );
        Ok(Self {
            unit,
            by_type,
            call_targets,
        })
    }

    /// The linked unit.
    pub fn unit(&self) -> &CompiledUnit {
        &self.unit
    }

    fn procedure(&self, type_id: TypeId) -> CoreResult<&Procedure> {
        usize::try_from(type_id)
            .ok()
            .and_then(|idx| self.by_type.get(idx).copied().flatten())
            .map(|idx| &self.unit.procedures[idx])
            .ok_or_else(|| CodecError::unknown_type_id(type_id))
    }

    fn call_target(&self, sym: u32) -> CoreResult<TypeId> {
        self.call_targets
            .get(sym as usize)
            .copied()
            .ok_or_else(|| CodecError::unit_mismatch(format!("unbound call symbol @{sym}")))
    }
}

/// Instruction-wise equality, with call symbols compared by name.
fn same_code(
    actual: &Procedure,
    actual_symbols: &[String],
    expected: &Procedure,
    expected_symbols: &[String],
) -> bool {
    actual.code.len() == expected.code.len()
        && actual.code.iter().zip(&expected.code).all(|pair| match pair {
            (Instr::Call(a), Instr::Call(b)) => {
                actual_symbols.get(*a as usize) == expected_symbols.get(*b as usize)
            }
            (a, b) => a == b,
        })
}

fn resolve(registry: &TypeRegistry, procedure: &str) -> CoreResult<TypeId> {
    let type_name =
        type_name_of(procedure).ok_or_else(|| CodecError::unknown_type(procedure))?;
    registry.id_of(type_name)
}

struct EncodeFrame<'v> {
    items: &'v [Value],
    index: usize,
}

struct DecodeFrame {
    items: Vec<Value>,
    remaining: usize,
    sequence: bool,
}

impl CodecBackend for AotBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Aot
    }

    fn encode_type(
        &self,
        ctx: &CodecContext<'_>,
        type_id: TypeId,
        object: &Object,
        out: &mut OutputCursor,
    ) -> CoreResult<()> {
        if ctx.begin_encode(type_id, object, out)? == EncodePrologue::Dispatched {
            return Ok(());
        }
        let procedure = self.procedure(type_id)?;
        let code = &procedure.code;
        let mut frames: Vec<EncodeFrame<'_>> = Vec::new();
        let mut field_name = "";
        let mut field_value: Option<&Value> = None;
        let mut pc = 0;

        while pc < code.len() {
            let instr = code[pc];
            pc += 1;

            if let Instr::Field(k) = instr {
                field_name = procedure
                    .fields
                    .get(k as usize)
                    .map(String::as_str)
                    .unwrap_or_default();
                field_value = Some(required_field(object, field_name)?);
                continue;
            }
            if let Instr::Next { body } = instr {
                if let Some(frame) = frames.last_mut() {
                    frame.index += 1;
                    if frame.index < frame.items.len() {
                        pc = body as usize;
                    } else {
                        frames.pop();
                    }
                }
                continue;
            }

            let operand = match frames.last() {
                Some(frame) => {
                    let items = frame.items;
                    &items[frame.index]
                }
                None => field_value.ok_or_else(|| {
                    CodecError::invalid_data(pc - 1, "value instruction before field select")
                })?,
            };
            match instr {
                Instr::Prim(kind) => wire::write_primitive(out, kind, operand, field_name)?,
                Instr::Enum(repr) => wire::write_enum(out, repr, operand, field_name)?,
                Instr::Call(sym) => ctx.encode_nested(self.call_target(sym)?, operand, out)?,
                Instr::Begin { sequence, end } => {
                    let items = match (sequence, operand) {
                        (false, Value::Array(items)) | (true, Value::Sequence(items)) => items,
                        _ => {
                            let expected = if sequence { "sequence" } else { "array" };
                            return Err(CodecError::invalid_value(
                                field_name,
                                expected,
                                operand.kind_name(),
                            ));
                        }
                    };
                    out.write_count(items.len(), if sequence { "sequence" } else { "array" })?;
                    if items.is_empty() {
                        pc = end as usize;
                    } else {
                        frames.push(EncodeFrame { items, index: 0 });
                    }
                }
                Instr::Field(_) | Instr::Next { .. } => {}
            }
        }
        Ok(())
    }

    fn decode_type(
        &self,
        ctx: &CodecContext<'_>,
        type_id: TypeId,
        input: &mut InputCursor<'_>,
    ) -> CoreResult<Object> {
        if let DecodePrologue::Dispatched(object) = ctx.begin_decode(type_id, input)? {
            return Ok(object);
        }
        let procedure = self.procedure(type_id)?;
        let code = &procedure.code;
        let mut object = Object::new(ctx.registry().name_of(type_id));
        let mut frames: Vec<DecodeFrame> = Vec::new();
        let mut field: Option<&String> = None;
        let mut pc = 0;

        while pc < code.len() {
            let instr = code[pc];
            pc += 1;

            let produced = match instr {
                Instr::Field(k) => {
                    field = procedure.fields.get(k as usize);
                    continue;
                }
                Instr::Prim(kind) => wire::read_primitive(input, kind)?,
                Instr::Enum(repr) => wire::read_enum(input, repr)?,
                Instr::Call(sym) => ctx.decode_nested(self.call_target(sym)?, input)?,
                Instr::Begin { sequence, end } => {
                    let count = input.read_count()?;
                    if count > 0 {
                        frames.push(DecodeFrame {
                            items: Vec::with_capacity(count.min(input.remaining())),
                            remaining: count,
                            sequence,
                        });
                        continue;
                    }
                    pc = end as usize;
                    container(sequence, Vec::new())
                }
                Instr::Next { body } => {
                    let Some(frame) = frames.last_mut() else {
                        continue;
                    };
                    frame.remaining -= 1;
                    if frame.remaining > 0 {
                        pc = body as usize;
                        continue;
                    }
                    match frames.pop() {
                        Some(done) => container(done.sequence, done.items),
                        None => continue,
                    }
                }
            };

            match frames.last_mut() {
                Some(frame) => frame.items.push(produced),
                None => {
                    let name = field.ok_or_else(|| {
                        CodecError::invalid_data(pc - 1, "value instruction before field select")
                    })?;
                    object.fields.insert(name.clone(), produced);
                }
            }
        }
        Ok(object)
    }
}

fn container(sequence: bool, items: Vec<Value>) -> Value {
    if sequence {
        Value::Sequence(items)
    } else {
        Value::Array(items)
    }
}
