// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Rust source emission.
//!
//! For every struct/class the emitter writes one encode and one decode
//! function that follow the type's codec plan step by step, plus a
//! `MODULE` table that [`GeneratedBackend`](super::GeneratedBackend) binds.
//! Output depends only on the registry, so regenerating an unchanged
//! registry gives identical text.

use std::collections::HashSet;
use std::path::Path;

use tracing::{debug, info};

use super::block::{CodeBlock, CodeElement, CodeGroup};
use crate::core::{PrimitiveKind, Result, TypeRegistry};
use crate::encoding::plan::{derive_plan, CodecPlan, ValueOp};

/// Emission settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceOptions {
    /// Path the emitted `use` resolves the runtime through
    pub crate_path: String,
}

impl Default for SourceOptions {
    fn default() -> Self {
        Self {
            crate_path: "polycodec".to_string(),
        }
    }
}

/// Emit a codec module for every struct/class of `registry`.
pub fn generate_source(registry: &TypeRegistry) -> Result<String> {
    generate_source_with(registry, &SourceOptions::default())
}

/// Emit and write to `path`.
pub fn generate_source_to(registry: &TypeRegistry, path: impl AsRef<Path>) -> Result<()> {
    let source = generate_source(registry)?;
    std::fs::write(path.as_ref(), &source)?;
    info!(
        path = %path.as_ref().display(),
        bytes = source.len(),
        "wrote generated codecs"
    );
    Ok(())
}

/// Emit with explicit options.
pub fn generate_source_with(registry: &TypeRegistry, options: &SourceOptions) -> Result<String> {
    let fingerprint = registry.fingerprint();
    let mut plans = Vec::new();
    for ty in registry.iter() {
        if ty.as_struct().is_some() {
            plans.push(derive_plan(registry, ty.id)?);
        }
    }
    let names = function_stems(&plans);

    let mut source = String::new();
    source.push_str("// @generated by polycodec. Do not edit.\n");
    source.push_str(&format!(
        "// Registry fingerprint {fingerprint:08x}, {} codecs.\n\n",
        plans.len()
    ));
    source.push_str(&format!("use {}::codegen::runtime::*;\n\n", options.crate_path));
    source.push_str(&module_table(fingerprint, &plans, &names).render());

    for (plan, stem) in plans.iter().zip(&names) {
        source.push('\n');
        source.push_str(&encode_function(plan, stem).render());
        source.push('\n');
        source.push_str(&decode_function(plan, stem).render());
    }

    debug!(codecs = plans.len(), bytes = source.len(), "emitted codec source");
    Ok(source)
}

/// Snake-case function stem per plan, made unique with the type id.
fn function_stems(plans: &[CodecPlan]) -> Vec<String> {
    let mut seen = HashSet::new();
    plans
        .iter()
        .map(|plan| {
            let stem = snake_case(&plan.type_name);
            if seen.insert(stem.clone()) {
                stem
            } else {
                format!("{stem}_{}", plan.type_id)
            }
        })
        .collect()
}

fn snake_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    let mut prev_lower = false;
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            if c.is_ascii_uppercase() && prev_lower {
                out.push('_');
            }
            out.push(c.to_ascii_lowercase());
            prev_lower = c.is_ascii_lowercase();
        } else {
            if !out.ends_with('_') {
                out.push('_');
            }
            prev_lower = false;
        }
    }
    out
}

fn module_table(fingerprint: u32, plans: &[CodecPlan], stems: &[String]) -> CodeBlock {
    let mut codecs = CodeBlock::list("codecs: &").with_comma();
    for (plan, stem) in plans.iter().zip(stems) {
        let mut entry = CodeBlock::new("GeneratedCodec").with_comma();
        entry
            .add_line(format!("name: {:?},", plan.type_name))
            .add_line(format!("id: {},", plan.type_id))
            .add_line(format!("encode: encode_{stem},"))
            .add_line(format!("decode: decode_{stem},"));
        codecs.add(entry);
    }

    let mut table =
        CodeBlock::new("pub static MODULE: GeneratedModule = GeneratedModule").with_semicolon();
    table
        .add_line(format!("fingerprint: 0x{fingerprint:08x},"))
        .add(codecs);
    table
}

fn encode_function(plan: &CodecPlan, stem: &str) -> CodeBlock {
    let mut body = CodeBlock::new(format!(
        "fn encode_{stem}(ctx: &CodecContext<'_>, object: &Object, out: &mut OutputCursor) -> Result<()>"
    ));
    let mut prologue = CodeBlock::new(format!(
        "if ctx.begin_encode({}, object, out)? == EncodePrologue::Dispatched",
        plan.type_id
    ));
    prologue.add_line("return Ok(());");
    body.add(prologue);

    for step in &plan.steps {
        let field = format!("{:?}", step.name);
        let value = format!("field(object, {field})?");
        body.add(encode_op(&step.op, &value, &field, 0));
    }
    body.add_line("Ok(())");
    body
}

fn encode_op(op: &ValueOp, value: &str, field: &str, depth: usize) -> CodeElement {
    match op {
        ValueOp::Primitive(kind) => {
            let (write, expect, _) = primitive_calls(*kind);
            CodeElement::Line(format!("out.{write}({expect}({value}, {field})?)?;"))
        }
        ValueOp::Enum { repr, .. } => CodeElement::Line(format!(
            "write_enum(out, PrimitiveKind::{repr:?}, {value}, {field})?;"
        )),
        ValueOp::Nested { type_id } => {
            CodeElement::Line(format!("ctx.encode_nested({type_id}, {value}, out)?;"))
        }
        ValueOp::Array(inner) | ValueOp::Sequence(inner) => {
            let (expect, what) = match op {
                ValueOp::Array(_) => ("expect_array", "array"),
                _ => ("expect_sequence", "sequence"),
            };
            let items = format!("items{depth}");
            let item = format!("item{depth}");
            let mut each = CodeBlock::new(format!("for {item} in {items}"));
            each.add(encode_op(inner, &item, field, depth + 1));

            let mut group = CodeGroup::new();
            group
                .add_line(format!("let {items} = {expect}({value}, {field})?;"))
                .add_line(format!("out.write_count({items}.len(), {what:?})?;"))
                .add(each);
            group.into()
        }
    }
}

fn decode_function(plan: &CodecPlan, stem: &str) -> CodeBlock {
    let mut body = CodeBlock::new(format!(
        "fn decode_{stem}(ctx: &CodecContext<'_>, input: &mut InputCursor<'_>) -> Result<Object>"
    ));
    let mut prologue = CodeBlock::new(format!(
        "if let DecodePrologue::Dispatched(object) = ctx.begin_decode({}, input)?",
        plan.type_id
    ));
    prologue.add_line("return Ok(object);");
    body.add(prologue);

    let binding = if plan.steps.is_empty() { "let" } else { "let mut" };
    body.add_line(format!("{binding} object = Object::new({:?});", plan.type_name));
    for step in &plan.steps {
        let (setup, value) = decode_op(&step.op, 0);
        if let Some(setup) = setup {
            body.add(setup);
        }
        body.add_line(format!("object.set({:?}, {value});", step.name));
    }
    body.add_line("Ok(object)");
    body
}

/// Statements needed before the value, and the value expression.
fn decode_op(op: &ValueOp, depth: usize) -> (Option<CodeElement>, String) {
    match op {
        ValueOp::Primitive(kind) => {
            let (_, _, read) = primitive_calls(*kind);
            (None, format!("Value::{kind:?}(input.{read}()?)"))
        }
        ValueOp::Enum { repr, .. } => (None, format!("read_enum(input, PrimitiveKind::{repr:?})?")),
        ValueOp::Nested { type_id } => (None, format!("ctx.decode_nested({type_id}, input)?")),
        ValueOp::Array(inner) | ValueOp::Sequence(inner) => {
            let variant = match op {
                ValueOp::Array(_) => "Array",
                _ => "Sequence",
            };
            let count = format!("count{depth}");
            let items = format!("items{depth}");
            let mut each = CodeBlock::new(format!("for _ in 0..{count}"));
            let (setup, element) = decode_op(inner, depth + 1);
            if let Some(setup) = setup {
                each.add(setup);
            }
            each.add_line(format!("{items}.push({element});"));

            let mut group = CodeGroup::new();
            group
                .add_line(format!("let {count} = input.read_count()?;"))
                .add_line(format!(
                    "let mut {items} = Vec::with_capacity({count}.min(input.remaining()));"
                ))
                .add(each);
            (Some(group.into()), format!("Value::{variant}({items})"))
        }
    }
}

/// Cursor write method, value accessor and cursor read method for a kind.
fn primitive_calls(kind: PrimitiveKind) -> (&'static str, &'static str, &'static str) {
    match kind {
        PrimitiveKind::Bool => ("write_bool", "expect_bool", "read_bool"),
        PrimitiveKind::Int8 => ("write_i8", "expect_i8", "read_i8"),
        PrimitiveKind::UInt8 => ("write_u8", "expect_u8", "read_u8"),
        PrimitiveKind::Int16 => ("write_i16", "expect_i16", "read_i16"),
        PrimitiveKind::UInt16 => ("write_u16", "expect_u16", "read_u16"),
        PrimitiveKind::Int32 => ("write_i32", "expect_i32", "read_i32"),
        PrimitiveKind::UInt32 => ("write_u32", "expect_u32", "read_u32"),
        PrimitiveKind::Int64 => ("write_i64", "expect_i64", "read_i64"),
        PrimitiveKind::UInt64 => ("write_u64", "expect_u64", "read_u64"),
        PrimitiveKind::Float32 => ("write_f32", "expect_f32", "read_f32"),
        PrimitiveKind::Float64 => ("write_f64", "expect_f64", "read_f64"),
        PrimitiveKind::Char => ("write_char", "expect_char", "read_char"),
        PrimitiveKind::String => ("write_string", "expect_str", "read_string"),
        PrimitiveKind::Bytes => ("write_blob", "expect_bytes", "read_blob"),
    }
}
