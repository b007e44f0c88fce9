// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Cached interpretation backend.
//!
//! The first encode or decode of a type derives its [`CodecPlan`] and memoizes
//! it; later calls only take the read lock. Racing first touches may derive
//! the same plan twice, but only the first insertion is kept.

use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::debug;

use super::context::{required_field, CodecBackend, CodecContext, DecodePrologue, EncodePrologue};
use super::cursor::InputCursor;
use super::output::OutputCursor;
use super::plan::{derive_plan, CodecPlan, ValueOp};
use super::wire;
use crate::core::{
    BackendKind, CodecError, Object, Result as CoreResult, TypeId, TypeRegistry, Value,
};

type PlanCache = HashMap<TypeId, Arc<CodecPlan>>;

/// Backend that walks derived plans directly.
pub struct InterpretedBackend {
    registry: Arc<TypeRegistry>,
    plans: RwLock<PlanCache>,
}

impl InterpretedBackend {
    /// Create a backend with an empty plan cache.
    pub fn new(registry: Arc<TypeRegistry>) -> Self {
        Self {
            registry,
            plans: RwLock::new(HashMap::new()),
        }
    }

    /// Derive every struct/class plan now. Returns the number cached.
    pub fn warm_up(&self) -> CoreResult<usize> {
        for ty in self.registry.iter() {
            if ty.as_struct().is_some() {
                self.plan(ty.id)?;
            }
        }
        self.cached_plans()
    }

    /// Number of plans in the cache.
    pub fn cached_plans(&self) -> CoreResult<usize> {
        Ok(self.read_cache()?.len())
    }

    /// Get the plan for `type_id`, deriving and caching it on first use.
    pub fn plan(&self, type_id: TypeId) -> CoreResult<Arc<CodecPlan>> {
        if let Some(plan) = self.read_cache()?.get(&type_id) {
            return Ok(Arc::clone(plan));
        }

        let derived = Arc::new(derive_plan(&self.registry, type_id)?);
        let mut cache = self.write_cache()?;
        let plan = cache.entry(type_id).or_insert_with(|| {
            debug!(type_name = %derived.type_name, "cached codec plan");
            Arc::clone(&derived)
        });
        Ok(Arc::clone(plan))
    }

    fn read_cache(&self) -> CoreResult<RwLockReadGuard<'_, PlanCache>> {
        self.plans
            .read()
            .map_err(|e| CodecError::Other(format!("Plan cache lock poisoned: {e}")))
    }

    fn write_cache(&self) -> CoreResult<RwLockWriteGuard<'_, PlanCache>> {
        self.plans
            .write()
            .map_err(|e| CodecError::Other(format!("Plan cache lock poisoned: {e}")))
    }
}

impl CodecBackend for InterpretedBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Interpreted
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
        let plan = self.plan(type_id)?;
        for step in &plan.steps {
            let value = required_field(object, &step.name)?;
            encode_value(ctx, &step.op, value, out, &step.name)?;
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
        let plan = self.plan(type_id)?;
        let mut object = Object::new(plan.type_name.clone());
        for step in &plan.steps {
            let value = decode_value(ctx, &step.op, input)?;
            object.fields.insert(step.name.clone(), value);
        }
        Ok(object)
    }
}

fn encode_value(
    ctx: &CodecContext<'_>,
    op: &ValueOp,
    value: &Value,
    out: &mut OutputCursor,
    field: &str,
) -> CoreResult<()> {
    match op {
        ValueOp::Primitive(kind) => wire::write_primitive(out, *kind, value, field),
        ValueOp::Enum { repr, .. } => wire::write_enum(out, *repr, value, field),
        ValueOp::Nested { type_id } => ctx.encode_nested(*type_id, value, out),
        ValueOp::Array(inner) => {
            let Value::Array(items) = value else {
                return Err(CodecError::invalid_value(field, "array", value.kind_name()));
            };
            out.write_count(items.len(), "array")?;
            items
                .iter()
                .try_for_each(|item| encode_value(ctx, inner, item, out, field))
        }
        ValueOp::Sequence(inner) => {
            let Value::Sequence(items) = value else {
                return Err(CodecError::invalid_value(field, "sequence", value.kind_name()));
            };
            out.write_count(items.len(), "sequence")?;
            items
                .iter()
                .try_for_each(|item| encode_value(ctx, inner, item, out, field))
        }
    }
}

fn decode_value(
    ctx: &CodecContext<'_>,
    op: &ValueOp,
    input: &mut InputCursor<'_>,
) -> CoreResult<Value> {
    match op {
        ValueOp::Primitive(kind) => wire::read_primitive(input, *kind),
        ValueOp::Enum { repr, .. } => wire::read_enum(input, *repr),
        ValueOp::Nested { type_id } => ctx.decode_nested(*type_id, input),
        ValueOp::Array(inner) => decode_elements(ctx, inner, input).map(Value::Array),
        ValueOp::Sequence(inner) => decode_elements(ctx, inner, input).map(Value::Sequence),
    }
}

fn decode_elements(
    ctx: &CodecContext<'_>,
    inner: &ValueOp,
    input: &mut InputCursor<'_>,
) -> CoreResult<Vec<Value>> {
    let count = input.read_count()?;
    // preallocation is capped by what the input could still hold
    let mut items = Vec::with_capacity(count.min(input.remaining()));
    for _ in 0..count {
        items.push(decode_value(ctx, inner, input)?);
    }
    Ok(items)
}
