// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Binary encoding and decoding.
//!
//! - [`cursor`] / [`output`] - bounds-checked little-endian cursors
//! - [`wire`] - primitive and enum codecs
//! - [`plan`] - per-type codec plans derived from the registry
//! - [`context`] - the backend seam and the polymorphic tag protocol
//! - [`interp`] - cached plan interpretation backend
//! - [`aot`] - compiled unit backend
//! - [`codec`] - the [`Serializer`] facade

pub mod aot;
pub mod codec;
pub mod context;
pub mod cursor;
pub mod interp;
pub mod output;
pub mod plan;
pub mod wire;

pub use aot::{compile_unit, AotBackend, CompiledUnit};
pub use codec::Serializer;
pub use context::{CodecBackend, CodecContext};
pub use cursor::InputCursor;
pub use interp::InterpretedBackend;
pub use output::OutputCursor;
pub use plan::{derive_plan, CodecPlan, FieldStep, ValueOp};
