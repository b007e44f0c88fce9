// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Ahead-of-time backend.
//!
//! [`compile_unit`] lowers the plan of every registered struct/class into a
//! flat [`Procedure`] and packages them into a [`CompiledUnit`], which can be
//! written to disk at build time. [`AotBackend::link`] binds a loaded unit to
//! the registry by procedure name, so no derivation happens at run time.

pub mod program;
pub mod unit;
pub mod vm;

pub use program::{procedure_name, Instr, Procedure};
pub use unit::{compile_unit, CompiledUnit, UNIT_MAGIC, UNIT_VERSION};
pub use vm::AotBackend;
