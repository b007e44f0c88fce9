// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Source-generation backend.
//!
//! [`generate_source`] emits a Rust module with one encoder and decoder per
//! struct/class. Once that module is compiled into a program,
//! [`GeneratedBackend::bind`] attaches its `MODULE` table to the registry.
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! # let registry = polycodec::core::RegistryBuilder::new().initialize()?;
//! polycodec::codegen::generate_source_to(&registry, "src/codecs.rs")?;
//! # Ok(())
//! # }
//! ```

pub mod block;
pub mod emit;
pub mod runtime;

pub use block::{CodeBlock, CodeElement, CodeGroup};
pub use emit::{generate_source, generate_source_to, generate_source_with, SourceOptions};
pub use runtime::{GeneratedBackend, GeneratedCodec, GeneratedModule};
