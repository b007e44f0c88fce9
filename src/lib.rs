// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! # Polycodec
//!
//! Compact binary serialization of object graphs with polymorphic references.
//!
//! Types are described once, registered into a [`TypeRegistry`](core::TypeRegistry)
//! and then encoded by one of three interchangeable backends that all produce
//! the same bytes:
//!
//! - **Interpreted** ([`encoding::InterpretedBackend`]) - plans derived on
//!   first use and cached
//! - **Ahead-of-time** ([`encoding::AotBackend`]) - procedures compiled into a
//!   unit file at build time and linked at startup
//! - **Generated** ([`codegen::GeneratedBackend`]) - Rust source emitted by
//!   [`codegen::generate_source`] and compiled into the program
//!
//! ## Architecture
//!
//! - `core/` - values, errors, configuration and the type registry
//! - `schema/` - type descriptors and TOML/JSON catalogs
//! - `encoding/` - cursors, codec plans, backends and the [`Serializer`]
//! - `codegen/` - source emission and the runtime emitted code links against
//!
//! ## Example
//!
//! ```rust
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use std::sync::Arc;
//! use polycodec::core::{Object, PrimitiveKind, RegistryBuilder, Value};
//! use polycodec::schema::{FieldType, TypeDescriptor};
//! use polycodec::Serializer;
//!
//! let mut builder = RegistryBuilder::new();
//! builder.register_type(TypeDescriptor::reference("Shape").field("id", PrimitiveKind::Int32))?;
//! builder.register_type(
//!     TypeDescriptor::reference("Circle")
//!         .extends("Shape")
//!         .field("radius", PrimitiveKind::Float64),
//! )?;
//! builder.register_type(
//!     TypeDescriptor::reference("Scene")
//!         .field("shapes", FieldType::sequence_of(FieldType::named("Shape"))),
//! )?;
//! let serializer = Serializer::interpreted(Arc::new(builder.initialize()?));
//!
//! let circle = Object::new("Circle").with("id", 1i32).with("radius", 2.5f64);
//! let scene = Value::Object(Object::new("Scene").with("shapes", Value::Sequence(vec![circle.into()])));
//!
//! let bytes = serializer.serialize(&scene)?;
//! assert_eq!(serializer.deserialize(&bytes, "Scene")?, scene);
//! # Ok(())
//! # }
//! ```

// Core types
pub mod core;

// Re-export core types for convenience
pub use core::{CodecError, EngineConfig, Object, PrimitiveKind, Result, Value};

// Descriptors and catalogs
pub mod schema;

// Encoding/decoding
pub mod encoding;

pub use encoding::Serializer;

// Source generation
pub mod codegen;
