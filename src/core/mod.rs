// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Core types used throughout polycodec.
//!
//! This module provides the foundational types for the library:
//! - [`CodecError`] - Error handling
//! - [`Value`] - Dynamic value representation
//! - [`TypeRegistry`] - Polymorphic type registry
//! - [`BackendKind`] - Codec backend identifier

pub mod config;
pub mod error;
pub mod registry;
pub mod value;

pub use config::EngineConfig;
pub use error::{CodecError, Result};
pub use registry::{
    EnumInfo, LayoutField, RegisteredType, RegistryBuilder, StructInfo, TypeId, TypeKind,
    TypeRegistry,
};
pub use value::{FieldMap, Object, PrimitiveKind, Value};

use serde::{Deserialize, Serialize};

/// Codec backend identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Plans derived on first use and cached per type
    #[default]
    Interpreted,
    /// Procedures loaded from a compiled unit
    #[serde(alias = "ahead-of-time")]
    Aot,
    /// Functions from emitted and compiled Rust source
    Generated,
}

/// Error returned when parsing a `BackendKind` from string fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseBackendKindError {
    _private: (),
}

impl std::fmt::Display for ParseBackendKindError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid backend name, expected 'interpreted', 'aot', or 'generated'"
        )
    }
}

impl std::error::Error for ParseBackendKindError {}

impl std::str::FromStr for BackendKind {
    type Err = ParseBackendKindError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "interpreted" | "interp" => Ok(BackendKind::Interpreted),
            "aot" | "ahead-of-time" => Ok(BackendKind::Aot),
            "generated" | "codegen" => Ok(BackendKind::Generated),
            _ => Err(ParseBackendKindError { _private: () }),
        }
    }
}

impl BackendKind {
    /// Convert to string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendKind::Interpreted => "interpreted",
            BackendKind::Aot => "aot",
            BackendKind::Generated => "generated",
        }
    }
}

impl std::fmt::Display for BackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
