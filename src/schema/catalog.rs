// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Type catalogs.
//!
//! A catalog lists descriptors in registration order, which fixes the type
//! ids. TOML example:
//!
//! ```toml
//! [[types]]
//! kind = "enum"
//! name = "Color"
//! repr = "uint8"
//! variants = { Red = 0, Green = 1 }
//!
//! [[types]]
//! kind = "type"
//! name = "Shape"
//! fields = [
//!     { name = "color", type = "Color" },
//!     { name = "points", type = "list<int32>" },
//! ]
//!
//! [[types]]
//! kind = "type"
//! name = "Circle"
//! base = "Shape"
//! fields = [{ name = "radius", type = "float64" }]
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::ast::{EnumDescriptor, TypeDescriptor};
use crate::core::{CodecError, RegistryBuilder, Result, TypeRegistry};

/// One catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum CatalogEntry {
    /// Struct or class
    Type(TypeDescriptor),
    /// Enumeration
    Enum(EnumDescriptor),
}

impl CatalogEntry {
    /// Declared name.
    pub fn name(&self) -> &str {
        match self {
            CatalogEntry::Type(desc) => &desc.name,
            CatalogEntry::Enum(desc) => &desc.name,
        }
    }
}

/// Ordered set of type descriptors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    /// Entries in registration order
    #[serde(default)]
    pub types: Vec<CatalogEntry>,
}

impl Catalog {
    /// Empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a struct/class.
    pub fn with_type(mut self, desc: TypeDescriptor) -> Self {
        self.types.push(CatalogEntry::Type(desc));
        self
    }

    /// Append an enum.
    pub fn with_enum(mut self, desc: EnumDescriptor) -> Self {
        self.types.push(CatalogEntry::Enum(desc));
        self
    }

    /// Parse TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| CodecError::Other(format!("invalid TOML catalog: {e}")))
    }

    /// Parse JSON text.
    pub fn from_json_str(text: &str) -> Result<Self> {
        serde_json::from_str(text)
            .map_err(|e| CodecError::Other(format!("invalid JSON catalog: {e}")))
    }

    /// Load from a file; `.json` files are JSON, anything else TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let catalog = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json_str(&text)?,
            _ => Self::from_toml_str(&text)?,
        };
        debug!(path = %path.display(), entries = catalog.types.len(), "loaded catalog");
        Ok(catalog)
    }

    /// Serialize as pretty JSON.
    pub fn to_json_string(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| CodecError::Other(format!("cannot serialize catalog: {e}")))
    }

    /// Register every entry, in order.
    pub fn builder(&self) -> Result<RegistryBuilder> {
        let mut builder = RegistryBuilder::new();
        for entry in &self.types {
            match entry {
                CatalogEntry::Type(desc) => builder.register_type(desc.clone())?,
                CatalogEntry::Enum(desc) => builder.register_enum(desc.clone())?,
            };
        }
        Ok(builder)
    }

    /// Register and initialize.
    pub fn build(&self) -> Result<TypeRegistry> {
        self.builder()?.initialize()
    }
}
