// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Engine configuration.
//!
//! ```toml
//! backend = "aot"
//! max_depth = 128
//! warm_up = false
//! unit = "target/codecs.pcu"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::error::{CodecError, Result};
use super::BackendKind;

/// Default nesting limit for encode/decode.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Engine settings, loadable from TOML or JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Backend the CLI and [`Serializer::from_config`](crate::Serializer::from_config) use
    pub backend: BackendKind,
    /// Deepest allowed object nesting; deeper input fails with `DepthExceeded`
    pub max_depth: usize,
    /// Derive every interpreter plan at construction instead of on first use
    pub warm_up: bool,
    /// Compiled unit file for the `aot` backend
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<PathBuf>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            backend: BackendKind::default(),
            max_depth: DEFAULT_MAX_DEPTH,
            warm_up: false,
            unit: None,
        }
    }
}

impl EngineConfig {
    /// Parse TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| CodecError::Other(format!("invalid TOML config: {e}")))
    }

    /// Parse JSON text.
    pub fn from_json_str(text: &str) -> Result<Self> {
        serde_json::from_str(text)
            .map_err(|e| CodecError::Other(format!("invalid JSON config: {e}")))
    }

    /// Load from a file; `.json` files are JSON, anything else TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json_str(&text)?,
            _ => Self::from_toml_str(&text)?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the engine cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.max_depth == 0 {
            return Err(CodecError::Other("max_depth must be at least 1".to_string()));
        }
        if self.backend == BackendKind::Aot && self.unit.is_none() {
            return Err(CodecError::Other(
                "the aot backend needs a `unit` path".to_string(),
            ));
        }
        Ok(())
    }

    /// Builder-style backend override.
    pub fn with_backend(mut self, backend: BackendKind) -> Self {
        self.backend = backend;
        self
    }

    /// Builder-style depth override.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}
