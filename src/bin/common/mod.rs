// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Common utilities for CLI commands.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context as _;

use polycodec::core::{BackendKind, TypeRegistry};
use polycodec::schema::Catalog;
use polycodec::{EngineConfig, Serializer};

pub use anyhow::Result as CliResult;
pub type Result<T = ()> = CliResult<T>;

/// Load a catalog file and initialize its registry.
pub fn load_registry(path: &Path) -> Result<TypeRegistry> {
    let catalog = Catalog::load(path)
        .with_context(|| format!("Failed to read catalog {}", path.display()))?;
    let registry = catalog
        .build()
        .with_context(|| format!("Invalid catalog {}", path.display()))?;
    tracing::debug!(types = registry.len(), "registry initialized");
    Ok(registry)
}

/// Build a serializer from an optional config file and an optional unit
/// override. A unit path selects the aot backend.
pub fn open_serializer(
    registry: TypeRegistry,
    config: Option<&Path>,
    unit: Option<PathBuf>,
) -> Result<Serializer> {
    let mut config = match config {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => EngineConfig::default(),
    };
    if let Some(unit) = unit {
        config.backend = BackendKind::Aot;
        config.unit = Some(unit);
    }
    Ok(Serializer::from_config(Arc::new(registry), &config)?)
}

/// Write text to a file, or to stdout when no path is given.
pub fn write_output(path: Option<&Path>, text: &str) -> Result<()> {
    match path {
        Some(path) => std::fs::write(path, text)
            .with_context(|| format!("Failed to write {}", path.display()))?,
        None => print!("{text}"),
    }
    Ok(())
}

/// Hex dump with offsets, 16 bytes per line.
pub fn hex_dump(bytes: &[u8]) -> String {
    let mut out = String::new();
    for (row, chunk) in bytes.chunks(16).enumerate() {
        let hex = hex::encode(chunk);
        let pairs: Vec<&str> = (0..chunk.len()).map(|i| &hex[i * 2..i * 2 + 2]).collect();
        out.push_str(&format!("{:08x}  {}\n", row * 16, pairs.join(" ")));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_dump_rows() {
        let bytes: Vec<u8> = (0..20).collect();
        let dump = hex_dump(&bytes);
        let lines: Vec<&str> = dump.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("00000000  00 01 02"));
        assert_eq!(lines[1], "00000010  10 11 12 13");
    }
}
