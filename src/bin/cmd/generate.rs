// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Generate command - emit Rust codec source for a catalog.

use std::path::PathBuf;

use clap::Args;

use crate::common::{load_registry, write_output, Result};
use polycodec::codegen::{generate_source_with, SourceOptions};

/// Emit Rust codec source.
#[derive(Args, Clone, Debug)]
pub struct GenerateCmd {
    /// Catalog file (TOML or JSON)
    #[arg(value_name = "CATALOG")]
    catalog: PathBuf,

    /// Output file (stdout if omitted)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Path the emitted code imports the runtime from
    #[arg(long, default_value = "polycodec")]
    crate_path: String,
}

impl GenerateCmd {
    pub fn run(self) -> Result<()> {
        let registry = load_registry(&self.catalog)?;
        let options = SourceOptions {
            crate_path: self.crate_path,
        };
        let source = generate_source_with(&registry, &options)?;
        write_output(self.output.as_deref(), &source)?;
        if let Some(output) = &self.output {
            eprintln!(
                "Generated codecs for {} types -> {}",
                registry.len(),
                output.display()
            );
        }
        Ok(())
    }
}
