// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Compile command - build a codec unit for the aot backend.

use std::path::PathBuf;

use clap::Args;

use crate::common::{load_registry, Result};
use polycodec::encoding::compile_unit;

/// Compile a catalog into a unit file.
#[derive(Args, Clone, Debug)]
pub struct CompileCmd {
    /// Catalog file (TOML or JSON)
    #[arg(value_name = "CATALOG")]
    catalog: PathBuf,

    /// Unit file to write
    #[arg(short, long, value_name = "FILE")]
    output: PathBuf,

    /// Print the procedure listing
    #[arg(long)]
    listing: bool,
}

impl CompileCmd {
    pub fn run(self) -> Result<()> {
        let registry = load_registry(&self.catalog)?;
        let unit = compile_unit(&registry)?;
        unit.write_to(&self.output)?;

        if self.listing {
            for procedure in &unit.procedures {
                print!("{procedure}");
            }
        }
        println!(
            "Compiled {} procedures ({} instructions) -> {}",
            unit.procedures.len(),
            unit.instruction_count(),
            self.output.display()
        );
        Ok(())
    }
}
