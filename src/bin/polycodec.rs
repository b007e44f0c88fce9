// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! # Polycodec CLI
//!
//! Build-time tooling for polycodec catalogs.
//!
//! ## Usage
//!
//! ```sh
//! # Emit Rust codecs for the generated backend
//! polycodec generate types.toml -o src/codecs.rs
//!
//! # Compile a unit for the aot backend
//! polycodec compile types.toml -o codecs.pcu
//!
//! # Show ids, inheritance and layouts
//! polycodec inspect types types.toml
//!
//! # Encode a JSON value, then decode it again
//! polycodec encode types.toml value.json
//! polycodec decode types.toml Shape 0100000007000000
//! ```
//!
//! Set `RUST_LOG=debug` for engine logs.

mod cmd;
mod common;

use std::process;

use clap::{Parser, Subcommand};
use cmd::{CompileCmd, DecodeCmd, EncodeCmd, GenerateCmd, InspectCmd};
use common::Result;

/// Polycodec - polymorphic binary serialization toolkit
///
/// Generate codec source, compile codec units and inspect catalogs.
#[derive(Parser, Clone)]
#[command(name = "polycodec")]
#[command(about = "Polymorphic binary serialization toolkit", long_about = None)]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = "ArcheBase")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Clone)]
enum Commands {
    /// Emit Rust codec source for the generated backend
    Generate(GenerateCmd),

    /// Compile a codec unit for the aot backend
    Compile(CompileCmd),

    /// Inspect catalogs, codec plans and units
    #[command(subcommand)]
    Inspect(InspectCmd),

    /// Encode a JSON value to hex
    Encode(EncodeCmd),

    /// Decode hex to a JSON value
    Decode(DecodeCmd),
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate(cmd) => cmd.run(),
        Commands::Compile(cmd) => cmd.run(),
        Commands::Inspect(cmd) => cmd.run(),
        Commands::Encode(cmd) => cmd.run(),
        Commands::Decode(cmd) => cmd.run(),
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let result = run();

    if let Err(e) = result {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
