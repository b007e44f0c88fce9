// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Encode and decode commands - convert between JSON values and bytes.

use std::path::PathBuf;

use anyhow::Context as _;
use clap::Args;

use crate::common::{hex_dump, load_registry, open_serializer, Result};
use polycodec::Value;

/// Encode a JSON value and print the bytes as hex.
#[derive(Args, Clone, Debug)]
pub struct EncodeCmd {
    /// Catalog file (TOML or JSON)
    #[arg(value_name = "CATALOG")]
    catalog: PathBuf,

    /// JSON file holding the value
    #[arg(value_name = "VALUE")]
    value: PathBuf,

    /// Declared root type (defaults to the value's own type)
    #[arg(long = "as", value_name = "TYPE")]
    declared: Option<String>,

    /// Engine config file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Compiled unit; selects the aot backend
    #[arg(short, long, value_name = "FILE")]
    unit: Option<PathBuf>,

    /// Print an offset dump instead of plain hex
    #[arg(long)]
    dump: bool,
}

impl EncodeCmd {
    pub fn run(self) -> Result<()> {
        let registry = load_registry(&self.catalog)?;
        let serializer = open_serializer(registry, self.config.as_deref(), self.unit)?;

        let text = std::fs::read_to_string(&self.value)
            .with_context(|| format!("Failed to read {}", self.value.display()))?;
        let value: Value = serde_json::from_str(&text)
            .with_context(|| format!("Invalid value JSON in {}", self.value.display()))?;

        let bytes = match &self.declared {
            Some(declared) => serializer.serialize_as(declared, &value)?,
            None => serializer.serialize(&value)?,
        };
        if self.dump {
            print!("{}", hex_dump(&bytes));
        } else {
            println!("{}", hex::encode(&bytes));
        }
        Ok(())
    }
}

/// Decode hex bytes and print the value as JSON.
#[derive(Args, Clone, Debug)]
pub struct DecodeCmd {
    /// Catalog file (TOML or JSON)
    #[arg(value_name = "CATALOG")]
    catalog: PathBuf,

    /// Expected root type
    #[arg(value_name = "TYPE")]
    type_name: String,

    /// Hex-encoded bytes
    #[arg(value_name = "HEX")]
    hex: String,

    /// Engine config file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Compiled unit; selects the aot backend
    #[arg(short, long, value_name = "FILE")]
    unit: Option<PathBuf>,
}

impl DecodeCmd {
    pub fn run(self) -> Result<()> {
        let registry = load_registry(&self.catalog)?;
        let serializer = open_serializer(registry, self.config.as_deref(), self.unit)?;

        let bytes = hex::decode(self.hex.trim()).context("Invalid hex input")?;
        let value = serializer.deserialize(&bytes, &self.type_name)?;
        println!("{}", serde_json::to_string_pretty(&value)?);
        Ok(())
    }
}
