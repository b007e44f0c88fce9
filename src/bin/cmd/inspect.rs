// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Inspect command - show registered types, codec plans and unit files.

use std::path::PathBuf;

use clap::Subcommand;
use serde::Serialize;

use crate::common::{load_registry, Result};
use polycodec::core::{TypeKind, TypeRegistry};
use polycodec::encoding::{derive_plan, CompiledUnit};
use polycodec::schema::Semantics;

/// Inspect catalogs and compiled units.
#[derive(Subcommand, Clone, Debug)]
pub enum InspectCmd {
    /// List registered types with ids, inheritance and layouts
    Types {
        /// Catalog file (TOML or JSON)
        #[arg(value_name = "CATALOG")]
        catalog: PathBuf,

        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the codec plan of one type
    Plan {
        /// Catalog file (TOML or JSON)
        #[arg(value_name = "CATALOG")]
        catalog: PathBuf,

        /// Type name
        #[arg(value_name = "TYPE")]
        type_name: String,
    },

    /// Show the contents of a compiled unit
    Unit {
        /// Unit file
        #[arg(value_name = "FILE")]
        unit: PathBuf,

        /// Print every procedure
        #[arg(long)]
        listing: bool,
    },
}

impl InspectCmd {
    pub fn run(self) -> Result<()> {
        match self {
            InspectCmd::Types { catalog, json } => cmd_types(catalog, json),
            InspectCmd::Plan { catalog, type_name } => cmd_plan(catalog, type_name),
            InspectCmd::Unit { unit, listing } => cmd_unit(unit, listing),
        }
    }
}

#[derive(Serialize)]
struct TypeSummary {
    id: i32,
    name: String,
    kind: String,
    polymorphic: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    base: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    subtypes: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    fields: Vec<FieldSummary>,
}

#[derive(Serialize)]
struct FieldSummary {
    name: String,
    #[serde(rename = "type")]
    field_type: String,
    declared_in: String,
}

fn summarize(registry: &TypeRegistry) -> Vec<TypeSummary> {
    registry
        .iter()
        .map(|ty| match &ty.kind {
            TypeKind::Struct(info) => TypeSummary {
                id: ty.id,
                name: ty.name.clone(),
                kind: match info.semantics {
                    Semantics::Value => "struct".to_string(),
                    Semantics::Reference => "class".to_string(),
                },
                polymorphic: info.polymorphic,
                base: info.base.map(|id| registry.name_of(id)),
                subtypes: info.subtypes.iter().map(|&id| registry.name_of(id)).collect(),
                fields: info
                    .layout
                    .iter()
                    .map(|field| FieldSummary {
                        name: field.name.clone(),
                        field_type: field.field_type.to_string(),
                        declared_in: registry.name_of(field.declared_in),
                    })
                    .collect(),
            },
            TypeKind::Enum(info) => TypeSummary {
                id: ty.id,
                name: ty.name.clone(),
                kind: format!("enum({})", info.repr),
                polymorphic: false,
                base: None,
                subtypes: Vec::new(),
                fields: Vec::new(),
            },
        })
        .collect()
}

fn cmd_types(catalog: PathBuf, json: bool) -> Result<()> {
    let registry = load_registry(&catalog)?;
    let summaries = summarize(&registry);

    if json {
        println!("{}", serde_json::to_string_pretty(&summaries)?);
        return Ok(());
    }

    println!("=== {} ===", catalog.display());
    println!("Types: {}", registry.len());
    println!("Fingerprint: {:08x}", registry.fingerprint());
    println!();
    for summary in &summaries {
        print!("#{:<3} {} [{}]", summary.id, summary.name, summary.kind);
        if let Some(base) = &summary.base {
            print!(" : {base}");
        }
        if summary.polymorphic {
            print!(" (tagged)");
        }
        println!();
        for field in &summary.fields {
            if field.declared_in == summary.name {
                println!("       {}: {}", field.name, field.field_type);
            } else {
                println!(
                    "       {}: {}  (from {})",
                    field.name, field.field_type, field.declared_in
                );
            }
        }
    }
    Ok(())
}

fn cmd_plan(catalog: PathBuf, type_name: String) -> Result<()> {
    let registry = load_registry(&catalog)?;
    let plan = derive_plan(&registry, registry.id_of(&type_name)?)?;
    print!("{plan}");
    Ok(())
}

fn cmd_unit(unit: PathBuf, listing: bool) -> Result<()> {
    let compiled = CompiledUnit::read_from(&unit)?;
    println!("=== {} ===", unit.display());
    println!("Fingerprint: {:08x}", compiled.fingerprint);
    println!("Procedures: {}", compiled.procedures.len());
    println!("Symbols: {}", compiled.symbols.len());
    println!("Instructions: {}", compiled.instruction_count());
    if listing {
        println!();
        for procedure in &compiled.procedures {
            print!("{procedure}");
        }
    }
    Ok(())
}
