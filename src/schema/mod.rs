// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Type descriptors and catalogs.
//!
//! - [`ast`] - struct/class, field and enum descriptors
//! - [`catalog`] - ordered descriptor lists loaded from TOML or JSON

pub mod ast;
pub mod catalog;

pub use ast::{
    EnumDescriptor, FieldDescriptor, FieldType, Semantics, TypeDescriptor, Visibility,
};
pub use catalog::{Catalog, CatalogEntry};
