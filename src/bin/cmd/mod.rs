// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! CLI subcommands.

mod codec;
mod compile;
mod generate;
mod inspect;

pub use codec::{DecodeCmd, EncodeCmd};
pub use compile::CompileCmd;
pub use generate::GenerateCmd;
pub use inspect::InspectCmd;
