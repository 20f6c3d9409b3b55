// antimuon-rs: Antimuon Build Tool
//
// SPDX-FileCopyrightText: 2026 Antimuon Developers
// SPDX-License-Identifier: GPL-3.0-or-later

//! Async process spawning and management.
//!
//! ```text
//! ProcessBuilder::new("gclient")
//!   .args() .cwd() .env()
//!   .run()
//!       --> tokio::process::Command (stdio inherited)
//!       --> exit code
//!
//! Invocation --> ProcessRunner (SystemRunner | DryRunner) --> exit code
//! ```

pub mod builder;
pub mod exec;
mod runner;
