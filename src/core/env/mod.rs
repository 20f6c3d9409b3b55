// antimuon-rs: Antimuon Build Tool
//
// SPDX-FileCopyrightText: 2026 Antimuon Developers
// SPDX-License-Identifier: GPL-3.0-or-later

//! Environment variable management.
//!
//! ```text
//! Env (copy-on-write BTreeMap<EnvKey, String>)
//! Sources: current_env(), Env::from_map(), Env::new()
//! Ops: set/set_default/get/remove/prepend_path/append_path
//! ```
//!
//! Keys compare case-insensitively so `Path` and `PATH` are one variable.

pub mod container;
pub mod types;


/// Captures the current process environment.
#[must_use]
pub fn current_env() -> container::Env {
    container::Env::from_map(std::env::vars().collect())
}
