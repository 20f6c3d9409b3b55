// antimuon-rs: Antimuon Build Tool
//
// SPDX-FileCopyrightText: 2026 Antimuon Developers
// SPDX-License-Identifier: GPL-3.0-or-later

//! Core modules for process and environment management.
//!
//! ```text
//!          core
//!           |
//!     +-----+------+
//!     |            |
//!     v            v
//!    env        process
//!     |            |
//!    Env        Builder, Output
//!    EnvFlags   Invocation, ProcessRunner
//! ```

pub mod env;
pub mod process;
