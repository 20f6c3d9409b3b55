// antimuon-rs: Antimuon Build Tool
//
// SPDX-FileCopyrightText: 2026 Antimuon Developers
// SPDX-License-Identifier: GPL-3.0-or-later

//! Library root.
//!
//! # Crate Architecture
//!
//! ```text
//!                        main.rs
//!                           |
//!                +----------+----------+
//!                v                     v
//!             cli (clap)          cmd (handlers)
//!                |          sync / build / config
//!                +----------+----------+
//!                           v
//!              ,---------------------------,
//!              |          config           |
//!              |  manifest, env, CLI flags |
//!              |   --> immutable Config    |
//!              '--+-----------+--------+---'
//!                 |           |        |
//!                 v           v        v
//!             project        gn       sync
//!            registry,     layered   gated step
//!              refs         args     pipeline
//!
//!   +-----------------------------------------+
//!   |  core   process runner, env             |
//!   +-----------------------------------------+
//!   |  foundation   error, logging            |
//!   +-----------------------------------------+
//! ```

pub mod cli;
pub mod cmd;
pub mod config;
pub mod core;
pub mod error;
pub mod gn;
pub mod logging;
pub mod project;
pub mod sync;
