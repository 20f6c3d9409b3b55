// antimuon-rs: Antimuon Build Tool
//
// SPDX-FileCopyrightText: 2026 Antimuon Developers
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module for antimuon-rs using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! antimuon [global options] <command>
//! sync [--init] [--all] [--submodule-sync] [--run-sync] [--run-hooks] [config]
//! build [TARGET] [config]
//! args [--json] [config]
//! options [config]
//! projects [config]
//! version
//! ```
//!
//! `[config]` is the shared set of configuration overrides in [`config`].

pub mod build;
pub mod config;
pub mod global;
pub mod sync;


use crate::cli::build::{BuildArgs, PrintArgs};
use crate::cli::config::ConfigArgs;
use crate::cli::global::GlobalOptions;
use crate::cli::sync::SyncArgs;
use clap::{Parser, Subcommand};

/// Antimuon Build Tool
///
/// Synchronizes the browser source tree and drives its build.
#[derive(Debug, Parser)]
#[command(
    name = "antimuon",
    author,
    version,
    about = "Antimuon Build Tool",
    long_about = "antimuon-rs Copyright (C) 2026 Antimuon Developers\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  Synchronizes the upstream and product checkouts and drives\n\
                  the gn/ninja build.\n\n\
                  Run `antimuon sync --init` once after cloning, then\n\
                  `antimuon build`. See `antimuon <command> --help` for more\n\
                  information about a command.",
    after_help = "MANIFEST:\n\n\
                  The project registry and tool names come from a built-in\n\
                  manifest, overlaid by `antimuon.toml` in the root directory\n\
                  if present, then by every --manifest in order, then by --set.\n\
                  Any option can also be given as an ANTIMUON_<PATH> environment\n\
                  variable, e.g. ANTIMUON_PROJECTS_CHROME_TAG; environment\n\
                  variables win over the manifest and lose to command-line flags."
)]
pub struct Cli {
    /// Global options shared by all commands
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Command to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Shows the version.
    #[command(visible_alias = "-v")]
    Version,

    /// Synchronizes dependencies and pins projects to their refs.
    Sync(SyncArgs),

    /// Generates the build directory and builds a target.
    Build(BuildArgs),

    /// Prints the gn build arguments for the configuration.
    Args(PrintArgs),

    /// Lists all resolved options and their values.
    Options(ConfigArgs),

    /// Lists the registered projects and their refs.
    Projects(ConfigArgs),
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}

/// Parses command-line arguments from an iterator.
pub fn parse_from<I, T>(iter: I) -> Cli
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::parse_from(iter)
}

/// Tries to parse command-line arguments, returning an error on failure.
///
/// # Errors
///
/// Returns a `clap::Error` if the arguments are invalid or if help/version information
/// was requested.
pub fn try_parse() -> Result<Cli, clap::Error> {
    Cli::try_parse()
}
