// antimuon-rs: Antimuon Build Tool
//
// SPDX-FileCopyrightText: 2026 Antimuon Developers
// SPDX-License-Identifier: GPL-3.0-or-later

//! Build and argument inspection command arguments.

use clap::Args;

use crate::cli::config::ConfigArgs;

/// Arguments for the `build` command.
#[derive(Debug, Clone, Default, Args)]
pub struct BuildArgs {
    /// Ninja target to build. Defaults to the configured target
    /// (`antimuon`, or the APK target for the mobile variant).
    #[arg(value_name = "TARGET")]
    pub target: Option<String>,

    /// Only writes `args.gn` and runs `gn gen`.
    #[arg(long = "gen-only")]
    pub gen_only: bool,

    /// Configuration overrides.
    #[command(flatten)]
    pub config: ConfigArgs,
}

/// Arguments for the `args` command.
#[derive(Debug, Clone, Default, Args)]
pub struct PrintArgs {
    /// Prints the arguments as a JSON object instead of `args.gn` syntax.
    #[arg(long)]
    pub json: bool,

    /// Configuration overrides.
    #[command(flatten)]
    pub config: ConfigArgs,
}
