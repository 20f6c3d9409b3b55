// antimuon-rs: Antimuon Build Tool
//
// SPDX-FileCopyrightText: 2026 Antimuon Developers
// SPDX-License-Identifier: GPL-3.0-or-later

//! Sync command arguments.
//!
//! # Flag Effects
//!
//! ```text
//! --init          every step, every project pinned
//! --all           pin every versioned project
//! --ref P=R       pin only P (repeatable)
//! --android       install mobile build dependencies
//! --submodule-sync / --run-sync / --run-hooks   force one step
//! ```

use clap::{ArgAction, Args};

use crate::cli::config::ConfigArgs;
use crate::sync::{SyncFlags, SyncOptions};

/// Arguments for the `sync` command.
#[derive(Debug, Clone, Default, Args)]
pub struct SyncArgs {
    /// Initializes all dependencies from scratch.
    #[arg(long, action = ArgAction::SetTrue)]
    pub init: bool,

    /// Pins every versioned project to its ref.
    #[arg(long, action = ArgAction::SetTrue)]
    pub all: bool,

    /// Syncs git submodules.
    #[arg(long = "submodule-sync", action = ArgAction::SetTrue)]
    pub submodule_sync: bool,

    /// Runs the dependency sync even if no project was pinned.
    #[arg(long = "run-sync", action = ArgAction::SetTrue)]
    pub run_sync: bool,

    /// Runs the hooks even if no project was pinned.
    #[arg(long = "run-hooks", action = ArgAction::SetTrue)]
    pub run_hooks: bool,

    /// Configuration overrides.
    #[command(flatten)]
    pub config: ConfigArgs,
}

impl SyncArgs {
    /// Converts the flags to pipeline gates.
    #[must_use]
    pub fn to_flags(&self) -> SyncFlags {
        let options = [
            (self.init, SyncOptions::INIT),
            (self.all, SyncOptions::ALL),
            (self.config.android, SyncOptions::ANDROID),
            (self.submodule_sync, SyncOptions::SUBMODULE_SYNC),
            (self.run_sync, SyncOptions::RUN_SYNC),
            (self.run_hooks, SyncOptions::RUN_HOOKS),
        ]
        .into_iter()
        .filter(|(set, _)| *set)
        .fold(SyncOptions::empty(), |acc, (_, flag)| acc | flag);

        self.config
            .refs
            .iter()
            .fold(SyncFlags::new(options), |flags, (project, _)| {
                flags.with_project_ref(project.as_str())
            })
    }
}
