// antimuon-rs: Antimuon Build Tool
//
// SPDX-FileCopyrightText: 2026 Antimuon Developers
// SPDX-License-Identifier: GPL-3.0-or-later

//! The synchronization pipeline as data.
//!
//! ```text
//! #  step               gate
//! 1  submodule_sync     init | submodule_sync
//! 2  install_prereqs    init
//! 3  gclient_config     init
//! 4  android_deps       android
//! 5  dependency_sync    init
//! 6  pin_projects       per project: init | all | <project>_ref
//! 7  dependency_resync  updated | init | run_sync
//! 8  run_hooks          updated | init | run_hooks
//! ```

use super::{SyncFlags, SyncOptions};

/// When a step runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    /// Any of the options is set.
    Any(SyncOptions),
    /// A project was pinned in this run, or any of the options is set.
    UpdatedOrAny(SyncOptions),
    /// Always; the step gates its own work.
    Always,
}

impl Gate {
    #[must_use]
    pub fn allows(self, flags: &SyncFlags, updated_version: bool) -> bool {
        match self {
            Self::Any(options) => flags.options.intersects(options),
            Self::UpdatedOrAny(options) => updated_version || flags.options.intersects(options),
            Self::Always => true,
        }
    }
}

/// What a step does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    SubmoduleSync,
    InstallPrereqs,
    WriteGclientConfig,
    InstallAndroidDeps,
    DependencySync,
    PinProjects,
    RunHooks,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub name: &'static str,
    pub gate: Gate,
    pub action: Action,
}

pub const PIPELINE: &[Step] = &[
    Step {
        name: "submodule_sync",
        gate: Gate::Any(SyncOptions::INIT.union(SyncOptions::SUBMODULE_SYNC)),
        action: Action::SubmoduleSync,
    },
    Step {
        name: "install_prereqs",
        gate: Gate::Any(SyncOptions::INIT),
        action: Action::InstallPrereqs,
    },
    Step {
        name: "gclient_config",
        gate: Gate::Any(SyncOptions::INIT),
        action: Action::WriteGclientConfig,
    },
    Step {
        name: "android_deps",
        gate: Gate::Any(SyncOptions::ANDROID),
        action: Action::InstallAndroidDeps,
    },
    Step {
        name: "dependency_sync",
        gate: Gate::Any(SyncOptions::INIT),
        action: Action::DependencySync,
    },
    Step {
        name: "pin_projects",
        gate: Gate::Always,
        action: Action::PinProjects,
    },
    Step {
        name: "dependency_resync",
        gate: Gate::UpdatedOrAny(SyncOptions::INIT.union(SyncOptions::RUN_SYNC)),
        action: Action::DependencySync,
    },
    Step {
        name: "run_hooks",
        gate: Gate::UpdatedOrAny(SyncOptions::INIT.union(SyncOptions::RUN_HOOKS)),
        action: Action::RunHooks,
    },
];
