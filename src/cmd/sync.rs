// antimuon-rs: Antimuon Build Tool
//
// SPDX-FileCopyrightText: 2026 Antimuon Developers
// SPDX-License-Identifier: GPL-3.0-or-later

//! Sync command implementation for antimuon-rs.

use tracing::info;

use crate::cli::sync::SyncArgs;
use crate::config::Config;
use crate::core::env::current_env;
use crate::error::Result;
use crate::sync::Orchestrator;

/// Main handler for the sync command.
///
/// # Errors
///
/// Returns the first failing step; steps that completed are not undone.
pub async fn run_sync_command(args: &SyncArgs, config: &Config, dry_run: bool) -> Result<()> {
    let runner = super::runner(dry_run);
    let flags = args.to_flags();

    let report = Orchestrator::new(config, runner.as_ref(), &current_env())
        .dry_run(dry_run)
        .run(&flags)
        .await?;

    if report.pinned.is_empty() {
        info!("no project pinned; pass --init, --all or --ref to update checkouts");
    } else {
        for name in &report.pinned {
            if let Some(project) = config.projects().get(name) {
                println!("{name} -> {}", project.reference());
            }
        }
    }
    Ok(())
}
