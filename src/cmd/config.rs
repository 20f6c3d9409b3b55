// antimuon-rs: Antimuon Build Tool
//
// SPDX-FileCopyrightText: 2026 Antimuon Developers
// SPDX-License-Identifier: GPL-3.0-or-later

//! Config-related commands for antimuon-rs.

use crate::config::Config;

/// Display current configuration options, preceded by the manifest sources.
pub fn run_options_command(config: &Config, manifest_sources: &[String]) {
    for line in manifest_sources {
        println!("# {line}");
    }
    for line in config.format_options() {
        println!("{line}");
    }
}

/// Display the project registry.
pub fn run_projects_command(config: &Config) {
    for line in format_projects(config) {
        println!("{line}");
    }
}

/// One aligned `name  ref  directory` line per project, in registry order.
/// Unpinned projects show `-` as their ref.
#[must_use]
pub fn format_projects(config: &Config) -> Vec<String> {
    let rows: Vec<(&str, &str, String)> = config
        .projects()
        .iter()
        .map(|project| {
            let reference = if project.reference().is_empty() {
                "-"
            } else {
                project.reference()
            };
            (project.name(), reference, project.gclient_name().to_string())
        })
        .collect();

    let name_len = rows.iter().map(|row| row.0.len()).max().unwrap_or(0);
    let ref_len = rows.iter().map(|row| row.1.len()).max().unwrap_or(0);
    rows.into_iter()
        .map(|(name, reference, dir)| format!("{name:<name_len$}  {reference:<ref_len$}  {dir}"))
        .collect()
}
