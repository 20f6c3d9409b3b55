// antimuon-rs: Antimuon Build Tool
//
// SPDX-FileCopyrightText: 2026 Antimuon Developers
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration overrides shared by every command that resolves a
//! configuration.
//!
//! ```text
//! -C out/Debug            --> build type from the base name
//! --target-arch / --target-os / --android
//! --debug-build / --official-build BOOL
//! --ref chrome=68.0.3440.75  (repeatable, "default" keeps the ref)
//! ```
//!
//! Values are passed through as strings; coercion errors are reported by
//! configuration resolution with the offending key.

use clap::Args;
use std::path::PathBuf;

use crate::config::update::UpdateOptions;

/// Explicit configuration overrides.
#[derive(Debug, Clone, Default, Args)]
pub struct ConfigArgs {
    /// Output directory, relative to 'src' unless absolute. Its base name
    /// must be Release, Debug, Component or Static and selects the build
    /// type; any other name is rejected.
    #[arg(short = 'C', value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Target architecture (x64, x86/ia32, arm, arm64).
    #[arg(long = "target-arch", value_name = "ARCH")]
    pub target_arch: Option<String>,

    /// Target operating system (linux, android).
    #[arg(long = "target-os", value_name = "OS")]
    pub target_os: Option<String>,

    /// Path of the dependency-sync client configuration.
    #[arg(long = "gclient-file", value_name = "FILE")]
    pub gclient_file: Option<String>,

    /// Forces an official build on or off. `true` also turns debug off.
    #[arg(long = "official-build", value_name = "BOOL")]
    pub official_build: Option<String>,

    /// Forces a debug build on or off.
    #[arg(long = "debug-build", value_name = "BOOL")]
    pub debug_build: Option<String>,

    /// Google API key baked into the build.
    #[arg(long = "google-api-key", value_name = "KEY")]
    pub google_api_key: Option<String>,

    /// Google API endpoint baked into the build.
    #[arg(long = "google-api-endpoint", value_name = "URL")]
    pub google_api_endpoint: Option<String>,

    /// Builds the mobile variant.
    #[arg(long)]
    pub android: bool,

    /// Checks out a project at the given ref, e.g. 'chrome=68.0.3440.75'.
    /// Can be specified multiple times.
    #[arg(long = "ref", value_name = "PROJECT=REF", value_parser = parse_project_ref, action = clap::ArgAction::Append)]
    pub refs: Vec<(String, String)>,
}

impl ConfigArgs {
    /// Converts the flags to configuration overrides.
    #[must_use]
    pub fn to_update_options(&self) -> UpdateOptions {
        UpdateOptions {
            output_dir: self.output_dir.clone(),
            target_arch: self.target_arch.clone(),
            target_os: self.target_os.clone(),
            gclient_file: self.gclient_file.clone(),
            google_api_key: self.google_api_key.clone(),
            google_api_endpoint: self.google_api_endpoint.clone(),
            debug_build: self.debug_build.clone(),
            official_build: self.official_build.clone(),
            android: self.android,
            project_refs: self.refs.iter().cloned().collect(),
        }
    }
}

/// Both sides must be non-empty; an empty ref would count as supplied and
/// re-pin the project.
fn parse_project_ref(value: &str) -> Result<(String, String), String> {
    match value.split_once('=') {
        Some((project, reference)) if !project.trim().is_empty() && !reference.trim().is_empty() => {
            Ok((project.trim().to_string(), reference.trim().to_string()))
        }
        _ => Err(format!("expected PROJECT=REF, got '{value}'")),
    }
}
