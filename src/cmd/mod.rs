// antimuon-rs: Antimuon Build Tool
//
// SPDX-FileCopyrightText: 2026 Antimuon Developers
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command implementations.
//!
//! ```text
//! GlobalOptions --> root dir --> ConfigLoader --> PackageManifest
//!                                                      |
//! ConfigArgs --> UpdateOptions      env > manifest     v
//!                       \______ Config::resolve() ____/
//!                                      |
//!                       cmd::run_* handlers (sync, build, config)
//! ```

pub mod build;
pub mod config;
pub mod sync;

use anyhow::Context as _;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::cli::config::ConfigArgs;
use crate::cli::global::GlobalOptions;
use crate::config::loader::{ConfigLoader, MANIFEST_FILE_NAME, PackageManifest};
use crate::config::options::{EnvOptions, LayeredOptions};
use crate::config::{Config, Defaults};
use crate::core::process::exec::{DryRunner, ProcessRunner, SystemRunner};
use crate::error::Result;

/// Absolute checkout root: `--root`, else the current directory.
///
/// Tools run with `src` as their working directory, so a relative root is
/// anchored here.
///
/// # Errors
///
/// Returns an error if the current directory cannot be determined.
pub fn root_dir(global: &GlobalOptions) -> Result<PathBuf> {
    match &global.root {
        Some(root) => std::path::absolute(root)
            .with_context(|| format!("failed to resolve root '{}'", root.display())),
        None => std::env::current_dir().context("failed to determine the current directory"),
    }
}

/// Loads the package manifest: built-in, `<root>/antimuon.toml`, each
/// `--manifest`, then each `--set`.
///
/// # Errors
///
/// Returns an error if a `--manifest` file is missing, a source is not
/// valid TOML, a `--set` has no `=`, or the result is not a valid registry.
pub fn load_manifest(global: &GlobalOptions, root: &Path) -> Result<PackageManifest> {
    let mut loader =
        ConfigLoader::with_defaults().add_toml_file_optional(root.join(MANIFEST_FILE_NAME));
    for path in &global.manifests {
        loader = loader.add_toml_file(path);
    }
    for assignment in &global.options {
        loader = loader.set_assignment(assignment)?;
    }

    let manifest = loader.build().context("failed to load the package manifest")?;
    debug!(sources = ?manifest.format_sources(), "manifest loaded");
    Ok(manifest)
}

/// Resolves the configuration snapshot with `env` layered over `manifest`.
///
/// # Errors
///
/// Returns an error if an option or override cannot be coerced or names an
/// unknown project.
pub fn resolve_config(
    root: PathBuf,
    manifest: PackageManifest,
    env: EnvOptions,
    args: &ConfigArgs,
) -> Result<Config> {
    let defaults = Defaults::from_manifest(root, &manifest);
    let options = LayeredOptions::new().then(env).then(manifest);
    Config::resolve(defaults, &options, &args.to_update_options())
        .context("failed to resolve configuration")
}

/// Loads the manifest and resolves the configuration for the current
/// process.
///
/// # Errors
///
/// See [`load_manifest`] and [`resolve_config`].
pub fn load_config(global: &GlobalOptions, args: &ConfigArgs) -> Result<Config> {
    let root = root_dir(global)?;
    let manifest = load_manifest(global, &root)?;
    resolve_config(root, manifest, EnvOptions::from_process(), args)
}

/// Runner for external commands; `dry` only logs them.
#[must_use]
pub fn runner(dry: bool) -> Box<dyn ProcessRunner> {
    if dry {
        Box::new(DryRunner)
    } else {
        Box::new(SystemRunner)
    }
}
