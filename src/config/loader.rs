// antimuon-rs: Antimuon Build Tool
//
// SPDX-FileCopyrightText: 2026 Antimuon Developers
// SPDX-License-Identifier: GPL-3.0-or-later

//! Package manifest loading from multiple sources.
//!
//! # Loader Pipeline
//!
//! ```text
//! ConfigLoader::new()
//!   .add_toml_str(DEFAULT_MANIFEST)
//!   .add_toml_file_optional("antimuon.toml")
//!   .add_toml_file(--manifest)
//!   .set(--set key=value)
//!        |
//!        v
//!    build() --> PackageManifest (typed registry + dotted-path options)
//! ```

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use super::options::OptionSource;
use super::types::ToolsConfig;
use crate::error::{AntimuonError, ConfigError, Result};
use crate::project::CustomDep;

/// Built-in manifest loaded underneath every other source.
pub const DEFAULT_MANIFEST: &str = include_str!("default_manifest.toml");

/// File name of the package manifest looked up in the root directory.
pub const MANIFEST_FILE_NAME: &str = "antimuon.toml";

/// Builder for loading the package manifest from multiple sources.
pub struct ConfigLoader {
    builder: config::ConfigBuilder<config::builder::DefaultState>,
    files: Vec<(String, PathBuf)>,
}

impl ConfigLoader {
    #[must_use]
    pub fn new() -> Self {
        Self {
            builder: config::Config::builder(),
            files: Vec::new(),
        }
    }

    /// Starts from the built-in manifest.
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut loader = Self::new().add_toml_str(DEFAULT_MANIFEST);
        if let Some(entry) = loader.files.last_mut() {
            entry.0 = "builtin".to_string();
        }
        loader
    }

    /// Adds a TOML manifest file to the loader.
    ///
    /// The file will be read when `build()` is called. If the file doesn't exist
    /// or contains invalid TOML, `build()` will return an error.
    #[must_use]
    pub fn add_toml_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        use config::{File, FileFormat};
        let p = path.as_ref();
        self.builder = self
            .builder
            .add_source(File::from(p).format(FileFormat::Toml).required(true));
        self.files.push(("file".to_string(), p.to_path_buf()));
        self
    }

    #[must_use]
    pub fn add_toml_file_optional<P: AsRef<Path>>(mut self, path: P) -> Self {
        use config::{File, FileFormat};
        let p = path.as_ref();
        self.builder = self
            .builder
            .add_source(File::from(p).format(FileFormat::Toml).required(false));
        if p.exists() {
            self.files.push(("optional".to_string(), p.to_path_buf()));
        }
        self
    }

    #[must_use]
    pub fn add_toml_str(mut self, content: &str) -> Self {
        use config::{File, FileFormat};
        self.builder = self
            .builder
            .add_source(File::from_str(content, FileFormat::Toml));
        self.files
            .push(("string".to_string(), PathBuf::from("<string>")));
        self
    }

    /// Sets a manifest override.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is invalid or if the value cannot be converted
    /// to a configuration value.
    pub fn set<T: Into<config::Value>>(mut self, key: &str, value: T) -> Result<Self> {
        self.builder = self
            .builder
            .set_override(key, value)
            .map_err(|e| anyhow::anyhow!("Config error: {e}"))?;
        Ok(self)
    }

    /// Applies a `key=value` override as given on the command line.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if the string has no `=`.
    pub fn set_assignment(self, assignment: &str) -> Result<Self> {
        let (key, value) = assignment
            .split_once('=')
            .ok_or_else(|| ConfigError::invalid("--set", assignment, "KEY=VALUE"))?;
        self.set(key.trim(), value.trim())
    }

    /// Builds the manifest from all added sources.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Required manifest files are missing.
    /// - Manifest files have invalid TOML syntax.
    /// - The merged manifest does not describe a valid project registry.
    /// - A project does not declare its `dir`.
    pub fn build(self) -> Result<PackageManifest> {
        let raw = self.builder.build()?;
        let file: ManifestFile = raw
            .clone()
            .try_deserialize()
            .map_err(|e| ConfigError::ParseError {
                path: MANIFEST_FILE_NAME.to_string(),
                message: e.to_string(),
            })?;
        if let Some(name) = file
            .projects
            .iter()
            .find_map(|(name, entry)| entry.dir.trim().is_empty().then_some(name))
        {
            return Err(AntimuonError::from(ConfigError::MissingKey {
                key: format!("projects.{name}.dir"),
            })
            .into());
        }
        Ok(PackageManifest {
            raw,
            file,
            sources: self.files,
        })
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Typed view of the sections the registry needs.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct ManifestFile {
    projects: BTreeMap<String, ProjectEntry>,
    tools: ToolsConfig,
}

/// One `[projects.<name>]` table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProjectEntry {
    /// Directory relative to the root. Required; checked after merging.
    #[serde(default)]
    pub dir: String,
    #[serde(default)]
    pub custom_deps: Vec<CustomDep>,
    /// `false` for projects tracked by local checkout rather than by ref.
    #[serde(default = "default_pinned")]
    pub pinned: bool,
}

const fn default_pinned() -> bool {
    true
}

/// The merged package manifest.
///
/// Besides the typed registry and tool sections, every scalar in the
/// manifest is readable as a package-scoped option by its dotted path.
#[derive(Debug, Clone)]
pub struct PackageManifest {
    raw: config::Config,
    file: ManifestFile,
    sources: Vec<(String, PathBuf)>,
}

impl PackageManifest {
    /// Loads the built-in manifest only.
    ///
    /// # Errors
    ///
    /// Returns an error if the built-in manifest fails to parse.
    pub fn builtin() -> Result<Self> {
        ConfigLoader::with_defaults().build()
    }

    /// Loads a manifest from TOML on top of nothing (no built-in defaults).
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML or misses a
    /// project's `dir`.
    pub fn parse(content: &str) -> Result<Self> {
        ConfigLoader::new().add_toml_str(content).build()
    }

    /// Declared projects, keyed by name.
    #[must_use]
    pub const fn projects(&self) -> &BTreeMap<String, ProjectEntry> {
        &self.file.projects
    }

    #[must_use]
    pub const fn tools(&self) -> &ToolsConfig {
        &self.file.tools
    }

    #[must_use]
    pub fn sources(&self) -> &[(String, PathBuf)] {
        &self.sources
    }

    /// Lists the loaded sources, one per line, in load order.
    #[must_use]
    pub fn format_sources(&self) -> Vec<String> {
        self.sources
            .iter()
            .enumerate()
            .map(|(i, (source, path))| format!("{}. [{}] {}", i + 1, source, path.display()))
            .collect()
    }
}

impl OptionSource for PackageManifest {
    fn get(&self, path: &str) -> Option<String> {
        self.raw
            .get_string(path)
            .ok()
            .filter(|value| !value.is_empty())
    }
}
