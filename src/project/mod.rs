// antimuon-rs: Antimuon Build Tool
//
// SPDX-FileCopyrightText: 2026 Antimuon Developers
// SPDX-License-Identifier: GPL-3.0-or-later

//! Project registry.
//!
//! ```text
//! manifest [projects.<name>]  +  OptionSource overrides
//!        |
//!        v
//! ProjectRegistry (ordered by directory, then name)
//!   Project { name, ref, url, directory, gclient_name, custom_deps, pinned }
//!
//! chrome    upstream browser, dir "src"  (the source root)
//! antimuon  product, dir "src/antimuon"
//! ```

pub mod refs;

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::config::loader::ProjectEntry;
use crate::config::options::OptionSource;
use crate::error::ConfigError;

/// Name of the upstream browser project; its directory is the source root.
pub const UPSTREAM: &str = "chrome";

/// Name of the top-level product project.
pub const PRODUCT: &str = "antimuon";

/// Extra dependency declared for a `gclient` solution.
///
/// A dependency without a URL is excluded from the checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomDep {
    pub path: String,
    #[serde(default)]
    pub url: Option<String>,
}

/// One tracked sub-project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Project {
    name: String,
    #[serde(rename = "ref")]
    reference: String,
    url: Option<String>,
    gclient_name: String,
    directory: PathBuf,
    custom_deps: Vec<CustomDep>,
    pinned: bool,
}

impl Project {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Resolved reference; empty for unpinned projects.
    #[must_use]
    pub fn reference(&self) -> &str {
        &self.reference
    }

    #[must_use]
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    /// Directory relative to the root, also the `gclient` solution name.
    #[must_use]
    pub fn gclient_name(&self) -> &str {
        &self.gclient_name
    }

    /// Absolute working-copy directory.
    #[must_use]
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    #[must_use]
    pub fn custom_deps(&self) -> &[CustomDep] {
        &self.custom_deps
    }

    /// `false` for projects tracked by local checkout; these have no ref.
    #[must_use]
    pub const fn is_pinned(&self) -> bool {
        self.pinned
    }
}

/// All tracked projects.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProjectRegistry {
    projects: Vec<Project>,
}

impl ProjectRegistry {
    /// Builds the registry from manifest declarations.
    ///
    /// `dir` and `repository.url` may be overridden through `options`; refs of
    /// pinned projects are resolved with [`refs::resolve_ref`].
    #[must_use]
    pub fn from_declarations<O: OptionSource + ?Sized>(
        root: &Path,
        declarations: &BTreeMap<String, ProjectEntry>,
        options: &O,
    ) -> Self {
        let mut projects: Vec<Project> = declarations
            .iter()
            .map(|(name, entry)| {
                let dir = options
                    .get(&format!("projects.{name}.dir"))
                    .unwrap_or_else(|| entry.dir.clone());
                let reference = if entry.pinned {
                    refs::resolve_ref(name, options)
                } else {
                    String::new()
                };
                Project {
                    name: name.clone(),
                    reference,
                    url: options.get(&format!("projects.{name}.repository.url")),
                    directory: root.join(&dir),
                    gclient_name: dir,
                    custom_deps: entry.custom_deps.clone(),
                    pinned: entry.pinned,
                }
            })
            .collect();

        projects.sort_by(|a, b| {
            a.directory
                .cmp(&b.directory)
                .then_with(|| a.name.cmp(&b.name))
        });
        Self { projects }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.name == name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Looks up a project that must exist.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingRegistryEntry` for an unknown name.
    pub fn require(&self, name: &str) -> Result<&Project, ConfigError> {
        self.get(name)
            .ok_or_else(|| ConfigError::MissingRegistryEntry {
                project: name.to_string(),
            })
    }

    pub fn iter(&self) -> impl Iterator<Item = &Project> {
        self.projects.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.projects.iter().map(Project::name)
    }

    /// Pinned projects, in registry order. Each has a non-empty ref.
    pub fn versioned(&self) -> impl Iterator<Item = &Project> {
        self.projects.iter().filter(|p| p.is_pinned())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.projects.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    /// Replaces the ref of a versioned project.
    ///
    /// Unversioned projects keep their empty ref. Returns whether the ref
    /// changed.
    pub(crate) fn override_ref(&mut self, name: &str, reference: &str) -> bool {
        match self.projects.iter_mut().find(|p| p.name == name) {
            Some(project) if !project.reference.is_empty() => {
                project.reference = reference.to_string();
                true
            }
            _ => false,
        }
    }
}

impl<'a> IntoIterator for &'a ProjectRegistry {
    type Item = &'a Project;
    type IntoIter = std::slice::Iter<'a, Project>;

    fn into_iter(self) -> Self::IntoIter {
        self.projects.iter()
    }
}
