// antimuon-rs: Antimuon Build Tool
//
// SPDX-FileCopyrightText: 2026 Antimuon Developers
// SPDX-License-Identifier: GPL-3.0-or-later

//! Override values looked up by dotted path.
//!
//! ```text
//! get("projects.chrome.tag")
//!   EnvOptions      ANTIMUON_PROJECTS_CHROME_TAG
//!   PackageManifest [projects.chrome] tag = ...   (see loader)
//!   StaticOptions   in-memory map
//!   LayeredOptions  first source with a value wins
//! ```
//!
//! Empty values count as absent in every source.

use std::collections::BTreeMap;
use std::fmt;

use crate::core::env::container::Env;
use crate::core::env::current_env;

/// Prefix of the generic environment convention.
pub const ENV_PREFIX: &str = "ANTIMUON";

/// A read-only source of override values.
pub trait OptionSource: Send + Sync {
    /// Returns the non-empty value stored under `path`, if any.
    fn get(&self, path: &str) -> Option<String>;

    /// Reads `<segments joined by '.'>`.
    fn get_path(&self, segments: &[&str]) -> Option<String> {
        self.get(&segments.join("."))
    }
}

impl<T: OptionSource + ?Sized> OptionSource for &T {
    fn get(&self, path: &str) -> Option<String> {
        (**self).get(path)
    }
}

impl<T: OptionSource + ?Sized> OptionSource for Box<T> {
    fn get(&self, path: &str) -> Option<String> {
        (**self).get(path)
    }
}

fn non_empty(value: impl Into<String>) -> Option<String> {
    let value = value.into();
    (!value.is_empty()).then_some(value)
}

/// Options from environment variables named `ANTIMUON_<PATH>`.
///
/// `projects.chrome.repository.ref` maps to
/// `ANTIMUON_PROJECTS_CHROME_REPOSITORY_REF`.
#[derive(Debug, Clone)]
pub struct EnvOptions {
    env: Env,
}

impl EnvOptions {
    /// Reads the current process environment.
    #[must_use]
    pub fn from_process() -> Self {
        Self::new(current_env())
    }

    #[must_use]
    pub const fn new(env: Env) -> Self {
        Self { env }
    }

    /// Environment variable name for an option path.
    #[must_use]
    pub fn var_name(path: &str) -> String {
        let mut name = String::with_capacity(ENV_PREFIX.len() + 1 + path.len());
        name.push_str(ENV_PREFIX);
        name.push('_');
        name.extend(path.chars().map(|c| match c {
            '.' | '-' => '_',
            c => c.to_ascii_uppercase(),
        }));
        name
    }
}

impl OptionSource for EnvOptions {
    fn get(&self, path: &str) -> Option<String> {
        self.env.get(&Self::var_name(path)).and_then(non_empty)
    }
}

/// In-memory options, mostly useful for tests and `--set` style overrides.
#[derive(Debug, Clone, Default)]
pub struct StaticOptions {
    values: BTreeMap<String, String>,
}

impl StaticOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, path: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(path.into(), value.into());
        self
    }
}

impl<K, V> FromIterator<(K, V)> for StaticOptions
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl OptionSource for StaticOptions {
    fn get(&self, path: &str) -> Option<String> {
        self.values.get(path).cloned().and_then(non_empty)
    }
}

/// Sources in precedence order: the first one holding a value wins.
#[derive(Default)]
pub struct LayeredOptions {
    layers: Vec<Box<dyn OptionSource>>,
}

impl LayeredOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a source below every source added so far.
    #[must_use]
    pub fn then(mut self, source: impl OptionSource + 'static) -> Self {
        self.layers.push(Box::new(source));
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

impl fmt::Debug for LayeredOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayeredOptions")
            .field("layers", &self.layers.len())
            .finish()
    }
}

impl OptionSource for LayeredOptions {
    fn get(&self, path: &str) -> Option<String> {
        self.layers.iter().find_map(|layer| layer.get(path))
    }
}
