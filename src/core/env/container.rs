// antimuon-rs: Antimuon Build Tool
//
// SPDX-FileCopyrightText: 2026 Antimuon Developers
// SPDX-License-Identifier: GPL-3.0-or-later

//! Environment variable set with copy-on-write sharing.
//!
//! ```text
//! Env
//! vars: Arc<BTreeMap<EnvKey, String>>
//! clone shares the map until the first mutation (Arc::make_mut)
//! ```

use super::types::{EnvFlags, EnvKey};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

/// Separator for `PATH`-like variables on the host.
pub const PATH_SEPARATOR: &str = if cfg!(windows) { ";" } else { ":" };

/// A set of environment variables.
///
/// Clones are cheap; the underlying map is copied on the first write.
#[derive(Debug, Clone, Default)]
pub struct Env {
    vars: Arc<BTreeMap<EnvKey, String>>,
}

impl Env {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an environment from a map of variables.
    #[must_use]
    pub fn from_map(vars: BTreeMap<String, String>) -> Self {
        Self {
            vars: Arc::new(
                vars.into_iter()
                    .map(|(k, v)| (EnvKey::new(k), v))
                    .collect(),
            ),
        }
    }

    /// Sets an environment variable, replacing any existing value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.set_with_flags(key, value, EnvFlags::Replace)
    }

    /// Sets an environment variable only if it is not already present.
    pub fn set_default(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.set_with_flags(key, value, EnvFlags::Default)
    }

    /// Sets an environment variable with specific flags.
    pub fn set_with_flags(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
        flags: EnvFlags,
    ) -> &mut Self {
        let key = EnvKey::new(key.into());
        let value = value.into();
        let vars = Arc::make_mut(&mut self.vars);

        match (flags, vars.get_mut(&key)) {
            (EnvFlags::Append, Some(existing)) => existing.push_str(&value),
            (EnvFlags::Prepend, Some(existing)) => existing.insert_str(0, &value),
            (EnvFlags::Default, Some(_)) => {}
            _ => {
                vars.insert(key, value);
            }
        }

        self
    }

    /// Gets an environment variable value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(&EnvKey::new(key)).map(String::as_str)
    }

    /// Removes an environment variable.
    pub fn remove(&mut self, key: &str) -> &mut Self {
        Arc::make_mut(&mut self.vars).remove(&EnvKey::new(key));
        self
    }

    /// Prepends a directory to `PATH`.
    pub fn prepend_path(&mut self, path: impl AsRef<Path>) -> &mut Self {
        self.modify_path(path.as_ref(), EnvFlags::Prepend)
    }

    /// Appends a directory to `PATH`.
    pub fn append_path(&mut self, path: impl AsRef<Path>) -> &mut Self {
        self.modify_path(path.as_ref(), EnvFlags::Append)
    }

    fn modify_path(&mut self, path: &Path, flags: EnvFlags) -> &mut Self {
        let path = path.to_string_lossy();
        let joined = match (self.get("PATH"), flags) {
            (Some(current), EnvFlags::Prepend) => format!("{path}{PATH_SEPARATOR}{current}"),
            (Some(current), EnvFlags::Append) => format!("{current}{PATH_SEPARATOR}{path}"),
            _ => path.into_owned(),
        };
        self.set("PATH", joined)
    }

    /// Returns an iterator over environment variables in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.vars.len()
    }
}

impl PartialEq for Env {
    fn eq(&self, other: &Self) -> bool {
        self.iter().eq(other.iter())
    }
}

impl Eq for Env {}
