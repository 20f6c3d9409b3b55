// antimuon-rs: Antimuon Build Tool
//
// SPDX-FileCopyrightText: 2026 Antimuon Developers
// SPDX-License-Identifier: GPL-3.0-or-later

//! Build arguments for `gn`.
//!
//! ```text
//! Config --> baseline --> target_os --> debug --> cc_wrapper
//!        --> android --> android_debug | android_release --> BuildArgs
//! ```
//!
//! Each layer is a pure function of the snapshot and the arguments produced
//! so far; later layers overwrite keys set by earlier ones.

pub mod layers;


use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

use crate::config::Config;

/// A single `gn` argument value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ArgValue {
    Bool(bool),
    Int(i64),
    Str(String),
    List(Vec<String>),
}

impl From<bool> for ArgValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for ArgValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<&str> for ArgValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for ArgValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<Vec<String>> for ArgValue {
    fn from(value: Vec<String>) -> Self {
        Self::List(value)
    }
}

fn write_gn_string(f: &mut fmt::Formatter<'_>, value: &str) -> fmt::Result {
    f.write_str("\"")?;
    for c in value.chars() {
        if matches!(c, '"' | '\\' | '$') {
            f.write_str("\\")?;
        }
        write!(f, "{c}")?;
    }
    f.write_str("\"")
}

impl fmt::Display for ArgValue {
    /// Formats the value in `gn` syntax.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Str(s) => write_gn_string(f, s),
            Self::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write_gn_string(f, item)?;
                }
                f.write_str("]")
            }
        }
    }
}

/// Ordered `gn` argument set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct BuildArgs {
    args: BTreeMap<String, ArgValue>,
}

impl BuildArgs {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `key`, replacing any earlier value.
    #[must_use]
    pub fn with(mut self, key: &str, value: impl Into<ArgValue>) -> Self {
        self.args.insert(key.to_string(), value.into());
        self
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ArgValue> {
        self.args.get(key)
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.args.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.args.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ArgValue)> {
        self.args.iter().map(|(k, v)| (k.as_str(), v))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.args.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    /// Space-separated `key=value` pairs for `gn gen --args=`.
    #[must_use]
    pub fn to_cli_arg(&self) -> String {
        self.iter()
            .map(|(key, value)| format!("{key}={value}"))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Contents of an `args.gn` file.
    #[must_use]
    pub fn to_args_gn(&self) -> String {
        self.to_string()
    }

    /// Pretty JSON object.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for BuildArgs {
    /// One `key = value` line per argument.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (key, value) in self.iter() {
            writeln!(f, "{key} = {value}")?;
        }
        Ok(())
    }
}

/// Runs every layer over `config`.
#[must_use]
pub fn generate(config: &Config) -> BuildArgs {
    layers::LAYERS
        .iter()
        .fold(BuildArgs::new(), |args, layer| (layer.apply)(config, args))
}
