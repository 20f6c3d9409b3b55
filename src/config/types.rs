// antimuon-rs: Antimuon Build Tool
//
// SPDX-FileCopyrightText: 2026 Antimuon Developers
// SPDX-License-Identifier: GPL-3.0-or-later

//! Scalar configuration types.
//!
//! ```text
//! BuildType:  Release (default) | Debug | Component | Static
//! TargetArch: x64 (default) | x86 (internal ia32) | arm | arm64
//! TargetOs:   linux | android
//! HostOs:     linux | macos | windows
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// Build configuration, named after the output directory it builds into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BuildType {
    #[default]
    Release,
    Debug,
    Component,
    Static,
}

impl BuildType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Release => "Release",
            Self::Debug => "Debug",
            Self::Component => "Component",
            Self::Static => "Static",
        }
    }

    #[must_use]
    pub const fn is_release(self) -> bool {
        matches!(self, Self::Release)
    }
}

impl fmt::Display for BuildType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BuildType {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "release" => Ok(Self::Release),
            "debug" => Ok(Self::Debug),
            "component" => Ok(Self::Component),
            "static" => Ok(Self::Static),
            _ => Err(ConfigError::invalid(
                "build_type",
                s,
                "one of Release, Debug, Component, Static",
            )),
        }
    }
}

/// Target CPU architecture.
///
/// The external name goes to `gn` as `target_cpu`; the internal name is the
/// one exported to helper scripts as `TARGET_ARCH`. They only differ for
/// 32-bit x86 (`x86` vs `ia32`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetArch {
    #[default]
    X64,
    X86,
    Arm,
    Arm64,
}

impl TargetArch {
    /// Name used for `target_cpu`.
    #[must_use]
    pub const fn external(self) -> &'static str {
        match self {
            Self::X64 => "x64",
            Self::X86 => "x86",
            Self::Arm => "arm",
            Self::Arm64 => "arm64",
        }
    }

    /// Name used by the build tooling scripts.
    #[must_use]
    pub const fn internal(self) -> &'static str {
        match self {
            Self::X86 => "ia32",
            other => other.external(),
        }
    }
}

impl fmt::Display for TargetArch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.external())
    }
}

impl FromStr for TargetArch {
    type Err = ConfigError;

    /// Accepts both the external and the internal spelling, so parsing either
    /// name of an already normalised architecture yields the same value.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "x64" => Ok(Self::X64),
            "x86" | "ia32" => Ok(Self::X86),
            "arm" => Ok(Self::Arm),
            "arm64" => Ok(Self::Arm64),
            _ => Err(ConfigError::invalid(
                "target_arch",
                s,
                "one of x64, x86, ia32, arm, arm64",
            )),
        }
    }
}

/// Operating system the build produces binaries for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetOs {
    Linux,
    Android,
}

impl TargetOs {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Linux => "linux",
            Self::Android => "android",
        }
    }
}

impl fmt::Display for TargetOs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TargetOs {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "linux" => Ok(Self::Linux),
            "android" => Ok(Self::Android),
            _ => Err(ConfigError::invalid("target_os", s, "one of linux, android")),
        }
    }
}

/// Operating system the tool runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostOs {
    Linux,
    MacOs,
    Windows,
}

impl HostOs {
    #[must_use]
    pub const fn current() -> Self {
        if cfg!(target_os = "macos") {
            Self::MacOs
        } else if cfg!(windows) {
            Self::Windows
        } else {
            Self::Linux
        }
    }
}

impl fmt::Display for HostOs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Linux => "linux",
            Self::MacOs => "macos",
            Self::Windows => "windows",
        })
    }
}

/// External tool names or paths.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolsConfig {
    pub git: String,
    pub gclient: String,
    pub gn: String,
    pub ninja: String,
    pub npm: String,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            git: "git".to_string(),
            gclient: "gclient".to_string(),
            gn: "gn".to_string(),
            ninja: "ninja".to_string(),
            npm: "npm".to_string(),
        }
    }
}

/// Coerces a boolean-like string.
///
/// # Errors
///
/// Returns `ConfigError::InvalidValue` naming `key` for anything other than
/// `true/false`, `1/0`, `yes/no` or `on/off` (case-insensitive).
pub fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::invalid(key, value, "a boolean")),
    }
}
