// antimuon-rs: Antimuon Build Tool
//
// SPDX-FileCopyrightText: 2026 Antimuon Developers
// SPDX-License-Identifier: GPL-3.0-or-later

//! Explicit overrides applied on top of the defaults.
//!
//! ```text
//! UpdateOptions (CLI)
//!   output_dir (-C)     --> build_type = basename, output_dir (relative to src)
//!   target_arch         --> x64 | x86/ia32 | arm | arm64
//!   gclient_file        --> unless "default"
//!   credentials
//!   debug_build         --> CLI > option > build_type != Release
//!   official_build      --> CLI > option > build_type == Release; true forces debug off
//!   project_refs        --> only for versioned projects, not "default"
//!   target_os, android  --> target_os, target, mobile version stamps
//! ```

use bon::Builder;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::types::{BuildType, TargetArch, TargetOs, parse_bool};
use super::{Config, MobileVersion};
use crate::error::{AntimuonResult, ConfigError};

/// Build target for the mobile variant.
pub const ANDROID_TARGET: &str = "chrome_public_apk";

/// Sentinel meaning "keep the configured value".
pub const DEFAULT_SENTINEL: &str = "default";

const ANDROID_VERSION_CODE: &str = "1030";
const ANDROID_VERSION_NAME: &str = "1.0.38";

/// Explicit command-line overrides. Every field is optional.
///
/// Boolean flags are kept as strings so coercion errors surface from
/// [`Config::resolve`] with the offending key.
#[derive(Debug, Clone, Default, Builder)]
pub struct UpdateOptions {
    /// `-C`: output directory whose base name is the build type.
    #[builder(into)]
    pub output_dir: Option<PathBuf>,
    #[builder(into)]
    pub target_arch: Option<String>,
    #[builder(into)]
    pub target_os: Option<String>,
    #[builder(into)]
    pub gclient_file: Option<String>,
    #[builder(into)]
    pub google_api_key: Option<String>,
    #[builder(into)]
    pub google_api_endpoint: Option<String>,
    #[builder(into)]
    pub debug_build: Option<String>,
    #[builder(into)]
    pub official_build: Option<String>,
    /// Enable the mobile variant.
    #[builder(default)]
    pub android: bool,
    /// `<project>_ref` overrides, by project name.
    #[builder(default)]
    pub project_refs: BTreeMap<String, String>,
}

impl Config {
    /// Applies `cli` to the draft and freezes it.
    pub(super) fn update(mut self, cli: &UpdateOptions) -> AntimuonResult<Self> {
        if let Some(dir) = &cli.output_dir {
            self.build_type = build_type_from_dir(dir)?;
            self.output_dir = Some(self.src_dir.join(dir));
        }

        if let Some(arch) = &cli.target_arch {
            self.target_arch = arch.parse()?;
        }

        if let Some(file) = cli
            .gclient_file
            .as_deref()
            .filter(|f| !f.is_empty() && *f != DEFAULT_SENTINEL)
        {
            self.gclient_file = PathBuf::from(file);
        }

        if let Some(key) = cli.google_api_key.as_deref().filter(|k| !k.is_empty()) {
            self.google_api_key = key.to_string();
        }
        if let Some(endpoint) = cli.google_api_endpoint.as_deref().filter(|e| !e.is_empty()) {
            self.google_api_endpoint = endpoint.to_string();
        }

        self.resolve_build_flags(cli)?;
        self.apply_project_refs(&cli.project_refs)?;
        self.resolve_target(cli)?;

        if self.output_dir.is_none() {
            self.output_dir = Some(default_output_dir(
                &self.src_dir,
                self.target_arch,
                self.build_type,
            ));
        }

        debug!(
            build_type = %self.build_type,
            target_arch = %self.target_arch,
            debug_build = self.debug_build,
            official_build = self.official_build,
            "configuration resolved"
        );
        Ok(self)
    }

    fn resolve_build_flags(&mut self, cli: &UpdateOptions) -> AntimuonResult<()> {
        let cli_debug = cli
            .debug_build
            .as_deref()
            .map(|v| parse_bool("debug_build", v))
            .transpose()?;
        let cli_official = cli
            .official_build
            .as_deref()
            .map(|v| parse_bool("official_build", v))
            .transpose()?;

        let release = self.build_type.is_release();
        self.debug_build = cli_debug.or(self.debug_build_option).unwrap_or(!release);
        self.official_build = cli_official
            .or(self.official_build_option)
            .unwrap_or(release);

        if self.official_build {
            self.debug_build = false;
        }
        Ok(())
    }

    fn apply_project_refs(&mut self, refs: &BTreeMap<String, String>) -> AntimuonResult<()> {
        for (name, reference) in refs {
            self.projects.require(name)?;
            if reference.is_empty() || reference == DEFAULT_SENTINEL {
                continue;
            }
            if self.projects.override_ref(name, reference) {
                info!(project = %name, reference = %reference, "ref override");
            } else {
                debug!(project = %name, "unversioned project keeps its checkout");
            }
        }
        Ok(())
    }

    fn resolve_target(&mut self, cli: &UpdateOptions) -> AntimuonResult<()> {
        let mut target_os = TargetOs::Linux;
        if let Some(os) = &cli.target_os {
            target_os = os.parse()?;
            if target_os == TargetOs::Android {
                self.target = ANDROID_TARGET.to_string();
            }
        }

        if cli.android {
            target_os = TargetOs::Android;
            self.mobile_version = Some(MobileVersion {
                code: ANDROID_VERSION_CODE.to_string(),
                name: ANDROID_VERSION_NAME.to_string(),
            });
        }

        self.target_os = Some(target_os);
        Ok(())
    }
}

fn build_type_from_dir(dir: &Path) -> Result<BuildType, ConfigError> {
    let name = dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    name.parse().map_err(|_| {
        ConfigError::invalid(
            "-C",
            dir.display().to_string(),
            "a directory named Release, Debug, Component or Static",
        )
    })
}

/// `<src>/out[_x86]/<build type>`.
#[must_use]
pub fn default_output_dir(src_dir: &Path, arch: TargetArch, build_type: BuildType) -> PathBuf {
    let out = if arch == TargetArch::X86 { "out_x86" } else { "out" };
    src_dir.join(out).join(build_type.as_str())
}
