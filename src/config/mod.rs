// antimuon-rs: Antimuon Build Tool
//
// SPDX-FileCopyrightText: 2026 Antimuon Developers
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration resolution.
//!
//! # Precedence
//!
//! ```text
//! Priority (low → high)
//! 1. built-in defaults
//! 2. package manifest: default manifest, antimuon.toml, --manifest, --set
//! 3. ANTIMUON_* env vars
//! 4. CLI options (UpdateOptions)
//! ```
//!
//! # Lifecycle
//!
//! ```text
//! Defaults + OptionSource --> draft --> update(UpdateOptions) --> Config (frozen)
//! ```
//!
//! # Environment Variable Mapping
//!
//! ```text
//! ANTIMUON_DEBUG_BUILD=true         → debug_build = true
//! ANTIMUON_PROJECTS_CHROME_TAG=68.0 → projects.chrome.tag = "68.0"
//! ANTIMUON_GCLIENT_FILE=/x/.gclient → gclient_file = "/x/.gclient"
//! ```

pub mod loader;
pub mod manifest;
pub mod options;
pub mod types;
pub mod update;

#[cfg(test)]
mod tests;

use bon::Builder;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::core::env::container::Env;
use crate::error::AntimuonResult;
use crate::project::{PRODUCT, ProjectRegistry, UPSTREAM};

use loader::{PackageManifest, ProjectEntry};
use options::OptionSource;
use types::{BuildType, HostOs, TargetArch, TargetOs, ToolsConfig, parse_bool};
use update::UpdateOptions;

/// Default build target.
pub const DEFAULT_TARGET: &str = "antimuon";

pub const DEFAULT_GOOGLE_API_KEY: &str = "dummytoken";
pub const DEFAULT_GOOGLE_API_ENDPOINT: &str =
    "https://www.googleapis.com/geolocation/v1/geolocate?key=";

const DEFAULT_MSVS_VERSION: &str = "2017";

/// Inputs that do not come from option sources.
#[derive(Debug, Clone, Builder)]
pub struct Defaults {
    #[builder(into)]
    root_dir: PathBuf,
    #[builder(default = HostOs::current())]
    host_os: HostOs,
    #[builder(default)]
    declarations: BTreeMap<String, ProjectEntry>,
    #[builder(default)]
    tools: ToolsConfig,
}

impl Defaults {
    /// Defaults for `root_dir` with the projects and tools of `manifest`.
    #[must_use]
    pub fn from_manifest(root_dir: impl Into<PathBuf>, manifest: &PackageManifest) -> Self {
        Self::builder()
            .root_dir(root_dir)
            .declarations(manifest.projects().clone())
            .tools(manifest.tools().clone())
            .build()
    }
}

/// Version stamps for the mobile variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MobileVersion {
    pub code: String,
    pub name: String,
}

/// Immutable configuration snapshot for one invocation.
#[derive(Debug, Clone)]
pub struct Config {
    root_dir: PathBuf,
    src_dir: PathBuf,
    depot_tools_dir: PathBuf,
    gclient_file: PathBuf,
    output_dir: Option<PathBuf>,

    build_type: BuildType,
    target_arch: TargetArch,
    target_os: Option<TargetOs>,
    target: String,
    host_os: HostOs,

    debug_build: bool,
    official_build: bool,
    debug_build_option: Option<bool>,
    official_build_option: Option<bool>,

    google_api_key: String,
    google_api_endpoint: String,
    product_version: String,
    cc_wrapper: Option<String>,
    mobile_version: Option<MobileVersion>,

    tools: ToolsConfig,
    projects: ProjectRegistry,
}

impl Config {
    /// Resolves a snapshot from defaults, option sources and CLI overrides.
    ///
    /// # Errors
    ///
    /// - `ConfigError::InvalidValue` when a supplied value cannot be coerced
    ///   (boolean flags, architecture, target OS, `-C` build type).
    /// - `ConfigError::MissingRegistryEntry` when the upstream project is not
    ///   declared or a ref override names an unknown project.
    pub fn resolve<O: OptionSource + ?Sized>(
        defaults: Defaults,
        options: &O,
        cli: &UpdateOptions,
    ) -> AntimuonResult<Self> {
        Self::draft(defaults, options)?.update(cli)
    }

    fn draft<O: OptionSource + ?Sized>(defaults: Defaults, options: &O) -> AntimuonResult<Self> {
        let Defaults {
            root_dir,
            host_os,
            declarations,
            tools,
        } = defaults;

        let projects = ProjectRegistry::from_declarations(&root_dir, &declarations, options);
        let src_dir = projects.require(UPSTREAM)?.directory().to_path_buf();

        let bool_option = |key: &str| {
            options
                .get(key)
                .map(|value| parse_bool(key, &value))
                .transpose()
        };
        let debug_build_option = bool_option("debug_build")?;
        let official_build_option = bool_option("official_build")?;

        let target_arch = options
            .get("target_arch")
            .map(|arch| arch.parse::<TargetArch>())
            .transpose()?
            .unwrap_or_default();

        let product_version = options
            .get("version")
            .or_else(|| {
                projects
                    .get(PRODUCT)
                    .and_then(|p| manifest::read_product_version(p.directory()))
            })
            .unwrap_or_default();

        Ok(Self {
            depot_tools_dir: root_dir.join("vendor").join("depot_tools"),
            gclient_file: options
                .get("gclient_file")
                .map_or_else(|| root_dir.join(".gclient"), PathBuf::from),
            output_dir: None,
            build_type: BuildType::default(),
            target_arch,
            target_os: None,
            target: DEFAULT_TARGET.to_string(),
            host_os,
            debug_build: false,
            official_build: true,
            debug_build_option,
            official_build_option,
            google_api_key: options
                .get("google_api_key")
                .unwrap_or_else(|| DEFAULT_GOOGLE_API_KEY.to_string()),
            google_api_endpoint: options
                .get("google_api_endpoint")
                .unwrap_or_else(|| DEFAULT_GOOGLE_API_ENDPOINT.to_string()),
            product_version,
            cc_wrapper: options.get("sccache"),
            mobile_version: None,
            tools,
            projects,
            root_dir,
            src_dir,
        })
    }

    #[must_use]
    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    /// Source root: the upstream project's directory.
    #[must_use]
    pub fn src_dir(&self) -> &Path {
        &self.src_dir
    }

    #[must_use]
    pub fn depot_tools_dir(&self) -> &Path {
        &self.depot_tools_dir
    }

    #[must_use]
    pub fn gclient_file(&self) -> &Path {
        &self.gclient_file
    }

    #[must_use]
    pub fn output_dir(&self) -> PathBuf {
        self.output_dir.clone().unwrap_or_else(|| {
            update::default_output_dir(&self.src_dir, self.target_arch, self.build_type)
        })
    }

    #[must_use]
    pub const fn build_type(&self) -> BuildType {
        self.build_type
    }

    #[must_use]
    pub const fn target_arch(&self) -> TargetArch {
        self.target_arch
    }

    #[must_use]
    pub const fn target_os(&self) -> Option<TargetOs> {
        self.target_os
    }

    #[must_use]
    pub fn is_android(&self) -> bool {
        self.target_os == Some(TargetOs::Android)
    }

    /// Final build target passed to `ninja`.
    #[must_use]
    pub fn target(&self) -> &str {
        &self.target
    }

    #[must_use]
    pub const fn host_os(&self) -> HostOs {
        self.host_os
    }

    #[must_use]
    pub const fn debug_build(&self) -> bool {
        self.debug_build
    }

    #[must_use]
    pub const fn official_build(&self) -> bool {
        self.official_build
    }

    #[must_use]
    pub const fn component_build(&self) -> bool {
        !self.build_type.is_release()
    }

    #[must_use]
    pub const fn dcheck_always_on(&self) -> bool {
        !self.build_type.is_release()
    }

    #[must_use]
    pub fn google_api_key(&self) -> &str {
        &self.google_api_key
    }

    #[must_use]
    pub fn google_api_endpoint(&self) -> &str {
        &self.google_api_endpoint
    }

    /// Product version, possibly with a `+<upstream>` suffix; may be empty.
    #[must_use]
    pub fn product_version(&self) -> &str {
        &self.product_version
    }

    #[must_use]
    pub fn release_tag(&self) -> &str {
        manifest::release_tag(&self.product_version)
    }

    #[must_use]
    pub fn cc_wrapper(&self) -> Option<&str> {
        self.cc_wrapper.as_deref()
    }

    #[must_use]
    pub const fn mobile_version(&self) -> Option<&MobileVersion> {
        self.mobile_version.as_ref()
    }

    #[must_use]
    pub const fn tools(&self) -> &ToolsConfig {
        &self.tools
    }

    #[must_use]
    pub const fn projects(&self) -> &ProjectRegistry {
        &self.projects
    }

    /// Environment for every spawned build tool, derived from `base`.
    #[must_use]
    pub fn process_env(&self, base: &Env) -> Env {
        let mut env = base.clone();
        env.append_path(&self.depot_tools_dir)
            .set("GCLIENT_FILE", self.gclient_file.display().to_string())
            .set("DEPOT_TOOLS_WIN_TOOLCHAIN", "0")
            .set("PYTHONUNBUFFERED", "1")
            .set("TARGET_ARCH", self.target_arch.internal())
            .set_default("GYP_MSVS_VERSION", DEFAULT_MSVS_VERSION);

        if self.host_os == HostOs::Linux {
            env.set("LLVM_DOWNLOAD_GOLD_PLUGIN", "1");
        }
        env
    }

    /// Format configuration options for display.
    ///
    /// Credentials are shown as `[hidden]`. Output is ordered by key.
    #[must_use]
    pub fn format_options(&self) -> Vec<String> {
        let mut options = BTreeMap::new();
        self.format_build_options(&mut options);
        self.format_path_options(&mut options);
        self.format_project_options(&mut options);
        self.format_tools_options(&mut options);

        let max_key_len = options.keys().map(String::len).max().unwrap_or(0);

        options
            .into_iter()
            .map(|(key, value)| format!("{key:<max_key_len$} = {value}"))
            .collect()
    }

    fn format_build_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert("build_type".into(), self.build_type.to_string());
        options.insert("target_arch".into(), self.target_arch.to_string());
        options.insert(
            "target_os".into(),
            self.target_os.map(|os| os.to_string()).unwrap_or_default(),
        );
        options.insert("target".into(), self.target.clone());
        options.insert("debug_build".into(), self.debug_build.to_string());
        options.insert("official_build".into(), self.official_build.to_string());
        options.insert("google_api_key".into(), "[hidden]".into());
        options.insert(
            "google_api_endpoint".into(),
            self.google_api_endpoint.clone(),
        );
        options.insert("version".into(), self.product_version.clone());
        options.insert("release_tag".into(), self.release_tag().to_string());
        if let Some(wrapper) = &self.cc_wrapper {
            options.insert("sccache".into(), wrapper.clone());
        }
    }

    fn format_path_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert("root_dir".into(), self.root_dir.display().to_string());
        options.insert("src_dir".into(), self.src_dir.display().to_string());
        options.insert(
            "depot_tools_dir".into(),
            self.depot_tools_dir.display().to_string(),
        );
        options.insert(
            "gclient_file".into(),
            self.gclient_file.display().to_string(),
        );
        options.insert(
            "output_dir".into(),
            self.output_dir().display().to_string(),
        );
    }

    fn format_project_options(&self, options: &mut BTreeMap<String, String>) {
        for project in &self.projects {
            let name = project.name();
            options.insert(
                format!("projects.{name}.ref"),
                project.reference().to_string(),
            );
            options.insert(
                format!("projects.{name}.dir"),
                project.gclient_name().to_string(),
            );
            if let Some(url) = project.url() {
                options.insert(format!("projects.{name}.url"), url.to_string());
            }
        }
    }

    fn format_tools_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert("tools.git".into(), self.tools.git.clone());
        options.insert("tools.gclient".into(), self.tools.gclient.clone());
        options.insert("tools.gn".into(), self.tools.gn.clone());
        options.insert("tools.ninja".into(), self.tools.ninja.clone());
        options.insert("tools.npm".into(), self.tools.npm.clone());
    }
}
