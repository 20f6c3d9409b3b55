// antimuon-rs: Antimuon Build Tool
//
// SPDX-FileCopyrightText: 2026 Antimuon Developers
// SPDX-License-Identifier: GPL-3.0-or-later

//! Argument layers, applied in declaration order.

use std::path::Path;

use super::BuildArgs;
use crate::config::Config;
use crate::config::types::HostOs;
use crate::project::PRODUCT;

/// A named, pure step of argument generation.
#[derive(Clone, Copy)]
pub struct Layer {
    pub name: &'static str,
    pub apply: fn(&Config, BuildArgs) -> BuildArgs,
}

impl std::fmt::Debug for Layer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Layer").field(&self.name).finish()
    }
}

pub const LAYERS: &[Layer] = &[
    Layer {
        name: "baseline",
        apply: baseline,
    },
    Layer {
        name: "target_os",
        apply: target_os,
    },
    Layer {
        name: "debug",
        apply: debug,
    },
    Layer {
        name: "cc_wrapper",
        apply: cc_wrapper,
    },
    Layer {
        name: "android",
        apply: android,
    },
    Layer {
        name: "android_debug",
        apply: android_debug,
    },
    Layer {
        name: "android_release",
        apply: android_release,
    },
];

/// `//<product dir>` relative to the source root.
fn product_dep(config: &Config) -> String {
    let relative = config
        .projects()
        .get(PRODUCT)
        .and_then(|p| p.directory().strip_prefix(config.src_dir()).ok())
        .map_or_else(|| PRODUCT.to_string(), gn_path);
    format!("//{relative}")
}

fn gn_path(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

pub fn baseline(config: &Config, args: BuildArgs) -> BuildArgs {
    let not_release = !config.build_type().is_release();
    args.with("root_extra_deps", vec![product_dep(config)])
        .with("is_component_build", config.component_build())
        .with("proprietary_codecs", true)
        .with("ffmpeg_branding", "Chrome")
        .with("enable_widevine", config.host_os() != HostOs::Linux)
        .with("target_cpu", config.target_arch().external())
        .with("is_official_build", config.official_build())
        .with("is_debug", not_release)
        .with("dcheck_always_on", config.dcheck_always_on())
}

pub fn target_os(config: &Config, args: BuildArgs) -> BuildArgs {
    match config.target_os() {
        Some(os) => args.with("target_os", os.as_str()),
        None => args,
    }
}

pub fn debug(config: &Config, args: BuildArgs) -> BuildArgs {
    if !config.debug_build() {
        return args;
    }
    let args = args
        .with("symbol_level", 2_i64)
        .with("enable_profiling", true);
    match config.host_os() {
        HostOs::MacOs => args.with("enable_stripping", false),
        HostOs::Windows => args.with("is_win_fastlink", true),
        HostOs::Linux => args,
    }
}

pub fn cc_wrapper(config: &Config, args: BuildArgs) -> BuildArgs {
    match config.cc_wrapper() {
        Some(wrapper) => args.with("cc_wrapper", wrapper),
        None => args,
    }
}

/// Extensions are off by default on Android; the product needs them.
pub fn android(config: &Config, args: BuildArgs) -> BuildArgs {
    if !config.is_android() {
        return args;
    }
    let args = args.with("enable_extensions", true);
    match config.mobile_version() {
        Some(version) => args
            .with("android_default_version_code", version.code.as_str())
            .with("android_default_version_name", version.name.as_str()),
        None => args,
    }
}

pub fn android_debug(config: &Config, args: BuildArgs) -> BuildArgs {
    if !config.is_android() || !config.debug_build() {
        return args;
    }
    args.with("is_component_build", false)
        .with("is_clang", true)
        .with("symbol_level", 1_i64)
        .with("is_java_debug", true)
        .with("enable_incremental_javac", true)
        .with("v8_use_external_startup_data", true)
        .with("fieldtrial_testing_like_official_build", true)
        .with("icu_use_data_file", false)
}

pub fn android_release(config: &Config, args: BuildArgs) -> BuildArgs {
    if !config.is_android() || config.debug_build() {
        return args;
    }
    args.with("is_debug", false)
        .with("android_channel", "stable")
        .with("is_official_build", true)
        .with("is_component_build", false)
        .with("is_clang", true)
        .with("symbol_level", 1_i64)
        .with("use_unofficial_version_number", false)
        .with("android_keystore_name", "")
        .with("android_keystore_password", "")
        .with("android_keystore_path", "empty")
        .with("v8_use_external_startup_data", true)
        .with("fieldtrial_testing_like_official_build", true)
        .with("icu_use_data_file", false)
}
