// antimuon-rs: Antimuon Build Tool
//
// SPDX-FileCopyrightText: 2026 Antimuon Developers
// SPDX-License-Identifier: GPL-3.0-or-later

use super::refs::{DEFAULT_REF, resolve_ref};
use super::{CustomDep, ProjectRegistry};
use crate::config::loader::PackageManifest;
use crate::config::options::StaticOptions;
use crate::error::ConfigError;
use std::path::Path;

fn options(pairs: &[(&str, &str)]) -> StaticOptions {
    pairs.iter().copied().collect()
}

#[test]
fn test_explicit_ref_is_verbatim() {
    let opts = options(&[
        ("projects.chrome.repository.ref", "R"),
        ("projects.chrome.tag", "T"),
        ("projects.chrome.branch", "B"),
    ]);
    assert_eq!(resolve_ref("chrome", &opts), "R");
}

#[test]
fn test_tag_becomes_tag_path() {
    let opts = options(&[("projects.chrome.tag", "T"), ("projects.chrome.version", "V")]);
    assert_eq!(resolve_ref("chrome", &opts), "refs/tags/T");
}

#[test]
fn test_no_overrides_is_default_branch() {
    assert_eq!(resolve_ref("chrome", &StaticOptions::new()), DEFAULT_REF);
    assert_eq!(DEFAULT_REF, "origin/master");
}

#[test]
fn test_branch_and_version_paths() {
    let branch_only = options(&[("projects.chrome.branch", "B")]);
    assert_eq!(resolve_ref("chrome", &branch_only), "origin/B");

    let version_only = options(&[("projects.chrome.version", "V")]);
    assert_eq!(resolve_ref("chrome", &version_only), "origin/V");

    let both = options(&[("projects.chrome.branch", "B"), ("projects.chrome.version", "V")]);
    assert_eq!(resolve_ref("chrome", &both), "origin/V");
}

#[test]
fn test_empty_values_fall_through() {
    let opts = options(&[
        ("projects.chrome.repository.ref", ""),
        ("projects.chrome.tag", ""),
        ("projects.chrome.branch", "B"),
    ]);
    assert_eq!(resolve_ref("chrome", &opts), "origin/B");
}

#[test]
fn test_product_ref_composes_upstream_version() {
    let opts = options(&[
        ("projects.antimuon.version", "0.5.0"),
        ("projects.chrome.version", "67.0.3396.87"),
    ]);
    assert_eq!(resolve_ref("antimuon", &opts), "origin/0.5.0+67.0.3396.87");

    let tag_wins = options(&[
        ("projects.antimuon.version", "0.5.0"),
        ("projects.chrome.tag", "68.0"),
        ("projects.chrome.branch", "68.0-branch"),
    ]);
    assert_eq!(resolve_ref("antimuon", &tag_wins), "origin/0.5.0+68.0");
}

#[test]
fn test_product_suffix_only_on_version_path() {
    let branch_only = options(&[
        ("projects.antimuon.branch", "master"),
        ("projects.chrome.tag", "68.0"),
    ]);
    assert_eq!(resolve_ref("antimuon", &branch_only), "origin/master");

    let no_upstream = options(&[("projects.antimuon.version", "0.5.0")]);
    assert_eq!(resolve_ref("antimuon", &no_upstream), "origin/0.5.0");
}

#[test]
fn test_suffix_is_product_specific() {
    let opts = options(&[
        ("projects.other.version", "1.0"),
        ("projects.chrome.tag", "68.0"),
    ]);
    assert_eq!(resolve_ref("other", &opts), "origin/1.0");
}

const MANIFEST: &str = r#"
[projects.chrome]
dir = "src"

[[projects.chrome.custom_deps]]
path = "src/third_party/skipped"

[projects.antimuon]
dir = "src/antimuon"

[projects.aardvark]
dir = "src/zzz"
pinned = false
"#;

fn registry(opts: &StaticOptions) -> ProjectRegistry {
    let manifest = PackageManifest::parse(MANIFEST).expect("manifest should parse");
    ProjectRegistry::from_declarations(Path::new("/work"), manifest.projects(), opts)
}

#[test]
fn test_registry_order_and_fields() {
    let opts = options(&[
        ("projects.chrome.tag", "67.0"),
        ("projects.chrome.repository.url", "https://example.invalid/src.git"),
    ]);
    let registry = registry(&opts);

    let names: Vec<_> = registry.names().collect();
    assert_eq!(names, ["chrome", "antimuon", "aardvark"]);

    let chrome = registry.require("chrome").expect("chrome registered");
    assert_eq!(chrome.reference(), "refs/tags/67.0");
    assert_eq!(chrome.url(), Some("https://example.invalid/src.git"));
    assert_eq!(chrome.gclient_name(), "src");
    assert_eq!(chrome.directory(), Path::new("/work/src"));
    assert_eq!(
        chrome.custom_deps(),
        [CustomDep {
            path: "src/third_party/skipped".to_string(),
            url: None,
        }]
    );

    let unpinned = registry.require("aardvark").expect("registered");
    assert!(!unpinned.is_pinned());
    assert_eq!(unpinned.reference(), "");

    let versioned: Vec<_> = registry.versioned().map(|p| p.name()).collect();
    assert_eq!(versioned, ["chrome", "antimuon"]);
}

#[test]
fn test_registry_dir_override() {
    let registry = registry(&options(&[("projects.antimuon.dir", "src/product")]));
    let product = registry.require("antimuon").expect("registered");
    assert_eq!(product.directory(), Path::new("/work/src/product"));
    assert_eq!(product.gclient_name(), "src/product");
}

#[test]
fn test_registry_rejects_unknown_names() {
    let registry = registry(&StaticOptions::new());
    assert!(!registry.contains("firefox"));
    assert!(matches!(
        registry.require("firefox"),
        Err(ConfigError::MissingRegistryEntry { .. })
    ));
}

#[test]
fn test_override_ref_skips_unversioned() {
    let mut registry = registry(&StaticOptions::new());
    assert!(registry.override_ref("chrome", "1.2.3"));
    assert!(!registry.override_ref("aardvark", "main"));
    assert!(!registry.override_ref("firefox", "1.0"));

    assert_eq!(registry.get("chrome").map(|p| p.reference()), Some("1.2.3"));
    assert_eq!(registry.get("aardvark").map(|p| p.reference()), Some(""));
}
