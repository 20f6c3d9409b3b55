// antimuon-rs: Antimuon Build Tool
//
// SPDX-FileCopyrightText: 2026 Antimuon Developers
// SPDX-License-Identifier: GPL-3.0-or-later

use super::loader::{ConfigLoader, PackageManifest};
use super::manifest::{read_product_version, release_tag};
use super::options::{EnvOptions, LayeredOptions, OptionSource, StaticOptions};
use super::types::{BuildType, HostOs, TargetArch, TargetOs, parse_bool};
use super::update::UpdateOptions;
use super::{Config, DEFAULT_GOOGLE_API_KEY, Defaults};
use crate::core::env::container::Env;
use crate::error::{AntimuonError, ConfigError};
use std::collections::BTreeMap;
use std::path::Path;

const ROOT: &str = "/nonexistent/antimuon-root";

const TEST_MANIFEST: &str = r#"
[projects.chrome]
dir = "src"

[projects.antimuon]
dir = "src/antimuon"

[projects.local]
dir = "src/local"
pinned = false
"#;

fn defaults_at(root: &Path) -> Defaults {
    let manifest = PackageManifest::parse(TEST_MANIFEST).expect("test manifest should parse");
    Defaults::builder()
        .root_dir(root)
        .host_os(HostOs::Linux)
        .declarations(manifest.projects().clone())
        .build()
}

fn resolve(options: &StaticOptions, cli: &UpdateOptions) -> Result<Config, AntimuonError> {
    Config::resolve(defaults_at(Path::new(ROOT)), options, cli)
}

fn resolve_cli(cli: &UpdateOptions) -> Config {
    resolve(&StaticOptions::new(), cli).expect("config should resolve")
}

fn config_error(err: AntimuonError) -> ConfigError {
    match err {
        AntimuonError::Config(inner) => *inner,
        other => panic!("expected a config error, got {other:?}"),
    }
}

// --- Types ---

#[test]
fn test_build_type_parse_and_display() {
    let parsed: Vec<_> = ["release", "Debug", "COMPONENT", "static"]
        .iter()
        .map(|s| s.parse::<BuildType>().map(|b| b.to_string()).ok())
        .collect();
    insta::assert_debug_snapshot!(parsed, @r#"
    [
        Some(
            "Release",
        ),
        Some(
            "Debug",
        ),
        Some(
            "Component",
        ),
        Some(
            "Static",
        ),
    ]
    "#);
    assert!("RelWithDebInfo".parse::<BuildType>().is_err());
}

#[test]
fn test_target_arch_aliases() {
    let x86: TargetArch = "x86".parse().expect("x86 is valid");
    let ia32: TargetArch = "ia32".parse().expect("ia32 is valid");
    assert_eq!(x86, ia32);
    assert_eq!((x86.external(), x86.internal()), ("x86", "ia32"));

    let arm: TargetArch = "arm".parse().expect("arm is valid");
    assert_eq!((arm.external(), arm.internal()), ("arm", "arm"));
    assert_eq!(TargetArch::default(), TargetArch::X64);
}

#[test]
fn test_target_arch_normalisation_is_idempotent() {
    for input in ["x64", "x86", "ia32", "arm", "arm64"] {
        let once: TargetArch = input.parse().expect("valid arch");
        let via_external: TargetArch = once.external().parse().expect("external name parses");
        let via_internal: TargetArch = once.internal().parse().expect("internal name parses");
        assert_eq!(once, via_external, "{input}");
        assert_eq!(once, via_internal, "{input}");
    }
}

#[test]
fn test_parse_bool() {
    for truthy in ["true", "TRUE", "1", "yes", "on"] {
        assert!(parse_bool("flag", truthy).expect("truthy"), "{truthy}");
    }
    for falsy in ["false", "0", "No", "off"] {
        assert!(!parse_bool("flag", falsy).expect("falsy"), "{falsy}");
    }
    insta::assert_snapshot!(
        parse_bool("debug_build", "maybe").expect_err("not a boolean").to_string(),
        @"invalid value 'maybe' for 'debug_build': expected a boolean"
    );
}

// --- Option sources ---

#[test]
fn test_env_option_var_names() {
    insta::assert_snapshot!(
        EnvOptions::var_name("projects.chrome.repository.ref"),
        @"ANTIMUON_PROJECTS_CHROME_REPOSITORY_REF"
    );
    insta::assert_snapshot!(EnvOptions::var_name("debug_build"), @"ANTIMUON_DEBUG_BUILD");
}

#[test]
fn test_env_options_lookup_treats_empty_as_absent() {
    let mut env = Env::new();
    env.set("ANTIMUON_PROJECTS_CHROME_TAG", "68.0.3440.75")
        .set("ANTIMUON_SCCACHE", "");
    let options = EnvOptions::new(env);

    assert_eq!(
        options.get("projects.chrome.tag").as_deref(),
        Some("68.0.3440.75")
    );
    assert_eq!(options.get_path(&["projects", "chrome", "tag"]), options.get("projects.chrome.tag"));
    assert_eq!(options.get("sccache"), None);
    assert_eq!(options.get("projects.chrome.branch"), None);
}

#[test]
fn test_layered_options_first_hit_wins() {
    let options = LayeredOptions::new()
        .then(StaticOptions::new().with("version", "").with("tag", "env-tag"))
        .then(
            StaticOptions::new()
                .with("version", "0.1.0")
                .with("tag", "manifest-tag"),
        );

    assert_eq!(options.len(), 2);
    assert_eq!(options.get("tag").as_deref(), Some("env-tag"));
    assert_eq!(options.get("version").as_deref(), Some("0.1.0"));
    assert_eq!(options.get("missing"), None);
}

// --- Manifest loading ---

#[test]
fn test_builtin_manifest_declares_upstream_and_product() {
    let manifest = PackageManifest::builtin().expect("built-in manifest should parse");
    let names: Vec<_> = manifest.projects().keys().cloned().collect();
    assert_eq!(names, ["antimuon", "chrome"]);
    assert_eq!(manifest.projects()["chrome"].dir, "src");
    assert!(manifest.projects()["chrome"].pinned);
    assert_eq!(manifest.tools().gclient, "gclient");
    assert!(manifest.get("projects.chrome.tag").is_some());
    assert_eq!(
        manifest.get("projects.chrome.repository.url").as_deref(),
        Some("https://chromium.googlesource.com/chromium/src.git")
    );
}

#[test]
fn test_manifest_custom_deps_keep_declaration_order() {
    let manifest = PackageManifest::parse(
        r#"
[projects.chrome]
dir = "src"

[[projects.chrome.custom_deps]]
path = "src/z"
url = "https://example.invalid/z.git"

[[projects.chrome.custom_deps]]
path = "src/a"
"#,
    )
    .expect("manifest should parse");

    let deps = &manifest.projects()["chrome"].custom_deps;
    insta::assert_debug_snapshot!(deps, @r#"
    [
        CustomDep {
            path: "src/z",
            url: Some(
                "https://example.invalid/z.git",
            ),
        },
        CustomDep {
            path: "src/a",
            url: None,
        },
    ]
    "#);
}

#[test]
fn test_loader_overrides_and_files() {
    let dir = tempfile::tempdir().expect("tempdir");
    let extra = dir.path().join("extra.toml");
    std::fs::write(&extra, "[projects.chrome]\ntag = \"70.0.0.1\"\n").expect("write manifest");

    let manifest = ConfigLoader::with_defaults()
        .add_toml_file_optional(dir.path().join("missing.toml"))
        .add_toml_file(&extra)
        .set_assignment("projects.antimuon.version=0.9.0")
        .expect("assignment should apply")
        .build()
        .expect("manifest should build");

    assert_eq!(manifest.get("projects.chrome.tag").as_deref(), Some("70.0.0.1"));
    assert_eq!(manifest.get("projects.antimuon.version").as_deref(), Some("0.9.0"));
    assert_eq!(manifest.sources().len(), 2);
    assert!(manifest.format_sources()[0].starts_with("1. [builtin]"));
}

#[test]
fn test_loader_rejects_bad_assignment_and_missing_file() {
    assert!(ConfigLoader::new().set_assignment("no-equals-sign").is_err());
    assert!(
        ConfigLoader::new()
            .add_toml_file("/nonexistent/antimuon.toml")
            .build()
            .is_err()
    );
}

#[test]
fn test_manifest_project_without_dir_is_missing_key() {
    let err = PackageManifest::parse("[projects.chrome]\ntag = \"1\"\n")
        .expect_err("dir is required");
    let err = err.downcast::<AntimuonError>().expect("typed config error");
    assert!(matches!(
        config_error(err),
        ConfigError::MissingKey { key } if key == "projects.chrome.dir"
    ));

    let err = ConfigLoader::with_defaults()
        .add_toml_str("[projects.extension]\nbranch = \"develop\"\n")
        .build()
        .expect_err("declared project has no dir");
    insta::assert_snapshot!(err.to_string(), @"config error: missing required config key 'projects.extension.dir'");
}

#[test]
fn test_manifest_with_malformed_section_is_a_parse_error() {
    let err = PackageManifest::parse("[projects.chrome]\ndir = \"src\"\npinned = \"sometimes\"\n")
        .expect_err("pinned is a bool");
    assert!(err.to_string().contains("antimuon.toml"), "{err}");
}

#[test]
fn test_product_version_from_package_json() {
    let dir = tempfile::tempdir().expect("tempdir");
    assert_eq!(read_product_version(dir.path()), None);

    std::fs::write(dir.path().join("package.json"), r#"{"version": "1.2.3+67.0"}"#)
        .expect("write package.json");
    assert_eq!(read_product_version(dir.path()).as_deref(), Some("1.2.3+67.0"));

    std::fs::write(dir.path().join("package.json"), "{ not json").expect("write package.json");
    assert_eq!(read_product_version(dir.path()), None);

    assert_eq!(release_tag("1.2.3+67.0"), "1.2.3");
    assert_eq!(release_tag("1.2.3"), "1.2.3");
    assert_eq!(release_tag(""), "");
}

// --- Resolution ---

#[test]
fn test_resolve_defaults() {
    let config = resolve_cli(&UpdateOptions::default());

    assert_eq!(config.build_type(), BuildType::Release);
    assert!(config.official_build());
    assert!(!config.debug_build());
    assert!(!config.component_build());
    assert!(!config.dcheck_always_on());
    assert_eq!(config.target_arch(), TargetArch::X64);
    assert_eq!(config.target_os(), Some(TargetOs::Linux));
    assert_eq!(config.target(), "antimuon");
    assert_eq!(config.google_api_key(), DEFAULT_GOOGLE_API_KEY);
    assert_eq!(config.src_dir(), Path::new(ROOT).join("src"));
    assert_eq!(config.gclient_file(), Path::new(ROOT).join(".gclient"));
    assert_eq!(config.output_dir(), Path::new(ROOT).join("src/out/Release"));
    assert_eq!(
        config.depot_tools_dir(),
        Path::new(ROOT).join("vendor/depot_tools")
    );
    assert_eq!(config.product_version(), "");
    assert!(config.mobile_version().is_none());
}

#[test]
fn test_output_dir_sets_build_type() {
    let config = resolve_cli(&UpdateOptions::builder().output_dir("out/Debug").build());

    assert_eq!(config.build_type(), BuildType::Debug);
    assert_eq!(config.output_dir(), Path::new(ROOT).join("src/out/Debug"));
    assert!(config.debug_build());
    assert!(!config.official_build());
    assert!(config.component_build());
    assert!(config.dcheck_always_on());
}

#[test]
fn test_output_dir_with_unknown_build_type_is_rejected() {
    let err = resolve(
        &StaticOptions::new(),
        &UpdateOptions::builder().output_dir("out/Fast").build(),
    )
    .expect_err("Fast is not a build type");
    assert!(matches!(config_error(err), ConfigError::InvalidValue { .. }));
}

#[test]
fn test_official_build_forces_debug_off() {
    let cli = UpdateOptions::builder()
        .output_dir("out/Debug")
        .debug_build("true")
        .official_build("true")
        .build();
    let config = resolve_cli(&cli);
    assert!(config.official_build());
    assert!(!config.debug_build());

    let options = StaticOptions::new().with("debug_build", "true");
    let cli = UpdateOptions::builder().official_build("1").build();
    let config = resolve(&options, &cli).expect("config should resolve");
    assert!(!config.debug_build());
}

#[test]
fn test_debug_flag_precedence() {
    let options = StaticOptions::new()
        .with("debug_build", "true")
        .with("official_build", "false");
    let config = resolve(&options, &UpdateOptions::default()).expect("resolves");
    assert!(config.debug_build());
    assert!(!config.official_build());

    let cli = UpdateOptions::builder().debug_build("false").build();
    let config = resolve(&options, &cli).expect("resolves");
    assert!(!config.debug_build());
}

#[test]
fn test_invalid_boolean_is_rejected() {
    let cli = UpdateOptions::builder().debug_build("maybe").build();
    let err = resolve(&StaticOptions::new(), &cli).expect_err("not a boolean");
    insta::assert_snapshot!(
        err.to_string(),
        @"config error: invalid value 'maybe' for 'debug_build': expected a boolean"
    );

    let options = StaticOptions::new().with("official_build", "sometimes");
    let err = resolve(&options, &UpdateOptions::default()).expect_err("not a boolean");
    assert!(matches!(
        config_error(err),
        ConfigError::InvalidValue { key, .. } if key == "official_build"
    ));
}

#[test]
fn test_target_arch_resolution() {
    let config = resolve_cli(&UpdateOptions::builder().target_arch("ia32").build());
    assert_eq!(config.target_arch(), TargetArch::X86);
    assert_eq!(config.output_dir(), Path::new(ROOT).join("src/out_x86/Release"));

    let options = StaticOptions::new().with("target_arch", "arm");
    let config = resolve(&options, &UpdateOptions::default()).expect("resolves");
    assert_eq!(config.target_arch(), TargetArch::Arm);

    let err = resolve(
        &StaticOptions::new(),
        &UpdateOptions::builder().target_arch("sparc").build(),
    )
    .expect_err("unknown arch");
    assert!(matches!(config_error(err), ConfigError::InvalidValue { .. }));
}

#[test]
fn test_gclient_file_resolution() {
    let config = resolve_cli(&UpdateOptions::builder().gclient_file("default").build());
    assert_eq!(config.gclient_file(), Path::new(ROOT).join(".gclient"));

    let options = StaticOptions::new().with("gclient_file", "/env/.gclient");
    let config = resolve(&options, &UpdateOptions::default()).expect("resolves");
    assert_eq!(config.gclient_file(), Path::new("/env/.gclient"));

    let cli = UpdateOptions::builder().gclient_file("/cli/.gclient").build();
    let config = resolve(&options, &cli).expect("resolves");
    assert_eq!(config.gclient_file(), Path::new("/cli/.gclient"));
}

#[test]
fn test_credentials_precedence() {
    let options = StaticOptions::new()
        .with("google_api_key", "env-key")
        .with("google_api_endpoint", "https://env.invalid/");
    let cli = UpdateOptions::builder().google_api_key("cli-key").build();
    let config = resolve(&options, &cli).expect("resolves");

    assert_eq!(config.google_api_key(), "cli-key");
    assert_eq!(config.google_api_endpoint(), "https://env.invalid/");
}

#[test]
fn test_project_ref_overrides() {
    let refs = BTreeMap::from([
        ("chrome".to_string(), "1.2.3".to_string()),
        ("antimuon".to_string(), "default".to_string()),
        ("local".to_string(), "some-branch".to_string()),
    ]);
    let config = resolve_cli(&UpdateOptions::builder().project_refs(refs).build());
    let projects = config.projects();

    assert_eq!(projects.get("chrome").map(|p| p.reference()), Some("1.2.3"));
    assert_eq!(
        projects.get("antimuon").map(|p| p.reference()),
        Some("origin/master")
    );
    assert_eq!(projects.get("local").map(|p| p.reference()), Some(""));
}

#[test]
fn test_unknown_project_ref_is_rejected() {
    let refs = BTreeMap::from([("firefox".to_string(), "1.0".to_string())]);
    let err = resolve(
        &StaticOptions::new(),
        &UpdateOptions::builder().project_refs(refs).build(),
    )
    .expect_err("firefox is not registered");
    insta::assert_snapshot!(
        err.to_string(),
        @"config error: unknown project 'firefox' (not in the project registry)"
    );
}

#[test]
fn test_missing_upstream_is_rejected() {
    let manifest = PackageManifest::parse("[projects.antimuon]\ndir = \"src/antimuon\"\n")
        .expect("manifest should parse");
    let defaults = Defaults::from_manifest(ROOT, &manifest);
    let err = Config::resolve(defaults, &StaticOptions::new(), &UpdateOptions::default())
        .expect_err("chrome is required");
    assert!(matches!(
        config_error(err),
        ConfigError::MissingRegistryEntry { project } if project == "chrome"
    ));
}

#[test]
fn test_target_os_android() {
    let config = resolve_cli(&UpdateOptions::builder().target_os("android").build());
    assert_eq!(config.target_os(), Some(TargetOs::Android));
    assert_eq!(config.target(), "chrome_public_apk");
    assert!(config.mobile_version().is_none());

    let config = resolve_cli(&UpdateOptions::builder().android(true).build());
    assert!(config.is_android());
    assert_eq!(config.target(), "antimuon");
    let stamps = config.mobile_version().expect("android seeds version stamps");
    assert_eq!((stamps.code.as_str(), stamps.name.as_str()), ("1030", "1.0.38"));

    let err = resolve(
        &StaticOptions::new(),
        &UpdateOptions::builder().target_os("beos").build(),
    )
    .expect_err("unknown target os");
    assert!(matches!(config_error(err), ConfigError::InvalidValue { .. }));
}

#[test]
fn test_product_version_sources() {
    let root = tempfile::tempdir().expect("tempdir");
    let product_dir = root.path().join("src/antimuon");
    std::fs::create_dir_all(&product_dir).expect("create product dir");
    std::fs::write(product_dir.join("package.json"), r#"{"version":"0.5.1+67.0"}"#)
        .expect("write package.json");

    let config = Config::resolve(
        defaults_at(root.path()),
        &StaticOptions::new(),
        &UpdateOptions::default(),
    )
    .expect("resolves");
    assert_eq!(config.product_version(), "0.5.1+67.0");
    assert_eq!(config.release_tag(), "0.5.1");

    let options = StaticOptions::new().with("version", "0.6.0");
    let config = Config::resolve(defaults_at(root.path()), &options, &UpdateOptions::default())
        .expect("resolves");
    assert_eq!(config.product_version(), "0.6.0");
}

#[test]
fn test_process_env() {
    let mut base = Env::new();
    base.set("PATH", "/usr/bin").set("GYP_MSVS_VERSION", "2015");

    let config = resolve_cli(&UpdateOptions::builder().target_arch("x86").build());
    let env = config.process_env(&base);

    let depot_tools = Path::new(ROOT).join("vendor/depot_tools");
    let expected_path = format!(
        "/usr/bin{}{}",
        crate::core::env::container::PATH_SEPARATOR,
        depot_tools.display()
    );
    assert_eq!(env.get("PATH"), Some(expected_path.as_str()));
    assert_eq!(env.get("TARGET_ARCH"), Some("ia32"));
    assert_eq!(env.get("DEPOT_TOOLS_WIN_TOOLCHAIN"), Some("0"));
    assert_eq!(env.get("PYTHONUNBUFFERED"), Some("1"));
    assert_eq!(env.get("GYP_MSVS_VERSION"), Some("2015"));
    assert_eq!(env.get("LLVM_DOWNLOAD_GOLD_PLUGIN"), Some("1"));
    let gclient = Path::new(ROOT).join(".gclient");
    assert_eq!(env.get("GCLIENT_FILE"), Some(gclient.display().to_string().as_str()));

    assert_eq!(base.get("TARGET_ARCH"), None);
    assert_eq!(
        config.process_env(&Env::new()).get("GYP_MSVS_VERSION"),
        Some("2017")
    );
}

#[test]
fn test_format_options_hides_credentials() {
    let options = StaticOptions::new().with("google_api_key", "secret-key");
    let config = resolve(&options, &UpdateOptions::default()).expect("resolves");
    let lines = config.format_options();

    assert!(lines.iter().all(|line| !line.contains("secret-key")));
    let key_line = lines
        .iter()
        .find(|line| line.starts_with("google_api_key"))
        .expect("key listed");
    assert!(key_line.ends_with("= [hidden]"));
    assert!(lines.iter().any(|line| line.starts_with("projects.chrome.ref")));

    let mut sorted = lines.clone();
    sorted.sort();
    assert_eq!(lines, sorted);
}
