// antimuon-rs: Antimuon Build Tool
//
// SPDX-FileCopyrightText: 2026 Antimuon Developers
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for the build command.

use std::path::Path;
use std::sync::Mutex;

use antimuon_rs::cli::config::ConfigArgs;
use antimuon_rs::cli::global::GlobalOptions;
use antimuon_rs::cmd::build::Build;
use antimuon_rs::cmd::{load_manifest, resolve_config};
use antimuon_rs::config::Config;
use antimuon_rs::config::options::EnvOptions;
use antimuon_rs::core::env::container::Env;
use antimuon_rs::core::process::exec::{Invocation, ProcessRunner};
use antimuon_rs::error::{AntimuonError, ProcessError};
use antimuon_rs::gn;
use futures_util::future::BoxFuture;

/// Records invocations; `program` exits with `code`.
#[derive(Default)]
struct Recorder {
    calls: Mutex<Vec<Invocation>>,
    fail: Option<(&'static str, i32)>,
}

impl ProcessRunner for Recorder {
    fn run<'a>(&'a self, invocation: &'a Invocation) -> BoxFuture<'a, Result<i32, ProcessError>> {
        Box::pin(async move {
            self.calls.lock().unwrap().push(invocation.clone());
            Ok(match self.fail {
                Some((program, code)) if invocation.program() == program => code,
                _ => 0,
            })
        })
    }
}

fn config(root: &Path, args: &ConfigArgs) -> Config {
    let global = GlobalOptions::default();
    let manifest = load_manifest(&global, root).unwrap();
    resolve_config(root.to_path_buf(), manifest, EnvOptions::new(Env::new()), args).unwrap()
}

#[tokio::test]
async fn build_writes_args_and_runs_tools() {
    let root = tempfile::tempdir().unwrap();
    let config = config(root.path(), &ConfigArgs::default());
    let runner = Recorder::default();

    let out = Build::new(&config, &Env::new()).run(&runner).await.unwrap();

    assert_eq!(out, root.path().join("src/out/Release"));
    let written = std::fs::read_to_string(out.join("args.gn")).unwrap();
    assert_eq!(written, gn::generate(&config).to_args_gn());
    assert!(written.contains("is_official_build = true\n"));

    let calls = runner.calls.lock().unwrap();
    assert_eq!(calls.len(), 2);

    let out_arg = out.display().to_string();
    assert_eq!(calls[0].program(), "gn");
    assert_eq!(calls[0].arguments()[..2], ["gen", out_arg.as_str()]);
    assert!(calls[0].arguments()[2].starts_with("--args="));
    assert!(calls[0].arguments()[2].contains("root_extra_deps=[\"//antimuon\"]"));
    assert_eq!(calls[0].cwd(), config.src_dir());

    assert_eq!(calls[1].argv(), ["ninja", "-C", out_arg.as_str(), "antimuon"]);
}

#[tokio::test]
async fn build_relative_output_dir_and_target() {
    let root = tempfile::tempdir().unwrap();
    let args = ConfigArgs {
        output_dir: Some("out/Debug".into()),
        ..ConfigArgs::default()
    };
    let config = config(root.path(), &args);
    let runner = Recorder::default();

    let out = Build::new(&config, &Env::new())
        .target(Some("base_unittests".to_string()))
        .run(&runner)
        .await
        .unwrap();

    assert_eq!(out, root.path().join("src/out/Debug"));
    let written = std::fs::read_to_string(out.join("args.gn")).unwrap();
    assert!(written.contains("is_debug = true\n"));
    let calls = runner.calls.lock().unwrap();
    assert_eq!(calls[1].arguments().last().map(String::as_str), Some("base_unittests"));
}

#[test]
fn build_output_dir_with_relative_root() {
    let root = Path::new("checkout");
    let release = config(root, &ConfigArgs::default());
    assert_eq!(
        Build::new(&release, &Env::new()).output_dir(),
        root.join("src/out/Release")
    );

    let args = ConfigArgs {
        output_dir: Some("out/Debug".into()),
        ..ConfigArgs::default()
    };
    let debug = config(root, &args);
    assert_eq!(
        Build::new(&debug, &Env::new()).output_dir(),
        root.join("src/out/Debug")
    );
}

#[tokio::test]
async fn build_android_target() {
    let root = tempfile::tempdir().unwrap();
    let args = ConfigArgs {
        android: true,
        ..ConfigArgs::default()
    };
    let config = config(root.path(), &args);
    let runner = Recorder::default();

    Build::new(&config, &Env::new())
        .gen_only(false)
        .run(&runner)
        .await
        .unwrap();

    let calls = runner.calls.lock().unwrap();
    assert_eq!(calls[1].arguments().last().map(String::as_str), Some("chrome_public_apk"));
}

#[tokio::test]
async fn build_gen_only_and_dry_run() {
    let root = tempfile::tempdir().unwrap();
    let config = config(root.path(), &ConfigArgs::default());
    let runner = Recorder::default();

    let out = Build::new(&config, &Env::new())
        .gen_only(true)
        .write_files(false)
        .run(&runner)
        .await
        .unwrap();

    assert!(!out.exists());
    let calls = runner.calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].program(), "gn");
    let env = calls[0].environment().unwrap();
    assert_eq!(env.get("TARGET_ARCH"), Some("x64"));
}

#[tokio::test]
async fn build_failure_carries_exit_code() {
    let root = tempfile::tempdir().unwrap();
    let config = config(root.path(), &ConfigArgs::default());
    let runner = Recorder {
        fail: Some(("ninja", 3)),
        ..Recorder::default()
    };

    let err = Build::new(&config, &Env::new()).run(&runner).await.unwrap_err();

    let antimuon = err.downcast_ref::<AntimuonError>().unwrap();
    assert_eq!(antimuon.exit_code(), Some(3));
    assert!(err.to_string().contains("exited with code 3"));
}

#[tokio::test]
async fn build_unwritable_output_dir_is_io_error() {
    let root = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(root.path().join("src")).unwrap();
    std::fs::write(root.path().join("src/out"), "not a directory").unwrap();
    let config = config(root.path(), &ConfigArgs::default());
    let runner = Recorder::default();

    let err = Build::new(&config, &Env::new()).run(&runner).await.unwrap_err();

    assert!(matches!(
        err.downcast_ref::<AntimuonError>(),
        Some(AntimuonError::Io(_))
    ));
    assert!(err.to_string().starts_with("failed to create"));
    assert!(runner.calls.lock().unwrap().is_empty());
}
