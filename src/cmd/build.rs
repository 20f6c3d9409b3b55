// antimuon-rs: Antimuon Build Tool
//
// SPDX-FileCopyrightText: 2026 Antimuon Developers
// SPDX-License-Identifier: GPL-3.0-or-later

//! Build command implementation for antimuon-rs.
//!
//! ```text
//! gn::generate(config) --> <out>/args.gn
//!                      --> gn gen <out> --args="k=v ..."    (cwd: src)
//!                      --> ninja -C <out> <target>          (cwd: src)
//! ```

use anyhow::Context as _;
use std::path::PathBuf;
use tracing::info;

use crate::cli::build::{BuildArgs, PrintArgs};
use crate::config::Config;
use crate::core::env::current_env;
use crate::core::env::container::Env;
use crate::core::process::exec::{Invocation, ProcessRunner};
use crate::error::{AntimuonError, ProcessError, Result};
use crate::gn;

/// Main handler for the build command.
///
/// # Errors
///
/// Returns an error if `args.gn` cannot be written or `gn`/`ninja` fail.
pub async fn run_build_command(args: &BuildArgs, config: &Config, dry_run: bool) -> Result<()> {
    let runner = super::runner(dry_run);
    let build = Build::new(config, &current_env())
        .target(args.target.clone())
        .gen_only(args.gen_only)
        .write_files(!dry_run);
    let out = build.run(runner.as_ref()).await?;
    info!(out = %out.display(), "Build completed successfully");
    Ok(())
}

/// Prints the build arguments, as `args.gn` lines or JSON.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn run_args_command(args: &PrintArgs, config: &Config) -> Result<()> {
    let build_args = gn::generate(config);
    if args.json {
        println!("{}", build_args.to_json()?);
    } else {
        print!("{}", build_args.to_args_gn());
    }
    Ok(())
}

/// One `gn gen` + `ninja` run.
pub struct Build<'a> {
    config: &'a Config,
    env: Env,
    target: Option<String>,
    gen_only: bool,
    write_files: bool,
}

impl<'a> Build<'a> {
    #[must_use]
    pub fn new(config: &'a Config, base_env: &Env) -> Self {
        Self {
            config,
            env: config.process_env(base_env),
            target: None,
            gen_only: false,
            write_files: true,
        }
    }

    /// Overrides the configured ninja target.
    #[must_use]
    pub fn target(mut self, target: Option<String>) -> Self {
        self.target = target;
        self
    }

    #[must_use]
    pub const fn gen_only(mut self, gen_only: bool) -> Self {
        self.gen_only = gen_only;
        self
    }

    #[must_use]
    pub const fn write_files(mut self, write_files: bool) -> Self {
        self.write_files = write_files;
        self
    }

    /// Output directory; a relative `-C` is taken from `src`.
    #[must_use]
    pub fn output_dir(&self) -> PathBuf {
        self.config.output_dir()
    }

    /// Runs the build and returns the output directory.
    ///
    /// # Errors
    ///
    /// Returns an error if `args.gn` cannot be written, a tool cannot be
    /// started, or a tool exits non-zero.
    pub async fn run<R: ProcessRunner + ?Sized>(&self, runner: &R) -> Result<PathBuf> {
        let config = self.config;
        let tools = config.tools();
        let out = self.output_dir();
        let build_args = gn::generate(config);

        let args_file = out.join("args.gn");
        if self.write_files {
            tokio::fs::create_dir_all(&out)
                .await
                .map_err(AntimuonError::from)
                .with_context(|| format!("failed to create '{}'", out.display()))?;
            tokio::fs::write(&args_file, build_args.to_args_gn())
                .await
                .map_err(AntimuonError::from)
                .with_context(|| format!("failed to write '{}'", args_file.display()))?;
            info!(path = %args_file.display(), args = build_args.len(), "wrote build arguments");
        } else {
            info!(path = %args_file.display(), "dry-run: would write build arguments");
        }

        let out_arg = out.display().to_string();
        let generate = Invocation::new(&tools.gn, config.src_dir())
            .args(["gen", out_arg.as_str()])
            .arg(format!("--args={}", build_args.to_cli_arg()))
            .env(self.env.clone());
        check(runner, &generate).await?;

        if self.gen_only {
            return Ok(out);
        }

        let target = self.target.as_deref().unwrap_or_else(|| config.target());
        let compile = Invocation::new(&tools.ninja, config.src_dir())
            .args(["-C", out_arg.as_str(), target])
            .env(self.env.clone());
        check(runner, &compile).await?;

        Ok(out)
    }
}

async fn check<R: ProcessRunner + ?Sized>(runner: &R, invocation: &Invocation) -> Result<()> {
    let code = runner
        .run(invocation)
        .await
        .map_err(AntimuonError::from)?;
    if code != 0 {
        return Err(AntimuonError::from(ProcessError::NonZeroExit {
            command: invocation.to_string(),
            code,
        })
        .into());
    }
    Ok(())
}
