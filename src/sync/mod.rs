// antimuon-rs: Antimuon Build Tool
//
// SPDX-FileCopyrightText: 2026 Antimuon Developers
// SPDX-License-Identifier: GPL-3.0-or-later

//! Synchronization orchestrator.
//!
//! ```text
//! SyncFlags --> validate project names
//!           --> for step in PIPELINE (strictly sequential)
//!                 gate.allows(flags, updated_version)?
//!                   Run: Invocation --> ProcessRunner --> exit code
//!                   non-zero --> SyncError (step, project, code), abort
//!           --> SyncReport { steps, pinned, updated_version }
//! ```
//!
//! A rerun without flags pins nothing, so the dependency sync and hooks
//! are skipped.

pub mod gclient;
pub mod steps;


use bitflags::bitflags;
use std::collections::BTreeSet;
use std::path::Path;
use tracing::{debug, info, info_span, Instrument as _};

use crate::config::Config;
use crate::core::env::container::Env;
use crate::core::process::exec::{Invocation, ProcessRunner};
use crate::error::{AntimuonResult, ProcessError, SyncError};
use crate::project::Project;

use steps::{Action, PIPELINE, Step};

bitflags! {
    /// Options recognised by `sync`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct SyncOptions: u32 {
        /// Initialize all dependencies
        const INIT = 0x01;
        /// Pin every versioned project
        const ALL = 0x02;
        /// Install mobile build dependencies
        const ANDROID = 0x04;
        /// Sync git submodules
        const SUBMODULE_SYNC = 0x08;
        /// Run the dependency sync even if nothing was pinned
        const RUN_SYNC = 0x10;
        /// Run hooks even if nothing was pinned
        const RUN_HOOKS = 0x20;
    }
}

/// Flags for one sync run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncFlags {
    pub options: SyncOptions,
    /// Projects whose `<project>_ref` option was supplied.
    pub project_refs: BTreeSet<String>,
}

impl SyncFlags {
    #[must_use]
    pub fn new(options: SyncOptions) -> Self {
        Self {
            options,
            project_refs: BTreeSet::new(),
        }
    }

    #[must_use]
    pub fn with_project_ref(mut self, project: impl Into<String>) -> Self {
        self.project_refs.insert(project.into());
        self
    }

    /// Whether `project` is pinned in this run.
    #[must_use]
    pub fn pins(&self, project: &str) -> bool {
        self.options.intersects(SyncOptions::INIT | SyncOptions::ALL)
            || self.project_refs.contains(project)
    }
}

/// What a sync run did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// Names of the steps whose gate opened, in order.
    pub steps: Vec<&'static str>,
    /// Projects checked out at their ref, in order.
    pub pinned: Vec<String>,
    pub updated_version: bool,
}

/// Runs the pipeline against a configuration snapshot.
pub struct Orchestrator<'a, R: ProcessRunner + ?Sized> {
    config: &'a Config,
    runner: &'a R,
    env: Env,
    write_files: bool,
}

impl<'a, R: ProcessRunner + ?Sized> Orchestrator<'a, R> {
    /// Every process runs with `config.process_env(base_env)`.
    pub fn new(config: &'a Config, runner: &'a R, base_env: &Env) -> Self {
        Self {
            config,
            runner,
            env: config.process_env(base_env),
            write_files: true,
        }
    }

    /// Logs generated files instead of writing them.
    #[must_use]
    pub const fn dry_run(mut self, dry: bool) -> Self {
        self.write_files = !dry;
        self
    }

    /// Runs every step whose gate opens.
    ///
    /// # Errors
    ///
    /// - `ConfigError::MissingRegistryEntry` if `flags` name an unknown
    ///   project; no step runs.
    /// - `SyncError` for the first failing step. Completed steps are kept.
    pub async fn run(&self, flags: &SyncFlags) -> AntimuonResult<SyncReport> {
        for project in &flags.project_refs {
            self.config.projects().require(project)?;
        }

        let mut report = SyncReport::default();
        for step in PIPELINE {
            if !step.gate.allows(flags, report.updated_version) {
                debug!(step = step.name, "skipped");
                continue;
            }
            report.steps.push(step.name);
            self.run_step(step, flags, &mut report)
                .instrument(info_span!("step", name = step.name))
                .await?;
        }

        info!(
            steps = report.steps.len(),
            pinned = report.pinned.len(),
            "sync complete"
        );
        Ok(report)
    }

    async fn run_step(
        &self,
        step: &Step,
        flags: &SyncFlags,
        report: &mut SyncReport,
    ) -> AntimuonResult<()> {
        let config = self.config;
        let tools = config.tools();
        let root = config.root_dir();

        match step.action {
            Action::SubmoduleSync => {
                self.exec(step, &self.invoke(&tools.git, root, &["submodule", "sync"]))
                    .await?;
                self.exec(
                    step,
                    &self.invoke(
                        &tools.git,
                        root,
                        &["submodule", "update", "--init", "--recursive"],
                    ),
                )
                .await?;
            }
            Action::InstallPrereqs => {
                self.exec(step, &self.invoke(&tools.npm, root, &["install"]))
                    .await?;
            }
            Action::WriteGclientConfig => self.write_gclient_config(step).await?,
            Action::InstallAndroidDeps => {
                let script = config
                    .src_dir()
                    .join("build")
                    .join("install-build-deps-android.sh");
                let invocation = Invocation::new(script.display().to_string(), config.src_dir())
                    .env(self.env.clone());
                self.exec(step, &invocation).await?;
            }
            Action::DependencySync => {
                let args = [
                    "sync",
                    "--force",
                    "--nohooks",
                    "--with_branch_heads",
                    "--with_tags",
                ];
                self.exec(step, &self.invoke(&tools.gclient, root, &args))
                    .await?;
            }
            Action::PinProjects => {
                for project in config.projects().versioned() {
                    if !flags.pins(project.name()) {
                        continue;
                    }
                    self.pin(step, project).await?;
                    report.pinned.push(project.name().to_string());
                    report.updated_version = true;
                }
            }
            Action::RunHooks => {
                self.exec(step, &self.invoke(&tools.gclient, root, &["runhooks"]))
                    .await?;
            }
        }
        Ok(())
    }

    fn invoke(&self, program: &str, cwd: &Path, args: &[&str]) -> Invocation {
        Invocation::new(program, cwd)
            .args(args.iter().copied())
            .env(self.env.clone())
    }

    async fn exec(&self, step: &Step, invocation: &Invocation) -> Result<(), SyncError> {
        self.check(invocation)
            .await
            .map_err(|source| SyncError::StepFailed {
                step: step.name,
                source,
            })
    }

    async fn pin(&self, step: &Step, project: &Project) -> Result<(), SyncError> {
        info!(project = project.name(), reference = project.reference(), "pinning");
        let git = &self.config.tools().git;
        let dir = project.directory();
        for invocation in [
            self.invoke(git, dir, &["fetch", "origin"]),
            self.invoke(git, dir, &["checkout", project.reference()]),
        ] {
            self.check(&invocation)
                .await
                .map_err(|source| SyncError::ProjectStepFailed {
                    step: step.name,
                    project: project.name().to_string(),
                    source,
                })?;
        }
        Ok(())
    }

    /// Runs `invocation`; a non-zero exit becomes an error.
    async fn check(&self, invocation: &Invocation) -> Result<(), ProcessError> {
        let code = self.runner.run(invocation).await?;
        if code == 0 {
            Ok(())
        } else {
            Err(ProcessError::NonZeroExit {
                command: invocation.to_string(),
                code,
            })
        }
    }

    async fn write_gclient_config(&self, step: &Step) -> Result<(), SyncError> {
        let path = self.config.root_dir().join(".gclient");
        let content = gclient::render(self.config);

        if !self.write_files {
            info!(path = %path.display(), "dry-run: would write client configuration");
            debug!(%content);
            return Ok(());
        }

        tokio::fs::write(&path, content)
            .await
            .map_err(|source| SyncError::WriteFailed {
                step: step.name,
                path: path.display().to_string(),
                source,
            })?;
        info!(path = %path.display(), "wrote client configuration");
        Ok(())
    }
}
