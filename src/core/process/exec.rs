// antimuon-rs: Antimuon Build Tool
//
// SPDX-FileCopyrightText: 2026 Antimuon Developers
// SPDX-License-Identifier: GPL-3.0-or-later

//! External command capability used by the sync and build pipelines.
//!
//! ```text
//! Invocation { program, args, cwd, env }
//!        |
//!        v
//! ProcessRunner::run()
//!   SystemRunner  --> which (invocation PATH) --> ProcessBuilder
//!                     (inherit stdio)                             --> exit code
//!   DryRunner     --> info! log only                               --> 0
//! ```
//!
//! The runner reports the exit status; deciding whether a non-zero status
//! aborts the pipeline is left to the caller.

use futures_util::future::BoxFuture;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::info;

use super::builder::ProcessBuilder;
use crate::core::env::container::Env;
use crate::error::ProcessError;

/// A fully described external command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    program: String,
    args: Vec<String>,
    cwd: PathBuf,
    env: Option<Env>,
}

impl Invocation {
    pub fn new(program: impl Into<String>, cwd: impl AsRef<Path>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: cwd.as_ref().to_path_buf(),
            env: None,
        }
    }

    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Runs the command with exactly this environment.
    #[must_use]
    pub fn env(mut self, env: Env) -> Self {
        self.env = Some(env);
        self
    }

    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    #[must_use]
    pub fn arguments(&self) -> &[String] {
        &self.args
    }

    #[must_use]
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    #[must_use]
    pub const fn environment(&self) -> Option<&Env> {
        self.env.as_ref()
    }

    /// Program followed by its arguments, as a flat list.
    #[must_use]
    pub fn argv(&self) -> Vec<&str> {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect()
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            if arg.contains(' ') {
                write!(f, " \"{arg}\"")?;
            } else {
                write!(f, " {arg}")?;
            }
        }
        Ok(())
    }
}

/// Runs external commands and reports their exit status.
pub trait ProcessRunner: Send + Sync {
    /// Runs `invocation` to completion and returns its exit code.
    ///
    /// A non-zero exit code is not an error here; only failures to start or
    /// wait on the command are.
    fn run<'a>(&'a self, invocation: &'a Invocation) -> BoxFuture<'a, Result<i32, ProcessError>>;
}

/// Spawns real child processes with the parent's stdio attached.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl SystemRunner {
    /// Bare names are looked up in the invocation's own `PATH`, which may
    /// differ from the parent's.
    fn resolve(invocation: &Invocation) -> Result<PathBuf, ProcessError> {
        let program = invocation.program();
        if Path::new(program).components().count() > 1 {
            return Ok(PathBuf::from(program));
        }
        let found = match invocation.environment().and_then(|env| env.get("PATH")) {
            Some(path) => ProcessBuilder::find_in(program, path, invocation.cwd()),
            None => ProcessBuilder::find(program),
        };
        found.ok_or_else(|| ProcessError::ExecutableNotFound {
            name: program.to_string(),
        })
    }

    async fn spawn(invocation: &Invocation) -> Result<i32, ProcessError> {
        let mut builder = ProcessBuilder::new(Self::resolve(invocation)?)
            .args(invocation.arguments())
            .cwd(invocation.cwd());
        if let Some(env) = invocation.environment() {
            builder = builder.env(env.clone());
        }
        builder.run().await
    }
}

impl ProcessRunner for SystemRunner {
    fn run<'a>(&'a self, invocation: &'a Invocation) -> BoxFuture<'a, Result<i32, ProcessError>> {
        Box::pin(Self::spawn(invocation))
    }
}

/// Logs each command instead of running it.
#[derive(Debug, Clone, Copy, Default)]
pub struct DryRunner;

impl ProcessRunner for DryRunner {
    fn run<'a>(&'a self, invocation: &'a Invocation) -> BoxFuture<'a, Result<i32, ProcessError>> {
        Box::pin(async move {
            info!(cwd = %invocation.cwd().display(), cmd = %invocation, "dry-run");
            Ok(0)
        })
    }
}
