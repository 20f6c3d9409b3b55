// antimuon-rs: Antimuon Build Tool
//
// SPDX-FileCopyrightText: 2026 Antimuon Developers
// SPDX-License-Identifier: GPL-3.0-or-later

//! Process execution.
//!
//! ```text
//! run()
//!   build_command()  args, cwd, env, inherited stdout/stderr
//!        |
//!        v
//!   spawn() --> wait() --> exit code (-1 when killed by a signal)
//! ```

use std::fmt::Write as _;
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, trace};

use super::builder::ProcessBuilder;
use crate::error::ProcessError;

impl ProcessBuilder {
    fn display_name(&self) -> String {
        self.program().file_stem().map_or_else(
            || "process".to_string(),
            |s| s.to_string_lossy().into_owned(),
        )
    }

    /// Returns the full command line as a string (for logging and errors).
    #[must_use]
    pub fn command_line(&self) -> String {
        let mut cmd = self.program().display().to_string();
        for arg in self.args_slice() {
            if arg.contains(' ') {
                let _ = write!(cmd, " \"{arg}\"");
            } else {
                let _ = write!(cmd, " {arg}");
            }
        }
        cmd
    }

    /// Spawns the process and waits for it, returning its exit code.
    ///
    /// A non-zero exit code is returned as-is; the caller decides whether it
    /// is a failure.
    ///
    /// # Errors
    ///
    /// Returns a `ProcessError` if spawning or waiting on the child fails.
    pub async fn run(self) -> Result<i32, ProcessError> {
        let name = self.display_name();
        let cmd_line = self.command_line();

        if let Some(cwd) = self.working_dir() {
            debug!(cwd = %cwd.display(), "cd");
        }
        debug!(cmd = %cmd_line, "exec");

        let mut child = self
            .build_command()
            .spawn()
            .map_err(|source| ProcessError::SpawnFailed {
                command: cmd_line.clone(),
                source,
            })?;
        trace!(process = %name, pid = ?child.id(), "spawned");

        let status = child.wait().await.map_err(|e| ProcessError::OutputError {
            command: cmd_line,
            message: e.to_string(),
        })?;
        let code = status.code().unwrap_or(-1);

        trace!(process = %name, exit_code = code, "completed");
        Ok(code)
    }

    fn build_command(&self) -> Command {
        let mut command = Command::new(self.program());
        command.args(self.args_slice());

        if let Some(cwd) = self.working_dir() {
            command.current_dir(cwd);
        }

        if let Some(env) = self.environment() {
            command.env_clear();
            command.envs(env.iter());
        }

        // Tool progress (gclient, ninja) stays visible on the terminal.
        command.stdin(Stdio::null());
        command.stdout(Stdio::inherit());
        command.stderr(Stdio::inherit());

        // An interrupted run must not leave gclient or git behind.
        command.kill_on_drop(true);

        command
    }
}
