// antimuon-rs: Antimuon Build Tool
//
// SPDX-FileCopyrightText: 2026 Antimuon Developers
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!          AntimuonError (~24 bytes)
//!                  |
//!   +------+-------+-------+
//!   |      |       |       |
//!   v      v       v       v
//! Config Process  Sync    Io
//!  Box    Box     Box     Box
//!
//! Sub-errors (unboxed internally):
//!   Config  InvalidValue, MissingRegistryEntry, MissingKey, ParseError
//!   Process ExecutableNotFound, SpawnFailed, NonZeroExit, OutputError
//!   Sync    StepFailed, ProjectStepFailed, WriteFailed
//! ```
//!
//! Nothing is retried. A failed process surfaces its exit code through
//! [`AntimuonError::exit_code`] so the binary can exit with it.

use thiserror::Error;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Result type using [`AntimuonError`].
pub type AntimuonResult<T> = std::result::Result<T, AntimuonError>;

/// Top-level application error type.
///
/// All sub-errors are boxed to keep this enum at ~24 bytes on the stack.
#[derive(Debug, Error)]
pub enum AntimuonError {
    /// Configuration error.
    #[error("config error: {0}")]
    Config(#[from] Box<ConfigError>),

    /// Process execution error.
    #[error("process error: {0}")]
    Process(#[from] Box<ProcessError>),

    /// Synchronization pipeline error.
    #[error("sync error: {0}")]
    Sync(#[from] Box<SyncError>),

    /// I/O error.
    #[error("io error: {0}")]
    Io(Box<std::io::Error>),
}

impl AntimuonError {
    /// Exit code of the external process that caused this error, if any.
    #[must_use]
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            Self::Process(err) => err.exit_code(),
            Self::Sync(err) => err.exit_code(),
            _ => None,
        }
    }
}

macro_rules! impl_from_boxed {
    ($($error:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$error> for AntimuonError {
                fn from(err: $error) -> Self {
                    AntimuonError::$variant(Box::new(err))
                }
            }
        )+
    };
}

impl_from_boxed! {
    ConfigError => Config,
    ProcessError => Process,
    SyncError => Sync,
    std::io::Error => Io,
}

// --- Config Errors ---

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A supplied value cannot be coerced to its expected type.
    #[error("invalid value '{value}' for '{key}': expected {expected}")]
    InvalidValue {
        key: String,
        value: String,
        expected: String,
    },

    /// A project name that is not in the registry.
    #[error("unknown project '{project}' (not in the project registry)")]
    MissingRegistryEntry { project: String },

    /// Missing required configuration key.
    #[error("missing required config key '{key}'")]
    MissingKey { key: String },

    /// Failed to parse a configuration source.
    #[error("failed to parse '{path}': {message}")]
    ParseError { path: String, message: String },
}

impl ConfigError {
    pub(crate) fn invalid(
        key: impl Into<String>,
        value: impl Into<String>,
        expected: impl Into<String>,
    ) -> Self {
        Self::InvalidValue {
            key: key.into(),
            value: value.into(),
            expected: expected.into(),
        }
    }
}

// --- Process Errors ---

/// Process execution errors.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// Executable not found in PATH.
    #[error("executable not found: '{name}' (not in PATH)")]
    ExecutableNotFound { name: String },

    /// Failed to spawn process.
    #[error("failed to spawn process '{command}': {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Process exited with non-zero status.
    #[error("process '{command}' exited with code {code}")]
    NonZeroExit { command: String, code: i32 },

    /// Failed to wait for or read from the process.
    #[error("failed to read output from process '{command}': {message}")]
    OutputError { command: String, message: String },
}

impl ProcessError {
    /// Exit code for [`ProcessError::NonZeroExit`].
    #[must_use]
    pub const fn exit_code(&self) -> Option<i32> {
        match self {
            Self::NonZeroExit { code, .. } => Some(*code),
            _ => None,
        }
    }
}

// --- Sync Errors ---

/// Synchronization pipeline errors.
///
/// Each variant names the step so the run can be repeated by hand once the
/// cause is fixed. Completed steps are not undone.
#[derive(Debug, Error)]
pub enum SyncError {
    /// A pipeline step failed.
    #[error("step '{step}' failed: {source}")]
    StepFailed {
        step: &'static str,
        #[source]
        source: ProcessError,
    },

    /// A per-project step failed.
    #[error("step '{step}' failed for project '{project}': {source}")]
    ProjectStepFailed {
        step: &'static str,
        project: String,
        #[source]
        source: ProcessError,
    },

    /// Writing a generated file failed.
    #[error("step '{step}' could not write '{path}': {source}")]
    WriteFailed {
        step: &'static str,
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl SyncError {
    /// Exit code of the failed process, if the step ran one.
    #[must_use]
    pub const fn exit_code(&self) -> Option<i32> {
        match self {
            Self::StepFailed { source, .. } | Self::ProjectStepFailed { source, .. } => {
                source.exit_code()
            }
            Self::WriteFailed { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests;
