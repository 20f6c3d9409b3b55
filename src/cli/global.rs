// antimuon-rs: Antimuon Build Tool
//
// SPDX-FileCopyrightText: 2026 Antimuon Developers
// SPDX-License-Identifier: GPL-3.0-or-later

//! Global CLI options available for all commands.
//!
//! # Manifest Precedence
//!
//! ```text
//! --set KEY=VAL     <- Direct manifest override (can repeat)
//! --manifest FILE   <- Additional manifest files (can repeat)
//! <root>/antimuon.toml
//! built-in manifest
//!
//! --root DIR        <- Checkout root (ANTIMUON_ROOT, else the current dir)
//! --dry             <- Log commands and generated files instead
//! --log-level N     <- Console verbosity (0-6)
//! --file-log-level  <- File verbosity (overrides --log-level)
//! --log-json        <- JSON lines in the log file
//! ```

use clap::Args;
use std::path::PathBuf;

use crate::logging::{LogConfig, LogLevel};

/// Global options available for all commands.
#[derive(Debug, Clone, Default, Args)]
pub struct GlobalOptions {
    /// Path to additional TOML manifest file(s).
    /// Can be specified multiple times; later files win.
    #[arg(short = 'm', long = "manifest", value_name = "FILE", action = clap::ArgAction::Append)]
    pub manifests: Vec<PathBuf>,

    /// Checkout root containing `src/` and `vendor/depot_tools`.
    #[arg(short = 'r', long = "root", value_name = "DIR", env = "ANTIMUON_ROOT")]
    pub root: Option<PathBuf>,

    /// Sets a manifest value, such as 'projects.chrome.tag=68.0.3440.75'.
    /// Can be specified multiple times.
    #[arg(short = 's', long = "set", value_name = "OPTION", action = clap::ArgAction::Append)]
    pub options: Vec<String>,

    /// Logs external commands and generated files instead of running or
    /// writing them.
    #[arg(long)]
    pub dry: bool,

    /// Console log level (0=silent, 1=errors, 2=warnings, 3=info, 4=debug, 5=trace, 6=dump).
    #[arg(short = 'l', long = "log-level", value_name = "LEVEL", value_parser = clap::value_parser!(u8).range(0..=6)
    )]
    pub log_level: Option<u8>,

    /// File log level, overrides --log-level for the log file.
    #[arg(long = "file-log-level", value_name = "LEVEL", value_parser = clap::value_parser!(u8).range(0..=6)
    )]
    pub file_log_level: Option<u8>,

    /// Path to log file.
    #[arg(long = "log-file", value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Writes the log file as JSON lines.
    #[arg(long = "log-json", requires = "log_file")]
    pub log_json: bool,
}

impl GlobalOptions {
    /// Logging setup for these options. `console_filter` is an `EnvFilter`
    /// directive that replaces the console level when set.
    #[must_use]
    pub fn log_config(&self, console_filter: Option<String>) -> LogConfig {
        let console_level = self
            .log_level
            .and_then(LogLevel::from_u8)
            .unwrap_or(LogLevel::INFO);

        let file_level = self
            .file_log_level
            .and_then(LogLevel::from_u8)
            .unwrap_or(console_level);

        LogConfig::builder()
            .with_console_level(console_level)
            .with_file_level(file_level)
            .maybe_with_log_file(self.log_file.as_ref().map(|p| p.display().to_string()))
            .with_json_file(self.log_json)
            // Dump includes dependency crates; show which one logged.
            .with_show_target(console_level == LogLevel::DUMP)
            .maybe_with_console_filter(console_filter.filter(|v| !v.is_empty()))
            .build()
    }
}
