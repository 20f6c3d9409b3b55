// antimuon-rs: Antimuon Build Tool
//
// SPDX-FileCopyrightText: 2026 Antimuon Developers
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point.
//!
//! ```text
//! cli::parse() --> Logging --> Command Dispatch
//!   Sync | Build | Args | Options | Projects | Version
//!                                     |
//!                     exit code of a failed tool, else 1
//! ```

use std::process::ExitCode;

use antimuon_rs::cli::config::ConfigArgs;
use antimuon_rs::cli::global::GlobalOptions;
use antimuon_rs::cli::{self, Command};
use antimuon_rs::cmd::build::{run_args_command, run_build_command};
use antimuon_rs::cmd::config::{run_options_command, run_projects_command};
use antimuon_rs::cmd::sync::run_sync_command;
use antimuon_rs::cmd::{load_config, load_manifest, resolve_config, root_dir};
use antimuon_rs::config::options::EnvOptions;
use antimuon_rs::error::{AntimuonError, Result};
use antimuon_rs::logging::{LOG_ENV, init_logging};

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = cli::parse();

    let log_config = cli.global.log_config(std::env::var(LOG_ENV).ok());
    let _log_guard = match init_logging(&log_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            return ExitCode::FAILURE;
        }
    };

    dispatch_command(&cli).await
}

async fn dispatch_command(cli: &cli::Cli) -> ExitCode {
    let global = &cli.global;
    let result = match &cli.command {
        Some(Command::Version) => {
            handle_version_command();
            Ok(())
        }
        Some(Command::Sync(args)) => match load_config(global, &args.config) {
            Ok(config) => run_sync_command(args, &config, global.dry).await,
            Err(e) => Err(e),
        },
        Some(Command::Build(args)) => match load_config(global, &args.config) {
            Ok(config) => run_build_command(args, &config, global.dry).await,
            Err(e) => Err(e),
        },
        Some(Command::Args(args)) => {
            load_config(global, &args.config).and_then(|config| run_args_command(args, &config))
        }
        Some(Command::Options(args)) => handle_options_command(global, args),
        Some(Command::Projects(args)) => {
            load_config(global, args).map(|config| run_projects_command(&config))
        }
        None => {
            eprintln!("No command specified. Use --help for usage information.");
            Err(anyhow::anyhow!("No command specified"))
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            exit_code(&e)
        }
    }
}

fn handle_version_command() {
    println!("{}", env!("CARGO_PKG_VERSION"));
}

fn handle_options_command(global: &GlobalOptions, args: &ConfigArgs) -> Result<()> {
    let root = root_dir(global)?;
    let manifest = load_manifest(global, &root)?;
    let sources = manifest.format_sources();
    let config = resolve_config(root, manifest, EnvOptions::from_process(), args)?;
    run_options_command(&config, &sources);
    Ok(())
}

/// Exit code of the failed external tool, else 1.
fn exit_code(err: &anyhow::Error) -> ExitCode {
    err.downcast_ref::<AntimuonError>()
        .and_then(AntimuonError::exit_code)
        .and_then(|code| u8::try_from(code).ok())
        .filter(|&code| code != 0)
        .map_or(ExitCode::FAILURE, ExitCode::from)
}
