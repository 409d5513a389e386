//! `symcrypt` command-line entry point.
//!
//! Startup sequence:
//! 1. Parse the command line.
//! 2. Load and validate [`config::Config`] from environment variables.
//! 3. Initialise structured JSON logging on stderr.
//! 4. Run the requested subcommand, mapping failures to exit codes.

mod cli;
mod commands;
mod config;
mod telemetry;

use std::io::{self, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use symcrypt::CryptoError;
use tracing::error;

use cli::{Cli, Commands};

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("ERROR: {e:#}");
            ExitCode::from(exit_code(&e))
        }
    }
}

fn run() -> Result<()> {
    // -----------------------------------------------------------------------
    // 1. Command line
    // -----------------------------------------------------------------------
    let cli = Cli::parse();

    // -----------------------------------------------------------------------
    // 2. Configuration
    // -----------------------------------------------------------------------
    let cfg = config::Config::from_env()?;

    // -----------------------------------------------------------------------
    // 3. Telemetry
    // -----------------------------------------------------------------------
    telemetry::init(&cfg.log_level)?;

    // -----------------------------------------------------------------------
    // 4. Command
    // -----------------------------------------------------------------------
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let result = dispatch(cli.command, &cfg, &mut out);
    let flushed = out.flush().context("failed to flush stdout");
    let result = result.and(flushed);

    if let Err(e) = &result {
        error!(error = %e, "command failed");
    }
    result
}

/// Run `command`. The key is loaded here, so a missing or bad key is reported
/// like any other command failure; `digest` never needs one.
fn dispatch(command: Commands, cfg: &config::Config, out: &mut impl Write) -> Result<()> {
    match command {
        Commands::EncryptFile { src, dst } => commands::encrypt_file(&cfg.load_key()?, &src, &dst),
        Commands::DecryptFile { src, dst } => commands::decrypt_file(&cfg.load_key()?, &src, &dst),
        Commands::EncryptString { text } => commands::encrypt_string(&cfg.load_key()?, &text, out),
        Commands::DecryptString { envelope } => {
            commands::decrypt_string(&cfg.load_key()?, &envelope, out)
        }
        Commands::Digest { path } => commands::digest(&path, out),
    }
}

/// Exit code for `err`: the [`CryptoError`] code when one is in the chain, else 1.
fn exit_code(err: &anyhow::Error) -> u8 {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<CryptoError>())
        .map_or(1, CryptoError::exit_code)
}
