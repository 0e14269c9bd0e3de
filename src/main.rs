//! slotdelta binary entry point

mod commands;

use std::process::ExitCode;

use clap::{CommandFactory, FromArgMatches};
use tracing_subscriber::EnvFilter;

use slotdelta::cli::{Cli, Commands};

/// Environment variable controlling log filtering
const LOG_ENV: &str = "SLOTDELTA_LOG";

/// Version string with build date and, for dev builds, the git commit.
fn long_version() -> &'static str {
    let version = match option_env!("VERGEN_GIT_SHA") {
        Some(sha) => format!(
            "{} ({}, built {})",
            env!("CARGO_PKG_VERSION"),
            sha,
            env!("SLOTDELTA_BUILD_DATE")
        ),
        None => format!(
            "{} (built {})",
            env!("CARGO_PKG_VERSION"),
            env!("SLOTDELTA_BUILD_DATE")
        ),
    };
    Box::leak(version.into_boxed_str())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn main() -> ExitCode {
    let matches = Cli::command().long_version(long_version()).get_matches();
    let cli = match Cli::from_arg_matches(&matches) {
        Ok(cli) => cli,
        Err(e) => e.exit(),
    };

    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Analyze(args) => commands::analyze::handle(&args),
        Commands::Config { action } => commands::config::handle(action),
        Commands::Completions { shell } => commands::completions::handle(shell),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
