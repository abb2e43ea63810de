//! quiver-md - export a Quiver library to a directory of markdown files

pub mod cli;
pub mod domain;
pub mod export;
pub mod infra;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use cli::{
    Cli, Command,
    config::Config,
    handlers::{handle_check, handle_export},
};

/// Main entry point for the CLI application.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let verbose = cli.verbose > 0;

    match &cli.command {
        Command::Export(args) => {
            let config = Config::load(cli.config.as_deref())?;
            handle_export(args, &config, verbose)
        }
        Command::Check(args) => {
            let config = Config::load(cli.config.as_deref())?;
            handle_check(args, &config, verbose)
        }
        Command::Completions(args) => {
            clap_complete::generate(
                args.shell,
                &mut Cli::command(),
                "quiver-md",
                &mut std::io::stdout(),
            );
            Ok(())
        }
    }
}

/// Logs go to stderr. `RUST_LOG` overrides the `-v` level.
fn init_tracing(verbosity: u8) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
