//! Blacksquid CLI - render `{{name}}` templates from the command line.

use std::process::ExitCode;

use blacksquid_cli::cli::{Cli, Command};
use blacksquid_cli::{commands, common};
use clap::Parser;

fn main() -> ExitCode {
    use tracing_subscriber::{EnvFilter, fmt};

    // RUST_LOG controls the level; WARN when unset.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .compact()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Command::Render(args) => commands::render::run(args).map(|()| true),
        Command::Check(args) => commands::check::run(args, cli.no_color),
    };

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => common::error::render_and_exit(e, cli.no_color),
    }
}
