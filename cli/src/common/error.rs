//! Error handling for the CLI.

use blacksquid::{Error, RenderConfig, render_error_to};
use thiserror::Error;

/// Result type for CLI commands.
pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("{name}: {source}")]
    Input {
        name: String,
        source: std::io::Error,
    },

    #[error("invalid value for --{flag} `{text}`: {reason}")]
    Binding {
        flag: &'static str,
        text: String,
        reason: String,
    },

    /// A template error, drawn against the template text.
    #[error("{error}")]
    Template {
        error: Error,
        source_text: String,
        name: String,
    },

    #[error("writing output: {0}")]
    Output(#[from] std::io::Error),
}

/// Report an error to stderr and exit with code 1.
pub fn render_and_exit(error: CliError, no_color: bool) -> ! {
    report(&error, no_color);
    std::process::exit(1);
}

/// Report an error to stderr.
pub fn report(error: &CliError, no_color: bool) {
    match error {
        CliError::Template {
            error,
            source_text,
            name,
        } => {
            let config = RenderConfig {
                color: !no_color,
                filename: Some(name),
                ..Default::default()
            };
            render_error_to(error, source_text, &mut std::io::stderr(), &config).ok();
        }
        other => eprintln!("error: {other}"),
    }
}
