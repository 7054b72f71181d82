//! The `check` command: parse templates without rendering them.

use blacksquid::Template;

use crate::cli::CheckArgs;
use crate::common::error::report;
use crate::common::input::read_input;
use crate::common::{CliError, CliResult};

/// Run the check command. Every file is checked even after a failure.
pub fn run(args: CheckArgs, no_color: bool) -> CliResult<bool> {
    let mut ok = true;
    for file in &args.files {
        if let Err(e) = check_file(file, args.quiet) {
            if !args.quiet {
                report(&e, no_color);
            }
            ok = false;
        }
    }
    Ok(ok)
}

/// Check a single file and print its placeholder keys, each once, in the
/// order they first appear.
fn check_file(path: &str, quiet: bool) -> CliResult<()> {
    let (content, name) = read_input(path)?;
    let template = Template::parse(&content).map_err(|error| CliError::Template {
        error,
        source_text: content.clone(),
        name: name.clone(),
    })?;

    if !quiet {
        let mut seen: Vec<&[u8]> = Vec::new();
        for key in template.keys() {
            if !seen.contains(&key) {
                seen.push(key);
            }
        }
        println!("{name}: OK");
        for key in seen {
            println!("  {}", String::from_utf8_lossy(key));
        }
    }
    Ok(())
}
