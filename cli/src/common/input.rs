//! File input.

use std::io::Read;

use crate::common::CliError;

/// Read a template from a file path, or from stdin when the path is `-`.
///
/// Also returns the name to show in error reports.
pub fn read_input(path: &str) -> Result<(String, String), CliError> {
    if is_stdin(path) {
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .map_err(|source| CliError::Input {
                name: "<stdin>".to_string(),
                source,
            })?;
        Ok((content, "<stdin>".to_string()))
    } else {
        let content = std::fs::read_to_string(path).map_err(|source| CliError::Input {
            name: path.to_string(),
            source,
        })?;
        Ok((content, path.to_string()))
    }
}

pub fn is_stdin(path: &str) -> bool {
    path == "-"
}
