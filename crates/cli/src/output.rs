//! Outbound reporting: step outputs and failure signal
//!
//! Outputs are printed as `name=value` lines and, under GitHub Actions,
//! appended to the file named by `GITHUB_OUTPUT`.

use anyhow::{Context, Result};
use colored::Colorize;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

const GITHUB_OUTPUT_ENV: &str = "GITHUB_OUTPUT";
const GITHUB_ACTIONS_ENV: &str = "GITHUB_ACTIONS";

/// Emit step outputs
pub fn write_outputs(outputs: &[(&'static str, String)]) -> Result<()> {
    for (name, value) in outputs {
        println!("{}={}", name, value);
    }

    if let Ok(path) = std::env::var(GITHUB_OUTPUT_ENV) {
        if !path.is_empty() {
            append_outputs(Path::new(&path), outputs)?;
        }
    }
    Ok(())
}

/// Append `name=value` lines to a GitHub output file
pub fn append_outputs(path: &Path, outputs: &[(&'static str, String)]) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open output file {}", path.display()))?;

    for (name, value) in outputs {
        writeln!(file, "{}={}", name, value)
            .with_context(|| format!("Failed to write output {}", name))?;
    }
    Ok(())
}

/// Report a failed run to the user
pub fn fail(message: &str) {
    let under_actions = std::env::var(GITHUB_ACTIONS_ENV).map(|v| v == "true").unwrap_or(false);
    if under_actions {
        println!("{}", workflow_error(message));
    }
    eprintln!("{} {}", "✗".red().bold(), message);
}

/// `::error::` workflow command with the message escaped
pub fn workflow_error(message: &str) -> String {
    let escaped = message
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A");
    format!("::error::{}", escaped)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_outputs_writes_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("output");
        std::fs::write(&path, "existing=1\n").unwrap();

        append_outputs(
            &path,
            &[
                ("retries", "2".to_string()),
                ("time-taken-seconds", "612.4".to_string()),
            ],
        )
        .unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "existing=1\nretries=2\ntime-taken-seconds=612.4\n");
    }

    #[test]
    fn test_workflow_error_escapes_newlines() {
        assert_eq!(
            workflow_error("line one\nline two 100%"),
            "::error::line one%0Aline two 100%25"
        );
    }
}
