//! External editor integration

use crate::error::{DaybookError, Result};
use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::Command;
use tracing::debug;

/// Runs the user's editor on a file and waits for it to exit
pub struct ExternalEditor {
    command: String,
}

impl ExternalEditor {
    /// Create a new editor with the given command
    pub fn new(editor_command: String) -> Self {
        ExternalEditor {
            command: editor_command,
        }
    }

    /// Open a file in the editor and block until it exits
    pub fn edit_file(&self, file_path: &Path) -> Result<()> {
        let (program, args) = self.parse_command();

        // Add file path as final argument
        let mut all_args = args;
        all_args.push(file_path.to_string_lossy().to_string());

        debug!(%program, ?all_args, "launching editor");

        // On Windows, use cmd /c to ensure .bat and .cmd files are found
        #[cfg(windows)]
        let status = Command::new("cmd")
            .arg("/C")
            .arg(&program)
            .args(&all_args)
            .status();

        #[cfg(not(windows))]
        let status = Command::new(&program).args(&all_args).status();

        let status = status.map_err(|e| {
            DaybookError::Editor(format!("Failed to launch editor '{}': {}", program, e))
        })?;

        if !status.success() {
            return Err(DaybookError::Editor(format!(
                "Editor '{}' exited with {}",
                program, status
            )));
        }

        Ok(())
    }

    /// Edit `initial` in a scratch file and return the saved text.
    ///
    /// The scratch file is created exclusively with a random name and removed
    /// when this returns.
    pub fn edit_text(&self, initial: &str, label: &str) -> Result<String> {
        let mut scratch = tempfile::Builder::new()
            .prefix(&scratch_prefix(label))
            .suffix(".md")
            .tempfile()?;
        scratch.write_all(initial.as_bytes())?;
        scratch.flush()?;

        self.edit_file(scratch.path())?;
        Ok(fs::read_to_string(scratch.path())?)
    }

    /// Parse command into program and arguments
    fn parse_command(&self) -> (String, Vec<String>) {
        let parts: Vec<&str> = self.command.split_whitespace().collect();

        if parts.is_empty() {
            let fallback = if cfg!(windows) { "notepad" } else { "nano" };
            return (fallback.to_string(), vec![]);
        }

        let program = parts[0].to_string();
        let args = parts[1..].iter().map(|s| s.to_string()).collect();

        (program, args)
    }
}

/// `daybook-<label stem>-`, keeping only filename-safe characters
fn scratch_prefix(label: &str) -> String {
    let stem = label.strip_suffix(".md").unwrap_or(label);
    let safe: String = stem
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '-' { c } else { '_' })
        .collect();
    format!("daybook-{}-", safe)
}
