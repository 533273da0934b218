use crate::ports::outbound::OutputPresenter;
use crate::shared::error::AuditError;
use crate::shared::security::validate_not_symlink;
use crate::shared::Result;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// FileSystemWriter adapter writing the audit report to a file
pub struct FileSystemWriter {
    output_path: PathBuf,
}

impl FileSystemWriter {
    pub fn new(output_path: PathBuf) -> Self {
        Self { output_path }
    }

    fn write_error(&self, details: impl Into<String>) -> AuditError {
        AuditError::FileWriteError {
            path: self.output_path.clone(),
            details: details.into(),
        }
    }

    /// The parent directory must already exist; nothing is created.
    fn validate_parent_directory(&self) -> Result<()> {
        let Some(parent) = self.output_path.parent() else {
            return Ok(());
        };
        if parent == Path::new("") {
            return Ok(());
        }

        if !parent.is_dir() {
            return Err(self
                .write_error(format!(
                    "Parent directory does not exist: {}",
                    parent.display()
                ))
                .into());
        }
        Ok(())
    }

    /// An existing report is overwritten only if it is not a symlink.
    fn validate_output_target(&self) -> Result<()> {
        match fs::symlink_metadata(&self.output_path) {
            Ok(_) => validate_not_symlink(&self.output_path, "write")
                .map_err(|e| self.write_error(e.to_string()).into()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self
                .write_error(format!("Failed to read file metadata: {}", e))
                .into()),
        }
    }
}

impl OutputPresenter for FileSystemWriter {
    fn present(&self, content: &str) -> Result<()> {
        self.validate_parent_directory()?;
        self.validate_output_target()?;

        fs::write(&self.output_path, content).map_err(|e| self.write_error(e.to_string()))?;

        eprintln!("✅ Report written: {}", self.output_path.display());
        Ok(())
    }
}

/// StdoutPresenter adapter writing the audit report to stdout
pub struct StdoutPresenter;

impl StdoutPresenter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for StdoutPresenter {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputPresenter for StdoutPresenter {
    fn present(&self, content: &str) -> Result<()> {
        let mut stdout = io::stdout().lock();
        stdout
            .write_all(content.as_bytes())
            .and_then(|_| stdout.flush())
            .map_err(|e| anyhow::anyhow!("Failed to write to stdout: {}", e))?;
        Ok(())
    }
}
