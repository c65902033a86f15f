use std::path::{Path, PathBuf};

use eyre::{Context, Result};

/// Trait for types that represent a generated file
pub trait GeneratedFile {
    /// Get the file path relative to the base directory
    fn path(&self, base: &Path) -> PathBuf;

    /// Render the file content
    fn render(&self) -> String;

    /// Write the file to disk, replacing any previous content
    fn write(&self, base: &Path) -> Result<WriteResult> {
        let path = self.path(base);
        let existed = path.exists();
        write_file(&path, &self.render())?;
        Ok(if existed {
            WriteResult::Replaced
        } else {
            WriteResult::Written
        })
    }
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .wrap_err_with(|| format!("failed to create directory '{}'", parent.display()))?;
    }
    std::fs::write(path, content)
        .wrap_err_with(|| format!("failed to write '{}'", path.display()))?;
    Ok(())
}

/// Recursively remove a directory. A missing directory is not an error.
///
/// Returns `true` when something was removed.
pub fn remove_dir_if_exists(dir: &Path) -> Result<bool> {
    if !dir.exists() {
        return Ok(false);
    }
    std::fs::remove_dir_all(dir)
        .wrap_err_with(|| format!("failed to remove '{}'", dir.display()))?;
    Ok(true)
}

/// Result of a write operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteResult {
    /// File did not exist and was created
    Written,
    /// File existed and its content was replaced
    Replaced,
}

/// A file to be generated at an absolute location
pub struct File {
    path: PathBuf,
    content: String,
}

impl File {
    /// Create a new file with the given path and content
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }

    /// Get the file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the file content
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Check if the file exists
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Write the file, creating parent directories as needed
    pub fn write(&self) -> Result<WriteResult> {
        let existed = self.exists();
        write_file(&self.path, &self.content)?;
        Ok(if existed {
            WriteResult::Replaced
        } else {
            WriteResult::Written
        })
    }
}
