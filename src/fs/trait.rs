//! FileSystem trait definition

use anyhow::Result;
use std::path::{Path, PathBuf};

/// Type of file system entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    File,
    Directory,
}

/// Abstraction over the file operations the patcher performs, so manifest
/// rewrites and project loading can run against an in-memory tree in tests.
pub trait FileSystem: Send + Sync {
    /// Check if path is a directory
    fn is_dir(&self, path: &Path) -> bool;

    /// Check if path is a file
    fn is_file(&self, path: &Path) -> bool;

    /// Read file contents as UTF-8 text
    fn read_to_string(&self, path: &Path) -> Result<String>;

    /// Replace the file contents with `contents`, creating the file if needed
    fn write_string(&self, path: &Path, contents: &str) -> Result<()>;

    /// Join paths
    fn join(&self, base: &Path, path: &str) -> PathBuf {
        base.join(path)
    }
}
