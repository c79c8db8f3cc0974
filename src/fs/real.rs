use super::FileSystem;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

pub struct RealFileSystem;

impl RealFileSystem {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RealFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSystem for RealFileSystem {
    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        fs::read_to_string(path).context(format!("Failed to read file {:?}", path))
    }

    fn write_string(&self, path: &Path, contents: &str) -> Result<()> {
        fs::write(path, contents).context(format!("Failed to write file {:?}", path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn create_test_dir() -> TempDir {
        let dir = TempDir::new().unwrap();
        let base = dir.path();

        fs::create_dir(base.join("subdir")).unwrap();
        fs::File::create(base.join("test.txt"))
            .unwrap()
            .write_all(b"hello world")
            .unwrap();

        dir
    }

    #[test]
    fn test_is_dir_and_is_file() {
        let temp = create_test_dir();
        let fs = RealFileSystem::new();

        assert!(fs.is_dir(&temp.path().join("subdir")));
        assert!(!fs.is_dir(&temp.path().join("test.txt")));
        assert!(fs.is_file(&temp.path().join("test.txt")));
        assert!(!fs.is_file(temp.path()));
    }

    #[test]
    fn test_read_to_string() {
        let temp = create_test_dir();
        let fs = RealFileSystem::new();

        let content = fs.read_to_string(&temp.path().join("test.txt")).unwrap();
        assert_eq!(content, "hello world");
    }

    #[test]
    fn test_write_string_replaces_contents() {
        let temp = create_test_dir();
        let fs = RealFileSystem::new();
        let path = temp.path().join("test.txt");

        fs.write_string(&path, "rewritten").unwrap();
        assert_eq!(fs.read_to_string(&path).unwrap(), "rewritten");
    }

    #[test]
    fn test_read_missing_file_has_context() {
        let temp = create_test_dir();
        let fs = RealFileSystem::new();

        let err = fs
            .read_to_string(&temp.path().join("missing.xml"))
            .unwrap_err();
        assert!(err.to_string().contains("missing.xml"));
    }
}
