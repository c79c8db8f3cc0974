use super::{FileSystem, FileType};
use anyhow::{anyhow, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

#[derive(Debug, Clone)]
pub struct MockEntry {
    pub content: Option<String>,
    pub file_type: FileType,
}

/// In-memory file system that records every write, so tests can assert that
/// an idempotent patch left a file untouched.
pub struct MockFileSystem {
    files: RwLock<HashMap<PathBuf, MockEntry>>,
    writes: RwLock<Vec<PathBuf>>,
    root: PathBuf,
}

impl MockFileSystem {
    pub fn new() -> Self {
        Self::with_root(PathBuf::from("/mock"))
    }

    pub fn with_root(root: PathBuf) -> Self {
        Self {
            files: RwLock::new(HashMap::new()),
            writes: RwLock::new(Vec::new()),
            root,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn add_file(&self, path: impl AsRef<Path>, content: &str) {
        let path = self.normalize_path(path.as_ref());
        let mut files = self.files.write().unwrap();

        if let Some(parent) = path.parent() {
            Self::ensure_parents(&mut files, parent);
        }

        files.insert(
            path,
            MockEntry {
                content: Some(content.to_string()),
                file_type: FileType::File,
            },
        );
    }

    pub fn add_dir(&self, path: impl AsRef<Path>) {
        let path = self.normalize_path(path.as_ref());
        let mut files = self.files.write().unwrap();

        Self::ensure_parents(&mut files, &path);
    }

    /// Paths passed to `write_string`, in call order
    pub fn writes(&self) -> Vec<PathBuf> {
        self.writes.read().unwrap().clone()
    }

    pub fn write_count(&self, path: impl AsRef<Path>) -> usize {
        let path = self.normalize_path(path.as_ref());
        self.writes
            .read()
            .unwrap()
            .iter()
            .filter(|p| **p == path)
            .count()
    }

    fn normalize_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    fn ensure_parents(files: &mut HashMap<PathBuf, MockEntry>, path: &Path) {
        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            files.entry(current.clone()).or_insert(MockEntry {
                content: None,
                file_type: FileType::Directory,
            });
        }
    }

    fn entry_type(&self, path: &Path) -> Option<FileType> {
        let path = self.normalize_path(path);
        self.files.read().unwrap().get(&path).map(|e| e.file_type)
    }
}

impl Default for MockFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSystem for MockFileSystem {
    fn is_dir(&self, path: &Path) -> bool {
        self.entry_type(path) == Some(FileType::Directory)
    }

    fn is_file(&self, path: &Path) -> bool {
        self.entry_type(path) == Some(FileType::File)
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        let path = self.normalize_path(path);
        let files = self.files.read().unwrap();
        let entry = files
            .get(&path)
            .ok_or_else(|| anyhow!("File not found: {:?}", path))?;

        entry
            .content
            .clone()
            .ok_or_else(|| anyhow!("Not a file: {:?}", path))
    }

    fn write_string(&self, path: &Path, contents: &str) -> Result<()> {
        let normalized = self.normalize_path(path);
        if self.is_dir(&normalized) {
            return Err(anyhow!("Not a file: {:?}", normalized));
        }

        self.add_file(&normalized, contents);
        self.writes.write().unwrap().push(normalized);
        Ok(())
    }
}
