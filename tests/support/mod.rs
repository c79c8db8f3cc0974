//! Shared helpers for integration tests

use filetime::FileTime;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use walkdir::WalkDir;

pub const FLUTTER_APP: &str = "flutter-app";

pub fn fixture_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Copies a fixture into a fresh temp dir so tests can mutate it.
/// Returns the temp dir guard and the canonical path of the copy.
pub fn copy_fixture(name: &str) -> (TempDir, PathBuf) {
    let temp = TempDir::new().expect("Failed to create temp dir");
    let source = fixture_path(name);
    let target = temp
        .path()
        .canonicalize()
        .expect("Failed to canonicalize temp dir")
        .join(name);

    for entry in WalkDir::new(&source) {
        let entry = entry.expect("Failed to walk fixture");
        let relative = entry
            .path()
            .strip_prefix(&source)
            .expect("Fixture entry outside fixture root");
        let destination = target.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&destination).expect("Failed to create fixture dir");
        } else {
            fs::copy(entry.path(), &destination).expect("Failed to copy fixture file");
        }
    }

    (temp, target)
}

/// Backdates a file so a later rewrite is visible as an mtime change.
#[allow(dead_code)]
pub fn backdate(path: &Path) -> FileTime {
    let past = FileTime::from_unix_time(1_000_000_000, 0);
    filetime::set_file_mtime(path, past).expect("Failed to set mtime");
    past
}

#[allow(dead_code)]
pub fn mtime(path: &Path) -> FileTime {
    let metadata = fs::metadata(path).expect("Failed to stat file");
    FileTime::from_last_modification_time(&metadata)
}

#[allow(dead_code)]
pub fn buildpatch_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_buildpatch"))
}
