//! Loads a Gradle multi-project layout from disk into a [`ModuleTree`]

pub mod build_file;
pub mod settings;

pub use build_file::parse_build_file;
pub use settings::{parse_settings, SettingsFile};

use crate::error::PatchError;
use crate::fs::FileSystem;
use crate::patch::relocate::normalize_lexically;
use crate::project::{BuildScript, ModuleId, ModuleTree};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const SETTINGS_FILES: [&str; 2] = ["settings.gradle.kts", "settings.gradle"];
pub const BUILD_FILES: [&str; 2] = ["build.gradle.kts", "build.gradle"];

/// Drops a trailing `//` comment, ignoring `//` inside string literals.
pub(crate) fn strip_line_comment(line: &str) -> &str {
    let mut quote = None;
    let mut prev = '\0';
    for (idx, ch) in line.char_indices() {
        match (quote, ch) {
            (None, '"' | '\'') => quote = Some(ch),
            (Some(open), _) if ch == open && prev != '\\' => quote = None,
            (None, '/') if prev == '/' => return &line[..idx - 1],
            _ => {}
        }
        prev = ch;
    }
    line
}

/// Every single- or double-quoted literal in `text`, in order.
pub(crate) fn quoted_strings(text: &str) -> Vec<String> {
    let mut values = Vec::new();
    let mut current: Option<(char, String)> = None;
    for ch in text.chars() {
        match current.as_mut() {
            Some((open, value)) if ch == *open => {
                values.push(std::mem::take(value));
                current = None;
            }
            Some((_, value)) => value.push(ch),
            None if ch == '"' || ch == '\'' => current = Some((ch, String::new())),
            None => {}
        }
    }
    values
}

#[derive(Debug)]
pub struct LoadedProject {
    pub tree: ModuleTree,
    /// Declarations for every module that has a build file
    pub scripts: HashMap<ModuleId, BuildScript>,
}

pub struct GradleProjectLoader<'a> {
    fs: &'a dyn FileSystem,
}

impl<'a> GradleProjectLoader<'a> {
    pub fn new(fs: &'a dyn FileSystem) -> Self {
        Self { fs }
    }

    pub fn load(&self, root_dir: &Path) -> Result<LoadedProject, PatchError> {
        if !self.fs.is_dir(root_dir) {
            return Err(PatchError::ProjectNotFound(root_dir.to_path_buf()));
        }
        let settings_path = self
            .find_first(root_dir, &SETTINGS_FILES)
            .ok_or_else(|| PatchError::ProjectNotFound(root_dir.to_path_buf()))?;
        let content = self.read(&settings_path)?;
        let settings = parse_settings(&content);

        let root_name = settings.root_name.clone().unwrap_or_else(|| {
            root_dir
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| "root".to_string())
        });
        debug!(
            settings = %settings_path.display(),
            root = %root_name,
            includes = settings.includes.len(),
            "Parsed settings"
        );

        let mut tree = ModuleTree::new(root_name, root_dir);
        for include in &settings.includes {
            self.include(&mut tree, root_dir, &settings, include)?;
        }

        let mut scripts = HashMap::new();
        for id in tree.ids() {
            let project_dir = tree.module(id)?.project_dir().to_path_buf();
            if let Some(build_file) = self.find_first(&project_dir, &BUILD_FILES) {
                let script = parse_build_file(&self.read(&build_file)?);
                if script.is_empty() {
                    debug!(build_file = %build_file.display(), "Build file declares no plugins, group or namespace");
                } else {
                    debug!(
                        build_file = %build_file.display(),
                        plugins = script.plugins.len(),
                        "Parsed build file"
                    );
                }
                scripts.insert(id, script);
            }
        }

        Ok(LoadedProject { tree, scripts })
    }

    /// Adds every segment of a `:a:b` path that is not yet in the tree.
    fn include(
        &self,
        tree: &mut ModuleTree,
        root_dir: &Path,
        settings: &SettingsFile,
        project_path: &str,
    ) -> Result<ModuleId, PatchError> {
        let mut parent = tree.root_id();
        let mut current = String::new();

        for segment in project_path.split(':').filter(|s| !s.is_empty()) {
            current.push(':');
            current.push_str(segment);

            if let Some(existing) = tree.find(&current) {
                parent = existing;
                continue;
            }

            let project_dir = match settings.project_dirs.get(&current) {
                Some(dir) => normalize_lexically(&root_dir.join(dir)),
                None => tree.module(parent)?.project_dir().join(segment),
            };
            parent = tree.add_subproject(parent, segment, project_dir)?;
        }

        Ok(parent)
    }

    fn find_first(&self, dir: &Path, candidates: &[&str]) -> Option<PathBuf> {
        candidates
            .iter()
            .map(|name| dir.join(name))
            .find(|path| self.fs.is_file(path))
    }

    fn read(&self, path: &Path) -> Result<String, PatchError> {
        self.fs
            .read_to_string(path)
            .map_err(|source| PatchError::Settings {
                path: path.to_path_buf(),
                source,
            })
    }
}
