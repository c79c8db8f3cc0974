use crate::project::ModuleTree;
use std::path::{Component, Path, PathBuf};
use tracing::debug;

/// Moves every module's build output under one shared base directory: the
/// root builds into the base itself, subprojects into `<base>/<name>`.
#[derive(Debug, Clone)]
pub struct OutputDirectoryRelocator {
    base_dir: PathBuf,
}

impl OutputDirectoryRelocator {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Resolves `output_base` against the root project's default build
    /// directory (`<root_dir>/build`), folding `.` and `..` lexically.
    pub fn resolve_base_dir(root_dir: &Path, output_base: &Path) -> PathBuf {
        if output_base.is_absolute() {
            return normalize_lexically(output_base);
        }
        normalize_lexically(&root_dir.join("build").join(output_base))
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn relocate(&self, tree: &mut ModuleTree) {
        for module in tree.iter_mut() {
            let build_dir = if module.is_root() {
                self.base_dir.clone()
            } else {
                self.base_dir.join(module.name())
            };
            debug!(module = %module.name(), build_dir = ?build_dir, "Relocated build directory");
            module.set_build_dir(build_dir);
        }
    }
}

pub(crate) fn normalize_lexically(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match normalized.components().next_back() {
                Some(Component::Normal(_)) => {
                    normalized.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => normalized.push(".."),
            },
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use yare::parameterized;

    fn tree() -> ModuleTree {
        let mut tree = ModuleTree::new("android", "/work/project/android");
        let root = tree.root_id();
        tree.add_subproject(root, "app", "/work/project/android/app")
            .unwrap();
        tree.add_subproject(root, "foo-bar", "/pub-cache/foo-bar/android")
            .unwrap();
        let feature = tree
            .add_subproject(root, "feature", "/work/project/android/feature")
            .unwrap();
        tree.add_subproject(feature, "login", "/work/project/android/feature/login")
            .unwrap();
        tree
    }

    #[parameterized(
        default_base = { "/work/project/android", "../../build", "/work/project/build" },
        dot_segments = { "/work/project/android", "./out/../shared", "/work/project/android/build/shared" },
        absolute = { "/work/project/android", "/tmp/out/./x", "/tmp/out/x" },
        above_root = { "/a", "../../../../b", "/b" },
    )]
    fn test_resolve_base_dir(root: &str, base: &str, expected: &str) {
        assert_eq!(
            OutputDirectoryRelocator::resolve_base_dir(Path::new(root), Path::new(base)),
            PathBuf::from(expected)
        );
    }

    #[test]
    fn test_normalize_keeps_leading_parent_of_relative_path() {
        assert_eq!(
            normalize_lexically(Path::new("../x/../y")),
            PathBuf::from("../y")
        );
    }

    #[test]
    fn test_relocate_assigns_root_and_subproject_dirs() {
        let mut tree = tree();
        OutputDirectoryRelocator::new("/work/project/build").relocate(&mut tree);

        assert_eq!(tree.root().build_dir(), Path::new("/work/project/build"));
        let foo = tree.find("foo-bar").unwrap();
        assert_eq!(
            tree.module(foo).unwrap().build_dir(),
            Path::new("/work/project/build/foo-bar")
        );
        let login = tree.find("login").unwrap();
        assert_eq!(
            tree.module(login).unwrap().build_dir(),
            Path::new("/work/project/build/login")
        );
    }

    #[test]
    fn test_relocated_dirs_are_distinct() {
        let mut tree = tree();
        OutputDirectoryRelocator::new("/out").relocate(&mut tree);

        let dirs: HashSet<_> = tree.iter().map(|m| m.build_dir().to_path_buf()).collect();
        assert_eq!(dirs.len(), tree.len());
    }

    #[test]
    fn test_relocate_is_idempotent() {
        let mut tree = tree();
        let relocator = OutputDirectoryRelocator::new("/out");
        relocator.relocate(&mut tree);
        let first: Vec<_> = tree.iter().map(|m| m.build_dir().to_path_buf()).collect();

        relocator.relocate(&mut tree);
        let second: Vec<_> = tree.iter().map(|m| m.build_dir().to_path_buf()).collect();

        assert_eq!(first, second);
        assert_eq!(relocator.base_dir(), Path::new("/out"));
    }
}
