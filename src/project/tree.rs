use super::module::{Module, ModuleId};
use crate::error::PatchError;
use std::collections::HashMap;
use std::path::PathBuf;

/// Arena of modules. The root always has id 0; parent links are plain ids
/// used for traversal only.
#[derive(Debug)]
pub struct ModuleTree {
    modules: Vec<Module>,
    /// Subprojects only; the root may share a name with one of them
    by_name: HashMap<String, ModuleId>,
}

impl ModuleTree {
    pub fn new(root_name: impl Into<String>, root_dir: impl Into<PathBuf>) -> Self {
        let root = Module::new(ModuleId::new(0), root_name, ":", None, root_dir.into());
        Self {
            modules: vec![root],
            by_name: HashMap::new(),
        }
    }

    pub fn root_id(&self) -> ModuleId {
        ModuleId::new(0)
    }

    pub fn root(&self) -> &Module {
        &self.modules[0]
    }

    /// Adds `name` below `parent`. Subproject names are unique because each
    /// one also names an output directory below the root's.
    pub fn add_subproject(
        &mut self,
        parent: ModuleId,
        name: &str,
        project_dir: impl Into<PathBuf>,
    ) -> Result<ModuleId, PatchError> {
        if name.is_empty() || name.contains(['/', '\\', ':']) || name == "." || name == ".." {
            return Err(PatchError::InvalidModuleName(name.to_string()));
        }
        if self.by_name.contains_key(name) {
            return Err(PatchError::DuplicateModule(name.to_string()));
        }

        let parent_path = self
            .get(parent)
            .ok_or_else(|| PatchError::UnknownModule(parent.to_string()))?
            .path();
        let path = if parent_path == ":" {
            format!(":{}", name)
        } else {
            format!("{}:{}", parent_path, name)
        };

        let id = ModuleId::new(self.modules.len());
        self.modules
            .push(Module::new(id, name, path, Some(parent), project_dir.into()));
        self.by_name.insert(name.to_string(), id);
        Ok(id)
    }

    pub fn get(&self, id: ModuleId) -> Option<&Module> {
        self.modules.get(id.index())
    }

    pub fn get_mut(&mut self, id: ModuleId) -> Option<&mut Module> {
        self.modules.get_mut(id.index())
    }

    pub fn module(&self, id: ModuleId) -> Result<&Module, PatchError> {
        self.get(id)
            .ok_or_else(|| PatchError::UnknownModule(id.to_string()))
    }

    pub fn module_mut(&mut self, id: ModuleId) -> Result<&mut Module, PatchError> {
        self.get_mut(id)
            .ok_or_else(|| PatchError::UnknownModule(id.to_string()))
    }

    /// Looks a module up by Gradle path (`:app`, `:`) or by subproject name
    /// (`app`). Bare names never resolve to the root.
    pub fn find(&self, name_or_path: &str) -> Option<ModuleId> {
        if name_or_path.starts_with(':') {
            self.modules
                .iter()
                .find(|m| m.path() == name_or_path)
                .map(Module::id)
        } else {
            self.by_name.get(name_or_path).copied()
        }
    }

    pub fn parent(&self, id: ModuleId) -> Option<&Module> {
        self.get(id)?.parent().and_then(|p| self.get(p))
    }

    /// Every module except the root, in insertion order
    pub fn subprojects(&self) -> impl Iterator<Item = &Module> {
        self.modules.iter().skip(1)
    }

    pub fn subproject_ids(&self) -> Vec<ModuleId> {
        self.subprojects().map(Module::id).collect()
    }

    pub fn ids(&self) -> Vec<ModuleId> {
        self.modules.iter().map(Module::id).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Module> {
        self.modules.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Module> {
        self.modules.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        // The root is always present.
        false
    }
}
