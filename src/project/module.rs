use super::extensions::ExtensionContainer;
use super::plugins::{apply_builtin_effects, PluginContainer, PluginId};
use super::tasks::TaskContainer;
use crate::patch::PatchEvent;
use anyhow::Result;
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::trace;

/// Index of a module inside its [`ModuleTree`](super::ModuleTree)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ModuleId(usize);

impl ModuleId {
    pub(crate) fn new(index: usize) -> Self {
        Self(index)
    }

    pub(crate) fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EvaluationState {
    Pending,
    Complete,
}

#[derive(Debug)]
pub struct Module {
    id: ModuleId,
    name: String,
    path: String,
    parent: Option<ModuleId>,
    project_dir: PathBuf,
    group: String,
    build_dir: PathBuf,
    state: EvaluationState,
    plugins: PluginContainer,
    extensions: ExtensionContainer,
    tasks: TaskContainer,
    journal: Vec<PatchEvent>,
}

impl Module {
    pub(crate) fn new(
        id: ModuleId,
        name: impl Into<String>,
        path: impl Into<String>,
        parent: Option<ModuleId>,
        project_dir: PathBuf,
    ) -> Self {
        let build_dir = project_dir.join("build");
        Self {
            id,
            name: name.into(),
            path: path.into(),
            parent,
            project_dir,
            group: String::new(),
            build_dir,
            state: EvaluationState::Pending,
            plugins: PluginContainer::default(),
            extensions: ExtensionContainer::default(),
            tasks: TaskContainer::default(),
            journal: Vec::new(),
        }
    }

    pub fn id(&self) -> ModuleId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Gradle-style path: `:` for the root, `:a:b` below it
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn parent(&self) -> Option<ModuleId> {
        self.parent
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    pub fn project_dir(&self) -> &Path {
        &self.project_dir
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    pub fn set_group(&mut self, group: impl Into<String>) {
        self.group = group.into();
    }

    pub fn build_dir(&self) -> &Path {
        &self.build_dir
    }

    pub(crate) fn set_build_dir(&mut self, build_dir: PathBuf) {
        self.build_dir = build_dir;
    }

    pub fn state(&self) -> EvaluationState {
        self.state
    }

    pub fn is_complete(&self) -> bool {
        self.state == EvaluationState::Complete
    }

    /// Pending -> Complete. Returns false if the module was already complete.
    pub(crate) fn mark_complete(&mut self) -> bool {
        if self.is_complete() {
            return false;
        }
        self.state = EvaluationState::Complete;
        true
    }

    pub fn plugins(&self) -> &PluginContainer {
        &self.plugins
    }

    pub fn extensions(&self) -> &ExtensionContainer {
        &self.extensions
    }

    pub fn extensions_mut(&mut self) -> &mut ExtensionContainer {
        &mut self.extensions
    }

    pub fn tasks(&self) -> &TaskContainer {
        &self.tasks
    }

    pub fn tasks_mut(&mut self) -> &mut TaskContainer {
        &mut self.tasks
    }

    /// Applies a plugin and notifies plugin listeners. Applying a plugin that
    /// is already present does nothing and returns `Ok(false)`.
    ///
    /// A listener error stops notification of the remaining listeners and is
    /// returned to the caller; the plugin stays applied.
    pub fn apply_plugin(&mut self, id: impl Into<PluginId>) -> Result<bool> {
        let id = id.into();
        if !self.plugins.insert(id.clone()) {
            return Ok(false);
        }
        trace!(module = %self.name, plugin = %id, "Plugin applied");

        apply_builtin_effects(self, &id);

        let mut listeners = self.plugins.take_listeners();
        let mut result = Ok(true);
        for listener in listeners.iter_mut() {
            if let Err(e) = listener(self, &id) {
                result = Err(e);
                break;
            }
        }
        self.plugins.restore_listeners(listeners);
        result
    }

    pub fn add_plugin_listener(
        &mut self,
        listener: impl FnMut(&mut Module, &PluginId) -> Result<()> + 'static,
    ) {
        self.plugins.add_listener(Box::new(listener));
    }

    pub fn journal(&self) -> &[PatchEvent] {
        &self.journal
    }

    pub(crate) fn record(&mut self, event: PatchEvent) {
        self.journal.push(event);
    }
}
