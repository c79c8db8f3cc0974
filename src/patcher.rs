//! Whole-tree orchestration: relocate outputs, order evaluation, install the
//! per-module pipeline, evaluate, report.

use crate::config::PatcherConfig;
use crate::discovery::{GradleProjectLoader, LoadedProject};
use crate::error::PatchError;
use crate::fs::FileSystem;
use crate::lifecycle::EvaluationScheduler;
use crate::patch::{
    Capability, ModulePatcher, OutputDirectoryRelocator, PatchEvent, PluginCapabilityDetector,
};
use crate::project::{
    EvaluationState, Module, ModuleId, ModuleScript, ModuleTree, PluginId, Task, TaskKind,
    TaskType,
};
use serde::Serialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleReport {
    pub name: String,
    pub path: String,
    pub build_dir: PathBuf,
    pub state: EvaluationState,
    pub plugins: Vec<PluginId>,
    pub capabilities: Vec<Capability>,
    pub namespace: Option<String>,
    pub java_target: Option<String>,
    pub events: Vec<PatchEvent>,
}

impl ModuleReport {
    pub fn from_module(module: &Module) -> Self {
        let java_target = module
            .tasks()
            .of_type(TaskType::JavaCompile)
            .find_map(|task| match task.kind() {
                TaskKind::JavaCompile(options) => options.target_compatibility.clone(),
                _ => None,
            });

        Self {
            name: module.name().to_string(),
            path: module.path().to_string(),
            build_dir: module.build_dir().to_path_buf(),
            state: module.state(),
            plugins: module.plugins().iter().cloned().collect(),
            capabilities: PluginCapabilityDetector::capabilities(module),
            namespace: module.extensions().namespace().map(str::to_string),
            java_target,
            events: module.journal().to_vec(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PatchReport {
    pub output_base: PathBuf,
    pub modules: Vec<ModuleReport>,
}

impl PatchReport {
    pub fn from_tree(tree: &ModuleTree, output_base: PathBuf) -> Self {
        Self {
            output_base,
            modules: tree.iter().map(ModuleReport::from_module).collect(),
        }
    }

    pub fn module(&self, name: &str) -> Option<&ModuleReport> {
        self.modules.iter().find(|m| m.name == name)
    }

    pub fn change_count(&self) -> usize {
        self.modules.iter().map(|m| m.events.len()).sum()
    }
}

pub struct BuildPatcher {
    config: PatcherConfig,
    fs: Arc<dyn FileSystem>,
}

impl BuildPatcher {
    pub fn new(config: PatcherConfig, fs: Arc<dyn FileSystem>) -> Result<Self, PatchError> {
        config.validate()?;
        Ok(Self { config, fs })
    }

    pub fn with_defaults(fs: Arc<dyn FileSystem>) -> Self {
        Self {
            config: PatcherConfig::default(),
            fs,
        }
    }

    pub fn config(&self) -> &PatcherConfig {
        &self.config
    }

    /// Runs one configuration pass over `tree`. Stops at the first failing
    /// declaration or hook.
    pub fn run<S: ModuleScript>(
        &self,
        tree: &mut ModuleTree,
        scripts: &HashMap<ModuleId, S>,
    ) -> Result<PatchReport, PatchError> {
        let base_dir = OutputDirectoryRelocator::resolve_base_dir(
            tree.root().project_dir(),
            &self.config.output_base,
        );
        OutputDirectoryRelocator::new(base_dir.clone()).relocate(tree);
        register_clean_task(tree);

        let mut scheduler = EvaluationScheduler::new();
        self.order_after_anchor(&mut scheduler, tree)?;

        let pipeline = ModulePatcher::new(&self.config, Arc::clone(&self.fs));
        for id in tree.subproject_ids() {
            pipeline.install(&mut scheduler, tree, id)?;
        }

        scheduler.evaluate_all(tree, scripts)?;

        let report = PatchReport::from_tree(tree, base_dir);
        info!(
            modules = report.modules.len(),
            changes = report.change_count(),
            "Configuration pass complete"
        );
        Ok(report)
    }

    /// Loads the Gradle build rooted at `root_dir` and runs one pass over it.
    pub fn apply_project(&self, root_dir: &Path) -> Result<PatchReport, PatchError> {
        let LoadedProject { mut tree, scripts } =
            GradleProjectLoader::new(self.fs.as_ref()).load(root_dir)?;
        info!(
            root = %root_dir.display(),
            modules = tree.len(),
            "Loaded Gradle build"
        );
        self.run(&mut tree, &scripts)
    }

    fn order_after_anchor(
        &self,
        scheduler: &mut EvaluationScheduler,
        tree: &ModuleTree,
    ) -> Result<(), PatchError> {
        let Some(anchor_name) = &self.config.evaluation_anchor else {
            return Ok(());
        };
        let Some(anchor) = tree.find(anchor_name) else {
            warn!(anchor = %anchor_name, "Evaluation anchor not found, evaluating in tree order");
            return Ok(());
        };

        for id in tree.subproject_ids() {
            scheduler.evaluation_depends_on(tree, id, anchor)?;
        }
        Ok(())
    }
}

/// Evaluates declarations only, without installing any patches.
pub fn inspect<S: ModuleScript>(
    tree: &mut ModuleTree,
    scripts: &HashMap<ModuleId, S>,
) -> Result<PatchReport, PatchError> {
    let mut scheduler = EvaluationScheduler::new();
    scheduler.evaluate_all(tree, scripts)?;
    let output_base = tree.root().build_dir().to_path_buf();
    Ok(PatchReport::from_tree(tree, output_base))
}

/// Loads the Gradle build rooted at `root_dir` and evaluates its declarations.
pub fn inspect_project(fs: &dyn FileSystem, root_dir: &Path) -> Result<PatchReport, PatchError> {
    let LoadedProject { mut tree, scripts } = GradleProjectLoader::new(fs).load(root_dir)?;
    inspect(&mut tree, &scripts)
}

fn register_clean_task(tree: &mut ModuleTree) {
    let root_id = tree.root_id();
    let Some(root) = tree.get_mut(root_id) else {
        return;
    };
    let targets = vec![root.build_dir().to_path_buf()];
    if !root
        .tasks_mut()
        .register(Task::new("clean", TaskKind::Delete { targets }))
    {
        debug!("Root project already defines a clean task");
    }
}
