use crate::error::PatchError;
use crate::project::{Module, ModuleId, ModuleScript, ModuleTree};
use anyhow::Result;
use std::collections::{HashMap, VecDeque};
use tracing::{debug, trace};

pub type ConfiguredHook = Box<dyn FnOnce(&mut Module) -> Result<()>>;

/// Drives modules through declaration and completion.
///
/// Hooks registered with [`on_configured`](Self::on_configured) against a
/// pending module are queued and run in registration order when that module
/// completes. Hooks registered against a complete module run before the
/// registering call returns.
#[derive(Default)]
pub struct EvaluationScheduler {
    queues: HashMap<ModuleId, VecDeque<ConfiguredHook>>,
    dependencies: HashMap<ModuleId, Vec<ModuleId>>,
}

impl EvaluationScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_configured(
        &mut self,
        tree: &mut ModuleTree,
        id: ModuleId,
        hook: impl FnOnce(&mut Module) -> Result<()> + 'static,
    ) -> Result<(), PatchError> {
        let module = tree.module_mut(id)?;
        if module.is_complete() {
            trace!(module = %module.name(), "Module already configured, running hook now");
            return hook(&mut *module).map_err(|source| PatchError::Hook {
                module: module.name().to_string(),
                source,
            });
        }

        self.queues.entry(id).or_default().push_back(Box::new(hook));
        Ok(())
    }

    pub fn pending_hooks(&self, id: ModuleId) -> usize {
        self.queues.get(&id).map_or(0, VecDeque::len)
    }

    /// Makes `dependency` evaluate before `id`. Self-dependencies are ignored.
    pub fn evaluation_depends_on(
        &mut self,
        tree: &ModuleTree,
        id: ModuleId,
        dependency: ModuleId,
    ) -> Result<(), PatchError> {
        tree.module(id)?;
        tree.module(dependency)?;
        if id == dependency {
            return Ok(());
        }

        let deps = self.dependencies.entry(id).or_default();
        if !deps.contains(&dependency) {
            deps.push(dependency);
        }
        Ok(())
    }

    /// Finishes the declaration phase of `id` and drains its hooks.
    ///
    /// The first failing hook aborts the drain; hooks queued behind it are
    /// dropped and the error is returned. Completing a complete module is a
    /// no-op.
    pub fn complete(&mut self, tree: &mut ModuleTree, id: ModuleId) -> Result<(), PatchError> {
        let module = tree.module_mut(id)?;
        if !module.mark_complete() {
            return Ok(());
        }

        let hooks = self.queues.remove(&id).unwrap_or_default();
        debug!(module = %module.name(), hooks = hooks.len(), "Module evaluated");

        for hook in hooks {
            hook(&mut *module).map_err(|source| PatchError::Hook {
                module: module.name().to_string(),
                source,
            })?;
        }
        Ok(())
    }

    /// Evaluates `id` after its evaluation dependencies: runs its script, if
    /// any, then completes it.
    pub fn evaluate<S: ModuleScript>(
        &mut self,
        tree: &mut ModuleTree,
        id: ModuleId,
        scripts: &HashMap<ModuleId, S>,
    ) -> Result<(), PatchError> {
        let mut in_progress = Vec::new();
        self.evaluate_inner(tree, id, scripts, &mut in_progress)
    }

    /// Evaluates the root, then every subproject in tree order.
    pub fn evaluate_all<S: ModuleScript>(
        &mut self,
        tree: &mut ModuleTree,
        scripts: &HashMap<ModuleId, S>,
    ) -> Result<(), PatchError> {
        for id in tree.ids() {
            self.evaluate(tree, id, scripts)?;
        }
        Ok(())
    }

    fn evaluate_inner<S: ModuleScript>(
        &mut self,
        tree: &mut ModuleTree,
        id: ModuleId,
        scripts: &HashMap<ModuleId, S>,
        in_progress: &mut Vec<ModuleId>,
    ) -> Result<(), PatchError> {
        let module = tree.module(id)?;
        if module.is_complete() {
            return Ok(());
        }
        if in_progress.contains(&id) {
            return Err(PatchError::EvaluationCycle(module.path().to_string()));
        }

        in_progress.push(id);
        let dependencies = self.dependencies.get(&id).cloned().unwrap_or_default();
        for dependency in dependencies {
            self.evaluate_inner(tree, dependency, scripts, in_progress)?;
        }

        let module = tree.module_mut(id)?;
        if let Some(script) = scripts.get(&id) {
            trace!(module = %module.name(), "Running declaration phase");
            script
                .declare(module)
                .map_err(|source| PatchError::Declaration {
                    module: module.name().to_string(),
                    source,
                })?;
        }
        in_progress.pop();

        self.complete(tree, id)
    }
}
