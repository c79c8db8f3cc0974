use super::capability::{Capability, PluginCapabilityDetector};
use super::PatchEvent;
use crate::project::{KotlinOptions, Module, TaskKind, TaskType};
use anyhow::Result;
use tracing::debug;

/// Forces one language level on every compile task of a module, including
/// tasks registered after [`apply`](Self::apply) runs.
#[derive(Debug, Clone)]
pub struct CompilerTargetEnforcer {
    target: String,
}

impl CompilerTargetEnforcer {
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
        }
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn apply(&self, module: &mut Module) -> Result<()> {
        let enforced = PatchEvent::CompilerTargetEnforced {
            target: self.target.clone(),
        };
        if module.journal().contains(&enforced) {
            return Ok(());
        }

        let target = self.target.clone();
        module
            .tasks_mut()
            .configure_each(TaskType::JavaCompile, move |task| {
                if let TaskKind::JavaCompile(options) = task.kind_mut() {
                    options.source_compatibility = Some(target.clone());
                    options.target_compatibility = Some(target.clone());
                }
            });

        let target = self.target.clone();
        module
            .tasks_mut()
            .configure_each(TaskType::KotlinCompile, move |task| {
                if let TaskKind::KotlinCompile(options) = task.kind_mut() {
                    options.jvm_target = Some(target.clone());
                }
            });

        debug!(
            module = %module.name(),
            target = %self.target,
            rules = module.tasks().rule_count(),
            "Compiler target enforced"
        );
        module.record(enforced);

        let target = self.target.clone();
        PluginCapabilityDetector::on_capability(module, Capability::KotlinAndroid, move |m| {
            m.extensions_mut()
                .kotlin
                .get_or_insert_with(KotlinOptions::default)
                .jvm_target = Some(target.clone());
            m.record(PatchEvent::KotlinJvmTargetEnforced {
                target: target.clone(),
            });
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::plugins::{ANDROID_LIBRARY, JAVA, KOTLIN_ANDROID};
    use crate::project::{ModuleId, ModuleTree, Task};

    fn tree() -> (ModuleTree, ModuleId) {
        let mut tree = ModuleTree::new("root", "/repo");
        let root = tree.root_id();
        let id = tree.add_subproject(root, "lib", "/repo/lib").unwrap();
        (tree, id)
    }

    fn java_targets(module: &Module) -> Vec<(Option<String>, Option<String>)> {
        module
            .tasks()
            .iter()
            .filter_map(|t| match t.kind() {
                TaskKind::JavaCompile(o) => Some((
                    o.source_compatibility.clone(),
                    o.target_compatibility.clone(),
                )),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_existing_java_tasks_are_updated() {
        let (mut tree, id) = tree();
        let module = tree.module_mut(id).unwrap();
        module.apply_plugin(JAVA).unwrap();

        CompilerTargetEnforcer::new("17").apply(module).unwrap();

        let targets = java_targets(module);
        assert_eq!(targets.len(), 2);
        for (source, target) in targets {
            assert_eq!(source.as_deref(), Some("17"));
            assert_eq!(target.as_deref(), Some("17"));
        }
    }

    #[test]
    fn test_future_java_tasks_are_updated() {
        let (mut tree, id) = tree();
        let module = tree.module_mut(id).unwrap();

        CompilerTargetEnforcer::new("17").apply(module).unwrap();
        module.apply_plugin(ANDROID_LIBRARY).unwrap();
        module
            .tasks_mut()
            .register(Task::new("compileGenerated", TaskKind::java_compile()));

        let targets = java_targets(module);
        assert_eq!(targets.len(), 3);
        assert!(targets
            .iter()
            .all(|(s, t)| s.as_deref() == Some("17") && t.as_deref() == Some("17")));
    }

    #[test]
    fn test_kotlin_target_follows_late_plugin() {
        let (mut tree, id) = tree();
        let module = tree.module_mut(id).unwrap();

        CompilerTargetEnforcer::new("17").apply(module).unwrap();
        assert!(module.extensions().kotlin.is_none());

        module.apply_plugin(KOTLIN_ANDROID).unwrap();

        assert_eq!(
            module
                .extensions()
                .kotlin
                .as_ref()
                .and_then(|k| k.jvm_target.as_deref()),
            Some("17")
        );
        let kotlin_targets: Vec<_> = module
            .tasks()
            .of_type(TaskType::KotlinCompile)
            .map(|t| match t.kind() {
                TaskKind::KotlinCompile(o) => o.jvm_target.clone(),
                _ => None,
            })
            .collect();
        assert_eq!(kotlin_targets.len(), 2);
        assert!(kotlin_targets.iter().all(|t| t.as_deref() == Some("17")));
    }

    #[test]
    fn test_reapplying_is_noop() {
        let (mut tree, id) = tree();
        let module = tree.module_mut(id).unwrap();
        module.apply_plugin(KOTLIN_ANDROID).unwrap();
        let enforcer = CompilerTargetEnforcer::new("17");

        enforcer.apply(module).unwrap();
        let rules = module.tasks().rule_count();
        enforcer.apply(module).unwrap();

        assert_eq!(module.tasks().rule_count(), rules);
        assert_eq!(
            module.journal(),
            &[
                PatchEvent::CompilerTargetEnforced {
                    target: "17".to_string()
                },
                PatchEvent::KotlinJvmTargetEnforced {
                    target: "17".to_string()
                },
            ]
        );
    }
}
