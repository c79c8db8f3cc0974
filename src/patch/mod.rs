//! Per-module configuration fixes and the pipeline that applies them

pub mod capability;
pub mod compiler;
pub mod manifest;
pub mod namespace;
pub mod relocate;

pub use capability::{Capability, PluginCapabilityDetector};
pub use compiler::CompilerTargetEnforcer;
pub use manifest::{strip_package_attribute, ManifestOutcome, ManifestPatcher, MANIFEST_PATH};
pub use namespace::{NamespaceOutcome, NamespacePatcher};
pub use relocate::OutputDirectoryRelocator;

use crate::config::PatcherConfig;
use crate::error::PatchError;
use crate::fs::FileSystem;
use crate::lifecycle::EvaluationScheduler;
use crate::project::{Module, ModuleId, ModuleTree};
use anyhow::Result;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

/// A change the patcher made to a module
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PatchEvent {
    NamespaceAssigned { namespace: String },
    ManifestRewritten { path: PathBuf },
    CompilerTargetEnforced { target: String },
    KotlinJvmTargetEnforced { target: String },
}

/// The per-module pipeline: capability detection, then namespace, manifest
/// and compiler fixes. Every step is idempotent, so running the pipeline
/// again on a configured module changes nothing.
#[derive(Clone)]
pub struct ModulePatcher {
    namespace: NamespacePatcher,
    manifest: ManifestPatcher,
    compiler: CompilerTargetEnforcer,
}

impl ModulePatcher {
    pub fn new(config: &PatcherConfig, fs: Arc<dyn FileSystem>) -> Self {
        Self {
            namespace: NamespacePatcher::new(config.namespace_prefix.clone()),
            manifest: ManifestPatcher::new(fs),
            compiler: CompilerTargetEnforcer::new(config.compiler_target.clone()),
        }
    }

    pub fn patch(&self, module: &mut Module) -> Result<()> {
        if PluginCapabilityDetector::has_packaging_capability(module) {
            self.patch_packaging(module)?;
        } else {
            debug!(module = %module.name(), "No packaging plugin, skipping namespace and manifest");
        }
        self.compiler.apply(module)
    }

    fn patch_packaging(&self, module: &mut Module) -> Result<()> {
        self.namespace.patch(module);
        self.manifest.patch(module)?;
        Ok(())
    }

    /// Hooks the pipeline onto `id`'s completion. A packaging plugin applied
    /// after completion re-runs the packaging steps when it lands.
    pub fn install(
        &self,
        scheduler: &mut EvaluationScheduler,
        tree: &mut ModuleTree,
        id: ModuleId,
    ) -> Result<(), PatchError> {
        let late = self.clone();
        PluginCapabilityDetector::on_plugin_added(tree.module_mut(id)?, move |module, plugin| {
            let packaging = Capability::PACKAGING
                .iter()
                .any(|c| c.matches(plugin.as_str()));
            if packaging && module.is_complete() {
                debug!(module = %module.name(), plugin = %plugin, "Packaging plugin applied after evaluation");
                late.patch_packaging(module)?;
            }
            Ok(())
        });

        let patcher = self.clone();
        scheduler.on_configured(tree, id, move |module| patcher.patch(module))
    }
}
