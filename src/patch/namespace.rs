use super::capability::PluginCapabilityDetector;
use super::PatchEvent;
use crate::project::Module;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NamespaceOutcome {
    Assigned(String),
    AlreadySet,
    Skipped,
}

/// Gives packaging modules without a namespace a fallback one: the module
/// group, or `<prefix>.<name>` with dashes turned into underscores.
#[derive(Debug, Clone)]
pub struct NamespacePatcher {
    prefix: String,
}

impl NamespacePatcher {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn fallback_namespace(&self, module: &Module) -> String {
        if !module.group().is_empty() {
            return module.group().to_string();
        }
        format!("{}.{}", self.prefix, module.name().replace('-', "_"))
    }

    pub fn patch(&self, module: &mut Module) -> NamespaceOutcome {
        if !PluginCapabilityDetector::has_packaging_capability(module) {
            return NamespaceOutcome::Skipped;
        }

        match module.extensions().packaging() {
            None => {
                debug!(
                    module = %module.name(),
                    "No library or application extension registered, skipping namespace"
                );
                return NamespaceOutcome::Skipped;
            }
            Some(packaging) if packaging.has_namespace() => return NamespaceOutcome::AlreadySet,
            Some(_) => {}
        }

        let fallback = self.fallback_namespace(module);
        if let Some(packaging) = module.extensions_mut().packaging_mut() {
            packaging.namespace = Some(fallback.clone());
        }

        info!(module = %module.name(), namespace = %fallback, "Assigned fallback namespace");
        module.record(PatchEvent::NamespaceAssigned {
            namespace: fallback.clone(),
        });
        NamespaceOutcome::Assigned(fallback)
    }
}
