//! Declaration-phase scripts

use super::module::Module;
use super::plugins::PluginId;
use anyhow::Result;
use tracing::debug;

/// Declaration phase of one module: everything its build file declares
/// before the module is finalized.
pub trait ModuleScript {
    fn declare(&self, module: &mut Module) -> Result<()>;
}

impl<F> ModuleScript for F
where
    F: Fn(&mut Module) -> Result<()>,
{
    fn declare(&self, module: &mut Module) -> Result<()> {
        self(module)
    }
}

/// The parts of a Gradle build file the patcher cares about
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildScript {
    pub plugins: Vec<PluginId>,
    pub group: Option<String>,
    pub namespace: Option<String>,
}

impl BuildScript {
    pub fn with_plugins<I, P>(plugins: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PluginId>,
    {
        Self {
            plugins: plugins.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty() && self.group.is_none() && self.namespace.is_none()
    }
}

impl ModuleScript for BuildScript {
    fn declare(&self, module: &mut Module) -> Result<()> {
        if let Some(group) = &self.group {
            module.set_group(group.clone());
        }

        for plugin in &self.plugins {
            module.apply_plugin(plugin.clone())?;
        }

        if let Some(namespace) = &self.namespace {
            match module.extensions_mut().packaging_mut() {
                Some(packaging) => packaging.namespace = Some(namespace.clone()),
                None => debug!(
                    module = %module.name(),
                    namespace = %namespace,
                    "Namespace declared without an Android packaging plugin, ignoring"
                ),
            }
        }

        Ok(())
    }
}
