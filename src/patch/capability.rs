//! Plugin-derived capabilities of a module

use crate::project::plugins::{
    ANDROID_APPLICATION, ANDROID_LIBRARY, KOTLIN_ANDROID, KOTLIN_ANDROID_LEGACY,
};
use crate::project::{Module, PluginId};
use anyhow::Result;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    LibraryPackaging,
    ApplicationPackaging,
    KotlinAndroid,
}

impl Capability {
    pub const ALL: [Capability; 3] = [
        Capability::LibraryPackaging,
        Capability::ApplicationPackaging,
        Capability::KotlinAndroid,
    ];

    pub const PACKAGING: [Capability; 2] =
        [Capability::LibraryPackaging, Capability::ApplicationPackaging];

    /// Substrings that identify a plugin granting this capability. Matching
    /// on substrings lets relocated or re-published plugin ids through.
    pub fn markers(self) -> &'static [&'static str] {
        match self {
            Capability::LibraryPackaging => &[ANDROID_LIBRARY],
            Capability::ApplicationPackaging => &[ANDROID_APPLICATION],
            Capability::KotlinAndroid => &[KOTLIN_ANDROID, KOTLIN_ANDROID_LEGACY],
        }
    }

    pub fn matches(self, plugin_id: &str) -> bool {
        self.markers().iter().any(|marker| plugin_id.contains(marker))
    }

    pub fn is_packaging(self) -> bool {
        Self::PACKAGING.contains(&self)
    }
}

/// Answers capability questions against the plugins a module has right now.
/// Nothing is cached: plugins may still be applied after a first query.
pub struct PluginCapabilityDetector;

impl PluginCapabilityDetector {
    pub fn has_capability(module: &Module, capability: Capability) -> bool {
        module
            .plugins()
            .iter()
            .any(|plugin| capability.matches(plugin.as_str()))
    }

    pub fn has_packaging_capability(module: &Module) -> bool {
        Self::capabilities(module)
            .into_iter()
            .any(Capability::is_packaging)
    }

    pub fn capabilities(module: &Module) -> Vec<Capability> {
        Capability::ALL
            .into_iter()
            .filter(|c| Self::has_capability(module, *c))
            .collect()
    }

    /// Push-based variant: `listener` sees the id of every plugin applied
    /// from now on.
    pub fn on_plugin_added(
        module: &mut Module,
        listener: impl FnMut(&mut Module, &PluginId) -> Result<()> + 'static,
    ) {
        module.add_plugin_listener(listener);
    }

    /// Runs `action` once the module has `capability`: immediately if it
    /// already does, otherwise when the first matching plugin is applied.
    pub fn on_capability(
        module: &mut Module,
        capability: Capability,
        mut action: impl FnMut(&mut Module) -> Result<()> + 'static,
    ) -> Result<()> {
        if Self::has_capability(module, capability) {
            return action(module);
        }

        let mut fired = false;
        Self::on_plugin_added(module, move |m, plugin| {
            if fired || !capability.matches(plugin.as_str()) {
                return Ok(());
            }
            fired = true;
            action(m)
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::ModuleTree;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn with_module<R>(f: impl FnOnce(&mut Module) -> R) -> R {
        let mut tree = ModuleTree::new("root", "/repo");
        let root = tree.root_id();
        let id = tree.add_subproject(root, "lib", "/repo/lib").unwrap();
        f(tree.module_mut(id).unwrap())
    }

    #[test]
    fn test_marker_matching_is_substring_based() {
        assert!(Capability::LibraryPackaging.matches("com.android.library"));
        assert!(Capability::LibraryPackaging.matches("com.android.library.gradle.plugin"));
        assert!(!Capability::LibraryPackaging.matches("com.android.application"));
        assert!(Capability::KotlinAndroid.matches("kotlin-android"));
        assert!(Capability::KotlinAndroid.matches("org.jetbrains.kotlin.android"));
        assert!(!Capability::KotlinAndroid.matches("org.jetbrains.kotlin.jvm"));
        assert!(Capability::ApplicationPackaging.is_packaging());
        assert!(!Capability::KotlinAndroid.is_packaging());
    }

    #[test]
    fn test_query_reflects_plugins_applied_later() {
        with_module(|m| {
            assert!(!PluginCapabilityDetector::has_packaging_capability(m));
            m.apply_plugin(ANDROID_APPLICATION).unwrap();
            assert!(PluginCapabilityDetector::has_capability(
                m,
                Capability::ApplicationPackaging
            ));
            assert_eq!(
                PluginCapabilityDetector::capabilities(m),
                vec![Capability::ApplicationPackaging]
            );
        });
    }

    #[test]
    fn test_on_plugin_added_receives_each_plugin() {
        with_module(|m| {
            let seen = Rc::new(RefCell::new(Vec::new()));
            let sink = Rc::clone(&seen);
            PluginCapabilityDetector::on_plugin_added(m, move |_, id| {
                sink.borrow_mut().push(id.to_string());
                Ok(())
            });

            m.apply_plugin("com.android.library").unwrap();
            m.apply_plugin("kotlin-android").unwrap();

            assert_eq!(*seen.borrow(), vec!["com.android.library", "kotlin-android"]);
        });
    }

    #[test]
    fn test_on_capability_runs_now_when_present() {
        with_module(|m| {
            m.apply_plugin(KOTLIN_ANDROID).unwrap();
            let runs = Rc::new(RefCell::new(0));
            let counter = Rc::clone(&runs);
            PluginCapabilityDetector::on_capability(m, Capability::KotlinAndroid, move |_| {
                *counter.borrow_mut() += 1;
                Ok(())
            })
            .unwrap();

            assert_eq!(*runs.borrow(), 1);
            assert_eq!(m.plugins().listener_count(), 0);
        });
    }

    #[test]
    fn test_on_capability_waits_for_matching_plugin_once() {
        with_module(|m| {
            let runs = Rc::new(RefCell::new(0));
            let counter = Rc::clone(&runs);
            PluginCapabilityDetector::on_capability(m, Capability::KotlinAndroid, move |_| {
                *counter.borrow_mut() += 1;
                Ok(())
            })
            .unwrap();

            m.apply_plugin(ANDROID_LIBRARY).unwrap();
            assert_eq!(*runs.borrow(), 0);

            m.apply_plugin("kotlin-android").unwrap();
            m.apply_plugin(KOTLIN_ANDROID).unwrap();
            assert_eq!(*runs.borrow(), 1);
        });
    }
}
