//! Plugin identities and the per-module plugin container

use super::extensions::{AndroidExtension, KotlinOptions, PackagingExtension};
use super::module::Module;
use super::tasks::{Task, TaskKind};
use anyhow::Result;
use serde::Serialize;
use std::fmt;

pub const ANDROID_LIBRARY: &str = "com.android.library";
pub const ANDROID_APPLICATION: &str = "com.android.application";
pub const KOTLIN_ANDROID: &str = "org.jetbrains.kotlin.android";
pub const KOTLIN_ANDROID_LEGACY: &str = "kotlin-android";
pub const JAVA: &str = "java";
pub const JAVA_LIBRARY: &str = "java-library";

/// Identity of an applied plugin, e.g. `com.android.library`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct PluginId(String);

impl PluginId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PluginId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for PluginId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for PluginId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Called once for every plugin applied after the listener was registered.
pub type PluginListener = Box<dyn FnMut(&mut Module, &PluginId) -> Result<()>>;

#[derive(Default)]
pub struct PluginContainer {
    applied: Vec<PluginId>,
    listeners: Vec<PluginListener>,
}

impl PluginContainer {
    pub fn has_plugin(&self, id: &str) -> bool {
        self.applied.iter().any(|p| p.as_str() == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PluginId> {
        self.applied.iter()
    }

    pub fn len(&self) -> usize {
        self.applied.len()
    }

    pub fn is_empty(&self) -> bool {
        self.applied.is_empty()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Records `id`; returns false when it was already applied.
    pub(crate) fn insert(&mut self, id: PluginId) -> bool {
        if self.has_plugin(id.as_str()) {
            return false;
        }
        self.applied.push(id);
        true
    }

    pub(crate) fn add_listener(&mut self, listener: PluginListener) {
        self.listeners.push(listener);
    }

    pub(crate) fn take_listeners(&mut self) -> Vec<PluginListener> {
        std::mem::take(&mut self.listeners)
    }

    /// Puts dispatched listeners back ahead of any registered during dispatch.
    pub(crate) fn restore_listeners(&mut self, mut listeners: Vec<PluginListener>) {
        listeners.append(&mut self.listeners);
        self.listeners = listeners;
    }
}

impl fmt::Debug for PluginContainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PluginContainer")
            .field("applied", &self.applied)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

/// What the build engine itself does when a well-known plugin lands on a
/// module: create its extension and register its compile tasks.
pub(crate) fn apply_builtin_effects(module: &mut Module, id: &PluginId) {
    match id.as_str() {
        ANDROID_LIBRARY | ANDROID_APPLICATION => {
            let extensions = module.extensions_mut();
            if extensions.android.is_none() {
                let packaging = PackagingExtension::default();
                extensions.android = Some(if id.as_str() == ANDROID_LIBRARY {
                    AndroidExtension::Library(packaging)
                } else {
                    AndroidExtension::Application(packaging)
                });
            }
            for variant in ["Debug", "Release"] {
                module.tasks_mut().register(Task::new(
                    format!("compile{}JavaWithJavac", variant),
                    TaskKind::java_compile(),
                ));
            }
        }
        KOTLIN_ANDROID | KOTLIN_ANDROID_LEGACY => {
            module
                .extensions_mut()
                .kotlin
                .get_or_insert_with(KotlinOptions::default);
            for variant in ["Debug", "Release"] {
                module.tasks_mut().register(Task::new(
                    format!("compile{}Kotlin", variant),
                    TaskKind::kotlin_compile(),
                ));
            }
        }
        JAVA | JAVA_LIBRARY => {
            for name in ["compileJava", "compileTestJava"] {
                module
                    .tasks_mut()
                    .register(Task::new(name, TaskKind::java_compile()));
            }
        }
        _ => {}
    }
}
