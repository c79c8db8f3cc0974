//! The slice of the build engine the patcher talks to: a tree of modules,
//! each with plugins, extensions, tasks and an evaluation state.

pub mod extensions;
pub mod module;
pub mod plugins;
pub mod script;
pub mod tasks;
pub mod tree;

pub use extensions::{AndroidExtension, ExtensionContainer, KotlinOptions, PackagingExtension};
pub use module::{EvaluationState, Module, ModuleId};
pub use plugins::{PluginContainer, PluginId, PluginListener};
pub use script::{BuildScript, ModuleScript};
pub use tasks::{
    JavaCompileOptions, KotlinCompileOptions, Task, TaskContainer, TaskKind, TaskType,
};
pub use tree::ModuleTree;
