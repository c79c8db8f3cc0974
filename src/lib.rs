//! buildpatch - idempotent configuration patcher for multi-module Gradle/Android builds
//!
//! A Gradle build is loaded into a [`ModuleTree`], every subproject gets a
//! [`ModulePatcher`] installed through the [`EvaluationScheduler`], and one
//! configuration pass then:
//!
//! - assigns a namespace to library and application modules that lack one
//! - strips the legacy `package` attribute from library manifests
//! - pins the Java and Kotlin compile target
//! - relocates every module's build output under a shared directory
//!
//! Every step is idempotent: a second pass over an already patched build
//! writes nothing.
//!
//! # Example
//!
//! ```no_run
//! use buildpatch::{BuildPatcher, RealFileSystem};
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! let patcher = BuildPatcher::with_defaults(Arc::new(RealFileSystem));
//! let report = patcher.apply_project(Path::new("android"))?;
//! println!("{} changes", report.change_count());
//! # Ok::<(), buildpatch::PatchError>(())
//! ```
//!
//! # Project Structure
//!
//! - [`project`]: module tree, plugins, extensions and tasks
//! - [`lifecycle`]: per-module evaluation and configured hooks
//! - [`patch`]: capability detection and the individual patch steps
//! - [`discovery`]: `settings.gradle` and build file loading
//! - [`patcher`]: whole-build orchestration and reporting

pub mod cli;
pub mod config;
pub mod discovery;
pub mod error;
pub mod fs;
pub mod lifecycle;
pub mod patch;
pub mod patcher;
pub mod project;
pub mod util;

pub use config::{ConfigError, PatcherConfig};
pub use discovery::{GradleProjectLoader, LoadedProject};
pub use error::PatchError;
pub use fs::{FileSystem, MockFileSystem, RealFileSystem};
pub use lifecycle::EvaluationScheduler;
pub use patch::{
    Capability, CompilerTargetEnforcer, ManifestPatcher, ModulePatcher, NamespacePatcher,
    OutputDirectoryRelocator, PatchEvent, PluginCapabilityDetector,
};
pub use patcher::{inspect, inspect_project, BuildPatcher, ModuleReport, PatchReport};
pub use project::{BuildScript, Module, ModuleId, ModuleScript, ModuleTree};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
