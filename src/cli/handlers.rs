//! Subcommand entry points. Each returns the process exit code.

use std::env;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, error, info};

use super::commands::{ApplyArgs, ConfigArgs, InspectArgs};
use super::output::OutputFormatter;
use crate::config::PatcherConfig;
use crate::fs::{FileSystem, RealFileSystem};
use crate::patcher::{inspect_project, BuildPatcher};

pub fn handle_apply(args: &ApplyArgs) -> i32 {
    info!("Starting configuration pass");

    let result = resolve_project_root(args.project_path.as_deref()).and_then(|root| {
        let fs: Arc<dyn FileSystem> = Arc::new(RealFileSystem);
        let patcher = BuildPatcher::new(PatcherConfig::default(), fs)?;
        let report = patcher.apply_project(&root)?;
        OutputFormatter::new(args.format.into()).format_report(&report)
    });

    emit(result)
}

pub fn handle_inspect(args: &InspectArgs) -> i32 {
    let result = resolve_project_root(args.project_path.as_deref()).and_then(|root| {
        let report = inspect_project(&RealFileSystem, &root)?;
        OutputFormatter::new(args.format.into()).format_inspection(&report)
    });

    emit(result)
}

pub fn handle_config(args: &ConfigArgs) -> i32 {
    let result = OutputFormatter::new(args.format.into()).format_config(&PatcherConfig::default());
    emit(result)
}

fn emit(result: Result<String>) -> i32 {
    match result {
        Ok(output) => {
            println!("{}", output);
            0
        }
        Err(e) => {
            error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            1
        }
    }
}

fn resolve_project_root(path: Option<&Path>) -> Result<PathBuf> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => env::current_dir().context("Failed to get current directory")?,
    };

    if !path.is_dir() {
        anyhow::bail!("Project path is not a directory: {}", path.display());
    }

    let root = path
        .canonicalize()
        .with_context(|| format!("Failed to canonicalize project path {}", path.display()))?;
    debug!("Project root: {}", root.display());
    Ok(root)
}
