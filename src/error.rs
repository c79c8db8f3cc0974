use crate::config::ConfigError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by module tree construction, evaluation and patching.
///
/// Missing manifests and unrecognised extension shapes are not errors; the
/// patchers skip them. Everything here aborts the current configuration pass.
#[derive(Debug, Error)]
pub enum PatchError {
    #[error("Unknown module: {0}")]
    UnknownModule(String),

    #[error("Module '{0}' is already part of the tree")]
    DuplicateModule(String),

    #[error("Invalid module name '{0}': names must be non-empty and free of path separators")]
    InvalidModuleName(String),

    #[error("Configuration of module '{module}' failed: {source:#}")]
    Hook {
        module: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("Declaration phase of module '{module}' failed: {source:#}")]
    Declaration {
        module: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("Evaluation cycle detected at module '{0}'")]
    EvaluationCycle(String),

    #[error("Failed to patch manifest {path:?}: {source:#}")]
    Manifest {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("No Gradle settings file found in {0:?}")]
    ProjectNotFound(PathBuf),

    #[error("Failed to load {path:?}: {source:#}")]
    Settings {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    #[test]
    fn test_hook_error_names_module_and_cause() {
        let err = PatchError::Hook {
            module: "foo-bar".to_string(),
            source: anyhow!("boom"),
        };
        let message = err.to_string();
        assert!(message.contains("foo-bar"));
        assert!(message.contains("boom"));
    }

    #[test]
    fn test_config_error_is_transparent() {
        let err: PatchError = ConfigError::ValidationFailed("bad target".to_string()).into();
        assert_eq!(
            err.to_string(),
            "Configuration validation failed: bad target"
        );
    }
}
