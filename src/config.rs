use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;
use thiserror::Error;

/// Language level forced on every Java compile task and the Kotlin jvm target.
pub const DEFAULT_COMPILER_TARGET: &str = "17";
/// Prefix for namespaces synthesised from a module name.
pub const DEFAULT_NAMESPACE_PREFIX: &str = "com.grammatica.generated";
/// Shared output base, relative to the root project's default build directory.
pub const DEFAULT_OUTPUT_BASE: &str = "../../build";
/// Subproject whose evaluation every other subproject waits for.
pub const DEFAULT_EVALUATION_ANCHOR: &str = "app";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),
}

/// Fixed knobs of a patch run. `Default` yields the built-in constants; the
/// struct exists so tests and embedders can vary them, not as a user surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PatcherConfig {
    pub compiler_target: String,
    pub namespace_prefix: String,
    pub output_base: PathBuf,
    pub evaluation_anchor: Option<String>,
}

impl Default for PatcherConfig {
    fn default() -> Self {
        Self {
            compiler_target: DEFAULT_COMPILER_TARGET.to_string(),
            namespace_prefix: DEFAULT_NAMESPACE_PREFIX.to_string(),
            output_base: PathBuf::from(DEFAULT_OUTPUT_BASE),
            evaluation_anchor: Some(DEFAULT_EVALUATION_ANCHOR.to_string()),
        }
    }
}

impl PatcherConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !is_language_level(&self.compiler_target) {
            return Err(ConfigError::ValidationFailed(format!(
                "Invalid compiler target: '{}'. Expected a Java language level such as 17 or 1.8",
                self.compiler_target
            )));
        }

        if !is_qualified_identifier(&self.namespace_prefix) {
            return Err(ConfigError::ValidationFailed(format!(
                "Invalid namespace prefix: '{}'. Expected dot-separated identifiers",
                self.namespace_prefix
            )));
        }

        if self.output_base.as_os_str().is_empty() {
            return Err(ConfigError::ValidationFailed(
                "Output base cannot be empty".to_string(),
            ));
        }

        if let Some(anchor) = &self.evaluation_anchor {
            if anchor.trim_start_matches(':').is_empty() {
                return Err(ConfigError::ValidationFailed(
                    "Evaluation anchor cannot be empty".to_string(),
                ));
            }
        }

        Ok(())
    }

    pub fn to_display_map(&self) -> BTreeMap<String, String> {
        let mut map = BTreeMap::new();
        map.insert("compiler_target".to_string(), self.compiler_target.clone());
        map.insert(
            "namespace_prefix".to_string(),
            self.namespace_prefix.clone(),
        );
        map.insert(
            "output_base".to_string(),
            self.output_base.display().to_string(),
        );
        map.insert(
            "evaluation_anchor".to_string(),
            self.evaluation_anchor
                .clone()
                .unwrap_or_else(|| "none".to_string()),
        );
        map
    }
}

fn is_language_level(value: &str) -> bool {
    let digits = value.strip_prefix("1.").unwrap_or(value);
    !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
}

fn is_qualified_identifier(value: &str) -> bool {
    !value.is_empty()
        && value.split('.').all(|segment| {
            let mut chars = segment.chars();
            matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        })
}
