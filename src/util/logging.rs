//! Structured logging setup for buildpatch
//!
//! Logs go to stderr so that `--format json` output on stdout stays parseable.
//! The level comes from, in order: explicit configuration, `BUILDPATCH_LOG_LEVEL`,
//! then `info`. When `RUST_LOG` is set it replaces the crate directive entirely.
//!
//! # Example
//!
//! ```no_run
//! use buildpatch::util::logging::{init_logging, LoggingConfig};
//!
//! init_logging(LoggingConfig::from_env());
//!
//! tracing::info!(module = "foo-bar", "Namespace assigned");
//! ```

use std::env;
use std::sync::Once;
use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub const LOG_LEVEL_ENV: &str = "BUILDPATCH_LOG_LEVEL";
pub const LOG_JSON_ENV: &str = "BUILDPATCH_LOG_JSON";

static INIT: Once = Once::new();

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Minimum level for `buildpatch` targets
    pub level: Level,

    /// One JSON object per event instead of the console format
    pub use_json: bool,

    /// Include the module target (e.g. buildpatch::patch::manifest) in logs
    pub include_target: bool,

    /// Include file and line number information
    pub include_location: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            use_json: false,
            include_target: true,
            include_location: false,
        }
    }
}

impl LoggingConfig {
    pub fn with_level(level: Level) -> Self {
        Self {
            level,
            ..Default::default()
        }
    }

    /// Reads `BUILDPATCH_LOG_LEVEL` and `BUILDPATCH_LOG_JSON`, falling back to defaults.
    pub fn from_env() -> Self {
        let level = env::var(LOG_LEVEL_ENV)
            .map(|value| parse_level(&value))
            .unwrap_or(Level::INFO);

        let use_json = env::var(LOG_JSON_ENV)
            .ok()
            .and_then(|v| v.parse::<bool>().ok())
            .unwrap_or(false);

        Self {
            level,
            use_json,
            ..Default::default()
        }
    }

    fn filter(&self) -> EnvFilter {
        if env::var("RUST_LOG").is_ok() {
            return EnvFilter::from_default_env();
        }

        let filter = EnvFilter::new("warn");
        match format!("buildpatch={}", self.level).parse() {
            Ok(directive) => filter.add_directive(directive),
            Err(_) => filter,
        }
    }
}

/// Parses a log level, case-insensitively. Unknown values fall back to `INFO`.
///
/// ```
/// use buildpatch::util::logging::parse_level;
/// use tracing::Level;
///
/// assert_eq!(parse_level("debug"), Level::DEBUG);
/// assert_eq!(parse_level("WARN"), Level::WARN);
/// assert_eq!(parse_level("loud"), Level::INFO);
/// ```
pub fn parse_level(level_str: &str) -> Level {
    match level_str.trim().to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => {
            eprintln!(
                "Invalid log level '{}', defaulting to INFO. Valid levels: trace, debug, info, warn, error",
                level_str
            );
            Level::INFO
        }
    }
}

/// Installs the global subscriber. Only the first call has any effect.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let filter = config.filter();

        if config.use_json {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .json()
                        .with_target(config.include_target)
                        .with_file(config.include_location)
                        .with_line_number(config.include_location)
                        .with_writer(std::io::stderr),
                )
                .init();
        } else {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .with_target(config.include_target)
                        .with_file(config.include_location)
                        .with_line_number(config.include_location)
                        .with_writer(std::io::stderr),
                )
                .init();
        }
    });
}
