//! Utility modules for buildpatch

pub mod logging;

pub use logging::{init_logging, parse_level, LoggingConfig};
