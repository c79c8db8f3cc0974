pub mod commands;
pub mod handlers;
pub mod output;

pub use commands::{ApplyArgs, CliArgs, Commands, ConfigArgs, InspectArgs, OutputFormatArg};
pub use handlers::{handle_apply, handle_config, handle_inspect};
pub use output::{OutputFormat, OutputFormatter};
