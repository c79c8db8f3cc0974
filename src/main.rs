use buildpatch::cli::commands::{CliArgs, Commands};
use buildpatch::cli::handlers::{handle_apply, handle_config, handle_inspect};
use buildpatch::util::logging::{init_logging, parse_level, LoggingConfig};
use buildpatch::VERSION;

use clap::Parser;
use tracing::{debug, Level};

fn main() {
    let args = CliArgs::parse();
    init_logging_from_args(&args);

    debug!("buildpatch v{} starting", VERSION);
    debug!("Arguments: {:?}", args);

    let exit_code = match &args.command {
        Commands::Apply(apply_args) => handle_apply(apply_args),
        Commands::Inspect(inspect_args) => handle_inspect(inspect_args),
        Commands::Config(config_args) => handle_config(config_args),
    };

    std::process::exit(exit_code);
}

fn init_logging_from_args(args: &CliArgs) {
    let mut config = LoggingConfig::from_env();

    if let Some(level_str) = &args.log_level {
        config.level = parse_level(level_str);
    } else if args.verbose {
        config.level = Level::DEBUG;
    } else if args.quiet {
        config.level = Level::ERROR;
    }

    init_logging(config);
}
