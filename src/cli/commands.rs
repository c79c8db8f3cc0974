use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Idempotent configuration patcher for multi-module Gradle/Android builds
#[derive(Parser, Debug)]
#[command(
    name = "buildpatch",
    about = "Idempotent configuration patcher for multi-module Gradle/Android builds",
    version,
    author,
    long_about = "buildpatch loads a Gradle multi-project layout, gives every library and \
                  application module a namespace, strips the legacy package attribute from \
                  library manifests, pins the Java/Kotlin compile target and relocates all \
                  build outputs under a shared directory."
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,

    #[arg(short = 'v', long, global = true, help = "Enable debug logging")]
    pub verbose: bool,

    #[arg(
        short = 'q',
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Quiet mode - suppress non-error output"
    )]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(
        about = "Patch the modules of a Gradle build",
        long_about = "Loads settings.gradle(.kts) and every module build file, then runs one \
                      configuration pass and rewrites manifests that still declare a package \
                      attribute. Running it twice changes nothing the second time.\n\n\
                      Examples:\n  \
                      buildpatch apply\n  \
                      buildpatch apply android/\n  \
                      buildpatch apply --format json"
    )]
    Apply(ApplyArgs),

    #[command(
        about = "Show modules, plugins and capabilities without patching",
        long_about = "Evaluates module declarations only. Nothing on disk is modified.\n\n\
                      Examples:\n  \
                      buildpatch inspect\n  \
                      buildpatch inspect android/ --format yaml"
    )]
    Inspect(InspectArgs),

    #[command(about = "Show the effective patcher settings")]
    Config(ConfigArgs),
}

#[derive(Parser, Debug, Clone)]
pub struct ApplyArgs {
    #[arg(
        value_name = "PATH",
        help = "Gradle root containing settings.gradle(.kts) (defaults to current directory)"
    )]
    pub project_path: Option<PathBuf>,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,
}

#[derive(Parser, Debug, Clone)]
pub struct InspectArgs {
    #[arg(
        value_name = "PATH",
        help = "Gradle root containing settings.gradle(.kts) (defaults to current directory)"
    )]
    pub project_path: Option<PathBuf>,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,
}

#[derive(Parser, Debug, Clone)]
pub struct ConfigArgs {
    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormatArg {
    Json,
    Yaml,
    Human,
}

impl From<OutputFormatArg> for super::output::OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Json => super::output::OutputFormat::Json,
            OutputFormatArg::Yaml => super::output::OutputFormat::Yaml,
            OutputFormatArg::Human => super::output::OutputFormat::Human,
        }
    }
}
