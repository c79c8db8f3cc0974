//! Output formatting for patch reports and configuration
//!
//! ```ignore
//! use buildpatch::cli::output::{OutputFormat, OutputFormatter};
//!
//! let formatter = OutputFormatter::new(OutputFormat::Json);
//! println!("{}", formatter.format_report(&report)?);
//! ```

use anyhow::{Context, Result};

use crate::config::PatcherConfig;
use crate::patch::{Capability, PatchEvent};
use crate::patcher::{ModuleReport, PatchReport};

const RULE: &str = "\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// JSON format (machine-readable)
    Json,
    /// YAML format
    Yaml,
    /// Human-readable formatted text
    Human,
}

pub struct OutputFormatter {
    format: OutputFormat,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats the result of `apply`
    pub fn format_report(&self, report: &PatchReport) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                serde_json::to_string_pretty(report).context("Failed to serialize report to JSON")
            }
            OutputFormat::Yaml => {
                serde_yaml::to_string(report).context("Failed to serialize report to YAML")
            }
            OutputFormat::Human => Ok(self.format_report_human(report, "Build Configuration Patched")),
        }
    }

    /// Formats the result of `inspect`
    pub fn format_inspection(&self, report: &PatchReport) -> Result<String> {
        match self.format {
            OutputFormat::Human => Ok(self.format_report_human(report, "Build Modules")),
            _ => self.format_report(report),
        }
    }

    pub fn format_config(&self, config: &PatcherConfig) -> Result<String> {
        let config_map = config.to_display_map();
        match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(&config_map)
                .context("Failed to serialize config to JSON"),
            OutputFormat::Yaml => {
                serde_yaml::to_string(&config_map).context("Failed to serialize config to YAML")
            }
            OutputFormat::Human => {
                let mut output = String::from("buildpatch Configuration\n");
                output.push_str(RULE);
                output.push_str("\n\n");
                for (key, value) in &config_map {
                    output.push_str(&format!("{:<18} {}\n", format!("{}:", key), value));
                }
                Ok(output)
            }
        }
    }

    fn format_report_human(&self, report: &PatchReport, title: &str) -> String {
        let mut output = format!("\u{2713} {}\n{}\n\n", title, RULE);
        output.push_str(&format!("Output base:  {}\n\n", report.output_base.display()));

        for module in &report.modules {
            format_module_human(&mut output, module);
        }

        let changes = report.change_count();
        output.push_str(&format!(
            "{} change{} across {} module{}\n",
            changes,
            if changes == 1 { "" } else { "s" },
            report.modules.len(),
            if report.modules.len() == 1 { "" } else { "s" },
        ));
        output
    }
}

fn format_module_human(output: &mut String, module: &ModuleReport) {
    output.push_str(&format!("{} ({})\n", module.path, module.name));
    output.push_str(&format!(
        "\u{251C}\u{2500} Output dir:   {}\n",
        module.build_dir.display()
    ));

    let plugins = if module.plugins.is_empty() {
        "(none)".to_string()
    } else {
        module
            .plugins
            .iter()
            .map(|p| p.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    };
    output.push_str(&format!("\u{251C}\u{2500} Plugins:      {}\n", plugins));

    if !module.capabilities.is_empty() {
        let capabilities = module
            .capabilities
            .iter()
            .map(|c| capability_label(*c))
            .collect::<Vec<_>>()
            .join(", ");
        output.push_str(&format!("\u{251C}\u{2500} Capabilities: {}\n", capabilities));
    }
    if let Some(namespace) = &module.namespace {
        output.push_str(&format!("\u{251C}\u{2500} Namespace:    {}\n", namespace));
    }
    if let Some(target) = &module.java_target {
        output.push_str(&format!("\u{251C}\u{2500} Java target:  {}\n", target));
    }

    if module.events.is_empty() {
        output.push_str("\u{2514}\u{2500} Changes:      (none)\n\n");
    } else {
        output.push_str("\u{2514}\u{2500} Changes:\n");
        for event in &module.events {
            output.push_str(&format!("   - {}\n", describe_event(event)));
        }
        output.push('\n');
    }
}

fn capability_label(capability: Capability) -> &'static str {
    match capability {
        Capability::LibraryPackaging => "library",
        Capability::ApplicationPackaging => "application",
        Capability::KotlinAndroid => "kotlin-android",
    }
}

fn describe_event(event: &PatchEvent) -> String {
    match event {
        PatchEvent::NamespaceAssigned { namespace } => format!("namespace set to {}", namespace),
        PatchEvent::ManifestRewritten { path } => {
            format!("package attribute removed from {}", path.display())
        }
        PatchEvent::CompilerTargetEnforced { target } => {
            format!("Java compile target pinned to {}", target)
        }
        PatchEvent::KotlinJvmTargetEnforced { target } => {
            format!("Kotlin jvmTarget pinned to {}", target)
        }
    }
}
