//! `settings.gradle(.kts)` parsing

use super::{quoted_strings, strip_line_comment};
use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsFile {
    pub root_name: Option<String>,
    /// Included project paths, normalised to start with `:`
    pub includes: Vec<String>,
    /// `project(":x").projectDir` overrides, keyed by project path
    pub project_dirs: HashMap<String, String>,
}

fn root_name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r#"rootProject\.name\s*=\s*["']([^"']+)["']"#).expect("valid root name pattern")
    })
}

fn include_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^include\b\s*\(?(.*)$").expect("valid include pattern"))
}

fn project_dir_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            r#"project\(\s*["']([^"']+)["']\s*\)\.projectDir\s*=\s*(?:file|new\s+File)\s*\(\s*(?:[A-Za-z_][\w.]*\s*,\s*)?["']([^"']+)["']\s*\)"#,
        )
        .expect("valid projectDir pattern")
    })
}

pub fn normalize_project_path(path: &str) -> String {
    let trimmed = path.trim();
    if trimmed.starts_with(':') {
        trimmed.to_string()
    } else {
        format!(":{}", trimmed)
    }
}

pub fn parse_settings(content: &str) -> SettingsFile {
    let mut settings = SettingsFile::default();

    for line in content.lines() {
        let line = strip_line_comment(line);
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        if let Some(caps) = root_name_pattern().captures(trimmed) {
            settings.root_name = Some(caps[1].to_string());
            continue;
        }

        if let Some(caps) = project_dir_pattern().captures(trimmed) {
            settings
                .project_dirs
                .insert(normalize_project_path(&caps[1]), caps[2].to_string());
            continue;
        }

        if let Some(caps) = include_pattern().captures(trimmed) {
            for project in quoted_strings(&caps[1]) {
                let path = normalize_project_path(&project);
                if path != ":" && !settings.includes.contains(&path) {
                    settings.includes.push(path);
                }
            }
        }
    }

    settings
}
