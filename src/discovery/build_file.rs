//! `build.gradle(.kts)` parsing into a [`BuildScript`]

use super::strip_line_comment;
use crate::project::plugins::KOTLIN_ANDROID;
use crate::project::{BuildScript, PluginId};
use regex::Regex;
use std::sync::OnceLock;

fn plugin_patterns() -> &'static [Regex] {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        [
            r#"\bid\s*\(?\s*["']([^"']+)["']"#,
            r#"\bapply\s+plugin\s*:\s*["']([^"']+)["']"#,
            r#"\bapply\s*\(\s*plugin\s*=\s*["']([^"']+)["']"#,
        ]
        .iter()
        .map(|p| Regex::new(p).expect("valid plugin pattern"))
        .collect()
    })
}

fn kotlin_android_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r#"\bkotlin\s*\(\s*["']android["']\s*\)"#).expect("valid kotlin pattern")
    })
}

fn property_pattern(name: &str) -> Regex {
    Regex::new(&format!(r#"^{}\s*=?\s*["']([^"']*)["']"#, name)).expect("valid property pattern")
}

fn group_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| property_pattern("group"))
}

fn namespace_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| property_pattern("namespace"))
}

pub fn parse_build_file(content: &str) -> BuildScript {
    let mut script = BuildScript::default();

    for line in content.lines() {
        let line = strip_line_comment(line);
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        // `id("x") version "1.0" apply false` only puts x on the classpath.
        if !trimmed.contains("apply false") {
            for pattern in plugin_patterns() {
                for caps in pattern.captures_iter(trimmed) {
                    push_plugin(&mut script, PluginId::new(&caps[1]));
                }
            }
            if kotlin_android_pattern().is_match(trimmed) {
                push_plugin(&mut script, PluginId::from(KOTLIN_ANDROID));
            }
        }

        if let Some(caps) = group_pattern().captures(trimmed) {
            script.group = Some(caps[1].to_string());
        }
        if let Some(caps) = namespace_pattern().captures(trimmed) {
            script.namespace = Some(caps[1].to_string());
        }
    }

    script
}

fn push_plugin(script: &mut BuildScript, plugin: PluginId) {
    if !script.plugins.contains(&plugin) {
        script.plugins.push(plugin);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::plugins::{ANDROID_APPLICATION, ANDROID_LIBRARY};
    use yare::parameterized;

    fn plugin_ids(script: &BuildScript) -> Vec<&str> {
        script.plugins.iter().map(PluginId::as_str).collect()
    }

    #[parameterized(
        kts_plugins_block = { "plugins {\n    id(\"com.android.library\")\n}", &[ANDROID_LIBRARY] },
        groovy_plugins_block = { "plugins {\n    id 'com.android.application'\n}", &[ANDROID_APPLICATION] },
        legacy_apply = { "apply plugin: 'com.android.library'\napply plugin: 'kotlin-android'", &[ANDROID_LIBRARY, "kotlin-android"] },
        kts_apply = { "apply(plugin = \"com.android.library\")", &[ANDROID_LIBRARY] },
        kotlin_shorthand = { "plugins {\n    kotlin(\"android\")\n}", &[KOTLIN_ANDROID] },
        apply_false_skipped = { "id(\"com.android.library\") version \"8.1.0\" apply false", &[] },
        commented_out = { "// apply plugin: 'com.android.library'", &[] },
        application_id_is_not_a_plugin = { "applicationId \"com.example\"", &[] },
    )]
    fn test_plugins(input: &str, expected: &[&str]) {
        assert_eq!(plugin_ids(&parse_build_file(input)), expected);
    }

    #[test]
    fn test_flutter_plugin_build_file() {
        let content = r#"
group 'org.vosk.vosk_flutter'
version '1.0'

apply plugin: 'com.android.library'

android {
    if (project.android.hasProperty("namespace")) {
        namespace 'org.vosk.vosk_flutter'
    }
    compileSdkVersion 33
}
"#;
        let script = parse_build_file(content);

        assert_eq!(script.group.as_deref(), Some("org.vosk.vosk_flutter"));
        assert_eq!(script.namespace.as_deref(), Some("org.vosk.vosk_flutter"));
        assert_eq!(plugin_ids(&script), vec![ANDROID_LIBRARY]);
    }

    #[test]
    fn test_kts_properties() {
        let content = r#"
plugins {
    id("com.android.application")
    id("org.jetbrains.kotlin.android")
}
group = "com.example"
android {
    namespace = "com.example.app"
}
"#;
        let script = parse_build_file(content);

        assert_eq!(script.group.as_deref(), Some("com.example"));
        assert_eq!(script.namespace.as_deref(), Some("com.example.app"));
        assert_eq!(plugin_ids(&script), vec![ANDROID_APPLICATION, KOTLIN_ANDROID]);
    }

    #[test]
    fn test_empty_file() {
        assert!(parse_build_file("").is_empty());
    }
}
