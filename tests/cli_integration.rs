//! CLI integration tests: argument handling, output formats and exit codes

mod support;

use std::fs;
use std::process::Command;
use support::{buildpatch_binary, copy_fixture, FLUTTER_APP};
use tempfile::TempDir;

#[test]
fn test_cli_help() {
    let output = Command::new(buildpatch_binary())
        .arg("--help")
        .output()
        .expect("Failed to execute buildpatch");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("apply"));
    assert!(stdout.contains("inspect"));
    assert!(stdout.contains("config"));
}

#[test]
fn test_cli_version() {
    let output = Command::new(buildpatch_binary())
        .arg("--version")
        .output()
        .expect("Failed to execute buildpatch");

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_config_json() {
    let output = Command::new(buildpatch_binary())
        .args(["config", "--format", "json"])
        .output()
        .expect("Failed to execute buildpatch");

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["compiler_target"], "17");
    assert_eq!(value["namespace_prefix"], "com.grammatica.generated");
}

#[test]
fn test_apply_json_output() {
    let (_temp, app_root) = copy_fixture(FLUTTER_APP);

    let output = Command::new(buildpatch_binary())
        .args(["-q", "apply", "--format", "json"])
        .arg(app_root.join("android"))
        .output()
        .expect("Failed to execute buildpatch");

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let foo = value["modules"]
        .as_array()
        .unwrap()
        .iter()
        .find(|m| m["name"] == "foo-bar")
        .unwrap();
    assert_eq!(foo["namespace"], "com.grammatica.generated.foo_bar");
    assert_eq!(foo["java_target"], "17");
}

#[test]
fn test_apply_twice_reports_no_manifest_rewrite() {
    let (_temp, app_root) = copy_fixture(FLUTTER_APP);
    let run = || {
        Command::new(buildpatch_binary())
            .args(["-q", "apply", "--format", "json"])
            .arg(app_root.join("android"))
            .output()
            .expect("Failed to execute buildpatch")
    };

    assert!(run().status.success());
    let second = run();
    assert!(second.status.success());

    let stdout = String::from_utf8_lossy(&second.stdout);
    assert!(!stdout.contains("manifest_rewritten"));
}

#[test]
fn test_inspect_human_output() {
    let (_temp, app_root) = copy_fixture(FLUTTER_APP);
    let manifest = app_root.join("plugins/foo-bar/android/src/main/AndroidManifest.xml");
    let before = fs::read_to_string(&manifest).unwrap();

    let output = Command::new(buildpatch_binary())
        .arg("inspect")
        .arg(app_root.join("android"))
        .output()
        .expect("Failed to execute buildpatch");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(":foo-bar (foo-bar)"));
    assert!(stdout.contains("com.android.library"));
    assert_eq!(fs::read_to_string(&manifest).unwrap(), before);
}

#[test]
fn test_apply_without_settings_exits_with_error() {
    let temp = TempDir::new().unwrap();

    let output = Command::new(buildpatch_binary())
        .arg("apply")
        .arg(temp.path())
        .output()
        .expect("Failed to execute buildpatch");

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("No Gradle settings file"));
}

#[test]
fn test_invalid_format_rejected() {
    let output = Command::new(buildpatch_binary())
        .args(["apply", "--format", "xml"])
        .output()
        .expect("Failed to execute buildpatch");

    assert!(!output.status.success());
}
