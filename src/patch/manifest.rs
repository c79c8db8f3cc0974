use super::capability::{Capability, PluginCapabilityDetector};
use super::PatchEvent;
use crate::error::PatchError;
use crate::fs::FileSystem;
use crate::project::Module;
use regex::{Captures, Regex};
use serde::Serialize;
use std::borrow::Cow;
use std::path::PathBuf;
use std::sync::{Arc, OnceLock};
use tracing::{debug, info};

/// Location of a module's manifest, relative to its project directory
pub const MANIFEST_PATH: &str = "src/main/AndroidManifest.xml";

fn start_tag() -> &'static Regex {
    static START_TAG: OnceLock<Regex> = OnceLock::new();
    START_TAG.get_or_init(|| {
        Regex::new(
            r#"<[A-Za-z_][\w:.-]*(?:\s+[^\s=/>]+\s*=\s*(?:"[^"]*"|'[^']*'))*\s*/?>"#,
        )
        .expect("start tag pattern is valid")
    })
}

fn attribute() -> &'static Regex {
    static ATTRIBUTE: OnceLock<Regex> = OnceLock::new();
    ATTRIBUTE.get_or_init(|| {
        Regex::new(r#"\s+([^\s=/>]+)\s*=\s*(?:"[^"]*"|'[^']*')"#)
            .expect("attribute pattern is valid")
    })
}

/// Removes every `package` attribute together with the whitespace in front
/// of it. Only attribute names inside start tags count; text inside other
/// attribute values is never touched. Returns the input borrowed when no
/// start tag matched.
pub fn strip_package_attribute(content: &str) -> Cow<'_, str> {
    if !content.contains("package") {
        return Cow::Borrowed(content);
    }
    start_tag().replace_all(content, |tag: &Captures| {
        attribute()
            .replace_all(&tag[0], |attr: &Captures| {
                if &attr[1] == "package" {
                    String::new()
                } else {
                    attr[0].to_string()
                }
            })
            .into_owned()
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ManifestOutcome {
    NotApplicable,
    Missing,
    Unchanged,
    Rewritten,
}

/// Strips the deprecated `package` attribute from library manifests.
#[derive(Clone)]
pub struct ManifestPatcher {
    fs: Arc<dyn FileSystem>,
}

impl ManifestPatcher {
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }

    pub fn manifest_path(&self, module: &Module) -> PathBuf {
        self.fs.join(module.project_dir(), MANIFEST_PATH)
    }

    pub fn patch(&self, module: &mut Module) -> Result<ManifestOutcome, PatchError> {
        let is_library = module
            .extensions()
            .android
            .as_ref()
            .is_some_and(|android| android.is_library());
        if !is_library
            || !PluginCapabilityDetector::has_capability(module, Capability::LibraryPackaging)
        {
            return Ok(ManifestOutcome::NotApplicable);
        }

        let path = self.manifest_path(module);
        if !self.fs.is_file(&path) {
            debug!(module = %module.name(), path = ?path, "No manifest, nothing to patch");
            return Ok(ManifestOutcome::Missing);
        }

        let content = self
            .fs
            .read_to_string(&path)
            .map_err(|source| PatchError::Manifest {
                path: path.clone(),
                source,
            })?;

        let patched = match strip_package_attribute(&content) {
            Cow::Borrowed(_) => return Ok(ManifestOutcome::Unchanged),
            Cow::Owned(patched) if patched == content => return Ok(ManifestOutcome::Unchanged),
            Cow::Owned(patched) => patched,
        };

        self.fs
            .write_string(&path, &patched)
            .map_err(|source| PatchError::Manifest {
                path: path.clone(),
                source,
            })?;

        info!(module = %module.name(), path = ?path, "Removed deprecated package attribute from manifest");
        module.record(PatchEvent::ManifestRewritten { path });
        Ok(ManifestOutcome::Rewritten)
    }
}
