//! package.json reading and Prettier dependency filtering
//!
//! The cache key is derived from the subset of declared dependencies that
//! can change what Prettier does: the tool itself, scoped `@prettier/*`
//! packages, and `prettier-*` plugins. Everything else in the project's
//! manifest is irrelevant to formatting and is ignored.

use crate::error::{ActionError, ActionResult};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::LazyLock;
use tracing::debug;

/// Conventional manifest location relative to the project root
pub const MANIFEST_FILE: &str = "package.json";

/// Package name used in the synthetic install manifest
pub const SYNTHETIC_PACKAGE_NAME: &str = "temp-prettier-action-package";

/// Names that participate in the cache key: `prettier` itself, anything
/// under the `@prettier` scope, and `prettier-*` plugins.
static PRETTIER_PACKAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^@?prettier(/|$|-)").expect("valid pattern"));

/// The subset of package.json this tool reads
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PackageManifest {
    /// Declared development dependencies
    #[serde(default, rename = "devDependencies")]
    pub dev_dependencies: BTreeMap<String, String>,

    /// Declared runtime dependencies
    #[serde(default)]
    pub dependencies: BTreeMap<String, String>,
}

impl PackageManifest {
    /// Read and parse a package.json file
    pub async fn from_file(path: &Path) -> ActionResult<Self> {
        let content =
            tokio::fs::read_to_string(path)
                .await
                .map_err(|e| ActionError::ManifestRead {
                    path: path.to_path_buf(),
                    source: e,
                })?;

        serde_json::from_str(&content).map_err(|e| ActionError::ManifestParse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }
}

/// Extract the Prettier-related dependency set from a project manifest.
///
/// Merge order: the fixed base entry (`prettier: latest`), then declared
/// development dependencies, then runtime dependencies. Later sources win
/// on name collision, so a project that pins `prettier` overrides the base.
/// The result is a `BTreeMap`, so its serialization order is canonical
/// regardless of how the manifest listed its keys.
pub fn prettier_dependencies(manifest: &PackageManifest) -> BTreeMap<String, String> {
    let mut merged = BTreeMap::new();
    merged.insert("prettier".to_string(), "latest".to_string());

    for (name, spec) in &manifest.dev_dependencies {
        merged.insert(name.clone(), spec.clone());
    }
    for (name, spec) in &manifest.dependencies {
        merged.insert(name.clone(), spec.clone());
    }

    merged.retain(|name, _| PRETTIER_PACKAGE.is_match(name));
    debug!("{} prettier-related dependencies", merged.len());
    merged
}

/// Ephemeral install descriptor for the scoped npm install.
///
/// Written to a throwaway package.json so the install pulls only the
/// filtered dependency set, never the project's whole tree. Not persisted.
#[derive(Debug, Clone, Serialize)]
pub struct SyntheticManifest {
    /// Placeholder package name
    pub name: &'static str,
    /// The filtered dependency set
    pub dependencies: BTreeMap<String, String>,
}

impl SyntheticManifest {
    /// Create a synthetic manifest around a filtered dependency set
    pub fn new(dependencies: BTreeMap<String, String>) -> Self {
        Self {
            name: SYNTHETIC_PACKAGE_NAME,
            dependencies,
        }
    }

    /// Serialize to the JSON written into the temporary package.json
    pub fn to_json(&self) -> ActionResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
