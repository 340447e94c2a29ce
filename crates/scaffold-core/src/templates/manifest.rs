//! Manifest fragments and the ordered layered merge
//!
//! Each template layer may contribute a partial `package.json` as a
//! `package.json.template` fragment. Fragments are merged per sub-map in a
//! fixed, named layer order so the precedence is auditable: later layers win
//! on key collision, keys present in only one fragment are preserved.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use tokio::fs;

/// Partial package metadata contributed by one template layer
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ManifestFragment {
    #[serde(default)]
    pub dependencies: BTreeMap<String, String>,

    #[serde(default, rename = "devDependencies")]
    pub dev_dependencies: BTreeMap<String, String>,

    #[serde(default)]
    pub scripts: BTreeMap<String, String>,
}

impl ManifestFragment {
    /// Load a required fragment; read and parse failures surface as errors
    pub async fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read manifest fragment {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse manifest fragment {}", path.display()))
    }

    /// Load an optional fragment; a missing file degrades to an empty
    /// fragment, never an error
    pub async fn load_optional(path: &Path) -> Result<Self> {
        if fs::metadata(path).await.is_ok() {
            Self::load(path).await
        } else {
            Ok(Self::default())
        }
    }
}

/// A fragment layer named after its source, keeping merge precedence
/// auditable and testable
#[derive(Debug, Clone)]
pub struct MergeLayer {
    pub name: &'static str,
    pub fragment: ManifestFragment,
}

impl MergeLayer {
    pub fn new(name: &'static str, fragment: ManifestFragment) -> Self {
        Self { name, fragment }
    }
}

/// Pointwise union of all fragment layers, right-biased per key
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergedManifest {
    pub dependencies: BTreeMap<String, String>,
    pub dev_dependencies: BTreeMap<String, String>,
    pub scripts: BTreeMap<String, String>,
}

/// Merge fragment layers in order; later layers win on key collision
pub fn merge_layers(layers: &[MergeLayer]) -> MergedManifest {
    let mut merged = MergedManifest::default();
    for layer in layers {
        merged
            .dependencies
            .extend(layer.fragment.dependencies.clone());
        merged
            .dev_dependencies
            .extend(layer.fragment.dev_dependencies.clone());
        merged.scripts.extend(layer.fragment.scripts.clone());
    }
    merged
}
