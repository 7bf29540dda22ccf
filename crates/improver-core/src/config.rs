//! Loading improvement bundles from JSON.

use std::path::Path;

use tracing::debug;

use crate::domain::bundle::ImprovementBundle;
use crate::domain::error::BundleError;

impl ImprovementBundle {
    /// Parse a bundle from a JSON document (camelCase keys).
    pub fn from_json_str(json: &str) -> Result<Self, BundleError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Read and parse a bundle file.
pub fn load_bundle(path: impl AsRef<Path>) -> Result<ImprovementBundle, BundleError> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path).map_err(|source| BundleError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let bundle = ImprovementBundle::from_json_str(&raw)?;
    debug!(
        path = %path.display(),
        repository = %bundle.repository.full_name,
        selected = bundle.areas().selected_count(),
        "Loaded improvement bundle"
    );
    Ok(bundle)
}
