//! Artifact file formats.
//!
//! Scaler: `{"mean": [f64] | null, "scale": [f64] | null, "n_features"?: int}`.
//!
//! Feature bundle:
//! `{"quantum_features": [[f64]], "feature_names": [str], "n_qubits": int, "records": [{...}]}`
//! where every record is a JSON object with a string `Date` column. `df` is
//! accepted as an alias for `records`.

use crate::encoding::StandardScaler;
use crate::error::CoreError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

/// Parsed feature bundle, not yet validated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureBundle {
    pub quantum_features: Vec<Vec<f64>>,
    pub feature_names: Vec<String>,
    pub n_qubits: usize,
    #[serde(alias = "df")]
    pub records: Vec<Map<String, Value>>,
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, CoreError> {
    let bytes = fs::read(path).map_err(|source| CoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_slice(&bytes).map_err(|source| CoreError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Load the fitted scaler artifact.
pub fn load_scaler(path: &Path) -> Result<StandardScaler, CoreError> {
    let scaler: StandardScaler = read_json(path)?;
    tracing::debug!(path = ?path, width = ?scaler.width(), "Scaler loaded");
    Ok(scaler)
}

/// Load the feature bundle artifact.
pub fn load_bundle(path: &Path) -> Result<FeatureBundle, CoreError> {
    let bundle: FeatureBundle = read_json(path)?;
    tracing::debug!(
        path = ?path,
        rows = bundle.quantum_features.len(),
        n_qubits = bundle.n_qubits,
        "Feature bundle loaded"
    );
    Ok(bundle)
}
