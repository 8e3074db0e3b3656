//! End-to-end OHLC encoder.

use crate::encoding::circuit::FeatureMap;
use crate::encoding::features::{raw_features, FeatureKind, Ohlc};
use crate::encoding::scaler::StandardScaler;
use crate::error::CoreError;
use std::f64::consts::FRAC_PI_2;

/// Maps an OHLC quartet to an embedding comparable with the stored matrix.
///
/// Built once from the artifacts; encoding is a pure function of the prices.
#[derive(Debug, Clone)]
pub struct Encoder {
    feature_names: Vec<String>,
    kinds: Vec<FeatureKind>,
    scaler: StandardScaler,
    feature_map: FeatureMap,
}

impl Encoder {
    pub fn new(
        feature_names: Vec<String>,
        scaler: StandardScaler,
        n_qubits: usize,
    ) -> Result<Self, CoreError> {
        let feature_map = FeatureMap::new(n_qubits)?;
        if feature_names.is_empty() {
            return Err(CoreError::InvalidArtifact("feature_names is empty".into()));
        }
        if feature_names.len() > n_qubits {
            return Err(CoreError::InvalidArtifact(format!(
                "{} features cannot be angle-embedded on {} qubits",
                feature_names.len(),
                n_qubits
            )));
        }
        scaler.validate(feature_names.len())?;

        let kinds = feature_names
            .iter()
            .map(|n| FeatureKind::from_name(n))
            .collect();
        Ok(Self {
            feature_names,
            kinds,
            scaler,
            feature_map,
        })
    }

    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    pub fn n_qubits(&self) -> usize {
        self.feature_map.n_qubits()
    }

    /// Names that a single-day query cannot derive and are zero-filled.
    pub fn zero_filled_features(&self) -> Vec<&str> {
        self.feature_names
            .iter()
            .zip(&self.kinds)
            .filter(|(_, k)| **k == FeatureKind::Unavailable)
            .map(|(n, _)| n.as_str())
            .collect()
    }

    /// Scaled, squashed and L2-normalized input to the feature map.
    pub fn preprocess(&self, prices: &Ohlc) -> Result<Vec<f64>, CoreError> {
        let mut x = raw_features(&self.kinds, prices);
        self.scaler.transform(&mut x)?;
        for v in x.iter_mut() {
            *v = v.atan() + FRAC_PI_2;
        }
        l2_normalize(&mut x);
        Ok(x)
    }

    /// Encodes one day's prices into an embedding of length `n_qubits`.
    pub fn encode(&self, prices: &Ohlc) -> Result<Vec<f64>, CoreError> {
        if !prices.is_finite() {
            return Err(CoreError::Encoding("prices must be finite".into()));
        }
        let x = self.preprocess(prices)?;
        self.feature_map.apply(&x)
    }
}

/// Scales `x` to unit L2 norm; a zero vector is left unchanged.
pub fn l2_normalize(x: &mut [f64]) {
    let norm = x.iter().map(|v| v * v).sum::<f64>().sqrt();
    if norm > 0.0 {
        for v in x.iter_mut() {
            *v /= norm;
        }
    }
}
