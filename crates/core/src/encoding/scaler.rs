//! Fitted standard scaler.
//!
//! Mirrors a fitted `StandardScaler`: `(x - mean) / scale`, where either
//! step is skipped when the scaler was fitted without centering or scaling.

use crate::error::CoreError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardScaler {
    /// Per-feature mean, `None` when fitted with `with_mean=False`.
    #[serde(default)]
    pub mean: Option<Vec<f64>>,
    /// Per-feature scale, `None` when fitted with `with_std=False`.
    #[serde(default)]
    pub scale: Option<Vec<f64>>,
    /// Feature count recorded at fit time, if the artifact carries it.
    #[serde(default)]
    pub n_features: Option<usize>,
}

impl StandardScaler {
    pub fn new(mean: Option<Vec<f64>>, scale: Option<Vec<f64>>) -> Self {
        Self {
            mean,
            scale,
            n_features: None,
        }
    }

    /// Scaler that leaves its input unchanged.
    pub fn identity() -> Self {
        Self::new(None, None)
    }

    /// Feature width implied by the fitted parameters, if any.
    pub fn width(&self) -> Option<usize> {
        self.mean
            .as_ref()
            .map(Vec::len)
            .or_else(|| self.scale.as_ref().map(Vec::len))
            .or(self.n_features)
    }

    /// Checks internal consistency and that the width matches `n_features`.
    pub fn validate(&self, n_features: usize) -> Result<(), CoreError> {
        for (label, len) in [
            ("mean", self.mean.as_ref().map(Vec::len)),
            ("scale", self.scale.as_ref().map(Vec::len)),
            ("n_features", self.n_features),
        ] {
            if let Some(len) = len {
                if len != n_features {
                    return Err(CoreError::InvalidArtifact(format!(
                        "scaler {} has width {}, expected {} features",
                        label, len, n_features
                    )));
                }
            }
        }
        if let Some(ref scale) = self.scale {
            if let Some(i) = scale.iter().position(|s| *s == 0.0 || !s.is_finite()) {
                return Err(CoreError::InvalidArtifact(format!(
                    "scaler scale[{}] = {} is not a usable divisor",
                    i, scale[i]
                )));
            }
        }
        if let Some(ref mean) = self.mean {
            if mean.iter().any(|m| !m.is_finite()) {
                return Err(CoreError::InvalidArtifact(
                    "scaler mean contains NaN or Inf".into(),
                ));
            }
        }
        Ok(())
    }

    /// Standardizes `x` in place.
    pub fn transform(&self, x: &mut [f64]) -> Result<(), CoreError> {
        if let Some(width) = self.width() {
            if width != x.len() {
                return Err(CoreError::Encoding(format!(
                    "X has {} features, but the scaler is expecting {} features as input",
                    x.len(),
                    width
                )));
            }
        }
        if let Some(ref mean) = self.mean {
            for (v, m) in x.iter_mut().zip(mean) {
                *v -= m;
            }
        }
        if let Some(ref scale) = self.scale {
            for (v, s) in x.iter_mut().zip(scale) {
                *v /= s;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transform() {
        let s = StandardScaler::new(Some(vec![1.0, 10.0]), Some(vec![2.0, 5.0]));
        let mut x = [3.0, 0.0];
        s.transform(&mut x).unwrap();
        assert_eq!(x, [1.0, -2.0]);
    }

    #[test]
    fn test_without_mean_only_scales() {
        let s = StandardScaler::new(None, Some(vec![4.0]));
        let mut x = [2.0];
        s.transform(&mut x).unwrap();
        assert_eq!(x, [0.5]);
    }

    #[test]
    fn test_identity() {
        let mut x = [7.0, -1.0, 0.25];
        StandardScaler::identity().transform(&mut x).unwrap();
        assert_eq!(x, [7.0, -1.0, 0.25]);
    }

    #[test]
    fn test_width_mismatch_is_encoding_error() {
        let s = StandardScaler::new(Some(vec![0.0; 3]), Some(vec![1.0; 3]));
        let err = s.transform(&mut [1.0, 2.0]).unwrap_err();
        assert!(matches!(err, CoreError::Encoding(_)));
    }

    #[test]
    fn test_validate_rejects_zero_scale() {
        let s = StandardScaler::new(None, Some(vec![1.0, 0.0]));
        assert!(s.validate(2).is_err());
    }

    #[test]
    fn test_validate_rejects_inconsistent_widths() {
        let s = StandardScaler::new(Some(vec![0.0; 2]), Some(vec![1.0; 3]));
        assert!(s.validate(2).is_err());
        assert!(s.validate(3).is_err());
    }

    #[test]
    fn test_deserialize_with_nulls() {
        let s: StandardScaler =
            serde_json::from_str(r#"{"mean": null, "scale": [2.0, 2.0]}"#).unwrap();
        assert!(s.mean.is_none());
        assert_eq!(s.width(), Some(2));
    }
}
