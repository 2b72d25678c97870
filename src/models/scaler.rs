//! Fitted feature scalers.
//!
//! Both supported kinds are per-feature affine maps:
//!
//! - `standard`: `z = (x - mean) / scale`
//! - `min_max`:  `z = x * scale + min`
//!
//! A zero `scale` in a standard scaler (constant training column) is treated as
//! `1.0`, matching how the scaler was fit.

use nalgebra::DVector;
use serde::{Deserialize, Serialize};

use crate::domain::{FEATURE_COUNT, FeatureVector, ScaledVector};

use super::check_feature_names;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Scaler {
    Standard {
        feature_names: Vec<String>,
        mean: Vec<f64>,
        scale: Vec<f64>,
    },
    MinMax {
        feature_names: Vec<String>,
        min: Vec<f64>,
        scale: Vec<f64>,
    },
}

impl Scaler {
    pub fn display_name(&self) -> &'static str {
        match self {
            Scaler::Standard { .. } => "standard",
            Scaler::MinMax { .. } => "min-max",
        }
    }

    pub fn feature_names(&self) -> &[String] {
        match self {
            Scaler::Standard { feature_names, .. } | Scaler::MinMax { feature_names, .. } => {
                feature_names
            }
        }
    }

    /// Named parameter arrays, for summaries (`("mean", ..), ("scale", ..)`).
    pub fn params(&self) -> [(&'static str, &[f64]); 2] {
        match self {
            Scaler::Standard { mean, scale, .. } => [("mean", mean.as_slice()), ("scale", scale.as_slice())],
            Scaler::MinMax { min, scale, .. } => [("min", min.as_slice()), ("scale", scale.as_slice())],
        }
    }

    /// Check the scaler matches the canonical feature schema.
    ///
    /// Returns a human-readable reason on mismatch.
    pub fn check_schema(&self) -> Result<(), String> {
        check_feature_names(self.feature_names())?;
        for (label, values) in self.params() {
            if values.len() != FEATURE_COUNT {
                return Err(format!(
                    "'{label}' has {} values, expected {FEATURE_COUNT}",
                    values.len()
                ));
            }
            if let Some(idx) = values.iter().position(|v| !v.is_finite()) {
                return Err(format!("'{label}' value #{idx} is not finite"));
            }
        }
        Ok(())
    }

    /// Apply the fitted transform.
    ///
    /// Assumes `check_schema` passed (the loader guarantees it).
    pub fn transform(&self, features: &FeatureVector) -> ScaledVector {
        let x = features.to_dvector();
        let values = match self {
            Scaler::Standard { mean, scale, .. } => {
                let mean = DVector::from_row_slice(mean);
                let scale = DVector::from_iterator(
                    scale.len(),
                    scale.iter().map(|&s| if s == 0.0 { 1.0 } else { s }),
                );
                (x - mean).component_div(&scale)
            }
            Scaler::MinMax { min, scale, .. } => {
                let min = DVector::from_row_slice(min);
                let scale = DVector::from_row_slice(scale);
                x.component_mul(&scale) + min
            }
        };
        ScaledVector { values }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FEATURE_NAMES;

    fn names() -> Vec<String> {
        FEATURE_NAMES.iter().map(|s| s.to_string()).collect()
    }

    fn features() -> FeatureVector {
        FeatureVector::from_values([1.0, 0.0, 2.0, 0.5, 0.9, 0.8, 0.85, 0.7, 0.65, 1.0])
    }

    #[test]
    fn standard_scaler_centers_and_scales() {
        let scaler = Scaler::Standard {
            feature_names: names(),
            mean: vec![1.0; FEATURE_COUNT],
            scale: vec![2.0; FEATURE_COUNT],
        };
        let z = scaler.transform(&features());
        assert!((z.values[0] - 0.0).abs() < 1e-12);
        assert!((z.values[2] - 0.5).abs() < 1e-12);
        assert!((z.values[1] + 0.5).abs() < 1e-12);
    }

    #[test]
    fn standard_scaler_treats_zero_scale_as_one() {
        let mut scale = vec![1.0; FEATURE_COUNT];
        scale[3] = 0.0;
        let scaler = Scaler::Standard {
            feature_names: names(),
            mean: vec![0.0; FEATURE_COUNT],
            scale,
        };
        let z = scaler.transform(&features());
        assert_eq!(z.values[3], 0.5);
    }

    #[test]
    fn min_max_scaler_is_affine() {
        let scaler = Scaler::MinMax {
            feature_names: names(),
            min: vec![-0.5; FEATURE_COUNT],
            scale: vec![0.5; FEATURE_COUNT],
        };
        let z = scaler.transform(&features());
        assert!((z.values[2] - 0.5).abs() < 1e-12);
        assert!((z.values[1] + 0.5).abs() < 1e-12);
    }

    #[test]
    fn schema_check_rejects_short_params() {
        let scaler = Scaler::MinMax {
            feature_names: names(),
            min: vec![0.0; 3],
            scale: vec![1.0; FEATURE_COUNT],
        };
        let reason = scaler.check_schema().unwrap_err();
        assert!(reason.contains("'min'"), "{reason}");
    }

    #[test]
    fn deserializes_tagged_json() {
        let json = format!(
            r#"{{"kind":"standard","feature_names":{},"mean":{:?},"scale":{:?}}}"#,
            serde_json::to_string(&names()).unwrap(),
            vec![0.0; FEATURE_COUNT],
            vec![1.0; FEATURE_COUNT],
        );
        let scaler: Scaler = serde_json::from_str(&json).unwrap();
        assert_eq!(scaler.display_name(), "standard");
        assert!(scaler.check_schema().is_ok());
    }
}
