//! Fitted linear regression.
//!
//! The model is `y = intercept + coef · z` over the scaled feature vector.
//! Inference is a single dot product; per-feature terms are exposed for the
//! explanation views.

use nalgebra::DVector;
use serde::{Deserialize, Serialize};

use crate::domain::{FEATURE_COUNT, ScaledVector};

use super::check_feature_names;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearModel {
    pub feature_names: Vec<String>,
    pub coef: Vec<f64>,
    pub intercept: f64,
}

impl LinearModel {
    /// Check the model matches the canonical feature schema.
    pub fn check_schema(&self) -> Result<(), String> {
        check_feature_names(&self.feature_names)?;
        if self.coef.len() != FEATURE_COUNT {
            return Err(format!(
                "'coef' has {} values, expected {FEATURE_COUNT}",
                self.coef.len()
            ));
        }
        if let Some(idx) = self.coef.iter().position(|v| !v.is_finite()) {
            return Err(format!("'coef' value #{idx} is not finite"));
        }
        if !self.intercept.is_finite() {
            return Err("'intercept' is not finite".to_string());
        }
        Ok(())
    }

    fn coef_vector(&self) -> DVector<f64> {
        DVector::from_row_slice(&self.coef)
    }

    /// Evaluate the model on a scaled vector.
    pub fn predict(&self, scaled: &ScaledVector) -> f64 {
        self.intercept + self.coef_vector().dot(&scaled.values)
    }

    /// `coef_i * z_i` for each feature, schema order.
    pub fn contributions(&self, scaled: &ScaledVector) -> Vec<f64> {
        self.coef_vector()
            .component_mul(&scaled.values)
            .iter()
            .copied()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FEATURE_NAMES;

    fn model() -> LinearModel {
        LinearModel {
            feature_names: FEATURE_NAMES.iter().map(|s| s.to_string()).collect(),
            coef: (1..=FEATURE_COUNT).map(|i| i as f64).collect(),
            intercept: 0.5,
        }
    }

    #[test]
    fn predict_is_intercept_plus_dot() {
        let z = ScaledVector {
            values: DVector::from_element(FEATURE_COUNT, 1.0),
        };
        // 0.5 + (1 + 2 + ... + 10)
        assert!((model().predict(&z) - 55.5).abs() < 1e-12);
    }

    #[test]
    fn contributions_sum_to_prediction_minus_intercept() {
        let z = ScaledVector {
            values: DVector::from_fn(FEATURE_COUNT, |i, _| 0.1 * i as f64),
        };
        let m = model();
        let sum: f64 = m.contributions(&z).iter().sum();
        assert!((m.intercept + sum - m.predict(&z)).abs() < 1e-12);
    }

    #[test]
    fn schema_rejects_non_finite_intercept() {
        let m = LinearModel {
            intercept: f64::NAN,
            ..model()
        };
        assert!(m.check_schema().is_err());
    }
}
