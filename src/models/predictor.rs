//! Scaler + model chained behind one read-only handle.
//!
//! Artifacts are loaded once at startup (see `io::artifacts`) and shared via
//! `Arc`. Every call is a pure computation over them.

use std::sync::Arc;

use crate::domain::{FeatureVector, Prediction, PredictionBreakdown};
use crate::error::{AppError, EXIT_RUNTIME};
use crate::io::artifacts::{ArtifactError, ArtifactPaths, ArtifactRole};

use super::{LinearModel, Scaler};

/// Loaded, schema-checked model artifacts.
#[derive(Debug, Clone)]
pub struct Artifacts {
    pub model: LinearModel,
    pub scaler: Scaler,
    /// Where the artifacts were read from (for summaries).
    pub paths: ArtifactPaths,
}

impl Artifacts {
    /// Both artifacts must list the canonical features with matching parameter lengths.
    pub fn check_schema(&self) -> Result<(), ArtifactError> {
        self.model
            .check_schema()
            .map_err(|reason| ArtifactError::SchemaMismatch {
                role: ArtifactRole::Model,
                reason,
            })?;
        self.scaler
            .check_schema()
            .map_err(|reason| ArtifactError::SchemaMismatch {
                role: ArtifactRole::Scaler,
                reason,
            })
    }
}

#[derive(Debug, Clone)]
pub struct Predictor {
    artifacts: Arc<Artifacts>,
}

impl Predictor {
    /// Wrap schema-checked artifacts. Inference indexes by position, so a
    /// short parameter array is refused here.
    pub fn new(artifacts: Arc<Artifacts>) -> Result<Self, ArtifactError> {
        artifacts.check_schema()?;
        Ok(Self { artifacts })
    }

    pub fn artifacts(&self) -> &Artifacts {
        &self.artifacts
    }

    /// Scale the features and evaluate the model.
    pub fn predict(&self, features: &FeatureVector) -> Result<PredictionBreakdown, AppError> {
        let scaled = self.artifacts.scaler.transform(features);
        let value = self.artifacts.model.predict(&scaled);
        if !value.is_finite() {
            return Err(AppError::new(EXIT_RUNTIME, "Model produced a non-finite prediction."));
        }

        let contributions = self.artifacts.model.contributions(&scaled);
        tracing::debug!(
            features = ?features.values(),
            scaled = ?scaled.values.as_slice(),
            prediction = value,
            "prediction computed"
        );

        Ok(PredictionBreakdown {
            features: features.clone(),
            scaled,
            contributions,
            intercept: self.artifacts.model.intercept,
            prediction: Prediction { value },
        })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::domain::{FEATURE_COUNT, FEATURE_NAMES};

    pub(crate) fn test_artifacts() -> Artifacts {
        let names: Vec<String> = FEATURE_NAMES.iter().map(|s| s.to_string()).collect();
        Artifacts {
            model: LinearModel {
                feature_names: names.clone(),
                coef: vec![0.1, -0.2, 0.9, 0.4, 0.05, -0.01, 0.02, -0.03, 0.01, 0.3],
                intercept: 0.25,
            },
            scaler: Scaler::Standard {
                feature_names: names,
                mean: vec![1.5, 0.5, 0.2, 0.03, 0.5, 0.5, 0.5, 0.5, 0.5, 0.5],
                scale: vec![1.1, 0.5, 0.4, 0.05, 0.3, 0.3, 0.3, 0.3, 0.3, 0.5],
            },
            paths: ArtifactPaths::default(),
        }
    }

    #[test]
    fn identical_inputs_give_identical_predictions() {
        let predictor = Predictor::new(Arc::new(test_artifacts())).unwrap();
        let fv = FeatureVector::from_values([0.0, 0.0, 1.0, 0.2, 0.9, 0.8, 0.85, 0.7, 0.65, 0.0]);
        let a = predictor.predict(&fv).unwrap();
        let b = predictor.predict(&fv).unwrap();
        assert_eq!(a.prediction, b.prediction);
        assert_eq!(a.contributions.len(), FEATURE_COUNT);
    }

    #[test]
    fn prediction_matches_hand_computation() {
        let predictor = Predictor::new(Arc::new(test_artifacts())).unwrap();
        // Every feature at its mean scales to zero, leaving the intercept.
        let fv = FeatureVector::from_values([1.5, 0.5, 0.2, 0.03, 0.5, 0.5, 0.5, 0.5, 0.5, 0.5]);
        let out = predictor.predict(&fv).unwrap();
        assert!((out.prediction.value - 0.25).abs() < 1e-12);

        // Bump supply_wo_margin by one scale unit: +0.9.
        let fv = FeatureVector::from_values([1.5, 0.5, 0.6, 0.03, 0.5, 0.5, 0.5, 0.5, 0.5, 0.5]);
        let out = predictor.predict(&fv).unwrap();
        assert!((out.prediction.value - 1.15).abs() < 1e-12);
    }

    #[test]
    fn short_coefficients_are_refused_up_front() {
        let mut artifacts = test_artifacts();
        artifacts.model.coef.pop();
        match Predictor::new(Arc::new(artifacts)) {
            Err(ArtifactError::SchemaMismatch { role, reason }) => {
                assert_eq!(role, ArtifactRole::Model);
                assert!(reason.contains("'coef' has 9 values"), "{reason}");
            }
            other => panic!("expected schema mismatch, got {:?}", other.map(|_| ())),
        }

        let mut artifacts = test_artifacts();
        if let Scaler::Standard { mean, .. } = &mut artifacts.scaler {
            mean.truncate(3);
        }
        assert!(matches!(
            Predictor::new(Arc::new(artifacts)),
            Err(ArtifactError::SchemaMismatch { role: ArtifactRole::Scaler, .. })
        ));
    }

    #[test]
    fn non_finite_output_is_an_error() {
        let predictor = Predictor::new(Arc::new(test_artifacts())).unwrap();
        let fv = FeatureVector::from_values([f64::INFINITY; FEATURE_COUNT]);
        let err = predictor.predict(&fv).unwrap_err();
        assert_eq!(err.exit_code(), 4);
    }
}
