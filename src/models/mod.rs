//! Model artifacts and inference.
//!
//! - `scaler`: fitted per-feature affine transforms
//! - `model`: the fitted linear regression
//! - `predictor`: the read-only handle that chains the two

pub mod model;
pub mod predictor;
pub mod scaler;

pub use model::*;
pub use predictor::*;
pub use scaler::*;

use crate::domain::{FEATURE_COUNT, FEATURE_NAMES};

/// Check an artifact's feature list against the canonical schema (names and order).
pub(crate) fn check_feature_names(names: &[String]) -> Result<(), String> {
    if names.len() != FEATURE_COUNT {
        return Err(format!(
            "expected {FEATURE_COUNT} features, artifact lists {}",
            names.len()
        ));
    }
    for (idx, (got, want)) in names.iter().zip(FEATURE_NAMES.iter()).enumerate() {
        if got != want {
            return Err(format!(
                "feature #{idx} is '{got}', expected '{want}'"
            ));
        }
    }
    Ok(())
}
