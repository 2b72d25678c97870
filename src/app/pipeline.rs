//! Shared prediction pipeline used by both CLI and TUI front-ends.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! form -> validate -> preprocess -> scale -> model
//!
//! The CLI and the TUI can then focus on presentation (printing vs widgets).

use std::sync::Arc;

use crate::config::AppConfig;
use crate::domain::{PredictionBreakdown, PredictionRequest, RawForm};
use crate::error::AppError;
use crate::io::artifacts::load_artifacts;
use crate::models::Predictor;
use crate::preprocess::{preprocess, validate};

/// All computed outputs of a single prediction.
#[derive(Debug, Clone)]
pub struct PredictionOutput {
    pub request: PredictionRequest,
    pub breakdown: PredictionBreakdown,
}

impl PredictionOutput {
    pub fn value(&self) -> f64 {
        self.breakdown.prediction.value
    }
}

/// Load the artifacts named by `config` once and wrap them in a predictor.
pub fn load_predictor(config: &AppConfig) -> Result<Predictor, AppError> {
    let artifacts = load_artifacts(&config.artifacts).inspect_err(|err| {
        tracing::error!(%err, "artifact load failed");
    })?;
    Ok(Predictor::new(Arc::new(artifacts))?)
}

/// Execute the full pipeline for one form submission.
pub fn run_prediction(form: &RawForm, predictor: &Predictor) -> Result<PredictionOutput, AppError> {
    let request = validate(form).inspect_err(|err| {
        tracing::warn!(%err, "form rejected");
    })?;
    let features = preprocess(&request);
    let breakdown = predictor.predict(&features)?;

    tracing::info!(
        substance = ?request.substance,
        source = ?request.source,
        prediction = breakdown.prediction.value,
        "prediction served"
    );

    Ok(PredictionOutput { request, breakdown })
}
