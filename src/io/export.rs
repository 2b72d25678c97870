//! Export a prediction to JSON.
//!
//! The export is a self-contained record of one run: the request as typed,
//! the model-facing features, and the result. Meant for scripts and audit
//! trails rather than reloading.

use std::fs::File;
use std::path::Path;

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::domain::{PredictionBreakdown, PredictionRequest};
use crate::error::{AppError, EXIT_RUNTIME};

#[derive(Debug, Serialize)]
pub struct PredictionRecord {
    pub tool: String,
    pub generated: DateTime<Local>,
    pub request: PredictionRequest,
    pub features: Vec<FeatureEntry>,
    pub intercept: f64,
    pub prediction: f64,
}

#[derive(Debug, Serialize)]
pub struct FeatureEntry {
    pub name: String,
    pub value: f64,
    pub scaled: f64,
    pub contribution: f64,
}

impl PredictionRecord {
    pub fn new(request: &PredictionRequest, breakdown: &PredictionBreakdown) -> Self {
        let features = breakdown
            .features
            .iter()
            .zip(breakdown.scaled.values.iter())
            .zip(breakdown.contributions.iter())
            .map(|(((name, value), &scaled), &contribution)| FeatureEntry {
                name: name.to_string(),
                value,
                scaled,
                contribution,
            })
            .collect();

        Self {
            tool: "ghg".to_string(),
            generated: Local::now(),
            request: *request,
            features,
            intercept: breakdown.intercept,
            prediction: breakdown.prediction.value,
        }
    }
}

/// Write a prediction record as pretty JSON.
pub fn write_prediction_json(
    path: &Path,
    request: &PredictionRequest,
    breakdown: &PredictionBreakdown,
) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| {
        AppError::new(
            EXIT_RUNTIME,
            format!("Failed to create export JSON '{}': {e}", path.display()),
        )
    })?;

    let record = PredictionRecord::new(request, breakdown);
    serde_json::to_writer_pretty(file, &record)
        .map_err(|e| AppError::new(EXIT_RUNTIME, format!("Failed to write export JSON: {e}")))?;

    tracing::info!(path = %path.display(), "prediction exported");
    Ok(())
}
