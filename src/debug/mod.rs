//! Debug bundle writer for inspecting a single prediction.
//!
//! A bundle is a markdown file under `debug/` holding the request, the feature
//! vector before and after scaling, each feature's contribution, and which
//! artifacts produced the result.

use std::fs::{File, create_dir_all};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Local;

use crate::domain::{Categorical, PredictionBreakdown, PredictionRequest};
use crate::error::{AppError, EXIT_RUNTIME};
use crate::models::Artifacts;

pub fn write_debug_bundle(
    request: &PredictionRequest,
    breakdown: &PredictionBreakdown,
    artifacts: &Artifacts,
) -> Result<PathBuf, AppError> {
    write_debug_bundle_in(Path::new("debug"), request, breakdown, artifacts)
}

pub fn write_debug_bundle_in(
    dir: &Path,
    request: &PredictionRequest,
    breakdown: &PredictionBreakdown,
    artifacts: &Artifacts,
) -> Result<PathBuf, AppError> {
    create_dir_all(dir).map_err(|e| AppError::new(EXIT_RUNTIME, format!("Failed to create debug dir: {e}")))?;

    let ts = Local::now().format("%Y%m%d_%H%M%S%.3f");
    let path = dir.join(format!("ghg_debug_{ts}.md"));

    let mut file = File::create(&path)
        .map_err(|e| AppError::new(EXIT_RUNTIME, format!("Failed to create debug file: {e}")))?;

    write_bundle(&mut file, request, breakdown, artifacts)
        .map_err(|e| AppError::new(EXIT_RUNTIME, format!("Failed to write debug bundle: {e}")))?;

    tracing::info!(path = %path.display(), "debug bundle written");
    Ok(path)
}

fn write_bundle(
    out: &mut impl Write,
    request: &PredictionRequest,
    breakdown: &PredictionBreakdown,
    artifacts: &Artifacts,
) -> std::io::Result<()> {
    writeln!(out, "# ghg debug bundle")?;
    writeln!(out, "- generated: {}", Local::now().to_rfc3339())?;
    writeln!(out, "- model: {}", artifacts.paths.model.display())?;
    writeln!(
        out,
        "- scaler: {} ({})",
        artifacts.paths.scaler.display(),
        artifacts.scaler.display_name()
    )?;

    writeln!(out, "\n## Request")?;
    writeln!(out, "| field | value |")?;
    writeln!(out, "| - | - |")?;
    writeln!(out, "| substance | {} |", request.substance.label())?;
    writeln!(out, "| unit | {} |", request.unit.label())?;
    writeln!(out, "| source | {} |", request.source.label())?;
    writeln!(out, "| supply_wo_margin | {} |", request.supply_wo_margin)?;
    writeln!(out, "| margin | {} |", request.margin)?;
    writeln!(out, "| dq_reliability | {} |", request.dq_reliability)?;
    writeln!(out, "| dq_temporal | {} |", request.dq_temporal)?;
    writeln!(out, "| dq_geo | {} |", request.dq_geo)?;
    writeln!(out, "| dq_tech | {} |", request.dq_tech)?;
    writeln!(out, "| dq_data | {} |", request.dq_data)?;

    writeln!(out, "\n## Features")?;
    writeln!(out, "| # | feature | value | scaled | coef x scaled |")?;
    writeln!(out, "| - | - | - | - | - |")?;
    let rows = breakdown
        .features
        .iter()
        .zip(breakdown.scaled.values.iter())
        .zip(breakdown.contributions.iter())
        .enumerate();
    for (idx, (((name, value), scaled), contrib)) in rows {
        writeln!(
            out,
            "| {idx} | {name} | {value:.6} | {scaled:.6} | {contrib:.6} |"
        )?;
    }

    writeln!(out, "\n## Result")?;
    writeln!(out, "- intercept: {:.6}", breakdown.intercept)?;
    writeln!(out, "- prediction: {:.6}", breakdown.prediction.value)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::domain::RawForm;
    use crate::models::Predictor;
    use crate::models::predictor::tests::test_artifacts;
    use crate::preprocess::{preprocess, validate};

    #[test]
    fn bundle_contains_all_sections() {
        let artifacts = test_artifacts();
        let request = validate(&RawForm::default()).unwrap();
        let breakdown = Predictor::new(Arc::new(artifacts.clone()))
            .unwrap()
            .predict(&preprocess(&request))
            .unwrap();

        let dir = std::env::temp_dir().join(format!("ghg-debug-{}", std::process::id()));
        let path = write_debug_bundle_in(&dir, &request, &breakdown, &artifacts).unwrap();
        let text = std::fs::read_to_string(path).unwrap();

        assert!(text.starts_with("# ghg debug bundle"));
        assert!(text.contains("## Request"));
        assert!(text.contains("| 9 | Source |"));
        assert!(text.contains("- prediction:"));

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
