//! Formatted terminal output: the success message, contribution tables and
//! artifact summaries.
//!
//! Formatting lives in one place so the CLI and the TUI print identical text.

use crate::domain::{Categorical, PredictionBreakdown, PredictionRequest};
use crate::models::Artifacts;

/// Label shown before the predicted value.
pub const RESULT_LABEL: &str = "Predicted Supply Chain Emission Factor with Margin";

/// Explanation printed under the result.
pub const RESULT_NOTE: &str =
    "Estimated GHG emissions per 2018 USD, considering margin and data quality.";

/// The one-line success message (4 decimal places).
pub fn format_success(value: f64) -> String {
    format!("{RESULT_LABEL}: {value:.4}")
}

/// Echo the request back in form order.
pub fn format_request(request: &PredictionRequest) -> String {
    let rows: [(&str, String); 10] = [
        ("Substance", request.substance.label().to_string()),
        ("Unit", request.unit.label().to_string()),
        ("Source", request.source.label().to_string()),
        ("Supply w/o margin", format!("{}", request.supply_wo_margin)),
        ("Margin", format!("{}", request.margin)),
        ("DQ reliability", format!("{}", request.dq_reliability)),
        ("DQ temporal", format!("{}", request.dq_temporal)),
        ("DQ geographical", format!("{}", request.dq_geo)),
        ("DQ technological", format!("{}", request.dq_tech)),
        ("DQ data collection", format!("{}", request.dq_data)),
    ];

    let mut out = String::new();
    for (label, value) in rows {
        out.push_str(&format!("{label:<20} {value}\n"));
    }
    out
}

/// Per-feature table: raw value, scaled value, contribution to the prediction.
pub fn format_breakdown(breakdown: &PredictionBreakdown) -> String {
    let mut out = String::new();
    out.push_str(
        format!(
            "{:<40} {:>12} {:>12} {:>12}\n",
            "feature", "value", "scaled", "contrib"
        )
        .trim_end(),
    );
    out.push('\n');
    out.push_str(format!("{:-<40} {:-<12} {:-<12} {:-<12}\n", "", "", "", "").trim_end());
    out.push('\n');

    let rows = breakdown
        .features
        .iter()
        .zip(breakdown.scaled.values.iter())
        .zip(breakdown.contributions.iter());
    for (((name, value), scaled), contrib) in rows {
        out.push_str(&format!(
            "{:<40} {:>12.4} {:>12.4} {:>12.4}\n",
            truncate(name, 40),
            value,
            scaled,
            contrib
        ));
    }
    out.push_str(&format!("{:<40} {:>38.4}\n", "(intercept)", breakdown.intercept));
    out.push_str(&format!(
        "{:<40} {:>38.4}\n",
        "= prediction", breakdown.prediction.value
    ));
    out
}

/// Summary of the loaded artifacts.
pub fn format_artifacts(artifacts: &Artifacts) -> String {
    let mut out = String::new();

    out.push_str("=== ghg - model artifacts ===\n");
    out.push_str(&format!("Model:  {}\n", artifacts.paths.model.display()));
    out.push_str(&format!(
        "Scaler: {} ({})\n",
        artifacts.paths.scaler.display(),
        artifacts.scaler.display_name()
    ));
    out.push_str(&format!("Intercept: {:.6}\n\n", artifacts.model.intercept));

    let [(p0, v0), (p1, v1)] = artifacts.scaler.params();
    out.push_str(
        format!(
            "{:<40} {:>12} {:>12} {:>12}\n",
            "feature", p0, p1, "coef"
        )
        .trim_end(),
    );
    out.push('\n');
    for (idx, name) in artifacts.model.feature_names.iter().enumerate() {
        out.push_str(&format!(
            "{:<40} {:>12.6} {:>12.6} {:>12.6}\n",
            truncate(name, 40),
            v0[idx],
            v1[idx],
            artifacts.model.coef[idx]
        ));
    }
    out
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for (i, ch) in s.chars().enumerate() {
        if i + 1 >= max {
            break;
        }
        out.push(ch);
    }
    out.push('.');
    out
}
