//! Shared domain types.
//!
//! A prediction request moves through these types in order:
//!
//! - `RawForm`: untyped form state, exactly what the user selected or typed
//! - `PredictionRequest`: the validated, typed request
//! - `FeatureVector` / `ScaledVector`: model-facing values in schema order
//! - `Prediction`: the scalar model output
//!
//! The categorical enums serialize as their display labels so exported JSON
//! reads the same as the form.

use nalgebra::DVector;
use serde::{Deserialize, Serialize};

/// Number of model input features.
pub const FEATURE_COUNT: usize = 10;

/// Canonical feature names in the column order the model and scaler were fit on.
///
/// Downstream code aligns by position, so this order is load-bearing.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "Substance",
    "Unit",
    "Supply Chain Emission Factors without Margins",
    "Margins of Supply Chain Emission Factors",
    "DQ ReliabilityScore of Factors without Margins",
    "DQ TemporalCorrelation of Factors without Margins",
    "DQ GeographicalCorrelation of Factors without Margins",
    "DQ TechnologicalCorrelation of Factors without Margins",
    "DQ DataCollection of Factors without Margins",
    "Source",
];

/// A closed set of labels that the model sees as an ordinal code.
///
/// The code of a value is its position in `ALL`, matching the label encoding
/// used when the model was trained.
pub trait Categorical: Copy + PartialEq + Sized + 'static {
    /// Every allowed value, in encoding order.
    const ALL: &'static [Self];
    /// Form field name (used in error messages).
    const FIELD: &'static str;

    /// Human-readable label, as shown in the form.
    fn label(self) -> &'static str;

    /// Ordinal code fed to the scaler.
    fn code(self) -> f64 {
        Self::ALL.iter().position(|c| *c == self).unwrap_or(0) as f64
    }

    /// Parse a label, ignoring surrounding whitespace, ASCII case and commas.
    fn from_label(raw: &str) -> Option<Self> {
        let wanted = normalize_label(raw);
        Self::ALL
            .iter()
            .copied()
            .find(|c| normalize_label(c.label()) == wanted)
    }

    fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|c| *c == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    fn prev(self) -> Self {
        let idx = Self::ALL.iter().position(|c| *c == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

fn normalize_label(raw: &str) -> String {
    raw.replace(',', " ")
        .split_whitespace()
        .map(|w| w.to_ascii_lowercase())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Greenhouse gas being estimated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Substance {
    #[serde(rename = "carbon dioxide")]
    CarbonDioxide,
    #[serde(rename = "methane")]
    Methane,
    #[serde(rename = "nitrous oxide")]
    NitrousOxide,
    #[serde(rename = "other GHGs")]
    OtherGhgs,
}

impl Categorical for Substance {
    const ALL: &'static [Self] = &[
        Substance::CarbonDioxide,
        Substance::Methane,
        Substance::NitrousOxide,
        Substance::OtherGhgs,
    ];
    const FIELD: &'static str = "substance";

    fn label(self) -> &'static str {
        match self {
            Substance::CarbonDioxide => "carbon dioxide",
            Substance::Methane => "methane",
            Substance::NitrousOxide => "nitrous oxide",
            Substance::OtherGhgs => "other GHGs",
        }
    }
}

/// Reporting unit of the emission factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Unit {
    #[serde(rename = "kg/2018 USD, purchaser price")]
    KgPerUsd,
    #[serde(rename = "kg CO2e/2018 USD, purchaser price")]
    KgCo2ePerUsd,
}

impl Categorical for Unit {
    const ALL: &'static [Self] = &[Unit::KgPerUsd, Unit::KgCo2ePerUsd];
    const FIELD: &'static str = "unit";

    fn label(self) -> &'static str {
        match self {
            Unit::KgPerUsd => "kg/2018 USD, purchaser price",
            Unit::KgCo2ePerUsd => "kg CO2e/2018 USD, purchaser price",
        }
    }
}

/// Whether the factor describes a single commodity or a whole industry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Source {
    Commodity,
    Industry,
}

impl Categorical for Source {
    const ALL: &'static [Self] = &[Source::Commodity, Source::Industry];
    const FIELD: &'static str = "source";

    fn label(self) -> &'static str {
        match self {
            Source::Commodity => "Commodity",
            Source::Industry => "Industry",
        }
    }
}

/// Untyped form state.
///
/// Categorical fields are free strings here; nothing has been checked yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawForm {
    pub substance: String,
    pub unit: String,
    pub source: String,
    pub supply_wo_margin: f64,
    pub margin: f64,
    pub dq_reliability: f64,
    pub dq_temporal: f64,
    pub dq_geo: f64,
    pub dq_tech: f64,
    pub dq_data: f64,
}

impl Default for RawForm {
    /// First option of every select box, zero for every number and slider.
    fn default() -> Self {
        Self {
            substance: Substance::CarbonDioxide.label().to_string(),
            unit: Unit::KgPerUsd.label().to_string(),
            source: Source::Commodity.label().to_string(),
            supply_wo_margin: 0.0,
            margin: 0.0,
            dq_reliability: 0.0,
            dq_temporal: 0.0,
            dq_geo: 0.0,
            dq_tech: 0.0,
            dq_data: 0.0,
        }
    }
}

/// A validated prediction request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionRequest {
    pub substance: Substance,
    pub unit: Unit,
    pub source: Source,
    /// Supply chain emission factor before margins (>= 0).
    pub supply_wo_margin: f64,
    /// Margin of the emission factor (>= 0).
    pub margin: f64,
    pub dq_reliability: f64,
    pub dq_temporal: f64,
    pub dq_geo: f64,
    pub dq_tech: f64,
    pub dq_data: f64,
}

/// Model inputs in canonical schema order.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    values: [f64; FEATURE_COUNT],
}

impl FeatureVector {
    pub fn from_values(values: [f64; FEATURE_COUNT]) -> Self {
        Self { values }
    }

    pub fn values(&self) -> &[f64; FEATURE_COUNT] {
        &self.values
    }

    pub fn names(&self) -> &'static [&'static str; FEATURE_COUNT] {
        &FEATURE_NAMES
    }

    /// Look up a value by its canonical feature name.
    pub fn get(&self, name: &str) -> Option<f64> {
        FEATURE_NAMES
            .iter()
            .position(|n| *n == name)
            .map(|idx| self.values[idx])
    }

    /// `(name, value)` pairs in schema order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        FEATURE_NAMES.iter().copied().zip(self.values.iter().copied())
    }

    pub fn to_dvector(&self) -> DVector<f64> {
        DVector::from_row_slice(&self.values)
    }
}

/// Feature vector after the scaler transform.
#[derive(Debug, Clone, PartialEq)]
pub struct ScaledVector {
    pub values: DVector<f64>,
}

impl ScaledVector {
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        FEATURE_NAMES.iter().copied().zip(self.values.iter().copied())
    }
}

/// The model output for one request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub value: f64,
}

/// Everything computed for one prediction, kept for reports and exports.
#[derive(Debug, Clone)]
pub struct PredictionBreakdown {
    pub features: FeatureVector,
    pub scaled: ScaledVector,
    /// Per-feature `coef * scaled` terms, schema order.
    pub contributions: Vec<f64>,
    pub intercept: f64,
    pub prediction: Prediction,
}
