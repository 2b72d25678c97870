//! Form validation and feature preprocessing.
//!
//! Two steps sit at the boundary between the form and the model:
//!
//! - `validate` turns an untyped `RawForm` into a `PredictionRequest`, rejecting
//!   unknown labels and out-of-range numbers with a typed error
//! - `preprocess` maps a request into the model's column order; it is pure and
//!   cannot fail
//!
//! Numeric fields are never altered here. Categorical fields become their
//! ordinal code (see `Categorical::code`).

use crate::domain::{
    Categorical, FeatureVector, PredictionRequest, RawForm, Source, Substance, Unit,
};
use crate::error::{AppError, EXIT_INPUT};

/// Why a form could not become a `PredictionRequest`.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("Unknown {field} '{value}' (expected one of: {allowed})")]
    UnknownCategory {
        field: &'static str,
        value: String,
        allowed: String,
    },

    #[error("{field} must be a finite number (got {value})")]
    NotFinite { field: &'static str, value: f64 },

    #[error("{field} must be >= 0 (got {value})")]
    Negative { field: &'static str, value: f64 },

    #[error("{field} must be within [0, 1] (got {value})")]
    OutOfRange { field: &'static str, value: f64 },
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::new(EXIT_INPUT, format!("Invalid input: {err}"))
    }
}

/// Validate a raw form into a typed request.
pub fn validate(form: &RawForm) -> Result<PredictionRequest, ValidationError> {
    let request = PredictionRequest {
        substance: parse_category::<Substance>(&form.substance)?,
        unit: parse_category::<Unit>(&form.unit)?,
        source: parse_category::<Source>(&form.source)?,
        supply_wo_margin: non_negative("supply_wo_margin", form.supply_wo_margin)?,
        margin: non_negative("margin", form.margin)?,
        dq_reliability: unit_interval("dq_reliability", form.dq_reliability)?,
        dq_temporal: unit_interval("dq_temporal", form.dq_temporal)?,
        dq_geo: unit_interval("dq_geo", form.dq_geo)?,
        dq_tech: unit_interval("dq_tech", form.dq_tech)?,
        dq_data: unit_interval("dq_data", form.dq_data)?,
    };

    tracing::debug!(?request, "form validated");
    Ok(request)
}

/// Map a request into the canonical feature vector.
pub fn preprocess(request: &PredictionRequest) -> FeatureVector {
    FeatureVector::from_values([
        request.substance.code(),
        request.unit.code(),
        request.supply_wo_margin,
        request.margin,
        request.dq_reliability,
        request.dq_temporal,
        request.dq_geo,
        request.dq_tech,
        request.dq_data,
        request.source.code(),
    ])
}

/// `validate` followed by `preprocess`.
pub fn preprocess_form(form: &RawForm) -> Result<FeatureVector, ValidationError> {
    validate(form).map(|request| preprocess(&request))
}

fn parse_category<C: Categorical>(raw: &str) -> Result<C, ValidationError> {
    C::from_label(raw).ok_or_else(|| ValidationError::UnknownCategory {
        field: C::FIELD,
        value: raw.to_string(),
        allowed: C::ALL
            .iter()
            .map(|c| format!("'{}'", c.label()))
            .collect::<Vec<_>>()
            .join(", "),
    })
}

fn finite(field: &'static str, value: f64) -> Result<f64, ValidationError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ValidationError::NotFinite { field, value })
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<f64, ValidationError> {
    let value = finite(field, value)?;
    if value < 0.0 {
        return Err(ValidationError::Negative { field, value });
    }
    Ok(value)
}

fn unit_interval(field: &'static str, value: f64) -> Result<f64, ValidationError> {
    let value = finite(field, value)?;
    if !(0.0..=1.0).contains(&value) {
        return Err(ValidationError::OutOfRange { field, value });
    }
    Ok(value)
}
