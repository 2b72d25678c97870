//! Prediction form state.
//!
//! The form holds typed selections for the three select boxes and plain
//! numbers for the rest. Numbers can be nudged with the arrow keys or typed in;
//! typed values are only range-checked when the form is submitted.

use crate::domain::{Categorical, RawForm, Source, Substance, Unit};

/// Arrow-key step for numeric inputs and sliders.
pub const STEP: f64 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Select,
    Number,
    Slider,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Substance,
    Unit,
    Source,
    SupplyWoMargin,
    Margin,
    DqReliability,
    DqTemporal,
    DqGeo,
    DqTech,
    DqData,
}

impl Field {
    pub const ALL: [Field; 10] = [
        Field::Substance,
        Field::Unit,
        Field::Source,
        Field::SupplyWoMargin,
        Field::Margin,
        Field::DqReliability,
        Field::DqTemporal,
        Field::DqGeo,
        Field::DqTech,
        Field::DqData,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Field::Substance => "Substance",
            Field::Unit => "Unit",
            Field::Source => "Source",
            Field::SupplyWoMargin => "Supply Chain Emission Factors without Margins",
            Field::Margin => "Margins of Supply Chain Emission Factors",
            Field::DqReliability => "DQ Reliability",
            Field::DqTemporal => "DQ Temporal Correlation",
            Field::DqGeo => "DQ Geographical Correlation",
            Field::DqTech => "DQ Technological Correlation",
            Field::DqData => "DQ Data Collection",
        }
    }

    /// Inline help shown while the field is selected.
    pub fn help(self) -> &'static str {
        match self {
            Field::Substance => "Choose the greenhouse gas to analyze.",
            Field::Unit => "Standardizes emissions across gases.",
            Field::Source => "Commodity: single product; Industry: whole sector.",
            Field::SupplyWoMargin => "Base emission factor before adding margin.",
            Field::Margin => "Buffer for uncertainty.",
            Field::DqReliability => "Reliability of the source data (0 to 1).",
            Field::DqTemporal => "How well the data's time period matches (0 to 1).",
            Field::DqGeo => "How well the data's geography matches (0 to 1).",
            Field::DqTech => "How well the data's technology matches (0 to 1).",
            Field::DqData => "Completeness of the data collection (0 to 1).",
        }
    }

    pub fn kind(self) -> FieldKind {
        match self {
            Field::Substance | Field::Unit | Field::Source => FieldKind::Select,
            Field::SupplyWoMargin | Field::Margin => FieldKind::Number,
            _ => FieldKind::Slider,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormState {
    pub substance: Substance,
    pub unit: Unit,
    pub source: Source,
    pub supply_wo_margin: f64,
    pub margin: f64,
    /// Reliability, temporal, geographical, technological, data collection.
    pub dq: [f64; 5],
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            substance: Substance::CarbonDioxide,
            unit: Unit::KgPerUsd,
            source: Source::Commodity,
            supply_wo_margin: 0.0,
            margin: 0.0,
            dq: [0.0; 5],
        }
    }
}

impl FormState {
    /// Current value of a field, as displayed.
    pub fn display_value(&self, field: Field) -> String {
        match field {
            Field::Substance => self.substance.label().to_string(),
            Field::Unit => self.unit.label().to_string(),
            Field::Source => self.source.label().to_string(),
            _ => format!("{:.2}", self.number(field).unwrap_or(0.0)),
        }
    }

    pub fn number(&self, field: Field) -> Option<f64> {
        match field {
            Field::SupplyWoMargin => Some(self.supply_wo_margin),
            Field::Margin => Some(self.margin),
            Field::DqReliability => Some(self.dq[0]),
            Field::DqTemporal => Some(self.dq[1]),
            Field::DqGeo => Some(self.dq[2]),
            Field::DqTech => Some(self.dq[3]),
            Field::DqData => Some(self.dq[4]),
            Field::Substance | Field::Unit | Field::Source => None,
        }
    }

    /// Overwrite a numeric field. Select fields are ignored.
    pub fn set_number(&mut self, field: Field, value: f64) {
        let slot = match field {
            Field::SupplyWoMargin => &mut self.supply_wo_margin,
            Field::Margin => &mut self.margin,
            Field::DqReliability => &mut self.dq[0],
            Field::DqTemporal => &mut self.dq[1],
            Field::DqGeo => &mut self.dq[2],
            Field::DqTech => &mut self.dq[3],
            Field::DqData => &mut self.dq[4],
            Field::Substance | Field::Unit | Field::Source => return,
        };
        *slot = value;
    }

    /// Arrow-key adjustment: cycle selects, step numbers.
    ///
    /// Numbers never step below 0; sliders stay within [0, 1].
    pub fn adjust(&mut self, field: Field, delta: i32) {
        let forward = delta >= 0;
        match field {
            Field::Substance => {
                self.substance = if forward { self.substance.next() } else { self.substance.prev() };
            }
            Field::Unit => {
                self.unit = if forward { self.unit.next() } else { self.unit.prev() };
            }
            Field::Source => {
                self.source = if forward { self.source.next() } else { self.source.prev() };
            }
            _ => {
                let current = self.number(field).unwrap_or(0.0);
                let raw = current + delta as f64 * STEP;
                // Typed values keep their precision; grid values stay on the grid.
                let stepped = if on_step_grid(current) { round_to_step(raw) } else { raw };
                let upper = if field.kind() == FieldKind::Slider { 1.0 } else { f64::INFINITY };
                self.set_number(field, stepped.clamp(0.0, upper));
            }
        }
    }

    pub fn to_raw_form(&self) -> RawForm {
        RawForm {
            substance: self.substance.label().to_string(),
            unit: self.unit.label().to_string(),
            source: self.source.label().to_string(),
            supply_wo_margin: self.supply_wo_margin,
            margin: self.margin,
            dq_reliability: self.dq[0],
            dq_temporal: self.dq[1],
            dq_geo: self.dq[2],
            dq_tech: self.dq[3],
            dq_data: self.dq[4],
        }
    }
}

/// Snap to the step grid so repeated nudges don't accumulate float noise.
fn round_to_step(v: f64) -> f64 {
    (v / STEP).round() * STEP
}

fn on_step_grid(v: f64) -> bool {
    let steps = v / STEP;
    (steps - steps.round()).abs() < 1e-6
}

/// Parse a typed number. Accepts a leading sign, decimals and exponents.
pub fn parse_number(input: &str) -> Option<f64> {
    let v = input.trim().parse::<f64>().ok()?;
    v.is_finite().then_some(v)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_form_matches_default_raw_form() {
        assert_eq!(FormState::default().to_raw_form(), RawForm::default());
    }

    #[test]
    fn sliders_clamp_to_unit_interval() {
        let mut form = FormState::default();
        form.adjust(Field::DqGeo, -1);
        assert_eq!(form.dq[2], 0.0);

        form.set_number(Field::DqGeo, 0.995);
        form.adjust(Field::DqGeo, 1);
        assert_eq!(form.dq[2], 1.0);
    }

    #[test]
    fn number_inputs_have_no_upper_bound() {
        let mut form = FormState::default();
        form.set_number(Field::Margin, 5.0);
        form.adjust(Field::Margin, 1);
        assert!((form.margin - 5.01).abs() < 1e-9);
        form.set_number(Field::Margin, 0.0);
        form.adjust(Field::Margin, -1);
        assert_eq!(form.margin, 0.0);
    }

    #[test]
    fn selects_cycle() {
        let mut form = FormState::default();
        form.adjust(Field::Substance, -1);
        assert_eq!(form.substance, Substance::OtherGhgs);
        form.adjust(Field::Source, 1);
        assert_eq!(form.source, Source::Industry);
        assert_eq!(form.display_value(Field::Source), "Industry");
    }

    #[test]
    fn repeated_steps_stay_on_grid() {
        let mut form = FormState::default();
        for _ in 0..30 {
            form.adjust(Field::DqData, 1);
        }
        assert_eq!(form.display_value(Field::DqData), "0.30");
        assert!((form.dq[4] - 0.3).abs() < 1e-12);
    }

    #[test]
    fn stepping_a_typed_value_keeps_its_precision() {
        let mut form = FormState::default();
        form.set_number(Field::SupplyWoMargin, 1.2345);
        form.adjust(Field::SupplyWoMargin, 1);
        assert!((form.supply_wo_margin - 1.2445).abs() < 1e-12);
        form.adjust(Field::SupplyWoMargin, -2);
        assert!((form.supply_wo_margin - 1.2245).abs() < 1e-12);

        form.set_number(Field::DqTech, 0.995);
        form.adjust(Field::DqTech, -1);
        assert!((form.dq[3] - 0.985).abs() < 1e-12);
    }

    #[test]
    fn parse_number_rejects_garbage() {
        assert_eq!(parse_number(" 1.25 "), Some(1.25));
        assert_eq!(parse_number("-3"), Some(-3.0));
        assert_eq!(parse_number("1e-2"), Some(0.01));
        assert_eq!(parse_number("abc"), None);
        assert_eq!(parse_number("inf"), None);
    }
}
