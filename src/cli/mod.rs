//! Command-line parsing for the GHG emission factor predictor.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the preprocessing/model code.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::ConfigOverrides;
use crate::domain::RawForm;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "ghg",
    version,
    about = "Supply Chain Emission Factor prediction dashboard"
)]
pub struct Cli {
    /// Model artifact (JSON). Overrides GHG_MODEL_PATH.
    #[arg(long, global = true, value_name = "JSON")]
    pub model: Option<PathBuf>,

    /// Scaler artifact (JSON). Overrides GHG_SCALER_PATH.
    #[arg(long, global = true, value_name = "JSON")]
    pub scaler: Option<PathBuf>,

    /// Defaults to `tui` when omitted.
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Tui)
    }

    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            model: self.model.clone(),
            scaler: self.scaler.clone(),
        }
    }
}

/// CLI subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Launch the interactive dashboard (Home / Visualizations / Prediction).
    Tui,
    /// Predict once from flags and print the result.
    Predict(PredictArgs),
    /// Print a summary of the loaded model and scaler.
    Inspect,
}

/// Form fields as flags. Labels are validated before prediction.
#[derive(Debug, Args, Clone)]
pub struct PredictArgs {
    /// Substance: carbon dioxide, methane, nitrous oxide, other GHGs.
    #[arg(long, default_value = "carbon dioxide")]
    pub substance: String,

    /// Unit: "kg/2018 USD, purchaser price" or "kg CO2e/2018 USD, purchaser price".
    #[arg(long, default_value = "kg/2018 USD, purchaser price")]
    pub unit: String,

    /// Source: Commodity or Industry.
    #[arg(long, default_value = "Commodity")]
    pub source: String,

    /// Supply Chain Emission Factors without Margins (>= 0).
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub supply_wo_margin: f64,

    /// Margins of Supply Chain Emission Factors (>= 0).
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub margin: f64,

    /// DQ Reliability score in [0, 1].
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub dq_reliability: f64,

    /// DQ Temporal Correlation score in [0, 1].
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub dq_temporal: f64,

    /// DQ Geographical Correlation score in [0, 1].
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub dq_geo: f64,

    /// DQ Technological Correlation score in [0, 1].
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub dq_tech: f64,

    /// DQ Data Collection score in [0, 1].
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub dq_data: f64,

    /// Print the per-feature contribution table.
    #[arg(long)]
    pub explain: bool,

    /// Write the prediction record to a JSON file.
    #[arg(long, value_name = "JSON")]
    pub export: Option<PathBuf>,
}

impl PredictArgs {
    pub fn to_form(&self) -> RawForm {
        RawForm {
            substance: self.substance.clone(),
            unit: self.unit.clone(),
            source: self.source.clone(),
            supply_wo_margin: self.supply_wo_margin,
            margin: self.margin,
            dq_reliability: self.dq_reliability,
            dq_temporal: self.dq_temporal,
            dq_geo: self.dq_geo,
            dq_tech: self.dq_tech,
            dq_data: self.dq_data,
        }
    }
}
