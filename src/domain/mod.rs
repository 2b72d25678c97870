//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the categorical form enums (`Substance`, `Unit`, `Source`)
//! - raw and validated requests (`RawForm`, `PredictionRequest`)
//! - model-facing vectors and outputs (`FeatureVector`, `ScaledVector`, `Prediction`)

pub mod types;

pub use types::*;
