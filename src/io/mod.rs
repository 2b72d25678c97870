//! Input/output helpers.
//!
//! - model/scaler artifact loading (`artifacts`)
//! - prediction exports (JSON) (`export`)
//! - dataset picker for the sidebar upload control (`upload`)

pub mod artifacts;
pub mod export;
pub mod upload;

pub use artifacts::*;
pub use export::*;
pub use upload::*;
