//! `ghg-predict` library crate.
//!
//! The binary (`ghg`) is a thin wrapper around this library so that:
//!
//! - the preprocessing/prediction pipeline is testable without spawning processes
//! - the CLI and the terminal dashboard share one code path
//! - code stays easy to navigate as the project grows

pub mod app;
pub mod cli;
pub mod config;
pub mod data;
pub mod debug;
pub mod domain;
pub mod error;
pub mod io;
pub mod logging;
pub mod math;
pub mod models;
pub mod preprocess;
pub mod report;
pub mod tui;
