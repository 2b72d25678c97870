//! Built-in datasets.

pub mod demo;

pub use demo::*;
