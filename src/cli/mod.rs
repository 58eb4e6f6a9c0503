//! Command line interface for aidsift.
//!
//! Two pipeline entry points (`process` builds the clean dataset, `train`
//! fits and persists the model) plus a `predict` probe against a saved
//! artifact.

pub mod args;
pub mod commands;

pub use args::*;
pub use commands::*;
