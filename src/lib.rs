//! # aidsift
//!
//! A multi-label classification pipeline for free-text disaster messages.
//!
//! The pipeline merges raw message and category records into a clean
//! labeled dataset, normalizes message text into tokens, learns a shared
//! TF-IDF representation plus one random-forest classifier per category,
//! evaluates per-category quality, and persists the trained pipeline as a
//! single atomic artifact for serving.
//!
//! ## Components
//!
//! - [`analysis`] - deterministic text normalization shared by training and
//!   serving
//! - [`dataset`] - raw-record ingestion, join/expand/dedup, dataset store
//! - [`ml`] - TF-IDF vectorizer, per-category classifier bank, evaluation,
//!   trained-pipeline persistence
//! - [`cli`] - `process` / `train` / `predict` entry points

pub mod analysis;
pub mod cli;
pub mod dataset;
pub mod error;
pub mod ml;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
