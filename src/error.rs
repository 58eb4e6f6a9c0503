//! Error types for the aidsift library.
//!
//! All fallible operations in the crate return [`Result`], whose error type
//! is the [`AidsiftError`] enum. Data-integrity problems abort a run rather
//! than writing a partial dataset or a degraded model.
//!
//! # Examples
//!
//! ```
//! use aidsift::error::{AidsiftError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(AidsiftError::data("category universe mismatch"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {e}"),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for aidsift operations.
#[derive(Error, Debug)]
pub enum AidsiftError {
    /// I/O errors (file operations, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Data-integrity errors in the raw or cleaned dataset.
    #[error("Data error: {0}")]
    Data(String),

    /// Analysis-related errors (tokenization, normalization).
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Model-state errors (transform before fit, refit of a frozen model).
    #[error("Model error: {0}")]
    Model(String),

    /// Trained-pipeline artifact errors (corrupt, truncated, wrong version).
    #[error("Artifact error: {0}")]
    Artifact(String),

    /// Invalid argument passed to an operation.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// CSV parsing errors from raw input files.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON (de)serialization errors from the dataset store.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Anyhow error wrapper.
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with AidsiftError.
pub type Result<T> = std::result::Result<T, AidsiftError>;

impl AidsiftError {
    /// Create a new data-integrity error.
    pub fn data<S: Into<String>>(msg: S) -> Self {
        AidsiftError::Data(msg.into())
    }

    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        AidsiftError::Analysis(msg.into())
    }

    /// Create a new model-state error.
    pub fn model<S: Into<String>>(msg: S) -> Self {
        AidsiftError::Model(msg.into())
    }

    /// Create a new artifact error.
    pub fn artifact<S: Into<String>>(msg: S) -> Self {
        AidsiftError::Artifact(msg.into())
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        AidsiftError::InvalidArgument(msg.into())
    }
}
