//! Command line argument parsing for the aidsift CLI using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// aidsift - disaster message classification pipeline
#[derive(Parser, Debug, Clone)]
#[command(name = "aidsift")]
#[command(about = "Multi-label disaster message classification pipeline")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct AidsiftArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl AidsiftArgs {
    /// Get the effective verbosity level.
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Output format for command results.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable tables and stage lines.
    Human,
    /// JSON output.
    Json,
}

/// Available CLI commands.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Build the clean dataset from raw messages and categories
    Process(ProcessArgs),

    /// Train the classification pipeline on a clean dataset
    Train(TrainArgs),

    /// Classify one message with a trained pipeline
    Predict(PredictArgs),
}

/// Arguments for building the clean dataset.
#[derive(Parser, Debug, Clone)]
pub struct ProcessArgs {
    /// Path to the raw messages CSV file
    #[arg(value_name = "MESSAGES_CSV")]
    pub messages_path: PathBuf,

    /// Path to the raw categories CSV file
    #[arg(value_name = "CATEGORIES_CSV")]
    pub categories_path: PathBuf,

    /// Destination path for the clean dataset
    #[arg(value_name = "DATASET_OUT")]
    pub dataset_path: PathBuf,
}

/// Arguments for training the pipeline.
#[derive(Parser, Debug, Clone)]
pub struct TrainArgs {
    /// Path to the clean dataset
    #[arg(value_name = "DATASET")]
    pub dataset_path: PathBuf,

    /// Destination path for the trained pipeline artifact
    #[arg(value_name = "MODEL_OUT")]
    pub model_path: PathBuf,

    /// Fraction of records held out for evaluation
    #[arg(long, default_value = "0.2")]
    pub test_fraction: f64,

    /// Random seed for the split and the forests
    #[arg(long, default_value = "42")]
    pub seed: u64,

    /// Number of trees per category forest
    #[arg(long, default_value = "50")]
    pub trees: usize,
}

/// Arguments for classifying one message.
#[derive(Parser, Debug, Clone)]
pub struct PredictArgs {
    /// Path to the trained pipeline artifact
    #[arg(value_name = "MODEL")]
    pub model_path: PathBuf,

    /// Message text to classify
    #[arg(value_name = "TEXT")]
    pub text: String,
}
