//! Command implementations for the aidsift CLI.

use anyhow::Context;
use serde_json::json;

use crate::cli::args::*;
use crate::dataset::builder::build_clean_dataset;
use crate::dataset::io::{load_dataset, read_categories_csv, read_messages_csv, save_dataset};
use crate::error::Result;
use crate::ml::forest::ForestConfig;
use crate::ml::metrics::evaluate;
use crate::ml::pipeline::TrainedPipeline;
use crate::ml::train_test_split;

/// Execute a CLI command.
pub fn execute_command(args: AidsiftArgs) -> Result<()> {
    match &args.command {
        Command::Process(process_args) => process_data(process_args.clone(), &args),
        Command::Train(train_args) => train_model(train_args.clone(), &args),
        Command::Predict(predict_args) => predict_message(predict_args.clone(), &args),
    }
}

/// Build and save the clean dataset.
fn process_data(args: ProcessArgs, cli_args: &AidsiftArgs) -> Result<()> {
    let verbosity = cli_args.verbosity();

    if verbosity > 0 {
        println!(
            "Loading data...\n    MESSAGES: {}\n    CATEGORIES: {}",
            args.messages_path.display(),
            args.categories_path.display()
        );
    }
    let messages = read_messages_csv(&args.messages_path)
        .with_context(|| format!("reading messages from {}", args.messages_path.display()))?;
    let categories = read_categories_csv(&args.categories_path)
        .with_context(|| format!("reading categories from {}", args.categories_path.display()))?;

    if verbosity > 0 {
        println!("Cleaning data...");
    }
    let (dataset, report) = build_clean_dataset(&messages, &categories)?;

    if verbosity > 0 {
        println!(
            "    {} records kept, {} unmatched messages dropped, \
             {} unmatched categories dropped, {} duplicates removed",
            report.records_out,
            report.unmatched_messages,
            report.unmatched_categories,
            report.duplicates_removed
        );
        println!(
            "Saving data...\n    DATASET: {}",
            args.dataset_path.display()
        );
    }
    save_dataset(&dataset, &args.dataset_path)
        .with_context(|| format!("saving dataset to {}", args.dataset_path.display()))?;

    match cli_args.output_format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Human => {
            if verbosity > 0 {
                println!("Cleaned data saved!");
            }
        }
    }
    Ok(())
}

/// Train, evaluate, and save the pipeline.
fn train_model(args: TrainArgs, cli_args: &AidsiftArgs) -> Result<()> {
    let verbosity = cli_args.verbosity();

    if verbosity > 0 {
        println!("Loading data...\n    DATASET: {}", args.dataset_path.display());
    }
    let dataset = load_dataset(&args.dataset_path)
        .with_context(|| format!("loading dataset from {}", args.dataset_path.display()))?;

    let (train_idx, test_idx) =
        train_test_split(dataset.len(), args.test_fraction, args.seed)?;

    let pick_messages = |indices: &[usize]| -> Vec<String> {
        indices
            .iter()
            .map(|&i| dataset.records[i].message.clone())
            .collect()
    };
    let pick_labels = |indices: &[usize]| -> Vec<Vec<bool>> {
        indices
            .iter()
            .map(|&i| dataset.records[i].labels.clone())
            .collect()
    };

    let train_messages = pick_messages(&train_idx);
    let train_labels = pick_labels(&train_idx);
    let test_messages = pick_messages(&test_idx);
    let test_labels = pick_labels(&test_idx);

    if verbosity > 0 {
        println!(
            "Training model on {} records ({} held out, {} categories)...",
            train_messages.len(),
            test_messages.len(),
            dataset.categories.len()
        );
    }
    let forest_config = ForestConfig {
        n_trees: args.trees,
        seed: args.seed,
        ..Default::default()
    };
    let pipeline = TrainedPipeline::train(
        &train_messages,
        &train_labels,
        &dataset.categories,
        &forest_config,
    )?;

    if verbosity > 0 {
        println!("Evaluating model...");
    }
    let predictions = pipeline.predict_batch(&test_messages)?;
    let reports = evaluate(&dataset.categories, &test_labels, &predictions)?;

    match cli_args.output_format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&reports)?),
        OutputFormat::Human => {
            if verbosity > 0 {
                println!(
                    "{:<24} {:>9} {:>9} {:>9} {:>9}",
                    "CATEGORY", "PRECISION", "RECALL", "F1", "SUPPORT"
                );
                for report in &reports {
                    println!(
                        "{:<24} {:>9.3} {:>9.3} {:>9.3} {:>9}",
                        report.category,
                        report.precision,
                        report.recall,
                        report.f1,
                        report.support
                    );
                }
            }
        }
    }

    if verbosity > 0 {
        println!("Saving model...\n    MODEL: {}", args.model_path.display());
    }
    pipeline.save(&args.model_path)
        .with_context(|| format!("saving model to {}", args.model_path.display()))?;

    if verbosity > 0 && cli_args.output_format == OutputFormat::Human {
        println!("Trained model saved!");
    }
    Ok(())
}

/// Classify one message with a saved pipeline.
fn predict_message(args: PredictArgs, cli_args: &AidsiftArgs) -> Result<()> {
    let pipeline = TrainedPipeline::load(&args.model_path)
        .with_context(|| format!("loading model from {}", args.model_path.display()))?;
    let result = pipeline.predict(&args.text)?;

    match cli_args.output_format {
        OutputFormat::Json => {
            let map: serde_json::Map<String, serde_json::Value> = result
                .into_iter()
                .map(|(name, present)| (name, json!(present)))
                .collect();
            println!("{}", serde_json::to_string_pretty(&map)?);
        }
        OutputFormat::Human => {
            for (name, present) in result {
                if present {
                    println!("{name}");
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_missing_model_error_names_the_path() {
        let args = AidsiftArgs {
            verbose: 0,
            quiet: true,
            output_format: OutputFormat::Human,
            command: Command::Predict(PredictArgs {
                model_path: PathBuf::from("/nonexistent/model.bin"),
                text: "we need water".to_string(),
            }),
        };

        let err = execute_command(args).unwrap_err();
        assert!(err.to_string().contains("loading model from /nonexistent/model.bin"));
    }

    #[test]
    fn test_missing_messages_error_names_the_path() {
        let args = AidsiftArgs {
            verbose: 0,
            quiet: true,
            output_format: OutputFormat::Human,
            command: Command::Process(ProcessArgs {
                messages_path: PathBuf::from("/nonexistent/messages.csv"),
                categories_path: PathBuf::from("/nonexistent/categories.csv"),
                dataset_path: PathBuf::from("/nonexistent/out.jsonl"),
            }),
        };

        let err = execute_command(args).unwrap_err();
        assert!(err.to_string().contains("reading messages from /nonexistent/messages.csv"));
    }
}
