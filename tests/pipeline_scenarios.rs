use std::fs::File;
use std::io::Write;

use tempfile::TempDir;

use aidsift::dataset::builder::build_clean_dataset;
use aidsift::dataset::io::{load_dataset, read_categories_csv, read_messages_csv, save_dataset};
use aidsift::error::Result;
use aidsift::ml::forest::ForestConfig;
use aidsift::ml::metrics::evaluate;
use aidsift::ml::pipeline::TrainedPipeline;
use aidsift::ml::train_test_split;

/// A small but non-trivial corpus: three categories, imbalanced prevalence,
/// duplicate rows, and one unmatched identifier on each side.
fn write_raw_files(dir: &TempDir) -> (std::path::PathBuf, std::path::PathBuf) {
    let messages_path = dir.path().join("messages.csv");
    let categories_path = dir.path().join("categories.csv");

    let mut messages = File::create(&messages_path).unwrap();
    writeln!(messages, "id,message,original,genre").unwrap();
    writeln!(messages, "1,Water is urgently needed,,direct").unwrap();
    writeln!(messages, "2,We need water and food supplies,,direct").unwrap();
    writeln!(messages, "3,People are thirsty send drinking water,,direct").unwrap();
    writeln!(messages, "4,Food shortage after the storm,,news").unwrap();
    writeln!(messages, "5,Crops destroyed families need food,,news").unwrap();
    writeln!(messages, "6,Road blocked by debris near the bridge,,social").unwrap();
    writeln!(messages, "7,Weather report says heavy rain tomorrow,,news").unwrap();
    writeln!(messages, "8,The airport reopened this morning,,news").unwrap();
    writeln!(messages, "8,The airport reopened this morning,,news").unwrap();
    writeln!(messages, "99,No category record exists for this one,,direct").unwrap();

    let mut categories = File::create(&categories_path).unwrap();
    writeln!(categories, "id,categories").unwrap();
    writeln!(categories, "1,related-1;water-1;food-0").unwrap();
    writeln!(categories, "2,related-1;water-1;food-1").unwrap();
    writeln!(categories, "3,related-1;water-1;food-0").unwrap();
    writeln!(categories, "4,related-1;water-0;food-1").unwrap();
    writeln!(categories, "5,related-1;water-0;food-1").unwrap();
    writeln!(categories, "6,related-1;water-0;food-0").unwrap();
    writeln!(categories, "7,related-0;water-0;food-0").unwrap();
    writeln!(categories, "8,related-0;water-0;food-0").unwrap();
    writeln!(categories, "100,related-1;water-0;food-0").unwrap();

    (messages_path, categories_path)
}

#[test]
fn etl_builds_expected_clean_records() -> Result<()> {
    let dir = TempDir::new().unwrap();
    let (messages_path, categories_path) = write_raw_files(&dir);

    let messages = read_messages_csv(&messages_path)?;
    let categories = read_categories_csv(&categories_path)?;
    let (dataset, report) = build_clean_dataset(&messages, &categories)?;

    assert_eq!(dataset.categories, vec!["related", "water", "food"]);
    assert_eq!(dataset.records.len(), 8);
    assert_eq!(report.unmatched_messages, 1);
    assert_eq!(report.unmatched_categories, 1);
    assert_eq!(report.duplicates_removed, 1);

    let first = &dataset.records[0];
    assert_eq!(first.id, 1);
    assert_eq!(first.labels, vec![true, true, false]);

    // Pre-dedup join count never exceeds either input.
    let pre_dedup = report.records_out + report.duplicates_removed;
    assert!(pre_dedup <= messages.len().min(categories.len()));

    Ok(())
}

#[test]
fn etl_is_idempotent() -> Result<()> {
    let dir = TempDir::new().unwrap();
    let (messages_path, categories_path) = write_raw_files(&dir);

    let messages = read_messages_csv(&messages_path)?;
    let categories = read_categories_csv(&categories_path)?;

    let (first, first_report) = build_clean_dataset(&messages, &categories)?;
    let (second, second_report) = build_clean_dataset(&messages, &categories)?;

    assert_eq!(first, second);
    assert_eq!(first_report, second_report);
    Ok(())
}

#[test]
fn clean_dataset_survives_the_store() -> Result<()> {
    let dir = TempDir::new().unwrap();
    let (messages_path, categories_path) = write_raw_files(&dir);

    let messages = read_messages_csv(&messages_path)?;
    let categories = read_categories_csv(&categories_path)?;
    let (dataset, _) = build_clean_dataset(&messages, &categories)?;

    let store_path = dir.path().join("dataset.jsonl");
    save_dataset(&dataset, &store_path)?;
    let loaded = load_dataset(&store_path)?;

    assert_eq!(loaded, dataset);
    Ok(())
}

fn forest_config() -> ForestConfig {
    ForestConfig {
        n_trees: 30,
        seed: 42,
        // Tiny corpus: let every split see every feature so the
        // discriminative tokens are actually used.
        max_features: Some(usize::MAX),
        ..Default::default()
    }
}

#[test]
fn end_to_end_train_predict_and_round_trip() -> Result<()> {
    let dir = TempDir::new().unwrap();
    let (messages_path, categories_path) = write_raw_files(&dir);

    let messages = read_messages_csv(&messages_path)?;
    let categories = read_categories_csv(&categories_path)?;
    let (dataset, _) = build_clean_dataset(&messages, &categories)?;

    let texts: Vec<String> = dataset.records.iter().map(|r| r.message.clone()).collect();
    let labels = dataset.label_matrix();

    let pipeline =
        TrainedPipeline::train(&texts, &labels, &dataset.categories, &forest_config())?;

    // The water-heavy training corpus must classify a water request as water.
    let result = pipeline.predict("we need water")?;
    let water = result.iter().find(|(name, _)| name == "water").unwrap();
    assert!(water.1, "expected water=true, got {result:?}");

    // Round trip: the reloaded artifact predicts identically on a fixed batch.
    let model_path = dir.path().join("classifier.bin");
    pipeline.save(&model_path)?;
    let loaded = TrainedPipeline::load(&model_path)?;

    let batch: Vec<String> = vec![
        "we need water".into(),
        "send food".into(),
        "the weather is fine".into(),
        "".into(),
    ];
    assert_eq!(pipeline.predict_batch(&batch)?, loaded.predict_batch(&batch)?);
    assert_eq!(pipeline.categories(), loaded.categories());

    Ok(())
}

#[test]
fn evaluation_on_held_out_split_reports_every_category() -> Result<()> {
    let dir = TempDir::new().unwrap();
    let (messages_path, categories_path) = write_raw_files(&dir);

    let messages = read_messages_csv(&messages_path)?;
    let categories = read_categories_csv(&categories_path)?;
    let (dataset, _) = build_clean_dataset(&messages, &categories)?;

    let (train_idx, test_idx) = train_test_split(dataset.len(), 0.25, 42)?;
    assert_eq!(train_idx.len() + test_idx.len(), dataset.len());

    let pick = |indices: &[usize]| -> (Vec<String>, Vec<Vec<bool>>) {
        (
            indices
                .iter()
                .map(|&i| dataset.records[i].message.clone())
                .collect(),
            indices
                .iter()
                .map(|&i| dataset.records[i].labels.clone())
                .collect(),
        )
    };
    let (train_texts, train_labels) = pick(&train_idx);
    let (test_texts, test_labels) = pick(&test_idx);

    let pipeline = TrainedPipeline::train(
        &train_texts,
        &train_labels,
        &dataset.categories,
        &forest_config(),
    )?;

    let predictions = pipeline.predict_batch(&test_texts)?;
    let reports = evaluate(&dataset.categories, &test_labels, &predictions)?;

    assert_eq!(reports.len(), dataset.categories.len());
    for report in &reports {
        assert!((0.0..=1.0).contains(&report.precision));
        assert!((0.0..=1.0).contains(&report.recall));
        assert!((0.0..=1.0).contains(&report.f1));
    }
    Ok(())
}

#[test]
fn training_with_same_seed_is_reproducible() -> Result<()> {
    let dir = TempDir::new().unwrap();
    let (messages_path, categories_path) = write_raw_files(&dir);

    let messages = read_messages_csv(&messages_path)?;
    let categories = read_categories_csv(&categories_path)?;
    let (dataset, _) = build_clean_dataset(&messages, &categories)?;

    let texts: Vec<String> = dataset.records.iter().map(|r| r.message.clone()).collect();
    let labels = dataset.label_matrix();

    let a = TrainedPipeline::train(&texts, &labels, &dataset.categories, &forest_config())?;
    let b = TrainedPipeline::train(&texts, &labels, &dataset.categories, &forest_config())?;

    let batch: Vec<String> = texts.clone();
    assert_eq!(a.predict_batch(&batch)?, b.predict_batch(&batch)?);
    Ok(())
}
