//! Raw CSV ingestion and the clean-dataset store.
//!
//! The raw inputs are two CSV files with header rows (`id,message,original,
//! genre` and `id,categories`). The clean dataset is stored as JSON lines:
//! a header object carrying the category universe, then one record per
//! line. The storage format is an implementation detail of this module;
//! callers only use the load/save contract.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use csv::ReaderBuilder;
use serde::{Deserialize, Serialize};

use crate::dataset::record::{CategoryRecord, CleanDataset, CleanRecord, MessageRecord};
use crate::error::{AidsiftError, Result};

/// Header line of the dataset store.
#[derive(Debug, Serialize, Deserialize)]
struct DatasetHeader {
    categories: Vec<String>,
}

/// Read raw message records from a CSV file.
pub fn read_messages_csv<P: AsRef<Path>>(path: P) -> Result<Vec<MessageRecord>> {
    let mut reader = ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path.as_ref())?;

    let mut records = Vec::new();
    for row in reader.deserialize() {
        let record: MessageRecord = row?;
        records.push(record);
    }
    Ok(records)
}

/// Read raw category records from a CSV file.
pub fn read_categories_csv<P: AsRef<Path>>(path: P) -> Result<Vec<CategoryRecord>> {
    let mut reader = ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path.as_ref())?;

    let mut records = Vec::new();
    for row in reader.deserialize() {
        let record: CategoryRecord = row?;
        records.push(record);
    }
    Ok(records)
}

/// Save a clean dataset to the JSONL store.
pub fn save_dataset<P: AsRef<Path>>(dataset: &CleanDataset, path: P) -> Result<()> {
    let file = File::create(path.as_ref())?;
    let mut writer = BufWriter::new(file);

    let header = DatasetHeader {
        categories: dataset.categories.clone(),
    };
    serde_json::to_writer(&mut writer, &header)?;
    writer.write_all(b"\n")?;

    for record in &dataset.records {
        serde_json::to_writer(&mut writer, record)?;
        writer.write_all(b"\n")?;
    }

    writer.flush()?;
    Ok(())
}

/// Load a clean dataset from the JSONL store.
///
/// A missing header, an unparsable line, or a record whose label count does
/// not match the category universe fails the load.
pub fn load_dataset<P: AsRef<Path>>(path: P) -> Result<CleanDataset> {
    let file = File::open(path.as_ref())?;
    let reader = BufReader::new(file);
    let mut lines = reader.lines();

    let header_line = lines
        .next()
        .transpose()?
        .ok_or_else(|| AidsiftError::data("dataset store is empty (missing header)"))?;
    let header: DatasetHeader = serde_json::from_str(&header_line)?;

    let mut records = Vec::new();
    for line in lines {
        let line = line?;
        if line.is_empty() {
            continue;
        }
        let record: CleanRecord = serde_json::from_str(&line)?;
        if record.labels.len() != header.categories.len() {
            return Err(AidsiftError::data(format!(
                "record {} has {} labels, expected {}",
                record.id,
                record.labels.len(),
                header.categories.len()
            )));
        }
        records.push(record);
    }

    Ok(CleanDataset {
        categories: header.categories,
        records,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_dataset() -> CleanDataset {
        CleanDataset {
            categories: vec!["related".to_string(), "water".to_string()],
            records: vec![
                CleanRecord {
                    id: 1,
                    message: "Water is urgently needed".to_string(),
                    original: None,
                    genre: "direct".to_string(),
                    labels: vec![true, true],
                },
                CleanRecord {
                    id: 2,
                    message: "Storm update tonight".to_string(),
                    original: Some("Mizajou tanpèt".to_string()),
                    genre: "news".to_string(),
                    labels: vec![true, false],
                },
            ],
        }
    }

    #[test]
    fn test_dataset_store_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("dataset.jsonl");

        let dataset = sample_dataset();
        save_dataset(&dataset, &path).unwrap();
        let loaded = load_dataset(&path).unwrap();

        assert_eq!(loaded, dataset);
    }

    #[test]
    fn test_load_rejects_label_count_mismatch() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("dataset.jsonl");

        let mut file = File::create(&path).unwrap();
        writeln!(file, r#"{{"categories":["related","water","food"]}}"#).unwrap();
        writeln!(
            file,
            r#"{{"id":1,"message":"help","original":null,"genre":"direct","labels":[true,false]}}"#
        )
        .unwrap();

        let err = load_dataset(&path).unwrap_err();
        assert!(err.to_string().contains("expected 3"));
    }

    #[test]
    fn test_read_messages_csv() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("messages.csv");

        let mut file = File::create(&path).unwrap();
        writeln!(file, "id,message,original,genre").unwrap();
        writeln!(file, "1,Water is urgently needed,,direct").unwrap();
        writeln!(file, "2,Storm update tonight,Mizajou tanpèt,news").unwrap();

        let records = read_messages_csv(&path).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, 1);
        assert_eq!(records[0].original, None);
        assert_eq!(records[1].original.as_deref(), Some("Mizajou tanpèt"));
        assert_eq!(records[1].genre, "news");
    }

    #[test]
    fn test_read_categories_csv() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("categories.csv");

        let mut file = File::create(&path).unwrap();
        writeln!(file, "id,categories").unwrap();
        writeln!(file, "1,related-1;water-1;food-0").unwrap();

        let records = read_categories_csv(&path).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].categories, "related-1;water-1;food-0");
    }
}
