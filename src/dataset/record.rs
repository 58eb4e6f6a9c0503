//! Record types for the raw inputs and the clean dataset.

use serde::{Deserialize, Serialize};

/// A raw message record as ingested from the messages file.
///
/// Immutable once ingested.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageRecord {
    /// Unique, stable identifier.
    pub id: u64,
    /// Message text (translated where applicable).
    pub message: String,
    /// Text in the original language, where it differs from `message`.
    #[serde(default)]
    pub original: Option<String>,
    /// Source genre: "direct", "news", "social".
    pub genre: String,
}

/// A raw category record: an identifier plus the packed category encoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRecord {
    /// Identifier shared with the corresponding message record.
    pub id: u64,
    /// Packed encoding of the form `name-value;name-value;...`.
    pub categories: String,
}

/// A merged, expanded record: message fields plus one boolean per category.
///
/// The label order matches the `categories` list of the owning
/// [`CleanDataset`]; the packed encoding is discarded during expansion.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CleanRecord {
    /// Unique identifier.
    pub id: u64,
    /// Message text.
    pub message: String,
    /// Original-language text, if any.
    #[serde(default)]
    pub original: Option<String>,
    /// Source genre.
    pub genre: String,
    /// One boolean per category, in dataset category order.
    pub labels: Vec<bool>,
}

/// The clean dataset: the fixed category universe plus its records.
///
/// Invariants: no two records share an identifier, and every record's
/// `labels` has exactly one entry per category name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanDataset {
    /// Ordered category names, uniform across all records.
    pub categories: Vec<String>,
    /// The clean records.
    pub records: Vec<CleanRecord>,
}

impl CleanDataset {
    /// Number of records in the dataset.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Per-record label rows, in record order.
    pub fn label_matrix(&self) -> Vec<Vec<bool>> {
        self.records.iter().map(|r| r.labels.clone()).collect()
    }
}
