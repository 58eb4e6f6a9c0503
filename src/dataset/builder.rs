//! Clean-dataset construction: join, expand, validate, dedup.
//!
//! Mirrors the ETL stage of the pipeline: raw messages and raw categories
//! are inner-joined on their shared identifier, the packed encoding is
//! expanded into one boolean per category, and exact-duplicate rows are
//! removed. Identifiers present in only one input are dropped by policy,
//! but counted and reported in the [`BuildReport`].

use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::dataset::encoding::CategoryEncoding;
use crate::dataset::record::{CategoryRecord, CleanDataset, CleanRecord, MessageRecord};
use crate::error::{AidsiftError, Result};

/// Counts reported by a dataset build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildReport {
    /// Raw message records read.
    pub messages_in: usize,
    /// Raw category records read.
    pub categories_in: usize,
    /// Message identifiers with no matching category record (dropped).
    pub unmatched_messages: usize,
    /// Category identifiers with no matching message record (dropped).
    pub unmatched_categories: usize,
    /// Exact-duplicate rows removed after the join.
    pub duplicates_removed: usize,
    /// Records in the final clean dataset.
    pub records_out: usize,
}

/// Build the clean dataset from the two raw record collections.
///
/// Inner-join semantics: one clean record per message whose identifier also
/// appears in the categories input. The category universe is taken from the
/// first joined record; every other record must carry the same category
/// names in the same order, and any deviation is fatal. After deduplication
/// no two records may share an identifier.
pub fn build_clean_dataset(
    messages: &[MessageRecord],
    categories: &[CategoryRecord],
) -> Result<(CleanDataset, BuildReport)> {
    // Index categories by id. A repeated id must carry the same encoding;
    // two encodings for one id is a conflict, not a duplicate.
    let mut by_id: HashMap<u64, &CategoryRecord> = HashMap::new();
    for record in categories {
        match by_id.entry(record.id) {
            Entry::Vacant(slot) => {
                slot.insert(record);
            }
            Entry::Occupied(slot) => {
                if slot.get().categories != record.categories {
                    return Err(AidsiftError::data(format!(
                        "category identifier {} has conflicting encodings {:?} and {:?}",
                        record.id,
                        slot.get().categories,
                        record.categories
                    )));
                }
            }
        }
    }

    let mut universe: Vec<String> = Vec::new();
    let mut records: Vec<CleanRecord> = Vec::new();
    let mut matched_ids: HashSet<u64> = HashSet::new();
    let mut unmatched_messages = 0usize;

    for message in messages {
        let Some(category) = by_id.get(&message.id) else {
            unmatched_messages += 1;
            continue;
        };
        matched_ids.insert(message.id);

        let encoding = CategoryEncoding::parse(&category.categories)?;

        if universe.is_empty() {
            universe = encoding.names().iter().map(|s| s.to_string()).collect();
            if universe.is_empty() {
                return Err(AidsiftError::data(format!(
                    "record {} has an empty category encoding",
                    message.id
                )));
            }
        } else if encoding.names() != universe.iter().map(String::as_str).collect::<Vec<_>>() {
            return Err(AidsiftError::data(format!(
                "record {} has category names {:?}, expected {:?}",
                message.id,
                encoding.names(),
                universe
            )));
        }

        records.push(CleanRecord {
            id: message.id,
            message: message.message.clone(),
            original: message.original.clone(),
            genre: message.genre.clone(),
            labels: encoding.values(),
        });
    }

    let unmatched_categories = by_id.len() - matched_ids.len();

    // Remove exact-duplicate rows, keeping the first occurrence.
    let before = records.len();
    let mut seen: HashSet<CleanRecord> = HashSet::new();
    records.retain(|record| seen.insert(record.clone()));
    let duplicates_removed = before - records.len();

    // Same id with differing fields survives row dedup; that is a conflict,
    // not a duplicate.
    let mut ids: HashSet<u64> = HashSet::new();
    for record in &records {
        if !ids.insert(record.id) {
            return Err(AidsiftError::data(format!(
                "conflicting rows share identifier {}",
                record.id
            )));
        }
    }

    let report = BuildReport {
        messages_in: messages.len(),
        categories_in: categories.len(),
        unmatched_messages,
        unmatched_categories,
        duplicates_removed,
        records_out: records.len(),
    };

    Ok((
        CleanDataset {
            categories: universe,
            records,
        },
        report,
    ))
}
