//! Classifier bank: one independent binary classifier per category.
//!
//! Categories are modeled independently, with no inter-category correlation,
//! and the bank keeps them as an ordered collection keyed by category name,
//! so a joint multi-label model could replace the per-category forests
//! behind the same predict contract.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{AidsiftError, Result};
use crate::ml::forest::{ForestConfig, RandomForest};

/// Ordered collection of per-category binary classifiers.
///
/// `fit` is the constructor: a bank always answers for exactly the category
/// set and order it was fitted on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierBank {
    categories: Vec<String>,
    forests: Vec<RandomForest>,
}

impl ClassifierBank {
    /// Train one forest per category on the shared feature matrix.
    ///
    /// `labels` holds one row per record, with one boolean per category in
    /// the order of `categories`. Per-category forests train in parallel
    /// with derived seeds, so the result is independent of thread count.
    pub fn fit(
        features: &[Vec<f64>],
        labels: &[Vec<bool>],
        categories: &[String],
        config: &ForestConfig,
    ) -> Result<Self> {
        if categories.is_empty() {
            return Err(AidsiftError::invalid_argument("no categories to train"));
        }
        if features.len() != labels.len() {
            return Err(AidsiftError::invalid_argument(format!(
                "{} feature rows but {} label rows",
                features.len(),
                labels.len()
            )));
        }
        for row in labels {
            if row.len() != categories.len() {
                return Err(AidsiftError::data(format!(
                    "label row has {} entries, expected {}",
                    row.len(),
                    categories.len()
                )));
            }
        }

        let forests: Vec<RandomForest> = (0..categories.len())
            .into_par_iter()
            .map(|cat_idx| {
                let column: Vec<bool> = labels.iter().map(|row| row[cat_idx]).collect();
                let forest_config = ForestConfig {
                    seed: config.seed.wrapping_add((cat_idx as u64) << 32),
                    ..config.clone()
                };
                RandomForest::fit(features, &column, forest_config)
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            categories: categories.to_vec(),
            forests,
        })
    }

    /// Predict one boolean per category, in fit-time category order.
    pub fn predict(&self, features: &[f64]) -> Vec<bool> {
        self.forests
            .iter()
            .map(|forest| forest.predict(features))
            .collect()
    }

    /// Predict for a batch of feature vectors.
    pub fn predict_batch(&self, features: &[Vec<f64>]) -> Vec<Vec<bool>> {
        features.iter().map(|row| self.predict(row)).collect()
    }

    /// The fixed category order established at fit time.
    pub fn categories(&self) -> &[String] {
        &self.categories
    }
}
