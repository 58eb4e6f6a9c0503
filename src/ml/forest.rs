//! Random forest: a bootstrap ensemble of decision trees.
//!
//! Trees are trained in parallel with rayon, but each tree's seed is derived
//! from the forest seed and the tree index, and results are collected by
//! index, so execution parallelism has no observable effect on the fitted
//! model or its predictions.

use rand::prelude::*;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{AidsiftError, Result};
use crate::ml::tree::{DecisionTree, TreeConfig};

/// Random forest configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForestConfig {
    /// Number of trees in the ensemble.
    pub n_trees: usize,
    /// Maximum depth of each tree.
    pub max_depth: usize,
    /// Minimum samples required to attempt a split.
    pub min_samples_split: usize,
    /// Minimum samples allowed in a leaf.
    pub min_samples_leaf: usize,
    /// Features considered per split (None = sqrt of total).
    pub max_features: Option<usize>,
    /// Whether each tree trains on a bootstrap sample.
    pub bootstrap: bool,
    /// Base random seed; per-tree seeds are derived from it.
    pub seed: u64,
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self {
            n_trees: 50,
            max_depth: 16,
            min_samples_split: 2,
            min_samples_leaf: 1,
            max_features: None,
            bootstrap: true,
            seed: 42,
        }
    }
}

/// A fitted random forest for binary classification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomForest {
    config: ForestConfig,
    trees: Vec<DecisionTree>,
}

impl RandomForest {
    /// Train a forest on the given feature rows and boolean labels.
    pub fn fit(
        features: &[Vec<f64>],
        labels: &[bool],
        config: ForestConfig,
    ) -> Result<Self> {
        if features.is_empty() {
            return Err(AidsiftError::model("cannot fit a forest on zero samples"));
        }
        if features.len() != labels.len() {
            return Err(AidsiftError::invalid_argument(format!(
                "{} feature rows but {} labels",
                features.len(),
                labels.len()
            )));
        }

        let n_samples = features.len();
        let n_features = features[0].len();
        let max_features = config
            .max_features
            .unwrap_or_else(|| (n_features as f64).sqrt().ceil() as usize)
            .max(1);

        let trees: Vec<DecisionTree> = (0..config.n_trees)
            .into_par_iter()
            .map(|i| {
                let tree_seed = config.seed.wrapping_add(i as u64);
                let tree_config = TreeConfig {
                    max_depth: config.max_depth,
                    min_samples_split: config.min_samples_split,
                    min_samples_leaf: config.min_samples_leaf,
                    max_features: Some(max_features),
                    seed: tree_seed,
                };

                let indices = if config.bootstrap {
                    bootstrap_sample(n_samples, tree_seed)
                } else {
                    (0..n_samples).collect()
                };

                let mut tree = DecisionTree::new(tree_config);
                tree.fit(features, labels, &indices);
                tree
            })
            .collect();

        Ok(Self { config, trees })
    }

    /// Mean positive-class probability across the ensemble.
    pub fn predict_proba(&self, features: &[f64]) -> f64 {
        if self.trees.is_empty() {
            return 0.0;
        }
        let total: f64 = self
            .trees
            .iter()
            .map(|tree| tree.predict_one(features))
            .sum();
        total / self.trees.len() as f64
    }

    /// Majority-vote prediction for one feature vector.
    pub fn predict(&self, features: &[f64]) -> bool {
        self.predict_proba(features) >= 0.5
    }

    /// Number of trees in the fitted ensemble.
    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    /// The configuration this forest was trained with.
    pub fn config(&self) -> &ForestConfig {
        &self.config
    }
}

/// Sample `n` indices with replacement, deterministically for a given seed.
fn bootstrap_sample(n: usize, seed: u64) -> Vec<usize> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n).map(|_| rng.random_range(0..n)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn separable_data() -> (Vec<Vec<f64>>, Vec<bool>) {
        let mut features = Vec::new();
        let mut labels = Vec::new();
        for i in 0..20 {
            let x = i as f64 / 20.0;
            features.push(vec![x, 1.0 - x]);
            labels.push(x >= 0.5);
        }
        (features, labels)
    }

    #[test]
    fn test_fit_and_predict() {
        let (features, labels) = separable_data();
        let forest = RandomForest::fit(&features, &labels, ForestConfig::default()).unwrap();

        assert_eq!(forest.n_trees(), 50);
        assert!(forest.predict(&[0.9, 0.1]));
        assert!(!forest.predict(&[0.1, 0.9]));
    }

    #[test]
    fn test_same_seed_is_deterministic() {
        let (features, labels) = separable_data();
        let config = ForestConfig {
            n_trees: 10,
            seed: 7,
            ..Default::default()
        };

        let a = RandomForest::fit(&features, &labels, config.clone()).unwrap();
        let b = RandomForest::fit(&features, &labels, config).unwrap();

        for point in [[0.3, 0.7], [0.45, 0.55], [0.7, 0.3]] {
            assert_eq!(a.predict_proba(&point), b.predict_proba(&point));
        }
    }

    #[test]
    fn test_shape_mismatch_is_error() {
        let features = vec![vec![1.0], vec![2.0]];
        let labels = vec![true];
        assert!(RandomForest::fit(&features, &labels, ForestConfig::default()).is_err());
    }

    #[test]
    fn test_empty_input_is_error() {
        let features: Vec<Vec<f64>> = Vec::new();
        let labels: Vec<bool> = Vec::new();
        assert!(RandomForest::fit(&features, &labels, ForestConfig::default()).is_err());
    }
}
