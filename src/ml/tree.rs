//! Decision tree for binary classification.
//!
//! The building block of the random forest: a CART-style tree with gini
//! impurity, midpoint thresholds, and per-split feature subsampling. Labels
//! are booleans (category present / absent); leaves store the positive-class
//! fraction of their training samples.

use rand::prelude::*;
use serde::{Deserialize, Serialize};

/// Decision tree configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeConfig {
    /// Maximum depth of the tree.
    pub max_depth: usize,
    /// Minimum samples required to attempt a split.
    pub min_samples_split: usize,
    /// Minimum samples allowed in a leaf.
    pub min_samples_leaf: usize,
    /// Number of features considered per split (None = all).
    pub max_features: Option<usize>,
    /// Random seed for feature subsampling.
    pub seed: u64,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            max_depth: 16,
            min_samples_split: 2,
            min_samples_leaf: 1,
            max_features: None,
            seed: 42,
        }
    }
}

/// A node in the fitted tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeNode {
    /// Feature index tested at this node (None for leaves).
    pub feature_idx: Option<usize>,
    /// Split threshold (None for leaves).
    pub threshold: Option<f64>,
    /// Fraction of positive samples at this node.
    pub positive_fraction: f64,
    /// Number of training samples at this node.
    pub n_samples: usize,
    /// Left child (feature value <= threshold).
    pub left: Option<Box<TreeNode>>,
    /// Right child (feature value > threshold).
    pub right: Option<Box<TreeNode>>,
}

impl TreeNode {
    fn leaf(positive_fraction: f64, n_samples: usize) -> Self {
        Self {
            feature_idx: None,
            threshold: None,
            positive_fraction,
            n_samples,
            left: None,
            right: None,
        }
    }

    /// Whether this node is a leaf.
    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

/// A fitted binary-classification decision tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionTree {
    config: TreeConfig,
    root: Option<TreeNode>,
}

impl DecisionTree {
    /// Create a new, unfitted tree.
    pub fn new(config: TreeConfig) -> Self {
        Self { config, root: None }
    }

    /// Train the tree on the given sample rows and boolean labels.
    ///
    /// `indices` selects the rows of `features`/`labels` this tree sees
    /// (the forest passes bootstrap samples this way).
    pub fn fit(&mut self, features: &[Vec<f64>], labels: &[bool], indices: &[usize]) {
        let mut rng = StdRng::seed_from_u64(self.config.seed);
        self.root = Some(self.build_node(features, labels, indices, 0, &mut rng));
    }

    fn build_node(
        &self,
        features: &[Vec<f64>],
        labels: &[bool],
        indices: &[usize],
        depth: usize,
        rng: &mut StdRng,
    ) -> TreeNode {
        let n = indices.len();
        let positives = indices.iter().filter(|&&i| labels[i]).count();
        let fraction = if n == 0 {
            0.0
        } else {
            positives as f64 / n as f64
        };
        let impurity = gini(fraction);

        if depth >= self.config.max_depth
            || n < self.config.min_samples_split
            || impurity < 1e-10
        {
            return TreeNode::leaf(fraction, n);
        }

        match self.find_best_split(features, labels, indices, impurity, rng) {
            Some((feature_idx, threshold, left_indices, right_indices)) => {
                if left_indices.len() < self.config.min_samples_leaf
                    || right_indices.len() < self.config.min_samples_leaf
                {
                    return TreeNode::leaf(fraction, n);
                }

                let left = self.build_node(features, labels, &left_indices, depth + 1, rng);
                let right = self.build_node(features, labels, &right_indices, depth + 1, rng);

                TreeNode {
                    feature_idx: Some(feature_idx),
                    threshold: Some(threshold),
                    positive_fraction: fraction,
                    n_samples: n,
                    left: Some(Box::new(left)),
                    right: Some(Box::new(right)),
                }
            }
            None => TreeNode::leaf(fraction, n),
        }
    }

    fn find_best_split(
        &self,
        features: &[Vec<f64>],
        labels: &[bool],
        indices: &[usize],
        parent_impurity: f64,
        rng: &mut StdRng,
    ) -> Option<(usize, f64, Vec<usize>, Vec<usize>)> {
        let n_features = features.first()?.len();
        let max_features = self.config.max_features.unwrap_or(n_features).max(1);

        let mut feature_indices: Vec<usize> = (0..n_features).collect();
        feature_indices.shuffle(rng);
        feature_indices.truncate(max_features);

        let mut best_gain = 0.0;
        let mut best_split: Option<(usize, f64, Vec<usize>, Vec<usize>)> = None;

        for &feature_idx in &feature_indices {
            let mut values: Vec<f64> = indices
                .iter()
                .map(|&i| features[i][feature_idx])
                .collect();
            values.sort_by(|a, b| a.partial_cmp(b).unwrap());
            values.dedup();

            for window in values.windows(2) {
                let threshold = (window[0] + window[1]) / 2.0;

                let (left_idx, right_idx): (Vec<usize>, Vec<usize>) = indices
                    .iter()
                    .partition(|&&i| features[i][feature_idx] <= threshold);

                if left_idx.is_empty() || right_idx.is_empty() {
                    continue;
                }

                let left_impurity = gini(positive_fraction(labels, &left_idx));
                let right_impurity = gini(positive_fraction(labels, &right_idx));

                let n_left = left_idx.len() as f64;
                let n_right = right_idx.len() as f64;
                let weighted =
                    (n_left * left_impurity + n_right * right_impurity) / (n_left + n_right);
                let gain = parent_impurity - weighted;

                if gain > best_gain {
                    best_gain = gain;
                    best_split = Some((feature_idx, threshold, left_idx, right_idx));
                }
            }
        }

        best_split
    }

    /// Positive-class probability for one feature vector.
    pub fn predict_one(&self, features: &[f64]) -> f64 {
        let Some(mut node) = self.root.as_ref() else {
            return 0.0;
        };

        loop {
            if node.is_leaf() {
                return node.positive_fraction;
            }
            let feature_idx = node.feature_idx.unwrap_or(0);
            let threshold = node.threshold.unwrap_or(0.0);
            let value = features.get(feature_idx).copied().unwrap_or(0.0);
            let child = if value <= threshold {
                node.left.as_deref()
            } else {
                node.right.as_deref()
            };
            match child {
                Some(child) => node = child,
                None => return node.positive_fraction,
            }
        }
    }

    /// Whether the tree has been fitted.
    pub fn is_fitted(&self) -> bool {
        self.root.is_some()
    }
}

fn positive_fraction(labels: &[bool], indices: &[usize]) -> f64 {
    if indices.is_empty() {
        return 0.0;
    }
    let positives = indices.iter().filter(|&&i| labels[i]).count();
    positives as f64 / indices.len() as f64
}

/// Gini impurity of a binary distribution.
fn gini(positive_fraction: f64) -> f64 {
    let p = positive_fraction;
    2.0 * p * (1.0 - p)
}
