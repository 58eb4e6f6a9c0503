//! Per-category evaluation metrics.
//!
//! Category prevalence is highly imbalanced, so the primary output is a
//! per-category breakdown of precision, recall, and F1 rather than a single
//! aggregate score. Degenerate cases (no predicted positives, no actual
//! positives) yield 0.0 rather than NaN or an error.

use serde::{Deserialize, Serialize};

use crate::error::{AidsiftError, Result};

/// Precision/recall/F1 for one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryReport {
    /// Category name.
    pub category: String,
    /// True positives / predicted positives (0.0 when nothing predicted).
    pub precision: f64,
    /// True positives / actual positives (0.0 when no positives exist).
    pub recall: f64,
    /// Harmonic mean of precision and recall (0.0 when both are 0).
    pub f1: f64,
    /// Number of actual positives in the held-out set.
    pub support: usize,
}

/// Compute per-category reports for held-out truth and predictions.
///
/// `truth` and `predictions` hold one row per record, one boolean per
/// category in the order of `categories`; any shape mismatch is an error.
pub fn evaluate(
    categories: &[String],
    truth: &[Vec<bool>],
    predictions: &[Vec<bool>],
) -> Result<Vec<CategoryReport>> {
    if truth.len() != predictions.len() {
        return Err(AidsiftError::invalid_argument(format!(
            "{} truth rows but {} prediction rows",
            truth.len(),
            predictions.len()
        )));
    }
    for (row_idx, (t, p)) in truth.iter().zip(predictions.iter()).enumerate() {
        if t.len() != categories.len() || p.len() != categories.len() {
            return Err(AidsiftError::invalid_argument(format!(
                "row {} has {} truth / {} prediction entries, expected {}",
                row_idx,
                t.len(),
                p.len(),
                categories.len()
            )));
        }
    }

    let mut reports = Vec::with_capacity(categories.len());
    for (cat_idx, category) in categories.iter().enumerate() {
        let mut tp = 0usize;
        let mut fp = 0usize;
        let mut fn_ = 0usize;

        for (t, p) in truth.iter().zip(predictions.iter()) {
            match (t[cat_idx], p[cat_idx]) {
                (true, true) => tp += 1,
                (false, true) => fp += 1,
                (true, false) => fn_ += 1,
                (false, false) => {}
            }
        }

        let precision = ratio(tp, tp + fp);
        let recall = ratio(tp, tp + fn_);
        let f1 = if precision + recall > 0.0 {
            2.0 * precision * recall / (precision + recall)
        } else {
            0.0
        };

        reports.push(CategoryReport {
            category: category.clone(),
            precision,
            recall,
            f1,
            support: tp + fn_,
        });
    }

    Ok(reports)
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn categories(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_perfect_predictions() {
        let cats = categories(&["water"]);
        let truth = vec![vec![true], vec![true], vec![true]];
        let predictions = truth.clone();

        let reports = evaluate(&cats, &truth, &predictions).unwrap();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].precision, 1.0);
        assert_eq!(reports[0].recall, 1.0);
        assert_eq!(reports[0].f1, 1.0);
        assert_eq!(reports[0].support, 3);
    }

    #[test]
    fn test_all_false_predictions_against_all_true() {
        let cats = categories(&["water"]);
        let truth = vec![vec![true], vec![true]];
        let predictions = vec![vec![false], vec![false]];

        let reports = evaluate(&cats, &truth, &predictions).unwrap();
        assert_eq!(reports[0].recall, 0.0);
        assert_eq!(reports[0].precision, 0.0);
        assert_eq!(reports[0].f1, 0.0);
    }

    #[test]
    fn test_zero_support_category_is_degenerate_not_error() {
        let cats = categories(&["water", "fire"]);
        let truth = vec![vec![true, false], vec![false, false]];
        let predictions = vec![vec![true, false], vec![false, false]];

        let reports = evaluate(&cats, &truth, &predictions).unwrap();
        assert_eq!(reports[1].support, 0);
        assert_eq!(reports[1].recall, 0.0);
        assert_eq!(reports[1].precision, 0.0);
    }

    #[test]
    fn test_mixed_counts() {
        let cats = categories(&["water"]);
        // tp=2, fp=1, fn=1
        let truth = vec![vec![true], vec![true], vec![false], vec![true]];
        let predictions = vec![vec![true], vec![true], vec![true], vec![false]];

        let reports = evaluate(&cats, &truth, &predictions).unwrap();
        assert!((reports[0].precision - 2.0 / 3.0).abs() < 1e-12);
        assert!((reports[0].recall - 2.0 / 3.0).abs() < 1e-12);
        assert_eq!(reports[0].support, 3);
    }

    #[test]
    fn test_shape_mismatch_is_error() {
        let cats = categories(&["water"]);
        let truth = vec![vec![true]];
        let predictions = vec![vec![true], vec![false]];
        assert!(evaluate(&cats, &truth, &predictions).is_err());
    }
}
