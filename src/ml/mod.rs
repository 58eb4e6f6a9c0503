//! Modeling for aidsift: feature extraction, the per-category classifier
//! bank, evaluation metrics, and the trained pipeline artifact.

pub mod classifier;
pub mod forest;
pub mod metrics;
pub mod pipeline;
pub mod tree;
pub mod vectorizer;

// Re-export commonly used types
pub use classifier::*;
pub use forest::*;
pub use metrics::*;
pub use pipeline::*;
pub use tree::*;
pub use vectorizer::*;

use rand::prelude::*;

/// Split record indices into a training set and a held-out set.
///
/// Indices are shuffled with a seeded RNG, so the same seed always produces
/// the same split. `test_fraction` must be in `(0, 1)`; at least one record
/// lands on each side when there are two or more records.
pub fn train_test_split(
    n_records: usize,
    test_fraction: f64,
    seed: u64,
) -> crate::error::Result<(Vec<usize>, Vec<usize>)> {
    if !(0.0..1.0).contains(&test_fraction) || test_fraction == 0.0 {
        return Err(crate::error::AidsiftError::invalid_argument(format!(
            "test fraction must be in (0, 1), got {test_fraction}"
        )));
    }

    let mut indices: Vec<usize> = (0..n_records).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let mut n_test = ((n_records as f64) * test_fraction).round() as usize;
    if n_records >= 2 {
        n_test = n_test.clamp(1, n_records - 1);
    }

    let test = indices.split_off(n_records - n_test);
    Ok((indices, test))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_sizes() {
        let (train, test) = train_test_split(100, 0.2, 42).unwrap();
        assert_eq!(train.len(), 80);
        assert_eq!(test.len(), 20);

        let mut all: Vec<usize> = train.iter().chain(test.iter()).copied().collect();
        all.sort_unstable();
        assert_eq!(all, (0..100).collect::<Vec<_>>());
    }

    #[test]
    fn test_split_deterministic() {
        let a = train_test_split(50, 0.3, 7).unwrap();
        let b = train_test_split(50, 0.3, 7).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_split_rejects_bad_fraction() {
        assert!(train_test_split(10, 0.0, 1).is_err());
        assert!(train_test_split(10, 1.0, 1).is_err());
    }
}
