//! TF-IDF vectorizer for token-sequence feature extraction.
//!
//! `fit` learns a vocabulary and per-token inverse document frequencies from
//! the training corpus; `transform` produces fixed-length feature vectors
//! against that frozen vocabulary. Fitting is a one-shot operation per
//! trained pipeline: refitting an already-fitted vectorizer is an error, and
//! tokens unseen at fit time contribute zero weight forever after.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::{AidsiftError, Result};

/// TF-IDF vectorizer over pre-normalized token sequences.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TfIdfVectorizer {
    /// Vocabulary: token -> index mapping, frozen after fit.
    vocabulary: HashMap<String, usize>,
    /// Inverse document frequency for each vocabulary index.
    idf: Vec<f64>,
    /// Total number of documents seen during fit.
    n_documents: usize,
    /// Whether fit has completed.
    fitted: bool,
}

impl TfIdfVectorizer {
    /// Create a new, unfitted vectorizer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fit the vectorizer on a training corpus of token sequences.
    ///
    /// Vocabulary indices follow first-seen order. IDF uses the smoothed
    /// formula `ln((n + 1) / (df + 1)) + 1`, computed from the training
    /// corpus only. Fitting twice is a model-state error.
    pub fn fit(&mut self, documents: &[Vec<String>]) -> Result<()> {
        if self.fitted {
            return Err(AidsiftError::model(
                "vectorizer is already fitted; training is one-shot per artifact",
            ));
        }
        if documents.is_empty() {
            return Err(AidsiftError::model("cannot fit on an empty corpus"));
        }

        self.n_documents = documents.len();
        let mut vocabulary = HashMap::new();
        let mut document_frequency: HashMap<String, usize> = HashMap::new();

        for doc in documents {
            // Walk tokens in document order so vocabulary indices are
            // stable across runs; count each token once per document.
            let mut seen_in_doc: HashSet<&String> = HashSet::new();
            for token in doc {
                if !seen_in_doc.insert(token) {
                    continue;
                }
                *document_frequency.entry(token.clone()).or_insert(0) += 1;
                if !vocabulary.contains_key(token) {
                    let idx = vocabulary.len();
                    vocabulary.insert(token.clone(), idx);
                }
            }
        }

        let mut idf = vec![0.0; vocabulary.len()];
        for (token, idx) in &vocabulary {
            let df = document_frequency.get(token).copied().unwrap_or(0);
            idf[*idx] = ((self.n_documents as f64 + 1.0) / (df as f64 + 1.0)).ln() + 1.0;
        }

        self.vocabulary = vocabulary;
        self.idf = idf;
        self.fitted = true;

        Ok(())
    }

    /// Transform one token sequence into a TF-IDF feature vector.
    ///
    /// Term frequency is the raw count of a token within the document;
    /// the weighted vector is L2-normalized. Tokens outside the fitted
    /// vocabulary are ignored.
    pub fn transform(&self, document: &[String]) -> Result<Vec<f64>> {
        if !self.fitted {
            return Err(AidsiftError::model("transform called before fit"));
        }

        let mut weights = vec![0.0; self.vocabulary.len()];
        for token in document {
            if let Some(&idx) = self.vocabulary.get(token) {
                weights[idx] += 1.0;
            }
        }

        for (idx, weight) in weights.iter_mut().enumerate() {
            *weight *= self.idf[idx];
        }

        let norm: f64 = weights.iter().map(|w| w * w).sum::<f64>().sqrt();
        if norm > 0.0 {
            for weight in &mut weights {
                *weight /= norm;
            }
        }

        Ok(weights)
    }

    /// Transform a batch of token sequences.
    pub fn transform_batch(&self, documents: &[Vec<String>]) -> Result<Vec<Vec<f64>>> {
        documents.iter().map(|doc| self.transform(doc)).collect()
    }

    /// Get the size of the fitted vocabulary.
    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    /// Whether this vectorizer has been fitted.
    pub fn is_fitted(&self) -> bool {
        self.fitted
    }
}
