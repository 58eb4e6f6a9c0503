//! The trained pipeline artifact: frozen vectorizer + classifier bank.
//!
//! A pipeline is created once per training run and never mutated; a new run
//! replaces the artifact wholesale. The analyzer is not part of the artifact
//! because it is stateless: it is rebuilt on load, which is exactly what
//! keeps training-time and serving-time normalization identical.
//!
//! On disk the artifact is one atomic unit: a magic/version header, a
//! bincode body, and a trailing CRC32 of the body. Truncated or corrupted
//! files fail `load` with a descriptive error instead of producing a
//! degraded model.

use std::fs;
use std::io::{Read, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::analysis::analyzer::MessageAnalyzer;
use crate::error::{AidsiftError, Result};
use crate::ml::classifier::ClassifierBank;
use crate::ml::forest::ForestConfig;
use crate::ml::vectorizer::TfIdfVectorizer;

const ARTIFACT_MAGIC: &[u8; 8] = b"AIDSIFT\0";
const ARTIFACT_VERSION: u32 = 1;

/// Serialized portion of the pipeline.
#[derive(Debug, Serialize, Deserialize)]
struct ArtifactBody {
    vectorizer: TfIdfVectorizer,
    bank: ClassifierBank,
}

/// A fitted end-to-end pipeline: normalize → transform → classify.
#[derive(Debug)]
pub struct TrainedPipeline {
    analyzer: MessageAnalyzer,
    vectorizer: TfIdfVectorizer,
    bank: ClassifierBank,
}

impl TrainedPipeline {
    /// Train a pipeline on raw message texts and their label rows.
    ///
    /// Normalizes the corpus, fits the vectorizer on it (IDF from this
    /// corpus only), and trains one classifier per category on the shared
    /// feature matrix.
    pub fn train(
        messages: &[String],
        labels: &[Vec<bool>],
        categories: &[String],
        forest_config: &ForestConfig,
    ) -> Result<Self> {
        if messages.len() != labels.len() {
            return Err(AidsiftError::invalid_argument(format!(
                "{} messages but {} label rows",
                messages.len(),
                labels.len()
            )));
        }

        let analyzer = MessageAnalyzer::new()?;
        let corpus: Vec<Vec<String>> = messages
            .iter()
            .map(|text| analyzer.normalize(text))
            .collect::<Result<Vec<_>>>()?;

        let mut vectorizer = TfIdfVectorizer::new();
        vectorizer.fit(&corpus)?;
        let features = vectorizer.transform_batch(&corpus)?;

        let bank = ClassifierBank::fit(&features, labels, categories, forest_config)?;

        Ok(Self {
            analyzer,
            vectorizer,
            bank,
        })
    }

    /// Predict category booleans for one raw message text.
    ///
    /// Returns `(category name, present)` pairs in the fixed category order
    /// established at fit time.
    pub fn predict(&self, text: &str) -> Result<Vec<(String, bool)>> {
        let labels = self.predict_labels(text)?;
        Ok(self
            .bank
            .categories()
            .iter()
            .cloned()
            .zip(labels)
            .collect())
    }

    /// Predict the raw boolean vector for one message, in category order.
    pub fn predict_labels(&self, text: &str) -> Result<Vec<bool>> {
        let tokens = self.analyzer.normalize(text)?;
        let features = self.vectorizer.transform(&tokens)?;
        Ok(self.bank.predict(&features))
    }

    /// Predict boolean vectors for a batch of messages.
    pub fn predict_batch(&self, texts: &[String]) -> Result<Vec<Vec<bool>>> {
        texts.iter().map(|text| self.predict_labels(text)).collect()
    }

    /// The fixed category order of this pipeline.
    pub fn categories(&self) -> &[String] {
        self.bank.categories()
    }

    /// Size of the fitted vocabulary.
    pub fn vocabulary_size(&self) -> usize {
        self.vectorizer.vocabulary_size()
    }

    /// Write the artifact to `path` as one atomic unit.
    ///
    /// The file is written to a sibling temp path and renamed into place,
    /// so readers never observe a partially-written artifact.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let body = ArtifactBody {
            vectorizer: self.vectorizer.clone(),
            bank: self.bank.clone(),
        };
        let encoded = bincode::serialize(&body)
            .map_err(|e| AidsiftError::artifact(format!("failed to encode artifact: {e}")))?;
        let checksum = crc32fast::hash(&encoded);

        let temp_path = path.with_extension("tmp");
        {
            let mut file = fs::File::create(&temp_path)?;
            file.write_all(ARTIFACT_MAGIC)?;
            file.write_all(&ARTIFACT_VERSION.to_le_bytes())?;
            file.write_all(&(encoded.len() as u64).to_le_bytes())?;
            file.write_all(&encoded)?;
            file.write_all(&checksum.to_le_bytes())?;
            file.sync_all()?;
        }
        fs::rename(&temp_path, path)?;
        Ok(())
    }

    /// Load an artifact previously written by [`save`](Self::save).
    ///
    /// Magic, version, length, and checksum are all verified before the
    /// body is decoded.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut file = fs::File::open(path.as_ref())?;
        let mut data = Vec::new();
        file.read_to_end(&mut data)?;

        let header_len = ARTIFACT_MAGIC.len() + 4 + 8;
        if data.len() < header_len + 4 {
            return Err(AidsiftError::artifact("artifact file is truncated"));
        }

        if &data[..8] != ARTIFACT_MAGIC {
            return Err(AidsiftError::artifact("not an aidsift artifact (bad magic)"));
        }

        let version = u32::from_le_bytes(data[8..12].try_into().unwrap());
        if version != ARTIFACT_VERSION {
            return Err(AidsiftError::artifact(format!(
                "unsupported artifact version {version} (expected {ARTIFACT_VERSION})"
            )));
        }

        let body_len = u64::from_le_bytes(data[12..20].try_into().unwrap()) as usize;
        if data.len() != header_len + body_len + 4 {
            return Err(AidsiftError::artifact(format!(
                "artifact length mismatch: header says {body_len} body bytes"
            )));
        }

        let body = &data[header_len..header_len + body_len];
        let stored_checksum =
            u32::from_le_bytes(data[header_len + body_len..].try_into().unwrap());
        if crc32fast::hash(body) != stored_checksum {
            return Err(AidsiftError::artifact("artifact checksum mismatch"));
        }

        let decoded: ArtifactBody = bincode::deserialize(body)
            .map_err(|e| AidsiftError::artifact(format!("failed to decode artifact: {e}")))?;

        if !decoded.vectorizer.is_fitted() {
            return Err(AidsiftError::artifact("artifact contains an unfitted vectorizer"));
        }

        Ok(Self {
            analyzer: MessageAnalyzer::new()?,
            vectorizer: decoded.vectorizer,
            bank: decoded.bank,
        })
    }
}
