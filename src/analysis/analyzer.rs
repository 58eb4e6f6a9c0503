//! Message analyzer combining the tokenizer with a filter chain.
//!
//! The analyzer is the complete normalization pipeline shared by feature
//! fitting and serving-time prediction. Tokenization drift between those two
//! paths silently degrades predictions, so both must go through the same
//! [`MessageAnalyzer`] instance or an identically-configured one.
//!
//! ```text
//! Raw Text → Tokenizer → Lemma Filter → Lowercase Filter → Remove Empty
//! ```
//!
//! # Examples
//!
//! ```
//! use aidsift::analysis::analyzer::MessageAnalyzer;
//!
//! let analyzer = MessageAnalyzer::new().unwrap();
//! let tokens = analyzer.normalize("Water is urgently needed!").unwrap();
//!
//! assert_eq!(tokens, vec!["water", "is", "urgently", "needed"]);
//! ```

use std::sync::Arc;

use crate::analysis::filter::{Filter, LemmaFilter, LowercaseFilter, RemoveEmptyFilter};
use crate::analysis::token::TokenStream;
use crate::analysis::tokenizer::{AsciiAlnumTokenizer, Tokenizer};
use crate::error::Result;

/// The normalization pipeline applied to every message.
///
/// Stateless and deterministic: the same input text always produces the same
/// token sequence, with no dependence on prior calls or external state.
pub struct MessageAnalyzer {
    tokenizer: Arc<dyn Tokenizer>,
    filters: Vec<Arc<dyn Filter>>,
}

impl std::fmt::Debug for MessageAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MessageAnalyzer")
            .field("tokenizer", &self.tokenizer.name())
            .field(
                "filters",
                &self.filters.iter().map(|f| f.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl MessageAnalyzer {
    /// Create the standard analyzer: ASCII-alnum tokenization, lemmatization,
    /// lowercasing, and empty-token removal.
    pub fn new() -> Result<Self> {
        Ok(MessageAnalyzer {
            tokenizer: Arc::new(AsciiAlnumTokenizer::new()?),
            filters: vec![
                Arc::new(LemmaFilter::new()),
                Arc::new(LowercaseFilter::new()),
                Arc::new(RemoveEmptyFilter::new()),
            ],
        })
    }

    /// Run the full pipeline and collect the surviving token texts.
    ///
    /// Empty input yields an empty Vec, not an error. Output tokens are
    /// non-empty, lowercase, and ASCII-alphanumeric.
    pub fn normalize(&self, text: &str) -> Result<Vec<String>> {
        let tokens = self.analyze(text)?;
        Ok(tokens.map(|token| token.text).collect())
    }

    /// Run the pipeline, returning the token stream.
    pub fn analyze(&self, text: &str) -> Result<TokenStream> {
        let mut tokens = self.tokenizer.tokenize(text)?;
        for filter in &self.filters {
            tokens = filter.filter(tokens)?;
        }
        Ok(tokens)
    }
}
