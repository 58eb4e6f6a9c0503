//! Tokenizer implementations for text analysis.

use std::sync::Arc;

use regex::Regex;

use crate::analysis::token::{Token, TokenStream};
use crate::error::{AidsiftError, Result};

/// Trait for tokenizers that convert text into tokens.
pub trait Tokenizer: Send + Sync {
    /// Tokenize the given text into a stream of tokens.
    fn tokenize(&self, text: &str) -> Result<TokenStream>;

    /// Get the name of this tokenizer (for debugging and configuration).
    fn name(&self) -> &'static str;
}

/// A tokenizer that extracts runs of ASCII letters and digits.
///
/// Every character outside `[A-Za-z0-9]` acts as a token boundary, which is
/// equivalent to replacing punctuation with spaces and splitting on
/// whitespace. Empty input produces an empty stream.
#[derive(Clone, Debug)]
pub struct AsciiAlnumTokenizer {
    pattern: Arc<Regex>,
}

impl AsciiAlnumTokenizer {
    /// Create a new ASCII alphanumeric tokenizer.
    pub fn new() -> Result<Self> {
        let regex = Regex::new(r"[A-Za-z0-9]+")
            .map_err(|e| AidsiftError::analysis(format!("Invalid regex pattern: {e}")))?;

        Ok(AsciiAlnumTokenizer {
            pattern: Arc::new(regex),
        })
    }
}

impl Default for AsciiAlnumTokenizer {
    fn default() -> Self {
        Self::new().expect("Default tokenizer pattern should be valid")
    }
}

impl Tokenizer for AsciiAlnumTokenizer {
    fn tokenize(&self, text: &str) -> Result<TokenStream> {
        let tokens: Vec<Token> = self
            .pattern
            .find_iter(text)
            .enumerate()
            .map(|(position, mat)| Token::new(mat.as_str(), position))
            .collect();

        Ok(Box::new(tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "ascii_alnum"
    }
}
