//! Token types for text analysis.
//!
//! A [`Token`] is the unit that flows through the analysis pipeline: the
//! tokenizer produces them, filters transform them, and the analyzer
//! collects the surviving texts.
//!
//! # Examples
//!
//! ```
//! use aidsift::analysis::token::Token;
//!
//! let token = Token::new("water", 0);
//! assert_eq!(token.text, "water");
//! assert_eq!(token.position, 0);
//! ```

use serde::{Deserialize, Serialize};

/// A token represents a single unit of text after tokenization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// The token's text content.
    pub text: String,
    /// Position in the token stream (0-based).
    pub position: usize,
}

impl Token {
    /// Create a new token with the given text and position.
    pub fn new<S: Into<String>>(text: S, position: usize) -> Self {
        Token {
            text: text.into(),
            position,
        }
    }
}

/// A boxed iterator of tokens, produced by tokenizers and filters.
pub type TokenStream = Box<dyn Iterator<Item = Token> + Send>;
