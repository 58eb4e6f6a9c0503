//! Text analysis module for aidsift.
//!
//! This module turns raw message strings into canonical sequences of word
//! tokens: tokenization, lemmatization, and filtering, combined into one
//! deterministic pipeline shared by training and serving.

pub mod analyzer;
pub mod filter;
pub mod lemmatizer;
pub mod token;
pub mod tokenizer;

// Re-export commonly used types
pub use analyzer::*;
pub use filter::*;
pub use lemmatizer::*;
pub use token::*;
pub use tokenizer::*;
