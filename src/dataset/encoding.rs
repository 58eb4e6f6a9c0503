//! Parser for the packed category encoding.
//!
//! Each category record carries a string micro-format of the form
//! `related-1;request-0;offer-0;...`. This module parses it once into a
//! typed list and validates it up front; nothing else in the crate touches
//! the raw string.

use crate::error::{AidsiftError, Result};

/// A parsed packed encoding: ordered `(name, value)` pairs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryEncoding {
    entries: Vec<(String, bool)>,
}

impl CategoryEncoding {
    /// Parse a packed encoding string.
    ///
    /// A trailing `;` is tolerated. A part without a `-` separator, an empty
    /// category name, or a value other than `"0"` or `"1"` is a data error;
    /// values are never silently coerced.
    pub fn parse(packed: &str) -> Result<Self> {
        let mut entries = Vec::new();

        for part in packed.split(';') {
            if part.is_empty() {
                continue;
            }

            // Category names may themselves contain '-' (e.g. aid-related
            // spellings), so split on the last one.
            let (name, value) = part.rsplit_once('-').ok_or_else(|| {
                AidsiftError::data(format!("malformed category entry (no '-'): {part:?}"))
            })?;

            if name.is_empty() {
                return Err(AidsiftError::data(format!(
                    "empty category name in entry {part:?}"
                )));
            }

            let value = match value {
                "0" => false,
                "1" => true,
                other => {
                    return Err(AidsiftError::data(format!(
                        "category {name:?} has non-binary value {other:?}"
                    )));
                }
            };

            entries.push((name.to_string(), value));
        }

        Ok(CategoryEncoding { entries })
    }

    /// Ordered category names in this encoding.
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|(name, _)| name.as_str()).collect()
    }

    /// Ordered category values in this encoding.
    pub fn values(&self) -> Vec<bool> {
        self.entries.iter().map(|(_, value)| *value).collect()
    }

    /// Number of categories in this encoding.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the encoding is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
