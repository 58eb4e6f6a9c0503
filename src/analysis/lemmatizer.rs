//! Lemmatization for reducing inflected words to a base form.

use std::collections::HashMap;

/// Trait for lemmatization algorithms.
pub trait Lemmatizer: Send + Sync {
    /// Lemmatize a word to its base form.
    fn lemmatize(&self, word: &str) -> String;

    /// Get the name of this lemmatizer.
    fn name(&self) -> &'static str;
}

/// Part-of-speech-agnostic dictionary lemmatizer.
///
/// Looks the word up in a table of irregular forms first, then applies
/// ordered suffix-substitution rules for regular plurals. Words that match
/// no entry and no rule are returned unchanged, so regular verb inflection
/// (`needed`, `running`) passes through as-is.
#[derive(Debug, Clone)]
pub struct DictionaryLemmatizer {
    /// Irregular inflected form -> lemma.
    irregular: HashMap<&'static str, &'static str>,
    /// Suffix substitution rules, tried in order.
    rules: Vec<(&'static str, &'static str)>,
}

impl DictionaryLemmatizer {
    /// Create a new dictionary lemmatizer with the built-in tables.
    pub fn new() -> Self {
        let irregular: HashMap<&'static str, &'static str> = [
            ("children", "child"),
            ("men", "man"),
            ("women", "woman"),
            ("people", "person"),
            ("feet", "foot"),
            ("teeth", "tooth"),
            ("mice", "mouse"),
            ("geese", "goose"),
            ("lives", "life"),
            ("wives", "wife"),
            ("ran", "run"),
            ("went", "go"),
            ("gave", "give"),
            ("took", "take"),
            ("came", "come"),
            ("sent", "send"),
            ("found", "find"),
            ("left", "leave"),
            ("lost", "lose"),
            ("brought", "bring"),
        ]
        .into_iter()
        .collect();

        // Longest suffix first; the bare "s" rule is the fallback.
        let rules = vec![
            ("sses", "ss"),
            ("ches", "ch"),
            ("shes", "sh"),
            ("xes", "x"),
            ("zes", "z"),
            ("ies", "y"),
            ("ves", "f"),
            ("ses", "s"),
            ("s", ""),
        ];

        DictionaryLemmatizer { irregular, rules }
    }
}

impl Default for DictionaryLemmatizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Lemmatizer for DictionaryLemmatizer {
    fn lemmatize(&self, word: &str) -> String {
        let word = word.to_lowercase();

        if let Some(lemma) = self.irregular.get(word.as_str()) {
            return (*lemma).to_string();
        }

        // Too short to be an inflected form, or a non-plural -ss ending.
        if word.len() <= 2 || word.ends_with("ss") {
            return word;
        }

        for (suffix, replacement) in &self.rules {
            if word.len() > suffix.len() && word.ends_with(suffix) {
                let stem = &word[..word.len() - suffix.len()];
                return format!("{stem}{replacement}");
            }
        }

        word
    }

    fn name(&self) -> &'static str {
        "dictionary"
    }
}
