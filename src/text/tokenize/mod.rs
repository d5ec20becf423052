//! Tokenizer for material descriptions.
//!
//! [`WordTokenizer`] splits on anything that is not alphanumeric and drops
//! tokens shorter than a minimum length (two characters by default, so stray
//! letters like the "s" in "bottle's" never become terms).

use crate::text::Tokenizer;
use crate::Result;

/// Word tokenizer: alphanumeric runs of at least `min_len` characters.
///
/// # Examples
///
/// ```
/// use sustainrec::text::{Tokenizer, tokenize::WordTokenizer};
///
/// let tokenizer = WordTokenizer::new();
/// let tokens = tokenizer.tokenize("Bio-based PLA, a (compostable) plastic").expect("infallible");
/// assert_eq!(tokens, vec!["Bio", "based", "PLA", "compostable", "plastic"]);
/// ```
#[derive(Debug, Clone)]
pub struct WordTokenizer {
    min_len: usize,
}

impl WordTokenizer {
    /// Create a word tokenizer with the default minimum token length of 2.
    #[must_use]
    pub fn new() -> Self {
        Self { min_len: 2 }
    }

    /// Set the minimum token length in characters (at least 1).
    #[must_use]
    pub fn with_min_len(mut self, min_len: usize) -> Self {
        self.min_len = min_len.max(1);
        self
    }
}

impl Default for WordTokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Tokenizer for WordTokenizer {
    fn tokenize(&self, text: &str) -> Result<Vec<String>> {
        Ok(text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|word| word.chars().count() >= self.min_len)
            .map(ToString::to_string)
            .collect())
    }
}
