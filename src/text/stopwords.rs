//! Stop words filtering for text preprocessing.
//!
//! Stop words ("the", "and", "with", ...) carry no information about a
//! material, so they are removed before term weighting. Matching is
//! case-insensitive.
//!
//! # Examples
//!
//! ```
//! use sustainrec::text::stopwords::StopWordsFilter;
//!
//! let filter = StopWordsFilter::english();
//! let tokens = ["made", "from", "the", "recycled", "glass"].map(String::from).to_vec();
//! let kept = filter.filter_owned(tokens);
//! assert_eq!(kept, vec!["made", "recycled", "glass"]);
//! ```

use std::collections::HashSet;

/// Stop words filter backed by a lowercase `HashSet`.
#[derive(Debug, Clone)]
pub struct StopWordsFilter {
    stop_words: HashSet<String>,
}

impl StopWordsFilter {
    /// Create a filter from a custom word list (lowercased on insert).
    ///
    /// # Examples
    ///
    /// ```
    /// use sustainrec::text::stopwords::StopWordsFilter;
    ///
    /// let filter = StopWordsFilter::new(["material", "product"]);
    /// assert!(filter.is_stop_word("Material"));
    /// assert_eq!(filter.len(), 2);
    /// ```
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            stop_words: words
                .into_iter()
                .map(|w| w.as_ref().to_lowercase())
                .collect(),
        }
    }

    /// Filter with the built-in English list.
    #[must_use]
    pub fn english() -> Self {
        Self::new(ENGLISH_STOP_WORDS)
    }

    /// Keep the tokens that are not stop words, preserving their case and order.
    #[must_use]
    pub fn filter_owned(&self, tokens: Vec<String>) -> Vec<String> {
        tokens
            .into_iter()
            .filter(|t| !self.is_stop_word(t))
            .collect()
    }

    /// Case-insensitive membership test.
    #[must_use]
    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(&word.to_lowercase())
    }

    /// Number of distinct stop words.
    #[must_use]
    pub fn len(&self) -> usize {
        self.stop_words.len()
    }

    /// Whether the filter removes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stop_words.is_empty()
    }
}

/// English stop words: articles, pronouns, prepositions, conjunctions,
/// auxiliary verbs and common filler adverbs.
#[rustfmt::skip]
pub const ENGLISH_STOP_WORDS: &[&str] = &[
    // articles
    "a", "an", "the",
    // pronouns
    "i", "me", "my", "we", "our", "ours", "you", "your", "yours", "he", "him", "his",
    "she", "her", "hers", "it", "its", "itself", "they", "them", "their", "theirs",
    "what", "which", "who", "whom", "whose", "this", "that", "these", "those",
    // prepositions
    "about", "above", "across", "after", "against", "along", "among", "around", "at",
    "before", "behind", "below", "between", "beyond", "by", "down", "during", "for",
    "from", "in", "inside", "into", "near", "of", "off", "on", "onto", "out", "over",
    "per", "through", "to", "toward", "under", "until", "up", "upon", "via", "with",
    "within", "without",
    // conjunctions
    "and", "as", "because", "but", "if", "nor", "or", "so", "than", "though",
    "unless", "while", "whether",
    // auxiliary verbs
    "am", "is", "are", "was", "were", "be", "been", "being", "have", "has", "had",
    "do", "does", "did", "can", "could", "may", "might", "must", "shall", "should",
    "will", "would",
    // fillers
    "all", "also", "any", "both", "each", "either", "etc", "every", "few", "just",
    "more", "most", "much", "no", "not", "only", "other", "own", "same", "some",
    "such", "then", "there", "too", "very",
];

#[cfg(test)]
#[path = "stopwords_tests.rs"]
mod tests;
