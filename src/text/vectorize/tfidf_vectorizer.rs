use std::collections::{BTreeSet, HashMap};

use crate::error::{Result, SustainError};
use crate::primitives::SparseVector;
use crate::text::stopwords::StopWordsFilter;
use crate::text::tokenize::WordTokenizer;
use crate::text::Tokenizer;

/// TF-IDF vectorizer producing L2-normalized sparse term vectors.
///
/// **Weighting:**
/// ```text
/// tfidf(t, d) = tf(t, d) × idf(t)
/// tf(t, d)    = count of term t in document d
/// idf(t)      = ln((1 + N) / (1 + df(t))) + 1
/// ```
/// where N is the number of fitted documents and df(t) the number of
/// documents containing t. The smoothed idf never reaches zero, so a term
/// shared by every document still contributes to similarity. Each output row
/// is scaled to unit length.
///
/// # Examples
///
/// ```
/// use sustainrec::text::vectorize::TfidfVectorizer;
///
/// let docs = ["recycled paper bag", "recycled glass jar"];
/// let mut vectorizer = TfidfVectorizer::new();
/// let vectors = vectorizer.fit_transform(&docs).expect("fit_transform should succeed");
///
/// assert_eq!(vectors.len(), 2);
/// assert_eq!(vectorizer.vocabulary_size(), 5);
/// ```
#[allow(missing_debug_implementations)]
pub struct TfidfVectorizer {
    tokenizer: Box<dyn Tokenizer + Send + Sync>,
    stop_words: Option<StopWordsFilter>,
    vocabulary: HashMap<String, usize>,
    idf_values: Vec<f64>,
}

impl TfidfVectorizer {
    /// Create a vectorizer with a [`WordTokenizer`] and no stop words.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tokenizer: Box::new(WordTokenizer::new()),
            stop_words: None,
            vocabulary: HashMap::new(),
            idf_values: Vec::new(),
        }
    }

    /// Replace the tokenizer.
    #[must_use]
    pub fn with_tokenizer(mut self, tokenizer: Box<dyn Tokenizer + Send + Sync>) -> Self {
        self.tokenizer = tokenizer;
        self
    }

    /// Remove English stop words before counting.
    #[must_use]
    pub fn with_stop_words_english(mut self) -> Self {
        self.stop_words = Some(StopWordsFilter::english());
        self
    }

    /// Tokenize, lowercase and drop stop words.
    ///
    /// # Errors
    ///
    /// Propagates tokenizer failures.
    pub fn analyze(&self, text: &str) -> Result<Vec<String>> {
        let tokens: Vec<String> = self
            .tokenizer
            .tokenize(text)?
            .into_iter()
            .map(|t| t.to_lowercase())
            .collect();
        Ok(match &self.stop_words {
            Some(filter) => filter.filter_owned(tokens),
            None => tokens,
        })
    }

    /// Learn the vocabulary and idf weights.
    ///
    /// Vocabulary indices are assigned in lexicographic term order.
    ///
    /// # Errors
    ///
    /// Returns [`SustainError::EmptyInput`] when there are no documents or
    /// when no document contains a single non-stop-word term.
    pub fn fit<S: AsRef<str>>(&mut self, documents: &[S]) -> Result<()> {
        if documents.is_empty() {
            return Err(SustainError::EmptyInput(
                "cannot fit TF-IDF on zero documents".to_string(),
            ));
        }

        let mut doc_freq: HashMap<String, usize> = HashMap::new();
        for doc in documents {
            let terms: BTreeSet<String> = self.analyze(doc.as_ref())?.into_iter().collect();
            for term in terms {
                *doc_freq.entry(term).or_insert(0) += 1;
            }
        }

        if doc_freq.is_empty() {
            return Err(SustainError::EmptyInput(
                "empty vocabulary; documents contain only stop words".to_string(),
            ));
        }

        let mut terms: Vec<(String, usize)> = doc_freq.into_iter().collect();
        terms.sort_by(|a, b| a.0.cmp(&b.0));

        let n_docs = documents.len() as f64;
        self.idf_values = terms
            .iter()
            .map(|(_, df)| ((1.0 + n_docs) / (1.0 + *df as f64)).ln() + 1.0)
            .collect();
        self.vocabulary = terms
            .into_iter()
            .enumerate()
            .map(|(idx, (term, _))| (term, idx))
            .collect();

        Ok(())
    }

    /// Transform documents into unit-length TF-IDF vectors.
    ///
    /// Terms outside the fitted vocabulary are ignored; a document with no
    /// known terms becomes the zero vector.
    ///
    /// # Errors
    ///
    /// Returns an error if [`TfidfVectorizer::fit`] has not succeeded yet.
    pub fn transform<S: AsRef<str>>(&self, documents: &[S]) -> Result<Vec<SparseVector>> {
        if self.vocabulary.is_empty() {
            return Err(SustainError::Other(
                "vocabulary is empty; call fit() first".to_string(),
            ));
        }

        documents
            .iter()
            .map(|doc| {
                let mut counts: HashMap<usize, f64> = HashMap::new();
                for term in self.analyze(doc.as_ref())? {
                    if let Some(&idx) = self.vocabulary.get(&term) {
                        *counts.entry(idx).or_insert(0.0) += 1.0;
                    }
                }

                let pairs = counts
                    .into_iter()
                    .map(|(idx, count)| (idx, count * self.idf_values[idx]))
                    .collect();

                let mut vector = SparseVector::from_pairs(pairs);
                vector.normalize();
                Ok(vector)
            })
            .collect()
    }

    /// [`fit`](Self::fit) followed by [`transform`](Self::transform) on the same documents.
    ///
    /// # Errors
    ///
    /// See [`TfidfVectorizer::fit`].
    pub fn fit_transform<S: AsRef<str>>(&mut self, documents: &[S]) -> Result<Vec<SparseVector>> {
        self.fit(documents)?;
        self.transform(documents)
    }

    /// Learned term → column mapping.
    #[must_use]
    pub fn vocabulary(&self) -> &HashMap<String, usize> {
        &self.vocabulary
    }

    /// Number of learned terms.
    #[must_use]
    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    /// Inverse document frequency per vocabulary column.
    #[must_use]
    pub fn idf_values(&self) -> &[f64] {
        &self.idf_values
    }
}

impl Default for TfidfVectorizer {
    fn default() -> Self {
        Self::new()
    }
}
