//! Text vectorization: turning documents into weighted term vectors.

mod tfidf_vectorizer;

pub use tfidf_vectorizer::TfidfVectorizer;
