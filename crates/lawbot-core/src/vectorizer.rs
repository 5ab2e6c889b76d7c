//! TF-IDF vectorizer over a fitted vocabulary.
//!
//! # Weighting
//!
//! For a corpus of `n` documents, a term `t` that occurs in `df(t)` of them
//! gets the smoothed inverse document frequency
//!
//! ```text
//! idf(t) = ln((1 + n) / (1 + df(t))) + 1
//! ```
//!
//! A document's weight for `t` is its raw count of `t` times `idf(t)`, and
//! every vector is scaled to unit Euclidean length. Terms shared by every
//! document get the minimum idf of 1.0; terms unique to one document get the
//! largest.
//!
//! The vocabulary and idf table are fixed at fit time. [`TfidfVectorizer::transform`]
//! ignores terms it has never seen.

use std::collections::{BTreeMap, HashMap, HashSet};

use crate::stop_words::StopWords;
use crate::tokenize::analyze;

/// Sparse vector of `(column, weight)` entries sorted by column.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    entries: Vec<(usize, f64)>,
}

impl SparseVector {
    /// Builds a vector from entries that are already sorted by column with no
    /// duplicate columns.
    fn from_sorted(entries: Vec<(usize, f64)>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[(usize, f64)] {
        &self.entries
    }

    pub fn nnz(&self) -> usize {
        self.entries.len()
    }

    pub fn is_zero(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn norm(&self) -> f64 {
        self.entries.iter().map(|(_, w)| w * w).sum::<f64>().sqrt()
    }

    /// Dot product by merge-joining the two sorted entry lists.
    pub fn dot(&self, other: &SparseVector) -> f64 {
        let (a, b) = (&self.entries, &other.entries);
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0;
        while i < a.len() && j < b.len() {
            match a[i].0.cmp(&b[j].0) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += a[i].1 * b[j].1;
                    i += 1;
                    j += 1;
                }
            }
        }
        sum
    }

    /// Per-column products for columns present in both vectors.
    pub fn shared_products(&self, other: &SparseVector) -> Vec<(usize, f64)> {
        let (a, b) = (&self.entries, &other.entries);
        let (mut i, mut j) = (0, 0);
        let mut out = Vec::new();
        while i < a.len() && j < b.len() {
            match a[i].0.cmp(&b[j].0) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    out.push((a[i].0, a[i].1 * b[j].1));
                    i += 1;
                    j += 1;
                }
            }
        }
        out
    }

    fn normalize(&mut self) {
        let norm = self.norm();
        if norm > 0.0 {
            for (_, w) in &mut self.entries {
                *w /= norm;
            }
        }
    }
}

/// A vocabulary plus idf table fitted on a corpus.
#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    vocabulary: HashMap<String, usize>,
    terms: Vec<String>,
    idf: Vec<f64>,
    stop_words: StopWords,
}

impl TfidfVectorizer {
    /// Fits the vocabulary and idf table on `texts` and returns the fitted
    /// vectorizer together with one unit-length row per text.
    ///
    /// Returns `None` when no term survives analysis (empty corpus, or every
    /// token is a stop word or too short).
    pub fn fit_transform<S: AsRef<str>>(
        texts: &[S],
        stop_words: StopWords,
    ) -> Option<(Self, Vec<SparseVector>)> {
        let analyzed: Vec<Vec<String>> = texts
            .iter()
            .map(|t| analyze(t.as_ref(), &stop_words))
            .collect();

        // Document frequency per term; BTreeMap gives lexicographic columns.
        let mut df: BTreeMap<&str, usize> = BTreeMap::new();
        for doc in &analyzed {
            let unique: HashSet<&str> = doc.iter().map(String::as_str).collect();
            for term in unique {
                *df.entry(term).or_insert(0) += 1;
            }
        }

        if df.is_empty() {
            return None;
        }

        let n = analyzed.len() as f64;
        let mut vocabulary = HashMap::with_capacity(df.len());
        let mut terms = Vec::with_capacity(df.len());
        let mut idf = Vec::with_capacity(df.len());
        for (column, (term, count)) in df.into_iter().enumerate() {
            vocabulary.insert(term.to_string(), column);
            terms.push(term.to_string());
            idf.push(((1.0 + n) / (1.0 + count as f64)).ln() + 1.0);
        }

        let vectorizer = Self {
            vocabulary,
            terms,
            idf,
            stop_words,
        };
        let rows = analyzed
            .iter()
            .map(|doc| vectorizer.weigh(doc))
            .collect();

        Some((vectorizer, rows))
    }

    /// Projects `text` into the fitted space. Unknown terms contribute nothing.
    pub fn transform(&self, text: &str) -> SparseVector {
        self.weigh(&analyze(text, &self.stop_words))
    }

    fn weigh(&self, tokens: &[String]) -> SparseVector {
        let mut counts: BTreeMap<usize, usize> = BTreeMap::new();
        for token in tokens {
            if let Some(&column) = self.vocabulary.get(token) {
                *counts.entry(column).or_insert(0) += 1;
            }
        }
        let mut vector = SparseVector::from_sorted(
            counts
                .into_iter()
                .map(|(column, tf)| (column, tf as f64 * self.idf[column]))
                .collect(),
        );
        vector.normalize();
        vector
    }

    pub fn vocabulary_size(&self) -> usize {
        self.terms.len()
    }

    pub fn column(&self, term: &str) -> Option<usize> {
        self.vocabulary.get(term).copied()
    }

    pub fn term(&self, column: usize) -> Option<&str> {
        self.terms.get(column).map(String::as_str)
    }

    pub fn idf(&self, term: &str) -> Option<f64> {
        self.column(term).map(|c| self.idf[c])
    }

    pub fn stop_words(&self) -> &StopWords {
        &self.stop_words
    }
}
