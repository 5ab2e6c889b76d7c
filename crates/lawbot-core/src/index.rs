//! Relevance index: a fitted TF-IDF vectorizer plus one weight row per case.
//!
//! The index is built once from a [`Corpus`] and never mutated. A corpus
//! change means building a new index. Queries are scored by cosine similarity
//! against every row; since all rows and query vectors are unit length (or
//! zero), cosine similarity is a plain dot product in `[0, 1]`.

use serde::Serialize;

use crate::models::Corpus;
use crate::search::{rank_scores, Hit, SearchParams};
use crate::stop_words::StopWords;
use crate::vectorizer::{SparseVector, TfidfVectorizer};

/// Options that shape the fitted vocabulary.
#[derive(Debug, Clone)]
pub struct IndexOptions {
    pub stop_words: StopWords,
}

impl Default for IndexOptions {
    fn default() -> Self {
        Self {
            stop_words: StopWords::english(),
        }
    }
}

/// How much one shared term added to a query/case similarity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TermContribution {
    pub term: String,
    pub contribution: f64,
}

/// Size figures for an index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IndexStats {
    pub documents: usize,
    pub vocabulary: usize,
    pub nonzero_weights: usize,
}

#[derive(Debug, Clone)]
pub struct RelevanceIndex {
    vectorizer: TfidfVectorizer,
    rows: Vec<SparseVector>,
}

impl RelevanceIndex {
    /// Builds an index over `texts`; row `i` describes `texts[i]`.
    ///
    /// Returns `None` for an empty input or when no term survives stop-word
    /// removal.
    pub fn build<S: AsRef<str>>(texts: &[S], options: &IndexOptions) -> Option<Self> {
        if texts.is_empty() {
            return None;
        }
        let (vectorizer, rows) =
            TfidfVectorizer::fit_transform(texts, options.stop_words.clone())?;
        Some(Self { vectorizer, rows })
    }

    /// Builds an index over each record's searchable text, in corpus order.
    pub fn from_corpus(corpus: &Corpus, options: &IndexOptions) -> Option<Self> {
        Self::build(&corpus.searchable_texts(), options)
    }

    /// Cosine similarity of `query` against every row, in row order.
    pub fn scores(&self, query: &str) -> Vec<f64> {
        let q = self.vectorizer.transform(query);
        if q.is_zero() {
            return vec![0.0; self.rows.len()];
        }
        self.rows.iter().map(|row| q.dot(row)).collect()
    }

    /// Score, filter and rank every row for `query`.
    pub fn rank(&self, query: &str, params: &SearchParams) -> Vec<Hit> {
        if params.top_k == 0 {
            return Vec::new();
        }
        rank_scores(&self.scores(query), params)
    }

    /// Per-term contributions to the similarity between `query` and row
    /// `index`, largest first. Empty when the row does not exist or shares no
    /// term with the query.
    pub fn explain(&self, query: &str, index: usize) -> Vec<TermContribution> {
        let Some(row) = self.rows.get(index) else {
            return Vec::new();
        };
        let q = self.vectorizer.transform(query);
        let mut contributions: Vec<TermContribution> = q
            .shared_products(row)
            .into_iter()
            .filter_map(|(column, contribution)| {
                self.vectorizer.term(column).map(|term| TermContribution {
                    term: term.to_string(),
                    contribution,
                })
            })
            .collect();
        contributions.sort_by(|a, b| {
            b.contribution
                .partial_cmp(&a.contribution)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.term.cmp(&b.term))
        });
        contributions
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn vectorizer(&self) -> &TfidfVectorizer {
        &self.vectorizer
    }

    pub fn stats(&self) -> IndexStats {
        IndexStats {
            documents: self.rows.len(),
            vocabulary: self.vectorizer.vocabulary_size(),
            nonzero_weights: self.rows.iter().map(SparseVector::nnz).sum(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CaseRecord;

    fn bail_divorce() -> Corpus {
        Corpus::new(vec![
            CaseRecord::new("What is bail?", "Bail is release pending trial."),
            CaseRecord::new("What is divorce?", "Divorce ends a marriage legally."),
        ])
    }

    fn index_of(corpus: &Corpus) -> RelevanceIndex {
        RelevanceIndex::from_corpus(corpus, &IndexOptions::default()).unwrap()
    }

    #[test]
    fn test_empty_corpus_has_no_index() {
        assert!(RelevanceIndex::from_corpus(&Corpus::empty(), &IndexOptions::default()).is_none());
    }

    #[test]
    fn test_rows_match_corpus_order() {
        let corpus = bail_divorce();
        let index = index_of(&corpus);
        assert_eq!(index.len(), corpus.len());
        let scores = index.scores("divorce");
        assert_eq!(scores[0], 0.0);
        assert!(scores[1] > 0.0);
    }

    #[test]
    fn test_bail_release_returns_first_record() {
        let index = index_of(&bail_divorce());
        let hits = index.rank("bail release", &SearchParams::default().with_top_k(1));
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].index, 0);
        assert!(hits[0].score > 0.1);
        // 3 / (sqrt(7) * sqrt(2)): both docs share the same idf for these terms.
        let expected = 3.0 / (7.0f64.sqrt() * 2.0f64.sqrt());
        assert!((hits[0].score - expected).abs() < 1e-9);
    }

    #[test]
    fn test_unrelated_query_returns_nothing() {
        let index = index_of(&bail_divorce());
        assert!(index
            .rank("unrelated astronomy topic", &SearchParams::default())
            .is_empty());
    }

    #[test]
    fn test_empty_and_stop_word_queries() {
        let index = index_of(&bail_divorce());
        assert!(index.rank("", &SearchParams::default()).is_empty());
        assert!(index.rank("what is the", &SearchParams::default()).is_empty());
        assert!(index.rank("?!… ¿", &SearchParams::default()).is_empty());
    }

    #[test]
    fn test_identical_records_tie_in_corpus_order() {
        let corpus: Corpus = (0..5)
            .map(|_| CaseRecord::new("What is anticipatory bail?", "Bail before arrest."))
            .collect();
        let index = index_of(&corpus);
        let hits = index.rank("anticipatory bail", &SearchParams::default().with_top_k(3));
        assert_eq!(hits.iter().map(|h| h.index).collect::<Vec<_>>(), vec![0, 1, 2]);
        assert!(hits.iter().all(|h| h.score == hits[0].score));
    }

    #[test]
    fn test_unknown_terms_do_not_change_scores() {
        let index = index_of(&bail_divorce());
        let with_unknown = index.scores("bail release supernova");
        let without = index.scores("bail release");
        assert_eq!(with_unknown, without);
    }

    #[test]
    fn test_search_is_idempotent() {
        let index = index_of(&bail_divorce());
        let params = SearchParams::default();
        assert_eq!(index.rank("divorce marriage", &params), index.rank("divorce marriage", &params));
    }

    #[test]
    fn test_scores_in_unit_range() {
        let corpus = Corpus::new(vec![
            CaseRecord::new("bail", "bail bail"),
            CaseRecord::new("bail custody", "custody of child"),
            CaseRecord::new("property", "partition of property"),
        ]);
        let index = index_of(&corpus);
        for s in index.scores("bail custody property child") {
            assert!((0.0..=1.0 + 1e-12).contains(&s), "score out of range: {}", s);
        }
    }

    #[test]
    fn test_results_bounded_and_above_floor() {
        let corpus: Corpus = [
            ("bail hearing", "bail granted"),
            ("bail appeal", "appeal dismissed"),
            ("tenant eviction", "eviction notice served"),
            ("bail bond", "surety bond"),
        ]
        .iter()
        .map(|(q, a)| CaseRecord::new(*q, *a))
        .collect();
        let index = index_of(&corpus);
        let params = SearchParams::default().with_top_k(2);
        let scores = index.scores("bail");
        let hits = index.rank("bail", &params);
        assert!(hits.len() <= 2);
        for pair in hits.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
        for hit in &hits {
            assert!(hit.score > params.min_score);
            assert_eq!(hit.score, scores[hit.index]);
        }
    }

    #[test]
    fn test_custom_stop_words() {
        let corpus = Corpus::new(vec![
            CaseRecord::new("court bail", "court"),
            CaseRecord::new("court divorce", "court"),
        ]);
        let options = IndexOptions {
            stop_words: StopWords::english().with_extra(["court"]),
        };
        let index = RelevanceIndex::from_corpus(&corpus, &options).unwrap();
        assert_eq!(index.vectorizer().column("court"), None);
        assert!(index.rank("court", &SearchParams::default()).is_empty());
    }

    #[test]
    fn test_devanagari_inflection_shares_terms() {
        let corpus = Corpus::new(vec![
            CaseRecord::new("जमानत", "अदालत"),
            CaseRecord::new("तलाक", "विवाह"),
        ]);
        let index = index_of(&corpus);
        let hits = index.rank("जमानती", &SearchParams::default());
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].index, 0);
        assert!((hits[0].score - std::f64::consts::FRAC_1_SQRT_2).abs() < 1e-9);
    }

    #[test]
    fn test_explain_lists_shared_terms() {
        let index = index_of(&bail_divorce());
        let parts = index.explain("bail release", 0);
        let terms: Vec<&str> = parts.iter().map(|p| p.term.as_str()).collect();
        assert_eq!(terms, vec!["bail", "release"]);
        let total: f64 = parts.iter().map(|p| p.contribution).sum();
        assert!((total - index.scores("bail release")[0]).abs() < 1e-12);
        assert!(index.explain("bail", 99).is_empty());
    }

    #[test]
    fn test_stats() {
        let stats = index_of(&bail_divorce()).stats();
        assert_eq!(stats.documents, 2);
        // bail, release, pending, trial, divorce, ends, marriage, legally
        assert_eq!(stats.vocabulary, 8);
        assert_eq!(stats.nonzero_weights, 8);
    }
}
