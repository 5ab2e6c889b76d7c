//! The case retrieval service.
//!
//! [`CaseService`] owns the loaded [`Corpus`] and the [`RelevanceIndex`] built
//! from it. It is constructed once by the process entry point and then shared
//! read-only (typically as `Arc<CaseService>`) with every handler. All query
//! methods take `&self` and perform no I/O or locking.

use chrono::{DateTime, Utc};
use lawbot_core::index::{IndexOptions, IndexStats, RelevanceIndex, TermContribution};
use lawbot_core::models::{CaseRecord, Corpus};
use lawbot_core::search::{Hit, SearchParams};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::config::Config;
use crate::corpus::load_corpus_or_empty;

/// A ranked case together with its corpus position and similarity.
#[derive(Debug, Clone, Serialize)]
pub struct ScoredCase<'a> {
    pub index: usize,
    pub score: f64,
    pub case: &'a CaseRecord,
}

pub struct CaseService {
    corpus: Corpus,
    index: Option<RelevanceIndex>,
    params: SearchParams,
    source: Option<PathBuf>,
    loaded_at: DateTime<Utc>,
}

impl CaseService {
    /// Load the corpus at `corpus_path` and index it with default options
    /// (English stop words, top 3, floor 0.1).
    ///
    /// A missing or unreadable corpus yields a service that answers every
    /// query with no results.
    pub fn new(corpus_path: impl AsRef<Path>) -> Self {
        Self::load(
            corpus_path.as_ref(),
            &IndexOptions::default(),
            SearchParams::default(),
        )
    }

    /// Load and index the corpus named by `config`.
    pub fn from_config(config: &Config) -> Self {
        Self::load(
            &config.corpus.path,
            &config.retrieval.index_options(),
            config.retrieval.search_params(),
        )
    }

    fn load(path: &Path, options: &IndexOptions, params: SearchParams) -> Self {
        let corpus = load_corpus_or_empty(path);
        let mut service = Self::from_corpus(corpus, options, params);
        service.source = Some(path.to_path_buf());
        service
    }

    /// Index an in-memory corpus.
    pub fn from_corpus(corpus: Corpus, options: &IndexOptions, params: SearchParams) -> Self {
        let index = if corpus.is_empty() {
            None
        } else {
            info!("Building TF-IDF index over {} cases", corpus.len());
            let index = RelevanceIndex::from_corpus(&corpus, options);
            match &index {
                Some(idx) => {
                    let stats = idx.stats();
                    info!(
                        "Index built: {} terms, {} weights",
                        stats.vocabulary, stats.nonzero_weights
                    );
                }
                None => warn!("No indexable terms in corpus; searches will return no results"),
            }
            index
        };

        Self {
            corpus,
            index,
            params,
            source: None,
            loaded_at: Utc::now(),
        }
    }

    /// Up to `top_k` cases scoring above the relevance floor, best first.
    pub fn search(&self, query: &str, top_k: usize) -> Vec<&CaseRecord> {
        self.search_scored(query, top_k)
            .into_iter()
            .map(|scored| scored.case)
            .collect()
    }

    /// Like [`search`](Self::search), keeping each case's index and score.
    pub fn search_scored(&self, query: &str, top_k: usize) -> Vec<ScoredCase<'_>> {
        self.hits(query, top_k)
            .into_iter()
            .filter_map(|hit| {
                self.corpus.get(hit.index).map(|case| ScoredCase {
                    index: hit.index,
                    score: hit.score,
                    case,
                })
            })
            .collect()
    }

    fn hits(&self, query: &str, top_k: usize) -> Vec<Hit> {
        match &self.index {
            Some(index) => index.rank(query, &self.params.with_top_k(top_k)),
            None => Vec::new(),
        }
    }

    /// Terms shared between `query` and case `index`, with their contributions.
    pub fn explain(&self, query: &str, index: usize) -> Vec<TermContribution> {
        self.index
            .as_ref()
            .map(|idx| idx.explain(query, index))
            .unwrap_or_default()
    }

    pub fn get(&self, index: usize) -> Option<&CaseRecord> {
        self.corpus.get(index)
    }

    pub fn len(&self) -> usize {
        self.corpus.len()
    }

    pub fn is_empty(&self) -> bool {
        self.corpus.is_empty()
    }

    pub fn is_index_ready(&self) -> bool {
        self.index.is_some()
    }

    pub fn index_stats(&self) -> Option<IndexStats> {
        self.index.as_ref().map(RelevanceIndex::stats)
    }

    pub fn params(&self) -> SearchParams {
        self.params
    }

    /// Path the corpus was loaded from, if it came from a file.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn bail_divorce() -> CaseService {
        let corpus = Corpus::new(vec![
            CaseRecord::new("What is bail?", "Bail is release pending trial.")
                .with_field("case_name", "Bail Case".into()),
            CaseRecord::new("What is divorce?", "Divorce ends a marriage legally.")
                .with_field("case_name", "Divorce Case".into()),
        ]);
        CaseService::from_corpus(corpus, &IndexOptions::default(), SearchParams::default())
    }

    #[test]
    fn test_search_returns_full_records() {
        let service = bail_divorce();
        let results = service.search("bail release", 1);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].case_name(), Some("Bail Case"));
        assert_eq!(results[0], service.get(0).unwrap());
    }

    #[test]
    fn test_unrelated_query_is_empty() {
        assert!(bail_divorce().search("unrelated astronomy topic", 3).is_empty());
    }

    #[test]
    fn test_top_k_zero_is_empty() {
        assert!(bail_divorce().search("bail", 0).is_empty());
    }

    #[test]
    fn test_search_scored_reports_index_and_score() {
        let service = bail_divorce();
        let scored = service.search_scored("divorce marriage", 3);
        assert_eq!(scored.len(), 1);
        assert_eq!(scored[0].index, 1);
        assert!(scored[0].score > 0.1 && scored[0].score <= 1.0);
    }

    #[test]
    fn test_missing_corpus_file() {
        let service = CaseService::new("/nonexistent/cases.json");
        assert!(service.is_empty());
        assert!(!service.is_index_ready());
        assert!(service.search("bail", 3).is_empty());
        assert!(service.search("", 3).is_empty());
        assert_eq!(service.source(), Some(Path::new("/nonexistent/cases.json")));
    }

    #[test]
    fn test_stop_word_only_corpus_has_no_index() {
        let corpus = Corpus::new(vec![CaseRecord::new("what is", "it is")]);
        let service =
            CaseService::from_corpus(corpus, &IndexOptions::default(), SearchParams::default());
        assert_eq!(service.len(), 1);
        assert!(!service.is_index_ready());
        assert!(service.search("what", 3).is_empty());
    }

    #[test]
    fn test_new_loads_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("cases.json");
        fs::write(
            &path,
            r#"[{"case_name": "Bail Case", "question": "What is bail?", "answer": "Bail is release pending trial."}]"#,
        )
        .unwrap();
        let service = CaseService::new(&path);
        assert_eq!(service.len(), 1);
        assert!(service.is_index_ready());
        assert_eq!(service.search("bail", service.params().top_k).len(), 1);
    }

    #[test]
    fn test_from_config_applies_retrieval_settings() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("cases.json");
        fs::write(
            &path,
            r#"[{"question": "bail", "answer": "court"}, {"question": "divorce", "answer": "court"}]"#,
        )
        .unwrap();
        let mut config = Config::minimal().with_corpus_path(&path);
        config.retrieval.top_k = 1;
        config.retrieval.extra_stop_words = vec!["court".to_string()];
        let service = CaseService::from_config(&config);
        assert_eq!(service.params().top_k, 1);
        let top_k = service.params().top_k;
        assert!(service.search("court", top_k).is_empty());
        assert_eq!(service.search("bail divorce", top_k).len(), 1);
    }

    #[test]
    fn test_explain_without_index() {
        let service = CaseService::new("/nonexistent/cases.json");
        assert!(service.explain("bail", 0).is_empty());
    }
}
