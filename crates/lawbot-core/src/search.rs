//! Ranking of scored candidates.
//!
//! Given one similarity score per corpus row, [`rank_scores`] produces the
//! ordered hit list:
//!
//! 1. Drop every score that is not strictly greater than `min_score`.
//! 2. Sort by score, descending, with a stable sort so that equal scores keep
//!    corpus order (lower index first).
//! 3. Truncate to `top_k`.
//!
//! Ranking is kept separate from scoring so it can be exercised with any
//! score vector.

use serde::Serialize;

/// Default number of cases returned per query.
pub const DEFAULT_TOP_K: usize = 3;

/// Default relevance floor; scores at or below it are noise.
pub const DEFAULT_MIN_SCORE: f64 = 0.1;

/// Retrieval tuning parameters, decoupled from application config.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchParams {
    /// Maximum results to return.
    pub top_k: usize,
    /// Results must score strictly above this.
    pub min_score: f64,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            top_k: DEFAULT_TOP_K,
            min_score: DEFAULT_MIN_SCORE,
        }
    }
}

impl SearchParams {
    pub fn with_top_k(self, top_k: usize) -> Self {
        Self { top_k, ..self }
    }
}

/// A ranked candidate: corpus position and cosine similarity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Hit {
    pub index: usize,
    pub score: f64,
}

/// Filter, sort and truncate `scores` (one per corpus row) into hits.
pub fn rank_scores(scores: &[f64], params: &SearchParams) -> Vec<Hit> {
    if params.top_k == 0 {
        return Vec::new();
    }

    let mut hits: Vec<Hit> = scores
        .iter()
        .enumerate()
        .filter(|(_, &score)| score > params.min_score)
        .map(|(index, &score)| Hit { index, score })
        .collect();

    // `sort_by` is stable: equal scores stay in corpus order.
    hits.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    hits.truncate(params.top_k);
    hits
}
