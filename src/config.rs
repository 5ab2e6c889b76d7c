//! TOML configuration.
//!
//! ```toml
//! [corpus]
//! path = "./data/cases.json"
//!
//! [retrieval]
//! top_k = 3
//! min_score = 0.1
//! stop_words = "english"     # or "none"
//! extra_stop_words = []
//!
//! [server]
//! bind = "127.0.0.1:5000"
//! ```
//!
//! Every section is optional; missing values take the defaults shown above.

use anyhow::{Context, Result};
use lawbot_core::index::IndexOptions;
use lawbot_core::search::{SearchParams, DEFAULT_MIN_SCORE, DEFAULT_TOP_K};
use lawbot_core::stop_words::StopWords;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub corpus: CorpusConfig,
    #[serde(default)]
    pub retrieval: RetrievalConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CorpusConfig {
    #[serde(default = "default_corpus_path")]
    pub path: PathBuf,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            path: default_corpus_path(),
        }
    }
}

fn default_corpus_path() -> PathBuf {
    PathBuf::from("./data/cases.json")
}

#[derive(Debug, Deserialize, Clone)]
pub struct RetrievalConfig {
    #[serde(default = "default_top_k")]
    pub top_k: usize,
    #[serde(default = "default_min_score")]
    pub min_score: f64,
    #[serde(default = "default_stop_words")]
    pub stop_words: String,
    #[serde(default)]
    pub extra_stop_words: Vec<String>,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            top_k: default_top_k(),
            min_score: default_min_score(),
            stop_words: default_stop_words(),
            extra_stop_words: Vec::new(),
        }
    }
}

fn default_top_k() -> usize {
    DEFAULT_TOP_K
}
fn default_min_score() -> f64 {
    DEFAULT_MIN_SCORE
}
fn default_stop_words() -> String {
    "english".to_string()
}

impl RetrievalConfig {
    pub fn search_params(&self) -> SearchParams {
        SearchParams {
            top_k: self.top_k,
            min_score: self.min_score,
        }
    }

    /// Stop-word set named by `stop_words`, extended with `extra_stop_words`.
    ///
    /// Unknown names fall back to English; [`load_config`] rejects them first.
    pub fn index_options(&self) -> IndexOptions {
        let base = match self.stop_words.as_str() {
            "none" => StopWords::none(),
            _ => StopWords::english(),
        };
        IndexOptions {
            stop_words: base.with_extra(&self.extra_stop_words),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1:5000".to_string()
}

impl Config {
    /// Built-in configuration used when no config file exists.
    pub fn minimal() -> Self {
        Self::default()
    }

    /// Same configuration, reading cases from `path`.
    pub fn with_corpus_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.corpus.path = path.into();
        self
    }
}

pub fn parse_config(content: &str) -> Result<Config> {
    let config: Config = toml::from_str(content).with_context(|| "Failed to parse config file")?;
    validate(&config)?;
    Ok(config)
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    parse_config(&content)
}

fn validate(config: &Config) -> Result<()> {
    if config.retrieval.top_k < 1 {
        anyhow::bail!("retrieval.top_k must be >= 1");
    }

    if !(0.0..1.0).contains(&config.retrieval.min_score) {
        anyhow::bail!("retrieval.min_score must be in [0.0, 1.0)");
    }

    match config.retrieval.stop_words.as_str() {
        "english" | "none" => {}
        other => anyhow::bail!(
            "Unknown stop word list: '{}'. Must be english or none.",
            other
        ),
    }

    if config.server.bind.trim().is_empty() {
        anyhow::bail!("server.bind must not be empty");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let cfg = parse_config("").unwrap();
        assert_eq!(cfg.corpus.path, PathBuf::from("./data/cases.json"));
        assert_eq!(cfg.retrieval.top_k, 3);
        assert!((cfg.retrieval.min_score - 0.1).abs() < f64::EPSILON);
        assert_eq!(cfg.retrieval.stop_words, "english");
        assert_eq!(cfg.server.bind, "127.0.0.1:5000");
    }

    #[test]
    fn test_full_file() {
        let cfg = parse_config(
            r#"
[corpus]
path = "/srv/cases.jsonl"

[retrieval]
top_k = 5
min_score = 0.25
stop_words = "none"
extra_stop_words = ["Court", "hon"]

[server]
bind = "0.0.0.0:8080"
"#,
        )
        .unwrap();
        assert_eq!(cfg.corpus.path, PathBuf::from("/srv/cases.jsonl"));
        assert_eq!(cfg.retrieval.search_params().top_k, 5);
        let options = cfg.retrieval.index_options();
        assert!(options.stop_words.contains("court"));
        assert!(!options.stop_words.contains("the"));
        assert_eq!(cfg.server.bind, "0.0.0.0:8080");
    }

    #[test]
    fn test_rejects_zero_top_k() {
        let err = parse_config("[retrieval]\ntop_k = 0").unwrap_err();
        assert!(err.to_string().contains("top_k"));
    }

    #[test]
    fn test_rejects_out_of_range_min_score() {
        assert!(parse_config("[retrieval]\nmin_score = 1.0").is_err());
        assert!(parse_config("[retrieval]\nmin_score = -0.5").is_err());
    }

    #[test]
    fn test_rejects_unknown_stop_words() {
        let err = parse_config("[retrieval]\nstop_words = \"french\"").unwrap_err();
        assert!(err.to_string().contains("french"));
    }

    #[test]
    fn test_missing_file_is_error() {
        assert!(load_config(Path::new("/nonexistent/lawbot.toml")).is_err());
    }
}
