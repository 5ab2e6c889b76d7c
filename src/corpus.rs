//! Corpus loader.
//!
//! Reads case records from a JSON file at startup. Two layouts are accepted:
//!
//! - a JSON array of objects (default);
//! - JSON Lines, one object per line, for files ending in `.jsonl` or `.ndjson`.
//!
//! [`load_corpus`] reports every problem as an error. [`load_corpus_or_empty`]
//! is what the service uses: a missing or unparseable source is logged and
//! turned into an empty corpus, so retrieval degrades to "no results" instead
//! of stopping the process.

use anyhow::{bail, Context, Result};
use lawbot_core::models::{CaseRecord, Corpus};
use serde_json::Value;
use std::path::Path;
use tracing::{info, warn};

/// Load the corpus at `path`, failing on a missing file or malformed content.
pub fn load_corpus(path: &Path) -> Result<Corpus> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read corpus file: {}", path.display()))?;

    let records = if is_json_lines(path) {
        parse_json_lines(&content)
    } else {
        parse_json_array(&content)
    }
    .with_context(|| format!("Failed to parse corpus file: {}", path.display()))?;

    Ok(Corpus::new(records))
}

/// Load the corpus at `path`, logging a warning and returning an empty corpus
/// on any failure.
pub fn load_corpus_or_empty(path: &Path) -> Corpus {
    if !path.exists() {
        warn!("Corpus file not found at {}", path.display());
        return Corpus::empty();
    }

    match load_corpus(path) {
        Ok(corpus) => {
            info!("Loaded {} cases from {}", corpus.len(), path.display());
            corpus
        }
        Err(e) => {
            warn!("Could not load corpus, continuing without cases: {:#}", e);
            Corpus::empty()
        }
    }
}

fn is_json_lines(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("jsonl") | Some("ndjson")
    )
}

fn parse_json_array(content: &str) -> Result<Vec<CaseRecord>> {
    let value: Value = serde_json::from_str(content)?;
    let Value::Array(items) = value else {
        bail!("expected a JSON array of case objects");
    };
    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| to_record(item).with_context(|| format!("record {}", i)))
        .collect()
}

fn parse_json_lines(content: &str) -> Result<Vec<CaseRecord>> {
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(n, line)| {
            let value: Value =
                serde_json::from_str(line).with_context(|| format!("line {}", n + 1))?;
            to_record(value).with_context(|| format!("line {}", n + 1))
        })
        .collect()
}

fn to_record(value: Value) -> Result<CaseRecord> {
    match value {
        Value::Object(fields) => Ok(CaseRecord::from_fields(fields)),
        other => bail!("expected a JSON object, found {}", json_kind(&other)),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_json_array_preserves_order_and_fields() {
        let tmp = TempDir::new().unwrap();
        let path = write(
            &tmp,
            "cases.json",
            r#"[
                {"case_name": "A", "question": "q1", "answer": "a1"},
                {"case_name": "B", "question": "q2"}
            ]"#,
        );
        let corpus = load_corpus(&path).unwrap();
        assert_eq!(corpus.len(), 2);
        assert_eq!(corpus.get(0).unwrap().case_name(), Some("A"));
        assert_eq!(corpus.get(1).unwrap().answer(), "");
        assert_eq!(corpus.get(1).unwrap().searchable_text(), "q2 ");
    }

    #[test]
    fn test_load_json_lines_skips_blank_lines() {
        let tmp = TempDir::new().unwrap();
        let path = write(
            &tmp,
            "cases.jsonl",
            "{\"question\": \"q1\", \"answer\": \"a1\"}\n\n{\"question\": \"q2\"}\n",
        );
        let corpus = load_corpus(&path).unwrap();
        assert_eq!(corpus.len(), 2);
        assert_eq!(corpus.get(1).unwrap().question(), "q2");
    }

    #[test]
    fn test_non_array_is_error() {
        let tmp = TempDir::new().unwrap();
        let path = write(&tmp, "cases.json", r#"{"question": "q"}"#);
        assert!(load_corpus(&path).is_err());
    }

    #[test]
    fn test_non_object_element_is_error() {
        let tmp = TempDir::new().unwrap();
        let path = write(&tmp, "cases.json", r#"[{"question": "q"}, 7]"#);
        let err = load_corpus(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("record 1"));
    }

    #[test]
    fn test_missing_file_degrades_to_empty() {
        let corpus = load_corpus_or_empty(Path::new("/nonexistent/cases.json"));
        assert!(corpus.is_empty());
    }

    #[test]
    fn test_malformed_file_degrades_to_empty() {
        let tmp = TempDir::new().unwrap();
        let path = write(&tmp, "cases.json", "[{\"question\": ");
        assert!(load_corpus_or_empty(&path).is_empty());
    }

    #[test]
    fn test_empty_array() {
        let tmp = TempDir::new().unwrap();
        let path = write(&tmp, "cases.json", "[]");
        assert!(load_corpus(&path).unwrap().is_empty());
    }
}
