//! Case records and the corpus that holds them.
//!
//! A [`CaseRecord`] keeps the JSON object it was loaded from untouched, so
//! passthrough fields (case name, citations, court) survive a round trip to
//! callers. Only `question` and `answer` are interpreted, and only through
//! lenient accessors that never fail.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One question/answer case, stored verbatim.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CaseRecord {
    fields: Map<String, Value>,
}

impl CaseRecord {
    pub fn from_fields(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Builds a record with just a question and an answer.
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        let mut fields = Map::new();
        fields.insert("question".to_string(), Value::String(question.into()));
        fields.insert("answer".to_string(), Value::String(answer.into()));
        Self { fields }
    }

    /// Adds or replaces a passthrough field.
    pub fn with_field(mut self, name: impl Into<String>, value: Value) -> Self {
        self.fields.insert(name.into(), value);
        self
    }

    /// The question text, or `""` when missing or not a string.
    pub fn question(&self) -> &str {
        self.text_field("question")
    }

    /// The answer text, or `""` when missing or not a string.
    pub fn answer(&self) -> &str {
        self.text_field("answer")
    }

    pub fn case_name(&self) -> Option<&str> {
        self.fields.get("case_name").and_then(Value::as_str)
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Text that is indexed for this record: question and answer joined by a
    /// single space.
    pub fn searchable_text(&self) -> String {
        format!("{} {}", self.question(), self.answer())
    }

    fn text_field(&self, name: &str) -> &str {
        self.fields.get(name).and_then(Value::as_str).unwrap_or("")
    }
}

/// Ordered, read-only sequence of case records.
///
/// Position in the corpus is the record's identity: row `i` of a
/// [`RelevanceIndex`](crate::index::RelevanceIndex) built from this corpus
/// describes `records[i]`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Corpus {
    records: Vec<CaseRecord>,
}

impl Corpus {
    pub fn new(records: Vec<CaseRecord>) -> Self {
        Self { records }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&CaseRecord> {
        self.records.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CaseRecord> {
        self.records.iter()
    }

    pub fn records(&self) -> &[CaseRecord] {
        &self.records
    }

    /// Searchable texts in corpus order.
    pub fn searchable_texts(&self) -> Vec<String> {
        self.records.iter().map(CaseRecord::searchable_text).collect()
    }
}

impl FromIterator<CaseRecord> for Corpus {
    fn from_iter<I: IntoIterator<Item = CaseRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Corpus {
    type Item = &'a CaseRecord;
    type IntoIter = std::slice::Iter<'a, CaseRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
