//! Rendering retrieved cases for downstream consumers.
//!
//! Retrieved cases are handed to a generative model as a plain-text context
//! block and written into a report. Both formats live here so the CLI and the
//! HTTP server produce identical text.

use lawbot_core::models::CaseRecord;
use serde::Serialize;

const UNKNOWN_CASE: &str = "Unknown case";

/// Context block: one `Case:` / `Answer:` pair per record, each followed by a
/// blank line.
pub fn render_context<'a, I>(cases: I) -> String
where
    I: IntoIterator<Item = &'a CaseRecord>,
{
    let mut out = String::new();
    for case in cases {
        out.push_str("Case: ");
        out.push_str(case.case_name().unwrap_or(UNKNOWN_CASE));
        out.push_str("\nAnswer: ");
        out.push_str(case.answer());
        out.push_str("\n\n");
    }
    out
}

/// Report body pairing the user's question with the related cases.
pub fn render_report(question: &str, context: &str) -> String {
    format!("User Question: {}\n\nRelated Cases:\n{}", question, context)
}

/// Case names for display, in result order.
pub fn case_names<'a, I>(cases: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a CaseRecord>,
{
    cases
        .into_iter()
        .map(|c| c.case_name().unwrap_or(UNKNOWN_CASE).to_string())
        .collect()
}

/// Everything a prompt builder needs for one question.
#[derive(Debug, Clone, Serialize)]
pub struct QueryContext {
    pub retrieved_cases: Vec<String>,
    pub context: String,
    pub report: String,
}

impl QueryContext {
    pub fn build(question: &str, cases: &[&CaseRecord]) -> Self {
        let context = render_context(cases.iter().copied());
        Self {
            retrieved_cases: case_names(cases.iter().copied()),
            report: render_report(question, &context),
            context,
        }
    }
}
