//! `lawbot search`: print the cases most relevant to a question.

use anyhow::Result;
use serde::Serialize;

use crate::service::CaseService;
use lawbot_core::index::TermContribution;
use lawbot_core::models::CaseRecord;

/// One result line, as emitted by `--json`.
#[derive(Debug, Serialize)]
pub struct SearchResultItem<'a> {
    pub index: usize,
    pub score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explain: Option<Vec<TermContribution>>,
    pub case: &'a CaseRecord,
}

/// Collect results for `query`, optionally with per-term explanations.
pub fn search_cases<'a>(
    service: &'a CaseService,
    query: &str,
    top_k: usize,
    explain: bool,
) -> Vec<SearchResultItem<'a>> {
    service
        .search_scored(query, top_k)
        .into_iter()
        .map(|hit| SearchResultItem {
            index: hit.index,
            score: hit.score,
            explain: explain.then(|| service.explain(query, hit.index)),
            case: hit.case,
        })
        .collect()
}

pub fn run_search(
    service: &CaseService,
    query: &str,
    top_k: Option<usize>,
    explain: bool,
    json: bool,
) -> Result<()> {
    let top_k = top_k.unwrap_or(service.params().top_k);
    let results = search_cases(service, query, top_k, explain);

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }

    if results.is_empty() {
        println!("No results.");
        return Ok(());
    }

    for (i, r) in results.iter().enumerate() {
        println!(
            "{}. [{:.4}] #{} {}",
            i + 1,
            r.score,
            r.index,
            r.case.case_name().unwrap_or("(untitled case)")
        );
        println!("    Q: {}", truncate(r.case.question(), 160));
        println!("    A: {}", truncate(r.case.answer(), 240));
        if let Some(terms) = &r.explain {
            let parts: Vec<String> = terms
                .iter()
                .map(|t| format!("{}={:.4}", t.term, t.contribution))
                .collect();
            println!("    terms: {}", parts.join(", "));
        }
        println!();
    }

    Ok(())
}

/// Shorten `text` to at most `max_chars` characters, appending `...` when cut.
fn truncate(text: &str, max_chars: usize) -> String {
    let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= max_chars {
        flat
    } else {
        let cut: String = flat.chars().take(max_chars).collect();
        format!("{}...", cut.trim_end())
    }
}
