//! Corpus and index statistics.
//!
//! Gives a quick summary of what was loaded: where the cases came from, how
//! many there are, and how large the fitted vocabulary is. Used by
//! `lawbot stats` to confirm the corpus is wired up before serving.

use anyhow::Result;

use crate::service::CaseService;

/// Run the stats command and print a summary.
pub fn run_stats(service: &CaseService) -> Result<()> {
    let source = service
        .source()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "(in memory)".to_string());
    let file_size = service
        .source()
        .and_then(|p| std::fs::metadata(p).ok())
        .map(|m| m.len());

    println!("Lawbot — Corpus Stats");
    println!("=====================");
    println!();
    println!("  Corpus:      {}", source);
    println!(
        "  Size:        {}",
        file_size.map(format_bytes).unwrap_or_else(|| "missing".to_string())
    );
    println!("  Loaded at:   {}", service.loaded_at().format("%Y-%m-%d %H:%M:%S UTC"));
    println!();
    println!("  Cases:       {}", service.len());

    match service.index_stats() {
        Some(stats) => {
            println!("  Vocabulary:  {}", stats.vocabulary);
            println!("  Weights:     {}", stats.nonzero_weights);
            println!(
                "  Density:     {:.2} terms/case",
                if stats.documents > 0 {
                    stats.nonzero_weights as f64 / stats.documents as f64
                } else {
                    0.0
                }
            );
            println!("  Index:       ready");
        }
        None => println!("  Index:       unavailable (no indexable cases)"),
    }

    let params = service.params();
    println!();
    println!("  top_k:       {}", params.top_k);
    println!("  min_score:   {}", params.min_score);
    println!();

    Ok(())
}

/// Format a byte count as a human-readable string.
fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else if bytes < 1024 * 1024 * 1024 {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    } else {
        format!("{:.2} GB", bytes as f64 / (1024.0 * 1024.0 * 1024.0))
    }
}
