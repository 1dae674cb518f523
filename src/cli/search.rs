//! Search command
//!
//! Shared by the one-shot CLI form and the REPL.

use std::time::Instant;

use anyhow::Result;

use super::output::Output;
use crate::domain::{Hit, QueryMode};
use crate::storage::Library;

/// Runs a query and prints the ranked results
pub fn run(
    library: &Library,
    output: &Output,
    query: &str,
    mode: QueryMode,
    limit: Option<usize>,
) -> Result<()> {
    output.verbose_ctx(
        "search",
        &format!("Searching for: {} (mode: {}, limit: {:?})", query, mode, limit),
    );

    let start = Instant::now();
    let hits = library.search(query, mode, limit)?;
    output.verbose_ctx(
        "search",
        &format!("Found {} results in {:?}", hits.len(), start.elapsed()),
    );

    print_hits(library, output, query, &hits);
    Ok(())
}

/// Prints hits as a table (text) or an array (JSON)
pub fn print_hits(library: &Library, output: &Output, query: &str, hits: &[Hit]) {
    if output.is_json() {
        let items: Vec<_> = hits
            .iter()
            .filter_map(|hit| {
                let record = library.record(&hit.id)?;
                Some(serde_json::json!({
                    "id": hit.id,
                    "type": record.kind(),
                    "score": hit.score,
                    "matched": hit.matched,
                    "title": record.title(),
                    "document": record.document().path.display().to_string(),
                    "section": hit.id.section_id(),
                    "snippet": library.index().snippet(&record, hit),
                }))
            })
            .collect();
        output.data(&items);
        return;
    }

    if hits.is_empty() {
        println!("No results found for '{}'", query);
        return;
    }

    println!("Search results for '{}':", query);
    println!("{:<20} {:<8} {:<6} TITLE", "ID", "TYPE", "SCORE");
    println!("{}", "-".repeat(70));

    for hit in hits {
        let Some(record) = library.record(&hit.id) else {
            continue;
        };

        println!(
            "{:<20} {:<8} {:<6} {}",
            hit.id.to_string(),
            record.kind(),
            hit.score,
            record.title()
        );

        if let Some(snippet) = library.index().snippet(&record, hit) {
            if snippet != record.title() {
                println!("{:<36} {}", "", snippet);
            }
        }
    }

    println!();
    println!("Found {} result(s)", hits.len());
}
