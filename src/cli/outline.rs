//! Corpus overview commands (list, stats)

use anyhow::Result;

use super::output::Output;
use crate::storage::Library;

/// Lists documents with their section outline
pub fn list(library: &Library, output: &Output) -> Result<()> {
    let corpus = library.corpus();
    output.verbose_ctx(
        "list",
        &format!("Listing {} documents", corpus.documents().len()),
    );

    if output.is_json() {
        let items: Vec<_> = corpus
            .documents()
            .iter()
            .map(|doc| {
                let sections: Vec<_> = doc
                    .sections
                    .iter()
                    .map(|s| {
                        serde_json::json!({
                            "id": s.id,
                            "heading": s.heading,
                            "level": s.level,
                            "qa_items": s.qa_items.len(),
                        })
                    })
                    .collect();

                serde_json::json!({
                    "id": doc.id,
                    "path": doc.path.display().to_string(),
                    "title": doc.title,
                    "tags": doc.frontmatter.tags,
                    "sections": sections,
                })
            })
            .collect();
        output.data(&items);
        return Ok(());
    }

    if corpus.is_empty() {
        println!("No documents found in {}", corpus.root().display());
        return Ok(());
    }

    for doc in corpus.documents() {
        println!("{}  {}  {}", doc.id, doc.path.display(), doc.title);
        if !doc.frontmatter.tags.is_empty() {
            println!("    tags: {}", doc.frontmatter.tags.join(", "));
        }

        for section in &doc.sections {
            let indent = "  ".repeat(section.level.saturating_sub(1).min(6));
            let qa = match section.qa_items.len() {
                0 => String::new(),
                n => format!("  [{} QA]", n),
            };
            println!(
                "{:<20}{}{} {}{}",
                section.id.to_string(),
                indent,
                "#".repeat(section.level),
                section.heading,
                qa
            );
        }
        println!();
    }

    Ok(())
}

/// Shows corpus and index statistics
pub fn stats(library: &Library, output: &Output) -> Result<()> {
    let corpus = library.corpus();
    let index = library.index();
    let timings = library.timings();

    if output.is_json() {
        output.data(&serde_json::json!({
            "path": library.path().display().to_string(),
            "documents": corpus.documents().len(),
            "sections": corpus.section_count(),
            "qa_items": corpus.qa_count(),
            "records": index.len(),
            "terms": index.term_count(),
            "load_ms": timings.load.as_millis(),
            "index_ms": timings.index.as_millis(),
        }));
        return Ok(());
    }

    println!("Corpus Statistics");
    println!("{}", "=".repeat(40));
    println!("Path: {}", library.path().display());
    println!();
    println!("  Documents: {}", corpus.documents().len());
    println!("  Sections:  {}", corpus.section_count());
    println!("  QA items:  {}", corpus.qa_count());
    println!("  Terms:     {}", index.term_count());
    println!();
    println!(
        "Loaded in {:?}, indexed {} records in {:?}",
        timings.load,
        index.len(),
        timings.index
    );

    Ok(())
}
