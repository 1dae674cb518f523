//! Show command: print one section or QA item in full

use anyhow::Result;

use super::output::Output;
use crate::domain::Record;
use crate::storage::Library;

pub fn run(library: &Library, output: &Output, id: &str) -> Result<()> {
    output.verbose_ctx("show", &format!("Looking up record: {}", id));
    let record = library.find(id)?;
    print_record(output, &record);
    Ok(())
}

pub fn print_record(output: &Output, record: &Record<'_>) {
    let document = record.document();

    match *record {
        Record::Section { section, .. } => {
            let parent = section
                .parent
                .and_then(|p| document.section(p))
                .map(|p| p.id.to_string());

            if output.is_json() {
                let qa: Vec<_> = section
                    .qa_items
                    .iter()
                    .map(|item| {
                        serde_json::json!({
                            "id": item.id,
                            "question": item.question,
                        })
                    })
                    .collect();

                output.data(&serde_json::json!({
                    "id": section.id,
                    "type": record.kind(),
                    "document": document.path.display().to_string(),
                    "heading": section.heading,
                    "level": section.level,
                    "parent": parent,
                    "body": document.body(section.index()).unwrap_or_default(),
                    "qa_items": qa,
                }));
                return;
            }

            println!("{}  ({})", section.id, document.path.display());
            if let Some(parent) = parent {
                println!("Parent: {}", parent);
            }
            println!();
            print!("{}", record.text());
            if !record.text().ends_with('\n') {
                println!();
            }

            if !section.qa_items.is_empty() {
                println!();
                println!("QA items ({}):", section.qa_items.len());
                for item in &section.qa_items {
                    println!("  {:<20} {}", item.id.to_string(), item.question);
                }
            }
        }

        Record::Qa { section, item, .. } => {
            if output.is_json() {
                output.data(&serde_json::json!({
                    "id": item.id,
                    "type": record.kind(),
                    "document": document.path.display().to_string(),
                    "section": section.id,
                    "section_heading": section.heading,
                    "question": item.question,
                    "answer": item.answer,
                    "tags": item.tags,
                }));
                return;
            }

            println!(
                "{}  ({} > {})",
                item.id,
                document.path.display(),
                section.heading
            );
            if !item.tags.is_empty() {
                println!("Tags: {}", item.tags.join(", "));
            }
            println!();
            println!("Q: {}", item.question);
            println!();
            println!("A: {}", item.answer);
        }
    }
}
