//! Question/answer extraction
//!
//! Study notes mark interview questions with a quoted blockquote and
//! follow them with a bold "Detailed Answer" marker:
//!
//! ```text
//! > "What are the four pillars of OOP?"
//!
//! **Detailed Answer:**
//! Encapsulation, abstraction, inheritance and polymorphism...
//! ```
//!
//! Extraction is a best-effort pattern match over a section's direct
//! content. Content that does not match simply yields no items.

use serde::Serialize;

use super::id::RecordId;

const ANSWER_MARKER: &str = "**Detailed Answer";

/// A question/answer pair found inside a section
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QaItem {
    pub id: RecordId,
    pub question: String,
    pub answer: String,

    /// Tags inherited from the document frontmatter
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

/// A raw match before IDs and tags are attached
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct QaMatch {
    pub question: String,
    pub answer: String,
}

impl QaMatch {
    pub(crate) fn into_item(self, id: RecordId, tags: &[String]) -> QaItem {
        QaItem {
            id,
            question: self.question,
            answer: self.answer,
            tags: tags.to_vec(),
        }
    }
}

/// Returns true if the line opens a quoted question
fn is_question_start(line: &str) -> bool {
    let trimmed = line.trim_start();
    trimmed.starts_with("> \"") || trimmed.starts_with("> \u{201c}")
}

fn is_blockquote(line: &str) -> bool {
    line.trim_start().starts_with('>')
}

/// Strips the blockquote marker and one optional space
fn strip_blockquote(line: &str) -> &str {
    let trimmed = line.trim_start();
    let rest = trimmed.strip_prefix('>').unwrap_or(trimmed);
    rest.strip_prefix(' ').unwrap_or(rest).trim_end()
}

/// Returns the text following the answer marker on the same line,
/// or `None` if the line has no marker
fn answer_remainder(line: &str) -> Option<&str> {
    let start = line.find(ANSWER_MARKER)?;
    let after = &line[start + 2..];

    let rest = match after.find("**") {
        Some(close) => &after[close + 2..],
        None => "",
    };

    Some(rest.trim_start().trim_start_matches(':').trim())
}

fn clean_question(lines: &[&str]) -> String {
    let joined = lines
        .iter()
        .map(|l| strip_blockquote(l))
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    joined
        .trim()
        .trim_matches(|c| c == '"' || c == '\u{201c}' || c == '\u{201d}')
        .trim()
        .to_string()
}

/// Finds all question/answer pairs in a section's direct content
pub(crate) fn extract(content: &str) -> Vec<QaMatch> {
    let lines: Vec<&str> = content.split_inclusive('\n').collect();
    let mut items = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        if !is_question_start(lines[i]) {
            i += 1;
            continue;
        }

        let mut j = i;
        let mut question_lines = Vec::new();
        while j < lines.len() && is_blockquote(lines[j]) {
            question_lines.push(lines[j]);
            j += 1;
        }

        let mut k = j;
        while k < lines.len()
            && !is_question_start(lines[k])
            && answer_remainder(lines[k]).is_none()
        {
            k += 1;
        }

        let remainder = match lines.get(k).and_then(|l| answer_remainder(l)) {
            Some(r) => r,
            None => {
                // Question without an answer marker
                i = j;
                continue;
            }
        };

        let mut end = k + 1;
        while end < lines.len() && !is_question_start(lines[end]) {
            end += 1;
        }

        let answer = std::iter::once(remainder)
            .chain(lines[k + 1..end].iter().map(|l| l.trim_end_matches(['\r', '\n'])))
            .collect::<Vec<_>>()
            .join("\n");

        let question = clean_question(&question_lines);
        if !question.is_empty() {
            items.push(QaMatch {
                question,
                answer: answer.trim().to_string(),
            });
        }

        i = end;
    }

    items
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_single_pair() {
        let content = "\n> \"What are the four pillars of OOP?\"\n\n**Detailed Answer:**\nEncapsulation, abstraction,\ninheritance and polymorphism.\n";
        let items = extract(content);

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].question, "What are the four pillars of OOP?");
        assert_eq!(
            items[0].answer,
            "Encapsulation, abstraction,\ninheritance and polymorphism."
        );
    }

    #[test]
    fn answer_text_on_marker_line() {
        let content = "> \"Define SRP\"\n**Detailed Answer**: one reason to change.\n";
        let items = extract(content);

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].answer, "one reason to change.");
    }

    #[test]
    fn multi_line_question() {
        let content = "> \"Explain dependency\n> injection in .NET\"\n**Detailed Answer:**\nUse the built-in container.\n";
        let items = extract(content);

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].question, "Explain dependency injection in .NET");
    }

    #[test]
    fn several_pairs_split_at_next_question() {
        let content = "> \"First?\"\n**Detailed Answer:**\nOne.\n\n> \"Second?\"\n**Detailed Answer:**\nTwo.\n";
        let items = extract(content);

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].answer, "One.");
        assert_eq!(items[1].question, "Second?");
        assert_eq!(items[1].answer, "Two.");
    }

    #[test]
    fn question_without_marker_is_skipped() {
        let content = "> \"Orphan question?\"\n\nJust prose.\n\n> \"Real?\"\n**Detailed Answer:**\nYes.\n";
        let items = extract(content);

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].question, "Real?");
    }

    #[test]
    fn plain_prose_yields_nothing() {
        assert!(extract("Some text\n> a plain quote\n**Bold**\n").is_empty());
        assert!(extract("").is_empty());
    }

    #[test]
    fn curly_quotes_are_recognized() {
        let content = "> \u{201c}What is a mock?\u{201d}\n**Detailed Answer:** A test double.\n";
        let items = extract(content);

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].question, "What is a mock?");
        assert_eq!(items[0].answer, "A test double.");
    }
}
