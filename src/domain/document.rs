//! Document domain model
//!
//! A document is one Markdown file split on ATX headings. Parsing is a
//! single pass over the text and never fails: level skips, empty sections
//! and headingless files are all valid input.
//!
//! Each section keeps its raw heading line and its direct content (the
//! lines up to the next heading of any level), so the original text can
//! be rebuilt exactly from the preamble and the sections in order.

use std::ops::Range;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer, Serialize};
use serde_yaml::Value;

use super::id::{DocumentId, RecordId};
use super::qa::{self, QaItem};

/// Optional YAML frontmatter of a document
///
/// Fields are read leniently: a badly typed field is dropped or coerced,
/// never a reason to reject the whole block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Frontmatter {
    #[serde(deserialize_with = "lenient_title")]
    pub title: Option<String>,

    /// A YAML list, or a single comma-separated string
    #[serde(deserialize_with = "lenient_tags")]
    pub tags: Vec<String>,
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn lenient_title<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(scalar_text(&Value::deserialize(deserializer)?))
}

fn lenient_tags<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    let tags = match Value::deserialize(deserializer)? {
        Value::Sequence(items) => items.iter().filter_map(scalar_text).collect(),
        Value::String(s) => s
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect(),
        other => scalar_text(&other).into_iter().collect(),
    };
    Ok(tags)
}

/// A heading-delimited block of a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub id: RecordId,

    /// Heading text without markers
    pub heading: String,

    /// Number of leading `#` characters
    pub level: usize,

    /// Index of the containing section, `None` for the document root
    pub parent: Option<usize>,

    /// The raw heading line, including its line ending
    pub heading_line: String,

    /// Text between this heading and the next heading of any level
    pub content: String,

    /// QA items found in the direct content
    pub qa_items: Vec<QaItem>,

    /// Indices of sections nested below this one
    descendants: Range<usize>,
}

impl Section {
    /// Returns the 0-based position of this section in its document
    pub fn index(&self) -> usize {
        self.id.section_index()
    }

    /// Returns the indices of sections nested inside this one
    pub fn descendants(&self) -> Range<usize> {
        self.descendants.clone()
    }
}

/// One parsed Markdown file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub id: DocumentId,

    /// Path relative to the corpus root
    pub path: PathBuf,

    pub title: String,
    pub frontmatter: Frontmatter,

    /// Text before the first heading, including any frontmatter block
    pub preamble: String,

    pub sections: Vec<Section>,
}

impl Document {
    /// Parses Markdown text into a document
    ///
    /// `path` is the location relative to the corpus root; it determines
    /// the document ID.
    pub fn parse(path: impl Into<PathBuf>, text: &str) -> Self {
        let path = path.into();
        let id = DocumentId::from_path(&path);

        let (frontmatter, body_start) = match split_frontmatter(text) {
            Some((fm, end)) => (Some(fm), end),
            None => (None, 0),
        };
        let frontmatter = frontmatter.unwrap_or_default();

        let headings = find_headings(text, body_start);
        let preamble_end = headings.first().map(|h| h.start).unwrap_or(text.len());

        let mut sections: Vec<Section> = Vec::with_capacity(headings.len());
        let mut stack: Vec<usize> = Vec::new();

        for (index, heading) in headings.iter().enumerate() {
            let content_end = headings
                .get(index + 1)
                .map(|h| h.start)
                .unwrap_or(text.len());

            while let Some(&top) = stack.last() {
                if sections[top].level >= heading.level {
                    stack.pop();
                } else {
                    break;
                }
            }
            let parent = stack.last().copied();
            stack.push(index);

            let section_id = id.section(index);
            let content = &text[heading.line_end..content_end];
            let qa_items = qa::extract(content)
                .into_iter()
                .enumerate()
                .map(|(n, m)| m.into_item(section_id.qa(n), &frontmatter.tags))
                .collect();

            sections.push(Section {
                id: section_id,
                heading: heading.text.clone(),
                level: heading.level,
                parent,
                heading_line: text[heading.start..heading.line_end].to_string(),
                content: content.to_string(),
                qa_items,
                descendants: index + 1..index + 1,
            });
        }

        for index in 0..sections.len() {
            let level = sections[index].level;
            let end = sections[index + 1..]
                .iter()
                .position(|s| s.level <= level)
                .map(|p| index + 1 + p)
                .unwrap_or(sections.len());
            sections[index].descendants = index + 1..end;
        }

        let title = frontmatter
            .title
            .clone()
            .or_else(|| {
                sections
                    .iter()
                    .find(|s| s.level == 1)
                    .map(|s| s.heading.clone())
            })
            .unwrap_or_else(|| file_stem(&path));

        Self {
            id,
            path,
            title,
            frontmatter,
            preamble: text[..preamble_end].to_string(),
            sections,
        }
    }

    /// Returns a section by its 0-based index
    pub fn section(&self, index: usize) -> Option<&Section> {
        self.sections.get(index)
    }

    /// Returns the body of a section: its direct content followed by
    /// every nested subsection, up to the next heading of equal or
    /// shallower level
    pub fn body(&self, index: usize) -> Option<String> {
        let section = self.sections.get(index)?;
        let mut body = section.content.clone();

        for nested in &self.sections[section.descendants()] {
            body.push_str(&nested.heading_line);
            body.push_str(&nested.content);
        }

        Some(body)
    }

    /// Rebuilds the original text from the parsed structure
    pub fn reconstruct(&self) -> String {
        let mut text = self.preamble.clone();
        for section in &self.sections {
            text.push_str(&section.heading_line);
            text.push_str(&section.content);
        }
        text
    }

    /// Returns the number of QA items across all sections
    pub fn qa_count(&self) -> usize {
        self.sections.iter().map(|s| s.qa_items.len()).sum()
    }
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// A heading found in the source text
#[derive(Debug)]
struct HeadingLine {
    /// Byte offset of the heading line
    start: usize,
    /// Byte offset just past the line ending
    line_end: usize,
    level: usize,
    text: String,
}

/// Parses an ATX heading line into its level and text
fn parse_heading(line: &str) -> Option<(usize, String)> {
    let line = line.trim_end_matches(['\r', '\n']);
    let level = line.chars().take_while(|&c| c == '#').count();
    if level == 0 {
        return None;
    }

    let rest = &line[level..];
    if !rest.is_empty() && !rest.starts_with([' ', '\t']) {
        return None;
    }

    let text = rest.trim();
    let without_closing = text.trim_end_matches('#');
    let text = if without_closing.is_empty() {
        ""
    } else if without_closing.ends_with([' ', '\t']) {
        without_closing.trim_end()
    } else {
        text
    };

    Some((level, text.to_string()))
}

/// Returns the fence marker character if the line opens or closes a
/// fenced code block
fn fence_marker(line: &str) -> Option<(char, usize)> {
    let trimmed = line.trim_start();
    let marker = trimmed.chars().next()?;
    if marker != '`' && marker != '~' {
        return None;
    }

    let run = trimmed.chars().take_while(|&c| c == marker).count();
    (run >= 3).then_some((marker, run))
}

/// Finds every heading outside fenced code blocks, starting at `from`
fn find_headings(text: &str, from: usize) -> Vec<HeadingLine> {
    let mut headings = Vec::new();
    let mut fence: Option<(char, usize)> = None;
    let mut offset = 0;

    for line in text.split_inclusive('\n') {
        let start = offset;
        offset += line.len();

        if start < from {
            continue;
        }

        match (fence, fence_marker(line)) {
            (None, Some(open)) => {
                fence = Some(open);
                continue;
            }
            (Some((ch, len)), Some((close_ch, close_len))) => {
                let closes = close_ch == ch
                    && close_len >= len
                    && line.trim_start()[close_len * close_ch.len_utf8()..]
                        .trim()
                        .is_empty();
                if closes {
                    fence = None;
                }
                continue;
            }
            (Some(_), None) => continue,
            (None, None) => {}
        }

        if let Some((level, text)) = parse_heading(line) {
            headings.push(HeadingLine {
                start,
                line_end: offset,
                level,
                text,
            });
        }
    }

    headings
}

/// Splits a leading YAML frontmatter block
///
/// Returns the parsed frontmatter and the byte offset just past the
/// closing `---` line. Blocks that do not parse as a mapping are not
/// treated as frontmatter.
fn split_frontmatter(text: &str) -> Option<(Frontmatter, usize)> {
    let mut lines = text.split_inclusive('\n');
    let first = lines.next()?;
    if first.trim_end() != "---" {
        return None;
    }

    let yaml_start = first.len();
    let mut offset = yaml_start;

    for line in lines {
        let line_start = offset;
        offset += line.len();

        let trimmed = line.trim_end();
        if trimmed == "---" || trimmed == "..." {
            let yaml = &text[yaml_start..line_start];
            if yaml.trim().is_empty() {
                return Some((Frontmatter::default(), offset));
            }
            let value: Value = serde_yaml::from_str(yaml).ok()?;
            if !value.is_mapping() {
                return None;
            }
            return serde_yaml::from_value::<Frontmatter>(value)
                .ok()
                .map(|fm| (fm, offset));
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const SAMPLE: &str = "\
# OOP Interview Questions

Intro text.

## Question 1: Explain the 4 OOP Pillars

> \"Can you explain the four pillars?\"

**Detailed Answer:**
Encapsulation hides state.

### Example

```csharp
# not a heading
public class Account { }
```

## Question 2: Interfaces

Plain body.
";

    #[test]
    fn splits_on_headings() {
        let doc = Document::parse("oop.md", SAMPLE);

        let headings: Vec<_> = doc.sections.iter().map(|s| s.heading.as_str()).collect();
        assert_eq!(
            headings,
            vec![
                "OOP Interview Questions",
                "Question 1: Explain the 4 OOP Pillars",
                "Example",
                "Question 2: Interfaces",
            ]
        );

        let levels: Vec<_> = doc.sections.iter().map(|s| s.level).collect();
        assert_eq!(levels, vec![1, 2, 3, 2]);
    }

    #[test]
    fn heading_in_code_fence_is_ignored() {
        let doc = Document::parse("oop.md", SAMPLE);
        assert!(doc.sections[2].content.contains("# not a heading"));
    }

    #[test]
    fn parents_follow_nesting() {
        let doc = Document::parse("oop.md", SAMPLE);
        let parents: Vec<_> = doc.sections.iter().map(|s| s.parent).collect();

        assert_eq!(parents, vec![None, Some(0), Some(1), Some(0)]);
    }

    #[test]
    fn body_includes_nested_sections() {
        let doc = Document::parse("oop.md", SAMPLE);

        let body = doc.body(1).unwrap();
        assert!(body.contains("Encapsulation hides state."));
        assert!(body.contains("public class Account"));
        assert!(body.contains("### Example"));
        assert!(!body.contains("Question 2"));

        assert_eq!(doc.sections[0].descendants(), 1..4);
        assert_eq!(doc.sections[1].descendants(), 2..3);
        assert!(doc.sections[3].descendants().is_empty());
    }

    #[test]
    fn title_from_first_h1() {
        let doc = Document::parse("oop.md", SAMPLE);
        assert_eq!(doc.title, "OOP Interview Questions");
    }

    #[test]
    fn title_falls_back_to_file_stem() {
        let doc = Document::parse("notes/solid-principles.md", "## Only h2\n");
        assert_eq!(doc.title, "solid-principles");
    }

    #[test]
    fn extracts_qa_items() {
        let doc = Document::parse("oop.md", SAMPLE);
        let section = &doc.sections[1];

        assert_eq!(section.qa_items.len(), 1);
        let item = &section.qa_items[0];
        assert_eq!(item.question, "Can you explain the four pillars?");
        assert_eq!(item.answer, "Encapsulation hides state.");
        assert_eq!(item.id.to_string(), format!("{}.2.q1", doc.id));
        assert_eq!(doc.qa_count(), 1);
    }

    #[test]
    fn body_keeps_qa_text_and_nested_sections() {
        let doc = Document::parse("oop.md", SAMPLE);
        let body = doc.body(1).unwrap();

        assert!(body.contains("Encapsulation hides state."));
        assert!(body.contains("public class Account"));
        assert!(doc.body(0).unwrap().contains("Plain body."));
    }

    #[test]
    fn level_skips_are_tolerated() {
        let doc = Document::parse("skip.md", "# A\n#### Deep\n## B\n######## Very deep\n");

        let levels: Vec<_> = doc.sections.iter().map(|s| s.level).collect();
        assert_eq!(levels, vec![1, 4, 2, 8]);

        let parents: Vec<_> = doc.sections.iter().map(|s| s.parent).collect();
        assert_eq!(parents, vec![None, Some(0), Some(0), Some(2)]);
    }

    #[test]
    fn hash_without_space_is_not_heading() {
        let doc = Document::parse("x.md", "#region\n#hashtag\n# Real\n");

        assert_eq!(doc.sections.len(), 1);
        assert_eq!(doc.preamble, "#region\n#hashtag\n");
    }

    #[test]
    fn closing_hashes_are_stripped() {
        assert_eq!(parse_heading("## Title ##\n"), Some((2, "Title".to_string())));
        assert_eq!(parse_heading("# C#\n"), Some((1, "C#".to_string())));
        assert_eq!(parse_heading("###"), Some((3, String::new())));
        assert_eq!(parse_heading("text # no"), None);
    }

    #[test]
    fn frontmatter_title_and_tags() {
        let text = "---\ntitle: SOLID\ntags: [design, oop]\n---\n# Heading\n\n> \"Q?\"\n**Detailed Answer:** A.\n";
        let doc = Document::parse("solid.md", text);

        assert_eq!(doc.title, "SOLID");
        assert_eq!(doc.frontmatter.tags, vec!["design", "oop"]);
        assert!(doc.preamble.starts_with("---\n"));
        assert_eq!(doc.sections[0].qa_items[0].tags, vec!["design", "oop"]);
        assert_eq!(doc.reconstruct(), text);
    }

    #[test]
    fn frontmatter_fields_are_read_leniently() {
        let text = "---\ntitle: SOLID\ntags: design, oop\nauthor: [x]\n---\n# Heading\n";
        let doc = Document::parse("solid.md", text);

        assert_eq!(doc.title, "SOLID");
        assert_eq!(doc.frontmatter.tags, vec!["design", "oop"]);
        assert_eq!(doc.sections.len(), 1);

        let odd = Document::parse("x.md", "---\ntitle: [not, text]\ntags: [a, {b: c}, 3]\n---\n# Fallback\n");
        assert_eq!(odd.title, "Fallback");
        assert_eq!(odd.frontmatter.tags, vec!["a", "3"]);
    }

    #[test]
    fn frontmatter_comments_are_not_headings() {
        let text = "---\n# comment\ntags: [a]\n---\n## Real\n";
        let doc = Document::parse("x.md", text);

        assert_eq!(doc.sections.len(), 1);
        assert_eq!(doc.sections[0].heading, "Real");
    }

    #[test]
    fn thematic_break_is_not_frontmatter() {
        let text = "---\n## Heading\n---\nbody\n";
        let doc = Document::parse("x.md", text);

        assert_eq!(doc.frontmatter, Frontmatter::default());
        assert_eq!(doc.sections.len(), 1);
    }

    #[test]
    fn headingless_document() {
        let doc = Document::parse("plain.md", "just text\n");

        assert!(doc.sections.is_empty());
        assert_eq!(doc.preamble, "just text\n");
        assert_eq!(doc.title, "plain");
    }

    #[test]
    fn empty_document() {
        let doc = Document::parse("empty.md", "");

        assert!(doc.sections.is_empty());
        assert_eq!(doc.reconstruct(), "");
    }

    #[test]
    fn reconstruct_sample() {
        let doc = Document::parse("oop.md", SAMPLE);
        assert_eq!(doc.reconstruct(), SAMPLE);
    }

    #[test]
    fn crlf_line_endings() {
        let text = "# A\r\nbody\r\n## B\r\n";
        let doc = Document::parse("crlf.md", text);

        assert_eq!(doc.sections[0].heading, "A");
        assert_eq!(doc.sections[1].heading, "B");
        assert_eq!(doc.reconstruct(), text);
    }

    proptest! {
        #[test]
        fn reconstruct_is_lossless(
            lines in proptest::collection::vec(
                prop_oneof![
                    "#{1,4} [a-z ]{0,12}",
                    "[a-z ]{0,20}",
                    Just("```".to_string()),
                    Just("> \"q?\"".to_string()),
                    Just("**Detailed Answer:** a".to_string()),
                    Just(String::new()),
                ],
                0..30,
            )
        ) {
            let text = lines.join("\n");
            let doc = Document::parse("p.md", &text);
            prop_assert_eq!(doc.reconstruct(), text);
        }

        #[test]
        fn parent_is_nearest_shallower_section(
            levels in proptest::collection::vec(1usize..6, 0..20)
        ) {
            let text: String = levels
                .iter()
                .map(|l| format!("{} h\nbody\n", "#".repeat(*l)))
                .collect();
            let doc = Document::parse("p.md", &text);

            prop_assert_eq!(doc.sections.len(), levels.len());
            for (i, section) in doc.sections.iter().enumerate() {
                let expected = (0..i).rev().find(|&j| levels[j] < levels[i]);
                prop_assert_eq!(section.parent, expected);
            }
        }
    }
}
