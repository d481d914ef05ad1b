//! Document-level parsing: front matter, footnote extraction, block loop.

use std::collections::BTreeMap;

use crate::ast::{Block, Document};
use crate::blocks::{self, BlockCtx};
use crate::config::ResolvedConfig;
use crate::error::{ConvertError, Diagnostic};
use crate::line::Line;

/// Parses one source text into a [`Document`] under a resolved
/// configuration. The tree is built fresh per call and never cached.
pub struct Parser<'a> {
    source: &'a str,
    config: &'a ResolvedConfig,
}

impl<'a> Parser<'a> {
    pub fn new(source: &'a str, config: &'a ResolvedConfig) -> Self {
        Parser { source, config }
    }

    pub fn parse(self) -> Result<(Document, Vec<Diagnostic>), ConvertError> {
        let (source, skipped) = if self.config.parsing.strip_front_matter {
            strip_front_matter(self.source)
        } else {
            (self.source, 0)
        };
        let (lines, definitions) = extract_footnotes(source, skipped);

        let mut diagnostics = Vec::new();
        let mut ctx = BlockCtx {
            config: self.config,
            diagnostics: &mut diagnostics,
        };
        let children = blocks::parse(&lines, &mut ctx)?;

        let mut footnotes: BTreeMap<String, Vec<Block>> = BTreeMap::new();
        for definition in definitions {
            let body_lines: Vec<Line> = definition
                .body
                .lines()
                .enumerate()
                .map(|(offset, text)| Line::new(text, definition.no + offset))
                .collect();
            let body = blocks::parse(&body_lines, &mut ctx)?;
            footnotes.insert(definition.id, body);
        }

        let document = Document {
            children,
            footnotes,
        };
        Ok((document, diagnostics))
    }
}

/// A leading `---`-delimited block is consumed before parsing and never
/// enters the tree. Returns the remainder and the number of lines skipped.
pub(crate) fn strip_front_matter(source: &str) -> (&str, usize) {
    match split_front_matter(source) {
        Some((_, rest, skipped)) => (rest, skipped),
        None => (source, 0),
    }
}

/// Raw front matter text when the source opens with a delimited block.
#[cfg(feature = "frontmatter")]
pub fn front_matter(source: &str) -> Option<&str> {
    split_front_matter(source).map(|(inner, _, _)| inner)
}

/// Front matter parsed as YAML, for callers that want the metadata.
#[cfg(feature = "frontmatter")]
pub fn front_matter_value(source: &str) -> Option<serde_yaml::Value> {
    serde_yaml::from_str(front_matter(source)?).ok()
}

fn split_front_matter(source: &str) -> Option<(&str, &str, usize)> {
    let mut offset = 0;
    let mut line_no = 0;
    let mut inner_start = None;
    for line in source.split_inclusive('\n') {
        line_no += 1;
        let end = offset + line.len();
        match (line_no, inner_start) {
            (1, _) => {
                if line.trim() != "---" {
                    return None;
                }
                inner_start = Some(end);
            }
            (_, Some(start)) if line.trim() == "---" => {
                let inner = &source[start..offset];
                let mut rest = &source[end..];
                let mut skipped = line_no;
                while let Some(stripped) = rest.strip_prefix('\n') {
                    rest = stripped;
                    skipped += 1;
                }
                return Some((inner, rest, skipped));
            }
            _ => {}
        }
        offset = end;
    }
    None
}

struct FootnoteDefinition {
    id: String,
    body: String,
    no: usize,
}

/// Footnote definitions `[^id]: body` come out of the text wherever they
/// appear. Indented or blank lines after the marker belong to the body; a
/// later definition for the same id wins.
fn extract_footnotes(source: &str, line_offset: usize) -> (Vec<Line>, Vec<FootnoteDefinition>) {
    let raw: Vec<&str> = source.lines().collect();
    let mut lines = Vec::with_capacity(raw.len());
    let mut definitions = Vec::new();
    let mut i = 0;
    while i < raw.len() {
        let line = raw[i];
        let no = line_offset + i + 1;
        if let Some((id, first)) = definition_start(line) {
            let mut body = vec![first.trim_end().to_string()];
            i += 1;
            while i < raw.len() {
                let next = raw[i];
                if definition_start(next).is_some() {
                    break;
                }
                if next.trim().is_empty() {
                    body.push(String::new());
                    i += 1;
                    continue;
                }
                if next.starts_with("    ") || next.starts_with('\t') {
                    body.push(next.trim().to_string());
                    i += 1;
                    continue;
                }
                break;
            }
            definitions.push(FootnoteDefinition {
                id: id.to_string(),
                body: body.join("\n").trim().to_string(),
                no,
            });
            continue;
        }
        lines.push(Line::new(line, no));
        i += 1;
    }
    (lines, definitions)
}

fn definition_start(line: &str) -> Option<(&str, &str)> {
    let rest = line.strip_prefix("[^")?;
    let (id, body) = rest.split_once("]: ")?;
    if id.is_empty() || id.contains(['[', ']']) {
        return None;
    }
    Some((id, body))
}
