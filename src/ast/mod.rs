pub mod callout;
pub mod citation;
pub mod code;
pub mod heading;
pub mod image;
pub mod link;
pub mod list;
pub mod math;
pub mod table;

use std::collections::BTreeMap;

use crate::error::{ConvertError, RefKind};

/// Root of a parsed document: ordered block children plus the footnote
/// side-table. Footnote definitions never appear among the children.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Document {
    pub children: Vec<Block>,
    pub footnotes: BTreeMap<String, Vec<Block>>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn footnote(&self, id: &str) -> Option<&[Block]> {
        self.footnotes.get(id).map(|body| body.as_slice())
    }

    /// Referential integrity: every footnote reference must resolve to
    /// exactly one side-table entry. Runs once, after the transform stage.
    pub(crate) fn check_references(&self) -> Result<(), ConvertError> {
        let mut refs = Vec::new();
        for block in &self.children {
            collect_footnote_refs(block, &mut refs);
        }
        for body in self.footnotes.values() {
            for block in body {
                collect_footnote_refs(block, &mut refs);
            }
        }
        for id in refs {
            if !self.footnotes.contains_key(&id) {
                return Err(ConvertError::Reference {
                    kind: RefKind::Footnote,
                    name: id,
                });
            }
        }
        Ok(())
    }
}

fn collect_footnote_refs(block: &Block, out: &mut Vec<String>) {
    let mut inlines: Vec<&Inline> = Vec::new();
    match block {
        Block::Heading(heading) => inlines.extend(&heading.content),
        Block::Paragraph(content) => inlines.extend(content),
        Block::List(list) => {
            for item in &list.items {
                for block in &item.blocks {
                    collect_footnote_refs(block, out);
                }
            }
        }
        Block::Callout(callout) => {
            if let Some(title) = &callout.title {
                inlines.extend(title);
            }
            for block in &callout.children {
                collect_footnote_refs(block, out);
            }
        }
        Block::Table(table) => {
            for cell in table.header.iter().chain(table.rows.iter().flatten()) {
                inlines.extend(&cell.content);
            }
        }
        Block::CodeBlock(..) | Block::Image(..) | Block::HorizontalRule => {}
    }
    while let Some(inline) = inlines.pop() {
        match inline {
            Inline::FootnoteRef(id) => out.push(id.clone()),
            Inline::Emphasis { children, .. } | Inline::Link(link::Link { children, .. }) => {
                inlines.extend(children)
            }
            _ => {}
        }
    }
}

/// Block-level node variants. The set is closed so traversal stays
/// exhaustively checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading(heading::Heading),
    Paragraph(Vec<Inline>),
    List(list::List),
    CodeBlock(code::CodeBlock),
    Callout(callout::Callout),
    Table(table::Table),
    Image(image::Image),
    HorizontalRule,
}

/// Inline node variants resolved within a text run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inline {
    Text(String),
    Emphasis { strong: bool, children: Vec<Inline> },
    Code(String),
    Link(link::Link),
    Citation(citation::Citation),
    FootnoteRef(String),
    Marker { symbol: String, text: String },
    Math(math::Math),
    HardBreak,
}

impl From<&str> for Inline {
    fn from(value: &str) -> Self {
        Inline::Text(value.to_string())
    }
}

impl From<String> for Inline {
    fn from(value: String) -> Self {
        Inline::Text(value)
    }
}

impl From<heading::Heading> for Block {
    fn from(value: heading::Heading) -> Self {
        Block::Heading(value)
    }
}

impl From<list::List> for Block {
    fn from(value: list::List) -> Self {
        Block::List(value)
    }
}

impl From<code::CodeBlock> for Block {
    fn from(value: code::CodeBlock) -> Self {
        Block::CodeBlock(value)
    }
}

impl From<table::Table> for Block {
    fn from(value: table::Table) -> Self {
        Block::Table(value)
    }
}

impl From<image::Image> for Block {
    fn from(value: image::Image) -> Self {
        Block::Image(value)
    }
}

/// Visible text of an inline run, used for slugs and url-only detection.
pub(crate) fn plain_text(nodes: &[Inline]) -> String {
    let mut out = String::new();
    for node in nodes {
        match node {
            Inline::Text(text) => out.push_str(text),
            Inline::Code(literal) => out.push_str(literal),
            Inline::Emphasis { children, .. } => out.push_str(&plain_text(children)),
            Inline::Link(link) => out.push_str(&plain_text(&link.children)),
            Inline::Marker { text, .. } => out.push_str(text),
            Inline::Math(math) => out.push_str(&math.literal),
            Inline::Citation(..) | Inline::FootnoteRef(..) | Inline::HardBreak => {}
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_footnote_definition_is_detected() {
        let doc = Document {
            children: vec![Block::Paragraph(vec![Inline::FootnoteRef("a".into())])],
            footnotes: BTreeMap::new(),
        };
        assert!(matches!(
            doc.check_references(),
            Err(ConvertError::Reference {
                kind: RefKind::Footnote,
                ..
            })
        ));
    }

    #[test]
    fn nested_footnote_refs_are_found() {
        let mut footnotes = BTreeMap::new();
        footnotes.insert("a".to_string(), vec![Block::Paragraph(vec!["body".into()])]);
        let doc = Document {
            children: vec![Block::Paragraph(vec![Inline::Emphasis {
                strong: false,
                children: vec![Inline::FootnoteRef("a".into())],
            }])],
            footnotes,
        };
        assert!(doc.check_references().is_ok());
    }
}
