//! Line-oriented block recognizers. Each construct lives in its own module;
//! the driver here tries them in priority order, first match wins, with
//! Paragraph as the fallback.

pub(crate) mod callout;
pub(crate) mod code;
pub(crate) mod heading;
pub(crate) mod image;
pub(crate) mod list;
pub(crate) mod math;
pub(crate) mod table;
pub(crate) mod thematic_break;

use crate::ast::Block;
use crate::config::{ResolvedConfig, Strictness};
use crate::error::{ConvertError, Diagnostic};
use crate::inlines;
use crate::line::Line;

/// Shared state threaded through block parsing: the resolved rules plus the
/// diagnostics collected so far.
pub(crate) struct BlockCtx<'a> {
    pub config: &'a ResolvedConfig,
    pub diagnostics: &'a mut Vec<Diagnostic>,
}

impl BlockCtx<'_> {
    pub(crate) fn strict(&self) -> bool {
        self.config.parsing.strictness == Strictness::Strict
    }

    pub(crate) fn report(&mut self, diagnostic: Diagnostic) {
        tracing::warn!("{diagnostic}");
        self.diagnostics.push(diagnostic);
    }
}

pub(crate) fn parse(lines: &[Line], ctx: &mut BlockCtx) -> Result<Vec<Block>, ConvertError> {
    let mut blocks = Vec::new();
    let mut i = 0;
    while i < lines.len() {
        let line = &lines[i];
        let norm = line.norm().into_owned();
        if norm.trim().is_empty() {
            i += 1;
            continue;
        }
        if callout::is_header(&line.text) {
            let (block, consumed) = callout::parse(lines, i, ctx)?;
            blocks.push(block);
            i += consumed;
            continue;
        }
        if code::is_fence(&norm) {
            let (block, consumed) = code::parse(lines, i);
            blocks.push(block);
            i += consumed;
            continue;
        }
        if math::is_block_start(&norm) {
            let (block, consumed) = math::parse(lines, i);
            blocks.push(block);
            i += consumed;
            continue;
        }
        if let Some(block) = heading::try_parse(&norm, ctx.config) {
            blocks.push(block);
            i += 1;
            continue;
        }
        if list::item_match(&norm).is_some() {
            let (block, consumed) = list::parse(lines, i, ctx)?;
            blocks.push(block);
            i += consumed;
            continue;
        }
        if let Some(image) = image::try_parse(&norm) {
            blocks.push(Block::Image(image));
            i += 1;
            continue;
        }
        if table::is_start(lines, i) {
            let (block, consumed) = table::parse(lines, i, ctx)?;
            blocks.push(block);
            i += consumed;
            continue;
        }
        if thematic_break::is_match(&norm) {
            blocks.push(Block::HorizontalRule);
            i += 1;
            continue;
        }

        // paragraph fallback: accumulate until a blank line or any
        // recognizer takes over
        let mut content = vec![norm];
        i += 1;
        while i < lines.len() {
            let line = &lines[i];
            let norm = line.norm().into_owned();
            if norm.trim().is_empty()
                || callout::is_header(&line.text)
                || code::is_fence(&norm)
                || math::is_block_start(&norm)
                || heading::is_match(&norm)
                || list::item_match(&norm).is_some()
                || image::try_parse(&norm).is_some()
                || table::is_start(lines, i)
                || thematic_break::is_match(&norm)
            {
                break;
            }
            content.push(norm);
            i += 1;
        }
        blocks.push(Block::Paragraph(inlines::transform(
            &content.join("\n"),
            ctx.config,
        )));
    }
    Ok(blocks)
}

#[cfg(test)]
pub(crate) fn parse_source(source: &str, config: &ResolvedConfig) -> Vec<Block> {
    let lines: Vec<Line> = source
        .lines()
        .enumerate()
        .map(|(idx, text)| Line::new(text, idx + 1))
        .collect();
    let mut diagnostics = Vec::new();
    let mut ctx = BlockCtx {
        config,
        diagnostics: &mut diagnostics,
    };
    parse(&lines, &mut ctx).expect("lenient parse does not fail")
}
