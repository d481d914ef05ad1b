use crate::ast::callout::Callout;
use crate::ast::Block;
use crate::blocks::{self, BlockCtx};
use crate::error::ConvertError;
use crate::inlines;
use crate::line::Line;

/// Callout headers
///
/// ```text
/// > [!note]
/// > [!tip] A custom title
/// ```
///
/// The kind is alphabetic; anything after the closing bracket must be
/// separated by whitespace and becomes the title.
pub(crate) fn header_match(line: &str) -> Option<(&str, Option<&str>)> {
    let rest = line.trim_start_matches([' ', '\t']);
    let rest = rest.strip_prefix("> ")?;
    let rest = rest.strip_prefix("[!")?;
    let end = rest.find(']')?;
    let kind = &rest[..end];
    if kind.is_empty() || !kind.chars().all(|ch| ch.is_ascii_alphabetic()) {
        return None;
    }
    let after = &rest[end + 1..];
    if after.is_empty() {
        return Some((kind, None));
    }
    let title = after.trim_start();
    if title.len() == after.len() {
        // no whitespace between the bracket and the trailing text
        return None;
    }
    let title = title.trim_end();
    Some((kind, (!title.is_empty()).then_some(title)))
}

pub(crate) fn is_header(line: &str) -> bool {
    header_match(line).is_some()
}

fn is_quoted(line: &str) -> bool {
    line.trim_start_matches([' ', '\t']).starts_with('>')
}

/// Body lines drop their indent and one `> ` prefix before re-parsing, so a
/// doubly-quoted header nests another callout.
fn strip_prefix(line: &str) -> &str {
    let rest = line.trim_start_matches([' ', '\t']);
    match rest.strip_prefix('>') {
        Some(rest) => rest.strip_prefix(' ').unwrap_or(rest),
        None => line,
    }
}

pub(crate) fn parse(
    lines: &[Line],
    start: usize,
    ctx: &mut BlockCtx,
) -> Result<(Block, usize), ConvertError> {
    let (kind, title) =
        header_match(&lines[start].text).expect("caller matched a callout header");
    let kind = kind.to_string();
    let title = title.map(|title| inlines::transform(title, ctx.config));

    let mut body = Vec::new();
    let mut i = start + 1;
    while i < lines.len() {
        let raw = &lines[i].text;
        if is_header(raw) || !is_quoted(raw) {
            break;
        }
        body.push(Line::new(strip_prefix(raw), lines[i].no));
        i += 1;
    }

    let children = blocks::parse(&body, ctx)?;
    let block = Block::Callout(Callout {
        kind,
        title,
        children,
    });
    Ok((block, i - start))
}
