use crate::ast::math::Math;
use crate::ast::{Block, Inline};
use crate::line::Line;

/// Display math blocks: a `$$`/`\[` delimiter pair on their own lines, or a
/// one-line `$$…$$` / `\[…\]`. Unterminated blocks run to end of input.
pub(crate) fn is_block_start(line: &str) -> bool {
    let trimmed = line.trim();
    if trimmed == "$$" || trimmed == r"\[" {
        return true;
    }
    one_line(trimmed).is_some()
}

fn one_line(trimmed: &str) -> Option<&str> {
    for (open, close) in [("$$", "$$"), (r"\[", r"\]")] {
        if trimmed.len() > 4 && trimmed.starts_with(open) && trimmed.ends_with(close) {
            return Some(trimmed[2..trimmed.len() - 2].trim());
        }
    }
    None
}

pub(crate) fn parse(lines: &[Line], start: usize) -> (Block, usize) {
    let head = lines[start].norm();
    let trimmed = head.trim();

    let (literal, consumed) = if trimmed == "$$" || trimmed == r"\[" {
        let end_delimiter = if trimmed == "$$" { "$$" } else { r"\]" };
        let mut content = Vec::new();
        let mut i = start + 1;
        while i < lines.len() {
            let norm = lines[i].norm().into_owned();
            if norm.trim() == end_delimiter {
                i += 1;
                break;
            }
            content.push(norm);
            i += 1;
        }
        (content.join("\n"), i - start)
    } else {
        let literal = one_line(trimmed).unwrap_or(trimmed).to_string();
        (literal, 1)
    };

    let block = Block::Paragraph(vec![Inline::Math(Math {
        display: true,
        literal,
    })]);
    (block, consumed)
}
