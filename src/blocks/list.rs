use crate::ast::list::{List, ListItem};
use crate::ast::Block;
use crate::blocks::{self, BlockCtx};
use crate::error::ConvertError;
use crate::line::Line;
use crate::utils::{dedent, indent_width};

/// A recognized list marker line.
///
/// ```text
/// - unordered
/// 3. ordered
///     - nested
/// ```
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct ItemMatch<'a> {
    /// Indentation width before the marker, tabs counted as four.
    pub indent: usize,
    pub ordered: bool,
    /// Character column where the content starts, for dedenting
    /// continuation lines.
    pub content_col: usize,
    pub content: &'a str,
}

pub(crate) fn item_match(line: &str) -> Option<ItemMatch<'_>> {
    let chars: Vec<char> = line.chars().collect();
    let mut pos = 0;
    while pos < chars.len() && (chars[pos] == ' ' || chars[pos] == '\t') {
        pos += 1;
    }
    let marker_start = pos;
    let ordered = match chars.get(pos)? {
        '-' | '*' | '+' => {
            pos += 1;
            false
        }
        ch if ch.is_ascii_digit() => {
            while chars.get(pos).is_some_and(char::is_ascii_digit) {
                pos += 1;
            }
            if chars.get(pos) != Some(&'.') {
                return None;
            }
            pos += 1;
            true
        }
        _ => return None,
    };
    if !chars.get(pos).is_some_and(|ch| ch.is_whitespace()) {
        return None;
    }
    while chars.get(pos).is_some_and(|ch| ch.is_whitespace()) {
        pos += 1;
    }
    let indent_text: String = chars[..marker_start].iter().collect();
    Some(ItemMatch {
        indent: indent_width(&indent_text),
        ordered,
        content_col: pos,
        content: dedent(line, pos),
    })
}

/// Items at equal indent with the same orderedness group into one list;
/// deeper-indented lines belong to the preceding item and are re-parsed as
/// its body.
pub(crate) fn parse(
    lines: &[Line],
    start: usize,
    ctx: &mut BlockCtx,
) -> Result<(Block, usize), ConvertError> {
    let head = lines[start].norm();
    let first = item_match(&head).expect("caller matched a list item");
    let base_indent = first.indent;
    let ordered = first.ordered;
    let mut items = Vec::new();

    let mut i = start;
    while i < lines.len() {
        let norm = lines[i].norm().into_owned();
        if norm.trim().is_empty() {
            i += 1;
            continue;
        }
        let Some(item) = item_match(&norm) else {
            break;
        };
        if item.indent != base_indent || item.ordered != ordered {
            break;
        }
        let (parsed, consumed) = parse_item(lines, i, &norm, ctx)?;
        items.push(parsed);
        i += consumed;
    }

    Ok((Block::List(List { ordered, items }), i - start))
}

fn parse_item(
    lines: &[Line],
    start: usize,
    norm: &str,
    ctx: &mut BlockCtx,
) -> Result<(ListItem, usize), ConvertError> {
    let matched = item_match(norm).expect("caller matched a list item");
    let base_indent = matched.indent;
    let content_col = matched.content_col;

    let mut body = Vec::new();
    let first_content = matched.content.trim();
    if !first_content.is_empty() {
        body.push(Line::new(first_content, lines[start].no));
    }

    let mut i = start + 1;
    while i < lines.len() {
        let norm = lines[i].norm().into_owned();
        if norm.trim().is_empty() {
            body.push(Line::new("", lines[i].no));
            i += 1;
            continue;
        }
        if let Some(next) = item_match(&norm) {
            if next.indent <= base_indent {
                break;
            }
        }
        if indent_width(&norm) <= base_indent {
            break;
        }
        body.push(Line::new(dedent(&norm, content_col), lines[i].no));
        i += 1;
    }

    let blocks = if body.is_empty() {
        Vec::new()
    } else {
        blocks::parse(&body, ctx)?
    };
    Ok((ListItem::new(blocks), i - start))
}
