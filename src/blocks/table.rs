use crate::ast::table::{Alignment, Cell, Table};
use crate::ast::Block;
use crate::blocks::BlockCtx;
use crate::error::{ConvertError, Diagnostic, DiagnosticKind};
use crate::inlines;
use crate::line::Line;

/// Pipe tables: a header row directly followed by an alignment separator
/// row, then body rows until the first non-row line.
///
/// ```text
/// | Name | Qty |
/// | :--- | --: |
/// | Bolt | 12  |
/// ```
pub(crate) fn is_start(lines: &[Line], idx: usize) -> bool {
    if idx + 1 >= lines.len() {
        return false;
    }
    is_row(lines[idx].norm().trim()) && is_separator(lines[idx + 1].norm().trim())
}

fn is_row(line: &str) -> bool {
    line.len() > 2 && line.starts_with('|') && line.ends_with('|')
}

fn is_separator(line: &str) -> bool {
    is_row(line)
        && line
            .chars()
            .all(|ch| matches!(ch, '|' | ':' | '-' | ' ' | '\t'))
}

pub(crate) fn parse(
    lines: &[Line],
    start: usize,
    ctx: &mut BlockCtx,
) -> Result<(Block, usize), ConvertError> {
    let header_line = lines[start].norm();
    let separator_line = lines[start + 1].norm();

    let header: Vec<Cell> = split_row(header_line.trim())
        .into_iter()
        .map(|cell| parse_cell(&cell, ctx))
        .collect();
    let alignments = parse_alignments(separator_line.trim());

    let mut rows = Vec::new();
    let mut i = start + 2;
    while i < lines.len() {
        let norm = lines[i].norm().into_owned();
        let trimmed = norm.trim();
        if !is_row(trimmed) {
            break;
        }
        let row: Vec<Cell> = split_row(trimmed)
            .into_iter()
            .map(|cell| parse_cell(&cell, ctx))
            .collect();
        rows.push((row, lines[i].no));
        i += 1;
    }

    let width = Table::row_width(&header);
    let mut checked = Vec::with_capacity(rows.len());
    for (row, no) in rows {
        let row_width = Table::row_width(&row);
        if row_width != width {
            let message =
                format!("table row spans {row_width} columns, the header has {width}");
            if ctx.strict() {
                return Err(ConvertError::parse(message, no));
            }
            ctx.report(Diagnostic::new(DiagnosticKind::TableShape, message, Some(no)));
        }
        checked.push(row);
    }

    let block = Block::Table(Table {
        alignments,
        header,
        rows: checked,
    });
    Ok((block, i - start))
}

fn split_row(line: &str) -> Vec<String> {
    line.trim_matches('|')
        .split('|')
        .map(|cell| cell.trim().to_string())
        .collect()
}

fn parse_alignments(line: &str) -> Vec<Alignment> {
    split_row(line)
        .into_iter()
        .map(|cell| {
            if cell.starts_with(':') && cell.ends_with(':') {
                Alignment::Center
            } else if cell.ends_with(':') {
                Alignment::Right
            } else {
                Alignment::Left
            }
        })
        .collect()
}

/// Extract a trailing `{col=N, row=M}` span token from the cell literal.
fn parse_cell(cell: &str, ctx: &mut BlockCtx) -> Cell {
    let (text, col_span, row_span) = split_span(cell);
    Cell {
        content: inlines::transform(text, ctx.config),
        col_span,
        row_span,
    }
}

fn split_span(cell: &str) -> (&str, usize, usize) {
    let trimmed = cell.trim_end();
    let mut col_span = 1;
    let mut row_span = 1;
    let Some(inner) = trimmed
        .strip_suffix('}')
        .and_then(|head| head.rsplit_once('{'))
    else {
        return (cell, col_span, row_span);
    };
    let (text, spans) = inner;
    if spans.is_empty() || spans.contains(['{', '}']) {
        return (cell, col_span, row_span);
    }
    for entry in spans.split(',') {
        let Some((key, value)) = entry.split_once('=') else {
            continue;
        };
        match (key.trim(), value.trim().parse::<usize>()) {
            ("col", Ok(value)) if value > 0 => col_span = value,
            ("row", Ok(value)) if value > 0 => row_span = value,
            _ => {}
        }
    }
    (text.trim_end(), col_span, row_span)
}
