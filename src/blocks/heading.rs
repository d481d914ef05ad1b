use crate::ast::heading::Heading;
use crate::ast::Block;
use crate::config::ResolvedConfig;
use crate::inlines;

/// ATX headings
///
/// ```text
/// # foo
/// ###### foo
/// ```
///
/// One to six marks at the line start, then at least one space or tab.
fn try_match(line: &str) -> Option<(u8, &str)> {
    let stripped = line.strip_prefix('#')?;
    let extra = stripped.len() - stripped.trim_start_matches('#').len();
    let level = 1 + extra;
    if level > 6 {
        return None;
    }
    let rest = &stripped[extra..];
    let title = rest.trim_start_matches([' ', '\t']);
    if title.len() == rest.len() || title.is_empty() {
        return None;
    }
    Some((level as u8, title.trim()))
}

pub(crate) fn is_match(line: &str) -> bool {
    try_match(line).is_some()
}

pub(crate) fn try_parse(line: &str, config: &ResolvedConfig) -> Option<Block> {
    let (level, title) = try_match(line)?;
    Some(Block::Heading(Heading::new(
        level,
        inlines::transform(title, config),
    )))
}
