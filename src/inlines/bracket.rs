use crate::ast::citation::{Citation, Entry};
use crate::ast::link::{Link, Target};
use crate::ast::Inline;
use crate::config::ResolvedConfig;
use crate::inlines::code::flush;
use crate::utils::slugify;

/// Resolve bracket-delimited forms left to right. At one start offset every
/// candidate rule is tried and the longest match wins; equal lengths fall
/// back to rule definition order: wiki link, citation, footnote ref, inline
/// link. `<…>` starts autolinks and hard breaks.
pub(super) fn split(text: &str, config: &ResolvedConfig) -> Vec<Inline> {
    let mut nodes = Vec::new();
    let mut buf = String::new();
    let mut i = 0;
    while i < text.len() {
        let rest = &text[i..];
        let ch = rest.chars().next().expect("offset sits on a char boundary");
        let matched = match ch {
            '[' => longest_bracket(rest, config),
            '<' => autolink(rest).or_else(|| hard_break(rest)),
            _ => None,
        };
        if let Some((consumed, node)) = matched {
            flush(&mut buf, &mut nodes);
            nodes.push(node);
            i += consumed;
        } else {
            buf.push(ch);
            i += ch.len_utf8();
        }
    }
    flush(&mut buf, &mut nodes);
    nodes
}

fn longest_bracket(rest: &str, config: &ResolvedConfig) -> Option<(usize, Inline)> {
    let candidates = [
        wiki_link(rest, config),
        citation(rest),
        footnote_ref(rest),
        inline_link(rest, config),
    ];
    // max_by_key keeps the last maximum, so walk in reverse for the
    // earliest-defined-rule tie-break
    candidates
        .into_iter()
        .rev()
        .flatten()
        .max_by_key(|(consumed, _)| *consumed)
}

/// `[[Title]]` or `[[Title|alias]]`; display text is the alias or the title.
fn wiki_link(rest: &str, config: &ResolvedConfig) -> Option<(usize, Inline)> {
    let inner = rest.strip_prefix("[[")?;
    let end = inner.find("]]")?;
    let body = &inner[..end];
    if body.is_empty() || body.contains('\n') || body.contains('[') || body.contains(']') {
        return None;
    }
    let (target, display) = match body.split_once('|') {
        Some((target, alias)) => (target.trim(), alias.trim()),
        None => (body.trim(), body.trim()),
    };
    if target.is_empty() {
        return None;
    }
    let slug = slugify(target, &config.wiki_links.separator);
    let link = Link {
        target: Target::Wiki(slug),
        children: vec![Inline::Text(display.to_string())],
    };
    Some((end + 4, Inline::Link(link)))
}

/// `[@key]`, `[@key, locator]`, `[@a; @b]` — one node, source order kept.
fn citation(rest: &str) -> Option<(usize, Inline)> {
    let inner = rest.strip_prefix("[@")?;
    let end = inner.find(']')?;
    let body = &inner[..end];
    if body.is_empty() || body.contains('\n') {
        return None;
    }
    let mut entries = Vec::new();
    for part in body.split(';') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        let (key, locator) = match part.split_once(',') {
            Some((key, locator)) => (key, Some(locator.trim().to_string())),
            None => (part, None),
        };
        let key = key.trim().trim_start_matches('@').to_string();
        if key.is_empty() {
            return None;
        }
        entries.push(Entry { key, locator });
    }
    if entries.is_empty() {
        return None;
    }
    Some((end + 3, Inline::Citation(Citation { entries })))
}

fn footnote_ref(rest: &str) -> Option<(usize, Inline)> {
    let inner = rest.strip_prefix("[^")?;
    let end = inner.find(']')?;
    let id = &inner[..end];
    if id.is_empty() || id.contains('\n') {
        return None;
    }
    Some((end + 3, Inline::FootnoteRef(id.to_string())))
}

/// `[text](#anchor)` is internal, anything else external.
fn inline_link(rest: &str, config: &ResolvedConfig) -> Option<(usize, Inline)> {
    let inner = rest.strip_prefix('[')?;
    let close = inner.find(']')?;
    let text = &inner[..close];
    if text.is_empty() {
        return None;
    }
    let after = &inner[close + 1..];
    let paren = after.strip_prefix('(')?;
    let end = paren.find(')')?;
    let target = &paren[..end];
    if target.is_empty() {
        return None;
    }
    let target = match target.strip_prefix('#') {
        Some(anchor) => Target::Internal(slugify(anchor, &config.labels.separator)),
        None => Target::External(target.trim().to_string()),
    };
    let link = Link {
        target,
        children: vec![Inline::Text(text.to_string())],
    };
    Some((close + end + 4, Inline::Link(link)))
}

/// `<scheme://…>` — external link displaying its own url.
fn autolink(rest: &str) -> Option<(usize, Inline)> {
    let inner = rest.strip_prefix('<')?;
    let end = inner.find('>')?;
    let url = &inner[..end];
    let scheme_end = url.find("://")?;
    let scheme = &url[..scheme_end];
    if scheme.is_empty()
        || !scheme.chars().all(|ch| ch.is_ascii_alphanumeric() || "+.-".contains(ch))
        || !scheme.chars().next().is_some_and(|ch| ch.is_ascii_alphabetic())
    {
        return None;
    }
    if url.len() == scheme_end + 3 || url.chars().any(char::is_whitespace) {
        return None;
    }
    let link = Link {
        target: Target::External(url.to_string()),
        children: Vec::new(),
    };
    Some((end + 2, Inline::Link(link)))
}

fn hard_break(rest: &str) -> Option<(usize, Inline)> {
    let inner = rest.strip_prefix("<br")?;
    let trimmed = inner.trim_start_matches(' ');
    let spaces = inner.len() - trimmed.len();
    let trimmed = trimmed.strip_prefix('/').map_or((trimmed, 0), |t| (t, 1));
    let (tail, slash) = trimmed;
    tail.strip_prefix('>')?;
    Some((3 + spaces + slash + 1, Inline::HardBreak))
}
