use crate::ast::Inline;
use crate::config::ResolvedConfig;
use crate::inlines::code::flush;

/// Resolve configured custom marker pairs, longest symbol first. Marker
/// contents stay literal text; the generator applies the mapped template.
pub(super) fn split(text: &str, config: &ResolvedConfig) -> Vec<Inline> {
    if config.inline.markers.is_empty() {
        return vec![Inline::Text(text.to_string())];
    }
    let mut symbols: Vec<&str> = config.inline.markers.keys().map(String::as_str).collect();
    symbols.sort_by(|a, b| b.len().cmp(&a.len()).then(a.cmp(b)));

    let mut nodes = Vec::new();
    let mut buf = String::new();
    let mut i = 0;
    while i < text.len() {
        let rest = &text[i..];
        if let Some((consumed, node)) = match_marker(rest, &symbols) {
            flush(&mut buf, &mut nodes);
            nodes.push(node);
            i += consumed;
            continue;
        }
        let ch = rest.chars().next().expect("offset sits on a char boundary");
        buf.push(ch);
        i += ch.len_utf8();
    }
    flush(&mut buf, &mut nodes);
    nodes
}

fn match_marker(rest: &str, symbols: &[&str]) -> Option<(usize, Inline)> {
    for symbol in symbols {
        let Some(inner) = rest.strip_prefix(symbol) else {
            continue;
        };
        let Some(end) = inner.find(symbol) else {
            continue;
        };
        let content = &inner[..end];
        if content.is_empty() || content.contains('\n') {
            continue;
        }
        let node = Inline::Marker {
            symbol: symbol.to_string(),
            text: content.to_string(),
        };
        return Some((symbol.len() * 2 + end, node));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ConfigOverrides, InlineOverrides};

    fn config_with_markers() -> ResolvedConfig {
        let overrides = ConfigOverrides {
            inline: InlineOverrides {
                markers: Some(
                    [
                        ("==".to_string(), "hl".to_string()),
                        ("~".to_string(), "sub".to_string()),
                    ]
                    .into_iter()
                    .collect(),
                ),
                ..Default::default()
            },
            ..Default::default()
        };
        ResolvedConfig::resolve(&[&overrides]).unwrap()
    }

    #[test]
    fn matches_configured_pairs() {
        let nodes = split("x ==mark== y", &config_with_markers());
        assert_eq!(
            nodes,
            vec![
                Inline::Text("x ".into()),
                Inline::Marker {
                    symbol: "==".into(),
                    text: "mark".into(),
                },
                Inline::Text(" y".into()),
            ]
        );
    }

    #[test]
    fn no_markers_means_no_change() {
        let nodes = split("x ==mark== y", &ResolvedConfig::default());
        assert_eq!(nodes, vec![Inline::Text("x ==mark== y".into())]);
    }
}
