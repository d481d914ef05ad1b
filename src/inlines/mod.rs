mod bracket;
mod code;
mod delimiter;
mod marker;
mod math;

use crate::ast::Inline;
use crate::config::ResolvedConfig;

/// Resolve markup within one text run. Precedence is fixed: code spans
/// first (contents opaque to everything after), then bracketed forms left to
/// right, then paired emphasis delimiters, then custom markers and inline
/// math over whatever text remains.
pub(crate) fn transform(text: &str, config: &ResolvedConfig) -> Vec<Inline> {
    let nodes = code::split(text);
    let nodes = apply(nodes, &|text| bracket::split(text, config));
    let nodes = apply(nodes, &delimiter::split);
    let nodes = apply(nodes, &|text| marker::split(text, config));
    apply(nodes, &math::split)
}

/// Run one stage over every unresolved text node, recursing into children
/// produced by earlier stages.
fn apply(nodes: Vec<Inline>, stage: &dyn Fn(&str) -> Vec<Inline>) -> Vec<Inline> {
    let mut out = Vec::with_capacity(nodes.len());
    for node in nodes {
        match node {
            Inline::Text(text) => out.extend(stage(&text)),
            Inline::Emphasis { strong, children } => out.push(Inline::Emphasis {
                strong,
                children: apply(children, stage),
            }),
            Inline::Link(mut link) => {
                link.children = apply(link.children, stage);
                out.push(Inline::Link(link));
            }
            other => out.push(other),
        }
    }
    out
}
