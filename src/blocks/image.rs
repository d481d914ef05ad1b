use crate::ast::image::Image;

/// Standalone image lines, either the HTML form exported by drawing tools
/// or a Markdown image alone on its line:
///
/// ```text
/// <img src="diagram.svg" width="420">
/// ![caption](figures/diagram.png)
/// ```
///
/// The extension is stripped here; the configured rewrite re-attaches the
/// output suffix at generation time.
pub(crate) fn try_parse(line: &str) -> Option<Image> {
    let trimmed = line.trim();
    html_image(trimmed).or_else(|| markdown_image(trimmed))
}

fn html_image(line: &str) -> Option<Image> {
    let rest = line.strip_prefix("<img ")?;
    let rest = rest.strip_suffix('>')?;
    let source = attribute(rest, "src")?;
    let source = source.strip_suffix(".svg")?;
    if source.is_empty() {
        return None;
    }
    let width = attribute(rest, "width").and_then(|value| value.parse().ok());
    let alt = attribute(rest, "alt").unwrap_or_default();
    Some(Image {
        source: source.to_string(),
        alt: alt.to_string(),
        width,
    })
}

fn attribute<'a>(attrs: &'a str, name: &str) -> Option<&'a str> {
    let start = attrs.find(&format!("{name}=\""))? + name.len() + 2;
    let end = attrs[start..].find('"')?;
    Some(&attrs[start..start + end])
}

fn markdown_image(line: &str) -> Option<Image> {
    let rest = line.strip_prefix("![")?;
    let close = rest.find("](")?;
    let alt = &rest[..close];
    let target = rest[close + 2..].strip_suffix(')')?;
    if target.is_empty() || target.contains(')') || target.contains('\n') {
        return None;
    }
    Some(Image {
        source: strip_extension(target).to_string(),
        alt: alt.to_string(),
        width: None,
    })
}

fn strip_extension(path: &str) -> &str {
    match path.rfind('.') {
        Some(dot) if dot > path.rfind('/').map_or(0, |slash| slash + 1) => {
            let ext = &path[dot + 1..];
            if !ext.is_empty() && ext.chars().all(|ch| ch.is_ascii_alphanumeric()) {
                &path[..dot]
            } else {
                path
            }
        }
        _ => path,
    }
}
