use crate::ast::code::CodeBlock;
use crate::ast::Block;
use crate::line::Line;

/// Fenced code blocks
///
/// ````text
/// ```lang
/// literal
/// ```
/// ````
///
/// The opening fence may be indented; content lines lose that exact indent
/// prefix. An unterminated fence extends to the end of input.
fn fence_match(line: &str) -> Option<(&str, Option<&str>)> {
    let rest = line.trim_start_matches([' ', '\t']);
    let indent = &line[..line.len() - rest.len()];
    let rest = rest.strip_prefix("```")?;
    let rest = rest.trim_end();
    if rest.is_empty() {
        return Some((indent, None));
    }
    if rest
        .chars()
        .all(|ch| ch.is_ascii_alphanumeric() || ch == '_' || ch == '-')
    {
        return Some((indent, Some(rest)));
    }
    None
}

fn is_close(line: &str) -> bool {
    line.trim_start_matches([' ', '\t'])
        .strip_prefix("```")
        .is_some_and(|rest| rest.trim_end().is_empty())
}

pub(crate) fn is_fence(line: &str) -> bool {
    fence_match(line).is_some()
}

pub(crate) fn parse(lines: &[Line], start: usize) -> (Block, usize) {
    let head = lines[start].norm();
    let (indent, language) = fence_match(&head).expect("caller matched a fence");
    let language = language.map(str::to_string);
    let indent = indent.to_string();

    let mut content = Vec::new();
    let mut i = start + 1;
    while i < lines.len() {
        let norm = lines[i].norm().into_owned();
        if is_close(&norm) {
            i += 1;
            break;
        }
        let line = match norm.strip_prefix(indent.as_str()) {
            Some(stripped) if !indent.is_empty() => stripped.to_string(),
            _ => norm,
        };
        content.push(line);
        i += 1;
    }

    let block = Block::CodeBlock(CodeBlock {
        language,
        literal: content.join("\n"),
    });
    (block, i - start)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocks;
    use crate::config::ResolvedConfig;

    #[test]
    fn fence_with_and_without_language() {
        assert_eq!(fence_match("```"), Some(("", None)));
        assert_eq!(fence_match("```rust"), Some(("", Some("rust"))));
        assert_eq!(fence_match("  ```sh  "), Some(("  ", Some("sh"))));
        assert_eq!(fence_match("``` not a lang"), None);
        assert_eq!(fence_match("``"), None);
    }

    #[test]
    fn literal_is_untouched_by_inline_rules() {
        let config = ResolvedConfig::default();
        let blocks = blocks::parse_source("```py\nx = [1, 2]  # *not* emphasis\n```", &config);
        match &blocks[0] {
            Block::CodeBlock(code) => {
                assert_eq!(code.language.as_deref(), Some("py"));
                assert_eq!(code.literal, "x = [1, 2]  # *not* emphasis");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn unterminated_fence_runs_to_the_end() {
        let config = ResolvedConfig::default();
        let blocks = blocks::parse_source("```\nline one\nline two", &config);
        match &blocks[0] {
            Block::CodeBlock(code) => assert_eq!(code.literal, "line one\nline two"),
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(blocks.len(), 1);
    }

    #[test]
    fn indented_fence_dedents_content() {
        let config = ResolvedConfig::default();
        let blocks = blocks::parse_source("  ```\n  indented\n  ```", &config);
        match &blocks[0] {
            Block::CodeBlock(code) => assert_eq!(code.literal, "indented"),
            other => panic!("unexpected {other:?}"),
        }
    }
}
