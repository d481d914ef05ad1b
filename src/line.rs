//! Source line bookkeeping for the line-oriented block parser.

use std::borrow::Cow;

use crate::blocks::callout;

/// One source line with its 1-based position, kept through recursion into
/// callout and list bodies so errors and diagnostics stay locatable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Line {
    pub text: String,
    pub no: usize,
}

impl Line {
    pub(crate) fn new(text: impl Into<String>, no: usize) -> Self {
        Line {
            text: text.into(),
            no,
        }
    }

    /// Normalized view used by most recognizers: one leading blockquote
    /// chevron is stripped so quoted prose re-enters the normal grammar.
    /// Callout headers keep their raw form.
    pub(crate) fn norm(&self) -> Cow<'_, str> {
        if callout::is_header(&self.text) {
            return Cow::Borrowed(&self.text);
        }
        match strip_chevron(&self.text) {
            Some(stripped) => Cow::Owned(stripped),
            None => Cow::Borrowed(&self.text),
        }
    }
}

/// `indent> rest` becomes `indent` + `rest`, indentation preserved.
fn strip_chevron(line: &str) -> Option<String> {
    let trimmed = line.trim_start_matches([' ', '\t']);
    let rest = trimmed.strip_prefix('>')?;
    let rest = rest.strip_prefix(' ').unwrap_or(rest);
    let indent = &line[..line.len() - trimmed.len()];
    Some(format!("{indent}{rest}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_one_chevron_keeping_indent() {
        assert_eq!(Line::new("> quoted", 1).norm(), "quoted");
        assert_eq!(Line::new("  > quoted", 1).norm(), "  quoted");
        assert_eq!(Line::new("> > nested", 1).norm(), "> nested");
        assert_eq!(Line::new("plain", 1).norm(), "plain");
    }

    #[test]
    fn callout_headers_stay_raw() {
        assert_eq!(Line::new("> [!note] Title", 1).norm(), "> [!note] Title");
    }
}
