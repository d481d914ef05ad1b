/// Thematic breaks: three or more of one of `-`, `*`, `_`, optionally
/// spaced, and nothing else on the line. List markers win ties, so `- - -`
/// never reaches this recognizer.
pub(crate) fn is_match(line: &str) -> bool {
    let mut marker = None;
    let mut count = 0;
    for ch in line.chars() {
        match ch {
            ' ' | '\t' => continue,
            '-' | '*' | '_' => match marker {
                Some(marker) if marker != ch => return false,
                _ => {
                    marker = Some(ch);
                    count += 1;
                }
            },
            _ => return false,
        }
    }
    count >= 3
}

#[cfg(test)]
mod tests {
    use super::is_match;

    #[test]
    fn recognizes_spaced_and_plain_runs() {
        assert!(is_match("---"));
        assert!(is_match("***"));
        assert!(is_match("___"));
        assert!(is_match("  - - -  "));
        assert!(is_match("----------"));
    }

    #[test]
    fn rejects_short_and_mixed_runs() {
        assert!(!is_match("--"));
        assert!(!is_match("-*-"));
        assert!(!is_match("--- x"));
        assert!(!is_match("text"));
    }
}
