/// Substitute `{name}` placeholders in a rule template. Text that is not a
/// known placeholder passes through untouched, so LaTeX braces survive.
pub(crate) fn expand(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    'outer: while let Some(open) = rest.find('{') {
        if let Some(close) = rest[open..].find('}') {
            let name = &rest[open + 1..open + close];
            for (key, value) in values {
                if name == *key {
                    out.push_str(&rest[..open]);
                    out.push_str(value);
                    rest = &rest[open + close + 1..];
                    continue 'outer;
                }
            }
        }
        // not a placeholder, keep the brace literally
        out.push_str(&rest[..=open]);
        rest = &rest[open + 1..];
    }
    out.push_str(rest);
    out
}
