/// Normalize text into a hyphenated identifier usable in labels and wiki
/// targets. Non-alphanumeric runs collapse into a single separator.
pub(crate) fn slugify(text: &str, separator: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_sep = false;
    for ch in text.trim().chars() {
        if ch.is_alphanumeric() {
            if pending_sep && !slug.is_empty() {
                slug.push_str(separator);
            }
            pending_sep = false;
            for lower in ch.to_lowercase() {
                slug.push(lower);
            }
        } else {
            pending_sep = true;
        }
    }
    slug
}
