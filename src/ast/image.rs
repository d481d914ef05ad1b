/// Standalone image include. `source` is the path stem with its extension
/// already stripped; the configured rewrite supplies prefix and suffix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    pub source: String,
    pub alt: String,
    pub width: Option<u32>,
}
