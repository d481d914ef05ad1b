use crate::ast::{Block, Inline};

/// Admonition block `> [!KIND] Title`. The kind is kept verbatim; mapping to
/// a LaTeX environment happens at generation time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Callout {
    pub kind: String,
    pub title: Option<Vec<Inline>>,
    pub children: Vec<Block>,
}
