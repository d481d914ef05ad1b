/// Math literal. `display` distinguishes `$$…$$` blocks from `$…$` spans;
/// the literal is emitted untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Math {
    pub display: bool,
    pub literal: String,
}
