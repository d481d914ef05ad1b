/// One `[@key, locator; @key2]` group. Source order of entries is preserved
/// through to generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Citation {
    pub entries: Vec<Entry>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub key: String,
    pub locator: Option<String>,
}
