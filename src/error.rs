use thiserror::Error;

/// Configuration problems surface before any parsing happens.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("transform '{0}' is already registered")]
    DuplicateTransform(String),
    #[error("unknown transform '{0}'")]
    UnknownTransform(String),
    #[error("invalid value '{value}' for '{key}': {reason}")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: &'static str,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefKind {
    Footnote,
    InternalLink,
}

impl std::fmt::Display for RefKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RefKind::Footnote => write!(f, "footnote"),
            RefKind::InternalLink => write!(f, "internal reference"),
        }
    }
}

/// Fatal conversion errors. A failed conversion yields no fragment at all.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConvertError {
    #[error("parse error at line {line}: {message}")]
    Parse { message: String, line: usize },
    #[error("unresolved {kind} '{name}'")]
    Reference { kind: RefKind, name: String },
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("transform '{name}' failed: {message}")]
    Transform { name: String, message: String },
}

impl ConvertError {
    pub(crate) fn parse(message: impl Into<String>, line: usize) -> Self {
        ConvertError::Parse {
            message: message.into(),
            line,
        }
    }
}

/// Non-fatal findings collected during a conversion, returned alongside the
/// output in encounter order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub message: String,
    pub line: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    MissingImage,
    UnmappedCallout,
    TableShape,
}

impl Diagnostic {
    pub(crate) fn new(kind: DiagnosticKind, message: impl Into<String>, line: Option<usize>) -> Self {
        Diagnostic {
            kind,
            message: message.into(),
            line,
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.line {
            Some(no) => write!(f, "{} (line {})", self.message, no),
            None => write!(f, "{}", self.message),
        }
    }
}
