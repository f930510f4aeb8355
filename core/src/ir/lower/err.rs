use crate::error::{HlirErrorExt, Level};
use crate::location::Span;

/// Raised the moment lowering meets a node it does not support: an unknown
/// statement/expression kind, a target of the wrong shape, a loop `else`
/// clause, or a disallowed parameter form. Lowering produces no IR once
/// this is returned.
#[derive(Debug, Clone, PartialEq)]
pub struct UnsupportedConstructError {
    level: Level,
    construct: String,
    issuer: String,
    span: Option<Span>,
}

impl UnsupportedConstructError {
    pub fn new(construct: impl Into<String>, span: Option<&Span>) -> Self {
        UnsupportedConstructError {
            level: Level::Error,
            construct: construct.into(),
            issuer: "hlir.lower".to_string(),
            span: span.cloned(),
        }
    }

    /// Description of the offending construct.
    pub fn construct(&self) -> &str {
        &self.construct
    }
}

impl std::fmt::Display for UnsupportedConstructError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(span) = &self.span {
            write!(f, "Unsupported construct: {} (at {})", self.construct, span.start)
        } else {
            write!(f, "Unsupported construct: {}", self.construct)
        }
    }
}

impl std::error::Error for UnsupportedConstructError {}

impl HlirErrorExt for UnsupportedConstructError {
    fn level(&self) -> Level {
        self.level
    }

    fn message(&self) -> String {
        format!("Unsupported construct: {}", self.construct)
    }

    fn issuer(&self) -> String {
        self.issuer.clone()
    }

    fn span(&self) -> Option<Span> {
        self.span.clone()
    }
}

pub type LowerResult<T> = Result<T, UnsupportedConstructError>;
