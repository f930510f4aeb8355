use std::fmt;

use crate::location::{Location, Span};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
    Info,
    Warning,
    Error,
    Critical,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Level::Info => "INFO",
            Level::Warning => "WARNING",
            Level::Error => "ERROR",
            Level::Critical => "CRITICAL",
        })
    }
}

/// A diagnostic raised while loading or lowering a source tree.
///
/// Only `message` and `issuer` are required. Diagnostics tied to a node
/// return its `span`; the reported location is the start of that span
/// unless the error overrides `location` (decode errors point at a text
/// position and have no span).
pub trait HlirErrorExt {
    fn message(&self) -> String;

    /// Dotted name of the stage that raised the diagnostic, e.g. `hlir.lower`.
    fn issuer(&self) -> String;

    fn level(&self) -> Level {
        Level::Error
    }

    fn span(&self) -> Option<Span> {
        None
    }

    fn location(&self) -> Option<Location> {
        self.span().map(|span| span.start)
    }

    /// One-line report: `HLIR | LEVEL | line:col | message`.
    fn report(&self) -> String {
        let location = match self.location() {
            Some(loc) => loc.to_string(),
            None => "unknown location".to_string(),
        };
        format!("HLIR | {} | {} | {}", self.level(), location, self.message())
    }
}

/// Long form with the issuer and the full node span, for dumps and logs.
impl fmt::Debug for dyn HlirErrorExt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HLIR | {} | {}", self.level(), self.issuer())?;
        match self.span() {
            Some(span) => write!(f, " | {}", span)?,
            None => {
                if let Some(loc) = self.location() {
                    write!(f, " | {}", loc)?;
                }
            }
        }
        write!(f, " | {}", self.message())
    }
}

impl fmt::Display for dyn HlirErrorExt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.report())
    }
}
