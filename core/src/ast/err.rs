use crate::error::{HlirErrorExt, Level};
use crate::location::Location;

/// The input could not be decoded into a source tree: malformed JSON, a
/// missing or unknown `_t` tag, or a field of the wrong shape.
#[derive(Debug, Clone)]
pub struct AstLoadError {
    level: Level,
    message: String,
    issuer: String,
    location: Option<Location>,
}

impl AstLoadError {
    pub fn new(message: String, location: Option<Location>) -> Self {
        AstLoadError {
            level: Level::Error,
            message,
            issuer: "hlir.ast".to_string(),
            location,
        }
    }
}

impl From<serde_json::Error> for AstLoadError {
    fn from(err: serde_json::Error) -> Self {
        // serde_json reports 1-based columns; the tree's own positions are 0-based.
        let location = match err.line() {
            0 => None,
            line => Some(Location::new(line, err.column().saturating_sub(1))),
        };
        AstLoadError::new(format!("Malformed source tree: {}", err), location)
    }
}

impl std::fmt::Display for AstLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(loc) = &self.location {
            write!(f, "{} (at {})", self.message, loc)
        } else {
            write!(f, "{}", self.message)
        }
    }
}

impl std::error::Error for AstLoadError {}

impl HlirErrorExt for AstLoadError {
    fn level(&self) -> Level {
        self.level
    }

    fn message(&self) -> String {
        self.message.clone()
    }

    fn issuer(&self) -> String {
        self.issuer.clone()
    }

    fn location(&self) -> Option<Location> {
        self.location.clone()
    }
}
