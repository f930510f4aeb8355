use std::path::PathBuf;

use crate::HlirErrorExt;

/// A tree dump read from disk.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub name: String,
    pub path: PathBuf,
    pub content: String,
}

impl SourceFile {
    pub fn new(path: PathBuf) -> Result<Self, Box<dyn HlirErrorExt>> {
        let name = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        let content = std::fs::read_to_string(&path).map_err(|err| {
            Box::new(MissingSourceError { path: path.clone(), reason: err.to_string() }) as Box<dyn HlirErrorExt>
        })?;
        let source = SourceFile { name, path, content };
        log::debug!("loaded {} ({} bytes)", source, source.content.len());
        Ok(source)
    }
}

impl std::fmt::Display for SourceFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Source tree: {} at {:?}", self.name, self.path)
    }
}

#[derive(Debug, Clone)]
pub struct MissingSourceError {
    pub path: PathBuf,
    pub reason: String,
}

impl std::fmt::Display for MissingSourceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Missing source tree at {:?}: {}", self.path, self.reason)
    }
}

impl std::error::Error for MissingSourceError {}

impl HlirErrorExt for MissingSourceError {
    fn message(&self) -> String {
        self.to_string()
    }

    fn issuer(&self) -> String {
        "hlir.source".to_string()
    }
}
