//! Source loading utilities
//!
//! `SourceLoader` reads Markdown from a file, any reader (stdin in the CLI) or a string, and
//! converts it. Reading is the only fallible step; conversion itself is total.
//!
//! ```rust,ignore
//! let text = SourceLoader::from_path("answer.md")?.convert();
//! let (text, hits) = SourceLoader::from_string("**hi**").trace();
//! ```

use crate::whatsapp::convert::{self, RuleHit};
use crate::whatsapp::words::count_words;
use std::fs;
use std::io::Read;
use std::path::Path;

/// Error that can occur when loading sources
#[derive(Debug, Clone)]
pub enum LoaderError {
    /// IO error when reading the source
    IoError(String),
}

impl std::fmt::Display for LoaderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoaderError::IoError(msg) => write!(f, "IO error: {}", msg),
        }
    }
}

impl std::error::Error for LoaderError {}

impl From<std::io::Error> for LoaderError {
    fn from(err: std::io::Error) -> Self {
        LoaderError::IoError(err.to_string())
    }
}

/// Markdown source with conversion shortcuts
pub struct SourceLoader {
    source: String,
}

impl SourceLoader {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, LoaderError> {
        let source = fs::read_to_string(path)?;
        Ok(SourceLoader { source })
    }

    /// Read the whole of `reader` as UTF-8.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self, LoaderError> {
        let mut source = String::new();
        reader.read_to_string(&mut source)?;
        Ok(SourceLoader { source })
    }

    pub fn from_stdin() -> Result<Self, LoaderError> {
        Self::from_reader(std::io::stdin().lock())
    }

    pub fn from_string<S: Into<String>>(source: S) -> Self {
        SourceLoader {
            source: source.into(),
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Words in the raw source
    pub fn word_count(&self) -> usize {
        count_words(&self.source)
    }

    /// Convert the source with the standard rule table
    pub fn convert(&self) -> String {
        convert::transform(&self.source)
    }

    /// Convert the source and report the rules that changed it
    pub fn trace(&self) -> (String, Vec<RuleHit>) {
        convert::trace(&self.source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_from_string_convert() {
        let loader = SourceLoader::from_string("~~old~~ new");
        assert_eq!(loader.convert(), "~old~ new");
        assert_eq!(loader.word_count(), 2);
    }

    #[test]
    fn test_from_reader() {
        let loader = SourceLoader::from_reader(Cursor::new("# Title\n")).unwrap();
        assert_eq!(loader.source(), "# Title\n");
        assert_eq!(loader.convert(), "Title");
    }

    #[test]
    fn test_from_missing_path() {
        let err = SourceLoader::from_path("definitely/not/here.md")
            .err()
            .unwrap();
        assert!(matches!(err, LoaderError::IoError(_)));
        assert!(err.to_string().starts_with("IO error:"));
    }

    #[test]
    fn test_trace_matches_convert() {
        let loader = SourceLoader::from_string("`**a**` and **b**");
        let (text, hits) = loader.trace();

        assert_eq!(text, loader.convert());
        assert_eq!(text, "**a** and *b*");
        assert!(hits.iter().any(|hit| hit.name == "inline_code"));
    }
}
