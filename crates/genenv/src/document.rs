//! a parsed env file ([Line]s and path to source file)
//!
//! Used for both the template and the existing output file. [EnvDocument] tracks
//! - the source path (if any)
//! - every physical line in order
//! - the line index of the first occurrence of each key
use crate::line::{Assignment, Line};
use indexmap::IndexMap;
use std::path::{Path, PathBuf};

#[derive(Default, Debug, Clone)]
pub struct EnvDocument {
    source: Option<PathBuf>,
    lines: Vec<Line>,
    /// first occurrence of each key, in document order
    keys: IndexMap<String, usize>,
}

impl EnvDocument {
    pub fn parse(contents: &str, source: impl Into<Option<PathBuf>>) -> Self {
        let mut document = Self {
            source: source.into(),
            ..Default::default()
        };

        for raw in contents.lines() {
            document.push(Line::parse(raw));
        }

        document
    }

    fn push(&mut self, line: Line) {
        let index = self.lines.len();
        if let Some(key) = line.key() {
            if !self.keys.contains_key(key) {
                self.keys.insert(key.to_string(), index);
            }
        }
        self.lines.push(line);
    }

    pub fn load_file(file_path: &Path) -> Result<Self, LoadError> {
        tracing::info!(path=%file_path.display(), "loading file");

        let contents = std::fs::read_to_string(file_path).map_err(|source| LoadError {
            path: file_path.to_owned(),
            source,
        })?;

        Ok(Self::parse(&contents, file_path.to_owned()))
    }

    /// Load `file_path` if it exists, `Ok(None)` if it does not
    pub fn load_optional(file_path: &Path) -> Result<Option<Self>, LoadError> {
        match std::fs::metadata(file_path) {
            Ok(_) => Self::load_file(file_path).map(Some),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(LoadError {
                path: file_path.to_owned(),
                source,
            }),
        }
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn line(&self, index: usize) -> &Line {
        &self.lines[index]
    }

    /// Keys in order of first appearance, later duplicates are ignored
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.keys.keys().map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.keys.contains_key(key)
    }

    /// Line index of the first assignment to `key`
    pub fn position(&self, key: &str) -> Option<usize> {
        self.keys.get(key).copied()
    }

    /// First assignment to `key`
    pub fn get(&self, key: &str) -> Option<&Assignment> {
        self.position(key)
            .and_then(|index| self.lines[index].assignment())
    }

    pub fn assignments(&self) -> impl Iterator<Item = &Assignment> {
        self.lines.iter().filter_map(Line::assignment)
    }
}

#[derive(thiserror::Error, Debug)]
#[error("unable to read {}", path.display())]
pub struct LoadError {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

/// Utility macro to create an [EnvDocument]
///
/// Create without source
/// ```
/// # use genenv::env_document;
/// let document = env_document!("KEY=value");
/// assert!(document.contains_key("KEY"));
/// ```
///
/// Create with a source path
/// ```
/// # use genenv::env_document;
/// let document = env_document!(".env.example" => "KEY=${key}");
/// assert_eq!(document.source().unwrap().to_str(), Some(".env.example"));
/// ```
#[macro_export]
macro_rules! env_document {
    // document without source
    { $expr:expr } => {
        $crate::document::EnvDocument::parse($expr, None)
    };
    // document with source
    { $source:expr => $expr:expr } => {
        $crate::document::EnvDocument::parse($expr, Some(::std::path::PathBuf::from($source)))
    };
}
