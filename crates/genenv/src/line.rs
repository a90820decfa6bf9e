//! line classification for env files
//!
//! A line is either passed through untouched ([Line::Comment], which also covers blank lines and
//! lines without `=`) or is an [Assignment]. Assignments keep the raw text so a line that is
//! not regenerated can be written back byte for byte.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    Comment(String),
    Assignment(Assignment),
}

impl Line {
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return Line::Comment(raw.to_string());
        }

        match raw.find('=') {
            Some(eq) => Line::Assignment(Assignment {
                raw: raw.to_string(),
                key: raw[..eq].trim().to_string(),
                eq,
            }),
            None => Line::Comment(raw.to_string()),
        }
    }

    pub fn raw(&self) -> &str {
        match self {
            Line::Comment(raw) => raw,
            Line::Assignment(assignment) => &assignment.raw,
        }
    }

    pub fn assignment(&self) -> Option<&Assignment> {
        match self {
            Line::Assignment(assignment) => Some(assignment),
            Line::Comment(_) => None,
        }
    }

    pub fn key(&self) -> Option<&str> {
        self.assignment().map(Assignment::key)
    }

    pub fn is_blank(&self) -> bool {
        self.raw().trim().is_empty()
    }

    /// A `#` comment, as opposed to a blank line or other pass-through text
    pub fn is_comment(&self) -> bool {
        self.raw().trim_start().starts_with('#')
    }
}

/// A `key=value` line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    raw: String,
    key: String,
    /// byte offset of the first `=`
    eq: usize,
}

impl Assignment {
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Trimmed key
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Everything after the first `=`, not trimmed
    pub fn value(&self) -> &str {
        &self.raw[self.eq + 1..]
    }

    /// Everything up to and including the first `=`
    pub fn prefix(&self) -> &str {
        &self.raw[..=self.eq]
    }

    /// This line with its value replaced, keeping the key token exactly as written
    pub fn with_value(&self, value: &str) -> String {
        format!("{}{}", self.prefix(), value)
    }
}
