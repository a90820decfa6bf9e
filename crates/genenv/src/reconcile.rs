//! merge a template with the existing output
//!
//! Without an existing output every template line is emitted in order, placeholders resolved.
//!
//! With an existing output that file is the source of truth:
//! - its lines are kept in order and byte for byte
//! - under `force`, keys whose template value still has a placeholder get a fresh value, the
//!   text up to the first `=` is kept as it was
//! - template keys the output lacks are appended in template order, each preceded by the
//!   comment group written above it in the template
use crate::document::{EnvDocument, LoadError};
use crate::line::Line;
use crate::metadata::{self, Metadata};
use crate::placeholder;
use crate::resolver::{ResolveError, Resolver};
use std::path::Path;

/// A template document and the field metadata extracted from it
#[derive(Debug, Clone)]
pub struct Template {
    document: EnvDocument,
    metadata: Metadata,
}

impl Template {
    pub fn new(document: EnvDocument) -> Self {
        let metadata = metadata::extract(&document);
        Self { document, metadata }
    }

    pub fn load(path: &Path) -> Result<Self, LoadError> {
        EnvDocument::load_file(path).map(Self::new)
    }

    pub fn document(&self) -> &EnvDocument {
        &self.document
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Template value for `key` if it has a placeholder to resolve
    pub fn placeholder_value(&self, key: &str) -> Option<&str> {
        self.document
            .get(key)
            .map(|assignment| assignment.value())
            .filter(|value| placeholder::contains_placeholder(value))
    }

    /// Comment lines documenting the line at `index`
    ///
    /// Walks upwards collecting `#` lines. Blank lines directly above the key are skipped until
    /// the first comment is found, after that a blank line ends the group. Any other line ends
    /// it immediately.
    pub fn comment_group(&self, index: usize) -> &[Line] {
        let lines = self.document.lines();
        let (mut start, mut end) = (index, index);

        for i in (0..index).rev() {
            let line = &lines[i];
            if line.is_blank() {
                if start < end {
                    break;
                }
                start = i;
                end = i;
            } else if line.is_comment() {
                start = i;
            } else {
                break;
            }
        }

        &lines[start..end]
    }
}

impl From<EnvDocument> for Template {
    fn from(document: EnvDocument) -> Self {
        Self::new(document)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Mode {
    /// regenerate existing keys the template still marks with a placeholder
    pub force: bool,
    /// existing values seed the resolution cache and are never regenerated
    pub skip_existing: bool,
}

/// Output lines and what happened to each key
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reconciled {
    pub lines: Vec<String>,
    /// keys resolved while creating a new output
    pub generated: Vec<String>,
    /// existing keys that received a new value
    pub regenerated: Vec<String>,
    /// existing keys written back unchanged
    pub preserved: Vec<String>,
    /// template keys added to an existing output
    pub appended: Vec<String>,
}

impl Reconciled {
    /// File contents, one line per output line, each newline terminated
    pub fn render(&self) -> String {
        self.lines.iter().fold(String::new(), |mut out, line| {
            out.push_str(line);
            out.push('\n');
            out
        })
    }
}

pub fn reconcile(
    template: &Template,
    existing: Option<&EnvDocument>,
    mode: Mode,
    resolver: &mut Resolver<'_>,
) -> Result<Reconciled, ResolveError> {
    match existing {
        None => from_template(template, resolver),
        Some(existing) => merge(template, existing, mode, resolver),
    }
}

/// Keys the template declares that `existing` lacks, in template order
pub fn missing_keys<'t>(template: &'t Template, existing: &EnvDocument) -> Vec<&'t str> {
    template
        .document()
        .keys()
        .filter(|key| !existing.contains_key(key))
        .collect()
}

#[tracing::instrument(level = "trace", skip_all)]
fn from_template(
    template: &Template,
    resolver: &mut Resolver<'_>,
) -> Result<Reconciled, ResolveError> {
    let mut reconciled = Reconciled::default();

    for line in template.document().lines() {
        let Line::Assignment(assignment) = line else {
            reconciled.lines.push(line.raw().to_string());
            continue;
        };

        if !placeholder::contains_placeholder(assignment.value()) {
            reconciled.lines.push(assignment.raw().to_string());
            continue;
        }

        let value = resolver.resolve(assignment.key(), None, assignment.value())?;
        reconciled.lines.push(assignment.with_value(&value));
        reconciled.generated.push(assignment.key().to_string());
    }

    Ok(reconciled)
}

#[tracing::instrument(level = "trace", skip_all, fields(force = mode.force))]
fn merge(
    template: &Template,
    existing: &EnvDocument,
    mode: Mode,
    resolver: &mut Resolver<'_>,
) -> Result<Reconciled, ResolveError> {
    let mut reconciled = Reconciled::default();

    if mode.skip_existing {
        seed_existing(template, existing, resolver);
    }

    for line in existing.lines() {
        let Line::Assignment(assignment) = line else {
            reconciled.lines.push(line.raw().to_string());
            continue;
        };

        let key = assignment.key();
        let template_value = template
            .placeholder_value(key)
            .filter(|_| mode.force && !mode.skip_existing);

        match template_value {
            Some(template_value) => {
                tracing::debug!(key, "regenerating");
                // the existing value only stands for a placeholder it replaced entirely
                let current =
                    placeholder::bare_name(template_value).map(|_| assignment.value().trim());
                let value = resolver.resolve(key, current, template_value)?;
                reconciled.lines.push(assignment.with_value(&value));
                reconciled.regenerated.push(key.to_string());
            }
            None => {
                reconciled.lines.push(assignment.raw().to_string());
                reconciled.preserved.push(key.to_string());
            }
        }
    }

    let missing = missing_keys(template, existing);
    if missing.is_empty() {
        return Ok(reconciled);
    }

    if reconciled
        .lines
        .last()
        .is_some_and(|last| !last.trim().is_empty())
    {
        reconciled.lines.push(String::new());
    }

    for key in missing {
        let Some(index) = template.document().position(key) else {
            continue;
        };

        tracing::debug!(key, "appending");
        reconciled.lines.extend(
            template
                .comment_group(index)
                .iter()
                .map(|line| line.raw().to_string()),
        );

        let line = match template.document().line(index).assignment() {
            Some(assignment) if placeholder::contains_placeholder(assignment.value()) => {
                let value = resolver.resolve(key, None, assignment.value())?;
                assignment.with_value(&value)
            }
            _ => template.document().line(index).raw().to_string(),
        };
        reconciled.lines.push(line);
        reconciled.appended.push(key.to_string());
    }

    Ok(reconciled)
}

/// Existing values assigned from a bare `${name}` in the template fix the value of `name`
fn seed_existing(template: &Template, existing: &EnvDocument, resolver: &mut Resolver<'_>) {
    for assignment in existing.assignments() {
        let Some(template_value) = template.placeholder_value(assignment.key()) else {
            continue;
        };

        if let Some(name) = placeholder::bare_name(template_value) {
            tracing::debug!(key = assignment.key(), placeholder = %name, "reusing existing value");
            resolver.seed(&name, assignment.value().trim());
        }
    }
}
