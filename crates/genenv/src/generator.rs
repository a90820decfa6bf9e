//! a complete run: read, reconcile, write
use crate::config::Config;
use crate::document::{EnvDocument, LoadError};
use crate::field_type::ValueProvider;
use crate::interactive::FieldSource;
use crate::reconcile::{self, Template};
use crate::resolver::{ResolveError, Resolver};
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub struct Generator {
    config: Config,
    provider: ValueProvider,
}

impl Generator {
    pub fn new(config: Config) -> Self {
        let provider = ValueProvider::new(config.generator());
        Self { config, provider }
    }

    /// Replace the source of generated values
    pub fn with_provider(mut self, provider: ValueProvider) -> Self {
        self.provider = provider;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn run(&mut self) -> Result<Report, GenerateError> {
        self.run_with(None)
    }

    /// Run, asking `source` for every field before generating a value
    pub fn run_with(
        &mut self,
        source: Option<&mut dyn FieldSource>,
    ) -> Result<Report, GenerateError> {
        let template_path = self.config.template_path();
        let output_path = self.config.output_path();

        let template = Template::load(template_path).map_err(GenerateError::TemplateRead)?;
        let existing =
            EnvDocument::load_optional(output_path).map_err(GenerateError::ExistingOutputRead)?;

        let mut missing = vec![];
        if self.config.is_compare_with_existing() {
            if let Some(existing) = &existing {
                missing = reconcile::missing_keys(&template, existing)
                    .into_iter()
                    .map(str::to_string)
                    .collect();
                tracing::info!(?missing, "keys not present in existing output");
            }
        }

        let mut resolver = Resolver::new(template.metadata(), &mut self.provider);
        if let Some(source) = source {
            resolver = resolver.with_source(source);
        }

        let reconciled = reconcile::reconcile(
            &template,
            existing.as_ref(),
            self.config.mode(),
            &mut resolver,
        )?;
        let unresolved = resolver.unresolved().to_vec();

        write_output(output_path, &reconciled.render()).map_err(|source| {
            GenerateError::OutputWrite {
                path: output_path.to_owned(),
                source,
            }
        })?;

        let report = Report {
            template: template_path.to_owned(),
            output: output_path.to_owned(),
            created: existing.is_none(),
            generated: reconciled.generated,
            regenerated: reconciled.regenerated,
            preserved: reconciled.preserved,
            appended: reconciled.appended,
            missing,
            unresolved,
        };

        tracing::info!(
            output = %report.output.display(),
            created = report.created,
            generated = report.generated.len(),
            regenerated = report.regenerated.len(),
            appended = report.appended.len(),
            "output written"
        );

        Ok(report)
    }
}

/// Replace `path` with `contents` in one step
///
/// Contents go to a temporary file next to `path` which is then renamed over it. An existing
/// file's permissions are carried over, a new file is only readable by its owner.
fn write_output(path: &Path, contents: &str) -> std::io::Result<()> {
    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = tempfile::NamedTempFile::new_in(directory)?;
    file.write_all(contents.as_bytes())?;
    file.as_file().sync_all()?;

    if let Ok(metadata) = std::fs::metadata(path) {
        file.as_file().set_permissions(metadata.permissions())?;
    }

    file.persist(path).map_err(|err| err.error)?;
    tracing::debug!(path = %path.display(), bytes = contents.len(), "written");
    Ok(())
}

/// What a run did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub template: PathBuf,
    pub output: PathBuf,
    /// the output did not exist before
    pub created: bool,
    pub generated: Vec<String>,
    pub regenerated: Vec<String>,
    pub preserved: Vec<String>,
    pub appended: Vec<String>,
    /// template keys absent from the existing output, only collected when comparing
    pub missing: Vec<String>,
    /// placeholder names left as `${name}` because no value could be generated
    pub unresolved: Vec<String>,
}

#[derive(thiserror::Error, Debug)]
pub enum GenerateError {
    #[error("failed to open template file")]
    TemplateRead(#[source] LoadError),
    #[error("failed to read existing output file")]
    ExistingOutputRead(#[source] LoadError),
    #[error("failed to write output file {}", path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Resolve(#[from] ResolveError),
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn write_output_replaces_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        std::fs::write(&path, "OLD=1\n").unwrap();

        write_output(&path, "NEW=2\n").unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "NEW=2\n");
    }

    #[test]
    fn write_output_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join(".env");

        assert!(write_output(&path, "A=1\n").is_err());
        assert!(!path.exists());
    }
}
