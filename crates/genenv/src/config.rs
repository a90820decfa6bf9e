//! run configuration
use crate::charset::Charset;
use crate::reconcile::Mode;
use crate::secret::SecretGenerator;
use std::path::{Path, PathBuf};

pub const DEFAULT_LENGTH: usize = 24;
pub const DEFAULT_OUTPUT: &str = ".env";
pub const DEFAULT_TEMPLATE: &str = ".env.example";

/// Parameters of a single run, fixed once built
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    template_path: PathBuf,
    output_path: PathBuf,
    force: bool,
    length: usize,
    charset: Charset,
    interactive: bool,
    compare_with_existing: bool,
    skip_existing: bool,
}

impl Config {
    pub fn new(template_path: impl Into<PathBuf>) -> Self {
        Self {
            template_path: template_path.into(),
            output_path: DEFAULT_OUTPUT.into(),
            force: false,
            length: DEFAULT_LENGTH,
            charset: Charset::default(),
            interactive: false,
            compare_with_existing: false,
            skip_existing: false,
        }
    }

    pub fn output(mut self, output_path: impl Into<PathBuf>) -> Self {
        self.output_path = output_path.into();
        self
    }

    pub fn force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    /// Length of generated values, `0` selects the default
    pub fn length(mut self, length: usize) -> Self {
        self.length = if length == 0 { DEFAULT_LENGTH } else { length };
        self
    }

    pub fn charset(mut self, charset: Charset) -> Self {
        self.charset = charset;
        self
    }

    pub fn interactive(mut self, interactive: bool) -> Self {
        self.interactive = interactive;
        self
    }

    pub fn compare_with_existing(mut self, compare: bool) -> Self {
        self.compare_with_existing = compare;
        self
    }

    pub fn skip_existing(mut self, skip: bool) -> Self {
        self.skip_existing = skip;
        self
    }

    pub fn template_path(&self) -> &Path {
        &self.template_path
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    pub fn is_force(&self) -> bool {
        self.force
    }

    pub fn value_length(&self) -> usize {
        self.length
    }

    pub fn value_charset(&self) -> Charset {
        self.charset
    }

    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    pub fn is_compare_with_existing(&self) -> bool {
        self.compare_with_existing
    }

    pub fn is_skip_existing(&self) -> bool {
        self.skip_existing
    }

    pub fn mode(&self) -> Mode {
        Mode {
            force: self.force,
            skip_existing: self.skip_existing,
        }
    }

    pub fn generator(&self) -> SecretGenerator {
        SecretGenerator::new(self.length, self.charset)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults() {
        let config = Config::new(".env.example");

        assert_eq!(config.output_path(), Path::new(".env"));
        assert_eq!(config.value_length(), 24);
        assert_eq!(config.value_charset(), Charset::Alphanumeric);
        assert_eq!(config.mode(), Mode::default());
        assert!(!config.is_interactive());
    }

    #[test]
    fn zero_length_resets_to_default() {
        assert_eq!(Config::new("t").length(0).value_length(), DEFAULT_LENGTH);
        assert_eq!(Config::new("t").length(8).value_length(), 8);
    }

    #[test]
    fn mode_follows_flags() {
        let config = Config::new("t").force(true).skip_existing(true);
        assert_eq!(
            config.mode(),
            Mode {
                force: true,
                skip_existing: true
            }
        );
    }
}
