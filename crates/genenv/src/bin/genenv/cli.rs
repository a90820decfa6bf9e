//! genenv cli interface

use clap::{Parser, Subcommand, ValueEnum};
use genenv::charset::Charset;
use genenv::config::{DEFAULT_LENGTH, DEFAULT_OUTPUT};
use std::fmt::Formatter;
use std::path::PathBuf;

/// Generate a .env file from a .env.example template
///
/// Placeholders like ${name} in template values are replaced with generated values. Keys
/// already present in the output file are kept, keys missing from it are appended.
///
/// Runs a setup wizard when no template is given.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None, args_conflicts_with_subcommands = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Template file
    #[arg(conflicts_with = "input")]
    pub template: Option<PathBuf>,

    /// Template file
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output file
    #[arg(short = 'o', long = "output", default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Regenerate placeholder values of keys already present in the output
    #[arg(short = 'f', long = "force")]
    pub force: bool,

    /// Do not ask for confirmation before regenerating
    #[arg(short = 'y', long = "yes")]
    pub yes: bool,

    /// Length of generated values
    #[arg(short = 'l', long = "length", default_value_t = DEFAULT_LENGTH)]
    pub length: usize,

    /// Characters used in generated values
    #[arg(short = 'c', long = "charset", default_value_t)]
    pub charset: CharsetArg,

    /// Prompt for each value instead of generating it
    #[arg(short = 'I', long = "interactive")]
    pub interactive: bool,

    /// Mark and report keys missing from the existing output
    #[arg(short = 'C', long = "compare")]
    pub compare: bool,

    /// Keep values of keys already present in the output, even with --force
    #[arg(short = 'S', long = "skip-existing")]
    pub skip_existing: bool,
}

impl Cli {
    pub fn template(&self) -> Option<&PathBuf> {
        self.template.as_ref().or(self.input.as_ref())
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the field metadata extracted from a template
    Inspect(InspectCommand),
}

#[derive(Parser, Debug)]
pub struct InspectCommand {
    /// Template file
    pub template: PathBuf,

    #[arg(short = 'F', long = "output-format", default_value_t)]
    pub format: OutputFormat,
}

#[derive(ValueEnum, Clone, Copy, Default, Debug)]
pub enum CharsetArg {
    #[default]
    Alphanumeric,
    Alphabetic,
    Uppercase,
    Lowercase,
    Numeric,
}

impl From<CharsetArg> for Charset {
    fn from(value: CharsetArg) -> Self {
        match value {
            CharsetArg::Alphanumeric => Charset::Alphanumeric,
            CharsetArg::Alphabetic => Charset::Alphabetic,
            CharsetArg::Uppercase => Charset::Uppercase,
            CharsetArg::Lowercase => Charset::Lowercase,
            CharsetArg::Numeric => Charset::Numeric,
        }
    }
}

impl std::fmt::Display for CharsetArg {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(Charset::from(*self).as_str())
    }
}

#[derive(ValueEnum, Clone, Default, Debug)]
pub enum OutputFormat {
    Json,
    #[default]
    Yaml,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Json => f.write_str("json"),
            OutputFormat::Yaml => f.write_str("yaml"),
        }
    }
}
