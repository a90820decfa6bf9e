//! interactive field prompting
use crate::metadata::{FieldMetadata, FieldType};
use std::io::{self, BufRead, Write};

/// Line based terminal access
pub trait Terminal {
    fn write(&mut self, text: &str) -> io::Result<()>;

    /// Read one line without its line ending, `None` at end of input
    fn read_line(&mut self) -> io::Result<Option<String>>;

    fn ask(&mut self, prompt: &str) -> io::Result<String> {
        self.write(prompt)?;
        self.read_line()?
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "input closed"))
    }

    /// Yes/no question, anything but `y`/`yes` is no
    fn confirm(&mut self, question: &str) -> io::Result<bool> {
        let answer = self.ask(&format!("{question} (y/N): "))?;
        Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
    }
}

/// stdin/stdout
#[derive(Debug, Default)]
pub struct Stdio;

impl Terminal for Stdio {
    fn write(&mut self, text: &str) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        stdout.write_all(text.as_bytes())?;
        stdout.flush()
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(&['\r', '\n'][..]).to_string()))
    }
}

/// What the resolver needs to know to ask for a field
#[derive(Debug, Clone, Copy, derive_new::new)]
pub struct FieldRequest<'a> {
    /// env key being filled
    pub key: &'a str,
    pub field: Option<&'a FieldMetadata>,
    /// value of `key` in the existing output
    pub current: Option<&'a str>,
    /// `key` is absent from the existing output
    pub is_new: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    Value(String),
    Generate,
}

/// Supplies placeholder values instead of generating them
pub trait FieldSource {
    fn ask(&mut self, request: &FieldRequest<'_>) -> io::Result<Answer>;
}

/// Prompts on a [Terminal] until it gets valid input
#[derive(Debug)]
pub struct Prompter<T> {
    terminal: T,
    compare: bool,
}

impl<T: Terminal> Prompter<T> {
    /// With `compare` set, keys missing from the existing output are marked `[NEW]`
    pub fn new(mut terminal: T, compare: bool) -> io::Result<Self> {
        if compare {
            terminal.write(
                "Fields marked with [NEW] are not present in the existing .env file.\n",
            )?;
        }
        Ok(Self { terminal, compare })
    }

    pub fn into_inner(self) -> T {
        self.terminal
    }

    fn prompt(&self, request: &FieldRequest<'_>) -> String {
        let mut details = vec![];

        if let Some(field) = request.field {
            if !field.description.is_empty() {
                details.push(field.description.clone());
            }
            details.push(if field.required { "[REQUIRED]" } else { "[OPTIONAL]" }.to_string());
            if field.field_type != FieldType::String {
                details.push(format!("type: {}", field.field_type));
            }
        }

        match (request.field.and_then(|f| f.default.as_deref()), request.current) {
            (Some(default), _) if !default.is_empty() => {
                details.push(format!("default: {default}"))
            }
            (_, Some(current)) => details.push(format!("current: {current}")),
            _ => {}
        }

        let mut prompt = request.key.to_string();
        if !details.is_empty() {
            prompt.push_str(&format!(" ({})", details.join(", ")));
        }
        if self.compare && request.is_new {
            prompt.push_str(" [NEW]");
        }
        prompt.push_str(": ");
        prompt
    }
}

impl<T: Terminal> FieldSource for Prompter<T> {
    fn ask(&mut self, request: &FieldRequest<'_>) -> io::Result<Answer> {
        let prompt = self.prompt(request);
        let field_type = request.field.map(|f| f.field_type).unwrap_or_default();
        let default = request
            .field
            .and_then(|f| f.default.as_deref())
            .filter(|d| !d.is_empty());
        let required = request.field.is_some_and(|f| f.required);

        loop {
            let input = self.terminal.ask(&prompt)?;

            let Some(value) = field_type.validate(&input) else {
                self.terminal.write(&format!("{}\n", field_type.hint()))?;
                continue;
            };

            if !value.is_empty() {
                return Ok(Answer::Value(value));
            }

            if let Some(default) = default {
                self.terminal
                    .write(&format!("Using default value: {default}\n"))?;
                return Ok(Answer::Value(default.to_string()));
            }

            if let Some(current) = request.current {
                self.terminal
                    .write(&format!("Using current value: {current}\n"))?;
                return Ok(Answer::Value(current.to_string()));
            }

            if required {
                self.terminal
                    .write("This field is required. Please enter a value.\n")?;
                continue;
            }

            return Ok(Answer::Generate);
        }
    }
}
