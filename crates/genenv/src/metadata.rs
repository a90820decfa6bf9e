//! field annotations in template comments
//!
//! ```text
//! # @db_password [required] (string) Database password
//! DB_PASSWORD=${db_password}
//! ```
//!
//! The bracket and parenthesis segments are optional. Annotations are keyed by the logical field
//! name (`db_password`), not by the env key. Every placeholder in the template ends up with an
//! entry, annotated or not.
use crate::document::EnvDocument;
use crate::line::Line;
use crate::placeholder;
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;

static ANNOTATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"#\s*@([a-zA-Z0-9_]+)\s*(?:\[([^\]]+)\])?\s*(?:\(([^)]+)\))?\s*(.*)")
        .expect("annotation pattern is valid")
});

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    #[default]
    String,
    Int,
    Bool,
    Float,
    Url,
    Email,
    /// any address family, IPv4 preferred
    Ip,
    Ipv4,
    Ipv6,
}

impl FieldType {
    /// Parse a type tag, accepting the `integer`, `boolean` and `double` aliases
    pub fn from_tag(tag: &str) -> Option<Self> {
        let field_type = match tag.trim().to_lowercase().as_str() {
            "string" => FieldType::String,
            "int" | "integer" => FieldType::Int,
            "bool" | "boolean" => FieldType::Bool,
            "float" | "double" => FieldType::Float,
            "url" => FieldType::Url,
            "email" => FieldType::Email,
            "ip" => FieldType::Ip,
            "ipv4" => FieldType::Ipv4,
            "ipv6" => FieldType::Ipv6,
            _ => return None,
        };
        Some(field_type)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Int => "int",
            FieldType::Bool => "bool",
            FieldType::Float => "float",
            FieldType::Url => "url",
            FieldType::Email => "email",
            FieldType::Ip => "ip",
            FieldType::Ipv4 => "ipv4",
            FieldType::Ipv6 => "ipv6",
        }
    }
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct FieldMetadata {
    /// logical field name, the identifier inside `${...}`
    pub name: String,
    /// env key the field is assigned to, once seen
    pub key: Option<String>,
    pub required: bool,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub description: String,
    /// literal value of the first non-placeholder assignment after the annotation
    pub default: Option<String>,
}

impl FieldMetadata {
    fn unannotated(name: &str, key: &str) -> Self {
        Self {
            name: name.to_string(),
            key: Some(key.to_string()),
            ..Default::default()
        }
    }
}

pub type Metadata = IndexMap<String, FieldMetadata>;

/// Parse a single annotation comment
pub fn parse_annotation(line: &str) -> Option<FieldMetadata> {
    let caps = ANNOTATION.captures(line)?;
    let name = caps.get(1)?.as_str();
    let flags = caps.get(2).map_or("", |m| m.as_str());
    let tag = caps.get(3).map_or("", |m| m.as_str().trim());
    let description = caps.get(4).map_or("", |m| m.as_str().trim());

    let field_type = if tag.is_empty() {
        FieldType::String
    } else {
        FieldType::from_tag(tag).unwrap_or_else(|| {
            tracing::warn!(field = name, tag, "unsupported type, defaulting to 'string'");
            FieldType::String
        })
    };

    Some(FieldMetadata {
        name: name.to_string(),
        key: None,
        required: flags.to_lowercase().contains("required"),
        field_type,
        description: description.to_string(),
        default: None,
    })
}

/// Collect field metadata from a template. Malformed annotations are ignored.
#[tracing::instrument(level = "trace", skip_all)]
pub fn extract(template: &EnvDocument) -> Metadata {
    let mut fields = Metadata::new();
    let mut pending: Option<String> = None;

    for line in template.lines() {
        match line {
            Line::Comment(raw) => {
                if !line.is_comment() {
                    continue;
                }

                if let Some(field) = parse_annotation(raw) {
                    tracing::trace!(?field, "annotation found");
                    pending = Some(field.name.clone());
                    fields.insert(field.name.clone(), field);
                }
            }
            Line::Assignment(assignment) => {
                let names = placeholder::names(assignment.value());

                if names.is_empty() {
                    if let Some(name) = pending.take() {
                        if let Some(field) = fields.get_mut(&name) {
                            field.default = Some(assignment.value().trim().to_string());
                        }
                    }
                    continue;
                }

                for name in names {
                    fields
                        .entry(name.clone())
                        .and_modify(|field| field.key = Some(assignment.key().to_string()))
                        .or_insert_with(|| FieldMetadata::unannotated(&name, assignment.key()));
                }
            }
        }
    }

    fields
}
