//! # genenv - generate .env files from templates
//!
//! ## Introduction for developers
//!
//! Read this to understand how `genenv` works internally.
//!
//! ### Template format
//!
//! A template is a `.env.example` style file. Every line is either passed through or is a
//! `key=value` assignment whose value may contain placeholders:
//!
//! ```text
//! # @db_password [required] (string) Database password
//! DB_PASSWORD=${db_password}
//! DB_USER=app
//! LITERAL=\${not_a_placeholder}
//! ```
//!
//! - `${name}` is replaced with a generated (or prompted) value. `name` is the logical field
//!   name, independent of the env key it is assigned to.
//! - `\${name}` is written out as `${name}`.
//! - `# @name [required|optional] (type) description` annotates a field, see [metadata].
//!
//! ### Loading
//!
//! Template and existing output are both read as an [document::EnvDocument], a list of
//! [line::Line]s. Assignment lines keep their raw text so untouched lines round-trip exactly.
//!
//! ### Reconciliation
//!
//! see [reconcile::reconcile]
//!
//! | existing output | `force` | result                                                        |
//! |-----------------|---------|---------------------------------------------------------------|
//! | no              | -       | template with placeholders resolved                           |
//! | yes             | no      | existing file unchanged, missing template keys appended       |
//! | yes             | yes     | as above, placeholder keys of the template get a fresh value  |
//!
//! Appended keys bring along the comment group above them in the template.
//!
//! ### Resolution
//!
//! [resolver::Resolver] keeps a cache from field name to value for the whole run. The first
//! occurrence of a name decides its value, every other occurrence reuses it. Values come from
//! an [interactive::FieldSource] (interactive mode) or from [field_type::ValueProvider]: a
//! discovered local address for `ip`/`ipv4`/`ipv6` fields, a [secret::SecretGenerator] value
//! otherwise.
//!
//! ### Output
//!
//! The whole output is computed in memory, then [generator::Generator] replaces the output file
//! in one step.
//!
pub mod charset;
pub mod config;
pub mod document;
pub mod field_type;
pub mod generator;
pub mod interactive;
pub mod line;
pub mod metadata;
pub mod network;
pub mod placeholder;
pub mod reconcile;
pub mod resolver;
pub mod secret;
