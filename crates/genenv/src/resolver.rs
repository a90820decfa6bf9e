//! placeholder resolution with a per-run cache
//!
//! The first occurrence of a field name decides its value (prompted, discovered or generated).
//! Every later occurrence in the same run, on any line, gets the cached value.
use crate::field_type::ValueProvider;
use crate::interactive::{Answer, FieldRequest, FieldSource};
use crate::metadata::Metadata;
use crate::placeholder;
use indexmap::IndexMap;

pub struct Resolver<'a> {
    metadata: &'a Metadata,
    provider: &'a mut ValueProvider,
    source: Option<&'a mut dyn FieldSource>,
    cache: IndexMap<String, String>,
    unresolved: Vec<String>,
}

impl<'a> Resolver<'a> {
    pub fn new(metadata: &'a Metadata, provider: &'a mut ValueProvider) -> Self {
        Self {
            metadata,
            provider,
            source: None,
            cache: Default::default(),
            unresolved: vec![],
        }
    }

    /// Ask `source` for a field's value before falling back to generation
    pub fn with_source(mut self, source: &'a mut dyn FieldSource) -> Self {
        self.source = Some(source);
        self
    }

    /// Resolve every placeholder in the value assigned to `key`
    ///
    /// `current` is the key's value in the existing output, if there is one.
    pub fn resolve(
        &mut self,
        key: &str,
        current: Option<&str>,
        value: &str,
    ) -> Result<String, ResolveError> {
        placeholder::substitute(value, |name| self.lookup(name, key, current))
    }

    /// Fix the value of `name` unless it has already been resolved
    pub fn seed(&mut self, name: &str, value: &str) {
        self.cache
            .entry(name.to_string())
            .or_insert_with(|| value.to_string());
    }

    pub fn cached(&self, name: &str) -> Option<&str> {
        self.cache.get(name).map(String::as_str)
    }

    /// Names that could not be resolved and were left as `${name}`
    pub fn unresolved(&self) -> &[String] {
        &self.unresolved
    }

    fn lookup(
        &mut self,
        name: &str,
        key: &str,
        current: Option<&str>,
    ) -> Result<Option<String>, ResolveError> {
        if let Some(value) = self.cache.get(name) {
            tracing::trace!(placeholder = name, key, "cache hit");
            return Ok(Some(value.clone()));
        }

        let metadata = self.metadata;
        let field = metadata.get(name);
        let answer = match &mut self.source {
            Some(source) => source.ask(&FieldRequest::new(key, field, current, current.is_none()))?,
            None => Answer::Generate,
        };

        let value = match answer {
            Answer::Value(value) => value,
            Answer::Generate => {
                let field_type = field.map(|f| f.field_type).unwrap_or_default();
                match self.provider.synthesize(field_type) {
                    Ok(value) => value,
                    Err(err) => {
                        tracing::warn!(
                            placeholder = name,
                            key,
                            error = %err,
                            "leaving placeholder unresolved"
                        );
                        if !self.unresolved.iter().any(|n| n == name) {
                            self.unresolved.push(name.to_string());
                        }
                        return Ok(None);
                    }
                }
            }
        };

        tracing::debug!(placeholder = name, key, "resolved");
        self.cache.insert(name.to_string(), value.clone());
        Ok(Some(value))
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ResolveError {
    #[error("failed to read interactive input")]
    Input(#[from] std::io::Error),
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::env_document;
    use crate::field_type::test::provider;
    use crate::interactive::{test::Script, Prompter};
    use crate::metadata;
    use crate::network::Discovery;
    use crate::secret::test::Exhausted;
    use pretty_assertions::{assert_eq, assert_ne};

    fn unavailable() -> Discovery {
        Discovery::Unavailable("none".to_string())
    }

    #[test]
    fn same_name_same_value() {
        let metadata = Metadata::new();
        let mut provider = provider(unavailable());
        let mut resolver = Resolver::new(&metadata, &mut provider);

        let first = resolver.resolve("KEY1", None, "${x}").unwrap();
        let second = resolver.resolve("KEY2", None, "prefix_${x}").unwrap();
        let other = resolver.resolve("KEY3", None, "${y}").unwrap();

        assert_eq!(first.len(), 24);
        assert_eq!(second, format!("prefix_{first}"));
        assert_ne!(first, other);
        assert_eq!(resolver.cached("x"), Some(first.as_str()));
    }

    #[test]
    fn distinct_names_in_one_value() {
        let metadata = Metadata::new();
        let mut provider = provider(unavailable());
        let mut resolver = Resolver::new(&metadata, &mut provider);

        let value = resolver.resolve("KEY", None, "${first}_${second}").unwrap();
        let (first, second) = value.split_once('_').unwrap();

        assert_eq!(resolver.cached("first"), Some(first));
        assert_eq!(resolver.cached("second"), Some(second));
    }

    #[test]
    fn escaped_never_cached() {
        let metadata = Metadata::new();
        let mut provider = provider(unavailable());
        let mut resolver = Resolver::new(&metadata, &mut provider);

        assert_eq!(
            resolver.resolve("KEY", None, r"\${literal}").unwrap(),
            "${literal}"
        );
        assert_eq!(resolver.cached("literal"), None);
    }

    #[test]
    fn typed_field_uses_discovery() {
        let template = env_document! {"
# @host (ipv4) Host address
HOST=${host}
"};
        let metadata = metadata::extract(&template);
        let mut provider = provider(Discovery::Found("10.0.0.7".parse().unwrap()));
        let mut resolver = Resolver::new(&metadata, &mut provider);

        assert_eq!(resolver.resolve("HOST", None, "${host}").unwrap(), "10.0.0.7");
    }

    #[test]
    fn seed_wins_over_generation() {
        let metadata = Metadata::new();
        let mut provider = provider(unavailable());
        let mut resolver = Resolver::new(&metadata, &mut provider);

        resolver.seed("secret", "kept");
        resolver.seed("secret", "ignored");
        assert_eq!(resolver.resolve("OTHER", None, "${secret}").unwrap(), "kept");
    }

    #[test]
    fn generation_failure_keeps_placeholder() {
        let metadata = Metadata::new();
        let mut provider = provider(unavailable()).with_rng(Exhausted);
        let mut resolver = Resolver::new(&metadata, &mut provider);

        assert_eq!(
            resolver.resolve("KEY", None, "${a}-${a}").unwrap(),
            "${a}-${a}"
        );
        assert_eq!(resolver.unresolved(), ["a".to_string()]);
    }

    #[test]
    fn source_is_asked_once_per_name() {
        let metadata = Metadata::new();
        let mut provider = provider(unavailable());
        let mut prompter = Prompter::new(Script::new(&["typed"]), false).unwrap();
        let mut resolver = Resolver::new(&metadata, &mut provider).with_source(&mut prompter);

        assert_eq!(resolver.resolve("A", None, "${x}").unwrap(), "typed");
        // a second prompt would hit end of input and fail
        assert_eq!(resolver.resolve("B", None, "${x}").unwrap(), "typed");
    }

    #[test]
    fn source_may_defer_to_generation() {
        let metadata = Metadata::new();
        let mut provider = provider(unavailable());
        let mut prompter = Prompter::new(Script::new(&[""]), false).unwrap();
        let mut resolver = Resolver::new(&metadata, &mut provider).with_source(&mut prompter);

        assert_eq!(resolver.resolve("A", None, "${x}").unwrap().len(), 24);
    }

    #[test]
    fn closed_input_is_an_error() {
        let metadata = Metadata::new();
        let mut provider = provider(unavailable());
        let mut prompter = Prompter::new(Script::default(), false).unwrap();
        let mut resolver = Resolver::new(&metadata, &mut provider).with_source(&mut prompter);

        assert!(matches!(
            resolver.resolve("A", None, "${x}"),
            Err(ResolveError::Input(_))
        ));
    }
}
