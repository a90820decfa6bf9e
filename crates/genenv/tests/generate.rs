//! End to end runs against files in a temporary directory

use genenv::charset::Charset;
use genenv::config::Config;
use genenv::field_type::ValueProvider;
use genenv::generator::{GenerateError, Generator};
use genenv::network::{AddressDiscovery, AddressFamily, Discovery};
use genenv::secret::SecretGenerator;
use pretty_assertions::{assert_eq, assert_ne};
use rand::{RngCore, SeedableRng};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const TEMPLATE: &str = "# Test template
TEST_KEY=test_value
TEST_SECRET=${test_secret}
";

struct FixedDiscovery(Discovery);

impl AddressDiscovery for FixedDiscovery {
    fn discover(&mut self, _family: AddressFamily) -> Discovery {
        self.0.clone()
    }
}

/// A random source that always fails
struct Exhausted;

impl RngCore for Exhausted {
    fn next_u32(&mut self) -> u32 {
        unreachable!("only try_fill_bytes is used")
    }

    fn next_u64(&mut self) -> u64 {
        unreachable!("only try_fill_bytes is used")
    }

    fn fill_bytes(&mut self, _dest: &mut [u8]) {
        unreachable!("only try_fill_bytes is used")
    }

    fn try_fill_bytes(&mut self, _dest: &mut [u8]) -> Result<(), rand::Error> {
        Err(rand::Error::new("exhausted"))
    }
}

struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn new(template: &str) -> Self {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(".env.example"), template).unwrap();
        Self { dir }
    }

    fn template(&self) -> PathBuf {
        self.dir.path().join(".env.example")
    }

    fn output(&self) -> PathBuf {
        self.dir.path().join(".env")
    }

    fn config(&self) -> Config {
        Config::new(self.template()).output(self.output())
    }

    fn read_output(&self) -> String {
        fs::read_to_string(self.output()).unwrap()
    }
}

fn generator(config: Config) -> Generator {
    let provider = ValueProvider::new(config.generator())
        .with_discovery(FixedDiscovery(Discovery::Unavailable("tests".to_string())));
    Generator::new(config).with_provider(provider)
}

fn value_of<'c>(contents: &'c str, key: &str) -> Option<&'c str> {
    contents
        .lines()
        .filter_map(|line| line.split_once('='))
        .find(|(k, _)| k.trim() == key)
        .map(|(_, v)| v)
}

fn is_alphanumeric(value: &str, length: usize) -> bool {
    value.len() == length && value.chars().all(|c| c.is_ascii_alphanumeric())
}

#[test]
fn creates_output_from_template() {
    let workspace = Workspace::new(TEMPLATE);

    let report = generator(workspace.config()).run().unwrap();
    let output = workspace.read_output();

    assert!(report.created);
    assert_eq!(report.generated, ["TEST_SECRET".to_string()]);
    assert!(output.starts_with("# Test template\nTEST_KEY=test_value\nTEST_SECRET="));
    assert!(is_alphanumeric(value_of(&output, "TEST_SECRET").unwrap(), 24));
}

#[test]
fn existing_output_is_kept() {
    let workspace = Workspace::new(TEMPLATE);
    fs::write(workspace.output(), "EXISTING=value\nTEST_SECRET=existing_value\n").unwrap();

    let report = generator(workspace.config()).run().unwrap();
    let output = workspace.read_output();

    assert!(!report.created);
    assert_eq!(report.appended, ["TEST_KEY".to_string()]);
    assert_eq!(
        output,
        "EXISTING=value\nTEST_SECRET=existing_value\n\n# Test template\nTEST_KEY=test_value\n"
    );
}

#[test]
fn force_regenerates_placeholder_keys() {
    let workspace = Workspace::new(TEMPLATE);
    fs::write(workspace.output(), "EXISTING=value\nTEST_SECRET=existing_value\n").unwrap();

    let report = generator(workspace.config().force(true)).run().unwrap();
    let output = workspace.read_output();

    assert_eq!(report.regenerated, ["TEST_SECRET".to_string()]);
    assert_eq!(value_of(&output, "EXISTING"), Some("value"));
    let secret = value_of(&output, "TEST_SECRET").unwrap();
    assert_ne!(secret, "existing_value");
    assert!(is_alphanumeric(secret, 24));
}

#[test]
fn force_with_skip_existing_keeps_values() {
    let workspace = Workspace::new("A=${shared}\nB=${shared}\n");
    fs::write(workspace.output(), "A=kept\n").unwrap();

    generator(workspace.config().force(true).skip_existing(true))
        .run()
        .unwrap();

    assert_eq!(workspace.read_output(), "A=kept\n\nB=kept\n");
}

#[test]
fn compare_reports_missing_keys() {
    let workspace = Workspace::new(TEMPLATE);
    fs::write(workspace.output(), "TEST_SECRET=existing_value\n").unwrap();

    let report = generator(workspace.config().compare_with_existing(true))
        .run()
        .unwrap();

    assert_eq!(report.missing, ["TEST_KEY".to_string()]);
}

#[test]
fn missing_keys_only_reported_when_comparing() {
    let workspace = Workspace::new(TEMPLATE);
    fs::write(workspace.output(), "TEST_SECRET=existing_value\n").unwrap();

    let report = generator(workspace.config()).run().unwrap();

    assert!(report.missing.is_empty());
    assert_eq!(report.appended, ["TEST_KEY".to_string()]);
}

#[test]
fn repeated_placeholder_shares_value() {
    let workspace = Workspace::new("KEY1=${x}\nKEY2=prefix_${x}\n");

    generator(workspace.config()).run().unwrap();
    let output = workspace.read_output();

    let first = value_of(&output, "KEY1").unwrap();
    assert_eq!(value_of(&output, "KEY2"), Some(format!("prefix_{first}").as_str()));
}

#[test]
fn escaped_placeholder_is_literal() {
    let workspace = Workspace::new("KEY1=${x}\nKEY2=\\${x}\n");

    generator(workspace.config()).run().unwrap();
    let output = workspace.read_output();

    assert!(is_alphanumeric(value_of(&output, "KEY1").unwrap(), 24));
    assert_eq!(value_of(&output, "KEY2"), Some("${x}"));
}

#[test]
fn numeric_charset_and_length() {
    let workspace = Workspace::new(TEMPLATE);

    generator(workspace.config().length(10).charset(Charset::Numeric))
        .run()
        .unwrap();
    let output = workspace.read_output();

    let secret = value_of(&output, "TEST_SECRET").unwrap();
    assert_eq!(secret.len(), 10);
    assert!(secret.chars().all(|c| c.is_ascii_digit()));
}

#[test]
fn ip_field_uses_discovered_address() {
    let workspace = Workspace::new("# @host (ipv4) Bind address\nHOST=${host}\n");
    let config = workspace.config();
    let provider = ValueProvider::new(config.generator())
        .with_discovery(FixedDiscovery(Discovery::Found("192.168.1.20".parse().unwrap())));

    Generator::new(config).with_provider(provider).run().unwrap();

    assert_eq!(
        workspace.read_output(),
        "# @host (ipv4) Bind address\nHOST=192.168.1.20\n"
    );
}

#[test]
fn second_run_changes_nothing() {
    let workspace = Workspace::new(TEMPLATE);

    generator(workspace.config()).run().unwrap();
    let first = workspace.read_output();
    let report = generator(workspace.config()).run().unwrap();

    assert_eq!(workspace.read_output(), first);
    assert!(report.appended.is_empty());
    assert_eq!(
        report.preserved,
        ["TEST_KEY".to_string(), "TEST_SECRET".to_string()]
    );
}

#[test]
fn missing_template() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::new(dir.path().join("missing.example")).output(dir.path().join(".env"));

    let err = generator(config).run().unwrap_err();

    assert!(matches!(err, GenerateError::TemplateRead(_)));
    assert!(!dir.path().join(".env").exists());
}

#[test]
fn unwritable_output() {
    let workspace = Workspace::new(TEMPLATE);
    let output = workspace.dir.path().join("missing").join(".env");

    let err = generator(workspace.config().output(&output))
        .run()
        .unwrap_err();

    match err {
        GenerateError::OutputWrite { path, .. } => assert_eq!(path, output),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn failing_random_source_leaves_placeholder() {
    let workspace = Workspace::new(TEMPLATE);
    let config = workspace.config();
    let provider = ValueProvider::new(SecretGenerator::new(24, Charset::Alphanumeric))
        .with_rng(Exhausted)
        .with_discovery(FixedDiscovery(Discovery::Unavailable("tests".to_string())));

    let report = Generator::new(config)
        .with_provider(provider)
        .run()
        .unwrap();

    assert_eq!(report.unresolved, ["test_secret".to_string()]);
    assert_eq!(
        workspace.read_output(),
        "# Test template\nTEST_KEY=test_value\nTEST_SECRET=${test_secret}\n"
    );
}

#[test]
fn seeded_runs_are_reproducible() {
    let run = |seed: u64| {
        let workspace = Workspace::new(TEMPLATE);
        let config = workspace.config();
        let provider = ValueProvider::new(config.generator())
            .with_rng(rand::rngs::StdRng::seed_from_u64(seed));
        Generator::new(config).with_provider(provider).run().unwrap();
        workspace.read_output()
    };

    assert_eq!(run(1), run(1));
    assert_ne!(run(1), run(2));
}
