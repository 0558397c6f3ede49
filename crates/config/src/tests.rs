use std::io::Write;
use std::net::SocketAddr;
use std::time::Duration;

use pretty_assertions::assert_eq;

use super::*;

#[test]
fn empty_input_yields_defaults() {
	let config = Config::parse("").unwrap();
	assert_eq!(config, Config::default());
	assert_eq!(config.playground.debounce, Duration::from_millis(300));
	assert_eq!(config.playground.export_name, "playground.html");
	assert_eq!(config.preview.sandbox, SandboxPolicy::ALLOW_SCRIPTS);
}

#[test]
fn parses_all_sections() {
	let config = Config::parse(
		r#"
[playground]
debounce-ms = 120
stylesheet = "https://example.test/utilities.css"
body-class = "dark"
container-class = "wrap"
export-name = "demo.html"

[preview]
listen = "0.0.0.0:9000"
sandbox = ["allow-scripts", "allow-modals"]
"#,
	)
	.unwrap();

	assert_eq!(config.playground.debounce, Duration::from_millis(120));
	assert_eq!(config.playground.stylesheet, "https://example.test/utilities.css");
	assert_eq!(config.playground.body_class, "dark");
	assert_eq!(config.playground.container_class, "wrap");
	assert_eq!(config.playground.export_name, "demo.html");
	assert_eq!(config.preview.listen, "0.0.0.0:9000".parse::<SocketAddr>().unwrap());
	assert_eq!(config.preview.sandbox, SandboxPolicy::ALLOW_SCRIPTS | SandboxPolicy::ALLOW_MODALS);
}

#[test]
fn zero_debounce_is_allowed() {
	let config = Config::parse("[playground]\ndebounce-ms = 0\n").unwrap();
	assert_eq!(config.playground.debounce, Duration::ZERO);
}

#[test]
fn same_origin_sandbox_is_rejected() {
	let err = Config::parse("[preview]\nsandbox = [\"allow-scripts\", \"allow-same-origin\"]\n").unwrap_err();
	assert!(matches!(err, ConfigError::Sandbox(_)), "{err}");
}

#[test]
fn unknown_keys_are_rejected() {
	let err = Config::parse("[playground]\ntheme = \"dark\"\n").unwrap_err();
	assert!(matches!(err, ConfigError::Toml(_)), "{err}");
}

#[test]
fn export_name_must_be_a_bare_file_name() {
	let err = Config::parse("[playground]\nexport-name = \"../out.html\"\n").unwrap_err();
	assert!(matches!(err, ConfigError::InvalidExportName(_)));
	let err = Config::parse("[playground]\nexport-name = \"  \"\n").unwrap_err();
	assert!(matches!(err, ConfigError::InvalidExportName(_)));
}

#[test]
fn empty_stylesheet_is_rejected() {
	let err = Config::parse("[playground]\nstylesheet = \"\"\n").unwrap_err();
	assert!(matches!(err, ConfigError::EmptyStylesheet));
}

#[test]
fn load_reads_file_and_reports_missing_path() {
	let mut file = tempfile::NamedTempFile::new().unwrap();
	writeln!(file, "[playground]\ndebounce-ms = 50").unwrap();
	let config = Config::load(file.path()).unwrap();
	assert_eq!(config.playground.debounce, Duration::from_millis(50));

	let dir = tempfile::tempdir().unwrap();
	let missing = dir.path().join("nope.toml");
	let err = Config::load_or_default(Some(&missing)).unwrap_err();
	assert!(matches!(err, ConfigError::Io { .. }));
}
