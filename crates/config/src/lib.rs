#![cfg_attr(test, allow(unused_crate_dependencies))]
//! Configuration for the easel playground.
//!
//! Configuration is written in TOML. The loader looks in these locations (in
//! order) and stops at the first hit:
//!
//! 1. The path given on the command line (`--config`)
//! 2. `$XDG_CONFIG_HOME/easel/config.toml` (or the platform equivalent)
//! 3. Built-in defaults
//!
//! ```toml
//! [playground]
//! debounce-ms = 300
//! stylesheet = "https://cdn.jsdelivr.net/npm/tailwindcss@2.2.19/dist/tailwind.min.css"
//! body-class = "bg-gray-50"
//! container-class = "container"
//! export-name = "playground.html"
//!
//! [preview]
//! listen = "127.0.0.1:5178"
//! sandbox = ["allow-scripts", "allow-modals"]
//! ```
//!
//! `allow-same-origin` and the `allow-top-navigation*` family are rejected:
//! previews never share an origin with the host page.

pub mod error;

use std::net::{Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub use easel_primitives::SandboxPolicy;
pub use error::{ConfigError, Result};
use serde::Deserialize;

/// Default idle window between the last edit and a preview rebuild.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Shared utility stylesheet linked from every composed document.
pub const DEFAULT_STYLESHEET: &str = "https://cdn.jsdelivr.net/npm/tailwindcss@2.2.19/dist/tailwind.min.css";

/// File name offered when exporting the composed document.
pub const DEFAULT_EXPORT_NAME: &str = "playground.html";

/// Default preview server port.
pub const DEFAULT_PORT: u16 = 5178;

/// Validated configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
	/// Editor and composer settings.
	pub playground: PlaygroundConfig,
	/// Preview server settings.
	pub preview: PreviewConfig,
}

/// Editor and composer settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaygroundConfig {
	pub debounce: Duration,
	pub stylesheet: String,
	pub body_class: String,
	pub container_class: String,
	pub export_name: String,
}

/// Preview server settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewConfig {
	pub listen: SocketAddr,
	pub sandbox: SandboxPolicy,
}

impl Default for PlaygroundConfig {
	fn default() -> Self {
		Self {
			debounce: DEFAULT_DEBOUNCE,
			stylesheet: DEFAULT_STYLESHEET.to_string(),
			body_class: "bg-gray-50".to_string(),
			container_class: "container".to_string(),
			export_name: DEFAULT_EXPORT_NAME.to_string(),
		}
	}
}

impl Default for PreviewConfig {
	fn default() -> Self {
		Self {
			listen: SocketAddr::from((Ipv4Addr::LOCALHOST, DEFAULT_PORT)),
			sandbox: SandboxPolicy::default(),
		}
	}
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawConfig {
	playground: RawPlayground,
	preview: RawPreview,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
struct RawPlayground {
	debounce_ms: Option<u64>,
	stylesheet: Option<String>,
	body_class: Option<String>,
	container_class: Option<String>,
	export_name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawPreview {
	listen: Option<SocketAddr>,
	sandbox: Option<Vec<String>>,
}

impl Config {
	/// Parses a TOML string, filling unset keys with defaults.
	pub fn parse(input: &str) -> Result<Self> {
		let raw: RawConfig = toml::from_str(input)?;
		let mut config = Config::default();

		let playground = &mut config.playground;
		if let Some(ms) = raw.playground.debounce_ms {
			playground.debounce = Duration::from_millis(ms);
		}
		if let Some(stylesheet) = raw.playground.stylesheet {
			if stylesheet.trim().is_empty() {
				return Err(ConfigError::EmptyStylesheet);
			}
			playground.stylesheet = stylesheet;
		}
		if let Some(class) = raw.playground.body_class {
			playground.body_class = class;
		}
		if let Some(class) = raw.playground.container_class {
			playground.container_class = class;
		}
		if let Some(name) = raw.playground.export_name {
			playground.export_name = validate_export_name(name)?;
		}

		if let Some(listen) = raw.preview.listen {
			config.preview.listen = listen;
		}
		if let Some(tokens) = raw.preview.sandbox {
			config.preview.sandbox = SandboxPolicy::from_tokens(tokens)?;
		}

		Ok(config)
	}

	/// Loads configuration from a file.
	pub fn load(path: impl AsRef<Path>) -> Result<Self> {
		let path = path.as_ref();
		let content = std::fs::read_to_string(path).map_err(|error| ConfigError::Io {
			path: path.to_path_buf(),
			error,
		})?;
		Self::parse(&content)
	}

	/// Loads the explicit path if given, else the user config file if it
	/// exists, else defaults.
	pub fn load_or_default(explicit: Option<&Path>) -> Result<Self> {
		if let Some(path) = explicit {
			return Self::load(path);
		}
		match default_config_path() {
			Some(path) if path.is_file() => Self::load(path),
			_ => Ok(Self::default()),
		}
	}
}

/// Location of the per-user config file.
pub fn default_config_path() -> Option<PathBuf> {
	dirs::config_dir().map(|dir| dir.join("easel").join("config.toml"))
}

fn validate_export_name(name: String) -> Result<String> {
	let trimmed = name.trim();
	if trimmed.is_empty() || trimmed.contains(['/', '\\']) || trimmed == "." || trimmed == ".." {
		return Err(ConfigError::InvalidExportName(name));
	}
	Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests;
