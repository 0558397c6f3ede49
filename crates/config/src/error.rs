//! Error types for configuration parsing.

use std::path::PathBuf;

use easel_primitives::SandboxFlagError;
use thiserror::Error;

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error parsing TOML syntax or schema.
	#[error("TOML parse error: {0}")]
	Toml(#[from] toml::de::Error),

	/// Error reading a configuration file.
	#[error("I/O error reading {path}: {error}")]
	Io {
		/// Path to the file that failed to read.
		path: PathBuf,
		/// The underlying I/O error.
		error: std::io::Error,
	},

	/// A sandbox flag was forbidden or unknown.
	#[error("invalid preview sandbox: {0}")]
	Sandbox(#[from] SandboxFlagError),

	/// The export file name is empty or contains a path separator.
	#[error("invalid export name '{0}' (expected a bare file name such as playground.html)")]
	InvalidExportName(String),

	/// The stylesheet href is empty.
	#[error("stylesheet href must not be empty")]
	EmptyStylesheet,
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
