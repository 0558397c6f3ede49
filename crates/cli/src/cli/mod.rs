use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use easel_config::Config;

#[derive(Parser, Debug)]
#[command(name = "easel")]
#[command(about = "Live HTML/CSS/JS playground with a sandboxed preview")]
#[command(version)]
/// Command-line arguments.
pub struct Cli {
	/// Config file (defaults to the user config directory)
	#[arg(long, short = 'c', value_name = "PATH", global = true)]
	pub config: Option<PathBuf>,

	/// Address for the preview server, overrides `[preview] listen`
	#[arg(long, value_name = "ADDR")]
	pub listen: Option<SocketAddr>,

	/// Idle time before re-rendering, overrides `[playground] debounce-ms`
	#[arg(long, value_name = "MS")]
	pub debounce_ms: Option<u64>,

	/// Workspace directory with index.html, style.css and script.js to watch
	#[arg(long, short = 'd', value_name = "DIR")]
	pub dir: Option<PathBuf>,

	/// Open the preview in the default browser
	#[arg(long)]
	pub open: bool,

	/// Verbose logging
	#[arg(long, short = 'v', global = true)]
	pub verbose: bool,

	/// Subcommand to execute (defaults to serving the playground).
	#[command(subcommand)]
	pub command: Option<Command>,
}

/// Available subcommands.
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
	/// Serve the playground (default)
	Serve,
	/// Write the sample sources into a workspace directory
	Init {
		/// Target directory
		#[arg(default_value = ".")]
		dir: PathBuf,
		/// Overwrite existing files
		#[arg(long)]
		force: bool,
	},
	/// Compose a workspace directory once and write the export file
	Export {
		/// Workspace directory
		#[arg(default_value = ".")]
		dir: PathBuf,
		/// Output directory (defaults to the workspace directory)
		#[arg(long, short = 'o', value_name = "DIR")]
		out: Option<PathBuf>,
	},
}

impl Cli {
	/// Applies command-line overrides on top of the loaded config.
	pub fn apply_overrides(&self, config: &mut Config) {
		if let Some(listen) = self.listen {
			config.preview.listen = listen;
		}
		if let Some(ms) = self.debounce_ms {
			config.playground.debounce = Duration::from_millis(ms);
		}
	}

	/// Directory exports are written to from the prompt.
	pub fn export_dir(&self) -> PathBuf {
		self.dir.clone().unwrap_or_else(|| PathBuf::from("."))
	}
}
