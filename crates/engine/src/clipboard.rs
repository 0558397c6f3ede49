use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClipboardError {
	/// No clipboard tool was found on `PATH`.
	#[error("no clipboard tool found (tried wl-copy, xclip, xsel, pbcopy, clip.exe)")]
	Unavailable,
	#[error("failed to run {program}: {error}")]
	Spawn { program: String, error: std::io::Error },
	#[error("{program} exited with {status}")]
	Failed {
		program: String,
		status: std::process::ExitStatus,
	},
	/// The blocking copy task did not complete.
	#[error("clipboard task failed: {0}")]
	Task(String),
}

/// Destination for copied buffer text.
pub trait Clipboard: Send + Sync {
	fn set_text(&self, text: &str) -> Result<(), ClipboardError>;
}

/// Known clipboard tools in probe order, with the arguments that make them
/// read the new contents from stdin.
const PROVIDERS: &[(&str, &[&str])] = &[
	("wl-copy", &[]),
	("xclip", &["-selection", "clipboard"]),
	("xsel", &["--clipboard", "--input"]),
	("pbcopy", &[]),
	("clip.exe", &[]),
];

#[derive(Debug, Clone)]
struct Provider {
	program: PathBuf,
	args: Vec<String>,
}

/// System clipboard backed by a platform command-line tool.
#[derive(Debug, Clone, Default)]
pub struct SystemClipboard {
	provider: Option<Provider>,
}

impl SystemClipboard {
	/// Probes `PATH` for a supported tool. Copying fails with
	/// [`ClipboardError::Unavailable`] when none is found.
	pub fn detect() -> Self {
		let provider = PROVIDERS.iter().find_map(|(name, args)| {
			which::which(name).ok().map(|program| Provider {
				program,
				args: args.iter().map(|a| a.to_string()).collect(),
			})
		});
		match &provider {
			Some(p) => tracing::debug!(program = %p.program.display(), "clipboard.detect"),
			None => tracing::debug!("clipboard.detect.none"),
		}
		Self { provider }
	}

	/// Uses an explicit command that reads the clipboard text from stdin.
	pub fn with_command(program: impl Into<PathBuf>, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
		Self {
			provider: Some(Provider {
				program: program.into(),
				args: args.into_iter().map(Into::into).collect(),
			}),
		}
	}

	pub fn is_available(&self) -> bool {
		self.provider.is_some()
	}
}

impl Clipboard for SystemClipboard {
	/// Waits only for the tool itself. Tools that fork a child to keep
	/// serving the selection get no inherited pipes besides stdin.
	fn set_text(&self, text: &str) -> Result<(), ClipboardError> {
		let provider = self.provider.as_ref().ok_or(ClipboardError::Unavailable)?;
		let program = provider.program.display().to_string();

		let mut child = Command::new(&provider.program)
			.args(&provider.args)
			.stdin(Stdio::piped())
			.stdout(Stdio::null())
			.stderr(Stdio::null())
			.spawn()
			.map_err(|error| ClipboardError::Spawn {
				program: program.clone(),
				error,
			})?;

		if let Some(mut stdin) = child.stdin.take() {
			let written = stdin.write_all(text.as_bytes());
			drop(stdin);
			if let Err(error) = written {
				let _ = child.kill();
				let _ = child.wait();
				return Err(ClipboardError::Spawn { program, error });
			}
		}

		let status = child.wait().map_err(|error| ClipboardError::Spawn {
			program: program.clone(),
			error,
		})?;
		if !status.success() {
			return Err(ClipboardError::Failed { program, status });
		}

		tracing::debug!(program = %program, bytes = text.len(), "clipboard.copy");
		Ok(())
	}
}
