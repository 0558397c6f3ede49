//! Line-oriented command prompt on stdin.

use std::path::Path;
use std::str::FromStr;

use easel_engine::{ParseSourceKindError, PlaygroundHandle, RenderPhase, SourceKind};
use easel_worker::TaskClass;
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::debug;

/// Terminator line for `edit` input.
const EDIT_END: &str = ".";

pub const HELP: &str = "\
commands:
  edit <html|css|js>   replace a buffer; end input with a line containing only '.'
  run                  render the current buffers now
  tab <html|css|js>    switch the active tab
  copy [html|css|js]   copy a buffer (default: active tab) to the clipboard
  export               write the composed document to the workspace directory
  reset                restore the sample content
  status               show buffers and render state
  notices              show and dismiss pending notices
  quit                 stop the playground";

/// One parsed prompt line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptCommand {
	Edit(SourceKind),
	Run,
	Tab(SourceKind),
	Copy(Option<SourceKind>),
	Export,
	Reset,
	Status,
	Notices,
	Help,
	Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PromptError {
	#[error("unknown command '{0}' (try 'help')")]
	Unknown(String),
	#[error("'{0}' needs a source: html, css or js")]
	MissingSource(&'static str),
	#[error("'{0}' takes no arguments")]
	UnexpectedArgument(&'static str),
	#[error(transparent)]
	Source(#[from] ParseSourceKindError),
}

impl FromStr for PromptCommand {
	type Err = PromptError;

	fn from_str(line: &str) -> Result<Self, Self::Err> {
		let mut words = line.split_whitespace();
		let name = words.next().unwrap_or_default();
		let arg = words.next();
		if words.next().is_some() {
			return Err(PromptError::Unknown(line.trim().to_string()));
		}

		let required = |name: &'static str| -> Result<SourceKind, PromptError> {
			Ok(arg.ok_or(PromptError::MissingSource(name))?.parse()?)
		};
		let bare = |name: &'static str, command: PromptCommand| match arg {
			Some(_) => Err(PromptError::UnexpectedArgument(name)),
			None => Ok(command),
		};

		match name {
			"edit" | "e" => Ok(Self::Edit(required("edit")?)),
			"tab" | "t" => Ok(Self::Tab(required("tab")?)),
			"copy" | "c" => Ok(Self::Copy(arg.map(str::parse).transpose()?)),
			"run" | "r" => bare("run", Self::Run),
			"export" | "x" => bare("export", Self::Export),
			"reset" => bare("reset", Self::Reset),
			"status" | "s" => bare("status", Self::Status),
			"notices" | "n" => bare("notices", Self::Notices),
			"help" | "?" => bare("help", Self::Help),
			"quit" | "q" | "exit" => bare("quit", Self::Quit),
			other => Err(PromptError::Unknown(other.to_string())),
		}
	}
}

/// Forwards stdin lines from a dedicated thread.
///
/// Runtime shutdown does not wait on this thread.
pub fn stdin_lines() -> mpsc::UnboundedReceiver<String> {
	let (tx, rx) = mpsc::unbounded_channel();
	let spawned = easel_worker::spawn_named_thread(TaskClass::IoBlocking, "easel-stdin", move || {
		for line in std::io::stdin().lines() {
			let Ok(line) = line else { break };
			if tx.send(line).is_err() {
				break;
			}
		}
	});
	if let Err(err) = spawned {
		tracing::warn!(error = %err, "prompt.stdin_thread_failed");
	}
	rx
}

/// Reads `edit` input up to the terminator line or end of input.
pub async fn read_edit_body(lines: &mut mpsc::UnboundedReceiver<String>) -> String {
	let mut body = String::new();
	while let Some(line) = lines.recv().await {
		if line == EDIT_END {
			break;
		}
		body.push_str(&line);
		body.push('\n');
	}
	body
}

/// Why the prompt stopped reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptExit {
	/// `quit` was entered.
	Quit,
	/// Input closed, e.g. stdin redirected from `/dev/null`.
	EndOfInput,
}

/// Runs the prompt until `quit` or end of input.
pub async fn run(
	mut lines: mpsc::UnboundedReceiver<String>,
	handle: &PlaygroundHandle,
	export_dir: &Path,
) -> anyhow::Result<PromptExit> {
	while let Some(line) = lines.recv().await {
		if line.trim().is_empty() {
			continue;
		}
		let command = match line.parse::<PromptCommand>() {
			Ok(command) => command,
			Err(err) => {
				println!("{err}");
				continue;
			}
		};
		debug!(?command, "prompt.command");

		match command {
			PromptCommand::Edit(kind) => {
				println!("editing {} (end with '{EDIT_END}')", kind.label());
				let body = read_edit_body(&mut lines).await;
				handle.edit(kind, body)?;
			}
			PromptCommand::Run => {
				let report = handle.run_now().await?;
				match report.outcome {
					Ok(generation) => println!("rendered generation {generation}"),
					Err(err) => println!("render failed: {err}"),
				}
			}
			PromptCommand::Tab(kind) => handle.set_active_tab(kind)?,
			PromptCommand::Copy(kind) => match handle.copy(kind).await {
				Ok(()) => println!("copied"),
				Err(err) => println!("{err}"),
			},
			PromptCommand::Export => {
				let artifact = handle.export().await?;
				match artifact.write_to(export_dir) {
					Ok(path) => println!("wrote {}", path.display()),
					Err(err) => println!("{err}"),
				}
			}
			PromptCommand::Reset => handle.reset()?,
			PromptCommand::Status => {
				let status = handle.status().await?;
				let editor = &status.editor;
				println!(
					"tab {} | revision {} | html {}B css {}B js {}B",
					editor.active_tab.label(),
					editor.revision,
					editor.markup.len(),
					editor.style.len(),
					editor.script.len()
				);
				let phase = match status.phase {
					RenderPhase::Idle => "idle",
					RenderPhase::Pending { .. } => "pending",
				};
				let generation = status.generation.map_or_else(|| "none".to_string(), |g| g.to_string());
				println!(
					"render {phase} | generation {generation} | published {} failed {}{}",
					status.stats.published,
					status.stats.failed,
					if status.dirty { " | unrendered edits" } else { "" }
				);
			}
			PromptCommand::Notices => {
				let notices = handle.take_notices().await?;
				if notices.is_empty() {
					println!("no notices");
				}
				for notice in notices {
					println!("{notice}");
				}
			}
			PromptCommand::Help => println!("{HELP}"),
			PromptCommand::Quit => return Ok(PromptExit::Quit),
		}
	}
	Ok(PromptExit::EndOfInput)
}
