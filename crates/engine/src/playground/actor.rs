use std::sync::Arc;

use easel_primitives::SourceKind;
use easel_worker::{CancellationToken, TaskClass};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::Instant as TokioInstant;
use tracing::{debug, trace};

use super::{Playground, PlaygroundError, PlaygroundStatus};
use crate::clipboard::{Clipboard, ClipboardError};
use crate::export::ExportArtifact;
use crate::notifications::Notice;
use crate::preview::PreviewHost;
use crate::render::RenderReport;

enum Command {
	Edit { kind: SourceKind, text: String },
	SetActiveTab(SourceKind),
	Reset,
	RunNow { reply: oneshot::Sender<RenderReport> },
	Export { reply: oneshot::Sender<ExportArtifact> },
	Copy {
		kind: Option<SourceKind>,
		reply: oneshot::Sender<Result<(), ClipboardError>>,
	},
	Status { reply: oneshot::Sender<PlaygroundStatus> },
	TakeNotices { reply: oneshot::Sender<Vec<Notice>> },
}

/// Outcome of a copy running off the actor loop.
struct CopyDone {
	kind: SourceKind,
	result: Result<(), ClipboardError>,
	reply: oneshot::Sender<Result<(), ClipboardError>>,
}

/// Cloneable front door to a running playground.
///
/// All calls enqueue onto the playground's single command queue, so they are
/// applied in the order they were made.
#[derive(Clone)]
pub struct PlaygroundHandle {
	tx: mpsc::UnboundedSender<Command>,
	cancel: CancellationToken,
}

impl std::fmt::Debug for PlaygroundHandle {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("PlaygroundHandle")
			.field("stopped", &self.tx.is_closed())
			.finish()
	}
}

impl PlaygroundHandle {
	fn send(&self, cmd: Command) -> Result<(), PlaygroundError> {
		self.tx.send(cmd).map_err(|_| PlaygroundError::Stopped)
	}

	async fn request<T>(&self, make: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T, PlaygroundError> {
		let (reply, rx) = oneshot::channel();
		self.send(make(reply))?;
		rx.await.map_err(|_| PlaygroundError::Stopped)
	}

	/// Replaces the content of one buffer.
	pub fn edit(&self, kind: SourceKind, text: impl Into<String>) -> Result<(), PlaygroundError> {
		self.send(Command::Edit { kind, text: text.into() })
	}

	pub fn set_active_tab(&self, kind: SourceKind) -> Result<(), PlaygroundError> {
		self.send(Command::SetActiveTab(kind))
	}

	/// Restores the seed content.
	pub fn reset(&self) -> Result<(), PlaygroundError> {
		self.send(Command::Reset)
	}

	/// Cancels any pending render and renders the current buffers immediately.
	pub async fn run_now(&self) -> Result<RenderReport, PlaygroundError> {
		self.request(|reply| Command::RunNow { reply }).await
	}

	/// Packages the current buffers as a downloadable document.
	pub async fn export(&self) -> Result<ExportArtifact, PlaygroundError> {
		self.request(|reply| Command::Export { reply }).await
	}

	/// Copies the raw content of `kind`, or of the active tab when `None`.
	pub async fn copy(&self, kind: Option<SourceKind>) -> Result<(), PlaygroundError> {
		self.request(|reply| Command::Copy { kind, reply }).await??;
		Ok(())
	}

	pub async fn status(&self) -> Result<PlaygroundStatus, PlaygroundError> {
		self.request(|reply| Command::Status { reply }).await
	}

	/// Drains pending notices.
	pub async fn take_notices(&self) -> Result<Vec<Notice>, PlaygroundError> {
		self.request(|reply| Command::TakeNotices { reply }).await
	}

	/// Stops the playground task. Pending renders are dropped.
	pub fn shutdown(&self) {
		self.cancel.cancel();
	}

	pub fn is_stopped(&self) -> bool {
		self.tx.is_closed()
	}
}

/// Runs `playground` as a task and returns its handle.
///
/// The seed content is scheduled for a first render right away. The join
/// handle yields the playground back after shutdown.
pub fn spawn_playground<H: PreviewHost>(
	mut playground: Playground<H>,
	clipboard: Arc<dyn Clipboard>,
) -> (PlaygroundHandle, JoinHandle<Playground<H>>) {
	let (tx, rx) = mpsc::unbounded_channel();
	let (copies_tx, copies) = mpsc::unbounded_channel();
	let cancel = CancellationToken::new();
	playground.mount(now());

	let actor = PlaygroundActor {
		playground,
		clipboard,
		rx,
		copies_tx,
		copies,
		cancel: cancel.clone(),
	};
	let join = easel_worker::spawn(TaskClass::Interactive, actor.run());
	(PlaygroundHandle { tx, cancel }, join)
}

fn now() -> std::time::Instant {
	TokioInstant::now().into_std()
}

struct PlaygroundActor<H> {
	playground: Playground<H>,
	clipboard: Arc<dyn Clipboard>,
	rx: mpsc::UnboundedReceiver<Command>,
	copies_tx: mpsc::UnboundedSender<CopyDone>,
	copies: mpsc::UnboundedReceiver<CopyDone>,
	cancel: CancellationToken,
}

impl<H: PreviewHost> PlaygroundActor<H> {
	async fn run(mut self) -> Playground<H> {
		debug!("playground.actor.start");
		loop {
			let deadline = self.playground.next_deadline();
			let sleep = tokio::time::sleep_until(deadline.map(TokioInstant::from_std).unwrap_or_else(TokioInstant::now));

			tokio::select! {
				biased;
				_ = self.cancel.cancelled() => break,
				cmd = self.rx.recv() => match cmd {
					Some(cmd) => self.handle(cmd),
					None => break,
				},
				Some(done) = self.copies.recv() => {
					let _ = done.reply.send(self.playground.finish_copy(done.kind, done.result));
				}
				_ = sleep, if deadline.is_some() => {
					self.playground.poll(now());
				}
			}
		}
		self.rx.close();
		debug!("playground.actor.stop");
		self.playground
	}

	fn handle(&mut self, cmd: Command) {
		match cmd {
			Command::Edit { kind, text } => self.playground.edit(kind, text, now()),
			Command::SetActiveTab(kind) => self.playground.set_active_tab(kind),
			Command::Reset => self.playground.reset(now()),
			Command::RunNow { reply } => {
				let _ = reply.send(self.playground.run_now());
			}
			Command::Export { reply } => {
				let _ = reply.send(self.playground.export());
			}
			Command::Copy { kind, reply } => {
				let kind = kind.unwrap_or_else(|| self.playground.state().active_tab());
				let text = self.playground.clipboard_text(kind);
				let clipboard = Arc::clone(&self.clipboard);
				let done = self.copies_tx.clone();
				trace!(%kind, bytes = text.len(), "playground.copy");
				// The clipboard tool runs on the blocking pool; the loop keeps
				// serving commands and the render deadline meanwhile.
				easel_worker::spawn(TaskClass::Background, async move {
					let result = easel_worker::spawn_blocking(TaskClass::IoBlocking, move || clipboard.set_text(&text))
						.await
						.unwrap_or_else(|err| Err(ClipboardError::Task(err.to_string())));
					let _ = done.send(CopyDone { kind, result, reply });
				});
			}
			Command::Status { reply } => {
				let _ = reply.send(self.playground.status());
			}
			Command::TakeNotices { reply } => {
				let _ = reply.send(self.playground.notices_mut().take_pending());
			}
		}
	}
}
