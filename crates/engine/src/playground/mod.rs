//! Playground session: buffers, renderer and notices for one mounting.
//!
//! [`Playground`] is synchronous and takes `now` explicitly. [`spawn_playground`]
//! runs it as a single tokio task so every operation is handled on one queue.

mod actor;

use std::time::{Duration, Instant};

use easel_config::PlaygroundConfig;
use easel_primitives::SourceKind;
use easel_worker::Generation;
use thiserror::Error;
use tracing::{debug, info};

pub use self::actor::{PlaygroundHandle, spawn_playground};
use crate::buffer::{EditorSnapshot, EditorState};
use crate::clipboard::{Clipboard, ClipboardError};
use crate::compose::{ComposeOptions, ComposedDocument, Composer};
use crate::export::{ExportArtifact, export_document};
use crate::notifications::{Notice, NoticeCenter};
use crate::preview::PreviewHost;
use crate::render::{DebouncedRenderer, RenderPhase, RenderReport, RenderStats};
use crate::seed::SeedContent;

/// Errors returned through a [`PlaygroundHandle`].
#[derive(Debug, Error)]
pub enum PlaygroundError {
	/// The playground task has stopped.
	#[error("playground has stopped")]
	Stopped,
	#[error(transparent)]
	Clipboard(#[from] ClipboardError),
}

/// Per-session settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaygroundOptions {
	pub compose: ComposeOptions,
	pub debounce: Duration,
	pub export_name: String,
}

impl Default for PlaygroundOptions {
	fn default() -> Self {
		Self::from(&PlaygroundConfig::default())
	}
}

impl From<&PlaygroundConfig> for PlaygroundOptions {
	fn from(config: &PlaygroundConfig) -> Self {
		Self {
			compose: ComposeOptions::from(config),
			debounce: config.debounce,
			export_name: config.export_name.clone(),
		}
	}
}

/// Point-in-time view of a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaygroundStatus {
	pub editor: EditorSnapshot,
	pub dirty: bool,
	pub phase: RenderPhase,
	pub stats: RenderStats,
	pub generation: Option<Generation>,
}

pub struct Playground<H> {
	state: EditorState,
	renderer: DebouncedRenderer<H>,
	notices: NoticeCenter,
	seeds: SeedContent,
	export_name: String,
}

impl<H: PreviewHost> Playground<H> {
	/// Creates a session seeded from `seeds`. Nothing is rendered until the
	/// first edit, [`run_now`](Self::run_now) or [`mount`](Self::mount).
	pub fn new(options: PlaygroundOptions, seeds: SeedContent, host: H) -> Self {
		let state = EditorState::new(&seeds);
		let renderer = DebouncedRenderer::new(Composer::new(options.compose), options.debounce, host);
		Self {
			state,
			renderer,
			notices: NoticeCenter::new(),
			seeds,
			export_name: options.export_name,
		}
	}

	/// Schedules the first render of the seed content.
	pub fn mount(&mut self, now: Instant) {
		info!(window_ms = self.renderer.window().as_millis() as u64, "playground.mount");
		self.renderer.on_edit(now);
	}

	/// Replaces one buffer and (re)starts the idle window.
	pub fn edit(&mut self, kind: SourceKind, text: impl Into<String>, now: Instant) {
		let changed = self.state.set_buffer(kind, text);
		debug!(%kind, changed, revision = self.state.revision(), "playground.edit");
		self.renderer.on_edit(now);
	}

	pub fn set_active_tab(&mut self, kind: SourceKind) {
		debug!(%kind, "playground.tab");
		self.state.set_active_tab(kind);
	}

	/// Restores the seed content and schedules a render.
	pub fn reset(&mut self, now: Instant) {
		info!("playground.reset");
		self.state.reset(&self.seeds);
		self.renderer.on_edit(now);
	}

	/// Fires a due render, if any.
	pub fn poll(&mut self, now: Instant) -> Option<RenderReport> {
		let report = self.renderer.poll(now, &mut self.state)?;
		self.note_render(&report);
		Some(report)
	}

	/// Cancels any pending render and publishes now.
	pub fn run_now(&mut self) -> RenderReport {
		let report = self.renderer.run_now(&mut self.state);
		self.note_render(&report);
		report
	}

	fn note_render(&mut self, report: &RenderReport) {
		if let Err(err) = &report.outcome {
			self.notices.push(Notice::warn(format!("Preview was not updated: {err}")));
		}
	}

	/// Packages the current buffers as a download, whether or not they were
	/// rendered yet.
	pub fn export(&self) -> ExportArtifact {
		export_document(&self.compose_current(), &self.export_name)
	}

	pub fn compose_current(&self) -> ComposedDocument {
		self.renderer.compose_current(&self.state)
	}

	/// Raw text of `kind` for the clipboard.
	pub fn clipboard_text(&self, kind: SourceKind) -> String {
		self.state.content(kind).to_string()
	}

	/// Records the outcome of a copy, turning failures into notices.
	pub fn finish_copy(&mut self, kind: SourceKind, result: Result<(), ClipboardError>) -> Result<(), ClipboardError> {
		match &result {
			Ok(()) => self.notices.push(Notice::info(format!("Copied {} to clipboard", kind.label()))),
			Err(err) => self.notices.push(Notice::error(format!("Copy failed: {err}"))),
		}
		result
	}

	/// Copies the raw content of `kind` (not the composed document).
	pub fn copy_buffer(&mut self, kind: SourceKind, clipboard: &dyn Clipboard) -> Result<(), ClipboardError> {
		let result = clipboard.set_text(self.state.content(kind));
		self.finish_copy(kind, result)
	}

	/// Copies the raw content of the active tab.
	pub fn copy_active(&mut self, clipboard: &dyn Clipboard) -> Result<(), ClipboardError> {
		self.copy_buffer(self.state.active_tab(), clipboard)
	}

	/// Deadline of the pending render, if one is scheduled.
	pub fn next_deadline(&self) -> Option<Instant> {
		self.renderer.deadline()
	}

	pub fn status(&self) -> PlaygroundStatus {
		PlaygroundStatus {
			editor: self.state.snapshot(),
			dirty: self.state.is_dirty(),
			phase: self.renderer.phase(),
			stats: self.renderer.stats(),
			generation: self.renderer.last_generation(),
		}
	}

	pub fn state(&self) -> &EditorState {
		&self.state
	}

	pub fn notices_mut(&mut self) -> &mut NoticeCenter {
		&mut self.notices
	}

	pub fn renderer(&self) -> &DebouncedRenderer<H> {
		&self.renderer
	}

	pub fn into_host(self) -> H {
		self.renderer.into_host()
	}
}
