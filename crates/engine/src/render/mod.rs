//! Debounced renderer.
//!
//! [`RenderSchedule`] is the two-state machine behind preview updates:
//!
//! ```text
//!            edit (cancel + new deadline)
//!          ┌───────────────┐
//!          ▼               │
//!  Idle ──edit──▶ Pending(deadline) ──deadline reached──▶ compose + publish ──▶ Idle
//!                          │
//!                          └──run now──▶ cancel, compose + publish ──▶ Idle
//! ```
//!
//! At most one deadline is outstanding. The schedule takes `now` as an
//! argument and owns no timer; the playground actor turns the deadline into a
//! tokio sleep. Buffers are read when the deadline fires, not when it was set.

use std::time::{Duration, Instant};

use easel_worker::Generation;
use tracing::{debug, trace, warn};

use crate::buffer::EditorState;
use crate::compose::{ComposedDocument, Composer};
use crate::preview::{PreviewError, PreviewHost};

/// Current phase of the render schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderPhase {
	/// No pending work.
	Idle,
	/// A composition is scheduled to run at `deadline`.
	Pending { deadline: Instant },
}

/// Idle / Pending state machine with an explicit cancel.
#[derive(Debug, Clone)]
pub struct RenderSchedule {
	window: Duration,
	phase: RenderPhase,
}

impl RenderSchedule {
	pub fn new(window: Duration) -> Self {
		Self {
			window,
			phase: RenderPhase::Idle,
		}
	}

	pub fn window(&self) -> Duration {
		self.window
	}

	pub fn phase(&self) -> RenderPhase {
		self.phase
	}

	pub fn deadline(&self) -> Option<Instant> {
		match self.phase {
			RenderPhase::Idle => None,
			RenderPhase::Pending { deadline } => Some(deadline),
		}
	}

	/// Replaces any pending deadline with `now + window`.
	pub fn schedule(&mut self, now: Instant) -> Instant {
		let deadline = now + self.window;
		if let RenderPhase::Pending { deadline: previous } = self.phase {
			trace!(pushed_by = ?deadline.saturating_duration_since(previous), "render.schedule.replace");
		}
		self.phase = RenderPhase::Pending { deadline };
		deadline
	}

	/// Drops the pending deadline. Returns whether one was pending.
	pub fn cancel(&mut self) -> bool {
		let was_pending = matches!(self.phase, RenderPhase::Pending { .. });
		self.phase = RenderPhase::Idle;
		was_pending
	}

	pub fn is_due(&self, now: Instant) -> bool {
		matches!(self.phase, RenderPhase::Pending { deadline } if now >= deadline)
	}

	/// Moves to Idle if the deadline has passed. Returns whether it fired.
	pub fn take_due(&mut self, now: Instant) -> bool {
		if self.is_due(now) {
			self.phase = RenderPhase::Idle;
			true
		} else {
			false
		}
	}
}

/// What caused a render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderTrigger {
	/// The idle window elapsed after the last edit.
	Debounce,
	/// An explicit run-now request.
	RunNow,
}

/// Counters for published and failed renders.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RenderStats {
	pub published: u64,
	pub failed: u64,
}

/// Result of one composition handed to the preview host.
#[derive(Debug)]
pub struct RenderReport {
	pub trigger: RenderTrigger,
	/// Editor revision the document was composed from.
	pub revision: u64,
	pub document: ComposedDocument,
	/// Generation of the new preview context, or why the host refused it.
	pub outcome: Result<Generation, PreviewError>,
}

impl RenderReport {
	pub fn generation(&self) -> Option<Generation> {
		self.outcome.as_ref().ok().copied()
	}
}

/// Owns the schedule and the preview host; the only writer to the host.
pub struct DebouncedRenderer<H> {
	composer: Composer,
	schedule: RenderSchedule,
	host: H,
	stats: RenderStats,
	last_generation: Option<Generation>,
	last_document: Option<ComposedDocument>,
}

impl<H: PreviewHost> DebouncedRenderer<H> {
	pub fn new(composer: Composer, window: Duration, host: H) -> Self {
		Self {
			composer,
			schedule: RenderSchedule::new(window),
			host,
			stats: RenderStats::default(),
			last_generation: None,
			last_document: None,
		}
	}

	/// Records an edit: cancels any pending render and schedules a new one.
	pub fn on_edit(&mut self, now: Instant) -> Instant {
		let deadline = self.schedule.schedule(now);
		trace!(window_ms = self.window().as_millis() as u64, "render.schedule");
		deadline
	}

	/// Fires the pending render if its deadline has passed.
	pub fn poll(&mut self, now: Instant, state: &mut EditorState) -> Option<RenderReport> {
		if !self.schedule.take_due(now) {
			return None;
		}
		Some(self.publish(state, RenderTrigger::Debounce))
	}

	/// Cancels any pending render and publishes the current buffers immediately.
	pub fn run_now(&mut self, state: &mut EditorState) -> RenderReport {
		if self.schedule.cancel() {
			debug!("render.run_now.cancelled_pending");
		}
		self.publish(state, RenderTrigger::RunNow)
	}

	/// Composes the current buffers without publishing them.
	pub fn compose_current(&self, state: &EditorState) -> ComposedDocument {
		self.composer.compose_state(state)
	}

	fn publish(&mut self, state: &mut EditorState, trigger: RenderTrigger) -> RenderReport {
		let document = self.composer.compose_state(state);
		let revision = state.revision();
		let outcome = self.host.render(&document);

		match &outcome {
			Ok(generation) => {
				self.stats.published += 1;
				self.last_generation = Some(*generation);
				self.last_document = Some(document.clone());
				state.mark_clean();
				debug!(?trigger, revision, generation = generation.get(), bytes = document.len(), "render.publish");
			}
			Err(err) => {
				self.stats.failed += 1;
				warn!(?trigger, revision, error = %err, "render.publish_failed");
			}
		}

		RenderReport {
			trigger,
			revision,
			document,
			outcome,
		}
	}

	pub fn phase(&self) -> RenderPhase {
		self.schedule.phase()
	}

	/// Idle window between the last edit and a render.
	pub fn window(&self) -> Duration {
		self.schedule.window()
	}

	pub fn deadline(&self) -> Option<Instant> {
		self.schedule.deadline()
	}

	pub fn stats(&self) -> RenderStats {
		self.stats
	}

	pub fn last_generation(&self) -> Option<Generation> {
		self.last_generation
	}

	/// The document currently shown by the host.
	pub fn last_document(&self) -> Option<&ComposedDocument> {
		self.last_document.as_ref()
	}

	pub fn composer(&self) -> &Composer {
		&self.composer
	}

	pub fn host(&self) -> &H {
		&self.host
	}

	pub fn host_mut(&mut self) -> &mut H {
		&mut self.host
	}

	pub fn into_host(self) -> H {
		self.host
	}
}
