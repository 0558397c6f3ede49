use std::sync::Arc;

use easel_engine::{ComposedDocument, PreviewError, PreviewHost, SandboxPolicy};
use easel_worker::{CancellationToken, Generation, GenerationClock};
use parking_lot::RwLock;
use tokio::sync::broadcast;
use tracing::debug;

use crate::site::PreviewSite;

const EVENT_CAPACITY: usize = 16;

/// The generation currently on display.
#[derive(Debug, Clone)]
pub(crate) struct Current {
	pub(crate) generation: Generation,
	pub(crate) document: ComposedDocument,
}

/// State shared between the render path and HTTP handlers.
pub(crate) struct Shared {
	pub(crate) current: RwLock<Option<Current>>,
	pub(crate) events: broadcast::Sender<Generation>,
	pub(crate) sandbox: SandboxPolicy,
	pub(crate) export_name: String,
	pub(crate) closing: CancellationToken,
}

impl Shared {
	pub(crate) fn current(&self) -> Option<Current> {
		self.current.read().clone()
	}

	pub(crate) fn current_generation(&self) -> Option<Generation> {
		self.current.read().as_ref().map(|c| c.generation)
	}
}

/// Preview host that publishes each document as a new HTTP generation.
pub struct ServedPreview {
	shared: Arc<Shared>,
	clock: GenerationClock,
}

impl ServedPreview {
	pub fn new(sandbox: SandboxPolicy, export_name: impl Into<String>) -> Self {
		let (events, _) = broadcast::channel(EVENT_CAPACITY);
		Self {
			shared: Arc::new(Shared {
				current: RwLock::new(None),
				events,
				sandbox,
				export_name: export_name.into(),
				closing: CancellationToken::new(),
			}),
			clock: GenerationClock::new(),
		}
	}

	/// Read side serving this host's generations.
	pub fn site(&self) -> PreviewSite {
		PreviewSite::new(Arc::clone(&self.shared))
	}
}

impl PreviewHost for ServedPreview {
	fn render(&mut self, document: &ComposedDocument) -> Result<Generation, PreviewError> {
		if self.shared.closing.is_cancelled() {
			return Err(PreviewError::Closed);
		}

		let generation = self.clock.next();
		let retired = self
			.shared
			.current
			.write()
			.replace(Current {
				generation,
				document: document.clone(),
			})
			.map(|c| c.generation);

		// No subscribers is fine: the host page picks the generation up on load.
		let listeners = self.shared.events.send(generation).unwrap_or(0);
		debug!(
			generation = generation.get(),
			retired = retired.map(Generation::get),
			listeners,
			bytes = document.len(),
			"preview.generation"
		);
		Ok(generation)
	}
}
