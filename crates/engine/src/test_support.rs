use std::sync::Arc;

use easel_worker::{Generation, GenerationClock};
use parking_lot::Mutex;

use crate::clipboard::{Clipboard, ClipboardError};
use crate::compose::ComposedDocument;
use crate::preview::{PreviewError, PreviewHost};

/// Preview host that records every document it is given.
#[derive(Clone, Default)]
pub(crate) struct RecordingHost {
	clock: GenerationClock,
	rendered: Arc<Mutex<Vec<ComposedDocument>>>,
	fail_next: Arc<Mutex<bool>>,
}

impl RecordingHost {
	pub(crate) fn rendered(&self) -> Vec<ComposedDocument> {
		self.rendered.lock().clone()
	}

	pub(crate) fn render_count(&self) -> usize {
		self.rendered.lock().len()
	}

	pub(crate) fn fail_next(&self) {
		*self.fail_next.lock() = true;
	}
}

impl PreviewHost for RecordingHost {
	fn render(&mut self, document: &ComposedDocument) -> Result<Generation, PreviewError> {
		if std::mem::take(&mut *self.fail_next.lock()) {
			return Err(PreviewError::Rejected("test failure".into()));
		}
		self.rendered.lock().push(document.clone());
		Ok(self.clock.next())
	}
}

/// Clipboard that stores copied text, or refuses every copy.
#[derive(Clone, Default)]
pub(crate) struct MemoryClipboard {
	pub(crate) copied: Arc<Mutex<Vec<String>>>,
	pub(crate) deny: bool,
}

impl Clipboard for MemoryClipboard {
	fn set_text(&self, text: &str) -> Result<(), ClipboardError> {
		if self.deny {
			return Err(ClipboardError::Unavailable);
		}
		self.copied.lock().push(text.to_string());
		Ok(())
	}
}
