use easel_worker::Generation;
use thiserror::Error;

use crate::compose::ComposedDocument;

/// Errors reported by a preview host when it cannot take a new document.
///
/// Script or markup errors inside the document never show up here; they stay
/// inside the sandboxed context.
#[derive(Debug, Error)]
pub enum PreviewError {
	/// The host has shut down and accepts no more documents.
	#[error("preview host is closed")]
	Closed,
	/// The host refused the document.
	#[error("preview host rejected the document: {0}")]
	Rejected(String),
	/// I/O failure while handing the document over.
	#[error("preview I/O error: {0}")]
	Io(#[from] std::io::Error),
}

/// A surface that runs composed documents in an isolated execution context.
///
/// Implementations must guarantee that:
/// - scripts run, but with no access to the host's storage, cookies or
///   top-level navigation;
/// - each call to [`render`](Self::render) discards the previous context
///   entirely (timers, listeners, globals), so nothing survives an update;
/// - a broken document only breaks its own context.
pub trait PreviewHost: Send + 'static {
	/// Replaces the current execution context with a fresh one hosting
	/// `document`, returning the generation of the new context.
	fn render(&mut self, document: &ComposedDocument) -> Result<Generation, PreviewError>;
}

impl<H: PreviewHost + ?Sized> PreviewHost for Box<H> {
	fn render(&mut self, document: &ComposedDocument) -> Result<Generation, PreviewError> {
		(**self).render(document)
	}
}
