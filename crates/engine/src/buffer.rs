//! Buffer store: the three editable sources and the active tab.
//!
//! Pure state. Input is stored verbatim; malformed markup or scripts are the
//! preview host's concern.

use easel_primitives::SourceKind;

use crate::seed::SeedContent;

/// One editable source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceBuffer {
	kind: SourceKind,
	content: String,
}

impl SourceBuffer {
	fn new(kind: SourceKind, content: String) -> Self {
		Self { kind, content }
	}

	pub fn kind(&self) -> SourceKind {
		self.kind
	}

	pub fn label(&self) -> &'static str {
		self.kind.label()
	}

	pub fn content(&self) -> &str {
		&self.content
	}
}

/// Owned copy of the editor contents at one point in time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorSnapshot {
	pub markup: String,
	pub style: String,
	pub script: String,
	pub active_tab: SourceKind,
	pub revision: u64,
}

/// The three buffers of one playground session plus the active tab.
///
/// Exactly one buffer is active for editing; the others stay in memory.
#[derive(Debug, Clone)]
pub struct EditorState {
	buffers: [SourceBuffer; 3],
	active: SourceKind,
	dirty: bool,
	revision: u64,
}

impl EditorState {
	/// Creates a state seeded from `seeds` with the markup tab active.
	pub fn new(seeds: &SeedContent) -> Self {
		Self {
			buffers: SourceKind::ALL.map(|kind| SourceBuffer::new(kind, seeds.get(kind).to_string())),
			active: SourceKind::Markup,
			dirty: false,
			revision: 0,
		}
	}

	/// Replaces the content of `kind` and marks the state dirty.
	///
	/// Returns whether the text differed from the previous content.
	pub fn set_buffer(&mut self, kind: SourceKind, text: impl Into<String>) -> bool {
		let text = text.into();
		let buffer = &mut self.buffers[kind.index()];
		let changed = buffer.content != text;
		buffer.content = text;
		self.dirty = true;
		self.revision += 1;
		changed
	}

	/// Switches the buffer presented for editing. Content is untouched.
	pub fn set_active_tab(&mut self, kind: SourceKind) {
		self.active = kind;
	}

	/// Restores every buffer to `seeds` and marks the state dirty.
	pub fn reset(&mut self, seeds: &SeedContent) {
		for kind in SourceKind::ALL {
			self.buffers[kind.index()].content = seeds.get(kind).to_string();
		}
		self.dirty = true;
		self.revision += 1;
	}

	pub fn buffer(&self, kind: SourceKind) -> &SourceBuffer {
		&self.buffers[kind.index()]
	}

	pub fn content(&self, kind: SourceKind) -> &str {
		self.buffer(kind).content()
	}

	pub fn active_tab(&self) -> SourceKind {
		self.active
	}

	pub fn active_buffer(&self) -> &SourceBuffer {
		self.buffer(self.active)
	}

	/// True when an edit happened since the last [`mark_clean`](Self::mark_clean).
	pub fn is_dirty(&self) -> bool {
		self.dirty
	}

	pub fn mark_clean(&mut self) {
		self.dirty = false;
	}

	/// Number of edits and resets applied so far.
	pub fn revision(&self) -> u64 {
		self.revision
	}

	pub fn snapshot(&self) -> EditorSnapshot {
		EditorSnapshot {
			markup: self.content(SourceKind::Markup).to_string(),
			style: self.content(SourceKind::Style).to_string(),
			script: self.content(SourceKind::Script).to_string(),
			active_tab: self.active,
			revision: self.revision,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn state() -> EditorState {
		EditorState::new(&SeedContent {
			markup: "<p>hi</p>".into(),
			style: "p {}".into(),
			script: "1;".into(),
		})
	}

	#[test]
	fn starts_clean_on_markup_tab() {
		let state = state();
		assert!(!state.is_dirty());
		assert_eq!(state.active_tab(), SourceKind::Markup);
		assert_eq!(state.active_buffer().label(), "HTML");
		assert_eq!(state.revision(), 0);
	}

	#[test]
	fn set_buffer_stores_text_verbatim() {
		let mut state = state();
		let broken = "<div><span>unclosed <script>if (";
		assert!(state.set_buffer(SourceKind::Markup, broken));
		assert_eq!(state.content(SourceKind::Markup), broken);
		assert_eq!(state.content(SourceKind::Style), "p {}");
		assert!(state.is_dirty());
		assert_eq!(state.revision(), 1);
	}

	#[test]
	fn unchanged_edit_still_marks_dirty() {
		let mut state = state();
		assert!(!state.set_buffer(SourceKind::Script, "1;"));
		assert!(state.is_dirty());
	}

	#[test]
	fn switching_tabs_keeps_content() {
		let mut state = state();
		state.set_active_tab(SourceKind::Style);
		assert_eq!(state.active_buffer().kind(), SourceKind::Style);
		assert_eq!(state.content(SourceKind::Markup), "<p>hi</p>");
		assert!(!state.is_dirty());
	}

	#[test]
	fn reset_restores_seeds() {
		let mut state = state();
		state.set_buffer(SourceKind::Markup, "");
		state.mark_clean();
		state.reset(&SeedContent::empty());
		assert_eq!(state.content(SourceKind::Style), "");
		assert!(state.is_dirty());
		assert_eq!(state.snapshot().revision, 2);
	}
}
