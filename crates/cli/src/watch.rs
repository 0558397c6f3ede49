//! Workspace directory mode: file changes become buffer edits.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use easel_engine::{PlaygroundHandle, SeedContent, SourceKind};
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tracing::{debug, warn};

/// Tracks the last content seen for each source file so that writes which
/// leave a file unchanged do not restart the render window.
#[derive(Debug)]
pub struct SourceSync {
	dir: PathBuf,
	seen: SeedContent,
}

impl SourceSync {
	pub fn new(dir: impl Into<PathBuf>, seen: SeedContent) -> Self {
		Self { dir: dir.into(), seen }
	}

	/// Reads every source touched by `event` and returns the ones whose
	/// content changed.
	pub fn changes(&mut self, event: &Event) -> Vec<(SourceKind, String)> {
		let mut changes = Vec::new();
		for kind in touched_sources(event) {
			let path = self.dir.join(kind.file_name());
			let text = match std::fs::read_to_string(&path) {
				Ok(text) => text,
				// Editors often replace files by rename; the follow-up event
				// carries the new content.
				Err(err) => {
					debug!(path = %path.display(), error = %err, "watch.read_skipped");
					continue;
				}
			};
			if self.seen.get(kind) == text {
				continue;
			}
			self.seen.set(kind, text.clone());
			changes.push((kind, text));
		}
		changes
	}
}

/// Source kinds whose files were created or modified by `event`.
pub fn touched_sources(event: &Event) -> Vec<SourceKind> {
	if !matches!(event.kind, EventKind::Create(_) | EventKind::Modify(_)) {
		return Vec::new();
	}
	let mut kinds: Vec<SourceKind> = event
		.paths
		.iter()
		.filter_map(|path| path.file_name().and_then(OsStr::to_str))
		.filter_map(SourceKind::from_file_name)
		.collect();
	kinds.sort_by_key(|kind| kind.index());
	kinds.dedup();
	kinds
}

/// Keeps the underlying watcher alive; dropping it stops watching.
pub struct SourceWatcher {
	_watcher: RecommendedWatcher,
}

impl SourceWatcher {
	/// Watches `dir` and forwards changed sources to `handle`.
	pub fn start(dir: &Path, seen: SeedContent, handle: PlaygroundHandle) -> notify::Result<Self> {
		let mut sync = SourceSync::new(dir, seen);
		let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| match res {
			Ok(event) => {
				for (kind, text) in sync.changes(&event) {
					debug!(%kind, bytes = text.len(), "watch.edit");
					if handle.edit(kind, text).is_err() {
						return;
					}
				}
			}
			Err(err) => warn!(error = %err, "watch.error"),
		})?;
		watcher.watch(dir, RecursiveMode::NonRecursive)?;
		debug!(dir = %dir.display(), "watch.start");
		Ok(Self { _watcher: watcher })
	}
}

#[cfg(test)]
mod tests {
	use std::sync::Arc;
	use std::time::Duration;

	use easel_engine::{Playground, PlaygroundOptions, SandboxPolicy, SystemClipboard, spawn_playground};
	use easel_preview::ServedPreview;
	use notify::event::{CreateKind, DataChange, ModifyKind, RemoveKind};
	use pretty_assertions::assert_eq;

	use super::*;

	fn modified(path: PathBuf) -> Event {
		Event::new(EventKind::Modify(ModifyKind::Data(DataChange::Content))).add_path(path)
	}

	#[test]
	fn maps_known_file_names() {
		let event = Event::new(EventKind::Create(CreateKind::File))
			.add_path(PathBuf::from("/w/script.js"))
			.add_path(PathBuf::from("/w/notes.txt"))
			.add_path(PathBuf::from("/w/index.html"))
			.add_path(PathBuf::from("/w/index.html"));
		assert_eq!(touched_sources(&event), vec![SourceKind::Markup, SourceKind::Script]);
	}

	#[test]
	fn ignores_removals() {
		let event = Event::new(EventKind::Remove(RemoveKind::File)).add_path(PathBuf::from("/w/style.css"));
		assert!(touched_sources(&event).is_empty());
	}

	#[test]
	fn reports_only_changed_content() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("style.css");
		std::fs::write(&path, "p {}").unwrap();
		let mut seen = SeedContent::empty();
		seen.set(SourceKind::Style, "p {}".into());
		let mut sync = SourceSync::new(dir.path(), seen);

		assert!(sync.changes(&modified(path.clone())).is_empty());

		std::fs::write(&path, "p { color: red; }").unwrap();
		assert_eq!(
			sync.changes(&modified(path.clone())),
			vec![(SourceKind::Style, "p { color: red; }".to_string())]
		);
		assert!(sync.changes(&modified(path)).is_empty());
	}

	#[test]
	fn missing_file_is_skipped() {
		let dir = tempfile::tempdir().unwrap();
		let mut sync = SourceSync::new(dir.path(), SeedContent::empty());
		assert!(sync.changes(&modified(dir.path().join("index.html"))).is_empty());
	}

	#[tokio::test]
	async fn file_writes_reach_the_playground() {
		let dir = tempfile::tempdir().unwrap();
		let host = ServedPreview::new(SandboxPolicy::default(), "playground.html");
		let playground = Playground::new(PlaygroundOptions::default(), SeedContent::empty(), host);
		let (handle, _join) = spawn_playground(playground, Arc::new(SystemClipboard::default()));
		let _watcher = SourceWatcher::start(dir.path(), SeedContent::empty(), handle.clone()).unwrap();

		std::fs::write(dir.path().join("style.css"), "h1 { color: teal; }").unwrap();
		std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

		let mut style = String::new();
		for _ in 0..100 {
			style = handle.status().await.unwrap().editor.style;
			if !style.is_empty() {
				break;
			}
			tokio::time::sleep(Duration::from_millis(50)).await;
		}
		assert_eq!(style, "h1 { color: teal; }");
		let editor = handle.status().await.unwrap().editor;
		assert_eq!(editor.markup, "");
		assert_eq!(editor.script, "");
		handle.shutdown();
	}
}
