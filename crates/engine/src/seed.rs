use std::io;
use std::path::{Path, PathBuf};

use easel_primitives::SourceKind;

const DEFAULT_MARKUP: &str = r#"
<div class="p-6">
  <header class="mb-6">
    <h1 class="text-4xl font-bold tracking-tight">Rapidly build modern websites</h1>
    <p class="text-gray-600">A tiny demo of composing UI directly in markup.</p>
  </header>

  <section class="bg-white rounded-2xl p-4 shadow-lg">
    <div class="flex items-center gap-4">
      <img src="https://via.placeholder.com/96" alt="cover" class="w-24 h-24 rounded-md shadow" />
      <div>
        <div class="text-xl font-medium">Class Warfare</div>
        <div class="text-sky-500 font-semibold">The Anti-Patterns</div>
        <div class="text-sm text-gray-500">No. 4 · 2025</div>
      </div>
    </div>

    <pre class="mt-4 p-3 bg-gray-50 rounded text-sm overflow-auto"><code>&lt;div class="flex gap-6 p-7 rounded-2xl"&gt;...&lt;/div&gt;</code></pre>

    <button data-action="toast" class="mt-4 px-3 py-2 rounded-full bg-black text-white text-sm">Say hello</button>
  </section>
</div>
"#;

const DEFAULT_STYLE: &str = r#"
/* sample CSS to show how you can augment Tailwind-like classes */
body { font-family: Inter, ui-sans-serif, system-ui, -apple-system, 'Segoe UI', Roboto, 'Helvetica Neue', Arial; }
.container { max-width: 980px; margin: 32px auto; }
"#;

const DEFAULT_SCRIPT: &str = r#"
// small script to show interactivity inside the preview
document.addEventListener('click', (e) => {
  if (e.target.matches('[data-action="toast"]')) {
    const t = document.createElement('div');
    t.textContent = 'Button clicked!';
    t.style = 'position:fixed;right:16px;bottom:16px;background:#111;color:white;padding:8px 12px;border-radius:8px;';
    document.body.appendChild(t);
    setTimeout(() => t.remove(), 1500);
  }
});
"#;

/// Initial buffer contents for a playground session.
///
/// Passed to [`crate::EditorState::new`] and reused by reset, so two sessions
/// with different seeds never observe each other's defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedContent {
	pub markup: String,
	pub style: String,
	pub script: String,
}

impl Default for SeedContent {
	fn default() -> Self {
		Self {
			markup: DEFAULT_MARKUP.to_string(),
			style: DEFAULT_STYLE.to_string(),
			script: DEFAULT_SCRIPT.to_string(),
		}
	}
}

impl SeedContent {
	/// Seed with all three sources empty.
	pub fn empty() -> Self {
		Self {
			markup: String::new(),
			style: String::new(),
			script: String::new(),
		}
	}

	pub fn get(&self, kind: SourceKind) -> &str {
		match kind {
			SourceKind::Markup => &self.markup,
			SourceKind::Style => &self.style,
			SourceKind::Script => &self.script,
		}
	}

	pub fn set(&mut self, kind: SourceKind, text: String) {
		match kind {
			SourceKind::Markup => self.markup = text,
			SourceKind::Style => self.style = text,
			SourceKind::Script => self.script = text,
		}
	}

	/// Reads `index.html`, `style.css` and `script.js` from `dir`.
	///
	/// Missing files keep the built-in sample for that source.
	pub fn from_dir(dir: &Path) -> io::Result<Self> {
		let mut seed = Self::default();
		for kind in SourceKind::ALL {
			match std::fs::read_to_string(dir.join(kind.file_name())) {
				Ok(text) => seed.set(kind, text),
				Err(err) if err.kind() == io::ErrorKind::NotFound => {}
				Err(err) => return Err(err),
			}
		}
		Ok(seed)
	}

	/// Writes the three sources into `dir`, skipping files that already exist
	/// unless `overwrite` is set. Returns the paths written.
	pub fn write_to_dir(&self, dir: &Path, overwrite: bool) -> io::Result<Vec<PathBuf>> {
		std::fs::create_dir_all(dir)?;
		let mut written = Vec::new();
		for kind in SourceKind::ALL {
			let path = dir.join(kind.file_name());
			if path.exists() && !overwrite {
				continue;
			}
			std::fs::write(&path, self.get(kind))?;
			written.push(path);
		}
		Ok(written)
	}
}
