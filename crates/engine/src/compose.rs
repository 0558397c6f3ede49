//! Document composer.
//!
//! Turns the three buffers into one self-contained document:
//!
//! ```text
//! <!doctype html>
//! <html>
//! <head>
//!   meta charset + viewport
//!   <link href="{stylesheet}" rel="stylesheet">
//!   <style> {style} </style>
//! </head>
//! <body class="{body_class}">
//!   <div class="{container_class}"> {markup} </div>
//!   <script> {script} </script>
//! </body>
//! </html>
//! ```
//!
//! Composition is plain string assembly. Nothing is escaped or validated;
//! isolation is the preview host's job.

use std::fmt;
use std::sync::Arc;

use easel_config::PlaygroundConfig;
use easel_primitives::SourceKind;

use crate::buffer::EditorState;

/// Immutable composed document.
///
/// Cheap to clone; every edit produces a new value rather than mutating one.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ComposedDocument(Arc<str>);

impl ComposedDocument {
	pub fn as_str(&self) -> &str {
		&self.0
	}

	pub fn as_bytes(&self) -> &[u8] {
		self.0.as_bytes()
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

impl fmt::Debug for ComposedDocument {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ComposedDocument").field("len", &self.len()).finish()
	}
}

impl fmt::Display for ComposedDocument {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl AsRef<str> for ComposedDocument {
	fn as_ref(&self) -> &str {
		&self.0
	}
}

/// Fixed parts of the document shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposeOptions {
	/// Href of the one shared utility stylesheet.
	pub stylesheet: String,
	/// Class attribute of `<body>`; omitted when empty.
	pub body_class: String,
	/// Class attribute of the `<div>` wrapping the markup; omitted when empty.
	pub container_class: String,
}

impl Default for ComposeOptions {
	fn default() -> Self {
		Self::from(&PlaygroundConfig::default())
	}
}

impl From<&PlaygroundConfig> for ComposeOptions {
	fn from(config: &PlaygroundConfig) -> Self {
		Self {
			stylesheet: config.stylesheet.clone(),
			body_class: config.body_class.clone(),
			container_class: config.container_class.clone(),
		}
	}
}

/// Pure document composer.
#[derive(Debug, Clone, Default)]
pub struct Composer {
	options: ComposeOptions,
}

impl Composer {
	pub fn new(options: ComposeOptions) -> Self {
		Self { options }
	}

	pub fn options(&self) -> &ComposeOptions {
		&self.options
	}

	/// Composes one document. Total and deterministic.
	pub fn compose(&self, markup: &str, style: &str, script: &str) -> ComposedDocument {
		let ComposeOptions {
			stylesheet,
			body_class,
			container_class,
		} = &self.options;
		let body_open = open_tag("body", body_class);
		let container_open = open_tag("div", container_class);

		let document = format!(
			"<!doctype html>\n\
			 <html>\n\
			 <head>\n\
			 <meta charset=\"utf-8\" />\n\
			 <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\" />\n\
			 <link href=\"{stylesheet}\" rel=\"stylesheet\">\n\
			 <style>\n{style}\n</style>\n\
			 </head>\n\
			 {body_open}\n\
			 {container_open}\n{markup}\n</div>\n\
			 <script>\n{script}\n</script>\n\
			 </body>\n\
			 </html>\n"
		);
		ComposedDocument(document.into())
	}

	/// Composes the current contents of `state`.
	pub fn compose_state(&self, state: &EditorState) -> ComposedDocument {
		self.compose(
			state.content(SourceKind::Markup),
			state.content(SourceKind::Style),
			state.content(SourceKind::Script),
		)
	}
}

fn open_tag(name: &str, class: &str) -> String {
	if class.is_empty() {
		format!("<{name}>")
	} else {
		format!("<{name} class=\"{class}\">")
	}
}

/// Composes with the default shell options.
pub fn compose(markup: &str, style: &str, script: &str) -> ComposedDocument {
	Composer::default().compose(markup, style, script)
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;
	use proptest::prelude::*;

	use super::*;
	use crate::seed::SeedContent;

	#[test]
	fn layout_matches_shell() {
		let doc = compose("<p>hi</p>", "p { color: red; }", "console.log(1);");
		let expected = "<!doctype html>\n<html>\n<head>\n<meta charset=\"utf-8\" />\n\
			<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\" />\n\
			<link href=\"https://cdn.jsdelivr.net/npm/tailwindcss@2.2.19/dist/tailwind.min.css\" rel=\"stylesheet\">\n\
			<style>\np { color: red; }\n</style>\n</head>\n<body class=\"bg-gray-50\">\n\
			<div class=\"container\">\n<p>hi</p>\n</div>\n<script>\nconsole.log(1);\n</script>\n</body>\n</html>\n";
		assert_eq!(doc.as_str(), expected);
	}

	#[test]
	fn seed_content_has_heading_once_and_one_stylesheet() {
		let seed = SeedContent::default();
		let doc = compose(&seed.markup, &seed.style, &seed.script);
		assert_eq!(doc.as_str().matches("Rapidly build modern websites").count(), 1);
		assert_eq!(doc.as_str().matches("<link ").count(), 1);
		assert_eq!(doc.as_str().matches("rel=\"stylesheet\"").count(), 1);
	}

	#[test]
	fn empty_markup_keeps_shell() {
		let doc = compose("", "", "");
		let text = doc.as_str();
		for tag in ["<html>", "<head>", "</head>", "<body", "</body>", "</html>"] {
			assert_eq!(text.matches(tag).count(), 1, "{tag}");
		}
		assert!(text.contains("<div class=\"container\">\n\n</div>"));
		assert!(text.find("</head>").unwrap() < text.find("<body").unwrap());
	}

	#[test]
	fn script_sits_before_closing_body() {
		let doc = compose("<main></main>", "", "let x = 1;");
		let text = doc.as_str();
		let script = text.find("<script>").unwrap();
		assert!(text.find("<main>").unwrap() < script);
		assert!(script < text.find("</body>").unwrap());
	}

	#[test]
	fn nothing_is_escaped() {
		let doc = compose("</div><b>", "</style>", "</script>");
		assert!(doc.as_str().contains("\n</div><b>\n"));
		assert!(doc.as_str().contains("<style>\n</style>\n</style>"));
	}

	#[test]
	fn empty_classes_are_omitted() {
		let composer = Composer::new(ComposeOptions {
			stylesheet: "/u.css".into(),
			body_class: String::new(),
			container_class: String::new(),
		});
		let doc = composer.compose("x", "", "");
		assert!(doc.as_str().contains("<body>\n<div>\nx\n</div>"));
		assert!(doc.as_str().contains("<link href=\"/u.css\" rel=\"stylesheet\">"));
	}

	proptest! {
		#[test]
		fn compose_is_deterministic(markup in ".*", style in ".*", script in ".*") {
			let a = compose(&markup, &style, &script);
			let b = compose(&markup, &style, &script);
			prop_assert_eq!(a.as_bytes(), b.as_bytes());
			prop_assert!(a.as_str().contains(&markup));
		}
	}
}
