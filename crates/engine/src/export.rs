use std::io::Write;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::compose::ComposedDocument;

/// MIME type of exported documents.
pub const HTML_MIME: &str = "text/html; charset=utf-8";

#[derive(Debug, Error)]
pub enum ExportError {
	#[error("failed to write {path}: {error}")]
	Io { path: PathBuf, error: std::io::Error },
}

/// A composed document packaged as a downloadable file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
	file_name: String,
	body: ComposedDocument,
}

/// Packages `document` under `file_name` (for example `playground.html`).
pub fn export_document(document: &ComposedDocument, file_name: &str) -> ExportArtifact {
	ExportArtifact {
		file_name: file_name.to_string(),
		body: document.clone(),
	}
}

impl ExportArtifact {
	pub fn file_name(&self) -> &str {
		&self.file_name
	}

	pub fn mime(&self) -> &'static str {
		HTML_MIME
	}

	pub fn body(&self) -> &ComposedDocument {
		&self.body
	}

	/// `Content-Disposition` value offering the artifact as a download.
	pub fn content_disposition(&self) -> String {
		let name = self.file_name.replace(['"', '\\'], "_");
		format!("attachment; filename=\"{name}\"")
	}

	/// Saves the artifact as `dir/<file_name>`, replacing any previous export.
	///
	/// The file is written to a temporary sibling first and renamed into place.
	pub fn write_to(&self, dir: &Path) -> Result<PathBuf, ExportError> {
		let path = dir.join(&self.file_name);
		let io_err = |error| ExportError::Io {
			path: path.clone(),
			error,
		};

		let mut file = tempfile::NamedTempFile::new_in(dir).map_err(io_err)?;
		file.write_all(self.body.as_bytes()).map_err(io_err)?;
		file.persist(&path).map_err(|e| io_err(e.error))?;

		tracing::debug!(path = %path.display(), bytes = self.body.len(), "export.write");
		Ok(path)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::compose::compose;

	#[test]
	fn artifact_carries_name_and_mime() {
		let doc = compose("<p>x</p>", "", "");
		let artifact = export_document(&doc, "playground.html");
		assert_eq!(artifact.file_name(), "playground.html");
		assert_eq!(artifact.mime(), "text/html; charset=utf-8");
		assert_eq!(artifact.body(), &doc);
		assert_eq!(artifact.content_disposition(), "attachment; filename=\"playground.html\"");
	}

	#[test]
	fn write_to_replaces_previous_export() {
		let dir = tempfile::tempdir().unwrap();
		let first = export_document(&compose("one", "", ""), "playground.html");
		let second = export_document(&compose("two", "", ""), "playground.html");

		first.write_to(dir.path()).unwrap();
		let path = second.write_to(dir.path()).unwrap();

		let written = std::fs::read_to_string(&path).unwrap();
		assert_eq!(written, second.body().as_str());
		assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
	}

	#[test]
	fn write_to_missing_dir_reports_path() {
		let dir = tempfile::tempdir().unwrap();
		let missing = dir.path().join("nope");
		let err = export_document(&compose("", "", ""), "playground.html")
			.write_to(&missing)
			.unwrap_err();
		let ExportError::Io { path, .. } = err;
		assert_eq!(path, missing.join("playground.html"));
	}
}
