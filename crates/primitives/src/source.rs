use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// One of the three editable playground sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
	/// Document body markup.
	Markup,
	/// Stylesheet injected into the document head.
	Style,
	/// Script injected before the closing body tag.
	Script,
}

impl SourceKind {
	/// All kinds in tab order.
	pub const ALL: [SourceKind; 3] = [SourceKind::Markup, SourceKind::Style, SourceKind::Script];

	/// Short tab label.
	pub const fn label(self) -> &'static str {
		match self {
			Self::Markup => "HTML",
			Self::Style => "CSS",
			Self::Script => "JS",
		}
	}

	/// File name used for this source inside a workspace directory.
	pub const fn file_name(self) -> &'static str {
		match self {
			Self::Markup => "index.html",
			Self::Style => "style.css",
			Self::Script => "script.js",
		}
	}

	/// Position of this kind in [`SourceKind::ALL`].
	pub const fn index(self) -> usize {
		match self {
			Self::Markup => 0,
			Self::Style => 1,
			Self::Script => 2,
		}
	}

	/// Maps a workspace file name back to its kind.
	pub fn from_file_name(name: &str) -> Option<Self> {
		Self::ALL.into_iter().find(|kind| kind.file_name() == name)
	}

	pub(crate) const fn as_str(self) -> &'static str {
		match self {
			Self::Markup => "markup",
			Self::Style => "style",
			Self::Script => "script",
		}
	}
}

impl fmt::Display for SourceKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Returned when a string names no known source kind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown source kind '{0}' (expected html, css or js)")]
pub struct ParseSourceKindError(pub String);

impl FromStr for SourceKind {
	type Err = ParseSourceKindError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_ascii_lowercase().as_str() {
			"html" | "markup" => Ok(Self::Markup),
			"css" | "style" => Ok(Self::Style),
			"js" | "script" | "javascript" => Ok(Self::Script),
			_ => Err(ParseSourceKindError(s.to_string())),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_labels_and_names() {
		assert_eq!("HTML".parse::<SourceKind>(), Ok(SourceKind::Markup));
		assert_eq!(" css ".parse::<SourceKind>(), Ok(SourceKind::Style));
		assert_eq!("script".parse::<SourceKind>(), Ok(SourceKind::Script));
		assert_eq!("javascript".parse::<SourceKind>(), Ok(SourceKind::Script));
	}

	#[test]
	fn rejects_unknown_kind() {
		let err = "rust".parse::<SourceKind>().unwrap_err();
		assert_eq!(err, ParseSourceKindError("rust".into()));
	}

	#[test]
	fn file_names_round_trip() {
		for kind in SourceKind::ALL {
			assert_eq!(SourceKind::from_file_name(kind.file_name()), Some(kind));
			assert_eq!(SourceKind::ALL[kind.index()], kind);
		}
		assert_eq!(SourceKind::from_file_name("README.md"), None);
	}
}
