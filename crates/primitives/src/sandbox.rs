use bitflags::bitflags;
use thiserror::Error;

bitflags! {
	/// Capabilities granted to a sandboxed preview context.
	///
	/// There is no same-origin or top-navigation flag. A preview always runs in an
	/// opaque origin with no reach into host storage, cookies or the host window.
	#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
	pub struct SandboxPolicy: u8 {
		/// Run scripts inside the preview.
		const ALLOW_SCRIPTS      = 0b0000_0001;
		/// Submit forms.
		const ALLOW_FORMS        = 0b0000_0010;
		/// Open `alert`/`confirm`/`prompt` dialogs.
		const ALLOW_MODALS       = 0b0000_0100;
		/// Open popup windows.
		const ALLOW_POPUPS       = 0b0000_1000;
		/// Use the pointer lock API.
		const ALLOW_POINTER_LOCK = 0b0001_0000;
		/// Trigger downloads.
		const ALLOW_DOWNLOADS    = 0b0010_0000;
	}
}

const TOKENS: [(SandboxPolicy, &str); 6] = [
	(SandboxPolicy::ALLOW_SCRIPTS, "allow-scripts"),
	(SandboxPolicy::ALLOW_FORMS, "allow-forms"),
	(SandboxPolicy::ALLOW_MODALS, "allow-modals"),
	(SandboxPolicy::ALLOW_POPUPS, "allow-popups"),
	(SandboxPolicy::ALLOW_POINTER_LOCK, "allow-pointer-lock"),
	(SandboxPolicy::ALLOW_DOWNLOADS, "allow-downloads"),
];

/// Rejected sandbox token.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SandboxFlagError {
	/// The token would break isolation from the host page.
	#[error("sandbox flag '{0}' would expose the host page and is not allowed")]
	Forbidden(String),
	/// The token is not a known sandbox capability.
	#[error("unknown sandbox flag '{0}'")]
	Unknown(String),
}

impl Default for SandboxPolicy {
	fn default() -> Self {
		Self::ALLOW_SCRIPTS
	}
}

impl SandboxPolicy {
	/// Parses a single `allow-*` token.
	pub fn parse_token(token: &str) -> Result<Self, SandboxFlagError> {
		let token = token.trim();
		if token == "allow-same-origin" || token.starts_with("allow-top-navigation") {
			return Err(SandboxFlagError::Forbidden(token.to_string()));
		}
		TOKENS
			.iter()
			.find(|(_, name)| *name == token)
			.map(|(flag, _)| *flag)
			.ok_or_else(|| SandboxFlagError::Unknown(token.to_string()))
	}

	/// Parses a list of tokens into one policy.
	pub fn from_tokens<I, S>(tokens: I) -> Result<Self, SandboxFlagError>
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		tokens
			.into_iter()
			.try_fold(Self::empty(), |acc, token| Ok(acc | Self::parse_token(token.as_ref())?))
	}

	/// Space separated token list, suitable for an iframe `sandbox` attribute.
	pub fn attribute_value(self) -> String {
		TOKENS
			.iter()
			.filter(|(flag, _)| self.contains(*flag))
			.map(|(_, name)| *name)
			.collect::<Vec<_>>()
			.join(" ")
	}

	/// `Content-Security-Policy` header value enforcing this sandbox on a response.
	pub fn csp_header_value(self) -> String {
		let tokens = self.attribute_value();
		if tokens.is_empty() {
			"sandbox".to_string()
		} else {
			format!("sandbox {tokens}")
		}
	}
}
