//! Notice queue for failures that are reported but never propagated.
//!
//! Front ends drain pending notices and decide how to show or dismiss them.

use std::collections::VecDeque;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
	Info,
	Warn,
	Error,
}

/// One dismissible message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
	pub level: NoticeLevel,
	pub message: String,
}

impl Notice {
	pub fn info(message: impl Into<String>) -> Self {
		Self {
			level: NoticeLevel::Info,
			message: message.into(),
		}
	}

	pub fn warn(message: impl Into<String>) -> Self {
		Self {
			level: NoticeLevel::Warn,
			message: message.into(),
		}
	}

	pub fn error(message: impl Into<String>) -> Self {
		Self {
			level: NoticeLevel::Error,
			message: message.into(),
		}
	}
}

impl fmt::Display for Notice {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let tag = match self.level {
			NoticeLevel::Info => "info",
			NoticeLevel::Warn => "warn",
			NoticeLevel::Error => "error",
		};
		write!(f, "[{tag}] {}", self.message)
	}
}

pub struct NoticeCenter {
	pending: VecDeque<Notice>,
	capacity: usize,
}

impl Default for NoticeCenter {
	fn default() -> Self {
		Self::new()
	}
}

impl NoticeCenter {
	/// Oldest notices are dropped past this many.
	pub const DEFAULT_CAPACITY: usize = 32;

	pub fn new() -> Self {
		Self {
			pending: VecDeque::new(),
			capacity: Self::DEFAULT_CAPACITY,
		}
	}

	pub fn is_empty(&self) -> bool {
		self.pending.is_empty()
	}

	pub fn len(&self) -> usize {
		self.pending.len()
	}

	pub fn push(&mut self, notice: Notice) {
		if self.pending.len() == self.capacity {
			self.pending.pop_front();
		}
		self.pending.push_back(notice);
	}

	pub fn take_pending(&mut self) -> Vec<Notice> {
		self.pending.drain(..).collect()
	}

	pub fn clear(&mut self) {
		self.pending.clear();
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn drops_oldest_past_capacity() {
		let mut center = NoticeCenter::new();
		for i in 0..NoticeCenter::DEFAULT_CAPACITY + 2 {
			center.push(Notice::info(format!("n{i}")));
		}
		assert_eq!(center.len(), NoticeCenter::DEFAULT_CAPACITY);
		let taken = center.take_pending();
		assert_eq!(taken[0].message, "n2");
		assert!(center.is_empty());
	}

	#[test]
	fn display_tags_level() {
		assert_eq!(Notice::error("copy failed").to_string(), "[error] copy failed");
	}
}
