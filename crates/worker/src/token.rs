use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Identifier of one rendered preview context.
///
/// Generations only grow; a larger value always replaces a smaller one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(pub u64);

impl Generation {
	pub const fn get(self) -> u64 {
		self.0
	}
}

impl fmt::Display for Generation {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.0)
	}
}

/// Monotonic generation clock shared between clones.
#[derive(Debug, Default, Clone)]
pub struct GenerationClock {
	next: Arc<AtomicU64>,
}

impl GenerationClock {
	/// Creates a new clock whose first generation is 1.
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns the next generation.
	pub fn next(&self) -> Generation {
		Generation(self.next.fetch_add(1, Ordering::AcqRel).wrapping_add(1))
	}

	/// Returns the most recently issued generation, if any.
	pub fn current(&self) -> Option<Generation> {
		match self.next.load(Ordering::Acquire) {
			0 => None,
			n => Some(Generation(n)),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn clock_starts_at_one_and_is_shared() {
		let clock = GenerationClock::new();
		assert_eq!(clock.current(), None);
		let other = clock.clone();
		assert_eq!(clock.next(), Generation(1));
		assert_eq!(other.next(), Generation(2));
		assert_eq!(clock.current(), Some(Generation(2)));
	}
}
