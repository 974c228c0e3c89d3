//! In-flight request tracking.
//!
//! Each editor owns one [`InFlight`] counter. A [`PendingGuard`] is held for
//! the duration of every request the editor issues, so the view can show that
//! a sync is outstanding even when the request never resolves.

use std::cell::Cell;
use std::rc::Rc;

/// Number of outstanding requests for one editor.
#[derive(Clone, Debug, Default)]
pub struct InFlight {
	count: Rc<Cell<usize>>,
}

impl InFlight {
	/// Counter with nothing outstanding.
	pub fn new() -> Self {
		Self::default()
	}

	/// Mark a request as started. It counts until the guard is dropped.
	pub fn begin(&self) -> PendingGuard {
		self.count.set(self.count.get() + 1);
		PendingGuard {
			count: self.count.clone(),
		}
	}

	/// Live guards.
	pub fn count(&self) -> usize {
		self.count.get()
	}

	/// At least one request is outstanding.
	pub fn is_busy(&self) -> bool {
		self.count() > 0
	}
}

/// Decrements its [`InFlight`] counter on drop.
#[derive(Debug)]
pub struct PendingGuard {
	count: Rc<Cell<usize>>,
}

impl Drop for PendingGuard {
	fn drop(&mut self) {
		self.count.set(self.count.get().saturating_sub(1));
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn guards_count_overlapping_requests() {
		let in_flight = InFlight::new();
		assert!(!in_flight.is_busy());
		let first = in_flight.begin();
		let second = in_flight.clone().begin();
		assert_eq!(in_flight.count(), 2);
		drop(first);
		assert_eq!(in_flight.count(), 1);
		drop(second);
		assert!(!in_flight.is_busy());
	}
}
