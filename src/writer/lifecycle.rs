/* src/writer/lifecycle.rs */

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use super::WriterError;

/// Open/closed flag shared by a writer and its current session.
#[derive(Debug, Default)]
pub(crate) struct Lifecycle {
	open: AtomicBool,
	cycles: AtomicU64,
}

impl Lifecycle {
	/// Marks the writer open. Fails if a session is already open.
	pub(crate) fn enter(&self) -> Result<OpenGuard<'_>, WriterError> {
		self.open
			.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
			.map_err(|_| WriterError::InvalidState)?;
		let cycle = self.cycles.fetch_add(1, Ordering::Relaxed) + 1;
		Ok(OpenGuard {
			lifecycle: self,
			cycle,
		})
	}

	pub(crate) fn is_open(&self) -> bool {
		self.open.load(Ordering::Acquire)
	}
}

/// Held by a session; releases the writer when dropped.
#[derive(Debug)]
pub(crate) struct OpenGuard<'a> {
	lifecycle: &'a Lifecycle,
	cycle: u64,
}

impl OpenGuard<'_> {
	/// 1-based number of the open/close cycle this guard belongs to.
	pub(crate) fn cycle(&self) -> u64 {
		self.cycle
	}
}

impl Drop for OpenGuard<'_> {
	fn drop(&mut self) {
		self.lifecycle.open.store(false, Ordering::Release);
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_second_enter_fails_while_open() {
		let lifecycle = Lifecycle::default();
		let guard = lifecycle.enter().unwrap();
		assert!(lifecycle.is_open());
		assert!(matches!(lifecycle.enter(), Err(WriterError::InvalidState)));
		drop(guard);
		assert!(!lifecycle.is_open());
	}

	#[test]
	fn test_cycles_are_numbered() {
		let lifecycle = Lifecycle::default();
		let first = lifecycle.enter().unwrap().cycle();
		let second = lifecycle.enter().unwrap().cycle();
		assert_eq!((first, second), (1, 2));
	}
}
