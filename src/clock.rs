//! Injectable time sources.
//!
//! Token expiry and request timestamps are both derived from a [`Clock`], so tests can pin
//! or advance time with [`ManualClock`] while production code uses [`SystemClock`].

// crates.io
use time::UtcOffset;
// self
use crate::_prelude::*;

/// Source of the current instant.
pub trait Clock
where
	Self: Send + Sync,
{
	/// Returns the current instant. The offset is preserved in rendered timestamps.
	fn now(&self) -> OffsetDateTime;
}

/// Wall clock reporting instants in a fixed offset (UTC by default).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SystemClock {
	offset: UtcOffset,
}
impl SystemClock {
	/// Reports instants in the provided offset, e.g. `+07:00` for Jakarta.
	pub fn with_offset(offset: UtcOffset) -> Self {
		Self { offset }
	}
}
impl Default for SystemClock {
	fn default() -> Self {
		Self { offset: UtcOffset::UTC }
	}
}
impl Clock for SystemClock {
	fn now(&self) -> OffsetDateTime {
		OffsetDateTime::now_utc().to_offset(self.offset)
	}
}

/// Clock that only moves when told to. Clones share the same instant.
#[derive(Clone, Debug)]
pub struct ManualClock(Arc<Mutex<OffsetDateTime>>);
impl ManualClock {
	/// Creates a clock pinned at `start`.
	pub fn new(start: OffsetDateTime) -> Self {
		Self(Arc::new(Mutex::new(start)))
	}

	/// Moves the clock forward (or backward, for negative durations).
	pub fn advance(&self, by: Duration) {
		let mut now = self.0.lock();

		*now += by;
	}

	/// Pins the clock at `instant`.
	pub fn set(&self, instant: OffsetDateTime) {
		*self.0.lock() = instant;
	}
}
impl Clock for ManualClock {
	fn now(&self) -> OffsetDateTime {
		*self.0.lock()
	}
}
