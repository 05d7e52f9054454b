use std::time::{Duration, Instant};

/// An opaque handle to a scheduled, possibly-already-fired timer.
///
/// [`Scheduler::cancel`] must accept a handle for a timer that has already
/// fired or already been cancelled as a no-op, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerHandle(pub u64);

/// Supplies "now" to the `frp` crate's `Throttle` operator. Not implemented
/// by this crate — consumed from whatever clock the embedding application
/// uses.
pub trait Clock {
	fn now(&self) -> Instant;
}

/// Supplies delayed, cancellable callback dispatch to the `frp` crate's
/// `Throttle` operator. Not implemented by this crate.
///
/// # Logic
///
/// Every `task` passed to [`Scheduler::schedule_once`] **must** be invoked on
/// the engine's single propagation thread, never from whatever thread the
/// scheduler's own timer fires on — callers may rely on signal operations
/// being safe to perform directly from within `task`.
pub trait Scheduler {
	/// Schedules `task` to run once, no earlier than `delay` from now.
	/// Returns a handle that can later be passed to [`Scheduler::cancel`].
	fn schedule_once(&self, delay: Duration, task: Box<dyn FnOnce()>) -> TimerHandle;

	/// Cancels a previously-scheduled timer. Idempotent: cancelling a timer
	/// that has already fired or already been cancelled is a no-op.
	fn cancel(&self, handle: TimerHandle);
}
