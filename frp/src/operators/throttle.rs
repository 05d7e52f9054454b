use std::{
	cell::{Cell, RefCell},
	rc::Rc,
	time::{Duration, Instant},
};

use frp_core::{Clock, DelegateSignalCore, LatestValue, Scheduler, SignalCore, Subscription, TimerHandle, Transaction};

use crate::{link::link, signal::Signal};

/// A minimum-interval rate limiter. The first value in a window
/// passes straight through; later values in the same window collapse to the
/// most recent one and wait out the window via the caller-supplied
/// [`Scheduler`].
struct Throttle<V> {
	core: SignalCore<V>,
	min_interval: Duration,
	clock: Rc<dyn Clock>,
	scheduler: Rc<dyn Scheduler>,
	last_emit_time: Cell<Option<Instant>>,
	timer_handle: Cell<Option<TimerHandle>>,
	timer_active: Cell<bool>,
	transaction_count: Cell<u32>,
	pending: RefCell<Option<V>>,
	last_value: RefCell<Option<V>>,
	_parent_sub: RefCell<Option<Subscription<V>>>,
}

pub fn new<V: 'static + Clone>(
	parent: Signal<V>,
	min_interval: Duration,
	clock: Rc<dyn Clock>,
	scheduler: Rc<dyn Scheduler>,
) -> Signal<V> {
	let node = Rc::new(Throttle {
		core: SignalCore::new(),
		min_interval,
		clock,
		scheduler,
		last_emit_time: Cell::new(None),
		timer_handle: Cell::new(None),
		timer_active: Cell::new(false),
		transaction_count: Cell::new(0),
		pending: RefCell::new(None),
		last_value: RefCell::new(None),
		_parent_sub: RefCell::new(None),
	});
	let sub = link(&node, parent.node().clone(), |node, t: Transaction<V>| match t {
		Transaction::Begin => {
			let count = node.transaction_count.get();
			if count == 0 {
				node.core.push_transaction(Transaction::Begin);
			}
			node.transaction_count.set(count + 1);
		}
		Transaction::End(v) => on_end(node, v),
		Transaction::Cancel => node.decrement(Transaction::Cancel),
	});
	*node._parent_sub.borrow_mut() = Some(sub);
	Signal::from_node(node)
}

fn on_end<V: 'static + Clone>(node: &Rc<Throttle<V>>, v: V) {
	if node.timer_active.get() {
		if let Some(handle) = node.timer_handle.take() {
			node.scheduler.cancel(handle);
		}
		node.timer_active.set(false);
		node.decrement(Transaction::Cancel);
	}
	let now = node.clock.now();
	let elapsed_enough = match node.last_emit_time.get() {
		Some(last) => now.duration_since(last) > node.min_interval,
		None => true,
	};
	if elapsed_enough {
		node.last_emit_time.set(Some(now));
		node.decrement(Transaction::End(v));
	} else {
		*node.pending.borrow_mut() = Some(v);
		let remaining = node.min_interval - now.duration_since(node.last_emit_time.get().unwrap());
		let weak = Rc::downgrade(node);
		let handle = node.scheduler.schedule_once(
			remaining,
			Box::new(move || {
				let Some(node) = weak.upgrade() else { return };
				node.timer_active.set(false);
				if let Some(v) = node.pending.borrow_mut().take() {
					let now = node.clock.now();
					node.last_emit_time.set(Some(now));
					node.decrement(Transaction::End(v));
				}
			}),
		);
		node.timer_handle.set(Some(handle));
		node.timer_active.set(true);
	}
}

impl<V: 'static + Clone> Throttle<V> {
	fn decrement(&self, t: Transaction<V>) {
		let count = self.transaction_count.get();
		assert!(count > 0, "Throttle transaction count underflow");
		let count = count - 1;
		self.transaction_count.set(count);
		if count == 0 {
			if let Transaction::End(v) = &t {
				*self.last_value.borrow_mut() = Some(v.clone());
			}
			self.core.push_transaction(t);
		}
	}
}

impl<V> Drop for Throttle<V> {
	fn drop(&mut self) {
		if let Some(handle) = self.timer_handle.take() {
			self.scheduler.cancel(handle);
		}
	}
}

impl<V: 'static + Clone> DelegateSignalCore<V> for Throttle<V> {
	fn signal_core(&self) -> &SignalCore<V> {
		&self.core
	}

	fn compute_latest_value(&self) -> LatestValue<V> {
		match &*self.last_value.borrow() {
			Some(v) => LatestValue::Stored(v.clone()),
			None => LatestValue::None,
		}
	}
}

#[cfg(test)]
mod tests {
	use std::{cell::{Cell, RefCell}, rc::Rc, time::Duration};

	use frp_core::{Clock, Scheduler, TimerHandle};

	use crate::input::Input;

	/// A scheduler that never actually defers: every `schedule_once` runs its
	/// task synchronously. Paired with a clock that jumps an hour forward on
	/// every call, this exercises only the "window already elapsed"
	/// immediate-pass path; the burst-collapsing/deferred path is covered by
	/// the `ManualClock`/`ManualScheduler` integration tests under `tests/`,
	/// which can actually hold a timer pending.
	struct EverAdvancingClock {
		ticks: Cell<u32>,
	}

	impl Clock for EverAdvancingClock {
		fn now(&self) -> std::time::Instant {
			let ticks = self.ticks.get();
			self.ticks.set(ticks + 1);
			std::time::Instant::now() + Duration::from_secs(3600 * u64::from(ticks + 1))
		}
	}

	struct ImmediateScheduler;

	impl Scheduler for ImmediateScheduler {
		fn schedule_once(&self, _delay: Duration, task: Box<dyn FnOnce()>) -> TimerHandle {
			task();
			TimerHandle(0)
		}

		fn cancel(&self, _handle: TimerHandle) {}
	}

	#[test]
	fn every_assignment_passes_once_the_window_has_elapsed() {
		let x = Input::new(0);
		let clock = Rc::new(EverAdvancingClock { ticks: Cell::new(0) });
		let t = x.signal().throttle(Duration::from_millis(1), clock, Rc::new(ImmediateScheduler));
		let seen = Rc::new(RefCell::new(Vec::new()));
		let seen_clone = seen.clone();
		let _out = t.output(move |v| seen_clone.borrow_mut().push(v));

		x.assign(1);
		x.assign(2);
		assert_eq!(*seen.borrow(), vec![1, 2]);
	}
}
