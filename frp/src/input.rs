use std::{
	cell::{Cell, RefCell},
	rc::Rc,
};

use frp_core::{DelegateSignalCore, LatestValue, SignalCore};

use crate::signal::Signal;

/// A [`Signal`] whose value is set by imperative code at the boundary of the
/// graph.
///
/// `Input` is not itself a `Signal<V>` (it needs extra surface — `assign`,
/// `modify` — that wouldn't make sense on every derived node), but
/// [`Input::signal`] produces a cheap `Signal<V>` handle to it, and
/// `Input<V>: Into<Signal<V>>` covers the common case of passing an `Input`
/// directly wherever a `Signal` is expected.
pub struct Input<V: 'static + Clone>(Rc<InputNode<V>>);

struct InputNode<V> {
	core: SignalCore<V>,
	value: RefCell<V>,
	in_transaction: Cell<bool>,
}

impl<V: 'static + Clone> Input<V> {
	pub fn new(initial: V) -> Self {
		Input(Rc::new(InputNode {
			core: SignalCore::new(),
			value: RefCell::new(initial),
			in_transaction: Cell::new(false),
		}))
	}

	/// A cheap `Signal<V>` handle to this input.
	pub fn signal(&self) -> Signal<V> {
		Signal::from_node(self.0.clone())
	}

	/// The current value, without recording a dependency (there is no
	/// ambient dependency-tracking scope in this engine — every read is
	/// simply a clone of the backing field).
	pub fn get(&self) -> V {
		self.0.value.borrow().clone()
	}

	/// Iff `new_value` differs... — no: unlike a debounced cell, `Input`
	/// unconditionally replaces the value and pushes, matching the
	/// "assignment triggers a single `push_value`" (no implicit equality
	/// check; use [`Signal::on_change`] downstream if that's wanted).
	///
	/// # Panics
	///
	/// Panics if called reentrantly from within this same `Input`'s own
	/// transaction (e.g. from an observer that is a descendant of this
	/// `Input`). Assigning to *other* `Input`s during propagation is fine.
	pub fn assign(&self, new_value: V) {
		assert!(
			!self.0.in_transaction.get(),
			"reentrant assignment to an Input from within its own transaction"
		);
		self.0.in_transaction.set(true);
		let _guard = ResetOnDrop(&self.0.in_transaction);
		*self.0.value.borrow_mut() = new_value.clone();
		self.0.core.push_value(new_value);
	}

	/// Applies `f` to the current value and pushes the result, under the
	/// same reentrancy guard as [`Input::assign`].
	pub fn modify(&self, f: impl FnOnce(&V) -> V) {
		let new_value = f(&self.0.value.borrow());
		self.assign(new_value);
	}
}

struct ResetOnDrop<'a>(&'a Cell<bool>);

impl Drop for ResetOnDrop<'_> {
	fn drop(&mut self) {
		self.0.set(false);
	}
}

impl<V: 'static + Clone> DelegateSignalCore<V> for InputNode<V> {
	fn signal_core(&self) -> &SignalCore<V> {
		&self.core
	}

	fn compute_latest_value(&self) -> LatestValue<V> {
		LatestValue::Stored(self.value.borrow().clone())
	}
}

impl<V: 'static + Clone> From<Input<V>> for Signal<V> {
	fn from(input: Input<V>) -> Self {
		input.signal()
	}
}

impl<V: 'static + Clone> Clone for Input<V> {
	fn clone(&self) -> Self {
		Input(self.0.clone())
	}
}

#[cfg(test)]
mod tests {
	use std::{cell::RefCell, rc::Rc};

	use super::Input;

	#[test]
	fn assign_pushes_begin_then_end() {
		let x = Input::new(0);
		let seen = Rc::new(RefCell::new(Vec::new()));
		let seen_clone = seen.clone();
		let _out = x.signal().subscribe(move |t| seen_clone.borrow_mut().push(t));
		// Subscribing primes with (Begin, End(0)).
		x.assign(1);
		assert_eq!(seen.borrow().len(), 4);
	}

	#[test]
	#[should_panic(expected = "reentrant assignment")]
	fn reentrant_assignment_panics() {
		let x = Input::new(0);
		let x_clone = x.clone();
		let _out = x.signal().output(move |_| {
			x_clone.assign(2);
		});
		x.assign(1);
	}
}
