use std::{
	cell::{Cell, RefCell},
	rc::Rc,
};

use frp_core::{DelegateSignalCore, LatestValue, SignalCore, SignalNode, Subscription, Transaction};

use crate::{link::link, signal::Signal};

/// The monadic join, `Signal<Signal<V>> -> Signal<V>`. Subscribes to
/// the outer signal; each `End(inner)` replaces the current inner
/// subscription with a fresh one on `inner`, forwarding *its* transactions
/// verbatim. The outer's own `Begin`/`Cancel` are never forwarded — only the
/// active inner's are.
struct Joined<V> {
	core: SignalCore<V>,
	active_inner: RefCell<Option<Signal<V>>>,
	_inner_sub: RefCell<Option<Subscription<V>>>,
	_outer_sub: RefCell<Option<Subscription<Signal<V>>>>,
}

pub fn new<V: 'static + Clone>(outer: Signal<Signal<V>>) -> Signal<V> {
	let node = Rc::new(Joined {
		core: SignalCore::new(),
		active_inner: RefCell::new(None),
		_inner_sub: RefCell::new(None),
		_outer_sub: RefCell::new(None),
	});
	let outer_sub = link(&node, outer.node().clone(), |node, t: Transaction<Signal<V>>| {
		if let Transaction::End(inner) = t {
			switch_to(node, inner);
		}
	});
	*node._outer_sub.borrow_mut() = Some(outer_sub);
	Signal::from_node(node)
}

fn switch_to<V: 'static + Clone>(node: &Rc<Joined<V>>, inner: Signal<V>) {
	// Dropping the old subscription before registering the new one cancels
	// it cleanly (no overlap where both are live).
	*node._inner_sub.borrow_mut() = None;
	// Subscribing to a signal that already has a value primes synchronously
	// but that priming is the new inner's *existing* current state,
	// already reflected by `active_inner` below and visible through
	// `latest_value`, not a genuinely new transaction. Forwarding it here
	// would re-announce the same value a second time downstream (S6: the
	// switch itself must be silent). Suppress exactly that synchronous
	// handshake; every later, real push from the new inner forwards as
	// usual.
	let suppress_priming = Rc::new(Cell::new(true));
	let suppress_priming_during_subscribe = suppress_priming.clone();
	let sub = link(node, inner.node().clone(), move |node, t: Transaction<V>| {
		if suppress_priming_during_subscribe.get() {
			return;
		}
		node.core.push_transaction(t);
	});
	suppress_priming.set(false);
	*node._inner_sub.borrow_mut() = Some(sub);
	*node.active_inner.borrow_mut() = Some(inner);
}

impl<V: 'static + Clone> DelegateSignalCore<V> for Joined<V> {
	fn signal_core(&self) -> &SignalCore<V> {
		&self.core
	}

	fn compute_latest_value(&self) -> LatestValue<V> {
		match &*self.active_inner.borrow() {
			Some(inner) => inner.node().latest_value(),
			None => LatestValue::None,
		}
	}
}

#[cfg(test)]
mod tests {
	use std::{cell::RefCell, rc::Rc};

	use crate::input::Input;

	#[test]
	fn forwards_whichever_inner_is_currently_active() {
		let inner1 = Input::new(false);
		let outer = Input::new(inner1.signal());
		let j = outer.signal().join();
		let seen = Rc::new(RefCell::new(Vec::new()));
		let seen_clone = seen.clone();
		let _out = j.output(move |v| seen_clone.borrow_mut().push(v));
		assert_eq!(*seen.borrow(), vec![false]);

		inner1.assign(true);
		assert_eq!(*seen.borrow(), vec![false, true]);

		let inner2 = Input::new(true);
		outer.assign(inner2.signal());
		inner1.assign(false);
		assert_eq!(*seen.borrow(), vec![false, true]);
	}

	#[test]
	fn switching_to_a_new_inner_does_not_replay_its_current_value() {
		// Regression test: inner2 already holds the same value inner1 last
		// emitted, so if the switch itself re-announced inner2's current
		// state, this would (wrongly) observe an extra duplicate `true`.
		let inner1 = Input::new(true);
		let outer = Input::new(inner1.signal());
		let j = outer.signal().join();
		let seen = Rc::new(RefCell::new(Vec::new()));
		let seen_clone = seen.clone();
		let _out = j.output(move |v| seen_clone.borrow_mut().push(v));
		assert_eq!(*seen.borrow(), vec![true]);

		let inner2 = Input::new(true);
		outer.assign(inner2.signal());
		assert_eq!(*seen.borrow(), vec![true], "switching must not re-emit the new inner's current value");

		inner2.assign(false);
		assert_eq!(*seen.borrow(), vec![true, false], "genuine pushes from the new inner still forward");
	}
}
