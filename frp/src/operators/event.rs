use std::{cell::RefCell, rc::Rc};

use frp_core::{DelegateSignalCore, LatestValue, SignalCore, Subscription, Transaction};

use crate::{link::link, signal::Signal};

/// Forwards every transaction verbatim but never reports a
/// `latest_value`, so a fresh subscriber is never primed — the "this is a
/// stream of occurrences, not a value with history" declaration.
struct Event<V> {
	core: SignalCore<V>,
	_parent_sub: RefCell<Option<Subscription<V>>>,
}

pub fn new<V: 'static + Clone>(parent: Signal<V>) -> Signal<V> {
	let node = Rc::new(Event {
		core: SignalCore::new(),
		_parent_sub: RefCell::new(None),
	});
	let sub = link(&node, parent.node().clone(), |node, t: Transaction<V>| {
		node.core.push_transaction(t);
	});
	*node._parent_sub.borrow_mut() = Some(sub);
	Signal::from_node(node)
}

impl<V: 'static + Clone> DelegateSignalCore<V> for Event<V> {
	fn signal_core(&self) -> &SignalCore<V> {
		&self.core
	}

	fn compute_latest_value(&self) -> LatestValue<V> {
		LatestValue::None
	}
}

#[cfg(test)]
mod tests {
	use std::{cell::RefCell, rc::Rc};

	use crate::input::Input;

	#[test]
	fn fresh_subscriber_is_never_primed_even_if_parent_has_a_value() {
		let x = Input::new(1);
		let e = x.signal().event();
		let seen = Rc::new(RefCell::new(Vec::new()));
		let seen_clone = seen.clone();
		let _out = e.output(move |v| seen_clone.borrow_mut().push(v));
		assert!(seen.borrow().is_empty());
		x.assign(2);
		assert_eq!(*seen.borrow(), vec![2]);
	}
}
