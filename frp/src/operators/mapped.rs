use std::{cell::RefCell, rc::Rc};

use frp_core::{DelegateSignalCore, LatestValue, SignalCore, Transaction};

use crate::{link::link, signal::Signal};

/// A pure, total, 1:1 transform of every transaction.
struct Mapped<V, W> {
	core: SignalCore<W>,
	f: Rc<dyn Fn(V) -> W>,
	parent: Signal<V>,
	_parent_sub: RefCell<Option<frp_core::Subscription<V>>>,
}

pub fn new<V: 'static + Clone, W: 'static + Clone>(
	parent: Signal<V>,
	f: impl 'static + Fn(V) -> W,
) -> Signal<W> {
	let node = Rc::new(Mapped {
		core: SignalCore::new(),
		f: Rc::new(f),
		parent: parent.clone(),
		_parent_sub: RefCell::new(None),
	});
	let sub = link(&node, parent.node().clone(), |node, t: Transaction<V>| {
		node.core.push_transaction(t.map(|v| (node.f)(v)));
	});
	*node._parent_sub.borrow_mut() = Some(sub);
	Signal::from_node(node)
}

impl<V: 'static + Clone, W: 'static + Clone> DelegateSignalCore<W> for Mapped<V, W> {
	fn signal_core(&self) -> &SignalCore<W> {
		&self.core
	}

	fn compute_latest_value(&self) -> LatestValue<W> {
		// The thunk must be `'static`, so `f` is cloned as an `Rc`, not borrowed.
		let f = self.f.clone();
		match self.parent.node().latest_value() {
			LatestValue::None => LatestValue::None,
			LatestValue::Stored(v) => LatestValue::Computed(Box::new(move || f(v))),
			LatestValue::Computed(thunk) => LatestValue::Computed(Box::new(move || f(thunk()))),
		}
	}
}

#[cfg(test)]
mod tests {
	use std::{cell::RefCell, rc::Rc};

	use crate::input::Input;

	#[test]
	fn maps_values_through() {
		let x = Input::new(1);
		let doubled = x.signal().map(|v| v * 2);
		let seen = Rc::new(RefCell::new(Vec::new()));
		let seen_clone = seen.clone();
		let _out = doubled.output(move |v| seen_clone.borrow_mut().push(v));
		x.assign(3);
		assert_eq!(*seen.borrow(), vec![2, 6]);
	}

	#[test]
	fn primes_fresh_subscriber_with_mapped_current_value() {
		let x = Input::new(5);
		let doubled = x.signal().map(|v| v * 2);
		let seen = Rc::new(RefCell::new(Vec::new()));
		let seen_clone = seen.clone();
		let _out = doubled.output(move |v| seen_clone.borrow_mut().push(v));
		assert_eq!(*seen.borrow(), vec![10]);
	}
}
