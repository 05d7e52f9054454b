use std::{cell::RefCell, rc::Rc};

use frp_core::{DelegateSignalCore, LatestValue, SignalCore, Subscription, Transaction};

use crate::{link::link, signal::Signal};

/// Caches the most recent `End`-phase value so a fresh subscriber is
/// always primed, even if the parent itself reports no `latest_value` (e.g.
/// an [`crate::operators::event`] or a [`crate::operators::filter`]).
struct Latest<V> {
	core: SignalCore<V>,
	cached: RefCell<Option<V>>,
	_parent_sub: RefCell<Option<Subscription<V>>>,
}

/// `Latest(Latest(s)) ≡ Latest(s)`: if `parent` already reports a stored
/// value for every state it's ever in, wrapping it again would only add an
/// indirection, so this returns `parent` unchanged.
pub fn new<V: 'static + Clone>(parent: Signal<V>) -> Signal<V> {
	if parent.node().latest_value().has() {
		return parent;
	}
	let node = Rc::new(Latest {
		core: SignalCore::new(),
		cached: RefCell::new(None),
		_parent_sub: RefCell::new(None),
	});
	let sub = link(&node, parent.node().clone(), |node, t: Transaction<V>| {
		if let Transaction::End(v) = &t {
			*node.cached.borrow_mut() = Some(v.clone());
		}
		node.core.push_transaction(t);
	});
	*node._parent_sub.borrow_mut() = Some(sub);
	Signal::from_node(node)
}

impl<V: 'static + Clone> DelegateSignalCore<V> for Latest<V> {
	fn signal_core(&self) -> &SignalCore<V> {
		&self.core
	}

	fn compute_latest_value(&self) -> LatestValue<V> {
		match &*self.cached.borrow() {
			Some(v) => LatestValue::Stored(v.clone()),
			None => LatestValue::None,
		}
	}
}

#[cfg(test)]
mod tests {
	use std::{cell::RefCell, rc::Rc};

	use frp_core::SignalNode;

	use crate::input::Input;

	#[test]
	fn caches_last_value_for_priming() {
		let x = Input::new(1);
		let evens = x.signal().filter(|v| v % 2 == 0);
		let cached = evens.latest();
		x.assign(4);
		assert_eq!(cached.node().latest_value().get(), Some(4));

		let seen = Rc::new(RefCell::new(Vec::new()));
		let seen_clone = seen.clone();
		let _out = cached.output(move |v| seen_clone.borrow_mut().push(v));
		assert_eq!(*seen.borrow(), vec![4]);
	}

	#[test]
	fn latest_of_latest_is_identity() {
		let x = Input::new(1);
		let once = x.signal().latest();
		let twice = once.latest();
		assert_eq!(once, twice);
	}
}
