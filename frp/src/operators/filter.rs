use std::{cell::RefCell, rc::Rc};

use frp_core::{DelegateSignalCore, LatestValue, SignalCore, Subscription, Transaction};

use crate::{link::link, signal::Signal};

/// Admits only values for which `p` holds. A rejected `End(v)` becomes
/// `Cancel` rather than being dropped, so downstream nodes still see the
/// transaction resolve. Does NOT override `latest_value` with a cache of its
/// own (S2): every pull re-delegates to the parent's current `latest_value`
/// and re-applies `p`, so a fresh subscriber is primed exactly when the
/// parent's current value happens to satisfy the predicate right now — not
/// "the last admitted value ever pushed", which is what [`Signal::latest`]
/// is for.
struct Filter<V> {
	core: SignalCore<V>,
	parent: Signal<V>,
	p: Box<dyn Fn(&V) -> bool>,
	_parent_sub: RefCell<Option<Subscription<V>>>,
}

pub fn new<V: 'static + Clone>(parent: Signal<V>, p: impl 'static + Fn(&V) -> bool) -> Signal<V> {
	let node = Rc::new(Filter {
		core: SignalCore::new(),
		parent: parent.clone(),
		p: Box::new(p),
		_parent_sub: RefCell::new(None),
	});
	let sub = link(&node, parent.node().clone(), |node, t: Transaction<V>| {
		let t = match t {
			Transaction::End(v) if !(node.p)(&v) => Transaction::Cancel,
			other => other,
		};
		node.core.push_transaction(t);
	});
	*node._parent_sub.borrow_mut() = Some(sub);
	Signal::from_node(node)
}

impl<V: 'static + Clone> DelegateSignalCore<V> for Filter<V> {
	fn signal_core(&self) -> &SignalCore<V> {
		&self.core
	}

	fn compute_latest_value(&self) -> LatestValue<V> {
		match self.parent.node().latest_value().get() {
			Some(v) if (self.p)(&v) => LatestValue::Stored(v),
			_ => LatestValue::None,
		}
	}
}

#[cfg(test)]
mod tests {
	use std::{cell::RefCell, rc::Rc};

	use crate::input::Input;

	#[test]
	fn rejects_values_that_fail_the_predicate() {
		let x = Input::new(1);
		let evens = x.signal().filter(|v| v % 2 == 0);
		let seen = Rc::new(RefCell::new(Vec::new()));
		let seen_clone = seen.clone();
		let _out = evens.output(move |v| seen_clone.borrow_mut().push(v));
		x.assign(2);
		x.assign(3);
		x.assign(4);
		assert_eq!(*seen.borrow(), vec![2, 4]);
	}

	#[test]
	fn fresh_subscriber_is_primed_exactly_when_parents_current_value_passes() {
		let x = Input::new(0);
		let under_five = x.signal().filter(|v| *v < 5);
		let seen = Rc::new(RefCell::new(Vec::new()));
		let seen_clone = seen.clone();
		let _out = under_five.output(move |v| seen_clone.borrow_mut().push(v));
		x.assign(3);
		x.assign(4);
		x.assign(7);
		assert_eq!(*seen.borrow(), vec![0, 3, 4]);
	}

	#[test]
	fn fresh_subscriber_is_not_primed_when_parents_current_value_fails() {
		let x = Input::new(1);
		let evens = x.signal().filter(|v| v % 2 == 0);
		let seen = Rc::new(RefCell::new(Vec::new()));
		let seen_clone = seen.clone();
		let _out = evens.output(move |v| seen_clone.borrow_mut().push(v));
		assert!(seen.borrow().is_empty());
	}
}
