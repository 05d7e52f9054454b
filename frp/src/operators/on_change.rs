use std::{cell::RefCell, rc::Rc};

use frp_core::{DelegateSignalCore, LatestValue, SignalCore, Subscription, Transaction};

use crate::{link::link, signal::Signal};

/// Suppresses a repeated `End(v)` when `v` equals the previously
/// emitted value. A suppressed transaction still resolves, as `Cancel`.
struct OnChange<V> {
	core: SignalCore<V>,
	last: RefCell<Option<V>>,
	_parent_sub: RefCell<Option<Subscription<V>>>,
}

pub fn new<V: 'static + Clone + PartialEq>(parent: Signal<V>) -> Signal<V> {
	let node = Rc::new(OnChange {
		core: SignalCore::new(),
		last: RefCell::new(None),
		_parent_sub: RefCell::new(None),
	});
	let sub = link(&node, parent.node().clone(), |node, t: Transaction<V>| {
		let t = match t {
			Transaction::End(v) => {
				let mut last = node.last.borrow_mut();
				if last.as_ref() == Some(&v) {
					Transaction::Cancel
				} else {
					*last = Some(v.clone());
					Transaction::End(v)
				}
			}
			other => other,
		};
		node.core.push_transaction(t);
	});
	*node._parent_sub.borrow_mut() = Some(sub);
	Signal::from_node(node)
}

impl<V: 'static + Clone + PartialEq> DelegateSignalCore<V> for OnChange<V> {
	fn signal_core(&self) -> &SignalCore<V> {
		&self.core
	}

	fn compute_latest_value(&self) -> LatestValue<V> {
		match &*self.last.borrow() {
			Some(v) => LatestValue::Stored(v.clone()),
			None => LatestValue::None,
		}
	}
}

#[cfg(test)]
mod tests {
	use std::{cell::RefCell, rc::Rc};

	use crate::input::Input;

	#[test]
	fn suppresses_repeated_equal_values() {
		let x = Input::new(1);
		let changes = x.signal().on_change();
		let seen = Rc::new(RefCell::new(Vec::new()));
		let seen_clone = seen.clone();
		let _out = changes.output(move |v| seen_clone.borrow_mut().push(v));
		x.assign(1);
		x.assign(2);
		x.assign(2);
		x.assign(3);
		assert_eq!(*seen.borrow(), vec![1, 2, 3]);
	}
}
