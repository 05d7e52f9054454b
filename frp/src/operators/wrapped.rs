use std::{cell::RefCell, rc::Rc};

use frp_core::{DelegateSignalCore, LatestValue, SignalCore, Subscription, Transaction};

use crate::{link::link, signal::Signal};

/// An erasing identity wrapper. Forwards transactions and
/// `latest_value` unchanged; exists so `Signal::signal` can hand out a handle
/// that is type-erased the same way every other operator's output is,
/// without leaking which concrete node sits underneath.
struct Wrapped<V> {
	core: SignalCore<V>,
	parent: Signal<V>,
	_parent_sub: RefCell<Option<Subscription<V>>>,
}

pub fn new<V: 'static + Clone>(parent: Signal<V>) -> Signal<V> {
	let node = Rc::new(Wrapped {
		core: SignalCore::new(),
		parent: parent.clone(),
		_parent_sub: RefCell::new(None),
	});
	let sub = link(&node, parent.node().clone(), |node, t: Transaction<V>| {
		node.core.push_transaction(t);
	});
	*node._parent_sub.borrow_mut() = Some(sub);
	Signal::from_node(node)
}

impl<V: 'static + Clone> DelegateSignalCore<V> for Wrapped<V> {
	fn signal_core(&self) -> &SignalCore<V> {
		&self.core
	}

	fn compute_latest_value(&self) -> LatestValue<V> {
		self.parent.node().latest_value()
	}
}

#[cfg(test)]
mod tests {
	use frp_core::SignalNode;

	use crate::input::Input;

	#[test]
	fn preserves_current_value() {
		let x = Input::new(1);
		let wrapped = x.signal().signal();
		assert_eq!(wrapped.node().latest_value().get(), Some(1));
	}
}
