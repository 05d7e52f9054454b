use std::{
	cell::{Cell, RefCell},
	rc::Rc,
};

use frp_core::{DelegateSignalCore, LatestValue, SignalCore, SignalNode, Subscription, Transaction};

use crate::{link::link, signal::Signal};

/// Defers an upstream value under a boolean gate. Holds at most
/// one deferred value; a fresh upstream `Begin` drops any deferred value
/// still waiting for a rising edge. Source and gate share one
/// `transaction_count`, the same two-parent diamond-suppression bookkeeping
/// [`crate::operators::combine`] uses for N parents.
struct Gate<V> {
	core: SignalCore<V>,
	gate: Signal<bool>,
	deferred: RefCell<Option<V>>,
	transaction_count: Cell<u32>,
	_source_sub: RefCell<Option<Subscription<V>>>,
	_gate_sub: RefCell<Option<Subscription<bool>>>,
}

pub fn new<V: 'static + Clone>(source: Signal<V>, gate: Signal<bool>) -> Signal<V> {
	let gate = gate.latest();
	let node = Rc::new(Gate {
		core: SignalCore::new(),
		gate,
		deferred: RefCell::new(None),
		transaction_count: Cell::new(0),
		_source_sub: RefCell::new(None),
		_gate_sub: RefCell::new(None),
	});

	let source_sub = link(&node, source.node().clone(), |node, t: Transaction<V>| match t {
		Transaction::Begin => {
			node.begin();
			*node.deferred.borrow_mut() = None;
		}
		Transaction::End(v) => {
			*node.deferred.borrow_mut() = Some(v);
			node.end();
		}
		Transaction::Cancel => node.end(),
	});
	*node._source_sub.borrow_mut() = Some(source_sub);

	let gate_sub = link(&node, node.gate.node().clone(), |node, t: Transaction<bool>| match t {
		Transaction::Begin => node.begin(),
		Transaction::End(_) | Transaction::Cancel => node.end(),
	});
	*node._gate_sub.borrow_mut() = Some(gate_sub);

	Signal::from_node(node)
}

impl<V: 'static + Clone> Gate<V> {
	fn begin(&self) {
		let count = self.transaction_count.get();
		if count == 0 {
			self.core.push_transaction(Transaction::Begin);
		}
		self.transaction_count.set(count + 1);
	}

	fn end(&self) {
		let count = self.transaction_count.get();
		assert!(count > 0, "Gate transaction count underflow");
		let count = count - 1;
		self.transaction_count.set(count);
		if count == 0 {
			let gate_open = self.gate.node().latest_value().get() == Some(true);
			// Only a successful release clears `deferred` here: a value that
			// misses this window stays deferred until the next upstream
			// `Begin` discards it.
			let mut deferred = self.deferred.borrow_mut();
			let t = if gate_open && deferred.is_some() {
				Transaction::End(deferred.take().unwrap())
			} else {
				Transaction::Cancel
			};
			drop(deferred);
			self.core.push_transaction(t);
		}
	}
}

impl<V: 'static + Clone> DelegateSignalCore<V> for Gate<V> {
	fn signal_core(&self) -> &SignalCore<V> {
		&self.core
	}

	fn compute_latest_value(&self) -> LatestValue<V> {
		LatestValue::None
	}
}
