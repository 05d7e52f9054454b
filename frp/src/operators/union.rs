use std::{cell::RefCell, rc::Rc};

use frp_core::{DelegateSignalCore, LatestValue, SignalCore, Subscription, Transaction};

use crate::{link::link, signal::Signal};

/// Forwards every transaction from any parent, unchanged, in
/// subscription order. No coalescing — simultaneous events from distinct
/// parents produce distinct downstream transactions, one per parent.
struct Union<V> {
	core: SignalCore<V>,
	parents: Vec<Signal<V>>,
	_parent_subs: RefCell<Vec<Subscription<V>>>,
}

/// Builds a `Signal<V>` forwarding every parent's transactions verbatim.
///
/// `latest_value` is not specified explicitly; this samples parents
/// in order and reports the first one with a value, mirroring it exactly —
/// the same "recompute fresh from the parent at subscribe time" pattern
/// [`crate::operators::mapped`] and [`crate::operators::filter`] use, rather
/// than depending on whatever forwarding happened during construction (which
/// would have no observers yet to reach).
pub fn new<V: 'static + Clone>(parents: &[Signal<V>]) -> Signal<V> {
	let node = Rc::new(Union {
		core: SignalCore::new(),
		parents: parents.to_vec(),
		_parent_subs: RefCell::new(Vec::new()),
	});
	let subs = parents
		.iter()
		.map(|parent| {
			link(&node, parent.node().clone(), |node, t: Transaction<V>| {
				node.core.push_transaction(t);
			})
		})
		.collect();
	*node._parent_subs.borrow_mut() = subs;
	Signal::from_node(node)
}

impl<V: 'static + Clone> DelegateSignalCore<V> for Union<V> {
	fn signal_core(&self) -> &SignalCore<V> {
		&self.core
	}

	fn compute_latest_value(&self) -> LatestValue<V> {
		for parent in &self.parents {
			if let Some(v) = parent.node().latest_value().get() {
				return LatestValue::Stored(v);
			}
		}
		LatestValue::None
	}
}
