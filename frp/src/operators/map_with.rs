use std::{cell::RefCell, rc::Rc};

use frp_core::{DelegateSignalCore, LatestValue, SignalCore, SignalNode, Subscription, Transaction};

use crate::{link::link, signal::Signal};

/// One auxiliary: `parent`'s `End` drives emission; `aux`'s
/// `latest_value` is sampled (pulled, never subscribed to) at that moment.
/// Cancels if `aux` has nothing yet.
struct MappedWith1<V, A, W> {
	core: SignalCore<W>,
	aux: Signal<A>,
	f: Box<dyn Fn(V, A) -> W>,
	_parent_sub: RefCell<Option<Subscription<V>>>,
}

pub fn new1<V: 'static + Clone, A: 'static + Clone, W: 'static + Clone>(
	parent: Signal<V>,
	aux: Signal<A>,
	f: impl 'static + Fn(V, A) -> W,
) -> Signal<W> {
	let node = Rc::new(MappedWith1 {
		core: SignalCore::new(),
		aux,
		f: Box::new(f),
		_parent_sub: RefCell::new(None),
	});
	let sub = link(&node, parent.node().clone(), |node, t: Transaction<V>| {
		let t = match t {
			Transaction::Begin => Transaction::Begin,
			Transaction::End(v) => match node.aux.node().latest_value().get() {
				Some(a) => Transaction::End((node.f)(v, a)),
				None => Transaction::Cancel,
			},
			Transaction::Cancel => Transaction::Cancel,
		};
		node.core.push_transaction(t);
	});
	*node._parent_sub.borrow_mut() = Some(sub);
	Signal::from_node(node)
}

impl<V: 'static + Clone, A: 'static + Clone, W: 'static + Clone> DelegateSignalCore<W>
	for MappedWith1<V, A, W>
{
	fn signal_core(&self) -> &SignalCore<W> {
		&self.core
	}

	fn compute_latest_value(&self) -> LatestValue<W> {
		// Not `self.parent`: `MappedWith1` doesn't keep its own parent handle
		// (only a subscription), since the pull side only ever needs `aux`.
		LatestValue::None
	}
}

/// Two auxiliaries.
struct MappedWith2<V, A1, A2, W> {
	core: SignalCore<W>,
	aux1: Signal<A1>,
	aux2: Signal<A2>,
	f: Box<dyn Fn(V, A1, A2) -> W>,
	_parent_sub: RefCell<Option<Subscription<V>>>,
}

pub fn new2<V: 'static + Clone, A1: 'static + Clone, A2: 'static + Clone, W: 'static + Clone>(
	parent: Signal<V>,
	aux1: Signal<A1>,
	aux2: Signal<A2>,
	f: impl 'static + Fn(V, A1, A2) -> W,
) -> Signal<W> {
	let node = Rc::new(MappedWith2 {
		core: SignalCore::new(),
		aux1,
		aux2,
		f: Box::new(f),
		_parent_sub: RefCell::new(None),
	});
	let sub = link(&node, parent.node().clone(), |node, t: Transaction<V>| {
		let t = match t {
			Transaction::Begin => Transaction::Begin,
			Transaction::End(v) => {
				match (node.aux1.node().latest_value().get(), node.aux2.node().latest_value().get()) {
					(Some(a1), Some(a2)) => Transaction::End((node.f)(v, a1, a2)),
					_ => Transaction::Cancel,
				}
			}
			Transaction::Cancel => Transaction::Cancel,
		};
		node.core.push_transaction(t);
	});
	*node._parent_sub.borrow_mut() = Some(sub);
	Signal::from_node(node)
}

impl<V: 'static + Clone, A1: 'static + Clone, A2: 'static + Clone, W: 'static + Clone>
	DelegateSignalCore<W> for MappedWith2<V, A1, A2, W>
{
	fn signal_core(&self) -> &SignalCore<W> {
		&self.core
	}

	fn compute_latest_value(&self) -> LatestValue<W> {
		LatestValue::None
	}
}

#[cfg(test)]
mod tests {
	use std::{cell::RefCell, rc::Rc};

	use crate::input::Input;

	#[test]
	fn samples_aux_at_parent_end() {
		let x = Input::new(1);
		let aux = Input::new(10);
		let combined = x.signal().map_with(&aux.signal(), |v, a| v + a);
		let seen = Rc::new(RefCell::new(Vec::new()));
		let seen_clone = seen.clone();
		let _out = combined.output(move |v| seen_clone.borrow_mut().push(v));
		assert_eq!(*seen.borrow(), vec![11]);
		aux.assign(100);
		x.assign(2);
		assert_eq!(*seen.borrow(), vec![11, 102]);
	}

	#[test]
	fn cancels_when_aux_has_no_value() {
		let x = Input::new(1);
		let aux_event = Input::new(0).signal().event();
		let combined = x.signal().map_with(&aux_event, |v, a| v + a);
		let seen = Rc::new(RefCell::new(Vec::new()));
		let seen_clone = seen.clone();
		let _out = combined.output(move |v| seen_clone.borrow_mut().push(v));
		x.assign(2);
		assert!(seen.borrow().is_empty());
	}
}
