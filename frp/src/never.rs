use std::{marker::PhantomData, rc::Rc};

use frp_core::{DelegateSignalCore, LatestValue, SignalCore};

use crate::signal::Signal;

/// An inert signal. Never pushes; `latest_value` is always `None`;
/// exists mainly as a placeholder parent for generic code (e.g. an `Input`
/// of an `Option<Signal<V>>`-like slot before anything has been plugged in).
struct NeverNode<V> {
	core: SignalCore<V>,
	_marker: PhantomData<V>,
}

impl<V: 'static + Clone> DelegateSignalCore<V> for NeverNode<V> {
	fn signal_core(&self) -> &SignalCore<V> {
		&self.core
	}

	fn compute_latest_value(&self) -> LatestValue<V> {
		LatestValue::None
	}
}

/// Builds a `Signal<V>` that never emits and never primes a subscriber.
pub fn never<V: 'static + Clone>() -> Signal<V> {
	Signal::from_node(Rc::new(NeverNode {
		core: SignalCore::new(),
		_marker: PhantomData,
	}))
}
