use std::rc::Rc;

use frp_core::{DelegateSignalCore, LatestValue, SignalCore};

use crate::signal::Signal;

/// A signal that never pushes and always reports the same
/// `Stored(v)`, priming every subscriber exactly once at registration.
struct ConstNode<V> {
	core: SignalCore<V>,
	value: V,
}

impl<V: 'static + Clone> DelegateSignalCore<V> for ConstNode<V> {
	fn signal_core(&self) -> &SignalCore<V> {
		&self.core
	}

	fn compute_latest_value(&self) -> LatestValue<V> {
		LatestValue::Stored(self.value.clone())
	}
}

/// Builds a `Signal<V>` that never changes, holding `value` forever.
pub fn constant<V: 'static + Clone>(value: V) -> Signal<V> {
	Signal::from_node(Rc::new(ConstNode {
		core: SignalCore::new(),
		value,
	}))
}
