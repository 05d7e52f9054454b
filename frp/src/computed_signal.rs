use std::rc::Rc;

use frp_core::{DelegateSignalCore, LatestValue, SignalCore};

use crate::signal::Signal;

/// A signal wrapping a thunk, computed on demand. Never pushes;
/// `latest_value` is always `Computed(thunk)` — every pull re-runs `thunk`,
/// so it must be cheap and side-effect-free, the same contract `map`'s pure
/// total `f` is held to.
struct ComputedSignalNode<V> {
	core: SignalCore<V>,
	thunk: Rc<dyn Fn() -> V>,
}

impl<V: 'static + Clone> DelegateSignalCore<V> for ComputedSignalNode<V> {
	fn signal_core(&self) -> &SignalCore<V> {
		&self.core
	}

	fn compute_latest_value(&self) -> LatestValue<V> {
		let thunk = self.thunk.clone();
		LatestValue::Computed(Box::new(move || thunk()))
	}
}

/// Builds a `Signal<V>` that never pushes and whose `latest_value` is
/// recomputed from `thunk` on every pull.
pub fn computed<V: 'static + Clone>(thunk: impl 'static + Fn() -> V) -> Signal<V> {
	Signal::from_node(Rc::new(ComputedSignalNode {
		core: SignalCore::new(),
		thunk: Rc::new(thunk),
	}))
}
