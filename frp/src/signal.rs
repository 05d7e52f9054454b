use std::{
	fmt::{self, Debug, Formatter},
	rc::Rc,
	time::Duration,
};

use frp_core::{Clock, Scheduler, SignalNode};

use crate::{
	operators::{event, filter, gate, joined, latest, map_with, mapped, on_change, throttle, wrapped},
	receiver::{Output, Receiver, WillOutput},
};

/// A node in the dataflow graph producing values of type `V`.
///
/// Cheap to clone (an `Rc` clone of the underlying node); identity, not
/// structural value, is what [`PartialEq`] compares. Deliberately not
/// `Send`/`Sync` — the whole graph lives on one thread (see the
/// concurrency design notes), so moving a `Signal` across threads is a
/// compile error rather than a runtime hazard.
pub struct Signal<V: Clone>(pub(crate) Rc<dyn SignalNode<V>>);

impl<V: 'static + Clone> Clone for Signal<V> {
	fn clone(&self) -> Self {
		Signal(self.0.clone())
	}
}

impl<V: 'static + Clone> PartialEq for Signal<V> {
	fn eq(&self, other: &Self) -> bool {
		Rc::ptr_eq(&self.0, &other.0)
	}
}

impl<V: 'static + Clone> Eq for Signal<V> {}

impl<V: 'static + Clone> Debug for Signal<V> {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.debug_tuple("Signal").field(&Rc::as_ptr(&self.0)).finish()
	}
}

impl<V: 'static + Clone> Signal<V> {
	pub(crate) fn from_node(node: Rc<dyn SignalNode<V>>) -> Self {
		Signal(node)
	}

	pub(crate) fn node(&self) -> &Rc<dyn SignalNode<V>> {
		&self.0
	}

	/// Maps this signal with a pure, total `f`. Every transaction is
	/// translated 1:1: `Begin` stays `Begin`, `End(v)` becomes `End(f(v))`,
	/// `Cancel` stays `Cancel`.
	pub fn map<W: 'static + Clone>(&self, f: impl 'static + Fn(V) -> W) -> Signal<W> {
		mapped::new(self.clone(), f)
	}

	/// Admits only the values for which `p` holds; rejected values become
	/// `Cancel` rather than being silently dropped from the transaction
	/// protocol. Has no stored `latest_value` of its own — pair with
	/// [`Signal::latest`] when a cached value is wanted.
	pub fn filter(&self, p: impl 'static + Fn(&V) -> bool) -> Signal<V> {
		filter::new(self.clone(), p)
	}

	/// Forwards every transaction verbatim but reports `latest_value` as
	/// always absent, so fresh subscribers are never primed.
	pub fn event(&self) -> Signal<V> {
		event::new(self.clone())
	}

	/// Returns an erased handle to this same node without changing
	/// transaction semantics — the `Wrapped` operator.
	pub fn signal(&self) -> Signal<V> {
		wrapped::new(self.clone())
	}

	/// Caches the most recent `End`-phase value. Returns `self` unchanged
	/// when this signal already reports a `Stored` value, per the
	/// `Latest(Latest(s)) ≡ Latest(s)` identity optimization.
	pub fn latest(&self) -> Signal<V> {
		latest::new(self.clone())
	}

	/// Samples `aux`'s latest value (pull) each time this signal's parent
	/// emits `End`; cancels if `aux` has no value yet.
	pub fn map_with<A: 'static + Clone, W: 'static + Clone>(
		&self,
		aux: &Signal<A>,
		f: impl 'static + Fn(V, A) -> W,
	) -> Signal<W> {
		map_with::new1(self.clone(), aux.clone(), f)
	}

	/// Two-auxiliary variant of [`Signal::map_with`].
	pub fn map_with2<A1: 'static + Clone, A2: 'static + Clone, W: 'static + Clone>(
		&self,
		aux1: &Signal<A1>,
		aux2: &Signal<A2>,
		f: impl 'static + Fn(V, A1, A2) -> W,
	) -> Signal<W> {
		map_with::new2(self.clone(), aux1.clone(), aux2.clone(), f)
	}

	/// Rate-limits this signal to at most one emission per `interval`,
	/// using `clock`/`scheduler` for timing (see the `Clock`/
	/// `Scheduler` traits in `frp-core`).
	pub fn throttle(
		&self,
		interval: Duration,
		clock: Rc<dyn Clock>,
		scheduler: Rc<dyn Scheduler>,
	) -> Signal<V> {
		throttle::new(self.clone(), interval, clock, scheduler)
	}

	/// Subscribes `cb` to every `End`-phase value. Dropping the returned
	/// [`Output`] deregisters it. The conceptual `-->` sugar.
	#[must_use = "an Output is cancelled when dropped"]
	pub fn output(&self, cb: impl 'static + FnMut(V)) -> Output<V> {
		Output::new(self.clone(), cb)
	}

	/// Subscribes `cb` to run once per `Begin`. Dropping the returned
	/// [`WillOutput`] deregisters it.
	#[must_use = "a WillOutput is cancelled when dropped"]
	pub fn will_output(&self, cb: impl 'static + FnMut()) -> WillOutput<V> {
		WillOutput::new(self.clone(), cb)
	}

	/// Subscribes `cb` to every transaction verbatim. Lower-level than
	/// [`Signal::output`]; mostly useful for composing new operators.
	#[must_use = "a Receiver is cancelled when dropped"]
	pub fn subscribe(&self, cb: impl 'static + FnMut(frp_core::Transaction<V>)) -> Receiver<V> {
		Receiver::new(self.clone(), cb)
	}
}

impl<V: 'static + Clone + PartialEq> Signal<V> {
	/// Suppresses repeated equal values: never emits `End(v)` with the same
	/// `v` twice in succession.
	pub fn on_change(&self) -> Signal<V> {
		on_change::new(self.clone())
	}
}

impl<V: 'static + Clone> Signal<Signal<V>> {
	/// Flattens a signal-of-signals: forwards whichever inner signal was
	/// most recently announced by the outer signal.
	pub fn join(&self) -> Signal<V> {
		joined::new(self.clone())
	}
}

impl Signal<bool> {
	/// Releases at most one deferred value from `source` per rising edge
	/// (or concurrent change) of this boolean signal.
	pub fn gate<V: 'static + Clone>(&self, source: Signal<V>) -> Signal<V> {
		gate::new(source, self.clone())
	}
}
