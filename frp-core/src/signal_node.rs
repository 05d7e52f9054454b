use crate::{keyed_set::KeyedSet, latest_value::LatestValue, transaction::Transaction};

/// The interface every graph node — leaf or operator — presents to the rest
/// of the graph: a push side (`add_observer`/`remove_observer`/
/// `push_transaction`/`push_value`) and a pull side (`latest_value`).
///
/// Implemented via dynamic dispatch (`Rc<dyn SignalNode<V>>`) rather than a
/// tagged enum, per the "dynamic dispatch" design note: new operator kinds
/// can be added without touching existing code.
pub trait SignalNode<V: Clone> {
	/// A pull-mode snapshot of this node's current value. See [`LatestValue`].
	fn latest_value(&self) -> LatestValue<V>;

	/// Registers `cb` as an observer and returns a key that can later be
	/// passed to [`SignalNode::remove_observer`].
	///
	/// If this node currently [`has`](LatestValue::has) a value, `cb` is
	/// primed synchronously with a `(Begin, End(v))` pair *before* being
	/// inserted into the observer set — this is the "primer handshake" new
	/// subscribers rely on to see current state without waiting for the next
	/// external event.
	fn add_observer(&self, cb: Box<dyn FnMut(Transaction<V>)>) -> u64;

	/// Deregisters the observer registered under `key`. Idempotent.
	fn remove_observer(&self, key: u64);

	/// Synchronously invokes every currently-registered observer with `t`,
	/// in the observer set's iteration order.
	fn push_transaction(&self, t: Transaction<V>);

	/// Shorthand for `push_transaction(Begin)` then `push_transaction(End(v))`.
	fn push_value(&self, v: V) {
		self.push_transaction(Transaction::Begin);
		self.push_transaction(Transaction::End(v));
	}
}

/// Owns an observer [`KeyedSet`] and the push-side half of [`SignalNode`].
///
/// Every concrete node (leaf or operator) embeds one of these and implements
/// [`DelegateSignalCore`] to pick up [`SignalNode`] via the blanket impl
/// below, instead of hand-writing the observer bookkeeping on every type.
pub struct SignalCore<V> {
	observers: KeyedSet<Box<dyn FnMut(Transaction<V>)>>,
}

impl<V> Default for SignalCore<V> {
	fn default() -> Self {
		Self::new()
	}
}

impl<V> SignalCore<V> {
	#[must_use]
	pub fn new() -> Self {
		Self {
			observers: KeyedSet::new(),
		}
	}

	pub fn push_transaction(&self, t: Transaction<V>)
	where
		V: Clone,
	{
		self.observers.for_each_mut(|cb| cb(t.clone()));
	}

	pub fn push_value(&self, v: V)
	where
		V: Clone,
	{
		self.push_transaction(Transaction::Begin);
		self.push_transaction(Transaction::End(v));
	}

	/// Performs the primer handshake against `latest` (the node's current
	/// [`LatestValue`]) and then inserts `cb` into the observer set.
	pub fn add_observer(&self, latest: LatestValue<V>, mut cb: Box<dyn FnMut(Transaction<V>)>) -> u64 {
		if latest.has() {
			if let Some(v) = latest.get() {
				cb(Transaction::Begin);
				cb(Transaction::End(v));
			}
		}
		self.observers.add(cb)
	}

	pub fn remove_observer(&self, key: u64) {
		self.observers.remove(key);
	}

	pub fn observer_count(&self) -> usize {
		self.observers.len()
	}
}

/// Nodes implement this instead of [`SignalNode`] directly: the blanket impl
/// below wires `add_observer`/`remove_observer`/`push_transaction` up to the
/// node's embedded [`SignalCore`], leaving only `latest_value` (the one bit
/// of policy that actually differs per node kind) to implement.
///
/// Mirrors the reference workspace's `DelegateSource` pattern of factoring a
/// trait's mechanical half into a blanket impl over a narrower delegate trait.
pub trait DelegateSignalCore<V: Clone> {
	fn signal_core(&self) -> &SignalCore<V>;
	fn compute_latest_value(&self) -> LatestValue<V>;
}

impl<V: Clone, T: ?Sized + DelegateSignalCore<V>> SignalNode<V> for T {
	fn latest_value(&self) -> LatestValue<V> {
		self.compute_latest_value()
	}

	fn add_observer(&self, cb: Box<dyn FnMut(Transaction<V>)>) -> u64 {
		self.signal_core().add_observer(self.compute_latest_value(), cb)
	}

	fn remove_observer(&self, key: u64) {
		self.signal_core().remove_observer(key);
	}

	fn push_transaction(&self, t: Transaction<V>) {
		self.signal_core().push_transaction(t);
	}
}
