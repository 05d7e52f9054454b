/// A pull-mode snapshot of a node's current value, possibly lazy.
///
/// `None` means no value has ever flowed through the node (e.g. a fresh
/// `Filter` node, in the `frp` crate, before its first admitted value).
/// `Stored` is an eagerly cached value. `Computed` defers the actual
/// computation to the moment [`LatestValue::get`] is called, so that
/// operators like `Mapped` don't pay for a transform nobody reads.
pub enum LatestValue<V> {
	None,
	Stored(V),
	Computed(Box<dyn FnOnce() -> V>),
}

impl<V> LatestValue<V> {
	/// `true` for [`LatestValue::Stored`] and [`LatestValue::Computed`].
	pub fn has(&self) -> bool {
		!matches!(self, LatestValue::None)
	}

	/// Materializes the value, running the thunk for [`LatestValue::Computed`].
	pub fn get(self) -> Option<V> {
		match self {
			LatestValue::None => None,
			LatestValue::Stored(v) => Some(v),
			LatestValue::Computed(thunk) => Some(thunk()),
		}
	}
}

impl<V: std::fmt::Debug> std::fmt::Debug for LatestValue<V> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			LatestValue::None => f.write_str("LatestValue::None"),
			LatestValue::Stored(v) => f.debug_tuple("LatestValue::Stored").field(v).finish(),
			LatestValue::Computed(_) => f.write_str("LatestValue::Computed(..)"),
		}
	}
}
