use std::rc::Rc;

use crate::{signal_node::SignalNode, transaction::Transaction};

/// Owns exactly one registration on a `source`'s observer set; dropping it
/// deregisters before any further push on `source` can observe it.
///
/// This is the mechanical half of the reference design's `Receiver`: the
/// `frp` crate's public `Receiver`/`Output`/`WillOutput` types wrap one of
/// these with a user-facing callback shape, and every operator's link to its
/// parent(s) is, internally, one of these too — unifying "a scoped
/// subscription that deregisters on drop" into a single owned type instead of
/// re-deriving the bookkeeping per operator.
pub struct Subscription<V: Clone> {
	source: Rc<dyn SignalNode<V>>,
	key: u64,
}

impl<V: Clone> Subscription<V> {
	/// Registers `cb` on `source` and takes ownership of the resulting key.
	pub fn new(source: Rc<dyn SignalNode<V>>, cb: Box<dyn FnMut(Transaction<V>)>) -> Self {
		let key = source.add_observer(cb);
		Self { source, key }
	}

	pub fn source(&self) -> &Rc<dyn SignalNode<V>> {
		&self.source
	}
}

impl<V: Clone> Drop for Subscription<V> {
	fn drop(&mut self) {
		self.source.remove_observer(self.key);
	}
}
