use std::rc::Rc;

use frp_core::{SignalNode, Subscription, Transaction};

/// Subscribes `node` to `parent`, routing each transaction through `handler`
/// via a *weak* back-reference to `node`.
///
/// This is the "polymorphic back-edge rule" from the design notes made
/// concrete: the closure registered on `parent` never holds a strong
/// reference to `node`, so a subscription from a node to its parent can
/// never keep that node alive by itself. If `node` has already been dropped
/// by the time `parent` pushes, the upgrade fails and the transaction is
/// silently not delivered (there is nothing left to deliver it to).
///
/// Call this only *after* `node` is fully constructed and owned by an `Rc`:
/// if `parent` already has a value, registering the subscription primes it
/// synchronously, and the weak upgrade must succeed for that priming to
/// reach `node`.
pub(crate) fn link<T: 'static, P: Clone + 'static>(
	node: &Rc<T>,
	parent: Rc<dyn SignalNode<P>>,
	handler: impl Fn(&Rc<T>, Transaction<P>) + 'static,
) -> Subscription<P> {
	let weak = Rc::downgrade(node);
	Subscription::new(
		parent,
		Box::new(move |t| {
			if let Some(strong) = weak.upgrade() {
				handler(&strong, t);
			}
		}),
	)
}
