use frp_core::{Subscription, Transaction};

use crate::signal::Signal;

/// A scoped subscription to every transaction of a `Signal<V>`. Owns its
/// registration: dropping it deregisters before any further push on its
/// source can observe it.
#[must_use = "a Receiver is cancelled when dropped"]
pub struct Receiver<V: Clone> {
	_subscription: Subscription<V>,
}

impl<V: 'static + Clone> Receiver<V> {
	pub(crate) fn new(source: Signal<V>, mut cb: impl 'static + FnMut(Transaction<V>)) -> Self {
		let subscription = Subscription::new(source.node().clone(), Box::new(move |t| cb(t)));
		Self {
			_subscription: subscription,
		}
	}
}

/// A [`Receiver`] whose callback only runs on the `End`-phase value of each
/// transaction.
#[must_use = "an Output is cancelled when dropped"]
pub struct Output<V: Clone> {
	_subscription: Subscription<V>,
}

impl<V: 'static + Clone> Output<V> {
	pub(crate) fn new(source: Signal<V>, mut cb: impl 'static + FnMut(V)) -> Self {
		let subscription = Subscription::new(
			source.node().clone(),
			Box::new(move |t| {
				if let Transaction::End(v) = t {
					cb(v);
				}
			}),
		);
		Self {
			_subscription: subscription,
		}
	}
}

/// A [`Receiver`] whose (parameterless) callback runs once per `Begin`.
/// Symmetric to [`Output`].
#[must_use = "a WillOutput is cancelled when dropped"]
pub struct WillOutput<V: Clone> {
	_subscription: Subscription<V>,
}

impl<V: 'static + Clone> WillOutput<V> {
	pub(crate) fn new(source: Signal<V>, mut cb: impl 'static + FnMut()) -> Self {
		let subscription = Subscription::new(
			source.node().clone(),
			Box::new(move |t| {
				if let Transaction::Begin = t {
					cb();
				}
			}),
		);
		Self {
			_subscription: subscription,
		}
	}
}
