use std::{
	cell::{Cell, RefCell},
	rc::Rc,
};

use frp_core::{DelegateSignalCore, LatestValue, SignalCore, SignalNode, Subscription, Transaction};

use crate::{link::link, signal::Signal};

/// Bookkeeping shared by every arity of combiner: the diamond-suppression
/// core shared by every arity. A `Begin` only crosses to the observers the first time
/// `transaction_count` rises off zero; the matching `End`/`Cancel` only
/// crosses when it falls back to zero, after every fanned-in parent has
/// resolved its own `Begin`. This is type-erased on purpose — it only cares
/// about the shape of the protocol, never the parents' value types.
struct CombinerCore {
	transaction_count: Cell<u32>,
	needs_update: Cell<bool>,
}

impl CombinerCore {
	fn new() -> Self {
		Self {
			transaction_count: Cell::new(0),
			needs_update: Cell::new(false),
		}
	}

	fn begin(&self, emit_begin: impl FnOnce()) {
		let count = self.transaction_count.get();
		if count == 0 {
			emit_begin();
			self.needs_update.set(false);
		}
		self.transaction_count.set(count + 1);
	}

	fn end_or_cancel(&self, is_end: bool, emit: impl FnOnce(bool)) {
		if is_end {
			self.needs_update.set(true);
		}
		let count = self.transaction_count.get();
		assert!(count > 0, "Combiner transaction count underflow");
		let count = count - 1;
		self.transaction_count.set(count);
		if count == 0 {
			let fire = self.needs_update.get();
			self.needs_update.set(false);
			emit(fire);
		}
	}
}

/// Expands to one `Combiner_{N}` struct plus a `new_{N}` constructor, where
/// `N` is the number of (possibly heterogeneously typed) parents. Every
/// per-parent value type is supplied explicitly by the caller, so this needs
/// no identifier-concatenation helper — just repetition.
macro_rules! combiner {
	(
		$combiner:ident, $new_fn:ident;
		$( ($p:ident, $psub:ident, $P:ident) ),+
	) => {
		struct $combiner<$($P: 'static + Clone,)+ V: 'static + Clone> {
			core: SignalCore<V>,
			combiner: CombinerCore,
			$($p: Signal<$P>,)+
			f: Box<dyn Fn($($P),+) -> V>,
			$($psub: RefCell<Option<Subscription<$P>>>,)+
		}

		#[allow(non_snake_case)]
		pub fn $new_fn<$($P: 'static + Clone,)+ V: 'static + Clone>(
			$($p: Signal<$P>,)+
			f: impl 'static + Fn($($P),+) -> V,
		) -> Signal<V> {
			$(let $p = $p.latest();)+
			let node = Rc::new($combiner {
				core: SignalCore::new(),
				combiner: CombinerCore::new(),
				$($p: $p.clone(),)+
				f: Box::new(f),
				$($psub: RefCell::new(None),)+
			});
			$(
				let sub = link(&node, $p.node().clone(), |node, t: Transaction<$P>| {
					match t {
						Transaction::Begin => node.combiner.begin(|| node.core.push_transaction(Transaction::Begin)),
						Transaction::End(_) => node.combiner.end_or_cancel(true, |fire| {
							node.core.push_transaction(node.finish(fire));
						}),
						Transaction::Cancel => node.combiner.end_or_cancel(false, |fire| {
							node.core.push_transaction(node.finish(fire));
						}),
					}
				});
				*node.$psub.borrow_mut() = Some(sub);
			)+
			Signal::from_node(node)
		}

		impl<$($P: 'static + Clone,)+ V: 'static + Clone> $combiner<$($P,)+ V> {
			fn sample(&self) -> Option<V> {
				Some((self.f)($(self.$p.node().latest_value().get()?),+))
			}

			fn finish(&self, fire: bool) -> Transaction<V> {
				if fire {
					match self.sample() {
						Some(v) => Transaction::End(v),
						None => Transaction::Cancel,
					}
				} else {
					Transaction::Cancel
				}
			}
		}

		impl<$($P: 'static + Clone,)+ V: 'static + Clone> DelegateSignalCore<V> for $combiner<$($P,)+ V> {
			fn signal_core(&self) -> &SignalCore<V> {
				&self.core
			}

			fn compute_latest_value(&self) -> LatestValue<V> {
				$(
					if !self.$p.node().latest_value().has() {
						return LatestValue::None;
					}
				)+
				match self.sample() {
					Some(v) => LatestValue::Stored(v),
					None => LatestValue::None,
				}
			}
		}
	};
}

combiner!(Combiner2, new2; (p1, psub1, P1), (p2, psub2, P2));
combiner!(Combiner3, new3; (p1, psub1, P1), (p2, psub2, P2), (p3, psub3, P3));
combiner!(Combiner4, new4; (p1, psub1, P1), (p2, psub2, P2), (p3, psub3, P3), (p4, psub4, P4));
combiner!(Combiner5, new5; (p1, psub1, P1), (p2, psub2, P2), (p3, psub3, P3), (p4, psub4, P4), (p5, psub5, P5));
combiner!(Combiner6, new6; (p1, psub1, P1), (p2, psub2, P2), (p3, psub3, P3), (p4, psub4, P4), (p5, psub5, P5), (p6, psub6, P6));

#[cfg(test)]
mod tests {
	use std::{cell::RefCell, rc::Rc};

	use crate::input::Input;

	#[test]
	fn diamond_dependency_emits_once_per_external_assignment() {
		// Mirrors the w/x/y/z diamond: z = combine(w.map(+2), w.map(-9).filter(<5)).
		let w = Input::new(0);
		let x = w.signal().map(|n| n + 2);
		let y = w.signal().map(|n| n - 9).filter(|n| *n < 5);
		let z = super::new2(x, y, |a, b| a + b);
		let seen = Rc::new(RefCell::new(Vec::new()));
		let seen_clone = seen.clone();
		let _out = z.output(move |v| seen_clone.borrow_mut().push(v));
		assert_eq!(*seen.borrow(), vec![-7]);

		w.assign(12);
		assert_eq!(*seen.borrow(), vec![-7, 17]);

		w.assign(20);
		// y = 11, rejected by filter(<5): the combiner must not emit at all.
		assert_eq!(*seen.borrow(), vec![-7, 17]);
	}
}
