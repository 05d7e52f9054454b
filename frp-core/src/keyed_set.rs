use std::{
	cell::RefCell,
	collections::BTreeMap,
	rc::Rc,
};

/// An insertion-stable mapping from monotonically increasing integer keys to
/// elements, backing every signal's observer list.
///
/// `add`/`remove` take `&self`: the set is meant to sit behind a node that is
/// itself only ever reached through a shared reference, so it manages its own
/// interior mutability. Removal is idempotent. Iteration snapshots the key
/// set up front (see [`KeyedSet::for_each_mut`]), so adding or removing
/// entries from within a callback invoked during iteration neither skips nor
/// double-visits the remaining elements. Each element is additionally kept
/// behind its own [`RefCell`], so a callback is free to add or remove *other*
/// entries of the same set without tripping the outer map's borrow — only
/// reentering the *same* entry (a node calling back into itself) panics,
/// which mirrors the "no nesting through the same node" rule upstream nodes
/// are expected to uphold.
#[derive(Debug)]
pub struct KeyedSet<E> {
	next_key: RefCell<u64>,
	entries: RefCell<BTreeMap<u64, Rc<RefCell<E>>>>,
}

impl<E> Default for KeyedSet<E> {
	fn default() -> Self {
		Self::new()
	}
}

impl<E> KeyedSet<E> {
	#[must_use]
	pub fn new() -> Self {
		Self {
			next_key: RefCell::new(0),
			entries: RefCell::new(BTreeMap::new()),
		}
	}

	/// Inserts `element`, returning a key that is unique and greater than
	/// every key previously returned by this instance.
	pub fn add(&self, element: E) -> u64 {
		let mut next_key = self.next_key.borrow_mut();
		let key = *next_key;
		*next_key = next_key
			.checked_add(1)
			.expect("KeyedSet key space exhausted");
		self.entries
			.borrow_mut()
			.insert(key, Rc::new(RefCell::new(element)));
		key
	}

	/// Removes the element registered under `key`, if any. A no-op if `key`
	/// is unknown (already removed, or never issued by this instance).
	pub fn remove(&self, key: u64) {
		self.entries.borrow_mut().remove(&key);
	}

	pub fn is_empty(&self) -> bool {
		self.entries.borrow().is_empty()
	}

	pub fn len(&self) -> usize {
		self.entries.borrow().len()
	}

	/// A snapshot of the keys currently registered, in ascending (insertion)
	/// order.
	fn keys(&self) -> Vec<u64> {
		self.entries.borrow().keys().copied().collect()
	}

	/// Runs `f` against the element registered under `key`, iff it is still
	/// present. Returns `None` if `key` was removed (e.g. by an earlier
	/// callback in the same iteration). The outer map is only borrowed long
	/// enough to clone out a handle to the entry, so `f` may freely call
	/// [`KeyedSet::add`]/[`KeyedSet::remove`] on this same set.
	fn with_mut<R>(&self, key: u64, f: impl FnOnce(&mut E) -> R) -> Option<R> {
		let cell = self.entries.borrow().get(&key).cloned()?;
		let mut element = cell.borrow_mut();
		Some(f(&mut element))
	}

	/// Invokes `f` once for every element currently registered, in stable
	/// order. Safe to call from within `f` to add or remove entries of this
	/// set: the key list is snapshotted before iteration starts.
	pub fn for_each_mut(&self, mut f: impl FnMut(&mut E)) {
		for key in self.keys() {
			self.with_mut(key, &mut f);
		}
	}
}

#[cfg(test)]
mod tests {
	use super::KeyedSet;

	#[test]
	fn keys_are_monotonic_and_unique() {
		let set = KeyedSet::new();
		let a = set.add("a");
		let b = set.add("b");
		let c = set.add("c");
		assert!(a < b);
		assert!(b < c);
	}

	#[test]
	fn remove_is_idempotent() {
		let set = KeyedSet::new();
		let key = set.add(1);
		set.remove(key);
		set.remove(key);
		assert!(set.is_empty());
	}

	#[test]
	fn removal_during_iteration_does_not_skip_or_double_visit() {
		let set: KeyedSet<i32> = KeyedSet::new();
		let keys: Vec<u64> = (0..5).map(|i| set.add(i)).collect();
		let mut seen = Vec::new();
		let to_remove = keys[2];
		set.for_each_mut(|v| {
			seen.push(*v);
			if *v == 0 {
				set.remove(to_remove);
			}
		});
		assert_eq!(seen, vec![0, 1, 3, 4]);
	}

	#[test]
	fn addition_during_iteration_is_not_visited_this_round() {
		let set: KeyedSet<i32> = KeyedSet::new();
		set.add(1);
		set.add(2);
		let mut seen = Vec::new();
		set.for_each_mut(|v| {
			seen.push(*v);
			set.add(99);
		});
		assert_eq!(seen, vec![1, 2]);
		assert_eq!(set.len(), 4);
	}
}
