use std::collections::hash_map::RandomState;
use std::hash::{BuildHasher, Hash};
use std::collections::HashMap;
use std::iter::{Copied, Rev};
use crate::events::Notifier;
use std::slice::Iter;

/// A dense, unordered set of values supporting O(1) insertion, lookup and removal.
///
/// Values are packed into a single [Vec]; a reverse index maps every value to its slot.
/// Removal moves the last value into the freed slot ("swap-remove"), so at most one
/// value changes position per removal.
///
/// Iteration runs from the last slot to the first. Combined with swap-remove this makes it safe
/// to remove the value that was just yielded: the value promoted into its slot has already been visited.
pub struct DenseStore<T, S = RandomState> {
	values: Vec<T>,
	index: HashMap<T, usize, S>,
	on_add: Notifier<T>,
	on_remove: Notifier<T>,
}

impl<T: Copy + Eq + Hash, S: BuildHasher + Default> DenseStore<T, S> {
	pub fn new() -> Self {
		Self::with_capacity(0)
	}

	pub fn with_capacity(capacity: usize) -> Self {
		Self {
			values: Vec::with_capacity(capacity),
			index: HashMap::with_capacity_and_hasher(capacity, S::default()),
			on_add: Notifier::new(),
			on_remove: Notifier::new(),
		}
	}
}

impl<T: Copy + Eq + Hash, S: BuildHasher> DenseStore<T, S> {
	/// Returns true if `value` is currently stored.
	#[inline(always)]
	pub fn has(&self, value: &T) -> bool {
		self.index.contains_key(value)
	}

	/// Get the slot currently occupied by `value`.
	#[inline(always)]
	pub fn index_of(&self, value: &T) -> Option<usize> {
		self.index.get(value).copied()
	}

	/// Insert `value`, notifying the `on_add` subscribers.
	/// Inserting a value that is already present does nothing.
	pub fn add(&mut self, value: T) -> T {
		if self.has(&value) {
			return value;
		}

		self.index.insert(value, self.values.len());
		self.values.push(value);
		self.on_add.notify(&value);
		value
	}

	/// Remove `value`, notifying the `on_remove` subscribers.
	/// Returns false if the value was not present.
	pub fn remove(&mut self, value: &T) -> bool {
		self.swap_remove(value).is_some()
	}

	/// Remove `value` and return the slot it used to occupy.
	/// The last value of the store (if any) now lives in that slot.
	pub(crate) fn swap_remove(&mut self, value: &T) -> Option<usize> {
		let slot = self.index.remove(value)?;

		self.values.swap_remove(slot);
		if let Some(moved) = self.values.get(slot) {
			self.index.insert(*moved, slot);
		}

		self.on_remove.notify(value);
		Some(slot)
	}

	/// Remove every value, one at a time, notifying `on_remove` for each.
	pub fn clear(&mut self) {
		let mut cursor = self.cursor();
		while let Some(value) = cursor.next(self) {
			self.remove(&value);
		}
	}

	/// Iterate over the stored values, from the most recently placed slot to the first.
	pub fn iter(&self) -> Rev<Copied<Iter<'_, T>>> {
		self.values.iter().copied().rev()
	}

	/// A [Cursor] over the store that doesn't borrow it, so the store may be mutated between steps.
	pub fn cursor(&self) -> Cursor {
		Cursor::at_end(&self.values)
	}

	pub fn as_slice(&self) -> &[T] {
		&self.values
	}

	pub fn len(&self) -> usize {
		self.values.len()
	}

	pub fn is_empty(&self) -> bool {
		self.values.is_empty()
	}

	/// Subscribers invoked after a value is inserted.
	pub fn on_add(&mut self) -> &mut Notifier<T> {
		&mut self.on_add
	}

	/// Subscribers invoked after a value is removed.
	pub fn on_remove(&mut self) -> &mut Notifier<T> {
		&mut self.on_remove
	}
}

impl<T: Copy + Eq + Hash, S: BuildHasher + Default> Default for DenseStore<T, S> {
	fn default() -> Self {
		Self::new()
	}
}

impl<'l, T: Copy + Eq + Hash, S: BuildHasher> IntoIterator for &'l DenseStore<T, S> {
	type Item = T;
	type IntoIter = Rev<Copied<Iter<'l, T>>>;

	fn into_iter(self) -> Self::IntoIter {
		self.iter()
	}
}

/// A reverse iteration position over a [DenseStore].
///
/// Every value present when the cursor was created is yielded exactly once,
/// as long as the only values removed in between are ones the cursor already yielded.
#[derive(Debug, Clone)]
pub struct Cursor {
	position: usize,
}

impl Cursor {
	pub(crate) fn at_end<T>(values: &[T]) -> Self {
		Self { position: values.len() }
	}

	pub fn next<T: Copy + Eq + Hash, S: BuildHasher>(&mut self, store: &DenseStore<T, S>) -> Option<T> {
		self.next_in(store.as_slice())
	}

	pub(crate) fn next_in<T: Copy>(&mut self, values: &[T]) -> Option<T> {
		// Removing already visited values shrinks the store below the cursor.
		self.position = usize::min(self.position, values.len());
		if self.position == 0 {
			return None;
		}

		self.position -= 1;
		Some(values[self.position])
	}
}
