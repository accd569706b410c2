use std::collections::btree_map::Values;
use std::collections::BTreeMap;
use std::iter::Cloned;

type Range = std::ops::Range<usize>;

/// A simple free-list over a growable index space.
///
/// Free chunks are kept coalesced, keyed by their start.
#[derive(Default, Debug)]
pub struct RangeAllocator {
	used: usize,
	capacity: usize,
	ranges: BTreeMap<usize, Range>,
}

impl RangeAllocator {
	/// Create a new [RangeAllocator]
	pub fn new() -> Self {
		Self::default()
	}

	/// Create a new [RangeAllocator] with the specified capacity.
	///
	/// # Arguments
	/// * `capacity` - A usize representing the container's target capacity
	pub fn with_capacity(capacity: usize) -> Self {
		let mut allocator = Self::default();
		allocator.reserve(capacity);
		allocator
	}

	/// Allocate a continuous chunk of size \[size], growing the allocator if needed.
	///
	/// # Arguments
	/// * `size` - The size of the chunk to allocate
	pub fn allocate(&mut self, size: usize) -> Range {
		match self.try_allocate(size) {
			Ok(range) => range,
			Err(_) => self.allocate_new(size),
		}
	}

	/// Conditionally allocate a continuous chunk of size \[size].
	/// The function returns the requested size back if no free chunk is large enough.
	///
	/// # Arguments
	/// * `size` - The size of the chunk to allocate
	pub fn try_allocate(&mut self, size: usize) -> Result<Range, usize> {
		let start = self.ranges.values().find(|r| r.len() >= size).map(|r| r.start);
		let range = match start.and_then(|start| self.ranges.remove(&start)) {
			Some(range) => range,
			None => return Err(size),
		};

		let used_range = range.start..range.start + size;
		let remainder = used_range.end..range.end;
		if !remainder.is_empty() {
			self.ranges.insert(remainder.start, remainder);
		}

		self.used += size;
		Ok(used_range)
	}

	/// Return a range to the allocator.
	///
	/// # Arguments
	/// * `range` - The range to be returned to the allocator. Ranges should never be returned twice.
	pub fn free(&mut self, range: Range) {
		if range.is_empty() {
			return;
		}
		debug_assert!(range.len() <= self.used, "Range was returned twice");
		self.used -= range.len();

		let mut merged = range;
		if let Some(next) = self.ranges.remove(&merged.end) {
			merged.end = next.end;
		}

		if let Some((_, previous)) = self.ranges.range_mut(..merged.start).next_back() {
			if previous.end == merged.start {
				previous.end = merged.end;
				return;
			}
		}

		self.ranges.insert(merged.start, merged);
	}

	/// Get the amount of available space left to the allocator.
	pub fn available(&self) -> usize {
		self.capacity - self.used
	}

	/// Get the total capacity of the allocator.
	pub fn capacity(&self) -> usize {
		self.capacity
	}

	/// Reserve an additional chunk of size \[size].
	/// # Arguments
	/// * `size` - The size of the chunk to reserve
	pub fn reserve(&mut self, size: usize) {
		let start = self.allocate_new(size).start;
		self.free(start..self.capacity);
	}

	/// Iterate over the unallocated chunks
	pub fn free_ranges(&self) -> Cloned<Values<'_, usize, Range>> {
		self.ranges.values().cloned()
	}

	/// Iterate over the allocated chunks
	pub fn used_ranges(&self) -> UsedRangeIterator<'_> {
		UsedRangeIterator::new(self)
	}

	fn allocate_new(&mut self, size: usize) -> Range {
		let start = self.capacity;
		self.capacity += size;
		self.used += size;
		start..self.capacity
	}
}

/// Iterates over the allocated chunks of a [RangeAllocator]
pub struct UsedRangeIterator<'l> {
	lst: usize,
	cap: usize,
	itr: Values<'l, usize, Range>,
}

impl<'l> UsedRangeIterator<'l> {
	fn new(allocator: &'l RangeAllocator) -> Self {
		Self {
			lst: 0,
			cap: allocator.capacity,
			itr: allocator.ranges.values(),
		}
	}
}

impl Iterator for UsedRangeIterator<'_> {
	type Item = Range;
	fn next(&mut self) -> Option<Self::Item> {
		loop {
			match self.itr.next() {
				None if self.lst != self.cap => {
					let range = self.lst..self.cap;
					self.lst = self.cap;
					return Some(range);
				},

				None => return None,

				Some(free) => {
					let range = self.lst..free.start;
					self.lst = free.end;

					if !range.is_empty() {
						return Some(range);
					}
				},
			}
		}
	}
}
