use std::iter::repeat;

const BITS: usize = 32;
const FIRST_BIT: u32 = 1 << (BITS - 1);

/// A dynamically sized bit-field.
///
/// Bits are stored most-significant first, so bit `0` is the highest bit of the first word.
#[derive(Default, Clone, Debug)]
pub struct BitField {
	values: Vec<u32>,
}

impl BitField {
	/// Create a new [BitField].
	pub fn new() -> Self {
		Self::default()
	}

	/// Create a new [BitField] with the specified capacity.
	///
	/// # Arguments
	/// * `capacity` - A usize representing the container's target capacity in bits
	pub fn with_capacity(capacity: usize) -> Self {
		let mut instance = Self { values: Vec::new() };
		instance.ensure_capacity(capacity);
		instance
	}

	/// Get the value of the bit at index `i`.
	/// Bits outside of the current capacity are always unset.
	#[inline(always)]
	pub fn get(&self, i: usize) -> bool {
		let (position, shift) = Self::pos_shift(i);
		match self.values.get(position) {
			Some(bits) => bits & (FIRST_BIT >> shift) != 0,
			None => false,
		}
	}

	/// Set the value of the bit at index `i`, growing the [BitField] if needed.
	#[inline(always)]
	pub fn set(&mut self, i: usize, value: bool) {
		let (position, shift) = Self::pos_shift(i);
		let bit = FIRST_BIT >> shift;

		if value {
			if self.values.len() <= position {
				self.extend_to_position(position);
			}
			self.values[position] |= bit;
		} else if let Some(bits) = self.values.get_mut(position) {
			*bits &= !bit;
		}
	}

	/// Set all bits to 0.
	pub fn clear(&mut self) {
		self.values.fill(0);
	}

	/// Returns true if no bit is set.
	pub fn is_empty(&self) -> bool {
		self.values.iter().all(|i| *i == 0)
	}

	/// Count the number of set bits.
	pub fn count_ones(&self) -> usize {
		self.values.iter().map(|i| i.count_ones() as usize).sum()
	}

	/// Set the minimum capacity of the [BitField].
	/// # Arguments
	/// * `capacity` - A usize representing the container's minimum capacity in bits
	pub fn ensure_capacity(&mut self, capacity: usize) {
		let count = (capacity + BITS - 1) / BITS;
		if self.values.len() < count {
			let missing = count - self.values.len();
			self.values.extend(repeat(0).take(missing));
		}
	}

	/// Get the [BitField]'s capacity in bits.
	pub fn capacity(&self) -> usize {
		self.values.len() * BITS
	}

	/// Iterate over the indices of the set bits, in ascending order.
	pub fn iter_ones(&self) -> BitFieldIterator<'_> {
		BitFieldIterator::new(&self.values)
	}

	#[inline(never)]
	fn extend_to_position(&mut self, position: usize) {
		let count = position - self.values.len() + 1;
		self.values.extend(repeat(0).take(count));
	}

	#[inline(always)]
	fn pos_shift(a: usize) -> (usize, usize) {
		(a / BITS, a % BITS)
	}
}

/// Iterates over the indices of the set bits of a [BitField].
pub struct BitFieldIterator<'l> {
	index: usize,
	remaining: u32,
	values: &'l [u32],
}

impl<'l> BitFieldIterator<'l> {
	fn new(values: &'l [u32]) -> Self {
		Self {
			index: 0,
			remaining: values.first().copied().unwrap_or(0),
			values,
		}
	}
}

impl Iterator for BitFieldIterator<'_> {
	type Item = usize;

	fn next(&mut self) -> Option<Self::Item> {
		loop {
			if self.remaining != 0 {
				let shift = self.remaining.leading_zeros() as usize;
				self.remaining &= !(FIRST_BIT >> shift);
				return Some(self.index * BITS + shift);
			}

			self.index += 1;
			self.remaining = *self.values.get(self.index)?;
		}
	}
}
