use std::collections::hash_map::RandomState;
use std::collections::{HashMap, HashSet};
use std::hash::{BuildHasher, BuildHasherDefault, Hash, Hasher};
use crate::data_structures::{mix64, DenseStore};
use nohash_hasher::NoHashHasher;
use crate::config::GridConfig;
use crate::spatial::Aabb;
use crate::error::GridError;
use log::trace;

/// Cell size used by [SpatialHashGrid::default], in world units.
pub const DEFAULT_CELL_SIZE: f32 = 64.0;

/// Most cells a single value may occupy, unless configured otherwise.
pub const DEFAULT_MAX_CELLS_PER_VALUE: usize = 1 << 16;

type CellHasher = BuildHasherDefault<NoHashHasher<u64>>;

/// Both cell coordinates packed into a single integer.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub(crate) struct CellKey(u64);

impl CellKey {
	#[inline(always)]
	pub(crate) fn new(cx: i32, cy: i32) -> Self {
		CellKey((cx as u32 as u64) << 32 | cy as u32 as u64)
	}
}

impl Hash for CellKey {
	fn hash<H: Hasher>(&self, state: &mut H) {
		state.write_u64(mix64(self.0))
	}
}

/// An inclusive rectangle of cells.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
struct CellRange {
	min_x: i32,
	min_y: i32,
	max_x: i32,
	max_y: i32,
}

impl CellRange {
	fn contains(&self, cx: i32, cy: i32) -> bool {
		(self.min_x..=self.max_x).contains(&cx) && (self.min_y..=self.max_y).contains(&cy)
	}

	fn count(&self) -> u64 {
		let columns = (self.max_x as i64 - self.min_x as i64 + 1) as u64;
		let rows = (self.max_y as i64 - self.min_y as i64 + 1) as u64;
		columns * rows
	}

	fn cells(self) -> impl Iterator<Item = (i32, i32)> {
		(self.min_x..=self.max_x).flat_map(move |cx| (self.min_y..=self.max_y).map(move |cy| (cx, cy)))
	}
}

/// A broad-phase index over axis-aligned boxes, partitioning the plane into square cells.
///
/// A value is stored in the bucket of every cell its box overlaps. Boxes are half-open on their far edges:
/// with a cell size of 10, a box spanning `[0, 10]` covers cell 0 only, while `[5, 15]` covers cells 0 and 1.
///
/// Values sharing no bucket are never candidates for collision with one another.
/// Boxes must be finite, and may cover at most [GridConfig::max_cells_per_value] cells.
pub struct SpatialHashGrid<V, S = RandomState> {
	cell_size: f32,
	max_cells: usize,
	buckets: HashMap<CellKey, DenseStore<V, S>, CellHasher>,
	cells: HashMap<V, CellRange, S>,
}

impl<V: Copy + Eq + Hash, S: BuildHasher + Default> SpatialHashGrid<V, S> {
	/// Create a grid with square cells of side `cell_size`.
	pub fn new(cell_size: f32) -> Result<Self, GridError> {
		Self::from_config(&GridConfig { cell_size, ..GridConfig::default() })
	}

	pub fn from_config(config: &GridConfig) -> Result<Self, GridError> {
		config.validate()?;
		Ok(Self::with_valid_config(config))
	}

	fn with_valid_config(config: &GridConfig) -> Self {
		Self {
			cell_size: config.cell_size,
			max_cells: config.max_cells_per_value,
			buckets: HashMap::default(),
			cells: HashMap::default(),
		}
	}

	/// Index `value` under the box `(x, y, width, height)`.
	/// If `value` is already indexed, this is the same as [update](SpatialHashGrid::update).
	pub fn add(&mut self, x: f32, y: f32, width: f32, height: f32, value: V) -> Result<(), GridError> {
		self.update(x, y, width, height, value)
	}

	/// Move `value` to the box `(x, y, width, height)`.
	///
	/// Only the buckets the value enters or leaves are touched.
	/// A value that isn't indexed yet is added.
	/// Invalid boxes are rejected and leave the value where it was.
	pub fn update(&mut self, x: f32, y: f32, width: f32, height: f32, value: V) -> Result<(), GridError> {
		let new = self.cell_range(x, y, width, height)?;
		let old = match self.cells.insert(value, new) {
			Some(old) if old == new => return Ok(()),
			Some(old) => old,
			None => {
				for (cx, cy) in new.cells() {
					self.insert_into(cx, cy, value);
				}
				return Ok(());
			},
		};

		for (cx, cy) in old.cells() {
			if !new.contains(cx, cy) {
				self.remove_from(cx, cy, &value);
			}
		}

		for (cx, cy) in new.cells() {
			if !old.contains(cx, cy) {
				self.insert_into(cx, cy, value);
			}
		}
		Ok(())
	}

	/// Remove `value` from every bucket. Returns false if it wasn't indexed.
	pub fn remove(&mut self, value: &V) -> bool {
		let range = match self.cells.remove(value) {
			Some(range) => range,
			None => return false,
		};

		for (cx, cy) in range.cells() {
			self.remove_from(cx, cy, value);
		}
		true
	}

	/// Every value whose buckets intersect the cells overlapped by `(x, y, width, height)`, without duplicates.
	pub fn query_region(&self, x: f32, y: f32, width: f32, height: f32) -> Result<Vec<V>, GridError> {
		let mut seen = HashSet::with_hasher(S::default());
		let mut found = Vec::new();

		for (cx, cy) in self.cell_range(x, y, width, height)?.cells() {
			if let Some(bucket) = self.buckets.get(&CellKey::new(cx, cy)) {
				found.extend(bucket.iter().filter(|value| seen.insert(*value)));
			}
		}
		Ok(found)
	}

	fn insert_into(&mut self, cx: i32, cy: i32, value: V) {
		let bucket = self.buckets.entry(CellKey::new(cx, cy)).or_insert_with(|| {
			trace!("Created bucket ({}, {})", cx, cy);
			DenseStore::new()
		});
		bucket.add(value);
	}
}

impl<V: Copy + Eq + Hash, S: BuildHasher> SpatialHashGrid<V, S> {
	/// Iterate over the values sharing each bucket, one group per occupied bucket.
	pub fn iter(&self) -> impl Iterator<Item = &[V]> + '_ {
		self.buckets.values().map(|bucket| bucket.as_slice())
	}

	/// Every pair of values sharing a bucket.
	///
	/// Values sharing more than one bucket are reported once per shared bucket.
	pub fn candidate_pairs(&self) -> impl Iterator<Item = (V, V)> + '_ {
		self.iter().filter(|group| group.len() >= 2).flat_map(|group| {
			group
				.iter()
				.enumerate()
				.flat_map(move |(i, a)| group[i + 1..].iter().map(move |b| (*a, *b)))
		})
	}

	/// The values stored in the bucket of cell `(cx, cy)`.
	pub fn bucket(&self, cx: i32, cy: i32) -> &[V] {
		match self.buckets.get(&CellKey::new(cx, cy)) {
			Some(bucket) => bucket.as_slice(),
			None => &[],
		}
	}

	/// The cells currently occupied by `value`.
	pub fn cells_of(&self, value: &V) -> impl Iterator<Item = (i32, i32)> {
		self.cells.get(value).copied().into_iter().flat_map(CellRange::cells)
	}

	/// The cell containing the point `(x, y)`.
	pub fn cell_of(&self, x: f32, y: f32) -> (i32, i32) {
		((x / self.cell_size).floor() as i32, (y / self.cell_size).floor() as i32)
	}

	pub fn contains(&self, value: &V) -> bool {
		self.cells.contains_key(value)
	}

	/// Number of indexed values.
	pub fn len(&self) -> usize {
		self.cells.len()
	}

	pub fn is_empty(&self) -> bool {
		self.cells.is_empty()
	}

	/// Number of occupied buckets.
	pub fn bucket_count(&self) -> usize {
		self.buckets.len()
	}

	pub fn cell_size(&self) -> f32 {
		self.cell_size
	}

	pub fn clear(&mut self) {
		self.buckets.clear();
		self.cells.clear();
	}

	fn remove_from(&mut self, cx: i32, cy: i32, value: &V) {
		let key = CellKey::new(cx, cy);
		if let Some(bucket) = self.buckets.get_mut(&key) {
			bucket.remove(value);
			if bucket.is_empty() {
				self.buckets.remove(&key);
				trace!("Pruned bucket ({}, {})", cx, cy);
			}
		}
	}

	fn cell_range(&self, x: f32, y: f32, width: f32, height: f32) -> Result<CellRange, GridError> {
		if ![x, y, width, height].iter().all(|i| i.is_finite()) {
			return Err(GridError::NonFiniteBounds(Aabb::new(x, y, width, height)));
		}

		let (min_x, max_x) = self.span(x, width);
		let (min_y, max_y) = self.span(y, height);
		let range = CellRange { min_x, min_y, max_x, max_y };

		let cells = range.count();
		if cells > self.max_cells as u64 {
			return Err(GridError::TooManyCells { cells, limit: self.max_cells });
		}
		Ok(range)
	}

	/// First and last cell covered by `[start, start + extent)` on one axis.
	/// Degenerate or negative extents still cover the cell containing `start`.
	fn span(&self, start: f32, extent: f32) -> (i32, i32) {
		let first = (start / self.cell_size).floor() as i32;
		let last = (((start + extent.max(0.0)) / self.cell_size).ceil() as i32).saturating_sub(1);
		(first, i32::max(first, last))
	}
}

impl<V: Copy + Eq + Hash, S: BuildHasher + Default> Default for SpatialHashGrid<V, S> {
	fn default() -> Self {
		Self::with_valid_config(&GridConfig::default())
	}
}
