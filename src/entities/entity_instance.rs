use crate::data_structures::{mix64, BitField};
use std::hash::{BuildHasherDefault, Hash, Hasher};
use nohash_hasher::NoHashHasher;
use std::iter::repeat_with;
use std::fmt;

/// Hasher for maps keyed by [Entity] handles.
pub type EntityHasher = BuildHasherDefault<NoHashHasher<u64>>;

/// A unique handle to an `Entity`.
///
/// Handles are generation checked: once an entity is removed its slot's version is bumped,
/// so stale copies of the handle are never mistaken for whatever reuses the slot.
/// `Entity::default()` is the null handle and never refers to a live entity.
#[derive(Default, Copy, Clone, Eq, PartialEq, Ord, PartialOrd)]
pub struct Entity {
	pub(crate) index: u32,
	pub(crate) version: u32,
}

impl Entity {
	/// The null handle.
	pub const NULL: Entity = Entity { index: 0, version: 0 };

	pub fn is_null(&self) -> bool {
		self.version == 0
	}

	pub fn index(&self) -> u32 {
		self.index
	}

	pub fn version(&self) -> u32 {
		self.version
	}

	#[inline(always)]
	fn to_bits(self) -> u64 {
		(self.index as u64) << 32 | self.version as u64
	}
}

impl Hash for Entity {
	fn hash<H: Hasher>(&self, state: &mut H) {
		state.write_u64(mix64(self.to_bits()))
	}
}

impl fmt::Debug for Entity {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "Entity({}v{})", self.index, self.version)
	}
}

impl fmt::Display for Entity {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}v{}", self.index, self.version)
	}
}

/// Per-slot bookkeeping: the current version of every slot
/// and the set of components attached to the entity living in it.
#[derive(Default)]
pub(crate) struct EntityInstanceVec {
	pub(crate) versions: Vec<u32>,
	pub(crate) components: Vec<BitField>,
}

impl EntityInstanceVec {
	/// Returns true if `entity` is the handle currently issued for its slot.
	#[inline(always)]
	pub fn is_current(&self, entity: Entity) -> bool {
		!entity.is_null() && self.versions.get(entity.index as usize) == Some(&entity.version)
	}

	/// Invalidate every handle issued for `index` and forget its components.
	pub fn retire(&mut self, index: usize) {
		let version = &mut self.versions[index];
		*version = match version.wrapping_add(1) {
			0 => 1,
			next => next,
		};
		self.components[index].clear();
	}

	pub fn capacity(&self) -> usize {
		self.versions.len()
	}

	pub fn reserve(&mut self, count: usize) {
		self.versions.extend(repeat_with(|| 1).take(count));
		self.components.extend(repeat_with(BitField::new).take(count));
	}
}
