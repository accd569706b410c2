//! A unique runtime identifier tied to a [Component] type.
//!
//! Developers shouldn't rely on [component ids](ComponentId), as they are not stable between program re-runs.
//! [Component ids](ComponentId) index the per-entity presence [bitfields](crate::data_structures::BitField)
//! and key the component columns of an [EntityStore](crate::entities::EntityStore).

use std::sync::atomic::Ordering::Relaxed;
use std::sync::atomic::AtomicUsize;
use crate::components::Component;
use std::hash::{Hash, Hasher};

static NEXT_ID: AtomicUsize = AtomicUsize::new(0);

/// A process-wide unique identifier for a type implementing the [`Component`] trait.
///
/// Ids are handed out sequentially from 0 so they can be used as bit indices.
#[derive(Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub struct ComponentId {
	value: usize,
}

impl ComponentId {
	/// Get the [ComponentId] of the type `T`.
	#[inline(always)]
	pub fn of<T: Component>() -> ComponentId {
		T::component_id()
	}

	/// Generates a new [ComponentId]. **Should not be called from user code.**
	///
	/// Called once per type by the code generated from #[derive([Component])].
	#[doc(hidden)]
	pub fn next() -> ComponentId {
		let value = NEXT_ID.fetch_add(1, Relaxed);
		debug_assert!(
			value <= u32::MAX as usize,
			"This is an insane number of components. Please seek help."
		);
		ComponentId { value }
	}

	#[inline(always)]
	pub(crate) const fn from_index(value: usize) -> ComponentId {
		ComponentId { value }
	}

	#[inline(always)]
	pub const fn index(&self) -> usize {
		self.value
	}
}

// Hashed as a single integer so it can key `nohash_hasher` maps.
impl Hash for ComponentId {
	fn hash<H: Hasher>(&self, state: &mut H) {
		state.write_usize(self.value)
	}
}
