use crate::data_structures::DenseStore;
use crate::entities::{Entity, EntityHasher};
use crate::components::Component;
use std::any::Any;

/// The values of one [component](Component) type, packed in the same order as the entities carrying them.
///
/// `members` doubles as the membership set of the type's [Query](crate::entities::Query):
/// its notifiers are the query's on-add/on-remove notifiers.
pub(crate) struct ComponentColumn<T> {
	members: DenseStore<Entity, EntityHasher>,
	values: Vec<T>,
}

impl<T: Component> ComponentColumn<T> {
	pub fn new() -> Self {
		Self {
			members: DenseStore::new(),
			values: Vec::new(),
		}
	}

	/// Set the value attached to `entity`. Returns true if the entity wasn't a member yet.
	pub fn insert(&mut self, entity: Entity, value: T) -> bool {
		match self.members.index_of(&entity) {
			Some(slot) => {
				self.values[slot] = value;
				false
			},
			None => {
				self.values.push(value);
				self.members.add(entity);
				true
			},
		}
	}

	pub fn remove(&mut self, entity: Entity) -> Option<T> {
		let slot = self.members.swap_remove(&entity)?;
		Some(self.values.swap_remove(slot))
	}

	pub fn get(&self, entity: Entity) -> Option<&T> {
		self.members.index_of(&entity).map(|slot| &self.values[slot])
	}

	pub fn get_mut(&mut self, entity: Entity) -> Option<&mut T> {
		self.members.index_of(&entity).map(|slot| &mut self.values[slot])
	}

	pub fn entities(&self) -> &[Entity] {
		self.members.as_slice()
	}

	pub fn values(&self) -> &[T] {
		&self.values
	}

	/// The member entities alongside their values, slot for slot.
	pub fn split_mut(&mut self) -> (&[Entity], &mut [T]) {
		(self.members.as_slice(), &mut self.values)
	}
}

/// Type-erased access to a [ComponentColumn].
pub(crate) trait AnyColumn {
	fn name(&self) -> &'static str;
	fn members_mut(&mut self) -> &mut DenseStore<Entity, EntityHasher>;

	/// Drop the value attached to `entity`. Returns false if there was none.
	fn detach(&mut self, entity: Entity) -> bool;

	fn as_any(&self) -> &dyn Any;
	fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Component> AnyColumn for ComponentColumn<T> {
	fn name(&self) -> &'static str {
		T::component_name()
	}

	fn members_mut(&mut self) -> &mut DenseStore<Entity, EntityHasher> {
		&mut self.members
	}

	fn detach(&mut self, entity: Entity) -> bool {
		self.remove(entity).is_some()
	}

	fn as_any(&self) -> &dyn Any {
		self
	}

	fn as_any_mut(&mut self) -> &mut dyn Any {
		self
	}
}
