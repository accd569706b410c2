use crate::components::{AnyColumn, Component, ComponentBundle, ComponentColumn, ComponentId};
use crate::data_structures::{Cursor, DenseStore, Pool, RangeAllocator};
use crate::entities::{Entity, EntityHasher, EntityInstanceVec, Query};
use rayon::prelude::{IndexedParallelIterator, IntoParallelRefIterator, ParallelIterator};
use std::iter::{Copied, Rev};
use std::hash::BuildHasherDefault;
use nohash_hasher::NoHashHasher;
use std::collections::HashMap;
use crate::config::StoreConfig;
use crate::events::Notifier;
use log::{debug, trace};
use std::slice::Iter;

type Hasher = BuildHasherDefault<NoHashHasher<usize>>;

/// Minimum number of entity slots reserved whenever the store runs out of them.
const MIN_GROWTH: usize = 16;

/// A container for [`entities`](Entity) and their [`components`](Component).
///
/// Every entity carries an arbitrary set of component types. The entities carrying a given type
/// can be tracked through a live [Query], obtained with [with](EntityStore::with).
///
/// All operations are synchronous: notifications fire before the mutating call returns,
/// and every [Query] reflects the mutation immediately.
pub struct EntityStore {
	allocator: RangeAllocator,
	instances: EntityInstanceVec,
	entities: DenseStore<Entity, EntityHasher>,
	columns: HashMap<ComponentId, Box<dyn AnyColumn>, Hasher>,
	usize_vec_pool: Pool<Vec<usize>>,
}

impl EntityStore {
	pub fn new() -> Self {
		Self::with_config(&StoreConfig::default())
	}

	pub fn with_config(config: &StoreConfig) -> Self {
		let mut store = Self {
			allocator: RangeAllocator::new(),
			instances: EntityInstanceVec::default(),
			entities: DenseStore::with_capacity(config.initial_capacity),
			columns: HashMap::default(),
			usize_vec_pool: Pool::default(),
		};

		store.reserve_entity_space(config.initial_capacity);
		store
	}

	/// Issues a new [`entity`](Entity) handle without adding it to the store.
	///
	/// The handle stays valid until it's [removed](EntityStore::remove), but only becomes
	/// a member of the store (and can carry components) once it's [added](EntityStore::add).
	pub fn reserve_entity(&mut self) -> Entity {
		let index = match self.allocator.try_allocate(1) {
			Ok(range) => range.start,
			Err(_) => {
				let capacity = usize::max(MIN_GROWTH, self.allocator.capacity());
				self.reserve_entity_space(capacity);
				self.allocator.allocate(1).start
			},
		};

		debug_assert!(index <= u32::MAX as usize, "Entity index space exhausted");
		Entity {
			index: index as u32,
			version: self.instances.versions[index],
		}
	}

	/// Adds a previously [reserved](EntityStore::reserve_entity) [`entity`](Entity) to the store.
	///
	/// Adding the null handle, a removed entity or an entity that's already present does nothing.
	pub fn add(&mut self, entity: Entity) -> Entity {
		if !self.instances.is_current(entity) {
			trace!("Ignoring add of stale entity {}", entity);
			return entity;
		}

		if !self.entities.has(&entity) {
			trace!("Added entity {}", entity);
			self.entities.add(entity);
		}
		entity
	}

	/// Creates a single [`entity`](Entity) with no [`components`](Component) attached.
	pub fn create_entity(&mut self) -> Entity {
		let entity = self.reserve_entity();
		self.add(entity)
	}

	/// Creates a single [`entity`](Entity) with every [`component`](Component) in `bundle` attached.
	pub fn create_entity_with<B: ComponentBundle>(&mut self, bundle: B) -> Entity {
		let entity = self.create_entity();
		bundle.attach(self, entity);
		entity
	}

	/// Removes an [`entity`](Entity) and detaches all of its [`components`](Component).
	///
	/// Every [Query] the entity belonged to notifies its `on_remove` subscribers before the store does.
	/// Returns false if the entity wasn't in the store.
	/// Removing a handle that was reserved but never added just releases it.
	pub fn remove(&mut self, entity: Entity) -> bool {
		if !self.instances.is_current(entity) {
			return false;
		}

		let index = entity.index as usize;
		let mut attached = self.usize_vec_pool.take_one();
		attached.clear();
		attached.extend(self.instances.components[index].iter_ones());

		for component in attached.iter() {
			if let Some(column) = self.columns.get_mut(&ComponentId::from_index(*component)) {
				if column.detach(entity) {
					trace!("Detached {} from entity {}", column.name(), entity);
				}
			}
		}

		let removed = self.entities.remove(&entity);
		self.instances.retire(index);
		self.allocator.free(index..index + 1);

		trace!("Removed entity {}", entity);
		removed
	}

	/// Removes every [`entity`](Entity) in the store.
	pub fn clear(&mut self) {
		let mut cursor = self.entities.cursor();
		while let Some(entity) = cursor.next(&self.entities) {
			self.remove(entity);
		}
	}

	/// Returns true if `entity` has been added to the store and not removed since.
	pub fn contains(&self, entity: Entity) -> bool {
		self.entities.has(&entity)
	}

	/// Returns true if `entity` is a valid handle, whether or not it has been added yet.
	pub fn is_alive(&self, entity: Entity) -> bool {
		self.instances.is_current(entity)
	}

	/// Attaches `value` to `entity`, replacing the value previously attached, if any.
	///
	/// Returns true if the [`component`](Component) was newly attached, in which case the entity joins
	/// the component's [Query] and its `on_add` subscribers are notified.
	/// Entities outside of the store can't carry components: the value is dropped and false is returned.
	pub fn add_component<T: Component>(&mut self, entity: Entity, value: T) -> bool {
		if !self.entities.has(&entity) {
			trace!("Ignoring {} for entity {} outside of the store", T::component_name(), entity);
			return false;
		}

		let index = entity.index as usize;
		self.instances.components[index].set(T::component_id().index(), true);
		self.column_mut_or_insert::<T>().insert(entity, value)
	}

	/// Detaches a [`component`](Component) from `entity`, returning its value.
	///
	/// The entity leaves the component's [Query] and its `on_remove` subscribers are notified.
	pub fn remove_component<T: Component>(&mut self, entity: Entity) -> Option<T> {
		if !self.entities.has(&entity) {
			return None;
		}

		let value = self.column_mut::<T>()?.remove(entity)?;
		self.instances.components[entity.index as usize].set(T::component_id().index(), false);
		Some(value)
	}

	/// Returns true if `entity` currently carries a [`component`](Component) of type `T`.
	pub fn has_component<T: Component>(&self, entity: Entity) -> bool {
		self.instances.is_current(entity)
			&& self.instances.components[entity.index as usize].get(T::component_id().index())
	}

	/// Gets a reference to a [`component`](Component) bound to a specific [`entity`](Entity).
	pub fn get_component<T: Component>(&self, entity: Entity) -> Option<&T> {
		self.column::<T>()?.get(entity)
	}

	/// Gets a mutable reference to a [`component`](Component) bound to a specific [`entity`](Entity).
	///
	/// Writing through the reference changes the value only: it never affects [Query] membership.
	pub fn get_component_mut<T: Component>(&mut self, entity: Entity) -> Option<&mut T> {
		self.column_mut::<T>()?.get_mut(entity)
	}

	/// Returns a live [Query] over the [`entities`](Entity) carrying a [`component`](Component) of type `T`.
	///
	/// Every call for the same `T` observes the same membership.
	pub fn with<T: Component>(&mut self) -> Query<T> {
		self.column_mut_or_insert::<T>();
		Query::new()
	}

	/// Calls `func` for every [`entity`](Entity) carrying a `T`, in parallel.
	pub fn par_for_each<T: Component + Sync>(&self, func: impl Fn(Entity, &T) + Send + Sync) {
		if let Some(column) = self.column::<T>() {
			column
				.entities()
				.par_iter()
				.zip(column.values().par_iter())
				.for_each(|(entity, value)| func(*entity, value));
		}
	}

	/// Calls `func` for every [`entity`](Entity) in the store, passing the store along.
	///
	/// `func` may remove the entity it's given, or any entity already visited.
	pub fn sweep(&mut self, mut func: impl FnMut(&mut EntityStore, Entity)) {
		let mut cursor = self.entities.cursor();
		while let Some(entity) = cursor.next(&self.entities) {
			func(self, entity);
		}
	}

	/// Iterate over the [`entities`](Entity) in the store, most recently placed first.
	pub fn iter(&self) -> Rev<Copied<Iter<'_, Entity>>> {
		self.entities.iter()
	}

	/// A removal-safe [Cursor] over the store's [`entities`](Entity); step it with [entities](EntityStore::entities).
	pub fn cursor(&self) -> Cursor {
		self.entities.cursor()
	}

	/// The [DenseStore] holding the store's members.
	pub fn entities(&self) -> &DenseStore<Entity, EntityHasher> {
		&self.entities
	}

	pub fn len(&self) -> usize {
		self.entities.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entities.is_empty()
	}

	/// Notified after an [`entity`](Entity) is added to the store.
	pub fn on_add(&mut self) -> &mut Notifier<Entity> {
		self.entities.on_add()
	}

	/// Notified after an [`entity`](Entity) is removed from the store.
	pub fn on_remove(&mut self) -> &mut Notifier<Entity> {
		self.entities.on_remove()
	}

	pub(crate) fn column<T: Component>(&self) -> Option<&ComponentColumn<T>> {
		self.columns.get(&T::component_id())?.as_any().downcast_ref()
	}

	pub(crate) fn column_mut<T: Component>(&mut self) -> Option<&mut ComponentColumn<T>> {
		self.columns.get_mut(&T::component_id())?.as_any_mut().downcast_mut()
	}

	pub(crate) fn column_mut_or_insert<T: Component>(&mut self) -> &mut ComponentColumn<T> {
		let column = self.columns.entry(T::component_id()).or_insert_with(|| {
			debug!("Created column for component {}", T::component_name());
			Box::new(ComponentColumn::<T>::new())
		});

		match column.as_any_mut().downcast_mut() {
			Some(column) => column,
			None => unreachable!("Column of {} holds another component type", T::component_name()),
		}
	}

	fn reserve_entity_space(&mut self, size: usize) {
		self.allocator.reserve(size);
		self.instances.reserve(size);
		debug_assert_eq!(self.allocator.capacity(), self.instances.capacity());
	}
}

impl Default for EntityStore {
	fn default() -> Self {
		Self::new()
	}
}
