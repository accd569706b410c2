use crate::entities::{Entity, EntityHasher, EntityStore, Query};
use crate::spatial::{Bounded, SpatialHashGrid};
use crate::components::Component;
use crate::events::EventReader;
use crate::error::GridError;
use crate::systems::System;
use log::{debug, warn};

/// Keeps a [SpatialHashGrid] in sync with the [entities](Entity) carrying a bounded [component](Component).
///
/// Members present when attaching are indexed right away. After that, entities joining the component's
/// [Query] are indexed from its on-add notifications and entities leaving it are dropped from the grid.
/// Every [sync](BroadPhase::sync) then moves each indexed member to its current box.
///
/// Members whose box the grid rejects are left out with a warning and retried on the next sync.
pub struct BroadPhase<T: Component + Bounded> {
	grid: SpatialHashGrid<Entity, EntityHasher>,
	wiring: Option<Wiring<T>>,
	rejected: Vec<Entity>,
}

struct Wiring<T: Component> {
	query: Query<T>,
	added: EventReader<Entity>,
	removed: EventReader<Entity>,
}

impl<T: Component + Bounded> BroadPhase<T> {
	pub fn new(cell_size: f32) -> Result<Self, GridError> {
		Ok(Self::with_grid(SpatialHashGrid::new(cell_size)?))
	}

	pub fn with_grid(grid: SpatialHashGrid<Entity, EntityHasher>) -> Self {
		Self {
			grid,
			wiring: None,
			rejected: Vec::new(),
		}
	}

	/// Subscribe to the membership changes of `T`'s [Query].
	/// Attaching twice does nothing.
	pub fn attach(&mut self, store: &mut EntityStore) {
		if self.wiring.is_some() {
			return;
		}

		let query = store.with::<T>();
		let added = query.on_add(store).reader();
		let removed = query.on_remove(store).reader();

		debug!("Broad phase attached to {:?}", query);
		for (entity, component) in query.iter_with(store) {
			Self::place(&mut self.grid, &mut self.rejected, entity, component);
		}
		self.wiring = Some(Wiring { query, added, removed });
	}

	/// Drop the subscriptions made by [attach](BroadPhase::attach) and empty the grid.
	pub fn detach(&mut self, store: &mut EntityStore) {
		if let Some(wiring) = self.wiring.take() {
			wiring.query.on_add(store).unsubscribe(wiring.added.subscription());
			wiring.query.on_remove(store).unsubscribe(wiring.removed.subscription());
			self.grid.clear();
			self.rejected.clear();
		}
	}

	/// Apply the membership changes since the last call, then move every indexed member to its current box.
	pub fn sync(&mut self, store: &EntityStore) {
		let wiring = match &self.wiring {
			Some(wiring) => wiring,
			None => return,
		};

		for entity in wiring.removed.drain() {
			self.grid.remove(&entity);
		}

		// Entities that left again before this call have no component to read.
		let pending = std::mem::take(&mut self.rejected);
		for entity in wiring.added.drain().chain(pending) {
			if let Some(component) = store.get_component::<T>(entity) {
				Self::place(&mut self.grid, &mut self.rejected, entity, component);
			}
		}

		for (entity, component) in wiring.query.iter_with(store) {
			if self.grid.contains(&entity) {
				Self::place(&mut self.grid, &mut self.rejected, entity, component);
			}
		}
	}

	/// Pairs of entities sharing at least one cell, as of the last [sync](BroadPhase::sync).
	pub fn candidate_pairs(&self) -> impl Iterator<Item = (Entity, Entity)> + '_ {
		self.grid.candidate_pairs()
	}

	pub fn grid(&self) -> &SpatialHashGrid<Entity, EntityHasher> {
		&self.grid
	}

	pub fn is_attached(&self) -> bool {
		self.wiring.is_some()
	}

	fn place(
		grid: &mut SpatialHashGrid<Entity, EntityHasher>,
		rejected: &mut Vec<Entity>,
		entity: Entity,
		component: &T,
	) {
		let aabb = component.aabb();
		if let Err(error) = grid.update(aabb.x, aabb.y, aabb.width, aabb.height, entity) {
			warn!("Entity {} left out of the broad phase: {}", entity, error);
			grid.remove(&entity);
			rejected.push(entity);
		}
	}
}

impl<T: Component + Bounded> System for BroadPhase<T> {
	fn setup(&mut self, entities: &mut EntityStore) {
		self.attach(entities);
	}

	fn run(&mut self, entities: &mut EntityStore) {
		self.sync(entities);
	}
}
