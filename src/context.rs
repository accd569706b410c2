use crate::systems::{System, SystemStore};
use crate::entities::EntityStore;
use crate::error::SystemError;
use crate::config::StoreConfig;
use std::ops::{Deref, DerefMut};

/// A container for [`entities`](crate::entities::Entity) and systems.
///
/// Contexts are constructed explicitly and passed to whatever needs them;
/// any number of independent contexts can coexist.
pub struct EcsContext {
	entity_store: EntityStore,
	system_store: SystemStore,
}

impl EcsContext {
	pub fn new() -> Self {
		Self::with_config(&StoreConfig::default())
	}

	pub fn with_config(config: &StoreConfig) -> Self {
		Self {
			entity_store: EntityStore::with_config(config),
			system_store: SystemStore::new(),
		}
	}

	/// Add a new [system](System) to the [EcsContext].
	/// Each system type can only be added once, and only before [setup_systems](EcsContext::setup_systems).
	pub fn register_system<T: 'static + System>(&mut self, system: T) -> Result<(), SystemError> {
		self.system_store.add_system(system)
	}

	/// Initialize all [systems](System)
	/// Must be called before any system can be run.
	pub fn setup_systems(&mut self) -> Result<(), SystemError> {
		self.system_store.setup_systems(&mut self.entity_store)
	}

	/// Execute all [systems](System), in registration order.
	pub fn run_systems(&mut self) -> Result<(), SystemError> {
		self.system_store.run_systems(&mut self.entity_store)
	}

	pub fn system_count(&self) -> usize {
		self.system_store.len()
	}
}

impl Default for EcsContext {
	fn default() -> Self {
		Self::new()
	}
}

impl Deref for EcsContext {
	type Target = EntityStore;

	#[inline(always)]
	fn deref(&self) -> &Self::Target {
		&self.entity_store
	}
}

impl DerefMut for EcsContext {
	#[inline(always)]
	fn deref_mut(&mut self) -> &mut Self::Target {
		&mut self.entity_store
	}
}
