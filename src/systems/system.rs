use crate::entities::EntityStore;

/// It provides the logic for modifying the state of [Entities](crate::entities::Entity)
/// and their associated [Components](crate::components::Component).
pub trait System {
	/// Initialises the [System]: the place to create [queries](crate::entities::Query)
	/// and subscribe to their notifications.
	/// **This function should not be called by user code.**
	fn setup(&mut self, _entities: &mut EntityStore) {}

	/// Executes the system for one frame.
	fn run(&mut self, entities: &mut EntityStore);
}
