extern crate self as dense_ecs;

pub mod data_structures;
pub mod components;
pub mod entities;
pub mod systems;
pub mod spatial;
pub mod events;
pub mod config;
pub mod error;
mod context;

pub use context::EcsContext;
pub use lazy_static::lazy_static;

pub mod prelude {
	pub use crate::systems::*;
	pub use crate::components::*;
	pub use crate::context::EcsContext;
	pub use crate::config::{GridConfig, StoreConfig};
	pub use crate::error::{GridError, SystemError};
	pub use crate::events::{EventReader, Notifier, SubscriptionId};
	pub use crate::data_structures::{Cursor, DenseStore};
	pub use crate::spatial::{Aabb, Bounded, BroadPhase, SpatialHashGrid};
	pub use crate::entities::{Entity, EntityStore, Query, QueryCursor};
}

#[cfg(test)]
mod tests;
