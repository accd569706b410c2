//! [Entities](Entity) represent the individual "things" in your game or application.
//!
//! An [Entity] doesn't store any data and has no associated behaviour;
//! instead, it identifies which pieces of data ([Components](crate::components::Component)) belong together.
//! The [EntityStore] owns every entity and component, and hands out live [Queries](Query) over them.

mod entity_query;
mod entity_store;
mod entity_instance;

pub use entity_query::*;
pub use entity_store::*;
pub use entity_instance::{Entity, EntityHasher};

pub(crate) use entity_instance::EntityInstanceVec;
