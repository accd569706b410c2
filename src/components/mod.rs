//! [Components](Component) are the pieces of data attached to [entities](crate::entities::Entity).
//!
//! An entity can carry any subset of component types, at most one value per type.

mod component;
mod component_id;
mod component_bundle;
mod component_column;

pub use component::*;
pub use component_id::*;
pub use component_bundle::*;
pub use dense_ecs_derive::Component;

pub(crate) use component_column::*;
