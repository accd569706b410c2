//! Collision broad-phase.
//!
//! A [SpatialHashGrid] buckets values by the grid cells their [bounding boxes](Aabb) overlap,
//! so that only values sharing a bucket need a precise collision test.
//! [BroadPhase] feeds a grid from the members of a [Query](crate::entities::Query).

mod aabb;
mod broad_phase;
mod spatial_hash_grid;

pub use aabb::*;
pub use broad_phase::*;
pub use spatial_hash_grid::*;
