//! Construction parameters for the [EntityStore](crate::entities::EntityStore)
//! and the [SpatialHashGrid](crate::spatial::SpatialHashGrid).

use crate::spatial::{DEFAULT_CELL_SIZE, DEFAULT_MAX_CELLS_PER_VALUE};
use crate::error::GridError;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct StoreConfig {
	/// Number of entity slots reserved up front.
	pub initial_capacity: usize,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct GridConfig {
	/// Side length of a grid cell, in world units.
	pub cell_size: f32,
	/// Boxes covering more cells than this are rejected.
	pub max_cells_per_value: usize,
}

impl GridConfig {
	pub fn validate(&self) -> Result<(), GridError> {
		if self.cell_size.is_finite() && self.cell_size > 0.0 {
			Ok(())
		} else {
			Err(GridError::InvalidCellSize(self.cell_size))
		}
	}
}

impl Default for GridConfig {
	fn default() -> Self {
		Self {
			cell_size: DEFAULT_CELL_SIZE,
			max_cells_per_value: DEFAULT_MAX_CELLS_PER_VALUE,
		}
	}
}
