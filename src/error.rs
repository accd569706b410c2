use crate::spatial::Aabb;
use thiserror::Error;

/// Errors raised when configuring or indexing into a [SpatialHashGrid](crate::spatial::SpatialHashGrid).
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum GridError {
	#[error("cell size must be a positive, finite number (got {0})")]
	InvalidCellSize(f32),
	#[error("bounds must be finite (got {0:?})")]
	NonFiniteBounds(Aabb),
	#[error("bounds cover {cells} cells, more than the limit of {limit}")]
	TooManyCells { cells: u64, limit: usize },
}

/// Errors raised by the system lifecycle of an [EcsContext](crate::EcsContext).
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemError {
	#[error("system `{0}` was already added to the current context")]
	AlreadyRegistered(&'static str),
	#[error("cannot add system `{0}` after the systems have been initialized")]
	RegistrationClosed(&'static str),
	#[error("systems have already been initialized")]
	AlreadyInitialized,
	#[error("systems must be initialized before they can run")]
	NotInitialized,
}
