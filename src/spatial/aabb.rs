/// An axis-aligned bounding box covering `[x, x + width] × [y, y + height]`.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Aabb {
	pub x: f32,
	pub y: f32,
	pub width: f32,
	pub height: f32,
}

impl Aabb {
	pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
		Self { x, y, width, height }
	}

	/// Returns true if the two boxes overlap, touching edges included.
	pub fn overlaps(&self, other: &Aabb) -> bool {
		self.x <= other.x + other.width
			&& other.x <= self.x + self.width
			&& self.y <= other.y + other.height
			&& other.y <= self.y + self.height
	}
}

/// Anything that can be indexed by a [SpatialHashGrid](crate::spatial::SpatialHashGrid) through its bounding box.
pub trait Bounded {
	fn aabb(&self) -> Aabb;
}

impl Bounded for Aabb {
	fn aabb(&self) -> Aabb {
		*self
	}
}
