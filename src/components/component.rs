use crate::components::ComponentId;

/// A piece of data that can be attached to an [entity](crate::entities::Entity).
///
/// This trait should be implemented through #\[derive([`Component`](dense_ecs_derive::Component))],
/// which assigns every type a unique [ComponentId] the first time it's requested.
///
/// ```ignore
/// #[derive(Component)]
/// struct Velocity(f32, f32);
/// ```
pub trait Component: 'static {
	fn component_id() -> ComponentId;

	/// The component's type name, used in logs.
	fn component_name() -> &'static str;
}
