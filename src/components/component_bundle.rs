use crate::entities::{Entity, EntityStore};
use crate::components::Component;
use paste::paste;

/// A set of [components](Component) attached to an [entity](Entity) in one go.
///
/// Implemented for `()` and for tuples of up to 12 components.
pub trait ComponentBundle {
	/// Attach every component of the bundle to `entity`, in tuple order.
	fn attach(self, store: &mut EntityStore, entity: Entity);
}

impl ComponentBundle for () {
	fn attach(self, _: &mut EntityStore, _: Entity) {}
}

macro_rules! impl_component_bundle {
    ($($t: ident),*) => {
        paste! {
            impl<$($t: Component),*> ComponentBundle for ($($t,)*) {
                fn attach(self, store: &mut EntityStore, entity: Entity) {
                    let ($([<$t:lower>],)*) = self;
                    $(store.add_component(entity, [<$t:lower>]);)*
                }
            }
        }
    };
}

impl_component_bundle!(T0);
impl_component_bundle!(T0, T1);
impl_component_bundle!(T0, T1, T2);
impl_component_bundle!(T0, T1, T2, T3);
impl_component_bundle!(T0, T1, T2, T3, T4);
impl_component_bundle!(T0, T1, T2, T3, T4, T5);
impl_component_bundle!(T0, T1, T2, T3, T4, T5, T6);
impl_component_bundle!(T0, T1, T2, T3, T4, T5, T6, T7);
impl_component_bundle!(T0, T1, T2, T3, T4, T5, T6, T7, T8);
impl_component_bundle!(T0, T1, T2, T3, T4, T5, T6, T7, T8, T9);
impl_component_bundle!(T0, T1, T2, T3, T4, T5, T6, T7, T8, T9, T10);
impl_component_bundle!(T0, T1, T2, T3, T4, T5, T6, T7, T8, T9, T10, T11);
