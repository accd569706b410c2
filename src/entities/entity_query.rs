use crate::components::{AnyColumn, Component, ComponentId};
use crate::entities::{Entity, EntityStore};
use std::iter::{Copied, Rev, Zip};
use crate::events::Notifier;
use std::marker::PhantomData;
use crate::data_structures::Cursor;
use std::slice::Iter;
use std::fmt;

/// A live handle to the set of [entities](Entity) carrying a [component](Component) of type `T`.
///
/// Queries are created by [EntityStore::with] and stay valid for the lifetime of the store.
/// Membership follows [add_component](EntityStore::add_component),
/// [remove_component](EntityStore::remove_component) and [remove](EntityStore::remove) as they happen:
/// there is nothing to refresh. Changing the value of a component never changes membership.
///
/// A query must only be used with the store that created it.
pub struct Query<T: Component> {
	phantom: PhantomData<fn() -> T>,
}

impl<T: Component> Query<T> {
	pub(crate) fn new() -> Self {
		Self { phantom: PhantomData }
	}

	pub fn component_id(&self) -> ComponentId {
		T::component_id()
	}

	/// Iterate over the members, most recently joined first.
	pub fn iter<'s>(&self, store: &'s EntityStore) -> Rev<Copied<Iter<'s, Entity>>> {
		self.entities(store).iter().copied().rev()
	}

	/// Iterate over the members and their values, most recently joined first.
	pub fn iter_with<'s>(&self, store: &'s EntityStore) -> Rev<Zip<Copied<Iter<'s, Entity>>, Iter<'s, T>>> {
		let values = match store.column::<T>() {
			Some(column) => column.values(),
			None => &[],
		};
		self.entities(store).iter().copied().zip(values.iter()).rev()
	}

	/// A removal-safe cursor over the members.
	pub fn cursor(&self, store: &EntityStore) -> QueryCursor<T> {
		QueryCursor {
			cursor: Cursor::at_end(self.entities(store)),
			phantom: PhantomData,
		}
	}

	/// Calls `func` for every member, passing the store along.
	///
	/// `func` may remove the entity it's given (or detach its `T`), as well as any member already visited.
	pub fn sweep(&self, store: &mut EntityStore, mut func: impl FnMut(&mut EntityStore, Entity)) {
		let mut cursor = self.cursor(store);
		while let Some(entity) = cursor.next(store) {
			func(store, entity);
		}
	}

	/// Calls `func` with a mutable reference to the value of every member.
	pub fn for_each_mut(&self, store: &mut EntityStore, mut func: impl FnMut(Entity, &mut T)) {
		if let Some(column) = store.column_mut::<T>() {
			let (entities, values) = column.split_mut();
			for (entity, value) in entities.iter().zip(values.iter_mut()).rev() {
				func(*entity, value);
			}
		}
	}

	pub fn contains(&self, store: &EntityStore, entity: Entity) -> bool {
		store.column::<T>().map_or(false, |column| column.get(entity).is_some())
	}

	pub fn len(&self, store: &EntityStore) -> usize {
		self.entities(store).len()
	}

	pub fn is_empty(&self, store: &EntityStore) -> bool {
		self.entities(store).is_empty()
	}

	/// Notified after an [entity](Entity) joins the query.
	pub fn on_add<'s>(&self, store: &'s mut EntityStore) -> &'s mut Notifier<Entity> {
		store.column_mut_or_insert::<T>().members_mut().on_add()
	}

	/// Notified after an [entity](Entity) leaves the query.
	pub fn on_remove<'s>(&self, store: &'s mut EntityStore) -> &'s mut Notifier<Entity> {
		store.column_mut_or_insert::<T>().members_mut().on_remove()
	}

	fn entities<'s>(&self, store: &'s EntityStore) -> &'s [Entity] {
		match store.column::<T>() {
			Some(column) => column.entities(),
			None => &[],
		}
	}
}

impl<T: Component> Clone for Query<T> {
	fn clone(&self) -> Self {
		*self
	}
}

impl<T: Component> Copy for Query<T> {}

impl<T: Component> fmt::Debug for Query<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "Query<{}>", T::component_name())
	}
}

/// A removal-safe iteration position over the members of a [Query].
///
/// The cursor doesn't borrow the store, which can be mutated between steps.
pub struct QueryCursor<T: Component> {
	cursor: Cursor,
	phantom: PhantomData<fn() -> T>,
}

impl<T: Component> QueryCursor<T> {
	pub fn next(&mut self, store: &EntityStore) -> Option<Entity> {
		match store.column::<T>() {
			Some(column) => self.cursor.next_in(column.entities()),
			None => None,
		}
	}
}
