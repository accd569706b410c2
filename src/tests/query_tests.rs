use crate::entities::EntityStore;
use crate::prelude::Component;
use std::collections::HashSet;

#[derive(Component, Debug, PartialEq, Clone, Copy)]
struct Health(i32);

#[derive(Component)]
struct Unused;

fn populate(store: &mut EntityStore, count: i32) {
	for i in 0..count {
		store.create_entity_with((Health(i),));
	}
}

#[test]
pub fn sweep_allows_removing_every_other_member() {
	let mut store = EntityStore::new();
	populate(&mut store, 100);
	let query = store.with::<Health>();

	let mut visited = HashSet::new();
	query.sweep(&mut store, |store, entity| {
		assert!(visited.insert(entity), "Member visited twice");
		if store.get_component::<Health>(entity).unwrap().0 % 2 == 0 {
			store.remove(entity);
		}
	});

	assert_eq!(visited.len(), 100);
	assert_eq!(query.len(&store), 50);
	assert!(query.iter(&store).all(|entity| store.contains(entity)));
}

#[test]
pub fn cursor_allows_detaching_the_current_member() {
	let mut store = EntityStore::new();
	populate(&mut store, 64);
	let query = store.with::<Health>();

	let mut visited = 0;
	let mut cursor = query.cursor(&store);
	while let Some(entity) = cursor.next(&store) {
		visited += 1;
		let health = store.remove_component::<Health>(entity).unwrap();
		if health.0 % 2 == 1 {
			store.add_component(entity, health);
		}
	}

	assert_eq!(visited, 64);
	assert_eq!(query.len(&store), 32, "Re-attached members must not be visited again");
	assert_eq!(store.len(), 64, "Detaching a component keeps the entity");
}

#[test]
pub fn for_each_mut_updates_values() {
	let mut store = EntityStore::new();
	populate(&mut store, 10);
	let query = store.with::<Health>();

	query.for_each_mut(&mut store, |_, health| health.0 += 100);

	let mut values = query.iter_with(&store).map(|(_, health)| health.0).collect::<Vec<_>>();
	values.sort_unstable();
	assert_eq!(values, (100..110).collect::<Vec<_>>());
}

#[test]
pub fn iter_with_pairs_members_and_values() {
	let mut store = EntityStore::new();
	populate(&mut store, 20);
	let query = store.with::<Health>();

	let first = query.iter(&store).last().unwrap();
	store.remove(first);

	for (entity, health) in query.iter_with(&store) {
		assert_eq!(store.get_component::<Health>(entity), Some(health));
	}
	assert_eq!(query.iter_with(&store).count(), 19);
}

#[test]
pub fn queries_of_a_type_share_membership() {
	let mut store = EntityStore::new();
	let early = store.with::<Health>();
	populate(&mut store, 3);
	let late = store.with::<Health>();

	assert_eq!(early.len(&store), 3);
	assert_eq!(early.iter(&store).collect::<Vec<_>>(), late.iter(&store).collect::<Vec<_>>());
	assert_eq!(early.component_id(), Health::component_id());
	assert_eq!(format!("{:?}", early), "Query<Health>");
}

#[test]
pub fn empty_queries() {
	let mut store = EntityStore::new();
	populate(&mut store, 3);
	let query = store.with::<Unused>();

	assert!(query.is_empty(&store));
	assert_eq!(query.iter(&store).count(), 0);
	assert_eq!(query.cursor(&store).next(&store), None);
	assert_ne!(Unused::component_id(), Health::component_id());
}
