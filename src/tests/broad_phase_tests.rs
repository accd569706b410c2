use crate::spatial::{Aabb, Bounded, BroadPhase};
use crate::entities::{Entity, EntityStore};
use crate::tests::init_logger;
use crate::prelude::Component;
use std::collections::HashSet;

#[derive(Component, Debug, Clone, Copy)]
struct Collider(Aabb);

impl Bounded for Collider {
	fn aabb(&self) -> Aabb {
		self.0
	}
}

fn collider(x: f32, y: f32, width: f32, height: f32) -> (Collider,) {
	(Collider(Aabb::new(x, y, width, height)),)
}

fn pairs(broad_phase: &BroadPhase<Collider>) -> HashSet<(Entity, Entity)> {
	broad_phase.candidate_pairs().map(|(a, b)| (a.min(b), a.max(b))).collect()
}

#[test]
pub fn tracks_query_membership() {
	init_logger();
	let mut store = EntityStore::new();
	let mut broad_phase = BroadPhase::<Collider>::new(10.0).unwrap();

	let early = store.create_entity_with(collider(40.0, 40.0, 2.0, 2.0));
	broad_phase.attach(&mut store);
	assert!(broad_phase.is_attached());
	assert!(broad_phase.grid().contains(&early), "Members present before attaching are indexed right away");

	let a = store.create_entity_with(collider(0.0, 0.0, 10.0, 10.0));
	let b = store.create_entity_with(collider(5.0, 5.0, 10.0, 10.0));
	let plain = store.create_entity();
	broad_phase.sync(&store);

	let grid = broad_phase.grid();
	assert_eq!(grid.len(), 3);
	assert!(grid.contains(&a) && grid.contains(&b) && grid.contains(&early));
	assert!(!grid.contains(&plain));
	assert_eq!(pairs(&broad_phase), HashSet::from([(a.min(b), a.max(b))]));
}

#[test]
pub fn follows_moving_members() {
	let mut store = EntityStore::new();
	let mut broad_phase = BroadPhase::<Collider>::new(10.0).unwrap();
	broad_phase.attach(&mut store);

	let a = store.create_entity_with(collider(0.0, 0.0, 10.0, 10.0));
	let b = store.create_entity_with(collider(5.0, 5.0, 10.0, 10.0));
	broad_phase.sync(&store);

	store.get_component_mut::<Collider>(b).unwrap().0 = Aabb::new(50.0, 50.0, 5.0, 5.0);
	broad_phase.sync(&store);

	assert_eq!(broad_phase.grid().cells_of(&b).collect::<Vec<_>>(), vec![(5, 5)]);
	assert_eq!(broad_phase.grid().bucket(0, 0), &[a]);
	assert!(pairs(&broad_phase).is_empty());
}

#[test]
pub fn drops_leaving_members() {
	let mut store = EntityStore::new();
	let mut broad_phase = BroadPhase::<Collider>::new(10.0).unwrap();
	broad_phase.attach(&mut store);

	let a = store.create_entity_with(collider(0.0, 0.0, 10.0, 10.0));
	let b = store.create_entity_with(collider(5.0, 5.0, 10.0, 10.0));
	broad_phase.sync(&store);

	store.remove_component::<Collider>(a);
	store.remove(b);
	let transient = store.create_entity_with(collider(1.0, 1.0, 1.0, 1.0));
	store.remove(transient);
	broad_phase.sync(&store);

	assert!(broad_phase.grid().is_empty());
	assert_eq!(broad_phase.grid().bucket_count(), 0);
}

#[test]
pub fn detach_unsubscribes() {
	let mut store = EntityStore::new();
	let mut broad_phase = BroadPhase::<Collider>::new(10.0).unwrap();
	let query = store.with::<Collider>();

	broad_phase.attach(&mut store);
	broad_phase.attach(&mut store);
	assert_eq!(query.on_add(&mut store).len(), 1, "Attaching twice subscribes once");
	assert_eq!(query.on_remove(&mut store).len(), 1);

	store.create_entity_with(collider(0.0, 0.0, 1.0, 1.0));
	broad_phase.sync(&store);
	broad_phase.detach(&mut store);

	assert!(!broad_phase.is_attached());
	assert!(broad_phase.grid().is_empty());
	assert!(query.on_add(&mut store).is_empty());
	assert!(query.on_remove(&mut store).is_empty());
}

#[test]
pub fn rejected_boxes_are_retried() {
	init_logger();
	let mut store = EntityStore::new();
	let mut broad_phase = BroadPhase::<Collider>::new(10.0).unwrap();
	broad_phase.attach(&mut store);

	let a = store.create_entity_with(collider(0.0, 0.0, f32::INFINITY, 1.0));
	let b = store.create_entity_with(collider(0.0, 0.0, 5.0, 5.0));
	broad_phase.sync(&store);
	assert!(!broad_phase.grid().contains(&a), "Non-finite boxes are left out");
	assert!(broad_phase.grid().contains(&b));

	store.get_component_mut::<Collider>(a).unwrap().0 = Aabb::new(2.0, 2.0, 1.0, 1.0);
	broad_phase.sync(&store);
	assert_eq!(broad_phase.grid().cells_of(&a).collect::<Vec<_>>(), vec![(0, 0)]);
	assert_eq!(pairs(&broad_phase), HashSet::from([(a.min(b), a.max(b))]));

	store.get_component_mut::<Collider>(b).unwrap().0 = Aabb::new(f32::NAN, 0.0, 1.0, 1.0);
	broad_phase.sync(&store);
	assert!(!broad_phase.grid().contains(&b), "Members moving to an invalid box leave the grid");
	assert_eq!(broad_phase.grid().bucket(0, 0), &[a]);

	store.remove(b);
	broad_phase.sync(&store);
	assert_eq!(broad_phase.grid().len(), 1);
}
