use crate::spatial::{Aabb, CellKey, SpatialHashGrid, DEFAULT_CELL_SIZE};
use std::hash::{BuildHasher, BuildHasherDefault, Hash, Hasher};
use nohash_hasher::NoHashHasher;
use crate::config::GridConfig;
use crate::error::GridError;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;
use rand::rngs::StdRng;

fn cells(grid: &SpatialHashGrid<u32>, value: u32) -> HashSet<(i32, i32)> {
	grid.cells_of(&value).collect()
}

#[test]
pub fn box_inside_one_cell() {
	let mut grid = SpatialHashGrid::<u32>::new(10.0).unwrap();
	grid.add(0.0, 0.0, 10.0, 10.0, 1).unwrap();

	assert_eq!(grid.bucket_count(), 1);
	assert_eq!(cells(&grid, 1), HashSet::from([(0, 0)]));
	assert_eq!(grid.bucket(0, 0), &[1]);
}

#[test]
pub fn box_straddling_four_cells() {
	let mut grid = SpatialHashGrid::<u32>::new(10.0).unwrap();
	grid.add(5.0, 5.0, 10.0, 10.0, 2).unwrap();

	assert_eq!(cells(&grid, 2), HashSet::from([(0, 0), (1, 0), (0, 1), (1, 1)]));
	for (cx, cy) in [(0, 0), (1, 0), (0, 1), (1, 1)] {
		assert_eq!(grid.bucket(cx, cy), &[2], "Bucket ({cx}, {cy}) should hold the value");
	}
}

#[test]
pub fn update_prunes_left_buckets() {
	let mut grid = SpatialHashGrid::<u32>::new(10.0).unwrap();
	grid.add(5.0, 5.0, 10.0, 10.0, 2).unwrap();
	grid.update(12.0, 12.0, 5.0, 5.0, 2).unwrap();

	assert_eq!(cells(&grid, 2), HashSet::from([(1, 1)]));
	assert_eq!(grid.bucket_count(), 1, "Buckets left empty must be pruned");
	assert!(grid.bucket(0, 0).is_empty());
	assert!(grid.bucket(1, 0).is_empty());
	assert!(grid.bucket(0, 1).is_empty());
	assert_eq!(grid.bucket(1, 1), &[2]);
}

#[test]
pub fn update_leaves_kept_buckets_untouched() {
	let mut grid = SpatialHashGrid::<u32>::new(10.0).unwrap();
	grid.add(5.0, 5.0, 10.0, 10.0, 2).unwrap();
	grid.add(12.0, 12.0, 1.0, 1.0, 3).unwrap();
	assert_eq!(grid.bucket(1, 1), &[2, 3]);

	// A remove and re-insert would reorder the shared bucket.
	grid.update(10.0, 10.0, 10.0, 10.0, 2).unwrap();
	assert_eq!(grid.bucket(1, 1), &[2, 3]);
	assert_eq!(cells(&grid, 2), HashSet::from([(1, 1)]));
}

#[test]
pub fn values_are_never_duplicated() {
	let mut grid = SpatialHashGrid::<u32>::new(10.0).unwrap();
	grid.add(1.0, 1.0, 2.0, 2.0, 7).unwrap();
	grid.add(1.0, 1.0, 2.0, 2.0, 7).unwrap();
	grid.update(3.0, 3.0, 2.0, 2.0, 7).unwrap();

	assert_eq!(grid.len(), 1);
	assert_eq!(grid.bucket(0, 0), &[7]);
}

#[test]
pub fn negative_coordinates() {
	let mut grid = SpatialHashGrid::<u32>::new(10.0).unwrap();
	grid.add(-5.0, -5.0, 10.0, 10.0, 1).unwrap();

	assert_eq!(cells(&grid, 1), HashSet::from([(-1, -1), (0, -1), (-1, 0), (0, 0)]));
	assert_eq!(grid.cell_of(-0.5, 9.5), (-1, 0));
}

#[test]
pub fn remove_empties_every_bucket() {
	let mut grid = SpatialHashGrid::<u32>::new(10.0).unwrap();
	grid.add(5.0, 5.0, 10.0, 10.0, 2).unwrap();

	assert!(grid.remove(&2));
	assert!(!grid.remove(&2));
	assert!(!grid.contains(&2));
	assert!(grid.is_empty());
	assert_eq!(grid.bucket_count(), 0);
}

#[test]
pub fn candidates_share_a_bucket() {
	let mut grid = SpatialHashGrid::<u32>::new(10.0).unwrap();
	grid.add(0.0, 0.0, 10.0, 10.0, 1).unwrap();
	grid.add(5.0, 5.0, 10.0, 10.0, 2).unwrap();
	grid.add(50.0, 50.0, 1.0, 1.0, 3).unwrap();

	let pairs = grid
		.candidate_pairs()
		.map(|(a, b)| (a.min(b), a.max(b)))
		.collect::<HashSet<_>>();
	assert_eq!(pairs, HashSet::from([(1, 2)]));

	let mut found = grid.query_region(0.0, 0.0, 20.0, 20.0).unwrap();
	found.sort_unstable();
	assert_eq!(found, vec![1, 2], "Region queries report each value once");
}

#[test]
pub fn invalid_cell_sizes() {
	assert_eq!(SpatialHashGrid::<u32>::new(0.0).err(), Some(GridError::InvalidCellSize(0.0)));
	assert_eq!(SpatialHashGrid::<u32>::new(-1.0).err(), Some(GridError::InvalidCellSize(-1.0)));
	assert!(SpatialHashGrid::<u32>::new(f32::NAN).is_err());
	assert!(SpatialHashGrid::<u32>::new(f32::INFINITY).is_err());

	assert_eq!(SpatialHashGrid::<u32>::default().cell_size(), DEFAULT_CELL_SIZE);
	let grid = SpatialHashGrid::<u32>::from_config(&GridConfig::default()).unwrap();
	assert_eq!(grid.cell_size(), DEFAULT_CELL_SIZE);
}

#[test]
pub fn random_updates_match_covered_cells() {
	let size = 8.0;
	let mut rng = StdRng::seed_from_u64(7);
	let mut grid = SpatialHashGrid::<u32>::new(size).unwrap();
	let mut expected = vec![HashSet::new(); 16];

	let covered = |start: f32, extent: f32| {
		let first = (start / size).floor() as i32;
		let last = i32::max(first, ((start + extent) / size).ceil() as i32 - 1);
		first..=last
	};

	for _ in 0..1000 {
		let value = rng.gen_range(0..16u32);
		if rng.gen_bool(0.2) {
			grid.remove(&value);
			expected[value as usize].clear();
		} else {
			let (x, y) = (rng.gen_range(-40.0..40.0), rng.gen_range(-40.0..40.0));
			let (w, h) = (rng.gen_range(0.0..20.0), rng.gen_range(0.0..20.0));
			grid.update(x, y, w, h, value).unwrap();

			expected[value as usize] = covered(x, w)
				.flat_map(|cx| covered(y, h).map(move |cy| (cx, cy)))
				.collect();
		}

		let mut occurrences = 0;
		for group in grid.iter() {
			assert!(!group.is_empty(), "Empty buckets must be pruned");
			occurrences += group.len();
		}
		assert_eq!(occurrences, expected.iter().map(HashSet::len).sum::<usize>(), "Stale bucket entries");

		for (value, expected) in expected.iter().enumerate() {
			assert_eq!(&cells(&grid, value as u32), expected);
			for (cx, cy) in expected {
				assert!(grid.bucket(*cx, *cy).contains(&(value as u32)));
			}
		}
	}
}

#[test]
pub fn non_finite_boxes_are_rejected() {
	let mut grid = SpatialHashGrid::<u32>::new(10.0).unwrap();
	grid.add(0.0, 0.0, 5.0, 5.0, 1).unwrap();

	assert_eq!(
		grid.update(0.0, 0.0, f32::INFINITY, 1.0, 1),
		Err(GridError::NonFiniteBounds(Aabb::new(0.0, 0.0, f32::INFINITY, 1.0)))
	);
	assert!(grid.add(f32::NAN, 0.0, 1.0, 1.0, 2).is_err());
	assert!(grid.query_region(0.0, f32::NEG_INFINITY, 1.0, 1.0).is_err());

	assert_eq!(cells(&grid, 1), HashSet::from([(0, 0)]), "A rejected update leaves the value in place");
	assert!(!grid.contains(&2));
	assert_eq!(grid.bucket_count(), 1);
}

#[test]
pub fn oversized_boxes_are_rejected() {
	let config = GridConfig {
		cell_size: 1.0,
		max_cells_per_value: 100,
	};
	let mut grid = SpatialHashGrid::<u32>::from_config(&config).unwrap();

	grid.add(0.0, 0.0, 10.0, 10.0, 1).unwrap();
	assert_eq!(
		grid.add(0.0, 0.0, 10.0, 11.0, 2),
		Err(GridError::TooManyCells { cells: 110, limit: 100 })
	);
	assert_eq!(
		grid.add(0.0, 0.0, f32::MAX, 1.0, 3),
		Err(GridError::TooManyCells { cells: i32::MAX as u64, limit: 100 })
	);
	assert_eq!(grid.len(), 1);
	assert_eq!(grid.bucket_count(), 100);
}

#[test]
pub fn cell_hashes_spread_over_slots_and_tags() {
	let hashes = (0..32)
		.flat_map(|cx| (0..32).map(move |cy| (cx, cy)))
		.map(|(cx, cy)| {
			let mut hasher = BuildHasherDefault::<NoHashHasher<u64>>::default().build_hasher();
			CellKey::new(cx, cy).hash(&mut hasher);
			hasher.finish()
		})
		.collect::<Vec<_>>();

	let slots = hashes.iter().map(|hash| hash & 1023).collect::<HashSet<_>>();
	let tags = hashes.iter().map(|hash| hash >> 57).collect::<HashSet<_>>();
	assert!(slots.len() > 512, "Neighbouring cells share start slots ({} of 1024 used)", slots.len());
	assert!(tags.len() > 64, "Neighbouring cells share control tags ({} of 128 used)", tags.len());
}

#[test]
pub fn large_regions_fill_quickly() {
	let mut grid = SpatialHashGrid::<u32>::new(1.0).unwrap();
	grid.add(0.0, 0.0, 200.0, 200.0, 1).unwrap();

	assert_eq!(grid.bucket_count(), 40000);
	assert_eq!(grid.query_region(100.0, 100.0, 1.0, 1.0).unwrap(), vec![1]);
	assert!(grid.remove(&1));
	assert_eq!(grid.bucket_count(), 0);
}
