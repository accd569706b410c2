mod broad_phase_tests;
mod query_tests;
mod spatial_hash_grid_tests;

pub(crate) fn init_logger() {
	let _ = env_logger::builder().is_test(true).try_init();
}
