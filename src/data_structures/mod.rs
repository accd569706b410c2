mod pool;
mod bit_field;
mod dense_store;
mod range_allocator;
mod hash_mix;

pub use pool::*;
pub use bit_field::*;
pub use dense_store::*;
pub use range_allocator::*;

pub(crate) use hash_mix::mix64;
