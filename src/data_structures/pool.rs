use std::ops::{Deref, DerefMut};
use std::cell::RefCell;
use std::rc::Rc;

/// A pool of reusable scratch values.
///
/// Borrowed values are handed back to the pool when the [PoolBorrow] is dropped,
/// so the pool never holds a borrow of its owner while the value is in use.
#[derive(Default)]
pub struct Pool<T: Default> {
	values: Rc<RefCell<Vec<T>>>,
}

pub struct PoolBorrow<T> {
	value: Option<T>,
	values: Rc<RefCell<Vec<T>>>,
}

impl<T: Default> Pool<T> {
	pub fn take_one(&mut self) -> PoolBorrow<T> {
		let value = self.values.borrow_mut().pop().unwrap_or_default();
		PoolBorrow {
			value: Some(value),
			values: self.values.clone(),
		}
	}

	/// Number of idle values waiting in the pool.
	pub fn idle(&self) -> usize {
		self.values.borrow().len()
	}
}

impl<T> Deref for PoolBorrow<T> {
	type Target = T;
	fn deref(&self) -> &Self::Target {
		match &self.value {
			Some(value) => value,
			None => unreachable!("Pool value is only taken on drop"),
		}
	}
}

impl<T> DerefMut for PoolBorrow<T> {
	fn deref_mut(&mut self) -> &mut Self::Target {
		match &mut self.value {
			Some(value) => value,
			None => unreachable!("Pool value is only taken on drop"),
		}
	}
}

impl<T> Drop for PoolBorrow<T> {
	fn drop(&mut self) {
		if let Some(value) = self.value.take() {
			self.values.borrow_mut().push(value);
		}
	}
}
