use std::collections::vec_deque::IntoIter;
use crate::events::SubscriptionId;
use std::collections::VecDeque;
use std::cell::RefCell;
use std::rc::Rc;

/// A buffered subscription to a [Notifier](crate::events::Notifier).
///
/// Values are queued synchronously as they're notified and handed out by [drain](EventReader::drain),
/// typically once per frame. The queue is shared with the subscription, so the reader doesn't borrow the notifier.
pub struct EventReader<T> {
	queue: Rc<RefCell<VecDeque<T>>>,
	subscription: SubscriptionId,
}

impl<T> EventReader<T> {
	pub(crate) fn new(queue: Rc<RefCell<VecDeque<T>>>, subscription: SubscriptionId) -> Self {
		Self { queue, subscription }
	}

	/// Take every queued value, oldest first.
	pub fn drain(&self) -> IntoIter<T> {
		std::mem::take(&mut *self.queue.borrow_mut()).into_iter()
	}

	/// The subscription feeding this reader.
	pub fn subscription(&self) -> SubscriptionId {
		self.subscription
	}

	pub fn len(&self) -> usize {
		self.queue.borrow().len()
	}

	pub fn is_empty(&self) -> bool {
		self.queue.borrow().is_empty()
	}
}
