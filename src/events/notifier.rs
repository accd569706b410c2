use crate::events::EventReader;
use std::collections::VecDeque;
use std::cell::RefCell;
use std::rc::Rc;

/// Identifies a single subscription to a [Notifier].
#[derive(Debug, Hash, Copy, Clone, Eq, PartialEq, Ord, PartialOrd)]
pub struct SubscriptionId(u64);

type Callback<T> = Box<dyn FnMut(&T) -> bool>;

/// A synchronous publish/subscribe primitive.
///
/// [notify](Notifier::notify) invokes every subscriber in registration order, on the caller's stack.
/// Nothing is buffered; use [reader](Notifier::reader) to collect events for later.
pub struct Notifier<T> {
	next_id: u64,
	subscribers: Vec<(SubscriptionId, Callback<T>)>,
	meta: Option<Box<MetaNotifiers>>,
}

#[derive(Default)]
struct MetaNotifiers {
	on_subscribe: Notifier<SubscriptionId>,
	on_unsubscribe: Notifier<SubscriptionId>,
}

impl<T> Notifier<T> {
	pub fn new() -> Self {
		Self {
			next_id: 1,
			subscribers: Vec::new(),
			meta: None,
		}
	}

	/// Register `callback`. The returned id can be passed to [unsubscribe](Notifier::unsubscribe).
	pub fn subscribe(&mut self, mut callback: impl FnMut(&T) + 'static) -> SubscriptionId {
		self.subscribe_while(move |value| {
			callback(value);
			true
		})
	}

	/// Register `callback`, keeping it subscribed for as long as it returns true.
	///
	/// A callback returning false is removed right after that invocation
	/// and is never invoked again, not even later in the same pass.
	pub fn subscribe_while(&mut self, callback: impl FnMut(&T) -> bool + 'static) -> SubscriptionId {
		let id = SubscriptionId(self.next_id);
		self.next_id += 1;

		self.subscribers.push((id, Box::new(callback)));
		if let Some(meta) = &mut self.meta {
			meta.on_subscribe.notify(&id);
		}
		id
	}

	/// Remove a subscription. Returns false if it wasn't registered.
	///
	/// The `on_unsubscribe` subscribers are notified either way.
	pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
		let count = self.subscribers.len();
		self.subscribers.retain(|(i, _)| *i != id);

		if let Some(meta) = &mut self.meta {
			meta.on_unsubscribe.notify(&id);
		}
		self.subscribers.len() != count
	}

	/// Invoke every subscriber with `value`, in subscription order.
	pub fn notify(&mut self, value: &T) {
		let mut expired = Vec::new();
		self.subscribers.retain_mut(|(id, callback)| {
			let keep = callback(value);
			if !keep {
				expired.push(*id);
			}
			keep
		});

		if let Some(meta) = &mut self.meta {
			for id in expired {
				meta.on_unsubscribe.notify(&id);
			}
		}
	}

	/// Remove every subscriber, notifying `on_unsubscribe` once for each of them.
	pub fn clear(&mut self) {
		let subscribers = std::mem::take(&mut self.subscribers);
		if let Some(meta) = &mut self.meta {
			for (id, _) in &subscribers {
				meta.on_unsubscribe.notify(id);
			}
		}
	}

	pub fn contains(&self, id: SubscriptionId) -> bool {
		self.subscribers.iter().any(|(i, _)| *i == id)
	}

	pub fn len(&self) -> usize {
		self.subscribers.len()
	}

	pub fn is_empty(&self) -> bool {
		self.subscribers.is_empty()
	}

	/// Notified with the id of every new subscription.
	pub fn on_subscribe(&mut self) -> &mut Notifier<SubscriptionId> {
		&mut self.meta.get_or_insert_with(Default::default).on_subscribe
	}

	/// Notified with the id of every unsubscription request.
	pub fn on_unsubscribe(&mut self) -> &mut Notifier<SubscriptionId> {
		&mut self.meta.get_or_insert_with(Default::default).on_unsubscribe
	}
}

impl<T: Clone + 'static> Notifier<T> {
	/// Subscribe a queue that collects every notified value until it's drained.
	pub fn reader(&mut self) -> EventReader<T> {
		let queue = Rc::new(RefCell::new(VecDeque::new()));
		let sink = queue.clone();
		let subscription = self.subscribe(move |value: &T| sink.borrow_mut().push_back(value.clone()));
		EventReader::new(queue, subscription)
	}
}

impl<T> Default for Notifier<T> {
	fn default() -> Self {
		Self::new()
	}
}
