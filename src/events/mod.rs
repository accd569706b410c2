//! Synchronous notifications.
//!
//! A [Notifier] fans a value out to its subscribers on the caller's stack.
//! An [EventReader] buffers those values so they can be consumed later in the frame.

mod notifier;
mod event_reader;

pub use notifier::*;
pub use event_reader::*;
