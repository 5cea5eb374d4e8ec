use super::event::Event;
use super::EventConsumer;
use crate::sync::Arc;
use crossbeam::deque::{Injector, Worker};

/// A multi-producer event bus. Lookups running on any thread can `send` into it, and any number
/// of consumers can steal from it.
///
#[derive(Clone, Debug, Default)]
pub struct EventChannel {
    bus: Arc<Injector<Event>>,
}

impl EventChannel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.bus.is_empty()
    }

    pub fn send<E>(&self, event: E)
    where
        E: Into<Event>,
    {
        self.bus.push(event.into())
    }

    pub fn consumer(&self) -> EventConsumer {
        EventConsumer::new(self.bus.clone(), Worker::new_fifo())
    }
}
