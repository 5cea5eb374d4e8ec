use super::event::Event;
use crate::sync::Arc;
use crossbeam::deque::{Injector, Worker};

pub struct EventConsumer {
    channel: Arc<Injector<Event>>,
    queue: Worker<Event>,
}

impl EventConsumer {
    pub fn new(channel: Arc<Injector<Event>>, queue: Worker<Event>) -> Self {
        Self { channel, queue }
    }

    pub fn fetch(&self) {
        while self.channel.steal_batch(&self.queue).is_retry() {}
    }

    pub fn pop(&self) -> Option<Event> {
        self.queue.pop()
    }

    /// Fetch everything sent so far and return it in the order it was sent.
    pub fn drain(&self) -> Vec<Event> {
        let mut events = vec![];
        loop {
            self.fetch();
            match self.pop() {
                Some(event) => {
                    events.push(event);
                    while let Some(event) = self.pop() {
                        events.push(event);
                    }
                }
                None => break,
            }
        }
        events
    }

    pub fn is_empty(&self) -> bool {
        self.fetch();
        self.queue.is_empty()
    }
}
