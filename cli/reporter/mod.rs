use blazelink_core::events::event::*;
use blazelink_core::events::{EventChannel, EventConsumer};
use std::sync::Arc;
use tracing::debug;

trait Reporter {
    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Noop => (),
            Event::LookupEvent(e) => self.on_lookup_event(e),
            Event::ResolutionEvent(e) => self.on_resolution_event(e),
        }
    }

    fn on_lookup_event(&mut self, _event: LookupEvent) {}
    fn on_resolution_event(&mut self, _event: ResolutionEvent) {}
}

/// Prints what each provider did while resolving a source file to stderr, so stdout stays
/// reserved for the results.
///
pub struct LookupReporter {
    event_consumer: EventConsumer,
    failures: u32,
}

impl LookupReporter {
    pub fn new(event_channel: Arc<EventChannel>) -> LookupReporter {
        LookupReporter {
            event_consumer: event_channel.consumer(),
            failures: 0,
        }
    }

    /// Report every event sent so far.
    pub fn flush(&mut self) {
        for event in self.event_consumer.drain() {
            debug!("{:#?}", event);
            self.handle_event(event);
        }
    }

    pub fn failures(&self) -> u32 {
        self.failures
    }
}

impl Reporter for LookupReporter {
    fn on_resolution_event(&mut self, event: ResolutionEvent) {
        let yellow = console::Style::new().yellow();
        let blue_dim = console::Style::new().blue();

        match event {
            ResolutionEvent::ResolutionStarted {
                source,
                provider_count,
            } => {
                eprintln!(
                    "{:>12} {} with {} providers",
                    blue_dim.apply_to("Resolving"),
                    source,
                    provider_count
                );
            }
            ResolutionEvent::NoProvidersRegistered { source } => {
                eprintln!(
                    "{:>12} no providers can resolve {}",
                    yellow.apply_to("WARN"),
                    source
                );
            }
        }
    }

    fn on_lookup_event(&mut self, event: LookupEvent) {
        let green_bold = console::Style::new().green().bold();
        let purple = console::Style::new().magenta().bright();
        let red_bold = console::Style::new().red().bold();

        match event {
            LookupEvent::LookupStarted { .. } => (),
            LookupEvent::LookupAnswered {
                provider,
                target_count,
                ..
            } => {
                eprintln!(
                    "{:>12} {} found {} targets",
                    green_bold.apply_to("Answered"),
                    provider,
                    target_count
                );
            }
            LookupEvent::LookupDeclined { provider, .. } => {
                eprintln!("{:>12} {}", purple.apply_to("Declined"), provider);
            }
            LookupEvent::LookupFailed {
                provider, error, ..
            } => {
                self.failures += 1;
                eprintln!(
                    "{:>12} {}: {}",
                    red_bold.apply_to("Failed"),
                    provider,
                    error
                );
            }
        }
    }
}
