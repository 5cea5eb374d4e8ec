#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum LookupEvent {
    LookupStarted {
        provider: String,
        source: String,
    },
    LookupAnswered {
        provider: String,
        source: String,
        target_count: usize,
    },
    LookupDeclined {
        provider: String,
        source: String,
    },
    LookupFailed {
        provider: String,
        source: String,
        error: String,
    },
}

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum ResolutionEvent {
    ResolutionStarted { source: String, provider_count: usize },
    NoProvidersRegistered { source: String },
}

#[derive(Default, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Event {
    /// The "nothing happened" event.
    #[default]
    Noop,
    LookupEvent(LookupEvent),
    ResolutionEvent(ResolutionEvent),
}

impl From<LookupEvent> for Event {
    fn from(value: LookupEvent) -> Self {
        Event::LookupEvent(value)
    }
}

impl From<ResolutionEvent> for Event {
    fn from(value: ResolutionEvent) -> Self {
        Event::ResolutionEvent(value)
    }
}
