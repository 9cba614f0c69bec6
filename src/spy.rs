use crate::detail::Detail;

/// One captured event.
#[derive(Debug, Clone, PartialEq)]
pub struct SpyEvent {
    pub detail: Detail,
}

/// Ordered log of the events of one name fired on an element.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventSpy {
    pub event_name: String,
    pub events: Vec<SpyEvent>,
}

impl EventSpy {
    pub fn new(event_name: impl Into<String>) -> Self {
        Self {
            event_name: event_name.into(),
            events: Vec::new(),
        }
    }

    /// Record an event carrying `detail`.
    pub fn record(&mut self, detail: impl Into<Detail>) {
        self.events.push(SpyEvent {
            detail: detail.into(),
        });
    }

    pub fn first_event(&self) -> Option<&SpyEvent> {
        self.events.first()
    }

    pub fn last_event(&self) -> Option<&SpyEvent> {
        self.events.last()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
