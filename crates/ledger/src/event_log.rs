use std::fmt;
use std::sync::Arc;

use distmarket_clock::SystemClock;
use distmarket_core::{Event, EventKind, Timestamp};
use distmarket_ports::Clock;
use parking_lot::RwLock;

/// Append-only, ordered record of events
///
/// Cloning the handle shares the underlying log. Sequence numbers start at 0
/// and increase by one per append; timestamps come from the clock but never
/// go backwards, even if the clock does.
#[derive(Clone)]
pub struct EventLog {
    entries: Arc<RwLock<Vec<Event>>>,
    clock: Arc<dyn Clock>,
}

impl EventLog {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: Arc::new(RwLock::new(Vec::new())),
            clock,
        }
    }

    /// Log stamped with wall-clock time
    pub fn with_system_clock() -> Self {
        Self::new(Arc::new(SystemClock::new()))
    }

    /// Append an event and return the stored entry
    pub fn append(&self, kind: EventKind) -> Event {
        let mut entries = self.entries.write();
        let now = self.clock.now();
        let timestamp = entries
            .last()
            .map_or(now, |last| last.timestamp.max(now));

        let event = Event {
            sequence: entries.len() as u64,
            timestamp,
            kind,
        };
        entries.push(event.clone());
        event
    }

    /// Current time of the log's clock
    pub fn now(&self) -> Timestamp {
        self.clock.now()
    }

    /// Events with `sequence >= index`, in order
    pub fn events_since(&self, index: usize) -> Vec<Event> {
        let entries = self.entries.read();
        entries.get(index..).map(<[Event]>::to_vec).unwrap_or_default()
    }

    /// All events with the given name, in order
    pub fn events_named(&self, name: &str) -> Vec<Event> {
        self.entries
            .read()
            .iter()
            .filter(|event| event.name() == name)
            .cloned()
            .collect()
    }

    pub fn last(&self) -> Option<Event> {
        self.entries.read().last().cloned()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl Default for EventLog {
    fn default() -> Self {
        Self::with_system_clock()
    }
}

impl fmt::Debug for EventLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventLog")
            .field("len", &self.len())
            .field("clock", &self.clock.name())
            .finish()
    }
}
