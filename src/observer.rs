use std::sync::Mutex;

/// Structured log sink injected into the engine. Events are snake_case
/// identifiers; details are `key=value` strings. The core logic has no I/O
/// side effects beyond the chain client, so all telemetry flows through here.
pub trait ExecutionObserver: Send + Sync {
    fn info(&self, _event: &str, _detail: &str) {}
    fn warn(&self, _event: &str, _detail: &str) {}
}

/// Discards everything. The default observer.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopObserver;

impl ExecutionObserver for NoopObserver {}

/// Forwards events to the `tracing` subscriber installed by the host
/// application.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingObserver;

impl ExecutionObserver for TracingObserver {
    fn info(&self, event: &str, detail: &str) {
        tracing::info!(event, "{detail}");
    }

    fn warn(&self, event: &str, detail: &str) {
        tracing::warn!(event, "{detail}");
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ObservedEvent {
    pub level: ObservedLevel,
    pub event: String,
    pub detail: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ObservedLevel {
    Info,
    Warn,
}

/// Captures events in memory so tests can assert on them.
#[derive(Debug, Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<ObservedEvent>>,
}

impl RecordingObserver {
    pub fn events(&self) -> Vec<ObservedEvent> {
        self.events
            .lock()
            .expect("observer lock should not be poisoned")
            .clone()
    }

    pub fn has_warning(&self, event: &str) -> bool {
        self.events()
            .iter()
            .any(|entry| entry.level == ObservedLevel::Warn && entry.event == event)
    }

    fn record(&self, level: ObservedLevel, event: &str, detail: &str) {
        self.events
            .lock()
            .expect("observer lock should not be poisoned")
            .push(ObservedEvent {
                level,
                event: event.to_string(),
                detail: detail.to_string(),
            });
    }
}

impl ExecutionObserver for RecordingObserver {
    fn info(&self, event: &str, detail: &str) {
        self.record(ObservedLevel::Info, event, detail);
    }

    fn warn(&self, event: &str, detail: &str) {
        self.record(ObservedLevel::Warn, event, detail);
    }
}
