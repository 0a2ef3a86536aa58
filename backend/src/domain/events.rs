//! Observability collaborator for domain events.
//!
//! Services and handlers receive an `Arc<dyn EventSink>` instead of logging
//! through a global, so tests can capture what was emitted.

use std::sync::Arc;

pub trait EventSink: Send + Sync {
    fn info(&self, message: &str);
    fn warn(&self, message: &str);
}

pub type SharedEventSink = Arc<dyn EventSink>;

/// Forwards events to `tracing` under the `qa_events` target
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingEventSink;

impl EventSink for TracingEventSink {
    fn info(&self, message: &str) {
        tracing::info!(target: "qa_events", "{}", message);
    }

    fn warn(&self, message: &str) {
        tracing::warn!(target: "qa_events", "{}", message);
    }
}

/// Discards every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopEventSink;

impl EventSink for NoopEventSink {
    fn info(&self, _message: &str) {}

    fn warn(&self, _message: &str) {}
}

#[cfg(test)]
pub use recording::{EventLevel, RecordingEventSink};
