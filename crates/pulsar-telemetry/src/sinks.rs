//! Pluggable event sinks.
//!
//! Sinks consume events from the bus and process them (collect in memory,
//! log through tracing, stream elsewhere).

use crate::events::FrameEvent;

/// Trait for event consumers.
pub trait EventSink: Send {
    /// Process a single event.
    fn handle(&mut self, event: &FrameEvent);

    /// Called once when the run ends. Flush buffers, close files, etc.
    fn finalize(&mut self) {}

    /// Returns a human-readable name for this sink.
    fn name(&self) -> &str;
}

/// A sink that collects events into a `Vec` for tests and inspection.
pub struct VecSink {
    /// Collected events.
    pub events: Vec<FrameEvent>,
}

impl VecSink {
    /// Creates an empty vec sink.
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }
}

impl Default for VecSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for VecSink {
    fn handle(&mut self, event: &FrameEvent) {
        self.events.push(event.clone());
    }

    fn name(&self) -> &str {
        "vec_sink"
    }
}

/// A sink that logs events through the `tracing` crate.
pub struct TracingSink;

impl TracingSink {
    /// Creates a new tracing sink.
    pub fn new() -> Self {
        Self
    }
}

impl Default for TracingSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for TracingSink {
    fn handle(&mut self, event: &FrameEvent) {
        tracing::info!(
            frame = event.frame.value(),
            event = ?event.kind,
            "frame_event"
        );
    }

    fn name(&self) -> &str {
        "tracing_sink"
    }
}
