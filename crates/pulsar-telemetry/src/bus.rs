//! Event bus — broadcast-style dispatch to registered sinks.
//!
//! Events go through a `std::sync::mpsc` channel and reach sinks when the
//! owner calls `flush`, typically once per frame and once at shutdown.

use std::sync::mpsc;

use crate::events::FrameEvent;
use crate::sinks::EventSink;

/// Broadcast event bus for frame telemetry.
///
/// `emit` is the producer side; `flush` drains pending events into every
/// registered sink. A disabled bus drops events silently.
pub struct EventBus {
    sender: mpsc::Sender<FrameEvent>,
    receiver: mpsc::Receiver<FrameEvent>,
    sinks: Vec<Box<dyn EventSink>>,
    enabled: bool,
}

impl EventBus {
    /// Creates a bus with no sinks.
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            sender,
            receiver,
            sinks: Vec::new(),
            enabled: true,
        }
    }

    /// Registers a sink to receive events.
    pub fn add_sink(&mut self, sink: Box<dyn EventSink>) {
        self.sinks.push(sink);
    }

    /// Enables or disables the bus.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Returns true if the bus is active.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Emits an event. No-op while disabled.
    pub fn emit(&self, event: FrameEvent) {
        if !self.enabled {
            return;
        }
        // Send to channel — ignore error if receiver is somehow dropped
        let _ = self.sender.send(event);
    }

    /// Drains all pending events into the registered sinks.
    pub fn flush(&mut self) {
        while let Ok(event) = self.receiver.try_recv() {
            for sink in &mut self.sinks {
                sink.handle(&event);
            }
        }
    }

    /// Flushes remaining events and finalizes every sink.
    pub fn finalize(&mut self) {
        self.flush();
        for sink in &mut self.sinks {
            sink.finalize();
        }
    }

    /// Returns the number of registered sinks.
    pub fn sink_count(&self) -> usize {
        self.sinks.len()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
