//! # pulsar-telemetry
//!
//! Event bus for the frame-update lifecycle. Emits structured events
//! (frame timing, artifact builds, publish outcomes) consumed by
//! pluggable sinks (in-memory capture, tracing logs).

pub mod bus;
pub mod events;
pub mod sinks;

pub use bus::EventBus;
pub use events::{EventKind, FrameEvent};
pub use sinks::{EventSink, TracingSink, VecSink};
