//! Remote mirror
//!
//! Create events are forwarded to a sink after the local write succeeds.
//! Delivery is fire-and-forget: callers never wait on or inspect the outcome,
//! and a failed delivery is only logged.

pub mod background;
pub mod event;
pub mod journal;

pub use background::BackgroundMirror;
pub use event::{MirrorEvent, MirrorRecord};
pub use journal::JournalMirror;

/// Destination for mirror events
pub trait MirrorSink {
    fn record(&self, event: MirrorEvent);
}

/// Sink that discards everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NullMirror;

impl MirrorSink for NullMirror {
    fn record(&self, event: MirrorEvent) {
        tracing::trace!(event = event.kind(), "mirror disabled");
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Mutex;

    use super::{MirrorEvent, MirrorSink};

    /// Keeps events in memory for assertions
    #[derive(Default)]
    pub struct RecordingMirror {
        events: Mutex<Vec<MirrorEvent>>,
    }

    impl RecordingMirror {
        pub fn events(&self) -> Vec<MirrorEvent> {
            self.events.lock().unwrap().clone()
        }
    }

    impl MirrorSink for RecordingMirror {
        fn record(&self, event: MirrorEvent) {
            self.events.lock().unwrap().push(event);
        }
    }
}
