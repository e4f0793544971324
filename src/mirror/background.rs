//! Off-thread delivery for a mirror sink

use std::sync::mpsc;
use std::thread;

use super::event::MirrorEvent;
use super::MirrorSink;

/// Hands events to a worker thread that feeds the wrapped sink.
///
/// `record` only enqueues. Dropping the wrapper closes the channel and waits
/// for queued events to drain.
pub struct BackgroundMirror {
    sender: Option<mpsc::Sender<MirrorEvent>>,
    worker: Option<thread::JoinHandle<()>>,
}

impl BackgroundMirror {
    pub fn new<S>(sink: S) -> Self
    where
        S: MirrorSink + Send + 'static,
    {
        let (sender, receiver) = mpsc::channel::<MirrorEvent>();
        let worker = thread::spawn(move || {
            for event in receiver {
                sink.record(event);
            }
        });

        Self {
            sender: Some(sender),
            worker: Some(worker),
        }
    }
}

impl MirrorSink for BackgroundMirror {
    fn record(&self, event: MirrorEvent) {
        let Some(sender) = &self.sender else {
            return;
        };
        if let Err(e) = sender.send(event) {
            tracing::warn!(event = e.0.kind(), "mirror worker is gone, event dropped");
        }
    }
}

impl Drop for BackgroundMirror {
    fn drop(&mut self) {
        self.sender.take();
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                tracing::warn!("mirror worker panicked");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mirror::JournalMirror;
    use tempfile::TempDir;

    #[test]
    fn test_events_drain_on_drop() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("mirror.jsonl");

        {
            let mirror = BackgroundMirror::new(JournalMirror::new(path.clone()));
            for i in 0..5 {
                mirror.record(MirrorEvent::GroupCreated {
                    name: format!("Group {}", i),
                    currency: "INR".into(),
                });
            }
        }

        let records = JournalMirror::new(path).read_all().unwrap();
        assert_eq!(records.len(), 5);
    }
}
