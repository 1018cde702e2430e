//! Fan-out dispatcher over the registered sinks.

use std::sync::{Arc, Mutex};

use super::{Severity, Sink};

/// Holds an ordered registry of sinks and fans every event out to all of
/// them.
///
/// Dispatch runs under a single critical section: delivery of one event
/// to every sink completes before the next event's delivery begins, so
/// two events' deliveries never interleave across sinks. The flip side is
/// that one slow or blocking sink stalls the whole pipeline; there is no
/// per-sink isolation.
pub struct Broadcaster {
    sinks: Mutex<Vec<Arc<dyn Sink>>>,
}

impl Broadcaster {
    pub fn new() -> Self {
        Self {
            sinks: Mutex::new(Vec::new()),
        }
    }

    /// Appends a sink to the registry. Insertion order is delivery order.
    pub fn add_sink(&self, sink: Arc<dyn Sink>) {
        self.sinks.lock().unwrap().push(sink);
    }

    /// Delivers the event to every registered sink, in registration order.
    pub fn dispatch(&self, severity: Severity, message: &str) {
        let sinks = self.sinks.lock().unwrap();
        for sink in sinks.iter() {
            sink.deliver(severity, message);
        }
    }
}

impl Default for Broadcaster {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::thread;

    struct RecordingSink {
        name: &'static str,
        events: Arc<Mutex<Vec<(String, Severity, String)>>>,
    }

    impl Sink for RecordingSink {
        fn deliver(&self, severity: Severity, message: &str) {
            self.events
                .lock()
                .unwrap()
                .push((self.name.to_string(), severity, message.to_string()));
        }
    }

    #[test]
    fn test_dispatch_in_registration_order() {
        let events = Arc::new(Mutex::new(Vec::new()));
        let broadcaster = Broadcaster::new();
        broadcaster.add_sink(Arc::new(RecordingSink {
            name: "first",
            events: events.clone(),
        }));
        broadcaster.add_sink(Arc::new(RecordingSink {
            name: "second",
            events: events.clone(),
        }));

        broadcaster.dispatch(Severity::Warning, "disk almost full");

        let recorded = events.lock().unwrap();
        assert_eq!(recorded.len(), 2);
        assert_eq!(recorded[0].0, "first");
        assert_eq!(recorded[1].0, "second");
        assert_eq!(recorded[0].1, Severity::Warning);
        assert_eq!(recorded[0].2, "disk almost full");
    }

    #[test]
    fn test_events_do_not_interleave_across_sinks() {
        // Two threads dispatching concurrently: each event's deliveries
        // to both sinks must stay adjacent in the recorded stream.
        let events = Arc::new(Mutex::new(Vec::new()));
        let broadcaster = Arc::new(Broadcaster::new());
        for name in ["a", "b"] {
            broadcaster.add_sink(Arc::new(RecordingSink {
                name,
                events: events.clone(),
            }));
        }

        let handles: Vec<_> = (0..4)
            .map(|t| {
                let b = broadcaster.clone();
                thread::spawn(move || {
                    for i in 0..50 {
                        b.dispatch(Severity::Info, &format!("{t}-{i}"));
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }

        let recorded = events.lock().unwrap();
        assert_eq!(recorded.len(), 4 * 50 * 2);
        for pair in recorded.chunks(2) {
            assert_eq!(pair[0].0, "a");
            assert_eq!(pair[1].0, "b");
            assert_eq!(pair[0].2, pair[1].2);
        }
    }
}
