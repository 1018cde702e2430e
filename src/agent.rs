//! Producer and consumer worker threads.
//!
//! Two long-lived threads connected by the bounded [`EventQueue`]: the
//! producer samples the metrics source on a fixed cadence and pushes
//! report lines; the consumer pops, classifies and hands each line to
//! the [`Broadcaster`]. Both observe a shared cancellation flag and the
//! queue's close signal, so shutdown is deterministic: no blocking point
//! outlives the signal by more than one sleep slice.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::{debug, info, warn};

use ratatui::backend::Backend;

use crate::collector::MetricsSource;
use crate::dashboard::Dashboard;
use crate::queue::{EventQueue, PushError};
use crate::rules::{self, Thresholds};
use crate::sink::Broadcaster;

/// Producer-side configuration.
#[derive(Debug, Clone, Copy)]
pub struct AgentConfig {
    /// Sampling cadence.
    pub interval: Duration,
    /// Alert thresholds evaluated on every sample.
    pub thresholds: Thresholds,
}

/// Spawns the sampling producer.
///
/// Each cycle samples the source, pushes the derived report lines onto
/// the queue and, when a dashboard is present, pushes the raw snapshot
/// to its stats pane directly — stats bypass the queue and share only
/// the dashboard's redraw lock with the event stream.
pub fn spawn_producer<S, B>(
    mut source: S,
    queue: Arc<EventQueue<String>>,
    dashboard: Option<Arc<Dashboard<B>>>,
    config: AgentConfig,
    running: Arc<AtomicBool>,
) -> JoinHandle<()>
where
    S: MetricsSource + 'static,
    B: Backend + Send + 'static,
{
    thread::spawn(move || {
        debug!("Producer started, interval {:?}", config.interval);
        while running.load(Ordering::SeqCst) {
            let snapshot = source.sample();

            if let Some(dashboard) = &dashboard {
                dashboard.update_stats(snapshot);
            }

            for line in rules::report_lines(&snapshot, &config.thresholds) {
                match queue.push(line) {
                    Ok(()) => {}
                    Err(PushError::Rejected(line)) => {
                        warn!("Queue full, dropping report: {}", line);
                    }
                    Err(PushError::Closed(_)) => {
                        debug!("Queue closed, producer exiting");
                        return;
                    }
                }
            }

            sleep_interruptible(config.interval, &running);
        }
        debug!("Producer stopped");
    })
}

/// Spawns the classifying consumer.
///
/// Blocks on `pop`; exits promptly once the queue is closed and drained.
pub fn spawn_consumer(
    queue: Arc<EventQueue<String>>,
    broadcaster: Arc<Broadcaster>,
) -> JoinHandle<()> {
    thread::spawn(move || {
        debug!("Consumer started");
        while let Some(message) = queue.pop() {
            let severity = rules::classify(&message);
            broadcaster.dispatch(severity, &message);
        }
        info!("Consumer drained, exiting");
    })
}

/// Sleeps for `interval` in short slices, returning early once `running`
/// clears.
fn sleep_interruptible(interval: Duration, running: &AtomicBool) {
    let slice = Duration::from_millis(100);
    let mut remaining = interval;
    while remaining > Duration::ZERO && running.load(Ordering::SeqCst) {
        let sleep_time = remaining.min(slice);
        thread::sleep(sleep_time);
        remaining = remaining.saturating_sub(sleep_time);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::time::Instant;

    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use crate::collector::{MetricsSnapshot, MockFs, ProcSampler};
    use crate::queue::OverflowPolicy;
    use crate::sink::{Severity, Sink};

    struct RecordingSink {
        events: Arc<Mutex<Vec<(Severity, String)>>>,
    }

    impl Sink for RecordingSink {
        fn deliver(&self, severity: Severity, message: &str) {
            self.events
                .lock()
                .unwrap()
                .push((severity, message.to_string()));
        }
    }

    const GIB: u64 = 1024 * 1024 * 1024;

    #[test]
    fn test_consumer_classifies_and_dispatches_in_order() {
        let queue = Arc::new(EventQueue::new(16, OverflowPolicy::Block));
        let broadcaster = Arc::new(Broadcaster::new());
        let events = Arc::new(Mutex::new(Vec::new()));
        broadcaster.add_sink(Arc::new(RecordingSink {
            events: events.clone(),
        }));

        let consumer = spawn_consumer(queue.clone(), broadcaster);

        queue.push("[SYSTEM] all quiet".to_string()).unwrap();
        queue.push("WARNING: low disk space".to_string()).unwrap();
        queue.push("ERROR: sensor gone".to_string()).unwrap();
        queue.close();
        consumer.join().unwrap();

        let recorded = events.lock().unwrap();
        assert_eq!(recorded.len(), 3);
        assert_eq!(recorded[0], (Severity::Info, "[SYSTEM] all quiet".into()));
        assert_eq!(
            recorded[1],
            (Severity::Warning, "WARNING: low disk space".into())
        );
        assert_eq!(recorded[2], (Severity::Error, "ERROR: sensor gone".into()));
    }

    #[test]
    fn test_pipeline_end_to_end_with_dashboard() {
        let fs = MockFs::typical_system();
        fs.set_disk_usage(500 * GIB, 4 * GIB); // below the 10 GiB default
        let sampler = ProcSampler::new(fs, "/proc", "/");

        let queue = Arc::new(EventQueue::new(64, OverflowPolicy::Block));
        let broadcaster = Arc::new(Broadcaster::new());
        let events = Arc::new(Mutex::new(Vec::new()));
        broadcaster.add_sink(Arc::new(RecordingSink {
            events: events.clone(),
        }));
        let dashboard = Arc::new(Dashboard::with_terminal(
            Terminal::new(TestBackend::new(80, 30)).unwrap(),
        ));

        let running = Arc::new(AtomicBool::new(true));
        let producer = spawn_producer(
            sampler,
            queue.clone(),
            Some(dashboard.clone()),
            AgentConfig {
                interval: Duration::from_millis(10),
                thresholds: Thresholds::default(),
            },
            running.clone(),
        );
        let consumer = spawn_consumer(queue.clone(), broadcaster);

        // Let a few cycles run, then shut down.
        thread::sleep(Duration::from_millis(100));
        running.store(false, Ordering::SeqCst);
        producer.join().unwrap();
        queue.close();
        consumer.join().unwrap();

        let recorded = events.lock().unwrap();
        assert!(!recorded.is_empty());
        // Every cycle produces a status line followed by the disk warning.
        let warnings: Vec<_> = recorded
            .iter()
            .filter(|(sev, _)| *sev == Severity::Warning)
            .collect();
        assert!(!warnings.is_empty());
        assert!(warnings.iter().all(|(_, m)| m.contains("low disk space")));
        assert!(recorded[0].1.starts_with("[SYSTEM]"));
    }

    #[test]
    fn test_producer_stops_when_queue_closes() {
        struct StaticSource;
        impl MetricsSource for StaticSource {
            fn sample(&mut self) -> MetricsSnapshot {
                MetricsSnapshot::default()
            }
        }

        let queue = Arc::new(EventQueue::new(1, OverflowPolicy::Block));
        let running = Arc::new(AtomicBool::new(true));
        let producer = spawn_producer(
            StaticSource,
            queue.clone(),
            None::<Arc<Dashboard<TestBackend>>>,
            AgentConfig {
                interval: Duration::from_millis(1),
                thresholds: Thresholds::default(),
            },
            running.clone(),
        );

        // Producer blocks on the full queue; closing must unblock it.
        thread::sleep(Duration::from_millis(50));
        queue.close();
        producer.join().unwrap();
    }

    #[test]
    fn test_sleep_interruptible_returns_early() {
        let running = AtomicBool::new(false);
        let start = Instant::now();
        sleep_interruptible(Duration::from_secs(10), &running);
        assert!(start.elapsed() < Duration::from_secs(1));
    }
}
