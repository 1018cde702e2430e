//! Alert thresholds, report synthesis and severity classification.
//!
//! The producer turns each [`MetricsSnapshot`] into human-readable report
//! lines here; the consumer classifies popped lines by marker substrings.

use crate::collector::MetricsSnapshot;
use crate::fmt::gib;
use crate::sink::Severity;

const GIB: u64 = 1024 * 1024 * 1024;

/// Fixed alert thresholds evaluated on every sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    /// CPU load above this percentage raises a warning.
    pub cpu_load_percent: f64,
    /// Free disk space below this byte count raises a warning.
    pub disk_free_bytes: u64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            cpu_load_percent: 90.0,
            disk_free_bytes: 10 * GIB,
        }
    }
}

/// Builds the report lines for one snapshot: always one status line, plus
/// a warning line per exceeded threshold, each embedding the measured
/// values.
pub fn report_lines(snapshot: &MetricsSnapshot, thresholds: &Thresholds) -> Vec<String> {
    let mut lines = vec![format!(
        "[SYSTEM] CPU: {:.2}% | RAM: {:.2} GB / {:.2} GB | Disk Free: {:.2} GB",
        snapshot.cpu_load_percent,
        gib(snapshot.memory_used_bytes),
        gib(snapshot.memory_total_bytes),
        gib(snapshot.disk_free_bytes),
    )];

    if snapshot.cpu_load_percent > thresholds.cpu_load_percent {
        lines.push(format!(
            "WARNING: high CPU load: {:.2}% (threshold {:.2}%)",
            snapshot.cpu_load_percent, thresholds.cpu_load_percent,
        ));
    }

    if snapshot.disk_free_bytes < thresholds.disk_free_bytes {
        lines.push(format!(
            "WARNING: low disk space: {:.2} GB free (threshold {:.2} GB)",
            gib(snapshot.disk_free_bytes),
            gib(thresholds.disk_free_bytes),
        ));
    }

    lines
}

/// Classifies a message by marker substring, with fixed precedence:
/// `ERROR` beats `WARNING`, anything else is informational.
pub fn classify(message: &str) -> Severity {
    if message.contains("ERROR") {
        Severity::Error
    } else if message.contains("WARNING") {
        Severity::Warning
    } else {
        Severity::Info
    }
}
