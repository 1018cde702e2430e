//! The metrics sampler: one point-in-time snapshot per call.

use std::path::PathBuf;

use tracing::warn;

use super::parser::{self, CpuTicks};
use super::traits::FileSystem;

/// One immutable point-in-time reading of host health.
///
/// Acquisition failures are not propagated: affected fields stay zero and
/// the pipeline keeps running, trading accuracy for availability.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MetricsSnapshot {
    /// Aggregate CPU load in percent, 0.0..=100.0.
    pub cpu_load_percent: f64,
    /// System-wide used memory in bytes (MemTotal - MemAvailable).
    pub memory_used_bytes: u64,
    /// Total physical memory in bytes.
    pub memory_total_bytes: u64,
    /// Free bytes on the monitored filesystem.
    pub disk_free_bytes: u64,
    /// Total bytes on the monitored filesystem.
    pub disk_total_bytes: u64,
}

/// Source of metric snapshots.
///
/// Implementations may keep internal state between calls (cumulative CPU
/// tick counters) to compute rate-based figures.
pub trait MetricsSource: Send {
    /// Produces a snapshot of the current host health.
    fn sample(&mut self) -> MetricsSnapshot;
}

/// Sampler backed by `/proc` and `statvfs`, generic over [`FileSystem`]
/// so it can run against a mock.
///
/// CPU load is tick-based: `100 * (1 - idle_delta / total_delta)` between
/// two consecutive readings of the aggregate `cpu` line. The counters are
/// primed at construction so the first visible sample does not report a
/// spurious 0% or 100% spike.
pub struct ProcSampler<F: FileSystem> {
    fs: F,
    proc_path: PathBuf,
    disk_path: PathBuf,
    prev_ticks: CpuTicks,
}

impl<F: FileSystem> ProcSampler<F> {
    /// Creates a sampler reading from `proc_path` (normally `/proc`) and
    /// measuring disk space of the filesystem containing `disk_path`
    /// (normally `/`). Primes the CPU counters with an initial reading.
    pub fn new(fs: F, proc_path: impl Into<PathBuf>, disk_path: impl Into<PathBuf>) -> Self {
        let mut sampler = Self {
            fs,
            proc_path: proc_path.into(),
            disk_path: disk_path.into(),
            prev_ticks: CpuTicks::default(),
        };
        sampler.prev_ticks = sampler.read_ticks().unwrap_or_default();
        sampler
    }

    fn read_ticks(&self) -> Option<CpuTicks> {
        let path = self.proc_path.join("stat");
        match self.fs.read_to_string(&path) {
            Ok(content) => match parser::parse_cpu_ticks(&content) {
                Ok(ticks) => Some(ticks),
                Err(e) => {
                    warn!("Failed to parse {}: {}", path.display(), e);
                    None
                }
            },
            Err(e) => {
                warn!("Failed to read {}: {}", path.display(), e);
                None
            }
        }
    }

    fn cpu_load(&mut self) -> f64 {
        let Some(current) = self.read_ticks() else {
            return 0.0;
        };

        let total_delta = current.total.saturating_sub(self.prev_ticks.total);
        let idle_delta = current.idle.saturating_sub(self.prev_ticks.idle);
        self.prev_ticks = current;

        if total_delta == 0 {
            return 0.0;
        }
        100.0 * (1.0 - idle_delta as f64 / total_delta as f64)
    }

    fn memory(&self) -> (u64, u64) {
        let path = self.proc_path.join("meminfo");
        match self.fs.read_to_string(&path) {
            Ok(content) => match parser::parse_meminfo(&content) {
                Ok(info) => (info.used_bytes(), info.total_bytes()),
                Err(e) => {
                    warn!("Failed to parse {}: {}", path.display(), e);
                    (0, 0)
                }
            },
            Err(e) => {
                warn!("Failed to read {}: {}", path.display(), e);
                (0, 0)
            }
        }
    }

    fn disk(&self) -> (u64, u64) {
        match self.fs.disk_usage(&self.disk_path) {
            Ok((total, free)) => (free, total),
            Err(e) => {
                warn!("Failed to stat {}: {}", self.disk_path.display(), e);
                (0, 0)
            }
        }
    }
}

impl<F: FileSystem> MetricsSource for ProcSampler<F> {
    fn sample(&mut self) -> MetricsSnapshot {
        let cpu_load_percent = self.cpu_load();
        let (memory_used_bytes, memory_total_bytes) = self.memory();
        let (disk_free_bytes, disk_total_bytes) = self.disk();

        MetricsSnapshot {
            cpu_load_percent,
            memory_used_bytes,
            memory_total_bytes,
            disk_free_bytes,
            disk_total_bytes,
        }
    }
}
