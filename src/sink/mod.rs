//! Event sinks and fan-out dispatch.
//!
//! A sink is a single-operation capability: it accepts a severity and a
//! message and renders or persists it. The [`Broadcaster`] holds shared
//! handles to an ordered set of sinks and delivers every event to all of
//! them.

mod broadcaster;
mod console;
mod file;

pub use broadcaster::Broadcaster;
pub use console::ConsoleSink;
pub use file::FileSink;

/// Event severity, ordered by urgency.
///
/// The ordering drives rendering color only; there is no priority
/// queueing anywhere in the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Debug,
    Info,
    Warning,
    Error,
}

impl Severity {
    /// Uppercase wire name used in the log file format.
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Debug => "DEBUG",
            Severity::Info => "INFO",
            Severity::Warning => "WARNING",
            Severity::Error => "ERROR",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Capability interface for event delivery.
///
/// Delivery is best-effort and synchronous: a sink may block its caller
/// for the duration of its I/O, and it must serialize its own writes so
/// concurrent deliveries never corrupt a single line.
pub trait Sink: Send + Sync {
    /// Renders or persists one event.
    fn deliver(&self, severity: Severity, message: &str);
}
