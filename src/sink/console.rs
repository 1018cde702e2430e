//! Colorized console sink.

use std::io::{self, Write};
use std::sync::Mutex;

use super::{Severity, Sink};

// ANSI colors: one per severity, reset after each line.
const BLUE: &str = "\x1b[34m";
const YELLOW: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";
const CYAN: &str = "\x1b[36m";
const RESET: &str = "\x1b[0m";

/// Writes one severity-colored line per event to standard output.
///
/// The handle is guarded by an instance-owned lock so interleaved
/// deliveries from concurrent dispatch paths never split a line.
pub struct ConsoleSink {
    out: Mutex<io::Stdout>,
}

impl ConsoleSink {
    pub fn new() -> Self {
        Self {
            out: Mutex::new(io::stdout()),
        }
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new()
    }
}

impl Sink for ConsoleSink {
    fn deliver(&self, severity: Severity, message: &str) {
        let (color, prefix) = match severity {
            Severity::Info => (BLUE, "[INFO] "),
            Severity::Warning => (YELLOW, "[WARN] "),
            Severity::Error => (RED, "[ERROR] "),
            Severity::Debug => (CYAN, "[DEBUG] "),
        };

        let mut out = self.out.lock().unwrap();
        // Best-effort: a broken stdout must not take the pipeline down.
        let _ = writeln!(out, "{color}{prefix}{message}{RESET}");
        let _ = out.flush();
    }
}
