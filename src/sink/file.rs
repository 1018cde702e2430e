//! Append-only file sink.

use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::sync::Mutex;

use chrono::Local;
use tracing::error;

use super::{Severity, Sink};

/// Persists one event per line to an append-only UTF-8 log file.
///
/// Line format: `[YYYY-MM-DD HH:MM:SS] [LEVEL]: message`, flushed per
/// line so the file is safe to tail while the process runs. The file is
/// never truncated; restarts accumulate.
pub struct FileSink {
    writer: Mutex<BufWriter<File>>,
}

impl FileSink {
    /// Opens `path` in append mode, creating it if missing.
    ///
    /// Failure here is a fatal startup error: the caller must abort
    /// before any pipeline thread starts.
    pub fn create(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            writer: Mutex::new(BufWriter::new(file)),
        })
    }
}

impl Sink for FileSink {
    fn deliver(&self, severity: Severity, message: &str) {
        // Timestamp is stamped at write time, independently of when the
        // consumer classified the event.
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");

        let mut writer = self.writer.lock().unwrap();
        if let Err(e) = writeln!(writer, "[{timestamp}] [{severity}]: {message}")
            .and_then(|_| writer.flush())
        {
            error!("Failed to write log line: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_create_fails_on_unwritable_path() {
        let err = FileSink::create(Path::new("/nonexistent-dir/sentinel.log"));
        assert!(err.is_err());
    }

    #[test]
    fn test_line_format() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.log");

        let sink = FileSink::create(&path).unwrap();
        sink.deliver(Severity::Warning, "low disk space");
        sink.deliver(Severity::Info, "all clear");

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("] [WARNING]: low disk space"));
        assert!(lines[0].starts_with('['));
        // [YYYY-MM-DD HH:MM:SS] prefix is 21 characters
        assert_eq!(&lines[0][21..22], " ");
        assert!(lines[1].ends_with("] [INFO]: all clear"));
    }

    #[test]
    fn test_appends_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.log");

        FileSink::create(&path)
            .unwrap()
            .deliver(Severity::Info, "first run");
        FileSink::create(&path)
            .unwrap()
            .deliver(Severity::Info, "second run");

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 2);
    }
}
