//! Mock filesystem for testing the sampler without a real `/proc`.

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use super::traits::FileSystem;

const GIB: u64 = 1024 * 1024 * 1024;

/// In-memory [`FileSystem`] implementation.
///
/// Clones share state, so a test can hold one handle to mutate fixture
/// contents while the sampler reads through another.
#[derive(Debug, Clone, Default)]
pub struct MockFs {
    files: Arc<Mutex<HashMap<PathBuf, String>>>,
    disk: Arc<Mutex<Option<(u64, u64)>>>,
}

impl MockFs {
    /// Creates an empty mock filesystem. Every read fails, which exercises
    /// the degraded-acquisition path.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a mock of a typical idle system: 16 GB RAM with 12 GB
    /// available, a 500 GiB root filesystem with 200 GiB free.
    pub fn typical_system() -> Self {
        let fs = Self::new();
        fs.set_cpu_ticks(10000, 80000, 1000);
        fs.set_file(
            "/proc/meminfo",
            "\
MemTotal:       16384000 kB
MemFree:         8192000 kB
MemAvailable:   12000000 kB
Buffers:          512000 kB
Cached:          2048000 kB
",
        );
        fs.set_disk_usage(500 * GIB, 200 * GIB);
        fs
    }

    /// Sets the content of a file.
    pub fn set_file(&self, path: impl Into<PathBuf>, content: impl Into<String>) {
        self.files
            .lock()
            .unwrap()
            .insert(path.into(), content.into());
    }

    /// Writes a `/proc/stat` fixture with the given aggregate counters.
    /// Tests step these to simulate CPU activity between samples.
    pub fn set_cpu_ticks(&self, user: u64, idle: u64, iowait: u64) {
        self.set_file(
            "/proc/stat",
            format!(
                "cpu  {user} 0 0 {idle} {iowait} 0 0 0 0 0\n\
                 cpu0 {user} 0 0 {idle} {iowait} 0 0 0 0 0\n\
                 ctxt 500000\n"
            ),
        );
    }

    /// Sets the reported filesystem size.
    pub fn set_disk_usage(&self, total: u64, free: u64) {
        *self.disk.lock().unwrap() = Some((total, free));
    }
}

impl FileSystem for MockFs {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        self.files
            .lock()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("mock file not found: {}", path.display()),
                )
            })
    }

    fn disk_usage(&self, path: &Path) -> io::Result<(u64, u64)> {
        self.disk.lock().unwrap().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("mock disk usage not configured for {}", path.display()),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_fs_read() {
        let fs = MockFs::new();
        fs.set_file("/proc/stat", "cpu 1 2 3 4 5\n");
        assert_eq!(
            fs.read_to_string(Path::new("/proc/stat")).unwrap(),
            "cpu 1 2 3 4 5\n"
        );
        assert!(fs.read_to_string(Path::new("/proc/meminfo")).is_err());
    }

    #[test]
    fn test_mock_fs_clones_share_state() {
        let fs = MockFs::new();
        let reader = fs.clone();
        fs.set_file("/proc/stat", "cpu 1 0 0 9 0\n");
        assert!(reader.read_to_string(Path::new("/proc/stat")).is_ok());
    }

    #[test]
    fn test_mock_fs_disk_usage() {
        let fs = MockFs::new();
        assert!(fs.disk_usage(Path::new("/")).is_err());
        fs.set_disk_usage(100, 40);
        assert_eq!(fs.disk_usage(Path::new("/")).unwrap(), (100, 40));
    }
}
