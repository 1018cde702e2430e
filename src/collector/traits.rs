//! Abstractions for filesystem access to enable testing and mocking.
//!
//! The `FileSystem` trait allows the sampler to work with both the real
//! `/proc` filesystem on Linux and mock implementations for testing on
//! other platforms or in CI.

use std::io;
use std::path::Path;

/// Abstraction for the filesystem operations the sampler needs.
pub trait FileSystem: Send + Sync {
    /// Reads the entire contents of a file as a string.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Returns `(total_bytes, free_bytes)` for the filesystem containing
    /// `path`. Free space is what an unprivileged caller could use.
    fn disk_usage(&self, path: &Path) -> io::Result<(u64, u64)>;
}

/// Real filesystem implementation.
///
/// File reads delegate to `std::fs`; disk usage queries `statvfs`.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealFs;

impl RealFs {
    /// Creates a new `RealFs` instance.
    pub fn new() -> Self {
        Self
    }
}

impl FileSystem for RealFs {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    #[cfg(unix)]
    fn disk_usage(&self, path: &Path) -> io::Result<(u64, u64)> {
        use std::ffi::CString;
        use std::os::unix::ffi::OsStrExt;

        let c_path = CString::new(path.as_os_str().as_bytes())
            .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "path contains NUL"))?;

        // SAFETY: c_path is a valid NUL-terminated string and stat is a
        // properly sized, zeroed statvfs struct.
        let mut stat: libc::statvfs = unsafe { std::mem::zeroed() };
        let ret = unsafe { libc::statvfs(c_path.as_ptr(), &mut stat) };
        if ret != 0 {
            return Err(io::Error::last_os_error());
        }

        // f_frsize is the fundamental block size; f_bavail counts blocks
        // available to unprivileged processes.
        let block_size = stat.f_frsize as u64;
        let total = stat.f_blocks as u64 * block_size;
        let free = stat.f_bavail as u64 * block_size;
        Ok((total, free))
    }

    #[cfg(not(unix))]
    fn disk_usage(&self, _path: &Path) -> io::Result<(u64, u64)> {
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            "disk usage is only available on unix",
        ))
    }
}
