//! Host metrics acquisition.
//!
//! The sampler reads CPU and memory figures from the Linux `/proc`
//! filesystem and filesystem space via `statvfs`, all behind the
//! [`FileSystem`] trait so everything can run against a mock on other
//! platforms and in tests.
//!
//! # Usage
//!
//! ## Production (Linux)
//!
//! ```ignore
//! use sentinel::collector::{MetricsSource, ProcSampler, RealFs};
//!
//! let mut sampler = ProcSampler::new(RealFs::new(), "/proc", "/");
//! let snapshot = sampler.sample();
//! ```
//!
//! ## Testing (with MockFs)
//!
//! ```
//! use sentinel::collector::{MetricsSource, MockFs, ProcSampler};
//!
//! let mut sampler = ProcSampler::new(MockFs::typical_system(), "/proc", "/");
//! let snapshot = sampler.sample();
//! assert!(snapshot.memory_total_bytes > 0);
//! ```

pub mod mock;
pub mod parser;
mod sampler;
pub mod traits;

pub use mock::MockFs;
pub use sampler::{MetricsSnapshot, MetricsSource, ProcSampler};
pub use traits::{FileSystem, RealFs};
