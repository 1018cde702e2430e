//! sentinel — host health monitoring agent.
//!
//! Samples machine health (CPU load, memory, disk space) on a fixed cadence,
//! turns the samples into classified events and fans them out to a set of
//! sinks: a colorized console stream, an append-only log file and a live
//! terminal dashboard.
//!
//! Provides:
//! - `collector` — metrics acquisition from `/proc` and `statvfs`
//! - `queue` — bounded hand-off queue between producer and consumer
//! - `sink` — sink capability, console/file variants, fan-out broadcaster
//! - `rules` — alert thresholds and severity classification
//! - `dashboard` — terminal dashboard (stateful sink + stats pane)
//! - `agent` — producer/consumer worker threads
//! - `fmt` — shared formatting helpers

pub mod agent;
pub mod collector;
pub mod dashboard;
pub mod fmt;
pub mod queue;
pub mod rules;
pub mod sink;
