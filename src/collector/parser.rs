//! Parsers for `/proc` filesystem files.
//!
//! These are pure functions that parse the content of `/proc/stat` and
//! `/proc/meminfo` into structured data. They are designed to be easily
//! testable with string inputs.

/// Error type for parsing failures.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub message: String,
}

impl ParseError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
        }
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Parse error: {}", self.message)
    }
}

impl std::error::Error for ParseError {}

/// Cumulative CPU tick counters from the aggregate `cpu` line of `/proc/stat`.
///
/// Load percentage is a rate of change, so callers keep the previous
/// reading and compute deltas between two of these.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CpuTicks {
    /// Ticks the CPUs spent idle (idle + iowait).
    pub idle: u64,
    /// Total ticks across all accounting categories.
    pub total: u64,
}

/// Parses the aggregate `cpu` line of `/proc/stat`.
///
/// Format: `cpu user nice system idle iowait irq softirq steal ...`.
/// Per-CPU lines (`cpu0`, `cpu1`, ...) are ignored.
pub fn parse_cpu_ticks(content: &str) -> Result<CpuTicks, ParseError> {
    let line = content
        .lines()
        .find(|l| l.starts_with("cpu "))
        .ok_or_else(|| ParseError::new("missing aggregate cpu line in stat"))?;

    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.len() < 5 {
        return Err(ParseError::new(format!(
            "not enough fields in cpu line: expected 5+, got {}",
            parts.len()
        )));
    }

    let get_val = |idx: usize| -> u64 { parts.get(idx).and_then(|s| s.parse().ok()).unwrap_or(0) };

    let user = get_val(1);
    let nice = get_val(2);
    let system = get_val(3);
    let idle = get_val(4);
    let iowait = get_val(5);
    let irq = get_val(6);
    let softirq = get_val(7);
    let steal = get_val(8);

    Ok(CpuTicks {
        idle: idle + iowait,
        total: user + nice + system + idle + iowait + irq + softirq + steal,
    })
}

/// Memory figures from `/proc/meminfo`, in kilobytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemInfo {
    pub mem_total_kb: u64,
    pub mem_available_kb: u64,
}

impl MemInfo {
    /// Total memory in bytes.
    pub fn total_bytes(&self) -> u64 {
        self.mem_total_kb * 1024
    }

    /// System-wide used memory in bytes, computed as total minus available.
    pub fn used_bytes(&self) -> u64 {
        self.mem_total_kb.saturating_sub(self.mem_available_kb) * 1024
    }
}

/// Parses `/proc/meminfo` content.
///
/// Values are in kB format: `MemTotal:       16384000 kB`.
pub fn parse_meminfo(content: &str) -> Result<MemInfo, ParseError> {
    let mut info = MemInfo::default();

    let parse_kb = |line: &str| -> u64 {
        line.split_whitespace()
            .nth(1)
            .and_then(|s| s.parse().ok())
            .unwrap_or(0)
    };

    for line in content.lines() {
        if line.starts_with("MemTotal:") {
            info.mem_total_kb = parse_kb(line);
        } else if line.starts_with("MemAvailable:") {
            info.mem_available_kb = parse_kb(line);
        }
    }

    if info.mem_total_kb == 0 {
        return Err(ParseError::new("missing MemTotal in meminfo"));
    }

    Ok(info)
}
