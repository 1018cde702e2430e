//! Shared formatting helpers.

const GB: u64 = 1024 * 1024 * 1024;
const MB: u64 = 1024 * 1024;
const KB: u64 = 1024;

/// Converts a byte count to gibibytes.
pub fn gib(bytes: u64) -> f64 {
    bytes as f64 / GB as f64
}

/// Formats bytes as human-readable size string.
pub fn format_size(bytes: u64) -> String {
    if bytes >= GB {
        format!("{:.1}G", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1}M", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1}K", bytes as f64 / KB as f64)
    } else {
        format!("{}B", bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gib() {
        assert_eq!(gib(0), 0.0);
        assert_eq!(gib(GB), 1.0);
        assert!((gib(GB + GB / 2) - 1.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(512), "512B");
        assert_eq!(format_size(2048), "2.0K");
        assert_eq!(format_size(5 * MB), "5.0M");
        assert_eq!(format_size(3 * GB), "3.0G");
    }
}
