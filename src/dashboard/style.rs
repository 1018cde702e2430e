//! Color scheme and styles for the dashboard.

use ratatui::style::{Color, Style};

use crate::sink::Severity;

/// Dashboard color palette.
pub struct Theme;

impl Theme {
    /// Frame chrome: title, section headers, separators.
    pub const FRAME: Color = Color::Cyan;

    // Load banding / severity colors
    pub const OK: Color = Color::Green;
    pub const WARN: Color = Color::Yellow;
    pub const CRIT: Color = Color::Red;
    pub const DEBUG: Color = Color::Cyan;
}

/// Style for a log line, by stored severity.
pub fn severity_style(severity: Severity) -> Style {
    let color = match severity {
        Severity::Warning => Theme::WARN,
        Severity::Error => Theme::CRIT,
        Severity::Debug => Theme::DEBUG,
        Severity::Info => Theme::OK,
    };
    Style::default().fg(color)
}

/// Style for the CPU bar: green up to 50%, yellow up to 80%, red above.
pub fn load_style(load: f64) -> Style {
    let color = if load > 80.0 {
        Theme::CRIT
    } else if load > 50.0 {
        Theme::WARN
    } else {
        Theme::OK
    };
    Style::default().fg(color)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_banding() {
        assert_eq!(load_style(0.0).fg, Some(Theme::OK));
        assert_eq!(load_style(50.0).fg, Some(Theme::OK));
        assert_eq!(load_style(62.0).fg, Some(Theme::WARN));
        assert_eq!(load_style(80.0).fg, Some(Theme::WARN));
        assert_eq!(load_style(80.1).fg, Some(Theme::CRIT));
    }

    #[test]
    fn test_severity_colors_distinct_for_alerts() {
        assert_ne!(
            severity_style(Severity::Warning).fg,
            severity_style(Severity::Info).fg
        );
        assert_ne!(
            severity_style(Severity::Error).fg,
            severity_style(Severity::Warning).fg
        );
    }
}
