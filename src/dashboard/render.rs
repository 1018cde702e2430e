//! Dashboard rendering: split-pane stats and scrolling event log.
//!
//! Every call clears and fully repaints the viewport; there is no
//! incremental rendering, which keeps redraws idempotent.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::fmt::gib;

use super::DashboardState;
use super::style::{Theme, load_style, severity_style};

/// Width of the CPU load bar.
pub const BAR_CELLS: usize = 50;

/// Number of bar cells to fill for a given load percentage.
///
/// One cell per 2% of load, capped at [`BAR_CELLS`], with a visibility
/// floor: any load above 1% that would round down to an empty bar shows
/// one cell.
pub fn bar_fill(load: f64) -> usize {
    let mut cells = (load / 2.0).floor() as i64;
    if load > 1.0 && cells == 0 {
        cells = 1;
    }
    cells.clamp(0, BAR_CELLS as i64) as usize
}

fn frame_style() -> Style {
    Style::default().fg(Theme::FRAME)
}

pub(super) fn render(frame: &mut Frame, state: &DashboardState) {
    let chunks = Layout::vertical([
        Constraint::Length(1), // title bar
        Constraint::Length(5), // stats: header + CPU/RAM/Disk + separator
        Constraint::Min(1),    // event log
    ])
    .split(frame.area());

    let title = Line::from("=== SENTINEL ===")
        .centered()
        .style(frame_style().add_modifier(Modifier::BOLD));
    frame.render_widget(Paragraph::new(title), chunks[0]);

    let metrics = &state.last;
    let fill = bar_fill(metrics.cpu_load_percent);
    let cpu_line = Line::from(vec![
        Span::raw("CPU Load:  ["),
        Span::styled("|".repeat(fill), load_style(metrics.cpu_load_percent)),
        Span::raw(" ".repeat(BAR_CELLS - fill)),
        Span::raw(format!("] {:.2}%", metrics.cpu_load_percent)),
    ]);
    let ram_line = Line::from(format!(
        "RAM Usage: {:.2} GB / {:.2} GB",
        gib(metrics.memory_used_bytes),
        gib(metrics.memory_total_bytes),
    ));
    let disk_line = Line::from(format!("Disk Free: {:.2} GB", gib(metrics.disk_free_bytes)));

    let stats = Paragraph::new(vec![cpu_line, ram_line, disk_line]).block(
        Block::new()
            .title(Span::styled("SYSTEM METRICS", frame_style()))
            .borders(Borders::BOTTOM)
            .border_style(frame_style()),
    );
    frame.render_widget(stats, chunks[1]);

    // Newest first; lines beyond the viewport are clipped, not paginated.
    let log_lines: Vec<Line> = state
        .ring
        .iter()
        .rev()
        .map(|(severity, message)| {
            Line::from(Span::styled(
                format!("> {message}"),
                severity_style(*severity),
            ))
        })
        .collect();
    let logs = Paragraph::new(log_lines).block(
        Block::new()
            .title(Span::styled("EVENT LOGS", frame_style()))
            .borders(Borders::TOP)
            .border_style(frame_style()),
    );
    frame.render_widget(logs, chunks[2]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_fill_quantization() {
        assert_eq!(bar_fill(0.0), 0);
        // Visibility floor: above 1% never renders an empty bar
        assert_eq!(bar_fill(1.5), 1);
        // Below the floor threshold stays empty
        assert_eq!(bar_fill(0.5), 0);
        assert_eq!(bar_fill(62.0), 31);
        assert_eq!(bar_fill(100.0), 50);
        // Out-of-range inputs are clamped
        assert_eq!(bar_fill(250.0), 50);
        assert_eq!(bar_fill(-3.0), 0);
    }

    #[test]
    fn test_bar_fill_exact_cell_boundaries() {
        assert_eq!(bar_fill(2.0), 1);
        assert_eq!(bar_fill(3.9), 1);
        assert_eq!(bar_fill(4.0), 2);
    }
}
