//! Live terminal dashboard: a stateful sink with a stats pane.
//!
//! The dashboard holds the last metrics snapshot and a bounded ring of
//! recent log events under one mutex, together with the render surface.
//! Both entry points — `update_stats` from the producer and `deliver`
//! from the consumer's dispatch path — mutate state and trigger a full
//! synchronous redraw while holding that lock, so a stats update and a
//! log append always serialize.

mod render;
mod style;

pub use render::{BAR_CELLS, bar_fill};

use std::collections::VecDeque;
use std::io::{self, Stdout};
use std::sync::Mutex;

use crossterm::cursor::{Hide, Show};
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::Terminal;
use ratatui::backend::{Backend, CrosstermBackend};
use tracing::error;

use crate::collector::MetricsSnapshot;
use crate::sink::{Severity, Sink};

/// Capacity of the scrolling log ring.
pub const MAX_LOG_LINES: usize = 20;

/// Renderable dashboard state: last metrics plus the log ring.
#[derive(Debug, Default)]
struct DashboardState {
    last: MetricsSnapshot,
    ring: VecDeque<(Severity, String)>,
}

impl DashboardState {
    fn push_log(&mut self, severity: Severity, message: String) {
        self.ring.push_back((severity, message));
        if self.ring.len() > MAX_LOG_LINES {
            self.ring.pop_front();
        }
    }
}

struct Inner<B: Backend> {
    terminal: Terminal<B>,
    state: DashboardState,
}

/// Split-pane terminal dashboard.
///
/// Generic over the ratatui backend so tests can render into a
/// `TestBackend`; production code uses [`StdDashboard`].
pub struct Dashboard<B: Backend> {
    inner: Mutex<Inner<B>>,
    restore_on_drop: bool,
}

/// The production dashboard, rendering to stdout.
pub type StdDashboard = Dashboard<CrosstermBackend<Stdout>>;

impl StdDashboard {
    /// Switches stdout to the alternate screen and hides the cursor.
    ///
    /// Raw mode is deliberately not enabled: the dashboard takes no
    /// keyboard input, and leaving the line discipline alone keeps
    /// Ctrl-C raising SIGINT for the shutdown handler.
    pub fn enter() -> io::Result<Self> {
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, Hide)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        Ok(Self {
            inner: Mutex::new(Inner {
                terminal,
                state: DashboardState::default(),
            }),
            restore_on_drop: true,
        })
    }
}

impl<B: Backend> Dashboard<B> {
    /// Builds a dashboard over an existing terminal, leaving the
    /// terminal mode untouched.
    pub fn with_terminal(terminal: Terminal<B>) -> Self {
        Self {
            inner: Mutex::new(Inner {
                terminal,
                state: DashboardState::default(),
            }),
            restore_on_drop: false,
        }
    }

    /// Replaces the stats pane contents and redraws. No metric history
    /// is retained beyond this single slot.
    pub fn update_stats(&self, snapshot: MetricsSnapshot) {
        let mut inner = self.inner.lock().unwrap();
        inner.state.last = snapshot;
        Self::redraw(&mut inner);
    }

    fn redraw(inner: &mut Inner<B>) {
        let Inner { terminal, state } = inner;
        if let Err(e) = terminal.draw(|frame| render::render(frame, state)) {
            error!("Dashboard redraw failed: {}", e);
        }
    }
}

impl<B: Backend + Send> Sink for Dashboard<B> {
    fn deliver(&self, severity: Severity, message: &str) {
        let mut inner = self.inner.lock().unwrap();
        inner.state.push_log(severity, message.to_string());
        Self::redraw(&mut inner);
    }
}

impl<B: Backend> Drop for Dashboard<B> {
    fn drop(&mut self) {
        if self.restore_on_drop {
            let _ = execute!(io::stdout(), Show, LeaveAlternateScreen);
        }
    }
}
