//! Theme-change toast
//!
//! A short-lived notification naming the applied theme. It is visible
//! immediately, starts fading after [`DWELL`], and is gone after a further
//! [`DWELL`]. A new trigger restarts the cycle.

use crate::page::{ToastPhase, UiPort};
use crate::theme::glyph_for;
use std::time::{Duration, Instant};

/// Time spent in each phase of the toast cycle
pub const DWELL: Duration = Duration::from_millis(900);

/// Toast text for a theme name: glyph, space, name
pub fn toast_text(name: &str) -> String {
    format!("{} {}", glyph_for(name), name)
}

/// Toast timing state
#[derive(Debug, Clone, Default)]
pub struct Toast {
    /// When the current cycle started, `None` when hidden
    started_at: Option<Instant>,
    phase: Option<ToastPhase>,
}

impl Toast {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show the toast for `name`, restarting any running cycle
    pub fn notify<P: UiPort + ?Sized>(&mut self, port: &mut P, name: &str, now: Instant) {
        self.started_at = Some(now);
        self.phase = Some(ToastPhase::Visible);
        port.show_toast(&toast_text(name), ToastPhase::Visible);
    }

    /// Advance the cycle to `now`
    pub fn tick<P: UiPort + ?Sized>(&mut self, port: &mut P, now: Instant) {
        let Some(started_at) = self.started_at else {
            return;
        };
        let elapsed = now.saturating_duration_since(started_at);

        if elapsed >= DWELL * 2 {
            self.started_at = None;
            self.phase = None;
            port.hide_toast();
        } else if elapsed >= DWELL && self.phase == Some(ToastPhase::Visible) {
            self.phase = Some(ToastPhase::Fading);
            port.set_toast_phase(ToastPhase::Fading);
        }
    }
}
