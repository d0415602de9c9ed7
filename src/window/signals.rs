use std::fmt;

use crate::geometry::WindowRect;

/// Notifications a window publishes. Nothing inside the window interprets
/// them; the desktop drains and forwards them to its observers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowSignal {
    FocusGained(bool),
    FocusLost(bool),
    GeometryChanged(WindowRect),
}

impl fmt::Display for WindowSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WindowSignal::FocusGained(v) => write!(f, "focus-gained({v})"),
            WindowSignal::FocusLost(v) => write!(f, "focus-lost({v})"),
            WindowSignal::GeometryChanged(r) => write!(
                f,
                "geometry-changed({}, {}, {}x{})",
                r.x, r.y, r.width, r.height
            ),
        }
    }
}

/// Per-window outbox of signals awaiting delivery.
#[derive(Debug, Default, Clone)]
pub struct SignalQueue {
    pending: Vec<WindowSignal>,
}

impl SignalQueue {
    pub fn emit(&mut self, signal: WindowSignal) {
        self.pending.push(signal);
    }

    pub fn take(&mut self) -> Vec<WindowSignal> {
        std::mem::take(&mut self.pending)
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
