pub mod application_window;
pub mod chrome;
pub mod drag;
pub mod signals;
pub mod zone;

use std::fmt;

use crossterm::event::{KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;

use crate::geometry::{Point, Size};
use crate::theme::Theme;
use crate::ui::UiFrame;

pub use application_window::{ApplicationWindow, RestartFn, WindowOptions};
pub use chrome::{Chrome, ChromeAction};
pub use drag::{DragController, SizePolicy};
pub use signals::{SignalQueue, WindowSignal};
pub use zone::{CursorGlyph, ResizeMode, Zone, resolve_zone};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WindowId(pub u64);

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A pointer event in the coordinate space of the widget's parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerEvent {
    pub position: Point,
    pub buttons_held: bool,
    pub button: MouseButton,
    pub modifiers: KeyModifiers,
}

impl PointerEvent {
    pub fn new(position: Point, buttons_held: bool) -> Self {
        Self {
            position,
            buttons_held,
            button: MouseButton::Left,
            modifiers: KeyModifiers::NONE,
        }
    }

    /// Rebuild a terminal mouse event relative to `origin`, for handing to a
    /// content component. Positions left of or above `origin` have no
    /// unsigned representation and yield `None`.
    pub fn to_mouse_event(&self, kind: MouseEventKind, origin: Point) -> Option<MouseEvent> {
        let local = self.position - origin;
        if local.x < 0 || local.y < 0 || local.x > u16::MAX as i32 || local.y > u16::MAX as i32 {
            return None;
        }
        Some(MouseEvent {
            kind,
            column: local.x as u16,
            row: local.y as u16,
            modifiers: self.modifiers,
        })
    }
}

/// What a window needs from the container it lives in.
pub trait ParentContainer {
    fn size(&self) -> Size;
    /// Register `window` to observe events routed through the container.
    fn install_event_filter(&mut self, window: WindowId);
    fn request_repaint(&mut self);
    /// Remove `window` from the container; the container drops it.
    fn detach(&mut self, window: WindowId);
}

/// Explicit event interface the desktop drives. Handlers return `true` when
/// they consumed the event.
pub trait PointerWidget {
    fn on_press(&mut self, event: &PointerEvent, parent: &mut dyn ParentContainer) -> bool;
    fn on_move(&mut self, event: &PointerEvent, parent: &mut dyn ParentContainer) -> bool;
    fn on_release(&mut self, event: &PointerEvent, parent: &mut dyn ParentContainer) -> bool;
    fn on_paint(&mut self, frame: &mut UiFrame<'_>, area: Rect, theme: &Theme);
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// Records everything a window asks of its parent.
    #[derive(Debug, Default)]
    pub struct RecordingParent {
        pub size: Size,
        pub filters: Vec<WindowId>,
        pub repaints: usize,
        pub detached: Vec<WindowId>,
    }

    impl RecordingParent {
        pub fn new(width: i32, height: i32) -> Self {
            Self {
                size: Size::new(width, height),
                ..Self::default()
            }
        }
    }

    impl ParentContainer for RecordingParent {
        fn size(&self) -> Size {
            self.size
        }

        fn install_event_filter(&mut self, window: WindowId) {
            if !self.filters.contains(&window) {
                self.filters.push(window);
            }
        }

        fn request_repaint(&mut self) {
            self.repaints += 1;
        }

        fn detach(&mut self, window: WindowId) {
            self.detached.push(window);
        }
    }
}
