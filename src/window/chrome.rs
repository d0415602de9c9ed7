use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};

use crate::geometry::{Point, WindowRect};
use crate::theme::{self, Theme};
use crate::ui::{UiFrame, truncate_to_width};

use super::{ParentContainer, PointerEvent, PointerWidget};

pub const CLOSE_GLYPH: &str = "×";

/// Cells occupied by the close control, including one cell of padding on
/// either side of the glyph.
const CLOSE_WIDTH: i32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChromeAction {
    Close,
    Drag,
    None,
}

/// Title strip across the top of a window: close glyph, spacer, title.
///
/// The chrome keeps no drag state of its own. Held moves are reported back to
/// the owning window, which runs them through its drag controller.
#[derive(Debug, Clone)]
pub struct Chrome {
    background: String,
    title: String,
    close_requested: bool,
    active: bool,
    rect: WindowRect,
}

impl Chrome {
    pub fn new(background: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            background: background.into(),
            title: title.into(),
            close_requested: false,
            active: false,
            rect: WindowRect::default(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn background(&self) -> &str {
        &self.background
    }

    pub fn rect(&self) -> WindowRect {
        self.rect
    }

    pub fn set_rect(&mut self, rect: WindowRect) {
        self.rect = rect;
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    pub fn contains(&self, point: Point) -> bool {
        self.rect.contains(point)
    }

    fn close_rect(&self) -> WindowRect {
        WindowRect::new(
            self.rect.x,
            self.rect.y,
            CLOSE_WIDTH.min(self.rect.width),
            self.rect.height,
        )
    }

    pub fn hit_test(&self, point: Point) -> ChromeAction {
        if !self.contains(point) {
            ChromeAction::None
        } else if self.close_rect().contains(point) {
            ChromeAction::Close
        } else {
            ChromeAction::Drag
        }
    }

    /// Consume a pending close request.
    pub fn take_close_request(&mut self) -> bool {
        std::mem::take(&mut self.close_requested)
    }
}

impl PointerWidget for Chrome {
    fn on_press(&mut self, event: &PointerEvent, _parent: &mut dyn ParentContainer) -> bool {
        match self.hit_test(event.position) {
            ChromeAction::Close => {
                self.close_requested = event.buttons_held;
                true
            }
            ChromeAction::Drag => true,
            ChromeAction::None => false,
        }
    }

    /// Held moves are forwarded to the window's drag controller; the pointer
    /// may already have left the strip, so no hit test here.
    fn on_move(&mut self, event: &PointerEvent, _parent: &mut dyn ParentContainer) -> bool {
        event.buttons_held
    }

    fn on_release(&mut self, event: &PointerEvent, _parent: &mut dyn ParentContainer) -> bool {
        self.contains(event.position)
    }

    fn on_paint(&mut self, frame: &mut UiFrame<'_>, area: Rect, theme: &Theme) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let bg = theme.resolve(&self.background, theme::BACKGROUND_3);
        let mut style = Style::default().bg(bg).fg(theme.foreground());
        if self.active {
            style = style.add_modifier(Modifier::BOLD);
        }
        frame.fill(area, style);
        if area.width > 1 {
            frame.set_string(area.x + 1, area.y, CLOSE_GLYPH, style);
        }

        let title_width = self.title.chars().count() as u16;
        let available = area.width.saturating_sub(CLOSE_WIDTH as u16 + 1);
        if available == 0 {
            return;
        }
        let shown = title_width.min(available);
        let x = area.x + area.width - 1 - shown;
        let title = truncate_to_width(&self.title, shown as usize);
        frame.set_string(x, area.y, &title, style);
    }
}
