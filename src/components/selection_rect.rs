use ratatui::layout::Rect;

use crate::geometry::{Point, WindowRect};
use crate::theme::Theme;
use crate::ui::UiFrame;
use crate::window::{ParentContainer, PointerEvent, PointerWidget};

/// Marquee drawn between the press point and the current pointer.
///
/// Releasing collapses both corners onto the release point, so a released
/// selection covers nothing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectionRectangle {
    start: Point,
    end: Point,
    active: bool,
}

impl SelectionRectangle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn end(&self) -> Point {
        self.end
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn press(&mut self, point: Point) {
        self.start = point;
        self.end = point;
        self.active = true;
    }

    pub fn drag_to(&mut self, point: Point) {
        self.end = point;
    }

    pub fn release(&mut self, point: Point) {
        self.start = point;
        self.end = point;
        self.active = false;
    }

    /// Normalized rectangle spanned by the two corners, inclusive of both.
    pub fn rect(&self) -> WindowRect {
        let r = WindowRect::from_corners(self.start, self.end);
        if r.is_empty() && !self.active {
            return r;
        }
        WindowRect::new(r.x, r.y, r.width + 1, r.height + 1)
    }
}

impl PointerWidget for SelectionRectangle {
    fn on_press(&mut self, event: &PointerEvent, parent: &mut dyn ParentContainer) -> bool {
        self.press(event.position);
        parent.request_repaint();
        true
    }

    fn on_move(&mut self, event: &PointerEvent, parent: &mut dyn ParentContainer) -> bool {
        if !self.active || !event.buttons_held {
            return false;
        }
        self.drag_to(event.position);
        parent.request_repaint();
        true
    }

    fn on_release(&mut self, event: &PointerEvent, parent: &mut dyn ParentContainer) -> bool {
        let was_active = self.active;
        self.release(event.position);
        parent.request_repaint();
        was_active
    }

    fn on_paint(&mut self, frame: &mut UiFrame<'_>, area: Rect, theme: &Theme) {
        if !self.active {
            return;
        }
        let rect = self.rect().translated(Point::new(area.x as i32, area.y as i32));
        if let Some(visible) = rect.visible_in(area) {
            frame.tint(visible, theme.accent());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window::testing::RecordingParent;
    use ratatui::buffer::Buffer;
    use ratatui::style::Style;

    #[test]
    fn marquee_follows_pointer_then_collapses() {
        let mut parent = RecordingParent::new(400, 300);
        let mut sel = SelectionRectangle::new();
        sel.on_press(&PointerEvent::new(Point::new(30, 30), true), &mut parent);
        assert_eq!(sel.start(), Point::new(30, 30));
        assert_eq!(sel.end(), Point::new(30, 30));

        sel.on_move(&PointerEvent::new(Point::new(200, 150), true), &mut parent);
        assert_eq!(sel.end(), Point::new(200, 150));
        assert_eq!(sel.rect(), WindowRect::new(30, 30, 171, 121));

        assert!(sel.on_release(&PointerEvent::new(Point::new(200, 150), false), &mut parent));
        assert_eq!(sel.start(), Point::new(200, 150));
        assert_eq!(sel.end(), Point::new(200, 150));
        assert!(sel.rect().is_empty());
        assert!(parent.repaints >= 3);
    }

    #[test]
    fn dragging_up_and_left_normalizes() {
        let mut sel = SelectionRectangle::new();
        sel.press(Point::new(10, 10));
        sel.drag_to(Point::new(4, 6));
        assert_eq!(sel.rect(), WindowRect::new(4, 6, 7, 5));
    }

    #[test]
    fn paint_tints_without_replacing_glyphs() {
        let area = Rect::new(0, 0, 10, 5);
        let mut buf = Buffer::empty(area);
        let mut frame = UiFrame::from_parts(area, &mut buf);
        frame.set_string(2, 1, "x", Style::default());
        let mut sel = SelectionRectangle::new();
        sel.press(Point::new(1, 1));
        sel.drag_to(Point::new(3, 2));
        let theme = Theme::default();
        sel.on_paint(&mut frame, area, &theme);
        let buffer = frame.buffer();
        assert_eq!(buffer.cell((2, 1)).unwrap().symbol(), "x");
        assert_eq!(buffer.cell((2, 1)).unwrap().bg, theme.accent());
        assert_ne!(buffer.cell((5, 1)).unwrap().bg, theme.accent());
    }
}
