use crossterm::event::{Event, MouseEventKind};
use ratatui::layout::Rect;
use ratatui::style::Style;

use crate::components::{Component, ComponentContext};
use crate::constants::{
    CHROME_HEIGHT, DEFAULT_EDGE_MARGIN, DEFAULT_WINDOW_HEIGHT, DEFAULT_WINDOW_WIDTH,
};
use crate::geometry::{Point, Size, WindowRect};
use crate::theme::{self, DEFAULT_COLOR, Theme};
use crate::ui::UiFrame;

use super::chrome::Chrome;
use super::drag::{DragController, SizePolicy};
use super::signals::{SignalQueue, WindowSignal};
use super::zone::{CursorGlyph, ResizeMode};
use super::{ParentContainer, PointerEvent, PointerWidget, WindowId};

pub type RestartFn = Box<dyn FnMut()>;

pub struct WindowOptions {
    pub background_color: String,
    pub title: String,
    pub chrome_color: String,
    pub size: Size,
    pub on_restart: Option<RestartFn>,
    pub allow_resize: bool,
    pub edge_margin: i32,
    pub size_policy: SizePolicy,
}

impl Default for WindowOptions {
    fn default() -> Self {
        Self {
            background_color: DEFAULT_COLOR.to_string(),
            title: "Window".to_string(),
            chrome_color: DEFAULT_COLOR.to_string(),
            size: Size::new(DEFAULT_WINDOW_WIDTH, DEFAULT_WINDOW_HEIGHT),
            on_restart: None,
            allow_resize: true,
            edge_margin: DEFAULT_EDGE_MARGIN,
            size_policy: SizePolicy::default(),
        }
    }
}

impl WindowOptions {
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_size(mut self, size: Size) -> Self {
        self.size = size;
        self
    }

    pub fn with_background(mut self, color: impl Into<String>) -> Self {
        self.background_color = color.into();
        self
    }

    pub fn with_chrome_color(mut self, color: impl Into<String>) -> Self {
        self.chrome_color = color.into();
        self
    }

    pub fn with_restart(mut self, on_restart: RestartFn) -> Self {
        self.on_restart = Some(on_restart);
        self
    }

    pub fn with_resize(mut self, allow_resize: bool) -> Self {
        self.allow_resize = allow_resize;
        self
    }

    pub fn with_edge_margin(mut self, margin: i32) -> Self {
        self.edge_margin = margin;
        self
    }

    pub fn with_size_policy(mut self, policy: SizePolicy) -> Self {
        self.size_policy = policy;
        self
    }
}

/// Which part of the window owns the current button press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PressTarget {
    Frame,
    Chrome,
    Content,
}

/// A floating window: border, chrome strip and a content component.
///
/// Geometry is in the parent's coordinate space. The window never removes
/// itself from anything directly; closing asks the parent to detach it.
pub struct ApplicationWindow {
    id: WindowId,
    rect: WindowRect,
    drag: DragController,
    focused: bool,
    is_editing: bool,
    chrome: Chrome,
    content: Box<dyn Component>,
    background_color: String,
    chrome_color: String,
    on_restart: Option<RestartFn>,
    signals: SignalQueue,
    press_target: Option<PressTarget>,
    closed: bool,
}

impl std::fmt::Debug for ApplicationWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApplicationWindow")
            .field("id", &self.id)
            .field("title", &self.chrome.title())
            .field("rect", &self.rect)
            .field("focused", &self.focused)
            .field("mode", &self.drag.mode())
            .finish_non_exhaustive()
    }
}

impl ApplicationWindow {
    pub fn create(
        id: WindowId,
        parent: &mut dyn ParentContainer,
        spawn: Point,
        content: Box<dyn Component>,
        options: WindowOptions,
    ) -> Self {
        let WindowOptions {
            background_color,
            title,
            chrome_color,
            size,
            on_restart,
            allow_resize,
            edge_margin,
            size_policy,
        } = options;
        let mut window = Self {
            id,
            rect: WindowRect::from_origin_size(spawn, size),
            drag: DragController::new(edge_margin, size_policy, allow_resize),
            focused: false,
            is_editing: false,
            chrome: Chrome::new(chrome_color.clone(), title),
            content,
            background_color,
            chrome_color,
            on_restart,
            signals: SignalQueue::default(),
            press_target: None,
            closed: false,
        };
        window.sync_layout();
        parent.install_event_filter(id);
        tracing::debug!(
            window = %id,
            title = window.title(),
            rect = ?window.rect,
            "window created"
        );
        window.focus_in(parent);
        window
    }

    pub fn id(&self) -> WindowId {
        self.id
    }

    pub fn rect(&self) -> WindowRect {
        self.rect
    }

    pub fn title(&self) -> &str {
        self.chrome.title()
    }

    pub fn focused(&self) -> bool {
        self.focused
    }

    pub fn is_editing(&self) -> bool {
        self.is_editing
    }

    pub fn set_editing(&mut self, editing: bool) {
        self.is_editing = editing;
    }

    pub fn mode(&self) -> Option<ResizeMode> {
        self.drag.mode()
    }

    pub fn cursor(&self) -> CursorGlyph {
        self.drag.cursor()
    }

    /// The pointer left the window: drop any hover-resolved resize mode.
    /// Returns whether a mode was cleared.
    pub fn leave(&mut self) -> bool {
        let had_mode = self.drag.mode().is_some();
        self.drag.reset_mode();
        had_mode
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn content_mut(&mut self) -> &mut dyn Component {
        self.content.as_mut()
    }

    pub fn take_signals(&mut self) -> Vec<WindowSignal> {
        self.signals.take()
    }

    pub fn contains(&self, point: Point) -> bool {
        self.rect.contains(point)
    }

    pub fn chrome_rect(&self) -> WindowRect {
        WindowRect::new(
            self.rect.x + 1,
            self.rect.y + 1,
            self.rect.width - 2,
            CHROME_HEIGHT,
        )
    }

    pub fn content_rect(&self) -> WindowRect {
        WindowRect::new(
            self.rect.x + 1,
            self.rect.y + 1 + CHROME_HEIGHT,
            self.rect.width - 2,
            self.rect.height - 2 - CHROME_HEIGHT,
        )
    }

    fn sync_layout(&mut self) {
        let chrome = self.chrome_rect();
        self.chrome.set_rect(chrome);
    }

    fn set_geometry(&mut self, rect: WindowRect, parent: &mut dyn ParentContainer) {
        if rect == self.rect {
            return;
        }
        self.rect = rect;
        self.sync_layout();
        parent.request_repaint();
        self.signals.emit(WindowSignal::GeometryChanged(rect));
    }

    /// Detach from the parent. Idempotent.
    pub fn close(&mut self, parent: &mut dyn ParentContainer) {
        if self.closed {
            return;
        }
        self.closed = true;
        self.press_target = None;
        self.drag.on_release();
        tracing::debug!(window = %self.id, title = self.title(), "window closed");
        parent.detach(self.id);
    }

    /// Close, then ask the owner to reopen through the restart callback.
    /// Returns whether a callback was run.
    pub fn restart(&mut self, parent: &mut dyn ParentContainer) -> bool {
        self.close(parent);
        match self.on_restart.as_mut() {
            Some(on_restart) => {
                tracing::debug!(window = %self.id, "window restarting");
                on_restart();
                true
            }
            None => false,
        }
    }

    pub fn focus_in(&mut self, parent: &mut dyn ParentContainer) {
        self.focused = true;
        self.chrome.set_active(true);
        parent.install_event_filter(self.id);
        parent.request_repaint();
        self.signals.emit(WindowSignal::FocusGained(true));
    }

    /// Focus loss is ignored while the content is being edited.
    pub fn focus_out(&mut self, _parent: &mut dyn ParentContainer) {
        if self.is_editing {
            return;
        }
        self.drag.reset_mode();
        self.signals.emit(WindowSignal::FocusLost(false));
        self.focused = false;
        self.chrome.set_active(false);
    }

    /// Deliver a non-pointer event (keys, paste) to the content.
    pub fn dispatch_to_content(&mut self, event: &Event) -> bool {
        let ctx = ComponentContext::new(self.focused);
        let handled = self.content.handle_event(event, &ctx);
        self.is_editing = self.content.is_editing();
        handled
    }

    /// Deliver a pointer event to the content in content-local coordinates.
    pub fn forward_pointer(&mut self, event: &PointerEvent, kind: MouseEventKind) -> bool {
        let origin = self.content_rect().origin();
        let Some(mouse) = event.to_mouse_event(kind, origin) else {
            return false;
        };
        self.dispatch_to_content(&Event::Mouse(mouse))
    }
}

impl PointerWidget for ApplicationWindow {
    fn on_press(&mut self, event: &PointerEvent, parent: &mut dyn ParentContainer) -> bool {
        let pos = event.position;
        if !event.buttons_held {
            if self.focused {
                self.drag.on_press(self.rect, pos, false);
            }
            return true;
        }

        if self.chrome.on_press(event, parent) {
            if self.chrome.take_close_request() {
                self.close(parent);
                return true;
            }
            self.drag.on_press(self.rect, pos, true);
            self.press_target = Some(PressTarget::Chrome);
            return true;
        }

        if self.drag.mode().is_none() && self.content_rect().contains(pos) {
            self.press_target = Some(PressTarget::Content);
            self.forward_pointer(event, MouseEventKind::Down(event.button));
            return true;
        }

        self.drag.on_press(self.rect, pos, true);
        self.press_target = Some(PressTarget::Frame);
        true
    }

    fn on_move(&mut self, event: &PointerEvent, parent: &mut dyn ParentContainer) -> bool {
        let pos = event.position;
        match self.press_target {
            Some(PressTarget::Chrome) if event.buttons_held => {
                if self.chrome.on_move(event, parent)
                    && let Some(rect) = self.drag.translate(self.rect, pos, parent.size().width)
                {
                    self.set_geometry(rect, parent);
                }
                true
            }
            Some(PressTarget::Content) if event.buttons_held => {
                self.forward_pointer(event, MouseEventKind::Drag(event.button))
            }
            _ => {
                if !self.focused {
                    return false;
                }
                if let Some(rect) = self.drag.on_move(self.rect, pos, event.buttons_held) {
                    self.set_geometry(rect, parent);
                }
                true
            }
        }
    }

    fn on_release(&mut self, event: &PointerEvent, parent: &mut dyn ParentContainer) -> bool {
        let target = self.press_target.take();
        self.drag.on_release();
        match target {
            Some(PressTarget::Content) => {
                self.forward_pointer(event, MouseEventKind::Up(event.button));
            }
            Some(PressTarget::Chrome) => {
                self.chrome.on_release(event, parent);
            }
            _ => {}
        }
        target.is_some()
    }

    fn on_paint(&mut self, frame: &mut UiFrame<'_>, area: Rect, theme: &Theme) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let bg = theme.resolve(&self.background_color, theme::BACKGROUND);
        let border = if self.focused && self.drag.mode().is_some() {
            theme.accent()
        } else {
            theme.resolve(&self.chrome_color, theme::BACKGROUND_3)
        };
        frame.fill(area, Style::default().bg(bg).fg(theme.foreground()));
        frame.stroke_border(area, Style::default().fg(border).bg(bg));

        if area.width <= 2 || area.height <= 2 {
            return;
        }
        let chrome_area = Rect {
            x: area.x + 1,
            y: area.y + 1,
            width: area.width - 2,
            height: CHROME_HEIGHT as u16,
        };
        self.chrome.on_paint(frame, chrome_area, theme);

        let content_top = CHROME_HEIGHT as u16 + 1;
        if area.height <= content_top + 1 {
            return;
        }
        let content_area = Rect {
            x: area.x + 1,
            y: area.y + content_top,
            width: area.width - 2,
            height: area.height - content_top - 1,
        };
        let ctx = ComponentContext::new(self.focused);
        self.content.render(frame, content_area, &ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::testing::Probe;
    use crate::window::testing::RecordingParent;
    use std::cell::Cell;
    use std::rc::Rc;

    fn window(parent: &mut RecordingParent) -> ApplicationWindow {
        let options = WindowOptions::default()
            .with_title("Test")
            .with_size(Size::new(400, 300));
        ApplicationWindow::create(
            WindowId(1),
            parent,
            Point::new(100, 100),
            Box::new(Probe::default()),
            options,
        )
    }

    fn held(x: i32, y: i32) -> PointerEvent {
        PointerEvent::new(Point::new(x, y), true)
    }

    fn hover(x: i32, y: i32) -> PointerEvent {
        PointerEvent::new(Point::new(x, y), false)
    }

    #[test]
    fn create_registers_focuses_and_signals() {
        let mut parent = RecordingParent::new(1000, 800);
        let mut w = window(&mut parent);
        assert_eq!(w.rect(), WindowRect::new(100, 100, 400, 300));
        assert!(w.focused());
        assert_eq!(parent.filters, vec![WindowId(1)]);
        assert!(parent.repaints >= 1);
        assert_eq!(w.take_signals(), vec![WindowSignal::FocusGained(true)]);
        assert_eq!(w.chrome_rect(), WindowRect::new(101, 101, 398, 1));
    }

    #[test]
    fn top_left_resize_scenario() {
        let mut parent = RecordingParent::new(1000, 800);
        let mut w = window(&mut parent);
        w.take_signals();
        w.on_move(&hover(102, 102), &mut parent);
        assert_eq!(w.mode(), Some(ResizeMode::TopLeft));
        w.on_press(&held(102, 102), &mut parent);
        w.on_move(&held(90, 90), &mut parent);
        let rect = w.rect();
        assert_eq!(rect.origin(), Point::new(88, 88));
        assert_eq!((rect.right(), rect.bottom()), (500, 400));
        assert_eq!(w.take_signals(), vec![WindowSignal::GeometryChanged(rect)]);
    }

    #[test]
    fn chrome_drag_translates_and_clamps() {
        let mut parent = RecordingParent::new(1000, 800);
        let mut w = ApplicationWindow::create(
            WindowId(1),
            &mut parent,
            Point::new(100, 100),
            Box::new(Probe::default()),
            WindowOptions::default()
                .with_size(Size::new(400, 300))
                .with_edge_margin(1),
        );
        w.on_move(&hover(250, 101), &mut parent);
        assert_eq!(w.mode(), None);
        w.on_press(&held(250, 101), &mut parent);
        w.on_move(&held(250, 101), &mut parent);
        assert_eq!(w.rect(), WindowRect::new(100, 100, 400, 300));
        w.on_move(&held(100, 300), &mut parent);
        assert_eq!(w.rect().origin(), Point::new(0, 299));
        w.on_move(&held(950, 300), &mut parent);
        assert_eq!(w.rect().x, 600);
        w.on_release(&held(950, 300), &mut parent);
    }

    #[test]
    fn close_glyph_detaches_window() {
        let mut parent = RecordingParent::new(1000, 800);
        let mut w = window(&mut parent);
        w.on_move(&hover(102, 101), &mut parent);
        w.on_press(&held(102, 101), &mut parent);
        assert!(w.is_closed());
        assert_eq!(parent.detached, vec![WindowId(1)]);
        w.close(&mut parent);
        assert_eq!(parent.detached.len(), 1);
    }

    #[test]
    fn restart_closes_then_runs_callback() {
        let mut parent = RecordingParent::new(1000, 800);
        let calls = Rc::new(Cell::new(0));
        let counter = calls.clone();
        let options = WindowOptions::default().with_restart(Box::new(move || {
            counter.set(counter.get() + 1);
        }));
        let mut w = ApplicationWindow::create(
            WindowId(4),
            &mut parent,
            Point::new(0, 0),
            Box::new(Probe::default()),
            options,
        );
        assert!(w.restart(&mut parent));
        assert_eq!(calls.get(), 1);
        assert_eq!(parent.detached, vec![WindowId(4)]);

        let mut plain = window(&mut parent);
        assert!(!plain.restart(&mut parent));
    }

    #[test]
    fn focus_loss_depends_on_editing_state() {
        let mut parent = RecordingParent::new(1000, 800);
        let mut w = window(&mut parent);
        w.on_move(&hover(102, 102), &mut parent);
        w.take_signals();

        w.set_editing(true);
        w.focus_out(&mut parent);
        assert!(w.focused());
        assert_eq!(w.mode(), Some(ResizeMode::TopLeft));
        assert!(w.take_signals().is_empty());

        w.set_editing(false);
        w.focus_out(&mut parent);
        assert!(!w.focused());
        assert_eq!(w.mode(), None);
        assert_eq!(w.take_signals(), vec![WindowSignal::FocusLost(false)]);
    }

    #[test]
    fn content_press_is_localized() {
        let mut parent = RecordingParent::new(1000, 800);
        let probe = Probe::default();
        let events = probe.events.clone();
        let mut w = ApplicationWindow::create(
            WindowId(2),
            &mut parent,
            Point::new(10, 5),
            Box::new(probe),
            WindowOptions::default().with_edge_margin(1),
        );
        w.on_move(&hover(15, 9), &mut parent);
        w.on_press(&held(15, 9), &mut parent);
        w.on_release(&held(15, 9), &mut parent);
        let events = events.borrow();
        assert_eq!(events.len(), 2);
        let Event::Mouse(down) = events[0] else {
            panic!("expected mouse event");
        };
        assert_eq!((down.column, down.row), (4, 2));
        assert_eq!(w.rect(), WindowRect::new(10, 5, 60, 16));
    }

    #[test]
    fn unfocused_window_ignores_hover() {
        let mut parent = RecordingParent::new(1000, 800);
        let mut w = window(&mut parent);
        w.focus_out(&mut parent);
        assert!(!w.on_move(&hover(102, 102), &mut parent));
        assert_eq!(w.mode(), None);
    }

    #[test]
    fn paint_fills_border_chrome_and_content() {
        use ratatui::buffer::Buffer;
        let mut parent = RecordingParent::new(100, 100);
        let mut w = ApplicationWindow::create(
            WindowId(3),
            &mut parent,
            Point::new(0, 0),
            Box::new(Probe::default()),
            WindowOptions::default().with_size(Size::new(12, 5)),
        );
        let area = Rect::new(0, 0, 12, 5);
        let mut buf = Buffer::empty(area);
        let mut frame = UiFrame::from_parts(area, &mut buf);
        w.on_paint(&mut frame, area, &Theme::default());
        let buffer = frame.buffer();
        assert_eq!(buffer.cell((0, 0)).unwrap().symbol(), "┌");
        assert_eq!(buffer.cell((2, 1)).unwrap().symbol(), "×");
        assert_eq!(buffer.cell((1, 2)).unwrap().symbol(), "p");
        assert_eq!(buffer.cell((11, 4)).unwrap().symbol(), "┘");
    }
}
