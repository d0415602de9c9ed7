//! The desktop: parent container for every floating window.
//!
//! Owns the windows in z-order (last is topmost), converts terminal mouse
//! events into desktop-local points and routes them to the right target,
//! arbitrates focus, and composites the background, icons, windows, marquee
//! and dock into a frame. Windows talk back through `Surface`, the desktop's
//! `ParentContainer` implementation; detach requests and signals are drained
//! after every dispatch.

pub mod dock;
pub mod items;

use std::collections::BTreeSet;
use std::sync::mpsc::Sender;

use crossterm::event::{Event, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;

use crate::apps::{AppEnv, AppKind};
use crate::components::{Component, SelectionRectangle};
use crate::constants::{MAX_PAINT_EXTENT, SHELL_EDGE_MARGIN, SPAWN_CASCADE_STEP};
use crate::error::Result;
use crate::geometry::{Point, Size, WindowRect};
use crate::theme::Theme;
use crate::ui::{UiFrame, truncate_to_width};
use crate::window::{
    ApplicationWindow, ParentContainer, PointerEvent, PointerWidget, SizePolicy, WindowId,
    WindowOptions, WindowSignal,
};

use dock::{Dock, DockAction, DockHit, DockWindow};
use items::list_items;

/// Work the desktop cannot do itself and hands to the shell loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellRequest {
    Open(AppKind),
    Launch(String),
}

pub type SignalObserver = Box<dyn FnMut(WindowId, &WindowSignal)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DesktopOptions {
    pub edge_margin: i32,
    pub size_policy: SizePolicy,
}

impl Default for DesktopOptions {
    fn default() -> Self {
        Self {
            edge_margin: SHELL_EDGE_MARGIN,
            size_policy: SizePolicy::default(),
        }
    }
}

/// What the desktop exposes to its windows.
#[derive(Debug, Default)]
pub struct Surface {
    size: Size,
    dirty: bool,
    filters: BTreeSet<WindowId>,
    detached: Vec<WindowId>,
}

impl Surface {
    pub fn new(size: Size) -> Self {
        Self {
            size,
            dirty: true,
            ..Self::default()
        }
    }

    pub fn is_filtering(&self, window: WindowId) -> bool {
        self.filters.contains(&window)
    }
}

impl ParentContainer for Surface {
    fn size(&self) -> Size {
        self.size
    }

    fn install_event_filter(&mut self, window: WindowId) {
        self.filters.insert(window);
    }

    fn request_repaint(&mut self) {
        self.dirty = true;
    }

    fn detach(&mut self, window: WindowId) {
        if !self.detached.contains(&window) {
            self.detached.push(window);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Grab {
    Window(WindowId),
    Marquee,
}

/// A desktop item drawn on the background.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesktopIcon {
    pub key: String,
    pub label: String,
    pub rect: WindowRect,
    pub selected: bool,
}

const ICON_LABEL_WIDTH: usize = 14;

pub struct Desktop {
    surface: Surface,
    area: Rect,
    windows: Vec<ApplicationWindow>,
    next_id: u64,
    spawned: i32,
    focus: Option<WindowId>,
    grab: Option<Grab>,
    pointer: Option<Point>,
    selection: SelectionRectangle,
    icons: Vec<DesktopIcon>,
    observers: Vec<SignalObserver>,
    theme: Theme,
    options: DesktopOptions,
    env: AppEnv,
    dock: Dock,
    requests: Sender<ShellRequest>,
}

fn find_window(
    windows: &mut [ApplicationWindow],
    id: WindowId,
) -> Option<&mut ApplicationWindow> {
    windows.iter_mut().find(|w| w.id() == id)
}

impl Desktop {
    pub fn new(
        theme: Theme,
        options: DesktopOptions,
        env: AppEnv,
        dock: Dock,
        requests: Sender<ShellRequest>,
    ) -> Self {
        Self {
            surface: Surface::new(Size::default()),
            area: Rect::default(),
            windows: Vec::new(),
            next_id: 1,
            spawned: 0,
            focus: None,
            grab: None,
            pointer: None,
            selection: SelectionRectangle::new(),
            icons: Vec::new(),
            observers: Vec::new(),
            theme,
            options,
            env,
            dock,
            requests,
        }
    }

    /// Lay out the desktop for a terminal of `area`, reserving the dock row.
    pub fn resize(&mut self, area: Rect) {
        let managed = self.dock.split_area(area);
        if managed != self.area {
            self.area = managed;
            self.surface.size = Size::new(managed.width as i32, managed.height as i32);
            self.surface.request_repaint();
        }
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn needs_repaint(&self) -> bool {
        self.surface.dirty
    }

    pub fn windows(&self) -> &[ApplicationWindow] {
        &self.windows
    }

    pub fn window(&self, id: WindowId) -> Option<&ApplicationWindow> {
        self.windows.iter().find(|w| w.id() == id)
    }

    pub fn window_mut(&mut self, id: WindowId) -> Option<&mut ApplicationWindow> {
        find_window(&mut self.windows, id)
    }

    pub fn focused(&self) -> Option<WindowId> {
        self.focus
    }

    pub fn icons(&self) -> &[DesktopIcon] {
        &self.icons
    }

    pub fn selection(&self) -> &SelectionRectangle {
        &self.selection
    }

    pub fn subscribe(&mut self, observer: SignalObserver) {
        self.observers.push(observer);
    }

    /// Re-read the desktop directory into background icons.
    pub fn load_icons(&mut self) -> Result<()> {
        let items = list_items(&self.env.desktop_dir)?;
        self.icons = items
            .into_iter()
            .enumerate()
            .map(|(i, (key, item))| {
                let label = truncate_to_width(&item.display_name, ICON_LABEL_WIDTH);
                let width = label.chars().count().max(1) as i32;
                DesktopIcon {
                    key,
                    rect: WindowRect::new(1, 1 + 2 * i as i32, width, 1),
                    label,
                    selected: false,
                }
            })
            .collect();
        self.surface.request_repaint();
        Ok(())
    }

    fn next_spawn(&mut self) -> Point {
        let step = self.spawned % 8;
        self.spawned += 1;
        Point::new(
            ICON_LABEL_WIDTH as i32 + 4 + step * SPAWN_CASCADE_STEP * 2,
            1 + step * SPAWN_CASCADE_STEP,
        )
    }

    /// Create a window, blur whatever was focused and focus the new one.
    pub fn open_window(
        &mut self,
        spawn: Point,
        content: Box<dyn Component>,
        options: WindowOptions,
    ) -> WindowId {
        let id = WindowId(self.next_id);
        self.next_id += 1;
        if let Some(prev) = self.focus
            && let Some(window) = find_window(&mut self.windows, prev)
        {
            window.focus_out(&mut self.surface);
        }
        let window = ApplicationWindow::create(id, &mut self.surface, spawn, content, options);
        tracing::info!(window = %id, title = window.title(), "window opened");
        self.windows.push(window);
        self.focus = Some(id);
        self.deliver_signals();
        id
    }

    /// Open a built-in application. Restarting its window asks the shell to
    /// open a fresh instance.
    pub fn open_app(&mut self, kind: AppKind) -> WindowId {
        let content = kind.build(&self.env);
        let requests = self.requests.clone();
        let options = WindowOptions::default()
            .with_title(kind.title())
            .with_size(kind.initial_size())
            .with_edge_margin(self.options.edge_margin)
            .with_size_policy(self.options.size_policy)
            .with_restart(Box::new(move || {
                if let Err(err) = requests.send(ShellRequest::Open(kind)) {
                    tracing::warn!(app = %kind, error = %err, "restart request dropped");
                }
            }));
        let spawn = self.next_spawn();
        self.open_window(spawn, content, options)
    }

    fn topmost_at(&self, point: Point) -> Option<usize> {
        self.windows.iter().rposition(|w| w.contains(point))
    }

    fn raise(&mut self, index: usize) -> WindowId {
        let window = self.windows.remove(index);
        let id = window.id();
        self.windows.push(window);
        self.surface.request_repaint();
        id
    }

    /// Focus `id`, blurring the previous focus holder.
    pub fn focus_window(&mut self, id: WindowId) {
        if self.focus == Some(id) && self.window(id).is_some_and(|w| w.focused()) {
            return;
        }
        if let Some(prev) = self.focus.filter(|prev| *prev != id)
            && let Some(window) = find_window(&mut self.windows, prev)
        {
            window.focus_out(&mut self.surface);
        }
        if let Some(window) = find_window(&mut self.windows, id) {
            window.focus_in(&mut self.surface);
            self.focus = Some(id);
            tracing::debug!(window = %id, "focus changed");
        }
    }

    /// Every window observing the desktop loses focus (background click).
    fn blur_all(&mut self) {
        for window in &mut self.windows {
            if self.surface.is_filtering(window.id()) && window.focused() {
                window.focus_out(&mut self.surface);
            }
        }
        self.focus = None;
    }

    pub fn handle_event(&mut self, event: &Event) -> bool {
        match event {
            Event::Mouse(mouse) => self.handle_mouse(*mouse),
            Event::Key(key) => self.handle_key(*key),
            Event::Resize(width, height) => {
                self.resize(Rect::new(0, 0, *width, *height));
                true
            }
            Event::Paste(_) => self.forward_to_focused(event),
            _ => false,
        }
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent) -> bool {
        let handled = self.route_mouse(mouse);
        self.process_detached();
        self.deliver_signals();
        handled
    }

    fn route_mouse(&mut self, mouse: MouseEvent) -> bool {
        if self.grab.is_none() && self.dock.contains(mouse.column, mouse.row) {
            if matches!(mouse.kind, MouseEventKind::Down(MouseButton::Left)) {
                self.activate_dock(mouse.column, mouse.row);
            }
            return true;
        }

        let point = Point::new(
            mouse.column as i32 - self.area.x as i32,
            mouse.row as i32 - self.area.y as i32,
        );
        self.pointer = Some(point);
        let held = PointerEvent {
            position: point,
            buttons_held: true,
            button: MouseButton::Left,
            modifiers: mouse.modifiers,
        };

        match mouse.kind {
            MouseEventKind::Down(button) => {
                let press = PointerEvent { button, ..held };
                if let Some(index) = self.topmost_at(point) {
                    let id = self.raise(index);
                    self.focus_window(id);
                    if let Some(window) = find_window(&mut self.windows, id) {
                        let hover = PointerEvent {
                            buttons_held: false,
                            ..press
                        };
                        window.on_press(&hover, &mut self.surface);
                        window.on_press(&press, &mut self.surface);
                    }
                    self.grab = Some(Grab::Window(id));
                } else {
                    self.blur_all();
                    for icon in &mut self.icons {
                        icon.selected = false;
                    }
                    self.selection.on_press(&press, &mut self.surface);
                    self.grab = Some(Grab::Marquee);
                }
                true
            }
            MouseEventKind::Drag(button) => {
                let drag = PointerEvent { button, ..held };
                match self.grab {
                    Some(Grab::Window(id)) => match find_window(&mut self.windows, id) {
                        Some(window) => window.on_move(&drag, &mut self.surface),
                        None => false,
                    },
                    Some(Grab::Marquee) => {
                        self.selection.on_move(&drag, &mut self.surface);
                        let marquee = self.selection.rect();
                        for icon in &mut self.icons {
                            icon.selected = icon.rect.intersects(&marquee);
                        }
                        true
                    }
                    None => false,
                }
            }
            MouseEventKind::Up(button) => {
                let release = PointerEvent {
                    button,
                    buttons_held: false,
                    ..held
                };
                match self.grab.take() {
                    Some(Grab::Window(id)) => match find_window(&mut self.windows, id) {
                        Some(window) => window.on_release(&release, &mut self.surface),
                        None => false,
                    },
                    Some(Grab::Marquee) => self.selection.on_release(&release, &mut self.surface),
                    None => false,
                }
            }
            MouseEventKind::Moved => {
                let hover = PointerEvent {
                    buttons_held: false,
                    ..held
                };
                let target = self.topmost_at(point);
                let hovered = target.map(|index| self.windows[index].id());
                if let Some(id) = self.focus
                    && hovered != Some(id)
                    && let Some(window) = find_window(&mut self.windows, id)
                    && window.leave()
                {
                    self.surface.request_repaint();
                }
                let Some(index) = target else {
                    return false;
                };
                let window = &mut self.windows[index];
                let before = window.mode();
                let handled = window.on_move(&hover, &mut self.surface);
                if window.mode() != before {
                    self.surface.request_repaint();
                }
                handled
            }
            kind => {
                let Some(index) = self.topmost_at(point) else {
                    return false;
                };
                let window = &mut self.windows[index];
                let handled = window.forward_pointer(&held, kind);
                if handled {
                    self.surface.request_repaint();
                }
                handled
            }
        }
    }

    fn activate_dock(&mut self, column: u16, row: u16) {
        let request = match self.dock.hit_test(column, row) {
            Some(DockHit::Entry(DockAction::Open(kind))) => ShellRequest::Open(kind),
            Some(DockHit::Entry(DockAction::Launch(command))) => ShellRequest::Launch(command),
            Some(DockHit::Window(id)) => {
                if let Some(index) = self.windows.iter().position(|w| w.id() == id) {
                    self.raise(index);
                    self.focus_window(id);
                }
                return;
            }
            None => return,
        };
        if let Err(err) = self.requests.send(request) {
            tracing::warn!(error = %err, "dock request dropped");
        }
    }

    /// Keys go to the focused window's content.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        self.forward_to_focused(&Event::Key(key))
    }

    fn forward_to_focused(&mut self, event: &Event) -> bool {
        let Some(id) = self.focus else {
            return false;
        };
        let handled = match find_window(&mut self.windows, id) {
            Some(window) => window.dispatch_to_content(event),
            None => false,
        };
        if handled {
            self.surface.request_repaint();
        }
        handled
    }

    pub fn close_focused(&mut self) -> bool {
        let Some(id) = self.focus else {
            return false;
        };
        if let Some(window) = find_window(&mut self.windows, id) {
            window.close(&mut self.surface);
        }
        self.process_detached();
        self.deliver_signals();
        true
    }

    pub fn restart_focused(&mut self) -> bool {
        let Some(id) = self.focus else {
            return false;
        };
        let restarted = match find_window(&mut self.windows, id) {
            Some(window) => window.restart(&mut self.surface),
            None => false,
        };
        self.process_detached();
        self.deliver_signals();
        restarted
    }

    /// Raise and focus the bottom-most window.
    pub fn cycle_focus(&mut self) -> Option<WindowId> {
        if self.windows.is_empty() {
            return None;
        }
        let id = self.raise(0);
        self.focus_window(id);
        self.deliver_signals();
        Some(id)
    }

    fn process_detached(&mut self) {
        let detached = std::mem::take(&mut self.surface.detached);
        if detached.is_empty() {
            return;
        }
        for id in &detached {
            self.surface.filters.remove(id);
            if let Some(index) = self.windows.iter().position(|w| w.id() == *id) {
                let mut window = self.windows.remove(index);
                self.forward_signals(*id, window.take_signals());
                tracing::debug!(window = %id, "window detached");
            }
            if self.grab == Some(Grab::Window(*id)) {
                self.grab = None;
            }
        }
        self.surface.request_repaint();
        if self.focus.is_some_and(|id| detached.contains(&id)) {
            self.focus = None;
            if let Some(top) = self.windows.last().map(ApplicationWindow::id) {
                self.focus_window(top);
            }
        }
    }

    fn deliver_signals(&mut self) {
        for index in 0..self.windows.len() {
            let id = self.windows[index].id();
            let signals = self.windows[index].take_signals();
            self.forward_signals(id, signals);
        }
    }

    fn forward_signals(&mut self, id: WindowId, signals: Vec<WindowSignal>) {
        for signal in signals {
            tracing::trace!(window = %id, %signal, "window signal");
            for observer in &mut self.observers {
                observer(id, &signal);
            }
        }
    }

    pub fn render(&mut self, frame: &mut UiFrame<'_>) {
        self.resize(frame.area());
        let area = self.area;
        let theme = &self.theme;
        let origin = Point::new(area.x as i32, area.y as i32);

        frame.fill(area, Style::default().bg(theme.desktop()));
        for icon in &self.icons {
            let rect = icon.rect.translated(origin);
            let mut style = Style::default().fg(theme.foreground()).bg(theme.desktop());
            if icon.selected {
                style = style.bg(theme.accent());
            }
            if rect.x >= 0 && rect.y >= 0 {
                frame.set_string(rect.x as u16, rect.y as u16, &icon.label, style);
            }
        }

        for window in &mut self.windows {
            let rect = window.rect().translated(origin);
            paint_window(frame, window, rect, area, theme);
        }

        self.selection.on_paint(frame, area, theme);

        if let Some(pointer) = self.pointer
            && let Some(id) = self.focus
            && let Some(window) = self.windows.iter().find(|w| w.id() == id)
            && window.mode().is_some()
        {
            let at = pointer + origin;
            if WindowRect::from(area).contains(at) {
                frame.set_string(
                    at.x as u16,
                    at.y as u16,
                    window.cursor().symbol(),
                    Style::default().fg(theme.accent()),
                );
            }
        }

        let listing: Vec<DockWindow> = self
            .windows
            .iter()
            .map(|w| DockWindow {
                id: w.id(),
                title: w.title().to_string(),
                focused: self.focus == Some(w.id()),
            })
            .collect();
        self.dock.render(frame, theme, &listing);
        self.surface.dirty = false;
    }
}

/// Paint in place when the window lies fully inside `bounds`; otherwise paint
/// into an offscreen buffer of the window's size and blit the visible part.
fn paint_window(
    frame: &mut UiFrame<'_>,
    window: &mut ApplicationWindow,
    rect: WindowRect,
    bounds: Rect,
    theme: &Theme,
) {
    if rect.visible_in(bounds).is_none() {
        return;
    }
    let inside = rect.x >= bounds.x as i32
        && rect.y >= bounds.y as i32
        && rect.right() <= bounds.right() as i32
        && rect.bottom() <= bounds.bottom() as i32;
    if inside {
        let target = Rect::new(
            rect.x as u16,
            rect.y as u16,
            rect.width as u16,
            rect.height as u16,
        );
        window.on_paint(frame, target, theme);
        return;
    }
    let width = rect.width.min(MAX_PAINT_EXTENT) as u16;
    let height = rect.height.min(MAX_PAINT_EXTENT) as u16;
    let local = Rect::new(0, 0, width, height);
    let mut buffer = Buffer::empty(local);
    {
        let mut offscreen = UiFrame::from_parts(local, &mut buffer);
        window.on_paint(&mut offscreen, local, theme);
    }
    frame.blit_from_signed(&buffer, rect);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::testing::Probe;
    use crate::window::ResizeMode;
    use crossterm::event::{KeyCode, KeyModifiers};
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::sync::mpsc::{Receiver, channel};

    fn desktop() -> (Desktop, Receiver<ShellRequest>) {
        let (tx, rx) = channel();
        let mut desktop = Desktop::new(
            Theme::default(),
            DesktopOptions::default(),
            AppEnv::new("assets", "Home/Desktop"),
            Dock::with_builtin_apps(Vec::new()),
            tx,
        );
        desktop.resize(Rect::new(0, 0, 120, 40));
        (desktop, rx)
    }

    fn open(desktop: &mut Desktop, x: i32, y: i32) -> WindowId {
        desktop.open_window(
            Point::new(x, y),
            Box::new(Probe::default()),
            WindowOptions::default()
                .with_size(Size::new(20, 10))
                .with_edge_margin(1),
        )
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn opening_a_window_moves_focus() {
        let (mut d, _rx) = desktop();
        let a = open(&mut d, 0, 0);
        let b = open(&mut d, 30, 0);
        assert_eq!(d.focused(), Some(b));
        assert!(!d.window(a).unwrap().focused());
        assert!(d.window(b).unwrap().focused());
    }

    #[test]
    fn press_raises_and_focuses_topmost() {
        let (mut d, _rx) = desktop();
        let a = open(&mut d, 0, 0);
        let b = open(&mut d, 5, 5);
        d.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 2, 2));
        assert_eq!(d.windows().last().unwrap().id(), a);
        assert_eq!(d.focused(), Some(a));
        assert!(!d.window(b).unwrap().focused());
        d.handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), 2, 2));
    }

    #[test]
    fn leaving_focused_window_drops_resize_cursor() {
        let (mut d, _rx) = desktop();
        let id = open(&mut d, 10, 5);
        d.handle_mouse(mouse(MouseEventKind::Moved, 29, 8));
        assert_eq!(d.window(id).unwrap().mode(), Some(ResizeMode::Right));
        let glyph = d.window(id).unwrap().cursor().symbol();

        let area = Rect::new(0, 0, 120, 40);
        let mut buffer = Buffer::empty(area);
        d.render(&mut UiFrame::from_parts(area, &mut buffer));
        assert_eq!(buffer.cell((29, 8)).unwrap().symbol(), glyph);

        d.handle_mouse(mouse(MouseEventKind::Moved, 60, 20));
        assert_eq!(d.window(id).unwrap().mode(), None);
        assert!(d.needs_repaint());
        let mut buffer = Buffer::empty(area);
        d.render(&mut UiFrame::from_parts(area, &mut buffer));
        assert_ne!(buffer.cell((60, 20)).unwrap().symbol(), glyph);
    }

    #[test]
    fn chrome_drag_moves_grabbed_window() {
        let (mut d, _rx) = desktop();
        let id = open(&mut d, 10, 5);
        d.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 20, 6));
        d.handle_mouse(mouse(MouseEventKind::Drag(MouseButton::Left), 30, 9));
        d.handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), 30, 9));
        assert_eq!(d.window(id).unwrap().rect(), WindowRect::new(20, 8, 20, 10));
    }

    #[test]
    fn background_press_blurs_and_starts_marquee() {
        let (mut d, _rx) = desktop();
        let id = open(&mut d, 50, 5);
        d.icons = vec![DesktopIcon {
            key: "a.txt.os".into(),
            label: "a.txt".into(),
            rect: WindowRect::new(1, 1, 5, 1),
            selected: false,
        }];
        d.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 0, 0));
        assert_eq!(d.focused(), None);
        assert!(!d.window(id).unwrap().focused());
        assert!(d.selection().is_active());
        d.handle_mouse(mouse(MouseEventKind::Drag(MouseButton::Left), 3, 3));
        assert!(d.icons()[0].selected);
        d.handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), 3, 3));
        assert!(!d.selection().is_active());
        assert!(d.icons()[0].selected);
    }

    #[test]
    fn close_focused_detaches_and_refocuses() {
        let (mut d, _rx) = desktop();
        let a = open(&mut d, 0, 0);
        let b = open(&mut d, 30, 0);
        assert!(d.close_focused());
        assert!(d.window(b).is_none());
        assert_eq!(d.focused(), Some(a));
        assert!(d.window(a).unwrap().focused());
    }

    #[test]
    fn restart_requests_a_fresh_instance() {
        let (mut d, rx) = desktop();
        d.open_app(AppKind::Calculator);
        assert!(d.restart_focused());
        assert!(d.windows().is_empty());
        assert_eq!(rx.try_recv(), Ok(ShellRequest::Open(AppKind::Calculator)));
    }

    #[test]
    fn cycle_raises_bottom_window() {
        let (mut d, _rx) = desktop();
        let a = open(&mut d, 0, 0);
        let b = open(&mut d, 30, 0);
        assert_eq!(d.cycle_focus(), Some(a));
        assert_eq!(d.cycle_focus(), Some(b));
    }

    #[test]
    fn keys_reach_focused_content() {
        let (mut d, _rx) = desktop();
        let probe = Probe::default();
        let events = probe.events.clone();
        d.open_window(Point::new(0, 0), Box::new(probe), WindowOptions::default());
        assert!(d.handle_key(KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE)));
        assert_eq!(events.borrow().len(), 1);
    }

    #[test]
    fn observers_receive_signals_in_order() {
        let (mut d, _rx) = desktop();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        d.subscribe(Box::new(move |id, signal| {
            sink.borrow_mut().push((id, *signal));
        }));
        let a = open(&mut d, 0, 0);
        let b = open(&mut d, 30, 0);
        let seen = seen.borrow();
        assert_eq!(
            seen.as_slice(),
            &[
                (a, WindowSignal::FocusGained(true)),
                (a, WindowSignal::FocusLost(false)),
                (b, WindowSignal::FocusGained(true)),
            ]
        );
    }

    #[test]
    fn dock_click_sends_request() {
        let (mut d, rx) = desktop();
        d.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 0, 0));
        d.handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), 0, 0));
        let area = Rect::new(0, 0, 120, 40);
        let mut buf = Buffer::empty(area);
        let mut frame = UiFrame::from_parts(area, &mut buf);
        d.render(&mut frame);
        d.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 15, 39));
        assert_eq!(rx.try_recv(), Ok(ShellRequest::Open(AppKind::TextEdit)));
    }

    #[test]
    fn negative_origin_window_is_blitted() {
        let (mut d, _rx) = desktop();
        let id = open(&mut d, 0, 0);
        let area = Rect::new(0, 0, 120, 40);
        let mut buf = Buffer::empty(area);
        let mut frame = UiFrame::from_parts(area, &mut buf);
        let theme = Theme::default();
        let window = d.window_mut(id).unwrap();
        paint_window(
            &mut frame,
            window,
            WindowRect::new(-5, -2, 20, 10),
            area,
            &theme,
        );
        let buffer = frame.buffer();
        assert_eq!(buffer.cell((14, 7)).unwrap().symbol(), "┘");
        assert_eq!(buffer.cell((14, 0)).unwrap().symbol(), "│");
    }
}
