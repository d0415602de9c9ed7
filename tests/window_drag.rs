use ratatui::layout::Rect;
use simplifyc_shell::components::{Component, ComponentContext};
use simplifyc_shell::geometry::{Point, Size, WindowRect};
use simplifyc_shell::ui::UiFrame;
use simplifyc_shell::window::{
    ApplicationWindow, CursorGlyph, ParentContainer, PointerEvent, PointerWidget, ResizeMode,
    SizePolicy, WindowId, WindowOptions, WindowSignal,
};

#[derive(Default)]
struct Parent {
    repaints: usize,
    detached: Vec<WindowId>,
}

impl ParentContainer for Parent {
    fn size(&self) -> Size {
        Size::new(1000, 800)
    }

    fn install_event_filter(&mut self, _window: WindowId) {}

    fn request_repaint(&mut self) {
        self.repaints += 1;
    }

    fn detach(&mut self, window: WindowId) {
        self.detached.push(window);
    }
}

struct Blank;

impl Component for Blank {
    fn render(&mut self, _frame: &mut UiFrame<'_>, _area: Rect, _ctx: &ComponentContext) {}
}

fn window(parent: &mut Parent, policy: SizePolicy) -> ApplicationWindow {
    ApplicationWindow::create(
        WindowId(1),
        parent,
        Point::new(100, 100),
        Box::new(Blank),
        WindowOptions::default()
            .with_size(Size::new(400, 300))
            .with_size_policy(policy),
    )
}

fn held(x: i32, y: i32) -> PointerEvent {
    PointerEvent::new(Point::new(x, y), true)
}

fn hover(x: i32, y: i32) -> PointerEvent {
    PointerEvent::new(Point::new(x, y), false)
}

fn drag(w: &mut ApplicationWindow, parent: &mut Parent, from: (i32, i32), to: &[(i32, i32)]) {
    w.on_move(&hover(from.0, from.1), parent);
    w.on_press(&held(from.0, from.1), parent);
    for &(x, y) in to {
        w.on_move(&held(x, y), parent);
    }
    let last = to.last().copied().unwrap_or(from);
    w.on_release(&hover(last.0, last.1), parent);
}

#[test]
fn bottom_right_grows_by_pointer_delta() {
    let mut parent = Parent::default();
    let mut w = window(&mut parent, SizePolicy::default());
    w.on_move(&hover(498, 398), &mut parent);
    assert_eq!(w.mode(), Some(ResizeMode::BottomRight));
    assert_eq!(w.cursor(), CursorGlyph::DiagonalForward);
    drag(&mut w, &mut parent, (498, 398), &[(520, 410)]);
    assert_eq!(w.rect(), WindowRect::new(100, 100, 422, 312));
}

#[test]
fn left_edge_keeps_right_edge_fixed() {
    let mut parent = Parent::default();
    let mut w = window(&mut parent, SizePolicy::default());
    drag(&mut w, &mut parent, (101, 250), &[(150, 260)]);
    let r = w.rect();
    assert_eq!((r.x, r.y, r.height), (149, 100, 300));
    assert_eq!(r.right(), 500);
}

#[test]
fn coalesced_moves_match_single_move() {
    let mut parent = Parent::default();
    let mut stepwise = window(&mut parent, SizePolicy::default());
    drag(
        &mut stepwise,
        &mut parent,
        (102, 102),
        &[(101, 99), (95, 94), (90, 90)],
    );
    let mut direct = window(&mut parent, SizePolicy::default());
    drag(&mut direct, &mut parent, (102, 102), &[(90, 90)]);
    assert_eq!(stepwise.rect(), direct.rect());
    assert_eq!(direct.rect().origin(), Point::new(88, 88));
}

#[test]
fn clamp_stops_at_minimum_and_allow_inverts() {
    let mut parent = Parent::default();
    let clamp = SizePolicy::Clamp {
        min_width: 10,
        min_height: 5,
    };
    let mut clamped = window(&mut parent, clamp);
    drag(&mut clamped, &mut parent, (102, 102), &[(700, 700)]);
    assert_eq!(clamped.rect(), WindowRect::new(490, 395, 10, 5));

    let mut rubber = window(&mut parent, SizePolicy::Allow);
    drag(&mut rubber, &mut parent, (102, 102), &[(700, 700)]);
    let r = rubber.rect();
    assert!(r.width < 0 && r.height < 0);
    assert_eq!((r.right(), r.bottom()), (500, 400));
}

#[test]
fn resize_disabled_never_sets_mode() {
    let mut parent = Parent::default();
    let mut w = ApplicationWindow::create(
        WindowId(2),
        &mut parent,
        Point::new(0, 0),
        Box::new(Blank),
        WindowOptions::default()
            .with_size(Size::new(50, 20))
            .with_resize(false),
    );
    w.on_move(&hover(0, 0), &mut parent);
    assert_eq!(w.mode(), None);
    w.on_press(&held(0, 10), &mut parent);
    w.on_move(&held(20, 10), &mut parent);
    assert_eq!(w.rect(), WindowRect::new(0, 0, 50, 20));
}

#[test]
fn release_keeps_mode_until_next_hover() {
    let mut parent = Parent::default();
    let mut w = window(&mut parent, SizePolicy::default());
    drag(&mut w, &mut parent, (300, 101), &[(300, 90)]);
    assert_eq!(w.mode(), Some(ResizeMode::Top));
    w.on_move(&hover(300, 250), &mut parent);
    assert_eq!(w.mode(), None);
    assert_eq!(w.cursor(), CursorGlyph::Arrow);
}

#[test]
fn geometry_signal_only_on_change() {
    let mut parent = Parent::default();
    let mut w = window(&mut parent, SizePolicy::default());
    w.take_signals();
    drag(&mut w, &mut parent, (498, 250), &[(498, 250), (510, 250)]);
    assert_eq!(
        w.take_signals(),
        vec![WindowSignal::GeometryChanged(WindowRect::new(
            100, 100, 412, 300
        ))]
    );
}
