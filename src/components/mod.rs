use crossterm::event::Event;
use ratatui::layout::Rect;

use crate::ui::UiFrame;

pub mod desktop_files;
pub mod selection_rect;
pub mod web_page;

pub use desktop_files::DesktopFilesComponent;
pub use selection_rect::SelectionRectangle;
pub use web_page::WebPageComponent;

/// Context passed to `Component` methods describing the hosting window.
#[derive(Debug, Clone, Copy, Default)]
pub struct ComponentContext {
    focused: bool,
}

impl ComponentContext {
    pub const fn new(focused: bool) -> Self {
        Self { focused }
    }

    pub const fn focused(&self) -> bool {
        self.focused
    }
}

/// Opaque content hosted inside a window. The window never interprets what a
/// component draws; mouse events arrive in content-local coordinates.
pub trait Component {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, ctx: &ComponentContext);

    fn handle_event(&mut self, _event: &Event, _ctx: &ComponentContext) -> bool {
        false
    }

    /// While true, the hosting window ignores focus loss so text entry is not
    /// interrupted.
    fn is_editing(&self) -> bool {
        false
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Component that records the events it receives.
    #[derive(Debug, Default, Clone)]
    pub struct Probe {
        pub events: Rc<RefCell<Vec<Event>>>,
        pub editing: bool,
    }

    impl Component for Probe {
        fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, _ctx: &ComponentContext) {
            frame.set_string(area.x, area.y, "probe", ratatui::style::Style::default());
        }

        fn handle_event(&mut self, event: &Event, _ctx: &ComponentContext) -> bool {
            self.events.borrow_mut().push(event.clone());
            true
        }

        fn is_editing(&self) -> bool {
            self.editing
        }
    }
}
