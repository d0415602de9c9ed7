//! Press/move/release state machine that moves and resizes a window.
//!
//! Geometry is always recomputed from the rectangle and anchor captured at
//! press time plus the absolute pointer position, never from the delta between
//! two move events, so coalesced or dropped move events cannot cause drift.

use crate::constants::{DEFAULT_EDGE_MARGIN, MIN_WINDOW_HEIGHT, MIN_WINDOW_WIDTH};
use crate::geometry::{Point, WindowRect};

use super::zone::{CursorGlyph, ResizeMode, Zone, resolve_zone};

/// What happens when a resize drag would shrink a window below its minimum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizePolicy {
    /// Stop at the minimum size; the edge opposite the dragged one stays put.
    Clamp { min_width: i32, min_height: i32 },
    /// Rubber-band: width/height may reach zero or go negative mid-drag.
    Allow,
}

impl Default for SizePolicy {
    fn default() -> Self {
        SizePolicy::Clamp {
            min_width: MIN_WINDOW_WIDTH,
            min_height: MIN_WINDOW_HEIGHT,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PressState {
    /// Pointer minus window origin at press time.
    anchor: Point,
    /// Window rectangle at press time.
    start: WindowRect,
}

#[derive(Debug, Clone)]
pub struct DragController {
    mode: Option<ResizeMode>,
    press: Option<PressState>,
    cursor: CursorGlyph,
    margin: i32,
    policy: SizePolicy,
    allow_resize: bool,
}

impl Default for DragController {
    fn default() -> Self {
        Self::new(DEFAULT_EDGE_MARGIN, SizePolicy::default(), true)
    }
}

impl DragController {
    pub fn new(margin: i32, policy: SizePolicy, allow_resize: bool) -> Self {
        Self {
            mode: None,
            press: None,
            cursor: CursorGlyph::Arrow,
            margin,
            policy,
            allow_resize,
        }
    }

    pub fn mode(&self) -> Option<ResizeMode> {
        self.mode
    }

    pub fn reset_mode(&mut self) {
        self.mode = None;
        self.cursor = CursorGlyph::Arrow;
    }

    pub fn cursor(&self) -> CursorGlyph {
        self.cursor
    }

    pub fn anchor(&self) -> Option<Point> {
        self.press.map(|p| p.anchor)
    }

    /// Resolve the zone under the pointer and remember its mode for the next
    /// held move. Windows that cannot be resized never leave `None`.
    pub fn hover(&mut self, rect: WindowRect, pointer: Point) -> Zone {
        if !self.allow_resize {
            return Zone::Interior;
        }
        let zone = resolve_zone(rect, pointer, self.margin);
        self.mode = zone.mode();
        self.cursor = zone.cursor();
        zone
    }

    /// A press with no buttons held is only a hover. With a button held the
    /// anchor is captured and the hover-resolved mode is kept.
    pub fn on_press(&mut self, rect: WindowRect, pointer: Point, buttons_held: bool) {
        if !buttons_held {
            self.hover(rect, pointer);
            return;
        }
        self.press = Some(PressState {
            anchor: pointer - rect.origin(),
            start: rect,
        });
    }

    /// Returns the new rectangle when the move resizes the window.
    pub fn on_move(
        &mut self,
        rect: WindowRect,
        pointer: Point,
        buttons_held: bool,
    ) -> Option<WindowRect> {
        if !buttons_held {
            self.hover(rect, pointer);
            return None;
        }
        if !self.allow_resize {
            return None;
        }
        let mode = self.mode?;
        let press = self.press?;
        Some(apply_resize(
            press.start,
            mode,
            press.anchor,
            pointer,
            self.policy,
        ))
    }

    /// Chrome-initiated move: the window follows the pointer, kept inside the
    /// parent horizontally and below its top edge.
    pub fn translate(
        &self,
        rect: WindowRect,
        pointer: Point,
        parent_width: i32,
    ) -> Option<WindowRect> {
        let press = self.press?;
        Some(apply_translate(rect, press.anchor, pointer, parent_width))
    }

    /// Ends the press. The resolved mode survives until the next hover or a
    /// focus loss.
    pub fn on_release(&mut self) {
        self.press = None;
    }
}

/// Recompute a rectangle for a resize drag. Edges moved by `mode` follow the
/// pointer; the opposite edges stay where they were at press time.
pub fn apply_resize(
    start: WindowRect,
    mode: ResizeMode,
    anchor: Point,
    pointer: Point,
    policy: SizePolicy,
) -> WindowRect {
    let press = start.origin() + anchor;
    let mut x = start.x;
    let mut y = start.y;
    let mut width = start.width;
    let mut height = start.height;

    if mode.moves_left_edge() {
        x = pointer.x - anchor.x;
        width = start.right() - x;
    } else if mode.moves_right_edge() {
        width = start.width + (pointer.x - press.x);
    }
    if mode.moves_top_edge() {
        y = pointer.y - anchor.y;
        height = start.bottom() - y;
    } else if mode.moves_bottom_edge() {
        height = start.height + (pointer.y - press.y);
    }

    if let SizePolicy::Clamp {
        min_width,
        min_height,
    } = policy
    {
        if width < min_width {
            width = min_width;
            if mode.moves_left_edge() {
                x = start.right() - min_width;
            }
        }
        if height < min_height {
            height = min_height;
            if mode.moves_top_edge() {
                y = start.bottom() - min_height;
            }
        }
    }

    WindowRect::new(x, y, width, height)
}

/// Recompute a rectangle for a chrome drag. `x` is clamped to
/// `[0, parent_width - width]` and `y` to `>= 0`; the bottom is not clamped.
pub fn apply_translate(
    rect: WindowRect,
    anchor: Point,
    pointer: Point,
    parent_width: i32,
) -> WindowRect {
    let origin = pointer - anchor;
    let max_x = parent_width - rect.width;
    let x = origin.x.min(max_x).max(0);
    let y = origin.y.max(0);
    WindowRect::new(x, y, rect.width, rect.height)
}
