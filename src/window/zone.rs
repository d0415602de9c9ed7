//! Classifies where the pointer sits relative to a window's border.

use crate::geometry::{Point, WindowRect};

/// Region of a window the pointer occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Zone {
    Interior,
    Top,
    Bottom,
    Left,
    Right,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

/// The eight resize interactions. A window's mode is `Option<ResizeMode>`;
/// `None` corresponds to the interior zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResizeMode {
    Top,
    Bottom,
    Left,
    Right,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl ResizeMode {
    pub fn moves_left_edge(self) -> bool {
        matches!(
            self,
            ResizeMode::Left | ResizeMode::TopLeft | ResizeMode::BottomLeft
        )
    }

    pub fn moves_right_edge(self) -> bool {
        matches!(
            self,
            ResizeMode::Right | ResizeMode::TopRight | ResizeMode::BottomRight
        )
    }

    pub fn moves_top_edge(self) -> bool {
        matches!(
            self,
            ResizeMode::Top | ResizeMode::TopLeft | ResizeMode::TopRight
        )
    }

    pub fn moves_bottom_edge(self) -> bool {
        matches!(
            self,
            ResizeMode::Bottom | ResizeMode::BottomLeft | ResizeMode::BottomRight
        )
    }
}

/// Pointer shape shown as feedback for a zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CursorGlyph {
    Arrow,
    /// Top-left/bottom-right diagonal.
    DiagonalForward,
    /// Top-right/bottom-left diagonal.
    DiagonalBackward,
    Horizontal,
    Vertical,
}

impl CursorGlyph {
    pub fn symbol(self) -> &'static str {
        match self {
            CursorGlyph::Arrow => "↖",
            CursorGlyph::DiagonalForward => "⤡",
            CursorGlyph::DiagonalBackward => "⤢",
            CursorGlyph::Horizontal => "↔",
            CursorGlyph::Vertical => "↕",
        }
    }
}

impl Zone {
    pub fn mode(self) -> Option<ResizeMode> {
        match self {
            Zone::Interior => None,
            Zone::Top => Some(ResizeMode::Top),
            Zone::Bottom => Some(ResizeMode::Bottom),
            Zone::Left => Some(ResizeMode::Left),
            Zone::Right => Some(ResizeMode::Right),
            Zone::TopLeft => Some(ResizeMode::TopLeft),
            Zone::TopRight => Some(ResizeMode::TopRight),
            Zone::BottomLeft => Some(ResizeMode::BottomLeft),
            Zone::BottomRight => Some(ResizeMode::BottomRight),
        }
    }

    pub fn cursor(self) -> CursorGlyph {
        match self {
            Zone::Interior => CursorGlyph::Arrow,
            Zone::TopLeft | Zone::BottomRight => CursorGlyph::DiagonalForward,
            Zone::TopRight | Zone::BottomLeft => CursorGlyph::DiagonalBackward,
            Zone::Left | Zone::Right => CursorGlyph::Horizontal,
            Zone::Top | Zone::Bottom => CursorGlyph::Vertical,
        }
    }
}

/// Classify `pointer` against `rect`. Corners win over edges, edges over the
/// interior; left/right edges are checked before top/bottom.
///
/// "Within `margin` of the left edge" means `pointer.x - rect.x < margin`; the
/// right edge is measured from the last column, `rect.x + rect.width - 1`.
pub fn resolve_zone(rect: WindowRect, pointer: Point, margin: i32) -> Zone {
    let near_left = pointer.x - rect.x < margin;
    let near_right = (rect.right() - 1) - pointer.x < margin;
    let near_top = pointer.y - rect.y < margin;
    let near_bottom = (rect.bottom() - 1) - pointer.y < margin;

    if near_bottom && near_left {
        Zone::BottomLeft
    } else if near_bottom && near_right {
        Zone::BottomRight
    } else if near_top && near_left {
        Zone::TopLeft
    } else if near_top && near_right {
        Zone::TopRight
    } else if near_left {
        Zone::Left
    } else if near_right {
        Zone::Right
    } else if near_top {
        Zone::Top
    } else if near_bottom {
        Zone::Bottom
    } else {
        Zone::Interior
    }
}
