//! Shared crate-wide constants.

/// Distance (in cells) from a window edge within which the pointer selects a
/// resize zone when no explicit margin is configured.
pub const DEFAULT_EDGE_MARGIN: i32 = 3;

/// Edge margin used by the terminal shell. Terminal cells are coarse, so a
/// single cell already covers the border row/column of a window.
pub const SHELL_EDGE_MARGIN: i32 = 1;

/// Height of the title/close strip drawn at the top of every window.
pub const CHROME_HEIGHT: i32 = 1;

/// Smallest size a window may be resized to under the clamping size policy.
pub const MIN_WINDOW_WIDTH: i32 = 1;
pub const MIN_WINDOW_HEIGHT: i32 = 1;

/// Initial size for windows whose application does not ask for one.
pub const DEFAULT_WINDOW_WIDTH: i32 = 60;
pub const DEFAULT_WINDOW_HEIGHT: i32 = 16;

/// Height of the dock drawn along the bottom of the screen.
pub const DOCK_HEIGHT: u16 = 1;

/// Offset applied to each newly opened window so stacked windows stay
/// individually grabbable.
pub const SPAWN_CASCADE_STEP: i32 = 2;

/// Largest offscreen buffer used to paint a single window.
pub const MAX_PAINT_EXTENT: i32 = u16::MAX as i32;
