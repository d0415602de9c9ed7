//! UiFrame: a thin wrapper around a ratatui buffer that clips drawing to the
//! visible area.
//!
//! Windows compute rectangles in signed desktop coordinates and routinely hang
//! off the screen edge while being dragged. Writing outside the underlying
//! `Buffer` panics, so every draw call made by the desktop, windows and
//! content components goes through `UiFrame`, which intersects the target
//! rectangle with the visible area first.
//!
//! Windows are painted offscreen at their own size and then composited with
//! `blit_from_signed`, which handles negative origins.
use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::{StatefulWidget, Widget};

use crate::geometry::WindowRect;

pub struct UiFrame<'a> {
    area: Rect,
    buffer: &'a mut Buffer,
}

impl<'a> UiFrame<'a> {
    pub fn new(frame: &'a mut Frame<'_>) -> Self {
        let area = frame.area();
        let buffer = frame.buffer_mut();
        Self { area, buffer }
    }

    /// Construct a `UiFrame` directly from an area and buffer, used for
    /// offscreen window painting and tests.
    pub fn from_parts(area: Rect, buffer: &'a mut Buffer) -> Self {
        Self { area, buffer }
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    pub fn buffer(&self) -> &Buffer {
        self.buffer
    }

    pub fn buffer_mut(&mut self) -> &mut Buffer {
        self.buffer
    }

    fn clip_rect(&self, rect: Rect) -> Option<Rect> {
        let clipped = rect.intersection(self.area);
        if clipped.width == 0 || clipped.height == 0 {
            None
        } else {
            Some(clipped)
        }
    }

    pub fn render_widget<W>(&mut self, widget: W, area: Rect)
    where
        W: Widget,
    {
        if let Some(clipped) = self.clip_rect(area) {
            widget.render(clipped, self.buffer);
        }
    }

    pub fn render_stateful_widget<W>(&mut self, widget: W, area: Rect, state: &mut W::State)
    where
        W: StatefulWidget,
    {
        if let Some(clipped) = self.clip_rect(area) {
            widget.render(clipped, self.buffer, state);
        }
    }

    /// Blank every cell of `area` with `style`.
    pub fn fill(&mut self, area: Rect, style: Style) {
        let Some(area) = self.clip_rect(area) else {
            return;
        };
        for y in area.y..area.y + area.height {
            for x in area.x..area.x + area.width {
                if let Some(cell) = self.buffer.cell_mut((x, y)) {
                    cell.reset();
                    cell.set_symbol(" ");
                    cell.set_style(style);
                }
            }
        }
    }

    /// Change the background of every cell in `area` while keeping glyphs,
    /// which is as close to a translucent overlay as a terminal gets.
    pub fn tint(&mut self, area: Rect, bg: Color) {
        let Some(area) = self.clip_rect(area) else {
            return;
        };
        for y in area.y..area.y + area.height {
            for x in area.x..area.x + area.width {
                if let Some(cell) = self.buffer.cell_mut((x, y)) {
                    cell.set_bg(bg);
                }
            }
        }
    }

    /// Draw a one-cell line border along the outermost cells of `area`.
    pub fn stroke_border(&mut self, area: Rect, style: Style) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let left = area.x;
        let top = area.y;
        let right = area.x + area.width - 1;
        let bottom = area.y + area.height - 1;
        for x in left..=right {
            let (top_glyph, bottom_glyph) = if x == left {
                ("┌", "└")
            } else if x == right {
                ("┐", "┘")
            } else {
                ("─", "─")
            };
            self.put(x, top, top_glyph, style);
            self.put(x, bottom, bottom_glyph, style);
        }
        for y in top.saturating_add(1)..bottom {
            self.put(left, y, "│", style);
            self.put(right, y, "│", style);
        }
    }

    /// Write `text` starting at (`x`, `y`), truncated at the frame edge.
    pub fn set_string(&mut self, x: u16, y: u16, text: &str, style: Style) {
        safe_set_string(self.buffer, self.area, x, y, text, style);
    }

    fn put(&mut self, x: u16, y: u16, symbol: &str, style: Style) {
        if !rect_contains(self.area, x, y) {
            return;
        }
        if let Some(cell) = self.buffer.cell_mut((x, y)) {
            cell.set_symbol(symbol);
            cell.set_style(style);
        }
    }

    pub fn blit_from_signed(&mut self, src: &Buffer, dest: WindowRect) {
        let frame_x0 = self.area.x as i32;
        let frame_y0 = self.area.y as i32;
        let frame_x1 = frame_x0 + self.area.width as i32;
        let frame_y1 = frame_y0 + self.area.height as i32;
        for sy in 0..dest.height.max(0) {
            let dy = dest.y + sy;
            if dy < frame_y0 || dy >= frame_y1 {
                continue;
            }
            for sx in 0..dest.width.max(0) {
                let dx = dest.x + sx;
                if dx < frame_x0 || dx >= frame_x1 {
                    continue;
                }
                if let (Some(src_cell), Some(dst_cell)) = (
                    src.cell((sx as u16, sy as u16)),
                    self.buffer.cell_mut((dx as u16, dy as u16)),
                ) {
                    *dst_cell = src_cell.clone();
                }
            }
        }
    }
}

pub fn rect_contains(rect: Rect, column: u16, row: u16) -> bool {
    if rect.width == 0 || rect.height == 0 {
        return false;
    }
    let max_x = rect.x.saturating_add(rect.width);
    let max_y = rect.y.saturating_add(rect.height);
    column >= rect.x && column < max_x && row >= rect.y && row < max_y
}

pub(crate) fn safe_set_string(
    buffer: &mut Buffer,
    bounds: Rect,
    x: u16,
    y: u16,
    text: &str,
    style: Style,
) {
    if !rect_contains(bounds, x, y) {
        return;
    }
    let available = bounds.x.saturating_add(bounds.width).saturating_sub(x);
    let text = truncate_to_width(text, available as usize);
    buffer.set_string(x, y, text, style);
}

pub(crate) fn truncate_to_width(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    value.chars().take(width).collect()
}
