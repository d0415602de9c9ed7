//! Color strings to terminal colors.
//!
//! Theme properties and window options carry colors as CSS-like strings
//! (`#202020`, `#fff`, `rgb(32, 32, 32)`, `darkgray`). RGB values are mapped to
//! the nearest xterm-256 entry unless the terminal advertises truecolor.

use std::str::FromStr;

use ratatui::style::Color;

/// Parse a color string. Returns `None` for anything unrecognised.
pub fn parse_color(value: &str) -> Option<Color> {
    let value = value.trim();
    if let Some(hex) = value.strip_prefix('#') {
        let (r, g, b) = parse_hex(hex)?;
        return Some(map_rgb_to_color(r, g, b));
    }
    if let Some(body) = value
        .strip_prefix("rgb(")
        .and_then(|rest| rest.strip_suffix(')'))
    {
        let mut parts = body.split(',').map(|p| p.trim().parse::<u8>());
        let (Some(Ok(r)), Some(Ok(g)), Some(Ok(b)), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return None;
        };
        return Some(map_rgb_to_color(r, g, b));
    }
    Color::from_str(value).ok()
}

fn parse_hex(hex: &str) -> Option<(u8, u8, u8)> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    match hex.len() {
        3 => {
            let nibble = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|v| v * 17);
            Some((nibble(0)?, nibble(1)?, nibble(2)?))
        }
        6 => {
            let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
            Some((byte(0)?, byte(2)?, byte(4)?))
        }
        _ => None,
    }
}

/// Map an RGB triple to a color the current terminal can show. Truecolor
/// terminals (`COLORTERM` contains `truecolor` or `24bit`) get the exact value.
pub fn map_rgb_to_color(r: u8, g: u8, b: u8) -> Color {
    if truecolor_supported() {
        Color::Rgb(r, g, b)
    } else {
        Color::Indexed(rgb_to_xterm_index(r, g, b))
    }
}

fn truecolor_supported() -> bool {
    std::env::var("COLORTERM")
        .map(|var| {
            let var = var.to_lowercase();
            var.contains("truecolor") || var.contains("24bit")
        })
        .unwrap_or(false)
}

fn rgb_to_xterm_index(r: u8, g: u8, b: u8) -> u8 {
    // 6x6x6 cube lives at 16..=231, the gray ramp at 232..=255
    let (r6, g6, b6) = (to_6cube(r), to_6cube(g), to_6cube(b));
    let cube_index = 16 + 36 * r6 + 6 * g6 + b6;
    let cube_rgb = (from_6cube(r6), from_6cube(g6), from_6cube(b6));

    let gray_index = rgb_to_gray_index(r, g, b);
    let gray = from_gray(gray_index);

    if distance_sq((r, g, b), (gray, gray, gray)) < distance_sq((r, g, b), cube_rgb) {
        232 + gray_index
    } else {
        cube_index
    }
}

fn to_6cube(v: u8) -> u8 {
    ((v as u16 * 5 + 127) / 255) as u8
}

fn from_6cube(c: u8) -> u8 {
    match c {
        0 => 0,
        1 => 95,
        2 => 135,
        3 => 175,
        4 => 215,
        _ => 255,
    }
}

fn rgb_to_gray_index(r: u8, g: u8, b: u8) -> u8 {
    let avg = (r as u16 + g as u16 + b as u16) / 3;
    ((avg * 23 + 127) / 255) as u8
}

fn from_gray(idx: u8) -> u8 {
    (8 + idx as u16 * 10).min(255) as u8
}

fn distance_sq(a: (u8, u8, u8), b: (u8, u8, u8)) -> u32 {
    let d = |x: u8, y: u8| {
        let v = x as i32 - y as i32;
        (v * v) as u32
    };
    d(a.0, b.0) + d(a.1, b.1) + d(a.2, b.2)
}
