use std::collections::BTreeMap;

use ratatui::style::Color;

use crate::term_color::{map_rgb_to_color, parse_color};

// Named background properties. Windows and the dock refer to these by name so
// a different palette can be swapped in without touching the widgets.
pub const BACKGROUND: &str = "background-color";
pub const BACKGROUND_2: &str = "background-color-2";
pub const BACKGROUND_3: &str = "background-color-3";
pub const FOREGROUND: &str = "foreground-color";
pub const ACCENT: &str = "accent-color";
pub const DESKTOP: &str = "desktop-color";

/// Placeholder accepted wherever a color string is expected, meaning "use the
/// theme's value for this slot".
pub const DEFAULT_COLOR: &str = "default";

pub const ACCENT_RGB: (u8, u8, u8) = (200, 100, 0);

#[derive(Debug, Clone)]
pub struct Theme {
    properties: BTreeMap<String, String>,
}

impl Default for Theme {
    fn default() -> Self {
        let mut properties = BTreeMap::new();
        for (name, value) in [
            (BACKGROUND, "#202020"),
            (BACKGROUND_2, "#2a2a2a"),
            (BACKGROUND_3, "#3c3c3c"),
            (FOREGROUND, "#e0e0e0"),
            (ACCENT, "#c86400"),
            (DESKTOP, "#103050"),
        ] {
            properties.insert(name.to_string(), value.to_string());
        }
        Self { properties }
    }
}

impl Theme {
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.properties.insert(name.into(), value.into());
    }

    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties.get(name).map(String::as_str)
    }

    /// Resolve a named property to a terminal color.
    pub fn color(&self, name: &str) -> Color {
        match self.property(name).and_then(parse_color) {
            Some(color) => color,
            None => {
                tracing::warn!(property = name, "theme property missing or unparsable");
                Color::Reset
            }
        }
    }

    /// Resolve an explicit color string, falling back to the named property
    /// when the string is `"default"` or cannot be parsed.
    pub fn resolve(&self, value: &str, fallback_property: &str) -> Color {
        if value.eq_ignore_ascii_case(DEFAULT_COLOR) {
            return self.color(fallback_property);
        }
        parse_color(value).unwrap_or_else(|| {
            tracing::warn!(color = value, "unparsable color, using theme default");
            self.color(fallback_property)
        })
    }

    pub fn background(&self) -> Color {
        self.color(BACKGROUND)
    }

    pub fn foreground(&self) -> Color {
        self.color(FOREGROUND)
    }

    pub fn desktop(&self) -> Color {
        self.color(DESKTOP)
    }

    pub fn dock_bg(&self) -> Color {
        self.color(BACKGROUND_3)
    }

    pub fn accent(&self) -> Color {
        match self.property(ACCENT).and_then(parse_color) {
            Some(color) => color,
            None => map_rgb_to_color(ACCENT_RGB.0, ACCENT_RGB.1, ACCENT_RGB.2),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_theme_defines_background_slots() {
        let theme = Theme::default();
        for name in [BACKGROUND, BACKGROUND_2, BACKGROUND_3, FOREGROUND, DESKTOP] {
            assert!(theme.property(name).is_some(), "missing {name}");
            assert_ne!(theme.color(name), Color::Reset);
        }
    }

    #[test]
    fn resolve_uses_property_for_default_placeholder() {
        let mut theme = Theme::default();
        theme.set(BACKGROUND, "red");
        assert_eq!(theme.resolve("default", BACKGROUND), Color::Red);
        assert_eq!(theme.resolve("DEFAULT", BACKGROUND), Color::Red);
        assert_eq!(theme.resolve("blue", BACKGROUND), Color::Blue);
        assert_eq!(theme.resolve("bogus", BACKGROUND), Color::Red);
    }

    #[test]
    fn missing_property_is_reset() {
        let theme = Theme::default();
        assert_eq!(theme.color("no-such-property"), Color::Reset);
    }

    #[test]
    fn accent_falls_back_to_builtin_rgb() {
        let mut theme = Theme::default();
        theme.set(ACCENT, "???");
        match theme.accent() {
            Color::Rgb(..) | Color::Indexed(_) => {}
            other => panic!("unexpected color variant {other:?}"),
        }
    }
}
