// File: crates/capture-core/src/theme.rs
// Summary: Light/Dark theming for chart colors.

use crate::types::Rgba;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Theme {
    pub name: &'static str,
    pub background: Rgba,
    pub grid: Rgba,
    pub axis_line: Rgba,
    pub axis_label: Rgba,
    pub line_stroke: Rgba,
    pub candle_up: Rgba,
    pub candle_down: Rgba,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            name: "dark",
            background: Rgba::rgb(18, 18, 20),
            grid: Rgba::rgb(40, 40, 45),
            axis_line: Rgba::rgb(180, 180, 190),
            axis_label: Rgba::rgb(235, 235, 245),
            line_stroke: Rgba::rgb(64, 160, 255),
            candle_up: Rgba::rgb(40, 200, 120),
            candle_down: Rgba::rgb(220, 80, 80),
        }
    }

    pub fn light() -> Self {
        Self {
            name: "light",
            background: Rgba::rgb(250, 250, 252),
            grid: Rgba::rgb(230, 230, 235),
            axis_line: Rgba::rgb(60, 60, 70),
            axis_label: Rgba::rgb(20, 20, 30),
            line_stroke: Rgba::rgb(32, 120, 200),
            candle_up: Rgba::rgb(20, 160, 90),
            candle_down: Rgba::rgb(200, 60, 60),
        }
    }
}

impl Default for Theme {
    fn default() -> Self { Theme::light() }
}

/// Return a list of built-in theme presets.
pub fn presets() -> Vec<Theme> {
    vec![Theme::light(), Theme::dark()]
}

/// Find a theme by its `name`, falling back to light.
pub fn find(name: &str) -> Theme {
    for t in presets() { if t.name.eq_ignore_ascii_case(name) { return t; } }
    Theme::light()
}
