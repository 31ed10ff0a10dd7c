// File: crates/capture-core/src/types.rs
// Summary: Shared types and constants (capture defaults, colors, margins).

/// Default capture width in pixels.
pub const WIDTH: u32 = 400;
/// Default capture height in pixels.
pub const HEIGHT: u32 = 400;
/// Default capture resolution in dots per inch.
pub const RES: f32 = 72.0;

/// Size a device falls back to when it is opened without `width`/`height`.
pub const DEVICE_FALLBACK_SIZE: u32 = 480;

/// Page margins, in pixels at 72 dpi. A page is only drawable while the
/// margins leave some room inside it (see `Page::plot_region`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Insets {
    pub left: u32,
    pub right: u32,
    pub top: u32,
    pub bottom: u32,
}

impl Insets {
    pub const ZERO: Insets = Insets::new(0, 0, 0, 0);

    /// Create new insets (non-negative by type).
    pub const fn new(left: u32, right: u32, top: u32, bottom: u32) -> Self {
        Self { left, right, top, bottom }
    }
    /// Total horizontal inset (left + right).
    pub const fn hsum(&self) -> u32 { self.left.saturating_add(self.right) }
    /// Total vertical inset (top + bottom).
    pub const fn vsum(&self) -> u32 { self.top.saturating_add(self.bottom) }

    /// Scale every side by `factor`, rounding to whole pixels.
    pub fn scaled(&self, factor: f32) -> Self {
        let s = |v: u32| (v as f32 * factor).round().max(0.0) as u32;
        Self::new(s(self.left), s(self.right), s(self.top), s(self.bottom))
    }
}

impl Default for Insets {
    fn default() -> Self {
        Self::new(72, 24, 24, 56)
    }
}

/// Straight (non-premultiplied) 8-bit RGBA color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const WHITE: Rgba = Rgba::rgb(255, 255, 255);
    pub const BLACK: Rgba = Rgba::rgb(0, 0, 0);
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Parse a device background spec: a named color or `#rrggbb` / `#rrggbbaa`.
    pub fn parse(spec: &str) -> Option<Self> {
        let spec = spec.trim();
        match spec.to_ascii_lowercase().as_str() {
            "white" => return Some(Self::WHITE),
            "black" => return Some(Self::BLACK),
            "transparent" | "none" => return Some(Self::TRANSPARENT),
            _ => {}
        }
        let hex = spec.strip_prefix('#')?;
        if !hex.is_ascii() {
            return None;
        }
        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        match hex.len() {
            6 => Some(Self::rgb(byte(0)?, byte(2)?, byte(4)?)),
            8 => Some(Self::new(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
            _ => None,
        }
    }

    /// `#rrggbb` form used by the SVG backend (alpha goes in a separate attribute).
    pub fn to_hex_rgb(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    pub fn opacity(&self) -> f32 {
        self.a as f32 / 255.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_named_and_hex_colors() {
        assert_eq!(Rgba::parse("White"), Some(Rgba::WHITE));
        assert_eq!(Rgba::parse("transparent"), Some(Rgba::TRANSPARENT));
        assert_eq!(Rgba::parse("#102030"), Some(Rgba::rgb(0x10, 0x20, 0x30)));
        assert_eq!(Rgba::parse("#10203080"), Some(Rgba::new(0x10, 0x20, 0x30, 0x80)));
        assert_eq!(Rgba::parse("#1020"), None);
        assert_eq!(Rgba::parse("teal"), None);
    }

    #[test]
    fn insets_scale_with_resolution() {
        let m = Insets::default().scaled(2.0);
        assert_eq!(m, Insets::new(144, 48, 48, 112));
        assert_eq!(Insets::ZERO.hsum(), 0);
    }

    #[test]
    fn huge_scale_saturates_instead_of_overflowing() {
        let m = Insets::default().scaled(1e10);
        assert_eq!(m.left, u32::MAX);
        assert_eq!(m.hsum(), u32::MAX);
        assert_eq!(m.vsum(), u32::MAX);
    }
}
