// File: crates/capture-core/src/geometry.rs
// Summary: Lightweight geometry helpers for pixel math.

/// Axis-aligned rectangle in surface pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RectF {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl RectF {
    pub const fn from_ltrb(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self { left, top, right, bottom }
    }
    pub fn from_ltwh(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self { left, top, right: left + width, bottom: top + height }
    }
    pub fn width(&self) -> f32 { self.right - self.left }
    pub fn height(&self) -> f32 { self.bottom - self.top }
    pub fn is_empty(&self) -> bool { self.width() <= 0.0 || self.height() <= 0.0 }

    /// Intersect with the `[0, w) x [0, h)` pixel grid; returns integer bounds.
    pub fn clip_to(&self, w: u32, h: u32) -> Option<(u32, u32, u32, u32)> {
        let l = clamp(self.left.floor(), 0.0, w as f32) as u32;
        let t = clamp(self.top.floor(), 0.0, h as f32) as u32;
        let r = clamp(self.right.ceil(), 0.0, w as f32) as u32;
        let b = clamp(self.bottom.ceil(), 0.0, h as f32) as u32;
        if l >= r || t >= b { None } else { Some((l, t, r, b)) }
    }
}

#[inline]
pub fn clamp<T: PartialOrd>(v: T, lo: T, hi: T) -> T {
    if v < lo { lo } else if v > hi { hi } else { v }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clip_discards_offscreen_rects() {
        let r = RectF::from_ltwh(-5.0, 2.0, 10.0, 3.0);
        assert_eq!(r.clip_to(4, 4), Some((0, 2, 4, 4)));
        assert_eq!(RectF::from_ltwh(10.0, 10.0, 2.0, 2.0).clip_to(4, 4), None);
    }
}
