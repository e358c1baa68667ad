//! Core types for spark-page.
//!
//! Geometry lives in page pixels (`f32`), the same unit the scroll position,
//! the layout engine and the motion targets use. Colors and cells are what the
//! painter hands to the renderer.

// =============================================================================
// Color
// =============================================================================

/// RGBA color with 8-bit channels (0-255).
///
/// Alpha 255 = fully opaque, 0 = fully transparent.
/// Special value: r=-1 means "terminal default" (let terminal pick).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgba {
    pub r: i16,
    pub g: i16,
    pub b: i16,
    pub a: i16,
}

impl Rgba {
    /// Create a new RGBA color.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: r as i16,
            g: g as i16,
            b: b as i16,
            a: a as i16,
        }
    }

    /// Create an opaque RGB color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Terminal default color (let terminal decide).
    pub const TERMINAL_DEFAULT: Self = Self {
        r: -1,
        g: -1,
        b: -1,
        a: -1,
    };

    pub const TRANSPARENT: Self = Self {
        r: 0,
        g: 0,
        b: 0,
        a: 0,
    };

    pub const WHITE: Self = Self::rgb(255, 255, 255);

    // Page palette
    pub const GRAY_50: Self = Self::rgb(249, 250, 251);
    pub const GRAY_100: Self = Self::rgb(243, 244, 246);
    pub const GRAY_200: Self = Self::rgb(229, 231, 235);
    pub const GRAY_600: Self = Self::rgb(75, 85, 99);
    pub const GRAY_900: Self = Self::rgb(17, 24, 39);
    pub const BLUE_600: Self = Self::rgb(37, 99, 235);
    pub const BLUE_800: Self = Self::rgb(30, 64, 175);
    pub const PURPLE_600: Self = Self::rgb(147, 51, 234);

    /// Check if this is the terminal default color.
    #[inline]
    pub const fn is_terminal_default(&self) -> bool {
        self.r == -1
    }

    #[inline]
    pub const fn is_opaque(&self) -> bool {
        self.a == 255
    }

    #[inline]
    pub const fn is_transparent(&self) -> bool {
        self.a == 0
    }

    /// Same color with alpha scaled by `opacity` (0.0 - 1.0).
    pub fn with_opacity(self, opacity: f32) -> Self {
        if self.is_terminal_default() {
            return self;
        }
        let a = (self.a as f32 * opacity.clamp(0.0, 1.0)).round() as i16;
        Self { a, ..self }
    }

    /// Linear interpolation between two opaque colors.
    pub fn mix(from: Self, to: Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let channel = |a: i16, b: i16| (a as f32 + (b - a) as f32 * t).round() as i16;
        Self {
            r: channel(from.r, to.r),
            g: channel(from.g, to.g),
            b: channel(from.b, to.b),
            a: channel(from.a, to.a),
        }
    }

    /// Alpha blend src over dst (Porter-Duff "over" operation).
    ///
    /// Terminal default is treated as opaque.
    pub fn blend(src: Self, dst: Self) -> Self {
        if src.is_opaque() || src.is_terminal_default() {
            return src;
        }
        if src.is_transparent() {
            return dst;
        }
        if dst.is_terminal_default() {
            return Self { a: 255, ..src };
        }

        let sa = src.a as f32 / 255.0;
        let da = dst.a as f32 / 255.0;
        let out_a = sa + da * (1.0 - sa);
        if out_a <= 0.0 {
            return Self::TRANSPARENT;
        }
        let channel = |s: i16, d: i16| {
            ((s as f32 * sa + d as f32 * da * (1.0 - sa)) / out_a).round() as i16
        };

        Self {
            r: channel(src.r, dst.r),
            g: channel(src.g, dst.g),
            b: channel(src.b, dst.b),
            a: (out_a * 255.0).round() as i16,
        }
    }
}

// =============================================================================
// Text Attributes
// =============================================================================

bitflags::bitflags! {
    /// Text attributes as a bitfield.
    ///
    /// Combine with bitwise OR: `Attr::BOLD | Attr::UNDERLINE`
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Attr: u8 {
        const NONE = 0;
        const BOLD = 1 << 0;
        const DIM = 1 << 1;
        const ITALIC = 1 << 2;
        const UNDERLINE = 1 << 3;
    }
}

// =============================================================================
// Cell
// =============================================================================

/// A single terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub fg: Rgba,
    pub bg: Rgba,
    pub attrs: Attr,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: Rgba::TERMINAL_DEFAULT,
            bg: Rgba::TERMINAL_DEFAULT,
            attrs: Attr::NONE,
        }
    }
}

// =============================================================================
// Geometry
// =============================================================================

/// Axis-aligned rectangle in page pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Area, zero for degenerate rectangles.
    pub fn area(&self) -> f32 {
        self.width.max(0.0) * self.height.max(0.0)
    }

    pub fn is_empty(&self) -> bool {
        self.area() <= 0.0
    }

    /// Overlapping region of two rectangles, `None` if they do not overlap.
    pub fn intersect(&self, other: &Rect) -> Option<Rect> {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        if right > x && bottom > y {
            Some(Rect::new(x, y, right - x, bottom - y))
        } else {
            None
        }
    }

    pub fn translate(&self, dx: f32, dy: f32) -> Rect {
        Rect::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_intersect() {
        let a = Rect::new(0.0, 0.0, 100.0, 100.0);
        let b = Rect::new(50.0, 50.0, 100.0, 100.0);

        assert_eq!(a.intersect(&b), Some(Rect::new(50.0, 50.0, 50.0, 50.0)));
        assert_eq!(a.intersect(&Rect::new(100.0, 0.0, 10.0, 10.0)), None);
    }

    #[test]
    fn test_rect_area_degenerate() {
        assert_eq!(Rect::new(0.0, 0.0, -5.0, 10.0).area(), 0.0);
        assert!(Rect::default().is_empty());
    }

    #[test]
    fn test_blend_half_white_over_black() {
        let src = Rgba::new(255, 255, 255, 128);
        let dst = Rgba::rgb(0, 0, 0);
        let out = Rgba::blend(src, dst);

        assert!(out.is_opaque());
        assert!((out.r - 128).abs() <= 1);
    }

    #[test]
    fn test_with_opacity() {
        assert_eq!(Rgba::WHITE.with_opacity(0.0).a, 0);
        assert_eq!(Rgba::WHITE.with_opacity(1.0).a, 255);
        assert!(Rgba::TERMINAL_DEFAULT.with_opacity(0.0).is_terminal_default());
    }

    #[test]
    fn test_attr_flags() {
        let attrs = Attr::BOLD | Attr::UNDERLINE;
        assert!(attrs.contains(Attr::BOLD));
        assert!(!attrs.contains(Attr::DIM));
    }
}
