//! Motion values - The animatable visual properties of an element.

use serde::Deserialize;

/// Animatable properties of one element.
///
/// Offsets are in page pixels, rotations in degrees. The default is the
/// resting state: fully opaque, unscaled, untranslated.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct MotionValues {
    pub opacity: f32,
    pub x: f32,
    pub y: f32,
    pub scale: f32,
    pub rotate: f32,
    pub rotate_x: f32,
}

impl MotionValues {
    pub const REST: Self = Self {
        opacity: 1.0,
        x: 0.0,
        y: 0.0,
        scale: 1.0,
        rotate: 0.0,
        rotate_x: 0.0,
    };

    pub const fn opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    pub const fn x(mut self, x: f32) -> Self {
        self.x = x;
        self
    }

    pub const fn y(mut self, y: f32) -> Self {
        self.y = y;
        self
    }

    pub const fn scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    pub const fn rotate(mut self, rotate: f32) -> Self {
        self.rotate = rotate;
        self
    }

    pub const fn rotate_x(mut self, rotate_x: f32) -> Self {
        self.rotate_x = rotate_x;
        self
    }

    /// Interpolate between two targets.
    ///
    /// `t` may leave 0..=1 (spring overshoot); opacity is clamped, everything
    /// else follows the overshoot. Equal endpoints always return `from`.
    pub fn lerp(from: &Self, to: &Self, t: f32) -> Self {
        let mix = |a: f32, b: f32| if a == b { a } else { a + (b - a) * t };
        Self {
            opacity: mix(from.opacity, to.opacity).clamp(0.0, 1.0),
            x: mix(from.x, to.x),
            y: mix(from.y, to.y),
            scale: mix(from.scale, to.scale),
            rotate: mix(from.rotate, to.rotate),
            rotate_x: mix(from.rotate_x, to.rotate_x),
        }
    }

    /// Layer `child` on top of `self` (parent then child).
    ///
    /// Offsets and rotations add, opacity and scale multiply.
    pub fn stack(&self, child: &Self) -> Self {
        Self {
            opacity: self.opacity * child.opacity,
            x: self.x + child.x,
            y: self.y + child.y,
            scale: self.scale * child.scale,
            rotate: self.rotate + child.rotate,
            rotate_x: self.rotate_x + child.rotate_x,
        }
    }

    /// True when the element is turned far enough to show its back face.
    pub fn shows_back_face(&self) -> bool {
        let turned = self.rotate_x.rem_euclid(360.0);
        turned > 90.0 && turned < 270.0
    }
}

impl Default for MotionValues {
    fn default() -> Self {
        Self::REST
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp_midpoint() {
        let from = MotionValues::REST.opacity(0.0).x(-20.0);
        let mid = MotionValues::lerp(&from, &MotionValues::REST, 0.5);

        assert_eq!(mid.opacity, 0.5);
        assert_eq!(mid.x, -10.0);
        assert_eq!(mid.scale, 1.0);
    }

    #[test]
    fn test_lerp_overshoot_clamps_opacity_only() {
        let from = MotionValues::REST.opacity(0.0).y(10.0);
        let over = MotionValues::lerp(&from, &MotionValues::REST, 1.1);

        assert_eq!(over.opacity, 1.0);
        assert!(over.y < 0.0);
    }

    #[test]
    fn test_lerp_equal_endpoints_exact() {
        let values = MotionValues::REST.rotate_x(180.0).scale(0.95);
        assert_eq!(MotionValues::lerp(&values, &values, 0.37), values);
    }

    #[test]
    fn test_stack_rest_is_identity() {
        let lifted = MotionValues::REST.y(-10.0).scale(1.03);
        assert_eq!(MotionValues::REST.stack(&lifted), lifted);
        assert_eq!(lifted.stack(&MotionValues::REST), lifted);

        let faded = MotionValues::REST.opacity(0.5).x(4.0);
        let both = faded.stack(&lifted);
        assert_eq!(both.opacity, 0.5);
        assert_eq!(both.x, 4.0);
        assert_eq!(both.y, -10.0);
    }

    #[test]
    fn test_back_face() {
        assert!(!MotionValues::REST.shows_back_face());
        assert!(MotionValues::REST.rotate_x(180.0).shows_back_face());
        assert!(!MotionValues::REST.rotate_x(360.0).shows_back_face());
    }
}
