//! Hover Flip Link - Nav link that flips over on hover.
//!
//! Two copies of the label are stacked in the same spot. The front layer is
//! visible at rest; the back layer is pre-rotated 180° around the x axis so
//! it faces away. Hovering turns the link over and cross-fades the layers;
//! leaving turns it back. Pressing adds a short scale + rotate pulse.
//!
//! ```text
//!            hover_start
//!  Resting ──────────────▶ Hovered
//!     ▲                       │
//!     └───────────────────────┘
//!             hover_end
//! ```

use crate::animation::{AnimationClock, MotionControls, MotionValues};
use crate::config::FlipConfig;
use crate::state::{FlipPhase, HoverState};

/// Snapshot of everything needed to draw a flip link.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlipVisual {
    /// Transform of the link as a whole (flip + tap pulse).
    pub link: MotionValues,
    pub front_opacity: f32,
    pub back_opacity: f32,
    pub bold: bool,
    pub pressed: bool,
}

impl FlipVisual {
    /// The layer currently facing the viewer.
    pub fn facing_back(&self) -> bool {
        self.link.shows_back_face()
    }
}

pub struct FlipLink {
    label: String,
    href: String,
    config: FlipConfig,
    hover: HoverState,
    /// Flip rotation (the link's animate controls).
    flip: MotionControls,
    /// Tap pulse, layered on top of the flip.
    tap: MotionControls,
    /// Front layer opacity; the back layer mirrors it.
    front: MotionControls,
}

impl FlipLink {
    pub fn new(label: &str, href: &str, config: FlipConfig, clock: AnimationClock) -> Self {
        Self {
            label: label.to_string(),
            href: href.to_string(),
            config,
            hover: HoverState::new(),
            flip: MotionControls::new(clock.clone(), MotionValues::REST),
            tap: MotionControls::new(clock.clone(), MotionValues::REST),
            front: MotionControls::new(clock, MotionValues::REST),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn href(&self) -> &str {
        &self.href
    }

    pub fn phase(&self) -> FlipPhase {
        self.hover.phase()
    }

    pub fn is_hovered(&self) -> bool {
        self.hover.is_hovered()
    }

    pub fn hover_start(&self) {
        if self.hover.hover_start() {
            self.flip.start(
                MotionValues::REST.rotate_x(self.config.flip_degrees),
                self.config.flip,
            );
            self.front
                .start(MotionValues::REST.opacity(0.0), self.config.layer_fade);
        }
    }

    pub fn hover_end(&self) {
        if self.hover.hover_end() {
            self.flip.start(MotionValues::REST, self.config.flip);
            self.front.start(MotionValues::REST, self.config.layer_fade);
        }
    }

    pub fn press(&self) {
        if self.hover.press() {
            self.tap.start(
                MotionValues::REST
                    .scale(self.config.tap_scale)
                    .rotate(self.config.tap_rotate),
                self.config.tap,
            );
        }
    }

    pub fn release(&self) {
        if self.hover.release() {
            self.tap.start(MotionValues::REST, self.config.tap);
        }
    }

    pub fn is_pressed(&self) -> bool {
        self.hover.is_pressed()
    }

    pub fn is_animating(&self) -> bool {
        self.flip.is_animating() || self.tap.is_animating() || self.front.is_animating()
    }

    /// Current visual state.
    pub fn visual(&self) -> FlipVisual {
        let flip = self.flip.values();
        let tap = self.tap.values();
        let front_opacity = self.front.values().opacity;

        FlipVisual {
            link: flip.scale(tap.scale).rotate(tap.rotate),
            front_opacity,
            back_opacity: 1.0 - front_opacity,
            bold: self.hover.is_hovered(),
            pressed: self.hover.is_pressed(),
        }
    }

    /// Visual state once every running animation has settled.
    pub fn resting_visual(&self) -> FlipVisual {
        let flip = self.flip.target();
        let tap = self.tap.target();
        let front_opacity = self.front.target().opacity;

        FlipVisual {
            link: flip.scale(tap.scale).rotate(tap.rotate),
            front_opacity,
            back_opacity: 1.0 - front_opacity,
            bold: self.hover.is_hovered(),
            pressed: self.hover.is_pressed(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (AnimationClock, FlipLink) {
        let clock = AnimationClock::new();
        let link = FlipLink::new("Home", "#home", FlipConfig::default(), clock.clone());
        (clock, link)
    }

    #[test]
    fn test_resting_visual() {
        let (_clock, link) = setup();
        let visual = link.visual();

        assert_eq!(visual.link, MotionValues::REST);
        assert_eq!(visual.front_opacity, 1.0);
        assert_eq!(visual.back_opacity, 0.0);
        assert!(!visual.bold);
        assert!(!visual.facing_back());
    }

    #[test]
    fn test_hover_flips_to_back() {
        let (clock, link) = setup();

        link.hover_start();
        assert_eq!(link.phase(), FlipPhase::Hovered);

        clock.set_time(1.0);
        let visual = link.visual();
        assert_eq!(visual.link.rotate_x, 180.0);
        assert_eq!(visual.front_opacity, 0.0);
        assert_eq!(visual.back_opacity, 1.0);
        assert!(visual.bold);
        assert!(visual.facing_back());
    }

    #[test]
    fn test_enter_leave_round_trip() {
        let (clock, link) = setup();
        let before = link.visual();

        link.hover_start();
        link.hover_end();

        assert_eq!(link.visual(), before);
        clock.set_time(1.0);
        assert_eq!(link.visual(), before);
        assert!(!link.is_animating());
    }

    #[test]
    fn test_leave_midway_reverses() {
        let (clock, link) = setup();

        link.hover_start();
        clock.set_time(0.05);
        let midway = link.visual().link.rotate_x;
        assert!(midway > 0.0 && midway < 180.0);

        link.hover_end();
        clock.set_time(1.0);
        assert_eq!(link.visual().link.rotate_x, 0.0);
        assert_eq!(link.visual().front_opacity, 1.0);
    }

    #[test]
    fn test_flip_springs_past_target_and_fades_linearly() {
        let (clock, link) = setup();

        link.hover_start();
        clock.set_time(0.15);
        let visual = link.visual();
        assert!(visual.link.rotate_x > 180.0);
        assert!((visual.front_opacity - 0.5).abs() < 1e-4);

        clock.set_time(1.0);
        assert_eq!(link.visual().link.rotate_x, 180.0);
    }

    #[test]
    fn test_tap_pulse() {
        let (clock, link) = setup();

        link.press();
        clock.set_time(1.0);
        let pressed = link.visual();
        assert_eq!(pressed.link.scale, 0.95);
        assert_eq!(pressed.link.rotate, 5.0);
        assert!(pressed.pressed);

        link.release();
        clock.set_time(2.0);
        assert_eq!(link.visual().link, MotionValues::REST);
    }

    #[test]
    fn test_resting_visual_targets() {
        let (_clock, link) = setup();

        link.hover_start();
        let target = link.resting_visual();
        assert_eq!(target.link.rotate_x, 180.0);
        assert_eq!(target.back_opacity, 1.0);
    }
}
