//! Gesture Motion - Hover, tap and focus feedback for one element.
//!
//! An element lists the motion it takes while hovered, pressed and focused
//! ([`GestureTargets`]). Whenever one of those states changes the element
//! retargets to the strongest active variant:
//!
//! ```text
//! pressed + tap   → tap
//! focused + focus → focus
//! hovered + hover → hover
//! otherwise       → rest
//! ```
//!
//! Gesture values sit on top of the element's entrance motion; callers stack
//! them with [`MotionValues::stack`].

use spark_signals::{Signal, signal};

use crate::animation::{AnimationClock, MotionControls, MotionValues, Transition};
use crate::config::GestureTargets;
use crate::state::HoverState;

pub struct GestureMotion {
    targets: GestureTargets,
    transition: Transition,
    hover: HoverState,
    focused: Signal<bool>,
    controls: MotionControls,
}

impl GestureMotion {
    pub fn new(targets: GestureTargets, transition: Transition, clock: AnimationClock) -> Self {
        Self {
            targets,
            transition,
            hover: HoverState::new(),
            focused: signal(false),
            controls: MotionControls::new(clock, MotionValues::REST),
        }
    }

    pub fn hover_start(&self) {
        if self.hover.hover_start() {
            self.retarget();
        }
    }

    pub fn hover_end(&self) {
        if self.hover.hover_end() {
            self.retarget();
        }
    }

    pub fn press(&self) {
        if self.hover.press() {
            self.retarget();
        }
    }

    pub fn release(&self) {
        if self.hover.release() {
            self.retarget();
        }
    }

    pub fn focus(&self) {
        if !self.focused.get() {
            self.focused.set(true);
            self.retarget();
        }
    }

    pub fn blur(&self) {
        if self.focused.get() {
            self.focused.set(false);
            self.retarget();
        }
    }

    pub fn is_hovered(&self) -> bool {
        self.hover.is_hovered()
    }

    pub fn is_pressed(&self) -> bool {
        self.hover.is_pressed()
    }

    pub fn is_focused(&self) -> bool {
        self.focused.get()
    }

    /// Variant the element should be heading to right now.
    fn wanted(&self) -> MotionValues {
        let active = |on: bool, values: Option<MotionValues>| values.filter(|_| on);

        active(self.hover.is_pressed(), self.targets.tap)
            .or_else(|| active(self.focused.get(), self.targets.focus))
            .or_else(|| active(self.hover.is_hovered(), self.targets.hover))
            .unwrap_or(MotionValues::REST)
    }

    fn retarget(&self) {
        let wanted = self.wanted();
        if wanted != self.controls.target() {
            self.controls.start(wanted, self.transition);
        }
    }

    pub fn values(&self) -> MotionValues {
        self.controls.values()
    }

    pub fn target(&self) -> MotionValues {
        self.controls.target()
    }

    pub fn is_animating(&self) -> bool {
        self.controls.is_animating()
    }
}
