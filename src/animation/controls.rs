//! Animations and imperative motion controls.
//!
//! An [`Animation`] is one run from a start value to a target, pinned to the
//! clock time it started at. [`MotionControls`] owns the current animation of
//! an element and retargets it: starting a new target always begins from
//! wherever the element is right now, so interrupted animations never jump.

use spark_signals::{Signal, signal};

use super::clock::AnimationClock;
use super::transition::Transition;
use super::values::MotionValues;

// =============================================================================
// ANIMATION
// =============================================================================

/// One run from `from` to `to`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Animation {
    from: MotionValues,
    to: MotionValues,
    transition: Transition,
    started_at: f64,
}

impl Animation {
    pub fn new(from: MotionValues, to: MotionValues, transition: Transition, started_at: f64) -> Self {
        Self {
            from,
            to,
            transition,
            started_at,
        }
    }

    /// An animation that is already finished at `values`.
    pub fn at_rest(values: MotionValues) -> Self {
        Self::new(values, values, Transition::instant(), 0.0)
    }

    /// Values at clock time `now`.
    pub fn sample(&self, now: f64) -> MotionValues {
        if self.is_finished(now) {
            return self.to;
        }
        let elapsed = (now - self.started_at) as f32;
        MotionValues::lerp(&self.from, &self.to, self.transition.progress(elapsed))
    }

    pub fn is_finished(&self, now: f64) -> bool {
        self.from == self.to || self.transition.is_complete((now - self.started_at) as f32)
    }

    pub fn target(&self) -> MotionValues {
        self.to
    }

    pub fn started_at(&self) -> f64 {
        self.started_at
    }
}

// =============================================================================
// MOTION CONTROLS
// =============================================================================

/// Imperative animation handle for a single element.
///
/// The running animation is a signal, so anything derived from `values()`
/// re-runs when the element is retargeted as well as when time moves.
pub struct MotionControls {
    clock: AnimationClock,
    current: Signal<Animation>,
}

impl MotionControls {
    /// Create controls resting at `initial`.
    pub fn new(clock: AnimationClock, initial: MotionValues) -> Self {
        Self {
            clock,
            current: signal(Animation::at_rest(initial)),
        }
    }

    /// Animate towards `target` from the current sampled value.
    pub fn start(&self, target: MotionValues, transition: Transition) {
        let now = self.clock.now();
        let from = self.current.get().sample(now);
        self.current.set(Animation::new(from, target, transition, now));
    }

    /// Jump to `values` without animating.
    pub fn set(&self, values: MotionValues) {
        self.current.set(Animation::at_rest(values));
    }

    /// Current values (reads the clock signal).
    pub fn values(&self) -> MotionValues {
        self.current.get().sample(self.clock.now())
    }

    /// Where the element is heading.
    pub fn target(&self) -> MotionValues {
        self.current.get().target()
    }

    pub fn is_animating(&self) -> bool {
        !self.current.get().is_finished(self.clock.now())
    }
}

// =============================================================================
// TESTS
// =============================================================================
