//! Motion Element - Declarative entrance animation for one element.
//!
//! An element declares where it starts (`initial`), where it should end up
//! (`animate`) and how it gets there (`transition`). A [`MotionTrigger`]
//! decides when it moves:
//!
//! - `Mount` - immediately on creation
//! - `Latch` - when a one-shot reveal latch fires; stays shown afterwards
//! - `InView` - follows an in-view flag both ways

use std::cell::Cell;

use spark_signals::Signal;

use crate::animation::{AnimationClock, MotionControls, MotionValues, Transition};

/// When a motion element plays.
#[derive(Clone)]
pub enum MotionTrigger {
    Mount,
    Latch(Signal<bool>),
    InView(Signal<bool>),
}

pub struct MotionElement {
    initial: MotionValues,
    animate: MotionValues,
    transition: Transition,
    trigger: MotionTrigger,
    controls: MotionControls,
    shown: Cell<bool>,
}

impl MotionElement {
    pub fn new(
        clock: AnimationClock,
        initial: MotionValues,
        animate: MotionValues,
        transition: Transition,
        trigger: MotionTrigger,
    ) -> Self {
        let element = Self {
            initial,
            animate,
            transition,
            trigger,
            controls: MotionControls::new(clock, initial),
            shown: Cell::new(false),
        };
        element.sync();
        element
    }

    /// Shorthand for an element that enters on mount.
    pub fn on_mount(
        clock: AnimationClock,
        initial: MotionValues,
        transition: Transition,
    ) -> Self {
        Self::new(clock, initial, MotionValues::REST, transition, MotionTrigger::Mount)
    }

    /// Re-read the trigger and start the matching animation.
    ///
    /// Call after anything that may flip the trigger (scroll, resize).
    pub fn sync(&self) {
        let wanted = match &self.trigger {
            MotionTrigger::Mount => true,
            // A latch never un-fires, and neither does the element
            MotionTrigger::Latch(latch) => self.shown.get() || latch.get(),
            MotionTrigger::InView(in_view) => in_view.get(),
        };

        if wanted == self.shown.get() {
            return;
        }
        self.shown.set(wanted);

        if wanted {
            self.controls.start(self.animate, self.transition);
        } else {
            // Leaving: no per-item delay on the way out
            self.controls
                .start(self.initial, self.transition.with_delay(0.0));
        }
    }

    pub fn values(&self) -> MotionValues {
        self.controls.values()
    }

    pub fn is_shown(&self) -> bool {
        self.shown.get()
    }

    pub fn is_animating(&self) -> bool {
        self.controls.is_animating()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spark_signals::signal;

    fn hidden() -> MotionValues {
        MotionValues::REST.opacity(0.0).y(20.0)
    }

    #[test]
    fn test_mount_plays_immediately() {
        let clock = AnimationClock::new();
        let element = MotionElement::on_mount(clock.clone(), hidden(), Transition::tween(0.5));

        assert!(element.is_shown());
        assert_eq!(element.values(), hidden());

        clock.set_time(0.5);
        assert_eq!(element.values(), MotionValues::REST);
    }

    #[test]
    fn test_latch_waits_then_stays() {
        let clock = AnimationClock::new();
        let latch = signal(false);
        let element = MotionElement::new(
            clock.clone(),
            hidden(),
            MotionValues::REST,
            Transition::tween(0.5),
            MotionTrigger::Latch(latch.clone()),
        );

        clock.set_time(1.0);
        element.sync();
        assert!(!element.is_shown());
        assert_eq!(element.values(), hidden());

        latch.set(true);
        element.sync();
        clock.set_time(2.0);
        assert_eq!(element.values(), MotionValues::REST);

        // Even if the flag were cleared, a latched element stays
        latch.set(false);
        element.sync();
        assert!(element.is_shown());
    }

    #[test]
    fn test_in_view_follows_both_ways() {
        let clock = AnimationClock::new();
        let in_view = signal(false);
        let element = MotionElement::new(
            clock.clone(),
            hidden(),
            MotionValues::REST,
            Transition::tween(0.5).with_delay(0.2),
            MotionTrigger::InView(in_view.clone()),
        );

        in_view.set(true);
        element.sync();
        clock.set_time(1.0);
        assert_eq!(element.values(), MotionValues::REST);

        in_view.set(false);
        element.sync();
        clock.set_time(1.5);
        assert_eq!(element.values(), hidden());
    }
}
