//! Hover Module - Per-element hover and press state.
//!
//! Each interactive element owns a [`HoverState`]: a two-state machine
//! (resting / hovered) driven by pointer enter and leave, plus a pressed flag
//! for the tap pulse. Instances never coordinate with each other.

use spark_signals::{signal, Signal};

/// Hover phase of one element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlipPhase {
    #[default]
    Resting,
    Hovered,
}

pub struct HoverState {
    phase: Signal<FlipPhase>,
    pressed: Signal<bool>,
}

impl HoverState {
    pub fn new() -> Self {
        Self {
            phase: signal(FlipPhase::Resting),
            pressed: signal(false),
        }
    }

    /// Pointer entered. Returns true if the phase changed.
    pub fn hover_start(&self) -> bool {
        self.transition_to(FlipPhase::Hovered)
    }

    /// Pointer left. Returns true if the phase changed.
    pub fn hover_end(&self) -> bool {
        self.transition_to(FlipPhase::Resting)
    }

    fn transition_to(&self, next: FlipPhase) -> bool {
        if self.phase.get() == next {
            return false;
        }
        self.phase.set(next);
        true
    }

    /// Pointer pressed. Returns true if the flag changed.
    pub fn press(&self) -> bool {
        if self.pressed.get() {
            return false;
        }
        self.pressed.set(true);
        true
    }

    /// Pointer released. Returns true if the flag changed.
    pub fn release(&self) -> bool {
        if !self.pressed.get() {
            return false;
        }
        self.pressed.set(false);
        true
    }

    pub fn phase(&self) -> FlipPhase {
        self.phase.get()
    }

    pub fn is_hovered(&self) -> bool {
        self.phase() == FlipPhase::Hovered
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed.get()
    }

    pub fn phase_signal(&self) -> Signal<FlipPhase> {
        self.phase.clone()
    }
}

impl Default for HoverState {
    fn default() -> Self {
        Self::new()
    }
}
