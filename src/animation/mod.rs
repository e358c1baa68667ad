//! Animation layer.
//!
//! Timing and targets are plain data; nothing here knows how an element is
//! drawn. The page samples animations against a shared [`AnimationClock`] and
//! hands the resulting [`MotionValues`] to whatever renders them.
//!
//! - [`transition`] - Springs, tweens, easing, repeat
//! - [`values`] - Animatable properties (opacity, offsets, scale, rotation)
//! - [`controls`] - Animation runs and imperative per-element controls
//! - [`clock`] - Shared time source

pub mod clock;
pub mod controls;
pub mod transition;
pub mod values;

pub use clock::AnimationClock;
pub use controls::{Animation, MotionControls};
pub use transition::{Easing, Repeat, Transition, TransitionKind};
pub use values::MotionValues;
