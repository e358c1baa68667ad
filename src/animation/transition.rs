//! Transitions - How a value travels from one target to another.
//!
//! A [`Transition`] maps elapsed seconds to a progress value. Progress starts
//! at 0.0 and settles at exactly 1.0; springs may overshoot on the way.
//!
//! Two kinds are supported:
//! - **Spring** - damped harmonic oscillator (stiffness, damping, mass)
//! - **Tween** - fixed duration with an easing curve
//!
//! Transitions are plain data so they can live in config files:
//!
//! ```toml
//! [motion.stagger.letter]
//! type = "spring"
//! stiffness = 100.0
//! damping = 12.0
//! ```

use serde::Deserialize;

/// Distance from the target at which a spring counts as settled.
const REST_DELTA: f32 = 0.001;

/// Lowest decay rate used when estimating spring settle time.
const MIN_DECAY_RATE: f32 = 1e-3;

// =============================================================================
// EASING
// =============================================================================

/// Easing curve for tweens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    Linear,
    EaseIn,
    EaseOut,
    #[default]
    EaseInOut,
}

impl Easing {
    /// Apply the curve to a linear progress in 0.0..=1.0.
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseIn => t * t * t,
            Easing::EaseOut => {
                let inv = 1.0 - t;
                1.0 - inv * inv * inv
            }
            Easing::EaseInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let inv = -2.0 * t + 2.0;
                    1.0 - inv * inv * inv / 2.0
                }
            }
        }
    }
}

// =============================================================================
// REPEAT
// =============================================================================

/// Repeat behavior once a tween reaches its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Repeat {
    /// Play once and rest at the target.
    #[default]
    Once,
    /// Play forever, alternating direction every cycle.
    Reverse,
}

// =============================================================================
// TRANSITION
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TransitionKind {
    Spring {
        stiffness: f32,
        damping: f32,
        #[serde(default = "default_mass")]
        mass: f32,
    },
    Tween {
        duration: f32,
        #[serde(default)]
        ease: Easing,
    },
}

fn default_mass() -> f32 {
    1.0
}

/// Timing description for one animation.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Transition {
    #[serde(flatten)]
    pub kind: TransitionKind,
    /// Seconds to wait before progress starts.
    #[serde(default)]
    pub delay: f32,
    #[serde(default)]
    pub repeat: Repeat,
}

impl Transition {
    /// Spring with unit mass.
    pub const fn spring(stiffness: f32, damping: f32) -> Self {
        Self {
            kind: TransitionKind::Spring {
                stiffness,
                damping,
                mass: 1.0,
            },
            delay: 0.0,
            repeat: Repeat::Once,
        }
    }

    /// Tween with the default ease-in-out curve.
    pub const fn tween(duration: f32) -> Self {
        Self {
            kind: TransitionKind::Tween {
                duration,
                ease: Easing::EaseInOut,
            },
            delay: 0.0,
            repeat: Repeat::Once,
        }
    }

    /// Zero-length transition: jumps straight to the target.
    pub const fn instant() -> Self {
        Self::tween(0.0)
    }

    pub const fn with_delay(mut self, delay: f32) -> Self {
        self.delay = delay;
        self
    }

    pub const fn with_ease(mut self, ease: Easing) -> Self {
        if let TransitionKind::Tween { duration, .. } = self.kind {
            self.kind = TransitionKind::Tween { duration, ease };
        }
        self
    }

    pub const fn repeat_reverse(mut self) -> Self {
        self.repeat = Repeat::Reverse;
        self
    }

    /// Progress at `elapsed` seconds after the transition was started.
    ///
    /// Returns 0.0 during the delay and exactly 1.0 once settled.
    pub fn progress(&self, elapsed: f32) -> f32 {
        if !elapsed.is_finite() {
            return 0.0;
        }
        let t = elapsed - self.delay;
        if t <= 0.0 {
            return 0.0;
        }

        match self.kind {
            TransitionKind::Tween { duration, ease } => {
                if duration <= 0.0 {
                    return 1.0;
                }
                match self.repeat {
                    Repeat::Once => ease.apply(t / duration),
                    Repeat::Reverse => {
                        let cycle = t / duration;
                        let pass = cycle.floor();
                        let frac = cycle - pass;
                        // Odd passes play backwards
                        if pass as u64 % 2 == 0 {
                            ease.apply(frac)
                        } else {
                            ease.apply(1.0 - frac)
                        }
                    }
                }
            }
            TransitionKind::Spring { stiffness, damping, mass } => {
                match spring_settle_time(stiffness, damping, mass) {
                    Some(settle) if t < settle => spring_position(stiffness, damping, mass, t),
                    _ => 1.0,
                }
            }
        }
    }

    /// Total running time including delay, `None` for endless repeats.
    pub fn duration(&self) -> Option<f32> {
        if self.repeat == Repeat::Reverse {
            return None;
        }
        let active = match self.kind {
            TransitionKind::Tween { duration, .. } => duration.max(0.0),
            TransitionKind::Spring { stiffness, damping, mass } => {
                spring_settle_time(stiffness, damping, mass).unwrap_or(0.0)
            }
        };
        Some(self.delay.max(0.0) + active)
    }

    /// Check whether the transition has reached its final value.
    pub fn is_complete(&self, elapsed: f32) -> bool {
        match self.duration() {
            Some(total) => elapsed >= total,
            None => false,
        }
    }
}

impl Default for Transition {
    fn default() -> Self {
        Self::tween(0.3)
    }
}

// =============================================================================
// SPRING MATH
// =============================================================================

/// Position of a unit step response (0 → 1, starting at rest) at time `t`.
fn spring_position(stiffness: f32, damping: f32, mass: f32, t: f32) -> f32 {
    let omega0 = (stiffness / mass).sqrt();
    let zeta = damping / (2.0 * (stiffness * mass).sqrt());

    if zeta < 1.0 {
        // Underdamped: oscillates around the target
        let omega_d = omega0 * (1.0 - zeta * zeta).sqrt();
        let envelope = (-zeta * omega0 * t).exp();
        1.0 - envelope * ((omega_d * t).cos() + (zeta * omega0 / omega_d) * (omega_d * t).sin())
    } else if zeta == 1.0 {
        1.0 - (-omega0 * t).exp() * (1.0 + omega0 * t)
    } else {
        let root = (zeta * zeta - 1.0).sqrt();
        let r1 = -omega0 * (zeta - root);
        let r2 = -omega0 * (zeta + root);
        1.0 - (r2 * (r1 * t).exp() - r1 * (r2 * t).exp()) / (r2 - r1)
    }
}

/// Time after which the spring stays within [`REST_DELTA`] of its target.
///
/// `None` when the parameters do not describe a spring (the value jumps).
fn spring_settle_time(stiffness: f32, damping: f32, mass: f32) -> Option<f32> {
    if !(stiffness > 0.0 && mass > 0.0 && damping >= 0.0) {
        return None;
    }

    let omega0 = (stiffness / mass).sqrt();
    let zeta = damping / (2.0 * (stiffness * mass).sqrt());

    let settle = if zeta < 1.0 {
        let omega_d = omega0 * (1.0 - zeta * zeta).sqrt();
        let amplitude = (1.0 + (zeta * omega0 / omega_d).powi(2)).sqrt();
        let rate = (zeta * omega0).max(MIN_DECAY_RATE);
        (amplitude / REST_DELTA).ln() / rate
    } else if zeta == 1.0 {
        let mut t = (1.0 / REST_DELTA).ln() / omega0;
        for _ in 0..64 {
            if (-omega0 * t).exp() * (1.0 + omega0 * t) <= REST_DELTA {
                break;
            }
            t *= 1.2;
        }
        t
    } else {
        let root = (zeta * zeta - 1.0).sqrt();
        let r1 = -omega0 * (zeta - root);
        let r2 = -omega0 * (zeta + root);
        let coefficient = (r2 / (r2 - r1)).abs();
        (coefficient / REST_DELTA).ln() / r1.abs().max(MIN_DECAY_RATE)
    };

    Some(settle.max(0.0))
}

// =============================================================================
// TESTS
// =============================================================================
