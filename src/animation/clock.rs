//! Animation Clock - Shared time source for every animation on a page.
//!
//! All motion on a page samples the same clock so that elements started in
//! the same frame stay in sync.
//!
//! # Pattern
//!
//! - The clock only advances while it has subscribers
//! - The first subscriber starts it, the last unsubscribe pauses it
//! - `now` is a signal, so derived views re-run when time moves
//!
//! # Example
//!
//! ```ignore
//! use spark_page::animation::AnimationClock;
//!
//! let clock = AnimationClock::new();
//! let unsubscribe = clock.subscribe();
//!
//! clock.advance(1.0 / 60.0);
//! assert!(clock.now() > 0.0);
//!
//! unsubscribe();
//! ```

use std::cell::Cell;
use std::rc::Rc;

use spark_signals::{signal, Signal};

/// Page-local animation clock (seconds since creation).
///
/// Cloning shares the same underlying time.
#[derive(Clone)]
pub struct AnimationClock {
    now: Signal<f64>,
    subscribers: Rc<Cell<usize>>,
}

impl AnimationClock {
    pub fn new() -> Self {
        Self {
            now: signal(0.0),
            subscribers: Rc::new(Cell::new(0)),
        }
    }

    /// Current time in seconds.
    pub fn now(&self) -> f64 {
        self.now.get()
    }

    /// The time signal, for reactive tracking.
    pub fn now_signal(&self) -> Signal<f64> {
        self.now.clone()
    }

    /// Subscribe to clock ticks.
    ///
    /// Returns an unsubscribe function. The clock advances only while at least
    /// one subscription is alive.
    pub fn subscribe(&self) -> Box<dyn FnOnce()> {
        self.subscribers.set(self.subscribers.get() + 1);
        if self.subscribers.get() == 1 {
            tracing::trace!(now = self.now(), "animation clock started");
        }

        let subscribers = self.subscribers.clone();
        Box::new(move || {
            subscribers.set(subscribers.get().saturating_sub(1));
            if subscribers.get() == 0 {
                tracing::trace!("animation clock paused");
            }
        })
    }

    /// Check if anything keeps the clock running.
    pub fn is_running(&self) -> bool {
        self.subscribers.get() > 0
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.get()
    }

    /// Advance by `dt` seconds.
    ///
    /// No-op while paused, or for negative / non-finite steps.
    pub fn advance(&self, dt: f64) {
        if !self.is_running() || !dt.is_finite() || dt <= 0.0 {
            return;
        }
        self.now.set(self.now.get() + dt);
    }

    /// Jump to an absolute time, regardless of subscribers.
    ///
    /// Time never runs backwards; earlier values are ignored.
    pub fn set_time(&self, seconds: f64) {
        if seconds.is_finite() && seconds > self.now.get() {
            self.now.set(seconds);
        }
    }
}

impl Default for AnimationClock {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subscribe_returns_unsubscribe() {
        let clock = AnimationClock::new();

        let unsubscribe = clock.subscribe();
        assert_eq!(clock.subscriber_count(), 1);
        assert!(clock.is_running());

        unsubscribe();
        assert_eq!(clock.subscriber_count(), 0);
        assert!(!clock.is_running());
    }

    #[test]
    fn test_paused_clock_does_not_advance() {
        let clock = AnimationClock::new();

        clock.advance(0.5);
        assert_eq!(clock.now(), 0.0);

        let _unsub = clock.subscribe();
        clock.advance(0.5);
        assert_eq!(clock.now(), 0.5);
    }

    #[test]
    fn test_shared_between_clones() {
        let clock = AnimationClock::new();
        let other = clock.clone();

        let unsub1 = clock.subscribe();
        let unsub2 = other.subscribe();
        assert_eq!(clock.subscriber_count(), 2);

        other.advance(0.25);
        assert_eq!(clock.now(), 0.25);

        unsub1();
        assert!(clock.is_running());
        unsub2();
        assert!(!other.is_running());
    }

    #[test]
    fn test_invalid_steps_ignored() {
        let clock = AnimationClock::new();
        let _unsub = clock.subscribe();

        clock.advance(-1.0);
        clock.advance(f64::NAN);
        clock.advance(f64::INFINITY);
        assert_eq!(clock.now(), 0.0);
    }

    #[test]
    fn test_set_time_monotonic() {
        let clock = AnimationClock::new();

        clock.set_time(2.0);
        assert_eq!(clock.now(), 2.0);

        clock.set_time(1.0);
        assert_eq!(clock.now(), 2.0);
    }
}
