//! Reveal Module - Viewport intersection trackers.
//!
//! - [`ViewportRevealTracker`] - one-shot latch: flips to triggered the first
//!   time its region is visible enough, then stops observing for good
//! - [`InViewTracker`] - plain in-view flag that follows the region both ways
//!
//! Visibility is the fraction of the element's area inside the viewport.
//! Trackers are independent: nothing orders one tracker's checks relative to
//! another's.

use std::cell::Cell;

use spark_signals::{signal, Signal};

use crate::config::RevealConfig;
use crate::types::Rect;

// =============================================================================
// INTERSECTION
// =============================================================================

/// Fraction of `element` visible inside `viewport` (0.0 - 1.0).
///
/// Zero-area elements report 0.0.
pub fn intersection_ratio(element: &Rect, viewport: &Rect) -> f32 {
    let area = element.area();
    if area <= 0.0 {
        return 0.0;
    }
    match element.intersect(viewport) {
        Some(visible) => (visible.area() / area).clamp(0.0, 1.0),
        None => 0.0,
    }
}

/// Amount 0.0 means "any pixel visible".
fn meets_threshold(ratio: f32, amount: f32) -> bool {
    if amount <= 0.0 {
        ratio > 0.0
    } else {
        ratio >= amount.min(1.0)
    }
}

// =============================================================================
// ONE-SHOT LATCH
// =============================================================================

/// Lifecycle of a one-shot reveal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RevealLatch {
    /// Not watching the viewport.
    #[default]
    Unobserved,
    /// Watching, not yet visible enough.
    Observing,
    /// Seen once. Terminal state.
    Triggered,
}

/// Latches true the first time a region becomes visible enough.
pub struct ViewportRevealTracker {
    name: &'static str,
    amount: f32,
    state: Cell<RevealLatch>,
    triggered: Signal<bool>,
}

impl ViewportRevealTracker {
    pub fn new(name: &'static str, config: &RevealConfig) -> Self {
        Self {
            name,
            amount: config.amount,
            state: Cell::new(RevealLatch::Unobserved),
            triggered: signal(false),
        }
    }

    /// Start observing. Has no effect once triggered.
    pub fn observe(&self) {
        if self.state.get() == RevealLatch::Unobserved {
            self.state.set(RevealLatch::Observing);
        }
    }

    /// Report the element and viewport rectangles.
    ///
    /// Returns true when this call triggered the latch. Ignored unless the
    /// tracker is observing.
    pub fn check(&self, element: &Rect, viewport: &Rect) -> bool {
        if self.state.get() != RevealLatch::Observing {
            return false;
        }

        let ratio = intersection_ratio(element, viewport);
        if !meets_threshold(ratio, self.amount) {
            return false;
        }

        self.state.set(RevealLatch::Triggered);
        self.triggered.set(true);
        tracing::debug!(section = self.name, ratio, "section revealed");
        true
    }

    /// Stop observing (teardown). A triggered latch stays triggered.
    pub fn disconnect(&self) {
        if self.state.get() == RevealLatch::Observing {
            self.state.set(RevealLatch::Unobserved);
        }
    }

    pub fn state(&self) -> RevealLatch {
        self.state.get()
    }

    pub fn is_observing(&self) -> bool {
        self.state.get() == RevealLatch::Observing
    }

    pub fn is_triggered(&self) -> bool {
        self.triggered.get()
    }

    pub fn triggered_signal(&self) -> Signal<bool> {
        self.triggered.clone()
    }
}

// =============================================================================
// IN-VIEW FLAG
// =============================================================================

/// Tracks whether a region is currently visible enough. Not latched.
///
/// Uses the config's `in_view_amount`, which defaults to any visible pixel.
pub struct InViewTracker {
    amount: f32,
    in_view: Signal<bool>,
}

impl InViewTracker {
    pub fn new(config: &RevealConfig) -> Self {
        Self {
            amount: config.in_view_amount,
            in_view: signal(false),
        }
    }

    /// Report the element and viewport rectangles. Returns the new state.
    pub fn check(&self, element: &Rect, viewport: &Rect) -> bool {
        let visible = meets_threshold(intersection_ratio(element, viewport), self.amount);
        if visible != self.in_view.get() {
            self.in_view.set(visible);
        }
        visible
    }

    pub fn is_in_view(&self) -> bool {
        self.in_view.get()
    }

    pub fn in_view_signal(&self) -> Signal<bool> {
        self.in_view.clone()
    }
}
