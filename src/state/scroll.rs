//! Scroll State Module - Header visibility driven by page scroll.
//!
//! Tracks the vertical scroll position of the page:
//! - `scrolled` - page has left the very top (solid header background)
//! - `header_visible` - header slides away while scrolling down and returns
//!   when scrolling up
//!
//! The header only flips after the page has moved more than the hide
//! threshold since the last recorded position, so small jitter never makes it
//! flicker.
//!
//! Architecture:
//! - `last_y` / `direction` = component-local cells (not render state)
//! - `scrolled` / `header_visible` = signals read by the view

use std::cell::Cell;

use spark_signals::{signal, Signal};

use crate::config::ScrollConfig;

// =============================================================================
// TYPES
// =============================================================================

/// Scroll direction relative to the last recorded position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollDirection {
    #[default]
    Up,
    Down,
}

// =============================================================================
// SCROLL TRACKER
// =============================================================================

/// Derives `scrolled` and `header_visible` from a stream of scroll positions.
pub struct ScrollTracker {
    config: ScrollConfig,
    last_y: Cell<f64>,
    direction: Cell<ScrollDirection>,
    position: Signal<f64>,
    scrolled: Signal<bool>,
    header_visible: Signal<bool>,
}

impl ScrollTracker {
    pub fn new(config: ScrollConfig) -> Self {
        Self {
            config,
            last_y: Cell::new(0.0),
            direction: Cell::new(ScrollDirection::Up),
            position: signal(0.0),
            scrolled: signal(false),
            header_visible: signal(true),
        }
    }

    /// Feed a new scroll position.
    ///
    /// Non-finite positions are ignored.
    pub fn update(&self, position: f64) {
        if !position.is_finite() {
            tracing::trace!(position, "ignoring non-finite scroll position");
            return;
        }

        self.position.set(position);
        self.scrolled.set(position > self.config.scrolled_threshold);

        let last = self.last_y.get();
        if position > last {
            self.direction.set(ScrollDirection::Down);
        } else if position < last {
            self.direction.set(ScrollDirection::Up);
        }

        if (position - last).abs() > self.config.hide_threshold {
            let visible = self.direction.get() == ScrollDirection::Up;
            if visible != self.header_visible.get() {
                tracing::debug!(position, visible, "header visibility changed");
            }
            self.header_visible.set(visible);
            self.last_y.set(position);
        }
    }

    /// Latest accepted position.
    pub fn position(&self) -> f64 {
        self.position.get()
    }

    pub fn scrolled(&self) -> bool {
        self.scrolled.get()
    }

    pub fn header_visible(&self) -> bool {
        self.header_visible.get()
    }

    pub fn direction(&self) -> ScrollDirection {
        self.direction.get()
    }

    /// Position at which the header last re-evaluated its visibility.
    pub fn last_recorded(&self) -> f64 {
        self.last_y.get()
    }

    /// Header y offset for the current visibility.
    pub fn header_offset(&self) -> f32 {
        if self.header_visible() {
            0.0
        } else {
            self.config.hidden_offset
        }
    }

    pub fn scrolled_signal(&self) -> Signal<bool> {
        self.scrolled.clone()
    }

    pub fn header_visible_signal(&self) -> Signal<bool> {
        self.header_visible.clone()
    }
}

impl Default for ScrollTracker {
    fn default() -> Self {
        Self::new(ScrollConfig::default())
    }
}
