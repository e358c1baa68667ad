//! # spark-page
//!
//! Reactive, animated single-page shell with a terminal preview.
//!
//! Built on [spark-signals](https://github.com/RLabs-Inc/spark-signals) for fine-grained reactivity
//! and [Taffy](https://github.com/DioxusLabs/taffy) for flexbox layout.
//!
//! ## Architecture
//!
//! A [`PageShell`] owns every piece of page state as signals: scroll position,
//! header visibility, the navigation menu and its scroll lock, one-shot
//! viewport reveals and the hover state of each nav link. All motion samples
//! one shared [`AnimationClock`](animation::AnimationClock).
//!
//! The terminal preview is purely derived-based:
//! ```text
//! PageShell signals → PageLayout + PageView → frame derived → tick → diff renderer
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Colors, cells, rectangles
//! - [`config`] - Page content, motion timings, preview settings (TOML)
//! - [`animation`] - Transitions, motion values, controls, the clock
//! - [`state`] - Scroll, menu, reveal, hover, mouse and input state
//! - [`primitives`] - Animated text, flip links, motion elements
//! - [`layout`] - Responsive page layout on Taffy
//! - [`page`] - The composed page shell and its view snapshot
//! - [`renderer`] - Painter, frame buffer, diff renderer
//! - [`pipeline`] - Frame derived, mount and event loop
//! - [`logging`] - Tracing setup

pub mod animation;
pub mod config;
pub mod error;
pub mod layout;
pub mod logging;
pub mod page;
pub mod pipeline;
pub mod primitives;
pub mod renderer;
pub mod state;
pub mod types;

// Re-export commonly used items
pub use types::*;

pub use config::{ContentConfig, MotionConfig, PageConfig, PreviewConfig};
pub use error::{PageError, Result};

pub use animation::{AnimationClock, MotionControls, MotionValues, Transition};

pub use layout::{LayoutMetrics, PageLayout, compute_page_layout, string_width, wrap_text};

pub use page::{PageShell, PageView, SectionId};

pub use pipeline::{MountHandle, mount, mount_headless, run, tick, unmount};

pub use primitives::{FlipLink, MotionElement, MotionTrigger, animated_text};

pub use renderer::{DiffRenderer, Frame, FrameBuffer, paint};

pub use state::{
    DocumentRoot, HitTarget, InViewTracker, MenuController, PageEvent, PageKey, ScrollTracker,
    ViewportRevealTracker,
};
