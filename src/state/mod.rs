//! State Module - Interaction state of the page
//!
//! - **Scroll** - scrolled flag and header visibility from scroll position
//! - **Menu** - navigation overlay with a scoped page scroll lock
//! - **Reveal** - one-shot viewport latches and in-view flags
//! - **Hover** - per-element hover/press state machines
//! - **Mouse** - hit grid and pointer enter/leave for the terminal preview
//! - **Input** - crossterm event conversion

pub mod hover;
pub mod input;
pub mod menu;
pub mod mouse;
pub mod reveal;
pub mod scroll;

pub use hover::{FlipPhase, HoverState};
pub use input::{PageEvent, PageKey};
pub use menu::{DocumentRoot, MenuController, Overflow, ScrollLock};
pub use mouse::{HitGrid, HitRegion, HitTarget, HoverChange, PointerTracker};
pub use reveal::{InViewTracker, RevealLatch, ViewportRevealTracker, intersection_ratio};
pub use scroll::{ScrollDirection, ScrollTracker};
