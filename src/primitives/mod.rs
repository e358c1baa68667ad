//! Page Primitives - Animated building blocks.
//!
//! - [`animated_text`] - per-character staggered text entrance
//! - [`flip_link`] - nav link with a 3D hover flip and tap pulse
//! - [`gesture`] - hover / tap / focus feedback for buttons, cards, links and fields
//! - [`motion`] - declarative entrance animation with mount / latch / in-view triggers
//!
//! Primitives only produce motion values; the painter decides how to draw them.

pub mod animated_text;
pub mod flip_link;
pub mod gesture;
pub mod motion;

pub use animated_text::{AnimatedLetter, AnimatedText, NBSP, animated_text};
pub use flip_link::{FlipLink, FlipVisual};
pub use gesture::GestureMotion;
pub use motion::{MotionElement, MotionTrigger};
