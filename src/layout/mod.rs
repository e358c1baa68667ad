//! Layout Module
//!
//! Flexbox layout of the page using [Taffy](https://github.com/DioxusLabs/taffy).
//!
//! # Architecture
//!
//! 1. Content config → Taffy nodes (one tree each for header, document, menu)
//! 2. Text leaves measured by wrapping at the available width
//! 3. Computed layout read back as absolute rectangles in page pixels
//!
//! Layout is pure: the same content and viewport always produce the same
//! [`PageLayout`]. The shell recomputes it only when the viewport changes.
//!
//! # Example
//!
//! ```ignore
//! use spark_page::config::ContentConfig;
//! use spark_page::layout::{compute_page_layout, LayoutMetrics};
//!
//! let layout = compute_page_layout(&ContentConfig::default(), LayoutMetrics::default(), 1280.0, 800.0)?;
//! assert_eq!(layout.sections.len(), 5);
//! ```

mod page_layout;
mod text_measure;

pub use page_layout::*;
pub use text_measure::*;
