//! Renderer Module - From page state to terminal output.
//!
//! - [`paint`] - layout + view into a [`Frame`] (cells and hit regions)
//! - [`FrameBuffer`] - 2D grid of cells with drawing primitives
//! - [`DiffRenderer`] - writes only the cells that changed since last frame

mod buffer;
mod diff;
mod paint;

pub use buffer::{CONTINUATION, CellRect, FrameBuffer};
pub use diff::{DiffRenderer, to_color};
pub use paint::{Frame, paint};
