//! Differential renderer for fullscreen mode.
//!
//! The DiffRenderer compares the current frame to the previous frame and only
//! outputs cells that have changed.
//!
//! # Algorithm
//!
//! 1. Wrap output in a synchronized update
//! 2. For each cell in the new frame:
//!    - If previous frame exists, has the same size and the cell is unchanged: skip
//!    - Otherwise: write the cell, emitting only the style changes it needs
//! 3. Flush the writer once
//! 4. Store current frame as previous for next comparison

use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::{Attribute, Color, Print, SetAttribute, SetBackgroundColor, SetForegroundColor};
use crossterm::terminal::{BeginSynchronizedUpdate, EndSynchronizedUpdate};

use super::buffer::{CONTINUATION, FrameBuffer};
use crate::layout::char_width;
use crate::types::{Attr, Cell, Rgba};

/// Convert a color for crossterm.
pub fn to_color(color: Rgba) -> Color {
    if color.is_terminal_default() {
        Color::Reset
    } else {
        let channel = |c: i16| c.clamp(0, 255) as u8;
        Color::Rgb {
            r: channel(color.r),
            g: channel(color.g),
            b: channel(color.b),
        }
    }
}

// =============================================================================
// Stateful cell writer
// =============================================================================

/// Remembers the terminal's cursor and style so unchanged state is not re-sent.
#[derive(Debug, Default)]
struct CellWriter {
    cursor: Option<(u16, u16)>,
    fg: Option<Rgba>,
    bg: Option<Rgba>,
    attrs: Option<Attr>,
}

impl CellWriter {
    fn reset(&mut self) {
        *self = Self::default();
    }

    fn write_cell<W: Write>(&mut self, out: &mut W, x: u16, y: u16, cell: &Cell) -> io::Result<()> {
        if self.cursor != Some((x, y)) {
            queue!(out, MoveTo(x, y))?;
        }

        if self.attrs != Some(cell.attrs) {
            // Reset also clears colors.
            queue!(out, SetAttribute(Attribute::Reset))?;
            self.fg = None;
            self.bg = None;
            for (flag, attribute) in [
                (Attr::BOLD, Attribute::Bold),
                (Attr::DIM, Attribute::Dim),
                (Attr::ITALIC, Attribute::Italic),
                (Attr::UNDERLINE, Attribute::Underlined),
            ] {
                if cell.attrs.contains(flag) {
                    queue!(out, SetAttribute(attribute))?;
                }
            }
            self.attrs = Some(cell.attrs);
        }

        if self.fg != Some(cell.fg) {
            queue!(out, SetForegroundColor(to_color(cell.fg)))?;
            self.fg = Some(cell.fg);
        }
        if self.bg != Some(cell.bg) {
            queue!(out, SetBackgroundColor(to_color(cell.bg)))?;
            self.bg = Some(cell.bg);
        }

        queue!(out, Print(cell.ch))?;
        let advance = char_width(cell.ch).max(1);
        self.cursor = Some((x.saturating_add(advance), y));
        Ok(())
    }
}

// =============================================================================
// DiffRenderer
// =============================================================================

/// Differential renderer for fullscreen mode.
///
/// Keeps track of the previous frame to enable diff-based rendering.
/// Only cells that have changed since the last frame are output.
#[derive(Debug, Default)]
pub struct DiffRenderer {
    writer: CellWriter,
    previous: Option<FrameBuffer>,
}

impl DiffRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render a frame to stdout.
    ///
    /// Returns the number of cells written.
    pub fn render(&mut self, buffer: &FrameBuffer) -> io::Result<usize> {
        let stdout = io::stdout();
        let mut out = io::BufWriter::new(stdout.lock());
        self.render_to(&mut out, buffer)
    }

    /// Render a frame to any writer, outputting only changed cells.
    pub fn render_to<W: Write>(&mut self, out: &mut W, buffer: &FrameBuffer) -> io::Result<usize> {
        queue!(out, BeginSynchronizedUpdate)?;
        self.writer.reset();

        let previous = self
            .previous
            .as_ref()
            .filter(|prev| prev.width() == buffer.width() && prev.height() == buffer.height());

        let mut changed = 0;
        for (x, y, cell) in buffer.iter() {
            if previous.and_then(|prev| prev.get(x, y)) == Some(cell) {
                continue;
            }
            if cell.ch == CONTINUATION {
                // Covered by the wide glyph to its left.
                continue;
            }
            self.writer.write_cell(out, x, y, cell)?;
            changed += 1;
        }

        queue!(out, SetAttribute(Attribute::Reset), EndSynchronizedUpdate)?;
        out.flush()?;

        self.previous = Some(buffer.clone());
        Ok(changed)
    }

    /// Invalidate the previous frame.
    ///
    /// Next render will be a full redraw.
    pub fn invalidate(&mut self) {
        self.previous = None;
    }

    /// Check if we have a previous frame to diff against.
    pub fn has_previous(&self) -> bool {
        self.previous.is_some()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn render(renderer: &mut DiffRenderer, buffer: &FrameBuffer) -> (usize, String) {
        let mut out = Vec::new();
        let changed = renderer.render_to(&mut out, buffer).expect("render");
        (changed, String::from_utf8_lossy(&out).into_owned())
    }

    #[test]
    fn test_diff_renderer_creation() {
        let renderer = DiffRenderer::new();
        assert!(!renderer.has_previous());
    }

    #[test]
    fn test_first_frame_is_full() {
        let mut renderer = DiffRenderer::new();
        let mut buffer = FrameBuffer::with_background(4, 2, Rgba::GRAY_50);
        buffer.draw_text(0, 0, "hey", Rgba::GRAY_900, Attr::BOLD, None);

        let (changed, output) = render(&mut renderer, &buffer);

        assert_eq!(changed, 8);
        assert!(output.contains("hey"));
        assert!(renderer.has_previous());
    }

    #[test]
    fn test_unchanged_frame_writes_nothing() {
        let mut renderer = DiffRenderer::new();
        let buffer = FrameBuffer::with_background(4, 2, Rgba::GRAY_50);

        render(&mut renderer, &buffer);
        let (changed, _) = render(&mut renderer, &buffer);

        assert_eq!(changed, 0);
    }

    #[test]
    fn test_only_changed_cells() {
        let mut renderer = DiffRenderer::new();
        let mut buffer = FrameBuffer::with_background(6, 2, Rgba::GRAY_50);
        render(&mut renderer, &buffer);

        buffer.draw_text(2, 1, "x", Rgba::BLUE_600, Attr::NONE, None);
        let (changed, output) = render(&mut renderer, &buffer);

        assert_eq!(changed, 1);
        assert!(output.contains('x'));
    }

    #[test]
    fn test_resize_and_invalidate_force_full_redraw() {
        let mut renderer = DiffRenderer::new();
        render(&mut renderer, &FrameBuffer::new(4, 2));

        let (changed, _) = render(&mut renderer, &FrameBuffer::new(5, 2));
        assert_eq!(changed, 10);

        renderer.invalidate();
        assert!(!renderer.has_previous());
        let (changed, _) = render(&mut renderer, &FrameBuffer::new(5, 2));
        assert_eq!(changed, 10);
    }

    #[test]
    fn test_wide_glyph_skips_continuation() {
        let mut renderer = DiffRenderer::new();
        let mut buffer = FrameBuffer::new(4, 1);
        buffer.draw_text(0, 0, "日", Rgba::WHITE, Attr::NONE, None);

        let (changed, _) = render(&mut renderer, &buffer);
        assert_eq!(changed, 3);
    }

    #[test]
    fn test_to_color() {
        assert_eq!(to_color(Rgba::TERMINAL_DEFAULT), Color::Reset);
        assert_eq!(to_color(Rgba::rgb(1, 2, 3)), Color::Rgb { r: 1, g: 2, b: 3 });
    }
}
