//! FrameBuffer and drawing primitives.
//!
//! The FrameBuffer is a 2D grid of Cells that represents what should be displayed
//! on the terminal. All drawing operations work on this buffer.
//!
//! - **Flat storage**: `Vec<Cell>` with row-major indexing.
//! - **Clipping**: drawing functions accept an optional [`CellRect`] clip.
//! - **Alpha blending**: translucent backgrounds blend with the existing cell.
//! - **Wide characters**: the cell after a 2-wide glyph holds `'\0'`.

use crate::layout::{char_width, string_width};
use crate::types::{Attr, Cell, Rgba};

/// Continuation marker for the second half of a wide glyph.
pub const CONTINUATION: char = '\0';

/// Rectangle in terminal cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CellRect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl CellRect {
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.x
            && y >= self.y
            && x < self.x.saturating_add(self.width)
            && y < self.y.saturating_add(self.height)
    }
}

// =============================================================================
// FrameBuffer
// =============================================================================

/// A 2D buffer of terminal cells.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    /// Create a new buffer filled with default cells.
    pub fn new(width: u16, height: u16) -> Self {
        Self::with_background(width, height, Rgba::TERMINAL_DEFAULT)
    }

    /// Create a new buffer with a specific background color.
    pub fn with_background(width: u16, height: u16, bg: Rgba) -> Self {
        let cell = Cell {
            bg,
            ..Cell::default()
        };
        Self {
            width,
            height,
            cells: vec![cell; width as usize * height as usize],
        }
    }

    #[inline]
    pub fn width(&self) -> u16 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn bounds(&self) -> CellRect {
        CellRect::new(0, 0, self.width, self.height)
    }

    #[inline]
    fn index(&self, x: u16, y: u16) -> usize {
        y as usize * self.width as usize + x as usize
    }

    #[inline]
    pub fn in_bounds(&self, x: u16, y: u16) -> bool {
        x < self.width && y < self.height
    }

    /// Get a cell reference (returns None if out of bounds).
    #[inline]
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        if self.in_bounds(x, y) {
            self.cells.get(self.index(x, y))
        } else {
            None
        }
    }

    #[inline]
    pub fn get_mut(&mut self, x: u16, y: u16) -> Option<&mut Cell> {
        if self.in_bounds(x, y) {
            let idx = self.index(x, y);
            self.cells.get_mut(idx)
        } else {
            None
        }
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Background color at a cell, `TERMINAL_DEFAULT` when out of bounds.
    pub fn background_at(&self, x: u16, y: u16) -> Rgba {
        self.get(x, y).map_or(Rgba::TERMINAL_DEFAULT, |c| c.bg)
    }

    /// Iterate over cells with their coordinates.
    pub fn iter(&self) -> impl Iterator<Item = (u16, u16, &Cell)> {
        let width = self.width.max(1) as usize;
        self.cells.iter().enumerate().map(move |(i, cell)| {
            ((i % width) as u16, (i / width) as u16, cell)
        })
    }

    /// Row `y` as a string (continuation cells skipped).
    pub fn row_text(&self, y: u16) -> String {
        (0..self.width)
            .filter_map(|x| self.get(x, y))
            .filter(|c| c.ch != CONTINUATION)
            .map(|c| c.ch)
            .collect()
    }

    // =========================================================================
    // Drawing Primitives
    // =========================================================================

    /// Set a single cell with optional clipping.
    ///
    /// Returns true if the cell was set.
    pub fn set_cell(
        &mut self,
        x: u16,
        y: u16,
        ch: char,
        fg: Rgba,
        bg: Rgba,
        attrs: Attr,
        clip: Option<&CellRect>,
    ) -> bool {
        if clip.is_some_and(|clip| !clip.contains(x, y)) {
            return false;
        }
        let Some(cell) = self.get_mut(x, y) else {
            return false;
        };

        let bg = if bg.is_opaque() || bg.is_terminal_default() {
            bg
        } else {
            Rgba::blend(bg, cell.bg)
        };

        *cell = Cell { ch, fg, bg, attrs };
        true
    }

    /// Fill a rectangle with a background color.
    pub fn fill_rect(&mut self, rect: CellRect, bg: Rgba, clip: Option<&CellRect>) {
        let x2 = rect.x.saturating_add(rect.width).min(self.width);
        let y2 = rect.y.saturating_add(rect.height).min(self.height);

        let (x1, y1, x2, y2) = match clip {
            Some(clip) => (
                rect.x.max(clip.x),
                rect.y.max(clip.y),
                x2.min(clip.x.saturating_add(clip.width)),
                y2.min(clip.y.saturating_add(clip.height)),
            ),
            None => (rect.x, rect.y, x2, y2),
        };

        if x2 <= x1 || y2 <= y1 {
            return;
        }

        let opaque = bg.is_opaque() || bg.is_terminal_default();
        for row in y1..y2 {
            let start = self.index(x1, row);
            let end = self.index(x2, row);
            for cell in &mut self.cells[start..end] {
                cell.bg = if opaque { bg } else { Rgba::blend(bg, cell.bg) };
                cell.ch = ' ';
                cell.attrs = Attr::NONE;
            }
        }
    }

    /// Draw text at a position, keeping the existing background.
    ///
    /// Returns the number of cells used (handles wide characters).
    pub fn draw_text(
        &mut self,
        x: u16,
        y: u16,
        text: &str,
        fg: Rgba,
        attrs: Attr,
        clip: Option<&CellRect>,
    ) -> u16 {
        let mut col = x;

        for ch in text.chars() {
            if col >= self.width {
                break;
            }

            let w = char_width(ch);
            if w == 0 {
                continue;
            }

            let bg = self.background_at(col, y);
            if self.set_cell(col, y, ch, fg, bg, attrs, clip) && w == 2 {
                let next_bg = self.background_at(col + 1, y);
                self.set_cell(col + 1, y, CONTINUATION, fg, next_bg, attrs, clip);
            }

            col = col.saturating_add(w);
        }

        col.saturating_sub(x)
    }

    /// Draw text centered within a width.
    pub fn draw_text_centered(
        &mut self,
        x: u16,
        y: u16,
        width: u16,
        text: &str,
        fg: Rgba,
        attrs: Attr,
        clip: Option<&CellRect>,
    ) -> u16 {
        let offset = width.saturating_sub(string_width(text)) / 2;
        self.draw_text(x.saturating_add(offset), y, text, fg, attrs, clip)
    }

    /// Draw a rounded single-line border around a rectangle.
    pub fn draw_border(&mut self, rect: CellRect, color: Rgba, clip: Option<&CellRect>) {
        if rect.width < 2 || rect.height < 2 {
            return;
        }

        let CellRect { x, y, .. } = rect;
        let x2 = x + rect.width - 1;
        let y2 = y + rect.height - 1;

        let mut put = |buffer: &mut Self, cx: u16, cy: u16, ch: char| {
            let bg = buffer.background_at(cx, cy);
            buffer.set_cell(cx, cy, ch, color, bg, Attr::NONE, clip);
        };

        put(self, x, y, '╭');
        put(self, x2, y, '╮');
        put(self, x, y2, '╰');
        put(self, x2, y2, '╯');
        for col in (x + 1)..x2 {
            put(self, col, y, '─');
            put(self, col, y2, '─');
        }
        for row in (y + 1)..y2 {
            put(self, x, row, '│');
            put(self, x2, row, '│');
        }
    }

    /// Draw a horizontal run of one character.
    pub fn draw_hline(
        &mut self,
        x: u16,
        y: u16,
        length: u16,
        ch: char,
        fg: Rgba,
        clip: Option<&CellRect>,
    ) {
        for col in x..x.saturating_add(length).min(self.width) {
            let bg = self.background_at(col, y);
            self.set_cell(col, y, ch, fg, bg, Attr::NONE, clip);
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_buffer() {
        let buffer = FrameBuffer::new(10, 4);
        assert_eq!(buffer.width(), 10);
        assert_eq!(buffer.height(), 4);
        assert_eq!(buffer.cells().len(), 40);
        assert!(buffer.get(10, 0).is_none());
    }

    #[test]
    fn test_fill_rect_clipped() {
        let mut buffer = FrameBuffer::new(10, 10);
        let clip = CellRect::new(0, 0, 5, 5);

        buffer.fill_rect(CellRect::new(3, 3, 10, 10), Rgba::BLUE_600, Some(&clip));

        assert_eq!(buffer.background_at(4, 4), Rgba::BLUE_600);
        assert_eq!(buffer.background_at(5, 5), Rgba::TERMINAL_DEFAULT);
        assert_eq!(buffer.background_at(2, 2), Rgba::TERMINAL_DEFAULT);
    }

    #[test]
    fn test_draw_text_keeps_background() {
        let mut buffer = FrameBuffer::with_background(10, 1, Rgba::GRAY_100);

        let used = buffer.draw_text(1, 0, "hi", Rgba::GRAY_900, Attr::BOLD, None);

        assert_eq!(used, 2);
        let cell = buffer.get(1, 0).expect("cell");
        assert_eq!(cell.ch, 'h');
        assert_eq!(cell.bg, Rgba::GRAY_100);
        assert_eq!(cell.attrs, Attr::BOLD);
        assert_eq!(buffer.row_text(0), " hi       ");
    }

    #[test]
    fn test_draw_wide_text() {
        let mut buffer = FrameBuffer::new(6, 1);

        let used = buffer.draw_text(0, 0, "日x", Rgba::WHITE, Attr::NONE, None);

        assert_eq!(used, 3);
        assert_eq!(buffer.get(1, 0).map(|c| c.ch), Some(CONTINUATION));
        assert_eq!(buffer.get(2, 0).map(|c| c.ch), Some('x'));
    }

    #[test]
    fn test_draw_text_centered() {
        let mut buffer = FrameBuffer::new(10, 1);
        buffer.draw_text_centered(0, 0, 10, "ab", Rgba::WHITE, Attr::NONE, None);
        assert_eq!(buffer.get(4, 0).map(|c| c.ch), Some('a'));
    }

    #[test]
    fn test_translucent_fill_blends() {
        let mut buffer = FrameBuffer::with_background(2, 1, Rgba::WHITE);
        buffer.fill_rect(
            CellRect::new(0, 0, 2, 1),
            Rgba::new(0, 0, 0, 128),
            None,
        );

        let bg = buffer.background_at(0, 0);
        assert!(bg.r > 0 && bg.r < 255);
    }

    #[test]
    fn test_border() {
        let mut buffer = FrameBuffer::new(4, 3);
        buffer.draw_border(CellRect::new(0, 0, 4, 3), Rgba::GRAY_200, None);

        assert_eq!(buffer.row_text(0), "╭──╮");
        assert_eq!(buffer.row_text(1), "│  │");
        assert_eq!(buffer.row_text(2), "╰──╯");
    }

    #[test]
    fn test_hline_keeps_background_and_clips() {
        let mut buffer = FrameBuffer::with_background(6, 2, Rgba::BLUE_600);
        buffer.draw_hline(3, 1, 10, '─', Rgba::WHITE, None);

        assert_eq!(buffer.row_text(1), "   ───");
        let cell = buffer.get(5, 1).expect("cell");
        assert_eq!(cell.bg, Rgba::BLUE_600);
        assert_eq!(cell.fg, Rgba::WHITE);
    }
}
