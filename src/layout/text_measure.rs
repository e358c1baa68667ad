//! Text Measurement
//!
//! Utilities for measuring text dimensions in terminal cells.
//!
//! Widths come from `unicode-width`:
//! - ASCII printable: 1 cell
//! - CJK and most emoji: 2 cells
//! - Control and zero-width characters: 0 cells
//!
//! Wrapping prefers word boundaries and only splits a word that is wider
//! than the whole line.

use unicode_width::UnicodeWidthChar;

/// Display width of a single character in cells.
#[inline]
pub fn char_width(c: char) -> u16 {
    c.width().unwrap_or(0) as u16
}

/// Measure the display width of a string in terminal cells.
pub fn string_width(s: &str) -> u16 {
    s.chars()
        .fold(0u16, |width, c| width.saturating_add(char_width(c)))
}

/// Measure the height of text when wrapped to a given width.
///
/// Returns the number of lines (0 for empty text).
pub fn measure_text_height(text: &str, available_width: u16) -> u16 {
    wrap_text(text, available_width).len().min(u16::MAX as usize) as u16
}

/// Word-wrap text to a given width.
///
/// Explicit newlines always break. Spaces at a wrap point are dropped.
pub fn wrap_text(text: &str, width: u16) -> Vec<String> {
    if text.is_empty() {
        return vec![];
    }

    if width == 0 {
        return text.split('\n').map(str::to_string).collect();
    }

    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        wrap_paragraph(paragraph, width, &mut lines);
    }
    lines
}

fn wrap_paragraph(paragraph: &str, width: u16, lines: &mut Vec<String>) {
    let mut line = String::new();
    let mut line_width = 0u16;

    for word in paragraph.split(' ') {
        let word_width = string_width(word);

        if line_width > 0 && line_width + 1 + word_width <= width {
            line.push(' ');
            line.push_str(word);
            line_width += 1 + word_width;
            continue;
        }

        if line_width > 0 || (!line.is_empty() && word_width > 0) {
            lines.push(std::mem::take(&mut line));
            line_width = 0;
        }

        if word_width <= width {
            line.push_str(word);
            line_width = word_width;
            continue;
        }

        // Hard-split words wider than the line
        for c in word.chars() {
            let w = char_width(c);
            if line_width + w > width && line_width > 0 {
                lines.push(std::mem::take(&mut line));
                line_width = 0;
            }
            line.push(c);
            line_width += w;
        }
    }

    lines.push(line);
}
