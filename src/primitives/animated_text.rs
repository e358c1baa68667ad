//! Animated Text - Per-character staggered entrance.
//!
//! The input string is split into code points. Every character becomes its
//! own animation target that moves from the hidden state to rest after a
//! delay that grows with its index:
//!
//! ```text
//! delay(i) = base_delay * delay_multiplier + i * stagger
//! ```
//!
//! Whitespace renders as a non-breaking space so the line keeps its spacing
//! while individual glyphs are still transparent.
//!
//! # Example
//!
//! ```ignore
//! use spark_page::primitives::animated_text;
//! use spark_page::config::StaggerConfig;
//!
//! let headline = animated_text("Hi there", &StaggerConfig::default());
//! assert_eq!(headline.len(), 8);
//! assert_eq!(headline.letters()[5].glyph, '\u{00A0}');
//! ```

use crate::animation::{Animation, MotionValues, Transition};
use crate::config::StaggerConfig;

/// Non-breaking space substituted for whitespace.
pub const NBSP: char = '\u{00A0}';

/// One character of an animated string.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimatedLetter {
    pub index: usize,
    pub glyph: char,
    /// Seconds after mount before this letter starts moving.
    pub delay: f32,
    pub hidden: MotionValues,
    pub visible: MotionValues,
    pub transition: Transition,
}

impl AnimatedLetter {
    /// Values `elapsed` seconds after the text was mounted.
    pub fn sample(&self, elapsed: f64) -> MotionValues {
        Animation::new(self.hidden, self.visible, self.transition, 0.0).sample(elapsed)
    }

    pub fn is_settled(&self, elapsed: f64) -> bool {
        self.transition.is_complete(elapsed as f32)
    }
}

/// Ordered, independently timed letters of one string.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AnimatedText {
    letters: Vec<AnimatedLetter>,
}

impl AnimatedText {
    pub fn letters(&self) -> &[AnimatedLetter] {
        &self.letters
    }

    pub fn len(&self) -> usize {
        self.letters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }

    /// The displayed string (whitespace already substituted).
    pub fn display_text(&self) -> String {
        self.letters.iter().map(|l| l.glyph).collect()
    }

    /// Values of every letter at `elapsed` seconds after mount.
    pub fn sample(&self, elapsed: f64) -> Vec<MotionValues> {
        self.letters.iter().map(|l| l.sample(elapsed)).collect()
    }

    /// Check if every letter has come to rest.
    pub fn is_settled(&self, elapsed: f64) -> bool {
        self.letters.iter().all(|l| l.is_settled(elapsed))
    }
}

/// Break `text` into staggered letters.
pub fn animated_text(text: &str, config: &StaggerConfig) -> AnimatedText {
    let base = config.base_delay * config.delay_multiplier;

    let letters = text
        .chars()
        .enumerate()
        .map(|(index, ch)| {
            let delay = base + index as f32 * config.stagger;
            AnimatedLetter {
                index,
                glyph: if ch.is_whitespace() { NBSP } else { ch },
                delay,
                hidden: config.hidden,
                visible: MotionValues::REST,
                transition: config.letter.with_delay(delay),
            }
        })
        .collect();

    AnimatedText { letters }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> StaggerConfig {
        StaggerConfig::default()
    }

    #[test]
    fn test_two_letters_staggered() {
        let text = animated_text("ab", &config());

        assert_eq!(text.len(), 2);
        assert_eq!(text.letters()[0].index, 0);
        assert_eq!(text.letters()[1].index, 1);
        assert!((text.letters()[0].delay - 0.04).abs() < 1e-6);
        assert!((text.letters()[1].delay - 0.07).abs() < 1e-6);
    }

    #[test]
    fn test_empty_text() {
        let text = animated_text("", &config());

        assert!(text.is_empty());
        assert!(text.sample(1.0).is_empty());
        assert!(text.is_settled(0.0));
    }

    #[test]
    fn test_whitespace_becomes_nbsp() {
        let text = animated_text("a b\tc", &config());

        assert_eq!(text.display_text(), "a\u{00A0}b\u{00A0}c");
    }

    #[test]
    fn test_code_point_split() {
        let text = animated_text("héllo✓", &config());
        assert_eq!(text.len(), 6);
        assert_eq!(text.letters()[5].glyph, '✓');
    }

    #[test]
    fn test_delay_multiplier() {
        let text = animated_text(
            "xy",
            &StaggerConfig {
                delay_multiplier: 2.0,
                ..config()
            },
        );
        assert!((text.letters()[0].delay - 0.08).abs() < 1e-6);
        assert!((text.letters()[1].delay - 0.11).abs() < 1e-6);
    }

    #[test]
    fn test_sample_hidden_then_rest() {
        let text = animated_text("ab", &config());

        let start = text.sample(0.0);
        assert_eq!(start[0].opacity, 0.0);
        assert_eq!(start[0].x, -20.0);
        assert_eq!(start[0].y, 10.0);

        // Second letter still waiting after the first one starts
        let early = text.sample(0.05);
        assert!(early[0].opacity > 0.0);
        assert_eq!(early[1].opacity, 0.0);

        let settled = text.sample(10.0);
        assert!(settled.iter().all(|v| *v == MotionValues::REST));
        assert!(text.is_settled(10.0));
    }
}
