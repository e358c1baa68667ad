//! Page View - Immutable snapshot of everything the painter needs.
//!
//! A `PageView` is produced by [`PageShell::view`](super::PageShell::view)
//! and contains no signals or cells, only values. Two views compare equal
//! exactly when they would paint the same frame over the same layout.

use crate::animation::MotionValues;
use crate::primitives::FlipVisual;

use super::sections::SectionId;

/// One header nav link.
#[derive(Debug, Clone, PartialEq)]
pub struct NavLinkView {
    pub label: String,
    pub href: String,
    pub visual: FlipVisual,
}

/// One glyph of the animated headline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LetterView {
    pub glyph: char,
    pub values: MotionValues,
}

/// Navigation overlay, present while open or fading out.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuView {
    pub open: bool,
    pub overlay: MotionValues,
    /// Close button gesture.
    pub close: MotionValues,
    /// Entrance stacked with each item's gesture.
    pub items: Vec<MotionValues>,
}

/// Entrance state of one content section.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionView {
    pub id: SectionId,
    pub heading: MotionValues,
    pub cards: Vec<MotionValues>,
}

/// Gesture offsets of buttons, cards, links and form fields.
///
/// These sit on top of the element's entrance motion; the painter stacks
/// them.
#[derive(Debug, Clone, PartialEq)]
pub struct GestureView {
    pub menu_toggle: MotionValues,
    pub hero_cta: MotionValues,
    pub service_cards: Vec<MotionValues>,
    pub service_links: Vec<MotionValues>,
    pub project_cards: Vec<MotionValues>,
    pub project_images: Vec<MotionValues>,
    pub project_links: Vec<MotionValues>,
    pub fields: Vec<MotionValues>,
    pub submit: MotionValues,
}

impl GestureView {
    /// Hover lift of card `index` in `section`.
    pub fn card(&self, section: SectionId, index: usize) -> MotionValues {
        let list = match section {
            SectionId::Services => &self.service_cards,
            SectionId::Projects => &self.project_cards,
            _ => return MotionValues::REST,
        };
        list.get(index).copied().unwrap_or(MotionValues::REST)
    }

    /// Hover shift of the link inside card `index` in `section`.
    pub fn card_link(&self, section: SectionId, index: usize) -> MotionValues {
        let list = match section {
            SectionId::Services => &self.service_links,
            SectionId::Projects => &self.project_links,
            _ => return MotionValues::REST,
        };
        list.get(index).copied().unwrap_or(MotionValues::REST)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PageView {
    /// Scroll position in page pixels.
    pub scroll: f64,
    pub scrolled: bool,
    pub header_visible: bool,
    /// Header slide (y offset).
    pub header: MotionValues,
    pub brand: MotionValues,
    pub nav: Vec<NavLinkView>,
    pub menu: Option<MenuView>,
    pub scroll_locked: bool,
    pub headline: Vec<LetterView>,
    pub hero_copy: MotionValues,
    pub hero_subtitle: MotionValues,
    /// Entrance combined with the idle float loop.
    pub hero_image: MotionValues,
    pub sections: Vec<SectionView>,
    pub gestures: GestureView,
}

impl PageView {
    pub fn section(&self, id: SectionId) -> Option<&SectionView> {
        self.sections.iter().find(|s| s.id == id)
    }

    pub fn is_menu_visible(&self) -> bool {
        self.menu.is_some()
    }

    /// Headline text as currently displayed.
    pub fn headline_text(&self) -> String {
        self.headline.iter().map(|l| l.glyph).collect()
    }
}
