//! Painter - Turns a layout and a view into terminal cells.
//!
//! Layout rectangles are in page pixels. The painter converts them to cells
//! with the layout's metrics, moves document content up by the scroll
//! position, and applies each element's motion values:
//!
//! - `x`/`y` shift the element (rounded to whole cells)
//! - `scale` shrinks boxes around their center
//! - `opacity` fades colors toward whatever is underneath
//! - `rotate_x` picks the face of a flip link; edge-on links draw as a rule
//! - text grown past its size by a gesture is underlined, shrunk text is dim
//!
//! Painting also records where the interactive elements landed, as
//! [`HitRegion`]s in paint order. Later regions win in the hit grid.

use crate::animation::MotionValues;
use crate::layout::{Block, BlockKind, LayoutMetrics, PageLayout, SectionLayout, TextBox, TextRole, char_width, string_width};
use crate::page::{GestureView, MenuView, NavLinkView, PageView, SectionId, SectionView};
use crate::primitives::NBSP;
use crate::state::{HitRegion, HitTarget};
use crate::types::{Attr, Rect, Rgba};

use super::buffer::{CellRect, FrameBuffer};

const PAGE_BG: Rgba = Rgba::GRAY_50;

/// Opacity below which nothing is drawn.
const INVISIBLE: f32 = 0.05;

/// Scale change below which text is drawn plain.
const SCALE_EPSILON: f32 = 0.01;

/// Flip links closer than this to edge-on (|cos|) draw as a rule.
const EDGE_ON: f32 = 0.35;

/// One painted frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub buffer: FrameBuffer,
    pub hit_regions: Vec<HitRegion>,
}

impl Frame {
    /// All text on screen, one line per row.
    pub fn text(&self) -> String {
        (0..self.buffer.height())
            .map(|y| self.buffer.row_text(y))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn has_target(&self, target: HitTarget) -> bool {
        self.hit_regions.iter().any(|r| r.target == target)
    }
}

/// Paint `view` over `layout` into a `cols` × `rows` frame.
pub fn paint(layout: &PageLayout, view: &PageView, cols: u16, rows: u16) -> Frame {
    let mut painter = Painter {
        buffer: FrameBuffer::with_background(cols, rows, PAGE_BG),
        metrics: layout.metrics,
        scroll: view.scroll as f32,
        // The overlay covers everything underneath
        interactive: view.menu.is_none(),
        hits: Vec::new(),
    };

    for section in &layout.sections {
        painter.section(section, view);
    }
    painter.header(layout, view);
    if let Some(menu) = &view.menu {
        painter.menu(layout, menu);
    }

    Frame {
        buffer: painter.buffer,
        hit_regions: painter.hits,
    }
}

// =============================================================================
// Helpers
// =============================================================================

/// Rectangle in (possibly off-screen) cell coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Span {
    x: i32,
    y: i32,
    width: i32,
    height: i32,
}

/// Apply translation and scale (around the center) to a rectangle.
fn transform(rect: Rect, motion: &MotionValues) -> Rect {
    let scale = motion.scale.max(0.0);
    let width = rect.width * scale;
    let height = rect.height * scale;
    Rect::new(
        rect.x + (rect.width - width) / 2.0 + motion.x,
        rect.y + (rect.height - height) / 2.0 + motion.y,
        width,
        height,
    )
}

/// Translation carrying text from `from` to the transformed box `to`.
fn offset(from: Rect, to: Rect, opacity: f32) -> MotionValues {
    MotionValues::REST
        .opacity(opacity)
        .x(to.x - from.x)
        .y(to.y - from.y)
}

/// Fade `color` toward `under`.
fn fade(color: Rgba, under: Rgba, opacity: f32) -> Rgba {
    if under.is_terminal_default() || color.is_terminal_default() {
        color
    } else {
        Rgba::mix(under, color, opacity)
    }
}

/// Attributes showing a gesture's scale on text, which cannot grow.
fn emphasis(motion: &MotionValues) -> Attr {
    if motion.scale > 1.0 + SCALE_EPSILON {
        Attr::UNDERLINE
    } else if motion.scale < 1.0 - SCALE_EPSILON {
        Attr::DIM
    } else {
        Attr::NONE
    }
}

fn edge_on(rotate_x: f32) -> bool {
    rotate_x.to_radians().cos().abs() < EDGE_ON
}

/// Row and column of every character of `text` once wrapped into `lines`.
///
/// Whitespace dropped at a line break maps to `None`.
fn glyph_positions(text: &str, lines: &[String]) -> Vec<Option<(usize, u16)>> {
    let chars: Vec<char> = text.chars().collect();
    let mut positions = vec![None; chars.len()];
    let mut i = 0;

    for (row, line) in lines.iter().enumerate() {
        if row > 0 && i < chars.len() && matches!(chars[i], ' ' | '\n') {
            i += 1;
        }
        let mut col = 0u16;
        for ch in line.chars() {
            if i >= chars.len() {
                break;
            }
            positions[i] = Some((row, col));
            col = col.saturating_add(char_width(ch));
            i += 1;
        }
    }
    positions
}

fn role_style(role: TextRole, dark: bool) -> (Rgba, Attr) {
    match role {
        TextRole::Heading | TextRole::CardTitle | TextRole::Title => (Rgba::GRAY_900, Attr::BOLD),
        TextRole::Body if dark => (Rgba::GRAY_200, Attr::NONE),
        TextRole::Body | TextRole::Subtitle => (Rgba::GRAY_600, Attr::NONE),
        TextRole::Link => (Rgba::BLUE_600, Attr::UNDERLINE),
        TextRole::Placeholder => (Rgba::GRAY_600, Attr::DIM),
        TextRole::Caption => (Rgba::GRAY_200, Attr::DIM),
        TextRole::Button | TextRole::PromoTitle | TextRole::MenuItem | TextRole::MenuClose => {
            (Rgba::WHITE, Attr::BOLD)
        }
        TextRole::Brand => (Rgba::BLUE_600, Attr::BOLD),
        TextRole::Nav | TextRole::MenuButton => (Rgba::GRAY_600, Attr::NONE),
    }
}

// =============================================================================
// Painter
// =============================================================================

struct Painter {
    buffer: FrameBuffer,
    metrics: LayoutMetrics,
    scroll: f32,
    interactive: bool,
    hits: Vec<HitRegion>,
}

impl Painter {
    /// Page-pixel rectangle to cells. `fixed` rectangles ignore scroll.
    fn span(&self, rect: Rect, fixed: bool) -> Span {
        let top = if fixed { rect.y } else { rect.y - self.scroll };
        let col = |px: f32| (px / self.metrics.px_per_col).round() as i32;
        let row = |px: f32| (px / self.metrics.px_per_row).round() as i32;

        let x = col(rect.x);
        let y = row(top);
        Span {
            x,
            y,
            width: (col(rect.right()) - x).max(0),
            height: (row(top + rect.height) - y).max(0),
        }
    }

    fn clip(&self, span: Span) -> Option<CellRect> {
        let x1 = span.x.max(0);
        let y1 = span.y.max(0);
        let x2 = (span.x + span.width).min(self.buffer.width() as i32);
        let y2 = (span.y + span.height).min(self.buffer.height() as i32);

        (x2 > x1 && y2 > y1)
            .then(|| CellRect::new(x1 as u16, y1 as u16, (x2 - x1) as u16, (y2 - y1) as u16))
    }

    fn on_screen(&self, span: Span) -> bool {
        self.clip(span).is_some()
    }

    fn fill(&mut self, rect: Rect, fixed: bool, color: Rgba, opacity: f32) {
        if opacity < INVISIBLE {
            return;
        }
        if let Some(cells) = self.clip(self.span(rect, fixed)) {
            self.buffer.fill_rect(cells, color.with_opacity(opacity), None);
        }
    }

    fn border(&mut self, rect: Rect, fixed: bool, color: Rgba, opacity: f32) {
        if opacity < INVISIBLE {
            return;
        }
        let span = self.span(rect, fixed);
        // Borders are only drawn fully on screen to avoid stray corners.
        if span.x < 0 || span.y < 0 || span.width < 2 || span.height < 2 {
            return;
        }
        let cells = CellRect::new(span.x as u16, span.y as u16, span.width as u16, span.height as u16);
        let under = self.buffer.background_at(cells.x, cells.y);
        let clip = self.buffer.bounds();
        self.buffer
            .draw_border(cells, fade(color, under, opacity), Some(&clip));
    }

    fn hit(&mut self, rect: Rect, fixed: bool, target: HitTarget) {
        if !self.interactive {
            return;
        }
        if let Some(cells) = self.clip(self.span(rect, fixed)) {
            self.hits.push(HitRegion {
                x: cells.x,
                y: cells.y,
                width: cells.width,
                height: cells.height,
                target,
            });
        }
    }

    fn glyph(&mut self, x: i32, y: i32, ch: char, fg: Rgba, opacity: f32, attrs: Attr) {
        let (Ok(x), Ok(y)) = (u16::try_from(x), u16::try_from(y)) else {
            return;
        };
        if !self.buffer.in_bounds(x, y) {
            return;
        }
        let ch = if ch == NBSP { ' ' } else { ch };
        let fg = fade(fg, self.buffer.background_at(x, y), opacity);
        let mut utf8 = [0u8; 4];
        self.buffer.draw_text(x, y, ch.encode_utf8(&mut utf8), fg, attrs, None);
    }

    fn line(&mut self, x: i32, y: i32, line: &str, fg: Rgba, opacity: f32, attrs: Attr) {
        if y < 0 || y >= self.buffer.height() as i32 {
            return;
        }
        let mut col = x;
        for ch in line.chars() {
            if col >= self.buffer.width() as i32 {
                break;
            }
            let w = char_width(ch) as i32;
            if col >= 0 && w > 0 {
                self.glyph(col, y, ch, fg, opacity, attrs);
            }
            col += w;
        }
    }

    /// Horizontal rule starting at the span's origin.
    fn rule(&mut self, span: Span, length: u16, fg: Rgba, opacity: f32) {
        if opacity < INVISIBLE || span.y < 0 || span.y >= self.buffer.height() as i32 {
            return;
        }
        let start = span.x.max(0);
        let length = (span.x + length as i32 - start).max(0);
        let (Ok(x), Ok(y), Ok(length)) =
            (u16::try_from(start), u16::try_from(span.y), u16::try_from(length))
        else {
            return;
        };
        let fg = fade(fg, self.buffer.background_at(x, y), opacity);
        self.buffer.draw_hline(x, y, length, '─', fg, None);
    }

    fn text(&mut self, text: &TextBox, motion: &MotionValues, fixed: bool, fg: Rgba, attrs: Attr) {
        if motion.opacity < INVISIBLE {
            return;
        }
        let span = self.span(text.rect.translate(motion.x, motion.y), fixed);
        for (i, line) in text.lines.iter().enumerate() {
            self.line(span.x, span.y + i as i32, line, fg, motion.opacity, attrs);
        }
    }

    fn styled_text(&mut self, text: &TextBox, motion: &MotionValues, dark: bool) {
        let (fg, attrs) = role_style(text.role, dark);
        self.text(text, motion, false, fg, attrs);
    }

    // -------------------------------------------------------------------------
    // Sections
    // -------------------------------------------------------------------------

    fn section(&mut self, section: &SectionLayout, view: &PageView) {
        if !self.on_screen(self.span(section.rect, false)) {
            return;
        }
        match section.id {
            SectionId::Home => self.hero(section, view),
            SectionId::Footer => self.footer(section),
            _ => self.content_section(section, view),
        }
    }

    fn hero(&mut self, section: &SectionLayout, view: &PageView) {
        // Left-to-right gradient, one column at a time.
        if let Some(cells) = self.clip(self.span(section.rect, false)) {
            let total = self.buffer.width().max(2) - 1;
            for x in cells.x..cells.x + cells.width {
                let color = Rgba::mix(Rgba::BLUE_600, Rgba::PURPLE_600, x as f32 / total as f32);
                self.buffer
                    .fill_rect(CellRect::new(x, cells.y, 1, cells.height), color, None);
            }
        }

        for text in &section.texts {
            match text.role {
                TextRole::Title => self.headline(text, view),
                _ => {
                    let motion = view.hero_copy.stack(&view.hero_subtitle);
                    self.text(text, &motion, false, Rgba::GRAY_100, Attr::NONE);
                }
            }
        }

        for block in &section.blocks {
            match block.kind {
                BlockKind::HeroImage => {
                    let motion = view.hero_image;
                    let rect = transform(block.rect, &motion);
                    self.fill(rect, false, Rgba::GRAY_200, motion.opacity);
                    self.border(rect, false, Rgba::WHITE, motion.opacity);
                }
                _ => {
                    let motion = view.hero_copy.stack(&view.gestures.hero_cta);
                    self.button(block, &motion, Rgba::WHITE, Rgba::BLUE_600);
                    self.hit(block.rect, false, HitTarget::HeroCta);
                }
            }
        }
    }

    fn headline(&mut self, title: &TextBox, view: &PageView) {
        let positions = glyph_positions(&title.text, &title.lines);
        for (letter, position) in view.headline.iter().zip(positions) {
            let Some((row, col)) = position else {
                continue;
            };
            let motion = view.hero_copy.stack(&letter.values);
            if motion.opacity < INVISIBLE {
                continue;
            }
            let rect = Rect::new(
                title.rect.x + col as f32 * self.metrics.px_per_col + motion.x,
                title.rect.y + row as f32 * self.metrics.px_per_row + motion.y,
                self.metrics.px_per_col,
                self.metrics.px_per_row,
            );
            let span = self.span(rect, false);
            self.glyph(span.x, span.y, letter.glyph, Rgba::WHITE, motion.opacity, Attr::BOLD);
        }
    }

    fn content_section(&mut self, section: &SectionLayout, view: &PageView) {
        let entrance = view.section(section.id);
        let gestures = &view.gestures;
        let bg = match section.id {
            SectionId::Projects => Rgba::GRAY_100,
            _ => PAGE_BG,
        };
        self.fill(section.rect, false, bg, 1.0);

        if let Some(heading) = &section.heading {
            let motion = entrance.map_or(MotionValues::REST, |v| v.heading);
            self.styled_text(heading, &motion, false);
        }

        let mut cards = 0;
        let mut fields = 0;
        for block in &section.blocks {
            match block.kind {
                BlockKind::Card => {
                    let index = cards;
                    cards += 1;
                    self.card(block, section.id, index, entrance, gestures);
                }
                BlockKind::Field => {
                    let motion = gestures
                        .fields
                        .get(fields)
                        .copied()
                        .unwrap_or(MotionValues::REST);
                    let rect = transform(block.rect, &motion);
                    self.fill(rect, false, Rgba::WHITE, 1.0);
                    self.border(rect, false, Rgba::GRAY_200, 1.0);
                    for text in &block.texts {
                        self.styled_text(text, &offset(block.rect, rect, 1.0), false);
                    }
                    self.hit(block.rect, false, HitTarget::Field(fields));
                    fields += 1;
                }
                _ => {
                    self.button(block, &gestures.submit, Rgba::BLUE_600, Rgba::WHITE);
                    self.hit(block.rect, false, HitTarget::Submit);
                }
            }
        }
    }

    /// Filled button with centered label, scaled by its gesture.
    fn button(&mut self, block: &Block, motion: &MotionValues, fill: Rgba, fg: Rgba) {
        let rect = transform(block.rect, motion);
        self.fill(rect, false, fill, motion.opacity);
        let shift = offset(block.rect, rect, motion.opacity);
        for text in &block.texts {
            self.text(text, &shift, false, fg, Attr::BOLD | emphasis(motion));
        }
    }

    fn card(
        &mut self,
        block: &Block,
        section: SectionId,
        index: usize,
        entrance: Option<&SectionView>,
        gestures: &GestureView,
    ) {
        let (card_target, link_target) = match section {
            SectionId::Projects => (HitTarget::ProjectCard(index), HitTarget::ProjectLink(index)),
            _ => (HitTarget::ServiceCard(index), HitTarget::ServiceLink(index)),
        };
        self.hit(block.rect, false, card_target);
        for text in block.texts.iter().filter(|t| t.role == TextRole::Link) {
            self.hit(text.rect, false, link_target);
        }

        let entrance = entrance
            .and_then(|v| v.cards.get(index))
            .copied()
            .unwrap_or(MotionValues::REST);
        let motion = entrance.stack(&gestures.card(section, index));
        if motion.opacity < INVISIBLE {
            return;
        }

        let rect = transform(block.rect, &motion);
        self.fill(rect, false, Rgba::WHITE, motion.opacity);
        if let Some(media) = block.media {
            let zoom = gestures
                .project_images
                .get(index)
                .copied()
                .filter(|_| section == SectionId::Projects)
                .unwrap_or(MotionValues::REST);
            let media = transform(transform(media, &motion), &zoom);
            // Images stay inside their card
            if let Some(visible) = media.intersect(&rect) {
                self.fill(visible, false, Rgba::GRAY_200, motion.opacity);
            }
        }

        let shift = offset(block.rect, rect, motion.opacity);
        let link = shift.stack(&gestures.card_link(section, index));
        for text in &block.texts {
            let motion = if text.role == TextRole::Link { &link } else { &shift };
            self.styled_text(text, motion, false);
        }
    }

    fn footer(&mut self, section: &SectionLayout) {
        self.fill(section.rect, false, Rgba::GRAY_900, 1.0);
        for block in &section.blocks {
            for text in &block.texts {
                self.styled_text(text, &MotionValues::REST, true);
            }
        }
        for text in &section.texts {
            self.styled_text(text, &MotionValues::REST, true);
        }
    }

    // -------------------------------------------------------------------------
    // Fixed layers
    // -------------------------------------------------------------------------

    fn header(&mut self, layout: &PageLayout, view: &PageView) {
        let header = &layout.header;
        let slide = view.header;
        let bar = header.rect.translate(0.0, slide.y);
        if !self.on_screen(self.span(bar, true)) {
            return;
        }

        if view.scrolled {
            self.fill(bar, true, Rgba::WHITE.with_opacity(0.8), 1.0);
        }
        let brand = slide.stack(&view.brand);
        let brand_color = if view.scrolled { Rgba::BLUE_600 } else { Rgba::WHITE };
        self.text(&header.brand, &brand, true, brand_color, Attr::BOLD);

        for (i, (text, link)) in header.nav.iter().zip(&view.nav).enumerate() {
            self.nav_link(text, link, &slide, view.scrolled);
            self.hit(text.rect.translate(0.0, slide.y), true, HitTarget::NavLink(i));
        }

        if let Some(button) = &header.menu_button {
            let color = if view.scrolled { Rgba::GRAY_900 } else { Rgba::WHITE };
            let motion = slide.stack(&view.gestures.menu_toggle);
            self.text(button, &motion, true, color, Attr::BOLD | emphasis(&motion));
            self.hit(button.rect.translate(0.0, slide.y), true, HitTarget::MenuToggle);
        }
    }

    fn nav_link(&mut self, text: &TextBox, link: &NavLinkView, slide: &MotionValues, scrolled: bool) {
        let visual = &link.visual;
        let motion = slide.stack(&visual.link);
        let (front, back) = if scrolled {
            (Rgba::GRAY_600, Rgba::BLUE_600)
        } else {
            (Rgba::WHITE, Rgba::WHITE)
        };
        let mut attrs = if visual.bold { Attr::BOLD } else { Attr::NONE };
        if visual.pressed {
            attrs |= Attr::UNDERLINE;
        }

        if edge_on(motion.rotate_x) {
            let span = self.span(text.rect.translate(motion.x, motion.y), true);
            self.rule(span, string_width(&link.label), back, motion.opacity);
        } else if visual.facing_back() {
            let layer = motion.opacity(motion.opacity * visual.back_opacity);
            self.text(text, &layer, true, back, attrs | Attr::BOLD);
        } else {
            let layer = motion.opacity(motion.opacity * visual.front_opacity);
            self.text(text, &layer, true, front, attrs);
        }
    }

    fn menu(&mut self, layout: &PageLayout, menu: &MenuView) {
        let overlay = menu.overlay;
        self.fill(layout.viewport, true, Rgba::BLUE_600, overlay.opacity * 0.95);

        let close = overlay.stack(&menu.close);
        let (fg, attrs) = role_style(TextRole::MenuClose, false);
        self.text(&layout.menu.close, &close, true, fg, attrs | emphasis(&close));

        for (text, item) in layout.menu.items.iter().zip(&menu.items) {
            let motion = overlay.stack(item);
            let (fg, attrs) = role_style(text.role, false);
            self.text(text, &motion, true, fg, attrs | emphasis(&motion));
        }

        // Only the overlay's own targets while it is up, none while it fades out
        self.interactive = menu.open;
        if menu.open {
            self.hit(layout.menu.close.rect, true, HitTarget::MenuClose);
            for (i, text) in layout.menu.items.iter().enumerate() {
                self.hit(text.rect, true, HitTarget::MenuItem(i));
            }
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
