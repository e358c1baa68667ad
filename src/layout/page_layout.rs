//! Page Layout - Taffy flexbox for the whole page.
//!
//! Builds three independent Taffy trees for the current viewport and reads
//! the results back as absolute rectangles in page pixels:
//!
//! - **header** - fixed bar at the top of the viewport
//! - **page** - the scrolling document (hero, services, projects, contact, footer)
//! - **menu** - the full-screen navigation overlay
//!
//! Text leaves carry their string as Taffy node context and are measured by
//! wrapping at the available width, one text line per `px_per_row`.
//!
//! Breakpoints follow the usual container scale: below `md` (768px) every
//! grid is a single column and the header shows a menu button instead of
//! inline links.

use taffy::{
    AlignItems, AvailableSpace, Dimension, Display, FlexDirection, FlexWrap, JustifyContent,
    LengthPercentage, LengthPercentageAuto, NodeId, Rect as TaffyRect, Size, Style, TaffyTree,
};

use crate::config::{ContentConfig, PreviewConfig};
use crate::error::Result;
use crate::page::SectionId;
use crate::types::Rect;

use super::text_measure::{string_width, wrap_text};

// =============================================================================
// CONSTANTS
// =============================================================================

pub const BREAKPOINT_SM: f32 = 640.0;
pub const BREAKPOINT_MD: f32 = 768.0;
pub const BREAKPOINT_LG: f32 = 1024.0;
pub const BREAKPOINT_XL: f32 = 1280.0;
pub const BREAKPOINT_2XL: f32 = 1536.0;

/// Fixed header bar height.
pub const HEADER_HEIGHT: f32 = 48.0;

const CONTAINER_PADDING: f32 = 16.0;
const SECTION_PADDING: f32 = 80.0;
const FOOTER_PADDING: f32 = 32.0;
const HEADING_GAP: f32 = 48.0;
const GRID_GAP: f32 = 32.0;
const HERO_IMAGE_HEIGHT: f32 = 192.0;
const PROJECT_IMAGE_HEIGHT: f32 = 96.0;
const FORM_MAX_WIDTH: f32 = 672.0;
const MENU_BUTTON: &str = "☰";
const MENU_CLOSE: &str = "✕";

// =============================================================================
// METRICS
// =============================================================================

/// Conversion between page pixels and text cells.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutMetrics {
    pub px_per_col: f32,
    pub px_per_row: f32,
}

impl LayoutMetrics {
    pub fn from_preview(preview: &PreviewConfig) -> Self {
        Self {
            px_per_col: preview.px_per_col.max(1.0),
            px_per_row: preview.px_per_row.max(1.0),
        }
    }

    /// Whole text columns that fit in `px`.
    pub fn cols_in(&self, px: f32) -> u16 {
        (px / self.px_per_col).floor().clamp(0.0, u16::MAX as f32) as u16
    }

    /// Measure wrapped text the way a Taffy leaf sees it.
    fn measure(
        &self,
        text: &str,
        known: Size<Option<f32>>,
        available: Size<AvailableSpace>,
    ) -> Size<f32> {
        if text.is_empty() {
            return Size::ZERO;
        }

        let max_cols = match known.width {
            Some(width) => self.cols_in(width),
            None => match available.width {
                AvailableSpace::Definite(width) => self.cols_in(width),
                AvailableSpace::MinContent => {
                    text.split_whitespace().map(string_width).max().unwrap_or(0)
                }
                AvailableSpace::MaxContent => u16::MAX,
            },
        };

        let lines = wrap_text(text, max_cols.max(1));
        let cols = lines.iter().map(|line| string_width(line)).max().unwrap_or(0);

        Size {
            width: known.width.unwrap_or(cols as f32 * self.px_per_col),
            height: known
                .height
                .unwrap_or(lines.len() as f32 * self.px_per_row),
        }
    }
}

impl Default for LayoutMetrics {
    fn default() -> Self {
        Self::from_preview(&PreviewConfig::default())
    }
}

/// Responsive tier of the viewport width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Breakpoint {
    Base,
    Md,
    Lg,
}

impl Breakpoint {
    pub fn from_width(width: f32) -> Self {
        if width >= BREAKPOINT_LG {
            Breakpoint::Lg
        } else if width >= BREAKPOINT_MD {
            Breakpoint::Md
        } else {
            Breakpoint::Base
        }
    }
}

/// Max width of the centered content container.
pub fn container_width(viewport_width: f32) -> f32 {
    [BREAKPOINT_2XL, BREAKPOINT_XL, BREAKPOINT_LG, BREAKPOINT_MD, BREAKPOINT_SM]
        .into_iter()
        .find(|&bp| viewport_width >= bp)
        .unwrap_or(viewport_width)
}

/// Column counts of the three grids.
pub fn grid_columns(section: SectionId, breakpoint: Breakpoint) -> usize {
    match (section, breakpoint) {
        (SectionId::Services, Breakpoint::Md | Breakpoint::Lg) => 3,
        (SectionId::Projects, Breakpoint::Lg) => 3,
        (SectionId::Projects, Breakpoint::Md) => 2,
        (SectionId::Footer, Breakpoint::Lg) => 4,
        _ => 1,
    }
}

// =============================================================================
// OUTPUT TYPES
// =============================================================================

/// How a piece of text is styled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextRole {
    Brand,
    Nav,
    MenuButton,
    MenuClose,
    MenuItem,
    Title,
    Subtitle,
    Heading,
    CardTitle,
    Body,
    Link,
    Button,
    Placeholder,
    PromoTitle,
    Caption,
}

/// Positioned, pre-wrapped text.
#[derive(Debug, Clone, PartialEq)]
pub struct TextBox {
    pub role: TextRole,
    pub text: String,
    pub rect: Rect,
    /// `text` wrapped to the box width.
    pub lines: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    HeroImage,
    Button,
    Card,
    Field,
    Promo,
}

/// A painted box with optional media area and text.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub kind: BlockKind,
    pub rect: Rect,
    /// Image placeholder inside the block.
    pub media: Option<Rect>,
    pub texts: Vec<TextBox>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SectionLayout {
    pub id: SectionId,
    pub rect: Rect,
    pub heading: Option<TextBox>,
    /// Free-standing text (hero copy, copyright).
    pub texts: Vec<TextBox>,
    pub blocks: Vec<Block>,
    /// Grid columns used for the section's cards.
    pub columns: usize,
}

impl SectionLayout {
    pub fn cards(&self) -> impl Iterator<Item = &Block> {
        self.blocks
            .iter()
            .filter(|b| matches!(b.kind, BlockKind::Card | BlockKind::Promo))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HeaderLayout {
    pub rect: Rect,
    pub brand: TextBox,
    /// Inline links (md and up).
    pub nav: Vec<TextBox>,
    /// Menu button (below md).
    pub menu_button: Option<TextBox>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MenuLayout {
    pub close: TextBox,
    pub items: Vec<TextBox>,
}

/// Complete page geometry for one viewport size.
///
/// Header and menu are in viewport coordinates, sections in document
/// coordinates (subtract the scroll position to place them on screen).
#[derive(Debug, Clone, PartialEq)]
pub struct PageLayout {
    pub viewport: Rect,
    pub breakpoint: Breakpoint,
    pub metrics: LayoutMetrics,
    pub header: HeaderLayout,
    pub menu: MenuLayout,
    pub sections: Vec<SectionLayout>,
    pub content_height: f32,
}

impl PageLayout {
    pub fn section(&self, id: SectionId) -> Option<&SectionLayout> {
        self.sections.iter().find(|s| s.id == id)
    }

    /// Largest valid scroll position.
    pub fn max_scroll(&self) -> f64 {
        (self.content_height - self.viewport.height).max(0.0) as f64
    }

    /// Viewport rectangle in document coordinates at `scroll`.
    pub fn visible_region(&self, scroll: f64) -> Rect {
        self.viewport.translate(0.0, scroll as f32)
    }
}

// =============================================================================
// BUILDER
// =============================================================================

struct PendingText {
    role: TextRole,
    node: NodeId,
}

struct PendingBlock {
    kind: BlockKind,
    node: NodeId,
    media: Option<NodeId>,
    texts: Vec<PendingText>,
}

struct PendingSection {
    id: SectionId,
    node: NodeId,
    heading: Option<PendingText>,
    texts: Vec<PendingText>,
    blocks: Vec<PendingBlock>,
    columns: usize,
}

fn px(value: f32) -> LengthPercentage {
    LengthPercentage::Length(value)
}

fn padding(vertical: f32, horizontal: f32) -> TaffyRect<LengthPercentage> {
    TaffyRect {
        top: px(vertical),
        right: px(horizontal),
        bottom: px(vertical),
        left: px(horizontal),
    }
}

fn margin_top(value: f32) -> TaffyRect<LengthPercentageAuto> {
    TaffyRect {
        top: LengthPercentageAuto::Length(value),
        right: LengthPercentageAuto::Length(0.0),
        bottom: LengthPercentageAuto::Length(0.0),
        left: LengthPercentageAuto::Length(0.0),
    }
}

fn column() -> Style {
    Style {
        display: Display::Flex,
        flex_direction: FlexDirection::Column,
        ..Default::default()
    }
}

fn row() -> Style {
    Style {
        display: Display::Flex,
        flex_direction: FlexDirection::Row,
        ..Default::default()
    }
}

fn fixed_width(width: f32) -> Size<Dimension> {
    Size {
        width: Dimension::Length(width),
        height: Dimension::Auto,
    }
}

struct Builder<'a> {
    tree: TaffyTree<String>,
    metrics: LayoutMetrics,
    content: &'a ContentConfig,
    width: f32,
    height: f32,
    breakpoint: Breakpoint,
}

impl<'a> Builder<'a> {
    fn text(&mut self, role: TextRole, text: &str, style: Style) -> Result<PendingText> {
        let node = self.tree.new_leaf_with_context(style, text.to_string())?;
        Ok(PendingText { role, node })
    }

    fn node(&mut self, style: Style, children: &[NodeId]) -> Result<NodeId> {
        Ok(self.tree.new_with_children(style, children)?)
    }

    /// Inner content width of the centered container.
    fn inner_width(&self) -> f32 {
        (container_width(self.width) - 2.0 * CONTAINER_PADDING).max(0.0)
    }

    fn container_style(&self) -> Style {
        Style {
            size: fixed_width(self.inner_width()),
            align_items: Some(AlignItems::Center),
            ..column()
        }
    }

    fn section_style(&self, vertical: f32) -> Style {
        Style {
            size: fixed_width(self.width),
            padding: padding(vertical, 0.0),
            align_items: Some(AlignItems::Center),
            ..column()
        }
    }

    fn heading(&mut self, text: &str) -> Result<PendingText> {
        let style = Style {
            margin: TaffyRect {
                bottom: LengthPercentageAuto::Length(HEADING_GAP),
                ..margin_top(0.0)
            },
            ..Default::default()
        };
        self.text(TextRole::Heading, text, style)
    }

    /// Width of one cell in a grid of `columns`.
    fn card_width(&self, columns: usize) -> f32 {
        let columns = columns.max(1) as f32;
        ((self.inner_width() - (columns - 1.0) * GRID_GAP) / columns).floor()
    }

    fn grid_style(&self) -> Style {
        Style {
            size: fixed_width(self.inner_width()),
            flex_wrap: FlexWrap::Wrap,
            gap: Size {
                width: px(GRID_GAP),
                height: px(GRID_GAP),
            },
            align_items: Some(AlignItems::Stretch),
            ..row()
        }
    }

    // -------------------------------------------------------------------------
    // Header
    // -------------------------------------------------------------------------

    fn header(&mut self) -> Result<(NodeId, PendingText, Vec<PendingText>, Option<PendingText>)> {
        let content = self.content;
        let brand = self.text(TextRole::Brand, &content.brand, Style::default())?;

        let mut nav = Vec::new();
        let mut menu_button = None;
        let right = if self.breakpoint >= Breakpoint::Md {
            for label in &content.nav {
                nav.push(self.text(TextRole::Nav, label, Style::default())?);
            }
            let children: Vec<NodeId> = nav.iter().map(|t| t.node).collect();
            self.node(
                Style {
                    gap: Size {
                        width: px(2.0 * self.metrics.px_per_col),
                        height: px(0.0),
                    },
                    ..row()
                },
                &children,
            )?
        } else {
            let button = self.text(TextRole::MenuButton, MENU_BUTTON, Style::default())?;
            let node = button.node;
            menu_button = Some(button);
            self.node(row(), &[node])?
        };

        let bar = self.node(
            Style {
                size: fixed_width(container_width(self.width)),
                padding: padding(
                    (HEADER_HEIGHT - self.metrics.px_per_row).max(0.0) / 2.0,
                    CONTAINER_PADDING,
                ),
                justify_content: Some(JustifyContent::SpaceBetween),
                align_items: Some(AlignItems::Center),
                ..row()
            },
            &[brand.node, right],
        )?;

        let root = self.node(
            Style {
                size: Size {
                    width: Dimension::Length(self.width),
                    height: Dimension::Length(HEADER_HEIGHT),
                },
                justify_content: Some(JustifyContent::Center),
                ..row()
            },
            &[bar],
        )?;

        Ok((root, brand, nav, menu_button))
    }

    // -------------------------------------------------------------------------
    // Sections
    // -------------------------------------------------------------------------

    fn hero(&mut self) -> Result<PendingSection> {
        let wide = self.breakpoint >= Breakpoint::Md;
        let content = self.content;

        let title = self.text(TextRole::Title, &content.hero_title, Style::default())?;
        let subtitle = self.text(
            TextRole::Subtitle,
            &content.hero_subtitle,
            Style {
                margin: TaffyRect {
                    bottom: LengthPercentageAuto::Length(2.0 * self.metrics.px_per_row),
                    ..margin_top(self.metrics.px_per_row)
                },
                ..Default::default()
            },
        )?;

        let cta_label = self.text(TextRole::Button, &content.hero_cta, Style::default())?;
        let cta = self.node(
            Style {
                padding: padding(self.metrics.px_per_row, 4.0 * self.metrics.px_per_col),
                ..row()
            },
            &[cta_label.node],
        )?;

        let copy = self.node(
            Style {
                size: if wide {
                    Size {
                        width: Dimension::Percent(0.5),
                        height: Dimension::Auto,
                    }
                } else {
                    Size::auto()
                },
                align_items: Some(AlignItems::FlexStart),
                ..column()
            },
            &[title.node, subtitle.node, cta],
        )?;

        let image = self.node(
            Style {
                size: Size {
                    width: Dimension::Percent(1.0),
                    height: Dimension::Length(HERO_IMAGE_HEIGHT),
                },
                ..Default::default()
            },
            &[],
        )?;
        let image_column = self.node(
            Style {
                size: Size {
                    width: Dimension::Percent(if wide { 0.5 } else { 1.0 }),
                    height: Dimension::Auto,
                },
                margin: margin_top(if wide { 0.0 } else { 3.0 * self.metrics.px_per_row }),
                ..column()
            },
            &[image],
        )?;

        let inner = self.node(
            Style {
                size: fixed_width(self.inner_width()),
                flex_direction: if wide {
                    FlexDirection::Row
                } else {
                    FlexDirection::Column
                },
                align_items: Some(if wide {
                    AlignItems::Center
                } else {
                    AlignItems::Stretch
                }),
                ..column()
            },
            &[copy, image_column],
        )?;

        let node = self.node(
            Style {
                size: fixed_width(self.width),
                min_size: Size {
                    width: Dimension::Auto,
                    height: Dimension::Length(self.height),
                },
                padding: TaffyRect {
                    top: px(HEADER_HEIGHT + self.metrics.px_per_row),
                    bottom: px(2.0 * self.metrics.px_per_row),
                    ..padding(0.0, 0.0)
                },
                justify_content: Some(JustifyContent::Center),
                align_items: Some(AlignItems::Center),
                ..column()
            },
            &[inner],
        )?;

        Ok(PendingSection {
            id: SectionId::Home,
            node,
            heading: None,
            texts: vec![title, subtitle],
            blocks: vec![
                PendingBlock {
                    kind: BlockKind::Button,
                    node: cta,
                    media: None,
                    texts: vec![cta_label],
                },
                PendingBlock {
                    kind: BlockKind::HeroImage,
                    node: image,
                    media: Some(image),
                    texts: vec![],
                },
            ],
            columns: if wide { 2 } else { 1 },
        })
    }

    fn card_grid(
        &mut self,
        id: SectionId,
        heading: &str,
        titles: &[String],
        blurb: &str,
        link: &str,
        media: bool,
    ) -> Result<PendingSection> {
        let columns = grid_columns(id, self.breakpoint);
        let card_width = self.card_width(columns);
        let row_px = self.metrics.px_per_row;
        let col_px = self.metrics.px_per_col;

        let heading = self.heading(heading)?;

        let mut blocks = Vec::with_capacity(titles.len());
        for title in titles {
            let title = self.text(TextRole::CardTitle, title, Style::default())?;
            let body = self.text(
                TextRole::Body,
                blurb,
                Style {
                    margin: margin_top(row_px),
                    ..Default::default()
                },
            )?;
            let link = self.text(
                TextRole::Link,
                link,
                Style {
                    margin: margin_top(row_px),
                    ..Default::default()
                },
            )?;
            let text_body = self.node(
                Style {
                    padding: padding(row_px, 3.0 * col_px),
                    align_items: Some(AlignItems::FlexStart),
                    ..column()
                },
                &[title.node, body.node, link.node],
            )?;

            let (media_node, children) = if media {
                let image = self.node(
                    Style {
                        size: Size {
                            width: Dimension::Percent(1.0),
                            height: Dimension::Length(PROJECT_IMAGE_HEIGHT),
                        },
                        ..Default::default()
                    },
                    &[],
                )?;
                (Some(image), vec![image, text_body])
            } else {
                (None, vec![text_body])
            };

            let card = self.node(
                Style {
                    size: fixed_width(card_width),
                    ..column()
                },
                &children,
            )?;

            blocks.push(PendingBlock {
                kind: BlockKind::Card,
                node: card,
                media: media_node,
                texts: vec![title, body, link],
            });
        }

        let grid_style = self.grid_style();
        let card_nodes: Vec<NodeId> = blocks.iter().map(|b| b.node).collect();
        let grid = self.node(grid_style, &card_nodes)?;

        let container_style = self.container_style();
        let container = self.node(container_style, &[heading.node, grid])?;
        let section_style = self.section_style(SECTION_PADDING);
        let node = self.node(section_style, &[container])?;

        Ok(PendingSection {
            id,
            node,
            heading: Some(heading),
            texts: vec![],
            blocks,
            columns,
        })
    }

    fn contact(&mut self) -> Result<PendingSection> {
        let content = self.content;
        let row_px = self.metrics.px_per_row;
        let col_px = self.metrics.px_per_col;
        let form_width = self.inner_width().min(FORM_MAX_WIDTH);

        let heading = self.heading(&content.contact_heading)?;

        let mut blocks = Vec::new();
        for field in &content.contact_fields {
            let placeholder = self.text(TextRole::Placeholder, &field.placeholder, Style::default())?;
            let node = self.node(
                Style {
                    min_size: Size {
                        width: Dimension::Auto,
                        height: Dimension::Length(
                            (field.rows.max(1) as f32 + 2.0) * row_px,
                        ),
                    },
                    padding: padding(row_px, 2.0 * col_px),
                    margin: TaffyRect {
                        bottom: LengthPercentageAuto::Length(row_px),
                        ..margin_top(0.0)
                    },
                    ..column()
                },
                &[placeholder.node],
            )?;
            blocks.push(PendingBlock {
                kind: BlockKind::Field,
                node,
                media: None,
                texts: vec![placeholder],
            });
        }

        let submit_label = self.text(TextRole::Button, &content.contact_submit, Style::default())?;
        let submit = self.node(
            Style {
                padding: padding(row_px, 3.0 * col_px),
                align_items: Some(AlignItems::Center),
                ..column()
            },
            &[submit_label.node],
        )?;
        blocks.push(PendingBlock {
            kind: BlockKind::Button,
            node: submit,
            media: None,
            texts: vec![submit_label],
        });

        let children: Vec<NodeId> = blocks.iter().map(|b| b.node).collect();
        let form = self.node(
            Style {
                size: fixed_width(form_width),
                ..column()
            },
            &children,
        )?;

        let container_style = self.container_style();
        let container = self.node(container_style, &[heading.node, form])?;
        let section_style = self.section_style(SECTION_PADDING);
        let node = self.node(section_style, &[container])?;

        Ok(PendingSection {
            id: SectionId::Contact,
            node,
            heading: Some(heading),
            texts: vec![],
            blocks,
            columns: 1,
        })
    }

    fn footer(&mut self) -> Result<PendingSection> {
        let content = self.content;
        let columns = grid_columns(SectionId::Footer, self.breakpoint);
        let card_width = self.card_width(columns);
        let row_px = self.metrics.px_per_row;
        let col_px = self.metrics.px_per_col;

        let mut blocks = Vec::new();
        for promo in &content.promo_links {
            let title = self.text(TextRole::PromoTitle, &promo.title, Style::default())?;
            let description = self.text(
                TextRole::Body,
                &promo.description,
                Style {
                    margin: margin_top(row_px / 2.0),
                    ..Default::default()
                },
            )?;
            let node = self.node(
                Style {
                    size: fixed_width(card_width),
                    padding: padding(row_px, 2.0 * col_px),
                    ..column()
                },
                &[title.node, description.node],
            )?;
            blocks.push(PendingBlock {
                kind: BlockKind::Promo,
                node,
                media: None,
                texts: vec![title, description],
            });
        }

        let grid_style = self.grid_style();
        let promo_nodes: Vec<NodeId> = blocks.iter().map(|b| b.node).collect();
        let grid = self.node(grid_style, &promo_nodes)?;

        let copyright = self.text(
            TextRole::Caption,
            &content.copyright,
            Style {
                margin: margin_top(FOOTER_PADDING),
                ..Default::default()
            },
        )?;

        let container_style = self.container_style();
        let container = self.node(container_style, &[grid, copyright.node])?;
        let section_style = self.section_style(FOOTER_PADDING);
        let node = self.node(section_style, &[container])?;

        Ok(PendingSection {
            id: SectionId::Footer,
            node,
            heading: None,
            texts: vec![copyright],
            blocks,
            columns,
        })
    }

    // -------------------------------------------------------------------------
    // Menu overlay
    // -------------------------------------------------------------------------

    fn menu(&mut self) -> Result<(NodeId, PendingText, Vec<PendingText>)> {
        let row_px = self.metrics.px_per_row;
        let col_px = self.metrics.px_per_col;

        let close = self.text(
            TextRole::MenuClose,
            MENU_CLOSE,
            Style {
                position: taffy::Position::Absolute,
                inset: TaffyRect {
                    top: LengthPercentageAuto::Length(row_px),
                    right: LengthPercentageAuto::Length(2.0 * col_px),
                    bottom: LengthPercentageAuto::Auto,
                    left: LengthPercentageAuto::Auto,
                },
                ..Default::default()
            },
        )?;

        let content = self.content;
        let mut items = Vec::with_capacity(content.nav.len());
        for label in &content.nav {
            items.push(self.text(TextRole::MenuItem, label, Style::default())?);
        }
        let item_nodes: Vec<NodeId> = items.iter().map(|t| t.node).collect();
        let nav = self.node(
            Style {
                gap: Size {
                    width: px(0.0),
                    height: px(2.0 * row_px),
                },
                align_items: Some(AlignItems::Center),
                ..column()
            },
            &item_nodes,
        )?;

        let root = self.node(
            Style {
                size: Size {
                    width: Dimension::Length(self.width),
                    height: Dimension::Length(self.height),
                },
                justify_content: Some(JustifyContent::Center),
                align_items: Some(AlignItems::Center),
                ..column()
            },
            &[nav, close.node],
        )?;

        Ok((root, close, items))
    }

    // -------------------------------------------------------------------------
    // Compute + extract
    // -------------------------------------------------------------------------

    fn compute(&mut self, root: NodeId) -> Result<()> {
        let metrics = self.metrics;
        let available = Size {
            width: AvailableSpace::Definite(self.width),
            height: AvailableSpace::MaxContent,
        };

        self.tree.compute_layout_with_measure(
            root,
            available,
            |known, available, _node, context: Option<&mut String>, _style| match context {
                Some(text) => metrics.measure(text, known, available),
                None => Size::ZERO,
            },
        )?;
        Ok(())
    }

    /// Absolute rectangle of `node` (sums parent offsets up to its root).
    fn rect(&self, node: NodeId) -> Result<Rect> {
        let layout = self.tree.layout(node)?;
        let mut x = layout.location.x;
        let mut y = layout.location.y;

        let mut current = self.tree.parent(node);
        while let Some(parent) = current {
            let parent_layout = self.tree.layout(parent)?;
            x += parent_layout.location.x;
            y += parent_layout.location.y;
            current = self.tree.parent(parent);
        }

        Ok(Rect::new(x, y, layout.size.width, layout.size.height))
    }

    fn text_box(&self, pending: &PendingText) -> Result<TextBox> {
        let rect = self.rect(pending.node)?;
        let text = self
            .tree
            .get_node_context(pending.node)
            .cloned()
            .unwrap_or_default();
        let lines = wrap_text(&text, self.metrics.cols_in(rect.width).max(1));
        Ok(TextBox {
            role: pending.role,
            text,
            rect,
            lines,
        })
    }

    fn block(&self, pending: &PendingBlock) -> Result<Block> {
        Ok(Block {
            kind: pending.kind,
            rect: self.rect(pending.node)?,
            media: pending.media.map(|node| self.rect(node)).transpose()?,
            texts: pending
                .texts
                .iter()
                .map(|t| self.text_box(t))
                .collect::<Result<_>>()?,
        })
    }

    fn section(&self, pending: &PendingSection) -> Result<SectionLayout> {
        Ok(SectionLayout {
            id: pending.id,
            rect: self.rect(pending.node)?,
            heading: pending.heading.as_ref().map(|h| self.text_box(h)).transpose()?,
            texts: pending
                .texts
                .iter()
                .map(|t| self.text_box(t))
                .collect::<Result<_>>()?,
            blocks: pending
                .blocks
                .iter()
                .map(|b| self.block(b))
                .collect::<Result<_>>()?,
            columns: pending.columns,
        })
    }
}

// =============================================================================
// MAIN ENTRY POINT
// =============================================================================

/// Compute the page layout for a viewport of `width` × `height` page pixels.
pub fn compute_page_layout(
    content: &ContentConfig,
    metrics: LayoutMetrics,
    width: f32,
    height: f32,
) -> Result<PageLayout> {
    let width = if width.is_finite() { width.max(0.0) } else { 0.0 };
    let height = if height.is_finite() { height.max(0.0) } else { 0.0 };
    let breakpoint = Breakpoint::from_width(width);

    let mut builder = Builder {
        tree: TaffyTree::new(),
        metrics,
        content,
        width,
        height,
        breakpoint,
    };

    // Header
    let (header_root, brand, nav, menu_button) = builder.header()?;
    builder.compute(header_root)?;

    // Document
    let sections = vec![
        builder.hero()?,
        builder.card_grid(
            SectionId::Services,
            &content.services_heading,
            &content.services,
            &content.service_blurb,
            &content.service_link,
            false,
        )?,
        builder.card_grid(
            SectionId::Projects,
            &content.projects_heading,
            &content.projects,
            &content.project_blurb,
            &content.project_link,
            true,
        )?,
        builder.contact()?,
        builder.footer()?,
    ];
    let section_nodes: Vec<NodeId> = sections.iter().map(|s| s.node).collect();
    let page_root = builder.node(
        Style {
            size: fixed_width(width),
            ..column()
        },
        &section_nodes,
    )?;
    builder.compute(page_root)?;

    // Overlay
    let (menu_root, close, items) = builder.menu()?;
    builder.compute(menu_root)?;

    let layout = PageLayout {
        viewport: Rect::new(0.0, 0.0, width, height),
        breakpoint,
        metrics,
        header: HeaderLayout {
            rect: builder.rect(header_root)?,
            brand: builder.text_box(&brand)?,
            nav: nav
                .iter()
                .map(|t| builder.text_box(t))
                .collect::<Result<_>>()?,
            menu_button: menu_button
                .as_ref()
                .map(|t| builder.text_box(t))
                .transpose()?,
        },
        menu: MenuLayout {
            close: builder.text_box(&close)?,
            items: items
                .iter()
                .map(|t| builder.text_box(t))
                .collect::<Result<_>>()?,
        },
        sections: sections
            .iter()
            .map(|s| builder.section(s))
            .collect::<Result<_>>()?,
        content_height: builder.tree.layout(page_root)?.size.height,
    };

    tracing::debug!(
        width,
        height,
        ?breakpoint,
        content_height = layout.content_height,
        "page layout computed"
    );

    Ok(layout)
}
