//! Page Shell - Composition root of the page.
//!
//! Owns every piece of page state and wires them together:
//!
//! - scroll input → [`ScrollTracker`] → header slide + reveal checks
//! - menu toggles → [`MenuController`] (+ scroll lock) → overlay animation
//! - pointer input → hover/press on nav links, gesture feedback on buttons,
//!   cards, links and form fields, clicks on menu targets
//! - viewport size → [`PageLayout`]
//!
//! The shell never touches a terminal. [`PageShell::view`] returns a plain
//! [`PageView`] snapshot; reading it inside a `derived` tracks every signal
//! the page depends on (scroll, menu, hover, reveal latches, clock).

use std::cell::Cell;
use std::rc::Rc;

use spark_signals::{signal, Signal};

use crate::animation::{AnimationClock, MotionControls, MotionValues};
use crate::config::{GestureTargets, PageConfig};
use crate::error::Result;
use crate::layout::{LayoutMetrics, PageLayout, compute_page_layout};
use crate::primitives::{
    AnimatedText, FlipLink, GestureMotion, MotionElement, MotionTrigger, animated_text,
};
use crate::state::{
    DocumentRoot, HitTarget, InViewTracker, MenuController, PointerTracker, ScrollTracker,
    ViewportRevealTracker,
};

use super::sections::SectionId;
use super::view::{GestureView, LetterView, MenuView, NavLinkView, PageView, SectionView};

/// Viewport used until the first `set_viewport`.
pub const DEFAULT_VIEWPORT: (f32, f32) = (1280.0, 800.0);

const RISE: MotionValues = MotionValues::REST.opacity(0.0).y(20.0);
const MENU_ITEM_HIDDEN: MotionValues = MotionValues::REST.opacity(0.0).x(-50.0);
const OVERLAY_HIDDEN: MotionValues = MotionValues::REST.opacity(0.0);

/// Heading + card entrances of one content section.
struct SectionMotion {
    id: SectionId,
    heading: MotionElement,
    cards: Vec<MotionElement>,
}

impl SectionMotion {
    fn sync(&self) {
        self.heading.sync();
        for card in &self.cards {
            card.sync();
        }
    }

    fn is_animating(&self) -> bool {
        self.heading.is_animating() || self.cards.iter().any(|c| c.is_animating())
    }

    fn view(&self) -> SectionView {
        SectionView {
            id: self.id,
            heading: self.heading.values(),
            cards: self.cards.iter().map(|c| c.values()).collect(),
        }
    }
}

fn nth(list: &[GestureMotion], i: usize) -> Vec<&GestureMotion> {
    list.get(i).into_iter().collect()
}

/// Hover / tap / focus feedback of every interactive element except nav links.
struct PageGestures {
    menu_toggle: GestureMotion,
    menu_close: GestureMotion,
    menu_items: Vec<GestureMotion>,
    hero_cta: GestureMotion,
    service_cards: Vec<GestureMotion>,
    service_links: Vec<GestureMotion>,
    project_cards: Vec<GestureMotion>,
    project_images: Vec<GestureMotion>,
    project_links: Vec<GestureMotion>,
    fields: Vec<GestureMotion>,
    submit: GestureMotion,
}

impl PageGestures {
    fn new(config: &PageConfig, clock: &AnimationClock) -> Self {
        let gesture = &config.motion.gesture;
        let one =
            |targets: GestureTargets| GestureMotion::new(targets, gesture.transition, clock.clone());
        let many = |count: usize, targets: GestureTargets| {
            (0..count).map(|_| one(targets)).collect::<Vec<_>>()
        };

        let content = &config.content;
        Self {
            menu_toggle: one(gesture.menu_button),
            menu_close: one(gesture.menu_button),
            menu_items: many(content.nav.len(), gesture.menu_button),
            hero_cta: one(gesture.button),
            service_cards: many(content.services.len(), gesture.service_card),
            service_links: many(content.services.len(), gesture.card_link),
            project_cards: many(content.projects.len(), gesture.project_card),
            project_images: many(content.projects.len(), gesture.project_image),
            project_links: many(content.projects.len(), gesture.card_link),
            fields: many(content.contact_fields.len(), gesture.field),
            submit: one(gesture.button),
        }
    }

    /// Elements that react to pointer gestures on `target`.
    fn for_target(&self, target: HitTarget) -> Vec<&GestureMotion> {
        match target {
            HitTarget::NavLink(_) => Vec::new(),
            HitTarget::MenuToggle => vec![&self.menu_toggle],
            HitTarget::MenuClose => vec![&self.menu_close],
            HitTarget::MenuItem(i) => nth(&self.menu_items, i),
            HitTarget::HeroCta => vec![&self.hero_cta],
            HitTarget::ServiceCard(i) => nth(&self.service_cards, i),
            HitTarget::ServiceLink(i) => nth(&self.service_links, i),
            // The card image zooms while its card is hovered
            HitTarget::ProjectCard(i) => self
                .project_cards
                .get(i)
                .into_iter()
                .chain(self.project_images.get(i))
                .collect(),
            HitTarget::ProjectLink(i) => nth(&self.project_links, i),
            HitTarget::Field(i) => nth(&self.fields, i),
            HitTarget::Submit => vec![&self.submit],
        }
    }

    fn all(&self) -> impl Iterator<Item = &GestureMotion> {
        [&self.menu_toggle, &self.menu_close, &self.hero_cta, &self.submit]
            .into_iter()
            .chain(&self.menu_items)
            .chain(&self.service_cards)
            .chain(&self.service_links)
            .chain(&self.project_cards)
            .chain(&self.project_images)
            .chain(&self.project_links)
            .chain(&self.fields)
    }

    fn view(&self) -> GestureView {
        let values = |list: &[GestureMotion]| -> Vec<MotionValues> {
            list.iter().map(GestureMotion::values).collect()
        };
        GestureView {
            menu_toggle: self.menu_toggle.values(),
            hero_cta: self.hero_cta.values(),
            service_cards: values(&self.service_cards),
            service_links: values(&self.service_links),
            project_cards: values(&self.project_cards),
            project_images: values(&self.project_images),
            project_links: values(&self.project_links),
            fields: values(&self.fields),
            submit: self.submit.values(),
        }
    }
}

pub struct PageShell {
    config: PageConfig,
    metrics: LayoutMetrics,
    clock: AnimationClock,
    root: DocumentRoot,
    layout: Signal<Rc<PageLayout>>,

    scroll: ScrollTracker,
    header: MotionControls,
    header_shown: Cell<bool>,

    menu: MenuController,
    menu_overlay: MotionControls,
    menu_items: Vec<MotionControls>,

    services_reveal: ViewportRevealTracker,
    projects_reveal: ViewportRevealTracker,
    contact_in_view: InViewTracker,

    pointer: PointerTracker,
    pressed: Cell<Option<HitTarget>>,
    focused_field: Cell<Option<usize>>,
    nav_links: Vec<FlipLink>,
    gestures: PageGestures,

    mounted_at: f64,
    brand: MotionElement,
    headline: AnimatedText,
    hero_copy: MotionElement,
    hero_subtitle: MotionElement,
    hero_image: MotionElement,
    hero_float: MotionElement,
    sections: Vec<SectionMotion>,
}

impl PageShell {
    /// Build the page and start its mount animations at the clock's current time.
    pub fn new(config: PageConfig, root: DocumentRoot, clock: AnimationClock) -> Result<Self> {
        let metrics = LayoutMetrics::from_preview(&config.preview);
        let (width, height) = DEFAULT_VIEWPORT;
        let layout = compute_page_layout(&config.content, metrics, width, height)?;

        let motion = &config.motion;
        let entrance = &motion.entrance;

        let services_reveal = ViewportRevealTracker::new("services", &motion.reveal);
        let projects_reveal = ViewportRevealTracker::new("projects", &motion.reveal);
        let contact_in_view = InViewTracker::new(&motion.reveal);
        services_reveal.observe();
        projects_reveal.observe();

        let cards = |count: usize, initial: MotionValues, latch: &Signal<bool>| {
            (0..count)
                .map(|i| {
                    MotionElement::new(
                        clock.clone(),
                        initial,
                        MotionValues::REST,
                        entrance
                            .card
                            .with_delay(entrance.card.delay + i as f32 * entrance.card_stagger),
                        MotionTrigger::Latch(latch.clone()),
                    )
                })
                .collect::<Vec<_>>()
        };

        let services_latch = services_reveal.triggered_signal();
        let projects_latch = projects_reveal.triggered_signal();
        let sections = vec![
            SectionMotion {
                id: SectionId::Services,
                heading: MotionElement::new(
                    clock.clone(),
                    RISE,
                    MotionValues::REST,
                    entrance.heading,
                    MotionTrigger::Latch(services_latch.clone()),
                ),
                cards: cards(config.content.services.len(), RISE, &services_latch),
            },
            SectionMotion {
                id: SectionId::Projects,
                heading: MotionElement::new(
                    clock.clone(),
                    RISE,
                    MotionValues::REST,
                    entrance.heading,
                    MotionTrigger::Latch(projects_latch.clone()),
                ),
                cards: cards(
                    config.content.projects.len(),
                    MotionValues::REST.opacity(0.0).scale(0.9),
                    &projects_latch,
                ),
            },
            SectionMotion {
                id: SectionId::Contact,
                heading: MotionElement::new(
                    clock.clone(),
                    RISE,
                    MotionValues::REST,
                    entrance.heading,
                    MotionTrigger::InView(contact_in_view.in_view_signal()),
                ),
                cards: Vec::new(),
            },
        ];

        let nav_links = config
            .content
            .nav
            .iter()
            .map(|label| {
                let href = SectionId::from_anchor(label)
                    .map(SectionId::anchor)
                    .unwrap_or("#");
                FlipLink::new(label, href, motion.flip, clock.clone())
            })
            .collect();

        let menu_items = config
            .content
            .nav
            .iter()
            .map(|_| MotionControls::new(clock.clone(), MENU_ITEM_HIDDEN))
            .collect();

        let shell = Self {
            metrics,
            root: root.clone(),
            layout: signal(Rc::new(layout)),

            scroll: ScrollTracker::new(motion.scroll),
            header: MotionControls::new(clock.clone(), MotionValues::REST),
            header_shown: Cell::new(true),

            menu: MenuController::new(root),
            menu_overlay: MotionControls::new(clock.clone(), OVERLAY_HIDDEN),
            menu_items,

            services_reveal,
            projects_reveal,
            contact_in_view,

            pointer: PointerTracker::new(),
            pressed: Cell::new(None),
            focused_field: Cell::new(None),
            nav_links,
            gestures: PageGestures::new(&config, &clock),

            mounted_at: clock.now(),
            brand: MotionElement::on_mount(
                clock.clone(),
                MotionValues::REST.opacity(0.0).x(-20.0),
                entrance.brand,
            ),
            headline: animated_text(&config.content.hero_title, &motion.stagger),
            hero_copy: MotionElement::on_mount(clock.clone(), RISE, entrance.hero),
            hero_subtitle: MotionElement::on_mount(clock.clone(), RISE, entrance.hero_subtitle),
            hero_image: MotionElement::on_mount(
                clock.clone(),
                MotionValues::REST.opacity(0.0).scale(0.8),
                entrance.hero_image,
            ),
            hero_float: MotionElement::new(
                clock.clone(),
                MotionValues::REST,
                MotionValues::REST.y(-10.0).rotate(5.0),
                entrance.hero_float,
                MotionTrigger::Mount,
            ),
            sections,

            clock,
            config,
        };

        shell.check_regions();
        tracing::info!(
            sections = SectionId::ALL.len(),
            nav = shell.nav_links.len(),
            "page shell mounted"
        );
        Ok(shell)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn config(&self) -> &PageConfig {
        &self.config
    }

    pub fn metrics(&self) -> LayoutMetrics {
        self.metrics
    }

    pub fn clock(&self) -> &AnimationClock {
        &self.clock
    }

    pub fn root(&self) -> &DocumentRoot {
        &self.root
    }

    /// Current layout (tracked when read inside a derived).
    pub fn layout(&self) -> Rc<PageLayout> {
        self.layout.get()
    }

    pub fn scroll_tracker(&self) -> &ScrollTracker {
        &self.scroll
    }

    pub fn menu(&self) -> &MenuController {
        &self.menu
    }

    pub fn services_reveal(&self) -> &ViewportRevealTracker {
        &self.services_reveal
    }

    pub fn projects_reveal(&self) -> &ViewportRevealTracker {
        &self.projects_reveal
    }

    pub fn contact_in_view(&self) -> &InViewTracker {
        &self.contact_in_view
    }

    pub fn nav_links(&self) -> &[FlipLink] {
        &self.nav_links
    }

    pub fn scroll_position(&self) -> f64 {
        self.scroll.position()
    }

    // =========================================================================
    // Viewport + scroll
    // =========================================================================

    /// Resize the viewport (page pixels) and recompute layout.
    pub fn set_viewport(&self, width: f32, height: f32) -> Result<()> {
        let layout = compute_page_layout(&self.config.content, self.metrics, width, height)?;
        let max = layout.max_scroll();
        self.layout.set(Rc::new(layout));

        // A shorter document may leave us past the end
        if self.scroll.position() > max {
            self.scroll.update(max);
            self.sync_header();
        }
        self.check_regions();
        Ok(())
    }

    /// Scroll to an absolute position, clamped to the document.
    ///
    /// Ignored while the page scroll is locked or for non-finite input.
    pub fn scroll_to(&self, position: f64) {
        if !position.is_finite() {
            tracing::trace!(position, "ignoring non-finite scroll target");
            return;
        }
        if self.root.is_scroll_locked() {
            tracing::trace!(position, "scroll ignored while locked");
            return;
        }

        let max = self.layout.get().max_scroll();
        self.scroll.update(position.clamp(0.0, max));
        self.sync_header();
        self.check_regions();
    }

    pub fn scroll_by(&self, delta: f64) {
        self.scroll_to(self.scroll.position() + delta);
    }

    /// Scroll so the section starts at the top of the viewport.
    pub fn scroll_to_section(&self, id: SectionId) {
        let Some(top) = self.layout.get().section(id).map(|s| s.rect.y) else {
            return;
        };
        tracing::debug!(section = ?id, top, "navigating");
        self.scroll_to(top as f64);
    }

    /// Follow nav link `index`.
    fn navigate(&self, index: usize) {
        let target = self
            .config
            .content
            .nav
            .get(index)
            .and_then(|label| SectionId::from_anchor(label));
        if let Some(id) = target {
            self.scroll_to_section(id);
        }
    }

    fn sync_header(&self) {
        let visible = self.scroll.header_visible();
        if visible == self.header_shown.get() {
            return;
        }
        self.header_shown.set(visible);
        self.header.start(
            MotionValues::REST.y(self.scroll.header_offset()),
            self.config.motion.scroll.header,
        );
    }

    /// Run reveal checks against the visible region and update entrances.
    fn check_regions(&self) {
        let layout = self.layout.get();
        let visible = layout.visible_region(self.scroll.position());

        if let Some(section) = layout.section(SectionId::Services) {
            self.services_reveal.check(&section.rect, &visible);
        }
        if let Some(section) = layout.section(SectionId::Projects) {
            self.projects_reveal.check(&section.rect, &visible);
        }
        if let Some(heading) = layout
            .section(SectionId::Contact)
            .and_then(|s| s.heading.as_ref())
        {
            self.contact_in_view.check(&heading.rect, &visible);
        }

        for section in &self.sections {
            section.sync();
        }
    }

    // =========================================================================
    // Menu
    // =========================================================================

    pub fn toggle_menu(&self) {
        if self.menu.is_open() {
            self.close_menu();
        } else {
            self.open_menu();
        }
    }

    pub fn open_menu(&self) {
        if self.menu.is_open() {
            return;
        }
        self.menu.open();

        let entrance = &self.config.motion.entrance;
        self.menu_overlay.start(MotionValues::REST, entrance.menu_fade);
        for (i, item) in self.menu_items.iter().enumerate() {
            item.set(MENU_ITEM_HIDDEN);
            item.start(
                MotionValues::REST,
                entrance
                    .menu_item
                    .with_delay(entrance.menu_item.delay + i as f32 * entrance.menu_item_stagger),
            );
        }
    }

    /// Close the menu. Idempotent.
    pub fn close_menu(&self) {
        let was_open = self.menu.is_open();
        self.menu.close();
        if was_open {
            self.menu_overlay
                .start(OVERLAY_HIDDEN, self.config.motion.entrance.menu_fade);
        }
    }

    // =========================================================================
    // Pointer
    // =========================================================================

    /// Pointer moved onto `target` (or off every target).
    ///
    /// Card links hover their card too, so moving from a link onto the rest
    /// of its card keeps the card hovered.
    pub fn pointer_move(&self, target: Option<HitTarget>) {
        let change = self.pointer.move_to(target);
        if change.is_empty() {
            return;
        }

        let entered: Vec<HitTarget> = HitTarget::chain(change.entered).collect();
        for left in HitTarget::chain(change.left).filter(|t| !entered.contains(t)) {
            self.hover_end(left);
        }
        for target in entered {
            self.hover_start(target);
        }
    }

    pub fn pointer_down(&self, target: Option<HitTarget>) {
        self.pointer_move(target);
        self.pressed.set(target);

        // Pressing anywhere moves focus; only fields take it
        let field = match target {
            Some(HitTarget::Field(i)) => Some(i),
            _ => None,
        };
        self.focus_field(field);

        let Some(target) = target else {
            return;
        };
        match target {
            HitTarget::NavLink(i) => {
                if let Some(link) = self.nav_links.get(i) {
                    link.press();
                }
            }
            _ => self.gestures.for_target(target).iter().for_each(|g| g.press()),
        }
    }

    /// Pointer released. A press and release on the same target is a click.
    pub fn pointer_up(&self, target: Option<HitTarget>) {
        let pressed = self.pressed.take();

        match pressed {
            Some(HitTarget::NavLink(i)) => {
                if let Some(link) = self.nav_links.get(i) {
                    link.release();
                }
            }
            Some(other) => self.gestures.for_target(other).iter().for_each(|g| g.release()),
            None => {}
        }

        if let Some(clicked) = pressed
            && pressed == target
        {
            self.activate(clicked);
        }
    }

    /// Index of the focused form field.
    pub fn focused_field(&self) -> Option<usize> {
        self.focused_field.get()
    }

    fn focus_field(&self, index: Option<usize>) {
        let previous = self.focused_field.replace(index);
        if previous == index {
            return;
        }
        if let Some(field) = previous.and_then(|i| self.gestures.fields.get(i)) {
            field.blur();
        }
        if let Some(field) = index.and_then(|i| self.gestures.fields.get(i)) {
            field.focus();
        }
    }

    fn hover_start(&self, target: HitTarget) {
        match target {
            HitTarget::NavLink(i) => {
                if let Some(link) = self.nav_links.get(i) {
                    link.hover_start();
                }
            }
            _ => self.gestures.for_target(target).iter().for_each(|g| g.hover_start()),
        }
    }

    fn hover_end(&self, target: HitTarget) {
        match target {
            HitTarget::NavLink(i) => {
                if let Some(link) = self.nav_links.get(i) {
                    link.hover_end();
                }
            }
            _ => self.gestures.for_target(target).iter().for_each(|g| g.hover_end()),
        }
    }

    fn activate(&self, target: HitTarget) {
        tracing::debug!(?target, "click");
        match target {
            HitTarget::NavLink(i) => self.navigate(i),
            HitTarget::MenuToggle => self.toggle_menu(),
            HitTarget::MenuClose => self.close_menu(),
            HitTarget::MenuItem(i) => {
                // Unlock first so the jump is not swallowed
                self.close_menu();
                self.navigate(i);
            }
            // Presentational: gesture feedback only
            HitTarget::HeroCta
            | HitTarget::ServiceCard(_)
            | HitTarget::ServiceLink(_)
            | HitTarget::ProjectCard(_)
            | HitTarget::ProjectLink(_)
            | HitTarget::Field(_)
            | HitTarget::Submit => {}
        }
    }

    // =========================================================================
    // View
    // =========================================================================

    /// Snapshot the page at the clock's current time.
    pub fn view(&self) -> PageView {
        let elapsed = self.clock.now() - self.mounted_at;

        let overlay = self.menu_overlay.values();
        let open = self.menu.is_open();
        let menu = (open || overlay.opacity > 0.0).then(|| MenuView {
            open,
            overlay,
            close: self.gestures.menu_close.values(),
            items: self
                .menu_items
                .iter()
                .zip(&self.gestures.menu_items)
                .map(|(entrance, gesture)| entrance.values().stack(&gesture.values()))
                .collect(),
        });

        let entrance = self.hero_image.values();
        let float = self.hero_float.values();

        PageView {
            scroll: self.scroll.position(),
            scrolled: self.scroll.scrolled(),
            header_visible: self.scroll.header_visible(),
            header: self.header.values(),
            brand: self.brand.values(),
            nav: self
                .nav_links
                .iter()
                .map(|link| NavLinkView {
                    label: link.label().to_string(),
                    href: link.href().to_string(),
                    visual: link.visual(),
                })
                .collect(),
            menu,
            scroll_locked: self.root.is_scroll_locked(),
            headline: self
                .headline
                .letters()
                .iter()
                .map(|letter| LetterView {
                    glyph: letter.glyph,
                    values: letter.sample(elapsed),
                })
                .collect(),
            hero_copy: self.hero_copy.values(),
            hero_subtitle: self.hero_subtitle.values(),
            hero_image: entrance.y(entrance.y + float.y).rotate(entrance.rotate + float.rotate),
            sections: self.sections.iter().map(SectionMotion::view).collect(),
            gestures: self.gestures.view(),
        }
    }

    /// Check if anything on the page is still moving.
    pub fn is_animating(&self) -> bool {
        let elapsed = self.clock.now() - self.mounted_at;

        !self.headline.is_settled(elapsed)
            || self.header.is_animating()
            || self.brand.is_animating()
            || self.hero_copy.is_animating()
            || self.hero_subtitle.is_animating()
            || self.hero_image.is_animating()
            || self.hero_float.is_animating()
            || self.menu_overlay.is_animating()
            || self.menu_items.iter().any(|c| c.is_animating())
            || self.nav_links.iter().any(|l| l.is_animating())
            || self.sections.iter().any(|s| s.is_animating())
            || self.gestures.all().any(|g| g.is_animating())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Overflow;

    fn setup() -> (AnimationClock, DocumentRoot, PageShell) {
        let clock = AnimationClock::new();
        let root = DocumentRoot::new();
        let shell =
            PageShell::new(PageConfig::default(), root.clone(), clock.clone()).expect("shell");
        shell.set_viewport(1280.0, 640.0).expect("viewport");
        (clock, root, shell)
    }

    fn section_top(shell: &PageShell, id: SectionId) -> f64 {
        shell.layout().section(id).expect("section").rect.y as f64
    }

    #[test]
    fn test_initial_state() {
        let (_clock, root, shell) = setup();
        let view = shell.view();

        assert_eq!(view.scroll, 0.0);
        assert!(!view.scrolled);
        assert!(view.header_visible);
        assert!(view.menu.is_none());
        assert_eq!(root.overflow(), Overflow::Unset);
        assert_eq!(view.headline_text().chars().count(), 37);
        assert_eq!(view.nav.len(), 4);
        assert_eq!(view.nav[1].href, "#services");
    }

    #[test]
    fn test_scroll_hides_header_and_sets_scrolled() {
        let (clock, _root, shell) = setup();

        shell.scroll_to(300.0);
        let view = shell.view();
        assert!(view.scrolled);
        assert!(!view.header_visible);

        clock.set_time(5.0);
        assert_eq!(shell.view().header.y, -100.0);

        shell.scroll_by(-100.0);
        assert!(shell.view().header_visible);
    }

    #[test]
    fn test_scroll_clamped() {
        let (_clock, _root, shell) = setup();

        shell.scroll_to(-50.0);
        assert_eq!(shell.scroll_position(), 0.0);

        shell.scroll_to(1.0e9);
        assert_eq!(shell.scroll_position(), shell.layout().max_scroll());

        shell.scroll_to(f64::NAN);
        assert_eq!(shell.scroll_position(), shell.layout().max_scroll());
    }

    #[test]
    fn test_scroll_ignored_while_menu_open() {
        let (_clock, root, shell) = setup();

        shell.toggle_menu();
        assert!(root.is_scroll_locked());

        shell.scroll_to(500.0);
        assert_eq!(shell.scroll_position(), 0.0);

        shell.toggle_menu();
        assert!(!root.is_scroll_locked());
        shell.scroll_to(500.0);
        assert_eq!(shell.scroll_position(), 500.0);
    }

    #[test]
    fn test_menu_item_click_closes_and_navigates() {
        let (_clock, root, shell) = setup();
        shell.open_menu();

        shell.pointer_down(Some(HitTarget::MenuItem(1)));
        shell.pointer_up(Some(HitTarget::MenuItem(1)));

        assert!(!shell.menu().is_open());
        assert!(!root.is_scroll_locked());
        assert_eq!(shell.scroll_position(), section_top(&shell, SectionId::Services));
    }

    #[test]
    fn test_release_elsewhere_is_not_a_click() {
        let (_clock, _root, shell) = setup();

        shell.pointer_down(Some(HitTarget::MenuToggle));
        shell.pointer_up(None);
        assert!(!shell.menu().is_open());

        shell.pointer_down(Some(HitTarget::MenuToggle));
        shell.pointer_up(Some(HitTarget::MenuToggle));
        assert!(shell.menu().is_open());
    }

    #[test]
    fn test_menu_overlay_fades_out() {
        let (clock, _root, shell) = setup();

        shell.open_menu();
        clock.set_time(2.0);
        let menu = shell.view().menu.expect("menu visible");
        assert_eq!(menu.overlay.opacity, 1.0);
        assert!(menu.items.iter().all(|v| *v == MotionValues::REST));

        shell.close_menu();
        assert!(shell.view().menu.is_some());

        clock.set_time(4.0);
        assert!(shell.view().menu.is_none());
    }

    #[test]
    fn test_cards_wait_for_reveal_and_stay() {
        let (clock, _root, shell) = setup();

        clock.set_time(5.0);
        let hidden = shell.view();
        let services = hidden.section(SectionId::Services).expect("services");
        assert!(!shell.services_reveal().is_triggered());
        assert!(services.cards.iter().all(|c| c.opacity == 0.0));

        shell.scroll_to(section_top(&shell, SectionId::Services));
        assert!(shell.services_reveal().is_triggered());

        clock.set_time(10.0);
        shell.scroll_to(0.0);
        clock.set_time(15.0);
        let view = shell.view();
        let services = view.section(SectionId::Services).expect("services");
        assert!(services.cards.iter().all(|c| *c == MotionValues::REST));
        assert_eq!(services.heading, MotionValues::REST);
    }

    #[test]
    fn test_contact_heading_follows_in_view() {
        let (clock, _root, shell) = setup();

        shell.scroll_to(section_top(&shell, SectionId::Contact));
        assert!(shell.contact_in_view().is_in_view());
        clock.set_time(5.0);
        let view = shell.view();
        assert_eq!(view.section(SectionId::Contact).expect("contact").heading, MotionValues::REST);

        shell.scroll_to(0.0);
        assert!(!shell.contact_in_view().is_in_view());
        clock.set_time(10.0);
        let view = shell.view();
        assert_eq!(view.section(SectionId::Contact).expect("contact").heading, RISE);
    }

    #[test]
    fn test_nav_hover_via_pointer() {
        let (clock, _root, shell) = setup();

        shell.pointer_move(Some(HitTarget::NavLink(2)));
        clock.set_time(2.0);
        assert!(shell.view().nav[2].visual.bold);
        assert_eq!(shell.view().nav[2].visual.link.rotate_x, 180.0);

        shell.pointer_move(None);
        clock.set_time(4.0);
        assert_eq!(shell.view().nav[2].visual.link.rotate_x, 0.0);
    }

    #[test]
    fn test_menu_toggle_hover_and_tap() {
        let (clock, _root, shell) = setup();

        shell.pointer_move(Some(HitTarget::MenuToggle));
        clock.set_time(2.0);
        assert_eq!(shell.view().gestures.menu_toggle.scale, 1.1);

        shell.pointer_down(Some(HitTarget::MenuToggle));
        clock.set_time(4.0);
        assert_eq!(shell.view().gestures.menu_toggle.scale, 0.95);

        shell.pointer_up(Some(HitTarget::MenuToggle));
        assert!(shell.menu().is_open());
        clock.set_time(6.0);
        assert_eq!(shell.view().gestures.menu_toggle.scale, 1.1);

        shell.pointer_move(None);
        clock.set_time(8.0);
        assert_eq!(shell.view().gestures.menu_toggle, MotionValues::REST);
        assert!(!shell.gestures.all().any(|g| g.is_animating()));
    }

    #[test]
    fn test_menu_close_and_items_grow_on_hover() {
        let (clock, _root, shell) = setup();
        shell.open_menu();

        shell.pointer_move(Some(HitTarget::MenuItem(0)));
        clock.set_time(3.0);
        let menu = shell.view().menu.expect("menu visible");
        assert_eq!(menu.items[0], MotionValues::REST.scale(1.1));
        assert_eq!(menu.items[1], MotionValues::REST);

        shell.pointer_move(Some(HitTarget::MenuClose));
        shell.pointer_down(Some(HitTarget::MenuClose));
        clock.set_time(5.0);
        let menu = shell.view().menu.expect("menu visible");
        assert_eq!(menu.close.scale, 0.95);
        assert_eq!(menu.items[0], MotionValues::REST);
    }

    #[test]
    fn test_buttons_hover_and_press() {
        let (clock, _root, shell) = setup();

        shell.pointer_move(Some(HitTarget::HeroCta));
        clock.set_time(2.0);
        assert_eq!(shell.view().gestures.hero_cta.scale, 1.05);

        shell.pointer_down(Some(HitTarget::Submit));
        clock.set_time(4.0);
        let gestures = shell.view().gestures;
        assert_eq!(gestures.hero_cta, MotionValues::REST);
        assert_eq!(gestures.submit.scale, 0.95);

        // Clicking a button only animates it
        shell.pointer_up(Some(HitTarget::Submit));
        clock.set_time(6.0);
        assert_eq!(shell.view().gestures.submit.scale, 1.05);
        assert_eq!(shell.scroll_position(), 0.0);
        assert!(!shell.menu().is_open());
    }

    #[test]
    fn test_card_link_hover_lifts_card() {
        let (clock, _root, shell) = setup();

        shell.pointer_move(Some(HitTarget::ServiceLink(1)));
        clock.set_time(2.0);
        let gestures = shell.view().gestures;
        assert_eq!(gestures.service_links[1], MotionValues::REST.x(5.0));
        assert_eq!(gestures.service_cards[1], MotionValues::REST.scale(1.05).rotate(1.0));
        assert_eq!(gestures.service_cards[0], MotionValues::REST);

        // Onto the card body: the card stays lifted, the link slides back
        shell.pointer_move(Some(HitTarget::ServiceCard(1)));
        assert!(!shell.gestures.service_cards[1].is_animating());
        clock.set_time(4.0);
        let gestures = shell.view().gestures;
        assert_eq!(gestures.service_links[1], MotionValues::REST);
        assert_eq!(gestures.service_cards[1].scale, 1.05);

        shell.pointer_move(None);
        clock.set_time(6.0);
        assert_eq!(shell.view().gestures.service_cards[1], MotionValues::REST);
    }

    #[test]
    fn test_project_card_lift_zooms_image() {
        let (clock, _root, shell) = setup();

        shell.pointer_move(Some(HitTarget::ProjectLink(0)));
        clock.set_time(2.0);
        let gestures = shell.view().gestures;
        assert_eq!(gestures.project_cards[0], MotionValues::REST.y(-10.0).scale(1.03));
        assert_eq!(gestures.project_images[0].scale, 1.1);
        assert_eq!(gestures.project_links[0].x, 5.0);
        assert_eq!(gestures.project_images[1], MotionValues::REST);
    }

    #[test]
    fn test_field_focus_follows_presses() {
        let (clock, _root, shell) = setup();

        shell.pointer_down(Some(HitTarget::Field(0)));
        shell.pointer_up(Some(HitTarget::Field(0)));
        assert_eq!(shell.focused_field(), Some(0));
        clock.set_time(2.0);
        assert_eq!(shell.view().gestures.fields[0].scale, 1.02);

        shell.pointer_down(Some(HitTarget::Field(2)));
        shell.pointer_up(Some(HitTarget::Field(2)));
        clock.set_time(4.0);
        let gestures = shell.view().gestures;
        assert_eq!(gestures.fields[0], MotionValues::REST);
        assert_eq!(gestures.fields[2].scale, 1.02);

        // Pressing empty space blurs
        shell.pointer_down(None);
        shell.pointer_up(None);
        assert_eq!(shell.focused_field(), None);
        clock.set_time(6.0);
        assert!(shell.view().gestures.fields.iter().all(|f| *f == MotionValues::REST));
    }

    #[test]
    fn test_drop_releases_lock() {
        let (_clock, root, shell) = setup();

        shell.open_menu();
        assert_eq!(root.lock_count(), 1);
        drop(shell);
        assert_eq!(root.lock_count(), 0);
        assert_eq!(root.overflow(), Overflow::Unset);
    }

    #[test]
    fn test_headline_settles() {
        let (clock, _root, shell) = setup();

        assert!(shell.view().headline.iter().all(|l| l.values.opacity == 0.0));
        clock.set_time(30.0);
        assert!(shell.view().headline.iter().all(|l| l.values == MotionValues::REST));
    }
}
