//! Mouse Module - Hit testing and hover tracking for the terminal preview.
//!
//! The painter records which screen cells belong to which interactive target.
//! Pointer moves are resolved against that grid; the [`PointerTracker`]
//! turns raw positions into enter/leave transitions.

use std::cell::Cell;

// =============================================================================
// TYPES
// =============================================================================

/// Interactive regions of the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HitTarget {
    /// Header nav link by index.
    NavLink(usize),
    /// Hamburger button (narrow layouts).
    MenuToggle,
    /// Close button inside the overlay.
    MenuClose,
    /// Overlay nav item by index.
    MenuItem(usize),
    /// Hero "Get Started" button.
    HeroCta,
    ServiceCard(usize),
    /// "Learn More" link inside a service card.
    ServiceLink(usize),
    ProjectCard(usize),
    /// "View Project" link inside a project card.
    ProjectLink(usize),
    /// Contact form field by index.
    Field(usize),
    /// Contact form submit button.
    Submit,
}

impl HitTarget {
    /// Enclosing target that is hovered along with this one.
    pub fn parent(self) -> Option<HitTarget> {
        match self {
            HitTarget::ServiceLink(i) => Some(HitTarget::ServiceCard(i)),
            HitTarget::ProjectLink(i) => Some(HitTarget::ProjectCard(i)),
            _ => None,
        }
    }

    /// This target followed by its ancestors.
    pub fn chain(target: Option<HitTarget>) -> impl Iterator<Item = HitTarget> {
        std::iter::successors(target, |t| t.parent())
    }
}

/// A painted interactive region, in terminal cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HitRegion {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
    pub target: HitTarget,
}

// =============================================================================
// HIT GRID
// =============================================================================

/// Cell-to-target lookup grid.
pub struct HitGrid {
    width: u16,
    height: u16,
    cells: Vec<Option<HitTarget>>,
}

impl HitGrid {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![None; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Resize the grid, clearing all contents.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.cells = vec![None; width as usize * height as usize];
    }

    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    /// Fill a rectangle, clipped to the grid. Later fills win.
    pub fn fill(&mut self, region: &HitRegion) {
        let x_end = region.x.saturating_add(region.width).min(self.width);
        let y_end = region.y.saturating_add(region.height).min(self.height);
        for y in region.y..y_end {
            for x in region.x..x_end {
                let idx = y as usize * self.width as usize + x as usize;
                self.cells[idx] = Some(region.target);
            }
        }
    }

    /// Replace the grid contents with `regions`, painted in order.
    pub fn rebuild(&mut self, width: u16, height: u16, regions: &[HitRegion]) {
        if width != self.width || height != self.height {
            self.resize(width, height);
        } else {
            self.clear();
        }
        for region in regions {
            self.fill(region);
        }
    }

    pub fn get(&self, x: u16, y: u16) -> Option<HitTarget> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.cells
            .get(y as usize * self.width as usize + x as usize)
            .copied()
            .flatten()
    }
}

// =============================================================================
// POINTER TRACKER
// =============================================================================

/// Hover transition caused by one pointer move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HoverChange {
    pub left: Option<HitTarget>,
    pub entered: Option<HitTarget>,
}

impl HoverChange {
    pub fn is_empty(&self) -> bool {
        self.left.is_none() && self.entered.is_none()
    }
}

/// Remembers the hovered target between pointer moves.
#[derive(Default)]
pub struct PointerTracker {
    hovered: Cell<Option<HitTarget>>,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the target under the pointer and report enter/leave.
    pub fn move_to(&self, target: Option<HitTarget>) -> HoverChange {
        let previous = self.hovered.get();
        if previous == target {
            return HoverChange::default();
        }
        self.hovered.set(target);
        HoverChange {
            left: previous,
            entered: target,
        }
    }

    pub fn hovered(&self) -> Option<HitTarget> {
        self.hovered.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn region(x: u16, y: u16, width: u16, height: u16, target: HitTarget) -> HitRegion {
        HitRegion {
            x,
            y,
            width,
            height,
            target,
        }
    }

    #[test]
    fn test_hit_grid_fill_and_get() {
        let mut grid = HitGrid::new(10, 10);
        assert_eq!(grid.get(5, 5), None);

        grid.fill(&region(2, 2, 4, 4, HitTarget::NavLink(1)));
        assert_eq!(grid.get(3, 3), Some(HitTarget::NavLink(1)));
        assert_eq!(grid.get(5, 5), Some(HitTarget::NavLink(1)));
        assert_eq!(grid.get(6, 6), None);
        assert_eq!(grid.get(50, 50), None);
    }

    #[test]
    fn test_hit_grid_clips() {
        let mut grid = HitGrid::new(4, 4);
        grid.fill(&region(2, 2, 100, 100, HitTarget::MenuToggle));

        assert_eq!(grid.get(3, 3), Some(HitTarget::MenuToggle));
    }

    #[test]
    fn test_rebuild_resizes_and_clears() {
        let mut grid = HitGrid::new(10, 10);
        grid.fill(&region(0, 0, 5, 5, HitTarget::MenuClose));

        grid.rebuild(20, 5, &[region(10, 0, 2, 1, HitTarget::MenuItem(0))]);
        assert_eq!(grid.width(), 20);
        assert_eq!(grid.get(1, 1), None);
        assert_eq!(grid.get(11, 0), Some(HitTarget::MenuItem(0)));
    }

    #[test]
    fn test_later_regions_win() {
        let mut grid = HitGrid::new(10, 10);
        grid.rebuild(
            10,
            10,
            &[
                region(0, 0, 10, 10, HitTarget::NavLink(0)),
                region(0, 0, 2, 2, HitTarget::MenuClose),
            ],
        );

        assert_eq!(grid.get(1, 1), Some(HitTarget::MenuClose));
        assert_eq!(grid.get(5, 5), Some(HitTarget::NavLink(0)));
    }

    #[test]
    fn test_pointer_enter_leave() {
        let pointer = PointerTracker::new();

        let change = pointer.move_to(Some(HitTarget::NavLink(0)));
        assert_eq!(change.entered, Some(HitTarget::NavLink(0)));
        assert_eq!(change.left, None);

        assert!(pointer.move_to(Some(HitTarget::NavLink(0))).is_empty());

        let change = pointer.move_to(Some(HitTarget::NavLink(1)));
        assert_eq!(change.left, Some(HitTarget::NavLink(0)));
        assert_eq!(change.entered, Some(HitTarget::NavLink(1)));

        let change = pointer.move_to(None);
        assert_eq!(change.left, Some(HitTarget::NavLink(1)));
        assert_eq!(pointer.hovered(), None);
    }

    #[test]
    fn test_card_links_chain_to_their_card() {
        let chain: Vec<_> = HitTarget::chain(Some(HitTarget::ProjectLink(2))).collect();
        assert_eq!(chain, vec![HitTarget::ProjectLink(2), HitTarget::ProjectCard(2)]);

        let chain: Vec<_> = HitTarget::chain(Some(HitTarget::Submit)).collect();
        assert_eq!(chain, vec![HitTarget::Submit]);

        assert_eq!(HitTarget::chain(None).count(), 0);
    }
}
