//! Menu Module - Mobile navigation overlay and page scroll lock.
//!
//! While the menu is open the page behind it must not scroll. The lock is a
//! scoped resource: [`ScrollLock`] sets the document root overflow to hidden
//! when created and restores it when dropped. The controller keeps the guard
//! only while open, so every exit path releases it:
//! - explicit `close()`
//! - `toggle_open()` from open
//! - dropping the controller (page unmount)
//!
//! # Example
//!
//! ```ignore
//! use spark_page::state::menu::{DocumentRoot, MenuController};
//!
//! let root = DocumentRoot::new();
//! let menu = MenuController::new(root.clone());
//!
//! menu.toggle_open();
//! assert!(root.is_scroll_locked());
//!
//! drop(menu);
//! assert!(!root.is_scroll_locked());
//! ```

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use spark_signals::{signal, Signal};

// =============================================================================
// DOCUMENT ROOT
// =============================================================================

/// Overflow style on the document root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Overflow {
    /// No override; the page scrolls normally.
    #[default]
    Unset,
    /// Page scrolling suppressed.
    Hidden,
}

/// Style target standing in for the document root element.
///
/// Cloning shares the same root. Several locks may be held at once; the
/// overflow stays hidden until the last one is released.
#[derive(Clone)]
pub struct DocumentRoot {
    overflow: Signal<Overflow>,
    locks: Rc<Cell<usize>>,
}

impl DocumentRoot {
    pub fn new() -> Self {
        Self {
            overflow: signal(Overflow::Unset),
            locks: Rc::new(Cell::new(0)),
        }
    }

    pub fn overflow(&self) -> Overflow {
        self.overflow.get()
    }

    pub fn overflow_signal(&self) -> Signal<Overflow> {
        self.overflow.clone()
    }

    pub fn is_scroll_locked(&self) -> bool {
        self.overflow() == Overflow::Hidden
    }

    /// Number of live scroll locks.
    pub fn lock_count(&self) -> usize {
        self.locks.get()
    }

    /// Acquire a scroll lock on this root.
    pub fn lock_scroll(&self) -> ScrollLock {
        ScrollLock::acquire(self.clone())
    }
}

impl Default for DocumentRoot {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// SCROLL LOCK
// =============================================================================

/// Guard that keeps page scrolling suppressed while alive.
#[must_use = "the scroll lock is released as soon as the guard is dropped"]
pub struct ScrollLock {
    root: DocumentRoot,
}

impl ScrollLock {
    fn acquire(root: DocumentRoot) -> Self {
        root.locks.set(root.locks.get() + 1);
        if root.overflow.get() != Overflow::Hidden {
            tracing::debug!("page scroll locked");
        }
        root.overflow.set(Overflow::Hidden);
        Self { root }
    }
}

impl Drop for ScrollLock {
    fn drop(&mut self) {
        let remaining = self.root.locks.get().saturating_sub(1);
        self.root.locks.set(remaining);
        if remaining == 0 {
            self.root.overflow.set(Overflow::Unset);
            tracing::debug!("page scroll unlocked");
        }
    }
}

// =============================================================================
// MENU CONTROLLER
// =============================================================================

/// Open/closed state of the navigation overlay.
pub struct MenuController {
    root: DocumentRoot,
    open: Signal<bool>,
    lock: RefCell<Option<ScrollLock>>,
}

impl MenuController {
    pub fn new(root: DocumentRoot) -> Self {
        Self {
            root,
            open: signal(false),
            lock: RefCell::new(None),
        }
    }

    pub fn is_open(&self) -> bool {
        self.open.get()
    }

    pub fn open_signal(&self) -> Signal<bool> {
        self.open.clone()
    }

    /// Flip between open and closed.
    pub fn toggle_open(&self) {
        if self.is_open() {
            self.close();
        } else {
            self.open();
        }
    }

    /// Open the menu. No-op when already open.
    pub fn open(&self) {
        let mut lock = self.lock.borrow_mut();
        if lock.is_none() {
            *lock = Some(self.root.lock_scroll());
        }
        self.open.set(true);
    }

    /// Close the menu and release the scroll lock. Idempotent.
    pub fn close(&self) {
        // Drop the guard before publishing the new state
        let released = self.lock.borrow_mut().take();
        drop(released);
        self.open.set(false);
    }

    /// Check if this controller currently holds a scroll lock.
    pub fn holds_lock(&self) -> bool {
        self.lock.borrow().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (DocumentRoot, MenuController) {
        let root = DocumentRoot::new();
        let menu = MenuController::new(root.clone());
        (root, menu)
    }

    #[test]
    fn test_starts_closed_unlocked() {
        let (root, menu) = setup();

        assert!(!menu.is_open());
        assert!(!menu.holds_lock());
        assert_eq!(root.overflow(), Overflow::Unset);
    }

    #[test]
    fn test_toggle_locks_and_unlocks() {
        let (root, menu) = setup();

        menu.toggle_open();
        assert!(menu.is_open());
        assert_eq!(root.overflow(), Overflow::Hidden);

        menu.toggle_open();
        assert!(!menu.is_open());
        assert_eq!(root.overflow(), Overflow::Unset);
    }

    #[test]
    fn test_close_is_idempotent() {
        let (root, menu) = setup();

        menu.close();
        menu.toggle_open();
        menu.close();
        menu.close();

        assert!(!menu.is_open());
        assert_eq!(root.lock_count(), 0);
        assert!(!root.is_scroll_locked());
    }

    #[test]
    fn test_open_twice_holds_one_lock() {
        let (root, menu) = setup();

        menu.open();
        menu.open();
        assert_eq!(root.lock_count(), 1);

        menu.close();
        assert_eq!(root.lock_count(), 0);
    }

    #[test]
    fn test_drop_releases_lock() {
        let (root, menu) = setup();

        menu.toggle_open();
        assert!(root.is_scroll_locked());

        drop(menu);
        assert!(!root.is_scroll_locked());
        assert_eq!(root.lock_count(), 0);
    }

    #[test]
    fn test_nested_locks() {
        let root = DocumentRoot::new();

        let outer = root.lock_scroll();
        let inner = root.lock_scroll();
        drop(inner);
        assert!(root.is_scroll_locked());

        drop(outer);
        assert!(!root.is_scroll_locked());
    }
}
