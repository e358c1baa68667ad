//! Frame Derived - Reactive frame computation.
//!
//! Creates a Derived that paints the page whenever the terminal size, the
//! layout, the clock or any page state read by the view changes. Reading
//! the derived is the only way frames are produced: the event loop pulls
//! one per tick, and an unchanged page returns the cached frame.

use std::rc::Rc;

use spark_signals::{Derived, derived};

use crate::page::PageShell;
use crate::renderer::{Frame, paint};

use super::terminal::TerminalSize;

/// Create the frame derived for `shell` at the size tracked by `size`.
pub fn create_frame_derived(
    shell: Rc<PageShell>,
    size: &TerminalSize,
) -> Derived<Frame> {
    let cols = size.cols_signal();
    let rows = size.rows_signal();
    let now = shell.clock().now_signal();

    derived(move || {
        let (cols, rows) = (cols.get(), rows.get());
        // Time dependency
        let _ = now.get();

        let layout = shell.layout();
        let view = shell.view();
        paint(&layout, &view, cols, rows)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::AnimationClock;
    use crate::config::PageConfig;
    use crate::state::DocumentRoot;

    fn setup() -> (AnimationClock, Rc<PageShell>) {
        let clock = AnimationClock::new();
        let shell = PageShell::new(PageConfig::default(), DocumentRoot::new(), clock.clone())
            .expect("shell");
        (clock, Rc::new(shell))
    }

    #[test]
    fn test_frame_follows_size() {
        let (_clock, shell) = setup();
        let size = TerminalSize::new(80, 24);
        let frame = create_frame_derived(shell, &size);

        assert_eq!(frame.get().buffer.width(), 80);

        size.set(100, 30);
        let next = frame.get();
        assert_eq!(next.buffer.width(), 100);
        assert_eq!(next.buffer.height(), 30);
    }

    #[test]
    fn test_frame_follows_clock() {
        let (clock, shell) = setup();
        let size = TerminalSize::new(160, 50);
        let frame = create_frame_derived(shell, &size);

        let first = frame.get();
        clock.set_time(10.0);
        let settled = frame.get();

        assert_ne!(first, settled);
        assert!(settled.text().contains("DesignPro"));
    }
}
