//! Mount API - Preview lifecycle and event loop.
//!
//! Mounting a [`PageShell`] sets up the frame derived, subscribes to the
//! animation clock and (for [`mount`]) takes over the terminal. Each tick
//! then:
//!
//! 1. Polls one input event and routes it to the shell
//! 2. Advances the clock by the real time since the last tick
//! 3. Pulls the frame, rebuilds the hit grid from its regions and diff-renders it
//!
//! # Example
//!
//! ```ignore
//! use std::rc::Rc;
//! use spark_page::pipeline::{mount, run};
//!
//! let handle = mount(Rc::new(shell))?;
//!
//! // Option 1: Run blocking event loop
//! run(&handle)?;
//!
//! // Option 2: Tick manually in your own loop
//! while tick(&handle)? {
//!     // Your logic here
//! }
//!
//! // Clean up
//! handle.unmount();
//! ```

use std::cell::{Cell, RefCell};
use std::io::{self, Write};
use std::rc::Rc;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use crate::error::Result;
use crate::page::PageShell;
use crate::renderer::{DiffRenderer, Frame};
use crate::state::input::poll_event;
use crate::state::{HitGrid, HitTarget, PageEvent, PageKey};

use super::frame::create_frame_derived;
use super::terminal::{TerminalGuard, TerminalSize};

// =============================================================================
// Mount Handle
// =============================================================================

/// Handle returned by [`mount`] that drives and eventually unmounts the preview.
pub struct MountHandle {
    shell: Rc<PageShell>,
    size: TerminalSize,
    frame: Box<dyn Fn() -> Frame>,
    renderer: RefCell<DiffRenderer>,
    hit_grid: RefCell<HitGrid>,
    running: Arc<AtomicBool>,
    last_tick: Cell<Instant>,
    frame_interval: Duration,
    stop_clock: Cell<Option<Box<dyn FnOnce()>>>,
    terminal: Option<TerminalGuard>,
}

impl MountHandle {
    fn attach(shell: Rc<PageShell>, size: TerminalSize, terminal: Option<TerminalGuard>) -> Result<Self> {
        let fps = shell.config().preview.fps.max(1);
        let (cols, rows) = size.get();

        let derived = create_frame_derived(shell.clone(), &size);
        let stop_clock = shell.clock().subscribe();

        let handle = Self {
            frame: Box::new(move || derived.get()),
            renderer: RefCell::new(DiffRenderer::new()),
            hit_grid: RefCell::new(HitGrid::new(cols, rows)),
            running: Arc::new(AtomicBool::new(true)),
            last_tick: Cell::new(Instant::now()),
            frame_interval: Duration::from_secs_f64(1.0 / fps as f64),
            stop_clock: Cell::new(Some(stop_clock)),
            terminal,
            shell,
            size,
        };
        handle.apply_viewport()?;

        tracing::info!(cols, rows, fps, "preview mounted");
        Ok(handle)
    }

    pub fn shell(&self) -> &Rc<PageShell> {
        &self.shell
    }

    /// Current terminal size in cells.
    pub fn size(&self) -> (u16, u16) {
        self.size.get()
    }

    /// Check if still running.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Stop the preview (sets running to false).
    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
    }

    /// Stop, release the clock and restore the terminal.
    pub fn unmount(mut self) {
        self.stop();
        self.release_clock();
        if let Some(mut terminal) = self.terminal.take()
            && let Err(err) = terminal.restore()
        {
            tracing::warn!(%err, "failed to restore terminal");
        }
        tracing::info!("preview unmounted");
    }

    fn release_clock(&self) {
        if let Some(stop) = self.stop_clock.take() {
            stop();
        }
    }

    /// Resize the shell's viewport to the terminal, in page pixels.
    fn apply_viewport(&self) -> Result<()> {
        let metrics = self.shell.metrics();
        let (cols, rows) = self.size.get();
        self.shell.set_viewport(
            cols as f32 * metrics.px_per_col,
            rows as f32 * metrics.px_per_row,
        )
    }

    /// Interactive target under a cell, from the last rendered frame.
    pub fn hit_target(&self, x: u16, y: u16) -> Option<HitTarget> {
        self.hit_grid.borrow().get(x, y)
    }

    /// The current frame (cached while nothing changed).
    pub fn frame(&self) -> Frame {
        (self.frame)()
    }

    // =========================================================================
    // Events
    // =========================================================================

    /// Route one input event to the shell.
    pub fn handle_event(&self, event: PageEvent) -> Result<()> {
        let wheel_step = self.shell.config().preview.wheel_step;

        match event {
            PageEvent::Scroll(notches) => self.shell.scroll_by(notches as f64 * wheel_step),
            PageEvent::PointerMove { x, y } => self.shell.pointer_move(self.hit_target(x, y)),
            PageEvent::PointerDown { x, y } => self.shell.pointer_down(self.hit_target(x, y)),
            PageEvent::PointerUp { x, y } => self.shell.pointer_up(self.hit_target(x, y)),
            PageEvent::Key(key) => self.handle_key(key),
            PageEvent::Resize(cols, rows) => {
                tracing::debug!(cols, rows, "terminal resized");
                self.size.set(cols, rows);
                self.apply_viewport()?;
                self.renderer.borrow_mut().invalidate();
            }
            PageEvent::None => {}
        }
        Ok(())
    }

    fn handle_key(&self, key: PageKey) {
        let wheel_step = self.shell.config().preview.wheel_step;
        let (_, rows) = self.size.get();
        let page = (rows.saturating_sub(2)).max(1) as f64 * self.shell.metrics().px_per_row as f64;

        match key {
            PageKey::Quit => self.stop(),
            PageKey::ToggleMenu => self.shell.toggle_menu(),
            PageKey::CloseMenu => self.shell.close_menu(),
            PageKey::LineUp => self.shell.scroll_by(-wheel_step),
            PageKey::LineDown => self.shell.scroll_by(wheel_step),
            PageKey::PageUp => self.shell.scroll_by(-page),
            PageKey::PageDown => self.shell.scroll_by(page),
            PageKey::Top => self.shell.scroll_to(0.0),
            PageKey::Bottom => self.shell.scroll_to(self.shell.layout().max_scroll()),
        }
    }

    // =========================================================================
    // Frames
    // =========================================================================

    /// Advance the clock by the real time since the last call.
    fn advance_clock(&self) {
        let now = Instant::now();
        let dt = now.duration_since(self.last_tick.replace(now));
        self.shell.clock().advance(dt.as_secs_f64());
    }

    /// Pull the frame, refresh the hit grid and write changed cells to `out`.
    ///
    /// Returns the number of cells written.
    pub fn render_to<W: Write>(&self, out: &mut W) -> io::Result<usize> {
        let frame = self.frame();
        let (cols, rows) = self.size.get();
        self.hit_grid
            .borrow_mut()
            .rebuild(cols, rows, &frame.hit_regions);
        self.renderer.borrow_mut().render_to(out, &frame.buffer)
    }
}

impl Drop for MountHandle {
    fn drop(&mut self) {
        self.release_clock();
    }
}

// =============================================================================
// Mount Function
// =============================================================================

/// Mount the preview fullscreen on the current terminal.
///
/// This sets up:
/// 1. Terminal size detection
/// 2. Raw mode, alternate screen and mouse capture
/// 3. The frame derived and a clock subscription
pub fn mount(shell: Rc<PageShell>) -> Result<MountHandle> {
    let size = TerminalSize::detect();
    let terminal = TerminalGuard::enter()?;
    MountHandle::attach(shell, size, Some(terminal))
}

/// Mount without touching the terminal (fixed size, render with `render_to`).
pub fn mount_headless(shell: Rc<PageShell>, cols: u16, rows: u16) -> Result<MountHandle> {
    MountHandle::attach(shell, TerminalSize::new(cols, rows), None)
}

/// Unmount and clean up.
pub fn unmount(handle: MountHandle) {
    handle.unmount();
}

// =============================================================================
// Event Loop
// =============================================================================

/// Run the event loop once.
///
/// Waits up to one frame interval for input, then renders.
///
/// * `Ok(true)` - Continue running
/// * `Ok(false)` - Stop requested (quit key or `handle.stop()`)
/// * `Err(e)` - I/O error while polling or rendering
pub fn tick(handle: &MountHandle) -> Result<bool> {
    if !handle.is_running() {
        return Ok(false);
    }

    if let Some(event) = poll_event(handle.frame_interval)? {
        handle.handle_event(event)?;
    }
    handle.advance_clock();

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    handle.render_to(&mut out)?;

    Ok(handle.is_running())
}

/// Run the event loop (blocking until stopped).
pub fn run(handle: &MountHandle) -> Result<()> {
    while tick(handle)? {}
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::AnimationClock;
    use crate::config::PageConfig;
    use crate::page::SectionId;
    use crate::state::DocumentRoot;

    fn setup(cols: u16, rows: u16) -> (AnimationClock, MountHandle) {
        let clock = AnimationClock::new();
        let shell = PageShell::new(PageConfig::default(), DocumentRoot::new(), clock.clone())
            .expect("shell");
        let handle = mount_headless(Rc::new(shell), cols, rows).expect("mount");
        (clock, handle)
    }

    fn render(handle: &MountHandle) -> usize {
        let mut out = Vec::new();
        handle.render_to(&mut out).expect("render")
    }

    fn target_cell(handle: &MountHandle, target: HitTarget) -> (u16, u16) {
        let frame = handle.frame();
        let region = frame
            .hit_regions
            .iter()
            .find(|r| r.target == target)
            .expect("target painted");
        (region.x, region.y)
    }

    #[test]
    fn test_mount_sizes_viewport_and_subscribes() {
        let (clock, handle) = setup(160, 40);

        let layout = handle.shell().layout();
        assert_eq!(layout.viewport.width, 1280.0);
        assert_eq!(layout.viewport.height, 640.0);
        assert!(clock.is_running());

        handle.unmount();
        assert!(!clock.is_running());
    }

    #[test]
    fn test_wheel_scrolls_by_step() {
        let (_clock, handle) = setup(160, 40);

        handle.handle_event(PageEvent::Scroll(3)).expect("event");
        assert_eq!(handle.shell().scroll_position(), 120.0);

        handle.handle_event(PageEvent::Scroll(-1)).expect("event");
        assert_eq!(handle.shell().scroll_position(), 80.0);
    }

    #[test]
    fn test_keys() {
        let (_clock, handle) = setup(160, 40);

        handle.handle_event(PageEvent::Key(PageKey::Bottom)).expect("event");
        assert_eq!(
            handle.shell().scroll_position(),
            handle.shell().layout().max_scroll()
        );

        handle.handle_event(PageEvent::Key(PageKey::Top)).expect("event");
        assert_eq!(handle.shell().scroll_position(), 0.0);

        handle.handle_event(PageEvent::Key(PageKey::ToggleMenu)).expect("event");
        assert!(handle.shell().menu().is_open());
        handle.handle_event(PageEvent::Key(PageKey::CloseMenu)).expect("event");
        assert!(!handle.shell().menu().is_open());

        handle.handle_event(PageEvent::Key(PageKey::Quit)).expect("event");
        assert!(!handle.is_running());
    }

    #[test]
    fn test_click_nav_link_scrolls_to_section() {
        let (clock, handle) = setup(160, 40);
        clock.set_time(10.0);
        render(&handle);

        let (x, y) = target_cell(&handle, HitTarget::NavLink(2));
        assert_eq!(handle.hit_target(x, y), Some(HitTarget::NavLink(2)));

        handle.handle_event(PageEvent::PointerMove { x, y }).expect("event");
        assert!(handle.shell().nav_links()[2].is_hovered());

        handle.handle_event(PageEvent::PointerDown { x, y }).expect("event");
        handle.handle_event(PageEvent::PointerUp { x, y }).expect("event");

        let projects = handle
            .shell()
            .layout()
            .section(SectionId::Projects)
            .expect("projects")
            .rect
            .y as f64;
        let expected = projects.min(handle.shell().layout().max_scroll());
        assert_eq!(handle.shell().scroll_position(), expected);
    }

    #[test]
    fn test_resize_relayouts_and_redraws() {
        let (_clock, handle) = setup(160, 40);
        render(&handle);
        assert_eq!(render(&handle), 0);

        handle.handle_event(PageEvent::Resize(60, 30)).expect("event");

        assert_eq!(handle.size(), (60, 30));
        assert_eq!(handle.shell().layout().viewport.width, 480.0);
        assert_eq!(render(&handle), 60 * 30 - wide_cells(&handle));
    }

    #[test]
    fn test_render_is_incremental() {
        let (clock, handle) = setup(160, 40);
        clock.set_time(10.0);

        assert_eq!(render(&handle), 160 * 40 - wide_cells(&handle));
        assert_eq!(render(&handle), 0);

        handle.handle_event(PageEvent::Scroll(1)).expect("event");
        assert!(render(&handle) > 0);
    }

    fn wide_cells(handle: &MountHandle) -> usize {
        handle
            .frame()
            .buffer
            .cells()
            .iter()
            .filter(|c| c.ch == crate::renderer::CONTINUATION)
            .count()
    }
}
