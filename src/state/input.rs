//! Input Module - Event conversion and polling
//!
//! Bridges crossterm's event system with the page shell. Terminal events are
//! reduced to the handful of page-level actions the preview understands.
//!
//! # API
//!
//! - `convert_event` - Convert a crossterm event to a [`PageEvent`]
//! - `poll_event` - Non-blocking event check with timeout
//! - `enable_mouse` / `disable_mouse` - Control mouse capture

use std::io::stdout;
use std::time::Duration;

use crossterm::event::{
    DisableMouseCapture, EnableMouseCapture, Event as CrosstermEvent, KeyCode, KeyEvent,
    KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind, poll, read,
};
use crossterm::execute;

// =============================================================================
// PAGE EVENTS
// =============================================================================

/// Keyboard actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKey {
    Quit,
    ToggleMenu,
    CloseMenu,
    LineUp,
    LineDown,
    PageUp,
    PageDown,
    Top,
    Bottom,
}

/// Unified event type for the preview loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PageEvent {
    /// Wheel notches; positive scrolls down.
    Scroll(i32),
    PointerMove { x: u16, y: u16 },
    PointerDown { x: u16, y: u16 },
    PointerUp { x: u16, y: u16 },
    Key(PageKey),
    /// Terminal resize (columns, rows).
    Resize(u16, u16),
    /// No event or unhandled event type.
    None,
}

// =============================================================================
// CONVERSION
// =============================================================================

pub fn convert_event(event: CrosstermEvent) -> PageEvent {
    match event {
        CrosstermEvent::Mouse(mouse) => convert_mouse_event(mouse),
        CrosstermEvent::Key(key) => convert_key_event(key)
            .map(PageEvent::Key)
            .unwrap_or(PageEvent::None),
        CrosstermEvent::Resize(w, h) => PageEvent::Resize(w, h),
        _ => PageEvent::None,
    }
}

fn convert_mouse_event(event: MouseEvent) -> PageEvent {
    let (x, y) = (event.column, event.row);
    match event.kind {
        MouseEventKind::ScrollDown => PageEvent::Scroll(1),
        MouseEventKind::ScrollUp => PageEvent::Scroll(-1),
        MouseEventKind::Moved | MouseEventKind::Drag(_) => PageEvent::PointerMove { x, y },
        MouseEventKind::Down(MouseButton::Left) => PageEvent::PointerDown { x, y },
        MouseEventKind::Up(MouseButton::Left) => PageEvent::PointerUp { x, y },
        _ => PageEvent::None,
    }
}

fn convert_key_event(event: KeyEvent) -> Option<PageKey> {
    if event.kind == KeyEventKind::Release {
        return None;
    }

    let key = match event.code {
        KeyCode::Char('c') if event.modifiers.contains(KeyModifiers::CONTROL) => PageKey::Quit,
        KeyCode::Char('q') => PageKey::Quit,
        KeyCode::Char('m') => PageKey::ToggleMenu,
        KeyCode::Esc => PageKey::CloseMenu,
        KeyCode::Up | KeyCode::Char('k') => PageKey::LineUp,
        KeyCode::Down | KeyCode::Char('j') => PageKey::LineDown,
        KeyCode::PageUp => PageKey::PageUp,
        KeyCode::PageDown | KeyCode::Char(' ') => PageKey::PageDown,
        KeyCode::Home => PageKey::Top,
        KeyCode::End => PageKey::Bottom,
        _ => return None,
    };
    Some(key)
}

// =============================================================================
// EVENT POLLING
// =============================================================================

/// Poll for an event with timeout.
/// Returns None if no event within timeout.
pub fn poll_event(timeout: Duration) -> std::io::Result<Option<PageEvent>> {
    if poll(timeout)? {
        Ok(Some(convert_event(read()?)))
    } else {
        Ok(None)
    }
}

pub fn enable_mouse() -> std::io::Result<()> {
    execute!(stdout(), EnableMouseCapture)
}

pub fn disable_mouse() -> std::io::Result<()> {
    execute!(stdout(), DisableMouseCapture)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> CrosstermEvent {
        CrosstermEvent::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        })
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> CrosstermEvent {
        CrosstermEvent::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn test_wheel_converts_to_scroll() {
        assert_eq!(convert_event(mouse(MouseEventKind::ScrollDown, 0, 0)), PageEvent::Scroll(1));
        assert_eq!(convert_event(mouse(MouseEventKind::ScrollUp, 0, 0)), PageEvent::Scroll(-1));
    }

    #[test]
    fn test_pointer_events() {
        assert_eq!(
            convert_event(mouse(MouseEventKind::Moved, 3, 4)),
            PageEvent::PointerMove { x: 3, y: 4 }
        );
        assert_eq!(
            convert_event(mouse(MouseEventKind::Down(MouseButton::Left), 1, 2)),
            PageEvent::PointerDown { x: 1, y: 2 }
        );
        assert_eq!(
            convert_event(mouse(MouseEventKind::Down(MouseButton::Right), 1, 2)),
            PageEvent::None
        );
    }

    #[test]
    fn test_keys() {
        assert_eq!(
            convert_event(key(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            PageEvent::Key(PageKey::Quit)
        );
        assert_eq!(
            convert_event(key(KeyCode::Char('m'), KeyModifiers::NONE)),
            PageEvent::Key(PageKey::ToggleMenu)
        );
        assert_eq!(
            convert_event(key(KeyCode::Esc, KeyModifiers::NONE)),
            PageEvent::Key(PageKey::CloseMenu)
        );
        assert_eq!(convert_event(key(KeyCode::Char('z'), KeyModifiers::NONE)), PageEvent::None);
    }

    #[test]
    fn test_release_ignored() {
        let event = CrosstermEvent::Key(KeyEvent {
            code: KeyCode::Char('q'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        });
        assert_eq!(convert_event(event), PageEvent::None);
    }

    #[test]
    fn test_resize() {
        assert_eq!(convert_event(CrosstermEvent::Resize(120, 40)), PageEvent::Resize(120, 40));
    }
}
