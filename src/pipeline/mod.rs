//! Reactive Pipeline
//!
//! Connects the page shell to the terminal.
//!
//! # Pipeline Architecture
//!
//! ```text
//! signals (size, clock, scroll, menu, hover...) → frame derived → tick → hit grid + diff renderer
//! ```
//!
//! ## Data Flow
//!
//! 1. **frame derived** - reads the layout and a view snapshot, paints a Frame
//! 2. **tick** - routes input to the shell, advances the clock, pulls the frame
//! 3. **renderer** - writes changed cells; hit regions refresh the hit grid
//!
//! ## Key Design Principles
//!
//! - **Pure Derived**: painting has no side effects, hit regions are data
//! - **Side Effects in the Loop**: only `tick` touches the terminal and the hit grid
//! - **Pull, don't push**: frames are produced when the loop asks, never from effects

pub mod frame;
pub mod mount;
pub mod terminal;

pub use frame::create_frame_derived;
pub use mount::{MountHandle, mount, mount_headless, run, tick, unmount};
pub use terminal::{TerminalGuard, TerminalSize};
