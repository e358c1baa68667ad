//! Page Module - The composed page.
//!
//! - [`PageShell`] - owns all state, consumes input, produces views
//! - [`PageView`] - plain snapshot handed to the painter
//! - [`SectionId`] - the page's top-level regions

pub mod sections;
pub mod shell;
pub mod view;

pub use sections::SectionId;
pub use shell::{DEFAULT_VIEWPORT, PageShell};
pub use view::{GestureView, LetterView, MenuView, NavLinkView, PageView, SectionView};
