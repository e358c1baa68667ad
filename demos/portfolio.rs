//! Portfolio Preview - The full page in the terminal
//!
//! This example mounts the portfolio page fullscreen:
//! - Animated headline, hero entrance and floating image
//! - Header that hides on scroll down and returns on scroll up
//! - Section cards revealed as they scroll into view
//! - Nav links that flip on hover; menu overlay on narrow terminals
//!
//! Controls: wheel / arrows / j k to scroll, PgUp PgDn Home End,
//! m to toggle the menu, Esc to close it, q to quit.
//!
//! Config is read from `spark-page.toml` (or the file named by
//! `SPARK_PAGE_CONFIG`) when present.
//!
//! Run with: cargo run --example portfolio

use std::rc::Rc;

use spark_page::{
    AnimationClock, DocumentRoot, PageConfig, PageShell, Result, logging::init_tracing, mount,
    run,
};

fn main() -> Result<()> {
    // Tracing is configured by the file itself, so load errors go to stderr
    let config = match PageConfig::load_from(&PageConfig::path()) {
        Ok(config) => config.unwrap_or_default(),
        Err(err) => {
            eprintln!("{err}; using the default page config");
            PageConfig::default()
        }
    };
    init_tracing(config.preview.log_file.as_deref())?;

    let shell = PageShell::new(config, DocumentRoot::new(), AnimationClock::new())?;
    let handle = mount(Rc::new(shell))?;

    let result = run(&handle);
    handle.unmount();

    if let Err(err) = &result {
        eprintln!("preview failed: {err}");
    }
    result
}
