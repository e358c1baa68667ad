//! Tracing setup for the terminal preview.
//!
//! Logs never go to stdout or stderr (that would corrupt the alternate
//! screen). With a log file configured, events are appended to it; without
//! one, only the filter is installed and nothing is written.

use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::error::Result;

/// Filter used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "info";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global subscriber.
///
/// A second call is a no-op (the first subscriber stays installed).
pub fn init_tracing(log_file: Option<&Path>) -> Result<()> {
    let Some(path) = log_file else {
        let _ = tracing_subscriber::registry().with(env_filter()).try_init();
        return Ok(());
    };

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }

    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let installed = tracing_subscriber::registry()
        .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
        .with(env_filter())
        .try_init()
        .is_ok();

    if installed {
        tracing::info!(path = %path.display(), "logging initialized");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_creates_log_file_and_parent() {
        let dir = std::env::temp_dir().join(format!("spark-page-log-{}", std::process::id()));
        let path = dir.join("nested").join("preview.log");

        init_tracing(Some(&path)).expect("init");
        assert!(path.exists());

        // Already installed: still fine.
        init_tracing(None).expect("second init");

        let _ = fs::remove_dir_all(&dir);
    }
}
