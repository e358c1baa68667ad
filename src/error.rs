//! Error types.
//!
//! Component logic has no failure paths (bad input is a no-op). Errors only
//! come from the ambient edges: reading config files, the layout engine and
//! terminal I/O.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PageError {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to read config at {}: {source}", .path.display())]
    ReadConfig {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config at {}: {source}", .path.display())]
    ParseConfig {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("layout failed: {0}")]
    Layout(String),
}

impl From<taffy::TaffyError> for PageError {
    fn from(err: taffy::TaffyError) -> Self {
        PageError::Layout(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PageError>;
