//! Error types shared across the crate.
//!
//! Most of the core degrades instead of failing (a crashed renderer leaves the
//! host terminal unusable), so these errors only surface at the edges: terminal
//! setup, writing frames, loading a layout backend and parsing colors.

use std::io;

/// Errors produced by cellflex.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Writing to or configuring the terminal failed.
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),

    /// The layout backend could not be initialised.
    #[error("layout backend unavailable: {0}")]
    LayoutBackend(String),

    /// A color string did not name a known color or a valid hex value.
    #[error("unknown color `{0}`")]
    UnknownColor(String),

    /// A key name did not match any known key.
    #[error("unknown key `{0}`")]
    UnknownKey(String),

    /// The terminal could not be put into the state the renderer needs.
    #[error("terminal setup failed: {0}")]
    Terminal(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_converts() {
        fn fails() -> Result<()> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "gone"))?;
            Ok(())
        }

        let err = fails().unwrap_err();
        assert!(matches!(err, Error::Io(_)));
        assert!(err.to_string().contains("gone"));
    }

    #[test]
    fn test_display_messages() {
        assert_eq!(
            Error::UnknownColor("mauve".into()).to_string(),
            "unknown color `mauve`"
        );
        assert_eq!(
            Error::LayoutBackend("no solver".into()).to_string(),
            "layout backend unavailable: no solver"
        );
    }
}
