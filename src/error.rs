//! Error types for kinetic-canvas.
//!
//! The per-frame simulation and drawing never fail. Errors only come from the
//! edges: strict parsing of shape names and colors, config validation, and
//! loading a config file.

use thiserror::Error;

/// Crate-wide result type alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised outside the frame loop.
#[derive(Debug, Error)]
pub enum Error {
    /// A shape name that is not one of the known shape kinds.
    #[error("unknown shape kind: {0:?}")]
    UnknownShape(String),

    /// A color string that is not `#rgb`, `#rrggbb`, `rgb(...)` or `rgba(...)`.
    #[error("invalid color: {0:?}")]
    InvalidColor(String),

    /// A configuration value outside its valid range.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// Malformed config document.
    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] serde_json::Error),

    /// Failed to read a config file.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_is_informative() {
        let e = Error::InvalidConfig("friction must be in (0, 1]".to_string());
        let msg = format!("{e}");
        assert!(msg.contains("invalid config"));
        assert!(msg.contains("friction"));

        let e = Error::UnknownShape("hexagon".into());
        assert_eq!(format!("{e}"), "unknown shape kind: \"hexagon\"");
    }

    #[test]
    fn test_json_error_converts() {
        let parse: std::result::Result<u32, _> = serde_json::from_str("not json");
        let e: Error = parse.unwrap_err().into();
        assert!(matches!(e, Error::ConfigParse(_)));
    }
}
