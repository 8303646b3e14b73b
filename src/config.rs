//! Board configuration.
//!
//! Every field has a default, so a config file only needs the values it
//! changes:
//!
//! ```json
//! { "background": "#101018", "particle_cap": 50, "link": { "max_distance": 120 } }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::error::{Error, Result};

/// Highest display refresh rate a config may ask for.
pub const MAX_REFRESH_HZ: u32 = 1000;

/// Style and reach of the proximity links.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkConfig {
    /// Pairs at or beyond this distance are not linked.
    pub max_distance: f32,
    pub line_width: f32,
    /// Base color; the per-link alpha replaces its alpha.
    pub color: Color,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            max_distance: 200.0,
            line_width: 1.0,
            color: Color::WHITE.with_alpha(0.1),
        }
    }
}

/// Settings for a [`StickerBoard`](crate::board::StickerBoard).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Fill color painted every frame.
    pub background: Color,
    /// Most linked particles alive at once; the oldest is evicted beyond it.
    pub particle_cap: usize,
    /// Stickers placed when the board is created.
    pub initial_stickers: usize,
    /// Whether to add the floating title words.
    pub titles: bool,
    pub link: LinkConfig,
    /// Display refresh rate for the simulated scheduler.
    pub refresh_hz: u32,
    /// RNG seed. `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            background: Color::rgb(0x0a, 0x0a, 0x0a),
            particle_cap: 30,
            initial_stickers: 15,
            titles: true,
            link: LinkConfig::default(),
            refresh_hz: 60,
            seed: None,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    pub fn with_particle_cap(mut self, cap: usize) -> Self {
        self.particle_cap = cap;
        self
    }

    pub fn with_initial_stickers(mut self, count: usize) -> Self {
        self.initial_stickers = count;
        self
    }

    pub fn with_titles(mut self, titles: bool) -> Self {
        self.titles = titles;
        self
    }

    pub fn with_link_distance(mut self, max_distance: f32) -> Self {
        self.link.max_distance = max_distance;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Parse and validate a JSON config.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path.as_ref())?;
        Self::from_json(&text)
    }

    pub fn validate(&self) -> Result<()> {
        if self.particle_cap == 0 {
            return Err(Error::InvalidConfig("particle_cap must be at least 1".into()));
        }
        if self.initial_stickers > self.particle_cap {
            return Err(Error::InvalidConfig(format!(
                "initial_stickers ({}) exceeds particle_cap ({})",
                self.initial_stickers, self.particle_cap
            )));
        }
        if !(self.link.max_distance > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "link.max_distance must be positive, got {}",
                self.link.max_distance
            )));
        }
        if !(self.link.line_width > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "link.line_width must be positive, got {}",
                self.link.line_width
            )));
        }
        if !(1..=MAX_REFRESH_HZ).contains(&self.refresh_hz) {
            return Err(Error::InvalidConfig(format!(
                "refresh_hz must be in 1..={MAX_REFRESH_HZ}, got {}",
                self.refresh_hz
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = Config::from_json(r##"{ "background": "#101018", "link": { "max_distance": 120 } }"##).unwrap();
        assert_eq!(config.background, Color::rgb(0x10, 0x10, 0x18));
        assert_eq!(config.link.max_distance, 120.0);
        assert_eq!(config.link.line_width, 1.0);
        assert_eq!(config.particle_cap, 30);
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(Config::new().with_particle_cap(0).validate().is_err());
        assert!(Config::new().with_particle_cap(10).validate().is_err());
        assert!(Config::new().with_link_distance(0.0).validate().is_err());
        assert!(matches!(
            Config::from_json(r#"{ "refresh_hz": 0 }"#),
            Err(Error::InvalidConfig(_))
        ));
        assert!(matches!(
            Config::from_json(r#"{ "refresh_hz": 2000000000 }"#),
            Err(Error::InvalidConfig(_))
        ));
        assert!(Config::from_json(r#"{ "refresh_hz": 1000 }"#).is_ok());
    }

    #[test]
    fn test_bad_json_is_parse_error() {
        assert!(matches!(Config::from_json("{"), Err(Error::ConfigParse(_))));
        assert!(matches!(
            Config::from_json(r#"{ "background": "purple" }"#),
            Err(Error::ConfigParse(_))
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        assert!(matches!(
            Config::load("/definitely/not/here.json"),
            Err(Error::Io(_))
        ));
    }
}
