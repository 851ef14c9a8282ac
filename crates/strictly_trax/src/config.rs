//! Game configuration.

use crate::error::ConfigError;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Side length of the bounded board variant.
pub const BOUNDED_EXTENT: u32 = 8;

/// Rule variant selected at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Getters)]
pub struct GameConfig {
    /// Largest allowed width and height, `None` for an unbounded board.
    #[serde(default)]
    max_extent: Option<u32>,

    /// Only loops win; edge-to-edge connections are ignored.
    #[serde(default)]
    loop_variant: bool,
}

impl GameConfig {
    /// Creates a configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `max_extent` is zero.
    #[instrument]
    pub fn new(max_extent: Option<u32>, loop_variant: bool) -> Result<Self, ConfigError> {
        Self {
            max_extent,
            loop_variant,
        }
        .checked()
    }

    fn checked(self) -> Result<Self, ConfigError> {
        if self.max_extent == Some(0) {
            return Err(ConfigError::new("max_extent must be at least 1"));
        }
        Ok(self)
    }

    /// Classic Trax: unbounded board, loops and connections both win.
    pub fn standard() -> Self {
        Self {
            max_extent: None,
            loop_variant: false,
        }
    }

    /// Bounded Trax on an `extent` x `extent` board.
    ///
    /// # Panics
    ///
    /// Panics if `extent` is zero. Use [`GameConfig::new`] for untrusted
    /// sizes.
    pub fn bounded(extent: u32) -> Self {
        assert!(extent > 0, "bounded board needs an extent of at least 1");
        Self {
            max_extent: Some(extent),
            loop_variant: false,
        }
    }

    /// Loop Trax: unbounded board, only loops win.
    pub fn loop_trax() -> Self {
        Self {
            max_extent: None,
            loop_variant: true,
        }
    }

    /// Parses configuration from TOML text.
    #[instrument(skip(content))]
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.checked()
    }

    /// Loads configuration from TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;
        let config = Self::from_toml_str(&content)?;
        info!(max_extent = ?config.max_extent, loop_variant = config.loop_variant, "Config loaded successfully");
        Ok(config)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::standard()
    }
}

/// Named rule presets.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[strum(serialize_all = "kebab-case")]
pub enum Variant {
    /// Unbounded board, loops and connections.
    Trax,
    /// Eight by eight board.
    #[strum(serialize = "trax-8x8")]
    Trax8x8,
    /// Loops only.
    LoopTrax,
}

impl From<Variant> for GameConfig {
    fn from(variant: Variant) -> Self {
        match variant {
            Variant::Trax => GameConfig::standard(),
            Variant::Trax8x8 => GameConfig::bounded(BOUNDED_EXTENT),
            Variant::LoopTrax => GameConfig::loop_trax(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn test_parse_toml() {
        let config = GameConfig::from_toml_str("max_extent = 8\n").unwrap();
        assert_eq!(config, GameConfig::bounded(8));

        let config = GameConfig::from_toml_str("loop_variant = true\n").unwrap();
        assert_eq!(config, GameConfig::loop_trax());

        let config = GameConfig::from_toml_str("").unwrap();
        assert_eq!(config, GameConfig::standard());
    }

    #[test]
    fn test_rejects_zero_extent() {
        assert!(GameConfig::from_toml_str("max_extent = 0").is_err());
        assert!(GameConfig::from_toml_str("max_extent = \"big\"").is_err());
    }

    #[test]
    fn test_constructors_reject_zero_extent() {
        assert!(GameConfig::new(Some(0), false).is_err());
        assert_eq!(GameConfig::new(Some(8), false).unwrap(), GameConfig::bounded(8));
        assert_eq!(GameConfig::new(None, true).unwrap(), GameConfig::loop_trax());
    }

    #[test]
    #[should_panic(expected = "at least 1")]
    fn test_bounded_zero_panics() {
        let _ = GameConfig::bounded(0);
    }

    #[test]
    fn test_variant_names_round_trip() {
        assert_eq!(Variant::from_str("trax-8x8").unwrap(), Variant::Trax8x8);
        assert_eq!(Variant::from_str("loop-trax").unwrap(), Variant::LoopTrax);
        for variant in Variant::iter() {
            assert_eq!(Variant::from_str(&variant.to_string()).unwrap(), variant);
        }
        assert_eq!(*GameConfig::from(Variant::Trax8x8).max_extent(), Some(8));
    }
}
