//! Game settings - board shape, match rule and cascade pacing
//!
//! Settings come from defaults, environment variables or a JSON document.
//! Every source ends in [`GameSettings::validate`] before a board is built.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::{
    DEFAULT_BOARD_SIZE_X, DEFAULT_BOARD_SIZE_Y, DEFAULT_MATCH_MIN, HINT_DELAY_MS, SETTLE_MS,
    SHUFFLE_MS, SWAP_MS,
};

/// Consecutive shuffles tolerated before the board is rebuilt from scratch
pub const DEFAULT_SHUFFLE_LIMIT: u32 = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    pub board_size_x: u8,
    pub board_size_y: u8,
    pub match_min: usize,
    /// Idle time before a hint is shown
    pub time_for_hint_ms: u32,
    pub swap_ms: u32,
    /// Pause after collapse and after refill
    pub settle_ms: u32,
    pub shuffle_ms: u32,
    pub shuffle_limit: u32,
    pub seed: u32,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            board_size_x: DEFAULT_BOARD_SIZE_X,
            board_size_y: DEFAULT_BOARD_SIZE_Y,
            match_min: DEFAULT_MATCH_MIN,
            time_for_hint_ms: HINT_DELAY_MS,
            swap_ms: SWAP_MS,
            settle_ms: SETTLE_MS,
            shuffle_ms: SHUFFLE_MS,
            shuffle_limit: DEFAULT_SHUFFLE_LIMIT,
            seed: 1,
        }
    }
}

impl GameSettings {
    /// Create from environment variables, keeping defaults for anything unset
    /// or unparsable
    pub fn from_env() -> Self {
        use std::env;

        fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
            env::var(name).ok().and_then(|s| s.trim().parse().ok())
        }

        let defaults = Self::default();
        Self {
            board_size_x: parse_var("GEM_BOARD_X").unwrap_or(defaults.board_size_x),
            board_size_y: parse_var("GEM_BOARD_Y").unwrap_or(defaults.board_size_y),
            match_min: parse_var("GEM_MATCH_MIN").unwrap_or(defaults.match_min),
            time_for_hint_ms: parse_var("GEM_HINT_MS").unwrap_or(defaults.time_for_hint_ms),
            seed: parse_var("GEM_SEED").unwrap_or(defaults.seed),
            ..defaults
        }
    }

    /// Parse a JSON document; missing fields keep their defaults
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.board_size_x == 0 || self.board_size_y == 0 {
            return Err(ConfigError::Invalid("board dimensions must be at least 1"));
        }
        if self.board_size_x > crate::board::MAX_BOARD_SIDE
            || self.board_size_y > crate::board::MAX_BOARD_SIDE
        {
            return Err(ConfigError::Invalid("board dimensions must be at most 64"));
        }
        if self.match_min < 2 {
            return Err(ConfigError::Invalid("match_min must be at least 2"));
        }
        // Smaller shapes never hold a potential move, so no shuffle can settle them.
        if self.board_size_x.min(self.board_size_y) < 2 {
            return Err(ConfigError::Invalid("both board dimensions must be at least 2"));
        }
        if (self.board_size_x.max(self.board_size_y) as usize) < self.match_min {
            return Err(ConfigError::Invalid(
                "the longer board side must fit a match of match_min cells",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = GameSettings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.match_min, 3);
        assert_eq!(settings.board_size_x, 8);
    }

    #[test]
    fn test_json_partial_document_keeps_defaults() {
        let settings = GameSettings::from_json_str(r#"{"board_size_x": 5, "seed": 9}"#).unwrap();
        assert_eq!(settings.board_size_x, 5);
        assert_eq!(settings.board_size_y, DEFAULT_BOARD_SIZE_Y);
        assert_eq!(settings.seed, 9);
        assert_eq!(settings.settle_ms, SETTLE_MS);
    }

    #[test]
    fn test_json_invalid_values_rejected() {
        assert!(matches!(
            GameSettings::from_json_str(r#"{"match_min": 1}"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            GameSettings::from_json_str(r#"{"board_size_x": 0}"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            GameSettings::from_json_str("not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_unplayable_shapes_rejected() {
        for (x, y) in [(2, 2), (1, 3), (3, 1), (1, 8)] {
            let settings = GameSettings {
                board_size_x: x,
                board_size_y: y,
                ..GameSettings::default()
            };
            assert!(
                matches!(settings.validate(), Err(ConfigError::Invalid(_))),
                "{}x{} should be rejected",
                x,
                y
            );
        }

        let narrow = GameSettings {
            board_size_x: 2,
            board_size_y: 3,
            ..GameSettings::default()
        };
        assert!(narrow.validate().is_ok());

        let long_match = GameSettings {
            board_size_x: 4,
            board_size_y: 4,
            match_min: 5,
            ..GameSettings::default()
        };
        assert!(long_match.validate().is_err());
    }

    #[test]
    fn test_json_roundtrip_serializes_every_field() {
        let json = serde_json::to_value(GameSettings::default()).unwrap();
        assert_eq!(json["time_for_hint_ms"], 5000);
        assert_eq!(json["shuffle_limit"], DEFAULT_SHUFFLE_LIMIT);
    }
}
