use crate::browser;
use anyhow::{anyhow, Result};
use serde::Deserialize;

/// Tunables, read from `frogger.json` next to the page when present.
/// Missing keys keep their defaults.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GameConfig {
    /// clock at the start of every game, in seconds
    pub round_seconds: f64,
    pub enemies_per_lane: usize,
    /// fastest enemy, in milliseconds to cross the board
    pub min_crossing_ms: u32,
    /// slowest enemy
    pub max_crossing_ms: u32,
    /// upper bound on a single frame's time step; `None` lets a stalled tab
    /// catch up in one jump
    pub max_frame_seconds: Option<f64>,
    pub high_score_key: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            round_seconds: 120.0,
            enemies_per_lane: 2,
            min_crossing_ms: 3000,
            max_crossing_ms: 8000,
            max_frame_seconds: None,
            high_score_key: "HighestScore".to_string(),
        }
    }
}

impl GameConfig {
    pub const MAX_ENEMIES_PER_LANE: usize = 5;

    /// Fetch and validate, falling back to the defaults on any failure
    pub async fn load(path: &str) -> Self {
        let loaded = browser::fetch_json::<GameConfig>(path)
            .await
            .and_then(GameConfig::validated);
        match loaded {
            Ok(config) => {
                log!("Loaded config from {} : {:?}", path, config);
                config
            }
            Err(err) => {
                log!("Using default config, {} unusable : {:#}", path, err);
                GameConfig::default()
            }
        }
    }

    pub fn validated(self) -> Result<Self> {
        if !(self.round_seconds > 0.0) {
            return Err(anyhow!("roundSeconds must be positive, got {}", self.round_seconds));
        }
        if self.enemies_per_lane == 0 || self.enemies_per_lane > Self::MAX_ENEMIES_PER_LANE {
            return Err(anyhow!(
                "enemiesPerLane must be between 1 and {}, got {}",
                Self::MAX_ENEMIES_PER_LANE,
                self.enemies_per_lane
            ));
        }
        if self.min_crossing_ms == 0 {
            return Err(anyhow!("minCrossingMs must be positive"));
        }
        if self.min_crossing_ms > self.max_crossing_ms {
            return Err(anyhow!(
                "minCrossingMs ({}) is above maxCrossingMs ({})",
                self.min_crossing_ms,
                self.max_crossing_ms
            ));
        }
        if let Some(max) = self.max_frame_seconds {
            if !(max > 0.0) {
                return Err(anyhow!("maxFrameSeconds must be positive, got {}", max));
            }
        }
        Ok(self)
    }

    pub fn crossing_ms(&self) -> (u32, u32) {
        (self.min_crossing_ms, self.max_crossing_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_classic_game() {
        let config = GameConfig::default();
        assert_eq!(config.round_seconds, 120.0);
        assert_eq!(config.enemies_per_lane, 2);
        assert_eq!(config.crossing_ms(), (3000, 8000));
        assert_eq!(config.max_frame_seconds, None);
        assert_eq!(config.high_score_key, "HighestScore");
        assert!(config.validated().is_ok());
    }

    #[test]
    fn partial_json_keeps_other_defaults() {
        let config: GameConfig =
            serde_json::from_str(r#"{ "roundSeconds": 60, "maxFrameSeconds": 0.25 }"#).unwrap();

        assert_eq!(config.round_seconds, 60.0);
        assert_eq!(config.max_frame_seconds, Some(0.25));
        assert_eq!(config.enemies_per_lane, 2);
        assert_eq!(config.high_score_key, "HighestScore");
    }

    #[test]
    fn rejects_nonsense() {
        let inverted = GameConfig {
            min_crossing_ms: 9000,
            ..GameConfig::default()
        };
        assert!(inverted.validated().is_err());

        let no_time = GameConfig {
            round_seconds: 0.0,
            ..GameConfig::default()
        };
        assert!(no_time.validated().is_err());

        let zero_cap = GameConfig {
            max_frame_seconds: Some(0.0),
            ..GameConfig::default()
        };
        assert!(zero_cap.validated().is_err());

        let empty_lanes = GameConfig {
            enemies_per_lane: 0,
            ..GameConfig::default()
        };
        assert!(empty_lanes.validated().is_err());

        let crowded_lanes = GameConfig {
            enemies_per_lane: GameConfig::MAX_ENEMIES_PER_LANE + 1,
            ..GameConfig::default()
        };
        assert!(crowded_lanes.validated().is_err());
    }

    #[test]
    fn accepts_slow_enemies_past_i32() {
        let slow = GameConfig {
            max_crossing_ms: 3_000_000_000,
            ..GameConfig::default()
        };
        assert!(slow.validated().is_ok());
    }
}
