//! Game balance and display tuning
//!
//! Loaded once at startup from an optional JSON file. Any field missing from
//! the file keeps its default, so a tuning file only needs the values it
//! overrides.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Screen geometry and frame rate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub width: f32,
    pub height: f32,
    /// Target host tick rate (used for HUD seconds, never for timing)
    pub fps: u32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width: 400.0,
            height: 600.0,
            fps: 60,
        }
    }
}

/// Speeds, timers and counts shared by all simulation logic
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BalanceConfig {
    /// Global cap on player lateral speed (vehicle max is clamped to this)
    pub max_player_speed: f32,
    /// Base lane snap factor (vehicle handling is added on top)
    pub lane_change_speed: f32,
    pub boost_extra_speed: f32,
    pub boost_duration_frames: u32,
    pub boost_cooldown_frames: u32,
    pub initial_enemy_speed: f32,
    pub enemy_speed_increase: f32,
    pub initial_line_speed: f32,
    pub line_speed_increase: f32,
    pub score_tick_frames: u64,
    pub lane_count: usize,
    pub enemy_count: usize,
}

impl Default for BalanceConfig {
    fn default() -> Self {
        Self {
            max_player_speed: 9.0,
            lane_change_speed: 0.15,
            boost_extra_speed: 4.0,
            boost_duration_frames: 40,
            boost_cooldown_frames: 240,
            initial_enemy_speed: 4.2,
            enemy_speed_increase: 0.12,
            initial_line_speed: 5.0,
            line_speed_increase: 0.04,
            score_tick_frames: 60,
            lane_count: 3,
            enemy_count: 3,
        }
    }
}

/// Shield power-up parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemConfig {
    pub shield_spawn_interval_frames: u32,
    pub shield_fall_speed: f32,
    pub shield_size: (f32, f32),
}

impl Default for ItemConfig {
    fn default() -> Self {
        Self {
            shield_spawn_interval_frames: 360,
            shield_fall_speed: 4.0,
            shield_size: (28.0, 28.0),
        }
    }
}

/// All tuning knobs
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub display: DisplayConfig,
    pub balance: BalanceConfig,
    pub items: ItemConfig,
}

/// Why a tuning file could not be used
#[derive(Debug)]
pub enum TuningError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    /// Parsed fine but a value would break the simulation
    Invalid(&'static str),
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TuningError::Io(e) => write!(f, "cannot read tuning file: {e}"),
            TuningError::Parse(e) => write!(f, "malformed tuning file: {e}"),
            TuningError::Invalid(what) => write!(f, "invalid tuning: {what}"),
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TuningError::Io(e) => Some(e),
            TuningError::Parse(e) => Some(e),
            TuningError::Invalid(_) => None,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON text and validate it
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json).map_err(TuningError::Parse)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Read tuning from a JSON file
    pub fn read(path: &Path) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path).map_err(TuningError::Io)?;
        Self::from_json(&json)
    }

    /// Load tuning from a file, falling back to defaults on any failure
    pub fn load(path: &Path) -> Self {
        match Self::read(path) {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path.display());
                tuning
            }
            Err(e) => {
                log::warn!("{e}; using default tuning");
                Self::default()
            }
        }
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        let balance = &self.balance;
        let speeds = [
            balance.max_player_speed,
            balance.lane_change_speed,
            balance.boost_extra_speed,
            balance.initial_enemy_speed,
            balance.enemy_speed_increase,
            balance.initial_line_speed,
            balance.line_speed_increase,
            self.items.shield_fall_speed,
        ];
        if speeds.iter().any(|s| !s.is_finite() || *s < 0.0) {
            return Err(TuningError::Invalid("speeds must be finite and non-negative"));
        }
        if !self.display.width.is_finite() || !self.display.height.is_finite() {
            return Err(TuningError::Invalid("display size must be finite"));
        }
        let (shield_w, shield_h) = self.items.shield_size;
        if !(shield_w.is_finite() && shield_h.is_finite()) || shield_w < 0.0 || shield_h < 0.0 {
            return Err(TuningError::Invalid("shield_size must be finite and non-negative"));
        }
        if self.balance.lane_count == 0 {
            return Err(TuningError::Invalid("lane_count must be at least 1"));
        }
        if self.balance.score_tick_frames == 0 {
            return Err(TuningError::Invalid("score_tick_frames must be at least 1"));
        }
        if self.display.fps == 0 {
            return Err(TuningError::Invalid("fps must be at least 1"));
        }
        if self.display.width < 3.0 * crate::consts::ROAD_EDGE {
            return Err(TuningError::Invalid("display is too narrow for the road"));
        }
        if self.items.shield_spawn_interval_frames == 0 {
            return Err(TuningError::Invalid("shield_spawn_interval_frames must be at least 1"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_override_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{"balance": {"enemy_count": 5}}"#).unwrap();
        assert_eq!(tuning.balance.enemy_count, 5);
        assert_eq!(tuning.balance.lane_count, 3);
        assert_eq!(tuning.display, DisplayConfig::default());
        assert_eq!(tuning.items, ItemConfig::default());
    }

    #[test]
    fn test_rejects_zero_lanes() {
        let err = Tuning::from_json(r#"{"balance": {"lane_count": 0}}"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid(_)));
    }

    #[test]
    fn test_rejects_negative_speed_cap() {
        let err = Tuning::from_json(r#"{"balance": {"max_player_speed": -1.0}}"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid(_)));
        let err = Tuning::from_json(r#"{"balance": {"boost_extra_speed": -20.0}}"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid(_)));
    }

    #[test]
    fn test_rejects_non_finite_speed() {
        let mut tuning = Tuning::default();
        tuning.balance.initial_enemy_speed = f32::NAN;
        assert!(matches!(tuning.validate(), Err(TuningError::Invalid(_))));
        tuning.balance.initial_enemy_speed = f32::INFINITY;
        assert!(matches!(tuning.validate(), Err(TuningError::Invalid(_))));
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = Tuning::from_json("{ not json").unwrap_err();
        assert!(matches!(err, TuningError::Parse(_)));
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let tuning = Tuning::load(&dir.path().join("absent.json"));
        assert_eq!(tuning, Tuning::default());
    }

    #[test]
    fn test_roundtrip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tuning.json");
        let mut tuning = Tuning::default();
        tuning.balance.boost_cooldown_frames = 120;
        std::fs::write(&path, serde_json::to_string(&tuning).unwrap()).unwrap();
        assert_eq!(Tuning::load(&path), tuning);
    }
}
