//! Lane Dash - a top-down lane-dodge arcade game
//!
//! Core modules:
//! - `sim`: Deterministic round simulation (movement, traffic AI, collisions, missions)
//! - `game`: Scene state machine driven by decoded input intents
//! - `tuning`: Data-driven game balance
//! - `highscores`: High score persistence gateway
//! - `input`: Key and gesture decoding into intents
//! - `view`: Read-only render snapshot for the presentation layer
//! - `audio`: Audio cues emitted by the core

pub mod audio;
pub mod game;
pub mod highscores;
pub mod input;
pub mod sim;
pub mod tuning;
pub mod view;

pub use game::{Game, GameEvent, Scene};
pub use highscores::{HighScoreStore, JsonFileStore, MemoryStore};
pub use input::Intent;
pub use tuning::Tuning;

/// Game geometry constants
pub mod consts {
    /// Width of the road strip on each side of the playable area
    pub const ROAD_EDGE: f32 = 50.0;

    /// Player car footprint
    pub const CAR_WIDTH: f32 = 50.0;
    pub const CAR_HEIGHT: f32 = 90.0;
    /// Distance of the player car's top edge from the bottom of the screen
    pub const CAR_BOTTOM_OFFSET: f32 = 110.0;

    /// Enemy car footprint
    pub const ENEMY_WIDTH: f32 = 50.0;
    pub const ENEMY_HEIGHT: f32 = 80.0;

    /// Vertical distance between lane divider segments
    pub const LINE_SPACING: f32 = 90.0;
    /// Where a lane divider segment re-enters after scrolling off the bottom
    pub const LINE_WRAP_Y: f32 = -90.0;

    /// Velocity decay per tick with no steering input
    pub const VELOCITY_DAMPING: f32 = 0.85;

    /// Enemy AI constants
    pub const ENEMY_LANE_EASE: f32 = 0.13;
    pub const ENEMY_LANE_SNAP: f32 = 3.0;
    pub const ENEMY_BLOCK_RANGE: f32 = 180.0;
    pub const ENEMY_BLOCK_CHANCE: f64 = 0.65;
    pub const ENEMY_AI_MIN_TICKS: u32 = 30;
    pub const ENEMY_AI_MAX_TICKS: u32 = 100;
    pub const ENEMY_SPEED_MUL_MIN: f32 = 0.92;
    pub const ENEMY_SPEED_MUL_MAX: f32 = 1.15;
    /// Respawn band above the screen
    pub const ENEMY_RESPAWN_MIN_Y: f32 = -360.0;
    pub const ENEMY_RESPAWN_MAX_Y: f32 = -80.0;

    /// Score awarded for each enemy that scrolls past
    pub const PASS_SCORE: i64 = 2;
    /// Score awarded on mission completion
    pub const MISSION_BONUS: i64 = 30;

    /// Shield item horizontal spawn band (left edge of the item)
    pub const SHIELD_SPAWN_MIN_X: f32 = 60.0;
    pub const SHIELD_SPAWN_RIGHT_MARGIN: f32 = 90.0;
}

/// Horizontal bounds `[min, max]` for the player car's left edge
#[inline]
pub fn player_x_bounds(width: f32) -> (f32, f32) {
    (consts::ROAD_EDGE, width - 2.0 * consts::ROAD_EDGE)
}

/// Left-edge x of an object `object_width` wide centered in `lane`
#[inline]
pub fn lane_x(lane: usize, lane_count: usize, width: f32, object_width: f32) -> f32 {
    let lane_width = lane_width(lane_count, width);
    consts::ROAD_EDGE + lane_width * (lane as f32 + 0.5) - object_width / 2.0
}

/// Width of a single lane on a road `width` wide
#[inline]
pub fn lane_width(lane_count: usize, width: f32) -> f32 {
    (width - 2.0 * consts::ROAD_EDGE) / lane_count.max(1) as f32
}

/// Lane whose center is nearest to an object with left edge `x`
pub fn nearest_lane(x: f32, lane_count: usize, width: f32, object_width: f32) -> usize {
    let center = x + object_width / 2.0 - consts::ROAD_EDGE;
    let lane = (center / lane_width(lane_count, width)).floor();
    (lane.max(0.0) as usize).min(lane_count.saturating_sub(1))
}
