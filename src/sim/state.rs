//! Round state and core simulation types
//!
//! Everything one play session mutates lives in [`RoundState`]. A new round
//! replaces the whole value.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::catalog::{THEMES, TrackTheme, VEHICLES, VehicleProfile};
use super::collision::Rect;
use crate::consts::*;
use crate::tuning::Tuning;
use crate::{lane_x, nearest_lane, player_x_bounds};

/// Frames the survive mission must last (30 seconds at 60 Hz)
pub const SURVIVE_MISSION_FRAMES: u64 = 30 * 60;
/// Frames the no-boost mission must last (20 seconds at 60 Hz)
pub const NO_BOOST_MISSION_FRAMES: u64 = 20 * 60;

/// The player's car
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    /// Lateral velocity (pixels per tick)
    pub vel: f32,
    /// Lane the car is easing toward
    pub target_lane: usize,
}

impl Player {
    fn new(tuning: &Tuning) -> Self {
        let width = tuning.display.width;
        let lane_count = tuning.balance.lane_count;
        let x = width / 2.0 - CAR_WIDTH / 2.0;
        Self {
            pos: Vec2::new(x, tuning.display.height - CAR_BOTTOM_OFFSET),
            vel: 0.0,
            target_lane: nearest_lane(x, lane_count, width, CAR_WIDTH),
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::at(self.pos, Vec2::new(CAR_WIDTH, CAR_HEIGHT))
    }

    /// Lane the car currently occupies
    pub fn lane(&self, tuning: &Tuning) -> usize {
        nearest_lane(self.pos.x, tuning.balance.lane_count, tuning.display.width, CAR_WIDTH)
    }

    /// Move the lane target by `delta` lanes, staying on the road
    pub fn shift_lane(&mut self, delta: i32, lane_count: usize) {
        let last = lane_count.saturating_sub(1) as i64;
        self.target_lane = (self.target_lane as i64 + delta as i64).clamp(0, last) as usize;
    }

    /// Left edge x of the target lane
    pub fn target_x(&self, tuning: &Tuning) -> f32 {
        lane_x(self.target_lane, tuning.balance.lane_count, tuning.display.width, CAR_WIDTH)
    }

    /// Clamp x to the playable road
    pub fn clamp_to_road(&mut self, width: f32) {
        let (min_x, max_x) = player_x_bounds(width);
        self.pos.x = self.pos.x.clamp(min_x, max_x);
    }
}

/// An oncoming traffic car
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    /// Lane the car last settled into
    pub lane: usize,
    /// Lane the AI is steering toward
    pub target_lane: usize,
    /// Top-left corner
    pub pos: Vec2,
    /// Per-car multiplier on the shared enemy speed
    pub speed_mul: f32,
    /// Ticks until the next AI decision
    pub ai_ticks: u32,
}

impl Enemy {
    /// Spawn a car in a random lane at height `y`
    pub fn spawn<R: Rng + ?Sized>(y: f32, tuning: &Tuning, rng: &mut R) -> Self {
        let lane = rng.random_range(0..tuning.balance.lane_count);
        Self {
            lane,
            target_lane: lane,
            pos: Vec2::new(enemy_lane_x(lane, tuning), y),
            speed_mul: rng.random_range(ENEMY_SPEED_MUL_MIN..=ENEMY_SPEED_MUL_MAX),
            ai_ticks: rng.random_range(ENEMY_AI_MIN_TICKS..=ENEMY_AI_MAX_TICKS),
        }
    }

    /// Re-enter from above the screen with a new lane and speed multiplier
    pub fn respawn<R: Rng + ?Sized>(&mut self, tuning: &Tuning, rng: &mut R) {
        let y = random_respawn_y(rng);
        *self = Self::spawn(y, tuning, rng);
    }

    pub fn rect(&self) -> Rect {
        Rect::at(self.pos, Vec2::new(ENEMY_WIDTH, ENEMY_HEIGHT))
    }
}

/// Left edge x of an enemy centered in `lane`
pub fn enemy_lane_x(lane: usize, tuning: &Tuning) -> f32 {
    lane_x(lane, tuning.balance.lane_count, tuning.display.width, ENEMY_WIDTH)
}

/// Random height in the respawn band above the screen
pub fn random_respawn_y<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    rng.random_range(ENEMY_RESPAWN_MIN_Y..=ENEMY_RESPAWN_MAX_Y)
}

/// A falling shield pickup
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ShieldItem {
    pub pos: Vec2,
    pub size: Vec2,
}

impl ShieldItem {
    pub fn rect(&self) -> Rect {
        Rect::at(self.pos, self.size)
    }
}

/// Secondary objective type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MissionKind {
    /// Stay alive until the target frame
    Survive,
    /// Stay alive until the target frame without boosting
    NoBoost,
}

/// One in-round objective
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mission {
    pub kind: MissionKind,
    pub target_frames: u64,
    pub completed: bool,
    pub failed: bool,
}

impl Mission {
    pub fn new(kind: MissionKind) -> Self {
        let target_frames = match kind {
            MissionKind::Survive => SURVIVE_MISSION_FRAMES,
            MissionKind::NoBoost => NO_BOOST_MISSION_FRAMES,
        };
        Self {
            kind,
            target_frames,
            completed: false,
            failed: false,
        }
    }

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        if rng.random_bool(0.5) {
            Self::new(MissionKind::Survive)
        } else {
            Self::new(MissionKind::NoBoost)
        }
    }

    /// Completed or failed; no further transitions this round
    pub fn is_terminal(&self) -> bool {
        self.completed || self.failed
    }

    /// Boost was used; fails an unfinished no-boost mission
    pub fn on_boost(&mut self) {
        if self.kind == MissionKind::NoBoost && !self.is_terminal() {
            self.failed = true;
        }
    }

    /// Mark completed once `frame` reaches the target. Returns true on the
    /// transition.
    pub fn evaluate(&mut self, frame: u64) -> bool {
        if self.is_terminal() || frame < self.target_frames {
            return false;
        }
        self.completed = true;
        true
    }

    /// HUD label, e.g. "Survive 30s"
    pub fn label(&self, fps: u32) -> String {
        let secs = self.target_frames / u64::from(fps.max(1));
        match self.kind {
            MissionKind::Survive => format!("Survive {secs}s"),
            MissionKind::NoBoost => format!("No boost for {secs}s"),
        }
    }

    /// Completion fraction in [0, 1]
    pub fn progress(&self, frame: u64) -> f32 {
        if self.completed {
            return 1.0;
        }
        (frame as f32 / self.target_frames.max(1) as f32).min(1.0)
    }
}

/// Complete state of one play session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundState {
    pub player: Player,
    /// Index into [`VEHICLES`]
    pub vehicle: usize,
    /// Index into [`THEMES`]
    pub theme: usize,
    pub enemies: Vec<Enemy>,
    pub shield_item: Option<ShieldItem>,
    /// Player holds a shield that absorbs the next crash
    pub shield_active: bool,
    /// Ticks until the next shield item may spawn
    pub shield_spawn_ticks: u32,
    pub mission: Mission,
    pub boost_timer: u32,
    pub boost_cooldown: u32,
    pub boost_used: bool,
    pub score: i64,
    pub frame: u64,
    /// Lane divider segment heights (same for every divider)
    pub lines: Vec<f32>,
    /// Shared enemy speed before per-car multipliers
    pub enemy_speed: f32,
    pub line_speed: f32,
}

impl RoundState {
    /// Fresh round: random theme and mission, staggered traffic
    pub fn new<R: Rng + ?Sized>(tuning: &Tuning, vehicle: usize, rng: &mut R) -> Self {
        let theme = rng.random_range(0..THEMES.len());
        let mission = Mission::random(rng);

        let enemies = (0..tuning.balance.enemy_count)
            .map(|i| {
                let y = ENEMY_RESPAWN_MAX_Y - i as f32 * 220.0 - rng.random_range(0.0f32..120.0);
                Enemy::spawn(y, tuning, rng)
            })
            .collect();

        let lines = (0..)
            .map(|i| i as f32 * LINE_SPACING)
            .take_while(|&y| y < tuning.display.height)
            .collect();

        Self {
            player: Player::new(tuning),
            vehicle: vehicle.min(VEHICLES.len() - 1),
            theme,
            enemies,
            shield_item: None,
            shield_active: false,
            shield_spawn_ticks: tuning.items.shield_spawn_interval_frames,
            mission,
            boost_timer: 0,
            boost_cooldown: 0,
            boost_used: false,
            score: 0,
            frame: 0,
            lines,
            enemy_speed: tuning.balance.initial_enemy_speed,
            line_speed: tuning.balance.initial_line_speed,
        }
    }

    pub fn vehicle_profile(&self) -> &'static VehicleProfile {
        VEHICLES.get(self.vehicle).unwrap_or(&VEHICLES[0])
    }

    pub fn theme(&self) -> &'static TrackTheme {
        THEMES.get(self.theme).unwrap_or(&THEMES[0])
    }

    pub fn is_boosting(&self) -> bool {
        self.boost_timer > 0
    }

    pub fn boost_ready(&self) -> bool {
        self.boost_cooldown == 0
    }
}
