//! Demo-mode driver
//!
//! Reads the round like a player would and produces steering input: pick
//! the lane with the most room ahead, detour for a falling shield when the
//! road is clear, then hold the matching direction until the car gets there.

use super::state::RoundState;
use super::tick::TickInput;
use crate::consts::*;
use crate::nearest_lane;
use crate::tuning::Tuning;

/// Gap ahead that counts as comfortably safe
const SAFE_CLEARANCE: f32 = 260.0;

/// Free road ahead of the player in `lane` (f32::INFINITY when empty)
pub fn lane_clearance(state: &RoundState, lane: usize) -> f32 {
    let player_top = state.player.pos.y;
    let player_bottom = player_top + CAR_HEIGHT;
    state
        .enemies
        .iter()
        .filter(|e| e.lane == lane || e.target_lane == lane)
        .filter(|e| e.pos.y < player_bottom)
        .map(|e| (player_top - (e.pos.y + ENEMY_HEIGHT)).max(0.0))
        .fold(f32::INFINITY, f32::min)
}

/// Lane the autopilot wants to be in
pub fn choose_lane(state: &RoundState, tuning: &Tuning) -> usize {
    let lane_count = tuning.balance.lane_count;
    let current = state.player.lane(tuning);

    let mut best = current;
    let mut best_clearance = lane_clearance(state, current);
    for lane in 0..lane_count {
        let clearance = lane_clearance(state, lane);
        // Prefer staying put unless another lane is clearly better
        let closer = lane.abs_diff(current) < best.abs_diff(current);
        if clearance > best_clearance + 1.0 || (clearance >= best_clearance && closer) {
            best = lane;
            best_clearance = clearance;
        }
    }

    if !state.shield_active
        && let Some(item) = state.shield_item
    {
        let item_lane = nearest_lane(item.pos.x, lane_count, tuning.display.width, item.size.x);
        if lane_clearance(state, item_lane) >= SAFE_CLEARANCE {
            return item_lane;
        }
    }

    best
}

/// Steering input for this tick
pub fn drive(state: &RoundState, tuning: &Tuning) -> TickInput {
    let want = choose_lane(state, tuning);
    let target = state.player.target_lane;
    TickInput {
        left: want < target,
        right: want > target,
    }
}
