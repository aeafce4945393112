//! Deterministic round simulation
//!
//! All gameplay rules live here. This module must stay pure and deterministic:
//! - One discrete step per call, no clocks or sleeping
//! - Randomness only from the generator passed in by the caller
//! - Stable iteration order (enemies are processed in vector order)
//! - No rendering, audio or platform dependencies

pub mod autopilot;
pub mod catalog;
pub mod collision;
pub mod state;
pub mod tick;

pub use catalog::{THEMES, TrackTheme, VEHICLES, VehicleProfile};
pub use collision::Rect;
pub use state::{Enemy, Mission, MissionKind, Player, RoundState, ShieldItem};
pub use tick::{TickInput, TickReport, activate_boost, tick};
