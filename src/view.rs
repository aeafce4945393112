//! Read-only frame snapshot for presenters
//!
//! The core never draws. Each frame the host asks [`Game::view`] for a
//! [`FrameView`] and hands it to its [`Presenter`]. Everything a HUD needs is
//! precomputed here so presenters stay dumb.
//!
//! [`Game::view`]: crate::game::Game::view

use crate::game::Scene;
use crate::sim::RoundState;
use crate::tuning::Tuning;

/// Boost readiness label
pub const BOOST_READY: &str = "READY";

/// Heads-up display values
#[derive(Debug, Clone, PartialEq)]
pub struct Hud {
    pub score: i64,
    pub best: i64,
    /// `READY` or whole seconds of cooldown left
    pub boost: String,
    pub vehicle: &'static str,
    pub theme: &'static str,
    pub mission: String,
    /// Mission completion in [0, 1]
    pub mission_progress: f32,
    pub mission_completed: bool,
    pub mission_failed: bool,
    pub shield: bool,
}

impl Hud {
    pub fn new(round: &RoundState, best: i64, tuning: &Tuning) -> Self {
        let fps = tuning.display.fps.max(1);
        Self {
            score: round.score,
            best,
            boost: boost_label(round.boost_cooldown, fps),
            vehicle: round.vehicle_profile().name,
            theme: round.theme().name,
            mission: round.mission.label(fps),
            mission_progress: round.mission.progress(round.frame),
            mission_completed: round.mission.completed,
            mission_failed: round.mission.failed,
            shield: round.shield_active,
        }
    }
}

/// `READY` when the cooldown is over, otherwise `cooldown / fps + 1` seconds
pub fn boost_label(cooldown: u32, fps: u32) -> String {
    if cooldown == 0 {
        BOOST_READY.to_string()
    } else {
        format!("{}s", cooldown / fps.max(1) + 1)
    }
}

/// Full-screen message drawn over the road
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Overlay {
    pub title: &'static str,
    pub subtitle: &'static str,
}

impl Overlay {
    pub fn for_scene(scene: Scene) -> Option<Self> {
        match scene {
            Scene::Start => Some(Self {
                title: "Press SPACE to Start",
                subtitle: "Arrows to steer, SHIFT to boost, P to pause, 1-3 to pick a car",
            }),
            Scene::Paused => Some(Self {
                title: "Paused",
                subtitle: "Press P to Resume",
            }),
            Scene::GameOver => Some(Self {
                title: "Game Over!",
                subtitle: "Play again? (Y/N)",
            }),
            Scene::Playing => None,
        }
    }
}

/// Everything needed to draw one frame
#[derive(Debug, Clone)]
pub struct FrameView<'a> {
    pub scene: Scene,
    pub round: &'a RoundState,
    pub high_score: i64,
    pub hud: Hud,
    pub overlay: Option<Overlay>,
}

/// Host-side output (canvas, terminal, log)
pub trait Presenter {
    fn present(&mut self, view: &FrameView<'_>);
}
