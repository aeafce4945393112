//! Game context and scene state machine
//!
//! [`Game`] owns everything that outlives a single round: the scene, the
//! seeded generator, the selected vehicle, the best score and the store it
//! comes from. Hosts feed it [`Intent`]s and held input once per frame, drain
//! the queued [`GameEvent`]s and draw from [`Game::view`].

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::audio::AudioCue;
use crate::highscores::HighScoreStore;
use crate::input::Intent;
use crate::sim::catalog::vehicle;
use crate::sim::{RoundState, TickInput, TickReport, activate_boost, tick};
use crate::tuning::Tuning;
use crate::view::{FrameView, Hud, Overlay};

/// Top-level screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scene {
    /// Title screen, waiting for confirm
    Start,
    /// Active gameplay
    Playing,
    Paused,
    /// Round ended, waiting for retry answer
    GameOver,
}

/// Notifications for the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Audio(AudioCue),
    ShieldCollected,
    ShieldAbsorbed,
    MissionCompleted,
    MissionFailed,
    /// Round ended with this score
    RoundOver { score: i64 },
    /// The finished round beat the stored best
    NewHighScore(i64),
}

/// Long-lived game context
pub struct Game<S: HighScoreStore> {
    tuning: Tuning,
    rng: Pcg32,
    scene: Scene,
    round: RoundState,
    selected_vehicle: usize,
    high_score: i64,
    running: bool,
    store: S,
    events: Vec<GameEvent>,
}

impl<S: HighScoreStore> Game<S> {
    /// Create a game on the start screen with a fresh round ready
    pub fn new(tuning: Tuning, store: S, seed: u64) -> Self {
        let tuning = match tuning.validate() {
            Ok(()) => tuning,
            Err(e) => {
                log::warn!("{e}; using default tuning");
                Tuning::default()
            }
        };
        let mut rng = Pcg32::seed_from_u64(seed);
        let round = RoundState::new(&tuning, 0, &mut rng);
        let high_score = store.load_highscore();
        log::info!("Game created (seed {seed}, best {high_score})");
        Self {
            tuning,
            rng,
            scene: Scene::Start,
            round,
            selected_vehicle: 0,
            high_score,
            running: true,
            store,
            events: Vec::new(),
        }
    }

    /// Apply a one-shot action. Combinations the current scene does not
    /// accept are ignored.
    pub fn handle(&mut self, intent: Intent) {
        match (self.scene, intent) {
            (_, Intent::Quit) => self.quit(),

            (Scene::Start, Intent::Confirm) => self.start_playing(),
            (Scene::Start, Intent::SelectVehicle(index)) => {
                if let Some(profile) = vehicle(index) {
                    self.selected_vehicle = index;
                    self.round.vehicle = index;
                    log::info!("Selected vehicle {}", profile.name);
                }
            }

            (Scene::Playing, Intent::PauseToggle) => self.scene = Scene::Paused,
            (Scene::Playing, Intent::Boost) => {
                let was_failed = self.round.mission.failed;
                if activate_boost(&mut self.round, &self.tuning)
                    && !was_failed
                    && self.round.mission.failed
                {
                    self.events.push(GameEvent::MissionFailed);
                }
            }
            (Scene::Playing, Intent::SwipeLeft) => {
                self.round.player.shift_lane(-1, self.tuning.balance.lane_count)
            }
            (Scene::Playing, Intent::SwipeRight) => {
                self.round.player.shift_lane(1, self.tuning.balance.lane_count)
            }

            (Scene::Paused, Intent::PauseToggle) => self.scene = Scene::Playing,

            (Scene::GameOver, Intent::RetryYes) => {
                self.reset_round();
                self.start_playing();
            }
            (Scene::GameOver, Intent::RetryNo) => self.quit(),

            _ => {}
        }
    }

    /// Advance one frame. Only ticks while playing; returns the tick report
    /// when a tick ran.
    pub fn update(&mut self, input: &TickInput) -> Option<TickReport> {
        if self.scene != Scene::Playing {
            return None;
        }

        let report = tick(&mut self.round, input, &self.tuning, &mut self.rng);

        if report.shield_collected {
            self.events.push(GameEvent::ShieldCollected);
        }
        if report.shield_absorbed {
            self.events.push(GameEvent::ShieldAbsorbed);
        }
        if report.mission_completed {
            self.events.push(GameEvent::MissionCompleted);
        }
        if report.crashed {
            self.end_round();
        }

        Some(report)
    }

    /// Replace the round with a fresh one using the selected vehicle
    pub fn reset_round(&mut self) {
        self.round = RoundState::new(&self.tuning, self.selected_vehicle, &mut self.rng);
    }

    pub fn view(&self) -> FrameView<'_> {
        FrameView {
            scene: self.scene,
            round: &self.round,
            high_score: self.high_score,
            hud: Hud::new(&self.round, self.high_score, &self.tuning),
            overlay: Overlay::for_scene(self.scene),
        }
    }

    /// Take all queued events, oldest first
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn scene(&self) -> Scene {
        self.scene
    }

    pub fn round(&self) -> &RoundState {
        &self.round
    }

    pub fn round_mut(&mut self) -> &mut RoundState {
        &mut self.round
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn high_score(&self) -> i64 {
        self.high_score
    }

    pub fn selected_vehicle(&self) -> usize {
        self.selected_vehicle
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn start_playing(&mut self) {
        self.scene = Scene::Playing;
        self.events.push(GameEvent::Audio(AudioCue::StartMusic));
        log::info!(
            "Round started: {} on {}, mission {}",
            self.round.vehicle_profile().name,
            self.round.theme().name,
            self.round.mission.label(self.tuning.display.fps)
        );
    }

    fn end_round(&mut self) {
        let score = self.round.score;
        self.events.push(GameEvent::Audio(AudioCue::Crash));
        self.events.push(GameEvent::Audio(AudioCue::StopMusic));
        self.scene = Scene::GameOver;

        let previous = self.high_score;
        self.high_score = self.store.update_highscore(score);
        self.events.push(GameEvent::RoundOver { score });
        if self.high_score > previous && self.high_score == score {
            self.events.push(GameEvent::NewHighScore(score));
        }
        log::info!(
            "Crash at frame {}: score {score}, best {}",
            self.round.frame,
            self.high_score
        );
    }

    fn quit(&mut self) {
        if self.running {
            log::info!("Quit requested");
        }
        self.running = false;
    }
}
