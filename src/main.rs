//! Lane Dash headless runner
//!
//! Plays one autopilot round against the real file-backed high score and logs
//! what a screen would show. Set `RUST_LOG=info` (or `debug`) to see it and
//! `LANE_DASH_TUNING=path/to/tuning.json` to override the balance.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use lane_dash::audio::{AudioCue, AudioSink, LogAudio};
use lane_dash::sim::autopilot;
use lane_dash::view::{FrameView, Presenter};
use lane_dash::{Game, GameEvent, Intent, JsonFileStore, Scene, Tuning};

/// Stop the demo after ten minutes of game time
const FRAME_CAP: u64 = 60 * 60 * 10;

/// Writes a HUD line every few seconds of game time
struct LogPresenter {
    every_frames: u64,
}

impl Presenter for LogPresenter {
    fn present(&mut self, view: &FrameView<'_>) {
        if let Some(overlay) = view.overlay {
            log::info!("[{:?}] {} | {}", view.scene, overlay.title, overlay.subtitle);
            return;
        }
        if view.round.frame % self.every_frames != 0 {
            return;
        }
        let hud = &view.hud;
        log::info!(
            "frame {:>5} score {:>4} best {:>4} boost {:>5} shield {} | {} ({:.0}%)",
            view.round.frame,
            hud.score,
            hud.best,
            hud.boost,
            if hud.shield { "on " } else { "off" },
            hud.mission,
            hud.mission_progress * 100.0
        );
    }
}

fn main() {
    env_logger::init();
    log::info!("Lane Dash (headless) starting...");

    let tuning = match std::env::var_os("LANE_DASH_TUNING") {
        Some(path) => Tuning::load(&PathBuf::from(path)),
        None => Tuning::default(),
    };

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0);

    let store = JsonFileStore::new(JsonFileStore::DEFAULT_FILE);
    let mut game = Game::new(tuning, store, seed);
    let mut presenter = LogPresenter {
        every_frames: u64::from(tuning.display.fps) * 5,
    };
    let mut audio = LogAudio::new();

    presenter.present(&game.view());
    game.handle(Intent::Confirm);

    while game.is_running() && game.scene() == Scene::Playing && game.round().frame < FRAME_CAP {
        let input = autopilot::drive(game.round(), game.tuning());
        if game.round().boost_ready() && game.round().mission.is_terminal() {
            game.handle(Intent::Boost);
        }
        game.update(&input);

        for event in game.drain_events() {
            match event {
                GameEvent::Audio(cue) => audio.play(cue),
                GameEvent::NewHighScore(score) => log::info!("New high score: {score}"),
                other => log::debug!("event: {other:?}"),
            }
        }
        presenter.present(&game.view());
    }

    if audio.music_playing() {
        audio.play(AudioCue::StopMusic);
    }

    let round = game.round();
    log::info!(
        "Session over after {} frames ({} crash cues): score {}, best {}, mission {} ({})",
        round.frame,
        audio.crashes(),
        round.score,
        game.high_score(),
        round.mission.label(tuning.display.fps),
        if round.mission.completed {
            "completed"
        } else if round.mission.failed {
            "failed"
        } else {
            "open"
        }
    );

    game.handle(Intent::Quit);
}
