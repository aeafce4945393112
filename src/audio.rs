//! Audio cues
//!
//! The core never plays sound itself. It queues cues and the host forwards
//! them to whatever audio backend it has. Playback is fire-and-forget: a sink
//! that cannot play something (missing file, no device) stays silent.

/// Sound requests emitted by the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioCue {
    /// Start (or restart) the looping background track
    StartMusic,
    /// Stop the background track
    StopMusic,
    /// Player hit traffic
    Crash,
}

/// Audio backend the host provides
pub trait AudioSink {
    fn play(&mut self, cue: AudioCue);
}

/// Fallback sink: plays nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentAudio;

impl AudioSink for SilentAudio {
    fn play(&mut self, _cue: AudioCue) {}
}

/// Headless sink that logs cues and tracks whether music is on
#[derive(Debug, Clone, Default)]
pub struct LogAudio {
    music_playing: bool,
    crashes: u32,
}

impl LogAudio {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn music_playing(&self) -> bool {
        self.music_playing
    }

    pub fn crashes(&self) -> u32 {
        self.crashes
    }
}

impl AudioSink for LogAudio {
    fn play(&mut self, cue: AudioCue) {
        match cue {
            AudioCue::StartMusic => self.music_playing = true,
            AudioCue::StopMusic => self.music_playing = false,
            AudioCue::Crash => self.crashes += 1,
        }
        log::debug!("audio: {cue:?}");
    }
}
