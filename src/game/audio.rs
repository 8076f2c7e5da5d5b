//! Audio Triggers
//!
//! The game never touches a playback device. It emits named play/pause/stop
//! calls on an [`AudioPort`]; the host wires those to real sounds.
//!
//! Rules applied every tick by [`SoundDirector::apply`]:
//!
//! - dancing: background paused, the style's song playing
//! - not dancing: dance song paused, background following `background_sound`
//!
//! The landing cue is fired separately on touch-down after a jump.

use std::collections::HashSet;
use std::fmt;

use tracing::{debug, info};

use super::config::GameSettings;
use crate::player::DanceStyle;

/// Every sound the game can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Track {
    Background,
    DanceSong(DanceStyle),
    Landing,
}

impl Track {
    pub fn name(self) -> &'static str {
        match self {
            Track::Background => "background",
            Track::DanceSong(DanceStyle::Classic) => "dance",
            Track::DanceSong(DanceStyle::Chicken) => "chicken",
            Track::DanceSong(DanceStyle::Snake) => "jinn",
            Track::Landing => "jump_land",
        }
    }
}

impl fmt::Display for Track {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Playback collaborator.
pub trait AudioPort {
    fn is_playing(&self, track: Track) -> bool;
    /// Start or resume.
    fn play(&mut self, track: Track);
    /// Pause, keeping the playback position.
    fn pause(&mut self, track: Track);
    /// Stop and rewind.
    fn stop(&mut self, track: Track);
}

/// One call received by an [`AudioLedger`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioCall {
    Play(Track),
    Pause(Track),
    Stop(Track),
}

/// [`AudioPort`] that only records and logs. Used by headless hosts and tests.
#[derive(Debug, Clone, Default)]
pub struct AudioLedger {
    playing: HashSet<Track>,
    calls: Vec<AudioCall>,
}

impl AudioLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> &[AudioCall] {
        &self.calls
    }

    /// Drain the recorded calls.
    pub fn take_calls(&mut self) -> Vec<AudioCall> {
        std::mem::take(&mut self.calls)
    }
}

impl AudioPort for AudioLedger {
    fn is_playing(&self, track: Track) -> bool {
        self.playing.contains(&track)
    }

    fn play(&mut self, track: Track) {
        debug!(%track, "play");
        self.playing.insert(track);
        self.calls.push(AudioCall::Play(track));
    }

    fn pause(&mut self, track: Track) {
        debug!(%track, "pause");
        self.playing.remove(&track);
        self.calls.push(AudioCall::Pause(track));
    }

    fn stop(&mut self, track: Track) {
        debug!(%track, "stop");
        self.playing.remove(&track);
        self.calls.push(AudioCall::Stop(track));
    }
}

/// Background/dance music switching and the landing cue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SoundDirector {
    /// Song of the most recent dance; paused when dancing stops.
    current_song: DanceStyle,
}

impl Default for SoundDirector {
    fn default() -> Self {
        Self {
            current_song: DanceStyle::Classic,
        }
    }
}

impl SoundDirector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_song(&self) -> Track {
        Track::DanceSong(self.current_song)
    }

    /// Apply the music rules for this tick. `dancing` is the style the player
    /// is dancing, if any.
    pub fn apply(&mut self, dancing: Option<DanceStyle>, settings: &GameSettings, audio: &mut dyn AudioPort) {
        match dancing {
            Some(style) => {
                if audio.is_playing(Track::Background) {
                    info!("background music paused for dance");
                    audio.pause(Track::Background);
                }
                if style != self.current_song {
                    let previous = self.current_song();
                    if audio.is_playing(previous) {
                        audio.pause(previous);
                    }
                    self.current_song = style;
                }
                let song = self.current_song();
                if !audio.is_playing(song) {
                    info!(%song, "dance music started");
                    audio.play(song);
                }
            }
            None => {
                let song = self.current_song();
                if audio.is_playing(song) {
                    info!(%song, "dance music stopped");
                    audio.pause(song);
                }
                self.apply_background(settings, audio);
            }
        }
    }

    /// Play or pause the background track according to `background_sound`.
    pub fn apply_background(&self, settings: &GameSettings, audio: &mut dyn AudioPort) {
        let playing = audio.is_playing(Track::Background);
        if settings.background_sound && !playing {
            info!("background music resumed");
            audio.play(Track::Background);
        } else if !settings.background_sound && playing {
            info!("background music paused");
            audio.pause(Track::Background);
        }
    }

    /// Re-trigger the landing cue, cutting off any instance still playing.
    pub fn landing(&self, settings: &GameSettings, audio: &mut dyn AudioPort) {
        if !settings.sound_effects {
            return;
        }
        if audio.is_playing(Track::Landing) {
            audio.stop(Track::Landing);
        }
        info!("landing cue");
        audio.play(Track::Landing);
    }
}
