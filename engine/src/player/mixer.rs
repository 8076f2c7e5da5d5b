//! Blend Mixer
//!
//! A small weight-only clip mixer implementing [`AnimationMixer`]. It has no skeletal
//! data; it only tracks per-clip time and weight so the host (or a test) can see
//! which clips are audible, fading or stopped.
//!
//! Fades run concurrently: fading one clip out and another in over the same
//! duration gives an overlapping cross-fade, never a sequenced one.

use std::collections::HashMap;

use super::animation::AnimationMixer;

/// Playback state of a single clip.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ClipState {
    /// Local playback time in seconds.
    pub time: f32,
    /// Blend weight in [0, 1].
    pub weight: f32,
    /// Weight change per second; negative while fading out.
    pub fade_rate: f32,
    /// The clip advances while playing.
    pub playing: bool,
}

impl ClipState {
    fn advance(&mut self, delta: f32) {
        if !self.playing {
            return;
        }
        self.time += delta;
        if self.fade_rate != 0.0 {
            self.weight = (self.weight + self.fade_rate * delta).clamp(0.0, 1.0);
            if self.weight <= 0.0 && self.fade_rate < 0.0 {
                self.fade_rate = 0.0;
                self.playing = false;
            } else if self.weight >= 1.0 && self.fade_rate > 0.0 {
                self.fade_rate = 0.0;
            }
        }
    }
}

/// Named clips with independent weights.
#[derive(Debug, Clone, Default)]
pub struct BlendMixer {
    clips: HashMap<String, ClipState>,
}

impl BlendMixer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mixer with a stopped, zero-weight entry for each clip name.
    pub fn with_clips<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            clips: names.into_iter().map(|n| (n.into(), ClipState::default())).collect(),
        }
    }

    pub fn clip(&self, name: &str) -> Option<&ClipState> {
        self.clips.get(name)
    }

    /// Playing clips with non-zero weight, sorted by name.
    pub fn audible(&self) -> Vec<(&str, f32)> {
        let mut out: Vec<_> = self
            .clips
            .iter()
            .filter(|(_, c)| c.playing && c.weight > 0.0)
            .map(|(n, c)| (n.as_str(), c.weight))
            .collect();
        out.sort_by(|a, b| a.0.cmp(b.0));
        out
    }
}

impl AnimationMixer for BlendMixer {
    fn fade_out(&mut self, clip: &str, duration: f32) -> bool {
        let Some(state) = self.clips.get_mut(clip) else {
            return false;
        };
        if duration <= 0.0 {
            state.weight = 0.0;
            state.fade_rate = 0.0;
            state.playing = false;
        } else {
            state.fade_rate = -1.0 / duration;
        }
        true
    }

    fn fade_in(&mut self, clip: &str, duration: f32) -> bool {
        let Some(state) = self.clips.get_mut(clip) else {
            return false;
        };
        state.time = 0.0;
        state.playing = true;
        if duration <= 0.0 {
            state.weight = 1.0;
            state.fade_rate = 0.0;
        } else {
            state.weight = 0.0;
            state.fade_rate = 1.0 / duration;
        }
        true
    }

    fn play(&mut self, clip: &str) -> bool {
        let Some(state) = self.clips.get_mut(clip) else {
            return false;
        };
        state.playing = true;
        state.weight = 1.0;
        state.fade_rate = 0.0;
        true
    }

    fn update(&mut self, delta: f32) {
        for state in self.clips.values_mut() {
            state.advance(delta);
        }
    }
}
