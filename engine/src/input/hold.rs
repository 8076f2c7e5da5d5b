//! Hold Gesture
//!
//! Duration-tracked "press and hold" state. The start time is recorded on key-down
//! and elapsed time is derived from the frame clock on every tick; there is no
//! separate timer.

use std::time::Duration;

/// Default time the key must be held to complete the gesture.
pub const HOLD_DURATION: Duration = Duration::from_secs(8);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoldGesture {
    started_at: Option<Duration>,
    duration: Duration,
}

impl Default for HoldGesture {
    fn default() -> Self {
        Self::new(HOLD_DURATION)
    }
}

impl HoldGesture {
    pub fn new(duration: Duration) -> Self {
        Self {
            started_at: None,
            duration,
        }
    }

    /// Start holding at `now`. Ignored if already held.
    pub fn press(&mut self, now: Duration) {
        if self.started_at.is_none() {
            self.started_at = Some(now);
        }
    }

    /// Stop holding. Returns the start time if the gesture was active.
    pub fn release(&mut self) -> Option<Duration> {
        self.started_at.take()
    }

    pub fn is_held(&self) -> bool {
        self.started_at.is_some()
    }

    pub fn elapsed(&self, now: Duration) -> Duration {
        self.started_at
            .map(|start| now.saturating_sub(start))
            .unwrap_or_default()
    }

    /// Completion percentage in [0, 100].
    pub fn progress(&self, now: Duration) -> f32 {
        if !self.is_held() {
            return 0.0;
        }
        if self.duration.is_zero() {
            return 100.0;
        }
        let ratio = self.elapsed(now).as_secs_f32() / self.duration.as_secs_f32();
        (ratio * 100.0).min(100.0)
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }
}
