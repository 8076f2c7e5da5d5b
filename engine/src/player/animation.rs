//! Animation State Machine
//!
//! Picks the character's animation action from input and idle time, and performs
//! cross-faded transitions on an [`AnimationMixer`].
//!
//! # Actions
//!
//! | Action            | Clip           |
//! |-------------------|----------------|
//! | Idle              | `Idle`         |
//! | Yawn (idle wait)  | `Yawn`         |
//! | Dance (classic)   | `Dance`        |
//! | Dance (chicken)   | `ChickenDance` |
//! | Dance (snake)     | `SnakeDance`   |
//! | Run               | `Run`          |
//! | Walk              | `Walk`         |
//! | Jump              | `ForwardFlip`  |
//!
//! # Idle escalation
//!
//! With no input, the idle action plays until `idle_min` has passed since the last
//! activity, then the wait action plays. Once `idle_max` has passed the activity
//! timestamp is re-armed, so the wait action comes back periodically instead of
//! looping forever.
//!
//! Dance zones hijack both idle targets: while dancing, the idle and the wait action
//! are both the dance.

use std::fmt;
use std::time::Duration;

use tracing::{debug, warn};

/// Default fade duration for cross-fades, in seconds.
pub const FADE_DURATION: f32 = 0.01;

/// Default inactivity before the wait action plays.
pub const IDLE_TIMEOUT_MIN: Duration = Duration::from_secs(30);

/// Default inactivity after which the escalation window is re-armed.
pub const IDLE_TIMEOUT_MAX: Duration = Duration::from_secs(38);

/// Dance variants offered by the island's dance zones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum DanceStyle {
    Classic,
    Chicken,
    Snake,
}

/// Discrete animation actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Action {
    Idle,
    Yawn,
    Dance(DanceStyle),
    Run,
    Walk,
    Jump,
}

impl Action {
    pub const ALL: [Action; 8] = [
        Action::Idle,
        Action::Yawn,
        Action::Dance(DanceStyle::Classic),
        Action::Dance(DanceStyle::Chicken),
        Action::Dance(DanceStyle::Snake),
        Action::Run,
        Action::Walk,
        Action::Jump,
    ];

    /// Name of the animation clip that plays this action.
    pub fn clip_name(self) -> &'static str {
        match self {
            Action::Idle => "Idle",
            Action::Yawn => "Yawn",
            Action::Dance(DanceStyle::Classic) => "Dance",
            Action::Dance(DanceStyle::Chicken) => "ChickenDance",
            Action::Dance(DanceStyle::Snake) => "SnakeDance",
            Action::Run => "Run",
            Action::Walk => "Walk",
            Action::Jump => "ForwardFlip",
        }
    }

    pub fn from_clip_name(name: &str) -> Option<Action> {
        Action::ALL.into_iter().find(|a| a.clip_name() == name)
    }

    pub fn is_moving(self) -> bool {
        matches!(self, Action::Run | Action::Walk)
    }

    pub fn dance_style(self) -> Option<DanceStyle> {
        match self {
            Action::Dance(style) => Some(style),
            _ => None,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.clip_name())
    }
}

/// Playback collaborator: named clips that can be faded.
///
/// Unknown clip names are not an error; the methods report whether the clip existed.
pub trait AnimationMixer {
    /// Start fading `clip` out over `duration` seconds.
    fn fade_out(&mut self, clip: &str, duration: f32) -> bool;

    /// Reset `clip` to its start, fade it in over `duration` seconds and play it.
    fn fade_in(&mut self, clip: &str, duration: f32) -> bool;

    /// Play `clip` at full weight without fading.
    fn play(&mut self, clip: &str) -> bool;

    /// Advance every clip by `delta` seconds.
    fn update(&mut self, delta: f32);
}

/// What the player is doing this tick, as far as animation is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ActivityInput {
    /// A jump is in progress.
    pub jumping: bool,
    /// A direction key is held.
    pub moving: bool,
    /// Run toggle is on.
    pub run: bool,
}

#[derive(Debug, Clone)]
pub struct AnimationStateMachine {
    current: Action,
    idle_action: Action,
    wait_action: Action,
    last_activity: Duration,
    idle_min: Duration,
    idle_max: Duration,
    fade_duration: f32,
}

impl Default for AnimationStateMachine {
    fn default() -> Self {
        Self::new(Action::Idle, Duration::ZERO)
    }
}

impl AnimationStateMachine {
    /// Create a machine whose current action is `initial`, with the activity clock
    /// armed at `now`.
    pub fn new(initial: Action, now: Duration) -> Self {
        Self {
            current: initial,
            idle_action: Action::Idle,
            wait_action: Action::Yawn,
            last_activity: now,
            idle_min: IDLE_TIMEOUT_MIN,
            idle_max: IDLE_TIMEOUT_MAX,
            fade_duration: FADE_DURATION,
        }
    }

    /// Builder: override the idle-escalation thresholds.
    pub fn with_idle_timeouts(mut self, min: Duration, max: Duration) -> Self {
        self.idle_min = min;
        self.idle_max = max.max(min);
        self
    }

    /// Builder: override the cross-fade duration.
    pub fn with_fade_duration(mut self, seconds: f32) -> Self {
        self.fade_duration = seconds.max(0.0);
        self
    }

    /// Play the current action's clip without a fade. Called once when the
    /// character is first attached to a mixer.
    pub fn play_initial(&self, mixer: &mut dyn AnimationMixer) {
        if !mixer.play(self.current.clip_name()) {
            warn!(clip = self.current.clip_name(), "initial animation clip missing");
        }
    }

    pub fn current(&self) -> Action {
        self.current
    }

    pub fn idle_action(&self) -> Action {
        self.idle_action
    }

    pub fn wait_action(&self) -> Action {
        self.wait_action
    }

    pub fn last_activity(&self) -> Duration {
        self.last_activity
    }

    pub fn fade_duration(&self) -> f32 {
        self.fade_duration
    }

    /// Record activity at `now`, re-arming idle escalation.
    pub fn touch(&mut self, now: Duration) {
        self.last_activity = now;
    }

    /// Choose the action for this tick.
    ///
    /// Jump wins over movement; movement picks Run or Walk from the run toggle;
    /// with no input the idle or wait action is chosen from the inactivity time.
    pub fn next_action(&mut self, input: ActivityInput, now: Duration) -> Action {
        if input.jumping || input.moving {
            self.touch(now);
            return match (input.jumping, input.run) {
                (true, _) => Action::Jump,
                (false, true) => Action::Run,
                (false, false) => Action::Walk,
            };
        }

        let idle_for = now.saturating_sub(self.last_activity);
        if idle_for > self.idle_min {
            if idle_for > self.idle_max {
                self.touch(now);
            }
            self.wait_action
        } else {
            self.idle_action
        }
    }

    /// Cross-fade to `next` if it differs from the current action.
    ///
    /// Returns true if the current action changed. A missing clip on either side is
    /// skipped, but the current action is updated regardless.
    pub fn transition(&mut self, next: Action, mixer: &mut dyn AnimationMixer) -> bool {
        if next == self.current {
            return false;
        }
        let from = self.current;
        mixer.fade_out(from.clip_name(), self.fade_duration);
        if !mixer.fade_in(next.clip_name(), self.fade_duration) {
            warn!(clip = next.clip_name(), "animation clip not found");
        }
        debug!(%from, to = %next, "animation transition");
        self.current = next;
        true
    }

    /// Overwrite both idle targets, e.g. with a dance action.
    pub fn set_idle_targets(&mut self, action: Action) {
        self.idle_action = action;
        self.wait_action = action;
    }

    /// Restore the default idle targets (Idle, Yawn).
    pub fn reset_idle_targets(&mut self) {
        self.idle_action = Action::Idle;
        self.wait_action = Action::Yawn;
    }

    /// Dance style currently targeted by the idle action, if any.
    pub fn dance_style(&self) -> Option<DanceStyle> {
        self.idle_action.dance_style()
    }

    pub fn is_dancing(&self) -> bool {
        self.dance_style().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingMixer {
        known: Vec<&'static str>,
        calls: Vec<String>,
    }

    impl RecordingMixer {
        fn with_all_clips() -> Self {
            Self {
                known: Action::ALL.iter().map(|a| a.clip_name()).collect(),
                calls: Vec::new(),
            }
        }
    }

    impl AnimationMixer for RecordingMixer {
        fn fade_out(&mut self, clip: &str, _duration: f32) -> bool {
            self.calls.push(format!("out:{clip}"));
            self.known.contains(&clip)
        }
        fn fade_in(&mut self, clip: &str, _duration: f32) -> bool {
            self.calls.push(format!("in:{clip}"));
            self.known.contains(&clip)
        }
        fn play(&mut self, clip: &str) -> bool {
            self.calls.push(format!("play:{clip}"));
            self.known.contains(&clip)
        }
        fn update(&mut self, _delta: f32) {}
    }

    fn secs(s: u64) -> Duration {
        Duration::from_secs(s)
    }

    #[test]
    fn test_clip_names_round_trip() {
        for action in Action::ALL {
            assert_eq!(Action::from_clip_name(action.clip_name()), Some(action));
        }
        assert_eq!(Action::from_clip_name("Moonwalk"), None);
    }

    #[test]
    fn test_jump_beats_movement() {
        let mut sm = AnimationStateMachine::default();
        let input = ActivityInput {
            jumping: true,
            moving: true,
            run: true,
        };
        assert_eq!(sm.next_action(input, secs(5)), Action::Jump);
        assert_eq!(sm.last_activity(), secs(5));
    }

    #[test]
    fn test_run_toggle_selects_run_or_walk() {
        let mut sm = AnimationStateMachine::default();
        let mut input = ActivityInput {
            moving: true,
            run: true,
            ..Default::default()
        };
        assert_eq!(sm.next_action(input, secs(1)), Action::Run);
        input.run = false;
        assert_eq!(sm.next_action(input, secs(2)), Action::Walk);
    }

    #[test]
    fn test_idle_escalation_window() {
        let mut sm = AnimationStateMachine::new(Action::Idle, secs(100));
        let idle = ActivityInput::default();

        assert_eq!(sm.next_action(idle, secs(110)), Action::Idle);
        assert_eq!(sm.next_action(idle, secs(135)), Action::Yawn);
        assert_eq!(sm.last_activity(), secs(100));

        // Past the max: wait action still plays, but the clock is re-armed.
        assert_eq!(sm.next_action(idle, secs(139)), Action::Yawn);
        assert_eq!(sm.last_activity(), secs(139));
        assert_eq!(sm.next_action(idle, secs(140)), Action::Idle);
    }

    #[test]
    fn test_exactly_at_min_is_still_idle() {
        let mut sm = AnimationStateMachine::new(Action::Idle, Duration::ZERO);
        assert_eq!(sm.next_action(ActivityInput::default(), IDLE_TIMEOUT_MIN), Action::Idle);
    }

    #[test]
    fn test_transition_cross_fades() {
        let mut sm = AnimationStateMachine::default();
        let mut mixer = RecordingMixer::with_all_clips();
        assert!(sm.transition(Action::Walk, &mut mixer));
        assert_eq!(mixer.calls, vec!["out:Idle", "in:Walk"]);
        assert_eq!(sm.current(), Action::Walk);
    }

    #[test]
    fn test_transition_to_same_action_is_noop() {
        let mut sm = AnimationStateMachine::default();
        let mut mixer = RecordingMixer::with_all_clips();
        assert!(!sm.transition(Action::Idle, &mut mixer));
        assert!(mixer.calls.is_empty());
    }

    #[test]
    fn test_missing_clip_still_updates_current() {
        let mut sm = AnimationStateMachine::default();
        let mut mixer = RecordingMixer {
            known: vec!["Idle"],
            calls: Vec::new(),
        };
        assert!(sm.transition(Action::Dance(DanceStyle::Snake), &mut mixer));
        assert_eq!(mixer.calls, vec!["out:Idle", "in:SnakeDance"]);
        assert_eq!(sm.current(), Action::Dance(DanceStyle::Snake));
    }

    #[test]
    fn test_dance_targets_and_reset() {
        let mut sm = AnimationStateMachine::default();
        sm.set_idle_targets(Action::Dance(DanceStyle::Chicken));
        assert!(sm.is_dancing());
        assert_eq!(sm.wait_action(), Action::Dance(DanceStyle::Chicken));
        assert_eq!(sm.next_action(ActivityInput::default(), secs(1)), Action::Dance(DanceStyle::Chicken));

        sm.reset_idle_targets();
        assert!(!sm.is_dancing());
        assert_eq!(sm.idle_action(), Action::Idle);
        assert_eq!(sm.wait_action(), Action::Yawn);
    }

    #[test]
    fn test_play_initial_plays_current_clip() {
        let sm = AnimationStateMachine::new(Action::Idle, Duration::ZERO);
        let mut mixer = RecordingMixer::with_all_clips();
        sm.play_initial(&mut mixer);
        assert_eq!(mixer.calls, vec!["play:Idle"]);
    }
}
