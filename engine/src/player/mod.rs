//! Player Module
//!
//! Character control for the island walker.
//!
//! # Components
//!
//! - [`MovementController`] - Orbit movement, collision veto, gravity and follow camera
//! - [`AnimationStateMachine`] - Action choice with idle escalation and cross-fades
//! - [`BlendMixer`] - Weight-only clip mixer implementing [`AnimationMixer`]

pub mod animation;
pub mod mixer;
pub mod movement_controller;

pub use animation::{
    Action, ActivityInput, AnimationMixer, AnimationStateMachine, DanceStyle,
    FADE_DURATION, IDLE_TIMEOUT_MAX, IDLE_TIMEOUT_MIN,
};
pub use mixer::{BlendMixer, ClipState};
pub use movement_controller::{
    FrameTime, MovementController, TickOutcome,
    ORBIT_RADIUS, PLAYER_SIZE, ROTATION_STEP, RUN_VELOCITY, WALK_VELOCITY,
    circle_position, rotate_towards,
};
