//! Character Tuning
//!
//! Numeric constants of the character controller, overridable from JSON.
//! `Default` matches the engine constants.

use std::path::Path;
use std::time::Duration;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::settings::{SettingsError, load_json, load_or_default};
use crate::camera::{CAMERA_HEIGHT, FollowCamera, ORBIT_MARGIN, TARGET_LIFT};
use crate::input::{HOLD_DURATION, HoldGesture};
use crate::physics::{BoundingVolume, GRAVITY_PER_TICK, JUMP_STRENGTH, PROBE_LIFT};
use crate::player::{
    Action, AnimationStateMachine, FADE_DURATION, IDLE_TIMEOUT_MAX, IDLE_TIMEOUT_MIN, MovementController,
    ORBIT_RADIUS, PLAYER_SIZE, ROTATION_STEP, RUN_VELOCITY, WALK_VELOCITY,
};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CharacterTuning {
    /// Radius of the walking circle
    pub orbit_radius: f32,
    /// Radians per second while walking
    pub walk_velocity: f32,
    /// Radians per second while running
    pub run_velocity: f32,
    /// Upward velocity of a jump (per tick)
    pub jump_strength: f32,
    /// Gravity (per tick squared)
    pub gravity: f32,
    /// Height above the feet the ground probe starts from
    pub probe_lift: f32,
    /// Cross-fade duration in seconds
    pub fade_duration: f32,
    /// Inactivity before the wait animation, in seconds
    pub idle_timeout_min_secs: f32,
    /// Inactivity before the idle window re-arms, in seconds
    pub idle_timeout_max_secs: f32,
    /// Maximum heading change per tick, in radians
    pub rotation_step: f32,
    /// Player collision box (width, height, depth)
    pub player_size: Vec3,
    pub camera_orbit_margin: f32,
    pub camera_height: f32,
    pub camera_target_lift: f32,
    /// How long E must be held to complete a dance prompt, in seconds
    pub hold_duration_secs: f32,
}

impl Default for CharacterTuning {
    fn default() -> Self {
        Self {
            orbit_radius: ORBIT_RADIUS,
            walk_velocity: WALK_VELOCITY,
            run_velocity: RUN_VELOCITY,
            jump_strength: JUMP_STRENGTH,
            gravity: GRAVITY_PER_TICK,
            probe_lift: PROBE_LIFT,
            fade_duration: FADE_DURATION,
            idle_timeout_min_secs: IDLE_TIMEOUT_MIN.as_secs_f32(),
            idle_timeout_max_secs: IDLE_TIMEOUT_MAX.as_secs_f32(),
            rotation_step: ROTATION_STEP,
            player_size: PLAYER_SIZE,
            camera_orbit_margin: ORBIT_MARGIN,
            camera_height: CAMERA_HEIGHT,
            camera_target_lift: TARGET_LIFT,
            hold_duration_secs: HOLD_DURATION.as_secs_f32(),
        }
    }
}

fn secs(value: f32) -> Duration {
    Duration::try_from_secs_f32(value.max(0.0)).unwrap_or(Duration::ZERO)
}

impl CharacterTuning {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        load_json(path)
    }

    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        load_or_default(path)
    }

    /// Controller for a freshly loaded character whose clock starts at `now`.
    pub fn build_controller(&self, now: Duration) -> MovementController {
        let animation = AnimationStateMachine::new(Action::Idle, now)
            .with_idle_timeouts(secs(self.idle_timeout_min_secs), secs(self.idle_timeout_max_secs))
            .with_fade_duration(self.fade_duration);

        let controller = MovementController::with_radius(self.orbit_radius)
            .with_velocities(self.walk_velocity, self.run_velocity)
            .with_vertical(self.jump_strength, self.gravity)
            .with_probe_lift(self.probe_lift)
            .with_rotation_step(self.rotation_step)
            .with_animation(animation)
            .with_volume(BoundingVolume::standing(self.player_size));

        let mut camera = FollowCamera::behind(controller.position());
        camera.orbit_margin = self.camera_orbit_margin;
        camera.height = self.camera_height;
        camera.target_lift = self.camera_target_lift;
        camera.target = controller.position() + Vec3::Y * self.camera_target_lift;
        controller.with_camera(camera)
    }

    pub fn hold_gesture(&self) -> HoldGesture {
        HoldGesture::new(secs(self.hold_duration_secs))
    }
}
