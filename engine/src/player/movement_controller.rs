//! Player Movement Controller
//!
//! Drives the player character around the island: animation choice, orbit
//! movement, collision veto, gravity and the follow camera.
//!
//! # Movement Model
//!
//! The character does not translate freely. It walks a circle of fixed radius
//! around the scene origin, parameterized by an angle accumulator:
//!
//! - A: angle += velocity * delta, heading = camera angle + 90°
//! - D: angle -= velocity * delta, heading = camera angle - 90°
//!
//! The camera rides the same angle further out, so the pair stays framed.
//!
//! # Tick Order
//!
//! 1. Run toggle and jump requests from the input snapshot
//! 2. Choose the next action and cross-fade to it, advance the mixer
//! 3. Orbit step, then collision veto (restore position and angle)
//! 4. Gravity step, then collision veto (restore position, end the jump)
//! 5. Landing detection, follow camera
//!
//! Each veto restores the exact pre-step values; there is no sliding or partial
//! resolution. The two vetoes are independent.
//!
//! # Usage
//!
//! ```rust,ignore
//! use island_walk_engine::player::{FrameTime, MovementController};
//!
//! let mut controller = MovementController::new();
//! controller.attach(&mut mixer);
//!
//! // Each frame:
//! let outcome = controller.update(frame, &snapshot, &terrain, &mut props, &mut mixer);
//! if outcome.landed_from_jump {
//!     sound.landing(&settings, &mut audio);
//! }
//! ```

use std::f32::consts::{FRAC_PI_2, PI};
use std::time::Duration;

use glam::{Quat, Vec3};
use tracing::debug;

use super::animation::{Action, ActivityInput, AnimationMixer, AnimationStateMachine};
use crate::camera::FollowCamera;
use crate::input::InputSnapshot;
use crate::physics::{
    BoundingVolume, Collider, GroundSampler, GroundSurface, JUMP_STRENGTH, OverlapSummary, ProximityRegistry,
    VerticalBody,
};

/// Radius of the walking circle around the scene origin.
pub const ORBIT_RADIUS: f32 = 25.0;

/// Walk velocity in radians per second of frame time.
pub const WALK_VELOCITY: f32 = 0.2;

/// Run velocity in radians per second of frame time.
pub const RUN_VELOCITY: f32 = 0.2;

/// Maximum heading change per tick, in radians.
pub const ROTATION_STEP: f32 = 2.0;

/// Collision box of the player (width, height, depth).
pub const PLAYER_SIZE: Vec3 = Vec3::new(1.0, 1.5, 1.0);

/// Frame timing handed to the controller.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameTime {
    /// Seconds since the previous frame.
    pub delta: f32,
    /// Time since the session clock started; drives idle escalation.
    pub now: Duration,
}

impl FrameTime {
    pub fn new(delta: f32, now: Duration) -> Self {
        Self { delta, now }
    }
}

/// What happened during one [`MovementController::update`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TickOutcome {
    /// Action active after the transition step.
    pub action: Option<Action>,
    /// The animation changed this tick.
    pub transitioned: bool,
    /// A direction key was held and the orbit step was attempted.
    pub moved: bool,
    /// The orbit step was rolled back.
    pub move_blocked: bool,
    /// The gravity step was rolled back.
    pub fall_blocked: bool,
    /// The player touched down while a jump was in progress.
    pub landed_from_jump: bool,
    /// The follow camera was recomputed.
    pub camera_updated: bool,
}

/// Rotate `from` towards `to` by at most `max_angle` radians.
pub fn rotate_towards(from: Quat, to: Quat, max_angle: f32) -> Quat {
    let angle = from.angle_between(to);
    if angle <= max_angle {
        return to;
    }
    from.slerp(to, max_angle / angle)
}

/// Point on a circle of `radius` at `angle`, in the x/z plane (x, z).
pub fn circle_position(angle: f32, radius: f32) -> (f32, f32) {
    (radius * angle.cos(), radius * angle.sin())
}

/// Orbit-constrained third-person character controller.
#[derive(Debug, Clone)]
pub struct MovementController {
    /// Feet position in world space
    position: Vec3,
    orientation: Quat,
    /// Orbit angle accumulator in radians
    angle: f32,
    radius: f32,

    volume: BoundingVolume,
    body: VerticalBody,
    sampler: GroundSampler,
    animation: AnimationStateMachine,
    registry: ProximityRegistry,
    camera: FollowCamera,

    is_jumping: bool,
    run_enabled: bool,
    gravity_enabled: bool,
    /// Any overlap in the most recent detection pass
    colliding: bool,
    show_foot_boxes: bool,

    walk_velocity: f32,
    run_velocity: f32,
    jump_strength: f32,
    rotation_step: f32,
}

impl Default for MovementController {
    fn default() -> Self {
        Self::with_radius(ORBIT_RADIUS)
    }
}

impl MovementController {
    /// Controller standing at angle 0 on the default orbit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Controller standing at angle 0 on an orbit of `radius`.
    pub fn with_radius(radius: f32) -> Self {
        let (x, z) = circle_position(0.0, radius);
        let position = Vec3::new(x, 0.0, z);
        let mut volume = BoundingVolume::standing(PLAYER_SIZE);
        volume.refresh_at(position);

        Self {
            position,
            orientation: Quat::from_rotation_y(-FRAC_PI_2),
            angle: 0.0,
            radius,
            volume,
            body: VerticalBody::default(),
            sampler: GroundSampler::default(),
            animation: AnimationStateMachine::default(),
            registry: ProximityRegistry::new(),
            camera: FollowCamera::behind(position),
            is_jumping: false,
            run_enabled: true,
            gravity_enabled: true,
            colliding: false,
            show_foot_boxes: false,
            walk_velocity: WALK_VELOCITY,
            run_velocity: RUN_VELOCITY,
            jump_strength: JUMP_STRENGTH,
            rotation_step: ROTATION_STEP,
        }
    }

    /// Builder: override orbit velocities.
    pub fn with_velocities(mut self, walk: f32, run: f32) -> Self {
        self.walk_velocity = walk;
        self.run_velocity = run;
        self
    }

    /// Builder: override jump strength and gravity (both per tick).
    pub fn with_vertical(mut self, jump_strength: f32, gravity: f32) -> Self {
        self.jump_strength = jump_strength;
        self.sampler = GroundSampler::new(gravity);
        self
    }

    /// Builder: override how far above the feet the ground probe starts.
    pub fn with_probe_lift(mut self, lift: f32) -> Self {
        self.sampler.probe_lift = lift;
        self
    }

    /// Builder: override the heading step.
    pub fn with_rotation_step(mut self, step: f32) -> Self {
        self.rotation_step = step;
        self
    }

    /// Builder: replace the animation state machine.
    pub fn with_animation(mut self, animation: AnimationStateMachine) -> Self {
        self.animation = animation;
        self
    }

    /// Builder: replace the player's collision box.
    pub fn with_volume(mut self, volume: BoundingVolume) -> Self {
        self.volume = volume;
        self.volume.refresh_at(self.position);
        self
    }

    /// Builder: replace the follow camera.
    pub fn with_camera(mut self, camera: FollowCamera) -> Self {
        self.camera = camera;
        self
    }

    /// Play the initial animation on a freshly attached mixer.
    pub fn attach(&self, mixer: &mut dyn AnimationMixer) {
        self.animation.play_initial(mixer);
    }

    // ------------------------------------------------------------------
    // State access
    // ------------------------------------------------------------------

    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Teleport the feet position. Does not touch the orbit angle.
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        self.volume.refresh_at(position);
    }

    pub fn orientation(&self) -> Quat {
        self.orientation
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn volume(&self) -> &BoundingVolume {
        &self.volume
    }

    pub fn velocity_y(&self) -> f32 {
        self.body.velocity_y
    }

    pub fn on_ground(&self) -> bool {
        self.body.on_ground
    }

    pub fn is_jumping(&self) -> bool {
        self.is_jumping
    }

    pub fn is_colliding(&self) -> bool {
        self.colliding
    }

    pub fn animation(&self) -> &AnimationStateMachine {
        &self.animation
    }

    pub fn animation_mut(&mut self) -> &mut AnimationStateMachine {
        &mut self.animation
    }

    pub fn current_action(&self) -> Action {
        self.animation.current()
    }

    pub fn registry(&self) -> &ProximityRegistry {
        &self.registry
    }

    pub fn camera(&self) -> &FollowCamera {
        &self.camera
    }

    pub fn is_run_enabled(&self) -> bool {
        self.run_enabled
    }

    pub fn switch_run_toggle(&mut self) {
        self.run_enabled = !self.run_enabled;
    }

    pub fn is_gravity_enabled(&self) -> bool {
        self.gravity_enabled
    }

    pub fn set_gravity_enabled(&mut self, enabled: bool) {
        self.gravity_enabled = enabled;
    }

    pub fn is_collision_enabled(&self) -> bool {
        self.volume.collision_enabled
    }

    pub fn set_collision_enabled(&mut self, enabled: bool) {
        self.volume.collision_enabled = enabled;
    }

    pub fn set_show_collision_box(&mut self, show: bool) {
        self.volume.show_debug_box = show;
    }

    pub fn show_foot_boxes(&self) -> bool {
        self.show_foot_boxes
    }

    pub fn set_show_foot_boxes(&mut self, show: bool) {
        self.show_foot_boxes = show;
    }

    // ------------------------------------------------------------------
    // Actions
    // ------------------------------------------------------------------

    /// Start a jump. Ignored while airborne (no double-jump).
    ///
    /// Returns `true` if the jump started.
    pub fn jump(&mut self) -> bool {
        if !self.body.jump(self.jump_strength) {
            debug!("jump ignored while airborne");
            return false;
        }
        self.is_jumping = true;
        debug!(velocity_y = self.body.velocity_y, "jump initiated");
        true
    }

    /// Turn (step-limited) to face the camera. Used while dancing.
    pub fn face_camera(&mut self) {
        self.rotate_model(PI);
    }

    /// One simulation tick.
    ///
    /// Props that are not ready yet are ignored by collision detection.
    pub fn update<C: Collider>(
        &mut self,
        frame: FrameTime,
        input: &InputSnapshot,
        ground: &dyn GroundSurface,
        props: &mut [C],
        mixer: &mut dyn AnimationMixer,
    ) -> TickOutcome {
        let mut outcome = TickOutcome::default();

        if input.run_toggle_requested {
            self.switch_run_toggle();
        }
        if input.jump_requested {
            self.jump();
        }

        let moving = input.keys.direction_pressed();
        let jumping = self.is_jumping;
        if (moving || jumping) && self.animation.is_dancing() {
            self.animation.reset_idle_targets();
        }

        let next = self.animation.next_action(
            ActivityInput {
                jumping,
                moving,
                run: self.run_enabled,
            },
            frame.now,
        );
        outcome.transitioned = self.animation.transition(next, mixer);
        mixer.update(frame.delta);
        outcome.action = Some(self.animation.current());

        if let Some(sign) = input.keys.orbit_sign() {
            outcome.moved = true;
            outcome.move_blocked = self.step_orbit(sign, frame.delta, props);
        }

        if self.gravity_enabled {
            let before = self.position;
            self.sampler.integrate(&mut self.body, &mut self.position, ground);
            if self.detect(props).blocks() {
                self.position = before;
                self.volume.refresh_at(before);
                // Height only; the fall speed keeps building up.
                self.is_jumping = false;
                outcome.fall_blocked = true;
            }
            if self.body.on_ground {
                if self.is_jumping {
                    outcome.landed_from_jump = true;
                    debug!(y = self.position.y, "landed after jump");
                }
                self.is_jumping = false;
            }
        }

        if self.animation.current().is_moving() || jumping {
            let supported = self.colliding || self.body.on_ground;
            self.camera.follow(self.angle, self.radius, self.position, supported);
            outcome.camera_updated = true;
        }

        outcome
    }

    /// Tentative orbit step with collision veto. Returns `true` if vetoed.
    fn step_orbit<C: Collider>(&mut self, sign: f32, delta: f32, props: &mut [C]) -> bool {
        let offset = if sign > 0.0 { FRAC_PI_2 } else { -FRAC_PI_2 };
        self.rotate_model(offset);

        let velocity = if self.animation.current() == Action::Run {
            self.run_velocity
        } else {
            self.walk_velocity
        };

        let before_position = self.position;
        let before_angle = self.angle;

        self.angle += velocity * sign * delta;
        let (x, z) = circle_position(self.angle, self.radius);
        self.position.x = x;
        self.position.z = z;

        if self.detect(props).blocks() {
            self.position = before_position;
            self.angle = before_angle;
            self.volume.refresh_at(before_position);
            return true;
        }
        false
    }

    fn rotate_model(&mut self, offset: f32) {
        let heading = self.camera.direction_angle(self.position) + offset;
        let target = Quat::from_rotation_y(heading);
        self.orientation = rotate_towards(self.orientation, target, self.rotation_step);
    }

    fn detect<C: Collider>(&mut self, props: &mut [C]) -> OverlapSummary {
        self.volume.refresh_at(self.position);
        let summary = self.registry.detect(&self.volume, props);
        self.colliding = summary.any_overlap;
        if summary.any_overlap {
            if let Some(id) = self.registry.first_overlapping() {
                debug!(prop = id, pass_through = summary.any_pass_through, "collision detected");
            }
        }
        summary
    }
}
