//! Orbit Follow Camera
//!
//! Third-person camera that rides the same orbit angle as the player, further out
//! and at a fixed height, looking at the player.
//!
//! The look-at target follows the player's x/z every update. Its height only
//! follows the player while the player is grounded or colliding, so the camera
//! does not bob with every jump.

use glam::Vec3;

/// Default distance added to the player's orbit radius.
pub const ORBIT_MARGIN: f32 = 10.0;

/// Default camera height.
pub const CAMERA_HEIGHT: f32 = 3.0;

/// Default lift of the look-at target above the player's feet.
pub const TARGET_LIFT: f32 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FollowCamera {
    /// World-space camera position.
    pub position: Vec3,
    /// World-space look-at target.
    pub target: Vec3,
    pub orbit_margin: f32,
    pub height: f32,
    pub target_lift: f32,
}

impl Default for FollowCamera {
    fn default() -> Self {
        Self::behind(Vec3::ZERO)
    }
}

impl FollowCamera {
    /// Initial framing: offset (4, 3, 0) from the player, looking just above them.
    pub fn behind(player: Vec3) -> Self {
        Self {
            position: player + Vec3::new(4.0, CAMERA_HEIGHT, 0.0),
            target: player + Vec3::Y * TARGET_LIFT,
            orbit_margin: ORBIT_MARGIN,
            height: CAMERA_HEIGHT,
            target_lift: TARGET_LIFT,
        }
    }

    /// Re-place the camera on the orbit at `angle` and retarget it at `player`.
    pub fn follow(&mut self, angle: f32, radius: f32, player: Vec3, supported: bool) {
        let r = radius + self.orbit_margin;
        self.position = Vec3::new(angle.cos() * r, self.height, angle.sin() * r);

        if supported {
            self.target.y = player.y + self.target_lift;
        }
        self.target.x = player.x;
        self.target.z = player.z;
    }

    /// Yaw from the player towards the camera, in the x/z plane.
    pub fn direction_angle(&self, player: Vec3) -> f32 {
        (self.position.x - player.x).atan2(self.position.z - player.z)
    }
}
