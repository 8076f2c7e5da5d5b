//! Ground Sampling and Gravity
//!
//! Vertical ray probes against the island terrain and the per-tick gravity pass
//! that uses them.
//!
//! # Units
//!
//! Gravity is expressed per tick, not per second: every call to
//! [`GroundSampler::integrate`] subtracts `gravity` from the vertical velocity and
//! then adds the velocity to the height, regardless of frame time. Jump strength
//! is likewise a one-shot per-tick velocity.
//!
//! # Falling off the edge
//!
//! A probe that hits nothing is not an error. The actor keeps falling and
//! `on_ground` stays false.

use glam::Vec3;

/// Default gravity, in units per tick squared.
pub const GRAVITY_PER_TICK: f32 = 0.1;

/// Default upward velocity applied by a jump, in units per tick.
pub const JUMP_STRENGTH: f32 = 0.2;

/// Default height above the actor's feet the probe starts from.
pub const PROBE_LIFT: f32 = 1.0;

/// Default probe length.
pub const PROBE_DISTANCE: f32 = 1000.0;

/// A surface that can be ray-tested for height.
pub trait GroundSurface {
    /// Cast a ray straight down from `origin` over at most `max_distance`.
    ///
    /// Returns the highest surface height intersected, or `None` if nothing was hit.
    fn probe_down(&self, origin: Vec3, max_distance: f32) -> Option<f32>;
}

/// One piece of static terrain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TerrainPiece {
    /// Infinite horizontal plane.
    Plane { height: f32 },
    /// Flat horizontal disc (the island floor).
    Disc { center: Vec3, radius: f32 },
    /// Solid axis-aligned block; its top face supports actors.
    Block { min: Vec3, max: Vec3 },
}

impl TerrainPiece {
    fn probe_down(&self, origin: Vec3, max_distance: f32) -> Option<f32> {
        match *self {
            TerrainPiece::Plane { height } => {
                let drop = origin.y - height;
                (drop >= 0.0 && drop <= max_distance).then_some(height)
            }
            TerrainPiece::Disc { center, radius } => {
                let dx = origin.x - center.x;
                let dz = origin.z - center.z;
                let drop = origin.y - center.y;
                let inside = dx * dx + dz * dz <= radius * radius;
                (inside && drop >= 0.0 && drop <= max_distance).then_some(center.y)
            }
            TerrainPiece::Block { min, max } => {
                // Only the top face supports; a probe starting inside the block misses.
                if origin.y < max.y {
                    return None;
                }
                let t = ray_aabb_intersect(origin, Vec3::NEG_Y, min, max)?;
                (t <= max_distance).then_some(max.y)
            }
        }
    }
}

/// Static terrain made of planes, discs and blocks.
#[derive(Debug, Clone, Default)]
pub struct Terrain {
    pieces: Vec<TerrainPiece>,
}

impl Terrain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: add a piece.
    pub fn with(mut self, piece: TerrainPiece) -> Self {
        self.pieces.push(piece);
        self
    }
}

impl GroundSurface for Terrain {
    fn probe_down(&self, origin: Vec3, max_distance: f32) -> Option<f32> {
        self.pieces
            .iter()
            .filter_map(|piece| piece.probe_down(origin, max_distance))
            .reduce(f32::max)
    }
}

impl GroundSurface for TerrainPiece {
    fn probe_down(&self, origin: Vec3, max_distance: f32) -> Option<f32> {
        TerrainPiece::probe_down(self, origin, max_distance)
    }
}

/// Ray-AABB intersection using the slab method.
///
/// `ray_dir` must be normalized. Returns the distance along the ray to the nearest
/// intersection at or ahead of the origin; a ray starting inside the box reports the
/// exit distance.
pub fn ray_aabb_intersect(ray_origin: Vec3, ray_dir: Vec3, aabb_min: Vec3, aabb_max: Vec3) -> Option<f32> {
    let mut t_min = f32::NEG_INFINITY;
    let mut t_max = f32::INFINITY;
    for axis in 0..3 {
        let o = ray_origin[axis];
        if ray_dir[axis].abs() <= 1e-10 {
            // Parallel to this slab: must already be inside it.
            if o < aabb_min[axis] || o > aabb_max[axis] {
                return None;
            }
            continue;
        }
        let inv = 1.0 / ray_dir[axis];
        let t1 = (aabb_min[axis] - o) * inv;
        let t2 = (aabb_max[axis] - o) * inv;
        t_min = t_min.max(t1.min(t2));
        t_max = t_max.min(t1.max(t2));
    }

    if t_max >= t_min && t_max >= 0.0 {
        if t_min >= 0.0 { Some(t_min) } else { Some(t_max) }
    } else {
        None
    }
}

/// Vertical motion state of an actor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VerticalBody {
    /// Vertical velocity in units per tick (positive = up).
    pub velocity_y: f32,
    /// Whether the last gravity pass ended on a supporting surface.
    pub on_ground: bool,
}

impl Default for VerticalBody {
    fn default() -> Self {
        Self {
            velocity_y: 0.0,
            on_ground: true,
        }
    }
}

impl VerticalBody {
    /// Apply a one-shot jump impulse. Ignored unless grounded (no double-jump).
    ///
    /// Returns `true` if the jump was applied.
    pub fn jump(&mut self, strength: f32) -> bool {
        if !self.on_ground {
            return false;
        }
        self.on_ground = false;
        self.velocity_y = strength;
        true
    }
}

/// Downward probe plus gravity integration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroundSampler {
    /// Gravity in units per tick squared.
    pub gravity: f32,
    /// The probe starts this far above the sampled position.
    pub probe_lift: f32,
    /// Maximum probe length.
    pub probe_distance: f32,
}

impl Default for GroundSampler {
    fn default() -> Self {
        Self {
            gravity: GRAVITY_PER_TICK,
            probe_lift: PROBE_LIFT,
            probe_distance: PROBE_DISTANCE,
        }
    }
}

impl GroundSampler {
    pub fn new(gravity: f32) -> Self {
        Self {
            gravity,
            ..Self::default()
        }
    }

    /// Highest supporting height under `position`, or `None` over a hole.
    pub fn sample(&self, position: Vec3, surface: &dyn GroundSurface) -> Option<f32> {
        let origin = position + Vec3::Y * self.probe_lift;
        surface.probe_down(origin, self.probe_distance + self.probe_lift)
    }

    /// One gravity tick: accelerate, move, then snap to the ground if below it.
    ///
    /// Returns the sampled ground height, if any.
    pub fn integrate(
        &self,
        body: &mut VerticalBody,
        position: &mut Vec3,
        surface: &dyn GroundSurface,
    ) -> Option<f32> {
        body.velocity_y -= self.gravity;
        position.y += body.velocity_y;

        let ground = self.sample(*position, surface);
        match ground {
            Some(height) if position.y < height => {
                position.y = height;
                body.velocity_y = 0.0;
                body.on_ground = true;
            }
            _ => body.on_ground = false,
        }
        ground
    }
}
