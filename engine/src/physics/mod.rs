//! Physics module
//!
//! Box overlap, ground probing and per-tick gravity for the island. No external
//! physics library; everything here is a handful of axis-aligned tests.
//!
//! # Unit System
//!
//! Distances are world units. Gravity and jump strength are per tick, not per
//! second, so vertical motion depends on frame count rather than elapsed time.
//!
//! # Submodules
//!
//! - [`bounding_volume`] - Axis-aligned boxes with cached faces
//! - [`ground`] - Downward ray probes and gravity integration
//! - [`proximity`] - Ordered overlap flags for world props

pub mod bounding_volume;
pub mod ground;
pub mod proximity;

pub use bounding_volume::{BoundingVolume, Faces};
pub use ground::{
    GRAVITY_PER_TICK, GroundSampler, GroundSurface, JUMP_STRENGTH, PROBE_LIFT, Terrain, TerrainPiece, VerticalBody,
    ray_aabb_intersect,
};
pub use proximity::{Collider, OverlapSummary, ProximityRegistry};

// Math types used throughout the engine
pub use glam::{Quat, Vec3};
