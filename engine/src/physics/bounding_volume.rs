//! Bounding Volume
//!
//! Axis-aligned collision box owned by an actor or prop.
//!
//! The volume stores a center and full extents (width, height, depth) and caches
//! the six face scalars derived from them. Faces are only recomputed by
//! [`BoundingVolume::refresh`] / [`BoundingVolume::refresh_at`]; owners call one of
//! them every tick before any overlap query so the cached faces never go stale.
//!
//! # Example
//!
//! ```rust
//! use island_walk_engine::physics::BoundingVolume;
//! use glam::Vec3;
//!
//! let mut player = BoundingVolume::new(Vec3::new(1.0, 1.5, 1.0));
//! let mut crate_box = BoundingVolume::new(Vec3::ONE);
//!
//! player.refresh_at(Vec3::ZERO);
//! crate_box.refresh_at(Vec3::new(0.5, 0.0, 0.0));
//!
//! assert!(player.overlaps(&crate_box));
//! ```

use glam::Vec3;

/// Cached face positions of an axis-aligned box.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Faces {
    pub left: f32,
    pub right: f32,
    pub bottom: f32,
    pub top: f32,
    pub back: f32,
    pub front: f32,
}

impl Faces {
    /// Faces of a box centered at `center` with full extents `size`.
    pub fn from_center(center: Vec3, size: Vec3) -> Self {
        let half = size * 0.5;
        Self {
            left: center.x - half.x,
            right: center.x + half.x,
            bottom: center.y - half.y,
            top: center.y + half.y,
            back: center.z - half.z,
            front: center.z + half.z,
        }
    }

    /// Closed-interval intersection on all three axes.
    #[inline]
    pub fn intersects(&self, other: &Faces) -> bool {
        self.right >= other.left
            && self.left <= other.right
            && self.top >= other.bottom
            && self.bottom <= other.top
            && self.front >= other.back
            && self.back <= other.front
    }
}

/// Axis-aligned collision box attached to a world object.
///
/// `offset` is added to the owner's anchor position when the volume follows an
/// owner (e.g. the player's box is lifted by half its height so that it rests on
/// the feet position).
#[derive(Debug, Clone, PartialEq)]
pub struct BoundingVolume {
    /// World-space center of the box.
    center: Vec3,
    /// Full extents (width, height, depth).
    size: Vec3,
    /// Offset from the owner's anchor to the box center.
    offset: Vec3,
    /// Cached faces, valid as of the last refresh.
    faces: Faces,
    /// When false the volume never reports an overlap.
    pub collision_enabled: bool,
    /// Overlap is registered but does not block movement.
    pub pass_through: bool,
    /// Debug wireframe visibility, stored for the renderer.
    pub show_debug_box: bool,
}

impl BoundingVolume {
    /// Create a volume of the given extents centered on the origin.
    pub fn new(size: Vec3) -> Self {
        Self::with_offset(size, Vec3::ZERO)
    }

    /// Create a volume that sits `offset` away from its owner's anchor.
    pub fn with_offset(size: Vec3, offset: Vec3) -> Self {
        let size = size.abs();
        Self {
            center: offset,
            size,
            offset,
            faces: Faces::from_center(offset, size),
            collision_enabled: true,
            pass_through: false,
            show_debug_box: false,
        }
    }

    /// Volume resting on its anchor: the anchor is the bottom-center of the box.
    pub fn standing(size: Vec3) -> Self {
        let size = size.abs();
        Self::with_offset(size, Vec3::new(0.0, size.y * 0.5, 0.0))
    }

    /// Builder: mark the volume as pass-through.
    pub fn passable(mut self) -> Self {
        self.pass_through = true;
        self
    }

    /// Recompute the six faces from the current center and extents.
    pub fn refresh(&mut self) {
        self.faces = Faces::from_center(self.center, self.size);
    }

    /// Move the volume to follow `anchor` (plus offset) and refresh its faces.
    pub fn refresh_at(&mut self, anchor: Vec3) {
        self.center = anchor + self.offset;
        self.refresh();
    }

    /// Set the center without refreshing. Faces stay stale until the next refresh.
    pub fn set_center(&mut self, center: Vec3) {
        self.center = center;
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn size(&self) -> Vec3 {
        self.size
    }

    /// Faces as of the last refresh.
    pub fn faces(&self) -> &Faces {
        &self.faces
    }

    /// Pairwise overlap test on the cached faces.
    ///
    /// Returns false whenever either side has collision disabled, regardless of
    /// geometry. Touching faces count as overlapping.
    pub fn overlaps(&self, other: &BoundingVolume) -> bool {
        if !self.collision_enabled || !other.collision_enabled {
            return false;
        }
        self.faces.intersects(&other.faces)
    }
}
