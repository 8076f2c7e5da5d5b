//! Collision Tests - Bounding Volumes, Proximity and Ground
//!
//! Property tests for the box overlap rules and the gravity pass, plus a few
//! fixed scenarios on the proximity registry.

use glam::Vec3;
use island_walk_engine::physics::{
    BoundingVolume, Collider, GRAVITY_PER_TICK, GroundSampler, ProximityRegistry, Terrain, TerrainPiece, VerticalBody,
};
use proptest::prelude::*;

fn volume_at(center: Vec3, size: Vec3) -> BoundingVolume {
    let mut v = BoundingVolume::new(size);
    v.refresh_at(center);
    v
}

fn island() -> Terrain {
    Terrain::new().with(TerrainPiece::Disc {
        center: Vec3::ZERO,
        radius: 27.0,
    })
}

fn coord() -> impl Strategy<Value = f32> {
    -50.0f32..50.0
}

fn extent() -> impl Strategy<Value = f32> {
    0.1f32..10.0
}

prop_compose! {
    fn arb_vec3()(x in coord(), y in coord(), z in coord()) -> Vec3 {
        Vec3::new(x, y, z)
    }
}

prop_compose! {
    fn arb_size()(x in extent(), y in extent(), z in extent()) -> Vec3 {
        Vec3::new(x, y, z)
    }
}

// ============================================================================
// BoundingVolume Properties
// ============================================================================

proptest! {
    #[test]
    fn prop_disabled_collision_never_overlaps(
        a in arb_vec3(),
        b in arb_vec3(),
        size_a in arb_size(),
        size_b in arb_size(),
        disable_first in any::<bool>(),
    ) {
        let mut first = volume_at(a, size_a);
        let mut second = volume_at(b, size_b);
        if disable_first {
            first.collision_enabled = false;
        } else {
            second.collision_enabled = false;
        }
        prop_assert!(!first.overlaps(&second));
        prop_assert!(!second.overlaps(&first));
    }

    #[test]
    fn prop_identical_centers_overlap(
        center in arb_vec3(),
        size_a in arb_size(),
        size_b in arb_size(),
    ) {
        let first = volume_at(center, size_a);
        let second = volume_at(center, size_b);
        prop_assert!(first.overlaps(&second));
    }

    #[test]
    fn prop_overlap_is_symmetric(
        a in arb_vec3(),
        b in arb_vec3(),
        size_a in arb_size(),
        size_b in arb_size(),
    ) {
        let first = volume_at(a, size_a);
        let second = volume_at(b, size_b);
        prop_assert_eq!(first.overlaps(&second), second.overlaps(&first));
    }

    #[test]
    fn prop_refresh_is_idempotent(center in arb_vec3(), size in arb_size()) {
        let mut v = volume_at(center, size);
        let faces = *v.faces();
        v.refresh();
        prop_assert_eq!(*v.faces(), faces);
        v.refresh_at(center);
        prop_assert_eq!(*v.faces(), faces);
    }
}

// ============================================================================
// Gravity Properties
// ============================================================================

proptest! {
    #[test]
    fn prop_free_fall_adds_one_tick_of_gravity(
        velocity in -2.0f32..2.0,
        y in -20.0f32..20.0,
    ) {
        let sampler = GroundSampler::default();
        let mut body = VerticalBody { velocity_y: velocity, on_ground: false };
        // Well off the island: nothing to land on.
        let mut position = Vec3::new(100.0, y, 0.0);

        let hit = sampler.integrate(&mut body, &mut position, &island());

        let expected_velocity = velocity - GRAVITY_PER_TICK;
        prop_assert_eq!(hit, None);
        prop_assert_eq!(body.velocity_y, expected_velocity);
        prop_assert_eq!(position.y, y + expected_velocity);
        prop_assert!(!body.on_ground);
    }

    #[test]
    fn prop_landing_clamps_exactly(
        y in 0.0f32..0.5,
        velocity in -0.85f32..-0.6,
        x in -20.0f32..20.0,
    ) {
        let sampler = GroundSampler::default();
        let mut body = VerticalBody { velocity_y: velocity, on_ground: false };
        let mut position = Vec3::new(x, y, 0.0);

        sampler.integrate(&mut body, &mut position, &island());

        prop_assert_eq!(position.y, 0.0);
        prop_assert_eq!(body.velocity_y, 0.0);
        prop_assert!(body.on_ground);
    }
}

// ============================================================================
// Ground Sampling
// ============================================================================

#[test]
fn test_block_top_supports_and_floor_below_does_not_win() {
    let terrain = island().with(TerrainPiece::Block {
        min: Vec3::new(24.0, 0.0, -1.0),
        max: Vec3::new(26.0, 1.25, 1.0),
    });
    let sampler = GroundSampler::default();
    let mut body = VerticalBody {
        velocity_y: 0.0,
        on_ground: false,
    };
    let mut position = Vec3::new(25.0, 1.3, 0.0);

    let hit = sampler.integrate(&mut body, &mut position, &terrain);

    assert_eq!(hit, Some(1.25));
    assert_eq!(position.y, 1.25);
    assert!(body.on_ground);
}

#[test]
fn test_falling_off_the_edge_keeps_falling() {
    let sampler = GroundSampler::default();
    let mut body = VerticalBody::default();
    let mut position = Vec3::new(30.0, 0.0, 0.0);

    for _ in 0..3 {
        sampler.integrate(&mut body, &mut position, &island());
    }

    assert!(!body.on_ground);
    assert!((body.velocity_y + 0.3).abs() < 1e-6);
    assert!((position.y + 0.6).abs() < 1e-5);
}

// ============================================================================
// ProximityRegistry Scenarios
// ============================================================================

struct Marker {
    id: &'static str,
    at: Vec3,
    volume: BoundingVolume,
    ready: bool,
}

impl Marker {
    fn solid(id: &'static str, at: Vec3) -> Self {
        Self {
            id,
            at,
            volume: BoundingVolume::new(Vec3::ONE),
            ready: true,
        }
    }

    fn zone(id: &'static str, at: Vec3) -> Self {
        Self {
            volume: BoundingVolume::new(Vec3::ONE).passable(),
            ..Self::solid(id, at)
        }
    }
}

impl Collider for Marker {
    fn id(&self) -> &str {
        self.id
    }
    fn volume(&self) -> &BoundingVolume {
        &self.volume
    }
    fn refresh_volume(&mut self) {
        self.volume.refresh_at(self.at);
    }
    fn is_ready(&self) -> bool {
        self.ready
    }
}

#[test]
fn test_touching_faces_overlap() {
    let mut registry = ProximityRegistry::new();
    let actor = volume_at(Vec3::ZERO, Vec3::ONE);
    let mut props = vec![Marker::solid("edge", Vec3::new(1.0, 0.0, 0.0))];

    let summary = registry.detect(&actor, &mut props);

    assert!(summary.any_overlap);
    assert!(summary.blocks());
    assert_eq!(registry.first_overlapping(), Some("edge"));
}

#[test]
fn test_pass_through_contact_lifts_veto_for_solid_contact() {
    let mut registry = ProximityRegistry::new();
    let actor = volume_at(Vec3::ZERO, Vec3::ONE);
    let mut props = vec![Marker::solid("cube", Vec3::ZERO), Marker::zone("dance", Vec3::ZERO)];

    let summary = registry.detect(&actor, &mut props);

    assert!(summary.any_overlap);
    assert!(summary.any_pass_through);
    assert!(!summary.blocks());
    assert_eq!(registry.first_overlapping(), Some("cube"));
}

#[test]
fn test_detect_is_idempotent() {
    let mut registry = ProximityRegistry::new();
    let actor = volume_at(Vec3::ZERO, Vec3::ONE);
    let mut props = vec![Marker::solid("a", Vec3::ZERO), Marker::solid("b", Vec3::new(5.0, 0.0, 0.0))];

    let first = registry.detect(&actor, &mut props);
    let second = registry.detect(&actor, &mut props);

    assert_eq!(first, second);
    assert_eq!(registry.len(), 2);
    assert!(registry.is_overlapping("a"));
    assert!(!registry.is_overlapping("b"));
}

#[test]
fn test_unready_prop_is_skipped_until_loaded() {
    let mut registry = ProximityRegistry::new();
    let actor = volume_at(Vec3::ZERO, Vec3::ONE);
    let mut props = vec![Marker {
        ready: false,
        ..Marker::solid("crystal", Vec3::ZERO)
    }];

    assert!(!registry.detect(&actor, &mut props).any_overlap);
    assert!(registry.is_empty());

    props[0].ready = true;
    assert!(registry.detect(&actor, &mut props).any_overlap);
    assert_eq!(registry.first_overlapping(), Some("crystal"));
}
