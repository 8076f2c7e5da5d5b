//! Proximity Registry
//!
//! Tracks which world props currently overlap the player and answers the two
//! questions the movement controller asks every tick: is anything in contact, and
//! is any of those contacts pass-through.
//!
//! Entries are kept in registration order. [`ProximityRegistry::first_overlapping`]
//! therefore always picks the earliest registered prop when several overlap at once.

use std::collections::HashMap;

use super::bounding_volume::BoundingVolume;

/// Anything the player can bump into.
pub trait Collider {
    /// Stable identifier used to key the overlap flag.
    fn id(&self) -> &str;

    /// Collision volume, refreshed by [`Collider::refresh_volume`].
    fn volume(&self) -> &BoundingVolume;

    /// Recompute the volume's faces for this tick.
    fn refresh_volume(&mut self);

    /// Props that are still loading are skipped entirely.
    fn is_ready(&self) -> bool {
        true
    }
}

/// Result of one [`ProximityRegistry::detect`] pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OverlapSummary {
    /// At least one ready prop overlaps the actor.
    pub any_overlap: bool,
    /// At least one overlapping prop is pass-through.
    pub any_pass_through: bool,
}

impl OverlapSummary {
    /// An overlap that should veto movement: something solid is in contact.
    ///
    /// A single pass-through contact lifts the veto for the whole tick, even if a
    /// solid prop is also touched.
    pub fn blocks(&self) -> bool {
        self.any_overlap && !self.any_pass_through
    }
}

#[derive(Debug, Clone)]
struct Entry {
    id: String,
    overlapping: bool,
}

/// Ordered overlap flags, one per tracked prop.
#[derive(Debug, Clone, Default)]
pub struct ProximityRegistry {
    entries: Vec<Entry>,
    index: HashMap<String, usize>,
}

impl ProximityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start tracking a prop. Tracking the same id twice is a no-op.
    pub fn track(&mut self, id: &str) -> usize {
        if let Some(&slot) = self.index.get(id) {
            return slot;
        }
        let slot = self.entries.len();
        self.index.insert(id.to_owned(), slot);
        self.entries.push(Entry {
            id: id.to_owned(),
            overlapping: false,
        });
        slot
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Refresh every ready candidate and test it against `actor`.
    ///
    /// Candidates not yet tracked are registered on first sight. Flags of props
    /// that are not ready are left untouched.
    pub fn detect<C: Collider>(&mut self, actor: &BoundingVolume, candidates: &mut [C]) -> OverlapSummary {
        let mut summary = OverlapSummary::default();

        for candidate in candidates.iter_mut() {
            if !candidate.is_ready() {
                continue;
            }
            let slot = self.track(candidate.id());

            candidate.refresh_volume();
            let volume = candidate.volume();
            let overlapping = actor.overlaps(volume);
            self.entries[slot].overlapping = overlapping;

            if overlapping {
                summary.any_overlap = true;
                if volume.pass_through {
                    summary.any_pass_through = true;
                }
            }
        }

        summary
    }

    /// Earliest-registered prop currently flagged as overlapping.
    pub fn first_overlapping(&self) -> Option<&str> {
        self.entries.iter().find(|e| e.overlapping).map(|e| e.id.as_str())
    }

    /// Current overlap flag for a prop; untracked props report false.
    pub fn is_overlapping(&self, id: &str) -> bool {
        self.index
            .get(id)
            .map(|&slot| self.entries[slot].overlapping)
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    struct TestProp {
        id: String,
        at: Vec3,
        volume: BoundingVolume,
        ready: bool,
    }

    impl TestProp {
        fn new(id: &str, at: Vec3) -> Self {
            Self {
                id: id.to_owned(),
                at,
                volume: BoundingVolume::new(Vec3::ONE),
                ready: true,
            }
        }
    }

    impl Collider for TestProp {
        fn id(&self) -> &str {
            &self.id
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

    fn actor_at(at: Vec3) -> BoundingVolume {
        let mut v = BoundingVolume::new(Vec3::ONE);
        v.refresh_at(at);
        v
    }

    #[test]
    fn test_no_candidates_no_overlap() {
        let mut reg = ProximityRegistry::new();
        let summary = reg.detect::<TestProp>(&actor_at(Vec3::ZERO), &mut []);
        assert_eq!(summary, OverlapSummary::default());
        assert_eq!(reg.first_overlapping(), None);
    }

    #[test]
    fn test_first_overlapping_follows_registration_order() {
        let mut reg = ProximityRegistry::new();
        let mut props = vec![
            TestProp::new("far", Vec3::new(10.0, 0.0, 0.0)),
            TestProp::new("cube", Vec3::ZERO),
            TestProp::new("dance", Vec3::new(0.5, 0.0, 0.0)),
        ];
        let summary = reg.detect(&actor_at(Vec3::ZERO), &mut props);
        assert!(summary.any_overlap);
        assert_eq!(reg.first_overlapping(), Some("cube"));
        assert!(reg.is_overlapping("dance"));
        assert!(!reg.is_overlapping("far"));
    }

    #[test]
    fn test_pass_through_lifts_veto() {
        let mut reg = ProximityRegistry::new();
        let solid = TestProp::new("cube", Vec3::ZERO);
        let mut zone = TestProp::new("zone", Vec3::ZERO);
        zone.volume = zone.volume.clone().passable();

        let mut props = vec![solid, zone];
        let summary = reg.detect(&actor_at(Vec3::ZERO), &mut props);
        assert!(summary.any_overlap);
        assert!(summary.any_pass_through);
        assert!(!summary.blocks());
    }

    #[test]
    fn test_unready_props_are_skipped() {
        let mut reg = ProximityRegistry::new();
        let mut prop = TestProp::new("loading", Vec3::ZERO);
        prop.ready = false;
        let mut props = vec![prop];
        let summary = reg.detect(&actor_at(Vec3::ZERO), &mut props);
        assert!(!summary.any_overlap);
        assert!(reg.is_empty());
    }

    #[test]
    fn test_flags_drop_when_actor_leaves() {
        let mut reg = ProximityRegistry::new();
        let mut props = vec![TestProp::new("cube", Vec3::ZERO)];
        reg.detect(&actor_at(Vec3::ZERO), &mut props);
        assert!(reg.is_overlapping("cube"));

        reg.detect(&actor_at(Vec3::new(5.0, 0.0, 0.0)), &mut props);
        assert!(!reg.is_overlapping("cube"));
        assert_eq!(reg.first_overlapping(), None);
    }

    #[test]
    fn test_track_twice_is_noop() {
        let mut reg = ProximityRegistry::new();
        assert_eq!(reg.track("cube"), 0);
        assert_eq!(reg.track("cube"), 0);
        assert_eq!(reg.len(), 1);
    }
}
