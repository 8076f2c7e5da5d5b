//! Island Props
//!
//! World objects the player can bump into. Each prop owns a [`BoundingVolume`]
//! centered on its position; dance zones are pass-through and carry a "Hold E"
//! prompt whose visibility follows the player's overlap flag.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::physics::{BoundingVolume, Collider};
use crate::player::{Action, DanceStyle};

/// What a prop does when the player reaches it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropKind {
    /// Solid: blocks movement.
    Obstacle,
    /// Pass-through: holding E here makes the player dance.
    DanceZone(DanceStyle),
}

/// "Hold E" affordance state, rendered by the UI.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HoldPrompt {
    pub visible: bool,
    /// Fill percentage in [0, 100].
    pub progress: f32,
    /// Stays set once the hold ran to 100 %.
    pub completed: bool,
}

impl HoldPrompt {
    /// Update the fill while E is held. Completed prompts do not change.
    pub fn advance(&mut self, progress: f32) {
        if self.completed {
            return;
        }
        self.progress = progress.clamp(0.0, 100.0);
        if self.progress >= 100.0 {
            self.completed = true;
        }
    }

    /// E was released: clear the fill unless the hold completed.
    pub fn release(&mut self) {
        if !self.completed {
            self.progress = 0.0;
        }
    }
}

#[derive(Debug, Clone)]
pub struct Prop {
    id: String,
    kind: PropKind,
    position: Vec3,
    /// Rotation about Y, for props that spin in place
    yaw: f32,
    /// Radians per second
    spin_rate: f32,
    volume: BoundingVolume,
    prompt: HoldPrompt,
    loaded: bool,
}

impl Prop {
    pub fn new(id: impl Into<String>, kind: PropKind, position: Vec3, size: Vec3) -> Self {
        let mut volume = BoundingVolume::new(size);
        if matches!(kind, PropKind::DanceZone(_)) {
            volume = volume.passable();
        }
        volume.refresh_at(position);
        Self {
            id: id.into(),
            kind,
            position,
            yaw: 0.0,
            spin_rate: 0.0,
            volume,
            prompt: HoldPrompt::default(),
            loaded: true,
        }
    }

    pub fn obstacle(id: impl Into<String>, position: Vec3, size: Vec3) -> Self {
        Self::new(id, PropKind::Obstacle, position, size)
    }

    pub fn dance_zone(id: impl Into<String>, position: Vec3, size: Vec3, style: DanceStyle) -> Self {
        Self::new(id, PropKind::DanceZone(style), position, size)
    }

    /// Builder: spin about Y at `rate` radians per second.
    pub fn with_spin(mut self, rate: f32) -> Self {
        self.spin_rate = rate;
        self
    }

    /// Builder: start in the "still loading" state.
    pub fn unloaded(mut self) -> Self {
        self.loaded = false;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> PropKind {
        self.kind
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn volume(&self) -> &BoundingVolume {
        &self.volume
    }

    pub fn volume_mut(&mut self) -> &mut BoundingVolume {
        &mut self.volume
    }

    pub fn prompt(&self) -> &HoldPrompt {
        &self.prompt
    }

    pub fn prompt_mut(&mut self) -> &mut HoldPrompt {
        &mut self.prompt
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Asset load finished; the prop starts participating in collision.
    pub fn mark_loaded(&mut self) {
        self.loaded = true;
    }

    /// Action the player adopts when holding E here.
    pub fn action(&self) -> Option<Action> {
        match self.kind {
            PropKind::DanceZone(style) => Some(Action::Dance(style)),
            PropKind::Obstacle => None,
        }
    }

    /// Per-frame animation of the prop itself.
    pub fn update(&mut self, delta: f32) {
        if self.spin_rate != 0.0 {
            self.yaw = (self.yaw + self.spin_rate * delta).rem_euclid(std::f32::consts::TAU);
        }
    }
}

impl Collider for Prop {
    fn id(&self) -> &str {
        &self.id
    }

    fn volume(&self) -> &BoundingVolume {
        &self.volume
    }

    fn refresh_volume(&mut self) {
        self.volume.refresh_at(self.position);
    }

    fn is_ready(&self) -> bool {
        self.loaded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dance_zone_is_pass_through() {
        let zone = Prop::dance_zone("dance", Vec3::ZERO, Vec3::new(3.0, 2.0, 3.0), DanceStyle::Chicken);
        assert!(zone.volume().pass_through);
        assert_eq!(zone.action(), Some(Action::Dance(DanceStyle::Chicken)));

        let cube = Prop::obstacle("cube", Vec3::ZERO, Vec3::ONE);
        assert!(!cube.volume().pass_through);
        assert_eq!(cube.action(), None);
    }

    #[test]
    fn test_volume_centered_on_position() {
        let cube = Prop::obstacle("cube", Vec3::new(29.0, 0.0, 5.0), Vec3::new(1.0, 2.0, 1.0));
        assert_eq!(cube.volume().faces().bottom, -1.0);
        assert_eq!(cube.volume().faces().top, 1.0);
        assert_eq!(cube.volume().faces().left, 28.5);
    }

    #[test]
    fn test_prompt_completes_and_sticks() {
        let mut prompt = HoldPrompt::default();
        prompt.advance(40.0);
        prompt.release();
        assert_eq!(prompt.progress, 0.0);

        prompt.advance(100.0);
        assert!(prompt.completed);
        prompt.advance(10.0);
        prompt.release();
        assert_eq!(prompt.progress, 100.0);
    }

    #[test]
    fn test_spin() {
        let mut crystal = Prop::obstacle("crystal", Vec3::Y * 5.0, Vec3::splat(2.0)).with_spin(0.5);
        crystal.update(2.0);
        assert!((crystal.yaw() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_unloaded_prop_is_not_ready() {
        let mut cube = Prop::obstacle("cube", Vec3::ZERO, Vec3::ONE).unloaded();
        assert!(!cube.is_ready());
        cube.mark_loaded();
        assert!(cube.is_ready());
    }
}
