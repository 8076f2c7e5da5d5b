//! Island Layout
//!
//! Ground and prop placement for the island scene. `Default` reproduces the
//! shipped scene: an island disc, three dance zones on the walking circle, a
//! blocking cube just off the path and the spinning crystal above the center.

use std::collections::HashSet;
use std::f32::consts::{FRAC_PI_2, PI};
use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::settings::{SettingsError, load_json};
use crate::game::props::{Prop, PropKind};
use crate::physics::{Terrain, TerrainPiece};
use crate::player::{Action, DanceStyle, ORBIT_RADIUS, circle_position};

/// Validation errors for an [`IslandLayout`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LayoutError {
    /// Two props share an id; overlap flags are keyed by id.
    #[error("duplicate prop id: {0}")]
    DuplicatePropId(String),
    /// A dance zone names an action that is not a dance.
    #[error("prop {id}: {action} is not a dance action")]
    UnknownDanceAction { id: String, action: String },
}

/// Where a prop stands.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Placement {
    /// On a circle around the origin, at ground height `y`.
    Orbit { angle: f32, radius: f32, y: f32 },
    /// Explicit world position.
    At { position: Vec3 },
}

impl Placement {
    pub fn position(&self) -> Vec3 {
        match *self {
            Placement::Orbit { angle, radius, y } => {
                let (x, z) = circle_position(angle, radius);
                Vec3::new(x, y, z)
            }
            Placement::At { position } => position,
        }
    }
}

/// One prop entry of the layout file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropDef {
    pub id: String,
    /// Collision box extents (width, height, depth)
    pub size: Vec3,
    pub placement: Placement,
    /// Clip name of the dance to adopt; absent for obstacles.
    #[serde(default)]
    pub dance: Option<String>,
    /// Radians per second about Y
    #[serde(default)]
    pub spin_rate: f32,
}

impl PropDef {
    fn obstacle(id: &str, size: Vec3, placement: Placement) -> Self {
        Self {
            id: id.to_owned(),
            size,
            placement,
            dance: None,
            spin_rate: 0.0,
        }
    }

    fn dance_zone(id: &str, size: Vec3, angle: f32, style: DanceStyle) -> Self {
        Self {
            id: id.to_owned(),
            size,
            placement: Placement::Orbit {
                angle,
                radius: ORBIT_RADIUS,
                y: 0.0,
            },
            dance: Some(Action::Dance(style).clip_name().to_owned()),
            spin_rate: 0.0,
        }
    }

    fn kind(&self) -> Result<PropKind, LayoutError> {
        let Some(name) = &self.dance else {
            return Ok(PropKind::Obstacle);
        };
        match Action::from_clip_name(name).and_then(Action::dance_style) {
            Some(style) => Ok(PropKind::DanceZone(style)),
            None => Err(LayoutError::UnknownDanceAction {
                id: self.id.clone(),
                action: name.clone(),
            }),
        }
    }

    pub fn build(&self) -> Result<Prop, LayoutError> {
        let prop = Prop::new(self.id.clone(), self.kind()?, self.placement.position(), self.size);
        Ok(prop.with_spin(self.spin_rate))
    }
}

/// Flat island floor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GroundDef {
    pub radius: f32,
    pub height: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IslandLayout {
    pub ground: GroundDef,
    pub props: Vec<PropDef>,
}

impl Default for IslandLayout {
    fn default() -> Self {
        Self {
            ground: GroundDef {
                radius: 27.0,
                height: 0.0,
            },
            props: vec![
                PropDef::obstacle(
                    "InteractiveCube",
                    Vec3::new(1.0, 2.0, 1.0),
                    Placement::At {
                        position: Vec3::new(29.0, 0.0, 5.0),
                    },
                ),
                PropDef {
                    spin_rate: 0.5,
                    ..PropDef::obstacle(
                        "Crystal",
                        Vec3::splat(2.0),
                        Placement::At {
                            position: Vec3::new(0.0, 5.0, 0.0),
                        },
                    )
                },
                PropDef::dance_zone("DanceCube", Vec3::new(3.0, 2.0, 5.0), PI - PI / 20.0, DanceStyle::Classic),
                PropDef::dance_zone("DanceCube2", Vec3::new(3.0, 2.0, 3.0), FRAC_PI_2, DanceStyle::Chicken),
                PropDef::dance_zone(
                    "DanceCube3",
                    Vec3::new(3.0, 2.0, 3.0),
                    3.0 * FRAC_PI_2 - PI / 30.0,
                    DanceStyle::Snake,
                ),
            ],
        }
    }
}

impl IslandLayout {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        load_json(path)
    }

    /// Check that prop ids are unique and every dance name is a dance.
    pub fn validate(&self) -> Result<(), LayoutError> {
        let mut seen = HashSet::new();
        for def in &self.props {
            if !seen.insert(def.id.as_str()) {
                return Err(LayoutError::DuplicatePropId(def.id.clone()));
            }
            def.kind()?;
        }
        Ok(())
    }

    /// Instantiate every prop in file order (which is also registration order).
    pub fn build_props(&self) -> Result<Vec<Prop>, LayoutError> {
        self.validate()?;
        self.props.iter().map(PropDef::build).collect()
    }

    pub fn terrain(&self) -> Terrain {
        Terrain::new().with(TerrainPiece::Disc {
            center: Vec3::Y * self.ground.height,
            radius: self.ground.radius,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::GroundSurface;

    #[test]
    fn test_default_scene() {
        let layout = IslandLayout::default();
        let props = layout.build_props().unwrap();
        assert_eq!(props.len(), 5);
        assert_eq!(props[0].id(), "InteractiveCube");
        assert_eq!(props[0].kind(), PropKind::Obstacle);

        let dances: Vec<_> = props.iter().filter_map(|p| p.action()).collect();
        assert_eq!(
            dances,
            vec![
                Action::Dance(DanceStyle::Classic),
                Action::Dance(DanceStyle::Chicken),
                Action::Dance(DanceStyle::Snake),
            ]
        );
    }

    #[test]
    fn test_dance_zones_sit_on_the_walking_circle() {
        for def in IslandLayout::default().props.iter().filter(|d| d.dance.is_some()) {
            let p = def.placement.position();
            assert!(((p.x * p.x + p.z * p.z).sqrt() - ORBIT_RADIUS).abs() < 1e-3);
        }
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let mut layout = IslandLayout::default();
        let copy = layout.props[0].clone();
        layout.props.push(copy);
        assert_eq!(
            layout.validate(),
            Err(LayoutError::DuplicatePropId("InteractiveCube".to_owned()))
        );
    }

    #[test]
    fn test_non_dance_action_rejected() {
        let mut layout = IslandLayout::default();
        layout.props[2].dance = Some("Walk".to_owned());
        assert!(matches!(
            layout.build_props(),
            Err(LayoutError::UnknownDanceAction { .. })
        ));
    }

    #[test]
    fn test_terrain_is_island_disc() {
        let terrain = IslandLayout::default().terrain();
        assert_eq!(terrain.probe_down(Vec3::new(25.0, 1.0, 0.0), 10.0), Some(0.0));
        assert_eq!(terrain.probe_down(Vec3::new(28.0, 1.0, 0.0), 10.0), None);
    }

    #[test]
    fn test_layout_json() {
        let json = r#"{
            "ground": { "radius": 10.0, "height": 0.0 },
            "props": [
                { "id": "a", "size": [1.0, 1.0, 1.0],
                  "placement": { "type": "orbit", "angle": 0.0, "radius": 5.0, "y": 0.0 },
                  "dance": "SnakeDance" }
            ]
        }"#;
        let layout: IslandLayout = serde_json::from_str(json).unwrap();
        let props = layout.build_props().unwrap();
        assert_eq!(props[0].position(), Vec3::new(5.0, 0.0, 0.0));
        assert_eq!(props[0].action(), Some(Action::Dance(DanceStyle::Snake)));
    }
}
