//! Config Module
//!
//! Gameplay toggles, character tuning and island layout, all loadable from JSON.

pub mod layout;
pub mod settings;
pub mod tuning;

pub use layout::{GroundDef, IslandLayout, LayoutError, Placement, PropDef};
pub use settings::{GameSettings, SettingsError, load_json, load_or_default, save_json};
pub use tuning::CharacterTuning;
