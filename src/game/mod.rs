//! Game Module
//!
//! Island-specific systems that build on top of the engine: configuration,
//! props, audio triggers and the per-frame session.

pub mod audio;
pub mod config;
pub mod props;
pub mod session;

pub use audio::{AudioCall, AudioLedger, AudioPort, SoundDirector, Track};
pub use config::{CharacterTuning, GameSettings, IslandLayout, LayoutError, SettingsError};
pub use props::{HoldPrompt, Prop, PropKind};
pub use session::IslandSession;
