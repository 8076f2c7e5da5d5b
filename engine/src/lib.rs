//! Island Walk Engine Library
//!
//! Character movement, animation state and box collision for a third-person
//! island stroll. Rendering, asset loading and audio playback belong to the host;
//! this library consumes frame time, key state, an animation mixer and a ground
//! surface, and produces positions, the current animation and overlap flags.
//!
//! # Modules
//!
//! - [`physics`] - Bounding volumes, ground probing and gravity, proximity registry
//! - [`player`] - Animation state machine, clip mixer, movement controller
//! - [`camera`] - Orbit follow camera
//! - [`input`] - Platform-agnostic keyboard state and hold gesture
//! - [`game`] - Island settings, layout, props, audio triggers and the session loop
//!
//! # Example
//!
//! ```ignore
//! use island_walk_engine::game::{AudioLedger, IslandSession};
//! use island_walk_engine::input::KeyboardState;
//! use island_walk_engine::player::{BlendMixer, FrameTime};
//!
//! let mut session = IslandSession::with_defaults()?;
//! let mut mixer = BlendMixer::with_clips(["Idle", "Walk", "Run"]);
//! let mut audio = AudioLedger::new();
//! let mut keyboard = KeyboardState::new();
//!
//! session.spawn_player(FrameTime::default(), &mut mixer);
//!
//! // Each frame:
//! keyboard.handle_code("KeyA", true);
//! let input = keyboard.snapshot();
//! session.tick(frame, &input, &mut mixer, &mut audio);
//! ```

pub mod camera;
pub mod input;
pub mod physics;
pub mod player;

// Game-specific modules (located in src/game/ directory)
#[path = "../../src/game/mod.rs"]
pub mod game;

// Re-export commonly used input types
pub use input::{InputSnapshot, KeyCode, KeyboardState};
// Re-export player types
pub use player::{FrameTime, MovementController};
