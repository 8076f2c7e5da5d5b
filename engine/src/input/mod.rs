//! Input Module
//!
//! Platform-agnostic keyboard handling. This module is decoupled from any specific
//! windowing system so the native winit host and the browser host share it.
//!
//! # Example
//!
//! ```rust
//! use island_walk_engine::input::{KeyCode, KeyboardState};
//!
//! let mut keyboard = KeyboardState::new();
//! keyboard.handle_code("KeyA", true);
//! keyboard.handle_key(KeyCode::Space, true);
//!
//! let snapshot = keyboard.snapshot();
//! assert!(snapshot.keys.direction_pressed());
//! assert!(snapshot.jump_requested);
//! ```

pub mod hold;
pub mod keyboard;

pub use hold::{HOLD_DURATION, HoldGesture};
pub use keyboard::{InputSnapshot, KeyCode, KeyboardState, MovementKeys};
