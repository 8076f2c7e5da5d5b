//! Keyboard Input Module
//!
//! Key state tracking for the island controls, decoupled from winit so the same
//! code serves native and browser hosts. Hosts translate their events into
//! [`KeyCode`]s (or the DOM-style code strings accepted by [`KeyCode::from_code`])
//! and read one [`InputSnapshot`] per tick.

use std::fmt;

/// Generic key codes, independent of windowing system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    // Movement keys
    W,
    A,
    S,
    D,
    /// Hold to dance at a dance zone
    E,
    /// Jump
    Space,
    /// Run / walk toggle
    ShiftLeft,
    ShiftRight,

    /// Catch-all for unhandled keys
    Unknown,
}

impl KeyCode {
    /// Parse a DOM `KeyboardEvent.code` style identifier (`"KeyA"`, `"Space"`, ...).
    pub fn from_code(code: &str) -> KeyCode {
        match code {
            "KeyW" => KeyCode::W,
            "KeyA" => KeyCode::A,
            "KeyS" => KeyCode::S,
            "KeyD" => KeyCode::D,
            "KeyE" => KeyCode::E,
            "Space" => KeyCode::Space,
            "ShiftLeft" => KeyCode::ShiftLeft,
            "ShiftRight" => KeyCode::ShiftRight,
            _ => KeyCode::Unknown,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            KeyCode::W => "KeyW",
            KeyCode::A => "KeyA",
            KeyCode::S => "KeyS",
            KeyCode::D => "KeyD",
            KeyCode::E => "KeyE",
            KeyCode::Space => "Space",
            KeyCode::ShiftLeft => "ShiftLeft",
            KeyCode::ShiftRight => "ShiftRight",
            KeyCode::Unknown => "Unidentified",
        }
    }

    /// A and D steer along the orbit; W and S are tracked but move nothing.
    pub fn is_direction(self) -> bool {
        matches!(self, KeyCode::A | KeyCode::D)
    }
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Held state of every key the game listens to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MovementKeys {
    /// W key (tracked, unused by orbit movement)
    pub forward: bool,
    /// S key (tracked, unused by orbit movement)
    pub backward: bool,
    /// A key - orbit counter-clockwise
    pub left: bool,
    /// D key - orbit clockwise
    pub right: bool,
    /// E key - hold to dance
    pub interact: bool,
    /// Space
    pub jump: bool,
    /// Either shift key
    pub shift: bool,
}

impl MovementKeys {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update held state. Returns `true` if the key is one the game tracks.
    pub fn handle_key(&mut self, key: KeyCode, pressed: bool) -> bool {
        let slot = match key {
            KeyCode::W => &mut self.forward,
            KeyCode::S => &mut self.backward,
            KeyCode::A => &mut self.left,
            KeyCode::D => &mut self.right,
            KeyCode::E => &mut self.interact,
            KeyCode::Space => &mut self.jump,
            KeyCode::ShiftLeft | KeyCode::ShiftRight => &mut self.shift,
            KeyCode::Unknown => return false,
        };
        *slot = pressed;
        true
    }

    pub fn is_pressed(&self, key: KeyCode) -> bool {
        match key {
            KeyCode::W => self.forward,
            KeyCode::S => self.backward,
            KeyCode::A => self.left,
            KeyCode::D => self.right,
            KeyCode::E => self.interact,
            KeyCode::Space => self.jump,
            KeyCode::ShiftLeft | KeyCode::ShiftRight => self.shift,
            KeyCode::Unknown => false,
        }
    }

    /// A direction key (A or D) is held.
    pub fn direction_pressed(&self) -> bool {
        self.left || self.right
    }

    /// Orbit direction: +1 for A, -1 for D, A wins when both are held.
    pub fn orbit_sign(&self) -> Option<f32> {
        if self.left {
            Some(1.0)
        } else if self.right {
            Some(-1.0)
        } else {
            None
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Everything the simulation reads from input in one tick.
///
/// Edge-triggered requests are consumed when the snapshot is taken, so each key-down
/// produces exactly one request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    pub keys: MovementKeys,
    /// Space went down since the last snapshot.
    pub jump_requested: bool,
    /// Shift went down since the last snapshot.
    pub run_toggle_requested: bool,
    /// E went down since the last snapshot.
    pub interact_pressed: bool,
    /// E went up since the last snapshot.
    pub interact_released: bool,
}

impl InputSnapshot {
    /// Snapshot with the given keys held and no edges.
    pub fn holding(keys: &[KeyCode]) -> Self {
        let mut snapshot = Self::default();
        for &key in keys {
            snapshot.keys.handle_key(key, true);
        }
        snapshot
    }

    /// Builder: request a jump this tick.
    pub fn with_jump(mut self) -> Self {
        self.jump_requested = true;
        self
    }
}

/// Keyboard state fed by host events.
#[derive(Debug, Clone, Default)]
pub struct KeyboardState {
    /// Held keys
    pub movement: MovementKeys,
    pending: InputSnapshot,
}

impl KeyboardState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle a key press or release event.
    ///
    /// Auto-repeated presses of an already held key do not produce new edges.
    /// Returns `true` if the key is one the game tracks.
    pub fn handle_key(&mut self, key: KeyCode, pressed: bool) -> bool {
        let was_pressed = self.movement.is_pressed(key);
        if !self.movement.handle_key(key, pressed) {
            return false;
        }
        match (key, was_pressed, pressed) {
            (KeyCode::Space, false, true) => self.pending.jump_requested = true,
            (KeyCode::ShiftLeft | KeyCode::ShiftRight, false, true) => {
                self.pending.run_toggle_requested = true
            }
            (KeyCode::E, false, true) => self.pending.interact_pressed = true,
            (KeyCode::E, true, false) => self.pending.interact_released = true,
            _ => {}
        }
        true
    }

    /// Same as [`handle_key`](Self::handle_key) for DOM-style code strings.
    pub fn handle_code(&mut self, code: &str, pressed: bool) -> bool {
        self.handle_key(KeyCode::from_code(code), pressed)
    }

    /// Take this tick's snapshot and clear pending edges.
    pub fn snapshot(&mut self) -> InputSnapshot {
        let mut snapshot = std::mem::take(&mut self.pending);
        snapshot.keys = self.movement;
        snapshot
    }

    /// Release everything, e.g. when the window loses focus.
    pub fn reset(&mut self) {
        self.movement.reset();
        self.pending = InputSnapshot::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_code() {
        assert_eq!(KeyCode::from_code("KeyA"), KeyCode::A);
        assert_eq!(KeyCode::from_code("ShiftLeft"), KeyCode::ShiftLeft);
        assert_eq!(KeyCode::from_code("KeyQ"), KeyCode::Unknown);
        assert_eq!(KeyCode::from_code(KeyCode::Space.code()), KeyCode::Space);
    }

    #[test]
    fn test_only_a_and_d_are_directions() {
        let mut keys = MovementKeys::new();
        keys.handle_key(KeyCode::W, true);
        keys.handle_key(KeyCode::S, true);
        assert!(!keys.direction_pressed());
        assert_eq!(keys.orbit_sign(), None);

        keys.handle_key(KeyCode::D, true);
        assert_eq!(keys.orbit_sign(), Some(-1.0));
        keys.handle_key(KeyCode::A, true);
        assert_eq!(keys.orbit_sign(), Some(1.0));
    }

    #[test]
    fn test_unknown_key_not_handled() {
        let mut kb = KeyboardState::new();
        assert!(!kb.handle_code("Escape", true));
        assert_eq!(kb.snapshot(), InputSnapshot::default());
    }

    #[test]
    fn test_jump_is_edge_triggered() {
        let mut kb = KeyboardState::new();
        kb.handle_key(KeyCode::Space, true);
        kb.handle_key(KeyCode::Space, true); // auto-repeat
        let first = kb.snapshot();
        assert!(first.jump_requested);
        assert!(first.keys.jump);

        let second = kb.snapshot();
        assert!(!second.jump_requested);
        assert!(second.keys.jump);
    }

    #[test]
    fn test_shift_requests_run_toggle_once() {
        let mut kb = KeyboardState::new();
        kb.handle_key(KeyCode::ShiftLeft, true);
        assert!(kb.snapshot().run_toggle_requested);
        kb.handle_key(KeyCode::ShiftLeft, false);
        assert!(!kb.snapshot().run_toggle_requested);
    }

    #[test]
    fn test_interact_edges() {
        let mut kb = KeyboardState::new();
        kb.handle_code("KeyE", true);
        let down = kb.snapshot();
        assert!(down.interact_pressed);
        assert!(!down.interact_released);

        kb.handle_code("KeyE", false);
        let up = kb.snapshot();
        assert!(!up.interact_pressed);
        assert!(up.interact_released);
        assert!(!up.keys.interact);
    }

    #[test]
    fn test_holding_helper() {
        let snapshot = InputSnapshot::holding(&[KeyCode::A]).with_jump();
        assert!(snapshot.keys.left);
        assert!(snapshot.jump_requested);
    }
}
