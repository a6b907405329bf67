//! Input adapter
//!
//! Browser events only latch state here (last write wins); the game loop
//! reads one `TickInput` per step.

use std::collections::HashSet;

use glam::Vec2;

use crate::config::Playfield;
use crate::sim::{Directions, TickInput};

/// Which input source drove the hole most recently
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Pointer,
    Directional,
}

/// Canvas rectangle as laid out on the page (CSS pixels)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

/// Keys whose default action (page scroll) must be suppressed
pub fn is_scroll_key(key: &str) -> bool {
    matches!(key, "ArrowUp" | "ArrowDown" | "ArrowLeft" | "ArrowRight")
}

const LEFT_KEYS: [&str; 3] = ["ArrowLeft", "a", "A"];
const RIGHT_KEYS: [&str; 3] = ["ArrowRight", "d", "D"];
const UP_KEYS: [&str; 3] = ["ArrowUp", "w", "W"];
const DOWN_KEYS: [&str; 3] = ["ArrowDown", "s", "S"];

/// Latched pointer and keyboard state
#[derive(Debug, Clone)]
pub struct InputState {
    playfield: Playfield,
    /// Exact key names currently held
    keys: HashSet<String>,
    /// Pointer target in playfield space
    pointer: Vec2,
    mode: InputMode,
}

impl InputState {
    pub fn new(playfield: Playfield) -> Self {
        let (x, y) = playfield.initial_pointer();
        Self {
            playfield,
            keys: HashSet::new(),
            pointer: Vec2::new(x, y),
            mode: InputMode::Pointer,
        }
    }

    pub fn mode(&self) -> InputMode {
        self.mode
    }

    /// Any key press hands control to the keyboard.
    ///
    /// Returns true when the browser's default action should be prevented.
    pub fn key_down(&mut self, key: &str) -> bool {
        self.keys.insert(key.to_string());
        self.mode = InputMode::Directional;
        is_scroll_key(key)
    }

    pub fn key_up(&mut self, key: &str) {
        self.keys.remove(key);
    }

    /// Mouse or touch moved to a client-space point
    pub fn pointer_move(&mut self, client_x: f32, client_y: f32, rect: ViewRect) {
        if let Some(pos) = self.to_playfield(client_x, client_y, rect) {
            self.pointer = pos;
            self.mode = InputMode::Pointer;
        }
    }

    /// Map client coordinates into playfield units
    pub fn to_playfield(&self, client_x: f32, client_y: f32, rect: ViewRect) -> Option<Vec2> {
        if rect.width <= 0.0 || rect.height <= 0.0 {
            return None;
        }
        Some(Vec2::new(
            (client_x - rect.left) * (self.playfield.width / rect.width),
            (client_y - rect.top) * (self.playfield.height / rect.height),
        ))
    }

    fn held(&self, names: &[&str]) -> bool {
        names.iter().any(|k| self.keys.contains(*k))
    }

    pub fn directions(&self) -> Directions {
        Directions {
            left: self.held(&LEFT_KEYS),
            right: self.held(&RIGHT_KEYS),
            up: self.held(&UP_KEYS),
            down: self.held(&DOWN_KEYS),
        }
    }

    /// Pointer target, if the pointer is in control (drawn as a cursor)
    pub fn pointer(&self) -> Option<Vec2> {
        match self.mode {
            InputMode::Pointer => Some(self.pointer),
            InputMode::Directional => None,
        }
    }

    /// Intent for the next step
    pub fn tick_input(&self) -> TickInput {
        match self.mode {
            InputMode::Pointer => TickInput::pointer(self.pointer),
            InputMode::Directional => TickInput::directional(self.directions()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::MoveIntent;

    fn input() -> InputState {
        InputState::new(Playfield::new(480.0, 720.0))
    }

    #[test]
    fn test_starts_in_pointer_mode() {
        let input = input();
        assert_eq!(input.mode(), InputMode::Pointer);
        assert_eq!(
            input.tick_input(),
            TickInput::pointer(Vec2::new(240.0, 432.0))
        );
    }

    #[test]
    fn test_pointer_maps_css_to_playfield() {
        let mut input = input();
        // Canvas drawn at half size, offset on the page
        let rect = ViewRect {
            left: 100.0,
            top: 50.0,
            width: 240.0,
            height: 360.0,
        };
        input.key_down("d");
        input.pointer_move(160.0, 140.0, rect);
        assert_eq!(input.mode(), InputMode::Pointer);
        assert_eq!(input.pointer(), Some(Vec2::new(120.0, 180.0)));
    }

    #[test]
    fn test_zero_sized_rect_ignored() {
        let mut input = input();
        input.key_down("ArrowUp");
        let rect = ViewRect {
            left: 0.0,
            top: 0.0,
            width: 0.0,
            height: 360.0,
        };
        input.pointer_move(10.0, 10.0, rect);
        assert_eq!(input.mode(), InputMode::Directional);
    }

    #[test]
    fn test_keys_switch_to_directional() {
        let mut input = input();
        assert!(input.key_down("ArrowRight"));
        assert!(!input.key_down("W"));
        assert_eq!(input.mode(), InputMode::Directional);
        assert_eq!(
            input.tick_input().intent,
            MoveIntent::Directional(Directions {
                right: true,
                up: true,
                ..Default::default()
            })
        );
        assert_eq!(input.pointer(), None);

        input.key_up("ArrowRight");
        input.key_up("W");
        assert_eq!(input.directions(), Directions::default());
        // Releasing keys does not hand control back to the pointer
        assert_eq!(input.mode(), InputMode::Directional);
    }

    #[test]
    fn test_key_names_tracked_exactly() {
        let mut input = input();
        input.key_down("a");
        input.key_down("A");
        input.key_up("A");
        // Lowercase still held
        assert!(input.directions().left);
        input.key_up("a");
        assert!(!input.directions().left);
    }

    #[test]
    fn test_any_key_takes_control() {
        let mut input = input();
        assert!(!input.key_down("Shift"));
        assert_eq!(input.mode(), InputMode::Directional);
        assert_eq!(input.directions(), Directions::default());
    }
}
