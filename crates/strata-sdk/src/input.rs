// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The per-frame input snapshot.
//!
//! Domain logic that wants "is W held right now?" should not have to handle
//! discrete events itself. The engine folds every routed event into an
//! [`InputState`] — after layer propagation, as a pure observation that never
//! claims the event — and hands the snapshot to the application's update
//! step.

use std::collections::HashSet;
use strata_core::event::{Event, EventData, MouseButton};

/// Poll-style view of the keyboard and mouse, rebuilt from routed events.
#[derive(Debug, Default)]
pub struct InputState {
    pressed_keys: HashSet<String>,
    pressed_mouse_buttons: HashSet<MouseButton>,
    mouse_position: (f32, f32),
}

impl InputState {
    /// Creates an empty snapshot: nothing pressed, cursor at the origin.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the key with this code (e.g. `"KeyW"`, `"Space"`) is held.
    pub fn is_key_pressed(&self, key_code: &str) -> bool {
        self.pressed_keys.contains(key_code)
    }

    /// Whether the given mouse button is held.
    pub fn is_mouse_button_pressed(&self, button: MouseButton) -> bool {
        self.pressed_mouse_buttons.contains(&button)
    }

    /// The cursor position from the most recent mouse-move event, in
    /// physical pixels.
    pub fn mouse_position(&self) -> (f32, f32) {
        self.mouse_position
    }

    /// Folds one routed event into the snapshot.
    ///
    /// Observation only: handled events update the snapshot too (a release
    /// claimed by an overlay must still clear the held state), and the event
    /// is never marked handled here.
    pub(crate) fn apply(&mut self, event: &Event) {
        match event.data() {
            EventData::KeyPressed { key_code, .. } => {
                self.pressed_keys.insert(key_code.clone());
            }
            EventData::KeyReleased { key_code } => {
                self.pressed_keys.remove(key_code);
            }
            EventData::MouseButtonPressed { button } => {
                self.pressed_mouse_buttons.insert(*button);
            }
            EventData::MouseButtonReleased { button } => {
                self.pressed_mouse_buttons.remove(button);
            }
            EventData::MouseMoved { x, y } => {
                self.mouse_position = (*x, *y);
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key_pressed(code: &str) -> Event {
        Event::new(EventData::KeyPressed {
            key_code: code.to_string(),
            repeat: false,
        })
    }

    #[test]
    fn key_press_and_release_round_trip() {
        let mut input = InputState::new();
        assert!(!input.is_key_pressed("KeyW"));

        input.apply(&key_pressed("KeyW"));
        assert!(input.is_key_pressed("KeyW"));

        input.apply(&Event::new(EventData::KeyReleased {
            key_code: "KeyW".to_string(),
        }));
        assert!(!input.is_key_pressed("KeyW"));
    }

    #[test]
    fn repeated_presses_are_idempotent() {
        let mut input = InputState::new();
        input.apply(&key_pressed("Space"));
        input.apply(&key_pressed("Space"));
        assert!(input.is_key_pressed("Space"));

        input.apply(&Event::new(EventData::KeyReleased {
            key_code: "Space".to_string(),
        }));
        assert!(!input.is_key_pressed("Space"));
    }

    #[test]
    fn mouse_state_tracks_buttons_and_position() {
        let mut input = InputState::new();
        input.apply(&Event::new(EventData::MouseButtonPressed {
            button: MouseButton::Left,
        }));
        input.apply(&Event::new(EventData::MouseMoved { x: 42.0, y: 7.5 }));

        assert!(input.is_mouse_button_pressed(MouseButton::Left));
        assert!(!input.is_mouse_button_pressed(MouseButton::Right));
        assert_eq!(input.mouse_position(), (42.0, 7.5));
    }

    #[test]
    fn handled_events_are_still_observed() {
        let mut input = InputState::new();
        let mut event = key_pressed("KeyA");
        event.mark_handled();
        input.apply(&event);
        assert!(input.is_key_pressed("KeyA"));
    }
}
