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

//! Translation from the concrete windowing backend (`winit`) to the engine's
//! events.
//!
//! This module is the sole producer of [`Event`] values: it adapts raw
//! `winit` window events into the engine's backend-agnostic tagged events,
//! decoupling the dispatch pipeline from the windowing library's own types.

use strata_core::event::{Event, EventData, MouseButton};
use winit::event::{ElementState, MouseButton as WinitMouseButton, MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Translates one `winit::event::WindowEvent` into engine events.
///
/// Most window events map to zero or one engine event; a key press whose
/// `text` carries printable characters additionally yields one `KeyTyped`
/// event per character, matching how native char callbacks behave. Events
/// with no engine meaning (focus changes, theme changes, ...) yield nothing.
pub fn translate_window_event(event: &WindowEvent) -> Vec<Event> {
    let mut out = Vec::new();
    match event {
        WindowEvent::CloseRequested => {
            out.push(Event::new(EventData::WindowClose));
        }
        WindowEvent::Resized(size) => {
            out.push(Event::new(EventData::WindowResize {
                width: size.width,
                height: size.height,
            }));
        }
        WindowEvent::KeyboardInput {
            event: key_event, ..
        } => {
            if let PhysicalKey::Code(keycode) = key_event.physical_key {
                let key_code_str = map_keycode_to_string(keycode);
                match key_event.state {
                    ElementState::Pressed => {
                        out.push(Event::new(EventData::KeyPressed {
                            key_code: key_code_str,
                            repeat: key_event.repeat,
                        }));
                        if let Some(text) = key_event.text.as_ref() {
                            for character in text.chars().filter(|c| !c.is_control()) {
                                out.push(Event::new(EventData::KeyTyped { character }));
                            }
                        }
                    }
                    ElementState::Released => {
                        out.push(Event::new(EventData::KeyReleased {
                            key_code: key_code_str,
                        }));
                    }
                }
            }
        }
        WindowEvent::CursorMoved { position, .. } => {
            out.push(Event::new(EventData::MouseMoved {
                x: position.x as f32,
                y: position.y as f32,
            }));
        }
        WindowEvent::MouseInput { state, button, .. } => {
            let engine_button = map_mouse_button(*button);
            out.push(Event::new(match state {
                ElementState::Pressed => EventData::MouseButtonPressed {
                    button: engine_button,
                },
                ElementState::Released => EventData::MouseButtonReleased {
                    button: engine_button,
                },
            }));
        }
        WindowEvent::MouseWheel { delta, .. } => {
            let (dx, dy): (f32, f32) = match delta {
                MouseScrollDelta::LineDelta(x, y) => (*x, *y),
                MouseScrollDelta::PixelDelta(pos) => (pos.x as f32, pos.y as f32),
            };
            if dx != 0.0 || dy != 0.0 {
                out.push(Event::new(EventData::MouseScrolled {
                    delta_x: dx,
                    delta_y: dy,
                }));
            }
        }
        _ => {}
    }
    out
}

// --- Private Helper Functions ---

/// (Internal) Maps a `winit::keyboard::KeyCode` to a string representation.
fn map_keycode_to_string(keycode: KeyCode) -> String {
    format!("{keycode:?}")
}

/// (Internal) Maps a `winit::event::MouseButton` to the engine's
/// `MouseButton` enum.
fn map_mouse_button(button: WinitMouseButton) -> MouseButton {
    match button {
        WinitMouseButton::Left => MouseButton::Left,
        WinitMouseButton::Right => MouseButton::Right,
        WinitMouseButton::Middle => MouseButton::Middle,
        WinitMouseButton::Back => MouseButton::Back,
        WinitMouseButton::Forward => MouseButton::Forward,
        WinitMouseButton::Other(id) => MouseButton::Other(id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_core::event::EventKind;
    use winit::dpi::{PhysicalPosition, PhysicalSize};

    #[test]
    fn test_map_keycode_simple() {
        assert_eq!(map_keycode_to_string(KeyCode::KeyA), "KeyA");
        assert_eq!(map_keycode_to_string(KeyCode::Digit1), "Digit1");
        assert_eq!(map_keycode_to_string(KeyCode::Space), "Space");
    }

    #[test]
    fn test_map_mouse_button_standard() {
        assert_eq!(map_mouse_button(WinitMouseButton::Left), MouseButton::Left);
        assert_eq!(
            map_mouse_button(WinitMouseButton::Right),
            MouseButton::Right
        );
        assert_eq!(
            map_mouse_button(WinitMouseButton::Middle),
            MouseButton::Middle
        );
        assert_eq!(map_mouse_button(WinitMouseButton::Back), MouseButton::Back);
        assert_eq!(
            map_mouse_button(WinitMouseButton::Forward),
            MouseButton::Forward
        );
    }

    #[test]
    fn test_map_mouse_button_other() {
        assert_eq!(
            map_mouse_button(WinitMouseButton::Other(8)),
            MouseButton::Other(8)
        );
    }

    #[test]
    fn test_translate_close_requested() {
        let events = translate_window_event(&WindowEvent::CloseRequested);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind(), EventKind::WindowClose);
    }

    #[test]
    fn test_translate_resized() {
        let events =
            translate_window_event(&WindowEvent::Resized(PhysicalSize::new(1920, 1080)));
        assert_eq!(events.len(), 1);
        assert_eq!(
            *events[0].data(),
            EventData::WindowResize {
                width: 1920,
                height: 1080
            }
        );
    }

    #[test]
    fn test_translate_mouse_button_pressed() {
        let winit_event = WindowEvent::MouseInput {
            device_id: winit::event::DeviceId::dummy(),
            state: ElementState::Pressed,
            button: WinitMouseButton::Left,
        };
        let events = translate_window_event(&winit_event);
        assert_eq!(events.len(), 1);
        assert_eq!(
            *events[0].data(),
            EventData::MouseButtonPressed {
                button: MouseButton::Left
            }
        );
    }

    #[test]
    fn test_translate_mouse_button_released() {
        let winit_event = WindowEvent::MouseInput {
            device_id: winit::event::DeviceId::dummy(),
            state: ElementState::Released,
            button: WinitMouseButton::Right,
        };
        let events = translate_window_event(&winit_event);
        assert_eq!(
            *events[0].data(),
            EventData::MouseButtonReleased {
                button: MouseButton::Right
            }
        );
    }

    #[test]
    fn test_translate_cursor_moved() {
        let winit_event = WindowEvent::CursorMoved {
            device_id: winit::event::DeviceId::dummy(),
            position: PhysicalPosition::new(100.5, 200.75),
        };
        let events = translate_window_event(&winit_event);
        assert_eq!(
            *events[0].data(),
            EventData::MouseMoved {
                x: 100.5,
                y: 200.75
            }
        );
    }

    #[test]
    fn test_translate_mouse_wheel_line() {
        let winit_event = WindowEvent::MouseWheel {
            device_id: winit::event::DeviceId::dummy(),
            delta: MouseScrollDelta::LineDelta(-1.0, 2.0),
            phase: winit::event::TouchPhase::Moved,
        };
        let events = translate_window_event(&winit_event);
        assert_eq!(
            *events[0].data(),
            EventData::MouseScrolled {
                delta_x: -1.0,
                delta_y: 2.0
            }
        );
    }

    #[test]
    fn test_translate_mouse_wheel_zero_delta_dropped() {
        let winit_event = WindowEvent::MouseWheel {
            device_id: winit::event::DeviceId::dummy(),
            delta: MouseScrollDelta::LineDelta(0.0, 0.0),
            phase: winit::event::TouchPhase::Moved,
        };
        assert!(translate_window_event(&winit_event).is_empty());
    }

    #[test]
    fn test_translate_non_input_returns_nothing() {
        let winit_event_focus = WindowEvent::Focused(true);
        assert!(translate_window_event(&winit_event_focus).is_empty());
    }
}
