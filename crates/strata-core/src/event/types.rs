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

//! The engine's event value types: kind tags, payloads, and the handled flag.

/// The discriminant of an engine event.
///
/// Every [`EventData`] variant maps to exactly one kind; the kind is fixed at
/// construction and never changes for the lifetime of the event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// The user requested the window be closed.
    WindowClose,
    /// The window's inner area changed size.
    WindowResize,
    /// A keyboard key went down.
    KeyPressed,
    /// A keyboard key went up.
    KeyReleased,
    /// A printable character was produced by the keyboard.
    KeyTyped,
    /// A mouse button went down.
    MouseButtonPressed,
    /// A mouse button went up.
    MouseButtonReleased,
    /// The mouse cursor moved.
    MouseMoved,
    /// The mouse wheel was scrolled.
    MouseScrolled,
}

/// An engine-internal representation of a mouse button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// The left mouse button.
    Left,
    /// The right mouse button.
    Right,
    /// The middle mouse button.
    Middle,
    /// The back mouse button (typically on the side).
    Back,
    /// The forward mouse button (typically on the side).
    Forward,
    /// Another mouse button, identified by a numeric code.
    Other(u16),
}

/// The payload of an engine event, one variant per [`EventKind`].
///
/// This enum is backend-agnostic: the windowing adapter in `strata-infra`
/// translates native events into these variants so the rest of the engine
/// never sees the windowing library's own types.
#[derive(Debug, Clone, PartialEq)]
pub enum EventData {
    /// The user requested the window be closed.
    WindowClose,
    /// The window's inner area changed size.
    WindowResize {
        /// New width in physical pixels.
        width: u32,
        /// New height in physical pixels.
        height: u32,
    },
    /// A keyboard key went down.
    KeyPressed {
        /// A string representation of the physical key code.
        key_code: String,
        /// Whether this press is an OS key repeat.
        repeat: bool,
    },
    /// A keyboard key went up.
    KeyReleased {
        /// A string representation of the physical key code.
        key_code: String,
    },
    /// A printable character was produced by the keyboard.
    KeyTyped {
        /// The character that was typed.
        character: char,
    },
    /// A mouse button went down.
    MouseButtonPressed {
        /// The mouse button that was pressed.
        button: MouseButton,
    },
    /// A mouse button went up.
    MouseButtonReleased {
        /// The mouse button that was released.
        button: MouseButton,
    },
    /// The mouse cursor moved.
    MouseMoved {
        /// The new x-coordinate of the cursor.
        x: f32,
        /// The new y-coordinate of the cursor.
        y: f32,
    },
    /// The mouse wheel was scrolled.
    MouseScrolled {
        /// The horizontal scroll delta.
        delta_x: f32,
        /// The vertical scroll delta.
        delta_y: f32,
    },
}

impl EventData {
    /// Returns the kind tag for this payload.
    pub fn kind(&self) -> EventKind {
        match self {
            EventData::WindowClose => EventKind::WindowClose,
            EventData::WindowResize { .. } => EventKind::WindowResize,
            EventData::KeyPressed { .. } => EventKind::KeyPressed,
            EventData::KeyReleased { .. } => EventKind::KeyReleased,
            EventData::KeyTyped { .. } => EventKind::KeyTyped,
            EventData::MouseButtonPressed { .. } => EventKind::MouseButtonPressed,
            EventData::MouseButtonReleased { .. } => EventKind::MouseButtonReleased,
            EventData::MouseMoved { .. } => EventKind::MouseMoved,
            EventData::MouseScrolled { .. } => EventKind::MouseScrolled,
        }
    }
}

/// A single occurrence flowing through the dispatch pipeline.
///
/// The payload is immutable once constructed; the only mutable state is the
/// `handled` flag, which a handler sets (through [`EventDispatcher`] or
/// [`Event::mark_handled`]) to signal that propagation should stop.
#[derive(Debug)]
pub struct Event {
    data: EventData,
    handled: bool,
}

impl Event {
    /// Wraps a payload into an unhandled event.
    pub fn new(data: EventData) -> Self {
        Self {
            data,
            handled: false,
        }
    }

    /// Returns the kind tag of this event.
    pub fn kind(&self) -> EventKind {
        self.data.kind()
    }

    /// Borrows the payload.
    pub fn data(&self) -> &EventData {
        &self.data
    }

    /// Returns whether a handler has claimed this event.
    pub fn is_handled(&self) -> bool {
        self.handled
    }

    /// Marks this event as claimed. Irreversible for the event's lifetime.
    pub fn mark_handled(&mut self) {
        self.handled = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_maps_to_matching_kind() {
        assert_eq!(EventData::WindowClose.kind(), EventKind::WindowClose);
        assert_eq!(
            EventData::WindowResize {
                width: 800,
                height: 600
            }
            .kind(),
            EventKind::WindowResize
        );
        assert_eq!(
            EventData::KeyPressed {
                key_code: "KeyW".to_string(),
                repeat: false
            }
            .kind(),
            EventKind::KeyPressed
        );
        assert_eq!(
            EventData::KeyTyped { character: 'w' }.kind(),
            EventKind::KeyTyped
        );
        assert_eq!(
            EventData::MouseButtonPressed {
                button: MouseButton::Left
            }
            .kind(),
            EventKind::MouseButtonPressed
        );
        assert_eq!(
            EventData::MouseScrolled {
                delta_x: 0.0,
                delta_y: 1.0
            }
            .kind(),
            EventKind::MouseScrolled
        );
    }

    #[test]
    fn new_event_starts_unhandled() {
        let event = Event::new(EventData::WindowClose);
        assert!(!event.is_handled());
    }

    #[test]
    fn mark_handled_is_sticky() {
        let mut event = Event::new(EventData::MouseMoved { x: 1.0, y: 2.0 });
        event.mark_handled();
        assert!(event.is_handled());
        // There is no way back to unhandled.
        event.mark_handled();
        assert!(event.is_handled());
    }
}
