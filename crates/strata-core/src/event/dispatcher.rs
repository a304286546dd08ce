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

//! The single-dispatch event router.

use super::{Event, EventData, EventKind};

/// Routes one event to handlers keyed by [`EventKind`].
///
/// A dispatcher borrows its event mutably for the duration of a dispatch
/// pass. Each [`dispatch`](EventDispatcher::dispatch) call names one kind and
/// one handler; the handler runs only when the event's kind matches exactly.
/// Since an event's kind is fixed at construction, at most one `dispatch`
/// call per pass can match a given event.
///
/// ```
/// use strata_core::event::{Event, EventData, EventDispatcher, EventKind};
///
/// let mut event = Event::new(EventData::WindowClose);
/// let mut dispatcher = EventDispatcher::new(&mut event);
/// dispatcher.dispatch(EventKind::WindowClose, |_| true);
/// assert!(event.is_handled());
/// ```
pub struct EventDispatcher<'a> {
    event: &'a mut Event,
}

impl<'a> EventDispatcher<'a> {
    /// Creates a dispatcher over one event.
    pub fn new(event: &'a mut Event) -> Self {
        Self { event }
    }

    /// Invokes `handler` iff the event's kind equals `kind`.
    ///
    /// The handler receives the event's payload and returns whether it has
    /// fully processed the event; a `true` return marks the event handled.
    /// A kind mismatch is a silent no-op.
    ///
    /// Returns `true` when the handler was invoked.
    pub fn dispatch<F>(&mut self, kind: EventKind, handler: F) -> bool
    where
        F: FnOnce(&EventData) -> bool,
    {
        if self.event.kind() != kind {
            return false;
        }
        if handler(self.event.data()) {
            self.event.mark_handled();
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::MouseButton;

    #[test]
    fn handler_runs_only_on_exact_kind_match() {
        let mut event = Event::new(EventData::KeyPressed {
            key_code: "Escape".to_string(),
            repeat: false,
        });
        let mut dispatcher = EventDispatcher::new(&mut event);

        let mut visited = Vec::new();
        dispatcher.dispatch(EventKind::WindowClose, |_| {
            visited.push("close");
            true
        });
        dispatcher.dispatch(EventKind::KeyReleased, |_| {
            visited.push("released");
            true
        });
        let invoked = dispatcher.dispatch(EventKind::KeyPressed, |data| {
            visited.push("pressed");
            assert!(matches!(
                data,
                EventData::KeyPressed { key_code, .. } if key_code == "Escape"
            ));
            false
        });

        assert!(invoked);
        assert_eq!(visited, vec!["pressed"]);
    }

    #[test]
    fn handled_set_iff_handler_returns_true() {
        let mut event = Event::new(EventData::MouseButtonPressed {
            button: MouseButton::Left,
        });
        {
            let mut dispatcher = EventDispatcher::new(&mut event);
            dispatcher.dispatch(EventKind::MouseButtonPressed, |_| false);
        }
        assert!(!event.is_handled());

        {
            let mut dispatcher = EventDispatcher::new(&mut event);
            dispatcher.dispatch(EventKind::MouseButtonPressed, |_| true);
        }
        assert!(event.is_handled());
    }

    #[test]
    fn mismatched_kind_leaves_event_untouched() {
        let mut event = Event::new(EventData::MouseMoved { x: 3.0, y: 4.0 });
        {
            let mut dispatcher = EventDispatcher::new(&mut event);
            let invoked = dispatcher.dispatch(EventKind::WindowResize, |_| true);
            assert!(!invoked);
        }
        assert!(!event.is_handled());
    }

    #[test]
    fn dispatch_does_not_gate_on_prior_handled_state() {
        // The dispatcher matches on kind alone; an already-claimed event is
        // still offered to a matching handler, which may inspect it.
        let mut event = Event::new(EventData::WindowClose);
        event.mark_handled();

        let mut dispatcher = EventDispatcher::new(&mut event);
        let invoked = dispatcher.dispatch(EventKind::WindowClose, |_| false);
        assert!(invoked);
    }

    #[test]
    fn independent_dispatch_calls_against_one_event() {
        // Exactly zero or one of a set of kind-distinct dispatch calls can
        // match, since the kind is fixed at construction.
        let mut event = Event::new(EventData::WindowResize {
            width: 1280,
            height: 720,
        });
        let mut dispatcher = EventDispatcher::new(&mut event);

        let mut matches = 0;
        for kind in [
            EventKind::WindowClose,
            EventKind::WindowResize,
            EventKind::KeyPressed,
            EventKind::MouseMoved,
        ] {
            if dispatcher.dispatch(kind, |_| false) {
                matches += 1;
            }
        }
        assert_eq!(matches, 1);
    }
}
