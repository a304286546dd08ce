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

//! Engine-level event routing.
//!
//! One routed event passes two stations in order: the engine's built-in
//! handlers (via [`EventDispatcher`]), then the layer stack back-to-front.
//! Kept free of windowing types so the routing contract is testable without
//! a window.

use strata_core::event::{Event, EventData, EventDispatcher, EventKind};
use strata_core::layer::LayerStack;

/// Routes one event through the built-in handlers and then the layer stack.
///
/// Built-ins: window close claims the event and requests a stop; window
/// resize invokes `on_resize` but leaves the event unclaimed so layers can
/// still react to the new size.
///
/// The event then propagates through `layers` back-to-front, stopping once
/// claimed. A close event is already claimed when propagation starts, so it
/// reaches exactly the topmost layer (which may inspect it) and nothing
/// below — see `LayerStack::dispatch_event` for why the loop is shaped that
/// way.
///
/// Returns whether the engine should stop.
pub(crate) fn route_event(
    event: &mut Event,
    layers: &mut LayerStack,
    on_resize: &mut dyn FnMut(u32, u32),
) -> bool {
    let mut stop = false;
    {
        let mut dispatcher = EventDispatcher::new(event);
        dispatcher.dispatch(EventKind::WindowClose, |_| {
            stop = true;
            true
        });
        dispatcher.dispatch(EventKind::WindowResize, |data| {
            if let EventData::WindowResize { width, height } = *data {
                on_resize(width, height);
            }
            false
        });
    }

    layers.dispatch_event(event);
    stop
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_core::layer::Layer;
    use std::cell::RefCell;
    use std::rc::Rc;

    type Journal = Rc<RefCell<Vec<&'static str>>>;

    struct Probe {
        name: &'static str,
        journal: Journal,
    }

    impl Probe {
        fn boxed(name: &'static str, journal: &Journal) -> Box<dyn Layer> {
            Box::new(Self {
                name,
                journal: journal.clone(),
            })
        }
    }

    impl Layer for Probe {
        fn name(&self) -> &str {
            self.name
        }

        fn on_event(&mut self, _event: &mut Event) {
            self.journal.borrow_mut().push(self.name);
        }
    }

    #[test]
    fn window_close_stops_the_engine_exactly_once() {
        let journal: Journal = Rc::new(RefCell::new(Vec::new()));
        let mut layers = LayerStack::new();
        layers.push_layer(Probe::boxed("bottom", &journal));
        layers.push_overlay(Probe::boxed("top", &journal));

        let mut event = Event::new(EventData::WindowClose);
        let stop = route_event(&mut event, &mut layers, &mut |_, _| {});

        assert!(stop);
        assert!(event.is_handled());
        // The built-in handler claims the close before propagation, so only
        // the topmost layer observes it. Latent source behavior, preserved.
        assert_eq!(*journal.borrow(), vec!["top"]);
    }

    #[test]
    fn resize_reaches_the_backend_and_every_layer() {
        let journal: Journal = Rc::new(RefCell::new(Vec::new()));
        let mut layers = LayerStack::new();
        layers.push_layer(Probe::boxed("bottom", &journal));
        layers.push_overlay(Probe::boxed("top", &journal));

        let mut resized_to = None;
        let mut event = Event::new(EventData::WindowResize {
            width: 640,
            height: 480,
        });
        let stop = route_event(&mut event, &mut layers, &mut |w, h| {
            resized_to = Some((w, h));
        });

        assert!(!stop);
        assert_eq!(resized_to, Some((640, 480)));
        // Resize is not claimed by the built-in handler; everyone sees it.
        assert!(!event.is_handled());
        assert_eq!(*journal.borrow(), vec!["top", "bottom"]);
    }

    #[test]
    fn ordinary_events_only_visit_the_stack() {
        let journal: Journal = Rc::new(RefCell::new(Vec::new()));
        let mut layers = LayerStack::new();
        layers.push_layer(Probe::boxed("bottom", &journal));

        let mut resize_called = false;
        let mut event = Event::new(EventData::KeyPressed {
            key_code: "KeyQ".to_string(),
            repeat: false,
        });
        let stop = route_event(&mut event, &mut layers, &mut |_, _| {
            resize_called = true;
        });

        assert!(!stop);
        assert!(!resize_called);
        assert_eq!(*journal.borrow(), vec!["bottom"]);
    }
}
