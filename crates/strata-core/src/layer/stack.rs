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

//! The ordered, double-ended container of layers.

use super::Layer;
use crate::event::Event;

/// An ordered stack of owned layers, partitioned into regular layers and
/// overlays.
///
/// All layers live in one `Vec`; `overlay_boundary` is the index of the first
/// overlay. Regular layers are always positioned before overlays in iteration
/// order: pushing a regular layer inserts at the boundary (advancing it),
/// pushing an overlay appends at the end.
///
/// The stack owns every layer it holds and is responsible for detaching them
/// on removal and at teardown.
pub struct LayerStack {
    layers: Vec<Box<dyn Layer>>,
    overlay_boundary: usize,
}

impl LayerStack {
    /// Creates an empty stack.
    pub fn new() -> Self {
        Self {
            layers: Vec::new(),
            overlay_boundary: 0,
        }
    }

    /// Pushes a regular layer at the overlay boundary.
    ///
    /// The layer lands after every existing regular layer and before every
    /// overlay. Its [`Layer::on_attach`] hook runs before this returns.
    pub fn push_layer(&mut self, layer: Box<dyn Layer>) {
        let index = self.overlay_boundary;
        self.layers.insert(index, layer);
        self.overlay_boundary += 1;
        log::trace!("Layer \"{}\" attached at index {index}.", self.layers[index].name());
        self.layers[index].on_attach();
    }

    /// Pushes an overlay at the very end of the stack.
    ///
    /// Overlays render after all regular layers and receive events before
    /// them. [`Layer::on_attach`] runs before this returns.
    pub fn push_overlay(&mut self, layer: Box<dyn Layer>) {
        self.layers.push(layer);
        let index = self.layers.len() - 1;
        log::trace!("Overlay \"{}\" attached at index {index}.", self.layers[index].name());
        self.layers[index].on_attach();
    }

    /// Removes and returns the most recently pushed regular layer.
    ///
    /// [`Layer::on_detach`] runs before the layer is handed back.
    pub fn pop_layer(&mut self) -> Option<Box<dyn Layer>> {
        if self.overlay_boundary == 0 {
            return None;
        }
        self.overlay_boundary -= 1;
        let mut layer = self.layers.remove(self.overlay_boundary);
        layer.on_detach();
        Some(layer)
    }

    /// Removes and returns the most recently pushed overlay.
    ///
    /// [`Layer::on_detach`] runs before the layer is handed back.
    pub fn pop_overlay(&mut self) -> Option<Box<dyn Layer>> {
        if self.layers.len() == self.overlay_boundary {
            return None;
        }
        let mut layer = self.layers.pop()?;
        layer.on_detach();
        Some(layer)
    }

    /// Total number of layers, overlays included.
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Whether the stack holds no layers at all.
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Front-to-back iteration: regular layers in push order, then overlays
    /// in push order. This is the order of per-frame update and
    /// overlay-render callbacks.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &dyn Layer> {
        self.layers.iter().map(|layer| layer.as_ref())
    }

    /// Mutable front-to-back iteration; `.rev()` yields the back-to-front
    /// order used for event propagation.
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Box<dyn Layer>> {
        self.layers.iter_mut()
    }

    /// Propagates one event back-to-front: overlays in reverse push order,
    /// then regular layers in reverse push order, so the topmost layer sees
    /// the event first.
    ///
    /// Propagation stops once a layer's claim is observed: each layer's
    /// [`Layer::on_event`] runs, then the handled flag is checked. The check
    /// deliberately happens *after* the call, so an event that arrives
    /// already handled still reaches the topmost layer exactly once before
    /// the loop breaks. Layers may inspect such an event but should not act
    /// on it.
    pub fn dispatch_event(&mut self, event: &mut Event) {
        for layer in self.layers.iter_mut().rev() {
            layer.on_event(event);
            if event.is_handled() {
                break;
            }
        }
    }
}

impl Default for LayerStack {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for LayerStack {
    /// Tears the stack down, detaching every remaining layer back-to-front.
    fn drop(&mut self) {
        for layer in self.layers.iter_mut().rev() {
            log::trace!("Layer \"{}\" detached at teardown.", layer.name());
            layer.on_detach();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{Event, EventData, EventDispatcher, EventKind};
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Shared journal the probe layers append to, so tests can assert on
    /// hook ordering across the whole stack.
    type Journal = Rc<RefCell<Vec<String>>>;

    struct Probe {
        name: &'static str,
        journal: Journal,
        claims_events: bool,
    }

    impl Probe {
        fn boxed(name: &'static str, journal: &Journal) -> Box<dyn Layer> {
            Box::new(Self {
                name,
                journal: journal.clone(),
                claims_events: false,
            })
        }

        fn claiming(name: &'static str, journal: &Journal) -> Box<dyn Layer> {
            Box::new(Self {
                name,
                journal: journal.clone(),
                claims_events: true,
            })
        }

        fn record(&self, hook: &str) {
            self.journal.borrow_mut().push(format!("{}:{}", self.name, hook));
        }
    }

    impl Layer for Probe {
        fn name(&self) -> &str {
            self.name
        }

        fn on_attach(&mut self) {
            self.record("attach");
        }

        fn on_detach(&mut self) {
            self.record("detach");
        }

        fn on_update(&mut self) {
            self.record("update");
        }

        fn on_event(&mut self, event: &mut Event) {
            self.record("event");
            if self.claims_events {
                let mut dispatcher = EventDispatcher::new(event);
                dispatcher.dispatch(EventKind::KeyPressed, |_| true);
                dispatcher.dispatch(EventKind::WindowClose, |_| true);
            }
        }
    }

    fn names(stack: &LayerStack) -> Vec<&str> {
        stack.iter().map(|layer| layer.name()).collect()
    }

    #[test]
    fn regular_layers_stay_in_front_of_overlays() {
        let journal: Journal = Rc::new(RefCell::new(Vec::new()));
        let mut stack = LayerStack::new();
        stack.push_layer(Probe::boxed("A", &journal));
        stack.push_overlay(Probe::boxed("B", &journal));
        stack.push_layer(Probe::boxed("C", &journal));

        assert_eq!(names(&stack), vec!["A", "C", "B"]);

        let reversed: Vec<&str> = stack.iter().rev().map(|layer| layer.name()).collect();
        assert_eq!(reversed, vec!["B", "C", "A"]);
    }

    #[test]
    fn push_order_is_preserved_within_each_region() {
        let journal: Journal = Rc::new(RefCell::new(Vec::new()));
        let mut stack = LayerStack::new();
        stack.push_layer(Probe::boxed("L1", &journal));
        stack.push_layer(Probe::boxed("L2", &journal));
        stack.push_overlay(Probe::boxed("O1", &journal));
        stack.push_overlay(Probe::boxed("O2", &journal));
        stack.push_layer(Probe::boxed("L3", &journal));

        assert_eq!(names(&stack), vec!["L1", "L2", "L3", "O1", "O2"]);
    }

    #[test]
    fn attach_runs_exactly_once_per_push() {
        let journal: Journal = Rc::new(RefCell::new(Vec::new()));
        let mut stack = LayerStack::new();
        stack.push_layer(Probe::boxed("A", &journal));
        stack.push_overlay(Probe::boxed("B", &journal));

        assert_eq!(*journal.borrow(), vec!["A:attach", "B:attach"]);
    }

    #[test]
    fn pop_detaches_the_most_recent_layer_of_the_region() {
        let journal: Journal = Rc::new(RefCell::new(Vec::new()));
        let mut stack = LayerStack::new();
        stack.push_layer(Probe::boxed("A", &journal));
        stack.push_layer(Probe::boxed("B", &journal));
        stack.push_overlay(Probe::boxed("O", &journal));

        let popped = stack.pop_layer().expect("a regular layer to pop");
        assert_eq!(popped.name(), "B");
        assert_eq!(names(&stack), vec!["A", "O"]);

        let popped = stack.pop_overlay().expect("an overlay to pop");
        assert_eq!(popped.name(), "O");

        assert!(journal.borrow().contains(&"B:detach".to_string()));
        assert!(journal.borrow().contains(&"O:detach".to_string()));
    }

    #[test]
    fn pop_on_empty_region_is_a_noop() {
        let journal: Journal = Rc::new(RefCell::new(Vec::new()));
        let mut stack = LayerStack::new();
        stack.push_overlay(Probe::boxed("O", &journal));

        assert!(stack.pop_layer().is_none());
        assert_eq!(stack.len(), 1);

        let mut stack = LayerStack::new();
        stack.push_layer(Probe::boxed("A", &journal));
        assert!(stack.pop_overlay().is_none());
        assert_eq!(stack.len(), 1);
    }

    #[test]
    fn teardown_detaches_every_layer_exactly_once() {
        let journal: Journal = Rc::new(RefCell::new(Vec::new()));
        {
            let mut stack = LayerStack::new();
            stack.push_layer(Probe::boxed("A", &journal));
            stack.push_overlay(Probe::boxed("B", &journal));
        }
        let detaches: Vec<String> = journal
            .borrow()
            .iter()
            .filter(|entry| entry.ends_with(":detach"))
            .cloned()
            .collect();
        assert_eq!(detaches, vec!["B:detach", "A:detach"]);
    }

    #[test]
    fn propagation_stops_at_the_first_claiming_layer() {
        // L1 (bottom), L2 (claims), L3 (top overlay): any event visits L3
        // then L2 and never reaches L1.
        let journal: Journal = Rc::new(RefCell::new(Vec::new()));
        let mut stack = LayerStack::new();
        stack.push_layer(Probe::boxed("L1", &journal));
        stack.push_layer(Probe::claiming("L2", &journal));
        stack.push_overlay(Probe::boxed("L3", &journal));
        journal.borrow_mut().clear();

        let mut event = Event::new(EventData::KeyPressed {
            key_code: "Space".to_string(),
            repeat: false,
        });
        stack.dispatch_event(&mut event);

        assert!(event.is_handled());
        assert_eq!(*journal.borrow(), vec!["L3:event", "L2:event"]);
    }

    #[test]
    fn unclaimed_event_visits_every_layer_back_to_front() {
        let journal: Journal = Rc::new(RefCell::new(Vec::new()));
        let mut stack = LayerStack::new();
        stack.push_layer(Probe::boxed("L1", &journal));
        stack.push_layer(Probe::boxed("L2", &journal));
        stack.push_overlay(Probe::boxed("L3", &journal));
        journal.borrow_mut().clear();

        let mut event = Event::new(EventData::MouseMoved { x: 10.0, y: 20.0 });
        stack.dispatch_event(&mut event);

        assert!(!event.is_handled());
        assert_eq!(*journal.borrow(), vec!["L3:event", "L2:event", "L1:event"]);
    }

    #[test]
    fn pre_handled_event_still_reaches_only_the_topmost_layer() {
        // The handled check runs after each on_event call, so an event that
        // arrives already claimed (e.g. by a built-in engine handler) is
        // observed by the topmost layer exactly once and by nothing below.
        // Known, deliberate behavior; tests document it rather than "fix" it.
        let journal: Journal = Rc::new(RefCell::new(Vec::new()));
        let mut stack = LayerStack::new();
        stack.push_layer(Probe::boxed("L1", &journal));
        stack.push_overlay(Probe::boxed("L2", &journal));
        journal.borrow_mut().clear();

        let mut event = Event::new(EventData::WindowClose);
        event.mark_handled();
        stack.dispatch_event(&mut event);

        assert_eq!(*journal.borrow(), vec!["L2:event"]);
    }
}
