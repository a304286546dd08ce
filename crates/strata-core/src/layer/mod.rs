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

//! Layers and the layer stack.
//!
//! A [`Layer`] is a self-contained unit of per-frame update/render/event
//! handling logic. Layers are composed into a [`LayerStack`]: regular layers
//! sit at the front in push order, overlays at the back in push order.
//! Update and overlay-render callbacks run front-to-back; event propagation
//! runs back-to-front so the topmost layer sees events first.

mod stack;

pub use self::stack::LayerStack;

use crate::event::Event;

/// A composable unit of engine behavior with lifecycle hooks.
///
/// All hooks have default no-op bodies; a layer overrides only what it needs.
/// The stack guarantees [`on_attach`](Layer::on_attach) runs exactly once
/// when the layer is pushed and [`on_detach`](Layer::on_detach) exactly once
/// when it is popped or the stack is torn down.
pub trait Layer {
    /// A debug name for logging and diagnostics.
    fn name(&self) -> &str {
        "Layer"
    }

    /// Called synchronously when the layer is pushed onto the stack.
    fn on_attach(&mut self) {}

    /// Called when the layer is removed or the stack is torn down.
    fn on_detach(&mut self) {}

    /// Called once per frame, front-to-back across the stack.
    fn on_update(&mut self) {}

    /// Called once per frame, front-to-back, after every layer's
    /// [`on_update`](Layer::on_update), inside the overlay frame bracket.
    fn on_overlay_render(&mut self, _ctx: &egui::Context) {}

    /// Called during event propagation, topmost layer first.
    ///
    /// A layer claims an event by marking it handled (directly or through an
    /// [`EventDispatcher`](crate::event::EventDispatcher)); the stack stops
    /// propagating once it observes the claim.
    fn on_event(&mut self, _event: &mut Event) {}
}
