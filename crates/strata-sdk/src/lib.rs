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

//! The public-facing SDK for the Strata Engine.
//!
//! An application implements [`Application`], pushes its [`Layer`]s from
//! [`Application::new`], and hands control to [`Engine::run`]. The engine
//! owns the window, the render system, the overlay host, and the layer
//! stack; each frame it clears and draws the scene, updates every layer
//! front-to-back, brackets the overlay pass around the layers'
//! overlay-render hooks, and presents. Native window events are translated
//! into engine events and routed: built-in handlers first (window close
//! stops the loop), then the layer stack back-to-front.
//!
//! There is no global engine instance. Everything a collaborator needs is
//! passed explicitly — [`EngineContext`] at startup, [`UpdateContext`] each
//! frame. Starting a second engine while one is live is a programmer error
//! and fails fast.

use anyhow::Result;
use strata_core::layer::LayerStack;
use strata_core::platform::window::StrataWindow;
use strata_core::renderer::{RenderObject, SceneView};
use winit::event_loop::EventLoop;

pub mod config;
pub mod input;

mod guard;
mod routing;
mod state;

pub use config::{EngineConfig, WindowConfig};
pub use input::InputState;

/// Convenience re-exports for application code.
pub mod prelude {
    pub use strata_core::event::{Event, EventData, EventDispatcher, EventKind, MouseButton};
    pub use strata_core::layer::{Layer, LayerStack};
    pub use strata_core::math::LinearRgba;
    pub use strata_core::renderer::{RenderObject, RenderStats, SceneView, Vertex};
}

/// What an application receives while the engine boots it.
///
/// Handed to [`Application::new`] exactly once, after the window and render
/// system exist and before the first frame. This is where an application
/// pushes its layers.
pub struct EngineContext<'a> {
    /// The engine's window.
    pub window: &'a dyn StrataWindow,
    /// The engine's layer stack, empty at boot.
    pub layers: &'a mut LayerStack,
}

/// Per-frame context for the application's domain update step.
pub struct UpdateContext<'a> {
    /// Snapshot of input state as of the last routed events.
    pub input: &'a InputState,
    /// Seconds elapsed since the previous frame.
    pub delta_seconds: f32,
}

/// The application half of the engine contract.
///
/// The engine drives the reusable per-frame machinery (layers, overlay,
/// presentation); the application supplies the domain content: what the
/// scene contains and how it reacts to input.
pub trait Application: Sized + 'static {
    /// Called once at boot to create the application state. Push layers
    /// through `context.layers` here.
    fn new(context: EngineContext<'_>) -> Self;

    /// Called every frame before rendering for domain logic updates.
    fn update(&mut self, ctx: &mut UpdateContext<'_>);

    /// Called every frame to produce the scene's submissions.
    fn render(&mut self) -> Vec<RenderObject>;

    /// The frame's view parameters (clear color, view-projection).
    fn view(&self) -> SceneView {
        SceneView::default()
    }
}

/// The public entry point for the Strata Engine.
pub struct Engine;

impl Engine {
    /// Runs an application with default configuration.
    ///
    /// Creates the window, initializes the render system and overlay host,
    /// and blocks the current thread on the main loop until the application
    /// is closed.
    ///
    /// # Panics
    /// Fails fast if another engine is already live on this process.
    pub fn run<A: Application>() -> Result<()> {
        Self::run_with_config::<A>(EngineConfig::default())
    }

    /// Runs an application with an explicit [`EngineConfig`].
    pub fn run_with_config<A: Application>(config: EngineConfig) -> Result<()> {
        let _guard = guard::RunGuard::acquire();

        log::info!("Strata Engine SDK: Starting...");
        let event_loop = EventLoop::new()?;

        // The state is empty until the event loop delivers `resumed`.
        let mut engine_state = state::EngineState::<A>::new(config);
        event_loop.run_app(&mut engine_state)?;

        Ok(())
    }
}
