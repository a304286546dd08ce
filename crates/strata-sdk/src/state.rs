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

//! The running engine: owns the window, render system, overlay host, and
//! layer stack, and drives the per-frame sequence from the winit event loop.

use crate::config::EngineConfig;
use crate::input::InputState;
use crate::routing::route_event;
use crate::{Application, EngineContext, UpdateContext};
use std::time::Instant;
use strata_core::event::{Event, EventKind};
use strata_core::layer::LayerStack;
use strata_core::platform::window::StrataWindow;
use strata_core::renderer::RenderSystem;
use strata_infra::platform::input::translate_window_event;
use strata_infra::{EguiOverlay, WgpuRenderSystem, WinitWindow, WinitWindowBuilder};
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::ActiveEventLoop;
use winit::window::WindowId;

/// The internal state of the running engine, managed by the winit event
/// loop. Holds the user's application state (`app: A`).
pub(crate) struct EngineState<A: Application> {
    config: EngineConfig,
    app: Option<A>,
    window: Option<WinitWindow>,
    renderer: Option<Box<dyn RenderSystem>>,
    overlay: Option<EguiOverlay>,
    layers: LayerStack,
    input: InputState,
    running: bool,
    last_frame: Option<Instant>,
}

impl<A: Application> EngineState<A> {
    pub(crate) fn new(config: EngineConfig) -> Self {
        Self {
            config,
            app: None,
            window: None,
            renderer: None,
            overlay: None,
            layers: LayerStack::new(),
            input: InputState::new(),
            running: false,
            last_frame: None,
        }
    }

    /// Routes one engine event: built-in handlers, then the layer stack,
    /// then the input snapshot. Stops the loop on a handled window close.
    fn route(&mut self, mut event: Event, event_loop: &ActiveEventLoop) {
        let renderer = &mut self.renderer;
        let stop = route_event(&mut event, &mut self.layers, &mut |width, height| {
            if let Some(renderer) = renderer.as_mut() {
                renderer.resize(width, height);
            }
        });

        self.input.apply(&event);

        if stop && self.running {
            self.running = false;
            log::info!("Window close handled; stopping engine loop.");
            event_loop.exit();
        }
    }

    /// Runs one frame's worth of work: scene pass, layer updates, overlay
    /// bracket, present. A failed step logs and abandons the frame; the next
    /// frame follows.
    fn frame(&mut self) {
        if !self.running {
            return;
        }
        let (Some(app), Some(renderer), Some(overlay), Some(window)) = (
            self.app.as_mut(),
            self.renderer.as_mut(),
            self.overlay.as_mut(),
            self.window.as_ref(),
        ) else {
            return;
        };

        // 1. Backend error query: drained and logged, never fatal.
        renderer.poll_errors();

        // 2. Scene pass: clear, domain update, submissions.
        let view = app.view();
        if let Err(e) = renderer.begin_scene(&view) {
            log::error!("Frame skipped: {e}");
            return;
        }

        let now = Instant::now();
        let delta_seconds = self
            .last_frame
            .map(|t| (now - t).as_secs_f32())
            .unwrap_or(1.0 / 60.0);
        self.last_frame = Some(now);

        app.update(&mut UpdateContext {
            input: &self.input,
            delta_seconds,
        });
        for object in app.render() {
            renderer.submit(object);
        }
        if let Err(e) = renderer.end_scene() {
            log::error!("Scene pass failed: {e}");
            return;
        }

        // 3. Layer updates, front-to-back.
        for layer in self.layers.iter_mut() {
            layer.on_update();
        }

        // 4. Overlay bracket: the frame guard pairs begin/end even if a
        //    layer's render hook unwinds.
        let overlay_frame = overlay.begin_frame(window.raw());
        for layer in self.layers.iter_mut() {
            layer.on_overlay_render(overlay_frame.context());
        }
        let paint = overlay_frame.finish();
        if let Err(e) = renderer.render_overlay(paint) {
            log::error!("Overlay pass failed: {e}");
        }

        // 5. Present; winit pumps native events between frames.
        match renderer.present() {
            Ok(stats) => log::trace!("Frame {} rendered.", stats.frame_number),
            Err(e) => log::error!("Present failed: {e}"),
        }
    }
}

impl<A: Application> ApplicationHandler for EngineState<A> {
    /// Called when the event loop is ready to start processing events.
    /// This is the place to initialize everything that requires a window.
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return; // Avoid re-initializing if the app is resumed multiple times.
        }

        log::info!("Application resumed. Initializing window and engine systems...");

        let window = WinitWindowBuilder::new()
            .with_title(self.config.window.title.clone())
            .with_dimensions(self.config.window.width, self.config.window.height)
            .build(event_loop)
            .unwrap();

        let mut renderer: Box<dyn RenderSystem> = Box::new(WgpuRenderSystem::new());
        renderer.init(&window).unwrap();

        let overlay = EguiOverlay::new(window.raw());

        // Boot the application last so it can see the window and push layers.
        self.app = Some(A::new(EngineContext {
            window: &window,
            layers: &mut self.layers,
        }));

        self.window = Some(window);
        self.renderer = Some(renderer);
        self.overlay = Some(overlay);
        self.running = true;
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, id: WindowId, event: WindowEvent) {
        let Some(window) = self.window.as_ref() else {
            return;
        };

        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        id.hash(&mut hasher);
        if window.id() != hasher.finish() {
            return;
        }

        // The overlay sees every native event first so it can keep its own
        // input state; events it consumes (e.g. typing into a focused text
        // field) are withheld from the layer stack.
        let consumed = match self.overlay.as_mut() {
            Some(overlay) => overlay.on_window_event(window.raw(), &event),
            None => false,
        };

        if let WindowEvent::RedrawRequested = event {
            self.frame();
            return;
        }

        for engine_event in translate_window_event(&event) {
            // Close and resize concern the engine itself; they are routed
            // even when the overlay wanted the underlying native event.
            let structural = matches!(
                engine_event.kind(),
                EventKind::WindowClose | EventKind::WindowResize
            );
            if consumed && !structural {
                continue;
            }
            self.route(engine_event, event_loop);
        }
    }

    /// Called when the event loop has processed all pending events and is
    /// about to wait. Requesting a redraw here keeps the frame loop hot.
    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

/// Implementing `Drop` is the idiomatic way to handle cleanup: when the
/// event loop exits, the engine shuts down in a controlled order. Layers are
/// detached by the `LayerStack`'s own teardown.
impl<A: Application> Drop for EngineState<A> {
    fn drop(&mut self) {
        log::info!("EngineState is being dropped. Performing controlled shutdown...");

        // Drop the application and layers while the renderer still exists.
        self.app = None;
        self.layers = LayerStack::new();

        if let Some(mut renderer) = self.renderer.take() {
            renderer.shutdown();
        }

        log::info!("Engine systems shutdown complete.");
    }
}
