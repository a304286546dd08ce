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

//! The egui-based overlay host.
//!
//! Owns the `egui::Context` and the winit input glue. Native window events
//! are forwarded through [`EguiOverlay::on_window_event`] so the overlay
//! maintains its own input state, independent of the engine's event model.
//! The per-frame UI pass is bracketed by [`EguiOverlay::begin_frame`] and
//! [`OverlayFrame::finish`]; the frame guard closes the pass on drop, so the
//! begin/end pairing holds even if a layer's render hook unwinds.

use strata_core::renderer::OverlayPaint;
use winit::event::WindowEvent;
use winit::window::Window;

/// Hosts the egui context and its winit platform state.
pub struct EguiOverlay {
    ctx: egui::Context,
    state: egui_winit::State,
}

impl EguiOverlay {
    /// Creates an overlay host bound to a window.
    pub fn new(window: &Window) -> Self {
        let ctx = egui::Context::default();
        let state = egui_winit::State::new(
            ctx.clone(),
            egui::ViewportId::ROOT,
            window,
            Some(window.scale_factor() as f32),
            None,
            None, // max_texture_side
        );
        log::info!("Egui overlay host initialized.");
        Self { ctx, state }
    }

    /// Borrows the overlay's UI context.
    pub fn context(&self) -> &egui::Context {
        &self.ctx
    }

    /// Forwards one native window event to the overlay's input state.
    ///
    /// Returns whether the overlay consumed the event (e.g. typing into a
    /// focused text field); consumed events should not be routed to the
    /// layer stack.
    pub fn on_window_event(&mut self, window: &Window, event: &WindowEvent) -> bool {
        self.state.on_window_event(window, event).consumed
    }

    /// Opens the per-frame UI pass and returns its guard.
    ///
    /// Layers draw through [`OverlayFrame::context`]; the pass is closed by
    /// [`OverlayFrame::finish`], or by the guard's drop if the bracket is
    /// abandoned mid-frame.
    pub fn begin_frame<'a>(&'a mut self, window: &'a Window) -> OverlayFrame<'a> {
        let raw_input = self.state.take_egui_input(window);
        self.ctx.begin_pass(raw_input);
        OverlayFrame {
            overlay: self,
            window,
            open: true,
        }
    }
}

/// Guard over one open overlay UI pass.
pub struct OverlayFrame<'a> {
    overlay: &'a mut EguiOverlay,
    window: &'a Window,
    open: bool,
}

impl OverlayFrame<'_> {
    /// Borrows the UI context layers draw with.
    pub fn context(&self) -> &egui::Context {
        &self.overlay.ctx
    }

    /// Closes the pass: applies platform output (cursor, clipboard, ...)
    /// and tessellates the frame's shapes into paint-ready geometry.
    pub fn finish(mut self) -> OverlayPaint {
        self.open = false;
        let output = self.overlay.ctx.end_pass();
        self.overlay
            .state
            .handle_platform_output(self.window, output.platform_output);
        let paint_jobs = self
            .overlay
            .ctx
            .tessellate(output.shapes, output.pixels_per_point);
        OverlayPaint {
            pixels_per_point: output.pixels_per_point,
            paint_jobs,
            textures_delta: output.textures_delta,
        }
    }
}

impl Drop for OverlayFrame<'_> {
    fn drop(&mut self) {
        if self.open {
            // The bracket was abandoned (most likely a panicking layer hook);
            // close the pass so the context stays usable next frame.
            let _ = self.overlay.ctx.end_pass();
        }
    }
}
