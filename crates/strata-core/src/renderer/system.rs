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

//! The `RenderSystem` trait and the frame data types it consumes.

use crate::math::LinearRgba;
use crate::platform::window::StrataWindow;
use crate::renderer::error::RenderError;

/// A single position+color vertex as uploaded to the GPU.
///
/// `#[repr(C)]` plus the bytemuck derives make the slab directly castable
/// for buffer uploads.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    /// Position in scene space.
    pub position: [f32; 3],
    /// Linear RGBA vertex color.
    pub color: [f32; 4],
}

/// One renderable submission: an indexed triangle list of colored vertices.
#[derive(Debug, Clone)]
pub struct RenderObject {
    /// The object's vertices.
    pub vertices: Vec<Vertex>,
    /// Triangle-list indices into `vertices`.
    pub indices: Vec<u32>,
}

/// Per-frame view parameters recorded at `begin_scene`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneView {
    /// The color the frame is cleared to.
    pub clear_color: LinearRgba,
    /// Column-major view-projection matrix applied to every submission.
    pub view_projection: [[f32; 4]; 4],
}

impl SceneView {
    /// The identity view-projection matrix (clip space passthrough).
    pub const IDENTITY: [[f32; 4]; 4] = [
        [1.0, 0.0, 0.0, 0.0],
        [0.0, 1.0, 0.0, 0.0],
        [0.0, 0.0, 1.0, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ];
}

impl Default for SceneView {
    fn default() -> Self {
        Self {
            clear_color: LinearRgba::new(0.01, 0.02, 0.03, 1.0),
            view_projection: Self::IDENTITY,
        }
    }
}

/// Counters describing the most recently presented frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderStats {
    /// Monotonic frame counter, starting at 1 for the first presented frame.
    pub frame_number: u64,
    /// Scene draw calls recorded this frame (overlay excluded).
    pub draw_calls: u32,
    /// Scene vertices uploaded this frame.
    pub vertices: u32,
}

/// Tessellated overlay output, ready for the render system's overlay pass.
///
/// Produced by the overlay host after the per-frame UI pass closes; the
/// render system paints it on top of the scene without knowing anything
/// about the overlay library's state machine.
pub struct OverlayPaint {
    /// Scale factor the geometry was tessellated at.
    pub pixels_per_point: f32,
    /// Clipped meshes to paint, in paint order.
    pub paint_jobs: Vec<egui::ClippedPrimitive>,
    /// Font/image texture changes to apply before painting.
    pub textures_delta: egui::TexturesDelta,
}

/// The contract a render system implements.
///
/// The engine calls these operations in a fixed per-frame sequence:
/// `poll_errors`, `begin_scene`, `submit`*, `end_scene`, `render_overlay`,
/// `present`. Any operation may fail; failures are logged by the caller and
/// the frame is abandoned, never retried.
pub trait RenderSystem {
    /// Initializes the system against a window's surface. Must be called
    /// once before any frame operation.
    fn init(&mut self, window: &dyn StrataWindow) -> Result<(), RenderError>;

    /// Reconfigures the surface for a new window size.
    fn resize(&mut self, new_width: u32, new_height: u32);

    /// Opens a frame: acquires the surface texture and records the clear
    /// color and view transform for the scene pass.
    fn begin_scene(&mut self, view: &SceneView) -> Result<(), RenderError>;

    /// Queues one object for the current frame's scene pass.
    fn submit(&mut self, object: RenderObject);

    /// Closes the scene: uploads queued geometry and encodes the scene pass.
    fn end_scene(&mut self) -> Result<(), RenderError>;

    /// Paints the overlay on top of the current frame's scene.
    fn render_overlay(&mut self, paint: OverlayPaint) -> Result<(), RenderError>;

    /// Presents the frame to the window and advances the frame counter.
    fn present(&mut self) -> Result<RenderStats, RenderError>;

    /// Drains backend errors collected since the last call, logging each.
    /// Returns how many were drained. Called once per frame; errors here are
    /// informational, the loop continues.
    fn poll_errors(&mut self) -> usize;

    /// Counters for the most recently presented frame.
    fn frame_stats(&self) -> &RenderStats;

    /// Releases the system's resources. Idempotent.
    fn shutdown(&mut self);
}
