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

//! The window contract every windowing backend implements.

use raw_window_handle::{HasDisplayHandle, HasWindowHandle};
use std::sync::Arc;

/// Combines the raw-handle traits a graphics backend needs from a window,
/// so the pair can be used as a single trait object.
pub trait WindowHandle: HasWindowHandle + HasDisplayHandle {}

impl<T: HasWindowHandle + HasDisplayHandle> WindowHandle for T {}

/// A shared, thread-safe handle to the native window, suitable for surface
/// creation by the render system.
pub type StrataWindowHandle = Arc<dyn WindowHandle + Send + Sync>;

/// The behavior the engine requires from a window.
///
/// Any windowing backend (winit, SDL, ...) can implement this trait to host
/// the engine. The backend is also expected to pump native events once per
/// frame and hand translated engine events to the runner; that wiring lives
/// with the backend, not in this contract.
pub trait StrataWindow: HasWindowHandle + HasDisplayHandle {
    /// Returns the physical dimensions (width, height) of the window's inner
    /// area.
    fn inner_size(&self) -> (u32, u32);

    /// Returns the display scale factor, used for HiDPI-aware overlays.
    fn scale_factor(&self) -> f64;

    /// Requests that the window be redrawn; drives the frame loop.
    fn request_redraw(&self);

    /// Clones a shared handle to the window for the render system's surface
    /// creation.
    fn clone_handle_arc(&self) -> StrataWindowHandle;

    /// Returns a stable, unique identifier for the window, used to filter
    /// native events when more than one window exists on the process.
    fn id(&self) -> u64;
}
