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

//! # Strata Infra
//!
//! Concrete implementations of the engine's external collaborators: the
//! winit window backend, winit-to-engine event translation, the wgpu render
//! system, and the egui overlay host.

pub mod graphics;
pub mod overlay;
pub mod platform;

pub use graphics::wgpu::WgpuRenderSystem;
pub use overlay::{EguiOverlay, OverlayFrame};
pub use platform::input::translate_window_event;
pub use platform::window::{WinitWindow, WinitWindowBuilder};
