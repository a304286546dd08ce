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

//! Core wgpu state: instance, adapter, device, queue, and the surface.

use strata_core::platform::window::StrataWindowHandle;
use strata_core::renderer::RenderError;
use wgpu::SurfaceTargetUnsafe;

/// Holds the core wgpu objects for one window surface.
///
/// Uncaptured device errors are forwarded into the `flume` channel supplied
/// at creation; the render system drains that channel once per frame so
/// backend failures surface in the log without interrupting the loop.
pub struct WgpuContext {
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub surface_config: wgpu::SurfaceConfiguration,
}

impl WgpuContext {
    /// Asynchronously initializes the graphics context for a window surface.
    ///
    /// ## Arguments
    /// * `window_handle` - A shared handle to the native window.
    /// * `window_size` - The initial physical size of the window surface.
    /// * `error_sink` - Channel receiving uncaptured device errors.
    pub async fn new(
        window_handle: StrataWindowHandle,
        window_size: (u32, u32),
        error_sink: flume::Sender<String>,
    ) -> Result<Self, RenderError> {
        log::info!("Initializing wgpu graphics context...");

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());

        // --- 1. Create Surface ---
        let surface_target = unsafe {
            SurfaceTargetUnsafe::from_window(&window_handle).map_err(|e| {
                RenderError::SurfaceCreation {
                    details: format!("surface target: {e}"),
                }
            })?
        };
        let surface = unsafe {
            instance
                .create_surface_unsafe(surface_target)
                .map_err(|e| RenderError::SurfaceCreation {
                    details: e.to_string(),
                })?
        };
        log::debug!("wgpu surface created for the window.");

        // --- 2. Select Adapter, Create Logical Device and Command Queue ---
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| RenderError::BackendUnavailable {
                details: format!("no suitable adapter: {e}"),
            })?;

        let adapter_info = adapter.get_info();
        log::info!(
            "Using graphics adapter: \"{}\" (Backend: {:?})",
            adapter_info.name,
            adapter_info.backend
        );

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("Strata Engine Logical Device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: wgpu::MemoryHints::default(),
                trace: wgpu::Trace::default(),
                experimental_features: wgpu::ExperimentalFeatures::default(),
            })
            .await
            .map_err(|e| RenderError::BackendUnavailable {
                details: format!("device creation: {e}"),
            })?;
        log::info!("Logical device and command queue created.");

        device.on_uncaptured_error(std::sync::Arc::new(move |e| {
            // Errors land in the per-frame poll; if the receiver is gone the
            // system is shutting down and the report is moot.
            let _ = error_sink.send(format!("{e}"));
        }));

        // --- 3. Configure Surface ---
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .unwrap_or(surface_caps.formats[0]);

        let surface_config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: window_size.0.max(1),
            height: window_size.1.max(1),
            present_mode: surface_caps
                .present_modes
                .iter()
                .copied()
                .find(|m| *m == wgpu::PresentMode::Mailbox)
                .unwrap_or(wgpu::PresentMode::Fifo), // Fifo is guaranteed to be supported
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &surface_config);

        Ok(Self {
            surface,
            device,
            queue,
            surface_config,
        })
    }

    /// Reconfigures the underlying surface (swapchain) when the window is
    /// resized.
    pub fn resize(&mut self, new_width: u32, new_height: u32) {
        if new_width > 0 && new_height > 0 {
            log::info!("WgpuContext: Resizing surface configuration to {new_width}x{new_height}");
            self.surface_config.width = new_width;
            self.surface_config.height = new_height;
            self.surface.configure(&self.device, &self.surface_config);
        } else {
            log::warn!(
                "WgpuContext: Ignoring resize request to zero dimensions: {new_width}x{new_height}"
            );
        }
    }

    /// Reapplies the current surface configuration, recovering a lost or
    /// outdated swapchain.
    pub fn reconfigure(&self) {
        self.surface.configure(&self.device, &self.surface_config);
    }

    /// Acquires the current surface texture for rendering.
    pub fn get_current_texture(&self) -> Result<wgpu::SurfaceTexture, wgpu::SurfaceError> {
        self.surface.get_current_texture()
    }

    /// Returns the format the surface was configured with.
    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.surface_config.format
    }

    /// Returns the size of the surface configuration.
    pub fn size(&self) -> (u32, u32) {
        (self.surface_config.width, self.surface_config.height)
    }
}
